//! Terminal escape sequence parser
//!
//! Turns a byte stream into codepoints and codepoints into terminal actions:
//! a streaming UTF-8 decoder, the printable/control classification tables and
//! the escape sequence state machine.

mod actions;
mod control;
mod params;
mod state;
mod utf8;

pub use actions::{Action, CsiCommand, OscTarget};
pub use control::{is_printable, CTRL_ACTION, CTRL_ALWAYS};
pub use params::{Params, MAX_PARAMS};
pub use state::{Parser, State, MAX_OSC_LEN};
pub use utf8::{Utf8Decoder, Utf8Result};
