//! WebVT Terminal Emulation Library
//!
//! A VT100/xterm-compatible terminal engine for browser-hosted shell
//! sessions. Bytes from the remote side go in, a screen model a renderer can
//! draw comes out, along with any device reports the terminal must send back.
//!
//! - `core`: Attributes, cells, lines, screens, charsets, snapshots
//! - `parser`: UTF-8 decoding and the escape sequence state machine
//! - `terminal`: The engine tying them together

pub mod config;
pub mod core;
pub mod event;
pub mod parser;
pub mod terminal;

pub use crate::config::{ConfigError, TerminalConfig};
pub use crate::core::Snapshot;
pub use crate::event::TerminalEvent;
pub use crate::terminal::Terminal;
