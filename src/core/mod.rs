//! Terminal Core Module
//!
//! Screen state independent of how bytes are parsed. This module contains:
//! - Attribute bitmask and its resolution into renderable colours
//! - Cells, lines with implicit trailing blanks, same-attribute runs
//! - G0-G3 character set maps
//! - Screen model (line arena, scrollback, cursor, scroll region)
//! - Tab stops and mode flags
//! - Deterministic snapshot generation

mod attr;
mod cell;
mod charset;
mod cursor;
mod line;
mod modes;
mod screen;
mod snapshot;
mod tabs;

pub use attr::{Attr, AttrFlags, Style};
pub use cell::Cell;
pub use charset::{direct_font_glyph, is_invisible_format, CharsetMap, CharsetState};
pub use cursor::{Cursor, SavedCursor};
pub use line::{Line, Run};
pub use modes::Modes;
pub use screen::Screen;
pub use snapshot::{CompactSnapshot, Snapshot};
pub use tabs::TabStops;
