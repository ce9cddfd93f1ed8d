//! Cursor state management
//!
//! The cursor is a position on the visible grid. The saved-cursor slot used
//! by DECSC/DECRC (and `CSI s`/`CSI u`) also carries the attribute and the
//! character set bindings in effect at the time of the save.

use serde::{Deserialize, Serialize};

use super::attr::Attr;
use super::charset::CharsetState;

/// Cursor position on the visible grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    /// Column position (0-indexed)
    pub col: usize,
    /// Row position (0-indexed)
    pub row: usize,
}

impl Cursor {
    /// Create a new cursor at the home position
    pub fn new() -> Self {
        Self::default()
    }

    /// Clamp the column into `[0, cols)` and the row into `[min_row, max_row)`
    pub fn clamp(&mut self, cols: usize, min_row: usize, max_row: usize) {
        self.col = self.col.min(cols.saturating_sub(1));
        let max_row = max_row.max(min_row + 1);
        self.row = self.row.clamp(min_row, max_row - 1);
    }
}

/// Saved cursor state for DECSC/DECRC
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedCursor {
    pub col: usize,
    pub row: usize,
    pub attr: Attr,
    pub charsets: CharsetState,
}
