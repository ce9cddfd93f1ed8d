//! Terminal Cell
//!
//! A cell is a plain value: one codepoint and the attribute it was written
//! with. Cells are not individually addressable objects; lines own them.

use serde::{Deserialize, Serialize};

use super::attr::{Attr, Style};

/// A single cell in the terminal grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// The character in this cell
    pub ch: char,
    /// Attribute the character was written with
    pub attr: Attr,
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

impl Cell {
    /// A space with the default attribute. Reads past the stored end of a
    /// line return this.
    pub const BLANK: Cell = Cell {
        ch: ' ',
        attr: Attr::DEFAULT,
    };

    /// Create a new cell
    pub fn new(ch: char, attr: Attr) -> Self {
        Self { ch, attr }
    }

    /// A space carrying the given attribute, as produced by erase and scroll
    pub fn blank(attr: Attr) -> Self {
        Self { ch: ' ', attr }
    }

    /// True for a default-attribute space, which may be stored implicitly
    pub fn is_default(&self) -> bool {
        *self == Self::BLANK
    }

    /// Resolved rendition of this cell
    pub fn style(&self) -> Style {
        self.attr.resolve()
    }
}
