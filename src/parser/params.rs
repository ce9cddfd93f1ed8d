//! Parameter accumulation for CSI sequences.
//!
//! Parameters are decimal numbers separated by `;`. At most sixteen are
//! kept; digits saturate at `u16::MAX`, separators past the last slot are
//! ignored. A missing parameter reads as 0.

use serde::{Deserialize, Serialize};

pub const MAX_PARAMS: usize = 16;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    values: [u16; MAX_PARAMS],
    /// Slot currently receiving digits
    index: usize,
    /// A leading `?` marked a DEC private sequence
    private: bool,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh parameters for a DEC private (`?`) sequence
    pub fn private() -> Self {
        Self {
            private: true,
            ..Self::default()
        }
    }

    pub fn is_private(&self) -> bool {
        self.private
    }

    /// Fold a decimal digit (0-9) into the current parameter
    pub fn push_digit(&mut self, digit: u8) {
        let slot = &mut self.values[self.index];
        *slot = slot.saturating_mul(10).saturating_add(u16::from(digit));
    }

    /// Move on to the next parameter (`;`)
    pub fn next_param(&mut self) {
        if self.index + 1 < MAX_PARAMS {
            self.index += 1;
        }
    }

    /// Number of separators seen so far
    pub fn separators(&self) -> usize {
        self.index
    }

    /// Number of parameter slots in use (always at least one)
    pub fn slots(&self) -> usize {
        self.index + 1
    }

    /// Parameter `index`, 0 if absent
    pub fn get(&self, index: usize) -> u16 {
        if index <= self.index {
            self.values[index]
        } else {
            0
        }
    }

    /// Parameter `index`, with 0 (or absent) meaning 1
    pub fn count(&self, index: usize) -> u16 {
        self.get(index).max(1)
    }

    /// All parameters in use, in order
    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.values[..=self.index].iter().copied()
    }
}
