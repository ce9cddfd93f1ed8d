//! Tab stops
//!
//! Every eighth column is a stop unless overridden. Overrides are sparse:
//! HTS sets a stop, `CSI 0 g` clears one, `CSI 2/3 g` clears them all.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

const DEFAULT_INTERVAL: usize = 8;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabStops {
    overrides: BTreeMap<usize, bool>,
    defaults_cleared: bool,
}

impl TabStops {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `col` is a tab stop
    pub fn is_stop(&self, col: usize) -> bool {
        match self.overrides.get(&col) {
            Some(&explicit) => explicit,
            None => !self.defaults_cleared && col % DEFAULT_INTERVAL == 0,
        }
    }

    /// Set a stop at `col` (HTS)
    pub fn set(&mut self, col: usize) {
        self.overrides.insert(col, true);
    }

    /// Clear the stop at `col` (TBC 0)
    pub fn clear(&mut self, col: usize) {
        self.overrides.insert(col, false);
    }

    /// Clear every stop, including the defaults (TBC 3)
    pub fn clear_all(&mut self) {
        self.overrides.clear();
        self.defaults_cleared = true;
    }

    /// Back to the every-eighth-column default
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Column reached by advancing `count` stops from `col`, clamped to the
    /// last column
    pub fn next_stop(&self, col: usize, count: usize, cols: usize) -> usize {
        let last = cols.saturating_sub(1);
        let mut cx = col;
        for _ in 0..count {
            cx = (cx + 1..cols).find(|&c| self.is_stop(c)).unwrap_or(last);
            if cx >= last {
                break;
            }
        }
        cx.min(last)
    }

    /// Column reached by moving back `count` stops from `col`, stopping at 0
    pub fn prev_stop(&self, col: usize, count: usize) -> usize {
        let mut cx = col;
        for _ in 0..count {
            cx = (0..cx).rev().find(|&c| self.is_stop(c)).unwrap_or(0);
            if cx == 0 {
                break;
            }
        }
        cx
    }
}
