//! Screen model implementation
//!
//! A screen owns an arena of lines: archived scrollback lines first, then
//! exactly `rows` visible lines. Trimming scrollback is a pop from the front.
//! The screen also carries its own cursor, scroll region, G0-G3 bindings and
//! saved-cursor slot. The primary and alternate screens are two instances of
//! this type; the alternate one is created with a scrollback limit of zero.
//!
//! Every coordinate taken by the primitives here is clamped rather than
//! rejected. Signed parameters let callers pass raw, possibly negative,
//! arithmetic straight through.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::attr::Attr;
use super::cell::Cell;
use super::charset::CharsetState;
use super::cursor::{Cursor, SavedCursor};
use super::line::Line;

/// One of the two terminal screens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screen {
    cols: usize,
    rows: usize,
    /// Scrollback lines followed by the visible lines
    lines: VecDeque<Line>,
    /// Number of archived lines at the front of `lines`
    scrollback: usize,
    scrollback_limit: usize,
    cursor: Cursor,
    /// First row of the scroll region (inclusive)
    top: usize,
    /// End of the scroll region (exclusive)
    bottom: usize,
    /// G0-G3 bindings and the selected slot
    pub charsets: CharsetState,
    saved: Option<SavedCursor>,
}

impl Screen {
    /// Create a blank screen. Dimensions are clamped to at least 1x1.
    pub fn new(cols: usize, rows: usize, scrollback_limit: usize) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            lines: (0..rows).map(|_| Line::new()).collect(),
            scrollback: 0,
            scrollback_limit,
            cursor: Cursor::new(),
            top: 0,
            bottom: rows,
            charsets: CharsetState::default(),
            saved: None,
        }
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of visible rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// First row of the scroll region
    pub fn scroll_top(&self) -> usize {
        self.top
    }

    /// Row just past the scroll region
    pub fn scroll_bottom(&self) -> usize {
        self.bottom
    }

    /// Number of archived lines above the visible grid
    pub fn scrollback_len(&self) -> usize {
        self.scrollback
    }

    pub fn scrollback_limit(&self) -> usize {
        self.scrollback_limit
    }

    /// Archived line `index`, 0 being the oldest
    pub fn scrollback_line(&self, index: usize) -> Option<&Line> {
        if index < self.scrollback {
            self.lines.get(index)
        } else {
            None
        }
    }

    /// Visible line `row`
    pub fn line(&self, row: usize) -> Option<&Line> {
        if row < self.rows {
            self.lines.get(self.scrollback + row)
        } else {
            None
        }
    }

    /// All visible lines, top to bottom
    pub fn visible_lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter().skip(self.scrollback)
    }

    /// Cell at (`col`, `row`) on the visible grid
    pub fn cell(&self, col: usize, row: usize) -> Cell {
        self.line(row).map(|line| line.cell(col)).unwrap_or(Cell::BLANK)
    }

    fn line_mut(&mut self, row: usize) -> Option<&mut Line> {
        if row < self.rows {
            self.lines.get_mut(self.scrollback + row)
        } else {
            None
        }
    }

    /// Move the cursor, clamping the column to the screen and the row to
    /// either the screen or, with `origin` set, the scroll region.
    pub fn goto(&mut self, col: isize, row: isize, origin: bool) {
        let (min_row, max_row) = if origin {
            (self.top, self.bottom)
        } else {
            (0, self.rows)
        };
        self.cursor.col = col.max(0) as usize;
        self.cursor.row = row.max(0) as usize;
        self.cursor.clamp(self.cols, min_row, max_row);
    }

    /// Write `text` at (`col`, `row`) with `attr`, clipped at the right
    /// margin. The cursor lands just past the text, clamped to the last
    /// column.
    pub fn put_string(&mut self, col: usize, row: usize, text: &[char], attr: Attr) {
        let cols = self.cols;
        let row = row.min(self.rows - 1);
        if let Some(line) = self.line_mut(row) {
            line.write(col, text, attr, cols);
        }
        self.cursor.col = (col + text.len()).min(cols - 1);
        self.cursor.row = row;
    }

    /// Write `text` at the cursor
    pub fn write(&mut self, text: &[char], attr: Attr) {
        let Cursor { col, row } = self.cursor;
        self.put_string(col, row, text, attr);
    }

    /// Overwrite the rectangle with spaces carrying `attr`
    pub fn clear_region(&mut self, x: isize, y: isize, w: isize, h: isize, attr: Attr) {
        let Some((x, y, w, h)) = self.clip(x, y, w, h) else {
            return;
        };
        if self.scrollback == 0 && w == self.cols && h == self.rows && attr == Attr::DEFAULT {
            // Nothing to preserve: drop the stored lines wholesale
            self.lines = (0..self.rows).map(|_| Line::new()).collect();
            return;
        }
        self.fill_rect(x, y, w, h, attr);
    }

    /// Move the `w` x `h` rectangle at (`x`, `y`) by (`dx`, `dy`) and blank
    /// what it vacates with `fill` (underline removed).
    ///
    /// Moving full-width lines up across the whole primary screen archives
    /// the lines that leave the top; every other scroll discards them.
    #[allow(clippy::too_many_arguments)]
    pub fn scroll_region(
        &mut self,
        x: isize,
        y: isize,
        w: isize,
        h: isize,
        dx: isize,
        dy: isize,
        fill: Attr,
    ) {
        let cols = self.cols as isize;
        let rows = self.rows as isize;
        let left = (-dx).max(0);
        let right = dx.max(0);
        let up = (-dy).max(0);
        let down = dy.max(0);

        let x0 = x.max(left);
        let w = (x + w).min(cols - right) - x0;
        if w <= 0 {
            return;
        }
        let y0 = y.max(up);
        let h = (y + h).min(rows - down) - y0;
        if h < 0 {
            return;
        }
        let (x, y) = (x0, y0);
        let fill = fill.scroll_fill();

        if dx == 0 && x == 0 && w == cols {
            if dy < 0 {
                if self.scrollback_limit > 0 && y == up && h == rows - up {
                    self.archive(up as usize, fill);
                } else {
                    let base = self.scrollback;
                    let at = base + (y - up) as usize;
                    for _ in 0..up {
                        self.lines.remove(at);
                    }
                    let at = base + (y + h - up) as usize;
                    for _ in 0..up {
                        self.lines.insert(at, Line::blank(self.cols, fill));
                    }
                }
            } else if dy > 0 {
                let base = self.scrollback;
                let at = base + (y + h) as usize;
                for _ in 0..down {
                    self.lines.remove(at);
                }
                let at = base + y as usize;
                for _ in 0..down {
                    self.lines.insert(at, Line::blank(self.cols, fill));
                }
            }
            return;
        }

        let (xu, wu) = (x as usize, w as usize);
        let dest_col = (x + dx) as usize;
        let rows_iter: Box<dyn Iterator<Item = isize>> = if dy <= 0 {
            Box::new(y..y + h)
        } else {
            Box::new((y..y + h).rev())
        };
        for row in rows_iter {
            let segment = match self.line(row as usize) {
                Some(line) => line.segment(xu, wu),
                None => continue,
            };
            if let Some(line) = self.line_mut((row + dy) as usize) {
                line.put_segment(dest_col, &segment);
            }
        }

        if dx > 0 {
            self.fill_clipped(x, y, dx, h, fill);
        } else if dx < 0 {
            self.fill_clipped(x + w + dx, y, -dx, h, fill);
        }
        if dy > 0 {
            self.fill_clipped(x, y, w, dy, fill);
        } else if dy < 0 {
            self.fill_clipped(x, y + h + dy, w, -dy, fill);
        }
    }

    /// Push `count` lines off the top into scrollback, trimming the oldest
    /// beyond the limit.
    fn archive(&mut self, count: usize, fill: Attr) {
        for _ in 0..count {
            self.lines.push_back(Line::blank(self.cols, fill));
            self.scrollback += 1;
        }
        self.trim_scrollback();
    }

    fn trim_scrollback(&mut self) {
        while self.scrollback > self.scrollback_limit {
            self.lines.pop_front();
            self.scrollback -= 1;
        }
    }

    fn clip(&self, x: isize, y: isize, w: isize, h: isize) -> Option<(usize, usize, usize, usize)> {
        let x0 = x.max(0);
        let w = (x + w).min(self.cols as isize) - x0;
        let y0 = y.max(0);
        let h = (y + h).min(self.rows as isize) - y0;
        if w <= 0 || h <= 0 {
            return None;
        }
        Some((x0 as usize, y0 as usize, w as usize, h as usize))
    }

    fn fill_clipped(&mut self, x: isize, y: isize, w: isize, h: isize, attr: Attr) {
        if let Some((x, y, w, h)) = self.clip(x, y, w, h) {
            self.fill_rect(x, y, w, h, attr);
        }
    }

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, attr: Attr) {
        for row in y..y + h {
            if let Some(line) = self.line_mut(row) {
                line.fill(x, x + w, attr);
            }
        }
    }

    /// Set the scroll region to rows `[top, bottom)`
    pub fn set_scroll_region(&mut self, top: usize, bottom: usize) {
        let bottom = bottom.clamp(1, self.rows);
        self.top = top.min(bottom - 1);
        self.bottom = bottom;
    }

    /// Reset the scroll region to the full screen
    pub fn reset_scroll_region(&mut self) {
        self.top = 0;
        self.bottom = self.rows;
    }

    /// Record the cursor position together with `attr` and the charsets
    pub fn save_cursor(&mut self, attr: Attr) {
        self.saved = Some(SavedCursor {
            col: self.cursor.col,
            row: self.cursor.row,
            attr,
            charsets: self.charsets.clone(),
        });
    }

    /// The saved-cursor slot, valid only after an explicit save
    pub fn saved_cursor(&self) -> Option<&SavedCursor> {
        self.saved.as_ref()
    }

    pub fn forget_saved_cursor(&mut self) {
        self.saved = None;
    }

    /// Drop every line, including scrollback
    pub fn clear_history(&mut self) {
        self.lines = (0..self.rows).map(|_| Line::new()).collect();
        self.scrollback = 0;
    }

    /// Change the screen size.
    ///
    /// Shrinking moves lines that would fall off the top into scrollback
    /// (discarded on a screen without scrollback); growing pulls archived
    /// lines back down first. Lines are truncated to the new width, and the
    /// cursor and scroll region are clipped.
    pub fn resize(&mut self, cols: usize, rows: usize) {
        let cols = cols.max(1);
        let rows = rows.max(1);
        let old_rows = self.rows;

        if rows < old_rows {
            let used = self
                .visible_lines()
                .enumerate()
                .filter(|(_, line)| !line.is_blank())
                .map(|(row, _)| row + 1)
                .max()
                .unwrap_or(0)
                .max(self.cursor.row + 1);
            let excess = used.saturating_sub(rows);
            self.scrollback += excess;
            self.cursor.row = self.cursor.row.saturating_sub(excess);
            self.lines.truncate(self.scrollback + rows);
        } else if rows > old_rows {
            let pull = self.scrollback.min(rows - old_rows);
            self.scrollback -= pull;
            self.cursor.row += pull;
            while self.lines.len() < self.scrollback + rows {
                self.lines.push_back(Line::new());
            }
        }
        self.rows = rows;
        self.cols = cols;
        self.trim_scrollback();

        for line in &mut self.lines {
            line.truncate(cols);
        }

        if self.bottom > rows || self.bottom == old_rows {
            self.bottom = rows;
        }
        if self.top >= self.bottom {
            self.top = self.bottom.saturating_sub(1);
        }
        self.cursor.clamp(cols, 0, rows);
    }
}
