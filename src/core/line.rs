//! Terminal line representation
//!
//! A line is conceptually as wide as the terminal, but only stores cells up to
//! the last one that differs from a default blank. Reads beyond the stored
//! length yield [`Cell::BLANK`], so trimming never changes what a renderer
//! sees.

use serde::{Deserialize, Serialize};

use super::attr::Attr;
use super::cell::Cell;

/// A row of cells in the terminal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    cells: Vec<Cell>,
}

/// A maximal stretch of cells sharing one attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    /// Column of the first cell
    pub start: usize,
    pub attr: Attr,
    pub text: String,
}

impl Line {
    /// Create an empty (all default blanks) line
    pub fn new() -> Self {
        Self::default()
    }

    /// A line of `cols` blanks carrying `attr`
    pub fn blank(cols: usize, attr: Attr) -> Self {
        if attr == Attr::DEFAULT {
            return Self::new();
        }
        Self {
            cells: vec![Cell::blank(attr); cols],
        }
    }

    /// Number of explicitly stored cells
    pub fn stored_len(&self) -> usize {
        self.cells.len()
    }

    /// Stored cells; everything after them is a default blank
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn is_blank(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at `col`, or a default blank past the stored end
    pub fn cell(&self, col: usize) -> Cell {
        self.cells.get(col).copied().unwrap_or(Cell::BLANK)
    }

    /// Overwrite cells starting at `col` with `text`, clipped to `cols`
    pub fn write(&mut self, col: usize, text: &[char], attr: Attr, cols: usize) {
        if col >= cols || text.is_empty() {
            return;
        }
        let end = (col + text.len()).min(cols);
        self.extend_to(end);
        for (cell, &ch) in self.cells[col..end].iter_mut().zip(text) {
            *cell = Cell::new(ch, attr);
        }
        self.trim();
    }

    /// Set `[start, end)` to blanks carrying `attr`
    pub fn fill(&mut self, start: usize, end: usize, attr: Attr) {
        if start >= end {
            return;
        }
        if attr == Attr::DEFAULT && start >= self.cells.len() {
            return;
        }
        self.extend_to(end);
        for cell in &mut self.cells[start..end] {
            *cell = Cell::blank(attr);
        }
        self.trim();
    }

    /// Copy of the cells in `[start, start + len)`, padded with blanks
    pub fn segment(&self, start: usize, len: usize) -> Vec<Cell> {
        (start..start + len).map(|col| self.cell(col)).collect()
    }

    /// Overwrite cells starting at `start` with `cells`
    pub fn put_segment(&mut self, start: usize, cells: &[Cell]) {
        if cells.is_empty() {
            return;
        }
        self.extend_to(start + cells.len());
        self.cells[start..start + cells.len()].copy_from_slice(cells);
        self.trim();
    }

    /// Drop everything at or beyond `cols`
    pub fn truncate(&mut self, cols: usize) {
        self.cells.truncate(cols);
        self.trim();
    }

    /// Text of the line with trailing spaces removed
    pub fn text(&self) -> String {
        let text: String = self.cells.iter().map(|c| c.ch).collect();
        text.trim_end_matches(' ').to_string()
    }

    /// Group the stored cells into same-attribute runs
    pub fn runs(&self) -> Vec<Run> {
        let mut runs: Vec<Run> = Vec::new();
        for (col, cell) in self.cells.iter().enumerate() {
            match runs.last_mut() {
                Some(run) if run.attr == cell.attr => run.text.push(cell.ch),
                _ => runs.push(Run {
                    start: col,
                    attr: cell.attr,
                    text: cell.ch.to_string(),
                }),
            }
        }
        runs
    }

    fn extend_to(&mut self, len: usize) {
        if self.cells.len() < len {
            self.cells.resize(len, Cell::BLANK);
        }
    }

    fn trim(&mut self) {
        while self.cells.last().is_some_and(Cell::is_default) {
            self.cells.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::attr::AttrFlags;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_read_past_end_is_blank() {
        let line = Line::new();
        assert_eq!(line.cell(50), Cell::BLANK);
        assert!(line.is_blank());
    }

    #[test]
    fn test_write_and_read() {
        let mut line = Line::new();
        line.write(2, &chars("abc"), Attr::DEFAULT, 80);
        assert_eq!(line.text(), "  abc");
        assert_eq!(line.cell(3).ch, 'b');
        assert_eq!(line.stored_len(), 5);
    }

    #[test]
    fn test_write_clips_to_width() {
        let mut line = Line::new();
        line.write(3, &chars("abcdef"), Attr::DEFAULT, 5);
        assert_eq!(line.text(), "   ab");
    }

    #[test]
    fn test_trailing_default_blanks_are_trimmed() {
        let mut line = Line::new();
        line.write(0, &chars("ab  "), Attr::DEFAULT, 80);
        assert_eq!(line.stored_len(), 2);
        line.fill(0, 2, Attr::DEFAULT);
        assert!(line.is_blank());
    }

    #[test]
    fn test_styled_blanks_are_kept() {
        let reverse = Attr::DEFAULT.with(AttrFlags::REVERSE);
        let line = Line::blank(10, reverse);
        assert_eq!(line.stored_len(), 10);
        assert_eq!(line.cell(9).attr, reverse);
        assert!(Line::blank(10, Attr::DEFAULT).is_blank());
    }

    #[test]
    fn test_runs_merge_same_attribute() {
        let red = Attr::DEFAULT.with_fg(1);
        let mut line = Line::new();
        line.write(0, &chars("ab"), Attr::DEFAULT, 80);
        line.write(2, &chars("cd"), red, 80);
        line.write(4, &chars("e"), red, 80);

        let runs = line.runs();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].text, "ab");
        assert_eq!(runs[1].start, 2);
        assert_eq!(runs[1].text, "cde");
        assert_eq!(runs[1].attr, red);
    }

    #[test]
    fn test_overwrite_splits_run() {
        let red = Attr::DEFAULT.with_fg(1);
        let mut line = Line::new();
        line.write(0, &chars("aaaa"), Attr::DEFAULT, 80);
        line.write(1, &chars("b"), red, 80);
        let runs = line.runs();
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].text, "a");
        assert_eq!(runs[1].text, "b");
        assert_eq!(runs[2].text, "aa");
    }

    #[test]
    fn test_segment_roundtrip() {
        let mut line = Line::new();
        line.write(0, &chars("hello"), Attr::DEFAULT, 80);
        let seg = line.segment(1, 3);
        line.put_segment(5, &seg);
        assert_eq!(line.text(), "helloell");
    }

    #[test]
    fn test_truncate() {
        let mut line = Line::new();
        line.write(0, &chars("hello world"), Attr::DEFAULT, 80);
        line.truncate(6);
        assert_eq!(line.text(), "hello");
        assert_eq!(line.stored_len(), 5);
    }
}
