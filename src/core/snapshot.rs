//! Deterministic snapshot generation
//!
//! Snapshots capture what a renderer needs from the current screen in a
//! serializable format, for tests, debugging and the headless runner. Given
//! the same byte stream, the terminal must produce identical snapshots no
//! matter how the stream was split into chunks.

use serde::{Deserialize, Serialize};

use super::line::Line;
use super::modes::Modes;
use super::screen::Screen;

/// A complete snapshot of the visible terminal state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Screen dimensions
    pub cols: usize,
    pub rows: usize,
    /// Visible lines, top to bottom
    pub lines: Vec<LineSnapshot>,
    /// Cursor state
    pub cursor: CursorSnapshot,
    /// Scroll region, bottom exclusive
    pub scroll_top: usize,
    pub scroll_bottom: usize,
    /// Terminal modes
    pub modes: ModesSnapshot,
    /// Window title
    pub title: String,
    /// Status line
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
    /// Whether on alternate screen
    pub alternate_screen: bool,
    /// Scrollback line count
    pub scrollback_lines: usize,
}

/// One visible line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSnapshot {
    /// Text with trailing spaces removed
    pub text: String,
    /// Styled stretches of the line; default-styled text is omitted
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub runs: Vec<RunSnapshot>,
}

/// A stretch of cells sharing one resolved style
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSnapshot {
    pub start: usize,
    pub text: String,
    pub fg: u8,
    pub bg: u8,
    #[serde(default, skip_serializing_if = "is_false")]
    pub underline: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Snapshot of cursor state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorSnapshot {
    pub col: usize,
    pub row: usize,
    pub visible: bool,
}

/// Snapshot of terminal modes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModesSnapshot {
    #[serde(default, skip_serializing_if = "is_false")]
    pub application_cursor: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub application_keypad: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub mouse_reporting: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub insert: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub origin: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub linefeed_mode: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub reverse_video: bool,
    pub autowrap: bool,
    pub utf8: bool,
}

impl From<&Modes> for ModesSnapshot {
    fn from(modes: &Modes) -> Self {
        ModesSnapshot {
            application_cursor: modes.cursor_keys_application,
            application_keypad: modes.keypad_application,
            mouse_reporting: modes.mouse_reporting,
            insert: modes.insert,
            origin: modes.origin,
            linefeed_mode: modes.linefeed_newline,
            reverse_video: modes.reverse_video,
            autowrap: modes.autowrap,
            utf8: modes.utf8,
        }
    }
}

impl From<&Line> for LineSnapshot {
    fn from(line: &Line) -> Self {
        let runs = line
            .runs()
            .into_iter()
            .filter_map(|run| {
                let style = run.attr.resolve();
                (!style.is_plain()).then(|| RunSnapshot {
                    start: run.start,
                    text: run.text,
                    fg: style.fg,
                    bg: style.bg,
                    underline: style.underline,
                })
            })
            .collect();
        LineSnapshot {
            text: line.text(),
            runs,
        }
    }
}

impl Snapshot {
    /// Capture `screen` together with the engine-wide state around it
    pub fn capture(
        screen: &Screen,
        modes: &Modes,
        title: &str,
        status: &str,
        alternate_screen: bool,
    ) -> Self {
        let cursor = screen.cursor();
        Snapshot {
            cols: screen.cols(),
            rows: screen.rows(),
            lines: screen.visible_lines().map(LineSnapshot::from).collect(),
            cursor: CursorSnapshot {
                col: cursor.col,
                row: cursor.row,
                visible: modes.cursor_visible,
            },
            scroll_top: screen.scroll_top(),
            scroll_bottom: screen.scroll_bottom(),
            modes: ModesSnapshot::from(modes),
            title: title.to_string(),
            status: status.to_string(),
            alternate_screen,
            scrollback_lines: screen.scrollback_len(),
        }
    }

    /// Convert snapshot to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse snapshot from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Plain text of the screen, one line per row, trailing blank rows
    /// dropped
    pub fn to_text(&self) -> String {
        let mut result = String::new();
        for line in &self.lines {
            result.push_str(&line.text);
            result.push('\n');
        }
        while result.ends_with("\n\n") {
            result.pop();
        }
        result
    }

    /// Compare the screen contents of two snapshots, ignoring title, modes
    /// and scrollback
    pub fn content_equals(&self, other: &Snapshot) -> bool {
        self.cols == other.cols
            && self.rows == other.rows
            && self.lines == other.lines
            && self.cursor == other.cursor
    }

    /// Text-only form for golden comparisons
    pub fn compact(&self) -> CompactSnapshot {
        CompactSnapshot {
            cols: self.cols,
            rows: self.rows,
            cursor: (self.cursor.col, self.cursor.row),
            lines: self.lines.iter().map(|line| line.text.clone()).collect(),
        }
    }
}

/// Text-only snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactSnapshot {
    pub cols: usize,
    pub rows: usize,
    /// (col, row)
    pub cursor: (usize, usize),
    pub lines: Vec<String>,
}
