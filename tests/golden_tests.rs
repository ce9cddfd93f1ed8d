//! Golden tests for terminal emulation
//!
//! These tests feed known byte sequences to the terminal and compare the
//! resulting state against the expected screen, cursor and replies.

use webvt::core::{Attr, AttrFlags, Cell, CompactSnapshot};
use webvt::{Terminal, TerminalConfig, TerminalEvent};

/// Helper to run a golden test
fn run_golden_test(input: &[u8], cols: usize, rows: usize) -> (Terminal, CompactSnapshot) {
    let mut term = Terminal::with_size(cols, rows);
    term.feed(input);
    let snapshot = term.snapshot().compact();
    (term, snapshot)
}

/// Helper to run a golden test with chunked input (tests streaming)
fn run_golden_test_chunked(input: &[u8], cols: usize, rows: usize, chunk_size: usize) -> Terminal {
    let mut term = Terminal::with_size(cols, rows);
    for chunk in input.chunks(chunk_size) {
        term.feed(chunk);
    }
    term
}

// ============================================================================
// Basic printing tests
// ============================================================================

#[test]
fn test_simple_text() {
    let (_, snapshot) = run_golden_test(b"Hello, World!", 80, 24);

    assert_eq!(snapshot.cursor, (13, 0));
    assert_eq!(snapshot.lines[0], "Hello, World!");
}

#[test]
fn test_multiline_text() {
    let (_, snapshot) = run_golden_test(b"Line 1\r\nLine 2\r\nLine 3", 80, 24);

    assert_eq!(snapshot.lines[0], "Line 1");
    assert_eq!(snapshot.lines[1], "Line 2");
    assert_eq!(snapshot.lines[2], "Line 3");
    assert_eq!(snapshot.cursor, (6, 2));
}

#[test]
fn test_hello_world_scenario() {
    let (term, snapshot) = run_golden_test(b"Hello\r\n\x1b[31mWorld\x1b[0m", 80, 24);

    assert_eq!(snapshot.lines[0], "Hello");
    assert_eq!(snapshot.lines[1], "World");
    assert_eq!(snapshot.cursor, (5, 1));
    assert_eq!(term.attr(), Attr::DEFAULT);

    for col in 0..5 {
        assert_eq!(term.cell_at(col, 0).attr, Attr::DEFAULT);
        assert_eq!(term.cell_at(col, 1).attr.fg(), 1);
        assert_eq!(term.cell_at(col, 1).style().fg, 1);
    }
    assert_eq!(term.cell_at(5, 1), Cell::BLANK);
}

#[test]
fn test_wrap_continues_on_next_line() {
    let (_, snapshot) = run_golden_test(b"0123456789ABC", 10, 3);

    assert_eq!(snapshot.lines[0], "0123456789");
    assert_eq!(snapshot.lines[1], "ABC");
    assert_eq!(snapshot.cursor, (3, 1));
}

#[test]
fn test_wrap_at_bottom_scrolls() {
    let (term, snapshot) = run_golden_test(b"aaaaa\r\nbbbbbcc", 5, 2);

    assert_eq!(snapshot.lines, vec!["bbbbb".to_string(), "cc".to_string()]);
    assert_eq!(term.scrollback_count(), 1);
}

// ============================================================================
// Cursor addressing
// ============================================================================

#[test]
fn test_cursor_position_is_one_based() {
    let (_, snapshot) = run_golden_test(b"\x1b[12;34H", 80, 24);
    assert_eq!(snapshot.cursor, (33, 11));
}

#[test]
fn test_cursor_position_defaults_and_clamps() {
    let (_, snapshot) = run_golden_test(b"\x1b[5;5H\x1b[H", 80, 24);
    assert_eq!(snapshot.cursor, (0, 0));

    let (_, snapshot) = run_golden_test(b"\x1b[100;200f", 80, 24);
    assert_eq!(snapshot.cursor, (79, 23));
}

#[test]
fn test_backspace_stops_at_left_margin() {
    let (_, snapshot) = run_golden_test(b"ab\x08\x08\x08X", 80, 24);
    assert_eq!(snapshot.lines[0], "Xb");
}

#[test]
fn test_eight_bit_csi() {
    // 0x9B is CSI when input is not decoded as UTF-8
    let (_, snapshot) = run_golden_test(b"\x1b%@\x9b3;4Hx", 80, 24);
    assert_eq!(snapshot.cursor, (4, 2));
}

// ============================================================================
// Attributes
// ============================================================================

#[test]
fn test_sgr_zero_always_resets() {
    let prefixes: [&[u8]; 4] = [
        b"\x1b[1;4;5;7m",
        b"\x1b[2;35;46m",
        b"\x1b[38m",
        b"\x1b[7;1;33;40m",
    ];
    for prefix in prefixes {
        let mut term = Terminal::with_size(20, 2);
        term.feed(prefix);
        term.feed(b"\x1b[0m");
        assert_eq!(term.attr(), Attr::DEFAULT);
    }
}

#[test]
fn test_reverse_video_attribute() {
    let (term, _) = run_golden_test(b"\x1b[7mX", 80, 24);
    let cell = term.cell_at(0, 0);
    assert!(cell.attr.contains(AttrFlags::REVERSE));
    let style = cell.style();
    assert_eq!(style.fg, 15);
    assert_eq!(style.bg, 0);
}

#[test]
fn test_scrolled_in_lines_drop_underline() {
    let (term, _) = run_golden_test(b"\x1b[4;44m\x1b[3;1H\n", 10, 3);
    let cell = term.cell_at(0, 2);
    assert_eq!(cell.attr.bg(), 4);
    assert!(!cell.attr.contains(AttrFlags::UNDERLINE));
}

// ============================================================================
// Scrollback
// ============================================================================

#[test]
fn test_scrollback_keeps_newest_lines() {
    let mut term = Terminal::new(TerminalConfig {
        cols: 10,
        rows: 3,
        scrollback_lines: 5,
        ..TerminalConfig::default()
    });
    for i in 0..20 {
        term.feed_str(&format!("line {i}\r\n"));
    }

    assert_eq!(term.scrollback_count(), 5);
    let screen = term.primary_screen();
    let archived: Vec<String> = (0..5)
        .filter_map(|i| screen.scrollback_line(i))
        .map(|line| line.text())
        .collect();
    assert_eq!(archived, ["line 13", "line 14", "line 15", "line 16", "line 17"]);
    assert_eq!(screen.line(0).map(|line| line.text()).as_deref(), Some("line 18"));
}

#[test]
fn test_scrollback_cap_after_long_scroll() {
    let (rows, cap, extra) = (4, 6, 3);
    let mut term = Terminal::new(TerminalConfig {
        cols: 8,
        rows,
        scrollback_lines: cap,
        ..TerminalConfig::default()
    });
    term.feed_str("\x1b[4;1H");
    term.feed(&vec![b'\n'; rows + cap + extra]);
    assert_eq!(term.scrollback_count(), cap);
}

#[test]
fn test_partial_region_does_not_archive() {
    let mut term = Terminal::with_size(10, 4);
    term.feed_str("\x1b[2;4r\x1b[4;1H\n\n\n");
    assert_eq!(term.scrollback_count(), 0);
}

// ============================================================================
// Decoding and streaming
// ============================================================================

#[test]
fn test_utf8_split_across_feeds() {
    let mut whole = Terminal::with_size(10, 1);
    whole.feed(&[0xE2, 0x82, 0xAC]);

    let mut split = Terminal::with_size(10, 1);
    split.feed(&[0xE2, 0x82]);
    split.feed(&[0xAC]);

    assert_eq!(whole.cell_at(0, 0).ch, '€');
    assert_eq!(split.cell_at(0, 0).ch, '€');
    assert_eq!(split.cursor_position().col, 1);
}

#[test]
fn test_malformed_utf8_degrades() {
    let (_, snapshot) = run_golden_test(b"a\xC0\xAFb", 10, 1);
    assert_eq!(snapshot.lines[0], "a\u{FFFD}b");
}

#[test]
fn test_chunk_independence() {
    let input = "Hi \x1b[1;31mthere\x1b[0m\r\n\u{20AC}\x1b[2;5r\x1b[5;1H\n\n\
                 \x1b]0;title\x07\x1b(0lqk\x1b(B\x1b[?1049hx\x1b[?1049l\x1b[3@\tz"
        .as_bytes();
    let (reference, _) = run_golden_test(input, 12, 6);
    for chunk_size in 1..=7 {
        let term = run_golden_test_chunked(input, 12, 6, chunk_size);
        assert_eq!(term.snapshot(), reference.snapshot(), "chunk size {chunk_size}");
    }
}

#[test]
fn test_escape_sequence_split_across_feeds() {
    let mut term = Terminal::with_size(80, 24);
    term.feed(b"\x1b[");
    term.feed(b"12;");
    term.feed(b"34");
    term.feed(b"H");
    assert_eq!(term.cursor_position().col, 33);
    assert_eq!(term.cursor_position().row, 11);
}

// ============================================================================
// Alternate screen
// ============================================================================

#[test]
fn test_alternate_screen_isolation() {
    let mut term = Terminal::with_size(20, 5);
    term.feed_str("primary text\r\nsecond\x1b[3;4H");
    let before = term.snapshot();

    term.feed_str("\x1b[?1049h\x1b[2Jalternate stuff\r\nmore");
    assert!(term.is_alternate_screen());
    assert_eq!(term.snapshot().compact().lines[0], "alternate stuff");

    term.feed_str("\x1b[?1049l");
    assert_eq!(term.snapshot(), before);
}

#[test]
fn test_alternate_screen_keeps_scrollback_intact() {
    let mut term = Terminal::with_size(10, 2);
    term.feed_str("1\r\n2\r\n3");
    assert_eq!(term.scrollback_count(), 1);

    term.feed_str("\x1b[?47ha\r\nb\r\nc\r\nd");
    assert_eq!(term.scrollback_count(), 0);
    term.feed_str("\x1b[?47l");
    assert_eq!(term.scrollback_count(), 1);
}

// ============================================================================
// Editing
// ============================================================================

#[test]
fn test_insert_and_delete_lines_in_region() {
    let (_, snapshot) = run_golden_test(
        b"A\r\nB\r\nC\r\nD\r\nE\x1b[2;4r\x1b[2;1H\x1b[L",
        5,
        5,
    );
    assert_eq!(snapshot.lines, ["A", "", "B", "C", "E"]);

    let (_, snapshot) = run_golden_test(
        b"A\r\nB\r\nC\r\nD\r\nE\x1b[2;4r\x1b[2;1H\x1b[M",
        5,
        5,
    );
    assert_eq!(snapshot.lines, ["A", "C", "D", "", "E"]);
}

#[test]
fn test_insert_mode_pushes_text_right() {
    let (_, snapshot) = run_golden_test(b"world\r\x1b[4hhello \x1b[4l", 20, 1);
    assert_eq!(snapshot.lines[0], "hello world");
}

#[test]
fn test_erase_character() {
    let (_, snapshot) = run_golden_test(b"abcdef\x1b[1;2H\x1b[3X", 10, 1);
    assert_eq!(snapshot.lines[0], "a   ef");
    assert_eq!(snapshot.cursor, (1, 0));
}

#[test]
fn test_line_drawing_charset() {
    let (_, snapshot) = run_golden_test(b"\x1b(0lqqk\r\nx  x\r\nmqqj\x1b(B", 10, 3);
    assert_eq!(snapshot.lines, ["┌──┐", "│  │", "└──┘"]);
}

#[test]
fn test_default_tab_stops() {
    let (_, snapshot) = run_golden_test(b"a\tb\tc", 40, 1);
    assert_eq!(snapshot.lines[0], "a       b       c");
}

// ============================================================================
// Replies and events
// ============================================================================

#[test]
fn test_device_replies() {
    let mut term = Terminal::with_size(80, 24);
    assert_eq!(term.feed(b"\x1b[c"), "\x1b[?6c");
    assert_eq!(term.feed(b"\x1b[>c"), "\x1b[>0;0;0c");
    assert_eq!(term.feed(b"\x1b[5n"), "\x1b[0n");
    assert_eq!(term.feed(b"\x1b[12;34H\x1b[6n"), "\x1b[12;34R");
    assert_eq!(term.feed(b"\x1b[?6n"), "");
}

#[test]
fn test_title_with_string_terminator() {
    let mut term = Terminal::with_size(80, 24);
    term.feed(b"\x1b]2;vim main.rs\x1b\\after");
    assert_eq!(term.title(), "vim main.rs");
    assert_eq!(term.snapshot().compact().lines[0], "after");
    assert_eq!(
        term.take_events(),
        vec![TerminalEvent::TitleChanged("vim main.rs".to_string())]
    );
}

#[test]
fn test_unsupported_sequences_are_ignored() {
    let (mut term, snapshot) = run_golden_test(
        b"\x1b#8\x1b[3q\x1b[?2004h\x1b]P1ffffff\x1b[99zok",
        10,
        1,
    );
    assert_eq!(snapshot.lines[0], "ok");
    assert!(term.take_events().is_empty());
}

// ============================================================================
// Resize
// ============================================================================

#[test]
fn test_shrink_keeps_cursor_line_visible() {
    let mut term = Terminal::with_size(10, 5);
    term.feed_str("1\r\n2\r\n3\r\n4\r\n5");
    term.resize(10, 2);

    let snapshot = term.snapshot().compact();
    assert_eq!(snapshot.lines, ["4", "5"]);
    assert_eq!(snapshot.cursor, (1, 1));
    assert_eq!(term.scrollback_count(), 3);

    term.resize(10, 4);
    let snapshot = term.snapshot().compact();
    assert_eq!(snapshot.lines, ["2", "3", "4", "5"]);
    assert_eq!(snapshot.cursor, (1, 3));
}

#[test]
fn test_narrowing_truncates_lines() {
    let mut term = Terminal::with_size(10, 2);
    term.feed_str("0123456789");
    term.resize(4, 2);
    assert_eq!(term.snapshot().compact().lines[0], "0123");
    assert_eq!(term.cursor_position().col, 3);
}
