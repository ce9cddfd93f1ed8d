//! Terminal Executor
//!
//! Ties together the decoder, the escape sequence parser and the two
//! screens. Raw bytes go in through [`Terminal::feed`]; runs of printable
//! characters are batched and written with the current attribute, control
//! codes and escape sequences drive the parser, and any device reports
//! generated along the way come back as the return value.

use tracing::{debug, trace};

use crate::config::TerminalConfig;
use crate::core::{
    direct_font_glyph, is_invisible_format, Attr, AttrFlags, Cell, CharsetMap, CharsetState,
    Cursor, Line, Modes, Screen, Snapshot, Style, TabStops,
};
use crate::event::TerminalEvent;
use crate::parser::{is_printable, Action, CsiCommand, OscTarget, Params, Parser, Utf8Decoder};

/// Reply to DA and DECID: a VT102
const DEVICE_ID: &str = "\x1b[?6c";
/// Reply to secondary DA
const SECONDARY_DEVICE_ID: &str = "\x1b[>0;0;0c";
/// Reply to DSR 5: ready, no malfunction
const STATUS_OK: &str = "\x1b[0n";

const PRIMARY: usize = 0;
const ALTERNATE: usize = 1;

/// Terminal emulation engine
#[derive(Debug, Clone)]
pub struct Terminal {
    config: TerminalConfig,
    /// Primary and alternate screens
    screens: [Screen; 2],
    current: usize,
    /// Attribute applied to written and erased cells
    attr: Attr,
    /// `attr` resolved, refreshed on every SGR
    style: Style,
    decoder: Utf8Decoder,
    parser: Parser,
    modes: Modes,
    tabs: TabStops,
    /// The next printable character starts a new line first
    need_wrap: bool,
    /// Last printed character, repeated by REP
    last_char: char,
    /// Map printable bytes go through
    translate: CharsetMap,
    /// Printable characters not yet written to the screen
    line_buf: Vec<char>,
    reply: String,
    title: String,
    status: String,
    events: Vec<TerminalEvent>,
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new(TerminalConfig::default())
    }
}

impl Terminal {
    /// Create a new terminal
    pub fn new(config: TerminalConfig) -> Self {
        let cols = config.cols.max(1);
        let rows = config.rows.max(1);
        let mut primary = Screen::new(cols, rows, config.scrollback_lines);
        let mut alternate = Screen::new(cols, rows, 0);
        let charsets = CharsetState::with_slots(config.charsets);
        primary.charsets = charsets.clone();
        alternate.charsets = charsets;

        Self {
            screens: [primary, alternate],
            current: PRIMARY,
            attr: Attr::DEFAULT,
            style: Attr::DEFAULT.resolve(),
            decoder: Utf8Decoder::new(),
            parser: Parser::new(),
            modes: Modes::with_utf8(config.utf8),
            tabs: TabStops::new(),
            need_wrap: false,
            last_char: ' ',
            translate: config.charsets[0],
            line_buf: Vec::new(),
            reply: String::new(),
            title: String::new(),
            status: String::new(),
            events: Vec::new(),
            config: TerminalConfig {
                cols,
                rows,
                ..config
            },
        }
    }

    /// Create a terminal of the given size with default settings
    pub fn with_size(cols: usize, rows: usize) -> Self {
        Self::new(TerminalConfig::with_size(cols, rows))
    }

    /// Process a chunk of input, returning the replies it generated.
    ///
    /// Change notifications queue up until drained with [`Self::take_events`].
    pub fn feed(&mut self, data: &[u8]) -> String {
        for &byte in data {
            if let Some(ch) = self.decoder.decode(byte, self.modes.utf8) {
                self.process_char(ch);
            }
        }
        self.flush_line();
        std::mem::take(&mut self.reply)
    }

    /// Process a string of input
    pub fn feed_str(&mut self, text: &str) -> String {
        self.feed(text.as_bytes())
    }

    fn process_char(&mut self, ch: char) {
        if self.parser.is_ground()
            && is_printable(ch, self.modes.utf8, self.modes.display_controls)
        {
            self.print(ch);
            return;
        }
        self.flush_line();
        if let Some(action) = self.parser.advance(ch) {
            self.perform(action);
        }
    }

    /// Translate and queue a printable character
    fn print(&mut self, ch: char) {
        let mut ch = ch;
        if let Ok(byte) = u8::try_from(ch) {
            let byte = if self.modes.toggle_meta { byte | 0x80 } else { byte };
            ch = self.translate.translate(byte);
        }
        match direct_font_glyph(ch) {
            Some(glyph) => self.put_char(glyph),
            None if is_invisible_format(ch) => {},
            None => self.put_char(ch),
        }
    }

    fn put_char(&mut self, ch: char) {
        if self.need_wrap || self.modes.insert {
            self.flush_line();
        }
        if self.need_wrap {
            self.carriage_return();
            self.line_feed(1);
        }
        if self.modes.insert {
            let Cursor { col, row } = self.screen().cursor();
            let cols = self.cols() as isize;
            let fill = self.attr;
            let (col, row) = (col as isize, row as isize);
            self.screen_mut()
                .scroll_region(col, row, cols - col - 1, 1, 1, 0, fill);
        }
        self.last_char = ch;
        self.line_buf.push(ch);
        if self.screen().cursor().col + self.line_buf.len() >= self.cols() {
            self.need_wrap = self.modes.autowrap;
        }
    }

    /// Write the pending run of characters at the cursor. A run too long for
    /// the rest of the line keeps its head and its final character, which
    /// lands in the last column.
    fn flush_line(&mut self) {
        if self.line_buf.is_empty() {
            return;
        }
        let mut text = std::mem::take(&mut self.line_buf);
        let Cursor { col, row } = self.screen().cursor();
        let avail = self.cols().saturating_sub(col);
        if avail == 0 {
            return;
        }
        if text.len() > avail {
            let last = text[text.len() - 1];
            text.truncate(avail - 1);
            text.push(last);
        }
        let attr = self.attr;
        self.screen_mut().put_string(col, row, &text, attr);
    }

    /// Apply a single parsed action
    fn perform(&mut self, action: Action) {
        match action {
            Action::Bell => {
                if self.config.visual_bell {
                    self.emit(TerminalEvent::VisualBell);
                } else {
                    self.emit(TerminalEvent::Bell);
                }
            }
            Action::VisualBell => self.emit(TerminalEvent::VisualBell),
            Action::Backspace => self.backspace(),
            Action::Tab => self.tab_forward(1),
            Action::LineFeed => {
                self.line_feed(1);
                if self.modes.linefeed_newline {
                    self.carriage_return();
                }
            }
            Action::Index => self.line_feed(1),
            Action::CarriageReturn => self.carriage_return(),
            Action::NextLine => {
                self.carriage_return();
                self.line_feed(1);
            }
            Action::ReverseIndex => self.reverse_index(1),
            Action::ShiftOut => self.shift(1, true),
            Action::ShiftIn => self.shift(0, false),
            Action::SetTabStop => {
                let col = self.screen().cursor().col;
                self.tabs.set(col);
            }
            Action::IdentifyTerminal => self.reply.push_str(DEVICE_ID),
            Action::SecondaryDeviceAttributes => self.reply.push_str(SECONDARY_DEVICE_ID),
            Action::SaveCursor => self.save_cursor(),
            Action::RestoreCursor => self.restore_cursor(),
            Action::Keypad(application) => self.modes.keypad_application = application,
            Action::Reset => self.reset(false),
            Action::DesignateCharset { slot, map } => {
                if self.screen_mut().charsets.designate(slot, map) {
                    self.translate = map;
                }
            }
            Action::Utf8Mode(enabled) => {
                trace!(enabled, "UTF-8 mode");
                self.modes.utf8 = enabled;
            }
            Action::Csi(cmd) => self.execute_csi(cmd),
            Action::Osc { target, text } => self.execute_osc(target, text),
            Action::SingleShift { slot, ch } => self.single_shift(slot, ch),
        }
    }

    /// SO/SI: select G1/G0; control codes are displayed while G1 is active
    fn shift(&mut self, slot: usize, display_controls: bool) {
        let screen = self.screen_mut();
        screen.charsets.select(slot);
        let map = screen.charsets.current();
        self.translate = map;
        self.modes.display_controls = display_controls;
    }

    fn single_shift(&mut self, slot: usize, ch: char) {
        let mut ch = ch;
        if let Ok(byte) = u8::try_from(ch) {
            let byte = if self.modes.toggle_meta { byte | 0x80 } else { byte };
            ch = self.screen().charsets.slot(slot).translate(byte);
            match direct_font_glyph(ch) {
                Some(glyph) => ch = glyph,
                None if is_invisible_format(ch) => return,
                None => {},
            }
        }
        self.put_char(ch);
    }

    fn execute_osc(&mut self, target: OscTarget, text: String) {
        match target {
            OscTarget::Title => {
                self.title = text.clone();
                self.emit(TerminalEvent::TitleChanged(text));
            }
            OscTarget::Status => {
                self.status = text.clone();
                self.emit(TerminalEvent::StatusChanged(text));
            }
        }
    }

    /// Execute a CSI sequence
    fn execute_csi(&mut self, csi: CsiCommand) {
        if csi.params.is_private() {
            self.execute_csi_private(&csi);
            return;
        }

        let params = &csi.params;
        let p0 = params.get(0) as isize;
        let n = params.count(0) as isize;
        let Cursor { col, row } = self.screen().cursor();
        let (col, row) = (col as isize, row as isize);

        match csi.final_char {
            // Cursor movement
            'G' | '`' => self.goto_xy(p0 - 1, row),
            'A' => self.goto_xy(col, row - n),
            'B' | 'e' => self.goto_xy(col, row + n),
            'C' | 'a' => self.goto_xy(col + n, row),
            'D' => self.goto_xy(col - n, row),
            'E' => self.goto_xy(0, row + n),
            'F' => self.goto_xy(0, row - n),
            'd' => self.goto_xay(col, p0 - 1),
            'H' | 'f' => {
                let p1 = params.get(1) as isize;
                self.goto_xay(p1 - 1, p0 - 1);
            }
            'I' => self.tab_forward(n as usize),
            'Z' => self.tab_backward(n as usize),

            // Editing
            '@' => self.insert_chars(p0 as usize),
            'P' => self.delete_chars(p0 as usize),
            'X' => self.erase_chars(p0 as usize),
            'J' => self.erase_in_display(params.get(0)),
            'K' => self.erase_in_line(params.get(0)),
            'L' => self.insert_lines(p0 as usize),
            'M' => self.delete_lines(p0 as usize),
            'S' => self.scroll_up(n as usize),
            'T' => self.scroll_down(n as usize),
            'b' => self.repeat_last(n as usize),

            'm' => self.execute_sgr(params),
            'r' => {
                let rows = self.rows();
                let top = params.count(0) as usize;
                let bottom = match params.get(1) {
                    0 => rows,
                    b => b as usize,
                };
                if top < bottom && bottom <= rows {
                    self.screen_mut().set_scroll_region(top - 1, bottom);
                    self.goto_xay(0, 0);
                }
            }
            'g' => match params.get(0) {
                0 => {
                    let col = self.screen().cursor().col;
                    self.tabs.clear(col);
                }
                2 | 3 => self.tabs.clear_all(),
                other => debug!(other, "unhandled TBC mode"),
            }
            'h' => self.set_mode(params, true),
            'l' => self.set_mode(params, false),
            'n' => match params.get(0) {
                5 => self.reply.push_str(STATUS_OK),
                6 => self.cursor_report(),
                other => debug!(other, "unhandled DSR request"),
            }
            'c' => {
                if params.get(0) == 0 {
                    self.reply.push_str(DEVICE_ID);
                }
            }
            's' => self.save_cursor(),
            'u' => self.restore_cursor(),
            'q' => debug!("LED control not implemented"),
            ']' => debug!("setterm command not implemented"),
            other => debug!(?other, "unhandled CSI final"),
        }
    }

    /// Execute a DEC private (`?`) CSI sequence
    fn execute_csi_private(&mut self, csi: &CsiCommand) {
        match csi.final_char {
            'h' | 'l' => {
                let enabled = csi.final_char == 'h';
                for mode in csi.params.iter() {
                    self.set_dec_mode(mode, enabled);
                }
            }
            'c' => debug!("cursor attributes not implemented"),
            other => debug!(?other, "unhandled private CSI final"),
        }
    }

    fn set_dec_mode(&mut self, mode: u16, enabled: bool) {
        trace!(mode, enabled, "DEC private mode");
        match mode {
            47 | 1047 | 1049 => self.enable_alternate_screen(enabled),
            5 => {
                if self.modes.reverse_video != enabled {
                    self.events.push(TerminalEvent::ReverseVideo(enabled));
                }
                self.modes.reverse_video = enabled;
            }
            3 => {
                debug!("80/132 column switching not implemented");
                self.modes.set_dec_mode(mode, enabled);
            }
            _ => {
                if !self.modes.set_dec_mode(mode, enabled) {
                    debug!(mode, "unhandled DEC private mode");
                }
            }
        }
    }

    fn set_mode(&mut self, params: &Params, enabled: bool) {
        for mode in params.iter() {
            trace!(mode, enabled, "ANSI mode");
            if !self.modes.set_ansi_mode(mode, enabled) {
                debug!(mode, "unhandled ANSI mode");
            }
        }
    }

    /// Select Graphic Rendition
    fn execute_sgr(&mut self, params: &Params) {
        let mut attr = self.attr;
        for param in params.iter() {
            attr = match param {
                0 => Attr::DEFAULT,
                1 => attr.without(AttrFlags::DIM).with(AttrFlags::BRIGHT),
                2 => attr.without(AttrFlags::BRIGHT).with(AttrFlags::DIM),
                4 => attr.with(AttrFlags::UNDERLINE),
                5 => attr.with(AttrFlags::BLINK),
                7 => attr.with(AttrFlags::REVERSE),
                // 10-12 are a Linux console extension, not standard SGR: they
                // pick the translation table and control code display.
                10 => {
                    self.translate = self.screen().charsets.current();
                    self.modes.display_controls = false;
                    self.modes.toggle_meta = false;
                    attr
                }
                11 | 12 => {
                    self.translate = CharsetMap::CodePage437;
                    self.modes.display_controls = true;
                    self.modes.toggle_meta = param == 12;
                    attr
                }
                21 | 22 => attr.without(AttrFlags::BRIGHT | AttrFlags::DIM),
                24 => attr.without(AttrFlags::UNDERLINE),
                25 => attr.without(AttrFlags::BLINK),
                27 => attr.without(AttrFlags::REVERSE),
                // Legacy: 38 means "underline, default colour"
                38 => attr
                    .without(AttrFlags::DIM | AttrFlags::BRIGHT)
                    .with_fg(0)
                    .with(AttrFlags::UNDERLINE),
                39 => attr
                    .without(AttrFlags::DIM | AttrFlags::BRIGHT | AttrFlags::UNDERLINE)
                    .with_fg(0),
                49 => attr.with_bg(15),
                30..=37 => attr.with_fg((param - 30) as u8),
                40..=47 => attr.with_bg((param - 40) as u8),
                other => {
                    debug!(other, "unhandled SGR parameter");
                    attr
                }
            };
        }
        self.attr = attr;
        self.style = attr.resolve();
    }

    fn goto_xy(&mut self, col: isize, row: isize) {
        let origin = self.modes.origin;
        self.screen_mut().goto(col, row, origin);
        self.need_wrap = false;
    }

    /// Absolute addressing, relative to the scroll region in origin mode
    fn goto_xay(&mut self, col: isize, row: isize) {
        let row = if self.modes.origin {
            self.screen().scroll_top() as isize + row
        } else {
            row
        };
        self.goto_xy(col, row);
    }

    fn carriage_return(&mut self) {
        let row = self.screen().cursor().row as isize;
        self.goto_xy(0, row);
    }

    fn backspace(&mut self) {
        let Cursor { col, row } = self.screen().cursor();
        if col > 0 {
            self.goto_xy(col as isize - 1, row as isize);
        }
    }

    fn tab_forward(&mut self, count: usize) {
        let Cursor { col, row } = self.screen().cursor();
        let target = self.tabs.next_stop(col, count, self.cols());
        if target != col {
            self.goto_xy(target as isize, row as isize);
        }
    }

    fn tab_backward(&mut self, count: usize) {
        let Cursor { col, row } = self.screen().cursor();
        let target = self.tabs.prev_stop(col, count);
        if target != col {
            self.goto_xy(target as isize, row as isize);
        }
    }

    /// Move down `count` lines, scrolling the region at its bottom margin
    fn line_feed(&mut self, count: usize) {
        let count = count.clamp(1, self.rows());
        for _ in 0..count {
            let Cursor { col, row } = self.screen().cursor();
            let (top, bottom) = self.region();
            if row + 1 == bottom {
                let (cols, fill) = (self.cols() as isize, self.attr);
                let (top, bottom) = (top as isize, bottom as isize);
                self.screen_mut()
                    .scroll_region(0, top + 1, cols, bottom - top - 1, 0, -1, fill);
            } else if row + 1 < self.rows() {
                self.goto_xy(col as isize, row as isize + 1);
            }
        }
        self.need_wrap = false;
    }

    /// Move up `count` lines, scrolling the region at its top margin
    fn reverse_index(&mut self, count: usize) {
        let count = count.clamp(1, self.rows());
        for _ in 0..count {
            let Cursor { col, row } = self.screen().cursor();
            let (top, bottom) = self.region();
            if row == top {
                let (cols, fill) = (self.cols() as isize, self.attr);
                let (top, bottom) = (top as isize, bottom as isize);
                self.screen_mut()
                    .scroll_region(0, top, cols, bottom - top - 1, 0, 1, fill);
            } else if row > 0 {
                self.goto_xy(col as isize, row as isize - 1);
            }
        }
        self.need_wrap = false;
    }

    /// SU: scroll the region up, independent of the cursor
    fn scroll_up(&mut self, count: usize) {
        let (top, bottom) = self.region();
        let n = count.clamp(1, bottom - top) as isize;
        let (cols, fill) = (self.cols() as isize, self.attr);
        let (top, bottom) = (top as isize, bottom as isize);
        self.screen_mut()
            .scroll_region(0, top + n, cols, bottom - top - n, 0, -n, fill);
    }

    /// SD: scroll the region down, independent of the cursor
    fn scroll_down(&mut self, count: usize) {
        let (top, bottom) = self.region();
        let n = count.clamp(1, bottom - top) as isize;
        let (cols, fill) = (self.cols() as isize, self.attr);
        let (top, bottom) = (top as isize, bottom as isize);
        self.screen_mut()
            .scroll_region(0, top, cols, bottom - top - n, 0, n, fill);
    }

    fn insert_chars(&mut self, count: usize) {
        let Cursor { col, row } = self.screen().cursor();
        let cols = self.cols();
        let n = count.max(1).min(cols - col) as isize;
        let (col, row, cols, fill) = (col as isize, row as isize, cols as isize, self.attr);
        self.screen_mut()
            .scroll_region(col, row, cols - col - n, 1, n, 0, fill);
        self.need_wrap = false;
    }

    fn delete_chars(&mut self, count: usize) {
        let Cursor { col, row } = self.screen().cursor();
        let cols = self.cols();
        let n = count.max(1).min(cols - col) as isize;
        let (col, row, cols, fill) = (col as isize, row as isize, cols as isize, self.attr);
        self.screen_mut()
            .scroll_region(col + n, row, cols - col - n, 1, -n, 0, fill);
        self.need_wrap = false;
    }

    fn erase_chars(&mut self, count: usize) {
        let Cursor { col, row } = self.screen().cursor();
        let n = count.max(1).min(self.cols() - col) as isize;
        let attr = self.attr;
        self.screen_mut()
            .clear_region(col as isize, row as isize, n, 1, attr);
        self.need_wrap = false;
    }

    fn erase_in_display(&mut self, mode: u16) {
        let Cursor { col, row } = self.screen().cursor();
        let (cols, rows) = (self.cols() as isize, self.rows() as isize);
        let (col, row, attr) = (col as isize, row as isize, self.attr);
        let screen = self.screen_mut();
        match mode {
            0 => {
                screen.clear_region(col, row, cols - col, 1, attr);
                if row + 1 < rows {
                    screen.clear_region(0, row + 1, cols, rows - row - 1, attr);
                }
            }
            1 => {
                if row > 0 {
                    screen.clear_region(0, 0, cols, row, attr);
                }
                screen.clear_region(0, row, col + 1, 1, attr);
            }
            2 => screen.clear_region(0, 0, cols, rows, attr),
            other => {
                debug!(other, "unhandled ED mode");
                return;
            }
        }
        self.need_wrap = false;
    }

    fn erase_in_line(&mut self, mode: u16) {
        let Cursor { col, row } = self.screen().cursor();
        let cols = self.cols() as isize;
        let (col, row, attr) = (col as isize, row as isize, self.attr);
        let screen = self.screen_mut();
        match mode {
            0 => screen.clear_region(col, row, cols - col, 1, attr),
            1 => screen.clear_region(0, row, col + 1, 1, attr),
            2 => screen.clear_region(0, row, cols, 1, attr),
            other => {
                debug!(other, "unhandled EL mode");
                return;
            }
        }
        self.need_wrap = false;
    }

    fn insert_lines(&mut self, count: usize) {
        let row = self.screen().cursor().row;
        let (_, bottom) = self.region();
        if row >= bottom {
            return;
        }
        let n = count.max(1).min(bottom - row) as isize;
        let (cols, fill) = (self.cols() as isize, self.attr);
        let (row, bottom) = (row as isize, bottom as isize);
        self.screen_mut()
            .scroll_region(0, row, cols, bottom - row - n, 0, n, fill);
        self.need_wrap = false;
    }

    fn delete_lines(&mut self, count: usize) {
        let row = self.screen().cursor().row;
        let (_, bottom) = self.region();
        if row >= bottom {
            return;
        }
        let n = count.max(1).min(bottom - row) as isize;
        let (cols, fill) = (self.cols() as isize, self.attr);
        let (row, bottom) = (row as isize, bottom as isize);
        self.screen_mut()
            .scroll_region(0, row + n, cols, bottom - row - n, 0, -n, fill);
        self.need_wrap = false;
    }

    /// REP: print the last character again, at most one screenful
    fn repeat_last(&mut self, count: usize) {
        let count = count.min(self.cols() * self.rows());
        let ch = self.last_char;
        for _ in 0..count {
            self.put_char(ch);
        }
    }

    /// DSR 6: 1-based position, row relative to the region in origin mode
    fn cursor_report(&mut self) {
        let Cursor { col, row } = self.screen().cursor();
        let row = if self.modes.origin {
            row.saturating_sub(self.screen().scroll_top())
        } else {
            row
        };
        self.reply.push_str(&format!("\x1b[{};{}R", row + 1, col + 1));
    }

    /// DECSC: remember position, attribute and charsets on the current screen
    pub fn save_cursor(&mut self) {
        let attr = self.attr;
        self.screen_mut().save_cursor(attr);
    }

    /// DECRC: restore what the last save on this screen recorded. Does
    /// nothing if there was none.
    pub fn restore_cursor(&mut self) {
        let Some(saved) = self.screen().saved_cursor().cloned() else {
            return;
        };
        self.attr = saved.attr;
        self.style = saved.attr.resolve();
        self.screen_mut().charsets = saved.charsets;
        self.translate = self.screen().charsets.current();
        self.goto_xy(saved.col as isize, saved.row as isize);
    }

    /// Switch between the primary and the alternate screen.
    ///
    /// Entering the alternate screen saves the cursor on the primary one and
    /// starts from a blank grid; leaving restores the saved state. Asking for
    /// the screen that is already current only re-clips the cursor.
    pub fn enable_alternate_screen(&mut self, enabled: bool) {
        let target = if enabled { ALTERNATE } else { PRIMARY };
        if target == self.current {
            let (cols, rows) = (self.cols(), self.rows());
            self.screen_mut().resize(cols, rows);
            return;
        }
        trace!(alternate = enabled, "switching screen");

        if enabled {
            self.save_cursor();
            let primary = &self.screens[PRIMARY];
            let charsets = primary.charsets.clone();
            let (top, bottom) = (primary.scroll_top(), primary.scroll_bottom());

            self.current = ALTERNATE;
            let alternate = &mut self.screens[ALTERNATE];
            alternate.clear_history();
            alternate.charsets = charsets;
            alternate.set_scroll_region(top, bottom);
            alternate.forget_saved_cursor();
            self.goto_xy(0, 0);
        } else {
            self.current = PRIMARY;
            self.restore_cursor();
        }
        self.events
            .push(TerminalEvent::ScreenSwitched { alternate: enabled });
    }

    /// Reinitialize all mutable state, optionally dropping scrollback.
    ///
    /// Always lands on the primary screen, cleared, with the cursor homed.
    pub fn reset(&mut self, clear_history: bool) {
        trace!(clear_history, "reset");
        if self.current == ALTERNATE {
            self.current = PRIMARY;
            self.events
                .push(TerminalEvent::ScreenSwitched { alternate: false });
        }

        self.parser.reset();
        self.decoder.reset();
        self.line_buf.clear();
        self.need_wrap = false;
        if self.modes.reverse_video {
            self.events.push(TerminalEvent::ReverseVideo(false));
        }
        self.modes = Modes::with_utf8(self.config.utf8);
        self.attr = Attr::DEFAULT;
        self.style = Attr::DEFAULT.resolve();
        self.tabs.reset();
        self.last_char = ' ';
        self.translate = self.config.charsets[0];
        for screen in &mut self.screens {
            screen.charsets = CharsetState::with_slots(self.config.charsets);
            screen.reset_scroll_region();
            if clear_history {
                screen.clear_history();
            }
        }

        self.goto_xy(0, 0);
        let (cols, rows) = (self.cols() as isize, self.rows() as isize);
        self.screen_mut()
            .clear_region(0, 0, cols, rows, Attr::DEFAULT);
    }

    /// Resize both screens, re-clipping cursor, scroll region and scrollback
    pub fn resize(&mut self, cols: usize, rows: usize) {
        let cols = cols.max(1);
        let rows = rows.max(1);
        self.flush_line();
        for screen in &mut self.screens {
            screen.resize(cols, rows);
        }
        self.config.cols = cols;
        self.config.rows = rows;
        self.need_wrap = false;
        self.events.push(TerminalEvent::Resized { cols, rows });
    }

    /// The current screen
    pub fn screen(&self) -> &Screen {
        &self.screens[self.current]
    }

    fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screens[self.current]
    }

    /// The primary screen, whichever screen is current
    pub fn primary_screen(&self) -> &Screen {
        &self.screens[PRIMARY]
    }

    pub fn is_alternate_screen(&self) -> bool {
        self.current == ALTERNATE
    }

    fn region(&self) -> (usize, usize) {
        let screen = self.screen();
        (screen.scroll_top(), screen.scroll_bottom())
    }

    pub fn cols(&self) -> usize {
        self.config.cols
    }

    pub fn rows(&self) -> usize {
        self.config.rows
    }

    /// Visible lines of the current screen, top to bottom
    pub fn current_screen_lines(&self) -> impl Iterator<Item = &Line> {
        self.screen().visible_lines()
    }

    pub fn cursor_position(&self) -> Cursor {
        self.screen().cursor()
    }

    /// Cell at (`col`, `row`) on the current screen
    pub fn cell_at(&self, col: usize, row: usize) -> Cell {
        self.screen().cell(col, row)
    }

    /// Archived lines on the current screen
    pub fn scrollback_count(&self) -> usize {
        self.screen().scrollback_len()
    }

    /// Current attribute
    pub fn attr(&self) -> Attr {
        self.attr
    }

    /// Current attribute, resolved
    pub fn style(&self) -> Style {
        self.style
    }

    pub fn modes(&self) -> &Modes {
        &self.modes
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn config(&self) -> &TerminalConfig {
        &self.config
    }

    /// Queue a notification. Title and status updates replace an undrained
    /// one of the same kind and a bell already pending is not repeated, so
    /// the queue stays bounded when the host never drains it.
    fn emit(&mut self, event: TerminalEvent) {
        match &event {
            TerminalEvent::TitleChanged(_) => self
                .events
                .retain(|e| !matches!(e, TerminalEvent::TitleChanged(_))),
            TerminalEvent::StatusChanged(_) => self
                .events
                .retain(|e| !matches!(e, TerminalEvent::StatusChanged(_))),
            TerminalEvent::Bell | TerminalEvent::VisualBell => {
                if self.events.contains(&event) {
                    return;
                }
            }
            _ => {}
        }
        self.events.push(event);
    }

    /// Drain queued change notifications
    pub fn take_events(&mut self) -> Vec<TerminalEvent> {
        std::mem::take(&mut self.events)
    }

    /// Capture the current state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(
            self.screen(),
            &self.modes,
            &self.title,
            &self.status,
            self.is_alternate_screen(),
        )
    }
}
