//! Terminal mode flags
//!
//! Engine-wide modes that are not duplicated per screen. DEC private modes
//! arrive via `CSI ? Pn h/l`, ANSI modes via `CSI Pn h/l`; the remaining
//! flags are driven by ESC sequences, SI/SO and SGR 10-12.

use serde::{Deserialize, Serialize};

/// Terminal mode flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modes {
    /// DECAWM - Auto wrap mode
    /// When enabled, characters written past the right margin wrap to the next line
    pub autowrap: bool,

    /// DECOM - Origin mode
    /// When enabled, cursor positions are relative to the scroll region
    pub origin: bool,

    /// IRM - Insert/Replace mode
    /// When enabled, characters are inserted rather than overwriting
    pub insert: bool,

    /// LNM - Line feed/new line mode
    /// When enabled, LF also performs CR
    pub linefeed_newline: bool,

    /// DECCKM - Cursor key mode
    pub cursor_keys_application: bool,

    /// DECKPAM/DECKPNM - Keypad mode
    pub keypad_application: bool,

    /// X10 / normal mouse reporting (DECSET 9 and 1000)
    pub mouse_reporting: bool,

    /// DECSCNM - Screen mode (reverse video)
    pub reverse_video: bool,

    /// Show cursor (DECTCEM - DECSET 25)
    pub cursor_visible: bool,

    /// Column mode (DECCOLM). Tracked only; the grid is never resized.
    pub column_132: bool,

    /// Print C0 controls as glyphs instead of acting on them
    pub display_controls: bool,

    /// Set bit 7 of every byte before translation (SGR 12)
    pub toggle_meta: bool,

    /// Decode input as UTF-8 rather than Latin-1
    pub utf8: bool,
}

impl Default for Modes {
    fn default() -> Self {
        Self {
            autowrap: true,
            origin: false,
            insert: false,
            linefeed_newline: false,
            cursor_keys_application: false,
            keypad_application: false,
            mouse_reporting: false,
            reverse_video: false,
            cursor_visible: true,
            column_132: false,
            display_controls: false,
            toggle_meta: false,
            utf8: true,
        }
    }
}

impl Modes {
    /// Create new default modes
    pub fn new() -> Self {
        Self::default()
    }

    /// Default modes with the given initial decode mode
    pub fn with_utf8(utf8: bool) -> Self {
        Self {
            utf8,
            ..Self::default()
        }
    }

    /// Set or reset a DEC private mode (CSI ? Ps h / CSI ? Ps l).
    /// Returns true if the mode was recognized.
    ///
    /// The alternate screen modes are not flags and are left to the caller.
    pub fn set_dec_mode(&mut self, mode: u16, enabled: bool) -> bool {
        let flag = match mode {
            1 => &mut self.cursor_keys_application,
            3 => &mut self.column_132,
            5 => &mut self.reverse_video,
            6 => &mut self.origin,
            7 => &mut self.autowrap,
            9 | 1000 => &mut self.mouse_reporting,
            25 => &mut self.cursor_visible,
            _ => return false,
        };
        *flag = enabled;
        true
    }

    /// Set or reset an ANSI mode (CSI Ps h / CSI Ps l).
    /// Returns true if the mode was recognized.
    pub fn set_ansi_mode(&mut self, mode: u16, enabled: bool) -> bool {
        let flag = match mode {
            3 => &mut self.display_controls,
            4 => &mut self.insert,
            20 => &mut self.linefeed_newline,
            _ => return false,
        };
        *flag = enabled;
        true
    }
}
