//! Printable vs. control classification
//!
//! Two fixed 32-entry tables, indexed by `codepoint & 0x1F`, decide whether
//! a C0 (or C1, via the same index) codepoint is acted on as a control. The
//! first applies in normal operation; the second while control codes are
//! being displayed as data, where only the few controls that must keep the
//! stream in sync (BS, LF, FF, CR, SO, SI, ESC) still act.

const T: bool = true;
const F: bool = false;

/// Controls acted on in normal operation
pub const CTRL_ACTION: [bool; 32] = [
    T, F, F, F, F, F, F, T, // NUL .. BEL
    T, T, T, T, T, T, T, T, // BS HT LF VT FF CR SO SI
    F, F, F, F, F, F, F, F, //
    T, F, T, T, F, F, F, F, // CAN, SUB, ESC
];

/// Controls still acted on while displaying control codes
pub const CTRL_ALWAYS: [bool; 32] = [
    T, F, F, F, F, F, F, F, // NUL
    T, F, T, F, T, T, T, T, // BS LF FF CR SO SI
    F, F, F, F, F, F, F, F, //
    F, F, F, T, F, F, F, F, // ESC
];

/// Whether `ch` is written to the screen rather than interpreted.
///
/// Codepoints 32-127 and 160 and above are printable, as is anything from
/// 128 up in UTF-8 mode; below that the active table decides. DEL prints
/// only while control codes are displayed.
pub fn is_printable(ch: char, utf8: bool, display_controls: bool) -> bool {
    let code = u32::from(ch);
    if code == 0x7F {
        return display_controls;
    }
    if (32..=127).contains(&code) || code >= 160 || (utf8 && code >= 128) {
        return true;
    }
    let table = if display_controls {
        &CTRL_ALWAYS
    } else {
        &CTRL_ACTION
    };
    !table[(code & 0x1F) as usize]
}
