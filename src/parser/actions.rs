//! Terminal actions produced by the parser
//!
//! These actions represent the semantic meaning of parsed control codes and
//! escape sequences. The parser decides *what* was asked for; the terminal
//! decides how that changes the screen.

use serde::{Deserialize, Serialize};

use super::params::Params;
use crate::core::CharsetMap;

/// Which string an OSC capture sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OscTarget {
    /// OSC 0 and OSC 2
    Title,
    /// OSC 1
    Status,
}

/// A complete CSI sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsiCommand {
    pub params: Params,
    pub final_char: char,
}

/// Actions produced by the parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// BEL
    Bell,
    /// ESC g
    VisualBell,
    /// BS
    Backspace,
    /// HT
    Tab,
    /// LF, VT, FF and 8-bit IND; also returns the carriage in CR/LF mode
    LineFeed,
    /// ESC D
    Index,
    /// CR
    CarriageReturn,
    /// ESC E, 8-bit NEL
    NextLine,
    /// ESC M, 8-bit RI
    ReverseIndex,
    /// SO: select G1
    ShiftOut,
    /// SI: select G0
    ShiftIn,
    /// ESC H, 8-bit HTS
    SetTabStop,
    /// ESC Z, 8-bit DECID
    IdentifyTerminal,
    /// `CSI > c`
    SecondaryDeviceAttributes,
    /// ESC 7
    SaveCursor,
    /// ESC 8
    RestoreCursor,
    /// ESC = (true) / ESC > (false)
    Keypad(bool),
    /// ESC c, `CSI ! p`
    Reset,
    /// ESC ( ) * + - . / followed by a designator
    DesignateCharset { slot: usize, map: CharsetMap },
    /// ESC % @ (false), ESC % G / ESC % 8 (true)
    Utf8Mode(bool),
    /// A dispatched CSI sequence
    Csi(CsiCommand),
    /// A finished OSC 0/1/2 capture
    Osc { target: OscTarget, text: String },
    /// One character read through G2 (SS2) or G3 (SS3)
    SingleShift { slot: usize, ch: char },
}
