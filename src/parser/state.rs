//! Escape sequence state machine
//!
//! The state is a tagged enum whose variants carry whatever the state needs
//! (accumulated parameters, the target G-slot, a captured string). All
//! transition logic lives in one function, [`State::advance`], which maps
//! `(state, codepoint)` to `(next state, optional action)` without touching
//! anything else.
//!
//! Control codes are recognised in every state: BS inside a CSI sequence
//! still moves the cursor and the sequence carries on afterwards. CAN and SUB
//! abandon whatever sequence is in progress, ESC starts a new one.
//!
//! Only codepoints that the caller classified as control reach the machine
//! while it is in [`State::Normal`]; once inside a sequence every codepoint
//! is fed to it.

use tracing::debug;

use super::actions::{Action, CsiCommand, OscTarget};
use super::params::Params;
use crate::core::CharsetMap;

/// Longest title or status string kept, in bytes
pub const MAX_OSC_LEN: usize = 4096;

/// Hex digits making up an (ignored) palette change
const PALETTE_DIGITS: u8 = 7;

/// Parser state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum State {
    /// Ground state
    #[default]
    Normal,
    /// After ESC
    Esc,
    /// After `ESC [` or 8-bit CSI
    CsiEntry,
    /// Collecting CSI parameters
    CsiParams(Params),
    /// After `CSI >`
    DeviceAttr(Params),
    /// After `ESC [ [`, one more byte is swallowed
    FunctionKey,
    /// After `ESC #`
    Hash,
    /// After one of `( ) * + - . /`, waiting for the designator
    SetCharset(usize),
    /// After `CSI !`
    Bang,
    /// After `ESC %`
    Percent,
    /// After `ESC ]`
    NonStandard,
    /// Inside `ESC ] P`, counting hex digits
    Palette(u8),
    /// Capturing an OSC string until BEL or ST
    Osc { target: OscTarget, text: String },
    /// ESC seen while capturing; `\` completes the string terminator
    OscEscape { target: OscTarget, text: String },
    /// After SS2/SS3, the next codepoint is read through G2/G3
    SingleShift(usize),
}

impl State {
    /// Consume one codepoint
    pub fn advance(self, ch: char) -> (State, Option<Action>) {
        match ch {
            '\0' | '\x7f' => (self, None),
            '\x07' if !matches!(self, State::Osc { .. }) => (self, Some(Action::Bell)),
            '\x08' => (self, Some(Action::Backspace)),
            '\t' => (self, Some(Action::Tab)),
            '\n' | '\x0b' | '\x0c' | '\u{84}' => (self, Some(Action::LineFeed)),
            '\r' => (self, Some(Action::CarriageReturn)),
            '\u{85}' => (self, Some(Action::NextLine)),
            '\x0e' => (self, Some(Action::ShiftOut)),
            '\x0f' => (self, Some(Action::ShiftIn)),
            '\x18' | '\x1a' => (State::Normal, None),
            '\x1b' => match self {
                State::Osc { target, text } => (State::OscEscape { target, text }, None),
                _ => (State::Esc, None),
            }
            '\u{88}' => (self, Some(Action::SetTabStop)),
            '\u{8d}' => (self, Some(Action::ReverseIndex)),
            '\u{8e}' => (State::SingleShift(2), None),
            '\u{8f}' => (State::SingleShift(3), None),
            '\u{9a}' => (self, Some(Action::IdentifyTerminal)),
            '\u{9b}' => (State::CsiEntry, None),
            _ => self.sequence(ch),
        }
    }

    fn sequence(self, ch: char) -> (State, Option<Action>) {
        match self {
            State::Normal => (State::Normal, None),
            State::Esc => escape(ch),
            State::CsiEntry => match ch {
                '[' => (State::FunctionKey, None),
                '?' => (State::CsiParams(Params::private()), None),
                _ => csi_param(Params::new(), ch),
            }
            State::CsiParams(params) => csi_param(params, ch),
            State::DeviceAttr(params) => device_attr(params, ch),
            State::FunctionKey => (State::Normal, None),
            State::Hash => {
                if ch == '8' {
                    debug!("screen alignment test not implemented");
                }
                (State::Normal, None)
            }
            State::SetCharset(slot) => {
                let action = CharsetMap::from_designator(ch)
                    .map(|map| Action::DesignateCharset { slot, map });
                (State::Normal, action)
            }
            State::Bang => (State::Normal, (ch == 'p').then_some(Action::Reset)),
            State::Percent => {
                let action = match ch {
                    '@' => Some(Action::Utf8Mode(false)),
                    'G' | '8' => Some(Action::Utf8Mode(true)),
                    _ => None,
                };
                (State::Normal, action)
            }
            State::NonStandard => match ch {
                '0' | '2' => (State::osc(OscTarget::Title), None),
                '1' => (State::osc(OscTarget::Status), None),
                'P' => (State::Palette(0), None),
                _ => {
                    debug!(?ch, "ignoring ESC ] sequence");
                    (State::Normal, None)
                }
            }
            State::Palette(digits) => {
                if !ch.is_ascii_hexdigit() {
                    return (State::Normal, None);
                }
                if digits + 1 == PALETTE_DIGITS {
                    debug!("palette change not implemented");
                    return (State::Normal, None);
                }
                (State::Palette(digits + 1), None)
            }
            State::Osc { target, mut text } => {
                if ch == '\x07' {
                    return (State::Normal, Some(finish_osc(target, text)));
                }
                if text.len() + ch.len_utf8() <= MAX_OSC_LEN {
                    text.push(ch);
                }
                (State::Osc { target, text }, None)
            }
            State::OscEscape { target, text } => {
                if ch == '\\' {
                    (State::Normal, Some(finish_osc(target, text)))
                } else {
                    escape(ch)
                }
            }
            State::SingleShift(slot) => (State::Normal, Some(Action::SingleShift { slot, ch })),
        }
    }

    fn osc(target: OscTarget) -> State {
        State::Osc {
            target,
            text: String::new(),
        }
    }
}

fn escape(ch: char) -> (State, Option<Action>) {
    let next = match ch {
        '%' => State::Percent,
        '(' => State::SetCharset(0),
        ')' | '-' => State::SetCharset(1),
        '*' | '.' => State::SetCharset(2),
        '+' | '/' => State::SetCharset(3),
        '#' => State::Hash,
        'N' => State::SingleShift(2),
        'O' => State::SingleShift(3),
        '[' => State::CsiEntry,
        ']' => State::NonStandard,
        _ => {
            let action = match ch {
                '7' => Action::SaveCursor,
                '8' => Action::RestoreCursor,
                '>' => Action::Keypad(false),
                '=' => Action::Keypad(true),
                'D' => Action::Index,
                'E' => Action::NextLine,
                'M' => Action::ReverseIndex,
                'H' => Action::SetTabStop,
                'Z' => Action::IdentifyTerminal,
                'c' => Action::Reset,
                'g' => Action::VisualBell,
                _ => {
                    debug!(?ch, "unhandled ESC sequence");
                    return (State::Normal, None);
                }
            };
            return (State::Normal, Some(action));
        }
    };
    (next, None)
}

fn csi_param(mut params: Params, ch: char) -> (State, Option<Action>) {
    match ch {
        '0'..='9' => {
            params.push_digit(ch as u8 - b'0');
            (State::CsiParams(params), None)
        }
        ';' => {
            params.next_param();
            (State::CsiParams(params), None)
        }
        _ if params.is_private() => dispatch(params, ch),
        '!' => (State::Bang, None),
        '>' if params.separators() == 0 => (State::DeviceAttr(params), None),
        '>' => (State::Normal, None),
        _ => dispatch(params, ch),
    }
}

fn dispatch(params: Params, final_char: char) -> (State, Option<Action>) {
    (
        State::Normal,
        Some(Action::Csi(CsiCommand { params, final_char })),
    )
}

fn device_attr(mut params: Params, ch: char) -> (State, Option<Action>) {
    match ch {
        '0'..='9' => {
            params.push_digit(ch as u8 - b'0');
            (State::DeviceAttr(params), None)
        }
        ';' => {
            params.next_param();
            (State::DeviceAttr(params), None)
        }
        'c' if params.get(0) == 0 => (State::Normal, Some(Action::SecondaryDeviceAttributes)),
        _ => {
            debug!(?ch, "ignoring CSI > sequence");
            (State::Normal, None)
        }
    }
}

fn finish_osc(target: OscTarget, text: String) -> Action {
    let text = match text.strip_prefix(';') {
        Some(rest) => rest.to_string(),
        None => text,
    };
    Action::Osc { target, text }
}

/// The escape sequence parser
#[derive(Debug, Clone, Default)]
pub struct Parser {
    state: State,
}

impl Parser {
    /// Create a new parser in the ground state
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the parser to the ground state
    pub fn reset(&mut self) {
        self.state = State::Normal;
    }

    /// Whether no sequence is in progress
    pub fn is_ground(&self) -> bool {
        self.state == State::Normal
    }

    /// Feed one codepoint, returning the action it completes, if any
    pub fn advance(&mut self, ch: char) -> Option<Action> {
        let (next, action) = std::mem::take(&mut self.state).advance(ch);
        self.state = next;
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Vec<Action> {
        let mut parser = Parser::new();
        input.chars().filter_map(|ch| parser.advance(ch)).collect()
    }

    fn csi(input: &str) -> CsiCommand {
        match parse(input).as_slice() {
            [Action::Csi(cmd)] => *cmd,
            other => panic!("expected one CSI, got {other:?}"),
        }
    }

    #[test]
    fn test_parser_c0_controls() {
        assert_eq!(
            parse("\x07\x08\t\n\r"),
            vec![
                Action::Bell,
                Action::Backspace,
                Action::Tab,
                Action::LineFeed,
                Action::CarriageReturn,
            ]
        );
    }

    #[test]
    fn test_parser_csi_cup() {
        let cmd = csi("\x1b[12;34H");
        assert_eq!(cmd.final_char, 'H');
        assert_eq!(cmd.params.get(0), 12);
        assert_eq!(cmd.params.get(1), 34);
        assert!(!cmd.params.is_private());
    }

    #[test]
    fn test_parser_8bit_csi() {
        let cmd = csi("\u{9b}5A");
        assert_eq!(cmd.final_char, 'A');
        assert_eq!(cmd.params.get(0), 5);
    }

    #[test]
    fn test_parser_csi_private() {
        let cmd = csi("\x1b[?1049h");
        assert!(cmd.params.is_private());
        assert_eq!(cmd.params.get(0), 1049);
        assert_eq!(cmd.final_char, 'h');
    }

    #[test]
    fn test_parser_control_inside_csi() {
        assert_eq!(
            parse("\x1b[1\x082H"),
            vec![
                Action::Backspace,
                Action::Csi(CsiCommand {
                    params: {
                        let mut p = Params::new();
                        p.push_digit(1);
                        p.push_digit(2);
                        p
                    },
                    final_char: 'H',
                }),
            ]
        );
    }

    #[test]
    fn test_parser_cancel_sequence() {
        let mut parser = Parser::new();
        for ch in "\x1b[12".chars() {
            parser.advance(ch);
        }
        assert!(!parser.is_ground());
        assert_eq!(parser.advance('\x18'), None);
        assert!(parser.is_ground());
    }

    #[test]
    fn test_parser_esc_save_restore() {
        assert_eq!(
            parse("\x1b7\x1b8"),
            vec![Action::SaveCursor, Action::RestoreCursor]
        );
    }

    #[test]
    fn test_parser_esc_simple() {
        assert_eq!(
            parse("\x1bD\x1bE\x1bM\x1bH\x1bZ\x1bc\x1bg\x1b=\x1b>"),
            vec![
                Action::Index,
                Action::NextLine,
                Action::ReverseIndex,
                Action::SetTabStop,
                Action::IdentifyTerminal,
                Action::Reset,
                Action::VisualBell,
                Action::Keypad(true),
                Action::Keypad(false),
            ]
        );
    }

    #[test]
    fn test_parser_designate_charset() {
        assert_eq!(
            parse("\x1b(0\x1b)B\x1b*U\x1b+K"),
            vec![
                Action::DesignateCharset { slot: 0, map: CharsetMap::VtGraphics },
                Action::DesignateCharset { slot: 1, map: CharsetMap::Latin1 },
                Action::DesignateCharset { slot: 2, map: CharsetMap::CodePage437 },
                Action::DesignateCharset { slot: 3, map: CharsetMap::DirectToFont },
            ]
        );
        assert!(parse("\x1b(Z").is_empty());
    }

    #[test]
    fn test_parser_osc_title() {
        assert_eq!(
            parse("\x1b]0;hello\x07"),
            vec![Action::Osc {
                target: OscTarget::Title,
                text: "hello".to_string(),
            }]
        );
        assert_eq!(
            parse("\x1b]1;status\x1b\\"),
            vec![Action::Osc {
                target: OscTarget::Status,
                text: "status".to_string(),
            }]
        );
    }

    #[test]
    fn test_parser_osc_is_bounded() {
        let input = format!("\x1b]2;{}\x07", "x".repeat(MAX_OSC_LEN * 2));
        match parse(&input).as_slice() {
            [Action::Osc { text, .. }] => assert_eq!(text.len(), MAX_OSC_LEN - 1),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_parser_osc_interrupted_by_escape() {
        assert_eq!(parse("\x1b]0;abc\x1b7"), vec![Action::SaveCursor]);
    }

    #[test]
    fn test_parser_palette_is_swallowed() {
        let mut parser = Parser::new();
        for ch in "\x1b]P0ffffff".chars() {
            assert_eq!(parser.advance(ch), None);
        }
        assert!(parser.is_ground());
    }

    #[test]
    fn test_parser_device_attributes() {
        assert_eq!(parse("\x1b[>c"), vec![Action::SecondaryDeviceAttributes]);
        assert_eq!(parse("\x1b[>0c"), vec![Action::SecondaryDeviceAttributes]);
        assert!(parse("\x1b[>1c").is_empty());
        assert_eq!(csi("\x1b[c").final_char, 'c');
    }

    #[test]
    fn test_parser_soft_reset() {
        assert_eq!(parse("\x1b[!p"), vec![Action::Reset]);
        assert!(parse("\x1b[!x").is_empty());
    }

    #[test]
    fn test_parser_utf8_toggle() {
        assert_eq!(
            parse("\x1b%@\x1b%G\x1b%8"),
            vec![
                Action::Utf8Mode(false),
                Action::Utf8Mode(true),
                Action::Utf8Mode(true),
            ]
        );
    }

    #[test]
    fn test_parser_single_shift() {
        assert_eq!(
            parse("\x1bNa\u{8f}b"),
            vec![
                Action::SingleShift { slot: 2, ch: 'a' },
                Action::SingleShift { slot: 3, ch: 'b' },
            ]
        );
    }

    #[test]
    fn test_parser_function_key_swallowed() {
        let mut parser = Parser::new();
        for ch in "\x1b[[A".chars() {
            assert_eq!(parser.advance(ch), None);
        }
        assert!(parser.is_ground());
    }
}
