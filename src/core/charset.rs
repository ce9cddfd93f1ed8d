//! Character set handling for terminal emulation
//!
//! Four translation maps can be bound to the G0-G3 slots: Latin-1
//! (identity), the VT100 special graphics set, IBM code page 437 and a
//! "direct to font" map that routes bytes into the U+F0xx private use block.
//! Bytes below 256 pass through the active map before being printed.

use serde::{Deserialize, Serialize};

/// A byte-to-codepoint translation map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CharsetMap {
    /// ISO 8859-1, every byte maps to itself
    #[default]
    Latin1,
    /// DEC special graphics (line drawing in 0x5F-0x7E)
    VtGraphics,
    /// IBM PC code page 437
    CodePage437,
    /// Bytes map to U+F000 + byte, which print as the raw byte
    DirectToFont,
}

/// VT100 special graphics for 0x60-0x7E
const VT_GRAPHICS_HIGH: [u16; 31] = [
    0x25C6, 0x2592, 0x2409, 0x240C, 0x240D, 0x240A, 0x00B0, 0x00B1, //
    0x2591, 0x240B, 0x2518, 0x2510, 0x250C, 0x2514, 0x253C, 0xF800, //
    0xF801, 0x2500, 0xF803, 0xF804, 0x251C, 0x2524, 0x2534, 0x252C, //
    0x2502, 0x2264, 0x2265, 0x03C0, 0x2260, 0x00A3, 0x00B7,
];

/// Code page 437 glyphs for the C0 range
const CP437_LOW: [u16; 32] = [
    0x0000, 0x263A, 0x263B, 0x2665, 0x2666, 0x2663, 0x2660, 0x2022, //
    0x25D8, 0x25CB, 0x25D9, 0x2642, 0x2640, 0x266A, 0x266B, 0x263C, //
    0x25B6, 0x25C0, 0x2195, 0x203C, 0x00B6, 0x00A7, 0x25AC, 0x21A8, //
    0x2191, 0x2193, 0x2192, 0x2190, 0x221F, 0x2194, 0x25B2, 0x25BC,
];

/// Code page 437 glyphs for 0x80-0xFF
const CP437_HIGH: [u16; 128] = [
    0x00C7, 0x00FC, 0x00E9, 0x00E2, 0x00E4, 0x00E0, 0x00E5, 0x00E7, //
    0x00EA, 0x00EB, 0x00E8, 0x00EF, 0x00EE, 0x00EC, 0x00C4, 0x00C5, //
    0x00C9, 0x00E6, 0x00C6, 0x00F4, 0x00F6, 0x00F2, 0x00FB, 0x00F9, //
    0x00FF, 0x00D6, 0x00DC, 0x00A2, 0x00A3, 0x00A5, 0x20A7, 0x0192, //
    0x00E1, 0x00ED, 0x00F3, 0x00FA, 0x00F1, 0x00D1, 0x00AA, 0x00BA, //
    0x00BF, 0x2310, 0x00AC, 0x00BD, 0x00BC, 0x00A1, 0x00AB, 0x00BB, //
    0x2591, 0x2592, 0x2593, 0x2502, 0x2524, 0x2561, 0x2562, 0x2556, //
    0x2555, 0x2563, 0x2551, 0x2557, 0x255D, 0x255C, 0x255B, 0x2510, //
    0x2514, 0x2534, 0x252C, 0x251C, 0x2500, 0x253C, 0x255E, 0x255F, //
    0x255A, 0x2554, 0x2569, 0x2566, 0x2560, 0x2550, 0x256C, 0x2567, //
    0x2568, 0x2564, 0x2565, 0x2559, 0x2558, 0x2552, 0x2553, 0x256B, //
    0x256A, 0x2518, 0x250C, 0x2588, 0x2584, 0x258C, 0x2590, 0x2580, //
    0x03B1, 0x00DF, 0x0393, 0x03C0, 0x03A3, 0x03C3, 0x00B5, 0x03C4, //
    0x03A6, 0x0398, 0x03A9, 0x03B4, 0x221E, 0x03C6, 0x03B5, 0x2229, //
    0x2261, 0x00B1, 0x2265, 0x2264, 0x2320, 0x2321, 0x00F7, 0x2248, //
    0x00B0, 0x2219, 0x00B7, 0x221A, 0x207F, 0x00B2, 0x25A0, 0x00A0,
];

const DIRECT_FONT_BASE: u32 = 0xF000;

impl CharsetMap {
    /// Map selected by the final byte of a G-slot designation, if known
    pub fn from_designator(byte: char) -> Option<Self> {
        match byte {
            '0' => Some(CharsetMap::VtGraphics),
            'A' | 'B' => Some(CharsetMap::Latin1),
            'U' => Some(CharsetMap::CodePage437),
            'K' => Some(CharsetMap::DirectToFont),
            _ => None,
        }
    }

    /// Translate one byte through this map
    pub fn translate(self, byte: u8) -> char {
        let code = match self {
            CharsetMap::Latin1 => u32::from(byte),
            CharsetMap::VtGraphics => match byte {
                0x2B => 0x2192,
                0x2C => 0x2190,
                0x2D => 0x2191,
                0x2E => 0x2193,
                0x30 => 0x2588,
                0x5F => 0x00A0,
                0x60..=0x7E => u32::from(VT_GRAPHICS_HIGH[usize::from(byte - 0x60)]),
                _ => u32::from(byte),
            }
            CharsetMap::CodePage437 => match byte {
                0x00..=0x1F => u32::from(CP437_LOW[usize::from(byte)]),
                0x7F => 0x2302,
                0x80..=0xFF => u32::from(CP437_HIGH[usize::from(byte - 0x80)]),
                _ => u32::from(byte),
            }
            CharsetMap::DirectToFont => DIRECT_FONT_BASE | u32::from(byte),
        };
        char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
    }
}

/// Undo the direct-to-font encoding: U+F0xx prints as the byte xx.
pub fn direct_font_glyph(ch: char) -> Option<char> {
    let code = u32::from(ch);
    if code & 0xFF00 == DIRECT_FONT_BASE {
        char::from_u32(code & 0xFF)
    } else {
        None
    }
}

/// Byte-order marks and bidi controls that never reach the screen
pub fn is_invisible_format(ch: char) -> bool {
    matches!(ch, '\u{FEFF}' | '\u{200A}'..='\u{200F}')
}

/// G0-G3 bindings plus the slot selected by SI/SO
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharsetState {
    pub slots: [CharsetMap; 4],
    /// Currently selected slot (0 = G0, 1 = G1)
    pub active: usize,
}

impl Default for CharsetState {
    fn default() -> Self {
        Self::with_slots(Self::DEFAULT_SLOTS)
    }
}

impl CharsetState {
    /// Latin-1, VT100 graphics, CP437, direct-to-font
    pub const DEFAULT_SLOTS: [CharsetMap; 4] = [
        CharsetMap::Latin1,
        CharsetMap::VtGraphics,
        CharsetMap::CodePage437,
        CharsetMap::DirectToFont,
    ];

    pub fn with_slots(slots: [CharsetMap; 4]) -> Self {
        Self { slots, active: 0 }
    }

    /// Map bound to the selected slot
    pub fn current(&self) -> CharsetMap {
        self.slots[self.active]
    }

    /// Map bound to slot `slot` (clamped to G3)
    pub fn slot(&self, slot: usize) -> CharsetMap {
        self.slots[slot.min(3)]
    }

    /// Bind `map` to `slot`, returning true if that slot is the active one
    pub fn designate(&mut self, slot: usize, map: CharsetMap) -> bool {
        let slot = slot.min(3);
        self.slots[slot] = map;
        slot == self.active
    }

    /// Select G0 or G1
    pub fn select(&mut self, slot: usize) {
        self.active = slot.min(3);
    }
}
