//! Character attributes
//!
//! An attribute is a packed bitmask: the low nibble holds the foreground
//! palette index, the next nibble the background index, and the bits above
//! carry the rendition flags. Renderers never look at the raw mask; they ask
//! for the resolved [`Style`], which applies reverse video, dim/bright
//! substitution, blink and the legibility adjustments.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Rendition flags stored above the two colour nibbles.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AttrFlags: u16 {
        const REVERSE   = 0x0100;
        const UNDERLINE = 0x0200;
        const DIM       = 0x0400;
        const BRIGHT    = 0x0800;
        const BLINK     = 0x1000;
    }
}

const FG_MASK: u16 = 0x000F;
const BG_MASK: u16 = 0x00F0;

/// Palette index of light grey, the background bright colours must avoid.
const LIGHT_GREY: u8 = 7;
/// Palette index of dark grey, used for dim text.
const DARK_GREY: u8 = 8;

/// Packed character attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attr(u16);

impl Default for Attr {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Attr {
    /// Foreground 0, background 15, no flags.
    pub const DEFAULT: Attr = Attr(0x00F0);

    /// Build an attribute from its raw bitmask
    pub const fn from_bits(bits: u16) -> Self {
        Attr(bits)
    }

    /// Raw bitmask
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Foreground palette index (0-15) before resolution
    pub fn fg(self) -> u8 {
        (self.0 & FG_MASK) as u8
    }

    /// Background palette index (0-15) before resolution
    pub fn bg(self) -> u8 {
        ((self.0 & BG_MASK) >> 4) as u8
    }

    pub fn flags(self) -> AttrFlags {
        AttrFlags::from_bits_truncate(self.0)
    }

    pub fn contains(self, flags: AttrFlags) -> bool {
        self.flags().contains(flags)
    }

    #[must_use]
    pub fn with_fg(self, fg: u8) -> Self {
        Attr((self.0 & !FG_MASK) | (u16::from(fg) & FG_MASK))
    }

    #[must_use]
    pub fn with_bg(self, bg: u8) -> Self {
        Attr((self.0 & !BG_MASK) | ((u16::from(bg) << 4) & BG_MASK))
    }

    #[must_use]
    pub fn with(self, flags: AttrFlags) -> Self {
        Attr(self.0 | flags.bits())
    }

    #[must_use]
    pub fn without(self, flags: AttrFlags) -> Self {
        Attr(self.0 & !flags.bits())
    }

    /// Attribute used to fill cells vacated by scrolling.
    ///
    /// Scrolling never produces underlined blanks; explicit erases keep the
    /// full attribute.
    #[must_use]
    pub fn scroll_fill(self) -> Self {
        self.without(AttrFlags::UNDERLINE)
    }

    /// Resolve the bitmask into the colours a renderer should paint
    pub fn resolve(self) -> Style {
        let mut fg = self.fg();
        let mut bg = self.bg();
        let flags = self.flags();

        if flags.contains(AttrFlags::REVERSE) {
            std::mem::swap(&mut fg, &mut bg);
        }
        if flags.contains(AttrFlags::DIM) && !flags.contains(AttrFlags::REVERSE) {
            fg = DARK_GREY;
        } else if flags.contains(AttrFlags::BRIGHT) {
            fg |= 8;
        }
        if flags.contains(AttrFlags::BLINK) {
            bg ^= 8;
        }

        // Identical colours would make the text invisible
        if bg == fg {
            fg ^= 8;
            if fg == LIGHT_GREY {
                fg = DARK_GREY;
            }
        }
        // Bright text on a light grey background is unreadable
        if bg == LIGHT_GREY && fg >= 8 {
            fg -= 8;
            if fg == LIGHT_GREY {
                fg = DARK_GREY;
            }
        }

        Style {
            fg,
            bg,
            underline: flags.contains(AttrFlags::UNDERLINE),
        }
    }
}

/// Resolved rendition of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Style {
    /// Foreground palette index (0-15)
    pub fg: u8,
    /// Background palette index (0-15)
    pub bg: u8,
    pub underline: bool,
}

impl Default for Style {
    fn default() -> Self {
        Attr::DEFAULT.resolve()
    }
}

impl Style {
    /// True when a renderer needs no styling beyond its defaults
    pub fn is_plain(&self) -> bool {
        self.fg == 0 && self.bg == 15 && !self.underline
    }
}
