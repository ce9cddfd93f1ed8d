//! UTF-8 decoding for the terminal parser
//!
//! Streaming decoder: state survives between calls, so a multi-byte sequence
//! may be split across separate input chunks. Lead bytes announce 1-5
//! continuation bytes (the historical 5- and 6-byte forms are still
//! recognised so that they can be replaced rather than misread).

/// Smallest value each continuation count may legally encode
const MIN_VALUE: [u32; 6] = [0, 0x80, 0x800, 0x1_0000, 0x20_0000, 0x400_0000];

/// UTF-8 decoder state
#[derive(Debug, Clone, Default)]
pub struct Utf8Decoder {
    /// Continuation bytes still expected
    remaining: u8,
    /// Continuation bytes the current lead byte announced
    expected: u8,
    /// Payload bits accumulated so far
    value: u32,
}

/// Result of feeding a byte to the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utf8Result {
    /// Need more bytes
    Pending,
    /// A complete codepoint; malformed sequences yield U+FFFD
    Char(char),
    /// The byte could not start a sequence and was dropped
    Discarded,
}

impl Utf8Decoder {
    /// Create a new decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the decoder state
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check if decoder is in the middle of a sequence
    pub fn is_pending(&self) -> bool {
        self.remaining > 0
    }

    /// Decode one byte. With `utf8` off every byte is its own (Latin-1)
    /// codepoint.
    pub fn decode(&mut self, byte: u8, utf8: bool) -> Option<char> {
        if !utf8 {
            return Some(char::from(byte));
        }
        match self.feed(byte) {
            Utf8Result::Char(ch) => Some(ch),
            Utf8Result::Pending | Utf8Result::Discarded => None,
        }
    }

    /// Feed a byte to the decoder
    pub fn feed(&mut self, byte: u8) -> Utf8Result {
        if byte < 0x80 {
            self.remaining = 0;
            return Utf8Result::Char(char::from(byte));
        }

        if self.remaining > 0 && byte & 0xC0 == 0x80 {
            self.value = (self.value << 6) | u32::from(byte & 0x3F);
            self.remaining -= 1;
            if self.remaining > 0 {
                return Utf8Result::Pending;
            }
            return Utf8Result::Char(self.finish());
        }

        // Anything else (re)starts lead byte detection
        let (count, payload) = match byte {
            b if b & 0xE0 == 0xC0 => (1, b & 0x1F),
            b if b & 0xF0 == 0xE0 => (2, b & 0x0F),
            b if b & 0xF8 == 0xF0 => (3, b & 0x07),
            b if b & 0xFC == 0xF8 => (4, b & 0x03),
            b if b & 0xFE == 0xFC => (5, b & 0x01),
            _ => {
                self.remaining = 0;
                return Utf8Result::Discarded;
            }
        };
        self.remaining = count;
        self.expected = count;
        self.value = u32::from(payload);
        Utf8Result::Pending
    }

    fn finish(&self) -> char {
        if self.value < MIN_VALUE[usize::from(self.expected)] {
            return char::REPLACEMENT_CHARACTER;
        }
        char::from_u32(self.value).unwrap_or(char::REPLACEMENT_CHARACTER)
    }
}
