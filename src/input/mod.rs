//! Key Input Decoder
//!
//! Decodes the raw byte stream of a terminal in raw mode into logical key
//! events. The interesting part is disambiguating a bare Escape keypress
//! from the multi-byte escape sequences terminals emit for arrow and
//! navigation keys.
//!
//! # State machine
//!
//! One `read_key` call consumes exactly the bytes of one logical event:
//!
//! - a plain byte resolves immediately (printable, control chord, Enter,
//!   Backspace)
//! - ESC starts a sequence: `ESC [ A..D/H/F` for arrows/Home/End, or
//!   `ESC [ digit ~` for Home/Delete/End/PageUp/PageDown
//! - a byte that fails to match an expected continuation degrades to the
//!   bare `Escape` key (a session no-op), never an error — a malformed
//!   sequence must not hang waiting for bytes that are not coming
//!
//! Bytes above 0x7F are decoded as UTF-8 runes and passed through; no
//! width or grapheme handling happens here.

use std::io::{self, Read};

/// The escape byte that introduces terminal escape sequences
pub const ESC: u8 = 0x1b;

/// Bitmask that turns an ASCII letter into its control-key chord
pub const CTRL_MASK: u8 = 0b0001_1111;

/// Error type for key input
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Failed to read input: {0}")]
    Read(#[from] io::Error),

    #[error("Input stream closed")]
    Eof,
}

/// A logical key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character (rune pass-through)
    Char(char),
    /// A control chord, identified by its letter (`Ctrl('q')` for 0x11)
    Ctrl(char),
    Enter,
    Backspace,
    /// A bare Escape keypress or an unrecognized sequence
    Escape,
    Delete,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,
}

impl Key {
    /// The raw control code a chord corresponds to (`chord('q')` == 0x11)
    pub fn chord(letter: char) -> u8 {
        letter as u8 & CTRL_MASK
    }
}

/// Blocking key decoder over a raw byte source
#[derive(Debug)]
pub struct KeyReader<R> {
    source: R,
}

impl<R: Read> KeyReader<R> {
    /// Create a decoder over a byte source (stdin in raw mode, or a script
    /// of bytes in tests)
    pub fn new(source: R) -> Self {
        Self { source }
    }

    /// Block until one logical key event has been decoded.
    ///
    /// Fails only when the source errors or is exhausted before the first
    /// byte of an event; exhaustion mid-sequence degrades to `Escape`.
    pub fn read_key(&mut self) -> Result<Key, InputError> {
        let first = self.read_byte()?.ok_or(InputError::Eof)?;
        match first {
            ESC => self.read_escape_sequence(),
            b'\r' => Ok(Key::Enter),
            0x7f => Ok(Key::Backspace),
            b'0' => self.read_legacy_home_end(),
            b if b < 0x20 => Ok(Key::Ctrl((b | 0x60) as char)),
            b if b < 0x80 => Ok(Key::Char(b as char)),
            b => self.read_utf8_rune(b),
        }
    }

    /// Read one byte; `None` means the source is exhausted
    fn read_byte(&mut self) -> Result<Option<u8>, InputError> {
        let mut buf = [0u8; 1];
        loop {
            match self.source.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(InputError::Read(e)),
            }
        }
    }

    /// Decode the continuation of an ESC byte
    fn read_escape_sequence(&mut self) -> Result<Key, InputError> {
        match self.read_byte()? {
            Some(b'[') => {}
            _ => return Ok(Key::Escape),
        }
        let selector = match self.read_byte()? {
            Some(b) => b,
            None => return Ok(Key::Escape),
        };
        match selector {
            b'0'..=b'9' => {
                match self.read_byte()? {
                    Some(b'~') => {}
                    _ => return Ok(Key::Escape),
                }
                Ok(match selector {
                    b'1' | b'7' => Key::Home,
                    b'3' => Key::Delete,
                    b'4' | b'8' => Key::End,
                    b'5' => Key::PageUp,
                    b'6' => Key::PageDown,
                    _ => Key::Escape,
                })
            }
            b'A' => Ok(Key::ArrowUp),
            b'B' => Ok(Key::ArrowDown),
            b'C' => Ok(Key::ArrowRight),
            b'D' => Ok(Key::ArrowLeft),
            b'H' => Ok(Key::Home),
            b'F' => Ok(Key::End),
            _ => Ok(Key::Escape),
        }
    }

    /// Legacy two-byte `0H`/`0F` form emitted by an alternate terminal
    /// mode; any other continuation yields the literal `0`
    fn read_legacy_home_end(&mut self) -> Result<Key, InputError> {
        match self.read_byte()? {
            Some(b'H') => Ok(Key::Home),
            Some(b'F') => Ok(Key::End),
            _ => Ok(Key::Char('0')),
        }
    }

    /// Decode a multi-byte UTF-8 rune starting at `lead`; invalid
    /// sequences degrade to `Escape`
    fn read_utf8_rune(&mut self, lead: u8) -> Result<Key, InputError> {
        let len = match lead {
            0xc2..=0xdf => 2,
            0xe0..=0xef => 3,
            0xf0..=0xf4 => 4,
            _ => return Ok(Key::Escape),
        };
        let mut bytes = [lead, 0, 0, 0];
        for slot in bytes.iter_mut().take(len).skip(1) {
            match self.read_byte()? {
                Some(b) if b & 0xc0 == 0x80 => *slot = b,
                _ => return Ok(Key::Escape),
            }
        }
        match std::str::from_utf8(&bytes[..len]) {
            Ok(s) => Ok(s.chars().next().map_or(Key::Escape, Key::Char)),
            Err(_) => Ok(Key::Escape),
        }
    }
}
