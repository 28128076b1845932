//! Keypad code space.
//!
//! Keys are single bytes. Printable keys carry their ASCII value, navigation
//! and function keys use the CardKB extended codes. "No key" is expressed as
//! `Option::<Key>::None`, never as a sentinel byte.

/// A single keystroke in the 0–255 keypad code space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct Key(u8);

/// Arrow key directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Left arrow
    Left,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Right arrow
    Right,
}

impl Key {
    /// Backspace (0x08).
    pub const BACKSPACE: Key = Key(0x08);
    /// Tab (0x09).
    pub const TAB: Key = Key(0x09);
    /// Enter / carriage return (0x0D).
    pub const ENTER: Key = Key(0x0D);
    /// Escape (0x1B).
    pub const ESCAPE: Key = Key(0x1B);
    /// Space (0x20).
    pub const SPACE: Key = Key(0x20);
    /// Delete (0x7F); treated like backspace by text entry.
    pub const DELETE: Key = Key(0x7F);
    /// Left arrow (0xB4).
    pub const LEFT: Key = Key(0xB4);
    /// Up arrow (0xB5).
    pub const UP: Key = Key(0xB5);
    /// Down arrow (0xB6).
    pub const DOWN: Key = Key(0xB6);
    /// Right arrow (0xB7).
    pub const RIGHT: Key = Key(0xB7);
    /// F1 (0xF1).
    pub const F1: Key = Key(0xF1);
    /// F2 (0xF2).
    pub const F2: Key = Key(0xF2);
    /// F3 (0xF3).
    pub const F3: Key = Key(0xF3);
    /// F4 (0xF4).
    pub const F4: Key = Key(0xF4);
    /// F5 (0xF5).
    pub const F5: Key = Key(0xF5);
    /// F6 (0xF6).
    pub const F6: Key = Key(0xF6);

    /// Wrap a raw code.
    #[must_use]
    pub const fn new(code: u8) -> Self {
        Self(code)
    }

    /// Decode a byte read from the keypad bus; `0` means no key is pending.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        if byte == 0 {
            None
        } else {
            Some(Self(byte))
        }
    }

    /// Raw code.
    #[must_use]
    pub const fn code(self) -> u8 {
        self.0
    }

    /// Arrow direction, if this is an arrow key.
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Self::LEFT => Some(Direction::Left),
            Self::UP => Some(Direction::Up),
            Self::DOWN => Some(Direction::Down),
            Self::RIGHT => Some(Direction::Right),
            _ => None,
        }
    }

    /// Printable ASCII character (space through `~`), if any.
    #[must_use]
    pub fn as_char(self) -> Option<char> {
        if (0x20..0x7F).contains(&self.0) {
            Some(char::from(self.0))
        } else {
            None
        }
    }

    /// True for backspace and delete.
    #[must_use]
    pub const fn is_erase(self) -> bool {
        matches!(self, Self::BACKSPACE | Self::DELETE)
    }

    /// Function-key number (1–6), if this is F1–F6.
    #[must_use]
    pub const fn function_number(self) -> Option<u8> {
        match self.0 {
            0xF1..=0xF6 => self.0.checked_sub(0xF0),
            _ => None,
        }
    }
}

impl From<u8> for Key {
    fn from(code: u8) -> Self {
        Self(code)
    }
}

impl From<char> for Key {
    /// Non-ASCII characters map to `?`.
    fn from(c: char) -> Self {
        Self(u8::try_from(c).unwrap_or(b'?'))
    }
}
