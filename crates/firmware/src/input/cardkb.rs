//! M5Stack CardKB I²C keypad.
//!
//! The keypad buffers one key; reading a single byte from its address
//! returns the code (already in the organizer key space) or 0 when idle.

use alloc::vec::Vec;

use embedded_hal::i2c::I2c;

use platform::{InputError, InputSource, Key};

/// 7-bit I²C address of the CardKB.
pub const CARDKB_ADDR: u8 = 0x5F;

/// Upper bound on keys drained by one `poll`, so a stuck bus cannot spin.
pub const MAX_POLL_KEYS: usize = 16;

/// CardKB driver over any blocking [`I2c`] bus.
pub struct CardKb<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> CardKb<I2C> {
    /// Keypad at the default address.
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, CARDKB_ADDR)
    }

    /// Keypad at a non-default address.
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Give the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> InputSource for CardKb<I2C> {
    fn poll(&mut self) -> Result<Vec<Key>, InputError> {
        let mut keys = Vec::new();
        while keys.len() < MAX_POLL_KEYS {
            match self.read_key() {
                Ok(Some(key)) => keys.push(key),
                Ok(None) => break,
                Err(err) if keys.is_empty() => return Err(err),
                Err(_) => {
                    tracing::debug!(kept = keys.len(), "cardkb bus error mid-poll");
                    break;
                }
            }
        }
        Ok(keys)
    }

    fn read_key(&mut self) -> Result<Option<Key>, InputError> {
        let mut byte = [0u8; 1];
        self.i2c.read(self.address, &mut byte).map_err(|_| {
            tracing::trace!(address = self.address, "cardkb read failed");
            InputError::Bus
        })?;
        let [code] = byte;
        Ok(Key::from_byte(code))
    }
}
