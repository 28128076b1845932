//! Keypad drivers.
//!
//! The board reads an M5Stack CardKB over I²C. [`CardKb`] implements
//! [`platform::InputSource`], so screens never see the bus.

pub mod cardkb;

pub use cardkb::{CardKb, CARDKB_ADDR, MAX_POLL_KEYS};
