//! 16-level pen palette.
//!
//! Every backend renders the same 4-bit pen indices; the simulator shows pen
//! `p` as gray `p * 17`, the monochrome LCD lights pixels whose pen is at
//! least [`Pen::THRESHOLD`].

use embedded_graphics::pixelcolor::{Gray4, GrayColor};

/// Foreground color index in `0..=15`.
///
/// Wraps a `u8` with the invariant `value <= 15`. [`Pen::new`] reduces any
/// byte modulo 16, matching the palette index wrap of the device driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct Pen(u8);

impl Pen {
    /// Background (unlit).
    pub const BG: Pen = Pen(0);
    /// Full ink.
    pub const INK: Pen = Pen(15);
    /// Smallest pen a 1-bpp panel shows as lit.
    pub const THRESHOLD: Pen = Pen(8);
    /// Number of distinct pens.
    pub const LEVELS: u8 = 16;

    /// Create a pen, wrapping `value` into `0..=15`.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value & 0x0F)
    }

    /// Return the pen index (0–15).
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// 8-bit gray level the simulator uses for this pen.
    #[must_use]
    pub const fn gray_level(self) -> u8 {
        // 15 * 17 = 255, cannot overflow.
        #[allow(clippy::arithmetic_side_effects)]
        let level = self.0 * 17;
        level
    }

    /// True when a 1-bpp panel lights this pen.
    #[must_use]
    pub const fn is_lit(self) -> bool {
        self.0 >= Self::THRESHOLD.0
    }
}

impl From<Pen> for Gray4 {
    fn from(pen: Pen) -> Self {
        Gray4::new(pen.0)
    }
}

impl From<Gray4> for Pen {
    fn from(color: Gray4) -> Self {
        Pen::new(color.luma())
    }
}

impl From<u8> for Pen {
    fn from(value: u8) -> Self {
        Pen::new(value)
    }
}
