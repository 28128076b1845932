//! RGBW backlight abstraction

use crate::error::BacklightError;

/// Backlight intensities, 0 = off, 255 = full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgbw {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// White channel
    pub w: u8,
}

impl Rgbw {
    /// All channels off.
    pub const OFF: Rgbw = Rgbw::new(0, 0, 0, 0);
    /// Plain white at full brightness.
    pub const WHITE: Rgbw = Rgbw::new(0, 0, 0, 255);

    /// Build from four channel values.
    pub const fn new(r: u8, g: u8, b: u8, w: u8) -> Self {
        Self { r, g, b, w }
    }

    /// Channels in R, G, B, W order.
    pub const fn channels(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.w]
    }
}

/// Sets the display backlight color.
pub trait BacklightController {
    /// Apply `color` immediately.
    fn set_backlight(&mut self, color: Rgbw) -> Result<(), BacklightError>;
}
