//! Simulated backlight: remembers the color and logs it.

use platform::{BacklightController, BacklightError, Rgbw};

/// Backlight with no physical output.
#[derive(Debug, Default)]
pub struct SimBacklight {
    current: Rgbw,
}

impl SimBacklight {
    /// Backlight that starts off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last applied color.
    pub fn current(&self) -> Rgbw {
        self.current
    }
}

impl BacklightController for SimBacklight {
    fn set_backlight(&mut self, color: Rgbw) -> Result<(), BacklightError> {
        tracing::info!(r = color.r, g = color.g, b = color.b, w = color.w, "backlight");
        self.current = color;
        Ok(())
    }
}
