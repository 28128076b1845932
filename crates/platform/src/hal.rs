//! Owned bundle of the five backends.

use alloc::boxed::Box;

use crate::backlight::BacklightController;
use crate::clock::ClockSource;
use crate::display::DisplaySurface;
use crate::input::InputSource;
use crate::storage::StorageBackend;

/// Everything a screen can touch, chosen once at startup.
///
/// Backends are trait objects so simulated and real implementations are
/// interchangeable behind the same type.
pub struct Hal {
    /// Drawing surface
    pub display: Box<dyn DisplaySurface>,
    /// Keypad
    pub input: Box<dyn InputSource>,
    /// Ticks and sleep
    pub clock: Box<dyn ClockSource>,
    /// Blob persistence
    pub storage: Box<dyn StorageBackend>,
    /// RGBW backlight
    pub backlight: Box<dyn BacklightController>,
}

impl Hal {
    /// Bundle five backends.
    pub fn new(
        display: Box<dyn DisplaySurface>,
        input: Box<dyn InputSource>,
        clock: Box<dyn ClockSource>,
        storage: Box<dyn StorageBackend>,
        backlight: Box<dyn BacklightController>,
    ) -> Self {
        Self {
            display,
            input,
            clock,
            storage,
            backlight,
        }
    }
}
