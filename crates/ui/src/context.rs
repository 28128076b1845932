//! What an app can reach while drawing or handling a key.

use platform::{
    BacklightController, ClockSource, DisplaySurface, Hal, InputSource, Key, StorageBackend,
};

/// Borrowed view of the platform backends, rebuilt for every call into an app.
///
/// `input` is exposed so an app can run a private modal sub-loop (see
/// [`prompt_input`](crate::prompt::prompt_input)); the runtime itself only
/// reads one key per iteration.
pub struct Context<'a> {
    /// Drawing surface
    pub display: &'a mut dyn DisplaySurface,
    /// Keypad
    pub input: &'a mut dyn InputSource,
    /// Ticks and sleep
    pub clock: &'a mut dyn ClockSource,
    /// Blob storage
    pub storage: &'a mut dyn StorageBackend,
    /// RGBW backlight
    pub backlight: &'a mut dyn BacklightController,
}

impl<'a> Context<'a> {
    /// Borrow every backend of `hal`.
    pub fn new(hal: &'a mut Hal) -> Self {
        Self {
            display: &mut *hal.display,
            input: &mut *hal.input,
            clock: &mut *hal.clock,
            storage: &mut *hal.storage,
            backlight: &mut *hal.backlight,
        }
    }

    /// Display width in pixels.
    pub fn width(&self) -> u32 {
        self.display.bounds().0
    }

    /// Display height in pixels.
    pub fn height(&self) -> u32 {
        self.display.bounds().1
    }

    /// One key, with bus errors read as "no key".
    pub fn read_key(&mut self) -> Option<Key> {
        match self.input.read_key() {
            Ok(key) => key,
            Err(e) => {
                tracing::debug!(error = %e, "keypad read failed");
                None
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use platform::mocks::{mock_hal, MockPanel};
    use platform::InputError;

    #[test]
    fn reports_display_size() {
        let (mut hal, _) = mock_hal(MockPanel::new(128, 64), 0);
        let ctx = Context::new(&mut hal);
        assert_eq!((ctx.width(), ctx.height()), (128, 64));
    }

    #[test]
    fn bus_errors_read_as_no_key() {
        let (mut hal, handles) = mock_hal(MockPanel::new(8, 8), 0);
        handles.input.push_error(InputError::Bus);
        handles.input.push_key(Key::ENTER);
        let mut ctx = Context::new(&mut hal);
        assert_eq!(ctx.read_key(), None);
        assert_eq!(ctx.read_key(), Some(Key::ENTER));
    }
}
