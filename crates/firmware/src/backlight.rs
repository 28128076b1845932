//! RGBW backlight on four PWM channels.

use embedded_hal::pwm::SetDutyCycle;

use platform::{BacklightController, BacklightError, Rgbw};

/// Backlight driving one [`SetDutyCycle`] channel per color.
///
/// Each 0–255 intensity becomes a duty cycle of `value / 255`.
pub struct PwmBacklight<R, G, B, W> {
    red: R,
    green: G,
    blue: B,
    white: W,
}

impl<R, G, B, W> PwmBacklight<R, G, B, W>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
    W: SetDutyCycle,
{
    /// Wrap the four channels. Duty cycles are left as configured.
    pub fn new(red: R, green: G, blue: B, white: W) -> Self {
        Self {
            red,
            green,
            blue,
            white,
        }
    }
}

fn apply<P: SetDutyCycle>(channel: &mut P, value: u8) -> Result<(), BacklightError> {
    channel
        .set_duty_cycle_fraction(u16::from(value), u16::from(u8::MAX))
        .map_err(|_| BacklightError::Pwm)
}

impl<R, G, B, W> BacklightController for PwmBacklight<R, G, B, W>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
    W: SetDutyCycle,
{
    fn set_backlight(&mut self, color: Rgbw) -> Result<(), BacklightError> {
        apply(&mut self.red, color.r)?;
        apply(&mut self.green, color.g)?;
        apply(&mut self.blue, color.b)?;
        apply(&mut self.white, color.w)?;
        tracing::debug!(r = color.r, g = color.g, b = color.b, w = color.w, "backlight");
        Ok(())
    }
}
