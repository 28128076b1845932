//! Millisecond tick source and wraparound-safe tick arithmetic.
//!
//! Tick values wrap at [`TICKS_PERIOD`] (2^30), so a plain subtraction gives
//! nonsense across the wrap. [`ticks_diff`] interprets the difference as a
//! signed offset in `-P/2 .. P/2`.

/// Opaque millisecond tick counter, always `< TICKS_PERIOD`.
pub type Ticks = u32;

/// Tick counter modulus (2^30).
pub const TICKS_PERIOD: u32 = 1 << 30;

const TICKS_MASK: u32 = TICKS_PERIOD - 1;
const TICKS_HALF: u32 = TICKS_PERIOD / 2;

/// Signed difference `a - b`, correct across counter wraparound.
///
/// Result lies in `-(P/2) .. P/2`.
#[must_use]
pub fn ticks_diff(a: Ticks, b: Ticks) -> i32 {
    let shifted = a.wrapping_sub(b).wrapping_add(TICKS_HALF) & TICKS_MASK;
    // shifted < 2^30 fits i32; HALF = 2^29 fits i32.
    #[allow(clippy::cast_possible_wrap)]
    let signed = (shifted as i32).wrapping_sub(TICKS_HALF as i32);
    signed
}

/// `t + delta_ms`, reduced modulo the tick period.
#[must_use]
pub fn ticks_add(t: Ticks, delta_ms: i32) -> Ticks {
    #[allow(clippy::cast_sign_loss)]
    let delta = delta_ms as u32;
    t.wrapping_add(delta) & TICKS_MASK
}

/// Reduce a raw millisecond count into the tick range.
#[must_use]
pub fn ticks_from_millis(ms: u64) -> Ticks {
    #[allow(clippy::cast_possible_truncation)]
    let low = ms as u32;
    low & TICKS_MASK
}

/// Monotonic time and cooperative sleep.
///
/// `sleep_ms` is the only point where a running screen gives up the CPU.
pub trait ClockSource {
    /// Block for `ms` milliseconds.
    fn sleep_ms(&mut self, ms: u32);

    /// Current tick count in milliseconds, modulo [`TICKS_PERIOD`].
    fn ticks_ms(&self) -> Ticks;

    /// Wraparound-safe `a - b`.
    fn ticks_diff(&self, a: Ticks, b: Ticks) -> i32 {
        ticks_diff(a, b)
    }
}

impl<C: ClockSource + ?Sized> ClockSource for &mut C {
    fn sleep_ms(&mut self, ms: u32) {
        (**self).sleep_ms(ms);
    }

    fn ticks_ms(&self) -> Ticks {
        (**self).ticks_ms()
    }
}
