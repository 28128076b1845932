//! Host clock.

use std::time::{Duration, Instant};

use platform::clock::ticks_from_millis;
use platform::{ClockSource, Ticks};

/// Milliseconds since construction (plus an optional offset), wrapped to
/// the tick period. `sleep_ms` blocks the thread.
pub struct SimClock {
    epoch: Instant,
    offset: Ticks,
}

impl SimClock {
    /// Clock starting at tick 0.
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Clock whose first reading is `start`.
    pub fn starting_at(start: Ticks) -> Self {
        Self {
            epoch: Instant::now(),
            offset: start,
        }
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockSource for SimClock {
    fn sleep_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
    }

    fn ticks_ms(&self) -> Ticks {
        let elapsed = u64::try_from(self.epoch.elapsed().as_millis()).unwrap_or(u64::MAX);
        ticks_from_millis(elapsed.wrapping_add(u64::from(self.offset)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::{ticks_diff, TICKS_PERIOD};

    #[test]
    fn sleep_advances_ticks() {
        let mut clock = SimClock::new();
        let before = clock.ticks_ms();
        clock.sleep_ms(20);
        assert!(ticks_diff(clock.ticks_ms(), before) >= 20);
    }

    #[test]
    fn offset_near_period_wraps() {
        let mut clock = SimClock::starting_at(TICKS_PERIOD - 200);
        let before = clock.ticks_ms();
        clock.sleep_ms(300);
        let after = clock.ticks_ms();
        assert!(after < before, "expected wrap: {before} -> {after}");
        assert!(ticks_diff(after, before) >= 300);
    }
}
