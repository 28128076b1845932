//! Device clock on embassy-time.

use embassy_time::{block_for, Duration, Instant};

use platform::{clock::ticks_from_millis, ClockSource, Ticks};

/// [`ClockSource`] over the embassy time driver.
///
/// `sleep_ms` busy-waits with [`block_for`]; the runtime is single-threaded
/// and has nothing else to run in the meantime.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl EmbassyClock {
    /// Clock reading the global embassy time driver.
    pub const fn new() -> Self {
        Self
    }
}

impl ClockSource for EmbassyClock {
    fn sleep_ms(&mut self, ms: u32) {
        block_for(Duration::from_millis(u64::from(ms)));
    }

    fn ticks_ms(&self) -> Ticks {
        ticks_from_millis(Instant::now().as_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::TICKS_PERIOD;

    #[test]
    fn ticks_stay_in_period() {
        let clock = EmbassyClock::new();
        assert!(clock.ticks_ms() < TICKS_PERIOD);
    }

    #[test]
    fn sleep_advances_ticks() {
        let mut clock = EmbassyClock::new();
        let start = clock.ticks_ms();
        clock.sleep_ms(15);
        let elapsed = clock.ticks_diff(clock.ticks_ms(), start);
        assert!(elapsed >= 15, "elapsed {elapsed}");
    }
}
