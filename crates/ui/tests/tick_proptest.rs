//! Property tests: the top app is redrawn exactly when its tick has elapsed,
//! including across the tick counter wrap.

#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

mod support;

use platform::mocks::{mock_hal, MockPanel};
use platform::{ticks_add, ticks_diff, Ticks, TICKS_PERIOD};
use proptest::prelude::*;
use ui::AppRuntime;

use support::{Log, Scripted};

fn start() -> impl Strategy<Value = Ticks> {
    prop_oneof![
        0..TICKS_PERIOD,
        (TICKS_PERIOD - 2_000)..TICKS_PERIOD,
    ]
}

proptest! {
    #[test]
    fn draws_follow_the_tick_across_wrap(
        tick_ms in 0u32..500,
        start in start(),
        gaps in prop::collection::vec(0i32..400, 1..60),
    ) {
        let log = Log::default();
        let (hal, handles) = mock_hal(MockPanel::new(128, 64), start);
        let mut rt = AppRuntime::new(hal, Scripted::new("H", tick_ms, &log).boxed());
        let tick = i32::try_from(tick_ms.max(1)).unwrap();

        let mut now = start;
        let mut last: Option<Ticks> = None;
        for gap in gaps {
            now = ticks_add(now, gap);
            handles.clock.set(now);
            let due = last.map_or(true, |t| ticks_diff(now, t) >= tick);

            let report = rt.step();
            prop_assert_eq!(report.drew, due, "now={} last={:?} tick={}", now, last, tick);
            if report.drew {
                if let Some(t) = last {
                    prop_assert!(ticks_diff(now, t) >= tick);
                }
                last = Some(now);
            }
        }
        prop_assert_eq!(log.draws().len(), handles.flushes.get());
    }
}
