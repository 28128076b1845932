//! Main-loop behaviour of `AppRuntime` against mock backends.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]

mod support;

use platform::mocks::{mock_hal, MockHandles, MockPanel};
use platform::{InputError, Key, TICKS_PERIOD};
use ui::{AppRuntime, AppStack, RuntimeConfig, RuntimeError, RuntimeExit};

use support::{child_a, Log, Scripted};

fn runtime(home: Scripted) -> (AppRuntime, MockHandles) {
    let (hal, handles) = mock_hal(MockPanel::new(128, 64), 0);
    (AppRuntime::new(hal, home.boxed()), handles)
}

#[test]
fn home_drawn_on_first_pass_then_on_tick() {
    let log = Log::default();
    let (mut rt, handles) = runtime(Scripted::new("H", 200, &log));

    handles.clock.set(0);
    assert!(rt.step().drew);
    handles.clock.set(150);
    assert!(!rt.step().drew);
    handles.clock.set(210);
    assert!(rt.step().drew);
    handles.clock.set(300);
    assert!(!rt.step().drew, "90 ms since the last draw");
    handles.clock.set(410);
    assert!(rt.step().drew);

    assert_eq!(log.draws().len(), 3);
    assert_eq!(handles.flushes.get(), 3, "one update per draw");
}

#[test]
fn tick_gate_survives_counter_wrap() {
    let log = Log::default();
    let (mut rt, handles) = runtime(Scripted::new("H", 200, &log));

    handles.clock.set(TICKS_PERIOD - 100);
    assert!(rt.step().drew);
    handles.clock.set(50);
    assert!(!rt.step().drew, "150 ms across the wrap");
    handles.clock.set(100);
    assert!(rt.step().drew, "200 ms across the wrap");
}

#[test]
fn end_to_end_push_and_pop() {
    let log = Log::default();
    let mut home = Scripted::new("H", 200, &log);
    home.child = Some(child_a);
    let (mut rt, handles) = runtime(home);

    handles.clock.set(0);
    rt.step();
    handles.clock.set(150);
    rt.step();
    handles.clock.set(210);
    handles.input.push_key(Key::ENTER);
    let report = rt.step();
    assert_eq!(report.key, Some(Key::ENTER));
    assert_eq!(log.take(), ["H:draw", "H:draw", "H:key13"]);
    assert_eq!(rt.stack().titles(), ["H", "A"]);

    // Only A is drawn while it is on top, H's 200 ms tick notwithstanding.
    for t in [215, 320, 430, 640] {
        handles.clock.set(t);
        rt.step();
    }
    assert_eq!(log.take(), ["A:draw", "A:draw", "A:draw", "A:draw"]);

    handles.clock.set(650);
    handles.input.push_key(Key::ESCAPE);
    rt.step();
    assert_eq!(rt.stack().titles(), ["H"]);
    handles.clock.set(655);
    assert!(rt.step().drew, "exposed home is redrawn immediately");
    assert_eq!(log.take(), ["A:key27", "H:draw"]);
}

#[test]
fn one_key_per_iteration_in_order() {
    let log = Log::default();
    let (mut rt, handles) = runtime(Scripted::new("H", 200, &log));
    handles
        .input
        .push_keys(&[Key::new(b'a'), Key::new(b'b'), Key::new(b'c')]);

    for (expected, left) in [(b'a', 2), (b'b', 1), (b'c', 0)] {
        assert_eq!(rt.step().key, Some(Key::new(expected)));
        assert_eq!(handles.input.pending(), left);
    }
    assert_eq!(rt.step().key, None);
}

#[test]
fn self_close_pops_once_without_input_or_sleep() {
    let log = Log::default();
    let (hal, handles) = mock_hal(MockPanel::new(128, 64), 0);
    let home = Scripted::new("H", 200, &log).boxed();
    let mut closing = Scripted::new("A", 100, &log);
    closing.close_on_draw = Some(1);
    let stack = AppStack::from_apps([home, closing.boxed()]).unwrap();
    let mut rt = AppRuntime::with_stack(hal, stack);

    handles.input.push_key(Key::new(b'x'));
    let report = rt.step();
    assert!(report.drew && report.self_closed);
    assert_eq!(report.key, None);
    assert_eq!(handles.input.reads(), 0, "input skipped on the closing pass");
    assert!(handles.clock.sleeps().is_empty(), "no sleep on the closing pass");
    assert_eq!(log.take(), ["A:draw"], "home not drawn in the same pass");
    assert_eq!(rt.stack().len(), 1);

    let report = rt.step();
    assert!(report.drew && !report.self_closed);
    assert_eq!(report.key, Some(Key::new(b'x')));
    assert_eq!(log.take(), ["H:draw", "H:key120"]);
}

#[test]
fn pop_at_home_is_noop() {
    let log = Log::default();
    let (mut rt, handles) = runtime(Scripted::new("H", 200, &log));
    handles.input.push_key(Key::ESCAPE);
    rt.step();
    assert_eq!(rt.stack().len(), 1);
    assert_eq!(rt.stack().top().title(), "H");
}

#[test]
fn self_close_at_home_is_noop() {
    let log = Log::default();
    let mut home = Scripted::new("H", 200, &log);
    home.close_on_draw = Some(1);
    let (mut rt, handles) = runtime(home);
    assert!(rt.step().self_closed);
    assert_eq!(rt.stack().titles(), ["H"]);
    handles.clock.set(1);
    assert!(rt.step().drew, "timer was reset, not advanced");
}

#[test]
fn input_errors_read_as_no_key() {
    let log = Log::default();
    let (mut rt, handles) = runtime(Scripted::new("H", 200, &log));
    handles.input.push_error(InputError::Bus);
    handles.input.push_key(Key::TAB);
    assert_eq!(rt.step().key, None);
    assert_eq!(rt.step().key, Some(Key::TAB));
}

#[test]
fn every_pass_sleeps_the_configured_time() {
    let log = Log::default();
    let (rt, handles) = runtime(Scripted::new("H", 200, &log));
    let mut rt = rt.with_config(RuntimeConfig { loop_sleep_ms: 1 });
    rt.step();
    rt.step();
    assert_eq!(handles.clock.sleeps(), [1, 1]);
    assert_eq!(RuntimeConfig::default().loop_sleep_ms, 5);
}

#[test]
fn run_returns_when_host_closes() {
    let log = Log::default();
    let (hal, handles) = mock_hal(MockPanel::new(128, 64).closing_after(1), 0);
    let mut rt = AppRuntime::new(hal, Scripted::new("H", 20, &log).boxed());
    assert_eq!(rt.run(), RuntimeExit::HostClosed);
    assert_eq!(log.draws().len(), 2);
    assert_eq!(handles.flushes.get(), 1);
}

#[test]
fn empty_stack_rejected() {
    let err = AppStack::from_apps(Vec::<Box<dyn ui::App>>::new()).err();
    assert_eq!(err, Some(RuntimeError::EmptyStack));
}
