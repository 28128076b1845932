//! Property tests: the app stack never loses its home app.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]

mod support;

use platform::mocks::{mock_hal, MockPanel};
use platform::Key;
use proptest::prelude::*;
use ui::{AppRuntime, AppStack};

use support::{Log, Scripted};

#[derive(Debug, Clone, Copy)]
enum Op {
    Push,
    Pop,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![Just(Op::Push), Just(Op::Pop)]
}

fn key() -> impl Strategy<Value = Key> {
    prop_oneof![Just(Key::ENTER), Just(Key::ESCAPE), Just(Key::new(b'x'))]
}

fn nested(log: &Log) -> Box<dyn ui::App> {
    let mut app = Scripted::new("N", 50, log);
    app.child = Some(nested);
    app.boxed()
}

proptest! {
    #[test]
    fn stack_depth_tracks_model(ops in prop::collection::vec(op(), 0..64)) {
        let log = Log::default();
        let mut stack = AppStack::new(Scripted::new("H", 200, &log).boxed());
        let mut depth = 1usize;
        for op in ops {
            match op {
                Op::Push => {
                    stack.push(Scripted::new("N", 50, &log).boxed());
                    depth += 1;
                }
                Op::Pop => {
                    let popped = stack.pop();
                    prop_assert_eq!(popped.is_some(), depth > 1);
                    depth = depth.saturating_sub(1).max(1);
                }
            }
            prop_assert!(stack.len() >= 1);
            prop_assert_eq!(stack.len(), depth);
            prop_assert_eq!(stack.home().title(), "H");
            prop_assert_eq!(stack.at_home(), depth == 1);
        }
    }

    #[test]
    fn runtime_keeps_home_under_any_key_sequence(keys in prop::collection::vec(key(), 0..48)) {
        let log = Log::default();
        let (hal, handles) = mock_hal(MockPanel::new(128, 64), 0);
        let mut home = Scripted::new("H", 200, &log);
        home.child = Some(nested);
        let mut rt = AppRuntime::new(hal, home.boxed());

        let mut depth = 1usize;
        for key in keys {
            handles.input.push_key(key);
            let report = rt.step();
            prop_assert_eq!(report.key, Some(key));
            match key {
                Key::ENTER => depth += 1,
                Key::ESCAPE => depth = depth.saturating_sub(1).max(1),
                _ => {}
            }
            prop_assert_eq!(rt.stack().len(), depth);
            prop_assert_eq!(rt.stack().home().title(), "H");
        }
    }
}
