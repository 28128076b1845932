//! Navigation state: a stack of apps with the home app at the bottom.
//!
//! The home app lives outside the vector, so the stack can never be empty
//! and there is always a top to draw. Popping at home is a no-op.

use alloc::boxed::Box;
use alloc::vec::Vec;

use platform::{ticks_diff, Ticks};

use crate::app::App;
use crate::error::RuntimeError;

/// One stacked app and when it was last drawn.
pub(crate) struct Slot {
    pub(crate) app: Box<dyn App>,
    /// `None` until the first draw, and again whenever the app becomes top.
    pub(crate) last_draw: Option<Ticks>,
}

impl Slot {
    fn new(app: Box<dyn App>) -> Self {
        Self {
            app,
            last_draw: None,
        }
    }

    /// True if the app has never been drawn or `tick_ms` has elapsed.
    pub(crate) fn is_due(&self, now: Ticks) -> bool {
        let Some(last) = self.last_draw else {
            return true;
        };
        let tick = i32::try_from(self.app.tick_ms().max(1)).unwrap_or(i32::MAX);
        ticks_diff(now, last) >= tick
    }
}

/// Stack of running apps.
pub struct AppStack {
    home: Slot,
    above: Vec<Slot>,
}

impl AppStack {
    /// Stack holding only `home`.
    pub fn new(home: Box<dyn App>) -> Self {
        Self {
            home: Slot::new(home),
            above: Vec::new(),
        }
    }

    /// Stack from bottom to top. The first app becomes home.
    pub fn from_apps<I>(apps: I) -> Result<Self, RuntimeError>
    where
        I: IntoIterator<Item = Box<dyn App>>,
    {
        let mut apps = apps.into_iter();
        let home = apps.next().ok_or(RuntimeError::EmptyStack)?;
        Ok(Self {
            home: Slot::new(home),
            above: apps.map(Slot::new).collect(),
        })
    }

    /// The app that is drawn and receives keys.
    pub fn top(&self) -> &dyn App {
        match self.above.last() {
            Some(slot) => &*slot.app,
            None => &*self.home.app,
        }
    }

    pub(crate) fn top_slot_mut(&mut self) -> &mut Slot {
        match self.above.last_mut() {
            Some(slot) => slot,
            None => &mut self.home,
        }
    }

    /// The bottom app.
    pub fn home(&self) -> &dyn App {
        &*self.home.app
    }

    /// Number of apps, always at least 1.
    pub fn len(&self) -> usize {
        self.above.len().saturating_add(1)
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// True when only the home app remains.
    pub fn at_home(&self) -> bool {
        self.above.is_empty()
    }

    /// Titles from bottom to top.
    pub fn titles(&self) -> Vec<&str> {
        core::iter::once(&self.home)
            .chain(self.above.iter())
            .map(|slot| slot.app.title())
            .collect()
    }

    /// Put `app` on top. It is drawn on the next pass.
    pub fn push(&mut self, app: Box<dyn App>) {
        tracing::debug!(title = app.title(), depth = self.len(), "push");
        self.above.push(Slot::new(app));
    }

    /// Drop the top app unless it is home. The newly exposed app is drawn on
    /// the next pass whatever its last draw time.
    pub fn pop(&mut self) -> Option<Box<dyn App>> {
        let slot = self.above.pop()?;
        self.top_slot_mut().last_draw = None;
        tracing::debug!(title = slot.app.title(), depth = self.len(), "pop");
        Some(slot.app)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::app::{DrawOutcome, Navigation};
    use crate::context::Context;
    use platform::Key;

    struct Named(&'static str, u32);

    impl App for Named {
        fn title(&self) -> &str {
            self.0
        }

        fn tick_ms(&self) -> u32 {
            self.1
        }

        fn draw(&mut self, _ctx: &mut Context<'_>) -> DrawOutcome {
            DrawOutcome::Continue
        }

        fn handle_input(&mut self, _ctx: &mut Context<'_>, _key: Key) -> Navigation {
            Navigation::Stay
        }
    }

    fn named(title: &'static str) -> Box<dyn App> {
        Box::new(Named(title, 200))
    }

    #[test]
    fn test_stack_starts_at_home() {
        let stack = AppStack::new(named("home"));
        assert_eq!(stack.top().title(), "home");
        assert_eq!(stack.len(), 1);
        assert!(stack.at_home());
    }

    #[test]
    fn test_push_then_pop() {
        let mut stack = AppStack::new(named("home"));
        stack.push(named("memos"));
        assert_eq!(stack.top().title(), "memos");
        let popped = stack.pop().unwrap();
        assert_eq!(popped.title(), "memos");
        assert_eq!(stack.top().title(), "home");
    }

    #[test]
    fn test_pop_at_home_is_noop() {
        let mut stack = AppStack::new(named("home"));
        assert!(stack.pop().is_none());
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.top().title(), "home");
    }

    #[test]
    fn test_from_apps_keeps_order() {
        let stack = AppStack::from_apps([named("a"), named("b"), named("c")]).unwrap();
        assert_eq!(stack.titles(), ["a", "b", "c"]);
        assert_eq!(stack.home().title(), "a");
        assert_eq!(stack.top().title(), "c");
    }

    #[test]
    fn test_from_apps_rejects_empty() {
        let err = AppStack::from_apps(Vec::<Box<dyn App>>::new()).err();
        assert_eq!(err, Some(RuntimeError::EmptyStack));
    }

    #[test]
    fn test_push_resets_draw_timer() {
        let mut stack = AppStack::new(named("home"));
        stack.top_slot_mut().last_draw = Some(100);
        stack.push(named("next"));
        assert!(stack.top_slot_mut().last_draw.is_none());
    }

    #[test]
    fn test_pop_resets_exposed_timer() {
        let mut stack = AppStack::new(named("home"));
        stack.top_slot_mut().last_draw = Some(100);
        stack.push(named("next"));
        stack.pop();
        assert!(stack.top_slot_mut().is_due(101));
    }

    #[test]
    fn test_due_after_tick() {
        let mut slot = Slot::new(Box::new(Named("x", 200)));
        assert!(slot.is_due(0), "never drawn");
        slot.last_draw = Some(0);
        assert!(!slot.is_due(150));
        assert!(slot.is_due(200));
    }

    #[test]
    fn test_zero_tick_is_clamped() {
        let mut slot = Slot::new(Box::new(Named("x", 0)));
        slot.last_draw = Some(10);
        assert!(!slot.is_due(10), "same tick twice never redraws");
        assert!(slot.is_due(11));
    }

    #[test]
    fn test_due_across_wrap() {
        let mut slot = Slot::new(Box::new(Named("x", 200)));
        slot.last_draw = Some(platform::TICKS_PERIOD - 100);
        assert!(!slot.is_due(50));
        assert!(slot.is_due(100));
    }
}
