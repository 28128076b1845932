//! Scriptable test app shared by the runtime tests.

#![allow(dead_code, clippy::arithmetic_side_effects)]

use std::cell::RefCell;
use std::rc::Rc;

use platform::Key;
use ui::{App, Context, DrawOutcome, Navigation};

/// Shared event log: `"H:draw"`, `"A:key13"`, ...
#[derive(Clone, Default)]
pub struct Log(Rc<RefCell<Vec<String>>>);

impl Log {
    pub fn push(&self, entry: String) {
        self.0.borrow_mut().push(entry);
    }

    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    pub fn draws(&self) -> Vec<String> {
        self.0
            .borrow()
            .iter()
            .filter(|e| e.ends_with(":draw"))
            .cloned()
            .collect()
    }
}

/// App that logs every call. Enter pushes `child` (if any), Esc pops.
pub struct Scripted {
    pub name: &'static str,
    pub tick_ms: u32,
    pub log: Log,
    /// Request a pop from the n-th draw (1-based).
    pub close_on_draw: Option<usize>,
    pub child: Option<fn(&Log) -> Box<dyn App>>,
    draws: usize,
}

impl Scripted {
    pub fn new(name: &'static str, tick_ms: u32, log: &Log) -> Self {
        Self {
            name,
            tick_ms,
            log: log.clone(),
            close_on_draw: None,
            child: None,
            draws: 0,
        }
    }

    pub fn boxed(self) -> Box<dyn App> {
        Box::new(self)
    }
}

impl App for Scripted {
    fn title(&self) -> &str {
        self.name
    }

    fn tick_ms(&self) -> u32 {
        self.tick_ms
    }

    fn draw(&mut self, ctx: &mut Context<'_>) -> DrawOutcome {
        self.draws += 1;
        self.log.push(format!("{}:draw", self.name));
        ui::widgets::clear_screen(ctx.display);
        ui::widgets::header(ctx.display, self.name);
        if self.close_on_draw == Some(self.draws) {
            DrawOutcome::RequestPop
        } else {
            DrawOutcome::Continue
        }
    }

    fn handle_input(&mut self, _ctx: &mut Context<'_>, key: Key) -> Navigation {
        self.log.push(format!("{}:key{}", self.name, key.code()));
        match key {
            Key::ENTER => match self.child {
                Some(make) => Navigation::Push(make(&self.log)),
                None => Navigation::Stay,
            },
            Key::ESCAPE => Navigation::Pop,
            _ => Navigation::Stay,
        }
    }
}

/// The app H pushes in the end-to-end scenario.
pub fn child_a(log: &Log) -> Box<dyn App> {
    Scripted::new("A", 100, log).boxed()
}
