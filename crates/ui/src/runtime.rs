//! The cooperative main loop.
//!
//! One [`AppRuntime::step`] is one iteration:
//!
//! 1. read the clock; the top app is drawn if it is due, then `update()`;
//! 2. a `RequestPop` from that draw pops the app and ends the iteration;
//! 3. at most one key is read and handed to the same app;
//! 4. sleep `loop_sleep_ms`.
//!
//! [`AppRuntime::run`] repeats until the display reports the host window
//! closed.

use alloc::boxed::Box;

use platform::{DisplayError, Hal, Key};

use crate::app::{App, DrawOutcome, Navigation};
use crate::context::Context;
use crate::navigation::AppStack;

/// Default pause at the end of every iteration.
pub const DEFAULT_LOOP_SLEEP_MS: u32 = 5;

/// Runtime tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Milliseconds slept at the end of each iteration
    pub loop_sleep_ms: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            loop_sleep_ms: DEFAULT_LOOP_SLEEP_MS,
        }
    }
}

/// What one iteration did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepReport {
    /// The top app was drawn and the display updated
    pub drew: bool,
    /// Key consumed this iteration
    pub key: Option<Key>,
    /// The drawn app asked to close and was popped
    pub self_closed: bool,
    /// The display's host window is gone
    pub host_closed: bool,
}

/// Why [`AppRuntime::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeExit {
    /// The simulator window was closed.
    HostClosed,
}

/// Owns the platform and the app stack and drives them.
pub struct AppRuntime {
    hal: Hal,
    stack: AppStack,
    config: RuntimeConfig,
}

impl AppRuntime {
    /// Runtime with `home` as the only app.
    pub fn new(hal: Hal, home: Box<dyn App>) -> Self {
        Self::with_stack(hal, AppStack::new(home))
    }

    /// Runtime over an existing stack.
    pub fn with_stack(hal: Hal, stack: AppStack) -> Self {
        Self {
            hal,
            stack,
            config: RuntimeConfig::default(),
        }
    }

    /// Replace the tuning.
    #[must_use]
    pub fn with_config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Current tuning.
    pub fn config(&self) -> RuntimeConfig {
        self.config
    }

    /// The app stack.
    pub fn stack(&self) -> &AppStack {
        &self.stack
    }

    /// The platform backends.
    pub fn hal_mut(&mut self) -> &mut Hal {
        &mut self.hal
    }

    /// Give back the platform and the stack.
    pub fn into_parts(self) -> (Hal, AppStack) {
        (self.hal, self.stack)
    }

    /// Run one iteration.
    pub fn step(&mut self) -> StepReport {
        let mut report = StepReport::default();
        let now = self.hal.clock.ticks_ms();
        let slot = self.stack.top_slot_mut();
        let mut ctx = Context::new(&mut self.hal);

        if slot.is_due(now) {
            tracing::trace!(title = slot.app.title(), now, "draw");
            let outcome = slot.app.draw(&mut ctx);
            report.drew = true;
            match ctx.display.update() {
                Ok(()) => {}
                Err(DisplayError::Closed) => {
                    report.host_closed = true;
                    return report;
                }
                Err(e) => tracing::warn!(error = %e, "display update failed"),
            }
            match outcome {
                DrawOutcome::RequestPop => {
                    report.self_closed = true;
                    tracing::debug!(title = slot.app.title(), "self-close");
                    self.stack.pop();
                    return report;
                }
                DrawOutcome::Continue => slot.last_draw = Some(now),
            }
        }

        let key = ctx.read_key();
        report.key = key;
        let navigation = match key {
            Some(key) => {
                tracing::trace!(title = slot.app.title(), key = key.code(), "key");
                slot.app.handle_input(&mut ctx, key)
            }
            None => Navigation::Stay,
        };

        match navigation {
            Navigation::Stay => {}
            Navigation::Push(app) => self.stack.push(app),
            Navigation::Pop => {
                self.stack.pop();
            }
        }

        self.hal.clock.sleep_ms(self.config.loop_sleep_ms);
        report
    }

    /// Step until the host window closes.
    pub fn run(&mut self) -> RuntimeExit {
        tracing::info!(home = self.stack.home().title(), "runtime started");
        loop {
            if self.step().host_closed {
                tracing::info!("host window closed");
                return RuntimeExit::HostClosed;
            }
        }
    }
}
