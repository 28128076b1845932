//! The contract every screen implements.

use alloc::boxed::Box;
use core::fmt;

use platform::{DisplaySurface, Key};

use crate::context::Context;

/// Minimum milliseconds between draws unless an app says otherwise.
pub const DEFAULT_TICK_MS: u32 = 200;

/// What `draw` asks of the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawOutcome {
    /// Stay on screen.
    #[default]
    Continue,
    /// Close this app. The runtime pops it once, right after the draw.
    RequestPop,
}

/// What `handle_input` asks of the runtime.
#[derive(Default)]
pub enum Navigation {
    /// No change.
    #[default]
    Stay,
    /// Open a new app on top.
    Push(Box<dyn App>),
    /// Close the current app. Ignored at the home app.
    Pop,
}

impl fmt::Debug for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stay => f.write_str("Stay"),
            Self::Push(app) => f.debug_tuple("Push").field(&app.title()).finish(),
            Self::Pop => f.write_str("Pop"),
        }
    }
}

/// A screen driven by [`AppRuntime`](crate::AppRuntime).
///
/// Apps live on the [`AppStack`](crate::AppStack) as `Box<dyn App>`; only the
/// top one is drawn and receives keys.
pub trait App {
    /// Name shown in headers and logs.
    fn title(&self) -> &str {
        "App"
    }

    /// Minimum milliseconds between draws. Values below 1 act as 1.
    fn tick_ms(&self) -> u32 {
        DEFAULT_TICK_MS
    }

    /// Render the whole screen. The runtime calls `update()` afterwards.
    fn draw(&mut self, ctx: &mut Context<'_>) -> DrawOutcome;

    /// React to one key.
    fn handle_input(&mut self, ctx: &mut Context<'_>, key: Key) -> Navigation;
}

/// Optional launcher artwork for an app.
pub trait Icon {
    /// Draw inside the `w`×`h` box at (x, y).
    fn draw_icon(&self, display: &mut dyn DisplaySurface, x: i32, y: i32, w: u32, h: u32);
}
