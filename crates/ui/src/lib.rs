//! Application layer: the app contract, the app stack and the main loop.
//!
//! Screens implement [`App`]. [`AppRuntime`] owns the platform [`Hal`] and an
//! [`AppStack`] whose top app is drawn on its own tick and receives one key
//! per iteration. [`Launcher`] is the stock home screen.
//!
//! ```
//! use ui::{App, Context, DrawOutcome, Navigation};
//! use platform::Key;
//!
//! struct Hello;
//!
//! impl App for Hello {
//!     fn title(&self) -> &str {
//!         "Hello"
//!     }
//!
//!     fn draw(&mut self, ctx: &mut Context<'_>) -> DrawOutcome {
//!         ui::widgets::clear_screen(ctx.display);
//!         ui::widgets::header(ctx.display, self.title());
//!         ctx.display.text("press q", 0, 16, None, 1);
//!         DrawOutcome::Continue
//!     }
//!
//!     fn handle_input(&mut self, _ctx: &mut Context<'_>, key: Key) -> Navigation {
//!         if key.as_char() == Some('q') {
//!             Navigation::Pop
//!         } else {
//!             Navigation::Stay
//!         }
//!     }
//! }
//! ```
//!
//! [`Hal`]: platform::Hal

#![cfg_attr(not(test), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

extern crate alloc;
#[cfg(all(feature = "std", not(test)))]
extern crate std;

pub mod app;
pub mod context;
pub mod error;
pub mod launcher;
pub mod navigation;
pub mod prompt;
pub mod runtime;
pub mod widgets;

pub use app::{App, DrawOutcome, Icon, Navigation, DEFAULT_TICK_MS};
pub use context::Context;
pub use error::RuntimeError;
pub use launcher::{Launcher, LauncherEntry};
pub use navigation::AppStack;
pub use prompt::prompt_input;
pub use runtime::{AppRuntime, RuntimeConfig, RuntimeExit, StepReport};
