//! Hardware Abstraction Layer (HAL) for the Pocket Organizer
//!
//! This crate provides trait-based abstractions for every peripheral a screen
//! can touch, so the same screens run on the device and in the desktop
//! simulator.
//!
//! # Architecture Layers
//!
//! ```text
//! Screens (external)
//!         ↓
//! App runtime (ui crate)
//!         ↓
//! Platform HAL (this crate - trait abstractions)
//!         ↓
//! Backends (firmware: device drivers, simulator: winit window)
//! ```
//!
//! # Contracts
//!
//! - [`DisplaySurface`] - 16-pen drawing surface, explicit `update()`
//! - [`InputSource`] - non-blocking keypad
//! - [`ClockSource`] - wrapping millisecond ticks and cooperative sleep
//! - [`StorageBackend`] - opaque blob persistence
//! - [`BacklightController`] - RGBW backlight
//!
//! Backends that only provide a `Gray4` draw target implement [`Panel`] and
//! get the whole surface from [`PanelDisplay`], which rasterizes through
//! [`canvas`]. Sharing the rasterizer keeps simulated and real output
//! pixel-identical.
//!
//! # Features
//!
//! - `std`: `std::error::Error` impls, [`Mode::detect`], and [`mocks`]
//! - `defmt`: `defmt::Format` derives
//!
//! # Example
//!
//! ```
//! use platform::{DisplayError, DisplaySurface, Pen};
//!
//! fn splash(display: &mut dyn DisplaySurface) -> Result<(), DisplayError> {
//!     display.set_pen(Pen::BG);
//!     display.clear();
//!     display.set_pen(Pen::INK);
//!     display.text("Hello", 0, 0, None, 1);
//!     display.update()
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)] // accessors - callers decide
#![allow(clippy::many_single_char_names)] // x, y, w, h, r are the geometry vocabulary

extern crate alloc;
#[cfg(all(feature = "std", not(test)))]
extern crate std;

pub mod backlight;
pub mod canvas;
pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod framebuffer;
pub mod hal;
pub mod input;
pub mod key;
pub mod mocks;
pub mod mode;
pub mod pen;
pub mod storage;

pub use backlight::{BacklightController, Rgbw};
pub use canvas::Font;
pub use clock::{ticks_add, ticks_diff, ClockSource, Ticks, TICKS_PERIOD};
pub use config::{DisplayConfig, PlatformConfig};
pub use display::{DisplaySurface, Panel, PanelDisplay};
pub use error::{BacklightError, ConfigurationError, DisplayError, InputError, StorageError};
pub use framebuffer::Framebuffer;
pub use hal::Hal;
pub use input::InputSource;
pub use key::{Direction, Key};
pub use mode::Mode;
pub use pen::Pen;
pub use storage::StorageBackend;
