//! Pocket Organizer Firmware
//!
//! Device backends for the organizer board (Pico-class MCU, ST7567 128×64
//! LCD, CardKB keypad, RGBW backlight) and the [`PlatformFactory`] that picks
//! between them and the desktop simulator at startup.
//!
//! # Architecture
//!
//! ```text
//! Screens (ui::App implementations)
//!         ↓
//! App runtime (ui crate)
//!         ↓
//! Platform HAL traits (platform crate)
//!         ↓
//! Backends (this crate: device drivers | simulator crate: winit window)
//! ```
//!
//! # Features
//!
//! - `hardware` - embassy-time tick rate for the device build
//! - `emulator` - link the desktop simulator; enables the `simulator` example
//! - `headless` - emulator without a window (CI)
//! - `std` - standard library (for emulator and testing)
//! - `defmt-logging` - `defmt::Format` derives on platform types
//!
//! # Examples
//!
//! ## Simulator
//!
//! ```bash
//! SIM=1 cargo run -p firmware --example simulator --features emulator
//! ```

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
// Upgrade relevant warns to deny; keep pedantic as warn (too noisy for firmware)
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
// Logging discipline (allow println in tests via clippy.toml)
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![warn(clippy::dbg_macro)] // dbg! should not be left in committed code
// Intentional allows for this codebase:
#![allow(clippy::module_name_repetitions)] // common in Rust crates; not a real issue
#![allow(clippy::missing_errors_doc)] // most errors are self-explanatory
// Pedantic lints too noisy for firmware application code:
#![allow(clippy::cast_lossless)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]

extern crate alloc;

pub mod backlight;
pub mod clock;
pub mod display;
pub mod factory;
pub mod input;
pub mod storage;

pub use backlight::PwmBacklight;
pub use clock::EmbassyClock;
pub use display::{St7567, St7567Display};
pub use factory::{HardwareHandles, PlatformFactory};
pub use input::CardKb;
pub use storage::FlashStorage;
