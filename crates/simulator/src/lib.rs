//! Desktop simulator backends
//!
//! Implements every platform contract on a desktop host:
//!
//! - [`SimDisplay`] - winit + softbuffer window, integer-scaled, PNG screenshots
//! - [`SimInput`] - host keyboard mapped into the keypad code space
//! - [`SimClock`] - `std::time::Instant` ticks, thread sleep
//! - [`SimStorage`] - files under a root directory
//! - [`SimBacklight`] - logged, not shown
//!
//! [`Host`] builds them all around one window. With the `headless` feature
//! (or [`Host::headless`]) no window is opened and keys are injected with a
//! [`KeyInjector`].
//!
//! # Example
//!
//! ```no_run
//! use platform::{DisplaySurface, Pen};
//! use simulator::{Host, SimConfig};
//!
//! let host = Host::headless(SimConfig::default());
//! let mut display = host.display();
//! display.set_pen(Pen::INK);
//! display.text("hello", 10, 10, None, 2);
//! display.update().unwrap();
//! display.save_screenshot("hello.png").unwrap();
//! ```

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod backlight;
pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod host;
pub mod input;
pub mod storage;

#[cfg(not(feature = "headless"))]
pub mod window;

pub use backlight::SimBacklight;
pub use clock::SimClock;
pub use config::SimConfig;
pub use display::{SimDisplay, SimPanel};
pub use error::SimError;
pub use host::Host;
pub use input::{map_key, KeyInjector, KeyQueue, SimInput};
pub use storage::SimStorage;

