//! Display drivers for the organizer
//!
//! The board carries an ST7567 128×64 monochrome LCD. The driver implements
//! [`platform::Panel`], so the full drawing surface is
//! [`platform::PanelDisplay`] over it ([`St7567Display`]).

pub mod st7567;

pub use st7567::{St7567, BUFFER_SIZE, HEIGHT, PAGES, WIDTH};

/// The drawing surface used on the device.
pub type St7567Display<SPI, DC, RST, DELAY> = platform::PanelDisplay<St7567<SPI, DC, RST, DELAY>>;
