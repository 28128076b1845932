//! ST7567 Hardware Driver
//!
//! Blocking driver for the ST7567 128×64 monochrome LCD controller fitted to
//! the organizer board, exposed as a [`Panel`] so it plugs straight into
//! [`platform::PanelDisplay`].
//!
//! # Wiring (RP2040 example)
//!
//! | Signal | Pin            | Direction     |
//! |--------|----------------|---------------|
//! | SCK    | GP18 (SPI0)    | Host → Panel  |
//! | MOSI   | GP19 (SPI0)    | Host → Panel  |
//! | CS     | Managed by `SpiDevice` | Host → Panel |
//! | DC     | GP20 (GPIO)    | Host → Panel  |
//! | RST    | GP21 (GPIO)    | Host → Panel  |
//!
//! # Memory layout
//!
//! Display RAM is organised in 8 pages of 128 columns; each byte holds a
//! vertical strip of 8 pixels with bit 0 at the top. The driver keeps a
//! matching 1 KiB shadow buffer and pushes it page by page on `flush`.
//!
//! Pens at or above [`Pen::THRESHOLD`] are lit; everything else is dark.

// WIDTH=128 and PAGES=8 both fit in u8; pixel coordinates are bounds-checked
// before being cast to usize.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::arithmetic_side_effects
)]

use core::convert::Infallible;

use embedded_graphics::pixelcolor::Gray4;
use embedded_graphics::prelude::*;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use platform::{DisplayError, Panel, Pen};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Panel width in pixels.
pub const WIDTH: u32 = 128;

/// Panel height in pixels.
pub const HEIGHT: u32 = 64;

/// Number of 8-pixel RAM pages.
pub const PAGES: usize = HEIGHT as usize / 8;

/// Shadow buffer size: one bit per pixel.
pub const BUFFER_SIZE: usize = WIDTH as usize * PAGES;

/// Electronic volume used unless overridden with [`St7567::with_contrast`].
pub const DEFAULT_CONTRAST: u8 = 30;

// ---------------------------------------------------------------------------
// Command enum
// ---------------------------------------------------------------------------

/// ST7567 command codes.
#[repr(u8)]
#[derive(Debug, Clone, Copy)]
#[allow(dead_code)]
pub enum Command {
    /// Display off.
    DisplayOff = 0xAE,
    /// Display on.
    DisplayOn = 0xAF,
    /// Start line 0 (OR with line number).
    StartLine = 0x40,
    /// Page address 0 (OR with page number).
    PageAddress = 0xB0,
    /// Column address, upper nibble.
    ColumnHigh = 0x10,
    /// Column address, lower nibble.
    ColumnLow = 0x00,
    /// SEG direction normal.
    SegNormal = 0xA0,
    /// SEG direction reversed.
    SegReverse = 0xA1,
    /// Normal (non-inverted) pixels.
    InverseOff = 0xA6,
    /// Inverted pixels.
    InverseOn = 0xA7,
    /// LCD bias 1/9.
    Bias9 = 0xA2,
    /// LCD bias 1/7.
    Bias7 = 0xA3,
    /// Software reset.
    Reset = 0xE2,
    /// COM direction normal.
    ComNormal = 0xC0,
    /// COM direction reversed.
    ComReverse = 0xC8,
    /// Booster, regulator and follower all on.
    PowerControl = 0x2F,
    /// Regulation ratio (OR with 0..=7).
    RegulationRatio = 0x20,
    /// Electronic volume; the next byte is the contrast value.
    SetContrast = 0x81,
    /// No operation.
    Nop = 0xE3,
}

/// Regulation ratio 4 (0x24) suits the 3.3 V module.
const REGULATION_RATIO: u8 = 4;

// ---------------------------------------------------------------------------
// Driver struct
// ---------------------------------------------------------------------------

/// ST7567 display driver.
///
/// Generic over:
/// - `SPI` - an [`embedded_hal::spi::SpiDevice`] (manages CS).
/// - `DC`  - Data/Command [`embedded_hal::digital::OutputPin`].
/// - `RST` - Reset [`embedded_hal::digital::OutputPin`].
/// - `DELAY` - [`embedded_hal::delay::DelayNs`] for reset timing.
///
/// On the device supply `embassy_time::Delay`; host tests use
/// `embedded_hal_mock::eh1::delay::NoopDelay`.
pub struct St7567<SPI, DC, RST, DELAY> {
    spi: SPI,
    dc: DC,
    rst: RST,
    delay: DELAY,
    contrast: u8,
    /// Page-ordered shadow of the controller RAM.
    buffer: [u8; BUFFER_SIZE],
}

impl<SPI, DC, RST, DELAY> St7567<SPI, DC, RST, DELAY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Create a driver with a blank buffer. Nothing is sent until `init`.
    pub fn new(spi: SPI, dc: DC, rst: RST, delay: DELAY) -> Self {
        Self {
            spi,
            dc,
            rst,
            delay,
            contrast: DEFAULT_CONTRAST,
            buffer: [0; BUFFER_SIZE],
        }
    }

    /// Override the electronic volume (0..=63) sent by `init`.
    #[must_use]
    pub fn with_contrast(mut self, contrast: u8) -> Self {
        self.contrast = contrast & 0x3F;
        self
    }

    /// True if the buffered pixel at (x, y) is lit.
    pub fn pixel_lit(&self, x: u32, y: u32) -> bool {
        Self::locate(x, y)
            .and_then(|(byte, bit)| self.buffer.get(byte).map(|b| b & bit != 0))
            .unwrap_or(false)
    }

    /// Raw page buffer, for diagnostics.
    pub fn buffer(&self) -> &[u8; BUFFER_SIZE] {
        &self.buffer
    }

    /// Byte offset and bit mask of pixel (x, y) in the page buffer.
    #[inline]
    fn locate(x: u32, y: u32) -> Option<(usize, u8)> {
        if x >= WIDTH || y >= HEIGHT {
            return None;
        }
        let page = (y / 8) as usize;
        Some((page * WIDTH as usize + x as usize, 1 << (y % 8)))
    }

    // -----------------------------------------------------------------------
    // Low-level SPI helpers
    // -----------------------------------------------------------------------

    /// Assert DC low (command mode) and send command bytes over SPI.
    fn send_commands(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.dc.set_low().map_err(|_| DisplayError::Communication)?;
        self.spi
            .write(bytes)
            .map_err(|_| DisplayError::Communication)
    }

    /// Assert DC high (data mode) and send bytes over SPI.
    fn send_data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        if data.is_empty() {
            return Ok(());
        }
        self.dc.set_high().map_err(|_| DisplayError::Communication)?;
        self.spi
            .write(data)
            .map_err(|_| DisplayError::Communication)
    }

    /// Hardware reset: RST LOW 1 ms → HIGH, then 5 ms settle.
    fn hardware_reset(&mut self) -> Result<(), DisplayError> {
        self.rst.set_low().map_err(|_| DisplayError::Communication)?;
        self.delay.delay_ms(1);
        self.rst.set_high().map_err(|_| DisplayError::Communication)?;
        self.delay.delay_ms(5);
        Ok(())
    }

    /// Command bytes sent by `init`, in order.
    fn init_sequence(&self) -> [u8; 11] {
        [
            Command::Reset as u8,
            Command::Bias7 as u8,
            Command::SegNormal as u8,
            Command::ComReverse as u8,
            Command::InverseOff as u8,
            Command::StartLine as u8,
            Command::PowerControl as u8,
            Command::RegulationRatio as u8 | REGULATION_RATIO,
            Command::SetContrast as u8,
            self.contrast,
            Command::DisplayOn as u8,
        ]
    }
}

impl<SPI, DC, RST, DELAY> OriginDimensions for St7567<SPI, DC, RST, DELAY> {
    fn size(&self) -> Size {
        Size::new(WIDTH, HEIGHT)
    }
}

impl<SPI, DC, RST, DELAY> DrawTarget for St7567<SPI, DC, RST, DELAY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    type Color = Gray4;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (u32::try_from(point.x), u32::try_from(point.y)) else {
                continue;
            };
            let Some((index, bit)) = Self::locate(x, y) else {
                continue;
            };
            if let Some(byte) = self.buffer.get_mut(index) {
                if Pen::from(color).is_lit() {
                    *byte |= bit;
                } else {
                    *byte &= !bit;
                }
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let fill = if Pen::from(color).is_lit() { 0xFF } else { 0x00 };
        self.buffer.fill(fill);
        Ok(())
    }
}

impl<SPI, DC, RST, DELAY> Panel for St7567<SPI, DC, RST, DELAY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    fn init(&mut self) -> Result<(), DisplayError> {
        self.hardware_reset()?;
        let sequence = self.init_sequence();
        self.send_commands(&sequence)?;
        tracing::info!(contrast = self.contrast, "st7567 ready");
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        for page in 0..PAGES {
            self.send_commands(&[
                Command::PageAddress as u8 | page as u8,
                Command::ColumnHigh as u8,
                Command::ColumnLow as u8,
            ])?;
            let start = page * WIDTH as usize;
            let row = self
                .buffer
                .get(start..start + WIDTH as usize)
                .ok_or(DisplayError::Communication)?;
            let mut chunk = [0u8; WIDTH as usize];
            chunk.copy_from_slice(row);
            self.send_data(&chunk)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
