//! Backend selection at startup.
//!
//! [`PlatformFactory`] is created once at process entry. It picks simulated
//! or real backends from the [`Mode`], builds each one on first request and
//! hands out the same instance afterwards, so hardware is acquired at most
//! once. [`PlatformFactory::build`] moves everything into a [`Hal`].
//!
//! ```no_run
//! use firmware::{HardwareHandles, PlatformFactory};
//! use platform::{ConfigurationError, Mode, PlatformConfig};
//!
//! fn bring_up(handles: HardwareHandles) -> Result<platform::Hal, ConfigurationError> {
//!     let mut factory = PlatformFactory::new(Mode::Real, PlatformConfig::default(), handles);
//!     let (w, h) = factory.init_display()?.bounds();
//!     assert_eq!((w, h), (128, 64));
//!     factory.build()
//! }
//! ```

use alloc::boxed::Box;

use embedded_hal::i2c::I2c;
use embedded_hal::pwm::SetDutyCycle;
use embedded_storage::Storage;

use platform::{
    BacklightController, ClockSource, ConfigurationError, DisplaySurface, Hal, InputSource, Mode,
    Panel, PanelDisplay, PlatformConfig, StorageBackend,
};

use crate::backlight::PwmBacklight;
use crate::clock::EmbassyClock;
use crate::input::CardKb;
use crate::storage::FlashStorage;

/// Peripherals handed over by the board bring-up code for real mode.
///
/// Every handle is optional; a missing one only matters if real mode asks
/// for that backend.
#[derive(Default)]
pub struct HardwareHandles {
    display: Option<Box<dyn DisplaySurface>>,
    keypad: Option<Box<dyn InputSource>>,
    flash: Option<Box<dyn StorageBackend>>,
    backlight: Option<Box<dyn BacklightController>>,
}

impl HardwareHandles {
    /// No handles yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// LCD panel (normally an [`St7567`](crate::display::St7567)).
    #[must_use]
    pub fn with_panel<P: Panel + 'static>(mut self, panel: P) -> Self {
        self.display = Some(Box::new(PanelDisplay::new(panel)));
        self
    }

    /// I²C bus the CardKB sits on.
    #[must_use]
    pub fn with_keypad_bus<I: I2c + 'static>(mut self, i2c: I) -> Self {
        self.keypad = Some(Box::new(CardKb::new(i2c)));
        self
    }

    /// Flash region reserved for blob storage.
    #[must_use]
    pub fn with_flash<F: Storage + 'static>(mut self, flash: F) -> Self {
        self.flash = Some(Box::new(FlashStorage::new(flash)));
        self
    }

    /// The four backlight PWM channels.
    #[must_use]
    pub fn with_backlight<R, G, B, W>(mut self, red: R, green: G, blue: B, white: W) -> Self
    where
        R: SetDutyCycle + 'static,
        G: SetDutyCycle + 'static,
        B: SetDutyCycle + 'static,
        W: SetDutyCycle + 'static,
    {
        self.backlight = Some(Box::new(PwmBacklight::new(red, green, blue, white)));
        self
    }
}

/// Creates and memoizes the five platform backends.
pub struct PlatformFactory {
    mode: Mode,
    config: PlatformConfig,
    hardware: HardwareHandles,
    #[cfg(feature = "emulator")]
    host: Option<simulator::Host>,
    display: Option<Box<dyn DisplaySurface>>,
    input: Option<Box<dyn InputSource>>,
    clock: Option<Box<dyn ClockSource>>,
    storage: Option<Box<dyn StorageBackend>>,
    backlight: Option<Box<dyn BacklightController>>,
}

impl PlatformFactory {
    /// Factory for an explicit mode.
    pub fn new(mode: Mode, config: PlatformConfig, hardware: HardwareHandles) -> Self {
        tracing::info!(mode = mode.as_str(), "platform factory");
        Self {
            mode,
            config,
            hardware,
            #[cfg(feature = "emulator")]
            host: None,
            display: None,
            input: None,
            clock: None,
            storage: None,
            backlight: None,
        }
    }

    /// Factory whose mode comes from the `SIM` environment variable.
    #[cfg(feature = "std")]
    pub fn from_env(config: PlatformConfig, hardware: HardwareHandles) -> Self {
        Self::new(Mode::detect(), config, hardware)
    }

    /// Use an existing simulator host instead of opening one.
    #[cfg(feature = "emulator")]
    #[must_use]
    pub fn with_host(mut self, host: simulator::Host) -> Self {
        self.host = Some(host);
        self
    }

    /// Selected mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// True when backends are simulated.
    pub fn is_simulator(&self) -> bool {
        self.mode.is_simulated()
    }

    /// Configuration the factory was created with.
    pub fn config(&self) -> &PlatformConfig {
        &self.config
    }

    /// Display, initialized on first call.
    pub fn init_display(&mut self) -> Result<&mut dyn DisplaySurface, ConfigurationError> {
        let display = self.take_display()?;
        Ok(&mut **self.display.insert(display))
    }

    /// Keypad input.
    pub fn init_input(&mut self) -> Result<&mut dyn InputSource, ConfigurationError> {
        let input = self.take_input()?;
        Ok(&mut **self.input.insert(input))
    }

    /// Tick source.
    pub fn init_clock(&mut self) -> Result<&mut dyn ClockSource, ConfigurationError> {
        let clock = self.take_clock()?;
        Ok(&mut **self.clock.insert(clock))
    }

    /// Blob storage.
    pub fn init_storage(&mut self) -> Result<&mut dyn StorageBackend, ConfigurationError> {
        let storage = self.take_storage()?;
        Ok(&mut **self.storage.insert(storage))
    }

    /// RGBW backlight.
    pub fn init_backlight(&mut self) -> Result<&mut dyn BacklightController, ConfigurationError> {
        let backlight = self.take_backlight()?;
        Ok(&mut **self.backlight.insert(backlight))
    }

    /// Create whatever is still missing and hand all five backends over.
    pub fn build(mut self) -> Result<Hal, ConfigurationError> {
        let display = self.take_display()?;
        let input = self.take_input()?;
        let clock = self.take_clock()?;
        let storage = self.take_storage()?;
        let backlight = self.take_backlight()?;
        Ok(Hal::new(display, input, clock, storage, backlight))
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    fn take_display(&mut self) -> Result<Box<dyn DisplaySurface>, ConfigurationError> {
        if let Some(display) = self.display.take() {
            return Ok(display);
        }
        let mut display: Box<dyn DisplaySurface> = match self.mode {
            #[cfg(feature = "emulator")]
            Mode::Simulated => Box::new(self.host()?.display()),
            #[cfg(not(feature = "emulator"))]
            Mode::Simulated => return Err(ConfigurationError::BackendUnavailable("simulator")),
            Mode::Real => self
                .hardware
                .display
                .take()
                .ok_or(ConfigurationError::MissingHandle("display panel"))?,
        };
        display.init().map_err(ConfigurationError::DisplayInit)?;
        let (width, height) = display.bounds();
        tracing::info!(width, height, "display ready");
        Ok(display)
    }

    fn take_input(&mut self) -> Result<Box<dyn InputSource>, ConfigurationError> {
        if let Some(input) = self.input.take() {
            return Ok(input);
        }
        let input: Box<dyn InputSource> = match self.mode {
            #[cfg(feature = "emulator")]
            Mode::Simulated => Box::new(self.host()?.input()),
            #[cfg(not(feature = "emulator"))]
            Mode::Simulated => return Err(ConfigurationError::BackendUnavailable("simulator")),
            Mode::Real => self
                .hardware
                .keypad
                .take()
                .ok_or(ConfigurationError::MissingHandle("keypad bus"))?,
        };
        tracing::info!("input ready");
        Ok(input)
    }

    fn take_clock(&mut self) -> Result<Box<dyn ClockSource>, ConfigurationError> {
        if let Some(clock) = self.clock.take() {
            return Ok(clock);
        }
        let clock: Box<dyn ClockSource> = match self.mode {
            #[cfg(feature = "emulator")]
            Mode::Simulated => Box::new(self.host()?.clock()),
            #[cfg(not(feature = "emulator"))]
            Mode::Simulated => return Err(ConfigurationError::BackendUnavailable("simulator")),
            Mode::Real => Box::new(EmbassyClock::new()),
        };
        tracing::info!("clock ready");
        Ok(clock)
    }

    fn take_storage(&mut self) -> Result<Box<dyn StorageBackend>, ConfigurationError> {
        if let Some(storage) = self.storage.take() {
            return Ok(storage);
        }
        let storage: Box<dyn StorageBackend> = match self.mode {
            #[cfg(feature = "emulator")]
            Mode::Simulated => Box::new(self.host()?.storage()),
            #[cfg(not(feature = "emulator"))]
            Mode::Simulated => return Err(ConfigurationError::BackendUnavailable("simulator")),
            Mode::Real => self
                .hardware
                .flash
                .take()
                .ok_or(ConfigurationError::MissingHandle("flash"))?,
        };
        tracing::info!("storage ready");
        Ok(storage)
    }

    fn take_backlight(&mut self) -> Result<Box<dyn BacklightController>, ConfigurationError> {
        if let Some(backlight) = self.backlight.take() {
            return Ok(backlight);
        }
        let backlight: Box<dyn BacklightController> = match self.mode {
            #[cfg(feature = "emulator")]
            Mode::Simulated => Box::new(self.host()?.backlight()),
            #[cfg(not(feature = "emulator"))]
            Mode::Simulated => return Err(ConfigurationError::BackendUnavailable("simulator")),
            Mode::Real => self
                .hardware
                .backlight
                .take()
                .ok_or(ConfigurationError::MissingHandle("backlight pwm"))?,
        };
        tracing::info!("backlight ready");
        Ok(backlight)
    }

    /// The simulator host, opened on first use.
    #[cfg(feature = "emulator")]
    fn host(&mut self) -> Result<&simulator::Host, ConfigurationError> {
        let host = match self.host.take() {
            Some(host) => host,
            None => simulator::Host::open(simulator::SimConfig::from(&self.config)).map_err(|e| {
                tracing::warn!(error = %e, "simulator host failed");
                ConfigurationError::BackendUnavailable("simulator window")
            })?,
        };
        Ok(self.host.insert(host))
    }
}
