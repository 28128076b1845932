//! Constructs the simulated backends around one shared window and key queue.

#[cfg(not(feature = "headless"))]
use std::{cell::RefCell, rc::Rc};

use crate::backlight::SimBacklight;
use crate::clock::SimClock;
use crate::config::SimConfig;
use crate::display::{SimDisplay, SimPanel};
use crate::error::SimError;
use crate::input::{KeyInjector, KeyQueue, SimInput};
use crate::storage::SimStorage;

/// The desktop host: optional window plus the keyboard queue it feeds.
pub struct Host {
    config: SimConfig,
    queue: KeyQueue,
    #[cfg(not(feature = "headless"))]
    window: Option<Rc<RefCell<crate::window::Window>>>,
}

impl Host {
    /// Host with no window; keys arrive only through [`Host::injector`].
    pub fn headless(config: SimConfig) -> Self {
        Self {
            config,
            queue: KeyQueue::new(),
            #[cfg(not(feature = "headless"))]
            window: None,
        }
    }

    /// Host with an open window.
    #[cfg(not(feature = "headless"))]
    pub fn windowed(config: SimConfig) -> Result<Self, SimError> {
        let queue = KeyQueue::new();
        let window = crate::window::Window::new(&config.display, &config.title, queue.clone())?;
        Ok(Self {
            config,
            queue,
            window: Some(Rc::new(RefCell::new(window))),
        })
    }

    /// Windowed host, or a headless one when built with `headless`.
    pub fn open(config: SimConfig) -> Result<Self, SimError> {
        #[cfg(not(feature = "headless"))]
        {
            Self::windowed(config)
        }
        #[cfg(feature = "headless")]
        {
            Ok(Self::headless(config))
        }
    }

    /// True when no window is attached.
    pub fn is_headless(&self) -> bool {
        #[cfg(not(feature = "headless"))]
        {
            self.window.is_none()
        }
        #[cfg(feature = "headless")]
        {
            true
        }
    }

    /// Configuration this host was built with.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Handle for injecting keystrokes.
    pub fn injector(&self) -> KeyInjector {
        KeyInjector::new(self.queue.clone())
    }

    /// Display surface presenting into the window (if any).
    pub fn display(&self) -> SimDisplay {
        let d = self.config.display;
        #[cfg(not(feature = "headless"))]
        if let Some(window) = &self.window {
            return SimDisplay::new(SimPanel::windowed(d.width, d.height, Rc::clone(window)));
        }
        SimDisplay::new(SimPanel::headless(d.width, d.height))
    }

    /// Keyboard input reading the shared queue.
    pub fn input(&self) -> SimInput {
        #[cfg(not(feature = "headless"))]
        if let Some(window) = &self.window {
            return SimInput::windowed(self.queue.clone(), Rc::clone(window));
        }
        SimInput::detached(self.queue.clone())
    }

    /// Wall clock starting at the configured tick.
    pub fn clock(&self) -> SimClock {
        SimClock::starting_at(self.config.start_tick)
    }

    /// Filesystem storage under the configured root.
    pub fn storage(&self) -> SimStorage {
        SimStorage::new(self.config.storage_root.clone())
    }

    /// Logging backlight.
    pub fn backlight(&self) -> SimBacklight {
        SimBacklight::new()
    }
}
