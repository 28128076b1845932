//! Simulator configuration

use std::path::PathBuf;

use platform::config::{dev_banner, DisplayConfig};
use platform::{PlatformConfig, Ticks};

/// Configuration for the desktop simulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    /// Logical display geometry and window zoom
    pub display: DisplayConfig,
    /// Window title
    pub title: String,
    /// Directory that holds simulated storage
    pub storage_root: PathBuf,
    /// Tick value the clock reports at startup; set near the wrap to test it
    pub start_tick: Ticks,
}

impl SimConfig {
    /// Defaults with the given storage root.
    pub fn with_storage_root(root: impl Into<PathBuf>) -> Self {
        Self {
            storage_root: root.into(),
            ..Self::default()
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            display: DisplayConfig::SIMULATOR,
            title: String::from(dev_banner()),
            storage_root: PathBuf::from("."),
            start_tick: 0,
        }
    }
}

impl From<&PlatformConfig> for SimConfig {
    fn from(cfg: &PlatformConfig) -> Self {
        Self {
            display: cfg.display,
            storage_root: PathBuf::from(&cfg.storage_root),
            ..Self::default()
        }
    }
}
