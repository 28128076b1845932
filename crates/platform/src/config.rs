//! Application configuration and constants
//!
//! Central configuration values used across the workspace. Branding and
//! geometry should reference these rather than hardcoding values.

use alloc::string::String;

/// The application name
pub const APP_NAME: &str = "Pocket Organizer";

/// Application version (synchronized with Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Development mode banner
pub const fn dev_banner() -> &'static str {
    "Pocket Organizer - Simulator"
}

/// Simulated display geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Logical width in pixels
    pub width: u32,
    /// Logical height in pixels
    pub height: u32,
    /// Integer upscale factor for the host window
    pub scale: u32,
}

impl DisplayConfig {
    /// Simulator default: 240×240 at 3× zoom.
    pub const SIMULATOR: DisplayConfig = DisplayConfig {
        width: 240,
        height: 240,
        scale: 3,
    };

    /// Size of the host window in physical pixels.
    pub fn window_size(&self) -> (u32, u32) {
        let scale = self.scale.max(1);
        (
            self.width.saturating_mul(scale),
            self.height.saturating_mul(scale),
        )
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::SIMULATOR
    }
}

/// Settings the platform factory needs to build backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Simulated display geometry
    pub display: DisplayConfig,
    /// Root directory for simulated storage
    pub storage_root: String,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            storage_root: String::from("."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulator_window_is_scaled() {
        assert_eq!(DisplayConfig::SIMULATOR.window_size(), (720, 720));
    }

    #[test]
    fn zero_scale_treated_as_one() {
        let cfg = DisplayConfig {
            width: 10,
            height: 5,
            scale: 0,
        };
        assert_eq!(cfg.window_size(), (10, 5));
    }
}
