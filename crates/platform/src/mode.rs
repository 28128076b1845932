//! Execution mode selection.

/// Environment variable that selects the simulator.
pub const SIM_ENV_VAR: &str = "SIM";

/// Which backend family the platform factory builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Desktop window, keyboard and filesystem
    Simulated,
    /// Device peripherals
    Real,
}

impl Mode {
    /// Decide from the value of the selection signal. Only `"1"` selects the
    /// simulator; anything else, or no signal at all, means real hardware.
    pub fn from_signal(signal: Option<&str>) -> Self {
        match signal {
            Some("1") => Self::Simulated,
            _ => Self::Real,
        }
    }

    /// Read the `SIM` environment variable.
    #[cfg(feature = "std")]
    pub fn detect() -> Self {
        let value = std::env::var(SIM_ENV_VAR).ok();
        Self::from_signal(value.as_deref())
    }

    /// Short lowercase name for logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Simulated => "simulated",
            Self::Real => "real",
        }
    }

    /// True for [`Mode::Simulated`].
    pub fn is_simulated(self) -> bool {
        self == Self::Simulated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_one_selects_simulator() {
        assert_eq!(Mode::from_signal(Some("1")), Mode::Simulated);
        assert_eq!(Mode::from_signal(Some("0")), Mode::Real);
        assert_eq!(Mode::from_signal(Some("true")), Mode::Real);
        assert_eq!(Mode::from_signal(Some("")), Mode::Real);
        assert_eq!(Mode::from_signal(None), Mode::Real);
    }
}
