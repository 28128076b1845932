//! Error taxonomy shared by every backend.

use core::fmt;

/// Backend construction failed. Fatal: raised once, at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigurationError {
    /// Real mode was selected but the named hardware handle was never supplied.
    MissingHandle(&'static str),
    /// The selected mode's backend was not compiled into this build.
    BackendUnavailable(&'static str),
    /// The display was constructed but its `init()` failed.
    DisplayInit(DisplayError),
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHandle(what) => write!(f, "no {what} handle supplied for real hardware"),
            Self::BackendUnavailable(what) => {
                write!(f, "{what} backend is not available in this build")
            }
            Self::DisplayInit(e) => write!(f, "display init failed: {e}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigurationError {}

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transfer to the panel failed
    Communication,
    /// The host window presenting the frame has been closed
    Closed,
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Communication => write!(f, "display communication error"),
            Self::Closed => write!(f, "display window closed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DisplayError {}

/// Transient keypad read failure. The runtime treats it as "no key".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputError {
    /// I²C transaction with the keypad failed
    Bus,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus => write!(f, "keypad bus error"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InputError {}

/// Persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// No blob stored under this path
    NotFound,
    /// Blob larger than a storage slot
    TooLarge,
    /// Every slot is occupied
    NoSpace,
    /// Stored blob failed its integrity check
    Corrupt,
    /// Path empty or longer than the backend allows
    InvalidPath,
    /// Underlying medium reported an error
    Backend,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::NotFound => "not found",
            Self::TooLarge => "blob too large",
            Self::NoSpace => "no free slot",
            Self::Corrupt => "stored blob is corrupt",
            Self::InvalidPath => "invalid path",
            Self::Backend => "storage medium error",
        };
        write!(f, "storage: {msg}")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StorageError {}

/// Backlight driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BacklightError {
    /// A PWM channel rejected the duty cycle
    Pwm,
}

impl fmt::Display for BacklightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pwm => write!(f, "backlight PWM error"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BacklightError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_handle_names_component() {
        let msg = ConfigurationError::MissingHandle("keypad").to_string();
        assert!(msg.contains("keypad"), "message was {msg}");
    }

    #[test]
    fn display_init_wraps_cause() {
        let msg = ConfigurationError::DisplayInit(DisplayError::Communication).to_string();
        assert!(msg.contains("communication"));
    }
}
