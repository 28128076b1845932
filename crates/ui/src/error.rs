//! Runtime errors.

use core::fmt;

/// Broken runtime invariant, rejected before the loop starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeError {
    /// An app stack needs at least the home app.
    EmptyStack,
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyStack => write!(f, "app stack needs a home app"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RuntimeError {}
