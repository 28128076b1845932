//! Simulator errors

use std::fmt;

/// Host-side failure while building or driving the simulator.
#[derive(Debug)]
pub enum SimError {
    /// The winit event loop or window could not be created
    Window(String),
    /// softbuffer could not create, resize or present the surface
    Surface(String),
    /// Screenshot encoding or file I/O failed
    Screenshot(image::ImageError),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Window(msg) => write!(f, "window error: {msg}"),
            Self::Surface(msg) => write!(f, "surface error: {msg}"),
            Self::Screenshot(e) => write!(f, "screenshot failed: {e}"),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Screenshot(e) => Some(e),
            Self::Window(_) | Self::Surface(_) => None,
        }
    }
}

impl From<image::ImageError> for SimError {
    fn from(e: image::ImageError) -> Self {
        Self::Screenshot(e)
    }
}
