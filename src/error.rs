//! Error types for the reflow engine.

use std::fmt;

/// Result type alias for reflow operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for reflow operations.
#[derive(Debug)]
pub enum Error {
    /// Viewport with negative width or height. Zero is valid (degenerate).
    InvalidViewport { width: i32, height: i32 },
    /// Invalid color format (e.g. malformed hex string).
    InvalidColor(String),
    /// The injected text measurer failed.
    ///
    /// Propagated out of `render` with the uncommitted line's fill undone,
    /// so retrying on the next frame is safe.
    Measurement(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidViewport { width, height } => {
                write!(f, "invalid viewport dimensions: {width}x{height}")
            }
            Self::InvalidColor(s) => write!(f, "invalid color format: {s}"),
            Self::Measurement(s) => write!(f, "text measurement failed: {s}"),
        }
    }
}

impl std::error::Error for Error {}
