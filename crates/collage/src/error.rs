#![forbid(unsafe_code)]

//! Facade error type.
//!
//! Drag-time decisions never fail; what can fail is building a board
//! (bad measurements, bad configuration), installing a log subscriber, or
//! an explicit registry audit.

use std::fmt;

use collage_core::logging::LoggingInitError;
use collage_layout::GridMetricsError;
use collage_runtime::{ConfigError, RegistryCorruption};

#[derive(Debug)]
pub enum Error {
    /// Configuration could not be loaded or the board could not be built.
    Config(ConfigError),
    /// Container measurements leave no room for the grid.
    Grid(GridMetricsError),
    /// The slot/element bijection was found broken.
    Corruption(RegistryCorruption),
    /// A global tracing subscriber was already installed.
    Logging(LoggingInitError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Grid(err) => write!(f, "{err}"),
            Self::Corruption(err) => write!(f, "registry corruption: {err}"),
            Self::Logging(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Grid(err) => Some(err),
            Self::Corruption(err) => Some(err),
            Self::Logging(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Grid(grid) => Self::Grid(grid),
            other => Self::Config(other),
        }
    }
}

impl From<GridMetricsError> for Error {
    fn from(err: GridMetricsError) -> Self {
        Self::Grid(err)
    }
}

impl From<RegistryCorruption> for Error {
    fn from(err: RegistryCorruption) -> Self {
        Self::Corruption(err)
    }
}

impl From<LoggingInitError> for Error {
    fn from(err: LoggingInitError) -> Self {
        Self::Logging(err)
    }
}

/// Standard result type for collage APIs.
pub type Result<T> = std::result::Result<T, Error>;
