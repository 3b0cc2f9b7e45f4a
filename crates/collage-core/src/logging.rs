#![forbid(unsafe_code)]

//! Logging glue.
//!
//! With the `tracing` feature the usual macros are re-exported here so leaf
//! crates can `use collage_core::logging::debug` without naming `tracing`
//! directly. With `tracing-json` a JSON subscriber can be installed for
//! production hosts; its filter is read from [`LOG_ENV`].

use std::fmt;

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Environment variable holding the `EnvFilter` directive (e.g. `collage=debug`).
pub const LOG_ENV: &str = "COLLAGE_LOG";

/// Directive used when [`LOG_ENV`] is unset or invalid.
pub const DEFAULT_DIRECTIVE: &str = "info";

/// Resolve the filter directive from an environment lookup.
///
/// Blank values fall back to [`DEFAULT_DIRECTIVE`].
#[must_use]
pub fn directive_from<F>(get_env: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    get_env(LOG_ENV)
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_DIRECTIVE.to_owned())
}

/// Failure to install the global subscriber (usually: one is already set).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingInitError {
    message: String,
}

impl fmt::Display for LoggingInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to install tracing subscriber: {}", self.message)
    }
}

impl std::error::Error for LoggingInitError {}

/// Install a JSON-formatting global subscriber filtered by [`LOG_ENV`].
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> Result<(), LoggingInitError> {
    use tracing_subscriber::EnvFilter;

    let directive = directive_from(|key| std::env::var(key).ok());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    tracing_subscriber::fmt()
        .json()
        .with_current_span(true)
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| LoggingInitError {
            message: err.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_defaults_when_unset() {
        assert_eq!(directive_from(|_| None), DEFAULT_DIRECTIVE);
    }

    #[test]
    fn directive_ignores_blank() {
        assert_eq!(directive_from(|_| Some("   ".into())), DEFAULT_DIRECTIVE);
    }

    #[test]
    fn directive_reads_collage_log() {
        let directive = directive_from(|key| {
            assert_eq!(key, LOG_ENV);
            Some(" collage_runtime=trace ".into())
        });
        assert_eq!(directive, "collage_runtime=trace");
    }

    #[test]
    fn init_error_display() {
        let err = LoggingInitError {
            message: "already set".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to install tracing subscriber: already set"
        );
    }
}
