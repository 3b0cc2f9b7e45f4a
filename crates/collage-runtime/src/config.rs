#![forbid(unsafe_code)]

//! Board configuration.
//!
//! Values come from, in order of precedence: explicit builder calls,
//! environment variables ([`BoardConfig::from_env`]), or a TOML/JSON file
//! (`config-files` feature). Every source ends in [`BoardConfig::validated`],
//! which clamps out-of-range values instead of failing.
//!
//! ```toml
//! spacing = 6
//! touch_slop = 8
//! anchor_delay_ms = 150
//! device_width = 1080
//! ```
//!
//! | Variable | Field |
//! |---|---|
//! | `COLLAGE_SPACING` | `spacing` |
//! | `COLLAGE_TOUCH_SLOP` | `touch_slop` |
//! | `COLLAGE_ANCHOR_DELAY_MS` | `anchor_delay_ms` |
//! | `COLLAGE_DEVICE_WIDTH` | `device_width` |

#[cfg(feature = "config-files")]
use std::path::{Path, PathBuf};

#[cfg(feature = "config-files")]
use serde::{Deserialize, Serialize};
use thiserror::Error;
use web_time::Duration;

use collage_layout::GridMetricsError;

/// Gutter between cells, in pixels.
pub const DEFAULT_SPACING: i32 = 4;
/// Manhattan distance a pointer must exceed before a capture becomes a drag.
pub const DEFAULT_TOUCH_SLOP: u32 = 5;
/// Hold time before the recenter-anchor signal fires.
pub const DEFAULT_ANCHOR_DELAY_MS: u64 = 200;

const MAX_SPACING: i32 = 64;
const MAX_TOUCH_SLOP: u32 = 256;
const MAX_ANCHOR_DELAY_MS: u64 = 5_000;

/// Errors raised while building a board or loading its configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid grid metrics: {0}")]
    Grid(#[from] GridMetricsError),
    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
    #[cfg(feature = "config-files")]
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[cfg(feature = "config-files")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[cfg(feature = "config-files")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tunables for a [`CollageBoard`](crate::board::CollageBoard).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config-files", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-files", serde(default))]
pub struct BoardConfig {
    pub spacing: i32,
    pub touch_slop: u32,
    pub anchor_delay_ms: u64,
    /// Width the bottom row is measured against. `None` means the container
    /// width.
    pub device_width: Option<i32>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            spacing: DEFAULT_SPACING,
            touch_slop: DEFAULT_TOUCH_SLOP,
            anchor_delay_ms: DEFAULT_ANCHOR_DELAY_MS,
            device_width: None,
        }
    }
}

impl BoardConfig {
    #[must_use]
    pub fn with_spacing(mut self, spacing: i32) -> Self {
        self.spacing = spacing;
        self
    }

    #[must_use]
    pub fn with_touch_slop(mut self, touch_slop: u32) -> Self {
        self.touch_slop = touch_slop;
        self
    }

    #[must_use]
    pub fn with_anchor_delay(mut self, delay: Duration) -> Self {
        self.anchor_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    #[must_use]
    pub fn with_device_width(mut self, device_width: i32) -> Self {
        self.device_width = Some(device_width);
        self
    }

    #[must_use]
    pub fn anchor_delay(&self) -> Duration {
        Duration::from_millis(self.anchor_delay_ms)
    }

    /// Device width to measure against for a given container width.
    #[must_use]
    pub fn device_width_for(&self, container_width: i32) -> i32 {
        self.device_width.unwrap_or(container_width)
    }

    /// Clamp every field into its supported range.
    #[must_use]
    pub fn validated(mut self) -> Self {
        self.spacing = self.spacing.clamp(0, MAX_SPACING);
        self.touch_slop = self.touch_slop.min(MAX_TOUCH_SLOP);
        self.anchor_delay_ms = self.anchor_delay_ms.min(MAX_ANCHOR_DELAY_MS);
        self.device_width = self.device_width.filter(|w| *w > 0);
        self
    }

    /// Defaults overridden by `COLLAGE_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// [`BoardConfig::from_env`] with an injectable lookup.
    pub fn from_env_with<F>(get_env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(v) = parse_env(&get_env, "COLLAGE_SPACING")? {
            config.spacing = v;
        }
        if let Some(v) = parse_env(&get_env, "COLLAGE_TOUCH_SLOP")? {
            config.touch_slop = v;
        }
        if let Some(v) = parse_env(&get_env, "COLLAGE_ANCHOR_DELAY_MS")? {
            config.anchor_delay_ms = v;
        }
        if let Some(v) = parse_env(&get_env, "COLLAGE_DEVICE_WIDTH")? {
            config.device_width = Some(v);
        }
        Ok(config.validated())
    }

    /// Load from a TOML string.
    #[cfg(feature = "config-files")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        Ok(config.validated())
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-files")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config-files")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        Ok(config.validated())
    }
}

fn parse_env<F, T>(get_env: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let Some(raw) = get_env(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::InvalidEnv { var, value: raw })
}
