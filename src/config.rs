//! Configuration management and validation.
//!
//! Provides the tunable parts of the derivation pipeline (preferred axis
//! columns, metadata column names, range padding) and shell display
//! settings. Defaults reproduce the conventional PROFFAST schema; a TOML
//! file and environment variables can override them.

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_DISPLAY_PRECISION, DEFAULT_PREVIEW_POINTS,
    DEGENERATE_Y_PADDING, ENV_PREVIEW_POINTS, ENV_Y_PADDING_FRACTION, FALLBACK_Y_POSITION,
    LATITUDE_COLUMN, LONGITUDE_COLUMN, PREFERRED_X_COLUMNS, PREFERRED_Y_COLUMNS,
    TEMPERATURE_COLUMN, Y_PADDING_FRACTION,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Column preferences used to pick default plot axes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisPreferences {
    /// X columns tried in order before the row index
    pub preferred_x: Vec<String>,

    /// Y columns tried in order before the positional fallback
    pub preferred_y: Vec<String>,

    /// Header position of the fallback Y column
    pub fallback_y_position: usize,
}

impl Default for AxisPreferences {
    fn default() -> Self {
        Self {
            preferred_x: PREFERRED_X_COLUMNS.iter().map(|s| s.to_string()).collect(),
            preferred_y: PREFERRED_Y_COLUMNS.iter().map(|s| s.to_string()).collect(),
            fallback_y_position: FALLBACK_Y_POSITION,
        }
    }
}

/// Column names holding file-level metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataColumns {
    pub temperature: String,
    pub latitude: String,
    pub longitude: String,
}

impl Default for MetadataColumns {
    fn default() -> Self {
        Self {
            temperature: TEMPERATURE_COLUMN.to_string(),
            latitude: LATITUDE_COLUMN.to_string(),
            longitude: LONGITUDE_COLUMN.to_string(),
        }
    }
}

/// Auto-fit range settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeOptions {
    /// Fraction of the y span added on each side
    pub y_padding_fraction: f64,

    /// Padding used when every y value is equal
    pub degenerate_y_padding: f64,
}

impl Default for RangeOptions {
    fn default() -> Self {
        Self {
            y_padding_fraction: Y_PADDING_FRACTION,
            degenerate_y_padding: DEGENERATE_Y_PADDING,
        }
    }
}

/// Terminal rendering settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    /// Number of series points shown in the human report
    pub preview_points: usize,

    /// Decimal places for statistics
    pub precision: usize,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            preview_points: DEFAULT_PREVIEW_POINTS,
            precision: DEFAULT_DISPLAY_PRECISION,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub axes: AxisPreferences,
    pub metadata: MetadataColumns,
    pub ranges: RangeOptions,
    pub display: DisplayOptions,
}

impl Config {
    /// Default location: `<config dir>/proffast-viewer/config.toml`
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::configuration("Could not determine user config directory"))?;
        Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Read a TOML configuration file; missing sections keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read config file {}", path.display()),
                e,
            )
        })?;
        let config: Config = toml::from_str(&content)?;
        debug!("Loaded config file {}", path.display());
        Ok(config)
    }

    /// Load configuration using layered approach (defaults -> file -> env)
    ///
    /// An explicit `path` must exist; the default location is only used when
    /// a file is present there.
    pub fn load_layered(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                info!("Using config file: {}", path.display());
                Self::from_file(path)?
            }
            None => match Self::default_config_path() {
                Ok(default_path) if default_path.exists() => {
                    info!("Using config file: {}", default_path.display());
                    Self::from_file(&default_path)?
                }
                _ => {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_overrides_from(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment-style overrides from a key lookup
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_Y_PADDING_FRACTION) {
            self.ranges.y_padding_fraction = raw.trim().parse().map_err(|_| {
                Error::configuration(format!(
                    "{} must be a number, got '{}'",
                    ENV_Y_PADDING_FRACTION, raw
                ))
            })?;
        }

        if let Some(raw) = lookup(ENV_PREVIEW_POINTS) {
            self.display.preview_points = raw.trim().parse().map_err(|_| {
                Error::configuration(format!(
                    "{} must be a non-negative integer, got '{}'",
                    ENV_PREVIEW_POINTS, raw
                ))
            })?;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let fraction = self.ranges.y_padding_fraction;
        if !fraction.is_finite() || fraction < 0.0 {
            return Err(Error::configuration(format!(
                "y_padding_fraction must be a finite non-negative number, got {}",
                fraction
            )));
        }

        let degenerate = self.ranges.degenerate_y_padding;
        if !degenerate.is_finite() || degenerate <= 0.0 {
            return Err(Error::configuration(format!(
                "degenerate_y_padding must be a finite positive number, got {}",
                degenerate
            )));
        }

        let preferred = self.axes.preferred_x.iter().chain(&self.axes.preferred_y);
        for name in preferred {
            if name.trim().is_empty() {
                return Err(Error::configuration(
                    "preferred axis column names cannot be empty",
                ));
            }
        }

        for name in [
            &self.metadata.temperature,
            &self.metadata.latitude,
            &self.metadata.longitude,
        ] {
            if name.trim().is_empty() {
                return Err(Error::configuration("metadata column names cannot be empty"));
            }
        }

        Ok(())
    }
}
