//! Command-line argument definitions for the PROFFAST viewer
//!
//! This module defines the terminal interface using the clap derive API.

use crate::app::models::{AxisBounds, ColumnId};
use crate::{Error, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

/// CLI arguments for the PROFFAST retrieval viewer
///
/// Loads a PROFFAST retrieval output file and reports site metadata, the
/// plotted series, summary statistics and axis ranges.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "proffast-viewer",
    version,
    about = "Inspect PROFFAST ground-based spectroscopy retrieval outputs",
    long_about = "Loads comma-separated PROFFAST retrieval outputs, extracts site metadata \
                  (ground temperature, latitude, longitude), proposes default plot axes and \
                  reports the selected series with summary statistics and auto-fit axis ranges."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Load a file and report metadata, series, statistics and ranges
    Inspect(InspectArgs),
    /// List the selectable axis columns and their defaults
    Columns(ColumnsArgs),
}

/// Options shared by every subcommand
#[derive(Debug, Clone, ClapArgs)]
pub struct SharedArgs {
    /// Retrieval output file (comma-separated, UTF-8)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Path to configuration file
    ///
    /// TOML configuration file for axis preferences, metadata columns and
    /// range padding. If not specified, looks for
    /// ~/.config/proffast-viewer/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Output format for results
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the inspect command
#[derive(Debug, Clone, ClapArgs)]
pub struct InspectArgs {
    #[command(flatten)]
    pub shared: SharedArgs,

    /// X-axis column; `index` selects the row position
    #[arg(short = 'x', long = "x-column", value_name = "COLUMN")]
    pub x_column: Option<String>,

    /// Y-axis column
    #[arg(short = 'y', long = "y-column", value_name = "COLUMN")]
    pub y_column: Option<String>,

    /// Lower x-axis bound
    #[arg(long = "x-min", value_name = "VALUE", allow_negative_numbers = true)]
    pub x_min: Option<f64>,

    /// Upper x-axis bound
    #[arg(long = "x-max", value_name = "VALUE", allow_negative_numbers = true)]
    pub x_max: Option<f64>,

    /// Lower y-axis bound
    #[arg(long = "y-min", value_name = "VALUE", allow_negative_numbers = true)]
    pub y_min: Option<f64>,

    /// Upper y-axis bound
    #[arg(long = "y-max", value_name = "VALUE", allow_negative_numbers = true)]
    pub y_max: Option<f64>,

    /// Number of series points in the human report (overrides config)
    #[arg(long = "preview", value_name = "COUNT")]
    pub preview_points: Option<usize>,
}

/// Arguments for the columns command
#[derive(Debug, Clone, ClapArgs)]
pub struct ColumnsArgs {
    #[command(flatten)]
    pub shared: SharedArgs,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
    /// CSV format for data analysis
    Csv,
}

impl Commands {
    pub fn shared(&self) -> &SharedArgs {
        match self {
            Self::Inspect(args) => &args.shared,
            Self::Columns(args) => &args.shared,
        }
    }
}

impl SharedArgs {
    /// Validate paths before any work starts
    pub fn validate(&self) -> Result<()> {
        require_file(&self.file, "Input file")?;
        if let Some(config_file) = &self.config_file {
            require_file(config_file, "Config file")?;
        }
        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Document filename: the input path exactly as given
    pub fn display_name(&self) -> String {
        self.file.display().to_string()
    }
}

impl InspectArgs {
    /// Validate the inspect command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        self.shared.validate()?;

        for (name, value) in [
            ("--x-min", self.x_min),
            ("--x-max", self.x_max),
            ("--y-min", self.y_min),
            ("--y-max", self.y_max),
        ] {
            if let Some(value) = value {
                if !value.is_finite() {
                    return Err(Error::configuration(format!(
                        "{} must be a finite number, got {}",
                        name, value
                    )));
                }
            }
        }

        check_order("x", self.x_min, self.x_max)?;
        check_order("y", self.y_min, self.y_max)?;
        Ok(())
    }

    /// Requested x column; `None` keeps the default
    pub fn x_selection(&self) -> Option<ColumnId> {
        self.x_column.as_deref().map(ColumnId::parse)
    }

    /// Requested y column; `None` keeps the default
    pub fn y_selection(&self) -> Option<ColumnId> {
        self.y_column
            .as_deref()
            .map(|name| ColumnId::column(name.trim()))
    }

    pub fn bounds(&self) -> AxisBounds {
        AxisBounds {
            x_min: self.x_min,
            x_max: self.x_max,
            y_min: self.y_min,
            y_max: self.y_max,
        }
    }
}

fn require_file(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        return Err(Error::configuration(format!(
            "{} does not exist: {}",
            what,
            path.display()
        )));
    }
    if !path.is_file() {
        return Err(Error::configuration(format!(
            "{} is not a file: {}",
            what,
            path.display()
        )));
    }
    Ok(())
}

fn check_order(axis: &str, min: Option<f64>, max: Option<f64>) -> Result<()> {
    if let (Some(min), Some(max)) = (min, max) {
        if min >= max {
            return Err(Error::configuration(format!(
                "{}-axis minimum {} must be less than maximum {}",
                axis, min, max
            )));
        }
    }
    Ok(())
}
