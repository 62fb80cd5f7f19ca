//! PROFFAST Viewer Library
//!
//! The ingestion and derivation core behind an interactive dashboard for
//! PROFFAST ground-based spectroscopy retrieval outputs.
//!
//! This library provides tools for:
//! - Parsing uploaded comma-separated retrieval files into a validated table
//! - Extracting file-level metadata (ground temperature, latitude, longitude)
//! - Proposing default plot axes from a conventional but unreliable schema
//! - Building sorted, type-coerced, missing-filtered (x, y) plot series
//! - Summary statistics and auto-fit axis ranges for the selected series
//! - A per-session document context that keeps all derived state consistent

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod session;
    pub mod services {
        pub mod axis_resolver;
        pub mod coercion;
        pub mod metadata_extractor;
        pub mod range_advisor;
        pub mod series_builder;
        pub mod stats_engine;
        pub mod table_parser;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{
    AxisCatalog, AxisRangeHint, CellValue, ColumnId, FileMetadata, PlotSeries, RawTable,
    SummaryStats, XValue,
};
pub use app::session::DashboardSession;
pub use config::Config;

/// Result type alias for the PROFFAST viewer
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for ingestion, derivation and shell configuration
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Uploaded buffer is not valid UTF-8 text
    #[error("Encoding error: file is not valid UTF-8 text ({source})")]
    Encoding {
        #[source]
        source: std::str::Utf8Error,
    },

    /// Inconsistent row width, duplicate header names or unreadable records
    #[error("Malformed table: {message}")]
    MalformedTable { message: String },

    /// Axis selection refers to a column absent from the current table
    #[error("Unknown column: '{column}'")]
    UnknownColumn { column: String },

    /// I/O operation failed (shell only)
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Flat tag for an [`Error`], used by shells that only need the taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum ErrorKind {
    EncodingError,
    MalformedTable,
    UnknownColumn,
    Io,
    Configuration,
}

impl Error {
    /// Create an encoding error from a UTF-8 decode failure
    pub fn encoding(source: std::str::Utf8Error) -> Self {
        Self::Encoding { source }
    }

    /// Create a malformed table error
    pub fn malformed_table(message: impl Into<String>) -> Self {
        Self::MalformedTable {
            message: message.into(),
        }
    }

    /// Create an unknown column error
    pub fn unknown_column(column: impl Into<String>) -> Self {
        Self::UnknownColumn {
            column: column.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Tag of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Encoding { .. } => ErrorKind::EncodingError,
            Self::MalformedTable { .. } => ErrorKind::MalformedTable,
            Self::UnknownColumn { .. } => ErrorKind::UnknownColumn,
            Self::Io { .. } => ErrorKind::Io,
            Self::Configuration { .. } => ErrorKind::Configuration,
        }
    }

    /// True for failures produced while parsing an uploaded buffer
    pub fn is_parse_error(&self) -> bool {
        matches!(self.kind(), ErrorKind::EncodingError | ErrorKind::MalformedTable)
    }

    /// True for failures produced while building a plot series
    pub fn is_build_error(&self) -> bool {
        self.kind() == ErrorKind::UnknownColumn
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(error: std::str::Utf8Error) -> Self {
        Self::Encoding { source: error }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::MalformedTable {
            message: format!("CSV parsing failed: {}", error),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Self::Configuration {
            message: format!("Invalid configuration file: {}", error),
        }
    }
}
