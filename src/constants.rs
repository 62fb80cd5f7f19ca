//! Application constants for the PROFFAST viewer
//!
//! Well-known retrieval column names, sentinel values and the numeric
//! defaults used by the derivation pipeline.

// =============================================================================
// Column Identifiers
// =============================================================================

/// Identifier of the synthetic row-position pseudo-column
pub const INDEX_COLUMN: &str = "index";

/// Axis label shown for the row-position pseudo-column
pub const INDEX_LABEL: &str = "Index";

/// X columns tried in order before falling back to the row index
pub const PREFERRED_X_COLUMNS: &[&str] = &["LocalTime", "time"];

/// Y columns tried in order before falling back to a positional column
pub const PREFERRED_Y_COLUMNS: &[&str] = &["XCO2", "XCH4"];

/// Header position used for the default Y column when no preferred name matches
pub const FALLBACK_Y_POSITION: usize = 1;

/// Substrings of a column name that trigger temporal coercion of its values
pub const TEMPORAL_NAME_MARKERS: &[&str] = &["Time", "Date"];

// =============================================================================
// File Metadata
// =============================================================================

/// Ground temperature column (K)
pub const TEMPERATURE_COLUMN: &str = "gndT";

/// Site latitude column (degrees)
pub const LATITUDE_COLUMN: &str = "latdeg";

/// Site longitude column (degrees)
pub const LONGITUDE_COLUMN: &str = "londeg";

/// Sentinel shown for metadata that could not be read
pub const NOT_AVAILABLE: &str = "N/A";

// =============================================================================
// Parsing
// =============================================================================

/// Cell contents treated as missing data (compared after trimming)
pub const MISSING_VALUE_MARKERS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None"];

/// Field delimiter of uploaded retrieval files
pub const FIELD_DELIMITER: u8 = b',';

/// Date-time formats tried in order, without offset
pub const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Date-time formats carrying a numeric UTC offset
pub const DATETIME_OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S %z", "%Y-%m-%d %H:%M:%S%z"];

/// Date-only formats, interpreted as midnight
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Time-of-day formats (e.g. PROFFAST `LocalTime`)
pub const TIME_OF_DAY_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

// =============================================================================
// Range Advice
// =============================================================================

/// Fraction of the y span added above and below the auto-fit y range
pub const Y_PADDING_FRACTION: f64 = 0.05;

/// Fixed y padding used when the series is constant-valued
pub const DEGENERATE_Y_PADDING: f64 = 1.0;

// =============================================================================
// Shell Defaults
// =============================================================================

/// Number of series points shown in the human-readable preview
pub const DEFAULT_PREVIEW_POINTS: usize = 10;

/// Decimal places used when printing statistics
pub const DEFAULT_DISPLAY_PRECISION: usize = 4;

/// Placeholder printed for an undefined statistic
pub const UNDEFINED_STAT_DISPLAY: &str = "-";

/// Configuration directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "proffast-viewer";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment override for the y padding fraction
pub const ENV_Y_PADDING_FRACTION: &str = "PROFFAST_Y_PADDING_FRACTION";

/// Environment override for the preview length
pub const ENV_PREVIEW_POINTS: &str = "PROFFAST_PREVIEW_POINTS";
