//! Core data structures for the PROFFAST viewer
//!
//! Value types flowing through the derivation pipeline: the parsed table,
//! file metadata, axis catalog, plot series, statistics and range advice.
//! Everything here is immutable once built; derived values are recomputed
//! wholesale rather than patched.

use crate::constants::{INDEX_COLUMN, MISSING_VALUE_MARKERS, NOT_AVAILABLE};
use crate::{Error, Result};
use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

// =============================================================================
// Raw Table
// =============================================================================

/// A single parsed cell: null, numeric or opaque text
///
/// Numeric cells keep their trimmed source text so that columns read as
/// text (codes such as `007`) show what the file holds.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Number { value: f64, raw: String },
    Text(String),
}

impl CellValue {
    /// Classify a raw CSV field
    ///
    /// Missing-value markers become [`CellValue::Null`], anything that parses as
    /// `f64` becomes a number and the rest is kept verbatim as text.
    pub fn from_field(field: &str) -> Self {
        let trimmed = field.trim();
        if MISSING_VALUE_MARKERS.contains(&trimmed) {
            return Self::Null;
        }

        match trimmed.parse::<f64>() {
            Ok(value) => Self::Number {
                value,
                raw: trimmed.to_string(),
            },
            Err(_) => Self::Text(trimmed.to_string()),
        }
    }

    /// Check whether this cell holds missing data
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Parsed value of a numeric cell
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// Trimmed text as it appeared in the file; empty for null cells
    pub fn as_text(&self) -> &str {
        match self {
            Self::Null => "",
            Self::Number { raw, .. } => raw,
            Self::Text(s) => s,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_text())
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Number { value, .. } => serializer.serialize_f64(*value),
            Self::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// Parsed, validated table: unique trimmed column names plus equally wide rows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    /// Build a table, enforcing unique column names and uniform row width
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(Error::malformed_table(format!(
                    "duplicate column name '{}' in header",
                    column
                )));
            }
        }

        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(Error::malformed_table(format!(
                    "data row {} has {} fields, expected {}",
                    row_index + 1,
                    row.len(),
                    columns.len()
                )));
            }
        }

        Ok(Self { columns, rows })
    }

    /// Column names in header order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Data rows, each aligned with [`RawTable::columns`]
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// True when the table has no data rows (a header-only table is valid)
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column in the header
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cell at a row position for a named column
    pub fn cell(&self, row: usize, column: &str) -> Option<&CellValue> {
        let index = self.column_index(column)?;
        self.rows.get(row).and_then(|cells| cells.get(index))
    }
}

// =============================================================================
// File Metadata
// =============================================================================

/// A metadata field value or the "N/A" sentinel
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetadataValue {
    Value(f64),
    NotAvailable,
}

impl MetadataValue {
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            Self::NotAvailable => None,
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{}", v),
            Self::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

impl Serialize for MetadataValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Value(v) => serializer.serialize_f64(*v),
            Self::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

/// Site metadata read from the first data row
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FileMetadata {
    /// Ground temperature (K)
    pub temperature: MetadataValue,
    pub latitude: MetadataValue,
    pub longitude: MetadataValue,
}

impl FileMetadata {
    /// Metadata with every field unavailable
    pub fn not_available() -> Self {
        Self {
            temperature: MetadataValue::NotAvailable,
            latitude: MetadataValue::NotAvailable,
            longitude: MetadataValue::NotAvailable,
        }
    }
}

// =============================================================================
// Axis Catalog
// =============================================================================

/// A table column or the synthetic row-position column
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnId {
    Index,
    Column(String),
}

impl ColumnId {
    /// Interpret a user-supplied identifier; `"index"` selects row position
    pub fn parse(identifier: &str) -> Self {
        let trimmed = identifier.trim();
        if trimmed == INDEX_COLUMN {
            Self::Index
        } else {
            Self::Column(trimmed.to_string())
        }
    }

    pub fn column(name: impl Into<String>) -> Self {
        Self::Column(name.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Index => INDEX_COLUMN,
            Self::Column(name) => name,
        }
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ColumnId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Selectable axis columns and their heuristic defaults
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisCatalog {
    /// `index` followed by every table column in header order
    pub x_options: Vec<ColumnId>,
    /// Every table column in header order
    pub y_options: Vec<ColumnId>,
    pub default_x: ColumnId,
    /// `None` only when the header has fewer than two columns and no preferred name
    pub default_y: Option<ColumnId>,
}

impl AxisCatalog {
    pub fn offers_x(&self, column: &ColumnId) -> bool {
        self.x_options.contains(column)
    }

    pub fn offers_y(&self, column: &ColumnId) -> bool {
        self.y_options.contains(column)
    }
}

// =============================================================================
// Plot Series
// =============================================================================

/// How the x column was interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum XAxisKind {
    Index,
    Numeric,
    DateTime,
    TimeOfDay,
    Text,
}

/// An x coordinate in the natural order of its resolved type
///
/// Values of one series share a variant, except [`XValue::Missing`] which
/// orders after everything else.
#[derive(Debug, Clone)]
pub enum XValue {
    Index(usize),
    Number(f64),
    DateTime(NaiveDateTime),
    TimeOfDay(NaiveTime),
    Text(String),
    Missing,
}

impl XValue {
    fn rank(&self) -> u8 {
        match self {
            Self::Index(_) => 0,
            Self::Number(_) => 1,
            Self::DateTime(_) => 2,
            Self::TimeOfDay(_) => 3,
            Self::Text(_) => 4,
            Self::Missing => 5,
        }
    }

    /// Numeric position, for index and numeric axes
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Index(i) => Some(*i as f64),
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl Ord for XValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Index(a), Self::Index(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::DateTime(a), Self::DateTime(b)) => a.cmp(b),
            (Self::TimeOfDay(a), Self::TimeOfDay(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for XValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for XValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for XValue {}

impl fmt::Display for XValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{}", i),
            Self::Number(n) => write!(f, "{}", n),
            Self::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S%.f")),
            Self::TimeOfDay(t) => write!(f, "{}", t.format("%H:%M:%S%.f")),
            Self::Text(s) => f.write_str(s),
            Self::Missing => f.write_str(NOT_AVAILABLE),
        }
    }
}

impl Serialize for XValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Index(i) => serializer.serialize_u64(*i as u64),
            Self::Number(n) => serializer.serialize_f64(*n),
            Self::DateTime(dt) => {
                serializer.serialize_str(&dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
            }
            Self::TimeOfDay(t) => serializer.serialize_str(&t.format("%H:%M:%S%.f").to_string()),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Missing => serializer.serialize_none(),
        }
    }
}

/// One plotted observation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotPoint {
    pub x: XValue,
    pub y: f64,
}

/// Sorted, missing-filtered (x, y) series ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotSeries {
    /// Points in ascending x order, ties in original row order
    pub points: Vec<PlotPoint>,
    pub x_label: String,
    pub y_label: String,
    pub x_kind: XAxisKind,
    /// Rows excluded because their y cell was not a finite number
    pub dropped_rows: usize,
}

impl PlotSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Y values in plotting order
    pub fn y_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|point| point.y)
    }
}

// =============================================================================
// Statistics and Ranges
// =============================================================================

/// Descriptive statistics over the y values of a series
///
/// Undefined statistics are `None` so a display layer can show a dash
/// instead of a misleading zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStats {
    pub count: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation (divisor `count - 1`)
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl SummaryStats {
    /// Statistics of an empty series
    pub fn no_data() -> Self {
        Self {
            count: 0,
            mean: None,
            std: None,
            min: None,
            max: None,
        }
    }

    pub fn has_data(&self) -> bool {
        self.count > 0
    }
}

/// Auto-fit axis bounds suggested for a series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisRangeHint {
    pub x_min: Option<XValue>,
    pub x_max: Option<XValue>,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
    pub y_min_padded: Option<f64>,
    pub y_max_padded: Option<f64>,
}

impl AxisRangeHint {
    /// Hint for an empty series
    pub fn empty() -> Self {
        Self {
            x_min: None,
            x_max: None,
            y_min: None,
            y_max: None,
            y_min_padded: None,
            y_max_padded: None,
        }
    }
}

/// Explicit user-entered axis bounds; `None` means automatic
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisBounds {
    pub x_min: Option<f64>,
    pub x_max: Option<f64>,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
}

/// Where an applied bound came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundSource {
    User,
    Suggested,
}

/// An applied axis bound and its origin
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bound<T> {
    pub value: T,
    pub source: BoundSource,
}

/// Axis bounds handed to the chart: user values where set, hints elsewhere
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppliedRanges {
    pub x_min: Option<Bound<XValue>>,
    pub x_max: Option<Bound<XValue>>,
    pub y_min: Option<Bound<f64>>,
    pub y_max: Option<Bound<f64>>,
}
