//! Best-effort cell coercion with explicit outcomes
//!
//! Numeric and temporal conversions never fail the caller. Each attempt
//! returns a [`Coercion`] that either carries the converted value or says
//! why the cell was rejected, so the silent-fallback policy of the series
//! builder stays visible and testable.

use crate::app::models::CellValue;
use crate::constants::{
    DATE_FORMATS, DATETIME_FORMATS, DATETIME_OFFSET_FORMATS, TEMPORAL_NAME_MARKERS,
    TIME_OF_DAY_FORMATS,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Why a cell could not be converted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Null cell
    Missing,
    /// Text that is not a number
    NotNumeric,
    /// Infinite or NaN
    NotFinite,
    /// Value matches no supported date/time format
    NotTemporal,
}

/// Outcome of a coercion attempt
#[derive(Debug, Clone, PartialEq)]
pub enum Coercion<T> {
    Coerced(T),
    Rejected(Rejection),
}

impl<T> Coercion<T> {
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Coerced(value) => Some(value),
            Self::Rejected(_) => None,
        }
    }

    pub fn is_coerced(&self) -> bool {
        matches!(self, Self::Coerced(_))
    }
}

/// A recognized temporal value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Temporal {
    DateTime(NaiveDateTime),
    TimeOfDay(NaiveTime),
}

/// Coerce a cell to a finite `f64`
pub fn coerce_number(cell: &CellValue) -> Coercion<f64> {
    match cell {
        CellValue::Null => Coercion::Rejected(Rejection::Missing),
        CellValue::Number { value, .. } => finite(*value),
        CellValue::Text(s) => match s.trim().parse::<f64>() {
            Ok(n) => finite(n),
            Err(_) => Coercion::Rejected(Rejection::NotNumeric),
        },
    }
}

fn finite(n: f64) -> Coercion<f64> {
    if n.is_finite() {
        Coercion::Coerced(n)
    } else {
        Coercion::Rejected(Rejection::NotFinite)
    }
}

/// Coerce a cell to a date-time or a time of day
///
/// Numeric cells are never treated as epoch offsets.
pub fn coerce_temporal(cell: &CellValue) -> Coercion<Temporal> {
    match cell {
        CellValue::Null => Coercion::Rejected(Rejection::Missing),
        CellValue::Number { .. } => Coercion::Rejected(Rejection::NotTemporal),
        CellValue::Text(s) => match parse_temporal(s.trim()) {
            Some(temporal) => Coercion::Coerced(temporal),
            None => Coercion::Rejected(Rejection::NotTemporal),
        },
    }
}

fn parse_temporal(value: &str) -> Option<Temporal> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(Temporal::DateTime(dt.naive_utc()));
    }

    for format in DATETIME_OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Some(Temporal::DateTime(dt.naive_utc()));
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Temporal::DateTime(dt));
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(Temporal::DateTime(date.and_time(NaiveTime::MIN)));
        }
    }

    TIME_OF_DAY_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(value, format).ok())
        .map(Temporal::TimeOfDay)
}

/// Whether a column's name asks for temporal coercion (case-sensitive substring)
pub fn is_temporal_column_name(name: &str) -> bool {
    TEMPORAL_NAME_MARKERS
        .iter()
        .any(|marker| name.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(&CellValue::from_field("3.5")), Coercion::Coerced(3.5));
        assert_eq!(coerce_number(&text(" 2e3 ")), Coercion::Coerced(2000.0));
        assert_eq!(
            coerce_number(&text("bad")),
            Coercion::Rejected(Rejection::NotNumeric)
        );
        assert_eq!(
            coerce_number(&CellValue::Null),
            Coercion::Rejected(Rejection::Missing)
        );
        assert_eq!(
            coerce_number(&CellValue::from_field("inf")),
            Coercion::Rejected(Rejection::NotFinite)
        );
    }

    #[test]
    fn test_coerce_temporal_datetime_formats() {
        let expected = NaiveDate::from_ymd_opt(2023, 6, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();

        for value in [
            "2023-06-01 09:30:00",
            "2023-06-01T09:30:00",
            "2023-06-01 09:30",
            "2023-06-01T09:30:00Z",
            "2023-06-01 11:30:00 +0200",
        ] {
            assert_eq!(
                coerce_temporal(&text(value)),
                Coercion::Coerced(Temporal::DateTime(expected)),
                "format {}",
                value
            );
        }
    }

    #[test]
    fn test_coerce_temporal_date_and_time_of_day() {
        let midnight = NaiveDate::from_ymd_opt(2023, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(
            coerce_temporal(&text("2023-06-01")),
            Coercion::Coerced(Temporal::DateTime(midnight))
        );

        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        assert_eq!(
            coerce_temporal(&text("12:00")),
            Coercion::Coerced(Temporal::TimeOfDay(noon))
        );
        assert_eq!(
            coerce_temporal(&text("12:00:00")),
            Coercion::Coerced(Temporal::TimeOfDay(noon))
        );
    }

    #[test]
    fn test_coerce_temporal_rejections() {
        assert_eq!(
            coerce_temporal(&text("calibration-7")),
            Coercion::Rejected(Rejection::NotTemporal)
        );
        assert_eq!(
            coerce_temporal(&CellValue::from_field("7.25")),
            Coercion::Rejected(Rejection::NotTemporal)
        );
        assert_eq!(
            coerce_temporal(&CellValue::Null),
            Coercion::Rejected(Rejection::Missing)
        );
    }

    #[test]
    fn test_temporal_column_name_is_case_sensitive() {
        assert!(is_temporal_column_name("LocalTime"));
        assert!(is_temporal_column_name("DateOfCalibration"));
        assert!(!is_temporal_column_name("time"));
        assert!(!is_temporal_column_name("XCO2"));
    }
}
