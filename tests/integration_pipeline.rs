//! Integration tests for the upload-to-chart pipeline
//!
//! These tests drive the public services end to end on small retrieval files
//! shaped like real PROFFAST outputs: parse, metadata, axis defaults, series,
//! statistics and range advice.

use approx::assert_relative_eq;
use proffast_viewer::app::models::{ColumnId, MetadataValue, XAxisKind};
use proffast_viewer::app::services::axis_resolver::resolve_axes;
use proffast_viewer::app::services::metadata_extractor::extract_metadata;
use proffast_viewer::app::services::range_advisor::{advise_ranges, apply_bounds};
use proffast_viewer::app::services::series_builder::build_series;
use proffast_viewer::app::services::stats_engine::compute_stats;
use proffast_viewer::app::services::table_parser::parse_table;
use proffast_viewer::app::session::PlotState;
use proffast_viewer::{DashboardSession, ErrorKind};

/// A day of retrievals with an out-of-order row and a failed retrieval
const DAILY_RETRIEVALS: &str = "\
JulianDate,UTCtime,LocalTime,XCO2,XCH4,XH2O,gndT,latdeg,londeg,altim
2459946.25,06:00:00,07:00:00,418.21,1.921,2345.1,274.6,48.15,11.57,0.53
2459946.33,08:00:00,09:00:00,418.45,1.923,2410.8,275.2,48.15,11.57,0.53
2459946.29,07:00:00,08:00:00,418.30,1.922,2398.2,274.9,48.15,11.57,0.53
2459946.38,09:00:00,10:00:00,NaN,NaN,NaN,275.8,48.15,11.57,0.53
2459946.42,10:00:00,11:00:00,418.62,1.925,2455.0,276.4,48.15,11.57,0.53
";

/// Scenario: generic table without preferred column names
///
/// Purpose: Validate fallback defaults when no conventional columns exist
/// Benefit: Arbitrary CSV files still open with a sensible initial chart
#[test]
fn test_generic_table_defaults() {
    let table = parse_table(b"a,b,c\n1,2,3\n4,5,6\n").unwrap();
    let catalog = resolve_axes(&table);

    assert_eq!(catalog.default_x, ColumnId::Index);
    assert_eq!(catalog.default_y, Some(ColumnId::column("b")));
}

/// Scenario: single retrieval row with site metadata
///
/// Purpose: Validate metadata extraction and preferred axis detection together
/// Benefit: The metadata panel and initial chart agree for the common layout
#[test]
fn test_single_row_metadata_and_axes() {
    let table = parse_table(b"LocalTime,XCO2,gndT,latdeg,londeg\n12:00,410.5,288.2,52.1,13.4\n")
        .unwrap();

    let metadata = extract_metadata(&table);
    assert_eq!(metadata.temperature, MetadataValue::Value(288.2));
    assert_eq!(metadata.latitude, MetadataValue::Value(52.1));
    assert_eq!(metadata.longitude, MetadataValue::Value(13.4));

    let catalog = resolve_axes(&table);
    assert_eq!(catalog.default_x, ColumnId::column("LocalTime"));
    assert_eq!(catalog.default_y, Some(ColumnId::column("XCO2")));
}

/// Scenario: partially numeric target column
///
/// Purpose: Validate silent row exclusion and sample statistics
/// Benefit: Bad cells never become zeros that skew the chart or the mean
#[test]
fn test_partially_numeric_column_statistics() {
    let table = parse_table(b"XCO2\n1\nbad\n3\n").unwrap();
    let series = build_series(&table, &ColumnId::Index, &ColumnId::column("XCO2")).unwrap();

    assert_eq!(series.len(), 2);
    assert_eq!(series.dropped_rows, 1);

    let stats = compute_stats(&series);
    assert_eq!(stats.count, 2);
    assert_relative_eq!(stats.mean.unwrap(), 2.0);
    assert_relative_eq!(stats.std.unwrap(), 1.414_213_562_373_095, epsilon = 1e-12);
    assert_eq!(stats.min, Some(1.0));
    assert_eq!(stats.max, Some(3.0));
}

/// Scenario: header-only upload
///
/// Purpose: Validate that an empty upload has no Y default and no plot
/// Benefit: The shell never calls the series builder with a null column
#[test]
fn test_header_only_upload() {
    let table = parse_table(b"LocalTime\n").unwrap();
    let catalog = resolve_axes(&table);

    assert_eq!(catalog.default_x, ColumnId::Index);
    assert_eq!(catalog.default_y, None);

    let mut session = DashboardSession::default();
    session.load(b"LocalTime\n", "empty.csv").unwrap();
    assert_eq!(session.document().unwrap().plot(), &PlotState::NoSeries);
}

/// Scenario: row narrower than the header
///
/// Purpose: Validate that malformed uploads produce a tagged error, not a table
/// Benefit: Corrupt files surface in the error panel instead of a misaligned chart
#[test]
fn test_mismatched_row_width() {
    let err = parse_table(b"a,b,c\n1,2\n").unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MalformedTable);
    assert!(err.is_parse_error());
}

/// Full day of retrievals through every service
///
/// Purpose: Validate ordering, filtering and range advice on realistic data
/// Benefit: Confirms the default chart is chronological and excludes failed retrievals
#[test]
fn test_daily_retrievals_pipeline() {
    let table = parse_table(DAILY_RETRIEVALS.as_bytes()).unwrap();
    assert_eq!(table.row_count(), 5);

    let metadata = extract_metadata(&table);
    assert_eq!(metadata.temperature, MetadataValue::Value(274.6));

    let catalog = resolve_axes(&table);
    let y = catalog.default_y.clone().unwrap();
    let series = build_series(&table, &catalog.default_x, &y).unwrap();

    assert_eq!(series.x_kind, XAxisKind::TimeOfDay);
    assert_eq!(series.y_values().collect::<Vec<_>>(), vec![418.21, 418.30, 418.45, 418.62]);
    assert_eq!(series.dropped_rows, 1);

    let hint = advise_ranges(&series);
    assert_eq!(hint.y_min, Some(418.21));
    assert_eq!(hint.y_max, Some(418.62));
    assert_relative_eq!(hint.y_min_padded.unwrap(), 418.21 - 0.41 * 0.05, epsilon = 1e-9);
    assert_relative_eq!(hint.y_max_padded.unwrap(), 418.62 + 0.41 * 0.05, epsilon = 1e-9);

    let applied = apply_bounds(&hint, &Default::default());
    assert_eq!(applied.x_min.unwrap().value.to_string(), "07:00:00");
    assert_eq!(applied.x_max.unwrap().value.to_string(), "11:00:00");
}

/// Numeric x columns sort numerically rather than as text
///
/// Purpose: Validate JulianDate ordering even when rows are out of order
/// Benefit: Line charts never zig-zag back across the x axis
#[test]
fn test_julian_date_axis() {
    let table = parse_table(DAILY_RETRIEVALS.as_bytes()).unwrap();
    let series = build_series(
        &table,
        &ColumnId::column("JulianDate"),
        &ColumnId::column("XCH4"),
    )
    .unwrap();

    assert_eq!(series.x_kind, XAxisKind::Numeric);
    assert_eq!(series.y_values().collect::<Vec<_>>(), vec![1.921, 1.922, 1.923, 1.925]);
}

/// Session replaces derived state wholesale across uploads
///
/// Purpose: Validate that a failed upload after a good one leaves an empty state
/// Benefit: Stale series never appear next to an error message
#[test]
fn test_session_upload_sequence() {
    let mut session = DashboardSession::default();

    session.load(DAILY_RETRIEVALS.as_bytes(), "ts.csv").unwrap();
    let view = session.view().unwrap();
    assert_eq!(view.record_count, 5);
    assert_eq!(view.filename, "ts.csv");

    let err = session.load(&[0xff, 0xfe, 0x00], "binary.dat").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EncodingError);
    assert!(session.view().is_none());
    assert_eq!(session.last_error().unwrap().kind, ErrorKind::EncodingError);

    session.load(b"a,b\n1,2\n", "small.csv").unwrap();
    assert!(session.last_error().is_none());
    assert_eq!(session.view().unwrap().record_count, 1);
}
