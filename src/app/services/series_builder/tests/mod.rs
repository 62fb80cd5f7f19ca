//! Test utilities for series builder testing

use crate::app::models::{PlotSeries, RawTable, XValue};
use crate::app::services::table_parser::parse_table;


/// Parse an inline CSV fixture
pub fn table(content: &str) -> RawTable {
    parse_table(content.as_bytes()).unwrap()
}

/// X values of a series in order
pub fn xs(series: &PlotSeries) -> Vec<XValue> {
    series.points.iter().map(|p| p.x.clone()).collect()
}

/// Y values of a series in order
pub fn ys(series: &PlotSeries) -> Vec<f64> {
    series.y_values().collect()
}
