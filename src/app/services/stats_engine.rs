//! Summary statistics over a plot series
//!
//! Count, mean, sample standard deviation and extrema of the y values.
//! Statistics that are undefined for the series size are `None`, never NaN
//! or zero.

use crate::app::models::{PlotSeries, SummaryStats};
use tracing::debug;

/// Compute summary statistics for the y values of a series
pub fn compute_stats(series: &PlotSeries) -> SummaryStats {
    let stats = summarize(series.y_values());
    debug!(
        "Computed stats for {}: count={}, mean={:?}, std={:?}",
        series.y_label, stats.count, stats.mean, stats.std
    );
    stats
}

/// Compute summary statistics over finite values
///
/// `std` uses Bessel's correction and is undefined below two values.
pub fn summarize<I>(values: I) -> SummaryStats
where
    I: IntoIterator<Item = f64>,
{
    let values: Vec<f64> = values.into_iter().collect();
    let count = values.len();
    if count == 0 {
        return SummaryStats::no_data();
    }

    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &value in &values {
        sum += value;
        min = min.min(value);
        max = max.max(value);
    }
    let mean = sum / count as f64;

    let std = (count >= 2).then(|| {
        let squared: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (squared / (count - 1) as f64).sqrt()
    });

    SummaryStats {
        count,
        mean: Some(mean),
        std,
        min: Some(min),
        max: Some(max),
    }
}
