//! Auto-fit axis range advice
//!
//! Suggests initial axis bounds from a series: x extrema in the series'
//! natural order and padded y extrema. The suggestion is advisory; explicit
//! user bounds always take precedence when ranges are applied.

use crate::app::models::{
    AppliedRanges, AxisBounds, AxisRangeHint, Bound, BoundSource, PlotSeries, XValue,
};
use crate::config::RangeOptions;
use tracing::debug;

/// Suggest axis ranges with the default padding
pub fn advise_ranges(series: &PlotSeries) -> AxisRangeHint {
    advise_ranges_with(series, &RangeOptions::default())
}

/// Suggest axis ranges for a series
///
/// Y padding is `span * y_padding_fraction`, or `degenerate_y_padding` when
/// every y value is equal. Missing x values never become an extremum.
pub fn advise_ranges_with(series: &PlotSeries, options: &RangeOptions) -> AxisRangeHint {
    if series.is_empty() {
        return AxisRangeHint::empty();
    }

    let present_x = series.points.iter().map(|p| &p.x).filter(|x| !x.is_missing());
    let x_min = present_x.clone().min().cloned();
    let x_max = present_x.max().cloned();

    let (y_min, y_max) = series
        .y_values()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
            (lo.min(y), hi.max(y))
        });

    let span = y_max - y_min;
    let padding = if span != 0.0 {
        span * options.y_padding_fraction
    } else {
        options.degenerate_y_padding
    };

    debug!(
        "Range advice for {}: y [{}, {}] padded by {}",
        series.y_label, y_min, y_max, padding
    );

    AxisRangeHint {
        x_min,
        x_max,
        y_min: Some(y_min),
        y_max: Some(y_max),
        y_min_padded: Some(y_min - padding),
        y_max_padded: Some(y_max + padding),
    }
}

/// Merge user bounds with the suggestion; user values win
pub fn apply_bounds(hint: &AxisRangeHint, user: &AxisBounds) -> AppliedRanges {
    AppliedRanges {
        x_min: pick(user.x_min.map(XValue::Number), hint.x_min.clone()),
        x_max: pick(user.x_max.map(XValue::Number), hint.x_max.clone()),
        y_min: pick(user.y_min, hint.y_min_padded),
        y_max: pick(user.y_max, hint.y_max_padded),
    }
}

fn pick<T>(user: Option<T>, suggested: Option<T>) -> Option<Bound<T>> {
    match (user, suggested) {
        (Some(value), _) => Some(Bound {
            value,
            source: BoundSource::User,
        }),
        (None, Some(value)) => Some(Bound {
            value,
            source: BoundSource::Suggested,
        }),
        (None, None) => None,
    }
}
