//! Series builder implementation

use tracing::debug;

use super::x_axis::resolve_x_values;
use crate::app::models::{ColumnId, PlotPoint, PlotSeries, RawTable};
use crate::app::services::coercion::coerce_number;
use crate::constants::INDEX_LABEL;
use crate::{Error, Result};

/// Build the plot series for an x and y column
///
/// Fails with [`Error::UnknownColumn`] when either column is absent; the row
/// index is only valid for x. Uncoercible y cells are not errors: their rows
/// are dropped and counted in [`PlotSeries::dropped_rows`].
pub fn build_series(table: &RawTable, x: &ColumnId, y: &ColumnId) -> Result<PlotSeries> {
    let y_name = match y {
        ColumnId::Column(name) => name,
        ColumnId::Index => return Err(Error::unknown_column(y.as_str())),
    };
    let y_index = table
        .column_index(y_name)
        .ok_or_else(|| Error::unknown_column(y_name.as_str()))?;

    let resolved_x = resolve_x_values(table, x)?;

    let mut points = Vec::with_capacity(table.row_count());
    let mut dropped_rows = 0;

    for (row, x_value) in table.rows().iter().zip(resolved_x.values) {
        match coerce_number(&row[y_index]).ok() {
            Some(y_value) => points.push(PlotPoint {
                x: x_value,
                y: y_value,
            }),
            None => dropped_rows += 1,
        }
    }

    // Stable: equal x keep upload order
    points.sort_by(|a, b| a.x.cmp(&b.x));

    let x_label = match x {
        ColumnId::Index => INDEX_LABEL.to_string(),
        ColumnId::Column(name) => name.clone(),
    };

    debug!(
        "Built series {} vs {}: {} points, {} rows dropped, x as {:?}",
        y_name,
        x_label,
        points.len(),
        dropped_rows,
        resolved_x.kind
    );

    Ok(PlotSeries {
        points,
        x_label,
        y_label: y_name.clone(),
        x_kind: resolved_x.kind,
        dropped_rows,
    })
}
