//! X column interpretation
//!
//! The row index needs no conversion. A named column is tried as temporal
//! only when its name contains `Time` or `Date`; if any non-null value fails
//! to parse, or values mix dates with bare times, the column silently falls
//! back to numeric ordering (every value a number) or text ordering.

use crate::app::models::{CellValue, ColumnId, RawTable, XAxisKind, XValue};
use crate::app::services::coercion::{Temporal, coerce_temporal, is_temporal_column_name};
use crate::{Error, Result};
use tracing::debug;

/// X values for every row of a table, with the interpretation chosen
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedX {
    pub kind: XAxisKind,
    /// One value per table row, in row order
    pub values: Vec<XValue>,
}

/// Interpret the x column of a table
pub fn resolve_x_values(table: &RawTable, column: &ColumnId) -> Result<ResolvedX> {
    let name = match column {
        ColumnId::Index => {
            return Ok(ResolvedX {
                kind: XAxisKind::Index,
                values: (0..table.row_count()).map(XValue::Index).collect(),
            });
        }
        ColumnId::Column(name) => name,
    };

    let index = table
        .column_index(name)
        .ok_or_else(|| Error::unknown_column(name.as_str()))?;
    let cells: Vec<&CellValue> = table.rows().iter().map(|row| &row[index]).collect();

    if is_temporal_column_name(name) {
        match temporal_values(&cells) {
            Some(resolved) => return Ok(resolved),
            None => debug!(
                "Column '{}' is not uniformly temporal, falling back to plain ordering",
                name
            ),
        }
    }

    Ok(opaque_values(&cells))
}

/// All non-null cells must coerce to the same temporal kind
fn temporal_values(cells: &[&CellValue]) -> Option<ResolvedX> {
    let mut kind = None;
    let mut values = Vec::with_capacity(cells.len());

    for cell in cells {
        if cell.is_null() {
            values.push(XValue::Missing);
            continue;
        }

        let value = match coerce_temporal(cell).ok()? {
            Temporal::DateTime(dt) => XValue::DateTime(dt),
            Temporal::TimeOfDay(t) => XValue::TimeOfDay(t),
        };
        let value_kind = match value {
            XValue::DateTime(_) => XAxisKind::DateTime,
            _ => XAxisKind::TimeOfDay,
        };

        match kind {
            None => kind = Some(value_kind),
            Some(existing) if existing != value_kind => return None,
            Some(_) => {}
        }
        values.push(value);
    }

    kind.map(|kind| ResolvedX { kind, values })
}

fn opaque_values(cells: &[&CellValue]) -> ResolvedX {
    let all_numeric = cells
        .iter()
        .all(|cell| matches!(cell, CellValue::Null | CellValue::Number { .. }));

    let (kind, values) = if all_numeric {
        let values = cells
            .iter()
            .map(|cell| match cell {
                CellValue::Number { value, .. } => XValue::Number(*value),
                _ => XValue::Missing,
            })
            .collect();
        (XAxisKind::Numeric, values)
    } else {
        let values = cells
            .iter()
            .map(|cell| match cell {
                CellValue::Null => XValue::Missing,
                other => XValue::Text(other.as_text().to_string()),
            })
            .collect();
        (XAxisKind::Text, values)
    };

    ResolvedX { kind, values }
}
