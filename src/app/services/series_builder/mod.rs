//! Plot series construction
//!
//! Builds the ordered (x, y) series for a chosen pair of columns.
//!
//! ## Architecture
//!
//! - [`x_axis`] - Interpretation of the x column (index, temporal, numeric, text)
//! - [`builder`] - Y coercion, missing-row filtering and stable ordering
//!
//! Rows whose y cell is not a finite number are excluded entirely; nothing is
//! converted to zero. The remaining points are sorted by x so a line render
//! never crosses back on itself.

pub mod builder;
pub mod x_axis;

#[cfg(test)]
pub mod tests;

pub use builder::build_series;
pub use x_axis::{ResolvedX, resolve_x_values};
