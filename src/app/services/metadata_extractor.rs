//! File-level metadata extraction
//!
//! Retrieval outputs repeat the site's ground temperature and coordinates on
//! every row; the first row is authoritative. Each field resolves
//! independently, so a file missing `gndT` still reports its coordinates.

use crate::app::models::{FileMetadata, MetadataValue, RawTable};
use crate::app::services::coercion::coerce_number;
use crate::config::MetadataColumns;
use tracing::debug;

/// Extract metadata using the conventional column names
pub fn extract_metadata(table: &RawTable) -> FileMetadata {
    extract_metadata_with(table, &MetadataColumns::default())
}

/// Extract metadata from row 0 using the given column names
///
/// Never fails: an absent column, an empty table or a non-numeric cell all
/// yield [`MetadataValue::NotAvailable`] for that field.
pub fn extract_metadata_with(table: &RawTable, columns: &MetadataColumns) -> FileMetadata {
    if table.is_empty() {
        debug!("Table has no rows, metadata unavailable");
        return FileMetadata::not_available();
    }

    let metadata = FileMetadata {
        temperature: first_row_value(table, &columns.temperature),
        latitude: first_row_value(table, &columns.latitude),
        longitude: first_row_value(table, &columns.longitude),
    };

    debug!(
        "Extracted metadata: temperature={}, latitude={}, longitude={}",
        metadata.temperature, metadata.latitude, metadata.longitude
    );
    metadata
}

fn first_row_value(table: &RawTable, column: &str) -> MetadataValue {
    table
        .cell(0, column)
        .and_then(|cell| coerce_number(cell).ok())
        .map_or(MetadataValue::NotAvailable, MetadataValue::Value)
}
