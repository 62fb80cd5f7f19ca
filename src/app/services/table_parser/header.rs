//! Header normalization for uploaded tables
//!
//! Column names are trimmed of surrounding whitespace and must stay unique
//! afterwards; `"XCO2"` and `" XCO2 "` name the same column.

use crate::{Error, Result};
use csv::StringRecord;
use std::collections::HashMap;

/// Trim header names and reject duplicates
pub fn normalize_header(record: &StringRecord) -> Result<Vec<String>> {
    if record.is_empty() {
        return Err(Error::malformed_table("file has no header row"));
    }

    let mut first_seen: HashMap<String, usize> = HashMap::with_capacity(record.len());
    let mut columns = Vec::with_capacity(record.len());

    for (position, raw_name) in record.iter().enumerate() {
        let name = raw_name.trim().to_string();

        if let Some(previous) = first_seen.get(&name) {
            return Err(Error::malformed_table(format!(
                "duplicate column name '{}' at header positions {} and {}",
                name,
                previous + 1,
                position + 1
            )));
        }

        first_seen.insert(name.clone(), position);
        columns.push(name);
    }

    Ok(columns)
}
