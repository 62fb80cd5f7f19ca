//! Core table parser implementation
//!
//! Decodes the uploaded buffer, reads comma-separated records with
//! surrounding whitespace ignored, and validates that every row is as wide
//! as the header.

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, warn};

use super::header::normalize_header;
use crate::app::models::{CellValue, RawTable};
use crate::constants::FIELD_DELIMITER;
use crate::{Error, Result};

/// Parser for uploaded retrieval tables
///
/// Performs no I/O: the buffer is supplied by the caller.
#[derive(Debug, Clone)]
pub struct TableParser {
    delimiter: u8,
}

impl Default for TableParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TableParser {
    pub fn new() -> Self {
        Self {
            delimiter: FIELD_DELIMITER,
        }
    }

    /// Parse a UTF-8 buffer into a table
    ///
    /// Fails with [`Error::Encoding`] when the buffer is not UTF-8 and with
    /// [`Error::MalformedTable`] for ragged rows, duplicate header names or a
    /// missing header. A header with no data rows is a valid, empty table.
    pub fn parse(&self, buffer: &[u8]) -> Result<RawTable> {
        let text = std::str::from_utf8(buffer).map_err(|e| {
            warn!("Rejected upload: {}", e);
            Error::encoding(e)
        })?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let header = reader
            .headers()
            .map_err(|e| Error::malformed_table(format!("failed to read header: {}", e)))?
            .clone();
        let columns = normalize_header(&header)?;
        debug!("Parsed header with {} columns", columns.len());

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| {
                Error::malformed_table(format!("failed to read record: {}", e))
            })?;

            if is_blank(&record) {
                continue;
            }

            if record.len() != columns.len() {
                let line = record
                    .position()
                    .map(|p| p.line().to_string())
                    .unwrap_or_else(|| "?".to_string());
                warn!(
                    "Row width mismatch at line {}: {} fields, header has {}",
                    line,
                    record.len(),
                    columns.len()
                );
                return Err(Error::malformed_table(format!(
                    "line {} has {} fields, expected {}",
                    line,
                    record.len(),
                    columns.len()
                )));
            }

            rows.push(record.iter().map(CellValue::from_field).collect());
        }

        debug!("Parsed {} data rows", rows.len());
        RawTable::new(columns, rows)
    }
}

/// Parse a buffer with the default parser
pub fn parse_table(buffer: &[u8]) -> Result<RawTable> {
    TableParser::new().parse(buffer)
}

/// Whitespace-only lines survive trimming as a single empty field
fn is_blank(record: &StringRecord) -> bool {
    record.len() == 1 && record.get(0).is_some_and(str::is_empty)
}
