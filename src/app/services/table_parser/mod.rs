//! Table parser for uploaded retrieval files
//!
//! Turns the raw bytes of an uploaded comma-separated file into a validated
//! [`RawTable`](crate::app::models::RawTable).
//!
//! ## Architecture
//!
//! - [`parser`] - Decoding, record reading and row validation
//! - [`header`] - Header normalization and duplicate detection
//!
//! ## Usage
//!
//! ```rust
//! use proffast_viewer::app::services::table_parser::TableParser;
//!
//! # fn example() -> proffast_viewer::Result<()> {
//! let table = TableParser::new().parse(b"LocalTime, XCO2\n12:00, 410.5\n")?;
//! assert_eq!(table.columns(), ["LocalTime", "XCO2"]);
//! # Ok(())
//! # }
//! ```

pub mod header;
pub mod parser;

#[cfg(test)]
pub mod tests;

pub use header::normalize_header;
pub use parser::{TableParser, parse_table};
