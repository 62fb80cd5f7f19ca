//! Test fixtures for table parser testing
//!
//! Shared sample files used across the parser test modules.


/// A short PROFFAST-style retrieval output with padded fields
pub fn create_retrieval_csv() -> String {
    r#" UTCtime,  LocalTime,  spectrum,  JulianDate,  XCO2,  XCH4,  gndT,  latdeg,  londeg
 08:12:01,  10:12:01,  220601_081201SN.BIN,  2459731.84,  415.21,  1.8912,  288.2,  52.1,  13.4
 08:13:05,  10:13:05,  220601_081305SN.BIN,  2459731.84,  415.37,  1.8907,  288.3,  52.1,  13.4
 08:14:10,  10:14:10,  220601_081410SN.BIN,  2459731.84,  NaN,  1.8915,  288.3,  52.1,  13.4
"#
    .to_string()
}

/// Header-only file
pub fn create_header_only_csv() -> String {
    "LocalTime,XCO2,gndT\n".to_string()
}
