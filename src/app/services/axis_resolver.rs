//! Default axis selection for retrieval tables
//!
//! Retrieval outputs follow a conventional schema that is not guaranteed,
//! so the resolver degrades from preferred scientific column names to
//! positional fallbacks instead of failing.

use crate::app::models::{AxisCatalog, ColumnId, RawTable};
use crate::config::AxisPreferences;
use tracing::debug;

/// Resolve axes using the conventional PROFFAST preferences
///
/// Default X: `LocalTime`, then `time`, then the row index. Default Y:
/// `XCO2`, then `XCH4`, then the second header column, then none.
/// A table without data rows always defaults to the index and no Y.
pub fn resolve_axes(table: &RawTable) -> AxisCatalog {
    resolve_axes_with(table, &AxisPreferences::default())
}

/// Resolve axis options and defaults with explicit preferences
pub fn resolve_axes_with(table: &RawTable, preferences: &AxisPreferences) -> AxisCatalog {
    let columns = table.columns();

    let y_options: Vec<ColumnId> = columns.iter().cloned().map(ColumnId::Column).collect();
    let mut x_options = Vec::with_capacity(y_options.len() + 1);
    x_options.push(ColumnId::Index);
    x_options.extend(y_options.iter().cloned());

    // Header-only: options stay, defaults do not
    let (default_x, default_y) = if table.is_empty() {
        (ColumnId::Index, None)
    } else {
        let default_x =
            first_present(table, &preferences.preferred_x).unwrap_or(ColumnId::Index);
        let default_y = first_present(table, &preferences.preferred_y).or_else(|| {
            columns
                .get(preferences.fallback_y_position)
                .cloned()
                .map(ColumnId::Column)
        });
        (default_x, default_y)
    };

    debug!(
        "Resolved axes over {} columns: default_x={}, default_y={}",
        columns.len(),
        default_x,
        default_y.as_ref().map_or("none", ColumnId::as_str)
    );

    AxisCatalog {
        x_options,
        y_options,
        default_x,
        default_y,
    }
}

fn first_present(table: &RawTable, preferred: &[String]) -> Option<ColumnId> {
    preferred
        .iter()
        .find(|name| table.has_column(name))
        .map(|name| ColumnId::Column(name.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::table_parser::parse_table;

    fn columns(ids: &[ColumnId]) -> Vec<&str> {
        ids.iter().map(ColumnId::as_str).collect()
    }

    #[test]
    fn test_positional_fallbacks() {
        let table = parse_table(b"a,b,c\n1,2,3\n4,5,6\n").unwrap();
        let catalog = resolve_axes(&table);

        assert_eq!(catalog.default_x, ColumnId::Index);
        assert_eq!(catalog.default_y, Some(ColumnId::column("b")));
        assert_eq!(columns(&catalog.x_options), vec!["index", "a", "b", "c"]);
        assert_eq!(columns(&catalog.y_options), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_preferred_columns() {
        let table =
            parse_table(b"LocalTime,XCO2,gndT,latdeg,londeg\n12:00,410.5,288.2,52.1,13.4\n")
                .unwrap();
        let catalog = resolve_axes(&table);

        assert_eq!(catalog.default_x, ColumnId::column("LocalTime"));
        assert_eq!(catalog.default_y, Some(ColumnId::column("XCO2")));
    }

    #[test]
    fn test_priority_order() {
        let table = parse_table(b"XCH4,time,XCO2,LocalTime\n1,2,3,4\n").unwrap();
        let catalog = resolve_axes(&table);
        assert_eq!(catalog.default_x, ColumnId::column("LocalTime"));
        assert_eq!(catalog.default_y, Some(ColumnId::column("XCO2")));

        let table = parse_table(b"spectrum,time,XCH4\na,1,2\n").unwrap();
        let catalog = resolve_axes(&table);
        assert_eq!(catalog.default_x, ColumnId::column("time"));
        assert_eq!(catalog.default_y, Some(ColumnId::column("XCH4")));
    }

    #[test]
    fn test_column_names_match_exactly() {
        let table = parse_table(b"localtime,Time,xco2\n1,2,3\n").unwrap();
        let catalog = resolve_axes(&table);

        assert_eq!(catalog.default_x, ColumnId::Index);
        assert_eq!(catalog.default_y, Some(ColumnId::column("Time")));
    }

    #[test]
    fn test_header_only_table() {
        let table = parse_table(b"only\n").unwrap();
        let catalog = resolve_axes(&table);

        assert_eq!(catalog.default_x, ColumnId::Index);
        assert_eq!(catalog.default_y, None);
        assert_eq!(catalog.x_options, vec![ColumnId::Index, ColumnId::column("only")]);
    }

    #[test]
    fn test_header_only_table_ignores_preferred_names() {
        let table = parse_table(b"LocalTime,XCO2,XCH4,gndT\n").unwrap();
        let catalog = resolve_axes(&table);

        assert_eq!(catalog.default_x, ColumnId::Index);
        assert_eq!(catalog.default_y, None);
        assert_eq!(
            columns(&catalog.x_options),
            vec!["index", "LocalTime", "XCO2", "XCH4", "gndT"]
        );
        assert_eq!(
            columns(&catalog.y_options),
            vec!["LocalTime", "XCO2", "XCH4", "gndT"]
        );

        let table = parse_table(b"a,b,c\n").unwrap();
        let catalog = resolve_axes(&table);
        assert_eq!(catalog.default_x, ColumnId::Index);
        assert_eq!(catalog.default_y, None);
    }

    #[test]
    fn test_defaults_are_offered() {
        let table = parse_table(b"UTCtime,LocalTime,XCO2\n09:00,10:00,410\n").unwrap();
        let catalog = resolve_axes(&table);

        assert!(catalog.offers_x(&catalog.default_x));
        assert!(catalog.offers_y(catalog.default_y.as_ref().unwrap()));
        assert!(!catalog.offers_y(&ColumnId::Index));
    }

    #[test]
    fn test_deterministic() {
        let table = parse_table(b"a,XCH4,time\n1,2,3\n").unwrap();
        assert_eq!(resolve_axes(&table), resolve_axes(&table));
    }

    #[test]
    fn test_custom_preferences() {
        let table = parse_table(b"JulianDate,XCO,XCO2\n2459731.84,98.2,410\n").unwrap();
        let preferences = AxisPreferences {
            preferred_x: vec!["JulianDate".to_string()],
            preferred_y: vec!["XCO".to_string()],
            fallback_y_position: 1,
        };

        let catalog = resolve_axes_with(&table, &preferences);
        assert_eq!(catalog.default_x, ColumnId::column("JulianDate"));
        assert_eq!(catalog.default_y, Some(ColumnId::column("XCO")));
    }
}
