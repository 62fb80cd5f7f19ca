use proffast_viewer::app::models::ColumnId;
use proffast_viewer::app::services::axis_resolver::resolve_axes;
use proffast_viewer::app::services::range_advisor::advise_ranges;
use proffast_viewer::app::services::series_builder::build_series;
use proffast_viewer::app::services::stats_engine::compute_stats;
use proffast_viewer::app::services::table_parser::parse_table;
use proffast_viewer::RawTable;
use proptest::prelude::*;

/// Y cell text paired with whether it should survive coercion
fn y_cell_strategy() -> impl Strategy<Value = (String, bool)> {
    prop_oneof![
        4 => (-1_000.0f64..1_000.0).prop_map(|v| (v.to_string(), true)),
        1 => Just(("NA".to_string(), false)),
        1 => Just(("bad".to_string(), false)),
        1 => Just(("inf".to_string(), false)),
        1 => Just((String::new(), false)),
    ]
}

fn x_cell_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (-500i64..500).prop_map(|v| v.to_string()),
        (-50.0f64..50.0).prop_map(|v| v.to_string()),
    ]
}

fn rows_strategy() -> impl Strategy<Value = Vec<(String, (String, bool))>> {
    prop::collection::vec((x_cell_strategy(), y_cell_strategy()), 0..60)
}

fn table_from(rows: &[(String, (String, bool))]) -> RawTable {
    let mut text = String::from("JulianDate,XCO2\n");
    for (x, (y, _)) in rows {
        text.push_str(&format!("{},{}\n", x, y));
    }
    parse_table(text.as_bytes()).expect("generated table parses")
}

proptest! {
    #[test]
    fn series_is_sorted_by_x(rows in rows_strategy()) {
        let table = table_from(&rows);
        let series = build_series(&table, &ColumnId::column("JulianDate"), &ColumnId::column("XCO2"))
            .expect("columns exist");

        for pair in series.points.windows(2) {
            prop_assert!(pair[0].x <= pair[1].x);
        }
    }

    #[test]
    fn build_is_idempotent(rows in rows_strategy()) {
        let table = table_from(&rows);
        let x = ColumnId::column("JulianDate");
        let y = ColumnId::column("XCO2");

        let first = build_series(&table, &x, &y).expect("columns exist");
        let second = build_series(&table, &x, &y).expect("columns exist");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn missing_data_only_shrinks_series(rows in rows_strategy()) {
        let table = table_from(&rows);
        let series = build_series(&table, &ColumnId::Index, &ColumnId::column("XCO2"))
            .expect("columns exist");

        let finite = rows.iter().filter(|(_, (_, ok))| *ok).count();
        prop_assert!(series.len() <= table.row_count());
        prop_assert_eq!(series.len(), finite);
        prop_assert_eq!(series.len() == table.row_count(), finite == rows.len());
        prop_assert_eq!(series.len() + series.dropped_rows, table.row_count());
        prop_assert!(series.y_values().all(f64::is_finite));
    }

    #[test]
    fn constant_series_pads_by_one(value in -1_000.0f64..1_000.0, count in 1usize..30) {
        let rows: Vec<_> = (0..count)
            .map(|i| (i.to_string(), (value.to_string(), true)))
            .collect();
        let table = table_from(&rows);
        let series = build_series(&table, &ColumnId::Index, &ColumnId::column("XCO2"))
            .expect("columns exist");

        let hint = advise_ranges(&series);
        prop_assert_eq!(hint.y_min_padded, Some(value - 1.0));
        prop_assert_eq!(hint.y_max_padded, Some(value + 1.0));

        let stats = compute_stats(&series);
        prop_assert_eq!(stats.min, Some(value));
        prop_assert_eq!(stats.max, Some(value));
    }

    #[test]
    fn axis_resolution_is_deterministic(rows in rows_strategy()) {
        let table = table_from(&rows);
        let before = resolve_axes(&table);
        let _ = build_series(&table, &ColumnId::Index, &ColumnId::column("XCO2"));
        prop_assert_eq!(before, resolve_axes(&table));
    }

    #[test]
    fn stats_bracket_mean(rows in rows_strategy()) {
        let table = table_from(&rows);
        let series = build_series(&table, &ColumnId::Index, &ColumnId::column("XCO2"))
            .expect("columns exist");
        let stats = compute_stats(&series);

        prop_assert_eq!(stats.count, series.len());
        match (stats.min, stats.mean, stats.max) {
            (Some(min), Some(mean), Some(max)) => {
                prop_assert!(min <= mean + 1e-9 && mean <= max + 1e-9);
            }
            _ => prop_assert_eq!(stats.count, 0),
        }
        prop_assert_eq!(stats.std.is_some(), stats.count >= 2);
    }
}
