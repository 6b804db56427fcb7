use adminkit::config::GridConfig;
use adminkit::model::Record;
use adminkit::table::{Column, ColumnModel, SortDirection, TableState, process};

fn portfolio_columns() -> ColumnModel {
    ColumnModel::new(vec![
        Column::new("name", "Name").sortable(),
        Column::new("cityName", "City").sortable(),
        Column::new("balance", "Balance").sortable(),
    ])
    .unwrap()
}

fn portfolios(count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| {
            Record::new(i.to_string())
                .set("name", format!("Portfolio {i:03}"))
                .set("cityName", if i % 2 == 0 { "Abilene" } else { "Waco" })
                .set("balance", (i % 5) as i64)
        })
        .collect()
}

fn names(rows: &[&Record]) -> Vec<String> {
    rows.iter()
        .map(|r| r.get_str("name").unwrap_or_default().to_string())
        .collect()
}

#[test]
fn test_sort_by_name_ascending() {
    let rows = vec![
        Record::new("1").set("name", "Zed"),
        Record::new("2").set("name", "Amy"),
    ];
    let columns = ColumnModel::new(vec![Column::new("name", "Name").sortable()]).unwrap();
    let mut state = TableState::default();
    state.set_sort(&columns, "name", SortDirection::Ascending).unwrap();

    let view = process(&rows, &columns, &state);
    assert_eq!(names(&view.rows), vec!["Amy", "Zed"]);
}

#[test]
fn test_global_filter_matches_any_column() {
    let rows = vec![Record::new("1").set("name", "North").set("cityName", "Abilene")];
    let columns = portfolio_columns();
    let mut state = TableState::default();

    state.set_global_filter("abil");
    assert_eq!(process(&rows, &columns, &state).total, 1);

    state.set_global_filter("zzz");
    let view = process(&rows, &columns, &state);
    assert_eq!(view.total, 0);
    assert!(view.rows.is_empty());
}

#[test]
fn test_process_is_deterministic() {
    let rows = portfolios(37);
    let columns = portfolio_columns();
    let mut state = TableState::default();
    state.set_sort(&columns, "balance", SortDirection::Descending).unwrap();
    state.set_column_filter(&columns, "cityName", "abi").unwrap();
    state.set_page_index(1);

    let first = process(&rows, &columns, &state);
    let second = process(&rows, &columns, &state);
    assert_eq!(first.rows, second.rows);
    assert_eq!(first.total, second.total);
    assert_eq!(first.page_index, second.page_index);
}

#[test]
fn test_sort_is_stable_in_both_directions() {
    let rows = portfolios(20);
    let columns = portfolio_columns();
    let mut state = TableState::new(&GridConfig::default().with_default_page_size(100));

    for direction in [SortDirection::Ascending, SortDirection::Descending] {
        state.set_sort(&columns, "balance", direction).unwrap();
        let view = process(&rows, &columns, &state);
        for pair in view.rows.windows(2) {
            if pair[0].get_i64("balance") == pair[1].get_i64("balance") {
                let a: usize = pair[0].id().parse().unwrap();
                let b: usize = pair[1].id().parse().unwrap();
                assert!(a < b, "equal keys reordered: {a} before {b}");
            }
        }
    }
}

#[test]
fn test_filters_compose_before_pagination() {
    let rows = portfolios(30);
    let columns = portfolio_columns();
    let mut state = TableState::default();
    state.set_column_filter(&columns, "cityName", "waco").unwrap();
    state.set_global_filter("portfolio 02");

    let view = process(&rows, &columns, &state);
    // 021, 023, 025, 027, 029
    assert_eq!(view.total, 5);
    assert!(view.rows.iter().all(|r| r.get_str("cityName") == Some("Waco")));
}

#[test]
fn test_last_page_holds_remainder() {
    let rows = portfolios(25);
    let columns = portfolio_columns();
    let mut state = TableState::default();
    state.set_page_index(2);

    let view = process(&rows, &columns, &state);
    assert_eq!(view.rows.len(), 5);
    assert_eq!(view.page_count(), 3);
    assert!(!view.has_next_page());
    assert!(view.has_previous_page());
}

#[test]
fn test_page_index_clamps_after_filtering() {
    let rows = portfolios(25);
    let columns = portfolio_columns();
    let mut state = TableState::default();
    state.set_page_index(2);
    state.set_global_filter("portfolio 00");

    let view = state.view(&rows, &columns);
    assert_eq!(view.total, 10);
    assert_eq!(view.page_index, 0);
    assert_eq!(view.rows.len(), 10);
    assert_eq!(state.page().index, 0);
}

#[test]
fn test_empty_result_is_page_zero() {
    let rows: Vec<Record> = Vec::new();
    let columns = portfolio_columns();
    let mut state = TableState::default();
    state.set_page_index(4);

    let view = process(&rows, &columns, &state);
    assert_eq!(view.total, 0);
    assert_eq!(view.page_index, 0);
    assert!(view.rows.is_empty());
}

#[test]
fn test_numeric_text_sorts_numerically() {
    let rows = vec![
        Record::new("1").set("balance", "1,200"),
        Record::new("2").set("balance", "95"),
        Record::new("3").set("balance", 300i64),
    ];
    let columns = portfolio_columns();
    let mut state = TableState::default();
    state.set_sort(&columns, "balance", SortDirection::Ascending).unwrap();

    let view = process(&rows, &columns, &state);
    let ids: Vec<&str> = view.rows.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec!["2", "3", "1"]);
}

#[test]
fn test_column_filters_combine_with_and() {
    let rows = vec![
        Record::new("1").set("name", "North").set("cityName", "Abilene"),
        Record::new("2").set("name", "North").set("cityName", "Waco"),
        Record::new("3").set("name", "South").set("cityName", "Abilene"),
    ];
    let columns = portfolio_columns();
    let mut state = TableState::default();

    state.set_column_filter(&columns, "name", "north").unwrap();
    assert_eq!(process(&rows, &columns, &state).total, 2);

    state.clear_filters();
    state.set_column_filter(&columns, "cityName", "abil").unwrap();
    assert_eq!(process(&rows, &columns, &state).total, 2);

    state.set_column_filter(&columns, "name", "north").unwrap();
    let view = process(&rows, &columns, &state);
    let ids: Vec<&str> = view.rows.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec!["1"]);
}
