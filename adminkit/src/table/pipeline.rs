//! Row processing pipeline: column filters, global filter, sort, paginate.
//!
//! The stages always run in that order. The pipeline is a pure function of
//! its inputs; it never caches and never touches the rows it is given.

use crate::model::{Row, Value};

use super::column::ColumnModel;
use super::state::{PageState, SortDirection, TableState};

/// One rendered page of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<'a, T> {
    /// Rows on the current page, in display order.
    pub rows: Vec<&'a T>,
    /// Row count after filtering, before pagination.
    pub total: usize,
    /// Page index actually shown, after clamping.
    pub page_index: usize,
    /// Rows per page.
    pub page_size: usize,
}

impl<T> PageView<'_, T> {
    /// Number of pages the filtered rows span.
    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.page_size)
    }

    /// Check whether a later page exists.
    pub fn has_next_page(&self) -> bool {
        self.page_index + 1 < self.page_count()
    }

    /// Check whether an earlier page exists.
    pub fn has_previous_page(&self) -> bool {
        self.page_index > 0
    }
}

/// Turn rows, columns, and interaction state into the visible page.
///
/// Calling this twice with the same inputs yields the same output.
pub fn process<'a, T: Row>(
    rows: &'a [T],
    columns: &ColumnModel,
    state: &TableState,
) -> PageView<'a, T> {
    let filtered = apply_column_filters(rows, state);
    let filtered = apply_global_filter(filtered, columns, state.global_filter());
    let sorted = match state.sort() {
        Some(spec) => sort_rows(filtered, &spec.key, spec.direction),
        None => filtered,
    };
    let total = sorted.len();
    let page = state.page().clamped(total);
    log::trace!(
        "pipeline: {} rows in, {} after filters, page {} of size {}",
        rows.len(),
        total,
        page.index,
        page.size
    );
    PageView {
        rows: paginate(sorted, page),
        total,
        page_index: page.index,
        page_size: page.size,
    }
}

fn contains_ignore_case(value: &Value, needle_lower: &str) -> bool {
    value.as_text().to_lowercase().contains(needle_lower)
}

/// Keep rows matching every column filter.
fn apply_column_filters<'a, T: Row>(rows: &'a [T], state: &TableState) -> Vec<&'a T> {
    let filters: Vec<(&str, String)> = state
        .column_filters()
        .iter()
        .map(|(key, text)| (key.as_str(), text.to_lowercase()))
        .collect();
    rows.iter()
        .filter(|row| {
            filters
                .iter()
                .all(|(key, needle)| contains_ignore_case(&row.value(key), needle))
        })
        .collect()
}

/// Keep rows where any column contains the search text.
fn apply_global_filter<'a, T: Row>(
    rows: Vec<&'a T>,
    columns: &ColumnModel,
    text: &str,
) -> Vec<&'a T> {
    if text.is_empty() {
        return rows;
    }
    let needle = text.to_lowercase();
    rows.into_iter()
        .filter(|row| {
            columns
                .iter()
                .any(|column| contains_ignore_case(&row.value(&column.key), &needle))
        })
        .collect()
}

/// Stable sort on one column's raw values.
///
/// Rows with equal keys keep their incoming order in both directions.
fn sort_rows<'a, T: Row>(rows: Vec<&'a T>, key: &str, direction: SortDirection) -> Vec<&'a T> {
    let mut keyed: Vec<(Value, &'a T)> = rows.into_iter().map(|row| (row.value(key), row)).collect();
    keyed.sort_by(|(a, _), (b, _)| {
        let ordering = a.compare(b);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    keyed.into_iter().map(|(_, row)| row).collect()
}

fn paginate<T>(rows: Vec<&T>, page: PageState) -> Vec<&T> {
    let start = page.index.saturating_mul(page.size);
    rows.into_iter().skip(start).take(page.size).collect()
}
