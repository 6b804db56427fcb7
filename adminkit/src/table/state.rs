//! Table interaction state.

use std::collections::BTreeMap;

use crate::config::GridConfig;
use crate::error::TableError;
use crate::model::Row;

use super::column::ColumnModel;
use super::pipeline::{PageView, process};
use super::selection::{Selection, SelectionMode};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Active sort: column key and direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// Pagination cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageState {
    /// Zero-based page index.
    pub index: usize,
    /// Rows per page, always greater than zero.
    pub size: usize,
}

impl PageState {
    /// Index of the last page holding any of `total` rows (0 when empty).
    pub fn last_index(&self, total: usize) -> usize {
        total.div_ceil(self.size).saturating_sub(1)
    }

    /// This cursor with its index pulled back onto the last valid page.
    pub fn clamped(self, total: usize) -> Self {
        Self {
            index: self.index.min(self.last_index(total)),
            size: self.size,
        }
    }
}

/// Everything the user can change about how a table is viewed.
///
/// The state is a plain value: clone it to snapshot, compare it to detect
/// changes. Every mutation goes through a method here; operations that
/// name a column check the key against the [`ColumnModel`] first.
///
/// # Example
///
/// ```
/// use adminkit::model::Record;
/// use adminkit::table::{Column, ColumnModel, SortDirection, TableState};
///
/// let columns = ColumnModel::new(vec![Column::new("name", "Name").sortable()]).unwrap();
/// let rows = vec![
///     Record::new("1").set("name", "Zed"),
///     Record::new("2").set("name", "Amy"),
/// ];
///
/// let mut state = TableState::default();
/// state.set_sort(&columns, "name", SortDirection::Ascending).unwrap();
///
/// let view = state.view(&rows, &columns);
/// assert_eq!(view.rows[0].get_str("name"), Some("Amy"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    sort: Option<SortSpec>,
    column_filters: BTreeMap<String, String>,
    global_filter: String,
    page: PageState,
    column_sizing: BTreeMap<String, u32>,
    selection: Selection,
}

impl Default for TableState {
    fn default() -> Self {
        Self::new(&GridConfig::default())
    }
}

impl TableState {
    /// Fresh state: unsorted, unfiltered, first page, multi-select.
    pub fn new(config: &GridConfig) -> Self {
        Self {
            sort: None,
            column_filters: BTreeMap::new(),
            global_filter: String::new(),
            page: PageState {
                index: 0,
                size: config.default_page_size.max(1),
            },
            column_sizing: BTreeMap::new(),
            selection: Selection::default(),
        }
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Current sort, if any.
    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    /// Active column filters by column key.
    pub fn column_filters(&self) -> &BTreeMap<String, String> {
        &self.column_filters
    }

    /// Global search text.
    pub fn global_filter(&self) -> &str {
        &self.global_filter
    }

    /// Pagination cursor.
    pub fn page(&self) -> PageState {
        self.page
    }

    /// Column width overrides by column key.
    pub fn column_sizing(&self) -> &BTreeMap<String, u32> {
        &self.column_sizing
    }

    /// Width override for one column.
    pub fn column_size(&self, key: &str) -> Option<u32> {
        self.column_sizing.get(key).copied()
    }

    /// Row selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Sort by a sortable column.
    pub fn set_sort(
        &mut self,
        columns: &ColumnModel,
        key: &str,
        direction: SortDirection,
    ) -> Result<(), TableError> {
        Self::sortable_column(columns, key)?;
        self.sort = Some(SortSpec {
            key: key.to_string(),
            direction,
        });
        Ok(())
    }

    /// Cycle a column's sort: ascending, descending, then unsorted.
    ///
    /// Sorting a different column starts over at ascending. Returns the new
    /// sort state.
    pub fn toggle_sort(
        &mut self,
        columns: &ColumnModel,
        key: &str,
    ) -> Result<Option<&SortSpec>, TableError> {
        Self::sortable_column(columns, key)?;
        self.sort = match self.sort.take() {
            Some(spec) if spec.key == key => match spec.direction {
                SortDirection::Ascending => Some(SortSpec::descending(key)),
                SortDirection::Descending => None,
            },
            _ => Some(SortSpec::ascending(key)),
        };
        Ok(self.sort.as_ref())
    }

    /// Clear sort state.
    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    fn sortable_column(columns: &ColumnModel, key: &str) -> Result<(), TableError> {
        let column = columns
            .get(key)
            .ok_or_else(|| TableError::unknown_column(key))?;
        if !column.sortable {
            return Err(TableError::NotSortable {
                key: key.to_string(),
            });
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Filtering
    // -------------------------------------------------------------------------

    /// Set or, with empty text, remove a column filter.
    pub fn set_column_filter(
        &mut self,
        columns: &ColumnModel,
        key: &str,
        text: impl Into<String>,
    ) -> Result<(), TableError> {
        let column = columns
            .get(key)
            .ok_or_else(|| TableError::unknown_column(key))?;
        if !column.filterable {
            return Err(TableError::NotFilterable {
                key: key.to_string(),
            });
        }
        let text = text.into();
        if text.is_empty() {
            self.column_filters.remove(key);
        } else {
            self.column_filters.insert(key.to_string(), text);
        }
        Ok(())
    }

    /// Set the global search text.
    pub fn set_global_filter(&mut self, text: impl Into<String>) {
        self.global_filter = text.into();
    }

    /// Drop every column filter and the global search text.
    pub fn clear_filters(&mut self) {
        self.column_filters.clear();
        self.global_filter.clear();
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    /// Jump to a page. Out-of-range indexes are clamped on the next view.
    pub fn set_page_index(&mut self, index: usize) {
        self.page.index = index;
    }

    /// Advance one page if another page exists for `total` rows.
    pub fn next_page(&mut self, total: usize) -> bool {
        if self.page.index < self.page.last_index(total) {
            self.page.index += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page. Returns false on the first page.
    pub fn previous_page(&mut self) -> bool {
        if self.page.index == 0 {
            return false;
        }
        self.page.index -= 1;
        true
    }

    /// Change the page size, keeping the first row of the current page on
    /// screen.
    pub fn set_page_size(&mut self, size: usize) -> Result<(), TableError> {
        if size == 0 {
            return Err(TableError::InvalidPageSize);
        }
        let first_row = self.page.index.saturating_mul(self.page.size);
        self.page = PageState {
            index: first_row / size,
            size,
        };
        Ok(())
    }

    /// Pull the page index back onto the last page holding any of `total`
    /// rows. Returns true if the index moved.
    pub fn clamp_page(&mut self, total: usize) -> bool {
        let clamped = self.page.clamped(total);
        let moved = clamped != self.page;
        if moved {
            log::trace!(
                "clamping page index {} -> {} for {} rows",
                self.page.index,
                clamped.index,
                total
            );
        }
        self.page = clamped;
        moved
    }

    // -------------------------------------------------------------------------
    // Column sizing
    // -------------------------------------------------------------------------

    /// Override a column's width. The stored width is clamped to the
    /// configured bounds and returned.
    pub fn resize_column(
        &mut self,
        columns: &ColumnModel,
        key: &str,
        width: u32,
        config: &GridConfig,
    ) -> Result<u32, TableError> {
        if !columns.contains(key) {
            return Err(TableError::unknown_column(key));
        }
        let width = config.clamp_width(width);
        self.column_sizing.insert(key.to_string(), width);
        Ok(width)
    }

    /// Drop a column's width override.
    pub fn reset_column_size(&mut self, key: &str) {
        self.column_sizing.remove(key);
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Change the selection mode.
    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        self.selection.set_mode(mode);
    }

    /// Toggle one row's selection.
    pub fn toggle_selected(&mut self, id: &str) -> bool {
        self.selection.toggle(id)
    }

    /// Select every row on a page.
    pub fn select_rows<T: Row>(&mut self, rows: &[&T]) -> bool {
        self.selection.select_all(rows.iter().map(|row| row.id()))
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // -------------------------------------------------------------------------
    // Pipeline
    // -------------------------------------------------------------------------

    /// Run the pipeline and store the clamped page index.
    pub fn view<'a, T: Row>(&mut self, rows: &'a [T], columns: &ColumnModel) -> PageView<'a, T> {
        let view = process(rows, columns, self);
        self.page.index = view.page_index;
        view
    }
}
