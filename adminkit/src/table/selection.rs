//! Row selection by id.

use std::collections::HashSet;

/// Selection mode for a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// No selection allowed.
    None,
    /// Single row selection (radio-button style).
    Single,
    /// Multiple rows can be selected (checkbox style).
    #[default]
    Multi,
}

/// Tracks selected rows by their ids.
///
/// Ids rather than positions keep the selection stable while the pipeline
/// re-filters, re-sorts, and re-pages the rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    mode: SelectionMode,
    selected: HashSet<String>,
}

impl Selection {
    /// Create an empty selection in the given mode.
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: HashSet::new(),
        }
    }

    /// Current selection mode.
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Change the mode, dropping selections the new mode cannot hold.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
        match mode {
            SelectionMode::None => self.selected.clear(),
            SelectionMode::Single if self.selected.len() > 1 => self.selected.clear(),
            _ => {}
        }
    }

    /// Toggle selection for an id. Returns true if selection changed.
    pub fn toggle(&mut self, id: &str) -> bool {
        match self.mode {
            SelectionMode::None => false,
            SelectionMode::Single => {
                let was_selected = self.selected.contains(id);
                self.selected.clear();
                if !was_selected {
                    self.selected.insert(id.to_string());
                }
                true
            }
            SelectionMode::Multi => {
                if !self.selected.remove(id) {
                    self.selected.insert(id.to_string());
                }
                true
            }
        }
    }

    /// Select every given id (multi mode only). Returns true if anything
    /// was added.
    pub fn select_all<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) -> bool {
        if self.mode != SelectionMode::Multi {
            return false;
        }
        let before = self.selected.len();
        self.selected.extend(ids.into_iter().map(str::to_string));
        self.selected.len() != before
    }

    /// Check if an id is selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Clear all selections.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Number of selected rows.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected ids, sorted for deterministic ordering.
    pub fn selected_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.selected.iter().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}
