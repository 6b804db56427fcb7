//! Sticky-offset geometry for pinned columns.

use std::collections::BTreeMap;

use crate::config::GridConfig;

use super::column::{ColumnModel, PinSide};
use super::state::TableState;

/// Pixel offsets of pinned columns from their table edge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinnedLayout {
    /// Offset from the left edge, per left-pinned column key.
    pub left: BTreeMap<String, u32>,
    /// Offset from the right edge, per right-pinned column key.
    pub right: BTreeMap<String, u32>,
}

impl PinnedLayout {
    /// Offset for a column on whichever side it is pinned.
    pub fn offset(&self, key: &str) -> Option<(PinSide, u32)> {
        self.left
            .get(key)
            .map(|offset| (PinSide::Left, *offset))
            .or_else(|| self.right.get(key).map(|offset| (PinSide::Right, *offset)))
    }
}

/// Right offsets from declared widths only.
///
/// Starts from the reserved actions column width and walks right-pinned
/// columns from the last declared one backwards, so each column's offset
/// covers every right-pinned column nearer the right edge.
pub fn compute_right_offsets(columns: &ColumnModel, config: &GridConfig) -> BTreeMap<String, u32> {
    right_offsets(columns, &BTreeMap::new(), config)
}

/// Left and right offsets, honouring the state's column width overrides.
pub fn pinned_layout(columns: &ColumnModel, state: &TableState, config: &GridConfig) -> PinnedLayout {
    PinnedLayout {
        left: left_offsets(columns, state.column_sizing(), config),
        right: right_offsets(columns, state.column_sizing(), config),
    }
}

fn right_offsets(
    columns: &ColumnModel,
    sizing: &BTreeMap<String, u32>,
    config: &GridConfig,
) -> BTreeMap<String, u32> {
    let mut offsets = BTreeMap::new();
    let mut cumulative = config.actions_column_width;
    for column in columns.columns().iter().rev() {
        if column.pin != Some(PinSide::Right) {
            continue;
        }
        offsets.insert(column.key.clone(), cumulative);
        let width = column.resolved_width(sizing.get(&column.key).copied(), config);
        cumulative = cumulative.saturating_add(width);
    }
    offsets
}

fn left_offsets(
    columns: &ColumnModel,
    sizing: &BTreeMap<String, u32>,
    config: &GridConfig,
) -> BTreeMap<String, u32> {
    let mut offsets = BTreeMap::new();
    let mut cumulative = 0u32;
    for column in columns.pinned(PinSide::Left) {
        offsets.insert(column.key.clone(), cumulative);
        let width = column.resolved_width(sizing.get(&column.key).copied(), config);
        cumulative = cumulative.saturating_add(width);
    }
    offsets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    #[test]
    fn test_no_pinned_columns() {
        let columns = ColumnModel::new(vec![Column::new("a", "A")]).unwrap();
        assert!(compute_right_offsets(&columns, &GridConfig::default()).is_empty());
    }

    #[test]
    fn test_left_offsets_accumulate_in_order() {
        let columns = ColumnModel::new(vec![
            Column::new("select", "").width(40).pin(PinSide::Left),
            Column::new("name", "Name").width(200).pin(PinSide::Left),
            Column::new("city", "City"),
        ])
        .unwrap();
        let layout = pinned_layout(&columns, &TableState::default(), &GridConfig::default());
        assert_eq!(layout.left.get("select"), Some(&0));
        assert_eq!(layout.left.get("name"), Some(&40));
        assert_eq!(layout.offset("city"), None);
    }
}
