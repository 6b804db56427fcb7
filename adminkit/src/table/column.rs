//! Column definitions and the validated column model.

use std::collections::HashSet;

use crate::config::GridConfig;
use crate::error::ConfigError;

/// Side a pinned column sticks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinSide {
    Left,
    Right,
}

/// Declared width of a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnWidth {
    /// Width in pixels.
    Px(u32),
    /// Width as written in page configuration, e.g. `"120"` or `"120px"`.
    Css(String),
}

impl ColumnWidth {
    /// Numeric pixel width, if this width can be read as one.
    pub fn pixels(&self) -> Option<u32> {
        match self {
            ColumnWidth::Px(px) => Some(*px),
            ColumnWidth::Css(text) => {
                let trimmed = text.trim();
                let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
                let parsed = number.parse::<f64>().ok()?;
                if parsed.is_finite() && parsed >= 0.0 {
                    Some(parsed.round() as u32)
                } else {
                    None
                }
            }
        }
    }
}

impl From<u32> for ColumnWidth {
    fn from(px: u32) -> Self {
        ColumnWidth::Px(px)
    }
}

impl From<i32> for ColumnWidth {
    fn from(px: i32) -> Self {
        ColumnWidth::Px(u32::try_from(px).unwrap_or(0))
    }
}

impl From<&str> for ColumnWidth {
    fn from(text: &str) -> Self {
        ColumnWidth::Css(text.to_string())
    }
}

/// Column configuration.
///
/// Columns define the structure of the table: the row attribute they show,
/// header text, width, pinning, and whether the column can be sorted or
/// filtered.
///
/// # Examples
///
/// ```
/// use adminkit::table::{Column, PinSide};
///
/// let columns = vec![
///     Column::new("name", "Name").sortable(),
///     Column::new("cityName", "City").width(180),
///     Column::new("status", "Status").width("96px").pin(PinSide::Right),
/// ];
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Row attribute shown in this column.
    pub key: String,
    /// Column header text.
    pub header: String,
    /// Whether this column is sortable.
    pub sortable: bool,
    /// Whether this column accepts a column filter.
    pub filterable: bool,
    /// Declared width, if any.
    pub width: Option<ColumnWidth>,
    /// Pin side, if the column is sticky.
    pub pin: Option<PinSide>,
}

impl Column {
    /// Create a new unsorted, filterable, unpinned column.
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            sortable: false,
            filterable: true,
            width: None,
            pin: None,
        }
    }

    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Refuse column filters on this column.
    ///
    /// The column still takes part in the global filter.
    pub fn unfilterable(mut self) -> Self {
        self.filterable = false;
        self
    }

    /// Set the declared width.
    pub fn width(mut self, width: impl Into<ColumnWidth>) -> Self {
        self.width = Some(width.into());
        self
    }

    /// Pin the column to one side.
    pub fn pin(mut self, side: PinSide) -> Self {
        self.pin = Some(side);
        self
    }

    /// Width after applying, in order: a sizing override, the declared
    /// pixel width, the declared width parsed from text, and the default.
    /// The result is clamped to the configured bounds.
    pub fn resolved_width(&self, sizing: Option<u32>, config: &GridConfig) -> u32 {
        let width = sizing
            .or_else(|| self.width.as_ref().and_then(ColumnWidth::pixels))
            .unwrap_or(config.default_column_width);
        config.clamp_width(width)
    }
}

/// An ordered set of columns with unique, non-empty keys.
///
/// Built once per table; construction fails fast on an inconsistent
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnModel {
    columns: Vec<Column>,
}

impl ColumnModel {
    /// Validate and wrap a column list.
    pub fn new(columns: Vec<Column>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if column.key.trim().is_empty() {
                log::debug!("rejecting column model: empty key");
                return Err(ConfigError::empty_key("Column"));
            }
            if !seen.insert(column.key.as_str()) {
                log::debug!("rejecting column model: duplicate key '{}'", column.key);
                return Err(ConfigError::DuplicateColumn {
                    key: column.key.clone(),
                });
            }
        }
        Ok(Self { columns })
    }

    /// Pin an existing column by key.
    pub fn pin(mut self, key: &str, side: PinSide) -> Result<Self, ConfigError> {
        let column = self
            .columns
            .iter_mut()
            .find(|c| c.key == key)
            .ok_or_else(|| ConfigError::unknown_column(key))?;
        column.pin = Some(side);
        Ok(self)
    }

    /// All columns in declaration order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Iterate columns in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Column> {
        self.columns.iter()
    }

    /// Look up a column by key.
    pub fn get(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Check whether a column key exists.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check whether the model has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Columns pinned to the given side, in declaration order.
    pub fn pinned(&self, side: PinSide) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(move |c| c.pin == Some(side))
    }
}

impl<'a> IntoIterator for &'a ColumnModel {
    type Item = &'a Column;
    type IntoIter = std::slice::Iter<'a, Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_keys_rejected() {
        let err = ColumnModel::new(vec![Column::new("name", "Name"), Column::new("name", "Again")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateColumn { key } if key == "name"));
    }

    #[test]
    fn test_empty_key_rejected() {
        let err = ColumnModel::new(vec![Column::new(" ", "Blank")]).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyKey { .. }));
    }

    #[test]
    fn test_pin_unknown_key_rejected() {
        let model = ColumnModel::new(vec![Column::new("name", "Name")]).unwrap();
        let err = model.pin("status", PinSide::Right).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownColumn { key } if key == "status"));
    }

    #[test]
    fn test_width_parsing() {
        assert_eq!(ColumnWidth::from("120").pixels(), Some(120));
        assert_eq!(ColumnWidth::from(" 96px ").pixels(), Some(96));
        assert_eq!(ColumnWidth::from("auto").pixels(), None);
        assert_eq!(ColumnWidth::from(80).pixels(), Some(80));
    }

    #[test]
    fn test_resolved_width_order_and_clamp() {
        let config = GridConfig::default().with_width_bounds(50, 300);
        let column = Column::new("a", "A").width("120px");
        assert_eq!(column.resolved_width(None, &config), 120);
        assert_eq!(column.resolved_width(Some(200), &config), 200);
        assert_eq!(column.resolved_width(Some(1000), &config), 300);
        assert_eq!(Column::new("b", "B").resolved_width(None, &config), 150);
        assert_eq!(Column::new("c", "C").width(10).resolved_width(None, &config), 50);
        assert_eq!(Column::new("d", "D").width("wide").resolved_width(None, &config), 150);
    }
}
