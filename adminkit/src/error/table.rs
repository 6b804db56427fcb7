//! Errors from table interaction state operations

/// A rejected table state mutation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// The operation named a column the model does not define.
    #[error("Column '{key}' is not defined")]
    UnknownColumn { key: String },

    /// Sorting was requested on a column that is not sortable.
    #[error("Column '{key}' is not sortable")]
    NotSortable { key: String },

    /// A column filter was set on a column that does not allow filtering.
    #[error("Column '{key}' is not filterable")]
    NotFilterable { key: String },

    /// A page size of zero was requested.
    #[error("Page size must be greater than zero")]
    InvalidPageSize,
}

impl TableError {
    /// Creates a new unknown column error.
    pub fn unknown_column(key: impl Into<String>) -> Self {
        Self::UnknownColumn { key: key.into() }
    }
}
