//! Configuration errors raised while building column and field models

/// An inconsistent table or form configuration.
///
/// These are detected once, when a model is built, and are fatal: a table
/// or form must not render with a model that failed these checks.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A column or field key is empty.
    #[error("{kind} key must not be empty")]
    EmptyKey { kind: &'static str },

    /// Two columns share a key.
    #[error("Duplicate column key '{key}'")]
    DuplicateColumn { key: String },

    /// Two fields share a key.
    #[error("Duplicate field key '{key}'")]
    DuplicateField { key: String },

    /// A pin or sizing entry references a column that does not exist.
    #[error("Column '{key}' is not defined")]
    UnknownColumn { key: String },

    /// A pattern rule was given an invalid regular expression.
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Column width bounds are inverted.
    #[error("Minimum column width {min} exceeds maximum {max}")]
    InvalidWidthBounds { min: u32, max: u32 },

    /// A page size of zero was configured.
    #[error("Page size must be greater than zero")]
    InvalidPageSize,

    /// A configuration document failed to parse.
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// Creates a new empty-key error.
    pub fn empty_key(kind: &'static str) -> Self {
        Self::EmptyKey { kind }
    }

    /// Creates a new unknown column error.
    pub fn unknown_column(key: impl Into<String>) -> Self {
        Self::UnknownColumn { key: key.into() }
    }
}
