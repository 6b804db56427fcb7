//! Grid and form configuration

use serde::Deserialize;
use serde::Serialize;

use crate::error::ConfigError;

/// Layout and paging defaults for tables.
///
/// Loads from JSON with every key optional; missing keys keep their
/// defaults.
///
/// # Example
///
/// ```
/// use adminkit::config::GridConfig;
///
/// let config = GridConfig::default()
///     .with_default_column_width(120)
///     .with_actions_column_width(80);
///
/// let loaded = GridConfig::from_json(r#"{ "default_page_size": 25 }"#).unwrap();
/// assert_eq!(loaded.default_page_size, 25);
/// assert_eq!(loaded.default_column_width, 150);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Width used when a column declares none.
    ///
    /// Default: 150
    pub default_column_width: u32,

    /// Lower bound applied to every resolved column width.
    ///
    /// Default: 40
    pub min_column_width: u32,

    /// Upper bound applied to every resolved column width.
    ///
    /// Default: 600
    pub max_column_width: u32,

    /// Width reserved at the right edge for the row actions column.
    ///
    /// Default: 100
    pub actions_column_width: u32,

    /// Page size for freshly created table state.
    ///
    /// Default: 10
    pub default_page_size: usize,

    /// Page sizes offered to the user.
    pub page_size_options: Vec<usize>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            default_column_width: 150,
            min_column_width: 40,
            max_column_width: 600,
            actions_column_width: 100,
            default_page_size: 10,
            page_size_options: vec![10, 25, 50, 100],
        }
    }
}

impl GridConfig {
    /// Creates a new grid config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a JSON config document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the width bounds and the page sizes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_column_width > self.max_column_width {
            return Err(ConfigError::InvalidWidthBounds {
                min: self.min_column_width,
                max: self.max_column_width,
            });
        }
        if self.default_page_size == 0 || self.page_size_options.contains(&0) {
            return Err(ConfigError::InvalidPageSize);
        }
        Ok(())
    }

    /// Clamps a width into the configured bounds.
    pub fn clamp_width(&self, width: u32) -> u32 {
        width.clamp(
            self.min_column_width,
            self.max_column_width.max(self.min_column_width),
        )
    }

    /// Sets the default column width.
    pub fn with_default_column_width(mut self, width: u32) -> Self {
        self.default_column_width = width;
        self
    }

    /// Sets the column width bounds.
    pub fn with_width_bounds(mut self, min: u32, max: u32) -> Self {
        self.min_column_width = min;
        self.max_column_width = max;
        self
    }

    /// Sets the reserved actions column width.
    pub fn with_actions_column_width(mut self, width: u32) -> Self {
        self.actions_column_width = width;
        self
    }

    /// Sets the default page size.
    pub fn with_default_page_size(mut self, size: usize) -> Self {
        self.default_page_size = size;
        self
    }
}

/// Whether a field that is currently disabled still gets validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisabledValidation {
    /// Validate the field regardless of its disabled state.
    #[default]
    Validate,
    /// Skip the field's validator while it is disabled.
    Skip,
}

/// Form-wide defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Policy for fields that do not choose their own.
    ///
    /// Default: [`DisabledValidation::Validate`]
    pub disabled_validation: DisabledValidation,
}

impl FormConfig {
    /// Creates a new form config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON config document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the default disabled-field policy.
    pub fn with_disabled_validation(mut self, policy: DisabledValidation) -> Self {
        self.disabled_validation = policy;
        self
    }
}
