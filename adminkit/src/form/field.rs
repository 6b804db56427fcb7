//! Field definitions and the validated field model.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::{DisabledValidation, FormConfig};
use crate::error::ConfigError;
use crate::model::Value;
use crate::validation::Validator;

use super::format::Formatter;

/// Type alias for data-dependent resolver closures.
pub type Resolver<R, T> = Arc<dyn Fn(&R) -> T + Send + Sync>;

/// Kind of input a field renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Select,
    Checkbox,
    Date,
    Time,
    Currency,
}

impl FieldKind {
    /// Kinds edited through a free-text input.
    pub fn is_text_input(self) -> bool {
        matches!(self, FieldKind::Text | FieldKind::Currency)
    }
}

/// One entry of a select field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Declarative description of one form input.
///
/// Data-dependent behaviour (`options_if`, `disabled_if`, `min_if`,
/// `max_if`) is expressed as resolver closures over the whole draft record,
/// so a field can depend on any sibling's value.
///
/// # Example
///
/// ```
/// use adminkit::form::{Field, SelectOption};
/// use adminkit::model::Record;
/// use adminkit::validation::rules;
///
/// let operator: Field<Record> = Field::select("decisionOperator", "Operator")
///     .required()
///     .options_if(|r: &Record| match r.get_str("parameterDataType") {
///         Some("E") => Vec::new(),
///         _ => vec![SelectOption::new("GT", "Greater than"), SelectOption::new("LT", "Less than")],
///     })
///     .disabled_if(|r: &Record| r.get_str("parameterDataType") == Some("E"))
///     .validate(rules::required_select("Operator"));
/// ```
pub struct Field<R> {
    pub(crate) key: String,
    pub(crate) label: String,
    pub(crate) kind: FieldKind,
    pub(crate) required: bool,
    pub(crate) default: Option<Value>,
    pub(crate) group: Option<String>,
    pub(crate) options: Vec<SelectOption>,
    pub(crate) options_if: Option<Resolver<R, Vec<SelectOption>>>,
    pub(crate) disabled_if: Option<Resolver<R, bool>>,
    pub(crate) min_if: Option<Resolver<R, Option<Value>>>,
    pub(crate) max_if: Option<Resolver<R, Option<Value>>>,
    pub(crate) validate: Option<Validator<R>>,
    pub(crate) format: Option<Formatter>,
    pub(crate) on_blur: Option<Formatter>,
    pub(crate) on_focus: Option<Formatter>,
    pub(crate) disabled_validation: Option<DisabledValidation>,
}

impl<R> Clone for Field<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            label: self.label.clone(),
            kind: self.kind,
            required: self.required,
            default: self.default.clone(),
            group: self.group.clone(),
            options: self.options.clone(),
            options_if: self.options_if.clone(),
            disabled_if: self.disabled_if.clone(),
            min_if: self.min_if.clone(),
            max_if: self.max_if.clone(),
            validate: self.validate.clone(),
            format: self.format.clone(),
            on_blur: self.on_blur.clone(),
            on_focus: self.on_focus.clone(),
            disabled_validation: self.disabled_validation,
        }
    }
}

impl<R> fmt::Debug for Field<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("required", &self.required)
            .field("group", &self.group)
            .field("options", &self.options)
            .field("options_if", &self.options_if.is_some())
            .field("disabled_if", &self.disabled_if.is_some())
            .field("validate", &self.validate.is_some())
            .field("format", &self.format.is_some())
            .finish()
    }
}

impl<R> Field<R> {
    /// Create a field of the given kind.
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            required: false,
            default: None,
            group: None,
            options: Vec::new(),
            options_if: None,
            disabled_if: None,
            min_if: None,
            max_if: None,
            validate: None,
            format: None,
            on_blur: None,
            on_focus: None,
            disabled_validation: None,
        }
    }

    pub fn text(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Text)
    }

    pub fn select(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Select)
    }

    pub fn checkbox(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Checkbox)
    }

    pub fn date(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Date)
    }

    pub fn time(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Time)
    }

    pub fn currency(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Currency)
    }

    /// Mark the field as required for display.
    ///
    /// The marker does not validate anything on its own; attach a rule
    /// such as [`rules::required`](crate::validation::rules::required).
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Value the field starts with when adding a record.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Group heading the field is shown under.
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Static option list.
    pub fn options(mut self, options: impl IntoIterator<Item = SelectOption>) -> Self {
        self.options = options.into_iter().collect();
        self
    }

    /// Options computed from the draft. Takes precedence over
    /// [`options`](Self::options).
    pub fn options_if<F>(mut self, f: F) -> Self
    where
        F: Fn(&R) -> Vec<SelectOption> + Send + Sync + 'static,
    {
        self.options_if = Some(Arc::new(f));
        self
    }

    /// Disable the field while `f` holds for the draft.
    pub fn disabled_if<F>(mut self, f: F) -> Self
    where
        F: Fn(&R) -> bool + Send + Sync + 'static,
    {
        self.disabled_if = Some(Arc::new(f));
        self
    }

    /// Lower bound computed from the draft (e.g. earliest selectable date).
    pub fn min_if<F>(mut self, f: F) -> Self
    where
        F: Fn(&R) -> Option<Value> + Send + Sync + 'static,
    {
        self.min_if = Some(Arc::new(f));
        self
    }

    /// Upper bound computed from the draft.
    pub fn max_if<F>(mut self, f: F) -> Self
    where
        F: Fn(&R) -> Option<Value> + Send + Sync + 'static,
    {
        self.max_if = Some(Arc::new(f));
        self
    }

    /// Validation rule for this field.
    pub fn validate(mut self, validator: Validator<R>) -> Self {
        self.validate = Some(validator);
        self
    }

    /// Formatter applied when the value changes.
    pub fn format(mut self, formatter: Formatter) -> Self {
        self.format = Some(formatter);
        self
    }

    /// Formatter applied when the input loses focus.
    pub fn on_blur(mut self, formatter: Formatter) -> Self {
        self.on_blur = Some(formatter);
        self
    }

    /// Formatter applied when the input gains focus.
    pub fn on_focus(mut self, formatter: Formatter) -> Self {
        self.on_focus = Some(formatter);
        self
    }

    /// Skip this field's validator while it is disabled.
    pub fn skip_validation_when_disabled(mut self) -> Self {
        self.disabled_validation = Some(DisabledValidation::Skip);
        self
    }

    /// Validate this field even while disabled, whatever the form default.
    pub fn validate_when_disabled(mut self) -> Self {
        self.disabled_validation = Some(DisabledValidation::Validate);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether the field is disabled for this draft.
    pub fn is_disabled(&self, draft: &R) -> bool {
        self.disabled_if.as_ref().is_some_and(|f| f(draft))
    }

    /// Effective options for this draft.
    pub fn options_for(&self, draft: &R) -> Vec<SelectOption> {
        match &self.options_if {
            Some(f) => f(draft),
            None => self.options.clone(),
        }
    }

    /// Apply the change-path formatter, if any.
    pub fn format_value(&self, value: Value) -> Value {
        match &self.format {
            Some(formatter) => formatter.apply(&value),
            None => value,
        }
    }
}

/// An ordered set of fields with unique, non-empty keys.
///
/// Built once per form; construction fails fast on duplicate keys.
pub struct FieldModel<R> {
    fields: Vec<Field<R>>,
    config: FormConfig,
}

impl<R> Clone for FieldModel<R> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
            config: self.config,
        }
    }
}

impl<R> fmt::Debug for FieldModel<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldModel")
            .field("fields", &self.fields)
            .field("config", &self.config)
            .finish()
    }
}

impl<R> FieldModel<R> {
    /// Validate and wrap a field list.
    pub fn new(fields: Vec<Field<R>>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::with_capacity(fields.len());
        for field in &fields {
            if field.key.trim().is_empty() {
                log::debug!("rejecting field model: empty key");
                return Err(ConfigError::empty_key("Field"));
            }
            if !seen.insert(field.key.as_str()) {
                log::debug!("rejecting field model: duplicate key '{}'", field.key);
                return Err(ConfigError::DuplicateField {
                    key: field.key.clone(),
                });
            }
        }
        Ok(Self {
            fields,
            config: FormConfig::default(),
        })
    }

    /// Replace the form-wide defaults.
    pub fn with_config(mut self, config: FormConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// All fields in declaration order.
    pub fn fields(&self) -> &[Field<R>] {
        &self.fields
    }

    /// Look up a field by key.
    pub fn get(&self, key: &str) -> Option<&Field<R>> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether a field's validator runs for this draft.
    pub(crate) fn should_validate(&self, field: &Field<R>, draft: &R) -> bool {
        let policy = field
            .disabled_validation
            .unwrap_or(self.config.disabled_validation);
        match policy {
            DisabledValidation::Validate => true,
            DisabledValidation::Skip => !field.is_disabled(draft),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    #[test]
    fn test_duplicate_field_rejected() {
        let err = FieldModel::<Record>::new(vec![Field::text("name", "Name"), Field::text("name", "Other")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateField { key } if key == "name"));
    }

    #[test]
    fn test_options_if_wins_over_static() {
        let field: Field<Record> = Field::select("op", "Operator")
            .options([SelectOption::new("EQ", "Equals")])
            .options_if(|_| vec![SelectOption::new("GT", "Greater than")]);
        let options = field.options_for(&Record::new("1"));
        assert_eq!(options, vec![SelectOption::new("GT", "Greater than")]);
    }

    #[test]
    fn test_policy_resolution() {
        let locked: Field<Record> = Field::text("a", "A").disabled_if(|_| true);
        let skipping = locked.clone().skip_validation_when_disabled();
        let model = FieldModel::new(vec![locked.clone()]).unwrap();
        let draft = Record::new("1");
        assert!(model.should_validate(&locked, &draft));
        assert!(!model.should_validate(&skipping, &draft));

        let skip_all = model.with_config(FormConfig::new().with_disabled_validation(DisabledValidation::Skip));
        assert!(!skip_all.should_validate(&locked, &draft));
        assert!(skip_all.should_validate(&locked.validate_when_disabled(), &draft));
    }
}
