//! Form resolution: field schema plus draft record to per-field view.
//!
//! Resolution is a pure read. It runs on every render and caches nothing,
//! because any field's resolvers may look at any other field's value.

use crate::model::{Row, Value};
use crate::validation::{FieldError, ValidationResult};

use super::field::{Field, FieldKind, FieldModel, SelectOption};

/// One field resolved against the current draft.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedField {
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub group: Option<String>,
    /// Options from `options_if` when present, else the static list.
    pub options: Vec<SelectOption>,
    pub disabled: bool,
    /// Raw draft value. Resolution never formats.
    pub value: Value,
    pub min: Option<Value>,
    pub max: Option<Value>,
}

impl ResolvedField {
    fn from_field<R: Row>(field: &Field<R>, draft: &R) -> Self {
        Self {
            key: field.key.clone(),
            label: field.label.clone(),
            kind: field.kind,
            required: field.required,
            group: field.group.clone(),
            options: field.options_for(draft),
            disabled: field.is_disabled(draft),
            value: draft.value(&field.key),
            min: field.min_if.as_ref().and_then(|f| f(draft)),
            max: field.max_if.as_ref().and_then(|f| f(draft)),
        }
    }
}

impl<R: Row> FieldModel<R> {
    /// Resolve every field against the draft, in declaration order.
    pub fn resolve(&self, draft: &R) -> Vec<ResolvedField> {
        self.fields()
            .iter()
            .map(|field| ResolvedField::from_field(field, draft))
            .collect()
    }

    /// Resolve a single field.
    pub fn resolve_field(&self, key: &str, draft: &R) -> Option<ResolvedField> {
        self.get(key).map(|field| ResolvedField::from_field(field, draft))
    }

    /// Run every field's validator against the draft.
    ///
    /// Disabled fields are validated unless their policy (or the form's
    /// default policy) says to skip them.
    pub fn validate_all(&self, draft: &R) -> ValidationResult {
        let errors = self.fields().iter().filter_map(|field| {
            let validator = field.validate.as_ref()?;
            if !self.should_validate(field, draft) {
                return None;
            }
            validator
                .check(&draft.value(&field.key), draft)
                .map(|message| FieldError {
                    field: field.key.clone(),
                    message,
                })
        });
        ValidationResult::from_errors(errors)
    }

    /// Validate one field against the draft.
    pub fn validate_field(&self, key: &str, draft: &R) -> Option<String> {
        let field = self.get(key)?;
        if !self.should_validate(field, draft) {
            return None;
        }
        field.validate.as_ref()?.check(&draft.value(key), draft)
    }
}
