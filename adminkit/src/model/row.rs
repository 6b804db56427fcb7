//! Traits the engines use to read and write caller-owned rows

use super::Value;

/// A row the table pipeline and the form engine can read.
///
/// Rows stay owned by the caller; the engines only read attributes through
/// [`value`](Row::value) and never mutate a row in place.
///
/// # Example
///
/// ```
/// use adminkit::model::{Row, Value};
///
/// #[derive(Clone)]
/// struct Campaign {
///     id: String,
///     name: String,
///     budget: i64,
/// }
///
/// impl Row for Campaign {
///     fn id(&self) -> &str {
///         &self.id
///     }
///
///     fn value(&self, key: &str) -> Value {
///         match key {
///             "name" => Value::from(self.name.as_str()),
///             "budget" => Value::from(self.budget),
///             _ => Value::Null,
///         }
///     }
/// }
/// ```
pub trait Row: Clone {
    /// Stable unique identifier for this row.
    fn id(&self) -> &str;

    /// Current value of an attribute. Unknown keys read as [`Value::Null`].
    fn value(&self, key: &str) -> Value;
}

/// A row type the editing session can build and mutate as a draft.
pub trait Editable: Row {
    /// An empty row carrying only its id.
    fn blank(id: String) -> Self;

    /// Replaces the value of one attribute.
    fn set_value(&mut self, key: &str, value: Value);
}
