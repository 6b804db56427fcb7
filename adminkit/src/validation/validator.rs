//! Validator type and combinators.

use std::fmt;
use std::sync::Arc;

use crate::model::Value;

/// Type alias for validator closures.
type CheckFn<R> = dyn Fn(&Value, &R) -> Option<String> + Send + Sync;

/// A validation rule over one field value and the whole record.
///
/// A validator returns `None` when the value is acceptable and the error
/// message otherwise. Validators are pure, never panic on malformed input,
/// and are cheap to clone.
///
/// # Example
///
/// ```
/// use adminkit::model::{Record, Value};
/// use adminkit::validation::{compose, rules};
///
/// let email = compose([rules::required::<Record>("Email"), rules::email("Email")]);
/// let record = Record::new("1");
///
/// assert_eq!(email.check(&Value::from(""), &record), Some("Email is required".to_string()));
/// assert_eq!(email.check(&Value::from("ops@example.com"), &record), None);
/// ```
pub struct Validator<R> {
    check: Arc<CheckFn<R>>,
}

impl<R> Clone for Validator<R> {
    fn clone(&self) -> Self {
        Self {
            check: Arc::clone(&self.check),
        }
    }
}

impl<R> fmt::Debug for Validator<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validator")
    }
}

impl<R> Validator<R> {
    /// Run the rule. Empty messages count as valid.
    pub fn check(&self, value: &Value, record: &R) -> Option<String> {
        (self.check)(value, record).filter(|msg| !msg.trim().is_empty())
    }
}

impl<R: 'static> Validator<R> {
    /// Wrap a validation closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value, &R) -> Option<String> + Send + Sync + 'static,
    {
        Self { check: Arc::new(f) }
    }

    /// Wrap a predicate on the value alone with a fixed message.
    pub fn rule<F>(f: F, msg: impl Into<String>) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        let msg = msg.into();
        Self::new(move |value, _| if f(value) { None } else { Some(msg.clone()) })
    }

    /// Run `self`, then `next` if `self` passed.
    pub fn and(self, next: Validator<R>) -> Self {
        compose([self, next])
    }

    /// Only run this rule while `predicate` holds for the record.
    pub fn when<P>(self, predicate: P) -> Self
    where
        P: Fn(&R) -> bool + Send + Sync + 'static,
    {
        Self::new(move |value, record| {
            if predicate(record) {
                self.check(value, record)
            } else {
                None
            }
        })
    }
}

/// Chain validators into one that reports the first failure.
///
/// Children run in order against `(value, record)`; evaluation stops at the
/// first error. The composed validator passes only if every child passes.
pub fn compose<R: 'static>(validators: impl IntoIterator<Item = Validator<R>>) -> Validator<R> {
    let chain: Vec<Validator<R>> = validators.into_iter().collect();
    Validator::new(move |value, record| chain.iter().find_map(|v| v.check(value, record)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    fn fails(msg: &'static str) -> Validator<Record> {
        Validator::new(move |_, _| Some(msg.to_string()))
    }

    fn passes() -> Validator<Record> {
        Validator::new(|_, _| None)
    }

    #[test]
    fn test_compose_returns_first_error() {
        let v = compose([passes(), fails("first"), fails("second")]);
        assert_eq!(v.check(&Value::Null, &Record::new("1")), Some("first".to_string()));
    }

    #[test]
    fn test_compose_empty_passes() {
        let v = compose(Vec::<Validator<Record>>::new());
        assert_eq!(v.check(&Value::Null, &Record::new("1")), None);
    }

    #[test]
    fn test_compose_short_circuits() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let counting = Validator::new(move |_, _: &Record| {
            counter.fetch_add(1, Ordering::SeqCst);
            None
        });
        let v = compose([fails("stop"), counting]);
        v.check(&Value::Null, &Record::new("1"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_empty_message_counts_as_valid() {
        let v = fails("");
        assert_eq!(v.check(&Value::Null, &Record::new("1")), None);
    }

    #[test]
    fn test_when_skips_unless_predicate() {
        let v = fails("bad").when(|r: &Record| r.get_str("type") != Some("E"));
        let exempt = Record::new("1").set("type", "E");
        let checked = Record::new("2").set("type", "N");
        assert_eq!(v.check(&Value::Null, &exempt), None);
        assert_eq!(v.check(&Value::Null, &checked), Some("bad".to_string()));
    }
}
