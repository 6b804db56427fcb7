//! Validator composition.
//!
//! Validators are typed closures over `(value, record)` stored on the form's
//! field definitions. Small rules from [`rules`] combine through
//! [`compose`], which reports the first failure.
//!
//! # Example
//!
//! ```
//! use adminkit::model::{Record, Value};
//! use adminkit::validation::{compose, rules};
//!
//! let zip = compose([rules::required::<Record>("ZIP"), rules::zip_us("ZIP")]);
//! let record = Record::new("1");
//!
//! assert!(zip.check(&Value::from("79601-1234"), &record).is_none());
//! assert_eq!(
//!     zip.check(&Value::from("796"), &record).as_deref(),
//!     Some("ZIP must be a 5 or 9 digit ZIP code")
//! );
//! ```

mod result;
pub mod rules;
mod validator;

pub use result::{FieldError, ValidationResult};
pub use validator::{Validator, compose};
