//! Record forms: field schema, resolution, formatting, and the editing
//! session that drives add/edit/submit.

mod field;
mod format;
mod resolve;
mod session;

pub use field::{Field, FieldKind, FieldModel, Resolver, SelectOption};
pub use format::{Formatter, digits_only, format_currency, format_phone, strip_commas};
pub use resolve::ResolvedField;
pub use session::{EditMode, EditingSession, SessionSnapshot, SessionStatus, SubmitOutcome};
