//! Add/edit lifecycle for one record.

use std::fmt;
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use crate::error::SessionError;
use crate::model::{Editable, Value};
use crate::validation::ValidationResult;

use super::field::FieldModel;
use super::format::Formatter;
use super::resolve::ResolvedField;

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionStatus {
    /// No record is being edited.
    #[default]
    Closed,
    /// A draft is open for changes.
    Open,
    /// The draft was handed to the commit callback and is awaiting it.
    Saving,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionStatus::Closed => "closed",
            SessionStatus::Open => "open",
            SessionStatus::Saving => "saving",
        };
        f.write_str(name)
    }
}

/// Whether the draft is a new record or a copy of an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditMode {
    Add,
    Edit,
}

/// What a call to [`EditingSession::submit`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<R> {
    /// The commit callback accepted the record; the session is closed.
    Committed(R),
    /// Validation failed; the session stays open.
    Invalid(ValidationResult),
    /// A commit is already in flight; nothing was done.
    AlreadySaving,
}

/// Point-in-time copy of the session, for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot<R> {
    pub status: SessionStatus,
    pub mode: Option<EditMode>,
    pub draft: Option<R>,
    pub source_id: Option<String>,
}

#[derive(Debug)]
struct SessionInner<R> {
    status: SessionStatus,
    mode: Option<EditMode>,
    draft: Option<R>,
    /// Draft as it was when opened, for dirty tracking.
    original: Option<R>,
    source_id: Option<String>,
    errors: ValidationResult,
}

impl<R> SessionInner<R> {
    fn closed() -> Self {
        Self {
            status: SessionStatus::Closed,
            mode: None,
            draft: None,
            original: None,
            source_id: None,
            errors: ValidationResult::Valid,
        }
    }

    fn open(&mut self, mode: EditMode, draft: R, original: R, source_id: Option<String>) {
        self.status = SessionStatus::Open;
        self.mode = Some(mode);
        self.draft = Some(draft);
        self.original = Some(original);
        self.source_id = source_id;
        self.errors = ValidationResult::Valid;
    }

    fn close(&mut self) {
        *self = Self::closed();
    }

    fn ensure_closed(&self) -> Result<(), SessionError> {
        match self.status {
            SessionStatus::Closed => Ok(()),
            status => Err(SessionError::AlreadyActive { status }),
        }
    }

    fn draft_mut(&mut self) -> Result<&mut R, SessionError> {
        match self.status {
            SessionStatus::Open => self.draft.as_mut().ok_or(SessionError::NotOpen),
            SessionStatus::Saving => Err(SessionError::Saving),
            SessionStatus::Closed => Err(SessionError::NotOpen),
        }
    }
}

/// Add/edit session over one draft record.
///
/// The session is a handle: clones share the same state, so a page can
/// keep one copy for rendering while another awaits a commit. The draft is
/// always an independent copy; the caller's rows are never touched before
/// the commit callback receives the finished record.
///
/// # Example
///
/// ```
/// use adminkit::form::{EditingSession, Field, FieldModel, SubmitOutcome};
/// use adminkit::model::Record;
/// use adminkit::validation::rules;
///
/// # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
/// # rt.block_on(async {
/// let fields: FieldModel<Record> = FieldModel::new(vec![
///     Field::text("name", "Name").required().validate(rules::required("Name")),
/// ])
/// .unwrap();
/// let session = EditingSession::new(fields);
///
/// session.open_for_add([]).unwrap();
/// session.update_field("name", "Spring promo").unwrap();
///
/// let outcome = session
///     .submit(|record: Record| async move {
///         assert_eq!(record.get_str("name"), Some("Spring promo"));
///         Ok::<(), String>(())
///     })
///     .await
///     .unwrap();
/// assert!(matches!(outcome, SubmitOutcome::Committed(_)));
/// # });
/// ```
pub struct EditingSession<R> {
    fields: Arc<FieldModel<R>>,
    inner: Arc<RwLock<SessionInner<R>>>,
}

impl<R> Clone for EditingSession<R> {
    fn clone(&self) -> Self {
        Self {
            fields: Arc::clone(&self.fields),
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: fmt::Debug> fmt::Debug for EditingSession<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditingSession")
            .field("inner", &self.inner)
            .finish()
    }
}

impl<R: Editable> EditingSession<R> {
    /// Create a closed session for a form.
    pub fn new(fields: FieldModel<R>) -> Self {
        Self {
            fields: Arc::new(fields),
            inner: Arc::new(RwLock::new(SessionInner::closed())),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionInner<R>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionInner<R>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// The form this session edits.
    pub fn fields(&self) -> &FieldModel<R> {
        &self.fields
    }

    pub fn status(&self) -> SessionStatus {
        self.read().status
    }

    pub fn mode(&self) -> Option<EditMode> {
        self.read().mode
    }

    /// Copy of the current draft.
    pub fn draft(&self) -> Option<R> {
        self.read().draft.clone()
    }

    /// Id of the row being edited (edit mode only).
    pub fn source_id(&self) -> Option<String> {
        self.read().source_id.clone()
    }

    /// Errors from the last validation run.
    pub fn errors(&self) -> ValidationResult {
        self.read().errors.clone()
    }

    /// Copy of status, mode, draft, and source id.
    pub fn snapshot(&self) -> SessionSnapshot<R> {
        let inner = self.read();
        SessionSnapshot {
            status: inner.status,
            mode: inner.mode,
            draft: inner.draft.clone(),
            source_id: inner.source_id.clone(),
        }
    }

    /// Resolve every field against the current draft.
    pub fn resolved(&self) -> Option<Vec<ResolvedField>> {
        let inner = self.read();
        inner.draft.as_ref().map(|draft| self.fields.resolve(draft))
    }

    /// Whether the draft differs from how it was opened.
    pub fn is_dirty(&self) -> bool
    where
        R: PartialEq,
    {
        let inner = self.read();
        inner.draft != inner.original
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Open a new record: field defaults first, then the seed on top.
    ///
    /// The draft gets a fresh UUID as its id unless the seed sets `id`.
    pub fn open_for_add(&self, seed: impl IntoIterator<Item = (String, Value)>) -> Result<(), SessionError> {
        let mut inner = self.write();
        inner.ensure_closed()?;

        let mut draft = R::blank(Uuid::new_v4().to_string());
        for field in self.fields.fields() {
            if let Some(default) = &field.default {
                draft.set_value(&field.key, default.clone());
            }
        }
        for (key, value) in seed {
            draft.set_value(&key, value);
        }

        log::debug!("session: opening new record {}", draft.id());
        let original = draft.clone();
        inner.open(EditMode::Add, draft, original, None);
        Ok(())
    }

    /// Open a copy of an existing row.
    ///
    /// Numeric values of text-input fields are rewritten as fixed-point
    /// text so an editor never shows exponent notation.
    pub fn open_for_edit(&self, row: &R) -> Result<(), SessionError> {
        let mut inner = self.write();
        inner.ensure_closed()?;

        let mut draft = row.clone();
        for field in self.fields.fields() {
            if !field.kind.is_text_input() {
                continue;
            }
            if let Some(text) = draft.value(&field.key).to_fixed_point() {
                draft.set_value(&field.key, Value::Text(text));
            }
        }

        log::debug!("session: opening record {} for edit", row.id());
        let original = draft.clone();
        inner.open(EditMode::Edit, draft, original, Some(row.id().to_string()));
        Ok(())
    }

    /// Set a field on the draft, running the field's change formatter.
    ///
    /// Does not validate.
    pub fn update_field(&self, key: &str, value: impl Into<Value>) -> Result<(), SessionError> {
        let field = self
            .fields
            .get(key)
            .ok_or_else(|| SessionError::unknown_field(key))?;
        let value = field.format_value(value.into());
        let mut inner = self.write();
        inner.draft_mut()?.set_value(key, value);
        Ok(())
    }

    /// Apply the field's blur formatter to its current value.
    pub fn blur_field(&self, key: &str) -> Result<(), SessionError> {
        let field = self
            .fields
            .get(key)
            .ok_or_else(|| SessionError::unknown_field(key))?;
        self.reformat(key, field.on_blur.as_ref())
    }

    /// Apply the field's focus formatter to its current value.
    pub fn focus_field(&self, key: &str) -> Result<(), SessionError> {
        let field = self
            .fields
            .get(key)
            .ok_or_else(|| SessionError::unknown_field(key))?;
        self.reformat(key, field.on_focus.as_ref())
    }

    fn reformat(&self, key: &str, formatter: Option<&Formatter>) -> Result<(), SessionError> {
        let mut inner = self.write();
        let draft = inner.draft_mut()?;
        if let Some(formatter) = formatter {
            let value = formatter.apply(&draft.value(key));
            draft.set_value(key, value);
        }
        Ok(())
    }

    /// Validate the draft without submitting. The result is also kept as
    /// [`errors`](Self::errors).
    pub fn validate(&self) -> Result<ValidationResult, SessionError> {
        let mut inner = self.write();
        let draft = inner.draft.as_ref().ok_or(SessionError::NotOpen)?;
        let result = self.fields.validate_all(draft);
        inner.errors = result.clone();
        Ok(result)
    }

    /// Validate and hand the draft to `commit`.
    ///
    /// - Invalid draft: stays open, returns [`SubmitOutcome::Invalid`].
    /// - Commit already in flight: returns [`SubmitOutcome::AlreadySaving`]
    ///   without calling `commit`.
    /// - Commit succeeds: the session closes and returns the record.
    /// - Commit fails: the session reopens with the same draft and returns
    ///   [`SessionError::Commit`].
    ///
    /// If the commit future never completes, or is dropped before it does,
    /// the session stays in [`SessionStatus::Saving`].
    pub async fn submit<F, Fut, E>(&self, commit: F) -> Result<SubmitOutcome<R>, SessionError>
    where
        F: FnOnce(R) -> Fut,
        Fut: Future<Output = Result<(), E>>,
        E: fmt::Display,
    {
        let draft = {
            let mut inner = self.write();
            match inner.status {
                SessionStatus::Closed => return Err(SessionError::NotOpen),
                SessionStatus::Saving => {
                    log::debug!("session: submit ignored, already saving");
                    return Ok(SubmitOutcome::AlreadySaving);
                }
                SessionStatus::Open => {}
            }
            let draft = inner.draft.clone().ok_or(SessionError::NotOpen)?;
            let result = self.fields.validate_all(&draft);
            if result.is_invalid() {
                log::debug!("session: submit blocked by {} invalid field(s)", result.len());
                inner.errors = result.clone();
                return Ok(SubmitOutcome::Invalid(result));
            }
            inner.errors = ValidationResult::Valid;
            inner.status = SessionStatus::Saving;
            draft
        };

        log::debug!("session: committing record {}", draft.id());
        match commit(draft.clone()).await {
            Ok(()) => {
                self.write().close();
                Ok(SubmitOutcome::Committed(draft))
            }
            Err(err) => {
                let message = err.to_string();
                log::warn!("session: commit of record {} failed: {}", draft.id(), message);
                self.write().status = SessionStatus::Open;
                Err(SessionError::Commit { message })
            }
        }
    }

    /// Discard the draft and close.
    pub fn cancel(&self) -> Result<(), SessionError> {
        let mut inner = self.write();
        match inner.status {
            SessionStatus::Open => {
                log::debug!("session: cancelled");
                inner.close();
                Ok(())
            }
            SessionStatus::Saving => Err(SessionError::Saving),
            SessionStatus::Closed => Err(SessionError::NotOpen),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{Field, FieldModel};
    use crate::model::{Record, Row};
    use crate::validation::rules;

    fn session() -> EditingSession<Record> {
        let fields = FieldModel::new(vec![
            Field::text("name", "Name").validate(rules::required("Name")),
            Field::select("status", "Status").default_value("A"),
            Field::currency("amount", "Amount"),
        ])
        .unwrap();
        EditingSession::new(fields)
    }

    #[test]
    fn test_add_applies_defaults_then_seed() {
        let session = session();
        session
            .open_for_add([("status".to_string(), Value::from("I"))])
            .unwrap();
        let draft = session.draft().unwrap();
        assert_eq!(draft.get_str("status"), Some("I"));
        assert!(Uuid::parse_str(draft.id()).is_ok());
        assert_eq!(session.mode(), Some(EditMode::Add));
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_open_twice_rejected() {
        let session = session();
        session.open_for_add([]).unwrap();
        assert_eq!(
            session.open_for_add([]),
            Err(SessionError::AlreadyActive {
                status: SessionStatus::Open
            })
        );
    }

    #[test]
    fn test_update_requires_open_session() {
        let session = session();
        assert_eq!(session.update_field("name", "x"), Err(SessionError::NotOpen));
        session.open_for_add([]).unwrap();
        assert!(matches!(
            session.update_field("nope", "x"),
            Err(SessionError::UnknownField { .. })
        ));
        session.update_field("name", "x").unwrap();
        assert!(session.is_dirty());
    }

    #[test]
    fn test_edit_rewrites_numbers_as_fixed_point() {
        let session = session();
        let row = Record::new("7").set("amount", 0.00001).set("name", "Promo");
        session.open_for_edit(&row).unwrap();
        let draft = session.draft().unwrap();
        assert_eq!(draft.get_str("amount"), Some("0.00001"));
        assert_eq!(row.value("amount"), Value::Float(0.00001));
        assert_eq!(session.source_id().as_deref(), Some("7"));
    }

    #[test]
    fn test_cancel_discards_draft() {
        let session = session();
        assert_eq!(session.cancel(), Err(SessionError::NotOpen));
        session.open_for_add([]).unwrap();
        session.update_field("name", "Draft").unwrap();
        session.cancel().unwrap();
        assert_eq!(session.status(), SessionStatus::Closed);
        assert!(session.draft().is_none());
        assert!(session.resolved().is_none());
    }

    #[tokio::test]
    async fn test_invalid_submit_stays_open() {
        let session = session();
        session.open_for_add([]).unwrap();
        let outcome = session
            .submit(|_| async { Ok::<(), String>(()) })
            .await
            .unwrap();
        let SubmitOutcome::Invalid(result) = outcome else {
            panic!("expected invalid outcome");
        };
        assert_eq!(result.get("name"), Some("Name is required"));
        assert_eq!(session.status(), SessionStatus::Open);
        assert_eq!(session.errors(), result);
    }
}
