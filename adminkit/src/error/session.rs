//! Errors from editing session transitions

use crate::form::SessionStatus;

/// A rejected editing session operation or a failed commit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The operation needs an open session.
    #[error("No record is open for editing")]
    NotOpen,

    /// An add or edit was requested while a session is active.
    #[error("Session is already active ({status})")]
    AlreadyActive { status: SessionStatus },

    /// The draft cannot change while a commit is in flight.
    #[error("Record is being saved")]
    Saving,

    /// The operation named a field the form does not define.
    #[error("Field '{key}' is not defined")]
    UnknownField { key: String },

    /// The commit callback failed; the session is open again.
    #[error("Failed to save record: {message}")]
    Commit { message: String },
}

impl SessionError {
    /// Creates a new unknown field error.
    pub fn unknown_field(key: impl Into<String>) -> Self {
        Self::UnknownField { key: key.into() }
    }
}
