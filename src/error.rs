use crate::draft_parser::DraftRecord;
use thiserror::Error;

/// Error categories surfaced to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Io,
}

/// Main error type for focus operations
#[derive(Debug, Error)]
pub enum FocusError {
    #[error("@{field} not allowed here (line {line})")]
    UnknownField {
        field: String,
        line: usize,
        partial: DraftRecord,
    },

    #[error("malformed field marker on line {line}: {text}")]
    MalformedMarker {
        line: usize,
        text: String,
        partial: DraftRecord,
    },

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("state file busy: {0}")]
    StateBusy(String),

    #[error("editor `{command}` failed: {reason}")]
    Editor { command: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FocusError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FocusError::UnknownField { .. }
            | FocusError::MalformedMarker { .. }
            | FocusError::InvalidArgs(_) => ErrorKind::Validation,
            FocusError::NotFound(_) => ErrorKind::NotFound,
            FocusError::StateBusy(_)
            | FocusError::Editor { .. }
            | FocusError::Io(_)
            | FocusError::Json(_) => ErrorKind::Io,
        }
    }

    /// Get the exit code for the CLI
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::Validation => 2,
            ErrorKind::NotFound => 3,
            ErrorKind::Io => 5,
        }
    }

    /// Fields committed before a draft parse failure, if this is one
    pub fn partial_record(&self) -> Option<&DraftRecord> {
        match self {
            FocusError::UnknownField { partial, .. }
            | FocusError::MalformedMarker { partial, .. } => Some(partial),
            _ => None,
        }
    }
}
