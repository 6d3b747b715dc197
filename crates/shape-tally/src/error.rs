use shape_core::ShapeError;
use thiserror::Error;

/// A record whose fields do not fit its kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("record has no kind")]
    Empty,

    #[error("{kind} expects {expected} numeric field(s), found {found}")]
    FieldCount {
        kind: String,
        expected: usize,
        found: usize,
    },

    #[error("{kind} {field} is not a finite number: `{text}`")]
    InvalidNumber {
        kind: String,
        field: &'static str,
        text: String,
    },

    #[error("{kind} face count must be a whole number: `{text}`")]
    FaceCount { kind: String, text: String },
}

/// Broad class of a [`TallyError`], for callers choosing how to react.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    InvalidDimension,
    UnsupportedOperation,
    MalformedRecord,
    UnknownKind,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TallyError {
    #[error("malformed record: {0}")]
    Malformed(#[from] RecordError),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error("unrecognised record kind `{0}`")]
    UnknownKind(String),
}

impl TallyError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TallyError::Malformed(_) => ErrorCategory::MalformedRecord,
            TallyError::Shape(ShapeError::InvalidDimension { .. }) => {
                ErrorCategory::InvalidDimension
            }
            TallyError::Shape(ShapeError::UnsupportedOperation { .. }) => {
                ErrorCategory::UnsupportedOperation
            }
            TallyError::UnknownKind(_) => ErrorCategory::UnknownKind,
        }
    }
}

/// A [`TallyError`] tagged with the 1-based position of the failing record.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("record {record}")]
pub struct StreamError {
    pub record: usize,
    #[source]
    pub error: TallyError,
}

impl StreamError {
    pub fn category(&self) -> ErrorCategory {
        self.error.category()
    }
}
