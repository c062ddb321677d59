use thiserror::Error;

use crate::validation::ValidationResult;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    #[error("{kind} '{id}' already exists")]
    Duplicate { kind: &'static str, id: String },

    #[error("{kind} failed validation: {result}")]
    Invalid {
        kind: &'static str,
        result: ValidationResult,
    },

    #[error("{kind} cannot move from '{from}' to '{to}'")]
    IllegalTransition {
        kind: &'static str,
        from: String,
        to: String,
    },

    #[error("{kind} store lock poisoned")]
    Poisoned { kind: &'static str },
}

impl DataError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound { kind, id: id.into() }
    }

    pub fn illegal_transition(kind: &'static str, from: impl ToString, to: impl ToString) -> Self {
        Self::IllegalTransition {
            kind,
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// Validation details when the error came from a failed `validate()`.
    pub fn validation(&self) -> Option<&ValidationResult> {
        match self {
            Self::Invalid { result, .. } => Some(result),
            _ => None,
        }
    }
}

pub type DataResult<T> = Result<T, DataError>;
