//! Error types for the document layer

use thiserror::Error;

use crate::solver::SolverError;

/// Errors from building or solving a document. All of these are fatal to
/// the solve-and-render operation; nothing is swallowed or retried, and no
/// partial layout is ever produced.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Two shapes created with the same identifier.
    #[error("duplicate shape id '{id}'")]
    DuplicateId { id: String },

    /// An identifier that would break attribute-namespace collision
    /// freedom.
    #[error("invalid shape id '{id}': {reason}")]
    InvalidId { id: String, reason: String },

    /// The accumulated constraint set admits no assignment.
    #[error("unsatisfiable constraints: {reason}")]
    Unsatisfiable { reason: String },

    /// Failure inside the solver adapter.
    #[error("constraint solver error: {0}")]
    Solver(#[from] SolverError),
}

impl DocumentError {
    pub(crate) fn duplicate_id(id: impl Into<String>) -> Self {
        DocumentError::DuplicateId { id: id.into() }
    }

    pub(crate) fn invalid_id(id: impl Into<String>, reason: impl Into<String>) -> Self {
        DocumentError::InvalidId {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_id_display() {
        let err = DocumentError::duplicate_id("boss");
        assert_eq!(err.to_string(), "duplicate shape id 'boss'");
    }

    #[test]
    fn test_unsatisfiable_display() {
        let err = DocumentError::Unsatisfiable {
            reason: "cannot satisfy box__x == 5".to_string(),
        };
        assert!(err.to_string().contains("unsatisfiable"));
        assert!(err.to_string().contains("box__x"));
    }
}
