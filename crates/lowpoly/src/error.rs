//! Crate error type. The core never logs; every fallible operation returns
//! one of these two kinds instead.

/// Errors produced by mesh and Delaunay operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LowpolyError {
    /// A caller-supplied argument violated a documented precondition
    /// (too few points, duplicate points, a polygon operation against an
    /// edge with no origin coordinate).
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// An internal consistency check failed. This indicates a bug in the
    /// mesh or triangulator, not a user error.
    #[error("invariant violated: {reason}")]
    InvariantViolated { reason: String },
}

impl LowpolyError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        LowpolyError::InvalidInput {
            reason: reason.into(),
        }
    }

    pub(crate) fn invariant(reason: impl Into<String>) -> Self {
        LowpolyError::InvariantViolated {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LowpolyError>;
