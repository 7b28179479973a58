//! Error types for set construction and queries.
//!
//! All errors are local precondition violations surfaced to the immediate
//! caller; there is no retry or recovery layer. Numerical edge cases are
//! handled by the tolerance predicates in [`crate::comparison`] instead of
//! error paths.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type SetResult<T> = Result<T, SetError>;

/// Top-level error type for set operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetError {
    /// Operand dimensions disagree (matrix/vector shape, block substitution,
    /// translation vector length). Never silently truncated or padded.
    #[error("dimension mismatch in {context}: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Where the mismatch was detected.
        context: &'static str,
        /// The dimension required by the receiver.
        expected: usize,
        /// The dimension actually supplied.
        found: usize,
    },

    /// A support-vector query has no maximizer. Callers that only need the
    /// support function value should query it instead; it returns infinity.
    #[error("support vector of {set} is undefined: no maximizer in the queried direction")]
    UnboundedDirection {
        /// The set representation that was queried.
        set: &'static str,
    },

    /// A structural operation was requested on a combination of set
    /// types/shapes with no closed-form algorithm. Surfaced, never silently
    /// approximated.
    #[error("{operation} is not supported for {set}: {reason}")]
    UnsupportedOperation {
        /// The operation that was requested.
        operation: &'static str,
        /// The set representation it was requested on.
        set: &'static str,
        /// Why the closed-form algorithm does not apply.
        reason: &'static str,
    },

    /// Degenerate input at construction (zero direction vector for a line,
    /// zero normal for a half-space). No partially-valid object is produced.
    #[error("invalid construction of {set}: {reason}")]
    InvalidConstruction {
        /// The set type being constructed.
        set: &'static str,
        /// What made the input degenerate.
        reason: &'static str,
    },
}

impl SetError {
    /// Shorthand for a [`SetError::DimensionMismatch`].
    pub fn dim_mismatch(context: &'static str, expected: usize, found: usize) -> Self {
        Self::DimensionMismatch {
            context,
            expected,
            found,
        }
    }

    /// Shorthand for a [`SetError::UnboundedDirection`].
    pub fn unbounded(set: &'static str) -> Self {
        Self::UnboundedDirection { set }
    }

    /// Shorthand for a [`SetError::UnsupportedOperation`].
    pub fn unsupported(operation: &'static str, set: &'static str, reason: &'static str) -> Self {
        Self::UnsupportedOperation {
            operation,
            set,
            reason,
        }
    }

    /// Shorthand for a [`SetError::InvalidConstruction`].
    pub fn invalid(set: &'static str, reason: &'static str) -> Self {
        Self::InvalidConstruction { set, reason }
    }
}

/// Check that two dimensions agree, or produce a [`SetError::DimensionMismatch`].
pub fn check_dim(context: &'static str, expected: usize, found: usize) -> SetResult<()> {
    if expected == found {
        Ok(())
    } else {
        Err(SetError::dim_mismatch(context, expected, found))
    }
}
