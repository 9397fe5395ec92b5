//! Error and result types for region operations.
//!
//! Every fallible operation on a [`Region`](crate::Region) reports one of the
//! kinds below. None of them are recovered from inside the crate; they are
//! returned to the caller, and validation always happens before the receiver
//! is written to.

use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur in region operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpatialError {
    /// Operands have different dimensions, or a low/high pair is malformed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation is only defined for a different dimensionality.
    #[error("Not supported: {0}")]
    NotSupported(String),

    /// A shape argument is neither a region nor a point.
    #[error("Illegal state: {0}")]
    IllegalState(String),

    #[error("Index {index} out of bounds for dimension {dimension}")]
    IndexOutOfBounds { index: usize, dimension: usize },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SpatialError {
    pub(crate) fn dimension_mismatch(operation: &str, what: &str) -> Self {
        SpatialError::InvalidArgument(format!(
            "Region::{}: {} different number of dimensions.",
            operation, what
        ))
    }

    pub(crate) fn not_implemented(operation: &str) -> Self {
        SpatialError::IllegalState(format!("Region::{}: Not implemented yet!", operation))
    }

    pub(crate) fn dimensions_not_supported(operation: &str) -> Self {
        SpatialError::NotSupported(format!("Region::{}: #dimensions not supported", operation))
    }
}

/// Result type for region operations
pub type SpatialResult<T> = Result<T, SpatialError>;
