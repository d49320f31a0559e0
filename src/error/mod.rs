//! Error handling for the codealgebra library.
//!
//! This module defines the error types used throughout the crate. Every
//! variant belongs to one of the categories reported by [`Error::category`]:
//! caller mistakes in the parameters, violated preconditions of an algebraic
//! operator, or a failed internal consistency check.

use thiserror::Error;

/// Result type used throughout the codealgebra crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Malformed construction parameters. Surfaced to the caller, never retried.
    InvalidParameter,
    /// Field, length, dimension or containment mismatch in an operator.
    ConstructionPrecondition,
    /// A construction invariant failed to hold; indicates an engine bug.
    InternalConsistency,
    /// Configuration loading and other environment failures.
    Environment,
}

/// Error enum for the codealgebra crate.
#[derive(Error, Debug)]
pub enum Error {
    /// Field order is not a prime power
    #[error("Invalid field: order {0} is not a prime power")]
    InvalidField(usize),

    /// Code length or field order out of range
    #[error("Invalid length: {0}")]
    InvalidLength(String),

    /// Requested design distance out of range
    #[error("Invalid distance: {0}")]
    InvalidDistance(String),

    /// Any other malformed parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error during Galois field operations
    #[error("Galois field error: {0}")]
    GaloisField(String),

    /// Matrix or vector shapes do not agree
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected size
        expected: usize,
        /// Actual size
        actual: usize,
    },

    /// Operands live over different fields
    #[error("Field mismatch: GF({left}) vs GF({right})")]
    FieldMismatch {
        /// Order of the left operand's field
        left: usize,
        /// Order of the right operand's field
        right: usize,
    },

    /// The all-zero matrix does not define a code
    #[error("The zero matrix does not define a code")]
    ZeroMatrix,

    /// Precondition of a code-algebra operator violated
    #[error("Construction precondition violated: {0}")]
    ConstructionPrecondition(String),

    /// Post-construction verification failed
    #[error("Internal consistency check failed: {0}")]
    InternalConsistency(String),

    /// A distance bound update would contradict the current bounds
    #[error("Bound violation: {value} is outside [{lower}, {upper}]")]
    BoundViolation {
        /// Current lower bound
        lower: usize,
        /// Current upper bound
        upper: usize,
        /// Rejected value
        value: usize,
    },

    /// An exact integer result does not fit the integer type holding it
    #[error("Arithmetic overflow: {0}")]
    Overflow(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error during serialization/deserialization
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Returns the category this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::InvalidField(_)
            | Error::InvalidLength(_)
            | Error::InvalidDistance(_)
            | Error::InvalidParameter(_)
            | Error::GaloisField(_)
            | Error::ZeroMatrix
            | Error::Overflow(_)
            | Error::BoundViolation { .. } => ErrorCategory::InvalidParameter,
            Error::DimensionMismatch { .. }
            | Error::FieldMismatch { .. }
            | Error::ConstructionPrecondition(_) => ErrorCategory::ConstructionPrecondition,
            Error::InternalConsistency(_) => ErrorCategory::InternalConsistency,
            Error::InvalidConfiguration(_) | Error::Io(_) | Error::Serialization(_) => {
                ErrorCategory::Environment
            }
        }
    }

    /// Returns true if this error signals an engine bug rather than a caller mistake.
    pub fn is_internal(&self) -> bool {
        self.category() == ErrorCategory::InternalConsistency
    }

    pub(crate) fn precondition(message: impl Into<String>) -> Self {
        Error::ConstructionPrecondition(message.into())
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Error::InternalConsistency(message.into())
    }
}
