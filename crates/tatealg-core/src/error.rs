//! Error types for Gröbner-basis computations over Tate algebras
//!
//! This module defines the error conditions the engine can surface to callers:
//! unknown algorithm names, invalid precision requests, precision exhaustion
//! during reduction, and cooperative cancellation.

use std::fmt;

/// Error type for the ideal-theoretic engine
///
/// Arithmetic anomalies (division by a zero term, non-divisible term
/// quotients) are contract violations between engine components and are
/// handled with debug assertions, not with this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TateError {
    /// The requested Gröbner-basis algorithm is unknown or unsupported
    ///
    /// # Examples
    ///
    /// - algorithm = "F4"
    /// - algorithm = "F5" over the ring of integers of the algebra
    NotImplementedAlgorithm {
        algorithm: String,
    },

    /// The requested precision is not a positive integer
    InvalidPrecision {
        requested: i64,
    },

    /// Every term of an intermediate result fell above the working
    /// precision before a non-zero value could be certified
    PrecisionExhausted {
        operation: String,
    },

    /// The computation was aborted through its cancellation token
    Cancelled,
}

impl fmt::Display for TateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TateError::NotImplementedAlgorithm { algorithm } => {
                write!(f, "Gröbner basis algorithm not implemented: {}", algorithm)
            }
            TateError::InvalidPrecision { requested } => {
                write!(f, "Precision must be a positive integer, got {}", requested)
            }
            TateError::PrecisionExhausted { operation } => {
                write!(f, "Precision exhausted in {}", operation)
            }
            TateError::Cancelled => {
                write!(f, "Computation cancelled")
            }
        }
    }
}

impl std::error::Error for TateError {}

/// Type alias for engine operations that can fail
pub type TateResult<T> = Result<T, TateError>;
