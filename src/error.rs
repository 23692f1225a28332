//! Error types for evalkern

use crate::dtype::DType;
use thiserror::Error;

/// Result type alias using evalkern's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in evalkern operations
///
/// Every operation validates its tensor views before any kernel runs, so shape
/// and dtype errors never leave a partially written output behind.
#[derive(Error, Debug)]
pub enum Error {
    /// Shape mismatch in an operation
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Expected shape
        expected: Vec<usize>,
        /// Actual shape
        got: Vec<usize>,
    },

    /// Tensor rank is not usable for an operation
    #[error("Operation '{op}' expects rank {expected}, got rank {got}")]
    RankMismatch {
        /// The operation name
        op: &'static str,
        /// Accepted rank(s), human readable
        expected: &'static str,
        /// Actual rank
        got: usize,
    },

    /// Unsupported dtype for an operation
    #[error("Unsupported dtype {dtype:?} for operation '{op}'")]
    UnsupportedDType {
        /// The unsupported dtype
        dtype: DType,
        /// The operation name
        op: &'static str,
    },

    /// DType mismatch between operands
    #[error("DType mismatch: {lhs:?} vs {rhs:?}")]
    DTypeMismatch {
        /// Left-hand side dtype
        lhs: DType,
        /// Right-hand side dtype
        rhs: DType,
    },

    /// Out of memory
    #[error("Out of memory: failed to allocate {size} bytes")]
    OutOfMemory {
        /// Requested size in bytes
        size: usize,
    },

    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Backend-specific error
    #[error("Backend error: {0}")]
    Backend(String),

    /// CUDA-specific error
    #[cfg(feature = "cuda")]
    #[error("CUDA error: {0}")]
    Cuda(#[from] cudarc::driver::DriverError),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a shape mismatch error
    pub fn shape_mismatch(expected: &[usize], got: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }

    /// Create an unsupported dtype error
    pub fn unsupported_dtype(dtype: DType, op: &'static str) -> Self {
        Self::UnsupportedDType { dtype, op }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let e = Error::shape_mismatch(&[2, 3], &[3, 2]);
        assert_eq!(e.to_string(), "Shape mismatch: expected [2, 3], got [3, 2]");

        let e = Error::unsupported_dtype(DType::F16, "pool_rows_sum");
        assert_eq!(
            e.to_string(),
            "Unsupported dtype F16 for operation 'pool_rows_sum'"
        );

        let e = Error::invalid_argument("axis", "axis 4 out of range for rank 3");
        assert_eq!(
            e.to_string(),
            "Invalid argument 'axis': axis 4 out of range for rank 3"
        );
    }
}
