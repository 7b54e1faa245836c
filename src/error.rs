// SPDX-License-Identifier: MIT
// Copyright 2026 Tyler Zervas

//! Error types for layout descriptors and tensor interop.
//!
//! ## Error Hierarchy
//!
//! ```text
//! BridgeError
//! ├── ContractViolation      - Operation not valid for the descriptor's layout state
//! ├── UnsupportedConversion  - Host view requested for a layout the host cannot express
//! ├── UnsupportedDType       - Element type the backend cannot represent
//! ├── ShapeMismatch          - Storage or buffer extent disagrees with the descriptor
//! ├── InvalidConfig          - Rejected tensor options
//! └── Candle                 - Underlying Candle errors
//! ```
//!
//! Contract violations are programmer errors. They are returned instead of
//! panicking so the execution step can report them, but callers should never
//! treat one as recoverable.

use crate::dtype::DTypeExt;
use candle_core::DType;
use thiserror::Error;

/// Result type alias for llga-bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Errors raised by descriptors, backend tensors and the LLGA adapter.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BridgeError {
    /// The descriptor's current layout state does not satisfy the
    /// operation's precondition.
    ///
    /// Raised for strides read on an opaque layout, storage size queried on
    /// an unknown rank, and similar misuse.
    #[error("contract violation: {message}")]
    ContractViolation {
        /// Descriptive error message.
        message: String,
    },

    /// A host tensor view was requested for a layout the host cannot express.
    #[error("unsupported conversion: {message}")]
    UnsupportedConversion {
        /// Descriptive error message.
        message: String,
    },

    /// The backend has no representation for this element type.
    #[error("unsupported element type: {}", .dtype.name())]
    UnsupportedDType {
        /// The rejected element type.
        dtype: DType,
    },

    /// Extent mismatch between storage and the shape that reads it.
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        /// Expected extent.
        expected: Vec<usize>,
        /// Actual extent received.
        actual: Vec<usize>,
    },

    /// Invalid configuration parameter.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Underlying Candle error.
    #[error("candle error: {0}")]
    Candle(#[from] candle_core::Error),
}

impl BridgeError {
    /// Create a contract violation error.
    pub fn contract(msg: impl Into<String>) -> Self {
        Self::ContractViolation {
            message: msg.into(),
        }
    }

    /// Create an unsupported conversion error.
    pub fn unsupported_conversion(msg: impl Into<String>) -> Self {
        Self::UnsupportedConversion {
            message: msg.into(),
        }
    }

    /// Create an unsupported element type error.
    #[must_use]
    pub fn unsupported_dtype(dtype: DType) -> Self {
        Self::UnsupportedDType { dtype }
    }

    /// Create a shape mismatch error.
    pub fn shape_mismatch(expected: impl Into<Vec<usize>>, actual: impl Into<Vec<usize>>) -> Self {
        Self::ShapeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Whether this error reports a broken layout-state contract.
    #[must_use]
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::ContractViolation { .. })
    }
}
