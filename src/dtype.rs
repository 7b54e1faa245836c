// SPDX-License-Identifier: MIT
// Copyright 2026 Tyler Zervas

//! Element type utilities shared by descriptors and the backend.
//!
//! ## Design Decisions
//!
//! - **Candle's `DType` is the element type everywhere**: descriptors, logical
//!   tensors and host tensors all speak `candle_core::DType`, so there is no
//!   second enum to keep in sync.
//!
//! - **Explicit support check**: the backend only handles a subset of Candle's
//!   types. Every boundary that accepts a host dtype goes through
//!   [`ensure_backend_dtype`] instead of silently casting.

use crate::error::{BridgeError, Result};
use candle_core::DType;

/// Element type assigned to descriptors built from compiler IR values.
///
/// The compiler does not always know a value's element type when the
/// descriptor is created, so every symbolic descriptor starts as `f32`.
pub const DEFAULT_SYMBOLIC_DTYPE: DType = DType::F32;

/// Get the size in bytes for a single element of the given dtype.
///
/// ## Example
///
/// ```rust
/// use llga_bridge::bytes_per_element;
/// use candle_core::DType;
///
/// assert_eq!(bytes_per_element(DType::F32), 4);
/// assert_eq!(bytes_per_element(DType::BF16), 2);
/// ```
#[must_use]
pub fn bytes_per_element(dtype: DType) -> usize {
    dtype.size_in_bytes()
}

/// Check that the backend can represent `dtype`.
///
/// # Errors
///
/// Returns [`BridgeError::UnsupportedDType`] for types outside
/// [`DTypeExt::is_backend_supported`].
pub fn ensure_backend_dtype(dtype: DType) -> Result<DType> {
    if dtype.is_backend_supported() {
        Ok(dtype)
    } else {
        Err(BridgeError::unsupported_dtype(dtype))
    }
}

/// Extension trait adding backend-related methods to `candle_core::DType`.
///
/// ## Example
///
/// ```rust
/// use llga_bridge::DTypeExt;
/// use candle_core::DType;
///
/// assert!(DType::BF16.is_backend_supported());
/// assert_eq!(DType::F16.name(), "f16");
/// ```
pub trait DTypeExt {
    /// Check if the backend graph can carry tensors of this dtype.
    fn is_backend_supported(&self) -> bool;

    /// Get a human-readable name for this dtype.
    fn name(&self) -> &'static str;

    /// Stable numeric tag, used when hashing descriptors.
    fn code(&self) -> u8;
}

impl DTypeExt for DType {
    fn is_backend_supported(&self) -> bool {
        matches!(self, DType::F32 | DType::F16 | DType::BF16 | DType::U8)
    }

    #[allow(unreachable_patterns)] // newer Candle releases add exotic float formats
    fn name(&self) -> &'static str {
        match self {
            DType::U8 => "u8",
            DType::U32 => "u32",
            DType::I64 => "i64",
            DType::BF16 => "bf16",
            DType::F16 => "f16",
            DType::F32 => "f32",
            DType::F64 => "f64",
            _ => "exotic",
        }
    }

    #[allow(unreachable_patterns)]
    fn code(&self) -> u8 {
        match self {
            DType::U8 => 1,
            DType::U32 => 2,
            DType::I64 => 3,
            DType::BF16 => 4,
            DType::F16 => 5,
            DType::F32 => 6,
            DType::F64 => 7,
            _ => 0,
        }
    }
}
