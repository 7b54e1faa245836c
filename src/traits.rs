// SPDX-License-Identifier: MIT
// Copyright 2026 Tyler Zervas

//! Traits at the seams between this crate and its collaborators.
//!
//! ## Core Traits
//!
//! - [`SymbolicValue`] - A value in the host compiler's IR, as seen before execution
//! - [`ValidatableConfig`] - Configuration validation interface
//!
//! The compiler's IR is not owned by this crate. Anything that can report a
//! unique identity, an optional static tensor type and whether it comes from
//! a constant can be turned into a [`TensorDescriptor`](crate::TensorDescriptor).

use crate::error::Result;

/// Static tensor type attached to a compiler value.
///
/// Each of `sizes` and `strides` is `None` when the compiler knows nothing
/// about it (not even the rank), and otherwise holds one entry per
/// dimension, `None` where that dimension is unresolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TensorType {
    /// Per-dimension extents, when the rank is known.
    pub sizes: Option<Vec<Option<i64>>>,
    /// Per-dimension strides, when the rank is known.
    pub strides: Option<Vec<Option<i64>>>,
}

impl TensorType {
    /// A tensor type with no shape information at all.
    #[must_use]
    pub fn unshaped() -> Self {
        Self::default()
    }

    /// A fully known contiguous tensor type.
    #[must_use]
    pub fn contiguous(sizes: &[i64]) -> Self {
        let mut strides = vec![0i64; sizes.len()];
        let mut acc = 1i64;
        for (stride, &size) in strides.iter_mut().zip(sizes).rev() {
            *stride = acc;
            acc *= size.max(1);
        }
        Self {
            sizes: Some(sizes.iter().copied().map(Some).collect()),
            strides: Some(strides.into_iter().map(Some).collect()),
        }
    }

    /// Set per-dimension extents.
    #[must_use]
    pub fn with_sizes(mut self, sizes: Vec<Option<i64>>) -> Self {
        self.sizes = Some(sizes);
        self
    }

    /// Set per-dimension strides.
    #[must_use]
    pub fn with_strides(mut self, strides: Vec<Option<i64>>) -> Self {
        self.strides = Some(strides);
        self
    }
}

/// A value produced inside the host compiler's IR.
///
/// # Example
///
/// ```rust
/// use llga_bridge::{SymbolicValue, TensorDescriptor, TensorType};
///
/// struct Value {
///     id: u64,
///     ty: Option<TensorType>,
/// }
///
/// impl SymbolicValue for Value {
///     fn unique_id(&self) -> u64 {
///         self.id
///     }
///     fn tensor_type(&self) -> Option<&TensorType> {
///         self.ty.as_ref()
///     }
///     fn is_constant(&self) -> bool {
///         false
///     }
/// }
///
/// let v = Value { id: 3, ty: Some(TensorType::contiguous(&[2, 3])) };
/// let desc = TensorDescriptor::from_value(&v);
/// assert_eq!(desc.sizes(), &[2, 3]);
/// ```
pub trait SymbolicValue {
    /// Identity of the value, unique within its graph.
    fn unique_id(&self) -> u64;

    /// The value's static tensor type, or `None` if it is not a tensor.
    fn tensor_type(&self) -> Option<&TensorType>;

    /// Whether the producing node materializes a compile-time constant.
    fn is_constant(&self) -> bool;
}

/// Configuration validation trait.
///
/// Option structs implement this so that invalid settings are rejected before
/// any storage is allocated.
pub trait ValidatableConfig: Clone + Send + Sync {
    /// Validate the configuration parameters.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::InvalidConfig` if validation fails.
    fn validate(&self) -> Result<()>;
}
