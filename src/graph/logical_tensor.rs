// SPDX-License-Identifier: MIT
// Copyright 2026 Tyler Zervas

//! Logical tensors: what the backend compiles against.

use crate::dtype::bytes_per_element;
use crate::error::{BridgeError, Result};
use candle_core::DType;

/// Sentinel extent (or stride) for a dimension whose value is not known.
pub const UNKNOWN_DIM: i64 = -1;

/// How a logical tensor's memory arrangement is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    /// Explicit per-dimension strides.
    Strided,
    /// Backend-chosen arrangement referenced by a layout id.
    Opaque,
    /// Decided by the backend during compilation.
    Any,
}

/// Whether a tensor's contents are fixed at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PropertyKind {
    /// Contents may change between executions.
    #[default]
    Variable,
    /// Contents are fixed at compile time.
    Constant,
}

/// Backend description of a tensor, independent of any storage.
///
/// Mirrors the backend's own structure: the strides are only present for
/// strided layouts and the layout id only for opaque ones. The constructors
/// keep those fields consistent with the layout kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalTensor {
    id: u64,
    dtype: DType,
    dims: Option<Vec<i64>>,
    layout_kind: LayoutKind,
    strides: Option<Vec<i64>>,
    layout_id: Option<u64>,
    property: PropertyKind,
}

impl LogicalTensor {
    /// A logical tensor whose rank is not known.
    #[must_use]
    pub fn with_unknown_rank(
        id: u64,
        dtype: DType,
        layout_kind: LayoutKind,
        property: PropertyKind,
    ) -> Self {
        Self {
            id,
            dtype,
            dims: None,
            layout_kind,
            strides: None,
            layout_id: None,
            property,
        }
    }

    /// A logical tensor with an opaque layout.
    #[must_use]
    pub fn with_layout_id(
        id: u64,
        dtype: DType,
        dims: Vec<i64>,
        layout_id: u64,
        property: PropertyKind,
    ) -> Self {
        Self {
            id,
            dtype,
            dims: Some(dims),
            layout_kind: LayoutKind::Opaque,
            strides: None,
            layout_id: Some(layout_id),
            property,
        }
    }

    /// A logical tensor with a layout kind and no explicit strides.
    ///
    /// `Strided` gets the dense row-major strides for `dims`.
    #[must_use]
    pub fn with_layout_kind(
        id: u64,
        dtype: DType,
        dims: Vec<i64>,
        layout_kind: LayoutKind,
        property: PropertyKind,
    ) -> Self {
        let strides = (layout_kind == LayoutKind::Strided).then(|| contiguous_strides(&dims));
        Self {
            id,
            dtype,
            dims: Some(dims),
            layout_kind,
            strides,
            layout_id: None,
            property,
        }
    }

    /// A strided logical tensor with explicit strides.
    #[must_use]
    pub fn with_strides(
        id: u64,
        dtype: DType,
        dims: Vec<i64>,
        strides: Vec<i64>,
        property: PropertyKind,
    ) -> Self {
        Self {
            id,
            dtype,
            dims: Some(dims),
            layout_kind: LayoutKind::Strided,
            strides: Some(strides),
            layout_id: None,
            property,
        }
    }

    /// Identity of the tensor within its graph.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Element type.
    #[must_use]
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Extents, or `None` when the rank is unknown.
    #[must_use]
    pub fn dims(&self) -> Option<&[i64]> {
        self.dims.as_deref()
    }

    /// Number of dimensions, or `None` when unknown.
    #[must_use]
    pub fn ndims(&self) -> Option<usize> {
        self.dims.as_ref().map(Vec::len)
    }

    /// Strides, present only for strided layouts of known rank.
    #[must_use]
    pub fn strides(&self) -> Option<&[i64]> {
        self.strides.as_deref()
    }

    /// Layout kind.
    #[must_use]
    pub fn layout_kind(&self) -> LayoutKind {
        self.layout_kind
    }

    /// Backend layout id, present only for opaque layouts.
    #[must_use]
    pub fn layout_id(&self) -> Option<u64> {
        self.layout_id
    }

    /// Compile-time constness.
    #[must_use]
    pub fn property(&self) -> PropertyKind {
        self.property
    }

    /// Bytes of storage a tensor with this description occupies.
    ///
    /// Strided layouts span from offset zero to the largest reachable
    /// element; opaque and `Any` layouts are dense.
    ///
    /// # Errors
    ///
    /// Returns `ContractViolation` if the rank, an extent or a stride is
    /// unknown, or if the size does not fit in `usize`.
    pub fn mem_size(&self) -> Result<usize> {
        let dims = self.dims.as_deref().ok_or_else(|| {
            BridgeError::contract(format!(
                "memory size of logical tensor {} is undefined: rank is unknown",
                self.id
            ))
        })?;
        let extents = dims
            .iter()
            .map(|&d| known(d, "extent", self.id))
            .collect::<Result<Vec<usize>>>()?;
        let elem = bytes_per_element(self.dtype);

        if extents.contains(&0) {
            return Ok(0);
        }

        let elements = match (self.layout_kind, self.strides.as_deref()) {
            (LayoutKind::Strided, Some(strides)) => {
                if strides.len() != extents.len() {
                    return Err(BridgeError::contract(format!(
                        "logical tensor {} has {} dims but {} strides",
                        self.id,
                        extents.len(),
                        strides.len()
                    )));
                }
                let mut span = Some(1usize);
                for (&extent, &stride) in extents.iter().zip(strides) {
                    let stride = known(stride, "stride", self.id)?;
                    span = span.and_then(|s| s.checked_add((extent - 1).checked_mul(stride)?));
                }
                span
            }
            _ => extents.iter().try_fold(1usize, |acc, &e| acc.checked_mul(e)),
        };

        elements
            .and_then(|n| n.checked_mul(elem))
            .ok_or_else(|| {
                BridgeError::contract(format!(
                    "memory size of logical tensor {} overflows usize",
                    self.id
                ))
            })
    }
}

/// Dense row-major strides for `dims`.
///
/// Any unknown extent, or a stride past `i64::MAX`, makes every stride to
/// its left unknown.
#[must_use]
pub fn contiguous_strides(dims: &[i64]) -> Vec<i64> {
    let mut strides = vec![UNKNOWN_DIM; dims.len()];
    let mut acc = Some(1i64);
    for (stride, &dim) in strides.iter_mut().zip(dims).rev() {
        if let Some(step) = acc {
            *stride = step;
        }
        acc = match acc {
            Some(step) if dim >= 0 => step.checked_mul(dim.max(1)),
            _ => None,
        };
    }
    strides
}

fn known(value: i64, what: &str, id: u64) -> Result<usize> {
    usize::try_from(value).map_err(|_| {
        BridgeError::contract(format!("logical tensor {id} has an unknown {what} ({value})"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strided_mem_size() {
        let lt = LogicalTensor::with_strides(
            5,
            DType::F32,
            vec![4, 8],
            vec![8, 1],
            PropertyKind::Variable,
        );
        assert_eq!(lt.mem_size().unwrap(), 128);
        assert_eq!(lt.ndims(), Some(2));
        assert_eq!(lt.layout_id(), None);
    }

    #[test]
    fn test_padded_strides_span_storage() {
        // Rows padded from 8 to 10 elements: last row still ends at 8.
        let lt = LogicalTensor::with_strides(
            1,
            DType::F32,
            vec![4, 8],
            vec![10, 1],
            PropertyKind::Variable,
        );
        assert_eq!(lt.mem_size().unwrap(), (3 * 10 + 8) * 4);
    }

    #[test]
    fn test_zero_extent_is_empty() {
        let lt = LogicalTensor::with_strides(
            1,
            DType::F16,
            vec![0, 8],
            vec![8, 1],
            PropertyKind::Constant,
        );
        assert_eq!(lt.mem_size().unwrap(), 0);
    }

    #[test]
    fn test_unknown_rank_has_no_size() {
        let lt = LogicalTensor::with_unknown_rank(
            2,
            DType::F32,
            LayoutKind::Strided,
            PropertyKind::Variable,
        );
        assert_eq!(lt.dims(), None);
        assert_eq!(lt.ndims(), None);
        assert!(lt.mem_size().unwrap_err().is_contract_violation());
    }

    #[test]
    fn test_unknown_extent_has_no_size() {
        let lt = LogicalTensor::with_layout_kind(
            2,
            DType::F32,
            vec![UNKNOWN_DIM, 4],
            LayoutKind::Any,
            PropertyKind::Variable,
        );
        assert!(lt.mem_size().unwrap_err().is_contract_violation());
    }

    #[test]
    fn test_opaque_and_any_are_dense() {
        let opaque =
            LogicalTensor::with_layout_id(3, DType::BF16, vec![2, 3], 7, PropertyKind::Variable);
        assert_eq!(opaque.layout_kind(), LayoutKind::Opaque);
        assert_eq!(opaque.layout_id(), Some(7));
        assert_eq!(opaque.strides(), None);
        assert_eq!(opaque.mem_size().unwrap(), 12);

        let any = LogicalTensor::with_layout_kind(
            4,
            DType::F32,
            vec![2, 3],
            LayoutKind::Any,
            PropertyKind::Variable,
        );
        assert_eq!(any.strides(), None);
        assert_eq!(any.mem_size().unwrap(), 24);
    }

    #[test]
    fn test_strided_kind_gets_dense_strides() {
        let lt = LogicalTensor::with_layout_kind(
            1,
            DType::F32,
            vec![2, 3, 4],
            LayoutKind::Strided,
            PropertyKind::Variable,
        );
        assert_eq!(lt.strides(), Some(&[12, 4, 1][..]));
    }

    #[test]
    fn test_contiguous_strides_with_unknown_dim() {
        assert_eq!(contiguous_strides(&[2, 3, 4]), vec![12, 4, 1]);
        assert_eq!(
            contiguous_strides(&[2, UNKNOWN_DIM, 4]),
            vec![UNKNOWN_DIM, 4, 1]
        );
        assert!(contiguous_strides(&[]).is_empty());
    }

    #[test]
    fn test_mem_size_overflow_is_contract_violation() {
        let huge_stride = LogicalTensor::with_strides(
            1,
            DType::F32,
            vec![3, 2],
            vec![i64::MAX, 1],
            PropertyKind::Variable,
        );
        assert!(huge_stride.mem_size().unwrap_err().is_contract_violation());

        let huge_dense = LogicalTensor::with_layout_id(
            2,
            DType::F32,
            vec![1 << 40, 1 << 40],
            3,
            PropertyKind::Variable,
        );
        assert!(huge_dense.mem_size().unwrap_err().is_contract_violation());

        // The element count fits, the byte count does not.
        let huge_bytes = LogicalTensor::with_layout_kind(
            3,
            DType::F32,
            vec![1 << 62],
            LayoutKind::Any,
            PropertyKind::Variable,
        );
        assert!(huge_bytes.mem_size().unwrap_err().is_contract_violation());
    }

    #[test]
    fn test_contiguous_strides_overflow_is_unknown() {
        let strides = contiguous_strides(&[1 << 40, 1 << 40, 1 << 40]);
        assert_eq!(strides, vec![UNKNOWN_DIM, 1 << 40, 1]);

        let lt = LogicalTensor::with_layout_kind(
            4,
            DType::U8,
            vec![1 << 40, 1 << 40, 1 << 40],
            LayoutKind::Strided,
            PropertyKind::Variable,
        );
        assert!(lt.mem_size().unwrap_err().is_contract_violation());
    }
}
