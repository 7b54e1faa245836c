// SPDX-License-Identifier: MIT
// Copyright 2026 Tyler Zervas

//! Tensor descriptors: the shape and layout carrier for compiled partitions.
//!
//! A [`TensorDescriptor`] describes one tensor value flowing through a
//! compiled subgraph. It can be built from either side of the bridge:
//!
//! - from a compiler IR value ([`TensorDescriptor::from_value`]), before any
//!   data exists, possibly with unknown rank or extents;
//! - from a backend [`LogicalTensor`] ([`TensorDescriptor::from_logical_tensor`]),
//!   after compilation, fully concrete.
//!
//! ## Layout States
//!
//! The layout is a sum type, [`LayoutState`], so strides and the opaque
//! layout id can never both be present:
//!
//! | State | Carries | `strides()` |
//! |---|---|---|
//! | `Strided` | strides | `Ok` |
//! | `Opaque` | layout id | `ContractViolation` |
//! | `Any` | nothing | `ContractViolation` |
//!
//! Rank-unknown (empty `sizes`) is orthogonal to the layout state and takes
//! precedence over it wherever shape matters.
//!
//! ## Equality
//!
//! Two descriptors are equal when id, sizes, element type and layout kind
//! match, plus the layout id for opaque layouts or the strides for strided
//! ones. Constness and in-place annotations are not compared. The hash
//! covers id, sizes, element type, layout kind and layout id, never strides.

use crate::dtype::{ensure_backend_dtype, DTypeExt, DEFAULT_SYMBOLIC_DTYPE};
use crate::error::{BridgeError, Result};
use crate::graph::{LayoutKind, LogicalTensor, PropertyKind, UNKNOWN_DIM};
use crate::llga::LlgaTensor;
use crate::traits::SymbolicValue;
use candle_core::{DType, Tensor};
use std::hash::{Hash, Hasher};

/// How a descriptor's memory arrangement is determined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutState {
    /// Explicit per-dimension strides.
    Strided(Vec<i64>),
    /// Backend-chosen arrangement, named by its layout id.
    Opaque(u64),
    /// Left for the backend to decide during compilation.
    Any,
}

impl LayoutState {
    /// The backend layout kind of this state.
    #[must_use]
    pub fn kind(&self) -> LayoutKind {
        match self {
            Self::Strided(_) => LayoutKind::Strided,
            Self::Opaque(_) => LayoutKind::Opaque,
            Self::Any => LayoutKind::Any,
        }
    }
}

/// Identity, shape, element type and layout of one tensor value.
///
/// Descriptors are values: every modifier returns a new descriptor.
///
/// # Example
///
/// ```rust
/// use llga_bridge::{PropertyKind, TensorDescriptor};
/// use candle_core::DType;
///
/// let desc = TensorDescriptor::new(5, vec![4, 8], vec![8, 1], DType::F32, PropertyKind::Variable);
/// assert_eq!(desc.storage_size()?, 128);
///
/// let lt = desc.logical_tensor();
/// assert_eq!(lt.dims(), Some(&[4, 8][..]));
/// assert_eq!(lt.strides(), Some(&[8, 1][..]));
/// # Ok::<(), llga_bridge::BridgeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TensorDescriptor {
    id: u64,
    sizes: Vec<i64>,
    dtype: DType,
    property: PropertyKind,
    layout: LayoutState,
    // Set on outputs once the compiled partition is known to write into an
    // input's storage; the index selects that input.
    compute_inplace: bool,
    input_tensor_index: Option<usize>,
}

impl TensorDescriptor {
    /// A strided descriptor from explicit metadata.
    #[must_use]
    pub fn new(
        id: u64,
        sizes: Vec<i64>,
        strides: Vec<i64>,
        dtype: DType,
        property: PropertyKind,
    ) -> Self {
        Self {
            id,
            sizes,
            dtype,
            property,
            layout: LayoutState::Strided(strides),
            compute_inplace: false,
            input_tensor_index: None,
        }
    }

    /// Describe a compiler IR value before execution.
    ///
    /// Sizes and strides are copied per dimension from the value's static
    /// type, `UNKNOWN_DIM` standing in for unresolved dimensions. A value
    /// without shape information gets empty sizes (unknown rank).
    ///
    /// The element type is always [`DEFAULT_SYMBOLIC_DTYPE`]: the compiler
    /// cannot be relied on to know it yet. Refine it with
    /// [`with_dtype`](Self::with_dtype) or
    /// [`supplement_tensor_info`](Self::supplement_tensor_info).
    #[must_use]
    pub fn from_value<V: SymbolicValue + ?Sized>(value: &V) -> Self {
        let property = if value.is_constant() {
            PropertyKind::Constant
        } else {
            PropertyKind::Variable
        };

        let (sizes, strides) = value.tensor_type().map_or_else(
            || (Vec::new(), Vec::new()),
            |ty| (or_unknown(ty.sizes.as_deref()), or_unknown(ty.strides.as_deref())),
        );

        Self::new(
            value.unique_id(),
            sizes,
            strides,
            DEFAULT_SYMBOLIC_DTYPE,
            property,
        )
    }

    /// Describe a backend logical tensor.
    ///
    /// # Errors
    ///
    /// Returns `ContractViolation` for an opaque logical tensor that carries
    /// no layout id, which only happens when its rank is unknown.
    pub fn from_logical_tensor(lt: &LogicalTensor) -> Result<Self> {
        let layout = match lt.layout_kind() {
            LayoutKind::Opaque => LayoutState::Opaque(lt.layout_id().ok_or_else(|| {
                BridgeError::contract(format!(
                    "opaque logical tensor {} has no layout id",
                    lt.id()
                ))
            })?),
            LayoutKind::Any => LayoutState::Any,
            LayoutKind::Strided => {
                LayoutState::Strided(lt.strides().map(<[i64]>::to_vec).unwrap_or_default())
            }
        };

        Ok(Self {
            id: lt.id(),
            sizes: lt.dims().map(<[i64]>::to_vec).unwrap_or_default(),
            dtype: lt.dtype(),
            property: lt.property(),
            layout,
            compute_inplace: false,
            input_tensor_index: None,
        })
    }

    /// Specialize this descriptor with a concrete host tensor.
    ///
    /// Keeps the id and constness; takes sizes, strides and element type
    /// from `tensor`. Host tensors always have explicit strides, so the
    /// result is strided.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedDType` if the backend cannot carry the tensor's
    /// element type.
    pub fn supplement_tensor_info(&self, tensor: &Tensor) -> Result<Self> {
        let dtype = ensure_backend_dtype(tensor.dtype())?;
        Ok(Self::new(
            self.id,
            to_i64(tensor.dims())?,
            to_i64(tensor.stride())?,
            dtype,
            self.property,
        ))
    }

    /// Specialize this descriptor with a tensor produced by an upstream
    /// partition.
    ///
    /// The upstream descriptor is authoritative for shape and layout
    /// (including an opaque one); only the id is rebound to this value.
    #[must_use]
    pub fn supplement_from_llga(&self, tensor: &LlgaTensor) -> Self {
        tensor.desc().with_id(self.id)
    }

    /// Identity of the value within its subgraph.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Extents; empty when the rank is unknown.
    #[must_use]
    pub fn sizes(&self) -> &[i64] {
        &self.sizes
    }

    /// Element type.
    #[must_use]
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Compile-time constness.
    #[must_use]
    pub fn property(&self) -> PropertyKind {
        self.property
    }

    /// Layout state.
    #[must_use]
    pub fn layout(&self) -> &LayoutState {
        &self.layout
    }

    /// Layout kind.
    #[must_use]
    pub fn layout_kind(&self) -> LayoutKind {
        self.layout.kind()
    }

    /// Backend layout id, present only for opaque layouts.
    #[must_use]
    pub fn layout_id(&self) -> Option<u64> {
        match self.layout {
            LayoutState::Opaque(id) => Some(id),
            _ => None,
        }
    }

    /// Per-dimension strides.
    ///
    /// # Errors
    ///
    /// Returns `ContractViolation` unless the layout is strided.
    pub fn strides(&self) -> Result<&[i64]> {
        match &self.layout {
            LayoutState::Strided(strides) => Ok(strides),
            LayoutState::Opaque(id) => Err(BridgeError::contract(format!(
                "cannot read strides of tensor {} with opaque layout {id}",
                self.id
            ))),
            LayoutState::Any => Err(BridgeError::contract(format!(
                "cannot read strides of tensor {} before its layout is decided",
                self.id
            ))),
        }
    }

    /// Whether the rank itself is unknown.
    ///
    /// Sizes containing `UNKNOWN_DIM` still have a known rank.
    #[must_use]
    pub fn is_rank_unknown(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Whether the layout is strided.
    #[must_use]
    pub fn is_strided(&self) -> bool {
        matches!(self.layout, LayoutState::Strided(_))
    }

    /// Whether the layout is opaque.
    #[must_use]
    pub fn is_opaque(&self) -> bool {
        matches!(self.layout, LayoutState::Opaque(_))
    }

    /// Whether the layout is left to the backend.
    #[must_use]
    pub fn is_any(&self) -> bool {
        matches!(self.layout, LayoutState::Any)
    }

    /// Copy with a different id.
    #[must_use]
    pub fn with_id(&self, id: u64) -> Self {
        Self { id, ..self.clone() }
    }

    /// Copy with a different element type.
    #[must_use]
    pub fn with_dtype(&self, dtype: DType) -> Self {
        Self {
            dtype,
            ..self.clone()
        }
    }

    /// Copy with a different layout state.
    #[must_use]
    pub fn with_layout(&self, layout: LayoutState) -> Self {
        Self {
            layout,
            ..self.clone()
        }
    }

    /// Copy whose layout is left for the backend to choose.
    #[must_use]
    pub fn to_any_layout(&self) -> Self {
        self.with_layout(LayoutState::Any)
    }

    /// The backend logical tensor for this descriptor.
    ///
    /// Unknown rank wins over the layout state: without a shape, neither
    /// strides nor a layout id mean anything.
    #[must_use]
    pub fn logical_tensor(&self) -> LogicalTensor {
        if self.is_rank_unknown() {
            return LogicalTensor::with_unknown_rank(
                self.id,
                self.dtype,
                self.layout_kind(),
                self.property,
            );
        }
        match &self.layout {
            LayoutState::Opaque(layout_id) => LogicalTensor::with_layout_id(
                self.id,
                self.dtype,
                self.sizes.clone(),
                *layout_id,
                self.property,
            ),
            LayoutState::Any => LogicalTensor::with_layout_kind(
                self.id,
                self.dtype,
                self.sizes.clone(),
                LayoutKind::Any,
                self.property,
            ),
            LayoutState::Strided(strides) => LogicalTensor::with_strides(
                self.id,
                self.dtype,
                self.sizes.clone(),
                strides.clone(),
                self.property,
            ),
        }
    }

    /// Bytes of storage a tensor with this descriptor occupies.
    ///
    /// # Errors
    ///
    /// Returns `ContractViolation` if the rank or any extent is unknown.
    pub fn storage_size(&self) -> Result<usize> {
        if self.is_rank_unknown() {
            return Err(BridgeError::contract(format!(
                "storage size of tensor {} is undefined: rank is unknown",
                self.id
            )));
        }
        self.logical_tensor().mem_size()
    }

    /// Mark this output as computed in place over one of the inputs.
    #[must_use]
    pub fn mark_compute_inplace(mut self) -> Self {
        self.compute_inplace = true;
        self
    }

    /// Record which input slot an in-place output aliases.
    #[must_use]
    pub fn set_aliased_input_index(mut self, index: usize) -> Self {
        self.input_tensor_index = Some(index);
        self
    }

    /// Whether this output reuses an input tensor's storage.
    #[must_use]
    pub fn reuses_input_tensor(&self) -> bool {
        self.compute_inplace
    }

    /// Input slot whose storage this output reuses.
    ///
    /// `None` unless [`reuses_input_tensor`](Self::reuses_input_tensor).
    #[must_use]
    pub fn aliased_input_index(&self) -> Option<usize> {
        if self.compute_inplace {
            self.input_tensor_index
        } else {
            None
        }
    }
}

impl PartialEq for TensorDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.sizes == other.sizes
            && self.dtype == other.dtype
            && self.layout == other.layout
    }
}

impl Eq for TensorDescriptor {}

impl Hash for TensorDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.sizes.hash(state);
        self.dtype.code().hash(state);
        self.layout_kind().hash(state);
        self.layout_id().hash(state);
    }
}

impl TryFrom<&LogicalTensor> for TensorDescriptor {
    type Error = BridgeError;

    fn try_from(lt: &LogicalTensor) -> Result<Self> {
        Self::from_logical_tensor(lt)
    }
}

fn or_unknown(dims: Option<&[Option<i64>]>) -> Vec<i64> {
    dims.map(|dims| dims.iter().map(|d| d.unwrap_or(UNKNOWN_DIM)).collect())
        .unwrap_or_default()
}

pub(crate) fn to_i64(values: &[usize]) -> Result<Vec<i64>> {
    values
        .iter()
        .map(|&v| {
            i64::try_from(v)
                .map_err(|_| BridgeError::contract(format!("extent {v} does not fit in i64")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::TensorType;
    use candle_core::Device;
    use std::collections::hash_map::DefaultHasher;

    struct Value {
        id: u64,
        ty: Option<TensorType>,
        constant: bool,
    }

    impl SymbolicValue for Value {
        fn unique_id(&self) -> u64 {
            self.id
        }

        fn tensor_type(&self) -> Option<&TensorType> {
            self.ty.as_ref()
        }

        fn is_constant(&self) -> bool {
            self.constant
        }
    }

    fn hash_of(desc: &TensorDescriptor) -> u64 {
        let mut hasher = DefaultHasher::new();
        desc.hash(&mut hasher);
        hasher.finish()
    }

    fn strided_4x8() -> TensorDescriptor {
        TensorDescriptor::new(5, vec![4, 8], vec![8, 1], DType::F32, PropertyKind::Variable)
    }

    #[test]
    fn test_strided_scenario() {
        let desc = strided_4x8();
        let lt = desc.logical_tensor();
        assert_eq!(lt.id(), 5);
        assert_eq!(lt.dims(), Some(&[4, 8][..]));
        assert_eq!(lt.strides(), Some(&[8, 1][..]));
        assert_eq!(lt.layout_kind(), LayoutKind::Strided);
        assert_eq!(desc.storage_size().unwrap(), 128);
    }

    #[test]
    fn test_from_value_fully_known() {
        let value = Value {
            id: 11,
            ty: Some(TensorType::contiguous(&[2, 3])),
            constant: false,
        };
        let desc = TensorDescriptor::from_value(&value);
        assert_eq!(desc.id(), 11);
        assert_eq!(desc.sizes(), &[2, 3]);
        assert_eq!(desc.strides().unwrap(), &[3, 1]);
        assert_eq!(desc.dtype(), DType::F32);
        assert_eq!(desc.property(), PropertyKind::Variable);
    }

    #[test]
    fn test_from_value_partially_known() {
        let value = Value {
            id: 12,
            ty: Some(
                TensorType::unshaped()
                    .with_sizes(vec![Some(4), None])
                    .with_strides(vec![None, Some(1)]),
            ),
            constant: true,
        };
        let desc = TensorDescriptor::from_value(&value);
        assert_eq!(desc.sizes(), &[4, UNKNOWN_DIM]);
        assert_eq!(desc.strides().unwrap(), &[UNKNOWN_DIM, 1]);
        assert_eq!(desc.property(), PropertyKind::Constant);
        assert!(!desc.is_rank_unknown());
        assert!(desc.storage_size().unwrap_err().is_contract_violation());
    }

    #[test]
    fn test_from_value_without_shape() {
        let value = Value {
            id: 13,
            ty: Some(TensorType::unshaped()),
            constant: false,
        };
        let desc = TensorDescriptor::from_value(&value);
        assert!(desc.is_rank_unknown());
        assert!(desc.strides().unwrap().is_empty());

        let scalar = Value {
            id: 14,
            ty: None,
            constant: true,
        };
        assert!(TensorDescriptor::from_value(&scalar).is_rank_unknown());
    }

    #[test]
    fn test_rank_unknown() {
        let desc = TensorDescriptor::new(1, vec![], vec![], DType::F32, PropertyKind::Variable);
        assert!(desc.storage_size().unwrap_err().is_contract_violation());

        let lt = desc.logical_tensor();
        assert_eq!(lt.ndims(), None);
        assert_eq!(lt.layout_kind(), LayoutKind::Strided);

        // Unknown rank beats an opaque layout.
        let lt = desc.with_layout(LayoutState::Opaque(3)).logical_tensor();
        assert_eq!(lt.ndims(), None);
        assert_eq!(lt.layout_id(), None);
    }

    #[test]
    fn test_opaque_strides_are_unreadable() {
        let desc = strided_4x8().with_layout(LayoutState::Opaque(7));
        assert!(desc.is_opaque());
        assert_eq!(desc.layout_id(), Some(7));
        assert!(desc.strides().unwrap_err().is_contract_violation());

        let lt = desc.logical_tensor();
        assert_eq!(lt.layout_id(), Some(7));
        assert_eq!(lt.strides(), None);
    }

    #[test]
    fn test_any_layout() {
        let desc = strided_4x8().to_any_layout();
        assert!(desc.is_any());
        assert_eq!(desc.layout_id(), None);
        assert!(desc.strides().unwrap_err().is_contract_violation());
        assert_eq!(desc.logical_tensor().layout_kind(), LayoutKind::Any);
        assert_eq!(desc.storage_size().unwrap(), 128);
    }

    #[test]
    fn test_strided_round_trip() {
        let lt = LogicalTensor::with_strides(
            9,
            DType::BF16,
            vec![2, 3, 4],
            vec![12, 4, 1],
            PropertyKind::Constant,
        );
        let desc = TensorDescriptor::from_logical_tensor(&lt).unwrap();
        assert_eq!(desc.logical_tensor(), lt);
    }

    #[test]
    fn test_opaque_from_logical_tensor() {
        let lt = LogicalTensor::with_layout_id(
            4,
            DType::F32,
            vec![8, 8],
            7,
            PropertyKind::Variable,
        );
        let desc = TensorDescriptor::try_from(&lt).unwrap();
        assert_eq!(desc.layout(), &LayoutState::Opaque(7));

        // Built through a strided descriptor whose stale strides differ.
        let expected =
            TensorDescriptor::new(4, vec![8, 8], vec![99], DType::F32, PropertyKind::Variable)
                .with_layout(LayoutState::Opaque(7));
        assert_eq!(desc, expected);

        let other_shape = strided_4x8()
            .with_id(4)
            .with_layout(LayoutState::Opaque(7));
        assert_ne!(desc, other_shape);
    }

    #[test]
    fn test_opaque_without_layout_id_is_rejected() {
        let lt = LogicalTensor::with_unknown_rank(
            4,
            DType::F32,
            LayoutKind::Opaque,
            PropertyKind::Variable,
        );
        let err = TensorDescriptor::from_logical_tensor(&lt).unwrap_err();
        assert!(err.is_contract_violation());
    }

    #[test]
    fn test_equality_rules() {
        let a = strided_4x8();
        assert_eq!(a, a.clone());
        assert_ne!(a, a.with_id(6));
        assert_ne!(a, a.with_dtype(DType::BF16));
        assert_ne!(a, a.with_layout(LayoutState::Strided(vec![1, 4])));
        assert_ne!(a, a.to_any_layout());
        assert_ne!(
            a.with_layout(LayoutState::Opaque(1)),
            a.with_layout(LayoutState::Opaque(2))
        );

        // Constness and in-place annotations do not take part.
        let b = TensorDescriptor::new(5, vec![4, 8], vec![8, 1], DType::F32, PropertyKind::Constant)
            .mark_compute_inplace()
            .set_aliased_input_index(0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_equal_implies_equal_hash() {
        let base = strided_4x8();
        let variants = vec![
            base.clone(),
            base.with_id(6),
            base.with_dtype(DType::F16),
            base.with_layout(LayoutState::Strided(vec![1, 4])),
            base.with_layout(LayoutState::Opaque(7)),
            base.with_layout(LayoutState::Opaque(8)),
            base.to_any_layout(),
            TensorDescriptor::new(5, vec![], vec![], DType::F32, PropertyKind::Variable),
            TensorDescriptor::new(5, vec![4, 8], vec![8, 1], DType::F32, PropertyKind::Constant),
            base.clone().mark_compute_inplace().set_aliased_input_index(1),
        ];
        for a in &variants {
            for b in &variants {
                if a == b {
                    assert_eq!(hash_of(a), hash_of(b), "{a:?} vs {b:?}");
                }
            }
        }
    }

    #[test]
    fn test_hash_ignores_strides() {
        let a = strided_4x8();
        let b = a.with_layout(LayoutState::Strided(vec![1, 4]));
        assert_ne!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_derived_mutators_leave_receiver() {
        let a = strided_4x8();
        let b = a.with_id(42);
        let c = a.with_dtype(DType::BF16);
        let d = a.to_any_layout();

        assert_eq!(a.id(), 5);
        assert_eq!(a.dtype(), DType::F32);
        assert!(a.is_strided());

        assert_eq!(b.id(), 42);
        assert_eq!(b.sizes(), a.sizes());
        assert_eq!(c.dtype(), DType::BF16);
        assert_eq!(c.strides().unwrap(), a.strides().unwrap());
        assert!(d.is_any());
        assert_eq!(d.id(), a.id());
    }

    #[test]
    fn test_inplace_annotations() {
        let desc = strided_4x8();
        assert!(!desc.reuses_input_tensor());
        assert_eq!(desc.aliased_input_index(), None);

        let desc = desc.mark_compute_inplace().set_aliased_input_index(2);
        assert!(desc.reuses_input_tensor());
        assert_eq!(desc.aliased_input_index(), Some(2));

        // The index is hidden until the output is marked in place.
        let unmarked = strided_4x8().set_aliased_input_index(2);
        assert_eq!(unmarked.aliased_input_index(), None);

        // Annotations survive derived copies.
        assert_eq!(desc.with_id(8).aliased_input_index(), Some(2));
    }

    #[test]
    fn test_supplement_tensor_info() {
        let symbolic = TensorDescriptor::new(
            3,
            vec![UNKNOWN_DIM, UNKNOWN_DIM],
            vec![UNKNOWN_DIM, 1],
            DType::F32,
            PropertyKind::Constant,
        )
        .to_any_layout();

        let tensor = Tensor::zeros((3, 5), DType::BF16, &Device::Cpu).unwrap();
        let desc = symbolic.supplement_tensor_info(&tensor).unwrap();
        assert_eq!(desc.id(), 3);
        assert_eq!(desc.property(), PropertyKind::Constant);
        assert_eq!(desc.sizes(), &[3, 5]);
        assert_eq!(desc.strides().unwrap(), &[5, 1]);
        assert_eq!(desc.dtype(), DType::BF16);
        assert_eq!(desc.storage_size().unwrap(), 30);

        let transposed = tensor.t().unwrap();
        let desc = symbolic.supplement_tensor_info(&transposed).unwrap();
        assert_eq!(desc.sizes(), &[5, 3]);
        assert_eq!(desc.strides().unwrap(), &[1, 5]);
    }

    #[test]
    fn test_supplement_rejects_unsupported_dtype() {
        let tensor = Tensor::zeros(4, DType::F64, &Device::Cpu).unwrap();
        let err = strided_4x8().supplement_tensor_info(&tensor).unwrap_err();
        assert!(matches!(err, BridgeError::UnsupportedDType { .. }));
    }

    #[test]
    fn test_rank_unknown_opaque_loses_layout_id() {
        let desc = TensorDescriptor::new(1, vec![], vec![], DType::F32, PropertyKind::Variable)
            .with_layout(LayoutState::Opaque(7));
        assert!(desc.is_rank_unknown());

        let lt = desc.logical_tensor();
        assert_eq!(lt.layout_kind(), LayoutKind::Opaque);
        assert_eq!(lt.layout_id(), None);

        let err = TensorDescriptor::from_logical_tensor(&lt).unwrap_err();
        assert!(err.is_contract_violation());
        assert!(err.to_string().contains("has no layout id"));
    }
}
