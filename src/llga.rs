// SPDX-License-Identifier: MIT
// Copyright 2026 Tyler Zervas

//! LLGA tensors and host ↔ backend tensor conversion.
//!
//! A compiled partition may produce outputs whose layout the host cannot
//! describe: an opaque blocked layout, or strides that differ from what the
//! host would compute for the same shape. Such outputs travel as
//! [`LlgaTensor`]s. Their shape and layout live only in the wrapped
//! [`TensorDescriptor`]; the type offers no dims, strides,
//! contiguity or device queries, so every caller has to go through
//! [`LlgaTensor::desc`].
//!
//! ## Key Functions
//!
//! - [`empty_llga`] - Allocate storage for a descriptor
//! - [`llga_to_host_tensor`] - Read an LLGA tensor as a Candle tensor
//! - [`graph_tensor_from_host`] - Bind a Candle tensor's data to the backend
//!
//! ## Memory Management
//!
//! Candle tensors cannot alias foreign memory, so crossing into Candle copies
//! bytes. Crossing back into the backend from an [`LlgaTensor`] does not:
//! [`LlgaTensor::to_graph_tensor`] shares the storage block.

use crate::context::engine;
use crate::descriptor::{to_i64, LayoutState, TensorDescriptor};
use crate::dtype::{bytes_per_element, ensure_backend_dtype, DTypeExt};
use crate::error::{BridgeError, Result};
use crate::graph::{contiguous_strides, GraphTensor, LogicalTensor, PropertyKind, Storage};
use crate::logging::log_storage_allocation;
use crate::traits::ValidatableConfig;
use candle_core::{DType, Device, Tensor};

/// Element type and device for freshly allocated LLGA tensors.
#[derive(Debug, Clone)]
pub struct TensorOptions {
    /// Element type tag of the allocation.
    pub dtype: DType,
    /// Device that host views of the tensor are created on.
    pub device: Device,
}

impl Default for TensorOptions {
    fn default() -> Self {
        Self {
            dtype: DType::F32,
            device: Device::Cpu,
        }
    }
}

impl TensorOptions {
    /// Create options with defaults (`f32` on CPU).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the element type.
    #[must_use]
    pub fn with_dtype(mut self, dtype: DType) -> Self {
        self.dtype = dtype;
        self
    }

    /// Set the device for host views.
    #[must_use]
    pub fn with_device(mut self, device: Device) -> Self {
        self.device = device;
        self
    }
}

impl ValidatableConfig for TensorOptions {
    fn validate(&self) -> Result<()> {
        ensure_backend_dtype(self.dtype).map_err(|_| {
            BridgeError::invalid_config(format!(
                "element type {} cannot back an LLGA tensor",
                self.dtype.name()
            ))
        })?;
        Ok(())
    }
}

/// A tensor whose metadata is owned by a [`TensorDescriptor`].
///
/// There is intentionally no way to ask an `LlgaTensor` for its shape,
/// strides, rank, contiguity or device: read [`desc`](Self::desc).
#[derive(Debug, Clone)]
pub struct LlgaTensor {
    storage: Storage,
    dtype: DType,
    device: Device,
    desc: TensorDescriptor,
}

impl LlgaTensor {
    /// Wrap `storage` with an element type tag, view device and descriptor.
    #[must_use]
    pub fn new(storage: Storage, dtype: DType, device: Device, desc: TensorDescriptor) -> Self {
        Self {
            storage,
            dtype,
            device,
            desc,
        }
    }

    /// The descriptor that defines this tensor's shape and layout.
    #[must_use]
    pub fn desc(&self) -> &TensorDescriptor {
        &self.desc
    }

    /// Backing storage.
    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Element type tag the storage was allocated with.
    #[must_use]
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// A backend tensor sharing this tensor's storage.
    ///
    /// # Errors
    ///
    /// Returns `ContractViolation` if the descriptor has no defined storage
    /// size, or `ShapeMismatch` if the storage is too small for it.
    pub fn to_graph_tensor(&self) -> Result<GraphTensor> {
        GraphTensor::new(self.desc.logical_tensor(), engine(), self.storage.clone())
    }
}

/// Allocate an LLGA tensor for `desc`.
///
/// The storage is zero-initialized and exactly `desc.storage_size()` bytes.
///
/// # Errors
///
/// Returns `InvalidConfig` for unusable options, or `ContractViolation` if
/// the descriptor's rank or extents are unknown.
///
/// # Example
///
/// ```rust
/// use llga_bridge::{empty_llga, PropertyKind, TensorDescriptor, TensorOptions};
/// use candle_core::DType;
///
/// let desc = TensorDescriptor::new(1, vec![2, 3], vec![3, 1], DType::F32, PropertyKind::Variable);
/// let tensor = empty_llga(&desc, &TensorOptions::new())?;
/// assert_eq!(tensor.storage().len(), 24);
/// # Ok::<(), llga_bridge::BridgeError>(())
/// ```
pub fn empty_llga(desc: &TensorDescriptor, options: &TensorOptions) -> Result<LlgaTensor> {
    options.validate()?;
    let size = desc.storage_size()?;
    let storage = Storage::zeroed(size);
    log_storage_allocation(size, desc.id(), "empty_llga");
    Ok(LlgaTensor::new(
        storage,
        options.dtype,
        options.device.clone(),
        desc.clone(),
    ))
}

/// Read an LLGA tensor as a Candle tensor on its view device.
///
/// The storage is reinterpreted through the descriptor's sizes and strides;
/// an `Any` layout is read as dense row-major.
///
/// # Errors
///
/// Returns:
/// - `UnsupportedConversion` for an opaque layout
/// - `ContractViolation` for unknown rank, extents or strides, or a span past `usize`
/// - `ShapeMismatch` if the storage is smaller than the layout spans
/// - `UnsupportedDType` if the element type cannot be decoded
pub fn llga_to_host_tensor(tensor: &LlgaTensor) -> Result<Tensor> {
    let desc = tensor.desc();
    let strides = match desc.layout() {
        LayoutState::Opaque(layout_id) => {
            return Err(BridgeError::unsupported_conversion(format!(
                "tensor {} has opaque layout {layout_id}, which a host tensor cannot express",
                desc.id()
            )));
        }
        LayoutState::Any => contiguous_strides(desc.sizes()),
        LayoutState::Strided(strides) => strides.clone(),
    };
    if desc.is_rank_unknown() {
        return Err(BridgeError::contract(format!(
            "cannot view tensor {} on the host: rank is unknown",
            desc.id()
        )));
    }

    let sizes = to_usize(desc.sizes(), "extent", desc.id())?;
    let strides = to_usize(&strides, "stride", desc.id())?;
    if sizes.len() != strides.len() {
        return Err(BridgeError::contract(format!(
            "tensor {} has {} sizes but {} strides",
            desc.id(),
            sizes.len(),
            strides.len()
        )));
    }

    if sizes.contains(&0) {
        return Ok(Tensor::zeros(sizes.as_slice(), tensor.dtype, &tensor.device)?);
    }
    let overflow = || {
        BridgeError::contract(format!("host view of tensor {} overflows usize", desc.id()))
    };

    let numel = sizes
        .iter()
        .try_fold(1usize, |acc, &size| acc.checked_mul(size))
        .ok_or_else(overflow)?;
    let span = sizes
        .iter()
        .zip(&strides)
        .try_fold(1usize, |acc, (&size, &stride)| {
            acc.checked_add((size - 1).checked_mul(stride)?)
        })
        .ok_or_else(overflow)?;
    let span_bytes = span
        .checked_mul(bytes_per_element(tensor.dtype))
        .ok_or_else(overflow)?;

    let flat = {
        let bytes = tensor.storage.read()?;
        if bytes.len() < span_bytes {
            return Err(BridgeError::shape_mismatch(vec![span_bytes], vec![bytes.len()]));
        }
        tensor_from_le_bytes(&bytes[..span_bytes], tensor.dtype, span, &tensor.device)?
    };

    let view = if strides == dense_strides(&sizes) {
        flat.narrow(0, 0, numel)?
    } else {
        let offsets = strided_offsets(&sizes, &strides, numel)
            .ok_or_else(overflow)?
            .into_iter()
            .map(|offset| {
                u32::try_from(offset).map_err(|_| {
                    BridgeError::contract(format!("element offset {offset} exceeds u32 range"))
                })
            })
            .collect::<Result<Vec<u32>>>()?;
        let index = Tensor::from_vec(offsets, numel, &tensor.device)?;
        flat.index_select(&index, 0)?
    };

    Ok(view.reshape(sizes.as_slice())?)
}

/// Bind a Candle tensor's data to the backend as a strided graph tensor.
///
/// The tensor is made contiguous and copied into a new storage block; the
/// logical tensor carries its dims, strides and element type under `id`.
///
/// # Errors
///
/// Returns `UnsupportedDType` if the backend cannot carry the element type,
/// or a Candle error if the data cannot be read back.
///
/// # Example
///
/// ```rust
/// use llga_bridge::graph_tensor_from_host;
/// use candle_core::{DType, Device, Tensor};
///
/// let tensor = Tensor::ones((2, 4), DType::F32, &Device::Cpu)?;
/// let graph = graph_tensor_from_host(&tensor, 7)?;
/// assert_eq!(graph.mem_size(), 32);
/// assert_eq!(graph.logical_tensor().strides(), Some(&[4, 1][..]));
/// # Ok::<(), llga_bridge::BridgeError>(())
/// ```
pub fn graph_tensor_from_host(tensor: &Tensor, id: u64) -> Result<GraphTensor> {
    let dtype = ensure_backend_dtype(tensor.dtype())?;
    let tensor = tensor.contiguous()?;

    let dims = to_i64(tensor.dims())?;
    let strides = to_i64(tensor.stride())?;
    let bytes = tensor_to_le_bytes(&tensor)?;

    let logical = LogicalTensor::with_strides(id, dtype, dims, strides, PropertyKind::Variable);
    GraphTensor::new(logical, engine(), Storage::from_bytes(bytes))
}

fn tensor_to_le_bytes(tensor: &Tensor) -> Result<Vec<u8>> {
    let flat = tensor.flatten_all()?;
    let bytes = match tensor.dtype() {
        DType::F32 => {
            let data: Vec<f32> = flat.to_vec1()?;
            data.iter().flat_map(|f| f.to_le_bytes()).collect()
        }
        DType::F16 => {
            let data: Vec<half::f16> = flat.to_vec1()?;
            data.iter().flat_map(|f| f.to_le_bytes()).collect()
        }
        DType::BF16 => {
            let data: Vec<half::bf16> = flat.to_vec1()?;
            data.iter().flat_map(|f| f.to_le_bytes()).collect()
        }
        DType::U8 => flat.to_vec1::<u8>()?,
        other => return Err(BridgeError::unsupported_dtype(other)),
    };
    Ok(bytes)
}

fn tensor_from_le_bytes(bytes: &[u8], dtype: DType, len: usize, device: &Device) -> Result<Tensor> {
    let tensor = match dtype {
        DType::F32 => {
            let data: Vec<f32> = bytes
                .chunks_exact(4)
                .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
                .collect();
            Tensor::from_vec(data, len, device)?
        }
        DType::F16 => {
            let data: Vec<half::f16> = bytes
                .chunks_exact(2)
                .map(|chunk| half::f16::from_le_bytes([chunk[0], chunk[1]]))
                .collect();
            Tensor::from_vec(data, len, device)?
        }
        DType::BF16 => {
            let data: Vec<half::bf16> = bytes
                .chunks_exact(2)
                .map(|chunk| half::bf16::from_le_bytes([chunk[0], chunk[1]]))
                .collect();
            Tensor::from_vec(data, len, device)?
        }
        DType::U8 => Tensor::from_vec(bytes.to_vec(), len, device)?,
        other => return Err(BridgeError::unsupported_dtype(other)),
    };
    Ok(tensor)
}

fn dense_strides(sizes: &[usize]) -> Vec<usize> {
    let mut strides = vec![1usize; sizes.len()];
    for i in (0..sizes.len().saturating_sub(1)).rev() {
        strides[i] = strides[i + 1] * sizes[i + 1];
    }
    strides
}

/// Storage offsets, in elements, of every logical element in row-major order.
///
/// `None` if an offset does not fit in `usize`.
fn strided_offsets(sizes: &[usize], strides: &[usize], numel: usize) -> Option<Vec<usize>> {
    let mut offsets = Vec::with_capacity(numel);
    let mut index = vec![0usize; sizes.len()];
    for _ in 0..numel {
        let offset = index
            .iter()
            .zip(strides)
            .try_fold(0usize, |acc, (&i, &s)| acc.checked_add(i.checked_mul(s)?))?;
        offsets.push(offset);
        for dim in (0..sizes.len()).rev() {
            index[dim] += 1;
            if index[dim] < sizes[dim] {
                break;
            }
            index[dim] = 0;
        }
    }
    Some(offsets)
}

fn to_usize(values: &[i64], what: &str, id: u64) -> Result<Vec<usize>> {
    values
        .iter()
        .map(|&v| {
            usize::try_from(v).map_err(|_| {
                BridgeError::contract(format!("tensor {id} has an unknown {what} ({v})"))
            })
        })
        .collect()
}
