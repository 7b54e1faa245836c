// SPDX-License-Identifier: MIT
// Copyright 2026 Tyler Zervas

//! # llga-bridge
//!
//! Tensor layout descriptors and host ↔ backend tensor interop for compiled
//! LLGA (low-level graph API) partitions.
//!
//! A compiler sees tensors symbolically: rank, extents and strides may all be
//! unknown. The backend sees logical tensors: strided, opaque (a blocked
//! arrangement named by a layout id), or `Any` (decided at compile time).
//! [`TensorDescriptor`] carries one tensor value across that boundary in both
//! directions, and [`LlgaTensor`] carries computed data whose layout the host
//! must not inspect directly.
//!
//! ## Modules
//!
//! - [`descriptor`] - `TensorDescriptor` and its layout states
//! - [`llga`] - LLGA tensors, `empty_llga` and host/backend conversion
//! - [`graph`] - Backend logical tensors, graph tensors and storage
//! - [`context`] - Process-wide engine and stream
//! - [`error`] - Error taxonomy
//! - [`logging`] - Subscriber setup and allocation events
//!
//! ## Quick Start
//!
//! ```rust
//! use llga_bridge::{
//!     empty_llga, llga_to_host_tensor, PropertyKind, TensorDescriptor, TensorOptions,
//! };
//! use candle_core::DType;
//!
//! let desc = TensorDescriptor::new(5, vec![4, 8], vec![8, 1], DType::F32, PropertyKind::Variable);
//! assert_eq!(desc.storage_size()?, 128);
//!
//! let output = empty_llga(&desc, &TensorOptions::new())?;
//! let host = llga_to_host_tensor(&output)?;
//! assert_eq!(host.dims(), &[4, 8]);
//! # Ok::<(), llga_bridge::BridgeError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod context;
pub mod descriptor;
pub mod dtype;
pub mod error;
pub mod graph;
pub mod llga;
pub mod logging;
pub mod traits;

// Re-exports for convenience
pub use context::{engine, stream, Engine, EngineKind, Stream};
pub use descriptor::{LayoutState, TensorDescriptor};
pub use dtype::{bytes_per_element, ensure_backend_dtype, DTypeExt, DEFAULT_SYMBOLIC_DTYPE};
pub use error::{BridgeError, Result};
pub use graph::{GraphTensor, LayoutKind, LogicalTensor, PropertyKind, Storage, UNKNOWN_DIM};
pub use llga::{empty_llga, graph_tensor_from_host, llga_to_host_tensor, LlgaTensor, TensorOptions};
pub use logging::{init_logging, log_storage_allocation, LogConfig, LogLevel};
pub use traits::{SymbolicValue, TensorType, ValidatableConfig};
