// SPDX-License-Identifier: MIT
// Copyright 2026 Tyler Zervas

//! Backend graph tensor types.
//!
//! The backend compiles partitions against [`LogicalTensor`]s (shape, layout
//! and identity without memory) and executes them on [`GraphTensor`]s (a
//! logical tensor bound to the engine and a [`Storage`] block).
//!
//! ## Layouts
//!
//! | [`LayoutKind`] | Meaning |
//! |---|---|
//! | `Strided` | explicit per-dimension strides |
//! | `Opaque` | backend-chosen blocked arrangement, named by a layout id |
//! | `Any` | left to the backend until compilation |
//!
//! A logical tensor may additionally have unknown rank, whatever its kind.

mod logical_tensor;
mod storage;
mod tensor;

pub use logical_tensor::{
    contiguous_strides, LayoutKind, LogicalTensor, PropertyKind, UNKNOWN_DIM,
};
pub use storage::Storage;
pub use tensor::GraphTensor;
