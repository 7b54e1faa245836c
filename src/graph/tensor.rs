// SPDX-License-Identifier: MIT
// Copyright 2026 Tyler Zervas

//! Graph tensors: logical tensors bound to memory.

use super::{LogicalTensor, Storage};
use crate::context::Engine;
use crate::error::{BridgeError, Result};

/// A logical tensor bound to the engine and a storage block.
///
/// This is what a compiled partition reads and writes during execution.
#[derive(Debug, Clone)]
pub struct GraphTensor {
    logical: LogicalTensor,
    engine: &'static Engine,
    storage: Storage,
    mem_size: usize,
}

impl GraphTensor {
    /// Bind `logical` to `storage` on `engine`.
    ///
    /// # Errors
    ///
    /// Returns `ContractViolation` if the logical tensor has no defined
    /// memory size, or `ShapeMismatch` if `storage` is smaller than it.
    pub fn new(logical: LogicalTensor, engine: &'static Engine, storage: Storage) -> Result<Self> {
        let mem_size = logical.mem_size()?;
        if storage.len() < mem_size {
            return Err(BridgeError::shape_mismatch(
                vec![mem_size],
                vec![storage.len()],
            ));
        }
        Ok(Self {
            logical,
            engine,
            storage,
            mem_size,
        })
    }

    /// The backend description of this tensor.
    #[must_use]
    pub fn logical_tensor(&self) -> &LogicalTensor {
        &self.logical
    }

    /// Engine the tensor is bound to.
    #[must_use]
    pub fn engine(&self) -> &'static Engine {
        self.engine
    }

    /// Backing storage.
    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Bytes the logical tensor occupies within the storage.
    #[must_use]
    pub fn mem_size(&self) -> usize {
        self.mem_size
    }
}
