// SPDX-License-Identifier: MIT
// Copyright 2026 Tyler Zervas

//! Shared byte storage behind graph and LLGA tensors.

use crate::error::{BridgeError, Result};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Fixed-size, reference-counted block of bytes.
///
/// Clones alias the same block. An output that reuses an input tensor holds
/// a clone of that input's storage.
#[derive(Debug, Clone)]
pub struct Storage {
    bytes: Arc<RwLock<Box<[u8]>>>,
    len: usize,
}

impl Storage {
    /// Allocate `len` zeroed bytes.
    #[must_use]
    pub fn zeroed(len: usize) -> Self {
        Self::from_bytes(vec![0u8; len])
    }

    /// Take ownership of existing bytes.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let len = bytes.len();
        Self {
            bytes: Arc::new(RwLock::new(bytes.into_boxed_slice())),
            len,
        }
    }

    /// Size of the block in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the block holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `self` and `other` alias the same block.
    #[must_use]
    pub fn ptr_eq(&self, other: &Storage) -> bool {
        Arc::ptr_eq(&self.bytes, &other.bytes)
    }

    /// Shared access to the bytes.
    ///
    /// # Errors
    ///
    /// Returns `ContractViolation` if a writer panicked while holding the block.
    pub fn read(&self) -> Result<RwLockReadGuard<'_, Box<[u8]>>> {
        self.bytes
            .read()
            .map_err(|_| BridgeError::contract("storage lock poisoned by a panicked writer"))
    }

    /// Exclusive access to the bytes.
    ///
    /// # Errors
    ///
    /// Returns `ContractViolation` if a writer panicked while holding the block.
    pub fn write(&self) -> Result<RwLockWriteGuard<'_, Box<[u8]>>> {
        self.bytes
            .write()
            .map_err(|_| BridgeError::contract("storage lock poisoned by a panicked writer"))
    }
}
