// SPDX-License-Identifier: MIT
// Copyright 2026 Tyler Zervas

//! Process-wide execution context for compiled partitions.
//!
//! An [`Engine`] represents the device the backend generates code for; a
//! [`Stream`] is the execution queue compiled partitions are submitted to.
//! Only the CPU device class is supported, so the process holds exactly one
//! of each.
//!
//! Both are built lazily on first access and never torn down. Concurrent
//! first access from several threads still constructs a single instance.
//!
//! ```rust
//! use llga_bridge::context::{engine, stream};
//!
//! let stream = stream();
//! assert!(std::ptr::eq(stream.engine(), engine()));
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

static ENGINE: OnceLock<Engine> = OnceLock::new();
static STREAM: OnceLock<Stream> = OnceLock::new();

static ENGINES_BUILT: AtomicUsize = AtomicUsize::new(0);
static STREAMS_BUILT: AtomicUsize = AtomicUsize::new(0);

/// Device class an engine targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineKind {
    /// Host CPU.
    Cpu,
}

/// The backend's handle on a device and its context.
///
/// Not `Clone`: the only instance lives behind [`engine`].
#[derive(Debug)]
pub struct Engine {
    kind: EngineKind,
    index: usize,
}

impl Engine {
    fn new(kind: EngineKind, index: usize) -> Self {
        ENGINES_BUILT.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(
            target: "llga_bridge::context",
            kind = ?kind,
            index,
            "Created execution engine"
        );
        Self { kind, index }
    }

    /// Device class of this engine.
    #[must_use]
    pub fn kind(&self) -> EngineKind {
        self.kind
    }

    /// Device index within its class.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Execution queue bound to the process engine.
///
/// Not `Clone`: the only instance lives behind [`stream`].
#[derive(Debug)]
pub struct Stream {
    engine: &'static Engine,
}

impl Stream {
    fn new(engine: &'static Engine) -> Self {
        STREAMS_BUILT.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(
            target: "llga_bridge::context",
            kind = ?engine.kind(),
            "Created execution stream"
        );
        Self { engine }
    }

    /// Engine this stream submits work to.
    #[must_use]
    pub fn engine(&self) -> &'static Engine {
        self.engine
    }

    /// Block until all work submitted to this stream has completed.
    ///
    /// CPU partitions run synchronously on submission, so there is never
    /// outstanding work to wait for.
    pub fn wait(&self) {
        tracing::trace!(target: "llga_bridge::context", "Stream wait");
    }
}

/// The process-wide CPU engine, created on first call.
pub fn engine() -> &'static Engine {
    ENGINE.get_or_init(|| Engine::new(EngineKind::Cpu, 0))
}

/// The process-wide stream on [`engine`], created on first call.
pub fn stream() -> &'static Stream {
    STREAM.get_or_init(|| Stream::new(engine()))
}
