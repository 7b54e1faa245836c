// SPDX-License-Identifier: MIT
// Copyright 2026 Tyler Zervas

//! Logging setup for llga-bridge.
//!
//! The library only emits `tracing` events; it never installs a subscriber
//! by itself. Applications (and tests that want output) call
//! [`init_logging`] once.
//!
//! ## Targets
//!
//! - `llga_bridge::context` - engine and stream creation
//! - `llga_bridge::memory` - storage allocations
//!
//! `RUST_LOG` always takes precedence over [`LogConfig`].

use std::sync::Once;

/// Target used for storage allocation events.
pub const MEMORY_TARGET: &str = "llga_bridge::memory";

/// Configuration for logging initialization.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level applied to every target when `RUST_LOG` is not set.
    pub default_level: LogLevel,
    /// Emit storage allocation events regardless of `default_level`.
    pub trace_allocations: bool,
    /// Include timestamps in log output.
    pub with_timestamps: bool,
    /// Use ANSI colors (disable for file output).
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            default_level: LogLevel::Info,
            trace_allocations: false,
            with_timestamps: true,
            with_ansi: true,
        }
    }
}

impl LogConfig {
    /// Create a new logging configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default log level.
    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.default_level = level;
        self
    }

    /// Enable or disable allocation events.
    #[must_use]
    pub fn with_allocations(mut self, enable: bool) -> Self {
        self.trace_allocations = enable;
        self
    }

    /// Enable or disable timestamps.
    #[must_use]
    pub fn with_timestamps(mut self, enable: bool) -> Self {
        self.with_timestamps = enable;
        self
    }

    /// Verbose preset: debug level, allocations on.
    #[must_use]
    pub fn development() -> Self {
        Self {
            default_level: LogLevel::Debug,
            trace_allocations: true,
            with_timestamps: true,
            with_ansi: true,
        }
    }

    /// Preset for deployed services: info level, plain output.
    #[must_use]
    pub fn production() -> Self {
        Self {
            default_level: LogLevel::Info,
            trace_allocations: false,
            with_timestamps: true,
            with_ansi: false,
        }
    }

    /// Quiet preset for test harnesses.
    #[must_use]
    pub fn testing() -> Self {
        Self {
            default_level: LogLevel::Warn,
            trace_allocations: false,
            with_timestamps: false,
            with_ansi: false,
        }
    }

    /// Filter directives equivalent to this configuration.
    #[must_use]
    pub fn filter_directives(&self) -> String {
        let level = self.default_level.as_filter_str();
        if self.trace_allocations {
            format!("{level},{MEMORY_TARGET}=debug")
        } else {
            level.to_string()
        }
    }
}

/// Log level enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Errors only.
    Error,
    /// Warnings and above.
    Warn,
    /// Informational messages and above.
    #[default]
    Info,
    /// Debug messages and above.
    Debug,
    /// All messages including trace.
    Trace,
}

impl LogLevel {
    fn as_filter_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

static INIT_LOGGING: Once = Once::new();

/// Install the global tracing subscriber.
///
/// Only the first call does anything. If the application already installed
/// its own subscriber, that one stays in place.
///
/// ## Example
///
/// ```rust
/// use llga_bridge::{init_logging, LogConfig};
///
/// init_logging(&LogConfig::testing());
/// ```
pub fn init_logging(config: &LogConfig) {
    INIT_LOGGING.call_once(|| {
        let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| config.filter_directives());

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(config.with_ansi)
            .with_target(true);

        let installed = if config.with_timestamps {
            builder.try_init()
        } else {
            builder.without_time().try_init()
        };
        if installed.is_err() {
            tracing::debug!("Global subscriber already set; keeping it");
        }
    });
}

/// Log a storage allocation for a tensor.
///
/// ## Arguments
///
/// * `bytes` - Size of the allocated block
/// * `tensor_id` - Descriptor id the storage backs
/// * `context` - Operation that allocated the storage
pub fn log_storage_allocation(bytes: usize, tensor_id: u64, context: &str) {
    #[allow(clippy::cast_precision_loss)]
    let kib = bytes as f64 / 1024.0;

    tracing::debug!(
        target: MEMORY_TARGET,
        bytes,
        kib = format!("{kib:.2}"),
        tensor_id,
        context,
        "Storage allocated"
    );
}
