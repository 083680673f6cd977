//! Tokio runtime presets for the storefront binaries.
//!
//! `#[shop_runtime::main]` replaces `#[tokio::main]` and picks a preset by name:
//!
//! ```rust,ignore
//! #[shop_runtime::main(high_performance)]
//! async fn main() -> anyhow::Result<()> {
//!     Ok(())
//! }
//! ```

pub use anyhow::Result;
pub use shop_derive::main;

use anyhow::Context;
use std::num::NonZero;
use std::sync::LazyLock;
use std::thread::available_parallelism;
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

const MIB: usize = 1024 * 1024;
const STACK_RANGE: (usize, usize) = (MIB, 16 * MIB);
const MAX_WORKERS: usize = 1024;

/// `TOKIO_WORKER_THREADS` when it holds a usable count, else the host parallelism.
static HOST_WORKERS: LazyLock<usize> = LazyLock::new(|| {
    std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|count| (1..=MAX_WORKERS).contains(count))
        .unwrap_or_else(|| available_parallelism().map_or(4, NonZero::get))
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub worker_threads: usize,
    pub stack_size: usize,
    pub thread_name: String,
    pub thread_keep_alive: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            worker_threads: *HOST_WORKERS,
            stack_size: 3 * MIB,
            thread_name: "shop-worker".to_owned(),
            thread_keep_alive: Duration::from_secs(60),
        }
    }
}

impl RuntimeConfig {
    /// The HTTP server: every core, bigger stacks for SSR, idle workers kept around longer.
    #[must_use]
    pub fn high_performance() -> Self {
        Self {
            stack_size: 4 * MIB,
            thread_name: "shop-http".to_owned(),
            thread_keep_alive: Duration::from_secs(300),
            ..Self::default()
        }
    }

    /// Half the cores and small stacks, for tooling.
    #[must_use]
    pub fn memory_efficient() -> Self {
        Self {
            worker_threads: (*HOST_WORKERS / 2).max(1),
            stack_size: 2 * MIB,
            thread_name: "shop-light".to_owned(),
            thread_keep_alive: Duration::from_secs(30),
        }
    }

    /// Copy with the numeric fields pulled into range and a non-blank thread name.
    #[must_use]
    pub fn clamped(&self) -> Self {
        let thread_name = if self.thread_name.trim().is_empty() {
            Self::default().thread_name
        } else {
            self.thread_name.clone()
        };
        Self {
            worker_threads: self.worker_threads.clamp(1, MAX_WORKERS),
            stack_size: self.stack_size.clamp(STACK_RANGE.0, STACK_RANGE.1),
            thread_name,
            thread_keep_alive: self.thread_keep_alive,
        }
    }
}

/// Multi-threaded runtime with I/O and timers enabled.
///
/// # Errors
/// Fails when the OS refuses to spawn the worker threads.
pub fn build_runtime_with_config(config: &RuntimeConfig) -> Result<Runtime> {
    let config = config.clamped();
    debug!(?config, "Starting tokio runtime");

    Builder::new_multi_thread()
        .worker_threads(config.worker_threads)
        .thread_stack_size(config.stack_size)
        .thread_name(config.thread_name)
        .thread_keep_alive(config.thread_keep_alive)
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_differ_in_footprint() {
        let server = RuntimeConfig::high_performance();
        let tooling = RuntimeConfig::memory_efficient();
        assert!(server.stack_size > tooling.stack_size);
        assert!(server.worker_threads >= tooling.worker_threads);
        assert!(tooling.worker_threads >= 1);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = RuntimeConfig {
            worker_threads: 0,
            stack_size: 64 * MIB,
            thread_name: " ".to_owned(),
            ..RuntimeConfig::default()
        }
        .clamped();
        assert_eq!(config.worker_threads, 1);
        assert_eq!(config.stack_size, 16 * MIB);
        assert_eq!(config.thread_name, "shop-worker");
    }

    #[test]
    fn built_runtime_runs_futures() {
        let config = RuntimeConfig { worker_threads: 0, stack_size: 1, ..RuntimeConfig::default() };
        let runtime = build_runtime_with_config(&config).expect("runtime");
        assert_eq!(runtime.block_on(async { 6 * 7 }), 42);
    }
}
