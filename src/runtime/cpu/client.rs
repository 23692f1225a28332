//! CPU client and parallelism configuration

use super::device::CpuDevice;
use super::runtime::CpuRuntime;
use crate::error::Result;
use crate::runtime::RuntimeClient;
#[cfg(feature = "rayon")]
use std::sync::Arc;

/// Default minimum number of work items per rayon task
pub const DEFAULT_MIN_LEN: usize = 64;

/// How the CPU client splits work across threads
///
/// `max_threads: None` runs on the global rayon pool; `Some(n)` gives the
/// client a dedicated pool of `n` threads. `min_len` is the smallest number of
/// rows (planes, positions, element chunks) a single task processes, so small
/// tensors stay on the calling thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParallelismConfig {
    /// Thread count for a dedicated pool (`None` = global pool)
    pub max_threads: Option<usize>,
    /// Minimum work items per task
    pub min_len: usize,
}

impl ParallelismConfig {
    /// Create a configuration; `None` fields take their defaults
    pub fn new(max_threads: Option<usize>, min_len: Option<usize>) -> Self {
        Self {
            max_threads,
            min_len: min_len.unwrap_or(DEFAULT_MIN_LEN).max(1),
        }
    }
}

impl Default for ParallelismConfig {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// CPU client for operation dispatch
///
/// Operations complete before returning, so [`RuntimeClient::synchronize`] is
/// a no-op.
#[derive(Clone, Debug)]
pub struct CpuClient {
    pub(crate) device: CpuDevice,
    parallelism: ParallelismConfig,
    #[cfg(feature = "rayon")]
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl CpuClient {
    /// Create a new CPU client
    pub fn new(device: CpuDevice) -> Self {
        Self {
            device,
            parallelism: ParallelismConfig::default(),
            #[cfg(feature = "rayon")]
            pool: None,
        }
    }

    /// Replace the parallelism configuration
    ///
    /// Falls back to the global pool (with a warning) if a dedicated pool
    /// cannot be built.
    pub fn with_parallelism(mut self, config: ParallelismConfig) -> Self {
        self.parallelism = config;

        #[cfg(feature = "rayon")]
        {
            self.pool = None;
            if let Some(threads) = config.max_threads {
                match rayon::ThreadPoolBuilder::new()
                    .num_threads(threads.max(1))
                    .build()
                {
                    Ok(pool) => {
                        log::debug!("cpu client using a dedicated pool of {} threads", threads);
                        self.pool = Some(Arc::new(pool));
                    }
                    Err(e) => {
                        log::warn!(
                            "failed to build a {}-thread pool, using the global pool: {}",
                            threads,
                            e
                        );
                    }
                }
            }
        }

        self
    }

    /// Current parallelism configuration
    #[inline]
    pub fn parallelism(&self) -> ParallelismConfig {
        self.parallelism
    }

    /// Minimum work items per rayon task
    #[inline]
    pub fn rayon_min_len(&self) -> usize {
        self.parallelism.min_len
    }

    /// Run `f` inside this client's thread pool
    #[cfg(feature = "rayon")]
    pub(crate) fn install_parallelism<F, T>(&self, f: F) -> T
    where
        F: FnOnce() -> T + Send,
        T: Send,
    {
        match &self.pool {
            Some(pool) => pool.install(f),
            None => f(),
        }
    }
}

impl RuntimeClient<CpuRuntime> for CpuClient {
    fn device(&self) -> &CpuDevice {
        &self.device
    }

    fn synchronize(&self) -> Result<()> {
        // CPU operations are synchronous, nothing to do
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallelism_defaults() {
        let config = ParallelismConfig::default();
        assert_eq!(config.max_threads, None);
        assert_eq!(config.min_len, DEFAULT_MIN_LEN);
        assert_eq!(ParallelismConfig::new(None, Some(0)).min_len, 1);
    }

    #[test]
    fn test_with_parallelism() {
        let client = CpuClient::new(CpuDevice::new())
            .with_parallelism(ParallelismConfig::new(Some(2), Some(8)));
        assert_eq!(client.rayon_min_len(), 8);
        assert_eq!(client.parallelism().max_threads, Some(2));
        assert!(client.synchronize().is_ok());
    }
}
