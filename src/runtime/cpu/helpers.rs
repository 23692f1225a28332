//! Helper functions shared by the CPU operation implementations

use super::CpuClient;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Elements per task for flat elementwise kernels
pub(crate) const ELEMENTWISE_CHUNK: usize = 4096;

/// Run `f(i)` for every `i in 0..count`, row-parallel when rayon is enabled
///
/// Each index must touch a disjoint part of the output.
pub(crate) fn for_each_row<F>(client: &CpuClient, count: usize, f: F)
where
    F: Fn(usize) + Send + Sync,
{
    #[cfg(feature = "rayon")]
    {
        let min_len = client.rayon_min_len();
        if count > min_len {
            client.install_parallelism(|| {
                (0..count).into_par_iter().with_min_len(min_len).for_each(&f);
            });
            return;
        }
    }

    #[cfg(not(feature = "rayon"))]
    let _ = client;

    (0..count).for_each(f);
}

/// Run `f(start, len)` over `[0, numel)` split into [`ELEMENTWISE_CHUNK`] pieces
pub(crate) fn for_each_chunk<F>(client: &CpuClient, numel: usize, f: F)
where
    F: Fn(usize, usize) + Send + Sync,
{
    let chunks = numel.div_ceil(ELEMENTWISE_CHUNK);
    for_each_row(client, chunks, |i| {
        let start = i * ELEMENTWISE_CHUNK;
        f(start, ELEMENTWISE_CHUNK.min(numel - start));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::cpu::{CpuDevice, ParallelismConfig};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_for_each_row_visits_every_index() {
        let client = CpuClient::new(CpuDevice::new())
            .with_parallelism(ParallelismConfig::new(Some(2), Some(1)));
        let hits: Vec<AtomicUsize> = (0..1000).map(|_| AtomicUsize::new(0)).collect();
        for_each_row(&client, hits.len(), |i| {
            hits[i].fetch_add(1, Ordering::Relaxed);
        });
        assert!(hits.iter().all(|h| h.load(Ordering::Relaxed) == 1));
    }

    #[test]
    fn test_for_each_chunk_covers_range() {
        let client = CpuClient::new(CpuDevice::new());
        let total = AtomicUsize::new(0);
        for_each_chunk(&client, 3 * ELEMENTWISE_CHUNK + 5, |_, len| {
            total.fetch_add(len, Ordering::Relaxed);
        });
        assert_eq!(total.load(Ordering::Relaxed), 3 * ELEMENTWISE_CHUNK + 5);
    }
}
