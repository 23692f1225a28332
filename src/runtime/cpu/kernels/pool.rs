//! Spatial pooling kernel

use crate::dtype::Element;
use crate::ops::PlaneStats;

/// Accumulate the statistics of one `(batch, channel)` plane
///
/// Reads `xy` values starting at `base`, `stride` elements apart (1 for NCHW,
/// `c` for NHWC).
///
/// # Safety
/// - `input` must be valid for reads at `base + i * stride` for all `i < xy`
#[inline]
pub unsafe fn pool_plane_kernel<T: Element>(
    input: *const T,
    base: usize,
    stride: usize,
    xy: usize,
) -> PlaneStats {
    let mut stats = PlaneStats::EMPTY;
    for i in 0..xy {
        stats.push((*input.add(base + i * stride)).to_f32());
    }
    stats
}
