//! Spatial pooling helpers
//!
//! Every pooling operation reduces each `(batch, channel)` plane to a few
//! statistics and writes them as consecutive `c`-wide blocks of an `[n, k*c]`
//! output. The statistics are always accumulated in f32.

use crate::error::Result;
use crate::ops::common::{
    ensure_disjoint, ensure_same_dtype, ensure_shape, plane_dims, validate_mask_sum,
};
use crate::runtime::Runtime;
use crate::tensor::{DataFormat, PlaneDims, Tensor};

/// Which statistics a pooling call writes
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PoolKind {
    /// `[scale * sum]`
    Sum,
    /// `[positive max]`
    MaxPositive,
    /// `[scale * sum, positive max]`
    SumAndMaxPositive,
    /// `[sum, positive max, sum / mask_sum]`
    Global,
}

impl PoolKind {
    /// Number of `c`-wide output blocks
    #[inline]
    pub fn blocks(self) -> usize {
        match self {
            Self::Sum | Self::MaxPositive => 1,
            Self::SumAndMaxPositive => 2,
            Self::Global => 3,
        }
    }

    /// Kernel name stem
    pub fn name(self) -> &'static str {
        match self {
            Self::Sum => "pool_rows_sum",
            Self::MaxPositive => "pool_rows_max_positive",
            Self::SumAndMaxPositive => "pool_rows_sum_and_max_positive",
            Self::Global => "global_pool",
        }
    }

    /// Integer tag passed to device kernels
    #[inline]
    pub fn code(self) -> u32 {
        match self {
            Self::Sum => 0,
            Self::MaxPositive => 1,
            Self::SumAndMaxPositive => 2,
            Self::Global => 3,
        }
    }
}

/// Plane statistics accumulated in f32
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlaneStats {
    /// Sum of all values
    pub sum: f32,
    /// Largest strictly positive value, 0 when there is none
    pub max_positive: f32,
}

impl PlaneStats {
    /// Starting point of an accumulation
    pub const EMPTY: Self = Self {
        sum: 0.0,
        max_positive: 0.0,
    };

    /// Fold one value in
    #[inline]
    pub fn push(&mut self, v: f32) {
        self.sum += v;
        if v > self.max_positive {
            self.max_positive = v;
        }
    }

    /// Output values for `kind`, in block order
    ///
    /// `divisor` is only read for [`PoolKind::Global`].
    pub fn emit(&self, kind: PoolKind, scale_sum: f32, divisor: f32) -> ([f32; 3], usize) {
        match kind {
            PoolKind::Sum => ([self.sum * scale_sum, 0.0, 0.0], 1),
            PoolKind::MaxPositive => ([self.max_positive, 0.0, 0.0], 1),
            PoolKind::SumAndMaxPositive => ([self.sum * scale_sum, self.max_positive, 0.0], 2),
            PoolKind::Global => ([self.sum, self.max_positive, self.sum / divisor], 3),
        }
    }
}

/// Validate a pooling call and return the input geometry
///
/// `mask_sum` is only meaningful for the global/value-head family. Planes are
/// reduced independently, so `out` may not overlap `input` or `mask_sum`.
pub fn validate_pool<R: Runtime>(
    op: &'static str,
    kind: PoolKind,
    input: &Tensor<R>,
    out: &Tensor<R>,
    format: DataFormat,
    mask_sum: Option<&Tensor<R>>,
) -> Result<PlaneDims> {
    ensure_same_dtype(input, out)?;
    let dims = plane_dims(op, input, format)?;
    ensure_shape(out, &[dims.n, kind.blocks() * dims.c])?;
    if let Some(mask_sum) = mask_sum {
        validate_mask_sum(op, mask_sum, dims.n)?;
        ensure_disjoint("out", out, mask_sum)?;
    }
    ensure_disjoint("out", out, input)?;
    Ok(dims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(values: &[f32]) -> PlaneStats {
        let mut s = PlaneStats::EMPTY;
        values.iter().for_each(|&v| s.push(v));
        s
    }

    #[test]
    fn test_positive_max_floor() {
        let s = stats(&[-1.0, -0.5, -7.0]);
        assert_eq!(s.max_positive, 0.0);
        assert_eq!(s.sum, -8.5);

        let s = stats(&[-1.0, 0.25, -7.0, 0.125]);
        assert_eq!(s.max_positive, 0.25);
    }

    #[test]
    fn test_emit_blocks() {
        let s = stats(&[1.0, -2.0, 3.0, -4.0]);
        assert_eq!(s.emit(PoolKind::Sum, 0.5, 1.0), ([-1.0, 0.0, 0.0], 1));
        assert_eq!(
            s.emit(PoolKind::SumAndMaxPositive, 1.0, 1.0),
            ([-2.0, 3.0, 0.0], 2)
        );
        assert_eq!(s.emit(PoolKind::Global, 1.0, 4.0), ([-2.0, 3.0, -0.5], 3));
    }
}
