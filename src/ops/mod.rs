//! Operations
//!
//! Operation families are traits in [`traits`], implemented by each runtime's
//! client. The helpers in this module validate tensor views and reduce each
//! call to a small plan that every backend's kernels consume, so the CPU
//! reference and the device kernels agree on geometry by construction.
//!
//! ```text
//! client.pool_rows_sum(&input, &mut out, DataFormat::Nhwc, 1.0 / 361.0)
//!     │
//!     │ validate_pool -> PlaneDims
//!     ▼
//! match dtype { F32 => kernel::<f32>, F16 => kernel::<f16> }
//! ```

pub mod affine;
pub mod channel;
pub(crate) mod common;
mod dispatch;
pub mod layout;
pub mod pooling;
pub mod precision;
pub mod traits;

#[cfg(feature = "cpu")]
mod cpu;

#[cfg(feature = "cuda")]
mod cuda;

pub use affine::{RowBiasPlan, ScaleBiasPlan};
pub use channel::{ConcatPlan, SlicePlan};
pub use layout::{MirrorPlan, TransposePlan};
pub use pooling::{PlaneStats, PoolKind};
pub use traits::*;
