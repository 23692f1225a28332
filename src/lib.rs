//! # evalkern
//!
//! **Device-resident tensor primitives for convolutional network evaluation.**
//!
//! evalkern provides the non-convolution building blocks of a policy/value
//! network forward pass - channel concatenation, spatial pooling, layout
//! conversion, board-symmetry mirroring, precision conversion and fused
//! scale-bias-activation - in 32-bit and 16-bit float and in both NCHW and NHWC
//! layouts, with the same API on CPU and CUDA.
//!
//! ## Design
//!
//! - **Explicit queue**: every operation is a method on a runtime client
//!   (`CpuClient`, `CudaClient`); operations on one client run in issue order.
//! - **Caller-owned buffers**: outputs are tensors the caller provides.
//!   Operations never allocate, free or retain memory.
//! - **Checked boundary**: shapes, dtypes and aliasing are validated before
//!   any kernel runs.
//! - **One kernel per operation**: kernels are generic over the element type
//!   and compute in f32, narrowing on store.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use evalkern::prelude::*;
//!
//! let device = CpuDevice::new();
//! let client = CpuRuntime::default_client(&device);
//!
//! let input = Tensor::<CpuRuntime>::from_slice(
//!     &[1.0f32, -2.0, 3.0, -4.0, 5.0, 6.0, -7.0, 8.0],
//!     &[1, 2, 4],
//!     &device,
//! );
//! let mut pooled = Tensor::<CpuRuntime>::zeros(&[1, 4], DType::F32, &device);
//! client.pool_rows_sum_and_max_positive(&input, &mut pooled, DataFormat::Nchw, 1.0)?;
//! assert_eq!(pooled.to_vec::<f32>(), vec![-2.0, 12.0, 3.0, 8.0]);
//! ```
//!
//! ## Feature Flags
//!
//! - `cpu` (default): CPU reference backend
//! - `rayon` (default): Multi-threaded CPU operations
//! - `cuda`: NVIDIA CUDA backend (kernels compiled to PTX at build time)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dtype;
pub mod error;
pub mod ops;
pub mod runtime;
pub mod tensor;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::dtype::{DType, Element};
    pub use crate::error::{Error, Result};
    pub use crate::ops::{BiasOps, ChannelOps, LayoutOps, PoolingOps, PrecisionOps, ScaleBiasOps};
    pub use crate::runtime::{Device, Runtime, RuntimeClient};
    pub use crate::tensor::{DataFormat, Tensor};

    #[cfg(feature = "cpu")]
    pub use crate::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime, ParallelismConfig};

    #[cfg(feature = "cuda")]
    pub use crate::runtime::cuda::{CudaClient, CudaDevice, CudaRuntime};
}

/// Default runtime based on enabled features
///
/// - With `cuda` feature: `CudaRuntime`
/// - Otherwise: `CpuRuntime`
#[cfg(feature = "cuda")]
pub type DefaultRuntime = runtime::cuda::CudaRuntime;

/// Default runtime based on enabled features
#[cfg(all(feature = "cpu", not(feature = "cuda")))]
pub type DefaultRuntime = runtime::cpu::CpuRuntime;
