//! CPU runtime implementation
//!
//! The CPU runtime uses standard heap allocation and provides the reference
//! implementation for every operation. Kernels are generic over the element
//! type and run row-parallel on rayon when the `rayon` feature is enabled.

mod client;
mod device;
pub(crate) mod helpers;
pub(crate) mod kernels;
mod runtime;

pub use crate::tensor::Tensor;
pub use client::{CpuClient, DEFAULT_MIN_LEN, ParallelismConfig};
pub use device::CpuDevice;
pub use runtime::CpuRuntime;
