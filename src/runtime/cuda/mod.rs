//! CUDA runtime implementation
//!
//! GPU backend built on cudarc.
//!
//! - `CudaDevice` - a CUDA GPU
//! - `CudaClient` - owns the context and the stream kernels launch on
//! - `CudaRuntime` - implements the generic Runtime trait
//!
//! Kernels are compiled from `kernels/*.cu` to PTX by `build.rs` and loaded on
//! first use. Operations launch asynchronously on the client's stream.

mod cache;
mod client;
mod device;
pub(crate) mod kernels;
mod runtime;

pub use crate::tensor::Tensor;
pub use client::CudaClient;
pub use device::CudaDevice;
pub use runtime::{CudaRuntime, is_cuda_available};
