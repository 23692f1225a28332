//! Tensor types
//!
//! A [`Tensor`] is a contiguous view of device memory: storage plus a shape.
//! The memory layout ([`DataFormat`]) is supplied per operation, matching how
//! an inference engine tracks its buffers.

mod core;
mod format;
mod storage;

pub use core::Tensor;
pub use format::{DataFormat, ImageDims, PlaneDims};
pub use storage::Storage;
