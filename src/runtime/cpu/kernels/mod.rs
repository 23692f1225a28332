//! CPU kernel implementations
//!
//! Low-level kernels for the CPU operations. Kernels are generic over
//! `T: Element`, widen to f32 for arithmetic and narrow on store. Each one
//! processes a single row of its plan so callers can distribute rows across
//! threads.

#![allow(unsafe_op_in_unsafe_fn)] // Kernels are already marked unsafe, inner unsafe is redundant

pub mod affine;
pub mod cast;
pub mod channel;
pub mod layout;
pub mod pool;

pub use affine::{
    add_c_bias_row_kernel, add_nc_bias_row_kernel, add_tensor_kernel, scale_bias_row_kernel,
};
pub use cast::cast_kernel;
pub use channel::{concat_row_kernel, slice_row_kernel};
pub use layout::{mirror_row_kernel, transpose_row_kernel};
pub use pool::pool_plane_kernel;
