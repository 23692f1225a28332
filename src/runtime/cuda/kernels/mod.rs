//! CUDA kernel launchers
//!
//! Each `.cu` file in this directory is compiled to one PTX module by
//! `build.rs`. Kernels are named `{op}_{dtype}` (`cast_{src}_{dst}` for casts)
//! and every launcher issues onto the client's stream without synchronizing.

mod affine;
mod cast;
mod channel;
mod layout;
mod loader;
mod pool;

pub use affine::{
    ScaleBiasPtrs, launch_add_c_bias, launch_add_nc_bias, launch_add_tensor, launch_scale_bias,
};
pub use cast::launch_cast;
pub use channel::{launch_channel_concat, launch_channel_slice};
pub use layout::{launch_mirror, launch_transpose};
pub use pool::launch_pool;
