//! DType dispatch utilities
//!
//! This module provides the `dispatch_dtype!` macro for runtime type dispatch:
//! it converts a `DType` value into a concrete generic element type so that a
//! single generic kernel serves both precisions.
//!
//! # Usage
//!
//! ```ignore
//! fn my_operation(dtype: DType) -> Result<()> {
//!     dispatch_dtype!(dtype, T => {
//!         // T is now f32 or half::f16
//!         let size = std::mem::size_of::<T>();
//!         Ok(())
//!     })
//! }
//! ```
//!
//! ## Supported Types
//!
//! - `F32` -> `f32`
//! - `F16` -> `half::f16`

/// Macro for runtime dtype dispatch to typed operations.
///
/// Executes `$body` with `$T` bound to the Rust type of `$dtype`. The match is
/// exhaustive, so adding a dtype forces every dispatch site to handle it.
#[macro_export]
macro_rules! dispatch_dtype {
    ($dtype:expr, $T:ident => $body:block) => {
        match $dtype {
            $crate::dtype::DType::F32 => {
                type $T = f32;
                $body
            }
            $crate::dtype::DType::F16 => {
                type $T = half::f16;
                $body
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::dtype::{DType, Element};

    fn dtype_of(dtype: DType) -> DType {
        dispatch_dtype!(dtype, T => { <T as Element>::DTYPE })
    }

    #[test]
    fn test_dispatch_binds_element_type() {
        assert_eq!(dtype_of(DType::F32), DType::F32);
        assert_eq!(dtype_of(DType::F16), DType::F16);
    }
}
