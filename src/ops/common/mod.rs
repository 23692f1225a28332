//! Common utilities and validation logic shared across operation backends.

pub mod validation;

pub use validation::{
    ensure_disjoint, ensure_disjoint_or_same, ensure_dtype, ensure_same_dtype, ensure_shape,
    image_dims, plane_dims, validate_mask, validate_mask_sum,
};
