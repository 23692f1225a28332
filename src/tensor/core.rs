//! Core Tensor type

use super::Storage;
use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use crate::runtime::Runtime;
use std::fmt;

/// Contiguous n-dimensional view of device memory
///
/// `Tensor` pairs reference-counted [`Storage`] with a shape. It carries no
/// layout tag: the same `[2, 8, 19, 19]` buffer is NCHW or NHWC depending on
/// the [`DataFormat`](super::DataFormat) an operation is called with.
///
/// Cloning a tensor shares its storage. Operations write through output
/// tensors in place, so two clones observe each other's writes.
///
/// # Example
///
/// ```ignore
/// use evalkern::prelude::*;
///
/// let device = CpuDevice::new();
/// let t = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0, 3.0, 4.0], &[1, 1, 2, 2], &device);
/// ```
pub struct Tensor<R: Runtime> {
    /// Device memory
    storage: Storage<R>,
    /// Row-major extents
    shape: Vec<usize>,
}

impl<R: Runtime> Tensor<R> {
    /// Create a tensor from storage and a shape
    ///
    /// Returns an error if the shape does not cover exactly the storage length.
    pub fn from_parts(storage: Storage<R>, shape: &[usize]) -> Result<Self> {
        let numel: usize = shape.iter().product();
        if numel != storage.len() {
            return Err(Error::ShapeMismatch {
                expected: shape.to_vec(),
                got: vec![storage.len()],
            });
        }
        Ok(Self {
            storage,
            shape: shape.to_vec(),
        })
    }

    /// Create a tensor from a slice of data
    ///
    /// # Panics
    ///
    /// Panics if `data.len()` does not equal the product of the `shape` dimensions.
    /// For a fallible alternative, use [`Self::try_from_slice`].
    pub fn from_slice<T: Element>(data: &[T], shape: &[usize], device: &R::Device) -> Self {
        Self::try_from_slice(data, shape, device).expect("Tensor::from_slice failed")
    }

    /// Create a tensor from a slice of data (fallible version)
    pub fn try_from_slice<T: Element>(
        data: &[T],
        shape: &[usize],
        device: &R::Device,
    ) -> Result<Self> {
        let expected_len: usize = shape.iter().product();
        if data.len() != expected_len {
            return Err(Error::ShapeMismatch {
                expected: shape.to_vec(),
                got: vec![data.len()],
            });
        }

        let storage = Storage::from_slice(data, device)?;
        Ok(Self {
            storage,
            shape: shape.to_vec(),
        })
    }

    /// Create a tensor filled with zeros
    pub fn zeros(shape: &[usize], dtype: DType, device: &R::Device) -> Self {
        Self::try_zeros(shape, dtype, device).expect("Tensor::zeros failed")
    }

    /// Create a tensor filled with zeros (fallible version)
    pub fn try_zeros(shape: &[usize], dtype: DType, device: &R::Device) -> Result<Self> {
        Self::try_full_scalar(shape, dtype, 0.0, device)
    }

    /// Create a tensor filled with a scalar value (converted to `dtype`)
    pub fn full_scalar(shape: &[usize], dtype: DType, value: f32, device: &R::Device) -> Self {
        Self::try_full_scalar(shape, dtype, value, device).expect("Tensor::full_scalar failed")
    }

    /// Create a tensor filled with a scalar value (fallible version)
    pub fn try_full_scalar(
        shape: &[usize],
        dtype: DType,
        value: f32,
        device: &R::Device,
    ) -> Result<Self> {
        let len: usize = shape.iter().product();
        match dtype {
            DType::F32 => Self::try_from_slice(&vec![value; len], shape, device),
            DType::F16 => {
                Self::try_from_slice(&vec![half::f16::from_f32(value); len], shape, device)
            }
        }
    }

    // ===== Accessors =====

    /// Get the storage
    #[inline]
    pub fn storage(&self) -> &Storage<R> {
        &self.storage
    }

    /// Get the shape
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Get the number of dimensions (rank)
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Get the total number of elements
    #[inline]
    pub fn numel(&self) -> usize {
        self.shape.iter().product()
    }

    /// Get the element type
    #[inline]
    pub fn dtype(&self) -> DType {
        self.storage.dtype()
    }

    /// Get the device
    #[inline]
    pub fn device(&self) -> &R::Device {
        self.storage.device()
    }

    /// Raw device pointer of the first element
    #[inline]
    pub fn ptr(&self) -> u64 {
        self.storage.ptr()
    }

    /// Whether two tensors overlap in device memory
    #[inline]
    pub fn aliases(&self, other: &Self) -> bool {
        self.storage.overlaps(&other.storage)
    }

    /// Reinterpret with a new shape of the same element count (zero-copy)
    pub fn reshape(&self, shape: &[usize]) -> Result<Self> {
        Self::from_parts(self.storage.clone(), shape)
    }

    /// Copy the tensor contents to the host
    ///
    /// # Panics
    ///
    /// Panics if `T` does not match the tensor dtype or the device copy fails.
    /// For a fallible alternative, use [`Self::try_to_vec`].
    pub fn to_vec<T: Element>(&self) -> Vec<T> {
        self.try_to_vec().expect("Tensor::to_vec failed")
    }

    /// Copy the tensor contents to the host (fallible version)
    pub fn try_to_vec<T: Element>(&self) -> Result<Vec<T>> {
        self.storage.to_vec()
    }
}

impl<R: Runtime> Clone for Tensor<R> {
    /// Clone shares the storage (zero-copy)
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            shape: self.shape.clone(),
        }
    }
}

impl<R: Runtime> fmt::Debug for Tensor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape)
            .field("dtype", &self.dtype())
            .field("storage", &self.storage)
            .finish()
    }
}
