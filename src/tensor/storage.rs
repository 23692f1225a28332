//! Reference-counted device buffers behind [`Tensor`](super::Tensor)

use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use crate::runtime::Runtime;
use std::fmt;
use std::sync::Arc;

/// A typed run of `len` elements at a device address
///
/// Reshaped tensors clone the `Storage`, not the memory. A buffer created by
/// [`Storage::from_slice`] is released through [`Runtime::deallocate`] once the
/// last clone goes away; a buffer wrapped with [`Storage::from_ptr`] belongs to
/// whoever handed it over and is left alone.
pub struct Storage<R: Runtime> {
    buf: Arc<Buffer<R>>,
}

struct Buffer<R: Runtime> {
    /// Device address; host pointers are stored as integers too
    addr: u64,
    len: usize,
    dtype: DType,
    device: R::Device,
    /// Released on drop
    owned: bool,
}

impl<R: Runtime> Buffer<R> {
    fn byte_len(&self) -> usize {
        self.len * self.dtype.size_in_bytes()
    }
}

impl<R: Runtime> Storage<R> {
    /// Upload `data` into a freshly allocated buffer
    pub fn from_slice<T: Element>(data: &[T], device: &R::Device) -> Result<Self> {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let addr = R::allocate(bytes.len(), device)?;
        if let Err(e) = R::copy_to_device(bytes, addr, device) {
            R::deallocate(addr, bytes.len(), device);
            return Err(e);
        }
        Ok(Self::wrap(addr, data.len(), T::DTYPE, device, true))
    }

    /// Borrow memory owned elsewhere, e.g. an inference engine's activation buffers
    ///
    /// # Safety
    ///
    /// `ptr` must address `len` elements of `dtype` on `device`, and stay valid
    /// until every clone of the returned storage (and every tensor built on it)
    /// is dropped. The memory is never freed by this crate.
    pub unsafe fn from_ptr(ptr: u64, len: usize, dtype: DType, device: &R::Device) -> Self {
        Self::wrap(ptr, len, dtype, device, false)
    }

    fn wrap(addr: u64, len: usize, dtype: DType, device: &R::Device, owned: bool) -> Self {
        Self {
            buf: Arc::new(Buffer {
                addr,
                len,
                dtype,
                device: device.clone(),
                owned,
            }),
        }
    }

    #[inline]
    pub fn ptr(&self) -> u64 {
        self.buf.addr
    }

    /// Element count
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.len == 0
    }

    #[inline]
    pub fn dtype(&self) -> DType {
        self.buf.dtype
    }

    #[inline]
    pub fn device(&self) -> &R::Device {
        &self.buf.device
    }

    #[inline]
    pub fn size_in_bytes(&self) -> usize {
        self.buf.byte_len()
    }

    /// False for memory wrapped with [`Storage::from_ptr`]
    #[inline]
    pub fn is_owned(&self) -> bool {
        self.buf.owned
    }

    /// Whether the byte ranges of two buffers intersect
    ///
    /// Empty buffers overlap nothing, even when their address falls inside
    /// another buffer.
    pub fn overlaps(&self, other: &Self) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        let (a, b) = (self.ptr(), other.ptr());
        a < b + other.size_in_bytes() as u64 && b < a + self.size_in_bytes() as u64
    }

    /// Download the buffer to the host as `T`
    pub fn to_vec<T: Element>(&self) -> Result<Vec<T>> {
        if T::DTYPE != self.buf.dtype {
            return Err(Error::DTypeMismatch {
                lhs: self.buf.dtype,
                rhs: T::DTYPE,
            });
        }
        let mut host = vec![T::zeroed(); self.buf.len];
        R::copy_from_device(self.buf.addr, bytemuck::cast_slice_mut(&mut host), self.device())?;
        Ok(host)
    }
}

impl<R: Runtime> Clone for Storage<R> {
    fn clone(&self) -> Self {
        Self {
            buf: Arc::clone(&self.buf),
        }
    }
}

impl<R: Runtime> Drop for Buffer<R> {
    fn drop(&mut self) {
        if self.owned && self.addr != 0 {
            R::deallocate(self.addr, self.byte_len(), &self.device);
        }
    }
}

impl<R: Runtime> fmt::Debug for Storage<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Storage({} x {:?} @ {:#x}{}, refs={})",
            self.buf.len,
            self.buf.dtype,
            self.buf.addr,
            if self.buf.owned { "" } else { ", borrowed" },
            Arc::strong_count(&self.buf)
        )
    }
}
