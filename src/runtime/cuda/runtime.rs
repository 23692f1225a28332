//! CUDA runtime implementation

use cudarc::driver::sys::{self, CUresult};

use super::cache::{
    get_or_create_client, is_cuda_context_valid, log_cuda_memory_error, reset_client,
    try_get_cached_stream,
};
use super::client::CudaClient;
use super::device::CudaDevice;
use crate::error::{Error, Result};
use crate::runtime::Runtime;

/// CUDA runtime adapter
///
/// Memory is allocated stream-ordered on the cached client of each device, so
/// allocation, copies and kernels issued through `default_client` stay ordered.
#[derive(Clone, Debug, Default)]
pub struct CudaRuntime;

impl Runtime for CudaRuntime {
    type Device = CudaDevice;
    type Client = CudaClient;

    fn name() -> &'static str {
        "cuda"
    }

    /// Allocate GPU memory.
    ///
    /// Returns `Err(OutOfMemory)` if CUDA memory allocation fails.
    fn allocate(size_bytes: usize, device: &Self::Device) -> Result<u64> {
        if size_bytes == 0 {
            return Ok(0);
        }

        let client = get_or_create_client(device)?;

        unsafe {
            let mut ptr: u64 = 0;
            let result = sys::cuMemAllocAsync(&mut ptr, size_bytes, client.stream.cu_stream());
            if result == CUresult::CUDA_SUCCESS {
                return Ok(ptr);
            }

            // Flush pending stream-ordered frees and retry
            let _ = client.stream.synchronize();
            let result = sys::cuMemAllocAsync(&mut ptr, size_bytes, client.stream.cu_stream());
            if result == CUresult::CUDA_SUCCESS {
                return Ok(ptr);
            }

            // A stream in a sticky error state never recovers; retry on a fresh one
            drop(client);
            if let Some(new_client) = reset_client(device) {
                let result =
                    sys::cuMemAllocAsync(&mut ptr, size_bytes, new_client.stream.cu_stream());
                if result == CUresult::CUDA_SUCCESS {
                    return Ok(ptr);
                }
            }

            Err(Error::OutOfMemory { size: size_bytes })
        }
    }

    fn deallocate(ptr: u64, _size_bytes: usize, device: &Self::Device) {
        if ptr == 0 {
            return;
        }

        unsafe {
            // Memory is reclaimed with the context once it is gone
            if !is_cuda_context_valid() {
                return;
            }

            let result = if let Some(stream) = try_get_cached_stream(device.index) {
                sys::cuMemFreeAsync(ptr, stream)
            } else {
                sys::cuMemFree_v2(ptr)
            };

            if result != CUresult::CUDA_SUCCESS && result != CUresult::CUDA_ERROR_ILLEGAL_ADDRESS {
                log_cuda_memory_error("cuMemFree", ptr, result);
            }
        }
    }

    fn copy_to_device(src: &[u8], dst: u64, device: &Self::Device) -> Result<()> {
        if src.is_empty() {
            return Ok(());
        }
        if dst == 0 {
            return Err(Error::Backend("copy to a null device pointer".to_string()));
        }

        let client = get_or_create_client(device)?;

        unsafe {
            let result = sys::cuMemcpyHtoDAsync_v2(
                dst,
                src.as_ptr() as *const std::ffi::c_void,
                src.len(),
                client.stream.cu_stream(),
            );

            if result != CUresult::CUDA_SUCCESS {
                return Err(Error::Backend(format!(
                    "CUDA host-to-device copy failed: {} bytes ({:?})",
                    src.len(),
                    result
                )));
            }
        }

        // `src` may be dropped as soon as we return
        client.stream.synchronize()?;
        Ok(())
    }

    fn copy_from_device(src: u64, dst: &mut [u8], device: &Self::Device) -> Result<()> {
        if dst.is_empty() {
            return Ok(());
        }
        if src == 0 {
            return Err(Error::Backend("copy from a null device pointer".to_string()));
        }

        let client = get_or_create_client(device)?;

        unsafe {
            let result = sys::cuMemcpyDtoHAsync_v2(
                dst.as_mut_ptr() as *mut std::ffi::c_void,
                src,
                dst.len(),
                client.stream.cu_stream(),
            );

            if result != CUresult::CUDA_SUCCESS {
                return Err(Error::Backend(format!(
                    "CUDA device-to-host copy failed: {} bytes ({:?})",
                    dst.len(),
                    result
                )));
            }
        }

        client.stream.synchronize()?;
        Ok(())
    }

    fn default_device() -> Self::Device {
        CudaDevice::new(0)
    }

    /// Get the cached client for `device`.
    ///
    /// # Panics
    ///
    /// Panics if no CUDA context can be created for the device. Use
    /// [`is_cuda_available`] or [`CudaClient::for_device`] to check first.
    fn default_client(device: &Self::Device) -> Self::Client {
        match get_or_create_client(device) {
            Ok(client) => client,
            Err(e) => panic!("no CUDA client for device {}: {}", device.index, e),
        }
    }
}

/// Check if CUDA is available on this system
pub fn is_cuda_available() -> bool {
    get_or_create_client(&CudaDevice::new(0)).is_ok()
}
