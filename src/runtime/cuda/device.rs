//! CUDA device implementation

use crate::error::{Error, Result};
use crate::runtime::Device;

/// A CUDA GPU, identified by its driver ordinal
#[derive(Clone, Debug)]
pub struct CudaDevice {
    /// Index of the GPU device (0, 1, 2, ...)
    pub(crate) index: usize,
}

impl CudaDevice {
    /// Create a new CUDA device
    pub fn new(index: usize) -> Self {
        Self { index }
    }

    /// Driver ordinal of this device
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Get the compute capability of this CUDA device
    ///
    /// Returns (major, minor), e.g. (7, 5) for Turing. Kernels are built for
    /// sm_75 unless `EVALKERN_CUDA_ARCH` says otherwise.
    pub fn compute_capability(&self) -> Result<(u32, u32)> {
        use cudarc::driver::sys::CUdevice_attribute::{
            CU_DEVICE_ATTRIBUTE_COMPUTE_CAPABILITY_MAJOR, CU_DEVICE_ATTRIBUTE_COMPUTE_CAPABILITY_MINOR,
        };

        let device = cudarc::driver::result::device::get(self.index as i32).map_err(|e| {
            Error::Backend(format!("Failed to get CUDA device {}: {:?}", self.index, e))
        })?;

        let major = unsafe {
            cudarc::driver::result::device::get_attribute(
                device,
                CU_DEVICE_ATTRIBUTE_COMPUTE_CAPABILITY_MAJOR,
            )
        }?;
        let minor = unsafe {
            cudarc::driver::result::device::get_attribute(
                device,
                CU_DEVICE_ATTRIBUTE_COMPUTE_CAPABILITY_MINOR,
            )
        }?;

        Ok((major as u32, minor as u32))
    }

    /// Get memory information for this device
    ///
    /// Returns (free_bytes, total_bytes) for the current context's device.
    pub fn memory_info(&self) -> Result<(u64, u64)> {
        let (free, total) = cudarc::driver::result::mem_get_info().map_err(|e| {
            Error::Backend(format!(
                "Failed to get memory info for device {}: {:?}",
                self.index, e
            ))
        })?;
        Ok((free as u64, total as u64))
    }
}

impl Device for CudaDevice {
    fn id(&self) -> usize {
        self.index
    }

    fn name(&self) -> String {
        format!("cuda:{}", self.index)
    }
}

impl Default for CudaDevice {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_identity() {
        let a = CudaDevice::new(1);
        assert_eq!(a.id(), 1);
        assert_eq!(a.name(), "cuda:1");
        assert!(a.is_same(&CudaDevice::new(1)));
        assert!(!a.is_same(&CudaDevice::default()));
    }
}
