//! CUDA client implementation
//!
//! `CudaClient` owns the context and the stream every operation launches on.
//! There is one client per device: runtime allocation, copies and frees are
//! issued on the same stream as the kernels, so dropping a tensor is ordered
//! after every launch that used it.

use cudarc::driver::safe::{CudaContext, CudaStream};
use std::sync::Arc;

use super::CudaRuntime;
use super::cache::get_or_create_client;
use super::device::CudaDevice;
use crate::error::{Error, Result};
use crate::runtime::RuntimeClient;

/// CUDA runtime client
///
/// All operations issued through one client launch on [`CudaClient::stream`]
/// and execute in issue order. Launches are asynchronous: call
/// [`RuntimeClient::synchronize`] before reading results from another queue.
#[derive(Clone)]
pub struct CudaClient {
    /// GPU device index
    pub(crate) device: CudaDevice,

    /// CUDA context for this device
    pub(crate) context: Arc<CudaContext>,

    /// Stream on which all kernels launch
    pub(crate) stream: Arc<CudaStream>,
}

impl std::fmt::Debug for CudaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CudaClient")
            .field("device", &self.device)
            .finish_non_exhaustive()
    }
}

impl CudaClient {
    /// Get the shared client of `device`, creating it on first use
    ///
    /// Fallible counterpart of [`Runtime::default_client`](crate::runtime::Runtime::default_client).
    pub fn for_device(device: &CudaDevice) -> Result<Self> {
        get_or_create_client(device)
    }

    /// Create a client with a fresh stream on `device`'s primary context
    ///
    /// Only the client cache calls this; a second stream per device would let
    /// frees overtake kernels.
    pub(super) fn new(device: CudaDevice) -> Result<Self> {
        let context = CudaContext::new(device.index).map_err(|e| {
            Error::Backend(format!(
                "Failed to create CUDA context for device {}: {:?}",
                device.index, e
            ))
        })?;

        context.bind_to_thread().map_err(|e| {
            Error::Backend(format!("Failed to bind CUDA context to thread: {:?}", e))
        })?;

        let stream = context
            .new_stream()
            .map_err(|e| Error::Backend(format!("Failed to create CUDA stream: {:?}", e)))?;

        log::debug!("created CUDA client on device {}", device.index);

        Ok(Self {
            device,
            context,
            stream,
        })
    }

    /// The stream all operations of this client launch on
    #[inline]
    pub fn stream(&self) -> &Arc<CudaStream> {
        &self.stream
    }
}

impl RuntimeClient<CudaRuntime> for CudaClient {
    fn device(&self) -> &CudaDevice {
        &self.device
    }

    fn synchronize(&self) -> Result<()> {
        self.stream.synchronize().map_err(|e| {
            log::warn!("stream synchronization failed on {:?}: {:?}", self.device, e);
            Error::from(e)
        })
    }
}
