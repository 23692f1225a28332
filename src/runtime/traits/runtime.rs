//! Backend trait: memory and host transfers

use crate::error::Result;

/// A backend the evaluation kernels run on
///
/// Everything is resolved statically: ops are generic over `R: Runtime` and
/// never box a backend. Kernels only read and write buffers they are handed.
/// The memory functions below let tests, benches and callers that want this
/// crate to own their tensors create those buffers in the first place.
///
/// ```ignore
/// let device = CpuRuntime::default_device();
/// let addr = CpuRuntime::allocate(64 * 4, &device)?;
/// CpuRuntime::copy_to_device(bytemuck::cast_slice(&[0.0f32; 64]), addr, &device)?;
/// CpuRuntime::deallocate(addr, 64 * 4, &device);
/// ```
pub trait Runtime: Clone + Send + Sync + 'static {
    type Device: super::Device;

    /// Queue that operations are issued on
    type Client: super::RuntimeClient<Self>;

    /// Short backend label, `"cpu"` or `"cuda"`
    fn name() -> &'static str;

    /// Reserve `size_bytes` on `device`
    ///
    /// A zero-byte request yields address 0 without touching the allocator.
    /// Fails with [`Error::OutOfMemory`](crate::error::Error::OutOfMemory) when
    /// the backend cannot satisfy it.
    fn allocate(size_bytes: usize, device: &Self::Device) -> Result<u64>;

    /// Release memory from [`Runtime::allocate`]; `size_bytes` must match
    fn deallocate(ptr: u64, size_bytes: usize, device: &Self::Device);

    fn copy_to_device(src: &[u8], dst: u64, device: &Self::Device) -> Result<()>;

    fn copy_from_device(src: u64, dst: &mut [u8], device: &Self::Device) -> Result<()>;

    fn default_device() -> Self::Device;

    /// Shared client of `device`
    fn default_client(device: &Self::Device) -> Self::Client;
}
