//! CPU device

use crate::runtime::Device;

/// The host CPU
///
/// There is only one; every `CpuDevice` compares equal to every other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CpuDevice;

impl CpuDevice {
    /// Create a handle to the host CPU
    pub fn new() -> Self {
        Self
    }
}

impl Device for CpuDevice {
    fn id(&self) -> usize {
        0
    }

    fn name(&self) -> String {
        "cpu".to_string()
    }
}
