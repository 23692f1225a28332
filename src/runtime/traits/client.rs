//! Trait for runtime clients that handle operation dispatch

use super::Runtime;
use crate::error::Result;

/// Execution context on which operations are issued
///
/// A client is the explicit queue of the kernel API: every operation trait is
/// implemented by the client type, and operations issued through one client
/// execute in issue order. Device backends launch asynchronously; call
/// [`RuntimeClient::synchronize`] before reading results produced by another
/// queue or to surface deferred execution errors.
pub trait RuntimeClient<R: Runtime>: Clone + Send + Sync {
    /// Get the device this client operates on
    fn device(&self) -> &R::Device;

    /// Wait for all pending operations to complete
    ///
    /// Errors raised while kernels executed are reported here.
    fn synchronize(&self) -> Result<()>;
}
