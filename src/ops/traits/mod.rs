//! Operation traits.
//!
//! Each family is a trait generic over the runtime and implemented by that
//! runtime's client. Implementations are in the backend-specific modules
//! (cpu/, cuda/).

mod bias;
mod channel;
mod layout;
mod pooling;
mod precision;
mod scale_bias;

pub use bias::BiasOps;
pub use channel::ChannelOps;
pub use layout::LayoutOps;
pub use pooling::PoolingOps;
pub use precision::PrecisionOps;
pub use scale_bias::ScaleBiasOps;
