//! CPU implementation of the operation traits.
//!
//! Each family validates through the shared helpers in `crate::ops`, then
//! distributes rows of its plan across the client's thread pool.

mod bias;
mod channel;
mod layout;
mod pooling;
mod precision;
mod scale_bias;
