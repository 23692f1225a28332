//! CUDA implementation of the operation traits.
//!
//! Validation is shared with the CPU backend; each call then launches one
//! kernel on the client's stream and returns without synchronizing.

mod bias;
mod channel;
mod layout;
mod pooling;
mod precision;
mod scale_bias;
