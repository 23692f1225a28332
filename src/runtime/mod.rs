//! Runtime backends for tensor computation
//!
//! This module defines the `Runtime` trait and provides implementations
//! for the CPU reference backend and the CUDA backend.
//!
//! # Architecture
//!
//! ```text
//! Runtime (backend identity, allocation, host transfers)
//! ├── Device (identifies a specific GPU/CPU)
//! └── Client (execution queue; implements every operation trait)
//! ```

mod traits;

#[cfg(feature = "cpu")]
pub mod cpu;

#[cfg(feature = "cuda")]
pub mod cuda;

pub use traits::{Device, Runtime, RuntimeClient};
