//! Position evaluation with a policy-value network.
//!
//! `InferenceEngine` composes encoding, one forward pass through a
//! `PolicyValueBackend`, and decoding. With the `neural` feature the backend
//! is an ONNX Runtime session.

pub mod backend;
pub mod config;
pub mod neural;
#[cfg(feature = "neural")]
pub mod onnx;

pub use backend::{PolicyValueBackend, UniformBackend};
pub use config::{ConfigError, Device, EngineConfig};
pub use neural::InferenceEngine;
#[cfg(feature = "neural")]
pub use onnx::OrtBackend;
