//! Forward-pass backends.
//!
//! A backend runs one synchronous forward pass over one encoded position.
//! The ONNX Runtime backend lives in `eval::onnx`; `UniformBackend` is a
//! model-free baseline used in tests and when explicitly requested.

use crate::error::RuntimeError;
use crate::nn::{EncodedState, RawOutput};

/// A policy-value network that can evaluate one encoded position.
///
/// Implementations may hold device state and need `&mut self`; the
/// `InferenceEngine` serializes calls.
pub trait PolicyValueBackend: Send {
    /// Runs a forward pass, returning log-policy and value in output order.
    fn forward(&mut self, input: &EncodedState) -> Result<RawOutput, RuntimeError>;

    /// Short description for diagnostics.
    fn name(&self) -> &str;
}

/// Uniform policy and zero value for any board size.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformBackend;

impl PolicyValueBackend for UniformBackend {
    fn forward(&mut self, input: &EncodedState) -> Result<RawOutput, RuntimeError> {
        let cells = input.side() * input.side();
        let log_p = -(cells as f32).ln();
        Ok(RawOutput {
            log_policy: vec![log_p; cells],
            value: vec![0.0],
        })
    }

    fn name(&self) -> &str {
        "uniform"
    }
}
