//! Neural network evaluation.
//!
//! `InferenceEngine` owns one loaded policy-value network for the life of the
//! process and turns a position into a policy and value in a single blocking
//! call: encode, forward pass, decode. The backend sits behind a mutex, so an
//! engine shared across search threads serializes its forward passes.
//! Independent engines (one per self-play worker, say) do not interact.

use std::path::Path;
use std::sync::Mutex;

use super::backend::PolicyValueBackend;
use super::config::{Device, EngineConfig};
#[cfg(feature = "neural")]
use super::onnx::OrtBackend;
use crate::board::state::BoardView;
use crate::board::symmetry::Symmetry;
use crate::error::{InferError, LoadError, RuntimeError};
use crate::nn::{decode_output, encode_state, EncodedState, InferenceResult, RawOutput};

/// A loaded policy-value network.
pub struct InferenceEngine {
    backend: Mutex<Box<dyn PolicyValueBackend>>,
    device: Device,
    /// Board side the network was built for, when known.
    side: Option<usize>,
}

impl InferenceEngine {
    /// Loads an ONNX model from `path` with the default configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        Self::load_with_config(&EngineConfig::new(path.as_ref()))
    }

    /// Loads an ONNX model as described by `config`.
    ///
    /// Load failures are not retried.
    pub fn load_with_config(config: &EngineConfig) -> Result<Self, LoadError> {
        config.validate()?;
        if !config.model_path.is_file() {
            return Err(LoadError::ModelNotFound(config.model_path.clone()));
        }

        #[cfg(feature = "neural")]
        {
            let backend = OrtBackend::load(config)?;
            let device = backend.device();
            eprintln!(
                "info string Loaded ONNX model {} on {}",
                config.model_path.display(),
                device
            );
            Ok(InferenceEngine {
                backend: Mutex::new(Box::new(backend)),
                device,
                side: None,
            })
        }

        #[cfg(not(feature = "neural"))]
        {
            Err(LoadError::Unsupported)
        }
    }

    /// Wraps an already constructed backend running on the CPU.
    pub fn with_backend<B: PolicyValueBackend + 'static>(backend: B) -> Self {
        InferenceEngine {
            backend: Mutex::new(Box::new(backend)),
            device: Device::Cpu,
            side: None,
        }
    }

    /// Restricts the engine to boards of one side length.
    ///
    /// Positions of any other size then fail before the forward pass.
    pub fn for_board_size(mut self, side: usize) -> Self {
        self.side = Some(side);
        self
    }

    /// The device the network runs on.
    pub fn device(&self) -> Device {
        self.device
    }

    /// Board side the engine is restricted to, if any.
    pub fn board_size(&self) -> Option<usize> {
        self.side
    }

    /// Name of the backend, for diagnostics.
    pub fn backend_name(&self) -> Result<String, RuntimeError> {
        let backend = self.backend.lock().map_err(|_| RuntimeError::Poisoned)?;
        Ok(backend.name().to_string())
    }

    /// Runs one forward pass, returning raw log-policy and value.
    ///
    /// Blocks until any concurrent call on this engine has finished.
    pub fn forward(&self, input: &EncodedState) -> Result<RawOutput, RuntimeError> {
        if let Some(expected) = self.side {
            if input.side() != expected {
                return Err(RuntimeError::BoardSizeMismatch {
                    expected,
                    found: input.side(),
                });
            }
        }
        let mut backend = self.backend.lock().map_err(|_| RuntimeError::Poisoned)?;
        backend.forward(input)
    }

    /// Evaluates a position: move probabilities over cells and a value for
    /// the side to move.
    pub fn infer<B: BoardView + ?Sized>(&self, state: &B) -> Result<InferenceResult, InferError> {
        let encoded = encode_state(state)?;
        let raw = self.forward(&encoded)?;
        Ok(decode_output(raw, encoded.side())?)
    }

    /// Evaluates the position seen through `symmetry`.
    ///
    /// The policy is mapped back to the original orientation; the value is
    /// unaffected.
    pub fn infer_with_symmetry<B: BoardView + ?Sized>(
        &self,
        state: &B,
        symmetry: Symmetry,
    ) -> Result<InferenceResult, InferError> {
        if symmetry.is_identity() {
            return self.infer(state);
        }
        let transformed = symmetry.apply_state(state)?;
        let mut result = self.infer(&transformed)?;
        result.policy = symmetry
            .inverse()
            .apply_cells(&result.policy, transformed.side)?;
        Ok(result)
    }
}
