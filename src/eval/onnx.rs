//! ONNX Runtime backend.
//!
//! Loads a policy-value model with the `ort` crate and runs it on the
//! configured device. The model takes one `[1, 4, n, n]` float input and
//! returns log-policy then value.

#[cfg(feature = "cuda")]
use ort::execution_providers::{CUDAExecutionProvider, ExecutionProvider};
use ort::execution_providers::CPUExecutionProvider;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;

use super::backend::PolicyValueBackend;
use super::config::{Device, EngineConfig};
use crate::error::{LoadError, RuntimeError};
use crate::nn::{EncodedState, RawOutput};

/// A loaded ONNX session bound to one device.
pub struct OrtBackend {
    session: Session,
    device: Device,
}

impl OrtBackend {
    /// Builds a session from `config.model_path` on the configured device.
    ///
    /// An unavailable accelerator fails the load unless
    /// `config.allow_cpu_fallback` is set.
    pub fn load(config: &EngineConfig) -> Result<Self, LoadError> {
        let device = select_device(config)?;

        let builder = Session::builder()
            .and_then(|b| b.with_optimization_level(optimization_level(config.optimization_level)))
            .and_then(|b| b.with_intra_threads(config.intra_threads))
            .map_err(|e| LoadError::Runtime(e.to_string()))?;

        let builder = match device {
            Device::Cpu => builder
                .with_execution_providers([CPUExecutionProvider::default().build()])
                .map_err(|e| LoadError::Runtime(e.to_string()))?,
            #[cfg(feature = "cuda")]
            Device::Cuda { device_id } => builder
                .with_execution_providers([CUDAExecutionProvider::default()
                    .with_device_id(device_id)
                    .build()
                    .error_on_failure()])
                .map_err(|_| LoadError::DeviceUnavailable(device))?,
            #[cfg(not(feature = "cuda"))]
            Device::Cuda { .. } => return Err(LoadError::DeviceUnavailable(device)),
        };

        let session = builder
            .commit_from_file(&config.model_path)
            .map_err(|e| LoadError::Runtime(e.to_string()))?;

        Ok(OrtBackend { session, device })
    }

    /// The device the session runs on.
    pub fn device(&self) -> Device {
        self.device
    }
}

impl PolicyValueBackend for OrtBackend {
    fn forward(&mut self, input: &EncodedState) -> Result<RawOutput, RuntimeError> {
        let tensor = Value::from_array((input.input_shape(), input.to_vec()))
            .map_err(|e| RuntimeError::Session(e.to_string()))?;

        let outputs = self
            .session
            .run(ort::inputs![tensor])
            .map_err(|e| RuntimeError::Session(e.to_string()))?;

        if outputs.len() < 2 {
            return Err(RuntimeError::MissingOutput(outputs.len()));
        }

        let (_shape, policy) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| RuntimeError::Session(e.to_string()))?;
        let (_shape, value) = outputs[1]
            .try_extract_tensor::<f32>()
            .map_err(|e| RuntimeError::Session(e.to_string()))?;

        Ok(RawOutput {
            log_policy: policy.to_vec(),
            value: value.to_vec(),
        })
    }

    fn name(&self) -> &str {
        "onnx"
    }
}

/// Resolves the requested device against what the runtime offers.
fn select_device(config: &EngineConfig) -> Result<Device, LoadError> {
    match config.device {
        Device::Cpu => Ok(Device::Cpu),
        requested @ Device::Cuda { .. } => {
            if cuda_available() {
                Ok(requested)
            } else if config.allow_cpu_fallback {
                eprintln!("info string {} unavailable, falling back to cpu", requested);
                Ok(Device::Cpu)
            } else {
                Err(LoadError::DeviceUnavailable(requested))
            }
        }
    }
}

#[cfg(feature = "cuda")]
fn cuda_available() -> bool {
    CUDAExecutionProvider::default()
        .is_available()
        .unwrap_or(false)
}

#[cfg(not(feature = "cuda"))]
fn cuda_available() -> bool {
    false
}

fn optimization_level(level: u8) -> GraphOptimizationLevel {
    match level {
        0 => GraphOptimizationLevel::Disable,
        1 => GraphOptimizationLevel::Level1,
        2 => GraphOptimizationLevel::Level2,
        _ => GraphOptimizationLevel::Level3,
    }
}
