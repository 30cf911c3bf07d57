//! Inference engine configuration.
//!
//! Names the model file and the device it runs on. CPU fallback for a
//! requested accelerator is an explicit opt-in, never implicit.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default number of intra-op threads for the ONNX session.
const DEFAULT_INTRA_THREADS: usize = 4;

/// Highest ONNX Runtime graph optimization level.
const MAX_OPTIMIZATION_LEVEL: u8 = 3;

/// Compute device for the forward pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Device {
    Cpu,
    Cuda { device_id: i32 },
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => write!(f, "cpu"),
            Device::Cuda { device_id } => write!(f, "cuda:{}", device_id),
        }
    }
}

impl FromStr for Device {
    type Err = ConfigError;

    /// Parses `cpu`, `cuda`, or `cuda:<id>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cpu" => Ok(Device::Cpu),
            "cuda" | "gpu" => Ok(Device::Cuda { device_id: 0 }),
            other => other
                .strip_prefix("cuda:")
                .and_then(|id| id.parse::<i32>().ok())
                .filter(|&id| id >= 0)
                .map(|device_id| Device::Cuda { device_id })
                .ok_or_else(|| ConfigError::InvalidDevice(s.to_string())),
        }
    }
}

impl TryFrom<String> for Device {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Device> for String {
    fn from(d: Device) -> String {
        d.to_string()
    }
}

/// Errors reading or validating an [`EngineConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid device '{0}', expected cpu, cuda or cuda:<id>")]
    InvalidDevice(String),

    #[error("intra_threads must be at least 1")]
    InvalidThreads,

    #[error("optimization_level {0} out of range 0..=3")]
    InvalidOptimizationLevel(u8),
}

/// Settings for loading a policy-value network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Path to the `.onnx` model.
    pub model_path: PathBuf,
    /// Device to run on.
    pub device: Device,
    /// Run on CPU when `device` is an unavailable accelerator.
    pub allow_cpu_fallback: bool,
    /// Intra-op thread count for the session.
    pub intra_threads: usize,
    /// Graph optimization level, 0 (disabled) to 3 (all).
    pub optimization_level: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            model_path: PathBuf::new(),
            device: Device::Cuda { device_id: 0 },
            allow_cpu_fallback: false,
            intra_threads: DEFAULT_INTRA_THREADS,
            optimization_level: MAX_OPTIMIZATION_LEVEL,
        }
    }
}

impl EngineConfig {
    /// Default settings for the given model path.
    pub fn new(model_path: impl Into<PathBuf>) -> Self {
        EngineConfig {
            model_path: model_path.into(),
            ..Default::default()
        }
    }

    /// Parses a JSON config; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON config file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Checks numeric settings are in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.intra_threads == 0 {
            return Err(ConfigError::InvalidThreads);
        }
        if self.optimization_level > MAX_OPTIMIZATION_LEVEL {
            return Err(ConfigError::InvalidOptimizationLevel(
                self.optimization_level,
            ));
        }
        Ok(())
    }
}
