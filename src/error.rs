//! Error types for encoding, model loading, and inference.
//!
//! Every failure is returned to the immediate caller. Encoding errors are
//! recoverable (reject the state); load errors are fatal at startup; runtime
//! errors fail only the inference call that raised them.

use std::path::PathBuf;

use crate::eval::config::{ConfigError, Device};

/// A game-state snapshot that cannot be encoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    #[error("board has side length 0")]
    EmptyBoard,

    #[error("board side {side} does not match {cells} cells")]
    NotSquare { side: usize, cells: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("last move {index} is outside the board (0..{cells})")]
    LastMoveOutOfRange { index: usize, cells: usize },
}

/// Failure to bring a network into the loaded state.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("model file not found: {}", .0.display())]
    ModelNotFound(PathBuf),

    #[error("onnx runtime rejected the model: {0}")]
    Runtime(String),

    #[error("device {0} is unavailable")]
    DeviceUnavailable(Device),

    #[error("built without the 'neural' feature; no model runtime available")]
    Unsupported,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Failure during a forward pass or while reading its outputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    #[error("session run failed: {0}")]
    Session(String),

    #[error("model produced {0} outputs, expected log-policy and value")]
    MissingOutput(usize),

    #[error("log-policy has {found} entries, expected {expected}")]
    PolicyShape { expected: usize, found: usize },

    #[error("value output is empty")]
    EmptyValue,

    #[error("network expects side {expected}, got {found}")]
    BoardSizeMismatch { expected: usize, found: usize },

    #[error("inference lock poisoned by a panicking caller")]
    Poisoned,
}

/// Any failure of the composed encode, forward, decode call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InferError {
    #[error("encoding failed: {0}")]
    Encoding(#[from] EncodingError),

    #[error("inference failed: {0}")]
    Runtime(#[from] RuntimeError),
}
