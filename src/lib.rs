//! gomoku-nn library.
//!
//! Encodes Gomoku positions into the four input planes of a policy-value
//! network, runs the network through ONNX Runtime, and decodes its outputs
//! into move probabilities and a position value for tree search.

pub mod board;
pub mod engine;
pub mod error;
pub mod eval;
pub mod nn;
pub mod protocol;

pub use board::{BoardView, GameState, Player, Symmetry};
pub use error::{EncodingError, InferError, LoadError, RuntimeError};
pub use eval::{Device, EngineConfig, InferenceEngine, PolicyValueBackend};
pub use nn::{decode_output, encode_state, EncodedState, InferenceResult, RawOutput};
