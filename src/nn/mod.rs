//! Tensor encoding and decoding around the policy-value network.
//!
//! Converts a `GameState` into the [4, n, n] input planes and the network's
//! log-policy and value outputs back into an `InferenceResult`.

pub mod decoding;
pub mod encoding;

pub use decoding::{decode_output, InferenceResult, RawOutput};
pub use encoding::{encode_state, EncodedState, NUM_PLANES};
