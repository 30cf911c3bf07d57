//! Network output -> policy and value.
//!
//! The log-policy head is exponentiated element-wise without renormalizing,
//! and the value is passed through unclamped. Both heads are trusted to be
//! bounded by the network itself (log-softmax and tanh).

use serde::{Deserialize, Serialize};

use crate::error::RuntimeError;

/// Raw outputs of one forward pass, in model output order.
#[derive(Debug, Clone, PartialEq)]
pub struct RawOutput {
    /// Log-probabilities, one per cell.
    pub log_policy: Vec<f32>,
    /// Value head; only the first element is read.
    pub value: Vec<f32>,
}

/// Decoded evaluation handed to the search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceResult {
    /// Move probabilities over cells, row-major.
    pub policy: Vec<f64>,
    /// Position value for the side to move, nominally in [-1, 1].
    pub value: f64,
}

impl InferenceResult {
    /// Sum of the policy entries.
    pub fn policy_sum(&self) -> f64 {
        self.policy.iter().sum()
    }

    /// Index of the most probable cell, if the policy is non-empty.
    pub fn best_move(&self) -> Option<usize> {
        self.policy
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
    }
}

/// Converts raw network outputs for an `side x side` board into a result.
pub fn decode_output(raw: RawOutput, side: usize) -> Result<InferenceResult, RuntimeError> {
    let expected = side * side;
    if raw.log_policy.len() != expected {
        return Err(RuntimeError::PolicyShape {
            expected,
            found: raw.log_policy.len(),
        });
    }
    let value = *raw.value.first().ok_or(RuntimeError::EmptyValue)?;

    let policy = raw.log_policy.iter().map(|&lp| f64::from(lp.exp())).collect();

    Ok(InferenceResult {
        policy,
        value: f64::from(value),
    })
}
