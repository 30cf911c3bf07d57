//! Engine state management.
//!
//! Holds the current position, the loaded network, and session options, and
//! answers protocol commands. `eval` writes one JSON line with the policy and
//! value, or an `error` line when no network is loaded or the position is
//! rejected.

use std::collections::HashMap;
use std::io::{self, Write};

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::state::GameState;
use crate::board::symmetry::Symmetry;
use crate::eval::InferenceEngine;
use crate::protocol::position::parse_position;

/// Option selecting the board symmetry applied before inference.
const SYMMETRY_OPTION: &str = "Symmetry";

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub position: Option<GameState>,
    pub options: HashMap<String, String>,
    network: Option<InferenceEngine>,
    rng: SmallRng,
}

impl Engine {
    /// Creates an engine with no network and no position.
    pub fn new() -> Self {
        Engine {
            position: None,
            options: HashMap::new(),
            network: None,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Creates an engine that evaluates with `network`.
    pub fn with_network(network: InferenceEngine) -> Self {
        Engine {
            network: Some(network),
            ..Engine::new()
        }
    }

    /// Returns true if a network is loaded.
    pub fn has_network(&self) -> bool {
        self.network.is_some()
    }

    /// Forgets the current position.
    pub fn new_game(&mut self) {
        self.position = None;
    }

    /// Sets the current position from text notation.
    /// Returns an error message on failure.
    pub fn set_position(&mut self, text: &str) -> Result<(), String> {
        match parse_position(text) {
            Ok(state) => {
                self.position = Some(state);
                Ok(())
            }
            Err(e) => Err(format!("failed to parse position: {}", e)),
        }
    }

    /// Sets an engine option.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        self.options.insert(name, value.unwrap_or_default());
    }

    /// Resolves the `Symmetry` option: absent or empty means identity,
    /// `random` draws one per evaluation, `0`-`7` selects a fixed one.
    fn symmetry(&mut self) -> Result<Symmetry, String> {
        let value = match self.options.get(SYMMETRY_OPTION) {
            Some(v) if !v.is_empty() => v.as_str(),
            _ => return Ok(Symmetry::IDENTITY),
        };
        if value.eq_ignore_ascii_case("random") {
            return Ok(Symmetry::random(&mut self.rng));
        }
        value
            .parse::<usize>()
            .ok()
            .and_then(Symmetry::from_index)
            .ok_or_else(|| format!("invalid Symmetry option '{}'", value))
    }

    /// Handles the handshake: writes id, options, and `hellook`.
    pub fn handle_hello<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name gomoku-nn")?;
        writeln!(out, "id author gomoku-nn")?;
        writeln!(out, "option name Symmetry type string default 0")?;
        writeln!(out, "hellook")?;
        out.flush()
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Handles the `eval` command.
    pub fn handle_eval<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        match self.evaluate() {
            Ok(line) => writeln!(out, "{}", line)?,
            Err(e) => writeln!(out, "error {}", e)?,
        }
        out.flush()
    }

    /// Evaluates the current position and serializes the result.
    fn evaluate(&mut self) -> Result<String, String> {
        let symmetry = self.symmetry()?;
        let network = self.network.as_ref().ok_or("no network loaded")?;
        let state = self.position.as_ref().ok_or("no position set")?;
        let result = network
            .infer_with_symmetry(state, symmetry)
            .map_err(|e| e.to_string())?;
        serde_json::to_string(&result).map_err(|e| e.to_string())
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
