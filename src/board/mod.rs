//! Board representation and game-state types.
//!
//! Contains the position snapshot consumed by the encoder, the read-accessor
//! trait a rules engine implements, and the dihedral board symmetries.

pub mod state;
pub mod symmetry;

pub use state::{check_dimensions, BoardView, GameState, Player};
pub use symmetry::{Symmetry, ALL_SYMMETRIES};
