//! Evaluation protocol handling.
//!
//! Text notation for positions and the command parser for the main loop.

pub mod parser;
pub mod position;

pub use parser::{parse_command, Command};
pub use position::{format_position, parse_position, PositionError};
