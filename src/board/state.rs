//! Game state representation.
//!
//! A read-only snapshot of a Gomoku position as handed over by the rules
//! engine: a square grid of signed cells, the most recent move, and the side
//! to move. Cells hold `0` for empty, a positive value for a black stone and
//! a negative value for a white stone.

use serde::{Deserialize, Serialize};

use crate::error::EncodingError;

/// The side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Plays positive stones.
    Black,
    /// Plays negative stones.
    White,
}

impl Player {
    /// Returns the sign value used on the board and in the to-move plane.
    pub const fn sign(self) -> i32 {
        match self {
            Player::Black => 1,
            Player::White => -1,
        }
    }

    /// Returns the player whose stones carry the sign of `value`.
    pub fn from_sign(value: i32) -> Option<Player> {
        match value.signum() {
            1 => Some(Player::Black),
            -1 => Some(Player::White),
            _ => None,
        }
    }

    /// Returns the other player.
    pub const fn opponent(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// Returns the single-character position notation (`x` or `o`).
    pub const fn notation_char(self) -> char {
        match self {
            Player::Black => 'x',
            Player::White => 'o',
        }
    }

    /// Parses a player from its position notation character.
    pub fn from_notation_char(c: char) -> Option<Player> {
        match c {
            'x' => Some(Player::Black),
            'o' => Some(Player::White),
            _ => None,
        }
    }
}

/// Read accessors the encoder needs from a rules engine's position.
///
/// Implemented by [`GameState`]; a rules engine can implement it directly on
/// its own board type to avoid copying.
pub trait BoardView {
    /// Board side length `n`.
    fn side(&self) -> usize;

    /// Row-major cell values, `n * n` entries.
    fn cells(&self) -> &[i32];

    /// Index of the most recent move, or `None` before the first move.
    fn last_move(&self) -> Option<usize>;

    /// The side to move.
    fn current_player(&self) -> Player;
}

/// Checks that a view describes an `n x n` board with an in-range last move.
///
/// Returns the side length on success.
pub fn check_dimensions<B: BoardView + ?Sized>(view: &B) -> Result<usize, EncodingError> {
    let side = view.side();
    if side == 0 {
        return Err(EncodingError::EmptyBoard);
    }
    let cells = view.cells().len();
    if side.checked_mul(side) != Some(cells) {
        return Err(EncodingError::NotSquare { side, cells });
    }
    if let Some(index) = view.last_move() {
        if index >= cells {
            return Err(EncodingError::LastMoveOutOfRange { index, cells });
        }
    }
    Ok(side)
}

/// Owned snapshot of a position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameState {
    pub side: usize,
    /// Row-major cells: 0 empty, > 0 black, < 0 white.
    pub cells: Vec<i32>,
    pub last_move: Option<usize>,
    pub current_player: Player,
}

impl GameState {
    /// Creates an empty board with black to move and no last move.
    pub fn empty(side: usize) -> Self {
        GameState {
            side,
            cells: vec![0; side * side],
            last_move: None,
            current_player: Player::Black,
        }
    }

    /// Builds a state from rows of cell values.
    ///
    /// Fails when the rows do not form a square grid or `last_move` lies
    /// outside it.
    pub fn from_rows(
        rows: &[Vec<i32>],
        last_move: Option<usize>,
        current_player: Player,
    ) -> Result<Self, EncodingError> {
        let side = rows.len();
        let mut cells = Vec::with_capacity(side * side);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != side {
                return Err(EncodingError::RaggedRow {
                    row,
                    expected: side,
                    found: values.len(),
                });
            }
            cells.extend_from_slice(values);
        }
        let state = GameState {
            side,
            cells,
            last_move,
            current_player,
        };
        check_dimensions(&state)?;
        Ok(state)
    }

    /// Copies any board view into an owned snapshot, validating it first.
    pub fn from_view<B: BoardView + ?Sized>(view: &B) -> Result<Self, EncodingError> {
        let side = check_dimensions(view)?;
        Ok(GameState {
            side,
            cells: view.cells().to_vec(),
            last_move: view.last_move(),
            current_player: view.current_player(),
        })
    }

    /// Sets the side to move.
    pub fn with_player(mut self, player: Player) -> Self {
        self.current_player = player;
        self
    }

    /// Number of actions in the policy: one per cell.
    pub fn action_size(&self) -> usize {
        self.side * self.side
    }

    /// Row-major index of `(row, col)`.
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.side + col
    }

    /// `(row, col)` of a row-major index.
    #[inline]
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index / self.side, index % self.side)
    }

    /// Returns the cell value at `(row, col)`, or `None` off the board.
    pub fn cell(&self, row: usize, col: usize) -> Option<i32> {
        if row >= self.side || col >= self.side {
            return None;
        }
        self.cells.get(self.index(row, col)).copied()
    }

    /// Places a stone for `player` and records it as the last move.
    /// Returns false if the index is off the board or already occupied.
    pub fn place_stone(&mut self, index: usize, player: Player) -> bool {
        match self.cells.get_mut(index) {
            Some(cell) if *cell == 0 => {
                *cell = player.sign();
                self.last_move = Some(index);
                true
            }
            _ => false,
        }
    }

    /// Number of occupied cells.
    pub fn stone_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v != 0).count()
    }
}

impl BoardView for GameState {
    fn side(&self) -> usize {
        self.side
    }

    fn cells(&self) -> &[i32] {
        &self.cells
    }

    fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    fn current_player(&self) -> Player {
        self.current_player
    }
}
