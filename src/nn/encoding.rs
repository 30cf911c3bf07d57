//! Game state -> tensor encoding for neural network inference.
//!
//! Produces a [4, n, n] f32 tensor in the plane order the policy-value
//! network was trained on:
//!   0: black stones (cell > 0)
//!   1: white stones (cell < 0)
//!   2: last move (single 1, all zero before the first move)
//!   3: side to move, every cell set to +1 (black) or -1 (white)
//!
//! Encoding is a pure host-side function of its input; the tensor is handed
//! to the inference backend and dropped after the call.

use ndarray::{Array3, ArrayView2, Axis};

use crate::board::state::{check_dimensions, BoardView};
use crate::error::EncodingError;

/// Number of input planes.
pub const NUM_PLANES: usize = 4;

/// Plane offsets.
pub const PLANE_BLACK: usize = 0;
pub const PLANE_WHITE: usize = 1;
pub const PLANE_LAST_MOVE: usize = 2;
pub const PLANE_TO_MOVE: usize = 3;

/// An encoded position, ready to be fed to the network.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedState {
    planes: Array3<f32>,
}

impl EncodedState {
    /// Board side length `n`.
    pub fn side(&self) -> usize {
        self.planes.shape()[1]
    }

    /// The full `[planes, n, n]` array.
    pub fn planes(&self) -> &Array3<f32> {
        &self.planes
    }

    /// A single `n x n` plane.
    pub fn plane(&self, index: usize) -> ArrayView2<'_, f32> {
        self.planes.index_axis(Axis(0), index)
    }

    /// Network input shape with a leading batch dimension of one.
    pub fn input_shape(&self) -> [usize; 4] {
        let n = self.side();
        [1, NUM_PLANES, n, n]
    }

    /// Flattens the planes in row-major order (plane, row, column).
    pub fn to_vec(&self) -> Vec<f32> {
        self.planes.iter().copied().collect()
    }
}

/// Encodes a position into its four input planes.
///
/// Fails on a non-square board or a last move outside `0..n*n`; a missing
/// last move leaves plane 2 all zero.
pub fn encode_state<B: BoardView + ?Sized>(state: &B) -> Result<EncodedState, EncodingError> {
    let n = check_dimensions(state)?;
    let mut planes = Array3::<f32>::zeros((NUM_PLANES, n, n));

    for (idx, &value) in state.cells().iter().enumerate() {
        let (row, col) = (idx / n, idx % n);
        if value > 0 {
            planes[[PLANE_BLACK, row, col]] = 1.0;
        } else if value < 0 {
            planes[[PLANE_WHITE, row, col]] = 1.0;
        }
    }

    if let Some(m) = state.last_move() {
        planes[[PLANE_LAST_MOVE, m / n, m % n]] = 1.0;
    }

    planes
        .index_axis_mut(Axis(0), PLANE_TO_MOVE)
        .fill(state.current_player().sign() as f32);

    Ok(EncodedState { planes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::state::{GameState, Player};

    fn count_ones(encoded: &EncodedState, plane: usize) -> usize {
        encoded.plane(plane).iter().filter(|&&v| v == 1.0).count()
    }

    #[test]
    fn empty_board_black_to_move() {
        let encoded = encode_state(&GameState::empty(8)).unwrap();
        assert_eq!(encoded.planes().shape(), &[4, 8, 8]);
        for plane in [PLANE_BLACK, PLANE_WHITE, PLANE_LAST_MOVE] {
            assert!(
                encoded.plane(plane).iter().all(|&v| v == 0.0),
                "plane {} should be zero",
                plane
            );
        }
        assert!(encoded.plane(PLANE_TO_MOVE).iter().all(|&v| v == 1.0));
    }

    #[test]
    fn single_stone_white_to_move() {
        let mut state = GameState::empty(8).with_player(Player::White);
        state.place_stone(5, Player::Black);
        let encoded = encode_state(&state).unwrap();

        assert_eq!(count_ones(&encoded, PLANE_BLACK), 1);
        assert_eq!(encoded.plane(PLANE_BLACK)[[0, 5]], 1.0);
        assert!(encoded.plane(PLANE_WHITE).iter().all(|&v| v == 0.0));
        assert_eq!(count_ones(&encoded, PLANE_LAST_MOVE), 1);
        assert_eq!(encoded.plane(PLANE_LAST_MOVE)[[0, 5]], 1.0);
        assert!(encoded.plane(PLANE_TO_MOVE).iter().all(|&v| v == -1.0));
    }

    #[test]
    fn thresholds_use_sign_not_magnitude() {
        let rows = vec![vec![3, -2, 0], vec![0, 1, -1], vec![-9, 0, 5]];
        let state = GameState::from_rows(&rows, Some(4), Player::Black).unwrap();
        let encoded = encode_state(&state).unwrap();

        let black: Vec<f32> = encoded.plane(PLANE_BLACK).iter().copied().collect();
        let white: Vec<f32> = encoded.plane(PLANE_WHITE).iter().copied().collect();
        assert_eq!(black, vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
        assert_eq!(white, vec![0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn last_move_lands_at_row_and_column() {
        let mut state = GameState::empty(15);
        state.last_move = Some(7 * 15 + 3);
        let encoded = encode_state(&state).unwrap();
        assert_eq!(encoded.plane(PLANE_LAST_MOVE)[[7, 3]], 1.0);
        assert_eq!(count_ones(&encoded, PLANE_LAST_MOVE), 1);
    }

    #[test]
    fn out_of_range_last_move_is_rejected() {
        let mut state = GameState::empty(8);
        state.last_move = Some(64);
        assert_eq!(
            encode_state(&state),
            Err(EncodingError::LastMoveOutOfRange {
                index: 64,
                cells: 64
            })
        );
    }

    #[test]
    fn wrong_cell_count_is_rejected() {
        let mut state = GameState::empty(8);
        state.cells.truncate(60);
        assert_eq!(
            encode_state(&state),
            Err(EncodingError::NotSquare { side: 8, cells: 60 })
        );
    }

    #[test]
    fn flat_layout_is_plane_major() {
        let mut state = GameState::empty(3);
        state.place_stone(4, Player::White);
        let encoded = encode_state(&state).unwrap();
        let flat = encoded.to_vec();

        assert_eq!(flat.len(), 4 * 9);
        assert_eq!(encoded.input_shape(), [1, 4, 3, 3]);
        // White stone and last move at the centre cell of planes 1 and 2.
        assert_eq!(flat[9 + 4], 1.0);
        assert_eq!(flat[2 * 9 + 4], 1.0);
        assert!(flat[3 * 9..].iter().all(|&v| v == 1.0));
    }

    #[test]
    fn encoding_is_repeatable() {
        let mut state = GameState::empty(9);
        state.place_stone(10, Player::Black);
        state.place_stone(40, Player::White);
        let a = encode_state(&state).unwrap();
        let b = encode_state(&state).unwrap();
        let bits = |e: &EncodedState| e.to_vec().iter().map(|v| v.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&a), bits(&b));
    }
}
