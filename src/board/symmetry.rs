//! Dihedral board symmetries.
//!
//! A Gomoku position is equivalent under the eight symmetries of the square:
//! four quarter-turn rotations, each optionally followed by a left-right
//! mirror. Rotations turn the board counter-clockwise, so cell `(r, c)` moves
//! to `(n - 1 - c, r)`; the mirror sends `(r, c)` to `(r, n - 1 - c)`.

use rand::Rng;

use super::state::{check_dimensions, BoardView, GameState};
use crate::error::EncodingError;

/// One of the eight symmetries of the square board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symmetry {
    rotations: u8,
    mirror: bool,
}

/// All eight symmetries, in index order.
pub const ALL_SYMMETRIES: [Symmetry; 8] = [
    Symmetry::new(0, false),
    Symmetry::new(1, false),
    Symmetry::new(2, false),
    Symmetry::new(3, false),
    Symmetry::new(0, true),
    Symmetry::new(1, true),
    Symmetry::new(2, true),
    Symmetry::new(3, true),
];

impl Symmetry {
    /// The symmetry that leaves the board unchanged.
    pub const IDENTITY: Symmetry = Symmetry::new(0, false);

    /// Builds a symmetry from a quarter-turn count (taken mod 4) and a mirror flag.
    pub const fn new(rotations: u8, mirror: bool) -> Self {
        Symmetry {
            rotations: rotations % 4,
            mirror,
        }
    }

    /// Returns the symmetry at `index` in [`ALL_SYMMETRIES`].
    pub fn from_index(index: usize) -> Option<Symmetry> {
        ALL_SYMMETRIES.get(index).copied()
    }

    /// Position of this symmetry in [`ALL_SYMMETRIES`].
    pub fn index(self) -> usize {
        self.rotations as usize + if self.mirror { 4 } else { 0 }
    }

    /// Picks one of the eight symmetries uniformly.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Symmetry {
        ALL_SYMMETRIES[rng.gen_range(0..ALL_SYMMETRIES.len())]
    }

    pub fn is_identity(self) -> bool {
        self == Symmetry::IDENTITY
    }

    /// Returns the symmetry that undoes this one.
    ///
    /// Mirrored symmetries are their own inverse; pure rotations invert by
    /// turning the remaining quarter-turns.
    pub fn inverse(self) -> Symmetry {
        if self.mirror {
            self
        } else {
            Symmetry::new(4 - self.rotations, false)
        }
    }

    /// Maps `(row, col)` on an `side x side` board to its transformed coordinates.
    /// Coordinates off the board are returned unchanged.
    pub fn map_coords(self, row: usize, col: usize, side: usize) -> (usize, usize) {
        if row >= side || col >= side {
            return (row, col);
        }
        let (mut r, mut c) = (row, col);
        for _ in 0..self.rotations {
            (r, c) = (side - 1 - c, r);
        }
        if self.mirror {
            c = side - 1 - c;
        }
        (r, c)
    }

    /// Maps a row-major cell index to its transformed index.
    /// Indices off the board are returned unchanged.
    pub fn map_index(self, index: usize, side: usize) -> usize {
        if side == 0 || index / side >= side {
            return index;
        }
        let (r, c) = self.map_coords(index / side, index % side, side);
        r * side + c
    }

    /// Moves every cell of a row-major `side x side` grid to its transformed slot.
    ///
    /// Works for board cells and policy vectors alike. To bring a policy
    /// computed on a transformed board back to the original orientation,
    /// apply the [`inverse`](Self::inverse).
    ///
    /// Fails unless `cells` holds exactly `side * side` entries.
    pub fn apply_cells<T: Copy + Default>(
        self,
        cells: &[T],
        side: usize,
    ) -> Result<Vec<T>, EncodingError> {
        if side == 0 {
            return Err(EncodingError::EmptyBoard);
        }
        if side.checked_mul(side) != Some(cells.len()) {
            return Err(EncodingError::NotSquare {
                side,
                cells: cells.len(),
            });
        }
        let mut out = vec![T::default(); cells.len()];
        for (i, &v) in cells.iter().enumerate() {
            out[self.map_index(i, side)] = v;
        }
        Ok(out)
    }

    /// Returns the transformed copy of a position, last move included.
    pub fn apply_state<B: BoardView + ?Sized>(self, view: &B) -> Result<GameState, EncodingError> {
        let side = check_dimensions(view)?;
        Ok(GameState {
            side,
            cells: self.apply_cells(view.cells(), side)?,
            last_move: view.last_move().map(|m| self.map_index(m, side)),
            current_player: view.current_player(),
        })
    }
}

impl Default for Symmetry {
    fn default() -> Self {
        Symmetry::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::state::Player;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn single_rotation_matches_counter_clockwise_turn() {
        // 1 2 3      3 6 9
        // 4 5 6  ->  2 5 8
        // 7 8 9      1 4 7
        let cells: Vec<i32> = (1..=9).collect();
        let rotated = Symmetry::new(1, false).apply_cells(&cells, 3).unwrap();
        assert_eq!(rotated, vec![3, 6, 9, 2, 5, 8, 1, 4, 7]);
    }

    #[test]
    fn mirror_flips_columns() {
        let cells: Vec<i32> = (1..=9).collect();
        let mirrored = Symmetry::new(0, true).apply_cells(&cells, 3).unwrap();
        assert_eq!(mirrored, vec![3, 2, 1, 6, 5, 4, 9, 8, 7]);
    }

    #[test]
    fn every_symmetry_is_undone_by_its_inverse() {
        let side = 5;
        for sym in ALL_SYMMETRIES {
            let inv = sym.inverse();
            for i in 0..side * side {
                assert_eq!(
                    inv.map_index(sym.map_index(i, side), side),
                    i,
                    "{:?} at index {}",
                    sym,
                    i
                );
            }
        }
    }

    #[test]
    fn symmetries_are_distinct_permutations() {
        let cells: Vec<i32> = (0..16).collect();
        let images: Vec<Vec<i32>> = ALL_SYMMETRIES
            .iter()
            .map(|s| s.apply_cells(&cells, 4).unwrap())
            .collect();
        for i in 0..images.len() {
            for j in (i + 1)..images.len() {
                assert_ne!(images[i], images[j], "symmetries {} and {} coincide", i, j);
            }
        }
    }

    #[test]
    fn apply_cells_rejects_wrong_length() {
        let sym = Symmetry::new(1, false);
        assert_eq!(
            sym.apply_cells(&[1, 2, 3], 3),
            Err(EncodingError::NotSquare { side: 3, cells: 3 })
        );
        assert_eq!(
            sym.apply_cells(&[1, 2, 3, 4, 5], 2),
            Err(EncodingError::NotSquare { side: 2, cells: 5 })
        );
        assert_eq!(
            sym.apply_cells::<i32>(&[], 0),
            Err(EncodingError::EmptyBoard)
        );
    }

    #[test]
    fn off_board_coordinates_are_left_alone() {
        let sym = Symmetry::new(3, true);
        assert_eq!(sym.map_coords(0, 0, 0), (0, 0));
        assert_eq!(sym.map_coords(1, 4, 3), (1, 4));
        assert_eq!(sym.map_index(0, 0), 0);
        assert_eq!(sym.map_index(9, 3), 9);
    }

    #[test]
    fn index_roundtrip() {
        for (i, sym) in ALL_SYMMETRIES.iter().enumerate() {
            assert_eq!(sym.index(), i);
            assert_eq!(Symmetry::from_index(i), Some(*sym));
        }
        assert_eq!(Symmetry::from_index(8), None);
    }

    #[test]
    fn apply_state_moves_last_move_with_stone() {
        let mut state = GameState::empty(8);
        state.place_stone(5, Player::Black);
        for sym in ALL_SYMMETRIES {
            let t = sym.apply_state(&state).unwrap();
            let m = t.last_move.unwrap();
            assert_eq!(t.cells[m], 1, "{:?}", sym);
            assert_eq!(t.stone_count(), 1);
            assert_eq!(t.current_player, Player::Black);
        }
    }

    #[test]
    fn apply_state_rejects_malformed_board() {
        let mut state = GameState::empty(3);
        state.cells.push(0);
        assert!(Symmetry::IDENTITY.apply_state(&state).is_err());
    }

    #[test]
    fn random_is_deterministic_for_seed() {
        let mut a = SmallRng::seed_from_u64(7);
        let mut b = SmallRng::seed_from_u64(7);
        for _ in 0..16 {
            assert_eq!(Symmetry::random(&mut a), Symmetry::random(&mut b));
        }
    }
}
