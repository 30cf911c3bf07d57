//! Text notation for Gomoku positions.
//!
//! A compact, FEN-like single line: `<rows> <side> <last>`.
//!
//! - `rows`: board rows top to bottom separated by `/`. Within a row, `x` is a
//!   black stone, `o` a white stone, and a decimal number a run of empty cells.
//! - `side`: `x` or `o`, the player to move.
//! - `last`: row-major index of the last move, or `-` before the first move.
//!
//! Example: `15/15/15/15/15/15/15/7x7/15/15/15/15/15/15/15 o 112`

use crate::board::state::{GameState, Player};

/// Errors that can occur while parsing a position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    #[error("expected 3 fields '<rows> <side> <last>', got {0}")]
    WrongFieldCount(usize),

    #[error("invalid cell character: '{0}'")]
    InvalidCell(char),

    #[error("row {row} has {found} cells, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("row {row} describes more than {expected} cells")]
    RunTooLong { row: usize, expected: usize },

    #[error("invalid side to move: '{0}'")]
    InvalidSide(String),

    #[error("invalid last move: '{0}'")]
    InvalidLastMove(String),

    #[error("last move {index} is outside the board (0..{cells})")]
    LastMoveOutOfRange { index: usize, cells: usize },
}

/// Parses one row of a board with `side` columns into cell values.
///
/// Fails as soon as the row describes more than `side` cells.
fn parse_row(s: &str, row: usize, side: usize) -> Result<Vec<i32>, PositionError> {
    let too_long = PositionError::RunTooLong { row, expected: side };
    let mut cells = Vec::with_capacity(side);
    let mut run = 0usize;
    for c in s.chars() {
        if let Some(d) = c.to_digit(10) {
            run = run
                .checked_mul(10)
                .and_then(|r| r.checked_add(d as usize))
                .filter(|&r| cells.len() + r <= side)
                .ok_or_else(|| too_long.clone())?;
            continue;
        }
        cells.extend(std::iter::repeat(0).take(run));
        run = 0;
        if cells.len() >= side {
            return Err(too_long);
        }
        match Player::from_notation_char(c) {
            Some(p) => cells.push(p.sign()),
            None => return Err(PositionError::InvalidCell(c)),
        }
    }
    cells.extend(std::iter::repeat(0).take(run));
    Ok(cells)
}

/// Parses a position in text notation.
pub fn parse_position(s: &str) -> Result<GameState, PositionError> {
    let fields: Vec<&str> = s.split_whitespace().collect();
    if fields.len() != 3 {
        return Err(PositionError::WrongFieldCount(fields.len()));
    }

    let rows: Vec<&str> = fields[0].split('/').collect();
    let side = rows.len();
    let mut cells = Vec::new();
    for (row, text) in rows.iter().enumerate() {
        let values = parse_row(text, row, side)?;
        if values.len() != side {
            return Err(PositionError::RowLength {
                row,
                expected: side,
                found: values.len(),
            });
        }
        cells.extend(values);
    }

    let mut side_chars = fields[1].chars();
    let current_player = match (side_chars.next(), side_chars.next()) {
        (Some(c), None) => Player::from_notation_char(c),
        _ => None,
    }
    .ok_or_else(|| PositionError::InvalidSide(fields[1].to_string()))?;

    let last_move = match fields[2] {
        "-" => None,
        text => {
            let index: usize = text
                .parse()
                .map_err(|_| PositionError::InvalidLastMove(text.to_string()))?;
            if index >= cells.len() {
                return Err(PositionError::LastMoveOutOfRange {
                    index,
                    cells: cells.len(),
                });
            }
            Some(index)
        }
    };

    Ok(GameState {
        side,
        cells,
        last_move,
        current_player,
    })
}

/// Formats a position in canonical text notation.
pub fn format_position(state: &GameState) -> String {
    let mut out = String::new();
    for (r, row) in state.cells.chunks(state.side.max(1)).enumerate() {
        if r > 0 {
            out.push('/');
        }
        let mut run = 0;
        for &v in row {
            match Player::from_sign(v) {
                None => run += 1,
                Some(p) => {
                    if run > 0 {
                        out.push_str(&run.to_string());
                        run = 0;
                    }
                    out.push(p.notation_char());
                }
            }
        }
        if run > 0 {
            out.push_str(&run.to_string());
        }
    }
    out.push(' ');
    out.push(state.current_player.notation_char());
    out.push(' ');
    match state.last_move {
        Some(m) => out.push_str(&m.to_string()),
        None => out.push('-'),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY_8: &str = "8/8/8/8/8/8/8/8 x -";
    const CENTRE_15: &str = "15/15/15/15/15/15/15/7x7/15/15/15/15/15/15/15 o 112";

    #[test]
    fn parse_empty_board() {
        let state = parse_position(EMPTY_8).expect("failed to parse empty board");
        assert_eq!(state, GameState::empty(8));
    }

    #[test]
    fn parse_centre_opening() {
        let state = parse_position(CENTRE_15).expect("failed to parse opening");
        assert_eq!(state.side, 15);
        assert_eq!(state.cells[112], 1);
        assert_eq!(state.stone_count(), 1);
        assert_eq!(state.last_move, Some(112));
        assert_eq!(state.current_player, Player::White);
    }

    #[test]
    fn parse_multi_digit_runs_and_mixed_stones() {
        let state = parse_position("xo1/3/2o o 2").unwrap();
        assert_eq!(state.cells, vec![1, -1, 0, 0, 0, 0, 0, 0, -1]);
    }

    #[test]
    fn roundtrip_canonical_form() {
        for text in [EMPTY_8, CENTRE_15, "xo1/3/2o o 8"] {
            let state = parse_position(text).unwrap();
            assert_eq!(format_position(&state), text);
        }
    }

    #[test]
    fn format_collapses_empty_runs() {
        let mut state = GameState::empty(3);
        state.cells = vec![0, 0, 1, 0, 0, 0, -1, 0, 0];
        state.last_move = Some(6);
        assert_eq!(format_position(&state), "2x/3/o2 x 6");
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert_eq!(
            parse_position("8/8/8/8/8/8/8/8 x"),
            Err(PositionError::WrongFieldCount(2))
        );
    }

    #[test]
    fn rejects_bad_cell() {
        assert_eq!(
            parse_position("2z/3/3 x -"),
            Err(PositionError::InvalidCell('z'))
        );
    }

    #[test]
    fn rejects_short_row() {
        assert_eq!(
            parse_position("3/2/3 x -"),
            Err(PositionError::RowLength {
                row: 1,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn rejects_oversized_empty_runs() {
        assert_eq!(
            parse_position("99999999999999999999999 x -"),
            Err(PositionError::RunTooLong {
                row: 0,
                expected: 1
            })
        );
        assert_eq!(
            parse_position("4000000000/3/3 x -"),
            Err(PositionError::RunTooLong {
                row: 0,
                expected: 3
            })
        );
        assert_eq!(
            parse_position("3/2x1/3 o -"),
            Err(PositionError::RunTooLong {
                row: 1,
                expected: 3
            })
        );
        let slashes = "/".repeat(1 << 20);
        assert_eq!(
            parse_position(&format!("{} x -", slashes)),
            Err(PositionError::RowLength {
                row: 0,
                expected: (1 << 20) + 1,
                found: 0
            })
        );
        assert_eq!(
            parse_position("3/3x/3 o -"),
            Err(PositionError::RunTooLong {
                row: 1,
                expected: 3
            })
        );
    }

    #[test]
    fn rejects_bad_side_and_last_move() {
        assert_eq!(
            parse_position("3/3/3 b -"),
            Err(PositionError::InvalidSide("b".to_string()))
        );
        assert_eq!(
            parse_position("3/3/3 x ?"),
            Err(PositionError::InvalidLastMove("?".to_string()))
        );
        assert_eq!(
            parse_position("3/3/3 x 9"),
            Err(PositionError::LastMoveOutOfRange { index: 9, cells: 9 })
        );
    }
}
