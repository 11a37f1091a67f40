//! Text formats for positions: move histories such as `H3C3H2` and the
//! six-line grid printed by `Board`'s `Display` impl.
use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ai::choose_move;
use crate::board::Board;
use crate::{Cell, GameError, Side, COLS, ROWS};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypedMove {
    pub side: Side,
    pub column: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub position: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResponse {
    pub column: usize,
    pub score: i32,
}

pub fn parse_history(history: &str) -> Result<Vec<TypedMove>, GameError> {
    let chars: Vec<char> = history.trim().chars().collect();
    let mut moves = Vec::with_capacity(chars.len() / 2);
    let mut idx = 0;
    while idx < chars.len() {
        let side = match chars[idx] {
            'H' | 'h' => Side::Human,
            'C' | 'c' => Side::Computer,
            other => {
                return Err(GameError::ParseMove {
                    position: idx,
                    reason: format!("expected H or C, found {other}"),
                })
            }
        };
        idx += 1;
        let Some(&column_char) = chars.get(idx) else {
            return Err(GameError::ParseMove {
                position: idx,
                reason: "missing column number".to_string(),
            });
        };
        let column = match column_char.to_digit(10) {
            Some(digit) if (digit as usize) < COLS => digit as usize,
            Some(_) => {
                return Err(GameError::ParseMove {
                    position: idx,
                    reason: format!("column must be 0-{}", COLS - 1),
                })
            }
            None => {
                return Err(GameError::ParseMove {
                    position: idx,
                    reason: format!("expected column digit, found {column_char}"),
                })
            }
        };
        moves.push(TypedMove { side, column });
        idx += 1;
    }
    Ok(moves)
}

impl Board {
    /// Replays a history from the empty board. Turn order is not enforced.
    pub fn from_history(moves: &[TypedMove]) -> Result<Board, GameError> {
        moves
            .iter()
            .try_fold(Board::empty(), |board, mv| board.drop_piece(mv.column, mv.side))
    }
}

/// Best reply for whichever side moves after `request.position`.
pub fn suggest_move<R: Rng + ?Sized>(
    request: MoveRequest,
    rng: &mut R,
) -> Result<MoveResponse, GameError> {
    let moves = parse_history(&request.position)?;
    let board = Board::from_history(&moves)?;
    if board.status().is_terminal() {
        return Err(GameError::GameOver);
    }
    let side = moves
        .last()
        .map(|mv| mv.side.opponent())
        .unwrap_or(Side::Human);
    let choice = choose_move(&board, side, rng).ok_or(GameError::NoMoves)?;
    Ok(MoveResponse {
        column: choice.column,
        score: choice.score,
    })
}

fn cell_char(cell: Cell) -> char {
    match cell {
        Cell::Empty => '.',
        Cell::Human => 'H',
        Cell::Computer => 'C',
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.rows().enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for &cell in cells {
                write!(f, "{}", cell_char(cell))?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if lines.len() != ROWS {
            return Err(GameError::InvalidGrid {
                line: lines.len(),
                reason: format!("expected {ROWS} rows, found {}", lines.len()),
            });
        }
        let mut rows = [[Cell::Empty; COLS]; ROWS];
        for (row, line) in lines.iter().enumerate() {
            let cells: Vec<char> = line.chars().collect();
            if cells.len() != COLS {
                return Err(GameError::InvalidGrid {
                    line: row,
                    reason: format!("expected {COLS} cells, found {}", cells.len()),
                });
            }
            for (col, ch) in cells.into_iter().enumerate() {
                rows[row][col] = match ch {
                    '.' => Cell::Empty,
                    'H' | 'h' => Cell::Human,
                    'C' | 'c' => Cell::Computer,
                    other => {
                        return Err(GameError::InvalidGrid {
                            line: row,
                            reason: format!("unknown cell {other}"),
                        })
                    }
                };
            }
        }
        Board::from_rows(rows)
    }
}
