//! Connect 4 engine for a human versus computer game.
//! The board is a plain value: every move returns a new `Board`, and the
//! turn controller in [`game`] is the only owner of the current position.
//! The computer looks exactly one ply ahead, scoring each candidate drop with
//! a line-potential heuristic and breaking ties at random.
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod ai;
pub mod board;
pub mod eval;
pub mod game;
pub mod notation;

pub use ai::{choose_move, rank_columns, Choice, Ranking};
pub use board::{Board, Orientation, Window, WINDOWS};
pub use eval::{evaluate_position, score_line};
pub use game::{Game, Phase, Snapshot};
pub use notation::{parse_history, suggest_move, MoveRequest, MoveResponse, TypedMove};

pub const ROWS: usize = 6;
pub const COLS: usize = 7;
pub const CELLS: usize = ROWS * COLS;
/// Pieces in a row needed to win.
pub const CONNECT: usize = 4;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Human,
    Computer,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Human => Side::Computer,
            Side::Computer => Side::Human,
        }
    }

    pub fn cell(self) -> Cell {
        match self {
            Side::Human => Cell::Human,
            Side::Computer => Cell::Computer,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    #[default]
    Empty,
    Human,
    Computer,
}

impl Cell {
    pub fn side(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::Human => Some(Side::Human),
            Cell::Computer => Some(Side::Computer),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

impl From<Side> for Cell {
    fn from(side: Side) -> Self {
        side.cell()
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    Won(Side),
    Draw,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        self != GameStatus::InProgress
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("column {column} is out of bounds")]
    ColumnOutOfBounds { column: usize },
    #[error("column {column} is full")]
    ColumnFull { column: usize },
    #[error("the game is already over")]
    GameOver,
    #[error("it is not the {0:?} side's turn")]
    NotYourTurn(Side),
    #[error("no legal moves remain")]
    NoMoves,
    #[error("piece at row {row}, column {column} has an empty cell below it")]
    FloatingPiece { row: usize, column: usize },
    #[error("position has {human} human and {computer} computer pieces; the human moves first")]
    UnbalancedPosition { human: usize, computer: usize },
    #[error("invalid move string at position {position}: {reason}")]
    ParseMove { position: usize, reason: String },
    #[error("invalid board grid at line {line}: {reason}")]
    InvalidGrid { line: usize, reason: String },
}
