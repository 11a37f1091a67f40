//! Board model and move engine.
//!
//! Cells are stored row-major with row 0 at the top, so index `i` is row
//! `i / COLS`, column `i % COLS`, and pieces settle towards row `ROWS - 1`.
use once_cell::sync::Lazy;
use serde::{Serialize, Serializer};

use crate::{Cell, GameError, GameStatus, Side, CELLS, COLS, CONNECT, ROWS};

/// Every line of four on the board, in scan order: horizontal (row-major),
/// vertical (column-major), diagonal down-right, diagonal down-left.
pub static WINDOWS: Lazy<Vec<Window>> = Lazy::new(generate_windows);

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Orientation {
    Horizontal,
    Vertical,
    /// Down and to the right (↘).
    Diagonal,
    /// Down and to the left (↙).
    AntiDiagonal,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Window {
    pub orientation: Orientation,
    pub cells: [usize; CONNECT],
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Board {
    cells: [Cell; CELLS],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [Cell::Empty; CELLS],
        }
    }

    /// Builds a board from explicit rows (row 0 on top), rejecting pieces
    /// that float above an empty cell.
    pub fn from_rows(rows: [[Cell; COLS]; ROWS]) -> Result<Self, GameError> {
        let mut board = Self::empty();
        for (row, cells) in rows.iter().enumerate() {
            board.cells[row * COLS..(row + 1) * COLS].copy_from_slice(cells);
        }
        board.check_gravity()?;
        Ok(board)
    }

    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[index(row, col)]
    }

    pub fn cells(&self) -> &[Cell; CELLS] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(COLS)
    }

    pub fn window(&self, window: &Window) -> [Cell; CONNECT] {
        window.cells.map(|idx| self.cells[idx])
    }

    /// Row the next piece dropped in `column` lands on.
    pub fn drop_row(&self, column: usize) -> Option<usize> {
        if column >= COLS {
            return None;
        }
        (0..ROWS)
            .rev()
            .find(|&row| self.cells[index(row, column)].is_empty())
    }

    /// Returns a copy of the board with `side`'s piece dropped into `column`.
    pub fn drop_piece(&self, column: usize, side: Side) -> Result<Board, GameError> {
        if column >= COLS {
            return Err(GameError::ColumnOutOfBounds { column });
        }
        let row = self
            .drop_row(column)
            .ok_or(GameError::ColumnFull { column })?;
        let mut next = *self;
        next.cells[index(row, column)] = side.cell();
        Ok(next)
    }

    pub fn is_column_legal(&self, column: usize) -> bool {
        column < COLS && self.cells[column].is_empty()
    }

    pub fn legal_columns(&self) -> Vec<usize> {
        (0..COLS).filter(|&col| self.is_column_legal(col)).collect()
    }

    pub fn legal_mask(&self) -> [bool; COLS] {
        std::array::from_fn(|col| self.is_column_legal(col))
    }

    pub fn winner(&self) -> Option<Side> {
        self.winning_line().map(|(side, _)| side)
    }

    /// First line of four held by one side, in window scan order.
    pub fn winning_line(&self) -> Option<(Side, &'static Window)> {
        let windows: &'static [Window] = &WINDOWS;
        windows.iter().find_map(|window| {
            let [first, rest @ ..] = self.window(window);
            let side = first.side()?;
            rest.iter()
                .all(|&cell| cell == first)
                .then_some((side, window))
        })
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    pub fn is_draw(&self) -> bool {
        self.is_full() && self.winner().is_none()
    }

    pub fn status(&self) -> GameStatus {
        match self.winner() {
            Some(side) => GameStatus::Won(side),
            None if self.is_full() => GameStatus::Draw,
            None => GameStatus::InProgress,
        }
    }

    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    pub fn count(&self, side: Side) -> usize {
        let cell = side.cell();
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    pub fn respects_gravity(&self) -> bool {
        self.check_gravity().is_ok()
    }

    fn check_gravity(&self) -> Result<(), GameError> {
        for row in 0..ROWS - 1 {
            for column in 0..COLS {
                if !self.get(row, column).is_empty() && self.get(row + 1, column).is_empty() {
                    return Err(GameError::FloatingPiece { row, column });
                }
            }
        }
        Ok(())
    }
}

impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.rows())
    }
}

fn index(row: usize, col: usize) -> usize {
    row * COLS + col
}

fn generate_windows() -> Vec<Window> {
    let mut windows = Vec::new();
    let mut push = |orientation, cells: [(usize, usize); CONNECT]| {
        windows.push(Window {
            orientation,
            cells: cells.map(|(row, col)| index(row, col)),
        });
    };
    for row in 0..ROWS {
        for col in 0..=COLS - CONNECT {
            push(
                Orientation::Horizontal,
                std::array::from_fn(|k| (row, col + k)),
            );
        }
    }
    for col in 0..COLS {
        for row in 0..=ROWS - CONNECT {
            push(Orientation::Vertical, std::array::from_fn(|k| (row + k, col)));
        }
    }
    for row in 0..=ROWS - CONNECT {
        for col in 0..=COLS - CONNECT {
            push(
                Orientation::Diagonal,
                std::array::from_fn(|k| (row + k, col + k)),
            );
        }
    }
    for row in 0..=ROWS - CONNECT {
        for col in CONNECT - 1..COLS {
            push(
                Orientation::AntiDiagonal,
                std::array::from_fn(|k| (row + k, col - k)),
            );
        }
    }
    windows
}
