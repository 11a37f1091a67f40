//! Static positional heuristic: every line of four contributes according to
//! how many of the side's pieces it holds, unless the opponent already sits
//! in it.
use crate::board::{Board, WINDOWS};
use crate::{Cell, Side, CONNECT};

pub const WIN_LINE: i32 = 10_000;
pub const THREE: i32 = 50;
pub const TWO: i32 = 10;
pub const ONE: i32 = 1;

pub fn score_line(line: [Cell; CONNECT], side: Side) -> i32 {
    let own = side.cell();
    let theirs = side.opponent().cell();
    let mine = line.iter().filter(|&&cell| cell == own).count();
    let blocked = line.iter().filter(|&&cell| cell == theirs).count();

    if mine == CONNECT {
        return WIN_LINE;
    }
    if blocked == CONNECT {
        return -WIN_LINE;
    }
    if blocked > 0 {
        return 0;
    }
    match mine {
        3 => THREE,
        2 => TWO,
        1 => ONE,
        _ => 0,
    }
}

/// Sum of [`score_line`] over all 69 windows of the board.
pub fn evaluate_position(board: &Board, side: Side) -> i32 {
    WINDOWS
        .iter()
        .map(|window| score_line(board.window(window), side))
        .sum()
}
