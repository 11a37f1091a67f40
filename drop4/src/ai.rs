//! One-ply greedy move selection.
//!
//! Every legal column is tried once and scored as the mover's heuristic minus
//! the opponent's on the resulting board. The opponent's best reply is never
//! searched.
use rand::Rng;
use tracing::debug;

use crate::board::Board;
use crate::eval::evaluate_position;
use crate::{Side, COLS};

/// Columns sharing the best differential, in ascending order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ranking {
    pub score: i32,
    pub columns: Vec<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Choice {
    pub column: usize,
    pub score: i32,
    pub board: Board,
}

/// Differential score of dropping into `column`, if that column is legal.
pub fn column_score(board: &Board, column: usize, side: Side) -> Option<i32> {
    let candidate = board.drop_piece(column, side).ok()?;
    Some(evaluate_position(&candidate, side) - evaluate_position(&candidate, side.opponent()))
}

pub fn rank_columns(board: &Board, side: Side) -> Option<Ranking> {
    let mut best: Option<Ranking> = None;
    for column in 0..COLS {
        let Some(score) = column_score(board, column, side) else {
            continue;
        };
        match best.as_mut() {
            Some(ranking) if score == ranking.score => ranking.columns.push(column),
            Some(ranking) if score < ranking.score => {}
            _ => best = Some(Ranking { score, columns: vec![column] }),
        }
    }
    best
}

/// Picks uniformly among the best columns; `None` when the board is full.
pub fn choose_move<R: Rng + ?Sized>(board: &Board, side: Side, rng: &mut R) -> Option<Choice> {
    let ranking = rank_columns(board, side)?;
    let column = ranking.columns[rng.gen_range(0..ranking.columns.len())];
    debug!(
        ?side,
        column,
        score = ranking.score,
        tied = ranking.columns.len(),
        "selected column"
    );
    let board = board.drop_piece(column, side).ok()?;
    Some(Choice {
        column,
        score: ranking.score,
        board,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::parse_history;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::BTreeSet;

    fn position(history: &str) -> Board {
        Board::from_history(&parse_history(history).unwrap()).unwrap()
    }

    #[test]
    fn opening_prefers_center() {
        let ranking = rank_columns(&Board::empty(), Side::Computer).unwrap();
        assert_eq!(ranking.columns, vec![3]);
        assert_eq!(ranking.score, 7);
    }

    #[test]
    fn scores_every_legal_column() {
        let board = Board::empty();
        let scores: Vec<_> = (0..COLS)
            .map(|col| column_score(&board, col, Side::Computer).unwrap())
            .collect();
        assert_eq!(scores, vec![3, 4, 5, 7, 5, 4, 3]);
        assert_eq!(column_score(&board, COLS, Side::Computer), None);
    }

    #[test]
    fn takes_immediate_win() {
        let board = position("H6C0H6C1H5C2H5");
        let choice = choose_move(&board, Side::Computer, &mut ChaCha8Rng::seed_from_u64(7)).unwrap();
        assert_eq!(choice.column, 3);
        assert_eq!(choice.score, 20_013);
        assert_eq!(choice.board.winner(), Some(Side::Computer));
    }

    #[test]
    fn blocks_open_three() {
        let board = position("H0C6H1C6H2");
        let ranking = rank_columns(&board, Side::Computer).unwrap();
        assert_eq!(ranking.columns, vec![3]);
        assert_eq!(ranking.score, 21);
    }

    #[test]
    fn ties_are_broken_randomly() {
        let board = position("H3C3H3");
        let ranking = rank_columns(&board, Side::Computer).unwrap();
        assert_eq!(ranking.columns, vec![2, 4]);
        assert_eq!(ranking.score, 4);

        let picked: BTreeSet<usize> = (0..64)
            .map(|seed| {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                choose_move(&board, Side::Computer, &mut rng).unwrap().column
            })
            .collect();
        assert_eq!(picked, BTreeSet::from([2, 4]));
    }

    #[test]
    fn same_seed_same_choice() {
        let board = position("H3C3H3");
        let a = choose_move(&board, Side::Computer, &mut ChaCha8Rng::seed_from_u64(11)).unwrap();
        let b = choose_move(&board, Side::Computer, &mut ChaCha8Rng::seed_from_u64(11)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn chosen_board_is_one_legal_drop_away() {
        let board = position("H3C3H3C2H4");
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let choice = choose_move(&board, Side::Computer, &mut rng).unwrap();
        assert!(board.is_column_legal(choice.column));
        assert_eq!(choice.board, board.drop_piece(choice.column, Side::Computer).unwrap());
        assert!(choice.board.respects_gravity());
    }

    #[test]
    fn full_board_has_no_move() {
        let board: Board = "\
            CHCHCCH
            HHCCCHC
            CCHCCCH
            HHHCHHH
            CHHHCHC
            CHCHCHC"
            .parse()
            .unwrap();
        assert!(rank_columns(&board, Side::Computer).is_none());
        assert!(choose_move(&board, Side::Computer, &mut ChaCha8Rng::seed_from_u64(0)).is_none());
    }
}
