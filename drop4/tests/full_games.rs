use drop4::{
    evaluate_position, parse_history, Board, Cell, Game, GameStatus, Phase, Side, COLS, ROWS,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn swap_sides(board: &Board) -> Board {
    let mut rows = [[Cell::Empty; COLS]; ROWS];
    for (row, cells) in board.rows().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            rows[row][col] = match cell.side() {
                Some(side) => side.opponent().cell(),
                None => Cell::Empty,
            };
        }
    }
    Board::from_rows(rows).unwrap()
}

#[test]
fn random_human_versus_computer_games_stay_consistent() {
    for seed in 0..20 {
        let mut human = ChaCha8Rng::seed_from_u64(1_000 + seed);
        let mut game = Game::with_seed(seed);
        let mut expected_moves = 0;

        while !game.status().is_terminal() {
            match game.phase() {
                Phase::HumanTurn => {
                    let legal = game.legal_columns();
                    let column = legal[human.gen_range(0..legal.len())];
                    game.submit_move(column);
                }
                Phase::AutomatedTurn => {
                    let before = *game.board();
                    game.request_automated_move();
                    let after = *game.board();
                    let dropped = (0..COLS)
                        .find(|&col| before.drop_piece(col, Side::Computer).ok() == Some(after));
                    assert!(dropped.is_some(), "computer move was not a single legal drop");
                }
                Phase::Finished(_) => unreachable!(),
            }
            expected_moves += 1;
            assert_eq!(game.moves_played(), expected_moves);
            assert!(game.board().respects_gravity());
        }

        let board = game.board();
        match game.status() {
            GameStatus::Won(side) => assert_eq!(board.winner(), Some(side)),
            GameStatus::Draw => assert!(board.is_draw()),
            GameStatus::InProgress => unreachable!(),
        }
        assert!(game.legal_columns().is_empty());
    }
}

#[test]
fn evaluation_is_symmetric_under_side_swap() {
    let board = Board::from_history(&parse_history("H3C3H4C2H2C4H5C1H3").unwrap()).unwrap();
    let swapped = swap_sides(&board);
    assert_eq!(
        evaluate_position(&board, Side::Human),
        evaluate_position(&swapped, Side::Computer)
    );
    assert_eq!(
        evaluate_position(&board, Side::Computer),
        evaluate_position(&swapped, Side::Human)
    );
}

#[test]
fn bottom_row_four_is_a_human_win() {
    let board: Board = "\
        .......
        .......
        .......
        .......
        CCC....
        HHHH..."
        .parse()
        .unwrap();
    assert_eq!(board.winner(), Some(Side::Human));
    assert!(!board.is_draw());
}

#[test]
fn reset_after_play_returns_to_start() {
    let mut game = Game::with_seed(42);
    for column in [0, 1, 2] {
        game.submit_move(column);
        game.request_automated_move();
    }
    assert!(game.moves_played() > 0);
    game.reset();
    let snapshot = game.snapshot();
    assert_eq!(snapshot.board, Board::empty());
    assert_eq!(snapshot.phase, Phase::HumanTurn);
    assert_eq!(snapshot.status, GameStatus::InProgress);
    assert_eq!(snapshot.legal_columns.len(), COLS);
}
