//! Turn controller: owns the current board and alternates between the human
//! and the computer until the game is won or drawn.
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::ai::choose_move;
use crate::board::Board;
use crate::{GameError, GameStatus, Side};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    HumanTurn,
    AutomatedTurn,
    Finished(GameStatus),
}

/// Read-only view handed to front ends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub board: Board,
    pub phase: Phase,
    pub status: GameStatus,
    pub legal_columns: Vec<usize>,
}

#[derive(Clone, Debug)]
pub struct Game<R = ChaCha8Rng> {
    board: Board,
    phase: Phase,
    rng: R,
}

impl Game<ChaCha8Rng> {
    pub fn new() -> Self {
        Self::with_rng(ChaCha8Rng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl Default for Game<ChaCha8Rng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Game<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            board: Board::empty(),
            phase: Phase::HumanTurn,
            rng,
        }
    }

    /// Continues from an existing position. The human always opens, so the
    /// side to move follows from the piece counts.
    pub fn resume(board: Board, rng: R) -> Result<Self, GameError> {
        let human = board.count(Side::Human);
        let computer = board.count(Side::Computer);
        if human != computer && human != computer + 1 {
            return Err(GameError::UnbalancedPosition { human, computer });
        }
        let status = board.status();
        let phase = if status.is_terminal() {
            Phase::Finished(status)
        } else if human == computer {
            Phase::HumanTurn
        } else {
            Phase::AutomatedTurn
        };
        Ok(Self { board, phase, rng })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn status(&self) -> GameStatus {
        match self.phase {
            Phase::Finished(status) => status,
            _ => GameStatus::InProgress,
        }
    }

    pub fn moves_played(&self) -> usize {
        self.board.piece_count()
    }

    /// Columns the human may play right now; empty outside the human's turn.
    pub fn legal_columns(&self) -> Vec<usize> {
        match self.phase {
            Phase::HumanTurn => self.board.legal_columns(),
            _ => Vec::new(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board,
            phase: self.phase,
            status: self.status(),
            legal_columns: self.legal_columns(),
        }
    }

    /// Human move; rejected moves leave the game untouched.
    pub fn submit_move(&mut self, column: usize) -> GameStatus {
        if let Err(err) = self.try_submit_move(column) {
            debug!(column, %err, "ignored human move");
        }
        self.status()
    }

    pub fn try_submit_move(&mut self, column: usize) -> Result<GameStatus, GameError> {
        match self.phase {
            Phase::HumanTurn => {}
            Phase::AutomatedTurn => return Err(GameError::NotYourTurn(Side::Human)),
            Phase::Finished(_) => return Err(GameError::GameOver),
        }
        let board = self.board.drop_piece(column, Side::Human)?;
        self.advance(board, Phase::AutomatedTurn);
        Ok(self.status())
    }

    /// Runs the move selector for the computer; a no-op outside its turn.
    pub fn request_automated_move(&mut self) -> GameStatus {
        if let Err(err) = self.try_request_automated_move() {
            debug!(%err, "ignored automated move request");
        }
        self.status()
    }

    pub fn try_request_automated_move(&mut self) -> Result<GameStatus, GameError> {
        match self.phase {
            Phase::AutomatedTurn => {}
            Phase::HumanTurn => return Err(GameError::NotYourTurn(Side::Computer)),
            Phase::Finished(_) => return Err(GameError::GameOver),
        }
        match choose_move(&self.board, Side::Computer, &mut self.rng) {
            Some(choice) => self.advance(choice.board, Phase::HumanTurn),
            None => self.finish(GameStatus::Draw),
        }
        Ok(self.status())
    }

    pub fn reset(&mut self) {
        self.board = Board::empty();
        self.phase = Phase::HumanTurn;
        debug!("game reset");
    }

    fn advance(&mut self, board: Board, next: Phase) {
        self.board = board;
        match board.status() {
            GameStatus::InProgress => self.phase = next,
            status => self.finish(status),
        }
    }

    fn finish(&mut self, status: GameStatus) {
        let line = self
            .board
            .winning_line()
            .map(|(_, window)| window.orientation);
        info!(?status, ?line, moves = self.moves_played(), "game finished");
        self.phase = Phase::Finished(status);
    }
}
