//! The single game session served over HTTP, plus the delayed computer move.
//!
//! Every change to the game bumps `revision`. A scheduled computer move
//! remembers the revision it was scheduled at and does nothing if the game
//! has moved on by the time its delay elapses.
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use drop4::{Game, Phase, Snapshot};
use tokio::task::JoinHandle;
use tracing::debug;

pub struct SessionState {
    inner: Mutex<Session>,
    ai_delay: Duration,
}

struct Session {
    game: Game,
    revision: u64,
    pending: Option<JoinHandle<()>>,
}

impl Session {
    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
            debug!(revision = self.revision, "cancelled pending computer move");
        }
    }
}

impl SessionState {
    pub fn new(game: Game, ai_delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(Session {
                game,
                revision: 0,
                pending: None,
            }),
            ai_delay,
        })
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.lock().game.snapshot()
    }

    pub fn legal_columns(&self) -> Vec<usize> {
        self.lock().game.legal_columns()
    }

    pub fn has_pending_move(&self) -> bool {
        self.lock().pending.is_some()
    }

    /// Applies a human move and, if the computer is up next, schedules its
    /// reply after the configured delay.
    pub fn submit_move(self: &Arc<Self>, column: usize) -> Snapshot {
        let mut session = self.lock();
        let before = session.game.moves_played();
        session.game.submit_move(column);
        if session.game.moves_played() != before {
            session.revision += 1;
            session.cancel_pending();
            if session.game.phase() == Phase::AutomatedTurn {
                self.schedule(&mut session);
            }
        }
        session.game.snapshot()
    }

    /// Plays the computer's move immediately instead of waiting for the timer.
    pub fn automated_move(&self) -> Snapshot {
        let mut session = self.lock();
        session.cancel_pending();
        let before = session.game.phase();
        session.game.request_automated_move();
        if session.game.phase() != before {
            session.revision += 1;
        }
        session.game.snapshot()
    }

    pub fn reset(&self) -> Snapshot {
        let mut session = self.lock();
        session.cancel_pending();
        session.game.reset();
        session.revision += 1;
        session.game.snapshot()
    }

    fn schedule(self: &Arc<Self>, session: &mut Session) {
        let revision = session.revision;
        let delay = self.ai_delay;
        let state = Arc::clone(self);
        debug!(revision, ?delay, "scheduling computer move");
        session.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            state.fire(revision);
        }));
    }

    fn fire(&self, revision: u64) {
        let mut session = self.lock();
        if session.revision != revision {
            debug!(
                scheduled = revision,
                current = session.revision,
                "dropping stale computer move"
            );
            return;
        }
        // This task is the pending one; detach rather than abort it.
        session.pending = None;
        if session.game.phase() != Phase::AutomatedTurn {
            return;
        }
        session.game.request_automated_move();
        session.revision += 1;
    }
}
