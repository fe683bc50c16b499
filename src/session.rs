//! A game instance shared between the input loop and the computer's turn.
//!
//! The engine is synchronous; this module is where the host adds timing.
//! The `Game` sits behind one mutex, so every move and every reset is a
//! single critical section. After a human move hands the turn over, a
//! task waits for the think delay and then plays the computer's move.
//! Resets bump an epoch counter, and a computer turn scheduled under an
//! older epoch is dropped without touching the board.

use crate::config::HostConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;
use strictly_gomoku::{Game, GameState, GameStatus, Move, MoveError, Phase, Player, Position};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, trace, warn};

/// Notifications published to observers of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A stone was placed.
    MoveMade(Move),
    /// The computer's turn has been scheduled.
    ComputerThinking,
    /// The computer's scheduled turn could not be played.
    ComputerFailed(MoveError),
    /// The game ended.
    GameOver(GameStatus),
    /// The game was reset.
    Reset,
}

struct Inner {
    game: Game,
    rng: StdRng,
    epoch: u64,
}

/// One game, safe to drive from several tasks.
#[derive(Clone)]
pub struct GameSession {
    inner: Arc<Mutex<Inner>>,
    think_delay: Duration,
    events: mpsc::UnboundedSender<GameEvent>,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("think_delay", &self.think_delay)
            .finish_non_exhaustive()
    }
}

impl GameSession {
    /// Creates a session and the receiving end of its event stream.
    #[instrument(skip(config))]
    pub fn new(config: &HostConfig) -> (Self, mpsc::UnboundedReceiver<GameEvent>) {
        let rng = match config.seed() {
            Some(seed) => StdRng::seed_from_u64(*seed),
            None => StdRng::from_os_rng(),
        };
        let (events, rx) = mpsc::unbounded_channel();
        info!(think_delay_ms = config.think_delay_ms(), "Creating game session");
        let session = Self {
            inner: Arc::new(Mutex::new(Inner {
                game: Game::new(),
                rng,
                epoch: 0,
            })),
            think_delay: Duration::from_millis(*config.think_delay_ms()),
            events,
        };
        (session, rx)
    }

    fn emit(&self, event: GameEvent) {
        if self.events.send(event).is_err() {
            trace!("No observer listening for session events");
        }
    }

    /// Returns a copy of the current state.
    pub async fn snapshot(&self) -> GameState {
        self.inner.lock().await.game.state().clone()
    }

    /// Returns the current phase.
    pub async fn phase(&self) -> Phase {
        self.inner.lock().await.game.phase()
    }

    /// Plays the human's stone at `pos`.
    ///
    /// When the move hands the turn to the computer, its reply is
    /// scheduled after the think delay and the handle is returned.
    ///
    /// # Errors
    ///
    /// Any illegal move; the game is left unchanged.
    #[instrument(skip(self))]
    pub async fn submit_move(
        &self,
        pos: Position,
    ) -> Result<(GameState, Option<JoinHandle<Option<Position>>>), MoveError> {
        let mut inner = self.inner.lock().await;
        let action = Move::new(Player::Human, pos);
        let state = inner.game.apply_move(action)?.clone();
        self.emit(GameEvent::MoveMade(action));

        let pending = match inner.game.phase() {
            Phase::AwaitingComputer => Some(self.schedule_computer_turn(inner.epoch)),
            Phase::Won(_) | Phase::Draw => {
                self.emit(GameEvent::GameOver(state.status()));
                None
            }
            Phase::AwaitingHuman => None,
        };
        Ok((state, pending))
    }

    fn schedule_computer_turn(&self, epoch: u64) -> JoinHandle<Option<Position>> {
        self.emit(GameEvent::ComputerThinking);
        let session = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(session.think_delay).await;
            session.run_computer_turn(epoch).await
        })
    }

    /// Plays the computer's move if the game is still in `epoch`.
    ///
    /// Returns `None` when the turn was superseded by a reset, or when the
    /// engine refused the move; the latter is published as
    /// [`GameEvent::ComputerFailed`].
    #[instrument(skip(self))]
    pub async fn run_computer_turn(&self, epoch: u64) -> Option<Position> {
        let mut inner = self.inner.lock().await;
        if inner.epoch != epoch {
            debug!(scheduled = epoch, current = inner.epoch, "Discarding superseded computer move");
            return None;
        }
        let Inner { game, rng, .. } = &mut *inner;
        match game.play_computer_turn(rng) {
            Ok(position) => {
                self.emit(GameEvent::MoveMade(Move::new(Player::Computer, position)));
                if game.is_over() {
                    self.emit(GameEvent::GameOver(game.status()));
                }
                Some(position)
            }
            Err(e) => {
                warn!(error = %e, "Computer could not move");
                self.emit(GameEvent::ComputerFailed(e));
                None
            }
        }
    }

    /// Discards the current game, including any pending computer move.
    #[instrument(skip(self))]
    pub async fn reset(&self) -> GameState {
        let mut inner = self.inner.lock().await;
        inner.epoch += 1;
        let state = inner.game.reset().clone();
        self.emit(GameEvent::Reset);
        state
    }

    /// Current reset epoch.
    pub async fn epoch(&self) -> u64 {
        self.inner.lock().await.epoch
    }
}
