//! Sources of the human side's moves.

mod human;
mod random;

pub use human::{move_cursor, HumanPlayer};
pub use random::RandomPlayer;

use anyhow::Result;
use strictly_gomoku::{GameState, Position};

/// What the human side wants to do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Place a stone.
    Place(Position),
    /// The selection cursor moved.
    MoveCursor(Position),
    /// Start a new game.
    Reset,
    /// Show the key help.
    Help,
    /// Leave the game.
    Quit,
}

/// Trait for whoever plays the human side.
#[async_trait::async_trait]
pub trait Player: Send {
    /// Returns the next action given the current state.
    async fn next_action(&mut self, state: &GameState) -> Result<Action>;

    /// Returns the player's display name.
    fn name(&self) -> &str;

    /// Cell to highlight before the first action, if the player uses a cursor.
    fn cursor(&self) -> Option<Position> {
        None
    }
}
