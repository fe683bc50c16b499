//! Stand-in for the human that plays uniformly random legal moves.

use super::{Action, Player};
use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strictly_gomoku::GameState;
use tracing::debug;

/// Picks a random empty cell every turn.
pub struct RandomPlayer {
    name: String,
    rng: StdRng,
}

impl RandomPlayer {
    /// Creates a random player with a fixed seed.
    pub fn new(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

#[async_trait::async_trait]
impl Player for RandomPlayer {
    async fn next_action(&mut self, state: &GameState) -> Result<Action> {
        let empty = state.board().empty_positions();
        if empty.is_empty() {
            anyhow::bail!("No valid moves available");
        }
        let position = empty[self.rng.random_range(0..empty.len())];
        debug!(player = %self.name, %position, "Random player chose position");
        Ok(Action::Place(position))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
