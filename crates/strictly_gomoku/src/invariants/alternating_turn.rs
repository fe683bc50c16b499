//! Alternating turn invariant: human, computer, human, ...

use super::super::{GameState, GameStatus, Player};
use super::Invariant;

/// Invariant: Players alternate turns, the human first.
///
/// While the game is in progress, `to_move` is the player whose turn
/// the history implies.
pub struct AlternatingTurnInvariant;

impl Invariant<GameState> for AlternatingTurnInvariant {
    fn holds(state: &GameState) -> bool {
        let history = state.history();

        if let Some(first) = history.first()
            && first.player != Player::Human
        {
            return false;
        }

        if history.windows(2).any(|pair| pair[0].player == pair[1].player) {
            return false;
        }

        if state.status() != GameStatus::InProgress {
            return true;
        }

        let expected_next = if history.len() % 2 == 0 {
            Player::Human
        } else {
            Player::Computer
        };
        state.to_move() == expected_next
    }

    fn description() -> &'static str {
        "Players alternate turns (human, computer, human, ...)"
    }
}
