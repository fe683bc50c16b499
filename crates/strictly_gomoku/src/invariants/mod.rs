//! First-class invariants for gomoku.
//!
//! Invariants are logical properties that must hold throughout a game.
//! They are testable independently and checked after every move in
//! debug builds.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for the three-invariant tuple used by [`GomokuInvariants`].
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn collect(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }
        collect(violations)
    }
}

pub mod alternating_turn;
pub mod cell_count;
pub mod history_consistent;

pub use alternating_turn::AlternatingTurnInvariant;
pub use cell_count::CellCountInvariant;
pub use history_consistent::HistoryConsistentInvariant;

/// All gomoku invariants as a composable set.
pub type GomokuInvariants = (
    CellCountInvariant,
    AlternatingTurnInvariant,
    HistoryConsistentInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, Game, GameState, Player, Position};

    #[test]
    fn test_invariant_set_holds_for_new_game() {
        let state = GameState::default();
        assert!(GomokuInvariants::check_all(&state).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        let mut game = Game::new();
        game.play(7, 7).unwrap();
        game.play(7, 8).unwrap();
        game.play(8, 8).unwrap();
        assert!(GomokuInvariants::check_all(game.state()).is_ok());
    }

    #[test]
    fn test_invariant_set_detects_violations() {
        let mut game = Game::new();
        game.play(7, 7).unwrap();
        let mut state = game.state().clone();
        state
            .board
            .set(Position::new(0, 0), Cell::Occupied(Player::Computer))
            .unwrap();

        let violations = GomokuInvariants::check_all(&state).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].description, HistoryConsistentInvariant::description());
    }
}
