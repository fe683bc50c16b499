//! Contract-based validation for gomoku moves.
//!
//! Contracts define correctness through preconditions and postconditions:
//! {P} action {Q}. Preconditions are always checked; postconditions are
//! checked in debug builds.

use super::action::{Move, MoveError};
use super::invariants::{GomokuInvariants, InvariantSet};
use super::{GameState, GameStatus};
use tracing::{instrument, warn};

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

/// Precondition: The game has not ended.
pub struct GameNotOver;

impl GameNotOver {
    /// Rejects every move once the game is won or drawn.
    #[instrument(skip(state))]
    pub fn check(_mov: &Move, state: &GameState) -> Result<(), MoveError> {
        if state.status().is_terminal() {
            Err(MoveError::GameAlreadyOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: It must be the player's turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Rejects a move by the player who is not to move.
    #[instrument(skip(state))]
    pub fn check(mov: &Move, state: &GameState) -> Result<(), MoveError> {
        if mov.player != state.to_move() {
            Err(MoveError::WrongTurn(mov.player))
        } else {
            Ok(())
        }
    }
}

/// Precondition: The position lies on the board.
pub struct InBounds;

impl InBounds {
    /// Rejects coordinates outside `[0, N)`.
    #[instrument(skip(state))]
    pub fn check(mov: &Move, state: &GameState) -> Result<(), MoveError> {
        state.board().get(mov.position)?;
        Ok(())
    }
}

/// Precondition: The target cell must be empty.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Rejects a move onto an existing stone.
    #[instrument(skip(state))]
    pub fn check(mov: &Move, state: &GameState) -> Result<(), MoveError> {
        if !state.board().is_empty(mov.position) {
            Err(MoveError::CellOccupied(mov.position))
        } else {
            Ok(())
        }
    }
}

/// Composite precondition for a legal move.
///
/// Checks run in order: game over, turn, bounds, occupancy. The first
/// failure is reported.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(state))]
    pub fn check(mov: &Move, state: &GameState) -> Result<(), MoveError> {
        GameNotOver::check(mov, state)?;
        PlayersTurn::check(mov, state)?;
        InBounds::check(mov, state)?;
        CellIsEmpty::check(mov, state)?;
        Ok(())
    }
}

/// Contract for move actions.
///
/// Preconditions: `LegalMove`.
///
/// Postconditions:
/// - exactly one more stone is on the board
/// - all `GomokuInvariants` hold
/// - a finished game was in progress before
pub struct MoveContract;

impl Contract<GameState, Move> for MoveContract {
    fn pre(state: &GameState, action: &Move) -> Result<(), MoveError> {
        LegalMove::check(action, state)
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), MoveError> {
        if after.board().empty_count() + 1 != before.board().empty_count() {
            warn!(
                before = before.board().empty_count(),
                after = after.board().empty_count(),
                "Move did not place exactly one stone"
            );
            return Err(MoveError::InvariantViolation(
                "Postcondition failed: move must place exactly one stone".to_string(),
            ));
        }

        if before.status() != GameStatus::InProgress {
            return Err(MoveError::InvariantViolation(
                "Postcondition failed: move applied to a finished game".to_string(),
            ));
        }

        GomokuInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}
