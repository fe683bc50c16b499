//! First-class action types for gomoku.
//!
//! A move is a player's intent to place a stone. It can be validated
//! against a state before it is applied.

use super::types::{OutOfBounds, Player, Position};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A player placing a stone at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// Where the stone goes.
    pub position: Position,
}

impl Move {
    /// Creates a new move.
    #[instrument]
    pub fn new(player: Player, position: Position) -> Self {
        Self { player, position }
    }

    /// Returns the player making this move.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Returns the position of this move.
    pub fn position(&self) -> Position {
        self.position
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.position)
    }
}

/// Reasons a move is rejected.
///
/// Every variant except `InvariantViolation` is an illegal move: the
/// controller refuses it and leaves the game state unchanged.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// The coordinate is outside the board.
    #[display("{}", _0)]
    OutOfBounds(OutOfBounds),

    /// The target cell already holds a stone.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(#[error(not(source))] Position),

    /// It is not this player's turn.
    #[display("It's not {}'s turn", _0)]
    WrongTurn(#[error(not(source))] Player),

    /// The game has already been won or drawn.
    #[display("Game is already over")]
    GameAlreadyOver,

    /// No empty cell is left to choose from.
    #[display("No empty cell left on the board")]
    NoEmptyCell,

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(#[error(not(source))] String),
}

impl From<OutOfBounds> for MoveError {
    fn from(err: OutOfBounds) -> Self {
        MoveError::OutOfBounds(err)
    }
}

impl MoveError {
    /// Returns true for rejections caused by the caller's move.
    pub fn is_illegal_move(&self) -> bool {
        matches!(
            self,
            MoveError::OutOfBounds(_)
                | MoveError::CellOccupied(_)
                | MoveError::WrongTurn(_)
                | MoveError::GameAlreadyOver
        )
    }
}
