//! Run counting along the four board axes.
//!
//! Shared by win detection and the computer's heuristic.

use super::super::{Board, Cell, Player, Position};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};
use tracing::instrument;

/// One of the four axes a line can run along.
///
/// Each axis is scanned in both orientations, so only one of
/// `(dr, dc)` and `(-dr, -dc)` appears here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum Direction {
    /// Left to right, `(0, 1)`.
    Horizontal,
    /// Top to bottom, `(1, 0)`.
    Vertical,
    /// Top-left to bottom-right, `(1, 1)`.
    DiagonalDown,
    /// Top-right to bottom-left, `(1, -1)`.
    DiagonalUp,
}

impl Direction {
    /// Row and column step of the forward orientation.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::DiagonalDown => (1, 1),
            Direction::DiagonalUp => (1, -1),
        }
    }

    /// All four axes in scan order.
    pub fn all() -> impl Iterator<Item = Direction> {
        Direction::iter()
    }
}

/// Counts `owner` stones in a straight line from `pos`, excluding `pos`.
///
/// Walks forward from one step past `pos` until the edge or a cell not
/// owned by `owner`, then does the same backward, and returns the sum.
#[instrument(level = "trace", skip(board))]
pub fn count_consecutive(
    board: &Board,
    pos: Position,
    direction: Direction,
    owner: Player,
) -> usize {
    let (dr, dc) = direction.delta();
    run_length(board, pos, dr, dc, owner) + run_length(board, pos, -dr, -dc, owner)
}

fn run_length(board: &Board, pos: Position, dr: isize, dc: isize, owner: Player) -> usize {
    (1..)
        .map_while(|step| pos.offset(dr, dc, step))
        .take_while(|next| board.get(*next) == Ok(Cell::Occupied(owner)))
        .count()
}
