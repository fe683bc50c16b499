//! Draw detection logic for gomoku.

use super::super::{Board, Player, Position};
use super::win::check_win;
use tracing::instrument;

/// Checks if the board is full (no empty cell left).
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.is_full()
}

/// Checks whether the move just played at `pos` ended the game in a draw.
///
/// A full board only counts as a draw when that last stone did not win.
#[instrument(skip(board))]
pub fn is_draw(board: &Board, pos: Position, owner: Player) -> bool {
    is_full(board) && !check_win(board, pos, owner)
}
