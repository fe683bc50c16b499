//! History consistency invariant: history matches the stones on the board.

use super::super::{Cell, GameState};
use super::Invariant;

/// Invariant: every move in history is on the board, owned by its player.
///
/// History length equals the number of occupied cells, so no stone
/// exists without a move and no move was lost.
pub struct HistoryConsistentInvariant;

impl Invariant<GameState> for HistoryConsistentInvariant {
    fn holds(state: &GameState) -> bool {
        let board = state.board();
        let occupied = board.size() * board.size() - board.count(Cell::Empty);

        state.history().len() == occupied
            && state
                .history()
                .iter()
                .all(|mv| board.get(mv.position) == Ok(Cell::Occupied(mv.player)))
    }

    fn description() -> &'static str {
        "History matches the stones on the board"
    }
}
