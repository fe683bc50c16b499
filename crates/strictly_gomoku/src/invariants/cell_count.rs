//! Cell count invariant: every cell is accounted for exactly once.

use super::super::{Cell, GameState, Player};
use super::Invariant;

/// Invariant: Human, Computer and Empty counts add up to N².
///
/// Also checks that the board's incremental empty counter agrees with
/// the cells it summarises.
pub struct CellCountInvariant;

impl Invariant<GameState> for CellCountInvariant {
    fn holds(state: &GameState) -> bool {
        let board = state.board();
        let human = board.count(Cell::Occupied(Player::Human));
        let computer = board.count(Cell::Occupied(Player::Computer));
        let empty = board.count(Cell::Empty);

        human + computer + empty == board.size() * board.size() && empty == board.empty_count()
    }

    fn description() -> &'static str {
        "Human, computer and empty cells add up to the board area"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, Game};

    #[test]
    fn test_holds_for_every_size() {
        for size in [1, 5, 15, 19] {
            let state = GameState::new(size);
            assert!(CellCountInvariant::holds(&state));
        }
    }

    #[test]
    fn test_holds_through_a_game() {
        let mut game = Game::new();
        for (row, col) in [(7, 7), (0, 0), (7, 8), (0, 1), (7, 9)] {
            game.play(row, col).unwrap();
            assert!(CellCountInvariant::holds(game.state()));
        }
    }

    #[test]
    fn test_detects_stale_counter() {
        let mut state = GameState::default();
        state.board = Board::with_size(3);
        state.board.empty = 4;
        assert!(!CellCountInvariant::holds(&state));
    }
}
