//! Win detection logic for gomoku.

use super::super::{Board, Player, Position, WIN_LENGTH};
use super::line::{count_consecutive, Direction};
use tracing::instrument;

/// Checks whether the stone `owner` just placed at `pos` completes a line.
///
/// Only the four lines through `pos` are inspected, so this must run
/// right after the stone is placed. Lines longer than five also win.
#[instrument(skip(board))]
pub fn check_win(board: &Board, pos: Position, owner: Player) -> bool {
    Direction::all()
        .any(|direction| 1 + count_consecutive(board, pos, direction, owner) >= WIN_LENGTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cell;

    fn board_with(player: Player, cells: &[(usize, usize)]) -> Board {
        let mut board = Board::new();
        for &(row, col) in cells {
            board.set(Position::new(row, col), Cell::Occupied(player)).unwrap();
        }
        board
    }

    #[test]
    fn test_exactly_five_horizontal() {
        let board = board_with(Player::Human, &[(10, 2), (10, 3), (10, 4), (10, 5), (10, 6)]);
        assert!(check_win(&board, Position::new(10, 6), Player::Human));
        assert!(check_win(&board, Position::new(10, 4), Player::Human));
    }

    #[test]
    fn test_four_is_not_a_win() {
        let board = board_with(Player::Human, &[(3, 3), (4, 3), (5, 3), (6, 3)]);
        assert!(!check_win(&board, Position::new(6, 3), Player::Human));
    }

    #[test]
    fn test_six_is_a_win() {
        let board = board_with(
            Player::Computer,
            &[(0, 0), (1, 1), (2, 2), (3, 3), (4, 4), (5, 5)],
        );
        assert!(check_win(&board, Position::new(2, 2), Player::Computer));
    }

    #[test]
    fn test_anti_diagonal_five() {
        let board = board_with(Player::Computer, &[(0, 14), (1, 13), (2, 12), (3, 11), (4, 10)]);
        assert!(check_win(&board, Position::new(4, 10), Player::Computer));
    }

    #[test]
    fn test_broken_by_opponent_is_not_a_win() {
        let mut board = board_with(Player::Human, &[(7, 3), (7, 4), (7, 6), (7, 7)]);
        board.set(Position::new(7, 5), Cell::Occupied(Player::Computer)).unwrap();
        assert!(!check_win(&board, Position::new(7, 7), Player::Human));
        assert!(!check_win(&board, Position::new(7, 3), Player::Human));
    }

    #[test]
    fn test_other_owner_does_not_win() {
        let board = board_with(Player::Human, &[(10, 2), (10, 3), (10, 4), (10, 5), (10, 6)]);
        assert!(!check_win(&board, Position::new(10, 6), Player::Computer));
    }
}
