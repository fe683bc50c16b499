//! Game controller for gomoku.
//!
//! `Game` is the single owner of the mutable `GameState`. Every change
//! goes through `apply_move` or `reset`; the rules and the heuristic only
//! ever see a borrowed board.

use super::action::{Move, MoveError};
use super::contracts::{Contract, MoveContract};
use super::heuristic::select_move;
use super::rules::{check_win, is_full};
use super::{Cell, GameState, GameStatus, Player, Position, DEFAULT_BOARD_SIZE};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Where the game stands, from the host's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the human's move.
    AwaitingHuman,
    /// Waiting for the computer's move.
    AwaitingComputer,
    /// Game ended in a win.
    Won(Player),
    /// Game ended in a draw.
    Draw,
}

impl Phase {
    /// Returns true for `Won` and `Draw`.
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Won(_) | Phase::Draw)
    }
}

/// Gomoku game engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    state: GameState,
}

impl Game {
    /// Creates a new game on the standard board.
    #[instrument]
    pub fn new() -> Self {
        Self::with_board_size(DEFAULT_BOARD_SIZE)
    }

    /// Creates a new game on a board of the given side length.
    #[instrument]
    pub fn with_board_size(size: usize) -> Self {
        Self {
            state: GameState::new(size),
        }
    }

    /// Returns the current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    /// Returns true once the game is won or drawn.
    pub fn is_over(&self) -> bool {
        self.state.status().is_terminal()
    }

    /// Returns the current phase of the turn cycle.
    pub fn phase(&self) -> Phase {
        match self.state.status() {
            GameStatus::Won(player) => Phase::Won(player),
            GameStatus::Draw => Phase::Draw,
            GameStatus::InProgress => match self.state.to_move() {
                Player::Human => Phase::AwaitingHuman,
                Player::Computer => Phase::AwaitingComputer,
            },
        }
    }

    /// Applies a move after validating it.
    ///
    /// On error the state is left untouched.
    ///
    /// # Errors
    ///
    /// `GameAlreadyOver`, `WrongTurn`, `OutOfBounds` or `CellOccupied`,
    /// checked in that order.
    #[instrument(skip(self), fields(player = %action.player, position = %action.position))]
    pub fn apply_move(&mut self, action: Move) -> Result<&GameState, MoveError> {
        if let Err(e) = MoveContract::pre(&self.state, &action) {
            warn!(error = %e, "Rejected move");
            return Err(e);
        }

        #[cfg(debug_assertions)]
        let before = self.state.clone();

        self.state
            .board
            .set(action.position, Cell::Occupied(action.player))?;
        self.state.history.push(action);

        if check_win(&self.state.board, action.position, action.player) {
            info!(winner = %action.player, moves = self.state.history.len(), "Game won");
            self.state.status = GameStatus::Won(action.player);
        } else if is_full(&self.state.board) {
            info!(moves = self.state.history.len(), "Game drawn");
            self.state.status = GameStatus::Draw;
        } else {
            self.state.to_move = action.player.opponent();
        }

        #[cfg(debug_assertions)]
        if let Err(e) = MoveContract::post(&before, &self.state) {
            warn!(error = %e, "Postcondition failed, rolling back");
            self.state = before;
            return Err(e);
        }

        Ok(&self.state)
    }

    /// Plays `(row, col)` for whichever player is to move.
    pub fn play(&mut self, row: usize, col: usize) -> Result<&GameState, MoveError> {
        let action = Move::new(self.state.to_move(), Position::new(row, col));
        self.apply_move(action)
    }

    /// Chooses the computer's move without applying it.
    ///
    /// # Errors
    ///
    /// `GameAlreadyOver` once the game has ended, `WrongTurn` while the
    /// human is to move.
    #[instrument(skip(self, rng))]
    pub fn computer_move<R: Rng>(&self, rng: &mut R) -> Result<Position, MoveError> {
        match self.phase() {
            Phase::AwaitingComputer => {}
            Phase::AwaitingHuman => return Err(MoveError::WrongTurn(Player::Computer)),
            Phase::Won(_) | Phase::Draw => return Err(MoveError::GameAlreadyOver),
        }
        select_move(&self.state.board, rng).ok_or(MoveError::NoEmptyCell)
    }

    /// Chooses and applies the computer's move.
    #[instrument(skip(self, rng))]
    pub fn play_computer_turn<R: Rng>(&mut self, rng: &mut R) -> Result<Position, MoveError> {
        let position = self.computer_move(rng)?;
        debug!(%position, "Computer plays");
        self.apply_move(Move::new(Player::Computer, position))?;
        Ok(position)
    }

    /// Discards the board and starts over with the human to move.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> &GameState {
        info!(moves = self.state.history.len(), "Resetting game");
        self.state = GameState::new(self.state.board.size());
        &self.state
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_initial_state() {
        let game = Game::new();
        assert_eq!(game.phase(), Phase::AwaitingHuman);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.state().board().size(), 15);
        assert!(game.state().history().is_empty());
    }

    #[test]
    fn test_move_toggles_turn() {
        let mut game = Game::new();
        game.play(7, 7).unwrap();
        assert_eq!(game.phase(), Phase::AwaitingComputer);
        assert_eq!(
            game.state().board().get(Position::new(7, 7)),
            Ok(Cell::Occupied(Player::Human))
        );
    }

    #[test]
    fn test_rejected_move_leaves_state_unchanged() {
        let mut game = Game::new();
        game.play(7, 7).unwrap();
        let before = game.clone();

        let err = game
            .apply_move(Move::new(Player::Human, Position::new(0, 0)))
            .unwrap_err();
        assert_eq!(err, MoveError::WrongTurn(Player::Human));

        let err = game
            .apply_move(Move::new(Player::Computer, Position::new(7, 7)))
            .unwrap_err();
        assert_eq!(err, MoveError::CellOccupied(Position::new(7, 7)));

        let err = game.play(7, 15).unwrap_err();
        assert!(matches!(err, MoveError::OutOfBounds(_)));
        assert!(err.is_illegal_move());

        assert_eq!(game, before);
    }

    #[cfg(debug_assertions)]
    #[test]
    fn test_failed_postcondition_rolls_back() {
        let mut game = Game::new();
        game.state
            .history
            .push(Move::new(Player::Computer, Position::new(0, 0)));
        let before = game.clone();

        let err = game.play(7, 7).unwrap_err();
        assert!(matches!(err, MoveError::InvariantViolation(_)));
        assert!(!err.is_illegal_move());
        assert_eq!(game, before);
        assert!(game.state().board().is_empty(Position::new(7, 7)));
    }

    #[test]
    fn test_computer_move_requires_computer_turn() {
        let game = Game::new();
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(
            game.computer_move(&mut rng),
            Err(MoveError::WrongTurn(Player::Computer))
        );
    }

    #[test]
    fn test_computer_turn_applies_move() {
        let mut game = Game::new();
        let mut rng = StdRng::seed_from_u64(3);
        game.play(7, 7).unwrap();
        let position = game.play_computer_turn(&mut rng).unwrap();
        assert_eq!(
            game.state().board().get(position),
            Ok(Cell::Occupied(Player::Computer))
        );
        assert_eq!(position.manhattan(Position::new(7, 7)), 1);
        assert_eq!(game.phase(), Phase::AwaitingHuman);
    }

    #[test]
    fn test_reset_mid_game() {
        let mut game = Game::new();
        game.play(7, 7).unwrap();
        game.play(7, 8).unwrap();
        game.reset();
        assert_eq!(game, Game::new());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut game = Game::new();
        game.play(3, 4).unwrap();
        let once = game.reset().clone();
        let twice = game.reset().clone();
        assert_eq!(once, twice);
        assert_eq!(once, GameState::default());
    }

    #[test]
    fn test_reset_keeps_board_size() {
        let mut game = Game::with_board_size(9);
        game.play(4, 4).unwrap();
        game.reset();
        assert_eq!(game.state().board().size(), 9);
    }

    #[test]
    fn test_small_board_draw() {
        let mut game = Game::with_board_size(2);
        for (row, col) in [(0, 0), (0, 1), (1, 0)] {
            game.play(row, col).unwrap();
        }
        assert_eq!(game.phase(), Phase::AwaitingComputer);
        game.play(1, 1).unwrap();
        assert_eq!(game.phase(), Phase::Draw);
        assert!(game.phase().is_terminal());
    }
}
