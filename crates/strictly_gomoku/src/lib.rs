//! Pure gomoku game logic.
//!
//! Five in a row on a 15×15 board, human (black) against a greedy
//! one-ply computer player (white). The crate is synchronous and free of
//! I/O: hosts feed coordinates into [`Game`] and render the returned
//! [`GameState`] snapshots.
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use strictly_gomoku::{Game, Phase};
//!
//! let mut game = Game::new();
//! game.play(7, 7)?;
//! assert_eq!(game.phase(), Phase::AwaitingComputer);
//!
//! let mut rng = StdRng::seed_from_u64(0);
//! game.play_computer_turn(&mut rng)?;
//! assert_eq!(game.phase(), Phase::AwaitingHuman);
//! # Ok::<(), strictly_gomoku::MoveError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
pub mod contracts;
mod game;
pub mod heuristic;
pub mod invariants;
pub mod rules;
mod types;

pub use action::{Move, MoveError};
pub use game::{Game, Phase};
pub use heuristic::{score_breakdown, score_cell, select_move, ScoreBreakdown};
pub use rules::{check_win, count_consecutive, is_draw, is_full, Direction};
pub use types::{
    Board, Cell, GameState, GameStatus, InvalidBoard, OutOfBounds, Player, Position,
    DEFAULT_BOARD_SIZE, WIN_LENGTH,
};
