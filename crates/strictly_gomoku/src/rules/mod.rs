//! Game rules for gomoku.
//!
//! Pure functions over a borrowed board. Rules are separated from board
//! storage so the controller, contracts and heuristic can share them.

pub mod draw;
pub mod line;
pub mod win;

pub use draw::{is_draw, is_full};
pub use line::{count_consecutive, Direction};
pub use win::check_win;
