//! Terminal host for the strictly_gomoku engine.
//!
//! The engine crate holds every rule; this crate adds what a playable
//! program needs around it.
//!
//! # Architecture
//!
//! - **Config**: TOML host settings (think delay, tie-break seed, logging)
//! - **Session**: one mutex-guarded game with a delayed computer turn
//! - **Players**: keyboard human or seeded random stand-in
//! - **Orchestrator**: the input/draw loop over a ratatui terminal
//! - **Render**: ratatui widgets for the board and status

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod orchestrator;
mod players;
mod render;
mod session;
pub mod terminal;

// Crate-level exports - Configuration
pub use config::{ConfigError, HostConfig};

// Crate-level exports - Game loop
pub use orchestrator::{AfterGame, Orchestrator};
pub use players::{move_cursor, Action, HumanPlayer, Player, RandomPlayer};
pub use session::{GameEvent, GameSession};

// Crate-level exports - Rendering
pub use render::{
    buffer_text, draw, headless_terminal, screen_text, status_line, SCREEN_HEIGHT, SCREEN_WIDTH,
};
