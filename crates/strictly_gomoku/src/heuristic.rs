//! Greedy one-ply move selection for the computer player.
//!
//! Every empty cell is scored by how much it would extend the computer's
//! lines, how much it would block the human's lines, and how close it is
//! to the center. The best-scoring cell wins; ties are broken with the
//! caller's random source.

use super::rules::{count_consecutive, Direction};
use super::{Board, Player, Position};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Points for extending the computer's own run of the given length.
fn offense_points(run: usize) -> i32 {
    match run {
        0 => 0,
        1 => 10,
        2 => 100,
        3 => 1_000,
        _ => 10_000,
    }
}

/// Points for blocking a human run of the given length.
///
/// A lone human stone earns nothing, unlike a lone computer stone.
fn defense_points(run: usize) -> i32 {
    match run {
        0 | 1 => 0,
        2 => 50,
        3 => 500,
        _ => 5_000,
    }
}

/// Center-proximity bonus, counted once per cell.
fn position_points(board: &Board, pos: Position) -> i32 {
    let size = board.size() as i32;
    let distance = pos.manhattan(board.center()) as i32;
    (size - distance) * 2
}

/// Components of a cell's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Sum of offense points over the four axes.
    pub offense: i32,
    /// Sum of defense points over the four axes.
    pub defense: i32,
    /// Center-proximity bonus.
    pub position: i32,
}

impl ScoreBreakdown {
    /// Total score.
    pub fn total(&self) -> i32 {
        self.offense + self.defense + self.position
    }
}

/// Scores a candidate cell from the computer's point of view.
///
/// Meaningful for empty cells only: the candidate itself never counts
/// towards either player's run.
#[instrument(level = "trace", skip(board))]
pub fn score_breakdown(board: &Board, pos: Position) -> ScoreBreakdown {
    let mut breakdown = ScoreBreakdown {
        position: position_points(board, pos),
        ..ScoreBreakdown::default()
    };
    for direction in Direction::all() {
        let own = count_consecutive(board, pos, direction, Player::Computer);
        let opp = count_consecutive(board, pos, direction, Player::Human);
        breakdown.offense += offense_points(own);
        breakdown.defense += defense_points(opp);
    }
    breakdown
}

/// Total heuristic score of a candidate cell.
pub fn score_cell(board: &Board, pos: Position) -> i32 {
    score_breakdown(board, pos).total()
}

/// Empty cells sharing the highest score, in row-major order.
#[instrument(skip(board))]
pub fn best_cells(board: &Board) -> (i32, Vec<Position>) {
    let mut best_score = i32::MIN;
    let mut best = Vec::new();

    for pos in board.positions().filter(|pos| board.is_empty(*pos)) {
        let score = score_cell(board, pos);
        if score > best_score {
            best_score = score;
            best.clear();
            best.push(pos);
        } else if score == best_score {
            best.push(pos);
        }
    }

    (best_score, best)
}

/// Picks the computer's move.
///
/// Returns `None` only when the board has no empty cell.
#[instrument(skip(board, rng))]
pub fn select_move<R: Rng>(board: &Board, rng: &mut R) -> Option<Position> {
    let (score, candidates) = best_cells(board);
    if candidates.is_empty() {
        return None;
    }

    let choice = candidates[rng.random_range(0..candidates.len())];
    debug!(score, ties = candidates.len(), position = %choice, "Selected computer move");
    Some(choice)
}
