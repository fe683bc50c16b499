//! Core domain types for gomoku.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Side length of the standard board.
pub const DEFAULT_BOARD_SIZE: usize = 15;

/// Number of aligned stones needed to win.
pub const WIN_LENGTH: usize = 5;

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Player {
    /// The human player (black, moves first).
    #[display("Black")]
    Human,
    /// The computer player (white).
    #[display("White")]
    Computer,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::Human => Player::Computer,
            Player::Computer => Player::Human,
        }
    }
}

/// A single intersection on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// No stone.
    Empty,
    /// Stone owned by a player.
    Occupied(Player),
}

/// A 0-indexed board coordinate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
)]
#[display("({}, {})", row, col)]
pub struct Position {
    /// Row index, top to bottom.
    pub row: usize,
    /// Column index, left to right.
    pub col: usize,
}

impl Position {
    /// Creates a new position.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Steps `distance` cells along `(dr, dc)`, or `None` below zero.
    pub(crate) fn offset(self, dr: isize, dc: isize, distance: isize) -> Option<Self> {
        let row = self.row.checked_add_signed(dr * distance)?;
        let col = self.col.checked_add_signed(dc * distance)?;
        Some(Self { row, col })
    }

    /// Manhattan distance to another position.
    pub fn manhattan(self, other: Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// Coordinate outside the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Position {} is outside the {}x{} board", position, size, size)]
pub struct OutOfBounds {
    /// The rejected coordinate.
    pub position: Position,
    /// Side length of the board.
    pub size: usize,
}

/// Cell storage that does not match the declared board size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Board of size {} needs {} cells, got {}", size, size * size, cells)]
pub struct InvalidBoard {
    /// Declared side length.
    pub size: usize,
    /// Number of cells supplied.
    pub cells: usize,
}

/// Square gomoku board.
///
/// Cells are stored in row-major order. The dimension is fixed at
/// construction and an empty-cell counter is kept in step with every
/// `set`, so fullness checks never rescan the grid.
///
/// Deserialization checks the cell count against the size and rebuilds
/// the counter from the cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
    #[serde(skip_serializing)]
    pub(crate) empty: usize,
}

/// Serialized board before validation.
#[derive(Deserialize)]
struct RawBoard {
    size: usize,
    cells: Vec<Cell>,
}

impl TryFrom<RawBoard> for Board {
    type Error = InvalidBoard;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        if raw.size.checked_mul(raw.size) != Some(raw.cells.len()) {
            return Err(InvalidBoard {
                size: raw.size,
                cells: raw.cells.len(),
            });
        }
        let empty = raw.cells.iter().filter(|c| **c == Cell::Empty).count();
        Ok(Self {
            size: raw.size,
            cells: raw.cells,
            empty,
        })
    }
}

impl Board {
    /// Creates an empty standard-size board.
    pub fn new() -> Self {
        Self::with_size(DEFAULT_BOARD_SIZE)
    }

    /// Creates an empty board of the given side length.
    #[instrument]
    pub fn with_size(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
            empty: size * size,
        }
    }

    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Center intersection, using floor division.
    pub fn center(&self) -> Position {
        Position::new(self.size / 2, self.size / 2)
    }

    /// Returns true if the position lies on the board.
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    fn index(&self, pos: Position) -> Result<usize, OutOfBounds> {
        if self.contains(pos) {
            Ok(pos.row * self.size + pos.col)
        } else {
            Err(OutOfBounds {
                position: pos,
                size: self.size,
            })
        }
    }

    /// Gets the cell at the given position.
    pub fn get(&self, pos: Position) -> Result<Cell, OutOfBounds> {
        let idx = self.index(pos)?;
        Ok(self.cells[idx])
    }

    /// Sets the cell at the given position.
    pub fn set(&mut self, pos: Position, cell: Cell) -> Result<(), OutOfBounds> {
        let idx = self.index(pos)?;
        match (self.cells[idx], cell) {
            (Cell::Empty, Cell::Occupied(_)) => self.empty -= 1,
            (Cell::Occupied(_), Cell::Empty) => self.empty += 1,
            _ => {}
        }
        self.cells[idx] = cell;
        Ok(())
    }

    /// Checks if a cell is empty. Off-board positions are never empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        matches!(self.get(pos), Ok(Cell::Empty))
    }

    /// Returns true when no empty cell remains.
    pub fn is_full(&self) -> bool {
        self.empty == 0
    }

    /// Number of empty cells.
    pub fn empty_count(&self) -> usize {
        self.empty
    }

    /// Counts cells equal to `cell`.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|c| **c == cell).count()
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterates every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.size).flat_map(move |row| (0..self.size).map(move |col| Position::new(row, col)))
    }

    /// Empty positions in row-major order.
    pub fn empty_positions(&self) -> Vec<Position> {
        self.positions().filter(|pos| self.is_empty(*pos)).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Player),
    /// Game ended in a draw.
    Draw,
}

impl GameStatus {
    /// Returns true for `Won` and `Draw`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// Complete game snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) to_move: Player,
    pub(crate) status: GameStatus,
    pub(crate) history: Vec<crate::Move>,
}

impl GameState {
    /// Creates the initial state on a board of the given size.
    pub fn new(size: usize) -> Self {
        Self {
            board: Board::with_size(size),
            to_move: Player::Human,
            status: GameStatus::InProgress,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the moves played so far.
    pub fn history(&self) -> &[crate::Move] {
        &self.history
    }

    /// Returns the most recent move.
    pub fn last_move(&self) -> Option<crate::Move> {
        self.history.last().copied()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.size(), 15);
        assert_eq!(board.empty_count(), 225);
        assert!(!board.is_full());
        assert_eq!(board.center(), Position::new(7, 7));
    }

    #[test]
    fn test_get_out_of_bounds() {
        let board = Board::new();
        let err = board.get(Position::new(15, 0)).unwrap_err();
        assert_eq!(err.position, Position::new(15, 0));
        assert_eq!(err.size, 15);
        assert!(board.get(Position::new(0, 15)).is_err());
    }

    #[test]
    fn test_set_out_of_bounds_leaves_board_untouched() {
        let mut board = Board::new();
        let before = board.clone();
        assert!(board.set(Position::new(3, 99), Cell::Occupied(Player::Human)).is_err());
        assert_eq!(board, before);
    }

    #[test]
    fn test_empty_counter_tracks_every_transition() {
        let mut board = Board::with_size(3);
        let pos = Position::new(1, 1);

        board.set(pos, Cell::Occupied(Player::Human)).unwrap();
        assert_eq!(board.empty_count(), 8);

        board.set(pos, Cell::Occupied(Player::Computer)).unwrap();
        assert_eq!(board.empty_count(), 8);

        board.set(pos, Cell::Empty).unwrap();
        assert_eq!(board.empty_count(), 9);
        assert_eq!(board.count(Cell::Empty), 9);
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::with_size(2);
        for pos in board.positions().collect::<Vec<_>>() {
            board.set(pos, Cell::Occupied(Player::Computer)).unwrap();
        }
        assert!(board.is_full());
        assert!(board.empty_positions().is_empty());
    }

    #[test]
    fn test_offset_stops_below_zero() {
        let pos = Position::new(0, 2);
        assert_eq!(pos.offset(0, 1, 2), Some(Position::new(0, 4)));
        assert_eq!(pos.offset(-1, 0, 1), None);
        assert_eq!(pos.offset(1, -1, 2), Some(Position::new(2, 0)));
        assert_eq!(pos.offset(1, -1, 3), None);
    }

    #[test]
    fn test_deserialize_rejects_wrong_cell_count() {
        let err = serde_json::from_str::<Board>(r#"{"size":15,"cells":[]}"#).unwrap_err();
        assert!(err.to_string().contains("needs 225 cells, got 0"));
    }

    #[test]
    fn test_deserialize_rebuilds_empty_counter() {
        let json = r#"{"size":2,"cells":["Empty","Empty","Empty","Empty"],"empty":0}"#;
        let mut board: Board = serde_json::from_str(json).unwrap();
        assert_eq!(board.empty_count(), 4);
        assert!(!board.is_full());

        board
            .set(Position::new(0, 0), Cell::Occupied(Player::Human))
            .unwrap();
        assert_eq!(board.empty_count(), 3);
    }

    #[test]
    fn test_serialized_board_reads_back() {
        let mut board = Board::with_size(3);
        board
            .set(Position::new(1, 1), Cell::Occupied(Player::Computer))
            .unwrap();
        let json = serde_json::to_string(&board).unwrap();
        assert!(!json.contains("empty"));
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
        assert_eq!(back.empty_count(), 8);
    }

    #[test]
    fn test_opponent() {
        assert_eq!(Player::Human.opponent(), Player::Computer);
        assert_eq!(Player::Computer.opponent(), Player::Human);
    }
}
