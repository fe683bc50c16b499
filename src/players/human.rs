//! Human player that gets input from keyboard.

use super::{Action, Player};
use anyhow::Result;
use crossterm::event::KeyCode;
use strictly_gomoku::{GameState, Position, DEFAULT_BOARD_SIZE};
use tokio::sync::mpsc;
use tracing::{debug, instrument};

/// Moves the cursor one cell for an arrow key, clamped to the board.
pub fn move_cursor(cursor: Position, key: KeyCode, size: usize) -> Position {
    let last = size.saturating_sub(1);
    let (row, col) = (cursor.row.min(last), cursor.col.min(last));
    match key {
        KeyCode::Up => Position::new(row.saturating_sub(1), col),
        KeyCode::Down => Position::new((row + 1).min(last), col),
        KeyCode::Left => Position::new(row, col.saturating_sub(1)),
        KeyCode::Right => Position::new(row, (col + 1).min(last)),
        _ => cursor,
    }
}

/// Human player using keyboard input.
///
/// Arrow keys move a cursor, `Enter` or `Space` places a stone there,
/// `r` restarts, `h`/`?` shows help and `q`/`Esc` quits. A closed key
/// channel counts as quitting.
pub struct HumanPlayer {
    name: String,
    input_rx: mpsc::UnboundedReceiver<KeyCode>,
    cursor: Position,
}

impl HumanPlayer {
    /// Creates a new human player with the cursor on the center point.
    pub fn new(name: impl Into<String>, input_rx: mpsc::UnboundedReceiver<KeyCode>) -> Self {
        Self {
            name: name.into(),
            input_rx,
            cursor: Position::new(DEFAULT_BOARD_SIZE / 2, DEFAULT_BOARD_SIZE / 2),
        }
    }
}

#[async_trait::async_trait]
impl Player for HumanPlayer {
    #[instrument(skip(self, state), fields(player = %self.name))]
    async fn next_action(&mut self, state: &GameState) -> Result<Action> {
        while let Some(key) = self.input_rx.recv().await {
            match key {
                KeyCode::Enter | KeyCode::Char(' ') => return Ok(Action::Place(self.cursor)),
                KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                    self.cursor = move_cursor(self.cursor, key, state.board().size());
                    return Ok(Action::MoveCursor(self.cursor));
                }
                KeyCode::Char('r') => return Ok(Action::Reset),
                KeyCode::Char('h') | KeyCode::Char('?') => return Ok(Action::Help),
                KeyCode::Char('q') | KeyCode::Esc => return Ok(Action::Quit),
                other => debug!(key = ?other, "Ignoring key"),
            }
        }

        debug!("Input channel closed");
        Ok(Action::Quit)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn cursor(&self) -> Option<Position> {
        Some(self.cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(keys: &[KeyCode]) -> HumanPlayer {
        let (tx, rx) = mpsc::unbounded_channel();
        for key in keys {
            tx.send(*key).unwrap();
        }
        HumanPlayer::new("Tester", rx)
    }

    #[test]
    fn test_cursor_moves_and_clamps() {
        let corner = Position::new(0, 0);
        assert_eq!(move_cursor(corner, KeyCode::Up, 15), corner);
        assert_eq!(move_cursor(corner, KeyCode::Left, 15), corner);
        assert_eq!(move_cursor(corner, KeyCode::Down, 15), Position::new(1, 0));
        assert_eq!(move_cursor(corner, KeyCode::Right, 15), Position::new(0, 1));

        let far = Position::new(14, 14);
        assert_eq!(move_cursor(far, KeyCode::Down, 15), far);
        assert_eq!(move_cursor(far, KeyCode::Right, 15), far);
        assert_eq!(move_cursor(far, KeyCode::Char('x'), 15), far);
    }

    #[tokio::test]
    async fn test_keys_map_to_actions() {
        let state = GameState::default();
        let mut human = player(&[
            KeyCode::Char('z'),
            KeyCode::Enter,
            KeyCode::Up,
            KeyCode::Char(' '),
            KeyCode::Char('r'),
            KeyCode::Char('?'),
            KeyCode::Esc,
        ]);

        assert_eq!(human.cursor(), Some(Position::new(7, 7)));
        assert_eq!(human.next_action(&state).await.unwrap(), Action::Place(Position::new(7, 7)));
        assert_eq!(
            human.next_action(&state).await.unwrap(),
            Action::MoveCursor(Position::new(6, 7))
        );
        assert_eq!(human.next_action(&state).await.unwrap(), Action::Place(Position::new(6, 7)));
        assert_eq!(human.next_action(&state).await.unwrap(), Action::Reset);
        assert_eq!(human.next_action(&state).await.unwrap(), Action::Help);
        assert_eq!(human.next_action(&state).await.unwrap(), Action::Quit);
    }

    #[tokio::test]
    async fn test_closed_channel_quits() {
        let mut human = player(&[]);
        assert_eq!(human.next_action(&GameState::default()).await.unwrap(), Action::Quit);
    }

    #[tokio::test]
    async fn test_cursor_respects_board_size() {
        let state = strictly_gomoku::Game::with_board_size(5).state().clone();
        let mut human = player(&[KeyCode::Down]);
        assert_eq!(
            human.next_action(&state).await.unwrap(),
            Action::MoveCursor(Position::new(4, 4))
        );
    }
}
