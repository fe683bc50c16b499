//! Stateless UI rendering for gomoku.

use anyhow::Result;
use ratatui::{
    backend::TestBackend,
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use strictly_gomoku::{Board, Cell, GameState, GameStatus, Player, Position};

/// Width of the off-screen terminal used by headless runs.
pub const SCREEN_WIDTH: u16 = 60;

/// Height of the off-screen terminal used by headless runs.
pub const SCREEN_HEIGHT: u16 = 26;

/// Star points drawn on boards of at least 9×9.
fn star_points(size: usize) -> Vec<Position> {
    if size < 9 {
        return Vec::new();
    }
    let far = size - 4;
    vec![
        Position::new(3, 3),
        Position::new(3, far),
        Position::new(size / 2, size / 2),
        Position::new(far, 3),
        Position::new(far, far),
    ]
}

/// One-line description of whose turn it is or how the game ended.
pub fn status_line(state: &GameState) -> String {
    match state.status() {
        GameStatus::InProgress => match state.to_move() {
            Player::Human if state.history().is_empty() => {
                "Black moves first - your turn".to_string()
            }
            Player::Human => "Your turn".to_string(),
            Player::Computer => "Computer is thinking...".to_string(),
        },
        GameStatus::Won(Player::Human) => "You win!".to_string(),
        GameStatus::Won(Player::Computer) => "Computer wins!".to_string(),
        GameStatus::Draw => "Draw!".to_string(),
    }
}

/// Renders the whole screen: title, board, status and footer message.
pub fn draw(frame: &mut Frame, state: &GameState, cursor: Option<Position>, message: &str) {
    let board = state.board();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                    // Title
            Constraint::Min(board.size() as u16 + 1), // Board
            Constraint::Length(3),                    // Status
            Constraint::Length(2),                    // Message
        ])
        .split(frame.area());

    let title = Paragraph::new("Gomoku - Five in a Row")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_board(frame, chunks[1], board, cursor);

    let status = Paragraph::new(status_line(state))
        .style(status_style(state.status()))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[2]);

    let footer = Paragraph::new(message)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[3]);
}

fn status_style(status: GameStatus) -> Style {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    match status {
        GameStatus::InProgress => Style::default().fg(Color::Yellow),
        GameStatus::Won(Player::Human) => bold.fg(Color::Green),
        GameStatus::Won(Player::Computer) => bold.fg(Color::Red),
        GameStatus::Draw => Style::default().fg(Color::Magenta),
    }
}

fn draw_board(frame: &mut Frame, area: Rect, board: &Board, cursor: Option<Position>) {
    let size = board.size();
    let width = 3 * (size as u16 + 1);
    let height = size as u16 + 1;
    let paragraph = Paragraph::new(board_lines(board, cursor));
    frame.render_widget(paragraph, center_rect(area, width, height));
}

/// Column header followed by one line per row.
///
/// `X` is the human (black), `O` the computer (white), `+` an empty star
/// point and `.` any other empty intersection.
fn board_lines(board: &Board, cursor: Option<Position>) -> Vec<Line<'static>> {
    let size = board.size();
    let stars = star_points(size);
    let label = Style::default().fg(Color::DarkGray);

    let header: String = (0..size).map(|col| format!("{:>3}", col)).collect();
    let mut lines = vec![Line::from(Span::styled(format!("   {}", header), label))];

    for row in 0..size {
        let mut spans = vec![Span::styled(format!("{:>3}", row), label)];
        for col in 0..size {
            let pos = Position::new(row, col);
            let cell = board.get(pos).unwrap_or(Cell::Empty);
            let (symbol, style) = match cell {
                Cell::Occupied(Player::Human) => (
                    "X",
                    Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
                ),
                Cell::Occupied(Player::Computer) => (
                    "O",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Cell::Empty if stars.contains(&pos) => ("+", Style::default().fg(Color::Gray)),
                Cell::Empty => (".", Style::default().fg(Color::DarkGray)),
            };
            let style = if cursor == Some(pos) {
                style.add_modifier(Modifier::REVERSED)
            } else {
                style
            };
            spans.push(Span::raw("  "));
            spans.push(Span::styled(symbol, style));
        }
        lines.push(Line::from(spans));
    }
    lines
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}

/// Creates an off-screen terminal for runs without a live display.
pub fn headless_terminal() -> Result<Terminal<TestBackend>> {
    Terminal::new(TestBackend::new(SCREEN_WIDTH, SCREEN_HEIGHT))
        .map_err(|e| anyhow::anyhow!("Failed to create headless terminal: {}", e))
}

/// Plain text of a rendered buffer, one line per row, trailing blanks trimmed.
pub fn buffer_text(buffer: &Buffer) -> String {
    let width = usize::from(buffer.area.width.max(1));
    buffer
        .content
        .chunks(width)
        .map(|row| {
            let line: String = row.iter().map(|cell| cell.symbol()).collect();
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders one screen off-screen and returns it as text.
pub fn screen_text(state: &GameState, message: &str) -> Result<String> {
    let mut terminal = headless_terminal()?;
    terminal
        .draw(|frame| draw(frame, state, None, message))
        .map_err(|e| anyhow::anyhow!("Failed to draw: {}", e))?;
    Ok(buffer_text(terminal.backend().buffer()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_gomoku::Game;

    fn render(state: &GameState, cursor: Option<Position>) -> Terminal<TestBackend> {
        let mut terminal = headless_terminal().unwrap();
        terminal
            .draw(|frame| draw(frame, state, cursor, ""))
            .unwrap();
        terminal
    }

    #[test]
    fn test_empty_board_shows_star_points() {
        let text = screen_text(&GameState::default(), "").unwrap();
        assert_eq!(text.matches('+').count(), 5);
        assert!(text.contains("Gomoku - Five in a Row"));
        assert!(text.lines().any(|line| line.trim_start().starts_with("7  .")));
    }

    #[test]
    fn test_stones_replace_star_points() {
        let mut game = Game::new();
        game.play(7, 7).unwrap();
        game.play(0, 0).unwrap();
        let text = screen_text(game.state(), "").unwrap();
        assert_eq!(text.matches('+').count(), 4);
        assert_eq!(text.matches('X').count(), 1);
        assert_eq!(text.matches('O').count(), 1);
        assert!(text.contains("Your turn"));
    }

    #[test]
    fn test_small_board_has_no_star_points() {
        let text = screen_text(Game::with_board_size(5).state(), "").unwrap();
        assert!(!text.contains('+'));
    }

    #[test]
    fn test_cursor_highlights_one_cell() {
        let terminal = render(&GameState::default(), Some(Position::new(2, 5)));
        let highlighted = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .filter(|cell| cell.modifier.contains(Modifier::REVERSED))
            .count();
        assert_eq!(highlighted, 1);

        let terminal = render(&GameState::default(), None);
        assert!(!terminal
            .backend()
            .buffer()
            .content
            .iter()
            .any(|cell| cell.modifier.contains(Modifier::REVERSED)));
    }

    #[test]
    fn test_footer_message_is_shown() {
        let text = screen_text(&GameState::default(), "Move rejected").unwrap();
        assert!(text.contains("Move rejected"));
    }

    #[test]
    fn test_status_lines() {
        let mut game = Game::new();
        assert_eq!(status_line(game.state()), "Black moves first - your turn");
        game.play(7, 7).unwrap();
        assert_eq!(status_line(game.state()), "Computer is thinking...");
        game.play(0, 0).unwrap();
        assert_eq!(status_line(game.state()), "Your turn");
    }
}
