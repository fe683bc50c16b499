//! Raw-mode terminal setup and keyboard forwarding.

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// The interactive terminal.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Switches to raw mode on the alternate screen.
pub fn enter() -> Result<Tui> {
    info!("Entering alternate screen");
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

/// Restores the terminal left by [`enter`].
pub fn leave(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    info!("Left alternate screen");
    Ok(())
}

/// Reads key presses on a blocking thread and sends them to `key_tx`.
///
/// `Ctrl-C` is forwarded as `Esc`. The task ends once the receiver is dropped.
pub fn forward_keys(key_tx: mpsc::UnboundedSender<KeyCode>) -> JoinHandle<Result<()>> {
    tokio::task::spawn_blocking(move || -> Result<()> {
        while !key_tx.is_closed() {
            if !event::poll(Duration::from_millis(100))? {
                continue;
            }
            if let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                let code = match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        KeyCode::Esc
                    }
                    code => code,
                };
                if key_tx.send(code).is_err() {
                    break;
                }
            }
        }
        debug!("Key reader stopped");
        Ok(())
    })
}
