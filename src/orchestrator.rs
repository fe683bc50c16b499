//! Game loop between the human side and the computer.

use crate::players::{Action, Player};
use crate::render::draw;
use crate::session::{GameEvent, GameSession};
use anyhow::{Context, Result};
use ratatui::{backend::Backend, Terminal};
use strictly_gomoku::{GameState, Player as Side, Position};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

const HELP: &str = "Arrows move, Enter places a stone, r restarts, q quits";
const GAME_OVER_HINT: &str = "Press r to play again or q to quit";

/// How a finished game should be followed up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterGame {
    /// Return as soon as the game ends.
    Stop,
    /// Keep asking the player, who may reset or quit.
    Prompt,
}

/// Drives a session from a player's actions and draws each snapshot.
pub struct Orchestrator<P, B: Backend> {
    session: GameSession,
    events: mpsc::UnboundedReceiver<GameEvent>,
    player: P,
    terminal: Terminal<B>,
    after_game: AfterGame,
    cursor: Option<Position>,
    message: String,
}

impl<P, B> Orchestrator<P, B>
where
    P: Player,
    B: Backend,
{
    /// Creates a new orchestrator.
    pub fn new(
        session: GameSession,
        events: mpsc::UnboundedReceiver<GameEvent>,
        player: P,
        terminal: Terminal<B>,
        after_game: AfterGame,
    ) -> Self {
        let cursor = player.cursor();
        Self {
            session,
            events,
            player,
            terminal,
            after_game,
            cursor,
            message: HELP.to_string(),
        }
    }

    /// Returns the terminal being drawn to.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Consumes the orchestrator, handing back its terminal.
    ///
    /// The player is dropped, which closes its input.
    pub fn into_terminal(self) -> Terminal<B> {
        self.terminal
    }

    fn show(&mut self, state: &GameState) -> Result<()> {
        let cursor = self.cursor;
        let message = &self.message;
        self.terminal
            .draw(|frame| draw(frame, state, cursor, message))
            .map_err(|e| anyhow::anyhow!("Failed to draw: {}", e))?;
        Ok(())
    }

    /// Folds pending session events into the footer message.
    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            debug!(?event, "Session event");
            match event {
                GameEvent::MoveMade(mv) if mv.player == Side::Computer => {
                    self.message = format!("Computer played {}", mv.position);
                }
                GameEvent::ComputerFailed(e) => {
                    self.message = format!("Computer could not move: {}", e);
                }
                _ => {}
            }
        }
    }

    /// Waits for the scheduled computer turn and returns the new state.
    async fn finish_computer_turn(
        &mut self,
        pending: JoinHandle<Option<Position>>,
    ) -> Result<GameState> {
        let reply = pending.await.context("Computer turn task failed")?;
        self.drain_events();
        let state = self.session.snapshot().await;
        if reply.is_none() && !state.status().is_terminal() && state.to_move() == Side::Computer {
            anyhow::bail!("{}", self.message);
        }
        Ok(state)
    }

    /// Runs the game loop and returns the last state seen.
    #[instrument(skip(self), fields(player = %self.player.name()))]
    pub async fn run(&mut self) -> Result<GameState> {
        info!("Starting game orchestration");
        let mut state = self.session.snapshot().await;
        self.show(&state)?;

        loop {
            if state.status().is_terminal() && self.after_game == AfterGame::Stop {
                info!(status = ?state.status(), "Game finished");
                return Ok(state);
            }

            match self.player.next_action(&state).await? {
                Action::Place(pos) => match self.session.submit_move(pos).await {
                    Ok((next, pending)) => {
                        self.message.clear();
                        state = next;
                        self.show(&state)?;
                        if let Some(pending) = pending {
                            state = self.finish_computer_turn(pending).await?;
                        }
                        if state.status().is_terminal() {
                            self.message = GAME_OVER_HINT.to_string();
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "Move rejected");
                        self.message = format!("Move rejected: {}", e);
                    }
                },
                Action::MoveCursor(pos) => self.cursor = Some(pos),
                Action::Reset => {
                    state = self.session.reset().await;
                    self.drain_events();
                    self.message = HELP.to_string();
                }
                Action::Help => self.message = HELP.to_string(),
                Action::Quit => {
                    info!("Player quit");
                    return Ok(state);
                }
            }
            self.show(&state)?;
        }
    }
}
