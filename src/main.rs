//! Gomoku - terminal host binary.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use gomoku::{
    headless_terminal, screen_text, terminal, AfterGame, GameSession, HostConfig, HumanPlayer,
    Orchestrator, RandomPlayer,
};
use tokio::sync::mpsc;
use tracing::{error, info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = HostConfig::load_or_default(&cli.config).context("Failed to load config")?;

    match cli.command {
        Command::Play { seed, think_ms } => {
            // Log to file so the screen stays clean
            let log_file = std::fs::File::create(config.log_file())
                .with_context(|| format!("Failed to create {}", config.log_file().display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(&config))
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false)
                .init();
            run_play(config, seed, think_ms).await
        }
        Command::Autoplay {
            seed,
            think_ms,
            json,
        } => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(&config))
                .with_writer(std::io::stderr)
                .init();
            run_autoplay(config, seed, think_ms, json).await
        }
    }
}

fn env_filter(config: &HostConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter()))
}

/// Run an interactive game on the terminal
#[instrument(skip(config))]
async fn run_play(config: HostConfig, seed: Option<u64>, think_ms: Option<u64>) -> Result<()> {
    let mut config = config;
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    if let Some(think_ms) = think_ms {
        config = config.with_think_delay_ms(think_ms);
    }

    info!("Starting interactive game");
    let (session, events) = GameSession::new(&config);
    let (key_tx, key_rx) = mpsc::unbounded_channel();

    let tui = terminal::enter()?;
    let keys = terminal::forward_keys(key_tx);
    let player = HumanPlayer::new("You", key_rx);
    let mut orchestrator = Orchestrator::new(session, events, player, tui, AfterGame::Prompt);
    let res = orchestrator.run().await;

    let mut tui = orchestrator.into_terminal();
    terminal::leave(&mut tui)?;
    keys.await.context("Key reader task failed")??;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res.map(|_| ())
}

/// Run a full game with a random human stand-in
#[instrument(skip(config))]
async fn run_autoplay(
    config: HostConfig,
    seed: Option<u64>,
    think_ms: u64,
    json: bool,
) -> Result<()> {
    let seed = seed.or(*config.seed()).unwrap_or_else(rand::random);
    let config = config.with_seed(seed).with_think_delay_ms(think_ms);

    info!(seed, "Starting automated game");
    let (session, events) = GameSession::new(&config);
    let player = RandomPlayer::new("Random", seed);
    let mut orchestrator =
        Orchestrator::new(session, events, player, headless_terminal()?, AfterGame::Stop);
    let state = orchestrator.run().await?;

    println!("{}", screen_text(&state, &format!("seed {}", seed))?);
    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    }
    Ok(())
}
