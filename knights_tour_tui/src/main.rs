//! Terminal UI for the knight's tour duel.

#![warn(missing_docs)]

mod app;
mod orchestrator;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::App;
use orchestrator::{Command, GameEvent, Orchestrator};

/// Command-line options.
#[derive(Debug, Parser)]
#[command(about = "Play the knight's tour duel against the computer")]
struct Args {
    /// Let the computer make the opening move.
    #[arg(long)]
    npc_first: bool,

    /// How long the computer "thinks" before replying, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    npc_delay_ms: u64,

    /// Seed the game for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    info!(?args, "Starting knights tour TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels for communication
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();

    // Create orchestrator
    let mut orchestrator = Orchestrator::new(
        args.seed,
        args.npc_first,
        Duration::from_millis(args.npc_delay_ms),
        cmd_rx,
        event_tx,
    );

    // Spawn orchestrator in background
    let orchestrator_handle = tokio::spawn(async move {
        if let Err(e) = orchestrator.run().await {
            tracing::error!(error = %e, "Orchestrator error");
        }
    });

    let app = App::new(args.npc_first);
    let res = run_app(&mut terminal, app, cmd_tx, &mut event_rx).await;

    // Clean up orchestrator
    orchestrator_handle.abort();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    cmd_tx: mpsc::UnboundedSender<Command>,
    event_rx: &mut mpsc::UnboundedReceiver<GameEvent>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        // Drain events from the orchestrator
        while let Ok(event) = event_rx.try_recv() {
            app.handle_event(event);
        }

        // Check for keyboard input
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    code => {
                        if let Some(cmd) = app.handle_key(code) {
                            let _ = cmd_tx.send(cmd);
                        }
                    }
                }
            }
        }
    }
}
