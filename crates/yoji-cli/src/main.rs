use std::io::stdout;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use yoji_core::{GameConfig, Referee, Session, VOCABULARY};

mod app;
mod args;
mod logging;
mod ui;

use app::{Action, AppState};
use args::Cli;

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    let cli = Cli::parse();
    let code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("fatal: {e:?}");
            2
        }
    };
    std::process::exit(code);
}

async fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_file.as_deref())?;

    let config = cli.apply(GameConfig::load(cli.config.as_deref())?);
    config.validate().context("invalid configuration")?;
    tracing::info!(config = ?config, "starting game");

    let referee = config
        .build_referee()
        .context("failed to set up the judge client")?;
    let session = match config.seed {
        Some(seed) => Session::seeded(VOCABULARY, config.hand_size, seed)?,
        None => Session::new(VOCABULARY, config.hand_size)?,
    };
    let mut state = AppState::new(session, referee.provider_name());

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;

    let result = run_tui(&mut state, &referee).await;

    // Always restore terminal state, even if the event loop errored.
    let _ = disable_raw_mode();
    let _ = stdout().execute(LeaveAlternateScreen);

    result
}

async fn run_tui(state: &mut AppState, referee: &Referee) -> Result<()> {
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    loop {
        terminal.draw(|f| ui::draw(f, state))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match state.handle_key(key)? {
            Action::Quit => break,
            Action::None => {}
            Action::Judge => {
                // One judgement at a time; input waits until the model answers.
                state.pending = Some(state.judging_notice());
                terminal.draw(|f| ui::draw(f, state))?;
                let verdict = referee.judge(&state.session).await;
                state.pending = None;
                state.verdict = Some(verdict);
                // Drop keys pressed while waiting.
                while event::poll(Duration::ZERO)? {
                    let _ = event::read()?;
                }
            }
        }
    }
    Ok(())
}
