//! Terminal User Interface for Prompt Explorer
//!
//! A full-screen browser for a prompt tree served by the prompt API.
//! Features:
//! - Collapsible tree of prompts and their nodes
//! - Side panel with prompt details and notes
//! - Note submission with automatic refresh of the selection
//! - Mouse support for toggling and opening prompts

pub mod app;
pub mod effects; // Runs commands as cancellable tasks (imperative shell)
pub mod msg; // TEA message types (what happened)
pub mod notes;
pub mod request;
pub mod selection;
pub mod state; // Pure state transformations (functional core)
pub mod tree_view;
pub mod ui;
pub mod update; // TEA update function (state transitions)
pub mod views;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::StreamExt;
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tracing::info;

use crate::api::{HttpApi, PromptApi};
use crate::config::Config;
use app::App;
use effects::Effects;
use msg::Msg;

const TICK_RATE: Duration = Duration::from_millis(250);

/// Run the TUI application
pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let api = HttpApi::new(&config.api)?;
    info!(base_url = api.base_url(), "starting prompt explorer");
    let api: Arc<dyn PromptApi> = Arc::new(api);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app, ensuring cleanup happens even on error
    let result = run_app_inner(&mut terminal, api, config.hydration_limit()).await;

    // Restore terminal - this MUST run even if app fails
    let _ = disable_raw_mode();
    let _ = execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    );
    let _ = terminal.show_cursor();

    result
}

async fn run_app_inner<B: Backend>(
    terminal: &mut Terminal<B>,
    api: Arc<dyn PromptApi>,
    hydration_limit: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let effects = Effects::new(api, hydration_limit, tx);

    let (mut app, init) = App::new();
    let size = terminal.size()?;
    app.viewport_width = size.width;
    app.viewport_height = size.height;
    effects.dispatch(init);

    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(TICK_RATE);

    loop {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        let msg = tokio::select! {
            _ = ticker.tick() => Msg::Tick,
            Some(msg) = rx.recv() => msg,
            event = events.next() => match event {
                Some(Ok(event)) => app.event_to_msg(event),
                Some(Err(e)) => return Err(e.into()),
                None => Msg::Quit,
            },
        };

        let cmd = update::update(&mut app, msg);
        if effects.dispatch(cmd) {
            info!("quitting");
            break;
        }
    }

    Ok(())
}
