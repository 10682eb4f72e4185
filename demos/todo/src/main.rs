//! Todo - tui-store binding example
//!
//! A single bound panel over a `Vec<String>` store:
//! - State: the submitted items
//! - Actions: `ADD_ITEM`
//! - Binding: `connect(map_state, map_actions)` with own props from the CLI
//! - Main loop: Event -> Component -> Dispatch -> Notify -> Render
//!
//! Keys: type to edit, Enter = add, Backspace = delete, Esc = quit

use std::io;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tui_store::{history, process_raw_event, spawn_event_poller, PollerConfig, RawEvent};

use todo_demo::action::TodoAction;
use todo_demo::app::App;
use todo_demo::config::Args;
use todo_demo::error::AppError;
use todo_demo::logging;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();
    logging::init_tracing(args.log_file.as_deref())?;

    let mut app = App::new(args.own_props());
    if let Some(path) = &args.replay {
        let log = history::load::<TodoAction>(path)?;
        app.replay(log);
    }

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;

    let actions = app.shutdown();
    if let Some(path) = &args.record {
        history::save(path, &actions)?;
        info!(count = actions.len(), path = %path.display(), "Recorded actions");
    }
    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
    let cancel_token = CancellationToken::new();
    let _handle = spawn_event_poller(event_tx, PollerConfig::default(), cancel_token.clone());

    loop {
        if app.needs_render() {
            terminal.draw(|frame| app.render(frame))?;
        }

        match event_rx.recv().await {
            Some(raw_event) => app.handle_event(&process_raw_event(raw_event)),
            None => break,
        }

        if app.should_quit() {
            break;
        }
    }

    cancel_token.cancel();
    Ok(())
}
