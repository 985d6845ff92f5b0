//! TUI Application module

mod async_ops;
mod events;
mod state;
mod ui;

pub use state::AppState;
pub use state::FocusedPanel;
pub use state::Mode;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::io::stdout;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

use crate::api::Provider;
use crate::config::Config;
use crate::demo;
use crate::error::TranslationError;
use crate::models::Scripture;
use crate::report::FileReportSink;
use crate::translation::Completion;

use async_ops::{AsyncCommand, AsyncHandle, AsyncResult, spawn_worker};

/// Run the TUI on a scripture file (or the configured default)
pub fn run(path: Option<&Path>) -> Result<()> {
    let config = Config::load()?;

    let path = path
        .map(Path::to_path_buf)
        .or_else(|| config.scripture_path.clone())
        .context("No scripture file given and none configured (try `shloka demo`)")?;
    let scripture = Scripture::load(&path)
        .with_context(|| format!("Failed to load {}", path.display()))?;

    run_with(config, scripture)
}

/// Run the TUI on the built-in sample hymns
pub fn run_demo() -> Result<()> {
    let config = Config::load()?;
    let scripture = demo::rig_veda()?;
    run_with(config, scripture)
}

fn run_with(config: Config, scripture: Scripture) -> Result<()> {
    // Create tokio runtime
    let rt = Runtime::new()?;

    let provider = Provider::from_config(&config.provider);
    let provider_name = provider.name();
    let sink = FileReportSink::new(config.reports_path()?);

    // Spawn async worker
    let async_handle = rt.block_on(async { spawn_worker(provider) });

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut state = AppState::new(config, Arc::new(scripture), provider_name, Box::new(sink));
    state.set_status(format!(
        "{} | {} verses | Press ? for help",
        state.reader.scripture().title(),
        state.reader.navigator().index().len()
    ));

    // Main loop
    let result = run_app(&mut terminal, &mut state, async_handle);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;

    // Save config on exit
    state.config.save()?;

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut AppState,
    mut async_handle: AsyncHandle,
) -> Result<()> {
    // Resolve the first verse
    if let Some(cmd) = state.request_translation() {
        send_command(state, &async_handle.cmd_tx, cmd);
    }

    loop {
        // Process any async results
        while let Ok(result) = async_handle.result_rx.try_recv() {
            handle_async_result(state, result);
        }

        // Draw UI
        terminal.draw(|frame| ui::render(frame, state))?;

        // Handle events
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
            && let Some(cmd) = events::handle_key(state, key)
        {
            send_command(state, &async_handle.cmd_tx, cmd);
        }

        // Tick for animations
        state.tick();

        if state.should_quit {
            // Shutdown async worker
            let _ = async_handle.cmd_tx.blocking_send(AsyncCommand::Shutdown);
            break;
        }
    }

    Ok(())
}

/// Hand a command to the worker
///
/// A translation that cannot be sent is completed as failed right away, so
/// the pair is no longer tracked as in flight and can be retried.
fn send_command(state: &mut AppState, cmd_tx: &mpsc::Sender<AsyncCommand>, cmd: AsyncCommand) {
    let Err(mpsc::error::SendError(cmd)) = cmd_tx.blocking_send(cmd) else {
        return;
    };
    if let AsyncCommand::Translate { request } = cmd {
        tracing::warn!("Translation worker is gone, dropping request for {}", request.ticket.key());
        handle_async_result(
            state,
            AsyncResult::Translated {
                ticket: request.ticket,
                outcome: Err(TranslationError::Unavailable(
                    "translation worker stopped".to_string(),
                )),
            },
        );
    }
}

fn handle_async_result(state: &mut AppState, result: AsyncResult) {
    match result {
        AsyncResult::Translated { ticket, outcome } => {
            match state.reader.complete_translation(ticket, outcome) {
                Completion::Applied(resolved) => {
                    state.set_status(format!("Translated {}", resolved.key));
                }
                Completion::Failed(e) => {
                    state.set_status(format!("❌ {e}"));
                }
                Completion::Stale => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Language, TranslationPayload};
    use crate::report::LogReportSink;
    use crate::translation::TranslationState;

    fn french_state() -> AppState {
        let config = Config {
            default_language: "fr".to_string(),
            ..Config::default()
        };
        let scripture = Arc::new(demo::rig_veda().unwrap());
        AppState::new(config, scripture, "none", Box::new(LogReportSink))
    }

    fn ticket_of(cmd: Option<AsyncCommand>) -> crate::translation::Ticket {
        match cmd {
            Some(AsyncCommand::Translate { request }) => request.ticket,
            other => panic!("expected a translate command, got {other:?}"),
        }
    }

    #[test]
    fn test_result_for_current_verse_is_shown() {
        let mut state = french_state();
        let ticket = ticket_of(state.request_translation());

        handle_async_result(
            &mut state,
            AsyncResult::Translated {
                ticket,
                outcome: Ok(TranslationPayload::from_purport("Je loue Agni")),
            },
        );
        assert!(matches!(state.reader.translation_state(), TranslationState::Ready(_)));
        assert!(state.status.starts_with("Translated"));
    }

    #[test]
    fn test_late_result_after_navigation_is_dropped() {
        let mut state = french_state();
        let ticket = ticket_of(state.request_translation());
        let _next = state.next_verse();

        handle_async_result(
            &mut state,
            AsyncResult::Translated {
                ticket,
                outcome: Ok(TranslationPayload::from_purport("Je loue Agni")),
            },
        );
        assert!(state.is_translating());
        assert_eq!(state.language, Language::new("fr", "French"));
    }

    #[test]
    fn test_failure_is_shown_and_dismissable() {
        let mut state = french_state();
        let ticket = ticket_of(state.request_translation());

        handle_async_result(
            &mut state,
            AsyncResult::Translated {
                ticket,
                outcome: Err(crate::error::TranslationError::Provider("quota".to_string())),
            },
        );
        assert!(state.status.starts_with("❌"));
        assert!(matches!(state.reader.translation_state(), TranslationState::Failed { .. }));

        let retry = state.retry_translation();
        assert!(matches!(retry, Some(AsyncCommand::Translate { .. })));
    }

    #[test]
    fn test_unsent_request_fails_instead_of_spinning() {
        let mut state = french_state();
        let (cmd_tx, cmd_rx) = mpsc::channel::<AsyncCommand>(1);
        drop(cmd_rx);

        let cmd = state.request_translation().unwrap();
        send_command(&mut state, &cmd_tx, cmd);

        assert!(!state.is_translating());
        assert!(matches!(
            state.reader.translation_state(),
            TranslationState::Failed { .. }
        ));
        assert!(state.status.starts_with("❌"));

        // The pair is no longer in flight, so asking again dispatches
        assert!(matches!(
            state.request_translation(),
            Some(AsyncCommand::Translate { .. })
        ));
    }
}
