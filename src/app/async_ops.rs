//! Async operations for the TUI
//!
//! Uses channels to communicate between the sync TUI loop and async tasks.

use tokio::sync::mpsc;

use crate::api::{Provider, TranslationProvider};
use crate::error::TranslationError;
use crate::models::TranslationPayload;
use crate::translation::{Ticket, TranslationRequest};

/// Commands sent from the TUI to the async worker
#[derive(Debug, Clone)]
pub enum AsyncCommand {
    /// Ask the provider for a translation
    Translate { request: TranslationRequest },
    /// Shutdown the worker
    Shutdown,
}

/// Results sent back from the async worker to the TUI
#[derive(Debug)]
pub enum AsyncResult {
    /// A provider call finished
    Translated {
        ticket: Ticket,
        outcome: Result<TranslationPayload, TranslationError>,
    },
}

/// Channel handles for communicating with the async worker
pub struct AsyncHandle {
    /// Send commands to the worker
    pub cmd_tx: mpsc::Sender<AsyncCommand>,
    /// Receive results from the worker
    pub result_rx: mpsc::Receiver<AsyncResult>,
}

/// Spawn the async worker and return handles
///
/// Each translation runs in its own task so a slow request never holds up
/// the next one; stale results are sorted out by the resolver.
pub fn spawn_worker(provider: Provider) -> AsyncHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<AsyncCommand>(32);
    let (result_tx, result_rx) = mpsc::channel::<AsyncResult>(32);

    tokio::spawn(async move {
        while let Some(cmd) = cmd_rx.recv().await {
            match cmd {
                AsyncCommand::Shutdown => break,
                AsyncCommand::Translate { request } => {
                    let provider = provider.clone();
                    let result_tx = result_tx.clone();
                    tokio::spawn(async move {
                        handle_translate(&result_tx, &provider, request).await;
                    });
                }
            }
        }
    });

    AsyncHandle { cmd_tx, result_rx }
}

async fn handle_translate(
    result_tx: &mpsc::Sender<AsyncResult>,
    provider: &Provider,
    request: TranslationRequest,
) {
    tracing::debug!("Worker translating {}", request.ticket.key());
    let outcome = provider
        .translate(
            &request.source_text,
            &request.language.code,
            &request.language.name,
        )
        .await;

    let _ = result_tx
        .send(AsyncResult::Translated {
            ticket: request.ticket,
            outcome,
        })
        .await;
}
