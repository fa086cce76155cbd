//! Command executor (imperative shell)
//!
//! Turns the [`Cmd`]s returned by `update` into spawned tasks. A task never
//! touches UI state: it runs one request, races it against the request's
//! cancellation token and sends the result back as a [`Msg`].

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::msg::Msg;
use super::update::Cmd;
use crate::api::PromptApi;
use crate::assembler;
use crate::model::NewNote;

pub struct Effects {
    api: Arc<dyn PromptApi>,
    hydration_limit: usize,
    tx: UnboundedSender<Msg>,
}

impl Effects {
    pub fn new(api: Arc<dyn PromptApi>, hydration_limit: usize, tx: UnboundedSender<Msg>) -> Self {
        Self {
            api,
            hydration_limit,
            tx,
        }
    }

    /// Spawn every request in `cmd`. Returns true when the app should quit.
    pub fn dispatch(&self, cmd: Cmd) -> bool {
        let mut quit = false;
        for leaf in cmd.into_leaves() {
            if leaf.is_quit() {
                quit = true;
                continue;
            }
            let api = Arc::clone(&self.api);
            let tx = self.tx.clone();
            let limit = self.hydration_limit;
            tokio::spawn(async move {
                if let Some(msg) = perform(leaf, api.as_ref(), limit).await {
                    // receiver gone means the UI is shutting down
                    let _ = tx.send(msg);
                }
            });
        }
        quit
    }
}

/// Run one command to completion. `None` when it was cancelled or carries no request.
pub async fn perform(cmd: Cmd, api: &dyn PromptApi, hydration_limit: usize) -> Option<Msg> {
    match cmd {
        Cmd::LoadTree { seq, token } => {
            cancellable(&token, async {
                let result = assembler::load_tree(api, hydration_limit)
                    .await
                    .map_err(|e| e.to_string());
                Msg::TreeLoaded { seq, result }
            })
            .await
        }
        Cmd::FetchDetail { id, seq, token } => {
            cancellable(&token, async {
                let result = assembler::hydrate_prompt(api, &id)
                    .await
                    .map_err(|e| e.to_string());
                Msg::DetailLoaded { id: id.clone(), seq, result }
            })
            .await
        }
        Cmd::LoadNotes {
            prompt_id,
            seq,
            token,
        } => {
            cancellable(&token, async {
                let result = api.fetch_notes(&prompt_id).await.map_err(|e| e.to_string());
                Msg::NotesLoaded {
                    prompt_id: prompt_id.clone(),
                    seq,
                    result,
                }
            })
            .await
        }
        Cmd::CreateNote {
            prompt_id,
            content,
            seq,
            token,
        } => {
            cancellable(&token, async {
                let result = api
                    .add_note(&prompt_id, &NewNote { content })
                    .await
                    .map(|_| ())
                    .map_err(|e| e.to_string());
                Msg::NoteCreated {
                    prompt_id: prompt_id.clone(),
                    seq,
                    result,
                }
            })
            .await
        }
        Cmd::None | Cmd::Batch(_) | Cmd::Quit => None,
    }
}

async fn cancellable<F>(token: &CancellationToken, work: F) -> Option<Msg>
where
    F: Future<Output = Msg>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => {
            debug!("request cancelled");
            None
        }
        msg = work => Some(msg),
    }
}

/// Execute commands inline until the app settles (tests only)
#[cfg(test)]
pub async fn drive(app: &mut super::app::App, cmd: Cmd, api: &dyn PromptApi) {
    use std::collections::VecDeque;

    let mut queue: VecDeque<Cmd> = cmd.into_leaves().into();
    while let Some(leaf) = queue.pop_front() {
        if let Some(msg) = perform(leaf, api, 8).await {
            queue.extend(super::update::update(app, msg).into_leaves());
        }
    }
}
