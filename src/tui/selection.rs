//! Selection/detail controller
//!
//! Owns the currently selected prompt. `select` fetches a prompt's metadata
//! and nodes and replaces the selection when both arrive; a failed fetch
//! leaves the previous selection in place. `reload` is the payload-less
//! re-hydration signal: it re-fetches whatever is selected, or does nothing.

use tracing::{debug, warn};

use super::request::RequestSlot;
use super::update::Cmd;
use crate::model::{Id, PromptRecord};

/// What applying a detail result did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailOutcome {
    /// Result belonged to a superseded or cancelled request
    Stale,
    /// Fetch failed; selection unchanged
    Failed,
    /// Selection replaced. `switched` is true when it now points at a
    /// different prompt than before.
    Selected { switched: bool },
}

#[derive(Debug, Default)]
pub struct SelectionController {
    current: Option<PromptRecord>,
    pending: Option<Id>,
    request: RequestSlot,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&PromptRecord> {
        self.current.as_ref()
    }

    pub fn selected_id(&self) -> Option<&Id> {
        self.current.as_ref().map(|p| &p.id)
    }

    /// Identifier of an in-flight fetch, if any
    pub fn pending_id(&self) -> Option<&Id> {
        self.pending.as_ref()
    }

    /// Whether the detail panel should be shown
    pub fn is_open(&self) -> bool {
        self.current.is_some() || self.pending.is_some()
    }

    /// Start fetching `id`; the latest call wins
    pub fn select(&mut self, id: Id) -> Cmd {
        let (seq, token) = self.request.start();
        debug!(prompt_id = %id, seq, "fetching prompt detail");
        self.pending = Some(id.clone());
        Cmd::FetchDetail { id, seq, token }
    }

    /// Re-fetch the current selection. No-op when nothing is selected, or
    /// when a fetch for another prompt is in flight: that activation is
    /// newer and must not be cancelled.
    pub fn reload(&mut self) -> Cmd {
        let id = match self.selected_id() {
            Some(id) => id.clone(),
            None => return Cmd::None,
        };
        if self.pending.as_ref().is_some_and(|pending| *pending != id) {
            debug!(prompt_id = %id, "selection change in flight, skipping reload");
            return Cmd::None;
        }
        self.select(id)
    }

    /// Deselect and cancel any in-flight fetch
    pub fn close(&mut self) {
        self.request.cancel();
        self.pending = None;
        self.current = None;
    }

    pub fn apply(&mut self, id: Id, seq: u64, result: Result<PromptRecord, String>) -> DetailOutcome {
        if !self.request.finish(seq) {
            debug!(prompt_id = %id, seq, "dropping stale prompt detail");
            return DetailOutcome::Stale;
        }
        self.pending = None;

        match result {
            Ok(record) => {
                let switched = self.selected_id() != Some(&record.id);
                self.current = Some(record);
                DetailOutcome::Selected { switched }
            }
            Err(e) => {
                warn!(prompt_id = %id, error = %e, "failed to load prompt details");
                DetailOutcome::Failed
            }
        }
    }
}
