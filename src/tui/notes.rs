//! Notes panel
//!
//! Lives only while the Notes tab of the side panel is showing. On mount it
//! loads the prompt's notes (`Loading -> Ready`); a load error is logged and
//! ends in `Ready` with whatever list was already there. Submitting posts
//! the input, and on success clears it, reloads the whole list and asks the
//! caller to re-hydrate the selection. On failure the input is left as typed.

use tracing::{debug, warn};

use super::request::RequestSlot;
use super::state;
use super::update::Cmd;
use crate::model::{Id, NoteRecord};

pub const SUBMIT_FAILED_ALERT: &str = "Failed to add note. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotesStatus {
    Loading,
    Ready,
}

/// Result of a finished submission
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Result belonged to a cancelled or superseded submission
    Stale,
    /// Note saved. Run `reload`, then emit the re-hydration signal.
    Created { reload: Cmd },
    /// Save failed; input kept for retry
    Failed,
}

#[derive(Debug)]
pub struct NotesPanel {
    prompt_id: Id,
    pub status: NotesStatus,
    pub notes: Vec<NoteRecord>,
    pub input: String,
    load: RequestSlot,
    submit: RequestSlot,
}

impl NotesPanel {
    /// Mount for `prompt_id` and start the initial load
    pub fn mount(prompt_id: Id) -> (Self, Cmd) {
        let mut panel = Self {
            prompt_id,
            status: NotesStatus::Loading,
            notes: Vec::new(),
            input: String::new(),
            load: RequestSlot::new(),
            submit: RequestSlot::new(),
        };
        let cmd = panel.load();
        (panel, cmd)
    }

    pub fn prompt_id(&self) -> &Id {
        &self.prompt_id
    }

    pub fn is_submitting(&self) -> bool {
        self.submit.is_pending()
    }

    /// Whether the submit control is enabled
    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && !state::is_blank(&self.input)
    }

    /// (Re)fetch the full note list
    pub fn load(&mut self) -> Cmd {
        let (seq, token) = self.load.start();
        self.status = NotesStatus::Loading;
        Cmd::LoadNotes {
            prompt_id: self.prompt_id.clone(),
            seq,
            token,
        }
    }

    pub fn apply_notes(&mut self, seq: u64, result: Result<Vec<NoteRecord>, String>) {
        if !self.load.finish(seq) {
            debug!(prompt_id = %self.prompt_id, seq, "dropping stale notes");
            return;
        }
        self.status = NotesStatus::Ready;
        match result {
            Ok(notes) => self.notes = notes,
            // a mounted panel starts empty; a failed reload keeps what is shown
            Err(e) => warn!(prompt_id = %self.prompt_id, error = %e, "failed to load notes"),
        }
    }

    pub fn push_char(&mut self, c: char) {
        if !self.is_submitting() {
            self.input.push(c);
        }
    }

    pub fn newline(&mut self) {
        self.push_char('\n');
    }

    pub fn backspace(&mut self) {
        if !self.is_submitting() {
            state::backspace(&mut self.input);
        }
    }

    /// Submit the input. Blank input and double submits produce no command.
    pub fn submit(&mut self) -> Cmd {
        if !self.can_submit() {
            return Cmd::None;
        }
        let (seq, token) = self.submit.start();
        Cmd::CreateNote {
            prompt_id: self.prompt_id.clone(),
            content: self.input.clone(),
            seq,
            token,
        }
    }

    pub fn apply_created(&mut self, seq: u64, result: Result<(), String>) -> SubmitOutcome {
        if !self.submit.finish(seq) {
            return SubmitOutcome::Stale;
        }
        match result {
            Ok(()) => {
                self.input.clear();
                SubmitOutcome::Created { reload: self.load() }
            }
            Err(e) => {
                warn!(prompt_id = %self.prompt_id, error = %e, "failed to add note");
                SubmitOutcome::Failed
            }
        }
    }
}
