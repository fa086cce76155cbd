//! TEA Update Function
//!
//! ```text
//! update : Msg -> Model -> (Model, Cmd)
//! ```
//!
//! All UI state lives in [`App`] and changes only here, one message at a
//! time. Anything that touches the network comes back out as a [`Cmd`] for
//! the runtime to execute; its result re-enters as another `Msg`.

use tokio_util::sync::CancellationToken;

use super::app::{App, Focus, PanelTab, TreeOutcome};
use super::msg::Msg;
use super::notes::{NotesPanel, SubmitOutcome, SUBMIT_FAILED_ALERT};
use super::selection::DetailOutcome;
use super::state;
use super::views::detail;
use crate::model::Id;

/// Commands that need to be executed by the runtime (imperative shell)
///
/// Every network command carries the sequence number and cancellation token
/// of the component request that issued it.
#[derive(Debug, Clone)]
pub enum Cmd {
    /// No command
    None,
    /// Multiple commands to execute
    Batch(Vec<Cmd>),
    /// Quit the application
    Quit,
    /// Fetch the summary and hydrate every prompt
    LoadTree { seq: u64, token: CancellationToken },
    /// Fetch metadata + nodes for one prompt
    FetchDetail {
        id: Id,
        seq: u64,
        token: CancellationToken,
    },
    /// Fetch a prompt's notes
    LoadNotes {
        prompt_id: Id,
        seq: u64,
        token: CancellationToken,
    },
    /// Append a note to a prompt
    CreateNote {
        prompt_id: Id,
        content: String,
        seq: u64,
        token: CancellationToken,
    },
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Cmd {
        // Filter out None commands
        let mut cmds: Vec<Cmd> = cmds
            .into_iter()
            .filter(|c| !matches!(c, Cmd::None))
            .collect();
        match cmds.len() {
            0 => Cmd::None,
            1 => cmds.pop().unwrap_or(Cmd::None),
            _ => Cmd::Batch(cmds),
        }
    }

    /// Check if this is (or contains) a quit command
    pub fn is_quit(&self) -> bool {
        match self {
            Cmd::Quit => true,
            Cmd::Batch(cmds) => cmds.iter().any(Cmd::is_quit),
            _ => false,
        }
    }

    /// Flatten nested batches into single commands, dropping `None`
    pub fn into_leaves(self) -> Vec<Cmd> {
        match self {
            Cmd::None => vec![],
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::into_leaves).collect(),
            other => vec![other],
        }
    }
}

/// The core update function - applies one message and returns the follow-up command
pub fn update(app: &mut App, msg: Msg) -> Cmd {
    match msg {
        // === Lifecycle ===
        Msg::Quit => Cmd::Quit,

        Msg::Tick => {
            app.expire_status();
            Cmd::None
        }

        Msg::Resize(w, h) => {
            app.viewport_width = w;
            app.viewport_height = h;
            clamp_cursor(app);
            Cmd::None
        }

        Msg::Noop => Cmd::None,

        // === Navigation ===
        Msg::MoveUp => {
            let visible = app.tree_visible_rows();
            app.tree_view.move_up(visible);
            Cmd::None
        }

        Msg::MoveDown => {
            let (rows, visible) = (app.row_count(), app.tree_visible_rows());
            app.tree_view.move_down(rows, visible);
            Cmd::None
        }

        Msg::PageUp => {
            let visible = app.tree_visible_rows();
            app.tree_view.page_up(visible);
            Cmd::None
        }

        Msg::PageDown => {
            let (rows, visible) = (app.row_count(), app.tree_visible_rows());
            app.tree_view.page_down(rows, visible);
            Cmd::None
        }

        Msg::JumpToTop => {
            app.tree_view.jump_to_top();
            Cmd::None
        }

        Msg::JumpToBottom => {
            let (rows, visible) = (app.row_count(), app.tree_visible_rows());
            app.tree_view.jump_to_bottom(rows, visible);
            Cmd::None
        }

        // === Tree rows ===
        Msg::ActivateCursor => {
            let index = app.tree_view.cursor;
            activate_row(app, index)
        }

        Msg::ActivateRow(index) => {
            app.tree_view.cursor = index;
            activate_row(app, index)
        }

        Msg::ToggleCursor => {
            let index = app.tree_view.cursor;
            toggle_row(app, index);
            Cmd::None
        }

        Msg::ToggleRow(index) => {
            app.tree_view.cursor = index;
            toggle_row(app, index);
            Cmd::None
        }

        Msg::CollapseCursor => {
            set_cursor_expansion(app, false);
            Cmd::None
        }

        Msg::ExpandCursor => {
            set_cursor_expansion(app, true);
            Cmd::None
        }

        // === Side panel ===
        Msg::ClosePanel => {
            close_panel(app);
            Cmd::None
        }

        Msg::NextTab => {
            let tab = app.panel_tab.next();
            switch_tab(app, tab)
        }

        Msg::PanelScrollUp => {
            scroll_panel(app, -1);
            Cmd::None
        }

        Msg::PanelScrollDown => {
            scroll_panel(app, 1);
            Cmd::None
        }

        // === Note input ===
        Msg::FocusNoteInput => {
            if app.selection.selected().is_none() {
                return Cmd::None;
            }
            let cmd = switch_tab(app, PanelTab::Notes);
            app.focus = Focus::NoteInput;
            cmd
        }

        Msg::LeaveNoteInput => {
            app.focus = Focus::Tree;
            Cmd::None
        }

        Msg::NoteInput(c) => {
            if let Some(notes) = app.notes.as_mut() {
                notes.push_char(c);
            }
            Cmd::None
        }

        Msg::NoteNewline => {
            if let Some(notes) = app.notes.as_mut() {
                notes.newline();
            }
            Cmd::None
        }

        Msg::NoteBackspace => {
            if let Some(notes) = app.notes.as_mut() {
                notes.backspace();
            }
            Cmd::None
        }

        Msg::SubmitNote => {
            let Some(notes) = app.notes.as_mut() else {
                return Cmd::None;
            };
            if state::is_blank(&notes.input) {
                app.set_status("Note is empty");
                return Cmd::None;
            }
            notes.submit()
        }

        // === Modals ===
        Msg::DismissAlert => {
            app.alert = None;
            Cmd::None
        }

        Msg::ToggleHelp => {
            app.show_help = !app.show_help;
            Cmd::None
        }

        // === Tree loading ===
        Msg::RetryLoad => {
            if app.tree.is_failed() {
                app.tree.start_load()
            } else {
                Cmd::None
            }
        }

        Msg::ReloadTree => {
            app.set_status("Reloading tree...");
            app.tree.start_load()
        }

        // === Network results ===
        Msg::TreeLoaded { seq, result } => {
            match app.tree.apply(seq, result) {
                TreeOutcome::Loaded => {
                    app.status_message = None;
                    clamp_cursor(app);
                }
                TreeOutcome::ReloadFailed(e) => app.set_status(format!("Reload failed: {}", e)),
                TreeOutcome::Failed | TreeOutcome::Stale => {}
            }
            Cmd::None
        }

        Msg::DetailLoaded { id, seq, result } => match app.selection.apply(id, seq, result) {
            DetailOutcome::Selected { switched: true } => {
                app.panel_scroll = 0;
                if app.panel_tab == PanelTab::Notes {
                    remount_notes(app)
                } else {
                    Cmd::None
                }
            }
            _ => Cmd::None,
        },

        Msg::NotesLoaded {
            prompt_id,
            seq,
            result,
        } => {
            if let Some(notes) = app.notes.as_mut().filter(|n| *n.prompt_id() == prompt_id) {
                notes.apply_notes(seq, result);
            }
            Cmd::None
        }

        Msg::NoteCreated {
            prompt_id,
            seq,
            result,
        } => {
            let Some(notes) = app.notes.as_mut().filter(|n| *n.prompt_id() == prompt_id) else {
                return Cmd::None;
            };
            match notes.apply_created(seq, result) {
                SubmitOutcome::Created { reload } => {
                    app.set_status("Note added");
                    Cmd::batch(vec![reload, app.selection.reload()])
                }
                SubmitOutcome::Failed => {
                    app.alert = Some(SUBMIT_FAILED_ALERT.to_string());
                    Cmd::None
                }
                SubmitOutcome::Stale => Cmd::None,
            }
        }
    }
}

/// Report the prompt on `index` to the selection controller
fn activate_row(app: &mut App, index: usize) -> Cmd {
    let Some(id) = app
        .tree_view
        .prompt_at(app.tree.prompts(), index)
        .map(|p| p.id.clone())
    else {
        return Cmd::None;
    };
    app.selection.select(id)
}

/// Flip expansion of the prompt on `index`. Local only.
fn toggle_row(app: &mut App, index: usize) {
    let Some(id) = app
        .tree_view
        .prompt_at(app.tree.prompts(), index)
        .filter(|p| p.has_nodes())
        .map(|p| p.id.clone())
    else {
        return;
    };
    app.tree_view.toggle(&id);
    clamp_cursor(app);
}

/// Collapse or expand the prompt owning the cursor row
fn set_cursor_expansion(app: &mut App, expanded: bool) {
    let prompts = app.tree.prompts();
    let Some(id) = app
        .tree_view
        .owner_at(prompts, app.tree_view.cursor)
        .map(|p| p.id.clone())
    else {
        return;
    };
    app.tree_view.set_expanded(&id, expanded);
    if !expanded {
        // cursor may have been on a child row that no longer exists
        if let Some(row) = app.tree_view.prompt_row_index(app.tree.prompts(), &id) {
            app.tree_view.cursor = row;
        }
    }
    clamp_cursor(app);
}

fn clamp_cursor(app: &mut App) {
    let (rows, visible) = (app.row_count(), app.tree_visible_rows());
    app.tree_view.clamp(rows, visible);
}

fn close_panel(app: &mut App) {
    app.selection.close();
    app.notes = None;
    app.panel_tab = PanelTab::Details;
    app.panel_scroll = 0;
    app.focus = Focus::Tree;
}

/// Show `tab`; the notes panel lives exactly as long as the Notes tab does
fn switch_tab(app: &mut App, tab: PanelTab) -> Cmd {
    if !app.panel_open() || app.panel_tab == tab {
        return Cmd::None;
    }
    app.panel_tab = tab;
    app.panel_scroll = 0;
    match tab {
        PanelTab::Notes => remount_notes(app),
        PanelTab::Details => {
            app.notes = None;
            app.focus = Focus::Tree;
            Cmd::None
        }
    }
}

/// Mount a fresh notes panel for the current selection
fn remount_notes(app: &mut App) -> Cmd {
    let Some(id) = app.selection.selected_id().cloned() else {
        app.notes = None;
        return Cmd::None;
    };
    if app.notes.as_ref().is_some_and(|n| *n.prompt_id() == id) {
        return Cmd::None;
    }
    let (panel, cmd) = NotesPanel::mount(id);
    app.notes = Some(panel);
    cmd
}

fn scroll_panel(app: &mut App, delta: isize) {
    let total = detail::content_lines(app);
    let visible = app.panel_visible_lines();
    app.panel_scroll = state::scroll_panel(app.panel_scroll, delta, total, visible);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{Call, FakeApi};
    use crate::model::{LoadedTree, NodeRecord, PromptRecord, TreeSummary};
    use crate::tui::effects::drive;
    use crate::tui::notes::NotesStatus;

    fn record(id: i64, nodes: usize) -> PromptRecord {
        PromptRecord {
            id: Id::from(id),
            title: format!("P{}", id),
            description: format!("about {}", id),
            parent_prompt_id: None,
            project_id: None,
            nodes: (0..nodes)
                .map(|n| NodeRecord {
                    id: Id::from(id * 100 + n as i64),
                    name: format!("n{}", n),
                    action: None,
                })
                .collect(),
        }
    }

    /// App with a ready tree of the given prompts
    fn ready_app(prompts: Vec<PromptRecord>) -> App {
        let (mut app, cmd) = App::new();
        let Cmd::LoadTree { seq, .. } = cmd else {
            panic!("expected LoadTree");
        };
        let tree = LoadedTree {
            summary: TreeSummary {
                project: "Demo".to_string(),
                prompt_ids: prompts.iter().map(|p| p.id.clone()).collect(),
                ..Default::default()
            },
            prompts,
        };
        update(&mut app, Msg::TreeLoaded { seq, result: Ok(tree) });
        app
    }

    /// Select `id` and feed back a successful detail result
    fn select(app: &mut App, id: i64) {
        let index = app
            .tree_view
            .prompt_row_index(app.tree.prompts(), &Id::from(id))
            .expect("prompt row");
        let cmd = update(app, Msg::ActivateRow(index));
        let Cmd::FetchDetail { id, seq, .. } = cmd else {
            panic!("expected FetchDetail, got {:?}", cmd);
        };
        let record = app
            .tree
            .prompts()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .expect("record");
        update(app, Msg::DetailLoaded { id, seq, result: Ok(record) });
    }

    // === Navigation Tests ===

    #[test]
    fn test_move_down() {
        let mut app = ready_app(vec![record(1, 1), record(2, 0)]);
        update(&mut app, Msg::MoveDown);
        assert_eq!(app.tree_view.cursor, 1);
        update(&mut app, Msg::MoveDown);
        update(&mut app, Msg::MoveDown);
        assert_eq!(app.tree_view.cursor, 2);
    }

    #[test]
    fn test_jump_to_bottom() {
        let mut app = ready_app(vec![record(1, 2), record(2, 0)]);
        update(&mut app, Msg::JumpToBottom);
        assert_eq!(app.tree_view.cursor, 3);
        update(&mut app, Msg::JumpToTop);
        assert_eq!(app.tree_view.cursor, 0);
    }

    #[test]
    fn test_empty_tree_navigation() {
        let mut app = ready_app(vec![]);
        assert_eq!(app.row_count(), 0);
        update(&mut app, Msg::MoveDown);
        assert_eq!(app.tree_view.cursor, 0);
        assert!(matches!(update(&mut app, Msg::ActivateCursor), Cmd::None));
    }

    // === Expansion Tests ===

    #[test]
    fn test_toggle_issues_no_command_and_keeps_selection() {
        let mut app = ready_app(vec![record(1, 2), record(2, 1)]);
        select(&mut app, 2);
        assert_eq!(app.selection.selected_id(), Some(&Id::from(2)));

        let cmd = update(&mut app, Msg::ToggleRow(0));
        assert!(matches!(cmd, Cmd::None));
        assert!(!app.tree_view.is_expanded(&Id::from(1)));
        assert_eq!(app.selection.selected_id(), Some(&Id::from(2)));

        assert!(matches!(update(&mut app, Msg::ToggleCursor), Cmd::None));
        assert!(app.tree_view.is_expanded(&Id::from(1)));
        assert_eq!(app.selection.selected_id(), Some(&Id::from(2)));
    }

    #[test]
    fn test_collapse_from_child_row_moves_cursor_to_prompt() {
        let mut app = ready_app(vec![record(1, 2), record(2, 0)]);
        update(&mut app, Msg::MoveDown);
        update(&mut app, Msg::MoveDown);
        assert_eq!(app.tree_view.cursor, 2);
        update(&mut app, Msg::CollapseCursor);
        assert_eq!(app.tree_view.cursor, 0);
        assert_eq!(app.row_count(), 2);
        update(&mut app, Msg::ExpandCursor);
        assert_eq!(app.row_count(), 4);
    }

    #[test]
    fn test_activate_node_row_does_nothing() {
        let mut app = ready_app(vec![record(1, 1)]);
        assert!(matches!(update(&mut app, Msg::ActivateRow(1)), Cmd::None));
        assert!(!app.panel_open());
    }

    // === Selection Tests ===

    #[test]
    fn test_activate_opens_panel_with_pending_fetch() {
        let mut app = ready_app(vec![record(1, 0)]);
        let cmd = update(&mut app, Msg::ActivateCursor);
        assert!(matches!(cmd, Cmd::FetchDetail { ref id, .. } if *id == Id::from(1)));
        assert!(app.panel_open());
        assert!(app.selection.selected().is_none());
    }

    #[test]
    fn test_stale_detail_never_overwrites() {
        let mut app = ready_app(vec![record(1, 0), record(2, 0)]);
        let first = update(&mut app, Msg::ActivateRow(0));
        let second = update(&mut app, Msg::ActivateRow(1));
        let (Cmd::FetchDetail { seq: s1, .. }, Cmd::FetchDetail { seq: s2, .. }) = (first, second) else {
            panic!("expected two fetches");
        };

        update(&mut app, Msg::DetailLoaded { id: Id::from(2), seq: s2, result: Ok(record(2, 0)) });
        update(&mut app, Msg::DetailLoaded { id: Id::from(1), seq: s1, result: Ok(record(1, 0)) });
        assert_eq!(app.selection.selected_id(), Some(&Id::from(2)));
    }

    #[test]
    fn test_close_panel_resets() {
        let mut app = ready_app(vec![record(1, 0)]);
        select(&mut app, 1);
        update(&mut app, Msg::FocusNoteInput);
        assert!(app.notes.is_some());

        update(&mut app, Msg::ClosePanel);
        assert!(!app.panel_open());
        assert!(app.notes.is_none());
        assert_eq!(app.panel_tab, PanelTab::Details);
        assert_eq!(app.focus, Focus::Tree);
    }

    // === Tab Tests ===

    #[test]
    fn test_notes_mount_only_on_notes_tab() {
        let mut app = ready_app(vec![record(1, 0)]);
        select(&mut app, 1);
        assert!(app.notes.is_none());

        let cmd = update(&mut app, Msg::NextTab);
        assert!(matches!(cmd, Cmd::LoadNotes { ref prompt_id, .. } if *prompt_id == Id::from(1)));
        assert_eq!(app.panel_tab, PanelTab::Notes);
        assert!(app.notes.is_some());

        let cmd = update(&mut app, Msg::NextTab);
        assert!(matches!(cmd, Cmd::None));
        assert!(app.notes.is_none());
    }

    #[test]
    fn test_switching_selection_remounts_notes() {
        let mut app = ready_app(vec![record(1, 0), record(2, 0)]);
        select(&mut app, 1);
        update(&mut app, Msg::NextTab);

        let cmd = update(&mut app, Msg::ActivateRow(1));
        let Cmd::FetchDetail { seq, .. } = cmd else {
            panic!("expected FetchDetail");
        };
        let cmd = update(&mut app, Msg::DetailLoaded { id: Id::from(2), seq, result: Ok(record(2, 0)) });
        assert!(matches!(cmd, Cmd::LoadNotes { ref prompt_id, .. } if *prompt_id == Id::from(2)));
        assert_eq!(app.notes.as_ref().map(|n| n.prompt_id().clone()), Some(Id::from(2)));
    }

    // === Note Tests ===

    fn notes_ready(app: &mut App) {
        let cmd = update(app, Msg::FocusNoteInput);
        let Cmd::LoadNotes { prompt_id, seq, .. } = cmd else {
            panic!("expected LoadNotes, got {:?}", cmd);
        };
        update(app, Msg::NotesLoaded { prompt_id, seq, result: Ok(vec![]) });
    }

    #[test]
    fn test_blank_note_issues_no_command() {
        let mut app = ready_app(vec![record(1, 0)]);
        select(&mut app, 1);
        notes_ready(&mut app);

        assert!(matches!(update(&mut app, Msg::SubmitNote), Cmd::None));
        update(&mut app, Msg::NoteInput(' '));
        update(&mut app, Msg::NoteNewline);
        assert!(matches!(update(&mut app, Msg::SubmitNote), Cmd::None));
        assert_eq!(app.status(), Some("Note is empty"));
    }

    #[test]
    fn test_failed_note_keeps_text_and_alerts() {
        let mut app = ready_app(vec![record(1, 0)]);
        select(&mut app, 1);
        notes_ready(&mut app);
        for c in "draft".chars() {
            update(&mut app, Msg::NoteInput(c));
        }

        let Cmd::CreateNote { prompt_id, seq, .. } = update(&mut app, Msg::SubmitNote) else {
            panic!("expected CreateNote");
        };
        let cmd = update(
            &mut app,
            Msg::NoteCreated { prompt_id, seq, result: Err("boom".to_string()) },
        );
        assert!(matches!(cmd, Cmd::None));
        assert_eq!(app.alert.as_deref(), Some(SUBMIT_FAILED_ALERT));
        assert_eq!(app.notes.as_ref().map(|n| n.input.as_str()), Some("draft"));
        assert!(app.key_context().alert_open);

        update(&mut app, Msg::DismissAlert);
        assert!(app.alert.is_none());
    }

    #[test]
    fn test_created_note_reloads_notes_and_detail() {
        let mut app = ready_app(vec![record(1, 0)]);
        select(&mut app, 1);
        notes_ready(&mut app);
        update(&mut app, Msg::NoteInput('x'));

        let Cmd::CreateNote { prompt_id, seq, .. } = update(&mut app, Msg::SubmitNote) else {
            panic!("expected CreateNote");
        };
        let cmd = update(&mut app, Msg::NoteCreated { prompt_id, seq, result: Ok(()) });
        let leaves = cmd.into_leaves();
        assert_eq!(leaves.len(), 2);
        assert!(matches!(leaves[0], Cmd::LoadNotes { .. }));
        assert!(matches!(leaves[1], Cmd::FetchDetail { ref id, .. } if *id == Id::from(1)));
        assert_eq!(app.notes.as_ref().map(|n| n.status), Some(NotesStatus::Loading));
    }

    #[test]
    fn test_created_note_keeps_newer_activation() {
        let mut app = ready_app(vec![record(1, 0), record(2, 0)]);
        select(&mut app, 1);
        notes_ready(&mut app);
        update(&mut app, Msg::NoteInput('x'));
        let Cmd::CreateNote { prompt_id, seq, .. } = update(&mut app, Msg::SubmitNote) else {
            panic!("expected CreateNote");
        };

        // prompt 2 activated while the create is in flight
        let Cmd::FetchDetail { seq: detail_seq, token, .. } = update(&mut app, Msg::ActivateRow(1)) else {
            panic!("expected FetchDetail");
        };
        let leaves = update(&mut app, Msg::NoteCreated { prompt_id, seq, result: Ok(()) }).into_leaves();
        assert!(leaves.iter().all(|c| !matches!(c, Cmd::FetchDetail { .. })));
        assert!(!token.is_cancelled());

        update(
            &mut app,
            Msg::DetailLoaded { id: Id::from(2), seq: detail_seq, result: Ok(record(2, 0)) },
        );
        assert_eq!(app.selection.selected_id(), Some(&Id::from(2)));
    }

    // === Loading Tests ===

    #[test]
    fn test_retry_only_after_failure() {
        let mut app = ready_app(vec![]);
        assert!(matches!(update(&mut app, Msg::RetryLoad), Cmd::None));

        let (mut app, cmd) = App::new();
        let Cmd::LoadTree { seq, .. } = cmd else {
            panic!("expected LoadTree");
        };
        update(&mut app, Msg::TreeLoaded { seq, result: Err("down".to_string()) });
        assert!(app.tree.is_failed());
        assert!(matches!(update(&mut app, Msg::RetryLoad), Cmd::LoadTree { .. }));
    }

    #[test]
    fn test_cmd_batch_flattening() {
        assert!(matches!(Cmd::batch(vec![]), Cmd::None));
        assert!(matches!(Cmd::batch(vec![Cmd::None, Cmd::Quit]), Cmd::Quit));
        let nested = Cmd::Batch(vec![Cmd::None, Cmd::Batch(vec![Cmd::Quit, Cmd::Quit])]);
        assert!(nested.is_quit());
        assert_eq!(nested.into_leaves().len(), 2);
    }

    // === End-to-end against the fake API ===

    #[tokio::test]
    async fn test_note_submission_rehydrates_selection() {
        let api = FakeApi::with_prompts(&["Alpha", "Beta"]);
        let (mut app, cmd) = App::new();
        drive(&mut app, cmd, &api).await;
        assert_eq!(app.tree.prompts().len(), 2);

        let cmd = update(&mut app, Msg::ActivateRow(0));
        drive(&mut app, cmd, &api).await;
        assert_eq!(app.selection.selected_id(), Some(&Id::from(1)));
        let detail_fetches = api.count(&Call::Prompt(Id::from(1)));

        let cmd = update(&mut app, Msg::FocusNoteInput);
        drive(&mut app, cmd, &api).await;
        for c in "hello".chars() {
            update(&mut app, Msg::NoteInput(c));
        }
        let cmd = update(&mut app, Msg::SubmitNote);
        drive(&mut app, cmd, &api).await;

        assert_eq!(api.count(&Call::AddNote(Id::from(1), "hello".to_string())), 1);
        assert!(api.count(&Call::Prompt(Id::from(1))) > detail_fetches);
        let notes = app.notes.as_ref().expect("notes mounted");
        assert_eq!(notes.status, NotesStatus::Ready);
        assert_eq!(notes.notes.first().map(|n| n.content.as_str()), Some("hello"));
        assert_eq!(notes.input, "");
    }

    #[tokio::test]
    async fn test_toggle_makes_no_api_calls() {
        let api = FakeApi::with_prompts(&["Alpha"]);
        let (mut app, cmd) = App::new();
        drive(&mut app, cmd, &api).await;
        let before = api.calls().len();

        let cmd = update(&mut app, Msg::ToggleRow(0));
        drive(&mut app, cmd, &api).await;
        assert_eq!(api.calls().len(), before);
    }

    #[tokio::test]
    async fn test_failed_create_keeps_input_end_to_end() {
        let api = FakeApi::with_prompts(&["Alpha"]);
        api.set_fail_add_note(true);
        let (mut app, cmd) = App::new();
        drive(&mut app, cmd, &api).await;
        let cmd = update(&mut app, Msg::ActivateRow(0));
        drive(&mut app, cmd, &api).await;
        let cmd = update(&mut app, Msg::FocusNoteInput);
        drive(&mut app, cmd, &api).await;

        for c in "keep".chars() {
            update(&mut app, Msg::NoteInput(c));
        }
        let cmd = update(&mut app, Msg::SubmitNote);
        drive(&mut app, cmd, &api).await;

        assert_eq!(app.alert.as_deref(), Some(SUBMIT_FAILED_ALERT));
        assert_eq!(app.notes.as_ref().map(|n| n.input.as_str()), Some("keep"));
    }
}
