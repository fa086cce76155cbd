//! Application state for the TUI

use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Margin, Rect};
use tracing::{info, warn};

use super::msg::{key_to_msg, KeyContext, Msg};
use super::notes::NotesPanel;
use super::request::RequestSlot;
use super::selection::SelectionController;
use super::tree_view::{Click, TreeViewState};
use super::ui;
use super::update::Cmd;
use crate::model::{LoadedTree, PromptRecord, TreeSummary};

/// How long a footer status message stays up
pub const STATUS_TTL: Duration = Duration::from_secs(3);

pub const TREE_LOAD_FAILED: &str = "Failed to load tree data";

/// Lifecycle of the assembled tree
#[derive(Debug, Clone, PartialEq)]
pub enum TreeLoad {
    Loading,
    Failed(String),
    Ready(LoadedTree),
}

/// What applying a tree result did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeOutcome {
    Stale,
    Loaded,
    /// Initial load failed; the error screen is showing
    Failed,
    /// A reload failed while older data was on screen; the old data stays
    ReloadFailed(String),
}

/// Owns the summary and the hydrated prompt list
#[derive(Debug)]
pub struct TreeStore {
    pub load: TreeLoad,
    request: RequestSlot,
}

impl Default for TreeStore {
    fn default() -> Self {
        Self {
            load: TreeLoad::Loading,
            request: RequestSlot::new(),
        }
    }
}

impl TreeStore {
    /// Start (or restart) the full assembly. Ready data stays visible meanwhile.
    pub fn start_load(&mut self) -> Cmd {
        let (seq, token) = self.request.start();
        if !matches!(self.load, TreeLoad::Ready(_)) {
            self.load = TreeLoad::Loading;
        }
        Cmd::LoadTree { seq, token }
    }

    pub fn apply(&mut self, seq: u64, result: Result<LoadedTree, String>) -> TreeOutcome {
        if !self.request.finish(seq) {
            return TreeOutcome::Stale;
        }
        match result {
            Ok(tree) => {
                info!(prompts = tree.prompts.len(), "tree ready");
                self.load = TreeLoad::Ready(tree);
                TreeOutcome::Loaded
            }
            Err(e) => {
                warn!(error = %e, "tree load failed");
                if matches!(self.load, TreeLoad::Ready(_)) {
                    TreeOutcome::ReloadFailed(e)
                } else {
                    self.load = TreeLoad::Failed(e);
                    TreeOutcome::Failed
                }
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.request.is_pending()
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.load, TreeLoad::Failed(_))
    }

    pub fn prompts(&self) -> &[PromptRecord] {
        match &self.load {
            TreeLoad::Ready(tree) => &tree.prompts,
            _ => &[],
        }
    }

    pub fn summary(&self) -> Option<&TreeSummary> {
        match &self.load {
            TreeLoad::Ready(tree) => Some(&tree.summary),
            _ => None,
        }
    }
}

/// Side panel tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelTab {
    #[default]
    Details,
    Notes,
}

impl PanelTab {
    pub fn next(self) -> Self {
        match self {
            PanelTab::Details => PanelTab::Notes,
            PanelTab::Notes => PanelTab::Details,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PanelTab::Details => "Details",
            PanelTab::Notes => "Notes",
        }
    }
}

/// Current input focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Tree,
    NoteInput,
}

/// Main application state
#[derive(Debug)]
pub struct App {
    // Data
    pub tree: TreeStore,
    pub selection: SelectionController,

    // Tree view
    pub tree_view: TreeViewState,

    // Side panel
    pub panel_tab: PanelTab,
    pub panel_scroll: usize,
    pub notes: Option<NotesPanel>,

    // UI state
    pub focus: Focus,
    pub alert: Option<String>,
    pub show_help: bool,

    // Viewport
    pub viewport_width: u16,
    pub viewport_height: u16,

    // Status message
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Fresh state plus the command that starts the initial tree load
    pub fn new() -> (Self, Cmd) {
        let mut app = Self {
            tree: TreeStore::default(),
            selection: SelectionController::new(),
            tree_view: TreeViewState::new(),
            panel_tab: PanelTab::default(),
            panel_scroll: 0,
            notes: None,
            focus: Focus::default(),
            alert: None,
            show_help: false,
            viewport_width: 80,
            viewport_height: 24,
            status_message: None,
        };
        let cmd = app.tree.start_load();
        (app, cmd)
    }

    pub fn panel_open(&self) -> bool {
        self.selection.is_open()
    }

    pub fn key_context(&self) -> KeyContext {
        KeyContext {
            alert_open: self.alert.is_some(),
            help_open: self.show_help,
            note_input_focused: self.focus == Focus::NoteInput && self.notes.is_some(),
            panel_open: self.panel_open(),
        }
    }

    /// Number of rows the tree currently renders
    pub fn row_count(&self) -> usize {
        self.tree_view.rows(self.tree.prompts()).len()
    }

    fn viewport(&self) -> Rect {
        Rect::new(0, 0, self.viewport_width, self.viewport_height)
    }

    /// Inner area of the tree block (inside its border)
    pub fn tree_inner_area(&self) -> Rect {
        ui::content_areas(self.viewport(), self.panel_open())
            .tree
            .inner(Margin::new(1, 1))
    }

    pub fn tree_visible_rows(&self) -> usize {
        self.tree_inner_area().height as usize
    }

    /// Lines available to the side panel body
    pub fn panel_visible_lines(&self) -> usize {
        ui::content_areas(self.viewport(), self.panel_open())
            .panel
            .map(|area| area.inner(Margin::new(1, 1)).height.saturating_sub(2) as usize)
            .unwrap_or(0)
    }

    /// Translate a terminal event into a message
    pub fn event_to_msg(&self, event: Event) -> Msg {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => key_to_msg(key, self.key_context()),
            Event::Mouse(mouse) => self.mouse_to_msg(mouse),
            Event::Resize(w, h) => Msg::Resize(w, h),
            _ => Msg::Noop,
        }
    }

    fn mouse_to_msg(&self, mouse: MouseEvent) -> Msg {
        if self.alert.is_some() || self.show_help {
            return Msg::Noop;
        }
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let inner = self.tree_inner_area();
                match self
                    .tree_view
                    .click_at(self.tree.prompts(), inner, mouse.column, mouse.row)
                {
                    Some(Click::Toggle(index)) => Msg::ToggleRow(index),
                    Some(Click::Activate(index)) => Msg::ActivateRow(index),
                    None => Msg::Noop,
                }
            }
            MouseEventKind::ScrollDown => Msg::MoveDown,
            MouseEventKind::ScrollUp => Msg::MoveUp,
            _ => Msg::Noop,
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Current status text, if it has not expired
    pub fn status(&self) -> Option<&str> {
        self.status_message
            .as_ref()
            .filter(|(_, at)| at.elapsed() < STATUS_TTL)
            .map(|(msg, _)| msg.as_str())
    }

    pub fn expire_status(&mut self) {
        if self.status().is_none() {
            self.status_message = None;
        }
    }
}
