//! TEA Message Types for the TUI
//!
//! Every user action and every finished network request is a `Msg`.
//! Messages are data describing what happened; `update` decides what it
//! means. Network results carry the sequence number of the request that
//! produced them so stale answers can be recognized and dropped.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::{Id, LoadedTree, NoteRecord, PromptRecord};

/// All possible messages/actions in the TUI
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    // === Tree navigation ===
    /// Move cursor up by one row
    MoveUp,
    /// Move cursor down by one row
    MoveDown,
    /// Move cursor up by page
    PageUp,
    /// Move cursor down by page
    PageDown,
    /// Jump to first row
    JumpToTop,
    /// Jump to last row
    JumpToBottom,

    // === Tree rows ===
    /// Activate the prompt under the cursor
    ActivateCursor,
    /// Flip expansion of the prompt under the cursor
    ToggleCursor,
    /// Collapse the prompt under the cursor
    CollapseCursor,
    /// Expand the prompt under the cursor
    ExpandCursor,
    /// Mouse click on a row's primary area
    ActivateRow(usize),
    /// Mouse click on a row's toggle glyph
    ToggleRow(usize),

    // === Side panel ===
    /// Close the detail panel (deselect)
    ClosePanel,
    /// Switch between the Details and Notes tabs
    NextTab,
    /// Scroll panel content up
    PanelScrollUp,
    /// Scroll panel content down
    PanelScrollDown,

    // === Note input ===
    /// Focus the note input (opens the Notes tab)
    FocusNoteInput,
    /// Leave the note input, keeping its text
    LeaveNoteInput,
    /// Typed character
    NoteInput(char),
    /// Insert a line break
    NoteNewline,
    /// Delete last character
    NoteBackspace,
    /// Submit the note
    SubmitNote,

    // === Modals ===
    /// Dismiss the blocking alert
    DismissAlert,
    /// Toggle help overlay
    ToggleHelp,

    // === Tree loading ===
    /// Retry after the initial load failed
    RetryLoad,
    /// Re-fetch the whole tree
    ReloadTree,

    // === Network results ===
    TreeLoaded {
        seq: u64,
        result: Result<LoadedTree, String>,
    },
    DetailLoaded {
        id: Id,
        seq: u64,
        result: Result<PromptRecord, String>,
    },
    NotesLoaded {
        prompt_id: Id,
        seq: u64,
        result: Result<Vec<NoteRecord>, String>,
    },
    NoteCreated {
        prompt_id: Id,
        seq: u64,
        result: Result<(), String>,
    },

    // === Lifecycle ===
    /// Quit the application
    Quit,
    /// Tick event (status expiry)
    Tick,
    /// Window resized
    Resize(u16, u16),

    // === Internal ===
    /// No operation (for unhandled keys)
    Noop,
}

/// What the key mapping needs to know about the current UI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyContext {
    pub alert_open: bool,
    pub help_open: bool,
    pub note_input_focused: bool,
    pub panel_open: bool,
}

/// Convert a key event to a message
///
/// Pure function: the result describes what the user intended.
pub fn key_to_msg(key: KeyEvent, ctx: KeyContext) -> Msg {
    let code = key.code;
    let modifiers = key.modifiers;

    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return Msg::Quit;
    }

    // Blocking alert swallows everything but dismissal
    if ctx.alert_open {
        return match code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Msg::DismissAlert,
            _ => Msg::Noop,
        };
    }

    if ctx.help_open {
        return match code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Msg::ToggleHelp,
            _ => Msg::Noop,
        };
    }

    if ctx.note_input_focused {
        return match code {
            KeyCode::Esc => Msg::LeaveNoteInput,
            KeyCode::Enter if modifiers.contains(KeyModifiers::ALT) => Msg::NoteNewline,
            KeyCode::Enter => Msg::SubmitNote,
            KeyCode::Backspace => Msg::NoteBackspace,
            KeyCode::Char(c) => Msg::NoteInput(c),
            _ => Msg::Noop,
        };
    }

    match code {
        // Quit
        KeyCode::Char('q') => Msg::Quit,

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => Msg::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Msg::MoveUp,
        KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => Msg::PageDown,
        KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => Msg::PageUp,
        KeyCode::Char('g') | KeyCode::Home => Msg::JumpToTop,
        KeyCode::Char('G') | KeyCode::End => Msg::JumpToBottom,
        KeyCode::PageDown => Msg::PageDown,
        KeyCode::PageUp => Msg::PageUp,

        // Rows
        KeyCode::Enter => Msg::ActivateCursor,
        KeyCode::Char(' ') => Msg::ToggleCursor,
        KeyCode::Char('h') | KeyCode::Left => Msg::CollapseCursor,
        KeyCode::Char('l') | KeyCode::Right => Msg::ExpandCursor,

        // Panel
        KeyCode::Esc | KeyCode::Char('x') if ctx.panel_open => Msg::ClosePanel,
        KeyCode::Tab if ctx.panel_open => Msg::NextTab,
        KeyCode::Char('i') | KeyCode::Char('a') if ctx.panel_open => Msg::FocusNoteInput,
        KeyCode::Char('J') if ctx.panel_open => Msg::PanelScrollDown,
        KeyCode::Char('K') if ctx.panel_open => Msg::PanelScrollUp,

        // Loading
        KeyCode::Char('r') => Msg::RetryLoad,
        KeyCode::Char('R') => Msg::ReloadTree,

        // Help
        KeyCode::Char('?') => Msg::ToggleHelp,

        _ => Msg::Noop,
    }
}
