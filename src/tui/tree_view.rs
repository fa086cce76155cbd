//! Tree view state
//!
//! The tree itself is a pure function of the hydrated prompt list. The only
//! state owned here is per-prompt expansion (keyed by prompt id, expanded by
//! default), the cursor, and the scroll offset. Nothing in this module
//! touches the network or the selection.

use std::collections::HashSet;

use ratatui::layout::Rect;

use super::state;
use crate::model::{Id, NodeRecord, PromptRecord};

/// Width of the leading " ▼ " toggle column on prompt rows
pub const TOGGLE_WIDTH: u16 = 3;

/// One rendered line of the tree
#[derive(Debug, Clone, PartialEq)]
pub enum Row<'a> {
    Prompt {
        prompt: &'a PromptRecord,
        expanded: bool,
    },
    Node {
        prompt: &'a PromptRecord,
        node: &'a NodeRecord,
    },
}

impl<'a> Row<'a> {
    pub fn prompt(&self) -> &'a PromptRecord {
        match self {
            Row::Prompt { prompt, .. } | Row::Node { prompt, .. } => prompt,
        }
    }
}

/// Where a mouse click on the tree landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Click {
    Toggle(usize),
    Activate(usize),
}

#[derive(Debug, Default)]
pub struct TreeViewState {
    collapsed: HashSet<Id>,
    pub cursor: usize,
    pub scroll_offset: usize,
}

impl TreeViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, id: &Id) -> bool {
        !self.collapsed.contains(id)
    }

    /// Flip one prompt's expansion
    pub fn toggle(&mut self, id: &Id) {
        if !self.collapsed.remove(id) {
            self.collapsed.insert(id.clone());
        }
    }

    pub fn set_expanded(&mut self, id: &Id, expanded: bool) {
        if expanded {
            self.collapsed.remove(id);
        } else {
            self.collapsed.insert(id.clone());
        }
    }

    /// Flatten the prompt list into visible rows
    pub fn rows<'a>(&self, prompts: &'a [PromptRecord]) -> Vec<Row<'a>> {
        let mut rows = Vec::with_capacity(prompts.len());
        for prompt in prompts {
            let expanded = self.is_expanded(&prompt.id);
            rows.push(Row::Prompt { prompt, expanded });
            if expanded {
                rows.extend(prompt.nodes.iter().map(|node| Row::Node { prompt, node }));
            }
        }
        rows
    }

    /// The prompt whose primary row sits at `index`, if that row is a prompt row
    pub fn prompt_at<'a>(&self, prompts: &'a [PromptRecord], index: usize) -> Option<&'a PromptRecord> {
        match self.rows(prompts).get(index) {
            Some(Row::Prompt { prompt, .. }) => Some(prompt),
            _ => None,
        }
    }

    /// The prompt owning the row at `index` (prompt row or one of its nodes)
    pub fn owner_at<'a>(&self, prompts: &'a [PromptRecord], index: usize) -> Option<&'a PromptRecord> {
        self.rows(prompts).get(index).map(Row::prompt)
    }

    /// Row index of a prompt's primary row
    pub fn prompt_row_index(&self, prompts: &[PromptRecord], id: &Id) -> Option<usize> {
        self.rows(prompts)
            .iter()
            .position(|row| matches!(row, Row::Prompt { prompt, .. } if prompt.id == *id))
    }

    // Cursor movement, all clamped to the current row count

    pub fn move_up(&mut self, visible: usize) {
        self.cursor = state::cursor_up(self.cursor);
        self.ensure_visible(visible);
    }

    pub fn move_down(&mut self, row_count: usize, visible: usize) {
        self.cursor = state::cursor_down(self.cursor, row_count);
        self.ensure_visible(visible);
    }

    pub fn page_up(&mut self, visible: usize) {
        self.cursor = state::cursor_page_up(self.cursor, visible.max(1));
        self.ensure_visible(visible);
    }

    pub fn page_down(&mut self, row_count: usize, visible: usize) {
        self.cursor = state::cursor_page_down(self.cursor, visible.max(1), row_count);
        self.ensure_visible(visible);
    }

    pub fn jump_to_top(&mut self) {
        self.cursor = 0;
        self.scroll_offset = 0;
    }

    pub fn jump_to_bottom(&mut self, row_count: usize, visible: usize) {
        self.cursor = row_count.saturating_sub(1);
        self.ensure_visible(visible);
    }

    /// Keep the cursor on a real row after the row count changed
    pub fn clamp(&mut self, row_count: usize, visible: usize) {
        self.cursor = state::clamp_cursor(self.cursor, row_count);
        self.scroll_offset = self.scroll_offset.min(row_count.saturating_sub(1));
        self.ensure_visible(visible);
    }

    fn ensure_visible(&mut self, visible: usize) {
        self.scroll_offset = state::follow_cursor(self.cursor, self.scroll_offset, visible);
    }

    /// Map a click at terminal cell (`x`, `y`) inside the tree's inner area
    ///
    /// Clicks on the toggle column of an expandable prompt only toggle. Any
    /// other click on a prompt row activates it. Node rows are not clickable.
    pub fn click_at(&self, prompts: &[PromptRecord], inner: Rect, x: u16, y: u16) -> Option<Click> {
        if x < inner.x || x >= inner.x + inner.width || y < inner.y || y >= inner.y + inner.height {
            return None;
        }
        let index = self.scroll_offset + (y - inner.y) as usize;
        match self.rows(prompts).get(index)? {
            Row::Prompt { prompt, .. } if prompt.has_nodes() && x < inner.x + TOGGLE_WIDTH => {
                Some(Click::Toggle(index))
            }
            Row::Prompt { .. } => Some(Click::Activate(index)),
            Row::Node { .. } => None,
        }
    }
}
