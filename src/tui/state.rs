//! Pure state helpers for the TUI (Functional Core)
//!
//! Index arithmetic for the tree cursor and the side panel, plus the small
//! text-editing rules of the note input. No I/O, no component state; the
//! stateful containers in `tree_view`, `selection` and `notes` call these.

// =============================================================================
// Cursor movement over a list of `len` rows
// =============================================================================

pub fn cursor_up(cursor: usize) -> usize {
    cursor.saturating_sub(1)
}

pub fn cursor_down(cursor: usize, len: usize) -> usize {
    clamp_cursor(cursor.saturating_add(1), len)
}

pub fn cursor_page_up(cursor: usize, page: usize) -> usize {
    cursor.saturating_sub(page)
}

pub fn cursor_page_down(cursor: usize, page: usize, len: usize) -> usize {
    clamp_cursor(cursor.saturating_add(page), len)
}

/// Keep `cursor` on screen: return the first visible row for a window of
/// `height` rows that currently starts at `offset`
pub fn follow_cursor(cursor: usize, offset: usize, height: usize) -> usize {
    match height {
        0 => 0,
        _ if cursor < offset => cursor,
        _ if cursor >= offset + height => cursor + 1 - height,
        _ => offset,
    }
}

/// Last valid row when the list shrank under the cursor; 0 for an empty list
pub fn clamp_cursor(cursor: usize, len: usize) -> usize {
    cursor.min(len.saturating_sub(1))
}

/// Scroll a panel by `delta` lines, clamped to its content
pub fn scroll_panel(current: usize, delta: isize, total_lines: usize, visible: usize) -> usize {
    let max_scroll = total_lines.saturating_sub(visible);
    if delta >= 0 {
        (current + delta as usize).min(max_scroll)
    } else {
        current.saturating_sub(delta.unsigned_abs())
    }
}

// =============================================================================
// Note input
// =============================================================================

/// A note is submittable only if it has non-whitespace content
pub fn is_blank(input: &str) -> bool {
    input.trim().is_empty()
}

/// Remove the last character (not byte) from the input
pub fn backspace(input: &mut String) {
    input.pop();
}

/// Lines of the input as they should be shown, with a trailing empty line
/// when the input ends in a newline so the cursor has somewhere to sit
pub fn input_lines(input: &str) -> Vec<&str> {
    input.split('\n').collect()
}

// =============================================================================
// Tests
// =============================================================================
