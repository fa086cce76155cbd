//! Notes tab - append form above the prompt's notes, newest first

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::model::format_timestamp;
use crate::tui::app::{App, Focus};
use crate::tui::notes::{NotesPanel, NotesStatus};
use crate::tui::state;

const PLACEHOLDER: &str = "Add a note...";
const MAX_INPUT_LINES: u16 = 4;

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let Some(panel) = app.notes.as_ref() else {
        return;
    };
    let focused = app.focus == Focus::NoteInput;

    let input_height = (state::input_lines(&panel.input).len() as u16).clamp(1, MAX_INPUT_LINES) + 2;
    let [input_area, list_area] =
        Layout::vertical([Constraint::Length(input_height), Constraint::Min(0)]).areas(area);

    draw_input(frame, panel, focused, input_area);

    let list = Paragraph::new(list_lines(panel))
        .wrap(Wrap { trim: false })
        .scroll((app.panel_scroll as u16, 0));
    frame.render_widget(list, list_area);
}

fn draw_input(frame: &mut Frame, panel: &NotesPanel, focused: bool, area: Rect) {
    let title = if panel.is_submitting() {
        " Adding... "
    } else if focused {
        " Enter to add, Alt+Enter for newline "
    } else {
        " Press i to add a note "
    };
    let border = if focused { Color::Yellow } else { Color::DarkGray };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    let lines: Vec<Line> = if panel.input.is_empty() {
        vec![Line::from(Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)))]
    } else {
        let mut lines: Vec<Line> = state::input_lines(&panel.input)
            .into_iter()
            .map(Line::raw)
            .collect();
        // show the tail when the input outgrows the box
        let overflow = lines.len().saturating_sub(MAX_INPUT_LINES as usize);
        lines.drain(..overflow);
        lines
    };

    let mut input = Paragraph::new(lines).block(block);
    if panel.is_submitting() {
        input = input.style(Style::default().fg(Color::DarkGray));
    }
    frame.render_widget(input, area);
}

/// The note list as rendered below the input
pub fn list_lines(panel: &NotesPanel) -> Vec<Line<'_>> {
    let muted = Style::default().fg(Color::DarkGray);
    if panel.status == NotesStatus::Loading {
        return vec![Line::from(Span::styled("Loading notes...", muted))];
    }
    if panel.notes.is_empty() {
        return vec![Line::from(Span::styled("No notes yet. Add one above!", muted))];
    }

    let mut lines = vec![];
    for note in &panel.notes {
        lines.push(Line::from(Span::styled(format_timestamp(&note.created_at), muted)));
        for line in note.content.lines() {
            lines.push(Line::from(Span::styled(line, Style::default().fg(Color::White))));
        }
        lines.push(Line::from(""));
    }
    lines
}
