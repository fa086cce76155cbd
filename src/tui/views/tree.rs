//! Tree view - prompts as expandable rows with their nodes nested below

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::export::truncate;
use crate::tui::app::App;
use crate::tui::tree_view::Row;

/// Draw the prompt tree
pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let prompts = app.tree.prompts();
    let title = format!(" Prompts ({}) ", prompts.len());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let rows = app.tree_view.rows(prompts);
    if rows.is_empty() {
        let empty = Paragraph::new("No prompts in this project")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner_area);
        return;
    }

    let selected_id = app.selection.selected_id();
    let pending_id = app.selection.pending_id();
    let width = inner_area.width as usize;

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .skip(app.tree_view.scroll_offset)
        .take(inner_area.height as usize)
        .map(|(idx, row)| {
            let is_cursor = idx == app.tree_view.cursor;
            let line = match row {
                Row::Prompt { prompt, expanded } => {
                    let glyph = match (prompt.has_nodes(), *expanded) {
                        (false, _) => "   ",
                        (true, true) => " ▼ ",
                        (true, false) => " ▶ ",
                    };
                    let is_selected = selected_id == Some(&prompt.id);
                    let is_pending = pending_id == Some(&prompt.id);
                    let title_style = if is_selected {
                        Style::default().fg(Color::Cyan).bold()
                    } else {
                        Style::default().fg(Color::White)
                    };

                    let mut spans = vec![
                        Span::styled(glyph, Style::default().fg(Color::Yellow)),
                        Span::styled(truncate(&prompt.title, width.saturating_sub(12)), title_style),
                    ];
                    if prompt.has_nodes() {
                        spans.push(Span::styled(
                            format!(" ({})", prompt.nodes.len()),
                            Style::default().fg(Color::DarkGray),
                        ));
                    }
                    if is_pending {
                        spans.push(Span::styled(" …", Style::default().fg(Color::DarkGray)));
                    }
                    Line::from(spans)
                }
                Row::Node { node, .. } => {
                    let mut spans = vec![
                        Span::styled("     • ", Style::default().fg(Color::DarkGray)),
                        Span::styled(node.name.as_str(), Style::default().fg(Color::Gray)),
                    ];
                    if let Some(action) = &node.action {
                        spans.push(Span::styled(
                            format!("  {}", truncate(action, width.saturating_sub(node.name.chars().count() + 10))),
                            Style::default().fg(Color::DarkGray),
                        ));
                    }
                    Line::from(spans)
                }
            };

            let style = if is_cursor {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let list = List::new(items);

    let mut state = ListState::default();
    state.select(Some(app.tree_view.cursor.saturating_sub(app.tree_view.scroll_offset)));

    frame.render_stateful_widget(list, inner_area, &mut state);
}
