//! Side panel - prompt details with a Details/Notes tab bar

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::model::PromptRecord;
use crate::tui::app::{App, PanelTab};
use crate::tui::views::notes;

/// Draw the side panel for the selected prompt
pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let title = app
        .selection
        .selected()
        .map(|p| format!(" {} ", p.title))
        .unwrap_or_else(|| " Prompt ".to_string());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let [tabs_area, body_area] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(inner_area);

    let Some(record) = app.selection.selected() else {
        let id = app
            .selection
            .pending_id()
            .map(|id| id.to_string())
            .unwrap_or_default();
        let loading = Paragraph::new(format!("Loading prompt {}...", id))
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(loading, body_area);
        return;
    };

    frame.render_widget(Paragraph::new(tab_bar(app)), tabs_area);

    match app.panel_tab {
        PanelTab::Details => {
            let details = Paragraph::new(detail_lines(record))
                .wrap(Wrap { trim: false })
                .scroll((app.panel_scroll as u16, 0));
            frame.render_widget(details, body_area);
        }
        PanelTab::Notes => notes::draw(frame, app, body_area),
    }
}

fn tab_bar(app: &App) -> Vec<Line<'static>> {
    let mut spans = vec![Span::raw(" ")];
    for tab in [PanelTab::Details, PanelTab::Notes] {
        let style = if tab == app.panel_tab {
            Style::default().fg(Color::Black).bg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} ", tab.label()), style));
        spans.push(Span::raw(" "));
    }
    if app.selection.pending_id().is_some() {
        spans.push(Span::styled("refreshing…", Style::default().fg(Color::DarkGray)));
    }
    vec![
        Line::from(spans),
        Line::from(Span::styled(
            "─".repeat(40),
            Style::default().fg(Color::DarkGray),
        )),
    ]
}

/// Body of the Details tab
pub fn detail_lines(record: &PromptRecord) -> Vec<Line<'_>> {
    let label = Style::default().fg(Color::DarkGray);
    let mut lines: Vec<Line> = vec![];

    lines.push(Line::from(Span::styled(
        record.title.as_str(),
        Style::default().fg(Color::White).bold(),
    )));
    let mut ids = vec![Span::styled(format!("ID: {}", record.id), label)];
    if let Some(parent) = &record.parent_prompt_id {
        ids.push(Span::styled(format!("  Parent: {}", parent), label));
    }
    lines.push(Line::from(ids));
    lines.push(Line::from(""));

    // Description
    lines.push(Line::from(Span::styled("Description", label.bold())));
    if record.description.trim().is_empty() {
        lines.push(Line::from(Span::styled("No description", label.italic())));
    } else {
        for line in record.description.lines() {
            lines.push(Line::from(Span::styled(line, Style::default().fg(Color::Gray))));
        }
    }
    lines.push(Line::from(""));

    // Nodes
    lines.push(Line::from(Span::styled(
        format!("Nodes ({})", record.nodes.len()),
        label.bold(),
    )));
    if record.nodes.is_empty() {
        lines.push(Line::from(Span::styled("No nodes for this prompt", label.italic())));
    }
    for node in &record.nodes {
        lines.push(Line::from(vec![
            Span::styled("• ", Style::default().fg(Color::Yellow)),
            Span::styled(node.name.as_str(), Style::default().fg(Color::White)),
        ]));
        if let Some(action) = &node.action {
            for line in action.lines() {
                lines.push(Line::from(Span::styled(
                    format!("  {}", line),
                    Style::default().fg(Color::Gray),
                )));
            }
        }
    }

    lines
}

/// Number of body lines the panel currently has to scroll through
pub fn content_lines(app: &App) -> usize {
    match (app.panel_tab, app.selection.selected()) {
        (_, None) => 0,
        (PanelTab::Details, Some(record)) => detail_lines(record).len(),
        (PanelTab::Notes, Some(_)) => app.notes.as_ref().map(notes::list_lines).map_or(0, |l| l.len()),
    }
}
