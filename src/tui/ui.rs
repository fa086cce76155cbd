//! UI rendering for the TUI

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::app::{App, Focus, TreeLoad, TREE_LOAD_FAILED};
use super::views::{detail, tree};

const HEADER_HEIGHT: u16 = 4;

/// Screen regions, shared by drawing and mouse hit-testing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentAreas {
    pub header: Rect,
    pub tree: Rect,
    pub panel: Option<Rect>,
    pub footer: Rect,
}

/// Split the screen into header, tree, optional side panel and footer
pub fn content_areas(area: Rect, panel_open: bool) -> ContentAreas {
    let [header, content, footer] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);

    let (tree, panel) = if panel_open {
        let [tree, panel] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(content);
        (tree, Some(panel))
    } else {
        (content, None)
    };

    ContentAreas {
        header,
        tree,
        panel,
        footer,
    }
}

/// Main draw function - orchestrates all rendering
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let areas = content_areas(area, app.panel_open());

    draw_header(frame, app, areas.header);

    match &app.tree.load {
        TreeLoad::Loading => draw_loading(frame, areas.tree),
        TreeLoad::Failed(error) => draw_load_error(frame, error, areas.tree),
        TreeLoad::Ready(_) => tree::draw(frame, app, areas.tree),
    }
    if let Some(panel) = areas.panel {
        detail::draw(frame, app, panel);
    }

    draw_footer(frame, app, areas.footer);

    // Overlays
    if app.show_help {
        draw_help_overlay(frame, area);
    }

    if let Some(alert) = &app.alert {
        draw_alert(frame, alert, area);
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let label = Style::default().fg(Color::DarkGray);
    let lines = match app.tree.summary() {
        Some(summary) => {
            let title = if summary.project.is_empty() {
                "Untitled project"
            } else {
                summary.project.as_str()
            };
            vec![
                Line::from(Span::styled(
                    format!(" {}", title),
                    Style::default().fg(Color::White).bold(),
                )),
                Line::from(vec![
                    Span::styled(" Main request: ", label),
                    Span::raw(summary.main_request.as_str()),
                ]),
                Line::from(vec![
                    Span::styled(" Final integration: ", label),
                    Span::raw(summary.final_integration.as_str()),
                ]),
            ]
        }
        None => vec![Line::from(Span::styled(
            " Prompt Explorer",
            Style::default().fg(Color::White).bold(),
        ))],
    };

    let header = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::Blue)),
    );

    frame.render_widget(header, area);
}

fn draw_loading(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Prompts ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let loading = Paragraph::new("Loading prompt tree...")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(loading, inner);
}

fn draw_load_error(frame: &mut Frame, error: &str, area: Rect) {
    let block = Block::default()
        .title(" Prompts ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(TREE_LOAD_FAILED, Style::default().fg(Color::Red).bold())),
        Line::from(Span::styled(error, Style::default().fg(Color::DarkGray))),
        Line::from(""),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled("r", Style::default().fg(Color::Yellow).bold()),
            Span::raw(" to retry"),
        ]),
    ];
    let message = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(message, inner);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let keybinds = if app.tree.is_failed() {
        "r:retry  ?:help  q:quit"
    } else if app.focus == Focus::NoteInput && app.notes.is_some() {
        "Enter:submit  Alt+Enter:newline  Esc:leave input"
    } else if app.panel_open() {
        "j/k:move  Enter:open  Space:toggle  Tab:details/notes  i:add note  J/K:scroll  Esc:close  q:quit"
    } else {
        "j/k:move  Enter:open  Space:toggle  R:reload  ?:help  q:quit"
    };

    // Show status message if present, otherwise show keybinds
    let footer_text = app.status().unwrap_or(keybinds);

    let footer = Paragraph::new(format!(" {}", footer_text))
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(footer, area);
}

/// Rectangle of at most `width` x `height`, centered in `area`
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn draw_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(56, 30, area);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let help_text = r#"
  Tree
  ─────────────────────────────────
  j/k, ↑/↓     Move up/down
  g / G        Jump to top/bottom
  Ctrl+d/u     Page down/up
  Enter        Open prompt details
  Space        Expand/collapse prompt
  h/l, ←/→     Collapse/expand prompt
  R            Reload tree
  r            Retry after a failed load

  Side panel
  ─────────────────────────────────
  Tab          Switch Details/Notes
  i / a        Write a note
  J / K        Scroll panel
  Esc / x      Close panel

  Note input
  ─────────────────────────────────
  Enter        Submit note
  Alt+Enter    New line
  Esc          Leave input (keeps text)

  q / Ctrl+c   Quit
  Press ? or Esc to close
"#;

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(Color::White).bg(Color::Black));

    frame.render_widget(help, popup_area);
}

/// Blocking alert; every key but Enter/Esc/Space is swallowed while shown
fn draw_alert(frame: &mut Frame, message: &str, area: Rect) {
    let popup_area = centered_rect(48, 7, area);
    frame.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::White).bold())),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to dismiss",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let alert = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Error ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(alert, popup_area);
}
