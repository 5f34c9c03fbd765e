//! Topic catalog screen.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::state::App;

/// Render the topic cards, or the call-to-action when the catalog is
/// empty.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(4), // Header
        Constraint::Min(6),    // Topic list
        Constraint::Length(2), // Controls
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0]);

    if app.topics.is_empty() {
        render_empty_catalog(frame, chunks[1]);
    } else {
        render_topic_cards(frame, chunks[1], app);
    }

    render_controls(frame, chunks[2]);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            super::TITLE,
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from("Pick a topic to start a quiz".fg(Color::DarkGray)),
    ];
    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

fn render_empty_catalog(frame: &mut Frame, area: Rect) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No topics available.",
            Style::default().fg(Color::Yellow),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled("[I]", Style::default().fg(Color::Green).bold()),
            Span::styled(
                " to initialize sample data and get started!",
                Style::default().fg(Color::Gray),
            ),
        ]),
    ];
    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

fn render_topic_cards(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = Vec::with_capacity(app.topics.len() * 3);

    for (index, topic) in app.topics.iter().enumerate() {
        let is_under_cursor = index == app.topic_cursor;
        let marker = if is_under_cursor { ">" } else { " " };
        let title_style = if is_under_cursor {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::White)
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), title_style),
            Span::styled(&topic.title, title_style),
        ]));
        lines.push(Line::from(Span::styled(
            format!("   {}", topic.description_text()),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Topics ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget =
        Paragraph::new("j/k select  ·  enter start  ·  i init data  ·  u upload  ·  q quit")
            .alignment(Alignment::Center)
            .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
