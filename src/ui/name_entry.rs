//! Name prompt shown between picking a topic and starting its quiz.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::state::{App, Screen};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Screen::NameEntry {
        topic,
        input,
        error,
        loading,
    } = &app.screen
    else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Percentage(35),
        Constraint::Length(11),
        Constraint::Percentage(35),
    ])
    .split(area);

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            super::TITLE,
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            topic.title.clone(),
            Style::default().fg(Color::Green),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter your name: ", Style::default().fg(Color::White)),
            Span::styled(input, Style::default().fg(Color::Yellow)),
            Span::styled("_", Style::default().fg(Color::Yellow)),
        ]),
        Line::from(""),
    ];

    if *loading {
        content.push(Line::from(Span::styled(
            "Loading quizzes...",
            Style::default().fg(Color::Yellow),
        )));
    } else if let Some(err) = error {
        content.push(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(Color::Red),
        )));
    } else {
        content.push(Line::from(""));
    }

    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "[Enter] to start  ·  [Esc] back to topics",
        Style::default().fg(Color::DarkGray),
    )));

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, chunks[1]);
}
