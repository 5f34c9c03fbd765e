//! Results screen: score, tier message, and the per-question review.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::session::QuizSession;
use crate::state::{App, Screen};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Screen::Results { session, scroll } = &app.screen else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(7), // Score summary
        Constraint::Min(8),    // Review
        Constraint::Length(2), // Controls
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[0], session);
    render_review(frame, chunks[1], session, *scroll);
    render_controls(frame, chunks[2]);
}

fn render_score_summary(frame: &mut Frame, area: Rect, session: &QuizSession) {
    let score = session.score();
    let percentage = score.percentage();
    let grade_color = match percentage {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{}/{}  ·  {}%", score.correct, score.total, percentage),
            Style::default().fg(grade_color).bold(),
        )),
        Line::from(Span::styled(
            score.tier().message(),
            Style::default().fg(grade_color),
        )),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_review(frame: &mut Frame, area: Rect, session: &QuizSession, scroll: usize) {
    let mut lines: Vec<Line> = Vec::new();

    for (index, row) in session.review().iter().enumerate() {
        let answer_color = if row.is_correct {
            Color::Green
        } else {
            Color::Red
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("Q{}: ", index + 1),
                Style::default().fg(Color::White).bold(),
            ),
            Span::styled(row.question.to_string(), Style::default().fg(Color::White)),
        ]));
        lines.push(Line::from(Span::styled(
            format!("  Your answer: {}", row.your_answer.unwrap_or("(none)")),
            Style::default().fg(answer_color),
        )));
        if row.is_correct {
            lines.push(Line::from(Span::styled(
                "  Correct!",
                Style::default().fg(Color::Green),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                format!("  Correct answer: {}", row.correct_answer),
                Style::default().fg(Color::Green),
            )));
        }
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Review ")
                .title_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        )
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  r try again  ·  t topics  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
