//! Quiz screen: progress, question, choices, and the advance control.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::session::QuizSession;
use crate::state::{App, QuizPhase, Screen};

const CHOICE_LABELS: [char; 8] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Screen::Quiz { session, phase } = &app.screen else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(2), // Topic + progress
        Constraint::Length(5), // Question text
        Constraint::Min(6),    // Choices
        Constraint::Length(2), // Advance + controls
    ])
    .margin(1)
    .split(area);

    render_progress(frame, chunks[0], session);
    render_question_text(frame, chunks[1], &session.current_quiz().question);
    render_choices(frame, chunks[2], session, phase);
    render_advance(frame, chunks[3], session, phase);
}

fn render_progress(frame: &mut Frame, area: Rect, session: &QuizSession) {
    let text = format!(
        "{}  ·  Question {} of {}",
        session.topic.title,
        session.current_index() + 1,
        session.total_quizzes(),
    );
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan).bold());
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(widget, area);
}

fn render_choices(frame: &mut Frame, area: Rect, session: &QuizSession, phase: &QuizPhase) {
    let quiz = session.current_quiz();
    let correct = quiz.correct_index();
    let selected = session.current_answer();

    let lines: Vec<Line> = quiz
        .choices
        .iter()
        .enumerate()
        .map(|(index, choice)| {
            let label = CHOICE_LABELS.get(index).copied().unwrap_or('?');
            let (prefix, style) = match phase {
                QuizPhase::Answering { cursor } => answering_mark(index, *cursor, selected),
                QuizPhase::Revealing { .. } => reveal_mark(index, selected, correct),
            };
            Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(format!("{}) ", label), style),
                Span::styled(choice.clone(), style),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Choices ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn answering_mark(index: usize, cursor: usize, selected: Option<usize>) -> (&'static str, Style) {
    let is_cursor = index == cursor;
    let is_selected = selected == Some(index);

    let prefix = match (is_cursor, is_selected) {
        (true, true) => "> * ",
        (true, false) => ">   ",
        (false, true) => "  * ",
        (false, false) => "    ",
    };
    let style = if is_selected {
        Style::default().fg(Color::Yellow).bold()
    } else if is_cursor {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };
    (prefix, style)
}

fn reveal_mark(
    index: usize,
    selected: Option<usize>,
    correct: Option<usize>,
) -> (&'static str, Style) {
    if correct == Some(index) {
        ("  + ", Style::default().fg(Color::Green).bold())
    } else if selected == Some(index) {
        ("  - ", Style::default().fg(Color::Red).bold())
    } else {
        ("    ", Style::default().fg(Color::DarkGray))
    }
}

fn render_advance(frame: &mut Frame, area: Rect, session: &QuizSession, phase: &QuizPhase) {
    let label = if session.is_last_question() {
        "Finish Quiz"
    } else {
        "Next Question"
    };

    let line = match phase {
        QuizPhase::Answering { .. } if session.current_answer().is_some() => Line::from(vec![
            Span::styled("[Enter] ", Style::default().fg(Color::Green).bold()),
            Span::styled(label, Style::default().fg(Color::White)),
            Span::styled(
                "  ·  space select  ·  j/k move  ·  esc topics",
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        QuizPhase::Answering { .. } => Line::from(Span::styled(
            format!(
                "[Enter] {} (select a choice first)  ·  space select  ·  j/k move",
                label
            ),
            Style::default().fg(Color::DarkGray),
        )),
        QuizPhase::Revealing { .. } => Line::from(Span::styled(
            "Loading...",
            Style::default().fg(Color::Yellow),
        )),
    };

    let widget = Paragraph::new(line).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}
