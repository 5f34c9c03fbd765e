//! Bulk-upload screen: file pane, topic pane, progress, and the report.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Gauge, Padding, Paragraph};

use crate::state::{App, Screen};
use crate::upload::{UploadForm, UploadPane, UploadPhase};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Screen::Upload { form } = &app.screen else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(2),  // Header
        Constraint::Length(10), // Panes
        Constraint::Min(6),     // Progress / report
        Constraint::Length(2),  // Controls
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0]);

    let panes = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    render_file_pane(frame, panes[0], form);
    render_topic_pane(frame, panes[1], app, form);

    render_outcome(frame, chunks[2], form);
    render_controls(frame, chunks[3], form);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("Upload Quizzes from Excel")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan).bold());
    frame.render_widget(widget, area);
}

fn render_file_pane(frame: &mut Frame, area: Rect, form: &UploadForm) {
    let focused = form.focus == UploadPane::Files;

    let lines: Vec<Line> = if form.files().is_empty() {
        vec![Line::from(Span::styled(
            "No .xlsx/.xls files in the working directory",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        form.files()
            .iter()
            .enumerate()
            .map(|(index, path)| {
                let name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                let is_cursor = focused && index == form.file_cursor;
                let is_selected = form.selected_file_index() == Some(index);
                list_line(name, is_cursor, is_selected)
            })
            .collect()
    };

    let widget = Paragraph::new(lines).block(pane_block(" File ", focused));
    frame.render_widget(widget, area);
}

fn render_topic_pane(frame: &mut Frame, area: Rect, app: &App, form: &UploadForm) {
    let focused = form.focus == UploadPane::Topics;

    let lines: Vec<Line> = if app.topics.is_empty() {
        vec![Line::from(Span::styled(
            "No topics loaded",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        app.topics
            .iter()
            .enumerate()
            .map(|(index, topic)| {
                let is_cursor = focused && index == form.topic_cursor;
                let is_selected = form.selected_topic_id() == Some(topic.id);
                list_line(topic.title.clone(), is_cursor, is_selected)
            })
            .collect()
    };

    let widget = Paragraph::new(lines).block(pane_block(" Topic ", focused));
    frame.render_widget(widget, area);
}

fn pane_block(title: &str, focused: bool) -> Block<'_> {
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(title.to_string())
        .title_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1))
}

fn list_line(text: String, is_cursor: bool, is_selected: bool) -> Line<'static> {
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
    Line::from(vec![Span::styled(prefix, style), Span::styled(text, style)])
}

fn render_outcome(frame: &mut Frame, area: Rect, form: &UploadForm) {
    match &form.phase {
        UploadPhase::Idle => {}
        UploadPhase::Uploading => {
            let chunks =
                Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(area);
            let label = Paragraph::new("Uploading...").fg(Color::Yellow);
            frame.render_widget(label, chunks[0]);
            let gauge = Gauge::default()
                .gauge_style(Style::default().fg(Color::Cyan))
                .ratio(0.5);
            frame.render_widget(gauge, chunks[1]);
        }
        UploadPhase::Done(report) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    "Upload Results",
                    Style::default().fg(Color::Cyan).bold(),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    report.message.clone(),
                    Style::default().fg(Color::White).bold(),
                )),
                Line::from(Span::styled(
                    format!("Created: {} quizzes", report.created_count),
                    Style::default().fg(Color::White),
                )),
            ];
            if !report.errors.is_empty() {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "Errors encountered:",
                    Style::default().fg(Color::Red).bold(),
                )));
                for error in &report.errors {
                    lines.push(Line::from(Span::styled(
                        format!("  - {}", error),
                        Style::default().fg(Color::Red),
                    )));
                }
            }
            let widget = Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .padding(Padding::horizontal(1)),
            );
            frame.render_widget(widget, area);
        }
        UploadPhase::Failed(detail) => {
            let lines = vec![
                Line::from(Span::styled(
                    "Upload Failed",
                    Style::default().fg(Color::Red).bold(),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    format!("Error: {}", detail),
                    Style::default().fg(Color::Red),
                )),
            ];
            let widget = Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .padding(Padding::horizontal(1)),
            );
            frame.render_widget(widget, area);
        }
    }
}

fn render_controls(frame: &mut Frame, area: Rect, form: &UploadForm) {
    let submit = if form.can_submit() {
        Span::styled("s upload", Style::default().fg(Color::Green).bold())
    } else if matches!(form.phase, UploadPhase::Uploading) {
        Span::styled("uploading...", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(
            "s upload (pick a file and a topic)",
            Style::default().fg(Color::DarkGray),
        )
    };

    let line = Line::from(vec![
        submit,
        Span::styled(
            "  ·  tab pane  ·  enter pick  ·  d template  ·  r rescan  ·  esc back",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    let widget = Paragraph::new(line).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}
