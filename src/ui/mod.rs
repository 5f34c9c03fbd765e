//! Frame rendering: pure functions mapping application state to widgets.
//!
//! No event wiring lives here; input handling stays in the event loop.

mod name_entry;
mod quiz;
mod results;
mod topics;
mod upload;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph};

use crate::state::{App, NotificationKind, Screen};

pub const TITLE: &str = "QUIZ GYM";

/// Render the current screen, with the notification banner (when one is
/// active) overlaid on the top line.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    let (banner_area, body_area) = if app.notification.is_some() {
        let chunks = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).split(area);
        (Some(chunks[0]), chunks[1])
    } else {
        (None, area)
    };

    match &app.screen {
        Screen::Topics => topics::render(frame, body_area, app),
        Screen::NameEntry { .. } => name_entry::render(frame, body_area, app),
        Screen::Quiz { .. } => quiz::render(frame, body_area, app),
        Screen::Results { .. } => results::render(frame, body_area, app),
        Screen::Upload { .. } => upload::render(frame, body_area, app),
    }

    if let (Some(area), Some(notification)) = (banner_area, &app.notification) {
        render_banner(frame, area, &notification.text, notification.kind);
    }
}

fn render_banner(frame: &mut Frame, area: Rect, text: &str, kind: NotificationKind) {
    let (fg, bg) = match kind {
        NotificationKind::Success => (Color::Black, Color::Green),
        NotificationKind::Error => (Color::White, Color::Red),
        NotificationKind::Info => (Color::Black, Color::Cyan),
    };

    let widget = Paragraph::new(format!(" {} ", text))
        .alignment(Alignment::Center)
        .style(Style::default().fg(fg).bg(bg).bold());
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    use crate::models::{Quiz, Topic};
    use crate::session::QuizSession;

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                if let Some(cell) = buffer.cell(Position::new(x, y)) {
                    text.push_str(cell.symbol());
                }
            }
            text.push('\n');
        }
        text
    }

    fn topics() -> Vec<Topic> {
        serde_json::from_str(
            r#"[
                {"id": 1, "title": "Python Basics", "description": "Fundamentals"},
                {"id": 2, "title": "SQL Fundamentals"},
                {"id": 3, "title": "Rust Ownership"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_every_topic_gets_a_row() {
        let mut app = App::new();
        app.set_topics(topics());

        let screen = draw(&app);
        assert!(screen.contains("Python Basics"));
        assert!(screen.contains("SQL Fundamentals"));
        assert!(screen.contains("Rust Ownership"));
        assert!(screen.contains("Fundamentals"));
    }

    #[test]
    fn test_huge_review_scroll_does_not_wrap_around() {
        let quizzes: Vec<Quiz> = serde_json::from_str(
            r#"[{"id": 1, "question": "What is a tuple?",
                 "choices": ["A pair", "A list"], "correct_answer": "A pair"}]"#,
        )
        .unwrap();
        let session = QuizSession::new(topics().remove(0), quizzes, "Alice".to_string());

        let mut app = App::new();
        app.screen = Screen::Results {
            session,
            // One past u16::MAX: a truncating cast would wrap this to 0
            // and bring the review back into view.
            scroll: usize::from(u16::MAX) + 1,
        };

        let screen = draw(&app);
        assert!(!screen.contains("What is a tuple?"));
    }

    #[test]
    fn test_empty_catalog_shows_call_to_action() {
        let app = App::new();

        let screen = draw(&app);
        assert!(screen.contains("No topics available."));
        assert!(screen.contains("initialize sample data"));
    }
}
