//! Application state and screen transitions.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::api::ApiError;
use crate::models::{InitMessage, Quiz, Topic, UploadReport};
use crate::session::QuizSession;
use crate::upload::UploadForm;

/// How long the correct/incorrect reveal stays on screen before the quiz
/// advances.
pub const REVEAL_DELAY: Duration = Duration::from_secs(2);

/// How long a notification banner stays visible.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(5);

/// Phase within the current question.
#[derive(Debug, Clone, Copy)]
pub enum QuizPhase {
    /// Choices are interactive; `cursor` is the highlighted choice.
    Answering { cursor: usize },
    /// Marks revealed, interaction frozen. The pending advance fires when
    /// `advance_at` elapses; dropping the screen drops the deadline with
    /// it, so nothing fires into a torn-down view.
    Revealing { advance_at: Instant },
}

/// Current screen of the client.
pub enum Screen {
    /// Topic catalog.
    Topics,

    /// Name prompt before a session starts. `loading` blocks re-entry
    /// while the quiz list fetch is in flight.
    NameEntry {
        topic: Topic,
        input: String,
        error: Option<String>,
        loading: bool,
    },

    /// Answering quiz questions.
    Quiz {
        session: QuizSession,
        phase: QuizPhase,
    },

    /// Score and review after the last question.
    Results { session: QuizSession, scroll: usize },

    /// Bulk-upload screen.
    Upload { form: UploadForm },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// Transient status banner. Not queued: a new one replaces the current.
pub struct Notification {
    pub text: String,
    pub kind: NotificationKind,
    expires_at: Instant,
}

/// Completion of a spawned backend call, delivered to the event loop.
pub enum NetEvent {
    TopicsLoaded(Result<Vec<Topic>, ApiError>),
    InitFinished(Result<InitMessage, ApiError>),
    QuizzesLoaded {
        topic_id: i64,
        name: String,
        result: Result<Vec<Quiz>, ApiError>,
    },
    TemplateSaved(Result<PathBuf, ApiError>),
    UploadFinished(Result<UploadReport, ApiError>),
}

/// Top-level application state, owned by the event loop.
pub struct App {
    pub screen: Screen,
    pub topics: Vec<Topic>,
    pub topic_cursor: usize,
    pub notification: Option<Notification>,
    pub init_in_flight: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            screen: Screen::Topics,
            topics: Vec::new(),
            topic_cursor: 0,
            notification: None,
            init_in_flight: false,
            should_quit: false,
        }
    }

    // --- notifications ---

    pub fn notify(&mut self, kind: NotificationKind, text: impl Into<String>, now: Instant) {
        self.notification = Some(Notification {
            text: text.into(),
            kind,
            expires_at: now + NOTIFICATION_TTL,
        });
    }

    /// Periodic housekeeping: expire the banner and fire a due advance.
    pub fn tick(&mut self, now: Instant) {
        if let Some(notification) = &self.notification {
            if now >= notification.expires_at {
                self.notification = None;
            }
        }

        if let Screen::Quiz {
            phase: QuizPhase::Revealing { advance_at },
            ..
        } = &self.screen
        {
            if now >= *advance_at {
                self.complete_reveal();
            }
        }
    }

    // --- topic catalog ---

    pub fn set_topics(&mut self, topics: Vec<Topic>) {
        self.topics = topics;
        if self.topic_cursor >= self.topics.len() {
            self.topic_cursor = self.topics.len().saturating_sub(1);
        }
    }

    pub fn topic_cursor_down(&mut self) {
        if !self.topics.is_empty() {
            self.topic_cursor = (self.topic_cursor + 1).min(self.topics.len() - 1);
        }
    }

    pub fn topic_cursor_up(&mut self) {
        self.topic_cursor = self.topic_cursor.saturating_sub(1);
    }

    pub fn topic_under_cursor(&self) -> Option<&Topic> {
        self.topics.get(self.topic_cursor)
    }

    // --- session initiation ---

    /// Open the name prompt for a topic.
    pub fn open_name_entry(&mut self, topic: Topic) {
        self.screen = Screen::NameEntry {
            topic,
            input: String::new(),
            error: None,
            loading: false,
        };
    }

    pub fn name_input_push(&mut self, c: char) {
        if let Screen::NameEntry {
            input,
            error,
            loading: false,
            ..
        } = &mut self.screen
        {
            *error = None;
            input.push(c);
        }
    }

    pub fn name_input_pop(&mut self) {
        if let Screen::NameEntry {
            input,
            error,
            loading: false,
            ..
        } = &mut self.screen
        {
            *error = None;
            input.pop();
        }
    }

    /// Validate the entered name and lock the prompt while the quiz list
    /// loads. Returns the topic id and trimmed name to fetch with, or
    /// `None` when the input was empty (the prompt stays up with an
    /// inline error) or a fetch is already in flight.
    pub fn confirm_name(&mut self) -> Option<(i64, String)> {
        if let Screen::NameEntry {
            topic,
            input,
            error,
            loading,
        } = &mut self.screen
        {
            if *loading {
                return None;
            }
            let name = input.trim().to_string();
            if name.is_empty() {
                *error = Some("Please enter your name".to_string());
                return None;
            }
            *loading = true;
            return Some((topic.id, name));
        }
        None
    }

    /// Apply a finished quiz-list fetch. Ignored unless the name prompt
    /// for the same topic is still waiting on it.
    pub fn quizzes_loaded(&mut self, topic_id: i64, quizzes: Vec<Quiz>, name: String) {
        let matches_wait = matches!(
            &self.screen,
            Screen::NameEntry { topic, loading: true, .. } if topic.id == topic_id
        );
        if !matches_wait {
            return;
        }

        let screen = std::mem::replace(&mut self.screen, Screen::Topics);
        let Screen::NameEntry { topic, .. } = screen else {
            unreachable!()
        };
        self.screen = Screen::Quiz {
            session: QuizSession::new(topic, quizzes, name),
            phase: QuizPhase::Answering { cursor: 0 },
        };
    }

    /// The quiz-list fetch came back empty or failed; no session starts.
    pub fn abort_name_entry(&mut self) {
        if matches!(self.screen, Screen::NameEntry { .. }) {
            self.screen = Screen::Topics;
        }
    }

    // --- quiz runner ---

    pub fn choice_cursor_down(&mut self) {
        if let Screen::Quiz {
            session,
            phase: QuizPhase::Answering { cursor },
        } = &mut self.screen
        {
            let count = session.current_quiz().choices.len();
            if count > 0 {
                *cursor = (*cursor + 1) % count;
            }
        }
    }

    pub fn choice_cursor_up(&mut self) {
        if let Screen::Quiz {
            session,
            phase: QuizPhase::Answering { cursor },
        } = &mut self.screen
        {
            let count = session.current_quiz().choices.len();
            if count > 0 {
                *cursor = (*cursor + count - 1) % count;
            }
        }
    }

    /// Mark the highlighted choice as the answer for the current
    /// question, replacing any previous mark.
    pub fn select_choice(&mut self) {
        if let Screen::Quiz {
            session,
            phase: QuizPhase::Answering { cursor },
        } = &mut self.screen
        {
            let cursor = *cursor;
            session.record_answer(cursor);
        }
    }

    /// Advance is inert until a choice has been selected for the current
    /// question.
    pub fn can_advance(&self) -> bool {
        matches!(
            &self.screen,
            Screen::Quiz {
                session,
                phase: QuizPhase::Answering { .. },
            } if session.current_answer().is_some()
        )
    }

    /// Freeze the question and show the correct/incorrect marks; the
    /// actual advance fires from `tick` once the delay elapses.
    pub fn begin_reveal(&mut self, now: Instant) {
        if let Screen::Quiz { phase, .. } = &mut self.screen {
            *phase = QuizPhase::Revealing {
                advance_at: now + REVEAL_DELAY,
            };
        }
    }

    fn complete_reveal(&mut self) {
        let screen = std::mem::replace(&mut self.screen, Screen::Topics);
        match screen {
            Screen::Quiz { mut session, .. } => {
                if session.advance() {
                    self.screen = Screen::Quiz {
                        session,
                        phase: QuizPhase::Answering { cursor: 0 },
                    };
                } else {
                    self.screen = Screen::Results { session, scroll: 0 };
                }
            }
            other => self.screen = other,
        }
    }

    // --- results ---

    pub fn results_scroll_down(&mut self) {
        if let Screen::Results { session, scroll } = &mut self.screen {
            let max_scroll = session.total_quizzes().saturating_sub(1) * 4;
            *scroll = (*scroll + 1).min(max_scroll);
        }
    }

    pub fn results_scroll_up(&mut self) {
        if let Screen::Results { scroll, .. } = &mut self.screen {
            *scroll = scroll.saturating_sub(1);
        }
    }

    /// "Try again": back to the name prompt for the same topic. The name
    /// is deliberately not carried over; the quiz list is refetched on
    /// confirmation.
    pub fn restart_quiz(&mut self) {
        let screen = std::mem::replace(&mut self.screen, Screen::Topics);
        if let Screen::Results { session, .. } = screen {
            self.open_name_entry(session.topic);
        } else {
            self.screen = screen;
        }
    }

    // --- navigation ---

    /// Return to the topic catalog, discarding the current screen. This
    /// also cancels a pending reveal advance, since the deadline lives in
    /// the screen being dropped.
    pub fn back_to_topics(&mut self) {
        self.screen = Screen::Topics;
    }

    pub fn enter_upload(&mut self, form: UploadForm) {
        self.screen = Screen::Upload { form };
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic(id: i64, title: &str) -> Topic {
        serde_json::from_str(&format!(r#"{{"id": {}, "title": "{}"}}"#, id, title)).unwrap()
    }

    fn quizzes() -> Vec<Quiz> {
        serde_json::from_str(
            r#"[
                {"id": 1, "question": "Q1", "choices": ["A", "B"], "correct_answer": "A"},
                {"id": 2, "question": "Q2", "choices": ["B", "C"], "correct_answer": "B"}
            ]"#,
        )
        .unwrap()
    }

    fn app_in_quiz() -> App {
        let mut app = App::new();
        app.open_name_entry(topic(1, "Python Basics"));
        app.name_input_push('J');
        app.name_input_push('o');
        let (topic_id, name) = app.confirm_name().unwrap();
        app.quizzes_loaded(topic_id, quizzes(), name);
        app
    }

    #[test]
    fn test_empty_name_keeps_prompt_with_error() {
        let mut app = App::new();
        app.open_name_entry(topic(1, "Python Basics"));
        app.name_input_push(' ');
        assert!(app.confirm_name().is_none());
        assert!(matches!(
            &app.screen,
            Screen::NameEntry { error: Some(_), loading: false, .. }
        ));
    }

    #[test]
    fn test_confirm_locks_prompt_until_load() {
        let mut app = App::new();
        app.open_name_entry(topic(1, "Python Basics"));
        app.name_input_push('A');
        assert!(app.confirm_name().is_some());
        // Second confirm while loading is a no-op.
        assert!(app.confirm_name().is_none());
    }

    #[test]
    fn test_stale_quiz_load_is_ignored() {
        let mut app = App::new();
        app.open_name_entry(topic(1, "Python Basics"));
        app.name_input_push('A');
        app.confirm_name().unwrap();
        app.back_to_topics();
        app.quizzes_loaded(1, quizzes(), "A".to_string());
        assert!(matches!(app.screen, Screen::Topics));
    }

    #[test]
    fn test_advance_inert_until_selection() {
        let mut app = app_in_quiz();
        assert!(!app.can_advance());
        app.select_choice();
        assert!(app.can_advance());
    }

    #[test]
    fn test_selecting_again_replaces_mark() {
        let mut app = app_in_quiz();
        app.select_choice(); // choice 0
        app.choice_cursor_down();
        app.select_choice(); // choice 1 replaces it
        let Screen::Quiz { session, .. } = &app.screen else {
            panic!("expected quiz screen");
        };
        assert_eq!(session.current_answer(), Some(1));
    }

    #[test]
    fn test_reveal_advances_after_delay() {
        let mut app = app_in_quiz();
        let start = Instant::now();
        app.select_choice();
        app.begin_reveal(start);

        // Not yet due.
        app.tick(start + Duration::from_millis(500));
        assert!(matches!(
            &app.screen,
            Screen::Quiz { phase: QuizPhase::Revealing { .. }, .. }
        ));

        app.tick(start + REVEAL_DELAY);
        let Screen::Quiz { session, phase } = &app.screen else {
            panic!("expected quiz screen");
        };
        assert_eq!(session.current_index(), 1);
        assert!(matches!(phase, QuizPhase::Answering { cursor: 0 }));
    }

    #[test]
    fn test_last_question_reveal_finishes() {
        let mut app = app_in_quiz();
        let start = Instant::now();
        app.select_choice();
        app.begin_reveal(start);
        app.tick(start + REVEAL_DELAY);

        app.select_choice();
        app.begin_reveal(start + REVEAL_DELAY);
        app.tick(start + REVEAL_DELAY * 2);
        assert!(matches!(app.screen, Screen::Results { .. }));
    }

    #[test]
    fn test_leaving_quiz_cancels_pending_advance() {
        let mut app = app_in_quiz();
        let start = Instant::now();
        app.select_choice();
        app.begin_reveal(start);
        app.back_to_topics();

        // The deadline was dropped with the screen; nothing fires.
        app.tick(start + REVEAL_DELAY * 2);
        assert!(matches!(app.screen, Screen::Topics));
    }

    #[test]
    fn test_restart_reprompts_and_resets() {
        let mut app = app_in_quiz();
        let start = Instant::now();
        for _ in 0..2 {
            app.select_choice();
            app.begin_reveal(start);
            app.tick(start + REVEAL_DELAY);
        }
        assert!(matches!(app.screen, Screen::Results { .. }));

        app.restart_quiz();
        assert!(matches!(
            &app.screen,
            Screen::NameEntry { topic, input, loading: false, .. }
                if topic.id == 1 && input.is_empty()
        ));

        // Fresh session after the re-prompt: index 0, no answers.
        app.name_input_push('B');
        let (topic_id, name) = app.confirm_name().unwrap();
        app.quizzes_loaded(topic_id, quizzes(), name);
        let Screen::Quiz { session, .. } = &app.screen else {
            panic!("expected quiz screen");
        };
        assert_eq!(session.current_index(), 0);
        assert!(session.answers().iter().all(Option::is_none));
    }

    #[test]
    fn test_notification_replaces_and_expires() {
        let mut app = App::new();
        let now = Instant::now();
        app.notify(NotificationKind::Error, "first", now);
        app.notify(NotificationKind::Success, "second", now);
        assert_eq!(app.notification.as_ref().unwrap().text, "second");

        app.tick(now + NOTIFICATION_TTL);
        assert!(app.notification.is_none());
    }

    #[test]
    fn test_set_topics_clamps_cursor() {
        let mut app = App::new();
        app.set_topics(vec![topic(1, "A"), topic(2, "B"), topic(3, "C")]);
        app.topic_cursor_down();
        app.topic_cursor_down();
        assert_eq!(app.topic_cursor, 2);

        app.set_topics(vec![topic(1, "A")]);
        assert_eq!(app.topic_cursor, 0);
    }
}
