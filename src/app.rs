//! Event loop: drain network completions, tick deadlines, draw, poll keys.
//!
//! All state lives on this task. Backend calls run as spawned tokio tasks
//! that report back over an unbounded channel, so nothing here ever blocks
//! on the network.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tokio::sync::mpsc;

use crate::GymError;
use crate::api::ApiClient;
use crate::models::Submission;
use crate::state::{App, NetEvent, NotificationKind, QuizPhase, Screen};
use crate::terminal;
use crate::ui;
use crate::upload::{UploadForm, UploadPane, UploadPhase};

type NetSender = mpsc::UnboundedSender<NetEvent>;

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Run the client until the user quits.
pub async fn run(api: ApiClient) -> Result<(), GymError> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new();

    spawn_load_topics(&api, &tx);

    let mut term = terminal::init()?;
    let result = run_loop(&mut term, &mut app, &api, &tx, &mut rx);
    terminal::restore()?;
    result
}

fn run_loop(
    term: &mut terminal::AppTerminal,
    app: &mut App,
    api: &ApiClient,
    tx: &NetSender,
    rx: &mut mpsc::UnboundedReceiver<NetEvent>,
) -> Result<(), GymError> {
    loop {
        let now = Instant::now();

        while let Ok(net_event) = rx.try_recv() {
            handle_net_event(app, api, tx, net_event, now);
        }
        app.tick(now);

        term.draw(|frame| ui::render(frame, app))?;

        if event::poll(INPUT_POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                handle_input(app, api, tx, key.code);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

// --- network completions ---

fn handle_net_event(app: &mut App, api: &ApiClient, tx: &NetSender, event: NetEvent, now: Instant) {
    match event {
        NetEvent::TopicsLoaded(Ok(topics)) => {
            app.set_topics(topics);
        }
        NetEvent::TopicsLoaded(Err(e)) => {
            // Deliberately log-only: the prior list stays on screen.
            tracing::error!("Failed to load topics: {}", e);
        }

        NetEvent::InitFinished(result) => {
            app.init_in_flight = false;
            match result {
                Ok(init) => {
                    app.notify(NotificationKind::Success, init.message, now);
                    spawn_load_topics(api, tx);
                }
                Err(e) => {
                    tracing::error!("Sample data initialization failed: {}", e);
                    app.notify(
                        NotificationKind::Error,
                        "Failed to initialize sample data",
                        now,
                    );
                }
            }
        }

        NetEvent::QuizzesLoaded {
            topic_id,
            name,
            result,
        } => match result {
            Ok(quizzes) if quizzes.is_empty() => {
                app.notify(
                    NotificationKind::Error,
                    "No quizzes available for this topic yet.",
                    now,
                );
                app.abort_name_entry();
            }
            Ok(quizzes) => {
                app.quizzes_loaded(topic_id, quizzes, name);
            }
            Err(e) => {
                tracing::error!("Failed to load quizzes for topic {}: {}", topic_id, e);
                app.notify(NotificationKind::Error, "Failed to load quizzes", now);
                app.abort_name_entry();
            }
        },

        NetEvent::TemplateSaved(Ok(path)) => {
            app.notify(
                NotificationKind::Success,
                format!("Template saved to {}", path.display()),
                now,
            );
        }
        NetEvent::TemplateSaved(Err(e)) => {
            tracing::error!("Failed to download template: {}", e);
            app.notify(NotificationKind::Error, "Failed to download template", now);
        }

        // The outcome is surfaced even when the user has already left the
        // upload screen; only the form-phase update needs the screen.
        NetEvent::UploadFinished(Ok(report)) => {
            let banner = if report.success {
                (NotificationKind::Success, report.message.clone())
            } else {
                (
                    NotificationKind::Error,
                    "Upload completed with errors".to_string(),
                )
            };
            if let Screen::Upload { form } = &mut app.screen {
                form.finish_upload(UploadPhase::Done(report));
            }
            app.notify(banner.0, banner.1, now);
            spawn_load_topics(api, tx);
        }
        NetEvent::UploadFinished(Err(e)) => {
            tracing::error!("Upload failed: {}", e);
            let detail = e.to_string();
            if let Screen::Upload { form } = &mut app.screen {
                form.finish_upload(UploadPhase::Failed(detail.clone()));
            }
            app.notify(
                NotificationKind::Error,
                format!("Upload failed: {}", detail),
                now,
            );
        }
    }
}

// --- keyboard input ---

fn handle_input(app: &mut App, api: &ApiClient, tx: &NetSender, key: KeyCode) {
    match &app.screen {
        Screen::Topics => handle_topics_input(app, api, tx, key),
        Screen::NameEntry { .. } => handle_name_entry_input(app, api, tx, key),
        Screen::Quiz { .. } => handle_quiz_input(app, api, key),
        Screen::Results { .. } => handle_results_input(app, key),
        Screen::Upload { .. } => handle_upload_input(app, api, tx, key),
    }
}

fn handle_topics_input(app: &mut App, api: &ApiClient, tx: &NetSender, key: KeyCode) {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.topic_cursor_down(),
        KeyCode::Up | KeyCode::Char('k') => app.topic_cursor_up(),
        KeyCode::Enter => {
            if let Some(topic) = app.topic_under_cursor() {
                app.open_name_entry(topic.clone());
            }
        }
        KeyCode::Char('i') | KeyCode::Char('I') => {
            if !app.init_in_flight {
                app.init_in_flight = true;
                spawn_init_data(api, tx);
            }
        }
        KeyCode::Char('u') | KeyCode::Char('U') => {
            app.enter_upload(UploadForm::new(&working_dir()));
        }
        KeyCode::Char('r') | KeyCode::Char('R') => spawn_load_topics(api, tx),
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        _ => {}
    }
}

fn handle_name_entry_input(app: &mut App, api: &ApiClient, tx: &NetSender, key: KeyCode) {
    match key {
        KeyCode::Enter => {
            if let Some((topic_id, name)) = app.confirm_name() {
                spawn_load_quizzes(api, tx, topic_id, name);
            }
        }
        KeyCode::Backspace => app.name_input_pop(),
        KeyCode::Esc => app.back_to_topics(),
        KeyCode::Char(c) => app.name_input_push(c),
        _ => {}
    }
}

fn handle_quiz_input(app: &mut App, api: &ApiClient, key: KeyCode) {
    let revealing = matches!(
        &app.screen,
        Screen::Quiz {
            phase: QuizPhase::Revealing { .. },
            ..
        }
    );
    if revealing {
        // Question is frozen; only escape routes remain.
        match key {
            KeyCode::Esc | KeyCode::Char('t') | KeyCode::Char('T') => app.back_to_topics(),
            KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
            _ => {}
        }
        return;
    }

    match key {
        KeyCode::Down | KeyCode::Char('j') => app.choice_cursor_down(),
        KeyCode::Up | KeyCode::Char('k') => app.choice_cursor_up(),
        KeyCode::Char(' ') => app.select_choice(),
        KeyCode::Enter => {
            if app.can_advance() {
                submit_current_answer(app, api);
                app.begin_reveal(Instant::now());
            }
        }
        KeyCode::Esc | KeyCode::Char('t') | KeyCode::Char('T') => app.back_to_topics(),
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        _ => {}
    }
}

fn handle_results_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.results_scroll_down(),
        KeyCode::Up | KeyCode::Char('k') => app.results_scroll_up(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.restart_quiz(),
        KeyCode::Esc | KeyCode::Char('t') | KeyCode::Char('T') => app.back_to_topics(),
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        _ => {}
    }
}

fn handle_upload_input(app: &mut App, api: &ApiClient, tx: &NetSender, key: KeyCode) {
    let topic_count = app.topics.len();
    let topic_id_under_cursor = {
        let Screen::Upload { form } = &app.screen else {
            return;
        };
        app.topics.get(form.topic_cursor).map(|topic| topic.id)
    };

    let Screen::Upload { form } = &mut app.screen else {
        return;
    };

    match key {
        KeyCode::Tab => form.toggle_focus(),
        KeyCode::Down | KeyCode::Char('j') => form.move_cursor_down(topic_count),
        KeyCode::Up | KeyCode::Char('k') => form.move_cursor_up(),
        KeyCode::Enter | KeyCode::Char(' ') => match form.focus {
            UploadPane::Files => form.toggle_file_selection(),
            UploadPane::Topics => {
                if let Some(topic_id) = topic_id_under_cursor {
                    form.toggle_topic_selection(topic_id);
                }
            }
        },
        KeyCode::Char('s') | KeyCode::Char('S') => {
            if form.can_submit() {
                if let (Some(file), Some(topic_id)) =
                    (form.selected_file(), form.selected_topic_id())
                {
                    let file = file.to_path_buf();
                    form.begin_upload();
                    spawn_upload(api, tx, file, topic_id);
                }
            }
        }
        KeyCode::Char('d') | KeyCode::Char('D') => spawn_download_template(api, tx),
        KeyCode::Char('r') | KeyCode::Char('R') => form.refresh_files(&working_dir()),
        KeyCode::Esc => app.back_to_topics(),
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        _ => {}
    }
}

/// Fire-and-forget answer submission; a failure is logged and never
/// blocks the reveal or the advance.
fn submit_current_answer(app: &App, api: &ApiClient) {
    let Screen::Quiz { session, .. } = &app.screen else {
        return;
    };
    let Some(selected) = session.current_answer_text() else {
        return;
    };
    let submission = Submission {
        user_name: session.player().to_string(),
        selected: selected.to_string(),
        quiz_id: session.current_quiz().id,
    };
    let api = api.clone();
    tokio::spawn(async move {
        if let Err(e) = api.submit_answer(&submission).await {
            tracing::warn!(
                "Failed to submit answer for quiz {}: {}",
                submission.quiz_id,
                e
            );
        }
    });
}

// --- spawned backend calls ---

fn spawn_load_topics(api: &ApiClient, tx: &NetSender) {
    let api = api.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let _ = tx.send(NetEvent::TopicsLoaded(api.topics().await));
    });
}

fn spawn_init_data(api: &ApiClient, tx: &NetSender) {
    let api = api.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let _ = tx.send(NetEvent::InitFinished(api.init_sample_data().await));
    });
}

fn spawn_load_quizzes(api: &ApiClient, tx: &NetSender, topic_id: i64, name: String) {
    let api = api.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = api.quizzes_for_topic(topic_id).await;
        let _ = tx.send(NetEvent::QuizzesLoaded {
            topic_id,
            name,
            result,
        });
    });
}

fn spawn_download_template(api: &ApiClient, tx: &NetSender) {
    let api = api.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let _ = tx.send(NetEvent::TemplateSaved(
            api.download_template(&working_dir()).await,
        ));
    });
}

fn spawn_upload(api: &ApiClient, tx: &NetSender, file: PathBuf, topic_id: i64) {
    let api = api.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let _ = tx.send(NetEvent::UploadFinished(
            api.upload_quizzes(&file, topic_id).await,
        ));
    });
}

fn working_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Quiz, Topic, UploadReport};
    use crate::state::NetEvent;

    fn api() -> ApiClient {
        ApiClient::new("http://127.0.0.1:1")
    }

    fn topic() -> Topic {
        serde_json::from_str(r#"{"id": 1, "title": "Python Basics"}"#).unwrap()
    }

    fn quizzes() -> Vec<Quiz> {
        serde_json::from_str(
            r#"[{"id": 1, "question": "Q1", "choices": ["A", "B"], "correct_answer": "A"}]"#,
        )
        .unwrap()
    }

    fn app_in_quiz() -> App {
        let mut app = App::new();
        app.open_name_entry(topic());
        app.name_input_push('A');
        let (topic_id, name) = app.confirm_name().unwrap();
        app.quizzes_loaded(topic_id, quizzes(), name);
        app
    }

    #[tokio::test]
    async fn test_upload_outcome_survives_leaving_the_screen() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = App::new();
        // Upload in flight, user already went back to the catalog.
        app.back_to_topics();

        let report: UploadReport = serde_json::from_str(
            r#"{"success": true, "message": "Successfully created 2 quizzes", "created_count": 2}"#,
        )
        .unwrap();
        handle_net_event(
            &mut app,
            &api(),
            &tx,
            NetEvent::UploadFinished(Ok(report)),
            Instant::now(),
        );

        let banner = app.notification.as_ref().expect("banner should be shown");
        assert_eq!(banner.text, "Successfully created 2 quizzes");
        // The topic refresh was still kicked off.
        assert!(matches!(rx.recv().await, Some(NetEvent::TopicsLoaded(_))));
    }

    #[tokio::test]
    async fn test_failed_upload_notifies_after_leaving_the_screen() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = App::new();

        handle_net_event(
            &mut app,
            &api(),
            &tx,
            NetEvent::UploadFinished(Err(crate::api::ApiError::Status {
                status: 400,
                detail: Some("File must be an Excel file (.xlsx or .xls)".to_string()),
            })),
            Instant::now(),
        );

        let banner = app.notification.as_ref().expect("banner should be shown");
        assert!(banner.text.contains("File must be an Excel file"));
    }

    #[test]
    fn test_quit_works_during_reveal() {
        let mut app = app_in_quiz();
        app.select_choice();
        app.begin_reveal(Instant::now());

        handle_quiz_input(&mut app, &api(), KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
