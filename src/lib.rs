//! # quizgym
//!
//! Terminal client for the quiz-gym backend: browse topics, take quizzes,
//! review scores, and bulk-upload quiz content from Excel spreadsheets.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quizgym::api::ApiClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), quizgym::GymError> {
//!     let api = ApiClient::new("http://127.0.0.1:8000");
//!     quizgym::run(api).await
//! }
//! ```

pub mod api;
mod app;
pub mod models;
mod session;
mod state;
pub mod terminal;
mod ui;
mod upload;

use std::io;

pub use app::run;
pub use session::{QuizSession, ReviewRow, ScoreSummary, ScoreTier};
pub use state::{App, NotificationKind, QuizPhase, Screen};
pub use upload::{UploadForm, UploadPane, UploadPhase};

/// Error type for running the client.
#[derive(Debug)]
pub enum GymError {
    /// IO error from the terminal layer.
    Io(io::Error),
}

impl std::fmt::Display for GymError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GymError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for GymError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GymError::Io(e) => Some(e),
        }
    }
}

impl From<io::Error> for GymError {
    fn from(err: io::Error) -> Self {
        GymError::Io(err)
    }
}
