use serde::{Deserialize, Serialize};

/// A single multiple-choice question with one correct answer.
#[derive(Debug, Clone, Deserialize)]
pub struct Quiz {
    pub id: i64,
    pub question: String,
    pub choices: Vec<String>,
    pub correct_answer: String,
}

impl Quiz {
    /// Index of the correct answer within `choices`.
    ///
    /// Matching happens by index from here on, never by comparing
    /// rendered text again. `None` means the backend sent a correct
    /// answer that is not among the choices; such a question can only
    /// be scored as wrong.
    pub fn correct_index(&self) -> Option<usize> {
        self.choices.iter().position(|c| c == &self.correct_answer)
    }
}

/// One recorded answer, posted to the backend as it is captured.
#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    pub user_name: String,
    pub selected: String,
    pub quiz_id: i64,
}
