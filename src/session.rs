//! One user's attempt at one topic's quiz set.

use crate::models::{Quiz, Topic};

/// Client-side state of a single quiz attempt.
///
/// Owns the quiz list, the monotonically increasing question index, the
/// player's display name, and the answers recorded so far. `answers` is
/// kept parallel to `quizzes`: position `i` answers question `i`, and an
/// entry is only ever written while question `i` is the current one.
pub struct QuizSession {
    pub topic: Topic,
    quizzes: Vec<Quiz>,
    current_index: usize,
    player: String,
    answers: Vec<Option<usize>>,
}

/// Final tally for a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreSummary {
    pub correct: usize,
    pub total: usize,
}

/// Encouragement tier derived from the percentage score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    Exemplary,
    Strong,
    Moderate,
    Retry,
}

/// One line of the post-quiz review.
pub struct ReviewRow<'a> {
    pub question: &'a str,
    pub your_answer: Option<&'a str>,
    pub correct_answer: &'a str,
    pub is_correct: bool,
}

impl QuizSession {
    /// Start a fresh session. Callers guarantee a non-empty quiz list and
    /// a non-empty trimmed player name.
    pub fn new(topic: Topic, quizzes: Vec<Quiz>, player: String) -> Self {
        let count = quizzes.len();
        Self {
            topic,
            quizzes,
            current_index: 0,
            player,
            answers: vec![None; count],
        }
    }

    pub fn player(&self) -> &str {
        &self.player
    }

    pub fn current_quiz(&self) -> &Quiz {
        &self.quizzes[self.current_index]
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total_quizzes(&self) -> usize {
        self.quizzes.len()
    }

    pub fn quizzes(&self) -> &[Quiz] {
        &self.quizzes
    }

    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 == self.quizzes.len()
    }

    /// Record a choice for the current question, replacing any previous
    /// selection. Out-of-range indices are ignored.
    pub fn record_answer(&mut self, choice_index: usize) {
        if choice_index < self.current_quiz().choices.len() {
            self.answers[self.current_index] = Some(choice_index);
        }
    }

    /// The recorded choice index for the current question, if any.
    pub fn current_answer(&self) -> Option<usize> {
        self.answers[self.current_index]
    }

    /// The recorded choice text for the current question, as sent to the
    /// submission endpoint.
    pub fn current_answer_text(&self) -> Option<&str> {
        let index = self.current_answer()?;
        self.current_quiz().choices.get(index).map(String::as_str)
    }

    /// Move to the next question. Returns `false` when the session is
    /// finished instead.
    pub fn advance(&mut self) -> bool {
        if self.is_last_question() {
            false
        } else {
            self.current_index += 1;
            true
        }
    }

    pub fn score(&self) -> ScoreSummary {
        let correct = self
            .answers
            .iter()
            .zip(self.quizzes.iter())
            .filter(|(answer, quiz)| answer.is_some() && **answer == quiz.correct_index())
            .count();
        ScoreSummary {
            correct,
            total: self.quizzes.len(),
        }
    }

    pub fn review(&self) -> Vec<ReviewRow<'_>> {
        self.answers
            .iter()
            .zip(self.quizzes.iter())
            .map(|(answer, quiz)| ReviewRow {
                question: &quiz.question,
                your_answer: answer
                    .and_then(|index| quiz.choices.get(index))
                    .map(String::as_str),
                correct_answer: &quiz.correct_answer,
                is_correct: answer.is_some() && *answer == quiz.correct_index(),
            })
            .collect()
    }
}

impl ScoreSummary {
    /// Percentage correct, standard rounding (0.5 rounds up).
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.correct as f64 / self.total as f64) * 100.0).round() as u32
    }

    pub fn tier(&self) -> ScoreTier {
        ScoreTier::for_percentage(self.percentage())
    }
}

impl ScoreTier {
    pub fn for_percentage(percentage: u32) -> Self {
        match percentage {
            90.. => Self::Exemplary,
            70.. => Self::Strong,
            50.. => Self::Moderate,
            _ => Self::Retry,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Exemplary => "Excellent work!",
            Self::Strong => "Great job!",
            Self::Moderate => "Good effort! Keep practicing!",
            Self::Retry => "Keep learning and try again!",
        }
    }
}
