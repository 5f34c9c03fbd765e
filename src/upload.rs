//! Bulk-upload screen state.
//!
//! Two panes: spreadsheet files discovered in the working directory and
//! the topic list. Submission is gated on having exactly one of each
//! selected; the gate is re-evaluated on every selection change.

use std::fs;
use std::path::{Path, PathBuf};

use crate::models::UploadReport;

const SPREADSHEET_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

/// Which pane has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPane {
    Files,
    Topics,
}

/// Lifecycle of one upload attempt.
#[derive(Debug)]
pub enum UploadPhase {
    Idle,
    Uploading,
    Done(UploadReport),
    Failed(String),
}

pub struct UploadForm {
    files: Vec<PathBuf>,
    pub file_cursor: usize,
    selected_file: Option<usize>,
    pub topic_cursor: usize,
    selected_topic: Option<i64>,
    pub focus: UploadPane,
    pub phase: UploadPhase,
}

impl UploadForm {
    pub fn new(dir: &Path) -> Self {
        Self {
            files: scan_spreadsheets(dir),
            file_cursor: 0,
            selected_file: None,
            topic_cursor: 0,
            selected_topic: None,
            focus: UploadPane::Files,
            phase: UploadPhase::Idle,
        }
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn selected_file(&self) -> Option<&Path> {
        self.selected_file
            .and_then(|index| self.files.get(index))
            .map(PathBuf::as_path)
    }

    pub fn selected_file_index(&self) -> Option<usize> {
        self.selected_file
    }

    pub fn selected_topic_id(&self) -> Option<i64> {
        self.selected_topic
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            UploadPane::Files => UploadPane::Topics,
            UploadPane::Topics => UploadPane::Files,
        };
    }

    pub fn move_cursor_down(&mut self, topic_count: usize) {
        match self.focus {
            UploadPane::Files => {
                if !self.files.is_empty() {
                    self.file_cursor = (self.file_cursor + 1).min(self.files.len() - 1);
                }
            }
            UploadPane::Topics => {
                if topic_count > 0 {
                    self.topic_cursor = (self.topic_cursor + 1).min(topic_count - 1);
                }
            }
        }
    }

    pub fn move_cursor_up(&mut self) {
        match self.focus {
            UploadPane::Files => self.file_cursor = self.file_cursor.saturating_sub(1),
            UploadPane::Topics => self.topic_cursor = self.topic_cursor.saturating_sub(1),
        }
    }

    /// Mark the file under the cursor as the upload candidate. Selecting
    /// it again deselects.
    pub fn toggle_file_selection(&mut self) {
        if self.files.is_empty() {
            return;
        }
        self.selected_file = match self.selected_file {
            Some(index) if index == self.file_cursor => None,
            _ => Some(self.file_cursor),
        };
    }

    /// Mark a topic as the upload target. Selecting it again deselects.
    pub fn toggle_topic_selection(&mut self, topic_id: i64) {
        self.selected_topic = match self.selected_topic {
            Some(id) if id == topic_id => None,
            _ => Some(topic_id),
        };
    }

    /// Submit is allowed only with both a file and a topic chosen and no
    /// upload already in flight.
    pub fn can_submit(&self) -> bool {
        self.selected_file().is_some()
            && self.selected_topic.is_some()
            && !matches!(self.phase, UploadPhase::Uploading)
    }

    pub fn begin_upload(&mut self) {
        self.phase = UploadPhase::Uploading;
    }

    /// Record the outcome. The file selection is cleared on every path,
    /// so a repeat submit requires an explicit re-pick.
    pub fn finish_upload(&mut self, phase: UploadPhase) {
        self.phase = phase;
        self.selected_file = None;
    }

    /// Re-scan the working directory, keeping cursors in range.
    pub fn refresh_files(&mut self, dir: &Path) {
        self.files = scan_spreadsheets(dir);
        self.selected_file = None;
        if self.file_cursor >= self.files.len() {
            self.file_cursor = self.files.len().saturating_sub(1);
        }
    }
}

fn scan_spreadsheets(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| {
                        SPREADSHEET_EXTENSIONS
                            .iter()
                            .any(|known| ext.eq_ignore_ascii_case(known))
                    })
                    .unwrap_or(false)
            })
            .collect(),
        Err(e) => {
            tracing::warn!("Failed to scan {} for spreadsheets: {}", dir.display(), e);
            Vec::new()
        }
    };
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_with_files(files: Vec<PathBuf>) -> UploadForm {
        UploadForm {
            files,
            file_cursor: 0,
            selected_file: None,
            topic_cursor: 0,
            selected_topic: None,
            focus: UploadPane::Files,
            phase: UploadPhase::Idle,
        }
    }

    fn sample_report() -> UploadReport {
        serde_json::from_str(
            r#"{"success": true, "message": "Successfully created 2 quizzes", "created_count": 2}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_submit_gated_on_both_selections() {
        let mut form = form_with_files(vec![PathBuf::from("quizzes.xlsx")]);
        assert!(!form.can_submit());

        form.toggle_file_selection();
        assert!(!form.can_submit());

        form.toggle_topic_selection(3);
        assert!(form.can_submit());

        form.toggle_topic_selection(3); // deselect
        assert!(!form.can_submit());
    }

    #[test]
    fn test_no_submit_while_uploading() {
        let mut form = form_with_files(vec![PathBuf::from("quizzes.xlsx")]);
        form.toggle_file_selection();
        form.toggle_topic_selection(1);
        form.begin_upload();
        assert!(!form.can_submit());
    }

    #[test]
    fn test_finish_clears_file_selection() {
        let mut form = form_with_files(vec![PathBuf::from("quizzes.xlsx")]);
        form.toggle_file_selection();
        form.toggle_topic_selection(1);
        form.begin_upload();
        form.finish_upload(UploadPhase::Done(sample_report()));

        assert!(form.selected_file().is_none());
        // Topic stays selected, but the gate is closed again.
        assert_eq!(form.selected_topic_id(), Some(1));
        assert!(!form.can_submit());
    }

    #[test]
    fn test_reselecting_file_replaces() {
        let mut form = form_with_files(vec![
            PathBuf::from("a.xlsx"),
            PathBuf::from("b.xls"),
        ]);
        form.toggle_file_selection();
        form.move_cursor_down(0);
        form.toggle_file_selection();
        assert_eq!(form.selected_file(), Some(Path::new("b.xls")));
    }

    #[test]
    fn test_cursor_stays_in_range_on_empty_lists() {
        let mut form = form_with_files(Vec::new());
        form.move_cursor_down(0);
        form.move_cursor_up();
        form.toggle_file_selection();
        assert!(form.selected_file().is_none());
        assert_eq!(form.file_cursor, 0);
    }
}
