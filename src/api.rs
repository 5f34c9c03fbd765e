//! HTTP client for the quiz-gym backend.
//!
//! Every call maps to one REST endpoint. Failures never propagate past
//! the screen that triggered them; callers decide between a notification
//! and a log line.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use reqwest::multipart;

use crate::models::{ErrorDetail, InitMessage, Quiz, Submission, Topic, UploadReport};

/// File name used when saving the downloaded upload template.
pub const TEMPLATE_FILE_NAME: &str = "quiz_template.xlsx";

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Error type for backend calls.
#[derive(Debug)]
pub enum ApiError {
    /// Network-level failure (connect, timeout, body read).
    Transport(reqwest::Error),
    /// Non-2xx response, with the backend's `detail` when it sent one.
    Status { status: u16, detail: Option<String> },
    /// Local filesystem failure while reading an upload or saving the
    /// template.
    Io(io::Error),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(e) => write!(f, "request failed: {}", e),
            ApiError::Status {
                detail: Some(detail),
                ..
            } => write!(f, "{}", detail),
            ApiError::Status { status, detail: None } => {
                write!(f, "HTTP error! status: {}", status)
            }
            ApiError::Io(e) => write!(f, "file error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Transport(e) => Some(e),
            ApiError::Status { .. } => None,
            ApiError::Io(e) => Some(e),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err)
    }
}

impl From<io::Error> for ApiError {
    fn from(err: io::Error) -> Self {
        ApiError::Io(err)
    }
}

/// Client for the six backend endpoints. Cheap to clone; clones share
/// the underlying connection pool.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// `POST /api/init-data/` — seed the backend with sample content.
    pub async fn init_sample_data(&self) -> Result<InitMessage, ApiError> {
        let response = self.http.post(self.url("/api/init-data/")).send().await?;
        Ok(check(response).await?.json().await?)
    }

    /// `GET /api/topics/`
    pub async fn topics(&self) -> Result<Vec<Topic>, ApiError> {
        let response = self.http.get(self.url("/api/topics/")).send().await?;
        Ok(check(response).await?.json().await?)
    }

    /// `GET /api/quizzes/topic/{id}`
    pub async fn quizzes_for_topic(&self, topic_id: i64) -> Result<Vec<Quiz>, ApiError> {
        let response = self
            .http
            .get(self.url(&format!("/api/quizzes/topic/{}", topic_id)))
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    /// `POST /api/submissions/` — record one answer. The ack body is
    /// opaque and discarded.
    pub async fn submit_answer(&self, submission: &Submission) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/api/submissions/"))
            .json(submission)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    /// `GET /api/download-template/` — fetch the upload template and
    /// write it to `dir`, returning the saved path.
    pub async fn download_template(&self, dir: &Path) -> Result<PathBuf, ApiError> {
        let response = self
            .http
            .get(self.url("/api/download-template/"))
            .send()
            .await?;
        let bytes = check(response).await?.bytes().await?;
        let path = dir.join(TEMPLATE_FILE_NAME);
        tokio::fs::write(&path, &bytes).await?;
        Ok(path)
    }

    /// `POST /api/upload-quizzes/` — send a spreadsheet plus topic id as
    /// multipart form content.
    pub async fn upload_quizzes(
        &self,
        file: &Path,
        topic_id: i64,
    ) -> Result<UploadReport, ApiError> {
        let bytes = tokio::fs::read(file).await?;
        let file_name = file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.xlsx".to_string());

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(XLSX_MIME)?;
        let form = multipart::Form::new()
            .part("file", part)
            .text("topic_id", topic_id.to_string());

        let response = self
            .http
            .post(self.url("/api/upload-quizzes/"))
            .multipart(form)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }
}

/// Map non-2xx responses to `ApiError::Status`, pulling the backend's
/// `{detail}` body when present.
async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let detail = response
        .json::<ErrorDetail>()
        .await
        .ok()
        .map(|body| body.detail);
    Err(ApiError::Status {
        status: status.as_u16(),
        detail,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_normalized() {
        let client = ApiClient::new("http://127.0.0.1:8000/");
        assert_eq!(client.url("/api/topics/"), "http://127.0.0.1:8000/api/topics/");
    }

    #[test]
    fn test_status_error_prefers_backend_detail() {
        let with_detail = ApiError::Status {
            status: 400,
            detail: Some("File must be an Excel file (.xlsx or .xls)".to_string()),
        };
        assert_eq!(
            with_detail.to_string(),
            "File must be an Excel file (.xlsx or .xls)"
        );

        let bare = ApiError::Status {
            status: 502,
            detail: None,
        };
        assert_eq!(bare.to_string(), "HTTP error! status: 502");
    }
}
