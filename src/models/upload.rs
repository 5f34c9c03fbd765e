use serde::Deserialize;

/// Outcome of a bulk quiz upload. Partial success is possible: some rows
/// created, others listed in `errors`.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadReport {
    pub success: bool,
    pub message: String,
    pub created_count: usize,
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Error body carried by non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

/// Response from the sample-data initialization endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct InitMessage {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_with_row_errors() {
        let report: UploadReport = serde_json::from_str(
            r#"{
                "success": false,
                "message": "Successfully created 0 quizzes with 1 errors",
                "created_count": 0,
                "errors": ["row 3: missing question"]
            }"#,
        )
        .unwrap();

        assert!(!report.success);
        assert_eq!(report.created_count, 0);
        assert_eq!(report.errors, vec!["row 3: missing question"]);
    }

    #[test]
    fn test_report_errors_default_to_empty() {
        let report: UploadReport = serde_json::from_str(
            r#"{"success": true, "message": "Successfully created 4 quizzes", "created_count": 4}"#,
        )
        .unwrap();
        assert!(report.success);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_error_detail() {
        let detail: ErrorDetail =
            serde_json::from_str(r#"{"detail": "File must be an Excel file (.xlsx or .xls)"}"#)
                .unwrap();
        assert!(detail.detail.contains("Excel"));
    }
}
