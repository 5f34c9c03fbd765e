use serde::Deserialize;

const FALLBACK_DESCRIPTION: &str = "Practice your skills with this topic";

/// A named category grouping quizzes.
#[derive(Debug, Clone, Deserialize)]
pub struct Topic {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
}

impl Topic {
    /// Description text for display, with a generic fallback when the
    /// backend left it empty.
    pub fn description_text(&self) -> &str {
        match self.description.as_deref() {
            Some(text) if !text.trim().is_empty() => text,
            _ => FALLBACK_DESCRIPTION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_and_without_description() {
        let topics: Vec<Topic> = serde_json::from_str(
            r#"[
                {"id": 1, "title": "Python Basics", "description": "Fundamentals"},
                {"id": 2, "title": "SQL Fundamentals"}
            ]"#,
        )
        .unwrap();

        assert_eq!(topics.len(), 2);
        assert_eq!(topics[0].description_text(), "Fundamentals");
        assert_eq!(topics[1].description_text(), FALLBACK_DESCRIPTION);
    }

    #[test]
    fn test_blank_description_falls_back() {
        let topic: Topic =
            serde_json::from_str(r#"{"id": 3, "title": "Rust", "description": "  "}"#).unwrap();
        assert_eq!(topic.description_text(), FALLBACK_DESCRIPTION);
    }
}
