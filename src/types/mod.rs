//! Wire types for the review service.
//!
//! Two serialization conventions meet here: the outer review envelope comes
//! from the service's relational store and uses camelCase field names, while
//! the inner analysis payload is produced by the AI engine and uses
//! snake_case. Every field name is pinned with explicit serde attributes so
//! neither side can drift.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Source language of a submitted snippet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Java,
    Python,
    Javascript,
}

/// A manual review submission.
///
/// Built once by the caller and sent once; the reference id (`pr_id`) is
/// caller-chosen and becomes the key under which results are fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub filename: String,
    pub language: Language,
    pub code: String,
    pub pr_id: String,
}

/// One stored review, as returned by `GET /pr/{prId}`.
///
/// `ai_result_json` is a complete JSON document serialized into a string
/// column; it needs a second decode pass (see [`crate::envelope`]) before
/// anything in it can be used. The service returns records most recent
/// first and may hold several per reference id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    pub id: i64,
    pub pr_id: String,
    pub filename: String,
    pub language: String,
    /// Zone-less local timestamp as emitted by the service.
    pub review_date: NaiveDateTime,
    pub ai_result_json: String,
}

/// Decoded analysis payload for one review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Issues in the order the reviewer reported them
    pub review: Vec<Issue>,
    pub documentation: Documentation,
    pub test_cases: TestCases,
    pub quality_score: QualityScore,
}

/// A single issue flagged by the reviewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "type")]
    pub issue_type: String,
    /// Line the issue was reported on
    pub line: u32,
    pub description: String,
    pub suggestion: String,
    pub severity: Severity,
}

/// Issue severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// Generated documentation for the submitted snippet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Documentation {
    pub summary: String,
    pub function_docs: String,
    pub developer_notes: String,
}

/// Generated test material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCases {
    pub unit_tests: String,
    pub edge_cases: Vec<String>,
    pub risk_assessment: String,
}

/// Quality metrics for the submitted snippet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityScore {
    pub cyclomatic_complexity: String,
    pub maintainability_index: f64,
    pub security_risk: String,
    /// Overall score in [0, 100]
    pub final_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_serialization() {
        let languages = [
            (Language::Java, "\"java\""),
            (Language::Python, "\"python\""),
            (Language::Javascript, "\"javascript\""),
        ];

        for (language, expected) in &languages {
            let json = serde_json::to_string(language).unwrap();
            assert_eq!(json, *expected);
        }
    }

    #[test]
    fn test_review_request_wire_names() {
        let request = ReviewRequest {
            filename: "UserService.java".to_string(),
            language: Language::Java,
            code: "class UserService {}".to_string(),
            pr_id: "PR-123".to_string(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["filename"], "UserService.java");
        assert_eq!(json["language"], "java");
        assert_eq!(json["code"], "class UserService {}");
        assert_eq!(json["prId"], "PR-123");
    }

    #[test]
    fn test_review_record_deserialization() {
        let json = r#"{
            "id": 7,
            "prId": "PR-42",
            "filename": "main.py",
            "language": "python",
            "reviewDate": "2026-01-15T10:30:00",
            "aiResultJson": "{}"
        }"#;

        let record: ReviewRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.pr_id, "PR-42");
        assert_eq!(record.filename, "main.py");
        assert_eq!(record.ai_result_json, "{}");
    }

    #[test]
    fn test_severity_wire_names() {
        let severities = [
            (Severity::Low, "\"LOW\""),
            (Severity::Medium, "\"MEDIUM\""),
            (Severity::High, "\"HIGH\""),
        ];

        for (severity, expected) in &severities {
            let json = serde_json::to_string(severity).unwrap();
            assert_eq!(json, *expected);

            let parsed: Severity = serde_json::from_str(expected).unwrap();
            assert_eq!(parsed, *severity);
        }
    }

    #[test]
    fn test_issue_type_rename() {
        let json = r#"{
            "type": "Null Check",
            "line": 12,
            "description": "Possible null dereference",
            "suggestion": "Guard against null",
            "severity": "HIGH"
        }"#;

        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.issue_type, "Null Check");
        assert_eq!(issue.line, 12);
        assert_eq!(issue.severity, Severity::High);

        let back = serde_json::to_value(&issue).unwrap();
        assert_eq!(back["type"], "Null Check");
    }

    #[test]
    fn test_analysis_result_snake_case() {
        let json = r#"{
            "review": [],
            "documentation": {
                "summary": "A service class.",
                "function_docs": "/** ... */",
                "developer_notes": "Stateless."
            },
            "test_cases": {
                "unit_tests": "@Test void ok() {}",
                "edge_cases": ["empty input"],
                "risk_assessment": "Low risk."
            },
            "quality_score": {
                "cyclomatic_complexity": "Low",
                "maintainability_index": 82.5,
                "security_risk": "None",
                "final_score": 91.0
            }
        }"#;

        let analysis: AnalysisResult = serde_json::from_str(json).unwrap();
        assert!(analysis.review.is_empty());
        assert_eq!(analysis.documentation.summary, "A service class.");
        assert_eq!(analysis.test_cases.edge_cases.len(), 1);
        assert_eq!(analysis.quality_score.final_score, 91.0);
    }
}
