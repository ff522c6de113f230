//! Serde model of the Playwright JSON reporter output
//!
//! The reporter format drifts between Playwright releases and reports are
//! sometimes hand-edited in CI, so every field here is lenient: a missing
//! or mistyped value, or an array element of the wrong shape, simply
//! contributes nothing. Only text that is not JSON at all is rejected.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{ReportError, ReportResult};

/// Root of a Playwright JSON report
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlaywrightReport {
    #[serde(deserialize_with = "lenient::option")]
    pub config: Option<RunnerConfig>,

    #[serde(deserialize_with = "lenient::vec")]
    pub suites: Vec<Suite>,
}

/// The subset of the Playwright config echoed into the report
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    #[serde(deserialize_with = "lenient::vec")]
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Project {
    #[serde(deserialize_with = "lenient::option")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Suite {
    #[serde(deserialize_with = "lenient::option")]
    pub title: Option<String>,

    #[serde(deserialize_with = "lenient::option")]
    pub file: Option<String>,

    #[serde(deserialize_with = "lenient::vec")]
    pub specs: Vec<Spec>,

    #[serde(deserialize_with = "lenient::vec")]
    pub suites: Vec<Suite>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Spec {
    #[serde(deserialize_with = "lenient::text")]
    pub title: Option<String>,

    #[serde(deserialize_with = "lenient::option")]
    pub file: Option<String>,

    #[serde(deserialize_with = "lenient::vec")]
    pub tests: Vec<Test>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Test {
    #[serde(deserialize_with = "lenient::text")]
    pub title: Option<String>,

    /// One entry per attempt, retries included
    #[serde(deserialize_with = "lenient::vec")]
    pub results: Vec<TestAttempt>,
}

/// A single execution of a test
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TestAttempt {
    #[serde(deserialize_with = "lenient::option")]
    pub outcome: Option<String>,

    #[serde(deserialize_with = "lenient::option")]
    pub status: Option<String>,

    /// Milliseconds
    #[serde(deserialize_with = "lenient::option")]
    pub duration: Option<f64>,

    #[serde(deserialize_with = "lenient::option")]
    pub error: Option<AttemptError>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AttemptError {
    #[serde(deserialize_with = "lenient::option")]
    pub message: Option<String>,

    #[serde(deserialize_with = "lenient::option")]
    pub stack: Option<String>,
}

impl PlaywrightReport {
    /// Parse report text. Fails only when the text is not valid JSON.
    pub fn from_json_str(raw: &str) -> ReportResult<Self> {
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(ReportError::InvalidReport)?;
        Ok(serde_json::from_value(value).unwrap_or_default())
    }

    /// Read and parse a report file
    pub fn load(path: &Path) -> ReportResult<Self> {
        debug!("Loading report: {}", path.display());

        let raw = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ReportError::ReportNotFound(path.to_path_buf()),
            _ => ReportError::Io(e),
        })?;

        Self::from_json_str(&raw)
    }

    /// Name of the first configured project, used as the title prefix
    pub fn project_name(&self) -> Option<&str> {
        self.config
            .as_ref()?
            .projects
            .first()?
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
    }
}

impl TestAttempt {
    /// Terminal state of the attempt; older reporters only set `status`
    pub fn outcome(&self) -> Option<&str> {
        self.outcome.as_deref().or(self.status.as_deref())
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration
            .filter(|d| d.is_finite() && *d > 0.0)
            .map(|d| d.round() as u64)
            .unwrap_or(0)
    }
}

mod lenient {
    use serde::de::{DeserializeOwned, Deserializer};
    use serde::Deserialize;
    use serde_json::Value;

    /// Non-arrays become empty; elements of the wrong shape are dropped.
    pub fn vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
            _ => Vec::new(),
        })
    }

    /// Values of the wrong type read as absent.
    pub fn option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(serde_json::from_value(Value::deserialize(deserializer)?).ok())
    }

    /// Strings, with numbers rendered as text; anything else reads as absent.
    pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_report() {
        let raw = r#"{
            "config": { "projects": [{ "name": "chromium" }] },
            "suites": [{
                "title": "home.spec.ts",
                "file": "home.spec.ts",
                "specs": [{
                    "title": "loads",
                    "tests": [{ "results": [{ "status": "passed", "duration": 120 }] }]
                }],
                "suites": []
            }]
        }"#;

        let report = PlaywrightReport::from_json_str(raw).unwrap();
        assert_eq!(report.project_name(), Some("chromium"));
        assert_eq!(report.suites.len(), 1);

        let attempt = &report.suites[0].specs[0].tests[0].results[0];
        assert_eq!(attempt.outcome(), Some("passed"));
        assert_eq!(attempt.duration_ms(), 120);
    }

    #[test]
    fn test_wrong_shapes_are_dropped() {
        let raw = r#"{
            "suites": [
                "not a suite",
                { "specs": { "not": "an array" }, "suites": null },
                { "specs": [{ "title": 42, "file": 7, "tests": [{ "title": [], "results": "nope" }] }] }
            ]
        }"#;

        let report = PlaywrightReport::from_json_str(raw).unwrap();
        assert_eq!(report.suites.len(), 2);
        assert!(report.suites[0].specs.is_empty());
        assert!(report.suites[0].suites.is_empty());

        let spec = &report.suites[1].specs[0];
        assert_eq!(spec.title.as_deref(), Some("42"));
        assert_eq!(spec.file, None);
        assert_eq!(spec.tests[0].title, None);
        assert!(spec.tests[0].results.is_empty());
    }

    #[test]
    fn test_non_object_root_is_empty_report() {
        let report = PlaywrightReport::from_json_str("[1, 2, 3]").unwrap();
        assert!(report.suites.is_empty());
        assert_eq!(report.project_name(), None);
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        let err = PlaywrightReport::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ReportError::InvalidReport(_)));
    }

    #[test]
    fn test_outcome_prefers_outcome_field() {
        let attempt = TestAttempt {
            outcome: Some("unexpected".to_string()),
            status: Some("failed".to_string()),
            ..Default::default()
        };
        assert_eq!(attempt.outcome(), Some("unexpected"));
    }

    #[test]
    fn test_duration_is_clamped_and_rounded() {
        let negative = TestAttempt {
            duration: Some(-5.0),
            ..Default::default()
        };
        assert_eq!(negative.duration_ms(), 0);

        let fractional = TestAttempt {
            duration: Some(12.6),
            ..Default::default()
        };
        assert_eq!(fractional.duration_ms(), 13);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = PlaywrightReport::load(&dir.path().join("results.json")).unwrap_err();
        assert!(matches!(err, ReportError::ReportNotFound(_)));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        std::fs::write(&path, r#"{ "suites": [] }"#).unwrap();

        let report = PlaywrightReport::load(&path).unwrap();
        assert!(report.suites.is_empty());
    }
}
