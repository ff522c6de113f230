//! Flattened view of one test run

use serde::{Deserialize, Serialize};
use std::fmt;

/// A test whose final attempt passed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassedTest {
    pub title: String,
    pub duration_ms: u64,
    pub status: String,
}

/// A test whose final attempt failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedTest {
    /// `project › file › spec › title`
    pub full_title: String,
    pub title: String,
    /// Every attempt's message and stack, attachment noise stripped
    pub error_body: String,
}

/// Result of parsing a report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub passed: Vec<PassedTest>,
    pub failed: Vec<FailedTest>,
    pub total: usize,
    pub passed_count: usize,
    pub failed_count: usize,
    pub duration_ms: u64,
    pub duration_sec: u64,
}

impl RunSummary {
    pub fn status(&self) -> RunStatus {
        RunStatus::from_counts(self.passed_count, self.failed_count)
    }
}

/// Overall verdict recorded on the published run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    Pass,
    Fail,
    Partial,
}

impl RunStatus {
    /// An empty run counts as a pass.
    pub fn from_counts(passed: usize, failed: usize) -> Self {
        if failed == 0 {
            RunStatus::Pass
        } else if passed == 0 {
            RunStatus::Fail
        } else {
            RunStatus::Partial
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Pass => "Pass",
            RunStatus::Fail => "Fail",
            RunStatus::Partial => "Partial",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(3, 0, RunStatus::Pass)]
    #[test_case(0, 2, RunStatus::Fail)]
    #[test_case(2, 1, RunStatus::Partial)]
    #[test_case(0, 0, RunStatus::Pass ; "empty run")]
    fn test_status_from_counts(passed: usize, failed: usize, expected: RunStatus) {
        assert_eq!(RunStatus::from_counts(passed, failed), expected);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(RunStatus::Partial.to_string(), "Partial");
    }
}
