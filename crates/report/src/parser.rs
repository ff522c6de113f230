//! Reduces a Playwright report tree to passed/failed lists
//!
//! Traversal is depth-first: a suite's own specs come before its nested
//! suites, and output keeps traversal order. Only the last attempt of a
//! test decides its classification, so a test that passed on retry is
//! reported as passed.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::model::{PlaywrightReport, Spec, Suite, Test, TestAttempt};
use crate::summary::{FailedTest, PassedTest, RunSummary};

const UNNAMED_TEST: &str = "Unnamed test";
const NO_ERROR_MESSAGE: &str = "No error message";
const PASSED_LABEL: &str = "Passed";
const TITLE_SEPARATOR: &str = " › ";

/// Lines Playwright appends about screenshots, videos and traces
static NOISE_LINES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)attachment\s*#\d+",
        r"test-results/",
        r"Usage:\s*npx playwright show-trace",
        r"^[-─\s]+$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("noise pattern"))
    .collect()
});

static TRACE_ARCHIVE: Lazy<Regex> = Lazy::new(|| Regex::new(r"trace\.zip").expect("trace pattern"));
static STACK_FRAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"at\s+").expect("frame pattern"));
static BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("blank pattern"));

/// Walk the report and classify every test by its final attempt
pub fn parse(report: &PlaywrightReport) -> RunSummary {
    let mut walker = Walker {
        project: report.project_name(),
        passed: Vec::new(),
        failed: Vec::new(),
        duration_ms: 0,
    };
    walker.walk_suites(&report.suites);
    walker.finish()
}

struct Walker<'a> {
    project: Option<&'a str>,
    passed: Vec<PassedTest>,
    failed: Vec<FailedTest>,
    duration_ms: u64,
}

impl Walker<'_> {
    fn walk_suites(&mut self, suites: &[Suite]) {
        for suite in suites {
            self.walk_specs(&suite.specs);
            self.walk_suites(&suite.suites);
        }
    }

    fn walk_specs(&mut self, specs: &[Spec]) {
        for spec in specs {
            for test in &spec.tests {
                self.visit_test(spec, test);
            }
        }
    }

    fn visit_test(&mut self, spec: &Spec, test: &Test) {
        let Some(last) = test.results.last() else {
            return;
        };

        let title = test_title(spec, test).to_string();
        let duration_ms = last.duration_ms();

        // Every test with a final attempt counts toward the total duration,
        // including ones that end up in neither list.
        self.duration_ms = self.duration_ms.saturating_add(duration_ms);

        match last.outcome() {
            Some("passed") | Some("expected") => self.passed.push(PassedTest {
                title,
                duration_ms,
                status: PASSED_LABEL.to_string(),
            }),
            Some("failed") | Some("unexpected") => self.failed.push(FailedTest {
                full_title: full_title(self.project, spec, test),
                title,
                error_body: error_body(&test.results),
            }),
            other => debug!("Not classifying '{}' (outcome: {:?})", title, other),
        }
    }

    fn finish(self) -> RunSummary {
        let passed_count = self.passed.len();
        let failed_count = self.failed.len();

        RunSummary {
            passed: self.passed,
            failed: self.failed,
            total: passed_count + failed_count,
            passed_count,
            failed_count,
            duration_ms: self.duration_ms,
            duration_sec: self.duration_ms.saturating_add(500) / 1000,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn test_title<'a>(spec: &'a Spec, test: &'a Test) -> &'a str {
    non_empty(test.title.as_deref())
        .or_else(|| non_empty(spec.title.as_deref()))
        .unwrap_or(UNNAMED_TEST)
}

/// `[project] › file › spec title › test title`, skipping empty parts
pub fn full_title(project: Option<&str>, spec: &Spec, test: &Test) -> String {
    [
        non_empty(project),
        non_empty(spec.file.as_deref()),
        non_empty(spec.title.as_deref()),
        Some(test_title(spec, test)),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(TITLE_SEPARATOR)
}

/// Message and stack of every attempt, prefixed `Run N:` when retried
fn error_body(attempts: &[TestAttempt]) -> String {
    let retried = attempts.len() > 1;
    let mut parts = Vec::with_capacity(attempts.len() * 2);

    for (i, attempt) in attempts.iter().enumerate() {
        let error = attempt.error.as_ref();
        let message = error
            .and_then(|e| non_empty(e.message.as_deref()))
            .unwrap_or(NO_ERROR_MESSAGE);

        if retried {
            parts.push(format!("Run {}: {}", i + 1, message));
        } else {
            parts.push(message.to_string());
        }

        if let Some(stack) = error.and_then(|e| non_empty(e.stack.as_deref())) {
            parts.push(stack.to_string());
        }
    }

    clean_error_body(&parts.join("\n\n"))
}

/// Drop attachment/trace lines and collapse runs of blank lines
pub fn clean_error_body(text: &str) -> String {
    let kept: Vec<&str> = text
        .split('\n')
        .filter(|line| !is_noise(line.trim()))
        .collect();

    BLANK_RUN
        .replace_all(&kept.join("\n"), "\n\n")
        .trim()
        .to_string()
}

fn is_noise(line: &str) -> bool {
    if NOISE_LINES.iter().any(|re| re.is_match(line)) {
        return true;
    }
    TRACE_ARCHIVE.is_match(line) && !STACK_FRAME.is_match(line)
}
