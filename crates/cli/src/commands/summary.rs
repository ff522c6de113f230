//! Local run summary, no network access

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use runboard_report::config::DEFAULT_REPORT_PATH;
use runboard_report::text::format_duration;
use runboard_report::{parse, PlaywrightReport, RunSummary};

use crate::output::{print_list, print_structured, OutputFormat, TableDisplay};

#[derive(Args)]
pub struct SummaryArgs {
    /// Playwright JSON report
    #[arg(long, default_value = DEFAULT_REPORT_PATH)]
    pub report: PathBuf,

    /// Only list failed tests
    #[arg(long)]
    pub failures_only: bool,
}

/// One test as shown in the summary table
#[derive(Debug, Serialize)]
pub struct TestRow {
    pub test: String,
    pub result: &'static str,
    pub duration: String,
    pub error: String,
}

impl TableDisplay for TestRow {
    fn headers() -> Vec<&'static str> {
        vec!["Test", "Result", "Duration", "Error"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.test.clone(),
            self.result.to_string(),
            self.duration.clone(),
            self.error.clone(),
        ]
    }
}

/// Failures first, then passes, each in report order
pub fn test_rows(summary: &RunSummary, failures_only: bool) -> Vec<TestRow> {
    let failed = summary.failed.iter().map(|f| TestRow {
        test: f.full_title.clone(),
        result: "Failed",
        duration: String::new(),
        error: f.error_body.lines().next().unwrap_or_default().to_string(),
    });

    let passed = summary
        .passed
        .iter()
        .filter(|_| !failures_only)
        .map(|p| TestRow {
            test: p.title.clone(),
            result: "Passed",
            duration: format_duration(p.duration_ms),
            error: String::new(),
        });

    failed.chain(passed).collect()
}

pub fn totals_line(summary: &RunSummary) -> String {
    format!(
        "{} passed, {} failed of {} ({}) - {}",
        summary.passed_count,
        summary.failed_count,
        summary.total,
        format_duration(summary.duration_ms),
        summary.status()
    )
}

pub fn execute(args: SummaryArgs, format: OutputFormat) -> Result<()> {
    let report = PlaywrightReport::load(&args.report)
        .with_context(|| format!("reading {}", args.report.display()))?;
    let summary = parse(&report);

    if print_structured(&summary, format) {
        return Ok(());
    }

    print_list(&test_rows(&summary, args.failures_only), format);
    println!();
    println!("{}", totals_line(&summary));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use runboard_report::{FailedTest, PassedTest};

    fn summary() -> RunSummary {
        RunSummary {
            passed: vec![PassedTest {
                title: "home loads".to_string(),
                duration_ms: 480,
                status: "Passed".to_string(),
            }],
            failed: vec![FailedTest {
                full_title: "chromium › admin.spec.ts › requires login".to_string(),
                title: "requires login".to_string(),
                error_body: "Error: expected /login/\n\nat admin.spec.ts:9".to_string(),
            }],
            total: 2,
            passed_count: 1,
            failed_count: 1,
            duration_ms: 3200,
            duration_sec: 3,
        }
    }

    #[test]
    fn test_rows_put_failures_first() {
        let rows = test_rows(&summary(), false);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].result, "Failed");
        assert_eq!(rows[0].error, "Error: expected /login/");
        assert_eq!(rows[1].test, "home loads");
        assert_eq!(rows[1].duration, "480ms");
    }

    #[test]
    fn test_rows_failures_only() {
        let rows = test_rows(&summary(), true);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].result, "Failed");
    }

    #[test]
    fn test_totals_line() {
        assert_eq!(totals_line(&summary()), "1 passed, 1 failed of 2 (3.2s) - Partial");
    }

    #[test]
    fn test_execute_reads_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        std::fs::write(&path, r#"{ "suites": [] }"#).unwrap();

        let args = SummaryArgs {
            report: path,
            failures_only: false,
        };
        assert!(execute(args, OutputFormat::Json).is_ok());
    }

    #[test]
    fn test_execute_missing_report_fails() {
        let dir = tempfile::tempdir().unwrap();
        let args = SummaryArgs {
            report: dir.path().join("missing.json"),
            failures_only: false,
        };
        assert!(execute(args, OutputFormat::Table).is_err());
    }
}
