//! Publish a Playwright run to Notion
//!
//! Pipeline: load report -> parse -> optional AI summary -> publish.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::Args;
use tracing::info;

use runboard_report::config::{non_empty, parse_flag, split_keys, DEFAULT_ENVIRONMENT, DEFAULT_REPORT_PATH};
use runboard_report::summarizer::gemini::GEMINI_API_BASE;
use runboard_report::summarizer::groq::GROQ_API_BASE;
use runboard_report::{
    parse, AiConfig, NotionConfig, PlaywrightReport, ReportResult, ReporterConfig, RunConfig,
    RunMetadata, RunPublisher, Summarizer,
};

use crate::output::{print_info, print_structured, print_success, print_warning, OutputFormat};

#[derive(Args)]
pub struct PublishArgs {
    /// Playwright JSON report
    #[arg(long, default_value = DEFAULT_REPORT_PATH)]
    pub report: PathBuf,

    /// Notion integration token
    #[arg(long, env = "NOTION_API_KEY", hide_env_values = true)]
    pub notion_api_key: Option<String>,

    /// Test Runs database id
    #[arg(long, env = "NOTION_DATABASE_ID")]
    pub notion_database_id: Option<String>,

    /// Notion API base URL override
    #[arg(long, env = "NOTION_API_URL")]
    pub notion_api_url: Option<String>,

    /// Environment tag recorded on the run (default: develop)
    #[arg(long, env = "ENVIRONMENT")]
    pub environment: Option<String>,

    /// Link to the CI artifacts of this run
    #[arg(long, env = "ARTIFACT_URL")]
    pub artifact_url: Option<String>,

    /// Run name; generated from environment and time when unset
    #[arg(long, env = "RUN_NAME")]
    pub run_name: Option<String>,

    /// Set to 1 or true to prepend an AI summary of failures
    #[arg(long, env = "AI_SUMMARY_ENABLED")]
    pub ai_summary_enabled: Option<String>,

    /// Comma-separated Groq keys, tried in order
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    pub groq_api_key: Option<String>,

    /// Comma-separated Gemini keys, tried after every Groq key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    /// Groq API base URL override
    #[arg(long, env = "GROQ_API_URL")]
    pub groq_api_url: Option<String>,

    /// Gemini API base URL override
    #[arg(long, env = "GEMINI_API_URL")]
    pub gemini_api_url: Option<String>,
}

impl PublishArgs {
    /// Validate and assemble the configuration handed to the library
    pub fn into_config(self) -> ReportResult<ReporterConfig> {
        let notion = NotionConfig::new(self.notion_api_key, self.notion_database_id)?
            .with_base_url(non_empty(self.notion_api_url));

        let run = RunConfig {
            environment: non_empty(self.environment)
                .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
            artifact_url: non_empty(self.artifact_url),
            run_name: non_empty(self.run_name),
        };

        let ai = AiConfig {
            enabled: parse_flag(self.ai_summary_enabled.as_deref()),
            groq_keys: split_keys(self.groq_api_key.as_deref()),
            gemini_keys: split_keys(self.gemini_api_key.as_deref()),
            groq_base_url: non_empty(self.groq_api_url).unwrap_or_else(|| GROQ_API_BASE.to_string()),
            gemini_base_url: non_empty(self.gemini_api_url)
                .unwrap_or_else(|| GEMINI_API_BASE.to_string()),
        };

        Ok(ReporterConfig {
            report_path: self.report,
            notion,
            run,
            ai,
        })
    }
}

pub async fn execute(args: PublishArgs, format: OutputFormat) -> Result<()> {
    let config = args.into_config()?;

    let report = PlaywrightReport::load(&config.report_path)?;
    let summary = parse(&report);
    info!(
        "Parsed {}: {} passed, {} failed",
        config.report_path.display(),
        summary.passed_count,
        summary.failed_count
    );

    let summarizer = Summarizer::from_config(&config.ai);
    let ai_summary = summarizer.summarize(&summary.failed).await;
    if summarizer.is_enabled() && !summary.failed.is_empty() && ai_summary.is_none() {
        print_warning("AI summary unavailable, publishing without it");
    }

    let metadata = RunMetadata::new(&config.run, Utc::now());
    let published = RunPublisher::new(&config.notion)
        .publish(&summary, &metadata, ai_summary.as_deref())
        .await?;

    if !print_structured(&published, format) {
        print_success("Notion report created successfully.");
        print_info(&format!("Page ID: {}", published.page_id));
    }

    Ok(())
}
