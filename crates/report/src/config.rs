//! Reporter configuration
//!
//! Built once by the binary from its arguments and environment, then passed
//! down explicitly. Nothing in this crate reads the process environment.

use std::path::PathBuf;

use crate::error::{ReportError, ReportResult};
use crate::notion::NOTION_API_BASE;
use crate::summarizer::gemini::GEMINI_API_BASE;
use crate::summarizer::groq::GROQ_API_BASE;

/// Where `npx playwright test --reporter=json` output lands by convention
pub const DEFAULT_REPORT_PATH: &str = "playwright-report/results.json";

pub const DEFAULT_ENVIRONMENT: &str = "develop";

#[derive(Debug, Clone)]
pub struct ReporterConfig {
    /// Playwright JSON report to read
    pub report_path: PathBuf,

    pub notion: NotionConfig,

    pub run: RunConfig,

    pub ai: AiConfig,
}

/// Destination database
#[derive(Debug, Clone)]
pub struct NotionConfig {
    pub api_key: String,
    pub database_id: String,
    pub base_url: String,
}

impl NotionConfig {
    /// Both values are required and must be non-empty
    pub fn new(api_key: Option<String>, database_id: Option<String>) -> ReportResult<Self> {
        let api_key = api_key.filter(|v| !v.trim().is_empty());
        let database_id = database_id.filter(|v| !v.trim().is_empty());

        match (api_key, database_id) {
            (Some(api_key), Some(database_id)) => Ok(Self {
                api_key,
                database_id,
                base_url: NOTION_API_BASE.to_string(),
            }),
            _ => Err(ReportError::Config(
                "Missing NOTION_API_KEY or NOTION_DATABASE_ID".to_string(),
            )),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url.filter(|u| !u.is_empty()) {
            self.base_url = url;
        }
        self
    }
}

/// Metadata recorded on the published run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Environment tag, e.g. `develop` or `staging`
    pub environment: String,

    /// CI artifact link, only published when set
    pub artifact_url: Option<String>,

    /// Overrides the generated run name
    pub run_name: Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            environment: DEFAULT_ENVIRONMENT.to_string(),
            artifact_url: None,
            run_name: None,
        }
    }
}

/// Optional failure summarization
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub enabled: bool,

    /// Tried left to right before any Gemini key
    pub groq_keys: Vec<String>,

    pub gemini_keys: Vec<String>,

    pub groq_base_url: String,

    pub gemini_base_url: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            groq_keys: Vec::new(),
            gemini_keys: Vec::new(),
            groq_base_url: GROQ_API_BASE.to_string(),
            gemini_base_url: GEMINI_API_BASE.to_string(),
        }
    }
}

/// `"key1, key2,,"` -> `["key1", "key2"]`
pub fn split_keys(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect()
}

/// Only `1` and `true` switch a flag on
pub fn parse_flag(raw: Option<&str>) -> bool {
    matches!(raw.map(str::trim), Some("1") | Some("true"))
}

/// Empty strings count as unset
pub fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|v| !v.trim().is_empty())
}
