//! Optional AI summary of a run's failures
//!
//! One prompt carries every failure. It is offered to each configured
//! provider credential in turn (all Groq keys, then all Gemini keys) and the
//! first non-empty answer wins. Provider failures are logged and skipped:
//! the summary is advisory and never fails the run.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::config::AiConfig;
use crate::error::ReportResult;
use crate::summary::FailedTest;
use crate::text::{prefix, truncate};

pub mod gemini;
pub mod groq;

pub use gemini::GeminiProvider;
pub use groq::GroqProvider;

/// Total failure context sent in the single request (~3k tokens)
pub const CONTEXT_MAX_CHARS: usize = 12_000;

/// Error excerpt kept per failed test
pub const CONTEXT_PER_ERROR_CHARS: usize = 1_500;

pub(crate) const MAX_OUTPUT_TOKENS: u32 = 400;
pub(crate) const TEMPERATURE: f32 = 0.3;

const INSTRUCTIONS: &str = "You are summarizing a UI test regression run. Below are the failed \
test names and their error messages. In 2-4 short sentences, summarize what failed and suggest \
likely causes or areas to check. Be concise and actionable.";

/// A language-model endpoint bound to one credential
#[async_trait]
pub trait SummaryProvider: Send + Sync {
    /// Vendor name used in logs
    fn name(&self) -> &str;

    /// Submit the prompt and return the generated text
    async fn complete(&self, prompt: &str) -> ReportResult<String>;
}

/// Ordered provider fallback chain
pub struct Summarizer {
    enabled: bool,
    providers: Vec<Box<dyn SummaryProvider>>,
}

impl Summarizer {
    pub fn new(enabled: bool, providers: Vec<Box<dyn SummaryProvider>>) -> Self {
        Self { enabled, providers }
    }

    /// One provider per configured key: Groq keys first, then Gemini keys
    pub fn from_config(config: &AiConfig) -> Self {
        let http = reqwest::Client::new();
        let mut providers: Vec<Box<dyn SummaryProvider>> = Vec::new();

        for key in &config.groq_keys {
            providers.push(Box::new(
                GroqProvider::new(http.clone(), key).with_base_url(&config.groq_base_url),
            ));
        }
        for key in &config.gemini_keys {
            providers.push(Box::new(
                GeminiProvider::new(http.clone(), key).with_base_url(&config.gemini_base_url),
            ));
        }

        Self::new(config.enabled, providers)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled && !self.providers.is_empty()
    }

    /// Summarize the failures, or `None` when disabled, when nothing
    /// failed, or when every provider attempt failed.
    pub async fn summarize(&self, failed: &[FailedTest]) -> Option<String> {
        if !self.is_enabled() || failed.is_empty() {
            return None;
        }

        let prompt = build_prompt(failed);
        debug!("AI summary prompt: {} chars", prompt.chars().count());

        for (attempt, provider) in self.providers.iter().enumerate() {
            match provider.complete(&prompt).await {
                Ok(text) if !text.trim().is_empty() => {
                    info!("AI summary generated by {}", provider.name());
                    return Some(text.trim().to_string());
                }
                Ok(_) => warn!(
                    provider = provider.name(),
                    attempt = attempt + 1,
                    "AI summary was empty (trying next key or provider)"
                ),
                Err(e) => warn!(
                    provider = provider.name(),
                    attempt = attempt + 1,
                    error = %e,
                    "AI summary failed (trying next key or provider)"
                ),
            }
        }

        warn!("No AI provider produced a summary");
        None
    }
}

/// Instructions plus every failure's title and error excerpt, capped at
/// [`CONTEXT_MAX_CHARS`]; earlier failures survive the cut.
pub fn build_prompt(failed: &[FailedTest]) -> String {
    let context = failed
        .iter()
        .map(|f| {
            let title = if f.full_title.is_empty() { &f.title } else { &f.full_title };
            format!(
                "Test: {}\nError: {}",
                title,
                prefix(&f.error_body, CONTEXT_PER_ERROR_CHARS)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n---\n\n");

    format!("{}\n\n{}", INSTRUCTIONS, truncate(&context, CONTEXT_MAX_CHARS))
}
