//! Publishes a parsed run as one Notion page plus its content blocks

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::info;

use crate::config::{NotionConfig, RunConfig};
use crate::error::ReportResult;
use crate::notion::{build_blocks, build_properties, CreatePageRequest, NotionClient, PageParent};
use crate::summary::RunSummary;

/// Per-run values recorded on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunMetadata {
    pub run_date: NaiveDate,
    pub run_name: String,
    pub environment: String,
    pub artifact_url: Option<String>,
}

impl RunMetadata {
    /// Default name: `Regression <env> <YYYY-MM-DD> <HH:MM:SS> UTC`
    pub fn new(run: &RunConfig, now: DateTime<Utc>) -> Self {
        let run_name = run
            .run_name
            .clone()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| {
                format!(
                    "Regression {} {} UTC",
                    run.environment,
                    now.format("%Y-%m-%d %H:%M:%S")
                )
            });

        Self {
            run_date: now.date_naive(),
            run_name,
            environment: run.environment.clone(),
            artifact_url: run.artifact_url.clone(),
        }
    }

    pub fn run_date_iso(&self) -> String {
        self.run_date.format("%Y-%m-%d").to_string()
    }
}

/// Outcome of a successful publish
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishedRun {
    pub page_id: String,
    pub blocks: usize,
    pub batches: usize,
}

pub struct RunPublisher {
    client: NotionClient,
    database_id: String,
}

impl RunPublisher {
    pub fn new(config: &NotionConfig) -> Self {
        Self::with_client(NotionClient::new(config), &config.database_id)
    }

    pub fn with_client(client: NotionClient, database_id: &str) -> Self {
        Self {
            client,
            database_id: database_id.to_string(),
        }
    }

    /// Resolve property ids, create the page, then append its blocks.
    ///
    /// Every step must succeed before the next starts. There is no
    /// rollback: if an append fails the page stays with whatever was
    /// already appended.
    pub async fn publish(
        &self,
        summary: &RunSummary,
        metadata: &RunMetadata,
        ai_summary: Option<&str>,
    ) -> ReportResult<PublishedRun> {
        let ids = self.client.database_property_ids(&self.database_id).await?;

        let request = CreatePageRequest {
            parent: PageParent {
                database_id: self.database_id.clone(),
            },
            properties: build_properties(&ids, summary, metadata),
        };
        let page_id = self.client.create_page(&request).await?;
        info!("Created run page {} ({})", page_id, metadata.run_name);

        let blocks = build_blocks(summary, ai_summary);
        let batches = if blocks.is_empty() {
            0
        } else {
            self.client.append_children(&page_id, &blocks).await?
        };
        info!("Appended {} blocks in {} batch(es)", blocks.len(), batches);

        Ok(PublishedRun {
            page_id,
            blocks: blocks.len(),
            batches,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 7, 5, 9).unwrap()
    }

    #[test]
    fn test_default_run_name() {
        let run = RunConfig {
            environment: "staging".to_string(),
            ..RunConfig::default()
        };

        let metadata = RunMetadata::new(&run, now());
        assert_eq!(metadata.run_name, "Regression staging 2026-03-14 07:05:09 UTC");
        assert_eq!(metadata.run_date_iso(), "2026-03-14");
    }

    #[test]
    fn test_run_name_override() {
        let run = RunConfig {
            run_name: Some("Release 4.2 smoke".to_string()),
            artifact_url: Some("https://ci/artifacts/42".to_string()),
            ..RunConfig::default()
        };

        let metadata = RunMetadata::new(&run, now());
        assert_eq!(metadata.run_name, "Release 4.2 smoke");
        assert_eq!(metadata.environment, "develop");
        assert_eq!(metadata.artifact_url.as_deref(), Some("https://ci/artifacts/42"));
    }
}
