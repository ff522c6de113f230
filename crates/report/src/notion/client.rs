//! Notion REST client

use std::collections::HashMap;

use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use tracing::debug;

use super::blocks::Block;
use super::properties::CreatePageRequest;
use crate::config::NotionConfig;
use crate::error::{ReportError, ReportResult};

pub const NOTION_API_BASE: &str = "https://api.notion.com/v1";
pub const NOTION_VERSION: &str = "2022-06-28";

/// Notion accepts at most this many children per append request
pub const MAX_CHILDREN_PER_REQUEST: usize = 100;

#[derive(Debug, Deserialize)]
struct DatabaseResponse {
    #[serde(default)]
    properties: HashMap<String, DatabaseProperty>,
}

#[derive(Debug, Deserialize)]
struct DatabaseProperty {
    id: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PageResponse {
    id: String,
}

#[derive(Debug, serde::Serialize)]
struct AppendChildrenRequest<'a> {
    children: &'a [Block],
}

/// Bearer-authenticated, version-pinned Notion client. Calls are not
/// retried: any non-2xx status is returned as [`ReportError::Notion`].
#[derive(Debug, Clone)]
pub struct NotionClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    batch_size: usize,
}

impl NotionClient {
    pub fn new(config: &NotionConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            batch_size: MAX_CHILDREN_PER_REQUEST,
        }
    }

    /// Children per append request, clamped to `1..=100`
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.clamp(1, MAX_CHILDREN_PER_REQUEST);
        self
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(&self.api_key)
            .header("Notion-Version", NOTION_VERSION)
    }

    async fn send(&self, operation: &'static str, request: RequestBuilder) -> ReportResult<Response> {
        let resp = request.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        Err(ReportError::Notion {
            operation,
            status: status.as_u16(),
            body,
        })
    }

    /// Map property display names to the ids writes must use
    pub async fn database_property_ids(&self, database_id: &str) -> ReportResult<HashMap<String, String>> {
        debug!("Resolving properties of database {}", database_id);

        let resp = self
            .send(
                "GET database",
                self.request(Method::GET, &format!("/databases/{}", database_id)),
            )
            .await?;
        let database: DatabaseResponse = resp.json().await?;

        Ok(database
            .properties
            .into_iter()
            .map(|(key, prop)| {
                let name = prop.name.unwrap_or_else(|| key.clone());
                let id = prop.id.unwrap_or(key);
                (name, id)
            })
            .collect())
    }

    /// Create a database page and return its id
    pub async fn create_page(&self, request: &CreatePageRequest) -> ReportResult<String> {
        debug!("Creating page with {} properties", request.properties.len());

        let resp = self
            .send(
                "create page",
                self.request(Method::POST, "/pages").json(request),
            )
            .await?;
        let page: PageResponse = resp.json().await?;
        Ok(page.id)
    }

    /// Append blocks in sequential batches; returns the number of requests.
    /// A failed batch aborts the rest, leaving earlier batches in place.
    pub async fn append_children(&self, block_id: &str, blocks: &[Block]) -> ReportResult<usize> {
        let path = format!("/blocks/{}/children", block_id);
        let mut batches = 0;

        for batch in blocks.chunks(self.batch_size) {
            debug!("Appending batch {} ({} blocks)", batches + 1, batch.len());
            self.send(
                "append blocks",
                self.request(Method::PATCH, &path)
                    .json(&AppendChildrenRequest { children: batch }),
            )
            .await?;
            batches += 1;
        }

        Ok(batches)
    }
}
