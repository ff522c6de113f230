//! Runboard run reporting
//!
//! Turns a Playwright JSON report into a Notion "Test Runs" entry:
//!
//! ```text
//! results.json ──> PlaywrightReport ──parse()──> RunSummary
//!                                                   │
//!                         Summarizer (optional) <───┤ failed tests
//!                               │ AI summary        │
//!                               v                   v
//!                       RunPublisher::publish(summary, metadata, ai)
//!                         ├── GET   /databases/{id}        property ids
//!                         ├── POST  /pages                 run page
//!                         └── PATCH /blocks/{id}/children  ≤100 per batch
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod notion;
pub mod parser;
pub mod publisher;
pub mod summarizer;
pub mod summary;
pub mod text;

pub use config::{AiConfig, NotionConfig, ReporterConfig, RunConfig};
pub use error::{ReportError, ReportResult};
pub use model::PlaywrightReport;
pub use parser::parse;
pub use publisher::{PublishedRun, RunMetadata, RunPublisher};
pub use summarizer::{Summarizer, SummaryProvider};
pub use summary::{FailedTest, PassedTest, RunStatus, RunSummary};
