//! Error types for run reporting

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Report file not found: {0}")]
    ReportNotFound(PathBuf),

    #[error("Failed to parse report JSON: {0}")]
    InvalidReport(#[source] serde_json::Error),

    #[error("Notion {operation} failed: {status} {body}")]
    Notion {
        operation: &'static str,
        status: u16,
        body: String,
    },

    #[error("{provider} AI summary failed: {message}")]
    Provider { provider: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type ReportResult<T> = Result<T, ReportError>;
