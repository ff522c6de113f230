//! Runboard CLI
//!
//! Command-line interface for reporting Playwright runs to Notion.

pub mod commands;
pub mod output;
