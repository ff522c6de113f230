//! CLI subcommands

pub mod publish;
pub mod summary;
