//! Notion database publishing

pub mod blocks;
pub mod client;
pub mod properties;

pub use blocks::{build_blocks, Block, RichText, TableRow};
pub use client::{NotionClient, MAX_CHILDREN_PER_REQUEST, NOTION_API_BASE, NOTION_VERSION};
pub use properties::{build_properties, CreatePageRequest, PageParent, PropertyValue};
