//! Notion block payloads and the run page layout

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::summary::RunSummary;
use crate::text::{format_duration, truncate, RICH_TEXT_MAX};

pub const AI_SUMMARY_HEADING: &str = "Regression summary";
pub const FAILED_HEADING: &str = "Failed tests";
pub const PASSED_HEADING: &str = "Passed";
const NO_ERROR_DETAILS: &str = "No error details";
const TABLE_HEADER: [&str; 3] = ["Test", "Duration", "Status"];

/// A plain text run, truncated to Notion's rich-text limit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RichText {
    #[serde(rename = "type")]
    kind: &'static str,
    text: TextContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct TextContent {
    content: String,
}

impl RichText {
    pub fn plain(content: &str) -> Self {
        Self {
            kind: "text",
            text: TextContent {
                content: truncate(content, RICH_TEXT_MAX),
            },
        }
    }

    pub fn content(&self) -> &str {
        &self.text.content
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub cells: Vec<Vec<RichText>>,
}

impl TableRow {
    fn from_cells<'a>(cells: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            cells: cells.into_iter().map(|c| vec![RichText::plain(c)]).collect(),
        }
    }
}

/// One unit of page content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading2(Vec<RichText>),
    Heading3(Vec<RichText>),
    Paragraph(Vec<RichText>),
    Quote(Vec<RichText>),
    Table {
        width: usize,
        has_column_header: bool,
        rows: Vec<TableRow>,
    },
    TableRow(TableRow),
}

impl Block {
    pub fn heading_2(text: &str) -> Self {
        Block::Heading2(vec![RichText::plain(text)])
    }

    pub fn heading_3(text: &str) -> Self {
        Block::Heading3(vec![RichText::plain(text)])
    }

    pub fn paragraph(text: &str) -> Self {
        Block::Paragraph(vec![RichText::plain(text)])
    }

    pub fn quote(text: &str) -> Self {
        Block::Quote(vec![RichText::plain(text)])
    }

    /// Notion's `type` discriminator
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Heading2(_) => "heading_2",
            Block::Heading3(_) => "heading_3",
            Block::Paragraph(_) => "paragraph",
            Block::Quote(_) => "quote",
            Block::Table { .. } => "table",
            Block::TableRow(_) => "table_row",
        }
    }
}

#[derive(Serialize)]
struct TextBody<'a> {
    rich_text: &'a [RichText],
}

#[derive(Serialize)]
struct TableBody<'a> {
    table_width: usize,
    has_column_header: bool,
    children: Vec<RowBlock<'a>>,
}

struct RowBlock<'a>(&'a TableRow);

impl Serialize for RowBlock<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_block(serializer, "table_row", self.0)
    }
}

/// `{ "object": "block", "type": kind, kind: body }`
fn serialize_block<S, B>(serializer: S, kind: &'static str, body: &B) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    B: Serialize + ?Sized,
{
    let mut map = serializer.serialize_map(Some(3))?;
    map.serialize_entry("object", "block")?;
    map.serialize_entry("type", kind)?;
    map.serialize_entry(kind, body)?;
    map.end()
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Block::Heading2(text)
            | Block::Heading3(text)
            | Block::Paragraph(text)
            | Block::Quote(text) => {
                serialize_block(serializer, self.kind(), &TextBody { rich_text: text })
            }
            Block::Table {
                width,
                has_column_header,
                rows,
            } => serialize_block(
                serializer,
                self.kind(),
                &TableBody {
                    table_width: *width,
                    has_column_header: *has_column_header,
                    children: rows.iter().map(RowBlock).collect(),
                },
            ),
            Block::TableRow(row) => serialize_block(serializer, self.kind(), row),
        }
    }
}

/// Page content: AI summary, then failures, then a table of passes
pub fn build_blocks(summary: &RunSummary, ai_summary: Option<&str>) -> Vec<Block> {
    let mut blocks = Vec::new();

    if let Some(text) = ai_summary.filter(|t| !t.is_empty()) {
        blocks.push(Block::heading_2(AI_SUMMARY_HEADING));
        blocks.push(Block::paragraph(text));
    }

    if !summary.failed.is_empty() {
        blocks.push(Block::heading_2(FAILED_HEADING));
        for failed in &summary.failed {
            let title = if failed.full_title.is_empty() {
                &failed.title
            } else {
                &failed.full_title
            };
            let body = if failed.error_body.is_empty() {
                NO_ERROR_DETAILS
            } else {
                &failed.error_body
            };
            blocks.push(Block::heading_3(title));
            blocks.push(Block::quote(body));
        }
    }

    if !summary.passed.is_empty() {
        blocks.push(Block::heading_2(PASSED_HEADING));

        let mut rows = Vec::with_capacity(summary.passed.len() + 1);
        rows.push(TableRow::from_cells(TABLE_HEADER));
        for passed in &summary.passed {
            let duration = format_duration(passed.duration_ms);
            rows.push(TableRow::from_cells([
                passed.title.as_str(),
                duration.as_str(),
                passed.status.as_str(),
            ]));
        }

        blocks.push(Block::Table {
            width: TABLE_HEADER.len(),
            has_column_header: true,
            rows,
        });
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::{FailedTest, PassedTest};
    use serde_json::json;

    fn summary() -> RunSummary {
        RunSummary {
            passed: vec![PassedTest {
                title: "home loads".to_string(),
                duration_ms: 2500,
                status: "Passed".to_string(),
            }],
            failed: vec![FailedTest {
                full_title: "chromium › catalog.spec.ts › lists products".to_string(),
                title: "lists products".to_string(),
                error_body: String::new(),
            }],
            total: 2,
            passed_count: 1,
            failed_count: 1,
            duration_ms: 4000,
            duration_sec: 4,
        }
    }

    #[test]
    fn test_block_wire_shape() {
        let value = serde_json::to_value(Block::heading_2("Passed")).unwrap();
        assert_eq!(
            value,
            json!({
                "object": "block",
                "type": "heading_2",
                "heading_2": { "rich_text": [{ "type": "text", "text": { "content": "Passed" } }] }
            })
        );
    }

    #[test]
    fn test_table_wire_shape() {
        let blocks = build_blocks(&summary(), None);
        let table = serde_json::to_value(blocks.last().unwrap()).unwrap();

        assert_eq!(table["type"], "table");
        assert_eq!(table["table"]["table_width"], 3);
        assert_eq!(table["table"]["has_column_header"], true);

        let rows = table["table"]["children"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["type"], "table_row");
        assert_eq!(rows[0]["table_row"]["cells"][0][0]["text"]["content"], "Test");
        assert_eq!(rows[1]["table_row"]["cells"][0][0]["text"]["content"], "home loads");
        assert_eq!(rows[1]["table_row"]["cells"][1][0]["text"]["content"], "2.5s");
        assert_eq!(rows[1]["table_row"]["cells"][2][0]["text"]["content"], "Passed");
    }

    #[test]
    fn test_layout_order() {
        let blocks = build_blocks(&summary(), Some("Catalog API returned 500s."));
        let kinds: Vec<_> = blocks.iter().map(Block::kind).collect();
        assert_eq!(
            kinds,
            ["heading_2", "paragraph", "heading_2", "heading_3", "quote", "heading_2", "table"]
        );

        assert_eq!(blocks[0], Block::heading_2(AI_SUMMARY_HEADING));
        assert_eq!(blocks[2], Block::heading_2(FAILED_HEADING));
        assert_eq!(blocks[3], Block::heading_3("chromium › catalog.spec.ts › lists products"));
        assert_eq!(blocks[4], Block::quote("No error details"));
        assert_eq!(blocks[5], Block::heading_2(PASSED_HEADING));
    }

    #[test]
    fn test_sections_are_omitted_when_empty() {
        assert!(build_blocks(&RunSummary::default(), None).is_empty());

        let mut only_passed = summary();
        only_passed.failed.clear();
        let kinds: Vec<_> = build_blocks(&only_passed, None).iter().map(Block::kind).collect();
        assert_eq!(kinds, ["heading_2", "table"]);
    }

    #[test]
    fn test_long_text_is_truncated() {
        let long = "e".repeat(RICH_TEXT_MAX * 2);
        match Block::quote(&long) {
            Block::Quote(text) => {
                assert_eq!(text[0].content().chars().count(), RICH_TEXT_MAX);
                assert!(text[0].content().ends_with('…'));
            }
            other => panic!("unexpected block {:?}", other),
        }
    }
}
