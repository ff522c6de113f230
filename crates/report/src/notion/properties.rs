//! Database properties of a run page

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::blocks::RichText;
use crate::publisher::RunMetadata;
use crate::summary::RunSummary;

pub const RUN_DATE: &str = "Run date";
pub const RUN_NAME: &str = "Run name";
pub const ENVIRONMENT: &str = "Environment";
pub const PASSED: &str = "Passed";
pub const FAILED: &str = "Failed";
pub const DURATION: &str = "Duration";
pub const STATUS: &str = "Status";
pub const ARTIFACT_LINK: &str = "Artifact link";

/// A typed property value, e.g. `{ "number": 3 }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyValue {
    Date { start: String },
    Title(Vec<RichText>),
    Select { name: String },
    Number(u64),
    Url(String),
}

#[derive(Debug, Serialize)]
pub struct CreatePageRequest {
    pub parent: PageParent,
    pub properties: BTreeMap<String, PropertyValue>,
}

#[derive(Debug, Serialize)]
pub struct PageParent {
    pub database_id: String,
}

/// Values for every recognized property the database actually has,
/// keyed by property id. Unknown names are left out.
pub fn build_properties(
    ids: &HashMap<String, String>,
    summary: &RunSummary,
    metadata: &RunMetadata,
) -> BTreeMap<String, PropertyValue> {
    let mut candidates = vec![
        (
            RUN_DATE,
            PropertyValue::Date {
                start: metadata.run_date_iso(),
            },
        ),
        (RUN_NAME, PropertyValue::Title(vec![RichText::plain(&metadata.run_name)])),
        (
            ENVIRONMENT,
            PropertyValue::Select {
                name: metadata.environment.clone(),
            },
        ),
        (PASSED, PropertyValue::Number(summary.passed_count as u64)),
        (FAILED, PropertyValue::Number(summary.failed_count as u64)),
        (DURATION, PropertyValue::Number(summary.duration_sec)),
        (
            STATUS,
            PropertyValue::Select {
                name: summary.status().to_string(),
            },
        ),
    ];

    if let Some(url) = metadata.artifact_url.as_deref().filter(|u| !u.is_empty()) {
        candidates.push((ARTIFACT_LINK, PropertyValue::Url(url.to_string())));
    }

    candidates
        .into_iter()
        .filter_map(|(name, value)| ids.get(name).map(|id| (id.clone(), value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn metadata(artifact_url: Option<&str>) -> RunMetadata {
        RunMetadata {
            run_date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            run_name: "Nightly".to_string(),
            environment: "staging".to_string(),
            artifact_url: artifact_url.map(String::from),
        }
    }

    fn summary() -> RunSummary {
        RunSummary {
            passed_count: 2,
            failed_count: 1,
            total: 3,
            duration_ms: 61_400,
            duration_sec: 61,
            ..Default::default()
        }
    }

    fn all_ids() -> HashMap<String, String> {
        [
            RUN_DATE,
            RUN_NAME,
            ENVIRONMENT,
            PASSED,
            FAILED,
            DURATION,
            STATUS,
            ARTIFACT_LINK,
        ]
        .iter()
        .enumerate()
        .map(|(i, name)| (name.to_string(), format!("id{}", i)))
        .collect()
    }

    #[test]
    fn test_all_properties() {
        let props = build_properties(&all_ids(), &summary(), &metadata(Some("https://ci/run/1")));
        let value = serde_json::to_value(&props).unwrap();

        assert_eq!(value["id0"], json!({ "date": { "start": "2026-03-14" } }));
        assert_eq!(value["id1"]["title"][0]["text"]["content"], "Nightly");
        assert_eq!(value["id2"], json!({ "select": { "name": "staging" } }));
        assert_eq!(value["id3"], json!({ "number": 2 }));
        assert_eq!(value["id4"], json!({ "number": 1 }));
        assert_eq!(value["id5"], json!({ "number": 61 }));
        assert_eq!(value["id6"], json!({ "select": { "name": "Partial" } }));
        assert_eq!(value["id7"], json!({ "url": "https://ci/run/1" }));
    }

    #[test]
    fn test_missing_properties_are_omitted() {
        let ids: HashMap<_, _> = [(PASSED.to_string(), "p".to_string())].into_iter().collect();
        let props = build_properties(&ids, &summary(), &metadata(None));

        assert_eq!(props.len(), 1);
        assert_eq!(props["p"], PropertyValue::Number(2));
    }

    #[test]
    fn test_artifact_link_needs_a_url() {
        let props = build_properties(&all_ids(), &summary(), &metadata(None));
        assert!(!props.contains_key("id7"));
        assert_eq!(props.len(), 7);
    }
}
