//! Species label list loading.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::info;

/// On-disk label file shapes.
///
/// Either `{ "labels": ["name0", ...] }` or an index-keyed map
/// `{ "0": "name0", "1": "name1", ... }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum LabelFile {
    Wrapped { labels: Vec<String> },
    Indexed(BTreeMap<String, String>),
}

/// Parse a JSON label document into an ordered label list.
///
/// Index-keyed maps are sorted by numeric key before flattening, so
/// `"10"` sorts after `"9"`. An empty or malformed document is a fatal
/// configuration error: a silently-wrong label list would produce
/// confidently wrong species names.
pub fn parse_labels(bytes: &[u8]) -> Result<Vec<String>> {
    let parsed: LabelFile = serde_json::from_slice(bytes).map_err(|e| Error::Config {
        message: format!("invalid label file: {e}"),
    })?;

    let labels = match parsed {
        LabelFile::Wrapped { labels } => labels,
        LabelFile::Indexed(map) => {
            let mut entries = Vec::with_capacity(map.len());
            for (key, value) in map {
                let index = key.parse::<usize>().map_err(|_| Error::Config {
                    message: format!("label file has non-numeric index key '{key}'"),
                })?;
                entries.push((index, value));
            }
            entries.sort_unstable_by_key(|(index, _)| *index);
            entries.into_iter().map(|(_, value)| value).collect()
        }
    };

    if labels.is_empty() {
        return Err(Error::Config {
            message: "label list is empty".to_string(),
        });
    }

    Ok(labels)
}

/// Load the label list from a path or URL.
pub async fn load_labels(location: &str) -> Result<Vec<String>> {
    let bytes = super::fetch_asset(location)
        .await
        .map_err(|e| Error::Config {
            message: format!("labels not loaded from '{location}': {e}"),
        })?;

    let labels = parse_labels(&bytes)?;
    info!("Loaded {} species labels from {location}", labels.len());
    Ok(labels)
}
