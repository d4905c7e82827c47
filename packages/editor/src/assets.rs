//! Uploaded assets carried alongside the page

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub name: String,
    /// MIME type, e.g. `image/png`
    #[serde(rename = "type")]
    pub kind: String,
    pub size: u64,
    pub url: String,
    pub date_added: DateTime<Utc>,
}

impl Asset {
    pub fn is_image(&self) -> bool {
        self.kind.starts_with("image/")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssetFilter {
    #[default]
    All,
    Images,
    Other,
}

/// Assets whose name contains `term` (case-insensitive) and match `filter`
pub fn filter_assets<'a>(assets: &'a [Asset], term: &str, filter: AssetFilter) -> Vec<&'a Asset> {
    let term = term.to_lowercase();
    assets
        .iter()
        .filter(|asset| asset.name.to_lowercase().contains(&term))
        .filter(|asset| match filter {
            AssetFilter::All => true,
            AssetFilter::Images => asset.is_image(),
            AssetFilter::Other => !asset.is_image(),
        })
        .collect()
}
