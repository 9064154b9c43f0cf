//! Report layout: section titles and the groupings to compute.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{SummaryError, SummaryResult};

/// One grouped section: the key columns plus optional presentation overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupingSpec {
    /// Grouping column names, in key order.
    pub keys: Vec<String>,
    /// Section title. Defaults to `SUMMARY BY 'k'` / `SUMMARY BY (k1, k2)`.
    #[serde(default)]
    pub title: Option<String>,
    /// Names printed in group headers (`label = value`). Ignored unless one per key.
    #[serde(default)]
    pub labels: Option<Vec<String>>,
}

impl GroupingSpec {
    /// Group by `keys` with default title and labels.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            title: None,
            labels: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    /// The section title to print.
    pub fn resolved_title(&self) -> String {
        if let Some(title) = &self.title {
            return title.clone();
        }
        match self.keys.as_slice() {
            [single] => format!("SUMMARY BY '{single}'"),
            keys => format!("SUMMARY BY ({})", keys.join(", ")),
        }
    }

    /// The labels to print in group headers.
    pub fn resolved_labels(&self) -> Vec<String> {
        match &self.labels {
            Some(labels) if labels.len() == self.keys.len() => labels.clone(),
            _ => self.keys.clone(),
        }
    }
}

fn default_overall_title() -> String {
    "OVERALL DATASET SUMMARY".to_string()
}

/// Which sections a report contains, in order: the overall summary, then one section per
/// grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLayout {
    /// Title of the overall-summary section.
    #[serde(default = "default_overall_title")]
    pub overall_title: String,
    /// Grouped sections, in report order.
    #[serde(default)]
    pub groupings: Vec<GroupingSpec>,
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self {
            overall_title: default_overall_title(),
            groupings: Vec::new(),
        }
    }
}

impl ReportLayout {
    /// A layout with only an overall section titled `overall_title`.
    pub fn new(overall_title: impl Into<String>) -> Self {
        Self {
            overall_title: overall_title.into(),
            groupings: Vec::new(),
        }
    }

    /// Append a grouped section.
    pub fn with_grouping(mut self, grouping: GroupingSpec) -> Self {
        self.groupings.push(grouping);
        self
    }

    /// Parse a layout from JSON.
    ///
    /// ```rust
    /// use tabular_summary::report::ReportLayout;
    ///
    /// let layout = ReportLayout::from_json_str(r#"{"groupings": [{"keys": ["id", "url"]}]}"#).unwrap();
    /// assert_eq!(layout.overall_title, "OVERALL DATASET SUMMARY");
    /// assert_eq!(layout.groupings[0].resolved_title(), "SUMMARY BY (id, url)");
    /// ```
    pub fn from_json_str(json: &str) -> SummaryResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON layout file.
    pub fn from_json_path(path: impl AsRef<Path>) -> SummaryResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| SummaryError::from(e).with_path(path))?;
        Self::from_json_str(&text).map_err(|e| e.with_path(path))
    }
}

/// Built-in layouts for the social-media datasets this crate was written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetPreset {
    /// Twitter posts, grouped by `id` and by (`id`, `url`).
    TwitterPosts,
    /// Facebook posts, grouped by `Facebook_Id` and by (`Facebook_Id`, `post_id`).
    FacebookPosts,
    /// Facebook ads, grouped by `page_id` and by (`page_id`, `ad_id`).
    FacebookAds,
}

impl DatasetPreset {
    /// All presets.
    pub const ALL: [DatasetPreset; 3] = [Self::TwitterPosts, Self::FacebookPosts, Self::FacebookAds];

    /// Short name accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::TwitterPosts => "twitter-posts",
            Self::FacebookPosts => "facebook-posts",
            Self::FacebookAds => "facebook-ads",
        }
    }

    /// The report layout for this dataset.
    pub fn layout(self) -> ReportLayout {
        match self {
            Self::TwitterPosts => ReportLayout::new("TWITTER POSTS DATASET - OVERALL SUMMARY")
                .with_grouping(GroupingSpec::new(["id"]))
                .with_grouping(GroupingSpec::new(["id", "url"])),
            Self::FacebookPosts => ReportLayout::new("FACEBOOK POSTS DATASET - OVERALL SUMMARY")
                .with_grouping(GroupingSpec::new(["Facebook_Id"]))
                .with_grouping(GroupingSpec::new(["Facebook_Id", "post_id"])),
            Self::FacebookAds => ReportLayout::new("OVERALL DATASET SUMMARY")
                .with_grouping(
                    GroupingSpec::new(["page_id"])
                        .with_title("SUMMARY BY PAGE_ID")
                        .with_labels(["PAGE_ID"]),
                )
                .with_grouping(
                    GroupingSpec::new(["page_id", "ad_id"])
                        .with_title("SUMMARY BY (PAGE_ID, AD_ID)")
                        .with_labels(["PAGE_ID", "AD_ID"]),
                ),
        }
    }
}

impl FromStr for DatasetPreset {
    type Err = SummaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SummaryError::UnknownPreset {
                name: s.to_string(),
                expected: Self::ALL.iter().map(|p| p.name().to_string()).collect(),
            })
    }
}
