use serde::{Deserialize, Deserializer, Serialize};

/// One page the structuring service places inside a chapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEntry {
    pub title: String,
    pub url: String,
    /// Nominally in `[0, 1]`; renderers clamp whatever arrives.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A chapter of the manual; `pages` are in reading order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub summary: String,
    pub pages: Vec<PageEntry>,
}

/// The chapter/page hierarchy returned by the structuring service.
///
/// Replaced wholesale on every request, never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualStructure {
    pub site_title: String,
    #[serde(default, deserialize_with = "page_estimate")]
    pub total_estimated_pages: u64,
    pub scraping_strategy: Vec<String>,
    pub chapters: Vec<Chapter>,
}

impl ManualStructure {
    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    /// Total number of pages across all chapters.
    pub fn page_count(&self) -> usize {
        self.chapters.iter().map(|c| c.pages.len()).sum()
    }

    /// First chapter id that appears more than once, if any.
    pub fn duplicate_chapter_id(&self) -> Option<&str> {
        let mut seen = std::collections::HashSet::new();
        self.chapters
            .iter()
            .map(|c| c.id.as_str())
            .find(|id| !seen.insert(*id))
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Estimates arrive as JSON numbers; `12.0` is as good as `12`.
fn page_estimate<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Estimate {
        Whole(u64),
        Float(f64),
    }

    match Option::<Estimate>::deserialize(deserializer)? {
        None => Ok(0),
        Some(Estimate::Whole(value)) => Ok(value),
        Some(Estimate::Float(value))
            if value.is_finite() && value >= 0.0 && value.fract() == 0.0 =>
        {
            Ok(value as u64)
        }
        Some(Estimate::Float(value)) => Err(serde::de::Error::custom(format!(
            "page estimate must be a non-negative whole number, got {value}"
        ))),
    }
}

/// Relevance as a display fraction: absent and NaN become 0, the rest is
/// clamped to `[0, 1]`.
pub fn clamped_relevance(relevance: Option<f64>) -> f64 {
    match relevance {
        Some(value) if value.is_nan() => 0.0,
        Some(value) => value.clamp(0.0, 1.0),
        None => 0.0,
    }
}
