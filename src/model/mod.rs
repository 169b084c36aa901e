//! Input data model: articles, classified tiles and clusters
//!
//! These mirror the wire shape produced by the fetch and summarization
//! services. Numeric fields are normalized when a value is built or
//! deserialized, so downstream layout code never has to re-check them.

use crate::error::MosaicError;
use crate::sentiment::IntensityLevel;
use anyhow::Context;
use chrono::DateTime;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// Cluster titles equal to this placeholder are treated as missing
pub const PLACEHOLDER_TITLE: &str = "Summary";

/// A fetched news article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub published_at: String,
    #[serde(default)]
    pub url: String,
}

impl Article {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            snippet: String::new(),
            source: String::new(),
            published_at: String::new(),
            url: String::new(),
        }
    }
}

/// Editorial classification of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TileType {
    Fact,
    Analysis,
    Opinion,
    #[default]
    Unverified,
}

/// An article decorated with classification data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub article: Article,
    #[serde(default)]
    pub tile_type: TileType,
    #[serde(default)]
    pub one_line_takeaway: String,
    #[serde(default)]
    pub topic_tags: Vec<String>,
    /// Sentiment polarity, nominally in [-1, 1]
    #[serde(default, deserialize_with = "finite_or_zero")]
    pub valence: f64,
    /// Emotional intensity; read through [`Tile::intensity01`]
    #[serde(default, deserialize_with = "finite_or_zero")]
    pub intensity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity_level: Option<IntensityLevel>,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
}

fn default_confidence() -> f64 {
    0.5
}

/// Missing, null and non-finite numbers all become 0
fn finite_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(normalize_finite(value.unwrap_or(0.0)))
}

fn normalize_finite(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

impl Tile {
    pub fn new(article: Article, tile_type: TileType) -> Self {
        Self {
            article,
            tile_type,
            one_line_takeaway: String::new(),
            topic_tags: Vec::new(),
            valence: 0.0,
            intensity: 0.0,
            intensity_level: None,
            confidence: default_confidence(),
        }
    }

    /// Set valence and intensity, substituting 0 for non-finite input
    pub fn with_sentiment(mut self, valence: f64, intensity: f64) -> Self {
        self.valence = normalize_finite(valence);
        self.intensity = normalize_finite(intensity);
        self
    }

    pub fn with_takeaway(mut self, takeaway: impl Into<String>) -> Self {
        self.one_line_takeaway = takeaway.into();
        self
    }

    /// Intensity clamped into [0, 1]
    pub fn intensity01(&self) -> f64 {
        normalize_finite(self.intensity).clamp(0.0, 1.0)
    }

    pub fn display_title(&self) -> &str {
        non_blank(&self.article.title).unwrap_or("Untitled")
    }

    pub fn display_source(&self) -> &str {
        non_blank(&self.article.source).unwrap_or("Unknown")
    }

    /// Publication time for tooltips; unparseable stamps are shown verbatim
    pub fn display_time(&self) -> String {
        let raw = self.article.published_at.trim();
        if raw.is_empty() {
            return String::new();
        }
        match DateTime::parse_from_rfc3339(raw) {
            Ok(ts) => ts.format("%Y-%m-%d %H:%M").to_string(),
            Err(_) => raw.to_string(),
        }
    }
}

/// One dated event in a cluster timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub event: String,
}

/// Narrative summary of a cluster, possibly loaded after the cluster itself
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClusterSummary {
    #[serde(default)]
    pub cluster_title: String,
    #[serde(default)]
    pub what_happened: String,
    #[serde(default)]
    pub why_it_matters: Vec<String>,
    #[serde(default)]
    pub what_to_watch: Vec<String>,
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,
}

/// A group of tiles describing the same story
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub cluster_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<ClusterSummary>,
    #[serde(default)]
    pub items: Vec<Tile>,
}

impl Cluster {
    pub fn new(cluster_id: impl Into<String>, items: Vec<Tile>) -> Self {
        Self {
            cluster_id: cluster_id.into(),
            summary: None,
            items,
        }
    }

    pub fn with_summary(mut self, summary: ClusterSummary) -> Self {
        self.summary = Some(summary);
        self
    }

    /// Title from the summary, if one has arrived and is not a placeholder
    pub fn title(&self) -> Option<&str> {
        self.summary
            .as_ref()
            .and_then(|s| non_blank(&s.cluster_title))
            .filter(|t| *t != PLACEHOLDER_TITLE)
    }

    /// Title, or `"Cluster {id}"` while no usable summary exists
    pub fn display_name(&self) -> String {
        match self.title() {
            Some(title) => title.to_string(),
            None => format!("Cluster {}", self.cluster_id),
        }
    }
}

/// Read a JSON array of clusters from disk
pub fn load_clusters(path: &Path) -> crate::Result<Vec<Cluster>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read clusters from {}", path.display()))?;
    serde_json::from_str(&content).map_err(|e| MosaicError::Json {
        source: e,
        context: format!("Failed to parse clusters: {}", path.display()),
    })
}

fn non_blank(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(s)
    }
}
