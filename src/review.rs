//! Review data model and review sources
//!
//! A [`ReviewSource`] hands the pipeline an ordered batch of reviews. The
//! relational collaborator behind it owns table and column discovery; the one
//! convention the core relies on is that the review text is the **last**
//! column of each row (see [`RowSource`]).

use crate::types::AnalysisResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single product review, as loaded from the source.
///
/// Ids are sequential and 1-based, assigned at load time. Immutable once
/// loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: u32,
    pub text: String,
}

impl Review {
    pub fn new(id: u32, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

/// Overall sentiment of a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Coerce a classifier token into a label.
    ///
    /// Matching is case-insensitive; anything outside the known set maps to
    /// `Neutral`.
    pub fn from_token(token: &str) -> Self {
        match token.to_ascii_uppercase().as_str() {
            "POSITIVE" => SentimentLabel::Positive,
            "NEGATIVE" => SentimentLabel::Negative,
            _ => SentimentLabel::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "POSITIVE",
            SentimentLabel::Negative => "NEGATIVE",
            SentimentLabel::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified sentiment with its confidence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentScore {
    pub label: SentimentLabel,
    /// Always within [0, 1].
    pub confidence: f64,
}

impl SentimentScore {
    pub fn new(label: SentimentLabel, confidence: f64) -> Self {
        Self { label, confidence }
    }
}

/// A product aspect mentioned in a review, with the polarity the model
/// assigned to it.
///
/// Both fields are preserved verbatim from the remote response: aspect names
/// are not case-normalized, and the polarity string is whatever the model
/// returned (`"positive"`, `"negative"`, `"neutral"` expected but not
/// enforced).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aspect {
    #[serde(rename = "aspect", default)]
    pub name: String,
    #[serde(default = "neutral_polarity")]
    pub sentiment: String,
}

fn neutral_polarity() -> String {
    "neutral".to_string()
}

impl Aspect {
    pub fn new(name: impl Into<String>, sentiment: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sentiment: sentiment.into(),
        }
    }
}

/// Per-review analysis result: overall sentiment plus extracted aspects.
///
/// Created with empty aspects by the sentiment pass; the aspect pass
/// overwrites `aspects` in place. The serialized form is the export contract:
/// `review_id`, `review_text`, `sentiment`, `confidence`, `aspects`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub review_id: u32,
    pub review_text: String,
    pub sentiment: SentimentLabel,
    pub confidence: f64,
    pub aspects: Vec<Aspect>,
}

/// Provider of an ordered batch of reviews.
#[async_trait]
pub trait ReviewSource: Send + Sync {
    async fn load_reviews(&self) -> AnalysisResult<Vec<Review>>;
}

/// Review source over a plain list of texts.
pub struct StaticReviews {
    texts: Vec<String>,
}

impl StaticReviews {
    pub fn new<T: Into<String>>(texts: Vec<T>) -> Self {
        Self {
            texts: texts.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl ReviewSource for StaticReviews {
    async fn load_reviews(&self) -> AnalysisResult<Vec<Review>> {
        Ok(self
            .texts
            .iter()
            .enumerate()
            .map(|(i, text)| Review::new(i as u32 + 1, text.clone()))
            .collect())
    }
}

/// Review source over rows fetched from a relational store.
///
/// The collaborator resolves the table and hands over raw rows; the review
/// text is taken from the last column of each row. Empty rows yield empty
/// text.
pub struct RowSource {
    rows: Vec<Vec<String>>,
}

impl RowSource {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }
}

#[async_trait]
impl ReviewSource for RowSource {
    async fn load_reviews(&self) -> AnalysisResult<Vec<Review>> {
        Ok(self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let text = row.last().cloned().unwrap_or_default();
                Review::new(i as u32 + 1, text)
            })
            .collect())
    }
}
