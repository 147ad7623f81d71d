//! Aggregate statistics over analysis records
//!
//! [`aggregate`] is a pure function of the current record set; the report it
//! returns is recomputed on demand and never persisted. Rankings are stable:
//! count descending, ties broken by first-encountered order.

use crate::review::{AnalysisRecord, SentimentLabel};
use std::collections::HashMap;

/// Top-N size for summary lists.
pub const TOP_SUMMARY: usize = 5;
/// Top-N size for chart data.
pub const TOP_CHART: usize = 10;
/// Top-N size for priority recommendations.
pub const TOP_PRIORITY: usize = 3;

/// Multiset counter that remembers first-insertion order, so equal counts
/// rank in the order their keys were first seen.
#[derive(Debug, Clone, Default)]
pub struct RankedCounter {
    index: HashMap<String, usize>,
    entries: Vec<(String, usize)>,
}

impl RankedCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), 1));
            }
        }
    }

    /// The `n` highest counts, stable across ties.
    pub fn most_common(&self, n: usize) -> Vec<(String, usize)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    /// The single highest-ranked entry.
    pub fn top(&self) -> Option<(String, usize)> {
        self.most_common(1).into_iter().next()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Entries in first-encountered order.
    pub fn iter(&self) -> impl Iterator<Item = &(String, usize)> {
        self.entries.iter()
    }
}

/// Polarity cross-tabulation for one aspect name.
///
/// Bucket keys are taken verbatim from the remote response; `"Positive"` and
/// `"positive"` land in separate buckets.
#[derive(Debug, Clone)]
pub struct AspectSentimentCounts {
    pub name: String,
    pub counts: HashMap<String, usize>,
}

impl AspectSentimentCounts {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            counts: HashMap::new(),
        }
    }

    /// Mentions with the given polarity bucket key.
    pub fn count(&self, polarity: &str) -> usize {
        self.counts.get(polarity).copied().unwrap_or(0)
    }

    /// Total mentions of this aspect across all polarities.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

/// Derived statistics for one record set.
#[derive(Debug, Clone, Default)]
pub struct AggregateReport {
    pub total_reviews: usize,
    positive: usize,
    negative: usize,
    neutral: usize,
    /// All aspect mentions by name, ranked stable.
    pub aspect_frequency: RankedCounter,
    /// Per-aspect polarity buckets, in first-encountered order.
    pub aspect_sentiment: Vec<AspectSentimentCounts>,
    /// Aspects mentioned with polarity exactly `"positive"`.
    pub positive_aspects: RankedCounter,
    /// Aspects mentioned with polarity exactly `"negative"`.
    pub negative_aspects: RankedCounter,
}

impl AggregateReport {
    /// Review count for a sentiment label.
    pub fn count(&self, label: SentimentLabel) -> usize {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Negative => self.negative,
            SentimentLabel::Neutral => self.neutral,
        }
    }

    /// Share of reviews with the label, as a percentage rounded to one
    /// decimal. 0.0 when the record set is empty.
    pub fn percentage(&self, label: SentimentLabel) -> f64 {
        if self.total_reviews == 0 {
            return 0.0;
        }
        let pct = self.count(label) as f64 / self.total_reviews as f64 * 100.0;
        (pct * 10.0).round() / 10.0
    }

    /// Total aspect mentions across all records.
    pub fn total_aspect_mentions(&self) -> usize {
        self.aspect_frequency.total()
    }

    /// Number of distinct aspect names.
    pub fn unique_aspects(&self) -> usize {
        self.aspect_frequency.len()
    }

    /// Most-mentioned aspects regardless of polarity.
    pub fn top_aspects(&self, n: usize) -> Vec<(String, usize)> {
        self.aspect_frequency.most_common(n)
    }

    /// Most positively-mentioned aspects.
    pub fn top_strengths(&self, n: usize) -> Vec<(String, usize)> {
        self.positive_aspects.most_common(n)
    }

    /// Most negatively-mentioned aspects.
    pub fn top_weaknesses(&self, n: usize) -> Vec<(String, usize)> {
        self.negative_aspects.most_common(n)
    }

    /// Cross-tabulation rows for the `n` most-mentioned aspects, for chart
    /// rendering.
    pub fn top_aspect_sentiment(&self, n: usize) -> Vec<&AspectSentimentCounts> {
        let mut ranked: Vec<&AspectSentimentCounts> = self.aspect_sentiment.iter().collect();
        ranked.sort_by(|a, b| b.total().cmp(&a.total()));
        ranked.truncate(n);
        ranked
    }
}

/// Compute an [`AggregateReport`] from the current record set.
pub fn aggregate(records: &[AnalysisRecord]) -> AggregateReport {
    let mut report = AggregateReport {
        total_reviews: records.len(),
        ..AggregateReport::default()
    };
    let mut cross_index: HashMap<String, usize> = HashMap::new();

    for record in records {
        match record.sentiment {
            SentimentLabel::Positive => report.positive += 1,
            SentimentLabel::Negative => report.negative += 1,
            SentimentLabel::Neutral => report.neutral += 1,
        }

        for aspect in &record.aspects {
            report.aspect_frequency.add(&aspect.name);

            let row = match cross_index.get(&aspect.name) {
                Some(&i) => i,
                None => {
                    let i = report.aspect_sentiment.len();
                    cross_index.insert(aspect.name.clone(), i);
                    report
                        .aspect_sentiment
                        .push(AspectSentimentCounts::new(&aspect.name));
                    i
                }
            };
            *report.aspect_sentiment[row]
                .counts
                .entry(aspect.sentiment.clone())
                .or_insert(0) += 1;

            match aspect.sentiment.as_str() {
                "positive" => report.positive_aspects.add(&aspect.name),
                "negative" => report.negative_aspects.add(&aspect.name),
                _ => {}
            }
        }
    }

    report
}
