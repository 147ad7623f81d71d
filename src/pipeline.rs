//! Batch orchestration of classification passes
//!
//! An [`AnalysisSession`] owns the loaded reviews and the per-review result
//! set for one batch. The two passes are independently re-runnable: the
//! sentiment pass rebuilds the record set from scratch (discarding any
//! previously extracted aspects), and the aspect pass fills in aspects on the
//! records the sentiment pass produced.
//!
//! Passes are strictly sequential — one classifier call in flight at a time,
//! in review order. Drive a session from its own task if an interactive
//! surface needs to stay responsive:
//!
//! ```no_run
//! # use review_insights::{AnalysisSession, ReviewClassifier, ChatClient, Review};
//! # async fn run() {
//! let classifier = ReviewClassifier::new(ChatClient::new("api-key"));
//! let mut session = AnalysisSession::with_reviews(vec![Review::new(1, "Great display")]);
//! let handle = tokio::spawn(async move {
//!     session.run_full(&classifier, |p| println!("{}", p.message)).await?;
//!     Ok::<_, review_insights::AnalysisError>(session)
//! });
//! # let _ = handle;
//! # }
//! ```

use crate::classifier::Classifier;
use crate::review::{AnalysisRecord, Review, ReviewSource};
use crate::types::{AnalysisError, AnalysisResult};

/// Which pass emitted a progress event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Sentiment,
    Aspect,
}

/// Advisory per-item telemetry, emitted strictly in review order.
#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub pass: Pass,
    /// 1-based index of the item just finished.
    pub current: usize,
    pub total: usize,
    pub message: String,
}

/// Session state for one analysis batch: the loaded reviews and the record
/// set the passes build up.
#[derive(Debug, Default)]
pub struct AnalysisSession {
    reviews: Vec<Review>,
    records: Vec<AnalysisRecord>,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session over an already-loaded batch of reviews.
    pub fn with_reviews(reviews: Vec<Review>) -> Self {
        Self {
            reviews,
            records: Vec::new(),
        }
    }

    /// Load reviews from a source, replacing any previously loaded batch.
    ///
    /// Returns the number of reviews loaded. Does not touch existing records;
    /// those are replaced by the next sentiment pass.
    pub async fn load(&mut self, source: &dyn ReviewSource) -> AnalysisResult<usize> {
        self.reviews = source.load_reviews().await?;
        Ok(self.reviews.len())
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// The current record set. Only meaningful once a pass has finished.
    pub fn records(&self) -> &[AnalysisRecord] {
        &self.records
    }

    /// Classify the overall sentiment of every loaded review.
    ///
    /// Replaces the record set wholesale: each review yields a fresh record
    /// with empty aspects, so aspects from a prior aspect pass do not survive
    /// a rerun.
    ///
    /// # Errors
    ///
    /// `EmptyReviewSet` when no reviews are loaded. Individual classification
    /// failures never surface here; the classifier degrades them to
    /// `(NEUTRAL, 0.5)`.
    pub async fn run_sentiment_pass<C, F>(
        &mut self,
        classifier: &C,
        mut on_progress: F,
    ) -> AnalysisResult<()>
    where
        C: Classifier + ?Sized,
        F: FnMut(ProgressEvent),
    {
        if self.reviews.is_empty() {
            return Err(AnalysisError::EmptyReviewSet);
        }

        let total = self.reviews.len();
        self.records.clear();
        self.records.reserve(total);

        for (i, review) in self.reviews.iter().enumerate() {
            let score = classifier.classify_sentiment(&review.text).await;
            self.records.push(AnalysisRecord {
                review_id: review.id,
                review_text: review.text.clone(),
                sentiment: score.label,
                confidence: score.confidence,
                aspects: Vec::new(),
            });
            on_progress(ProgressEvent {
                pass: Pass::Sentiment,
                current: i + 1,
                total,
                message: format!("Analyzing review {}/{}...", i + 1, total),
            });
        }

        Ok(())
    }

    /// Extract aspects for every record produced by the sentiment pass.
    ///
    /// Overwrites each record's aspect list in place, preserving the order
    /// the model returned. No merging with prior aspects.
    ///
    /// # Errors
    ///
    /// `MissingSentimentPass` when no records exist yet.
    pub async fn run_aspect_pass<C, F>(
        &mut self,
        classifier: &C,
        mut on_progress: F,
    ) -> AnalysisResult<()>
    where
        C: Classifier + ?Sized,
        F: FnMut(ProgressEvent),
    {
        if self.records.is_empty() {
            return Err(AnalysisError::MissingSentimentPass);
        }

        let total = self.records.len();
        for (i, record) in self.records.iter_mut().enumerate() {
            record.aspects = classifier.extract_aspects(&record.review_text).await;
            on_progress(ProgressEvent {
                pass: Pass::Aspect,
                current: i + 1,
                total,
                message: format!("Extracting aspects {}/{}...", i + 1, total),
            });
        }

        Ok(())
    }

    /// Sentiment pass followed immediately by an aspect pass over the
    /// just-produced records.
    pub async fn run_full<C, F>(&mut self, classifier: &C, mut on_progress: F) -> AnalysisResult<()>
    where
        C: Classifier + ?Sized,
        F: FnMut(ProgressEvent),
    {
        self.run_sentiment_pass(classifier, &mut on_progress)
            .await?;
        self.run_aspect_pass(classifier, &mut on_progress).await
    }
}
