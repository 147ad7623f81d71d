//! # review-insights: aspect-based sentiment analysis for product reviews
//!
//! This crate classifies batches of product reviews through a remote
//! chat-completion API: overall sentiment per review, per-aspect sentiment,
//! aggregate statistics, and a textual recommendations report.
//!
//! ## Key Features
//!
//! - Two-pass analysis pipeline (sentiment, then aspect extraction) over an
//!   explicit session object, re-runnable pass by pass
//! - Fail-soft classification: a bad response degrades to a documented
//!   fallback instead of aborting the batch
//! - Stable ranked aggregates: sentiment distribution, aspect frequency, and
//!   aspect-sentiment cross tabulation
//! - Deterministic summary and recommendations rendering
//! - JSON record export and plain-text report export
//! - Secure API key handling with memory zeroing
//!
//! ## Basic Usage
//!
//! ```no_run
//! use review_insights::{
//!     aggregate, build_insights, from_env, AnalysisSession, ReviewClassifier, StaticReviews,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create a client from environment variable
//!     let classifier = ReviewClassifier::new(from_env()?).with_subject("Vision Pro");
//!
//!     let source = StaticReviews::new(vec![
//!         "The display is stunning but the price is steep.",
//!         "Too heavy for long sessions.",
//!     ]);
//!
//!     let mut session = AnalysisSession::new();
//!     session.load(&source).await?;
//!     session
//!         .run_full(&classifier, |progress| eprintln!("{}", progress.message))
//!         .await?;
//!
//!     let report = aggregate(session.records());
//!     println!("{}", build_insights(&report, "Vision Pro"));
//!
//!     Ok(())
//! }
//! ```

pub mod types;
pub mod client;
mod builder;
pub mod classifier;
pub mod review;
pub mod pipeline;
pub mod aggregate;
pub mod insights;
pub mod export;
pub mod utils;

// Re-export core components
pub use builder::MessageBuilder;
pub use client::{set_tls_config, ChatClient, MockApiHandler, TlsConfig};
pub use types::{
    sanitize_error_message, AnalysisError, AnalysisResult, ChatModel, Content, Message,
    MessageResponse, Role, SecureApiKey,
};

// Re-export analysis components
pub use aggregate::{aggregate, AggregateReport, AspectSentimentCounts, RankedCounter};
pub use classifier::{Classifier, ReviewClassifier};
pub use export::{export_records, export_text, write_records_json, write_text};
pub use insights::{build_insights, render_summary};
pub use pipeline::{AnalysisSession, Pass, ProgressEvent};
pub use review::{
    AnalysisRecord, Aspect, Review, ReviewSource, RowSource, SentimentLabel, SentimentScore,
    StaticReviews,
};

pub mod prelude {
    //! Convenient imports for commonly used types and functions
    pub use crate::{
        aggregate, build_insights, from_env, render_summary, AggregateReport, AnalysisError,
        AnalysisRecord, AnalysisResult, AnalysisSession, Aspect, ChatClient, ChatModel, Classifier,
        ProgressEvent, Review, ReviewClassifier, ReviewSource, SentimentLabel, SentimentScore,
        StaticReviews,
    };
}

// Entry point functions
pub fn new_client(api_key: impl Into<String>) -> ChatClient {
    ChatClient::new(api_key)
}

pub fn from_env() -> Result<ChatClient, AnalysisError> {
    match std::env::var("ANTHROPIC_API_KEY") {
        Ok(key) => Ok(ChatClient::new(key)),
        Err(_) => Err(AnalysisError::MissingApiKey),
    }
}
