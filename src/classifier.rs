//! Review classification over the chat client
//!
//! Two call shapes: overall-sentiment classification and aspect extraction.
//! Both are fail-soft at the [`Classifier`] surface: a transport failure or an
//! unparseable response degrades to a documented fallback value instead of
//! propagating, so a single bad response never aborts a batch. The inner
//! request/decode steps stay `Result`-typed so the fallback policy is explicit
//! and testable rather than hidden in a catch-all.

use crate::client::ChatClient;
use crate::review::{Aspect, SentimentLabel, SentimentScore};
use crate::types::*;
use crate::utils::json_extractor;
use async_trait::async_trait;

/// Confidence assigned when the response carries no parseable confidence token.
pub const DEFAULT_CONFIDENCE: f64 = 0.8;
/// Confidence assigned when classification itself fails.
pub const FALLBACK_CONFIDENCE: f64 = 0.5;

const SENTIMENT_TEMPERATURE: f32 = 0.3;
const SENTIMENT_MAX_TOKENS: u32 = 50;
const ASPECT_TEMPERATURE: f32 = 0.3;
const ASPECT_MAX_TOKENS: u32 = 300;

/// Classification seam the pipeline drives.
///
/// Both operations are total: failures are absorbed by the implementation and
/// reported through its fallback values.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify the overall sentiment of a review.
    async fn classify_sentiment(&self, text: &str) -> SentimentScore;

    /// Extract the product aspects mentioned in a review.
    async fn extract_aspects(&self, text: &str) -> Vec<Aspect>;
}

/// Production classifier backed by a [`ChatClient`].
pub struct ReviewClassifier {
    client: ChatClient,
    subject: String,
}

impl ReviewClassifier {
    pub fn new(client: ChatClient) -> Self {
        Self {
            client,
            subject: "product".to_string(),
        }
    }

    /// Set the product label threaded into both prompts, e.g. a product name.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    async fn request_sentiment(&self, text: &str) -> AnalysisResult<String> {
        let system = format!(
            "You are a sentiment analysis expert. Analyze the sentiment of \
             {} reviews and respond with only one word (POSITIVE, NEGATIVE, \
             or NEUTRAL) followed by a confidence score between 0 and 1. \
             Format: SENTIMENT CONFIDENCE",
            self.subject
        );
        let prompt = format!(
            "Analyze the sentiment of this {} review:\n\n{}",
            self.subject, text
        );

        let response = self
            .client
            .message()
            .system(system)?
            .user_message(prompt)?
            .temperature(SENTIMENT_TEMPERATURE)?
            .max_tokens(SENTIMENT_MAX_TOKENS)?
            .send()
            .await?;

        response_text(&response)
    }

    async fn request_aspects(&self, text: &str) -> AnalysisResult<String> {
        let system = format!(
            "You are an expert at extracting product aspects from reviews. \
             Extract key aspects/features mentioned in {} reviews and \
             indicate if they are mentioned positively or negatively.\n\n\
             Return ONLY a valid JSON array with this exact format:\n\
             [{{\"aspect\": \"display\", \"sentiment\": \"positive\"}}, \
             {{\"aspect\": \"price\", \"sentiment\": \"negative\"}}]\n\n\
             Common aspects: display, comfort, price, battery, software, \
             design, weight, apps, performance",
            self.subject
        );
        let prompt = format!("Extract aspects from this review:\n\n{}", text);

        let response = self
            .client
            .message()
            .system(system)?
            .user_message(prompt)?
            .temperature(ASPECT_TEMPERATURE)?
            .max_tokens(ASPECT_MAX_TOKENS)?
            .send()
            .await?;

        response_text(&response)
    }
}

#[async_trait]
impl Classifier for ReviewClassifier {
    async fn classify_sentiment(&self, text: &str) -> SentimentScore {
        let outcome = self
            .request_sentiment(text)
            .await
            .and_then(|raw| parse_sentiment(&raw));
        match outcome {
            Ok(score) => score,
            Err(err) => {
                log::warn!("sentiment classification failed: {}", err);
                SentimentScore::new(SentimentLabel::Neutral, FALLBACK_CONFIDENCE)
            }
        }
    }

    async fn extract_aspects(&self, text: &str) -> Vec<Aspect> {
        let outcome = self
            .request_aspects(text)
            .await
            .and_then(|raw| decode_aspects(&raw));
        match outcome {
            Ok(aspects) => aspects,
            Err(err) => {
                log::warn!("aspect extraction failed: {}", err);
                Vec::new()
            }
        }
    }
}

fn response_text(response: &MessageResponse) -> AnalysisResult<String> {
    response.text().map(str::to_string).ok_or_else(|| {
        AnalysisError::parse_error(
            "No text content in response",
            None,
            None::<serde_json::Error>,
            Some(concat!(file!(), ":", line!())),
        )
    })
}

/// Parse a raw sentiment response of the form `SENTIMENT CONFIDENCE`.
///
/// The response is split on whitespace. The first token is coerced into a
/// [`SentimentLabel`] (unknown tokens become `Neutral`); the second token is
/// taken as the confidence only when it consists of ASCII digits with at most
/// one decimal point, otherwise [`DEFAULT_CONFIDENCE`] applies. An empty
/// response is a parse error.
pub fn parse_sentiment(raw: &str) -> AnalysisResult<SentimentScore> {
    let mut tokens = raw.split_whitespace();
    let label_token = tokens.next().ok_or_else(|| {
        AnalysisError::parse_error(
            "empty sentiment response",
            Some(raw.to_string()),
            None::<serde_json::Error>,
            Some(concat!(file!(), ":", line!())),
        )
    })?;

    let label = SentimentLabel::from_token(label_token);
    let confidence = tokens
        .next()
        .and_then(parse_confidence_token)
        .unwrap_or(DEFAULT_CONFIDENCE);

    Ok(SentimentScore::new(label, confidence.clamp(0.0, 1.0)))
}

/// Accepts only tokens composed of ASCII digits and at most one decimal point.
fn parse_confidence_token(token: &str) -> Option<f64> {
    let mut dots = 0;
    for c in token.chars() {
        match c {
            '.' => dots += 1,
            c if c.is_ascii_digit() => {}
            _ => return None,
        }
    }
    if dots > 1 {
        return None;
    }
    token.parse().ok()
}

/// Decode an aspect-extraction response into a list of aspects.
///
/// A fenced code block is stripped before decoding. The decoded value must be
/// a JSON array; entries that are not objects are dropped, and object entries
/// default a missing or non-string `aspect` to `""` and `sentiment` to
/// `"neutral"`.
///
/// # Errors
///
/// Returns a `ParseError` when the payload is not decodable JSON or decodes
/// to something other than an array. [`Classifier::extract_aspects`] collapses
/// that to an empty list.
pub fn decode_aspects(raw: &str) -> AnalysisResult<Vec<Aspect>> {
    let payload = json_extractor::extract_json(raw)?;

    let value: serde_json::Value = serde_json::from_str(&payload).map_err(|e| {
        AnalysisError::parse_error(
            format!("Failed to parse aspect JSON: {}", e),
            Some(payload.clone()),
            Some(e),
            Some(concat!(file!(), ":", line!())),
        )
    })?;

    let entries = value.as_array().ok_or_else(|| {
        AnalysisError::parse_error(
            "aspect response is not a JSON array",
            Some(payload.clone()),
            None::<serde_json::Error>,
            Some(concat!(file!(), ":", line!())),
        )
    })?;

    Ok(entries
        .iter()
        .filter_map(|entry| {
            let obj = entry.as_object()?;
            Some(Aspect {
                name: obj
                    .get("aspect")
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or("")
                    .to_string(),
                sentiment: obj
                    .get("sentiment")
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or("neutral")
                    .to_string(),
            })
        })
        .collect())
}
