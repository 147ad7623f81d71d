// Core types and errors

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// The result type used throughout the crate
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Convert reqwest::Error to our AnalysisError
impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        AnalysisError::RequestError {
            message: err.to_string(),
            details: None,
            location: None,
            source: Some(Arc::new(err) as Arc<dyn std::error::Error + Send + Sync>),
        }
    }
}

/// A secure container for API keys that automatically zeroes memory when dropped
pub struct SecureApiKey {
    key: String,
}

impl SecureApiKey {
    /// Create a new secure API key
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// Get a reference to the underlying key
    pub fn as_str(&self) -> &str {
        &self.key
    }
}

// Implement Deref for convenience in passing to reqwest headers
impl Deref for SecureApiKey {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.key
    }
}

// Implement Drop to zero memory when the key is dropped
impl Drop for SecureApiKey {
    fn drop(&mut self) {
        // Overwrite the string with zeros to remove sensitive data from memory
        unsafe {
            let bytes = self.key.as_bytes_mut();
            bytes.iter_mut().for_each(|b| *b = 0);
        }
    }
}

// Prevent accidental printing of API keys in logs/debug output
impl fmt::Debug for SecureApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecureApiKey([REDACTED])")
    }
}

// Display implementation also redacts the key
impl fmt::Display for SecureApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED API KEY]")
    }
}

impl Clone for SecureApiKey {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
        }
    }
}

#[derive(Debug, Error, Clone)]
pub enum AnalysisError {
    #[error("API request failed: {message}")]
    RequestError {
        message: String,
        details: Option<String>,
        location: Option<String>,
        source: Option<Arc<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Failed to parse model response: {message}")]
    ParseError {
        message: String,
        source_text: Option<String>,
        location: Option<String>,
        source: Option<Arc<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Rate limited by API: retry after {retry_after:?}")]
    RateLimited {
        retry_after: Option<Duration>,
        location: Option<String>,
    },

    #[error("API key not provided")]
    MissingApiKey,

    #[error("API returned error: {status} - {message}")]
    ApiError {
        status: u16,
        message: String,
        response_body: Option<String>,
        location: Option<String>,
    },

    #[error("Invalid parameter: {0}")]
    ValidationError(String),

    #[error("no reviews loaded")]
    EmptyReviewSet,

    #[error("no sentiment results available; run the sentiment pass first")]
    MissingSentimentPass,

    #[error("export failed: {message}")]
    ExportError {
        message: String,
        source: Option<Arc<dyn std::error::Error + Send + Sync>>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: Vec<Content>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
#[serde(rename_all = "snake_case")]
pub enum Content {
    Text { text: String },
}

#[derive(Debug, Serialize, Clone)]
pub struct MessageRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MessageResponse {
    pub id: String,
    pub model: String,
    pub r#type: String,
    pub role: Role,
    pub content: Vec<Content>,
    pub usage: Usage,
    pub stop_reason: Option<String>,
    pub stop_sequence: Option<String>,
}

impl MessageResponse {
    /// Text of the first content block, if any
    pub fn text(&self) -> Option<&str> {
        self.content.first().map(|block| {
            let Content::Text { text } = block;
            text.as_str()
        })
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Usage {
    #[serde(default)]
    pub input_tokens: u32,
    #[serde(default)]
    pub output_tokens: u32,
}

/// Chat model identifiers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChatModel {
    #[serde(rename = "claude-3-haiku-20240307")]
    Haiku,
    #[serde(rename = "claude-3-5-sonnet-20240620")]
    Sonnet,
    #[serde(rename = "claude-3-opus-20240229")]
    Opus,
    /// Use a custom model identifier
    Custom(String),
}

impl ChatModel {
    pub fn as_str(&self) -> &str {
        match self {
            ChatModel::Haiku => "claude-3-haiku-20240307",
            ChatModel::Sonnet => "claude-3-5-sonnet-20240620",
            ChatModel::Opus => "claude-3-opus-20240229",
            ChatModel::Custom(id) => id,
        }
    }
}

// Helper constructors with location and source tracking
impl AnalysisError {
    pub fn request_error<T: Into<String>>(
        message: T,
        details: Option<String>,
        source: Option<impl std::error::Error + Send + Sync + 'static>,
        location: Option<&str>,
    ) -> Self {
        let error = Self::RequestError {
            message: message.into(),
            details,
            location: location.map(String::from),
            source: source.map(|e| Arc::new(e) as Arc<dyn std::error::Error + Send + Sync>),
        };
        error.log();
        error
    }

    pub fn parse_error<T: Into<String>>(
        message: T,
        source_text: Option<String>,
        source: Option<impl std::error::Error + Send + Sync + 'static>,
        location: Option<&str>,
    ) -> Self {
        let error = Self::ParseError {
            message: message.into(),
            source_text,
            location: location.map(String::from),
            source: source.map(|e| Arc::new(e) as Arc<dyn std::error::Error + Send + Sync>),
        };
        error.log();
        error
    }

    pub fn api_error<T: Into<String>>(
        message: T,
        status: Option<u16>,
        response_body: Option<String>,
        location: Option<&str>,
    ) -> Self {
        let error = Self::ApiError {
            message: message.into(),
            status: status.unwrap_or(500),
            response_body,
            location: location.map(String::from),
        };
        error.log();
        error
    }

    pub fn export_error<T: Into<String>>(
        message: T,
        source: Option<impl std::error::Error + Send + Sync + 'static>,
    ) -> Self {
        let error = Self::ExportError {
            message: message.into(),
            source: source.map(|e| Arc::new(e) as Arc<dyn std::error::Error + Send + Sync>),
        };
        error.log();
        error
    }

    pub fn rate_limited(retry_after: Option<Duration>) -> Self {
        Self::RateLimited {
            retry_after,
            location: None,
        }
    }

    /// Where the error was raised, when the call site recorded it
    pub fn location(&self) -> Option<&str> {
        match self {
            Self::RequestError { location, .. } => location.as_deref(),
            Self::ParseError { location, .. } => location.as_deref(),
            Self::RateLimited { location, .. } => location.as_deref(),
            Self::ApiError { location, .. } => location.as_deref(),
            _ => None,
        }
    }

    pub fn source_error(&self) -> Option<&(dyn std::error::Error + Send + Sync)> {
        match self {
            Self::RequestError { source, .. } => source.as_ref().map(|s| s.as_ref()),
            Self::ParseError { source, .. } => source.as_ref().map(|s| s.as_ref()),
            Self::ExportError { source, .. } => source.as_ref().map(|s| s.as_ref()),
            _ => None,
        }
    }

    fn log(&self) {
        if let Some(loc) = self.location() {
            log::error!("{} at {}", self, loc);
        } else {
            log::error!("{}", self);
        }
    }
}

/// Helper function to sanitize error messages to prevent leaking sensitive information
pub fn sanitize_error_message(message: &str) -> String {
    // Remove any potential API keys
    let api_key_pattern = regex::Regex::new(r"[A-Za-z0-9_-]{20,}")
        .unwrap_or_else(|_| regex::Regex::new(r"").unwrap());
    let sanitized = api_key_pattern.replace_all(message, "[REDACTED]");

    sanitized.into_owned()
}
