//! JSON extraction utilities
//!
//! Models rarely return bare JSON: aspect extraction responses arrive wrapped
//! in ```json code fences, preceded by prose, or occasionally clean. The
//! extraction process tries strategies in order of reliability:
//! 1. A fenced ```json code block
//! 2. An inline JSON array or object found by pattern matching
//! 3. The raw text, if it already looks like JSON

use crate::types::*;
use lazy_static::lazy_static;
use regex::Regex;

// Pre-compile regular expressions for better performance
lazy_static! {
    static ref CODE_BLOCK_REGEX: Regex = Regex::new(r"```(?:json)?\s*\n([\s\S]*?)\n```").unwrap();
    static ref JSON_ARRAY_REGEX: Regex = Regex::new(r"\[[\s\S]*\]").unwrap();
    static ref JSON_OBJECT_REGEX: Regex = Regex::new(r"\{[\s\S]*\}").unwrap();
}

/// Extract a JSON payload from raw model output
///
/// Tries each strategy in sequence and returns the first hit.
///
/// # Errors
///
/// Returns a `ParseError` when no strategy finds anything JSON-shaped.
pub fn extract_json(text: &str) -> AnalysisResult<String> {
    extract_from_code_block(text)
        .or_else(|_| extract_inline(text))
        .or_else(|_| extract_raw(text))
}

/// Extract JSON from a code block with ```json markers
fn extract_from_code_block(text: &str) -> AnalysisResult<String> {
    if let Some(captures) = CODE_BLOCK_REGEX.captures(text) {
        return Ok(captures[1].to_string());
    }
    Err(AnalysisError::parse_error(
        "No JSON code block found in response",
        None,
        None::<serde_json::Error>,
        None,
    ))
}

/// Extract JSON from array notation [ ... ] or object notation { ... }
///
/// Arrays are tried first since aspect extraction responses are arrays.
fn extract_inline(text: &str) -> AnalysisResult<String> {
    if let Some(json_match) = JSON_ARRAY_REGEX.find(text) {
        return Ok(json_match.as_str().to_string());
    }
    if let Some(json_match) = JSON_OBJECT_REGEX.find(text) {
        return Ok(json_match.as_str().to_string());
    }
    Err(AnalysisError::parse_error(
        "No JSON array or object found in response",
        None,
        None::<serde_json::Error>,
        None,
    ))
}

/// Treat the entire text as JSON if it appears to be valid
fn extract_raw(text: &str) -> AnalysisResult<String> {
    let trimmed = text.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return Ok(trimmed.to_string());
    }
    Err(AnalysisError::parse_error(
        "No JSON content found in response",
        None,
        None::<serde_json::Error>,
        None,
    ))
}
