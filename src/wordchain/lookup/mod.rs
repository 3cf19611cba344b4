//! # Dictionary Lookup
//!
//! Turns a word into best-effort dictionary metadata by fetching a third-party
//! page and pulling fields out of its markup.
//!
//! The pieces are split so that the scraping logic can be tested without a network:
//!
//! - [`rules`]: ordered selector chains per field, as plain data ([`LookupRules`]).
//! - [`extract`]: applies a [`LookupRules`] to an HTML document, plus the field
//!   normalizers (stress uppercasing, part-of-speech filtering).
//! - [`client`]: the HTTP side ([`DictionaryClient`]), one GET per lookup.
//!
//! ## Failure model
//!
//! A field that no rule matches is not an error, it is an empty string. Only
//! transport problems (network, timeout, non-2xx) fail a lookup, and they come back
//! as [`LookupError::LookupFailed`]. [`LookupResponse`] flattens either outcome
//! into the `{success, data | error, details}` shape a web layer can hand straight
//! to its client.

use crate::model::{part_of_speech_field, PartOfSpeech};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub mod client;
pub mod extract;
pub mod rules;

pub use client::DictionaryClient;
pub use rules::{Capture, LookupRules, SelectorRule};

pub const LOOKUP_FAILED_MESSAGE: &str = "Failed to scrape dictionary";
pub const MISSING_WORD_MESSAGE: &str = "Word is required";

/// Dictionary metadata for one word. Any field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResult {
    pub pronunciation: String,
    pub definition: String,
    #[serde(default, with = "part_of_speech_field")]
    pub part_of_speech: Option<PartOfSpeech>,
    pub source: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Pronunciation,
    PartOfSpeech,
    Definition,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Pronunciation => write!(f, "pronunciation"),
            Field::PartOfSpeech => write!(f, "part of speech"),
            Field::Definition => write!(f, "definition"),
        }
    }
}

impl LookupResult {
    /// Fields the page did not provide; callers ask the user for these.
    pub fn missing_fields(&self) -> Vec<Field> {
        let mut missing = Vec::new();
        if self.pronunciation.is_empty() {
            missing.push(Field::Pronunciation);
        }
        if self.part_of_speech.is_none() {
            missing.push(Field::PartOfSpeech);
        }
        if self.definition.is_empty() {
            missing.push(Field::Definition);
        }
        missing
    }
}

/// Why a page could not be fetched.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out after {}s", .0.as_secs_f32())]
    Timeout(Duration),

    #[error("dictionary responded with HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("invalid lookup url: {0}")]
    InvalidUrl(String),
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Word is required")]
    MissingWord,

    #[error("Failed to scrape dictionary: {0}")]
    LookupFailed(#[source] FetchError),
}

/// A source of dictionary metadata.
#[async_trait]
pub trait Dictionary: Send + Sync {
    async fn lookup(&self, word: &str) -> Result<LookupResult, LookupError>;

    /// Provider name reported in [`LookupResult::source`].
    fn source(&self) -> &str;
}

/// Wire shape of a lookup for callers that pass results through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<LookupResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl LookupResponse {
    pub fn success(data: LookupResult) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            details: None,
        }
    }

    pub fn failure(error: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            details,
        }
    }
}

impl From<Result<LookupResult, LookupError>> for LookupResponse {
    fn from(result: Result<LookupResult, LookupError>) -> Self {
        match result {
            Ok(data) => LookupResponse::success(data),
            Err(LookupError::MissingWord) => LookupResponse::failure(MISSING_WORD_MESSAGE, None),
            Err(LookupError::LookupFailed(cause)) => {
                LookupResponse::failure(LOOKUP_FAILED_MESSAGE, Some(cause.to_string()))
            }
        }
    }
}

/// Trims the user's input, rejecting blank words before any request is made.
pub fn normalize_word(word: &str) -> Result<&str, LookupError> {
    let trimmed = word.trim();
    if trimmed.is_empty() {
        return Err(LookupError::MissingWord);
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_response_matches_wire_shape() {
        let response = LookupResponse::from(Ok(LookupResult {
            pronunciation: "ih-<b>FEM</b>-er-uhl".into(),
            definition: "lasting a very short time".into(),
            part_of_speech: Some(PartOfSpeech::Adjective),
            source: "Dictionary.com".into(),
        }));

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "success": true,
                "data": {
                    "pronunciation": "ih-<b>FEM</b>-er-uhl",
                    "definition": "lasting a very short time",
                    "partOfSpeech": "adjective",
                    "source": "Dictionary.com"
                }
            })
        );
    }

    #[test]
    fn missing_part_of_speech_is_an_empty_string() {
        let response = LookupResponse::success(LookupResult {
            definition: "x".into(),
            source: "Dictionary.com".into(),
            ..Default::default()
        });
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["data"]["partOfSpeech"], "");
    }

    #[test]
    fn failure_response_carries_cause() {
        let err = LookupError::LookupFailed(FetchError::Timeout(Duration::from_secs(15)));
        let response = LookupResponse::from(Err(err));

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "success": false,
                "error": "Failed to scrape dictionary",
                "details": "request timed out after 15s"
            })
        );
    }

    #[test]
    fn missing_word_has_no_details() {
        let response = LookupResponse::from(Err(LookupError::MissingWord));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "success": false, "error": "Word is required" })
        );
    }

    #[test]
    fn normalize_word_trims_and_rejects_blank() {
        assert_eq!(normalize_word("  lucid ").unwrap(), "lucid");
        assert!(matches!(normalize_word("   "), Err(LookupError::MissingWord)));
    }

    #[test]
    fn missing_fields_lists_empty_ones() {
        let result = LookupResult {
            definition: "x".into(),
            ..Default::default()
        };
        assert_eq!(
            result.missing_fields(),
            vec![Field::Pronunciation, Field::PartOfSpeech]
        );
    }
}
