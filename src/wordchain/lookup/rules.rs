//! Selector chains, most specific first.
//!
//! Dictionary markup changes without notice, so each field is tried against a list of
//! CSS selectors ranging from the exact path observed on the live page down to generic
//! fallbacks. The lists are data: [`LookupRules`] deserializes from JSON, which lets the
//! chains be swapped (`lookup.rules_file` in the config) and lets tests feed synthetic
//! rule sets.

use crate::error::{Result, WordchainError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DICTIONARY_COM: &str = "Dictionary.com";

/// What to take from the first element a selector matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capture {
    /// Concatenated text content, trimmed.
    #[default]
    Text,
    /// Inner HTML, trimmed. Keeps inline emphasis tags.
    Markup,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorRule {
    pub selector: String,
    #[serde(default)]
    pub capture: Capture,
}

impl SelectorRule {
    pub fn text(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            capture: Capture::Text,
        }
    }

    pub fn markup(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            capture: Capture::Markup,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupRules {
    /// Provider name reported with every result.
    pub source: String,
    #[serde(default)]
    pub pronunciation: Vec<SelectorRule>,
    #[serde(default)]
    pub part_of_speech: Vec<SelectorRule>,
    #[serde(default)]
    pub definition: Vec<SelectorRule>,
}

impl LookupRules {
    pub fn dictionary_com() -> Self {
        Self {
            source: DICTIONARY_COM.to_string(),
            pronunciation: [
                "#dictionary-entry-1 > div:nth-child(1) > section > div.aB40zqNSml1nCbUuOh7V > p",
                "[data-testid='pronunciation']",
                ".pronunciation",
                ".pron",
                "[class*='pronunciation']",
            ]
            .into_iter()
            .map(SelectorRule::markup)
            .collect(),
            part_of_speech: [
                "[data-testid='part-of-speech']",
                ".luna-part-of-speech",
                ".part-of-speech",
                ".pos",
                "[class*='part-of-speech']",
                "h2[class*='pos']",
                "h3[class*='pos']",
                ".dictionary-entry-header h2",
                "[class*='entry-header'] h2",
                "span[class*='pos']",
                "[class*='grammar']",
                "[class*='word-type']",
                "h2",
                "h3",
                "em",
                "i",
            ]
            .into_iter()
            .map(SelectorRule::text)
            .collect(),
            definition: [
                "#dictionary-entry-1 > div:nth-child(2) > section > div:nth-child(1) > ol li",
                "[data-testid='definition']",
                ".definition",
                ".def",
                "[class*='definition'] li",
                "ol li",
            ]
            .into_iter()
            .map(SelectorRule::text)
            .collect(),
        }
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(WordchainError::Io)?;
        let rules: LookupRules = serde_json::from_str(&content).map_err(|e| {
            WordchainError::Config(format!("invalid rules file {}: {}", path.display(), e))
        })?;
        Ok(rules)
    }
}

impl Default for LookupRules {
    fn default() -> Self {
        Self::dictionary_com()
    }
}
