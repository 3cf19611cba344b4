use crate::schedule;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Coarse spaced-repetition bucket. Persisted as the integer 0, 1 or 2.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Stage {
    #[default]
    New,
    Consolidating,
    LongTerm,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::New, Stage::Consolidating, Stage::LongTerm];

    pub fn label(&self) -> &'static str {
        match self {
            Stage::New => "new",
            Stage::Consolidating => "consolidating",
            Stage::LongTerm => "long-term",
        }
    }
}

impl TryFrom<u8> for Stage {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Stage::New),
            1 => Ok(Stage::Consolidating),
            2 => Ok(Stage::LongTerm),
            other => Err(format!("invalid stage {}, expected 0, 1 or 2", other)),
        }
    }
}

impl From<Stage> for u8 {
    fn from(stage: Stage) -> Self {
        match stage {
            Stage::New => 0,
            Stage::Consolidating => 1,
            Stage::LongTerm => 2,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The closed set of parts of speech an entry may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Preposition,
    Conjunction,
    Interjection,
    Pronoun,
    Determiner,
    Particle,
}

impl PartOfSpeech {
    pub const ALL: [PartOfSpeech; 10] = [
        PartOfSpeech::Noun,
        PartOfSpeech::Verb,
        PartOfSpeech::Adjective,
        PartOfSpeech::Adverb,
        PartOfSpeech::Preposition,
        PartOfSpeech::Conjunction,
        PartOfSpeech::Interjection,
        PartOfSpeech::Pronoun,
        PartOfSpeech::Determiner,
        PartOfSpeech::Particle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adjective",
            PartOfSpeech::Adverb => "adverb",
            PartOfSpeech::Preposition => "preposition",
            PartOfSpeech::Conjunction => "conjunction",
            PartOfSpeech::Interjection => "interjection",
            PartOfSpeech::Pronoun => "pronoun",
            PartOfSpeech::Determiner => "determiner",
            PartOfSpeech::Particle => "particle",
        }
    }

    /// Maps free text onto the closed set.
    ///
    /// Accepts the text when it is exactly a member (case-insensitive) or when it
    /// contains a member as a whole word, in which case the first such word wins.
    /// Anything else yields `None`; "pronunciation" or "3 definitions" never pass.
    pub fn detect(text: &str) -> Option<Self> {
        let lower = text.trim().to_lowercase();
        if let Ok(pos) = lower.parse() {
            return Some(pos);
        }
        lower
            .split(|c: char| !c.is_alphabetic())
            .find_map(|word| word.parse().ok())
    }
}

impl FromStr for PartOfSpeech {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PartOfSpeech::ALL
            .into_iter()
            .find(|pos| pos.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown part of speech: {}", s))
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serde adapter storing an optional part of speech as `""` when absent.
pub(crate) mod part_of_speech_field {
    use super::PartOfSpeech;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<PartOfSpeech>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.as_ref().map(PartOfSpeech::as_str).unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<PartOfSpeech>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        if raw.trim().is_empty() {
            return Ok(None);
        }
        raw.trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyEntry {
    pub id: Uuid,
    pub word: String,
    #[serde(default)]
    pub pronunciation: String,
    #[serde(default, with = "part_of_speech_field")]
    pub part_of_speech: Option<PartOfSpeech>,
    pub definition: String,
    pub stage: Stage,
    pub next_due: NaiveDate,
    #[serde(default)]
    pub last_tested: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_on: Option<NaiveDate>,
}

impl VocabularyEntry {
    /// A fresh entry at stage 0, first review one week out.
    pub fn new(word: String, definition: String, today: NaiveDate) -> Self {
        let review = schedule::initial(today);
        Self {
            id: Uuid::new_v4(),
            word,
            pronunciation: String::new(),
            part_of_speech: None,
            definition,
            stage: review.stage,
            next_due: review.next_due,
            last_tested: review.last_tested,
            added_on: Some(today),
        }
    }

    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.next_due <= today
    }

    pub fn apply(&mut self, review: schedule::Review) {
        self.stage = review.stage;
        self.next_due = review.next_due;
        self.last_tested = review.last_tested;
    }
}

fn default_hide_meanings() -> bool {
    true
}

/// Per-user preferences. Keys this crate does not know are kept as-is so a
/// backup written by another client survives a restore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_hide_meanings")]
    pub hide_meanings_by_default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hide_meanings_by_default: default_hide_meanings(),
            user_name: None,
            extra: serde_json::Map::new(),
        }
    }
}

/// Identity of whoever owns the vocabulary being operated on.
///
/// Passed explicitly into every repository call; nothing in the library keeps a
/// process-wide notion of the current user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserContext {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl UserContext {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }

    pub fn anonymous() -> Self {
        Self::new(Uuid::new_v4().to_string())
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Anonymous")
    }
}
