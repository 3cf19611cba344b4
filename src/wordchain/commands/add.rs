use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, WordchainError};
use crate::index::DisplayEntry;
use crate::lookup::LookupResult;
use crate::model::{PartOfSpeech, UserContext, VocabularyEntry};
use crate::store::VocabularyRepository;
use chrono::NaiveDate;

/// Fields for a new entry. Anything left `None` may be filled from a lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewEntry {
    pub word: String,
    pub pronunciation: Option<String>,
    pub part_of_speech: Option<PartOfSpeech>,
    pub definition: Option<String>,
}

impl NewEntry {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            ..Default::default()
        }
    }

    /// Fills the fields the user left out from `lookup`. User values win.
    pub fn fill_from(mut self, lookup: &LookupResult) -> Self {
        if self.pronunciation.is_none() && !lookup.pronunciation.is_empty() {
            self.pronunciation = Some(lookup.pronunciation.clone());
        }
        if self.part_of_speech.is_none() {
            self.part_of_speech = lookup.part_of_speech;
        }
        if self.definition.is_none() && !lookup.definition.is_empty() {
            self.definition = Some(lookup.definition.clone());
        }
        self
    }
}

pub fn run<R: VocabularyRepository>(
    repo: &mut R,
    user: &UserContext,
    draft: NewEntry,
    today: NaiveDate,
) -> Result<CmdResult> {
    let word = draft.word.trim();
    if word.is_empty() {
        return Err(WordchainError::Api("Word is required".to_string()));
    }
    let definition = draft
        .definition
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| {
            WordchainError::Api(format!("A definition is required to add '{}'", word))
        })?;

    let mut entries = repo.read_all(user)?;
    let mut result = CmdResult::default();

    let lowered = word.to_lowercase();
    if entries.iter().any(|e| e.word.to_lowercase() == lowered) {
        result.add_message(CmdMessage::warning(format!(
            "'{}' is already in your list",
            word
        )));
    }

    let mut entry = VocabularyEntry::new(word.to_string(), definition.to_string(), today);
    entry.pronunciation = draft.pronunciation.unwrap_or_default().trim().to_string();
    entry.part_of_speech = draft.part_of_speech;

    entries.push(entry.clone());
    repo.write_all(user, &entries)?;
    tracing::info!(user = %user.id, word = %entry.word, "added entry");

    result.add_message(CmdMessage::success(format!(
        "Added '{}', first review on {}",
        entry.word, entry.next_due
    )));
    Ok(result.with_affected_entries(vec![DisplayEntry {
        index: entries.len(),
        entry,
    }]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Stage;
    use crate::store::memory::fixtures::{today, RepoFixture};

    fn draft(word: &str, definition: &str) -> NewEntry {
        NewEntry {
            definition: Some(definition.to_string()),
            ..NewEntry::new(word)
        }
    }

    #[test]
    fn adds_entry_at_stage_zero_due_in_a_week() {
        let mut fixture = RepoFixture::new();
        let result = run(
            &mut fixture.repo,
            &fixture.user,
            draft("  ephemeral ", "lasting a very short time"),
            today(),
        )
        .unwrap();

        let added = &result.affected_entries[0];
        assert_eq!(added.index, 1);
        assert_eq!(added.entry.word, "ephemeral");
        assert_eq!(added.entry.stage, Stage::New);
        assert_eq!(added.entry.next_due, NaiveDate::from_ymd_opt(2024, 6, 22).unwrap());
        assert_eq!(added.entry.added_on, Some(today()));
        assert_eq!(fixture.repo.read_all(&fixture.user).unwrap().len(), 1);
    }

    #[test]
    fn rejects_missing_definition() {
        let mut fixture = RepoFixture::new();
        let err = run(&mut fixture.repo, &fixture.user, NewEntry::new("lucid"), today()).unwrap_err();
        assert!(matches!(err, WordchainError::Api(_)));

        let err = run(&mut fixture.repo, &fixture.user, draft("lucid", "   "), today()).unwrap_err();
        assert!(matches!(err, WordchainError::Api(_)));
        assert!(fixture.repo.read_all(&fixture.user).unwrap().is_empty());
    }

    #[test]
    fn rejects_blank_word() {
        let mut fixture = RepoFixture::new();
        assert!(run(&mut fixture.repo, &fixture.user, draft(" ", "x"), today()).is_err());
    }

    #[test]
    fn duplicate_word_is_added_with_warning() {
        let mut fixture = RepoFixture::new().with_words(&["lucid"]);
        let result = run(&mut fixture.repo, &fixture.user, draft("Lucid", "clear"), today()).unwrap();
        assert_eq!(result.affected_entries[0].index, 2);
        assert!(result
            .messages
            .iter()
            .any(|m| m.level == crate::commands::MessageLevel::Warning));
    }

    #[test]
    fn duplicate_check_folds_non_ascii_case() {
        let mut fixture = RepoFixture::new().with_words(&["café"]);
        let result = run(&mut fixture.repo, &fixture.user, draft("CAFÉ", "a coffee house"), today())
            .unwrap();
        assert!(result
            .messages
            .iter()
            .any(|m| m.level == crate::commands::MessageLevel::Warning));
    }

    #[test]
    fn lookup_fills_only_missing_fields() {
        let lookup = LookupResult {
            pronunciation: "<b>LU</b>-sid".into(),
            definition: "easily understood".into(),
            part_of_speech: Some(PartOfSpeech::Adjective),
            source: "Dictionary.com".into(),
        };
        let filled = NewEntry {
            definition: Some("my own words".into()),
            ..NewEntry::new("lucid")
        }
        .fill_from(&lookup);

        assert_eq!(filled.definition.as_deref(), Some("my own words"));
        assert_eq!(filled.pronunciation.as_deref(), Some("<b>LU</b>-sid"));
        assert_eq!(filled.part_of_speech, Some(PartOfSpeech::Adjective));
    }

    #[test]
    fn empty_lookup_fields_stay_unset() {
        let filled = NewEntry::new("lucid").fill_from(&LookupResult::default());
        assert_eq!(filled.definition, None);
        assert_eq!(filled.pronunciation, None);
    }
}
