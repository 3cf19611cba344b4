use async_trait::async_trait;
use chrono::NaiveDate;
use wordchain::api::{NewEntry, ReviewGrade, SettingKey, SettingsAction, WordchainApi};
use wordchain::lookup::{normalize_word, Dictionary, LookupError, LookupResult};
use wordchain::model::{Stage, UserContext, VocabularyEntry};
use wordchain::store::fs::FileRepository;
use wordchain::store::VocabularyRepository;

struct NoDictionary;

#[async_trait]
impl Dictionary for NoDictionary {
    async fn lookup(&self, word: &str) -> Result<LookupResult, LookupError> {
        normalize_word(word)?;
        Ok(LookupResult::default())
    }

    fn source(&self) -> &str {
        "None"
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn draft(word: &str, definition: &str) -> NewEntry {
    NewEntry {
        definition: Some(definition.to_string()),
        ..NewEntry::new(word)
    }
}

#[test]
fn entries_survive_reopening_the_repository() {
    let temp = tempfile::tempdir().unwrap();
    let user = UserContext::new("alice");

    {
        let mut api =
            WordchainApi::new(FileRepository::new(temp.path()), NoDictionary).with_today(today());
        api.add_entry(&user, draft("lucid", "expressed clearly")).unwrap();
        api.grade_entries(&user, &["1"], ReviewGrade::Pass).unwrap();
    }

    let repo = FileRepository::new(temp.path());
    let entries: Vec<VocabularyEntry> = repo.read_all(&user).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].stage, Stage::Consolidating);
    assert_eq!(entries[0].last_tested, Some(today()));
}

#[test]
fn backup_restores_entries_and_settings_for_another_user() {
    let temp = tempfile::tempdir().unwrap();
    let alice = UserContext::new("alice");
    let bob = UserContext::new("bob");
    let mut api =
        WordchainApi::new(FileRepository::new(temp.path()), NoDictionary).with_today(today());

    api.add_entry(&alice, draft("lucid", "expressed clearly")).unwrap();
    api.add_entry(&alice, draft("terse", "sparing in the use of words"))
        .unwrap();
    api.settings(
        &alice,
        SettingsAction::Set(SettingKey::HideMeanings, "off".into()),
    )
    .unwrap();

    let backup = api.export_backup(&alice).unwrap().backup.unwrap();
    api.restore_backup(&bob, &backup.to_json().unwrap()).unwrap();

    let repo = FileRepository::new(temp.path());
    assert_eq!(repo.read_all(&bob).unwrap(), repo.read_all(&alice).unwrap());
    assert!(!repo.read_settings(&bob).unwrap().hide_meanings_by_default);
}
