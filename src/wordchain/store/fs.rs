use super::VocabularyRepository;
use crate::error::{Result, WordchainError};
use crate::model::{Settings, UserContext, VocabularyEntry};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Debug, Default, Serialize, Deserialize)]
struct UserData {
    #[serde(default)]
    items: Vec<VocabularyEntry>,
}

#[derive(Serialize)]
struct UserDataRef<'a> {
    items: &'a [VocabularyEntry],
}

pub struct FileRepository {
    root: PathBuf,
}

impl FileRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data_path(&self, user: &UserContext) -> Result<PathBuf> {
        Ok(self
            .root
            .join(format!("user_data_{}.json", file_key(user)?)))
    }

    pub fn settings_path(&self, user: &UserContext) -> Result<PathBuf> {
        Ok(self
            .root
            .join(format!("user_settings_{}.json", file_key(user)?)))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(WordchainError::Io)?;
        }
        Ok(())
    }

    fn write_atomic(&self, target: &Path, content: &str) -> Result<()> {
        self.ensure_dir()?;
        write_atomic(&self.root, target, content)
    }
}

/// Writes `content` to a temp file in `dir`, then renames it over `target`.
/// The temp file is removed if the rename fails.
pub(crate) fn write_atomic(dir: &Path, target: &Path, content: &str) -> Result<()> {
    let tmp = dir.join(format!(".wordchain-{}.tmp", Uuid::new_v4()));
    fs::write(&tmp, content).map_err(WordchainError::Io)?;
    if let Err(e) = fs::rename(&tmp, target) {
        let _ = fs::remove_file(&tmp);
        return Err(WordchainError::Io(e));
    }
    Ok(())
}

/// Percent-encoded user id. Distinct ids always map to distinct file names.
fn file_key(user: &UserContext) -> Result<String> {
    if user.id.trim().is_empty() {
        return Err(WordchainError::Store("user id is empty".to_string()));
    }
    Ok(urlencoding::encode(&user.id).into_owned())
}

impl VocabularyRepository for FileRepository {
    fn read_all(&self, user: &UserContext) -> Result<Vec<VocabularyEntry>> {
        let path = self.data_path(user)?;
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path).map_err(WordchainError::Io)?;
        let data: UserData = serde_json::from_str(&content).map_err(WordchainError::Serialization)?;
        Ok(data.items)
    }

    fn write_all(&mut self, user: &UserContext, entries: &[VocabularyEntry]) -> Result<()> {
        let path = self.data_path(user)?;
        let content = serde_json::to_string_pretty(&UserDataRef { items: entries })
            .map_err(WordchainError::Serialization)?;
        self.write_atomic(&path, &content)?;
        tracing::debug!(user = %user.id, count = entries.len(), path = %path.display(), "wrote vocabulary");
        Ok(())
    }

    fn read_settings(&self, user: &UserContext) -> Result<Settings> {
        let path = self.settings_path(user)?;
        if !path.exists() {
            return Ok(Settings::default());
        }
        let content = fs::read_to_string(&path).map_err(WordchainError::Io)?;
        serde_json::from_str(&content).map_err(WordchainError::Serialization)
    }

    fn write_settings(&mut self, user: &UserContext, settings: &Settings) -> Result<()> {
        let path = self.settings_path(user)?;
        let content = serde_json::to_string_pretty(settings).map_err(WordchainError::Serialization)?;
        self.write_atomic(&path, &content)?;
        tracing::debug!(user = %user.id, path = %path.display(), "wrote settings");
        Ok(())
    }

    fn clear(&mut self, user: &UserContext) -> Result<()> {
        for path in [self.data_path(user)?, self.settings_path(user)?] {
            if path.exists() {
                fs::remove_file(&path).map_err(WordchainError::Io)?;
            }
        }
        tracing::info!(user = %user.id, "cleared user data");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn setup() -> (TempDir, FileRepository) {
        let temp = TempDir::new().unwrap();
        let repo = FileRepository::new(temp.path().join("data"));
        (temp, repo)
    }

    fn entry(word: &str) -> VocabularyEntry {
        VocabularyEntry::new(
            word.to_string(),
            format!("meaning of {}", word),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
    }

    #[test]
    fn missing_files_read_as_empty() {
        let (_temp, repo) = setup();
        let user = UserContext::new("alice");
        assert!(repo.read_all(&user).unwrap().is_empty());
        assert_eq!(repo.read_settings(&user).unwrap(), Settings::default());
    }

    #[test]
    fn entries_round_trip_in_order() {
        let (_temp, mut repo) = setup();
        let user = UserContext::new("alice");
        let entries = vec![entry("lucid"), entry("terse"), entry("ephemeral")];

        repo.write_all(&user, &entries).unwrap();
        assert_eq!(repo.read_all(&user).unwrap(), entries);
    }

    #[test]
    fn data_file_has_items_wrapper() {
        let (_temp, mut repo) = setup();
        let user = UserContext::new("alice");
        repo.write_all(&user, &[entry("lucid")]).unwrap();

        let path = repo.root().join("user_data_alice.json");
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value["items"][0]["word"], "lucid");
    }

    #[test]
    fn users_do_not_see_each_other() {
        let (_temp, mut repo) = setup();
        let alice = UserContext::new("alice");
        let bob = UserContext::new("bob");

        repo.write_all(&alice, &[entry("lucid")]).unwrap();
        assert!(repo.read_all(&bob).unwrap().is_empty());
    }

    #[test]
    fn user_ids_are_encoded_for_filenames() {
        let (_temp, repo) = setup();
        let user = UserContext::new("../evil id");
        let path = repo.data_path(&user).unwrap();
        assert_eq!(path.file_name().unwrap(), "user_data_..%2Fevil%20id.json");
        assert_eq!(path.parent().unwrap(), repo.root());
        assert!(repo.data_path(&UserContext::new("  ")).is_err());
    }

    #[test]
    fn ids_differing_only_in_punctuation_stay_apart() {
        let (_temp, mut repo) = setup();
        let dotted = UserContext::new("a.b");
        let underscored = UserContext::new("a_b");
        let spaced = UserContext::new("a b");

        repo.write_all(&dotted, &[entry("lucid")]).unwrap();
        repo.write_settings(
            &dotted,
            &Settings {
                hide_meanings_by_default: false,
                ..Default::default()
            },
        )
        .unwrap();

        for other in [&underscored, &spaced] {
            assert!(repo.read_all(other).unwrap().is_empty(), "{}", other.id);
            assert!(repo.read_settings(other).unwrap().hide_meanings_by_default);
        }
        assert_eq!(repo.read_all(&dotted).unwrap().len(), 1);
    }

    #[test]
    fn failed_rename_removes_the_temp_file() {
        let (_temp, mut repo) = setup();
        let user = UserContext::new("alice");
        let target = repo.data_path(&user).unwrap();
        fs::create_dir_all(target.join("blocker")).unwrap();

        assert!(repo.write_all(&user, &[entry("lucid")]).is_err());
        let names: Vec<String> = fs::read_dir(repo.root())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["user_data_alice.json".to_string()]);
    }

    #[test]
    fn writes_leave_no_temp_files() {
        let (_temp, mut repo) = setup();
        let user = UserContext::new("alice");
        repo.write_all(&user, &[entry("lucid")]).unwrap();
        repo.write_settings(&user, &Settings::default()).unwrap();

        let names: Vec<String> = fs::read_dir(repo.root())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert!(names.iter().all(|n| !n.ends_with(".tmp")), "{:?}", names);
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn clear_removes_only_that_user() {
        let (_temp, mut repo) = setup();
        let alice = UserContext::new("alice");
        let bob = UserContext::new("bob");
        repo.write_all(&alice, &[entry("lucid")]).unwrap();
        repo.write_all(&bob, &[entry("terse")]).unwrap();
        let settings = Settings {
            hide_meanings_by_default: false,
            ..Default::default()
        };
        repo.write_settings(&alice, &settings).unwrap();

        repo.clear(&alice).unwrap();
        assert!(repo.read_all(&alice).unwrap().is_empty());
        assert_eq!(repo.read_settings(&alice).unwrap(), Settings::default());
        assert_eq!(repo.read_all(&bob).unwrap().len(), 1);
    }

    #[test]
    fn corrupt_data_file_is_a_serialization_error() {
        let (_temp, repo) = setup();
        fs::create_dir_all(repo.root()).unwrap();
        fs::write(repo.root().join("user_data_alice.json"), "{\"items\": [{\"stage\": 7}]}")
            .unwrap();
        let err = repo.read_all(&UserContext::new("alice")).unwrap_err();
        assert!(matches!(err, WordchainError::Serialization(_)));
    }
}
