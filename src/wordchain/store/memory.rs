use super::VocabularyRepository;
use crate::error::Result;
use crate::model::{Settings, UserContext, VocabularyEntry};
use std::collections::HashMap;

/// In-memory storage for testing and throwaway sessions.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryRepository {
    entries: HashMap<String, Vec<VocabularyEntry>>,
    settings: HashMap<String, Settings>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VocabularyRepository for InMemoryRepository {
    fn read_all(&self, user: &UserContext) -> Result<Vec<VocabularyEntry>> {
        Ok(self.entries.get(&user.id).cloned().unwrap_or_default())
    }

    fn write_all(&mut self, user: &UserContext, entries: &[VocabularyEntry]) -> Result<()> {
        self.entries.insert(user.id.clone(), entries.to_vec());
        Ok(())
    }

    fn read_settings(&self, user: &UserContext) -> Result<Settings> {
        Ok(self.settings.get(&user.id).cloned().unwrap_or_default())
    }

    fn write_settings(&mut self, user: &UserContext, settings: &Settings) -> Result<()> {
        self.settings.insert(user.id.clone(), settings.clone());
        Ok(())
    }

    fn clear(&mut self, user: &UserContext) -> Result<()> {
        self.entries.remove(&user.id);
        self.settings.remove(&user.id);
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::Stage;
    use chrono::{Days, NaiveDate};

    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    pub fn user() -> UserContext {
        UserContext::new("test-user").with_name("Tester")
    }

    pub struct RepoFixture {
        pub repo: InMemoryRepository,
        pub user: UserContext,
    }

    impl Default for RepoFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl RepoFixture {
        pub fn new() -> Self {
            Self {
                repo: InMemoryRepository::new(),
                user: user(),
            }
        }

        fn push(&mut self, entry: VocabularyEntry) {
            let mut entries = self.repo.read_all(&self.user).unwrap();
            entries.push(entry);
            self.repo.write_all(&self.user, &entries).unwrap();
        }

        /// Adds `words` as fresh entries created today.
        pub fn with_words(mut self, words: &[&str]) -> Self {
            for word in words {
                self.push(VocabularyEntry::new(
                    word.to_string(),
                    format!("Definition of {}", word),
                    today(),
                ));
            }
            self
        }

        /// Adds an entry that became due `days_ago` days before today.
        pub fn with_due_word(mut self, word: &str, stage: Stage, days_ago: u64) -> Self {
            let mut entry =
                VocabularyEntry::new(word.to_string(), format!("Definition of {}", word), today());
            entry.stage = stage;
            entry.next_due = today() - Days::new(days_ago);
            self.push(entry);
            self
        }

        pub fn with_settings(mut self, settings: Settings) -> Self {
            self.repo.write_settings(&self.user, &settings).unwrap();
            self
        }
    }
}
