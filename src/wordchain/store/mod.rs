//! # Storage Layer
//!
//! Vocabulary persistence sits behind the [`VocabularyRepository`] trait so that the
//! commands never name a concrete backend.
//!
//! ## Implementations
//!
//! - [`fs::FileRepository`]: JSON files in a data directory
//!   - Entries in `user_data_<id>.json` as `{"items": [...]}`
//!   - Settings in `user_settings_<id>.json`
//!   - Every write goes to a temp file first and is renamed into place
//!
//! - [`memory::InMemoryRepository`]: no persistence, used by tests
//!
//! ## User Pattern
//!
//! Every call takes the [`UserContext`] it operates for. Repositories keep no notion
//! of a current user; two users sharing a repository never see each other's data.
//!
//! The whole list is read and written at once. Vocabulary lists are small and the
//! display index is the position in that list, so there is no per-entry API.

use crate::error::Result;
use crate::model::{Settings, UserContext, VocabularyEntry};

pub mod fs;
pub mod memory;

pub trait VocabularyRepository {
    /// Entries in storage order. A user with no data gets an empty list.
    fn read_all(&self, user: &UserContext) -> Result<Vec<VocabularyEntry>>;

    /// Replaces the user's whole list.
    fn write_all(&mut self, user: &UserContext, entries: &[VocabularyEntry]) -> Result<()>;

    /// Stored settings, or defaults when none were saved.
    fn read_settings(&self, user: &UserContext) -> Result<Settings>;

    fn write_settings(&mut self, user: &UserContext, settings: &Settings) -> Result<()>;

    /// Removes entries and settings for the user.
    fn clear(&mut self, user: &UserContext) -> Result<()>;
}
