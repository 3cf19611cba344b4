//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for wordchain operations, whatever the UI.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (display indexes and words into [`EntrySelector`]s)
//! - **Supplies today's date** so commands stay pure functions of their inputs
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no printing and holds no notion of a current user: every call takes the
//! [`UserContext`] it acts for.
//!
//! ## Generic Over Storage and Dictionary
//!
//! `WordchainApi<R: VocabularyRepository, D: Dictionary>`:
//! - Production: `WordchainApi<FileRepository, DictionaryClient>`
//! - Testing: `WordchainApi<InMemoryRepository, _>` with a canned dictionary
//!
//! Lookups are the only async operations. They never touch the repository; adding
//! the looked-up word is a separate, synchronous call once the user has confirmed.

use crate::commands;
use crate::error::Result;
use crate::index::{parse_selectors, EntrySelector};
use crate::lookup::{Dictionary, LookupError, LookupResponse, LookupResult};
use crate::model::UserContext;
use crate::schedule::Grade;
use crate::store::VocabularyRepository;
use chrono::{Local, NaiveDate, Utc};
use tracing::Instrument;
use uuid::Uuid;

pub struct WordchainApi<R: VocabularyRepository, D: Dictionary> {
    repo: R,
    dictionary: D,
    fixed_today: Option<NaiveDate>,
}

impl<R: VocabularyRepository, D: Dictionary> WordchainApi<R, D> {
    pub fn new(repo: R, dictionary: D) -> Self {
        Self {
            repo,
            dictionary,
            fixed_today: None,
        }
    }

    /// Pins "today" instead of reading the local clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.fixed_today
            .unwrap_or_else(|| Local::now().date_naive())
    }

    pub async fn lookup(
        &self,
        user: &UserContext,
        word: &str,
    ) -> std::result::Result<LookupResult, LookupError> {
        let span = tracing::info_span!("lookup", user = %user.id, source = self.dictionary.source());
        self.dictionary.lookup(word).instrument(span).await
    }

    /// Same as [`Self::lookup`], flattened into the `{success, data | error}` shape.
    pub async fn lookup_response(&self, user: &UserContext, word: &str) -> LookupResponse {
        LookupResponse::from(self.lookup(user, word).await)
    }

    pub fn add_entry(
        &mut self,
        user: &UserContext,
        draft: commands::add::NewEntry,
    ) -> Result<commands::CmdResult> {
        let today = self.today();
        commands::add::run(&mut self.repo, user, draft, today)
    }

    pub fn list_entries(
        &self,
        user: &UserContext,
        filter: commands::list::ListFilter,
        search: Option<&str>,
    ) -> Result<commands::CmdResult> {
        commands::list::run(&self.repo, user, filter, search, self.today())
    }

    pub fn view_entries<I: AsRef<str>>(
        &self,
        user: &UserContext,
        inputs: &[I],
    ) -> Result<commands::CmdResult> {
        let selectors = selectors(inputs)?;
        commands::view::run(&self.repo, user, &selectors)
    }

    pub fn due_entries(&self, user: &UserContext) -> Result<commands::CmdResult> {
        commands::review::run(&self.repo, user, self.today())
    }

    pub fn grade_entries<I: AsRef<str>>(
        &mut self,
        user: &UserContext,
        inputs: &[I],
        grade: Grade,
    ) -> Result<commands::CmdResult> {
        let selectors = selectors(inputs)?;
        let today = self.today();
        commands::grade::run(&mut self.repo, user, &selectors, grade, today)
    }

    /// Grades one entry by id; used by clients walking a due queue.
    pub fn grade_entry(
        &mut self,
        user: &UserContext,
        id: Uuid,
        grade: Grade,
    ) -> Result<commands::CmdResult> {
        let today = self.today();
        commands::grade::run(
            &mut self.repo,
            user,
            &[EntrySelector::Id(id)],
            grade,
            today,
        )
    }

    pub fn postpone_entries<I: AsRef<str>>(
        &mut self,
        user: &UserContext,
        inputs: &[I],
    ) -> Result<commands::CmdResult> {
        let selectors = selectors(inputs)?;
        let today = self.today();
        commands::postpone::run(&mut self.repo, user, &selectors, today)
    }

    pub fn delete_entries<I: AsRef<str>>(
        &mut self,
        user: &UserContext,
        inputs: &[I],
    ) -> Result<commands::CmdResult> {
        let selectors = selectors(inputs)?;
        commands::delete::run(&mut self.repo, user, &selectors)
    }

    pub fn stats(&self, user: &UserContext) -> Result<commands::CmdResult> {
        commands::stats::run(&self.repo, user, self.today())
    }

    pub fn export_backup(&self, user: &UserContext) -> Result<commands::CmdResult> {
        commands::backup::export(&self.repo, user, Utc::now())
    }

    pub fn restore_backup(&mut self, user: &UserContext, json: &str) -> Result<commands::CmdResult> {
        let backup = commands::backup::Backup::parse(json)?;
        commands::backup::restore(&mut self.repo, user, backup)
    }

    pub fn clear(&mut self, user: &UserContext) -> Result<commands::CmdResult> {
        commands::clear::run(&mut self.repo, user)
    }

    pub fn settings(
        &mut self,
        user: &UserContext,
        action: SettingsAction,
    ) -> Result<commands::CmdResult> {
        commands::settings::run(&mut self.repo, user, action)
    }
}

fn selectors<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<EntrySelector>> {
    if inputs.iter().all(|s| s.as_ref().trim().is_empty()) {
        return Err(crate::error::WordchainError::Api(
            "No entries specified".to_string(),
        ));
    }
    Ok(parse_selectors(inputs))
}

pub use crate::commands::add::NewEntry;
pub use crate::commands::list::ListFilter;
pub use crate::commands::settings::{SettingKey, SettingsAction};
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
pub use crate::schedule::Grade as ReviewGrade;
