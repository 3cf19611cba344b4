use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::UserContext;
use crate::store::VocabularyRepository;
use chrono::NaiveDate;

use super::helpers::indexed_entries;

/// Entries due on or before `today`, most overdue first.
pub fn run<R: VocabularyRepository>(
    repo: &R,
    user: &UserContext,
    today: NaiveDate,
) -> Result<CmdResult> {
    let mut due: Vec<_> = indexed_entries(repo, user)?
        .into_iter()
        .filter(|de| de.entry.is_due(today))
        .collect();
    due.sort_by(|a, b| {
        a.entry
            .next_due
            .cmp(&b.entry.next_due)
            .then(a.index.cmp(&b.index))
    });
    let mut result = CmdResult::default();
    if due.is_empty() {
        result.add_message(CmdMessage::info("Nothing due today."));
    }
    Ok(result.with_listed_entries(due))
}
