use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::EntrySelector;
use crate::model::UserContext;
use crate::schedule;
use crate::store::VocabularyRepository;
use chrono::NaiveDate;

use super::helpers::{indexed_entries, resolve_selectors};

pub fn run<R: VocabularyRepository>(
    repo: &mut R,
    user: &UserContext,
    selectors: &[EntrySelector],
    today: NaiveDate,
) -> Result<CmdResult> {
    let mut indexed = indexed_entries(repo, user)?;
    let positions = resolve_selectors(&indexed, selectors)?;
    let mut result = CmdResult::default();

    for pos in positions {
        let de = &mut indexed[pos];
        de.entry.apply(schedule::postpone(
            de.entry.stage,
            de.entry.last_tested,
            today,
        ));
        tracing::info!(user = %user.id, word = %de.entry.word, next_due = %de.entry.next_due, "postponed entry");
        result.add_message(CmdMessage::success(format!(
            "Postponed '{}' ({}) to {}",
            de.entry.word, de.index, de.entry.next_due
        )));
        result.affected_entries.push(de.clone());
    }

    let entries: Vec<_> = indexed.into_iter().map(|de| de.entry).collect();
    repo.write_all(user, &entries)?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Stage;
    use crate::store::memory::fixtures::{today, RepoFixture};
    use chrono::Days;

    #[test]
    fn moves_due_entry_to_tomorrow() {
        let mut fixture = RepoFixture::new().with_due_word("lucid", Stage::LongTerm, 4);
        let user = fixture.user.clone();
        run(&mut fixture.repo, &user, &[EntrySelector::Index(1)], today()).unwrap();

        let entry = &fixture.repo.read_all(&user).unwrap()[0];
        assert_eq!(entry.stage, Stage::LongTerm);
        assert_eq!(entry.next_due, today() + Days::new(1));
        assert_eq!(entry.last_tested, None);
        assert!(!entry.is_due(today()));
    }
}
