use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::EntrySelector;
use crate::model::UserContext;
use crate::schedule::{self, Grade};
use crate::store::VocabularyRepository;
use chrono::NaiveDate;

use super::helpers::{indexed_entries, resolve_selectors};

pub fn run<R: VocabularyRepository>(
    repo: &mut R,
    user: &UserContext,
    selectors: &[EntrySelector],
    grade: Grade,
    today: NaiveDate,
) -> Result<CmdResult> {
    let mut indexed = indexed_entries(repo, user)?;
    let positions = resolve_selectors(&indexed, selectors)?;
    let mut result = CmdResult::default();

    for pos in positions {
        let de = &mut indexed[pos];
        let before = de.entry.stage;
        de.entry
            .apply(schedule::grade(de.entry.stage, grade, today));
        tracing::info!(
            user = %user.id,
            word = %de.entry.word,
            ?grade,
            from = %before,
            to = %de.entry.stage,
            next_due = %de.entry.next_due,
            "graded entry"
        );

        let verdict = match grade {
            Grade::Pass => "Passed",
            Grade::Fail => "Failed",
        };
        result.add_message(CmdMessage::success(format!(
            "{} '{}' ({}): {}, next review on {}",
            verdict, de.entry.word, de.index, de.entry.stage, de.entry.next_due
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
    fn pass_from_new_moves_to_consolidating_for_four_weeks() {
        let mut fixture = RepoFixture::new().with_due_word("ephemeral", Stage::New, 0);
        let user = fixture.user.clone();
        run(
            &mut fixture.repo,
            &user,
            &[EntrySelector::Index(1)],
            Grade::Pass,
            today(),
        )
        .unwrap();

        let entry = &fixture.repo.read_all(&user).unwrap()[0];
        assert_eq!(entry.stage, Stage::Consolidating);
        assert_eq!(entry.next_due, today() + Days::new(28));
        assert_eq!(entry.last_tested, Some(today()));
    }

    #[test]
    fn fail_keeps_stage_and_retries_in_two_days() {
        let mut fixture = RepoFixture::new().with_due_word("ephemeral", Stage::Consolidating, 1);
        let user = fixture.user.clone();
        let result = run(
            &mut fixture.repo,
            &user,
            &[EntrySelector::Word("ephemeral".into())],
            Grade::Fail,
            today(),
        )
        .unwrap();

        assert_eq!(result.affected_entries.len(), 1);
        let entry = &fixture.repo.read_all(&user).unwrap()[0];
        assert_eq!(entry.stage, Stage::Consolidating);
        assert_eq!(entry.next_due, today() + Days::new(2));
        assert_eq!(entry.last_tested, Some(today()));
    }

    #[test]
    fn untouched_entries_are_preserved() {
        let mut fixture = RepoFixture::new().with_words(&["lucid", "terse"]);
        let user = fixture.user.clone();
        let before = fixture.repo.read_all(&user).unwrap();
        run(
            &mut fixture.repo,
            &user,
            &[EntrySelector::Index(2)],
            Grade::Pass,
            today(),
        )
        .unwrap();

        let after = fixture.repo.read_all(&user).unwrap();
        assert_eq!(after[0], before[0]);
        assert_eq!(after[1].stage, Stage::Consolidating);
    }

    #[test]
    fn unknown_index_writes_nothing() {
        let mut fixture = RepoFixture::new().with_words(&["lucid"]);
        let user = fixture.user.clone();
        let before = fixture.repo.read_all(&user).unwrap();
        assert!(run(
            &mut fixture.repo,
            &user,
            &[EntrySelector::Index(1), EntrySelector::Index(9)],
            Grade::Pass,
            today(),
        )
        .is_err());
        assert_eq!(fixture.repo.read_all(&user).unwrap(), before);
    }
}
