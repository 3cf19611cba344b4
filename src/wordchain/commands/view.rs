use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::EntrySelector;
use crate::model::UserContext;
use crate::store::VocabularyRepository;

use super::helpers::{indexed_entries, resolve_selectors};

pub fn run<R: VocabularyRepository>(
    repo: &R,
    user: &UserContext,
    selectors: &[EntrySelector],
) -> Result<CmdResult> {
    let indexed = indexed_entries(repo, user)?;
    let positions = resolve_selectors(&indexed, selectors)?;
    let listed = positions.into_iter().map(|pos| indexed[pos].clone()).collect();
    Ok(CmdResult::default().with_listed_entries(listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::RepoFixture;

    #[test]
    fn views_by_index_and_word() {
        let fixture = RepoFixture::new().with_words(&["lucid", "terse"]);
        let result = run(
            &fixture.repo,
            &fixture.user,
            &[EntrySelector::Word("TERSE".into()), EntrySelector::Index(1)],
        )
        .unwrap();

        let words: Vec<_> = result.listed_entries.iter().map(|de| de.entry.word.as_str()).collect();
        assert_eq!(words, vec!["terse", "lucid"]);
    }
}
