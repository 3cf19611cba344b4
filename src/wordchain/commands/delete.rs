use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::EntrySelector;
use crate::model::UserContext;
use crate::store::VocabularyRepository;

use super::helpers::{indexed_entries, resolve_selectors};

pub fn run<R: VocabularyRepository>(
    repo: &mut R,
    user: &UserContext,
    selectors: &[EntrySelector],
) -> Result<CmdResult> {
    let indexed = indexed_entries(repo, user)?;
    let positions = resolve_selectors(&indexed, selectors)?;
    let mut result = CmdResult::default();

    let (removed, kept): (Vec<_>, Vec<_>) = indexed
        .into_iter()
        .enumerate()
        .partition(|(pos, _)| positions.contains(pos));

    let entries: Vec<_> = kept.into_iter().map(|(_, de)| de.entry).collect();
    repo.write_all(user, &entries)?;

    for (_, de) in removed {
        tracing::info!(user = %user.id, word = %de.entry.word, "deleted entry");
        result.add_message(CmdMessage::success(format!(
            "Deleted '{}' ({})",
            de.entry.word, de.index
        )));
        result.affected_entries.push(de);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::RepoFixture;

    #[test]
    fn deletes_by_index_and_reindexes_the_rest() {
        let mut fixture = RepoFixture::new().with_words(&["lucid", "terse", "ephemeral"]);
        let user = fixture.user.clone();
        let result = run(&mut fixture.repo, &user, &[EntrySelector::Index(2)]).unwrap();

        assert_eq!(result.affected_entries[0].entry.word, "terse");
        let words: Vec<_> = fixture
            .repo
            .read_all(&user)
            .unwrap()
            .into_iter()
            .map(|e| e.word)
            .collect();
        assert_eq!(words, vec!["lucid", "ephemeral"]);
    }

    #[test]
    fn deletes_by_word() {
        let mut fixture = RepoFixture::new().with_words(&["lucid", "terse"]);
        let user = fixture.user.clone();
        run(&mut fixture.repo, &user, &[EntrySelector::Word("Lucid".into())]).unwrap();
        assert_eq!(fixture.repo.read_all(&user).unwrap()[0].word, "terse");
    }
}
