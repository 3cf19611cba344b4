use crate::error::{Result, WordchainError};
use crate::index::{index_entries, DisplayEntry, EntrySelector};
use crate::model::UserContext;
use crate::store::VocabularyRepository;

pub fn indexed_entries<R: VocabularyRepository>(
    repo: &R,
    user: &UserContext,
) -> Result<Vec<DisplayEntry>> {
    Ok(index_entries(repo.read_all(user)?))
}

/// Maps selectors to positions in `indexed`, in selector order, without duplicates.
///
/// A word matches entries case-insensitively; every matching entry is selected.
pub fn resolve_selectors(
    indexed: &[DisplayEntry],
    selectors: &[EntrySelector],
) -> Result<Vec<usize>> {
    let mut positions = Vec::new();

    for selector in selectors {
        let found: Vec<usize> = match selector {
            EntrySelector::Id(id) => {
                let pos = indexed
                    .iter()
                    .position(|de| de.entry.id == *id)
                    .ok_or(WordchainError::EntryNotFound(*id))?;
                vec![pos]
            }
            EntrySelector::Index(idx) => indexed
                .iter()
                .position(|de| de.index == *idx)
                .into_iter()
                .collect(),
            EntrySelector::Word(word) => {
                let needle = word.trim().to_lowercase();
                indexed
                    .iter()
                    .enumerate()
                    .filter(|(_, de)| de.entry.word.to_lowercase() == needle)
                    .map(|(pos, _)| pos)
                    .collect()
            }
        };

        if found.is_empty() {
            return Err(WordchainError::Api(format!(
                "No entry matches {}",
                selector
            )));
        }

        for pos in found {
            if !positions.contains(&pos) {
                positions.push(pos);
            }
        }
    }

    Ok(positions)
}
