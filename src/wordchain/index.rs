//! # Display Indexes
//!
//! Users refer to entries by a 1-based position in storage order, as shown by
//! `wordchain list`. The index is derived on every read and never stored, so it is
//! stable as long as no entry before it is deleted.
//!
//! Commands that take entries accept either indexes (`3`, `2-4`) or a word. When
//! any input fails to parse as an index, all inputs are joined into one word.

use crate::model::VocabularyEntry;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayEntry {
    pub entry: VocabularyEntry,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntrySelector {
    Index(usize),
    Word(String),
    /// Never produced by parsing user input; used by clients that hold an entry.
    Id(Uuid),
}

impl std::fmt::Display for EntrySelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntrySelector::Index(i) => write!(f, "{}", i),
            EntrySelector::Word(w) => write!(f, "\"{}\"", w),
            EntrySelector::Id(id) => write!(f, "{}", id),
        }
    }
}

pub fn index_entries(entries: Vec<VocabularyEntry>) -> Vec<DisplayEntry> {
    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| DisplayEntry {
            entry,
            index: i + 1,
        })
        .collect()
}

fn parse_index(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(0) => Err("Indexes start at 1".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("Invalid index: {}", s)),
    }
}

/// Longest range a single argument may expand to.
pub const MAX_RANGE_LEN: usize = 10_000;

/// Parses "3" or an inclusive range "3-5".
pub fn parse_index_or_range(s: &str) -> Result<Vec<usize>, String> {
    match s.split_once('-') {
        Some((start, end)) if !start.is_empty() => {
            let start = parse_index(start)?;
            let end = parse_index(end)?;
            if start > end {
                return Err(format!("Invalid range {}: start is after end", s));
            }
            if end - start >= MAX_RANGE_LEN {
                return Err(format!(
                    "Invalid range {}: at most {} entries per range",
                    s, MAX_RANGE_LEN
                ));
            }
            Ok((start..=end).collect())
        }
        _ => parse_index(s).map(|i| vec![i]),
    }
}

pub fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Vec<EntrySelector> {
    let parsed: Result<Vec<Vec<usize>>, String> = inputs
        .iter()
        .map(|s| parse_index_or_range(s.as_ref()))
        .collect();

    match parsed {
        Ok(indexes) => indexes
            .into_iter()
            .flatten()
            .map(EntrySelector::Index)
            .collect(),
        Err(_) => {
            let word = inputs
                .iter()
                .map(|s| s.as_ref())
                .collect::<Vec<_>>()
                .join(" ");
            vec![EntrySelector::Word(word)]
        }
    }
}
