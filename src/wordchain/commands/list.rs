use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::{Stage, UserContext};
use crate::store::VocabularyRepository;
use chrono::NaiveDate;
use std::str::FromStr;

use super::helpers::indexed_entries;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListFilter {
    #[default]
    All,
    Stage(Stage),
    Due,
}

impl FromStr for ListFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(ListFilter::All),
            "new" => Ok(ListFilter::Stage(Stage::New)),
            "consolidating" => Ok(ListFilter::Stage(Stage::Consolidating)),
            "long-term" | "longterm" => Ok(ListFilter::Stage(Stage::LongTerm)),
            "due" => Ok(ListFilter::Due),
            other => Err(format!(
                "Unknown filter '{}', expected all, new, consolidating, long-term or due",
                other
            )),
        }
    }
}

pub fn run<R: VocabularyRepository>(
    repo: &R,
    user: &UserContext,
    filter: ListFilter,
    search: Option<&str>,
    today: NaiveDate,
) -> Result<CmdResult> {
    let term = search
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    let listed = indexed_entries(repo, user)?
        .into_iter()
        .filter(|de| match filter {
            ListFilter::All => true,
            ListFilter::Stage(stage) => de.entry.stage == stage,
            ListFilter::Due => de.entry.is_due(today),
        })
        .filter(|de| match &term {
            Some(term) => {
                de.entry.word.to_lowercase().contains(term)
                    || de.entry.definition.to_lowercase().contains(term)
            }
            None => true,
        })
        .collect();

    Ok(CmdResult::default().with_listed_entries(listed))
}
