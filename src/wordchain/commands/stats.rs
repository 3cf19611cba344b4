use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::{Stage, UserContext};
use crate::store::VocabularyRepository;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Stats {
    pub total: usize,
    pub due: usize,
    pub new: usize,
    pub consolidating: usize,
    pub long_term: usize,
}

impl Stats {
    /// Share of entries that reached long-term, 0.0 for an empty list.
    pub fn mastery(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.long_term as f64 / self.total as f64
        }
    }
}

pub fn run<R: VocabularyRepository>(
    repo: &R,
    user: &UserContext,
    today: NaiveDate,
) -> Result<CmdResult> {
    let mut stats = Stats::default();
    for entry in repo.read_all(user)? {
        stats.total += 1;
        if entry.is_due(today) {
            stats.due += 1;
        }
        match entry.stage {
            Stage::New => stats.new += 1,
            Stage::Consolidating => stats.consolidating += 1,
            Stage::LongTerm => stats.long_term += 1,
        }
    }
    Ok(CmdResult::default().with_stats(stats))
}
