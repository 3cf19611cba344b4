//! # Review Scheduling
//!
//! Fixed stage ladder. Every entry sits in one of three stages and each grading
//! event bumps the due date by a fixed interval:
//!
//! | From            | Pass                    | Fail                  |
//! |-----------------|-------------------------|-----------------------|
//! | new (0)         | consolidating, +28 days | new, +2 days          |
//! | consolidating   | long-term, +56 days     | consolidating, +2 days|
//! | long-term (2)   | long-term, +56 days     | long-term, +2 days    |
//!
//! New entries are first due seven days after creation. `last_tested` is set to
//! the grading day on every event, pass or fail. Stages never go down.
//!
//! Everything here is a pure function of its arguments; "today" is always passed in.

use crate::model::Stage;
use chrono::{Days, NaiveDate};

pub const FIRST_REVIEW_DAYS: u64 = 7;
pub const CONSOLIDATING_INTERVAL_DAYS: u64 = 28;
pub const LONG_TERM_INTERVAL_DAYS: u64 = 56;
pub const RETRY_INTERVAL_DAYS: u64 = 2;
pub const POSTPONE_DAYS: u64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    Pass,
    Fail,
}

/// The scheduling fields of an entry after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Review {
    pub stage: Stage,
    pub next_due: NaiveDate,
    pub last_tested: Option<NaiveDate>,
}

pub fn initial(today: NaiveDate) -> Review {
    Review {
        stage: Stage::New,
        next_due: add_days(today, FIRST_REVIEW_DAYS),
        last_tested: None,
    }
}

pub fn grade(stage: Stage, grade: Grade, today: NaiveDate) -> Review {
    let (stage, interval) = match (stage, grade) {
        (Stage::New, Grade::Pass) => (Stage::Consolidating, CONSOLIDATING_INTERVAL_DAYS),
        (Stage::Consolidating, Grade::Pass) => (Stage::LongTerm, LONG_TERM_INTERVAL_DAYS),
        (Stage::LongTerm, Grade::Pass) => (Stage::LongTerm, LONG_TERM_INTERVAL_DAYS),
        (stage, Grade::Fail) => (stage, RETRY_INTERVAL_DAYS),
    };

    Review {
        stage,
        next_due: add_days(today, interval),
        last_tested: Some(today),
    }
}

/// Pushes the due date to tomorrow without counting as a test.
pub fn postpone(stage: Stage, last_tested: Option<NaiveDate>, today: NaiveDate) -> Review {
    Review {
        stage,
        next_due: add_days(today, POSTPONE_DAYS),
        last_tested,
    }
}

fn add_days(date: NaiveDate, days: u64) -> NaiveDate {
    // Out of range only near NaiveDate::MAX; saturate rather than fail.
    date.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX)
}
