use crate::index::DisplayEntry;
use crate::model::Settings;

pub mod add;
pub mod backup;
pub mod clear;
pub mod delete;
pub mod grade;
pub mod helpers;
pub mod list;
pub mod postpone;
pub mod review;
pub mod settings;
pub mod stats;
pub mod view;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_entries: Vec<DisplayEntry>,
    pub listed_entries: Vec<DisplayEntry>,
    pub stats: Option<stats::Stats>,
    pub settings: Option<Settings>,
    pub backup: Option<backup::Backup>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_entries(mut self, entries: Vec<DisplayEntry>) -> Self {
        self.affected_entries = entries;
        self
    }

    pub fn with_listed_entries(mut self, entries: Vec<DisplayEntry>) -> Self {
        self.listed_entries = entries;
        self
    }

    pub fn with_stats(mut self, stats: stats::Stats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn with_backup(mut self, backup: backup::Backup) -> Self {
        self.backup = Some(backup);
        self
    }
}
