//! Whole-account export and restore.
//!
//! A backup is one JSON document holding every entry and the settings. Restoring
//! replaces the user's data outright; there is no merge.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, WordchainError};
use crate::model::{Settings, UserContext, VocabularyEntry};
use crate::store::VocabularyRepository;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const BACKUP_VERSION: &str = "1.0";

fn default_version() -> String {
    BACKUP_VERSION.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    pub items: Vec<VocabularyEntry>,
    pub settings: Settings,
}

impl Backup {
    /// Parses a backup document, rejecting ones without an `items` array or a
    /// `settings` object.
    pub fn parse(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| WordchainError::Api(format!("Backup is not valid JSON: {}", e)))?;

        if !value.get("items").is_some_and(|v| v.is_array()) {
            return Err(WordchainError::Api(
                "Invalid backup: missing items array".to_string(),
            ));
        }
        if !value.get("settings").is_some_and(|v| v.is_object()) {
            return Err(WordchainError::Api(
                "Invalid backup: missing settings object".to_string(),
            ));
        }

        serde_json::from_value(value)
            .map_err(|e| WordchainError::Api(format!("Invalid backup: {}", e)))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(WordchainError::Serialization)
    }
}

pub fn export<R: VocabularyRepository>(
    repo: &R,
    user: &UserContext,
    now: DateTime<Utc>,
) -> Result<CmdResult> {
    let items = repo.read_all(user)?;
    let settings = repo.read_settings(user)?;
    let user_name = settings.user_name.clone().or_else(|| user.name.clone());

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported {} entries",
        items.len()
    )));
    Ok(result.with_backup(Backup {
        version: BACKUP_VERSION.to_string(),
        export_date: Some(now),
        user_name,
        items,
        settings,
    }))
}

pub fn restore<R: VocabularyRepository>(
    repo: &mut R,
    user: &UserContext,
    backup: Backup,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if backup.version != BACKUP_VERSION {
        result.add_message(CmdMessage::warning(format!(
            "Backup version {} is not {}, restoring anyway",
            backup.version, BACKUP_VERSION
        )));
    }

    let mut settings = backup.settings;
    if settings.user_name.is_none() {
        settings.user_name = backup.user_name;
    }

    repo.write_all(user, &backup.items)?;
    repo.write_settings(user, &settings)?;
    tracing::info!(user = %user.id, count = backup.items.len(), "restored backup");

    result.add_message(CmdMessage::success(format!(
        "Restored {} entries",
        backup.items.len()
    )));
    Ok(result.with_settings(settings))
}
