use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, WordchainError};
use crate::model::UserContext;
use crate::store::VocabularyRepository;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    HideMeanings,
    UserName,
}

impl FromStr for SettingKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "hide-meanings" => Ok(SettingKey::HideMeanings),
            "user-name" => Ok(SettingKey::UserName),
            other => Err(format!(
                "Unknown setting '{}', expected hide-meanings or user-name",
                other
            )),
        }
    }
}

impl std::fmt::Display for SettingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingKey::HideMeanings => write!(f, "hide-meanings"),
            SettingKey::UserName => write!(f, "user-name"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsAction {
    Show,
    Set(SettingKey, String),
}

pub fn run<R: VocabularyRepository>(
    repo: &mut R,
    user: &UserContext,
    action: SettingsAction,
) -> Result<CmdResult> {
    let mut settings = repo.read_settings(user)?;
    let mut result = CmdResult::default();

    if let SettingsAction::Set(key, value) = action {
        match key {
            SettingKey::HideMeanings => {
                settings.hide_meanings_by_default = parse_bool(&value)?;
            }
            SettingKey::UserName => {
                let name = value.trim();
                settings.user_name = (!name.is_empty()).then(|| name.to_string());
            }
        }
        repo.write_settings(user, &settings)?;
        tracing::info!(user = %user.id, setting = %key, "updated setting");
        result.add_message(CmdMessage::success(format!("Set {} to {}", key, value.trim())));
    }

    Ok(result.with_settings(settings))
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(WordchainError::Api(format!(
            "Expected true or false, got '{}'",
            other
        ))),
    }
}
