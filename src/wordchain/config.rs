//! # Configuration
//!
//! Wordchain configuration is loaded with [`confique`] from layered sources.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `WORDCHAIN_DATA_DIR`, `WORDCHAIN_LOOKUP_TIMEOUT_SECS`, etc.
//! 2. **Config file**: `wordchain.toml` in the config directory.
//! 3. **Compiled defaults**: `#[config(default = ...)]`.
//!
//! The config directory itself comes from `WORDCHAIN_CONFIG_DIR`, falling back to the
//! OS-appropriate location from the `directories` crate.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_dir` | OS data dir | Where vocabulary and settings files live |
//! | `user_id` | generated | Fixed user id, overrides the persisted identity |
//! | `log_level` | `warn` | Default tracing filter when `RUST_LOG` is unset |
//! | `lookup.url_template` | Dictionary.com | Page to scrape, `{word}` is replaced |
//! | `lookup.timeout_secs` | `15` | Whole-request timeout |
//! | `lookup.max_redirects` | `5` | Redirects followed before giving up |
//! | `lookup.user_agent` | desktop browser | Sent with every lookup |
//! | `lookup.rules_file` | none | JSON selector rules replacing the built-in chains |

use crate::error::{Result, WordchainError};
use crate::lookup::client::{
    DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT_SECS, DEFAULT_URL_TEMPLATE, DEFAULT_USER_AGENT,
};
use confique::Config;
use directories::ProjectDirs;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "wordchain.toml";
pub const CONFIG_DIR_ENV: &str = "WORDCHAIN_CONFIG_DIR";

#[derive(Config, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct WordchainConfig {
    /// Directory holding vocabulary, settings and identity files.
    #[config(env = "WORDCHAIN_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Use this user id instead of the one persisted in identity.json.
    #[config(env = "WORDCHAIN_USER_ID")]
    pub user_id: Option<String>,

    /// Tracing filter used when RUST_LOG is not set (e.g. "warn", "wordchain=debug").
    #[config(env = "WORDCHAIN_LOG_LEVEL", default = "warn")]
    pub log_level: String,

    #[config(nested)]
    pub lookup: LookupConfig,
}

#[derive(Config, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LookupConfig {
    /// Dictionary page URL; `{word}` is replaced by the percent-encoded word.
    #[config(
        env = "WORDCHAIN_LOOKUP_URL",
        default = "https://www.dictionary.com/browse/{word}"
    )]
    pub url_template: String,

    /// Seconds before a lookup request is abandoned.
    #[config(env = "WORDCHAIN_LOOKUP_TIMEOUT_SECS", default = 15)]
    pub timeout_secs: u64,

    #[config(env = "WORDCHAIN_LOOKUP_MAX_REDIRECTS", default = 5)]
    pub max_redirects: usize,

    #[config(
        env = "WORDCHAIN_LOOKUP_USER_AGENT",
        default = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
    )]
    pub user_agent: String,

    /// JSON file of selector rules to use instead of the built-in ones.
    #[config(env = "WORDCHAIN_LOOKUP_RULES_FILE")]
    pub rules_file: Option<PathBuf>,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            rules_file: None,
        }
    }
}

impl Default for WordchainConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            user_id: None,
            log_level: "warn".to_string(),
            lookup: LookupConfig::default(),
        }
    }
}

impl WordchainConfig {
    /// Loads env, then `wordchain.toml` under `config_dir`, then defaults.
    /// A missing file is not an error.
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let file = config_dir.as_ref().join(CONFIG_FILENAME);
        WordchainConfig::builder()
            .env()
            .file(&file)
            .load()
            .map_err(|e| WordchainError::Config(e.to_string()))
    }

    /// The configured data directory, or the OS default.
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => project_dirs().map(|dirs| dirs.data_dir().to_path_buf()),
        }
    }

    /// Sample `wordchain.toml` with every key commented out.
    pub fn template() -> String {
        confique::toml::template::<WordchainConfig>(confique::toml::FormatOptions::default())
    }
}

/// `WORDCHAIN_CONFIG_DIR`, or the OS config directory.
pub fn config_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "wordchain", "wordchain").ok_or_else(|| {
        WordchainError::Config("could not determine a home directory".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn default_impl_values() {
        let config = WordchainConfig::default();
        assert_eq!(config.log_level, "warn");
        assert_eq!(
            config.lookup.url_template,
            "https://www.dictionary.com/browse/{word}"
        );
        assert_eq!(config.lookup.timeout_secs, 15);
        assert_eq!(config.lookup.max_redirects, 5);
        assert!(config.lookup.rules_file.is_none());
    }

    #[test]
    fn loaded_defaults_match_the_lookup_client() {
        let temp = tempfile::tempdir().unwrap();
        let config = WordchainConfig::load(temp.path()).unwrap();

        assert_eq!(config.lookup.url_template, DEFAULT_URL_TEMPLATE);
        assert_eq!(config.lookup.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.lookup.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.lookup.max_redirects, DEFAULT_MAX_REDIRECTS);
        assert_eq!(config.lookup, LookupConfig::default());
        assert_eq!(config.log_level, WordchainConfig::default().log_level);
    }

    #[test]
    fn file_values_override_defaults() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILENAME),
            "user_id = \"alice\"\n\n[lookup]\ntimeout_secs = 3\n",
        )
        .unwrap();

        let config = WordchainConfig::load(temp.path()).unwrap();
        assert_eq!(config.user_id.as_deref(), Some("alice"));
        assert_eq!(config.lookup.timeout_secs, 3);
        assert_eq!(config.lookup.max_redirects, 5);
    }

    #[test]
    fn explicit_data_dir_wins() {
        let config = WordchainConfig {
            data_dir: Some(PathBuf::from("/tmp/words")),
            ..Default::default()
        };
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/tmp/words"));
    }

    #[test]
    fn template_mentions_nested_keys() {
        let template = WordchainConfig::template();
        assert!(template.contains("timeout_secs"));
        assert!(template.contains("[lookup]"));
    }
}
