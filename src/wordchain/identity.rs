//! Resolves who the local user is.
//!
//! A configured `user_id` wins. Otherwise the id stored in `identity.json` in the
//! data directory is used, and on first run a random one is generated and saved
//! there so the same vocabulary files are found next time.

use crate::error::{Result, WordchainError};
use crate::model::UserContext;
use crate::store::fs::write_atomic;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const IDENTITY_FILENAME: &str = "identity.json";

#[derive(Debug, Serialize, Deserialize)]
struct Identity {
    id: String,
}

pub fn resolve(data_dir: &Path, configured_id: Option<&str>) -> Result<UserContext> {
    if let Some(id) = configured_id.map(str::trim).filter(|id| !id.is_empty()) {
        return Ok(UserContext::new(id));
    }

    let path = data_dir.join(IDENTITY_FILENAME);
    if path.is_file() {
        let content = fs::read_to_string(&path).map_err(WordchainError::Io)?;
        let identity: Identity =
            serde_json::from_str(&content).map_err(WordchainError::Serialization)?;
        if !identity.id.trim().is_empty() {
            return Ok(UserContext::new(identity.id));
        }
    }

    let user = UserContext::anonymous();
    let identity = Identity {
        id: user.id.clone(),
    };
    fs::create_dir_all(data_dir).map_err(WordchainError::Io)?;
    let content = serde_json::to_string_pretty(&identity).map_err(WordchainError::Serialization)?;
    write_atomic(data_dir, &path, &content)?;
    tracing::info!(user = %user.id, "generated anonymous identity");

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn configured_id_wins_and_writes_nothing() {
        let temp = tempfile::tempdir().unwrap();
        let user = resolve(temp.path(), Some("alice")).unwrap();
        assert_eq!(user.id, "alice");
        assert!(!temp.path().join(IDENTITY_FILENAME).exists());
    }

    #[test]
    fn generated_id_is_persisted_and_reused() {
        let temp = tempfile::tempdir().unwrap();
        let first = resolve(temp.path(), None).unwrap();
        assert!(Uuid::parse_str(&first.id).is_ok());

        let second = resolve(temp.path(), Some("  ")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unwritable_identity_leaves_no_temp_file() {
        let temp = tempfile::tempdir().unwrap();
        // A non-empty directory where identity.json should be makes the rename fail.
        fs::create_dir_all(temp.path().join(IDENTITY_FILENAME).join("blocker")).unwrap();

        assert!(resolve(temp.path(), None).is_err());
        let names: Vec<String> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec![IDENTITY_FILENAME.to_string()]);
    }
}
