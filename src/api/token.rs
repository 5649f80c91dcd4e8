//! Serialization and deserialization for the saved session token file.
//!
//! The bearer token from `POST /auth/login` is kept under the config
//! directory's `.secrets` subdirectory so that `list`, `add` and the other
//! transaction commands can authenticate without prompting again.

use crate::{utils, Result};
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The saved session: the bearer token plus enough context to tell the user
/// who is signed in.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) struct TokenFile {
    token: String,
    email: String,
    obtained_at: DateTime<Utc>,
}

impl TokenFile {
    /// Create a new TokenFile stamped with the current time.
    pub(crate) fn new(token: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            email: email.into(),
            obtained_at: Utc::now(),
        }
    }

    pub(crate) async fn load(path: &Path) -> Result<Self> {
        utils::deserialize(path)
            .await
            .context("Unable to read the saved session, run 'grana login'")
    }

    /// Load the session if one has been saved, `None` otherwise.
    pub(crate) async fn load_if_present(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(Self::load(path).await?))
    }

    /// Save the session to `path`.
    pub(crate) async fn save(&self, path: &Path) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize the session token")?;
        utils::write(path, json).await?;

        // Set restrictive permissions on Unix-like systems
        #[cfg(unix)]
        {
            use std::fs::Permissions;
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, Permissions::from_mode(0o600))
                .context("Failed to set file permissions")?;
        }

        Ok(())
    }

    /// Delete the session file. Succeeds when no session was saved.
    pub(crate) async fn delete(path: &Path) -> Result<bool> {
        if !path.exists() {
            return Ok(false);
        }
        utils::remove_file(path).await?;
        Ok(true)
    }

    /// Get the bearer token
    pub(crate) fn token(&self) -> &str {
        &self.token
    }

    /// Get the signed-in email
    pub(crate) fn email(&self) -> &str {
        &self.email
    }

    /// Get the login timestamp
    pub(crate) fn obtained_at(&self) -> DateTime<Utc> {
        self.obtained_at
    }
}

#[tokio::test]
async fn test_token_file_round_trip() {
    use tempfile::TempDir;

    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("token.json");
    let saved = TokenFile::new("abc123", "maria@example.com");
    saved.save(&path).await.unwrap();

    let loaded = TokenFile::load(&path).await.unwrap();
    assert_eq!(loaded.token(), "abc123");
    assert_eq!(loaded.email(), "maria@example.com");
    assert_eq!(loaded.obtained_at(), saved.obtained_at());
}

#[cfg(unix)]
#[tokio::test]
async fn test_token_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("token.json");
    TokenFile::new("abc123", "maria@example.com")
        .save(&path)
        .await
        .unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[tokio::test]
async fn test_load_if_present_when_missing() {
    use tempfile::TempDir;

    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("token.json");
    assert!(TokenFile::load_if_present(&path).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_reports_whether_a_session_existed() {
    use tempfile::TempDir;

    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("token.json");
    assert!(!TokenFile::delete(&path).await.unwrap());

    TokenFile::new("abc123", "maria@example.com")
        .save(&path)
        .await
        .unwrap();
    assert!(TokenFile::delete(&path).await.unwrap());
    assert!(!path.exists());
}
