//! Init command handler.

use crate::args::InitArgs;
use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Handles the `grana init` command.
///
/// Creates the grana home directory with its `.secrets` subdirectory and
/// writes an initial `config.json` pointing at the chosen API server.
///
/// # Arguments
/// - `grana_home` - The directory to create, e.g. `$HOME/.grana`.
/// - `args` - Carries the API server URL.
///
/// # Errors
/// Returns an error if the URL is unusable or the directories and config file
/// cannot be created.
pub async fn init(grana_home: &Path, args: &InitArgs) -> Result<Out<()>> {
    let _config = Config::create(grana_home, Some(args.api_url()))
        .await
        .context("Unable to create the grana directory and configs")?;
    Ok("Successfully created the grana directory and config".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_creates_home_and_config() {
        let temp = TempDir::new().unwrap();
        let home = temp.path().join("grana");

        let out = init(&home, &InitArgs::new("http://localhost:9999/api"))
            .await
            .unwrap();

        let contains = "Successfully created";
        assert!(
            out.message().contains(contains),
            "Expected message to contain '{contains}', but message was {}",
            out.message()
        );
        let config = Config::load(&home).await.unwrap();
        assert_eq!(config.api_url().as_str(), "http://localhost:9999/api");
        assert!(config.secrets().is_dir());
    }

    #[tokio::test]
    async fn test_init_rejects_a_bad_url() {
        let temp = TempDir::new().unwrap();
        let home = temp.path().join("grana");
        let result = init(&home, &InitArgs::new("localhost:8080/api")).await;
        assert!(result.is_err());
    }
}
