//! Configuration file handling for Grana.
//!
//! The configuration file is stored at `$GRANA_HOME/config.json` and holds the
//! API server URL and request timeout. The saved session token lives next to
//! it under `$GRANA_HOME/.secrets/`.

use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

const APP_NAME: &str = "grana";
const CONFIG_VERSION: u8 = 1;
const SECRETS: &str = ".secrets";
const TOKEN_JSON: &str = "token.json";
const CONFIG_JSON: &str = "config.json";

pub(crate) const DEFAULT_API_URL: &str = "http://localhost:8080/api";
const DEFAULT_TIMEOUT_SECONDS: u64 = 20;

/// The `Config` object represents the configuration of the app. You
/// instantiate it by providing the path to `$GRANA_HOME` and from there it
/// loads `$GRANA_HOME/config.json`. It provides paths to the other items
/// expected inside the grana home directory.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    secrets: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    api_url: Url,
}

impl Config {
    /// Creates the grana home directory, its `.secrets` subdirectory, and an
    /// initial `config.json`.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the grana home, e.g. `$HOME/.grana`
    /// - `api_url` - The base URL of the Grana API server, or `None` for the
    ///   default local server address.
    ///
    /// # Errors
    /// - Returns an error if the URL is unusable or any file operation fails.
    pub async fn create(dir: impl Into<PathBuf>, api_url: Option<&str>) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the grana home directory")?;

        // Canonicalize the directory path
        let root = utils::canonicalize(&maybe_relative).await?;

        let secrets_dir = root.join(SECRETS);
        utils::make_dir(&secrets_dir).await?;

        let api_url_raw = api_url.unwrap_or(DEFAULT_API_URL);
        let api_url = parse_api_url(api_url_raw)?;

        // Create and save an initial ConfigFile in the home directory
        let config_path = root.join(CONFIG_JSON);
        let config_file = ConfigFile {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            api_url: api_url_raw.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            token_path: None,
        };
        config_file.save(&config_path).await?;

        Ok(Self {
            root,
            secrets: secrets_dir,
            config_path,
            config_file,
            api_url,
        })
    }

    /// This will
    /// - validate that the `grana_home` exists and that the config file exists
    /// - load the config file
    /// - validate that the secrets directory exists
    /// - return the loaded configuration object
    pub async fn load(grana_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = grana_home.into();
        let root = utils::canonicalize(&maybe_relative).await?;

        // Validate that the home directory exists.
        let _ = utils::read_dir(&root)
            .await
            .context("Grana home is missing, run 'grana init'")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;
        let api_url = parse_api_url(&config_file.api_url)?;

        let config = Self {
            root: root.clone(),
            secrets: root.join(SECRETS),
            config_path,
            config_file,
            api_url,
        };
        if !config.secrets.is_dir() {
            bail!(
                "The secrets directory is missing '{}'",
                config.secrets.display()
            )
        }
        Ok(config)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn secrets(&self) -> &Path {
        &self.secrets
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.config_file.timeout_seconds
    }

    /// Returns the stored `token_path` if it is absolute, otherwise resolves
    /// the relative path against the grana home.
    pub fn token_path(&self) -> PathBuf {
        let p = self.config_file.token_path();
        if p.is_absolute() {
            return p;
        }
        self.root.join(p)
    }
}

/// Represents the serialization and deserialization format of the
/// configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "grana",
///   "config_version": 1,
///   "api_url": "http://localhost:8080/api",
///   "timeout_seconds": 20,
///   "token_path": ".secrets/token.json"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "grana"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Base URL of the Grana API server
    api_url: String,

    /// Per-request timeout in seconds
    timeout_seconds: u64,

    /// Path to the session token file (optional, relative to the grana home
    /// or absolute). Defaults to $GRANA_HOME/.secrets/token.json
    #[serde(skip_serializing_if = "Option::is_none")]
    token_path: Option<PathBuf>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            api_url: DEFAULT_API_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            token_path: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile asynchronously from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if it was not
    /// written by this app.
    async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;

        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        // Validate app_name
        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }

    /// Gets the token path, which defaults to `.secrets/token.json` relative
    /// to the grana home.
    fn token_path(&self) -> PathBuf {
        self.token_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(SECRETS).join(TOKEN_JSON))
    }
}

/// Validates the API base URL: it must parse, use http or https, and name a
/// host.
fn parse_api_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).with_context(|| format!("Invalid API URL '{raw}'"))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        bail!("Invalid API URL '{raw}': the scheme must be http or https");
    }
    if url.host_str().is_none() {
        bail!("Invalid API URL '{raw}': a host is required");
    }
    Ok(url)
}
