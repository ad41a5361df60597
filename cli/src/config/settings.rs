use crate::utils::error::{SnippetError, SnippetResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Service origin used when neither the config file nor the environment
/// overrides it.
pub const DEFAULT_API_URL: &str = "https://snippetkit.vercel.app";

/// Environment variable overriding `api_url`.
pub const API_URL_ENV: &str = "SNIPPETKIT_API_URL";

/// Configuration structure for the SnippetKit CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Stored API key; empty when logged out
    pub api_key: String,
    /// Whether log records are appended to the log directory
    pub logging_enabled: bool,
    /// Minimum level for file logging (debug, info, warn, error)
    pub log_level: String,
    /// Service base URL
    pub api_url: String,
    /// Request timeout in seconds
    pub timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            logging_enabled: true,
            log_level: "info".to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout: 30,
        }
    }
}

impl Config {
    /// Stored key, or `None` when blank.
    pub fn api_key(&self) -> Option<&str> {
        let key = self.api_key.trim();
        (!key.is_empty()).then_some(key)
    }
}

/// Loads and saves one configuration file.
///
/// The manager is bound to an explicit path so that commands and tests can
/// point it anywhere; nothing here touches process-wide state.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Manager for `--config` if given, otherwise the per-user default.
    pub fn from_override(path: Option<PathBuf>) -> SnippetResult<Self> {
        match path {
            Some(path) => Ok(Self::new(path)),
            None => Ok(Self::new(Self::default_path()?)),
        }
    }

    /// `<home>/.config/snippetkit/config.yaml`
    pub fn default_path() -> SnippetResult<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SnippetError::Config("Unable to find home directory".to_string()))?;

        Ok(home.join(".config").join("snippetkit").join("config.yaml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory that receives the daily log files.
    pub fn log_dir(&self) -> PathBuf {
        self.path
            .parent()
            .map(|dir| dir.join("logs"))
            .unwrap_or_else(|| PathBuf::from("logs"))
    }

    /// Load configuration from file. A missing file yields the defaults
    /// without creating anything on disk.
    pub fn load(&self) -> SnippetResult<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(&self.path)
            .map_err(|e| SnippetError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = if contents.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(&contents).map_err(|e| {
                SnippetError::Config(format!(
                    "Failed to parse {}: {}",
                    self.path.display(),
                    e
                ))
            })?
        };

        validate_api_url(&config.api_url)?;

        Ok(config)
    }

    /// Load configuration and apply environment overrides.
    pub fn load_with_env_overrides(&self) -> SnippetResult<Config> {
        let mut config = self.load()?;

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                validate_api_url(&url)?;
                config.api_url = url;
            }
        }

        Ok(config)
    }

    /// Rewrite the whole configuration file.
    pub fn save(&self, config: &Config) -> SnippetResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    SnippetError::Config(format!(
                        "Failed to create config directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let contents = serde_yaml::to_string(config)
            .map_err(|e| SnippetError::Config(format!("Failed to serialize config: {}", e)))?;

        let write_error =
            |e: std::io::Error| SnippetError::Config(format!("Failed to write config file: {}", e));

        // Owner read/write only, the file holds a credential
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path).map_err(write_error)?;

        // `mode` only applies on creation; tighten a pre-existing file before
        // the key is written into it
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))
                .map_err(write_error)?;
        }

        file.write_all(contents.as_bytes()).map_err(write_error)?;
        Ok(())
    }
}

/// Validate API URL format
fn validate_api_url(url: &str) -> SnippetResult<()> {
    if url.is_empty() {
        return Err(SnippetError::Config("API URL cannot be empty".to_string()));
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(SnippetError::Config(
            "API URL must start with http:// or https://".to_string(),
        ));
    }

    if url.parse::<reqwest::Url>().is_err() {
        return Err(SnippetError::Config("Invalid API URL format".to_string()));
    }

    Ok(())
}
