use crate::api::ApiClient;
use crate::config::ConfigManager;
use crate::utils::error::{SnippetError, SnippetResult};
use std::path::Path;
use tracing::{debug, info, warn};

/// Persists the single API key in the configuration file and checks it
/// against the service on every read.
#[derive(Debug, Clone)]
pub struct TokenStore {
    config: ConfigManager,
    client: ApiClient,
}

impl TokenStore {
    pub fn new(config: ConfigManager, client: ApiClient) -> Self {
        Self { config, client }
    }

    /// File the key is stored in.
    pub fn config_path(&self) -> &Path {
        self.config.path()
    }

    /// Return the stored key after verifying it remotely.
    pub async fn get(&self) -> SnippetResult<String> {
        let config = self.config.load()?;
        let token = config
            .api_key()
            .ok_or(SnippetError::NotAuthenticated)?
            .to_string();

        if !self.client.verify(&token).await? {
            warn!("stored API key was rejected");
            return Err(SnippetError::InvalidToken);
        }

        debug!("stored API key verified");
        Ok(token)
    }

    /// Verify `token` and, only if it is accepted, store it.
    pub async fn set(&self, token: &str) -> SnippetResult<()> {
        let token = token.trim();
        if token.is_empty() {
            return Err(SnippetError::InvalidToken);
        }

        if !self.client.verify(token).await? {
            warn!("candidate API key was rejected; keeping stored key");
            return Err(SnippetError::InvalidToken);
        }

        let mut config = self.config.load()?;
        config.api_key = token.to_string();
        self.config.save(&config)?;

        info!(path = %self.config.path().display(), "API key saved");
        Ok(())
    }

    /// Remove the stored key.
    pub async fn clear(&self) -> SnippetResult<()> {
        let mut config = self.config.load()?;
        config.api_key.clear();
        self.config.save(&config)?;

        info!("API key removed");
        Ok(())
    }
}
