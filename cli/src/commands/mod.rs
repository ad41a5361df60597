//! End-to-end command workflows.
//!
//! Every workflow receives a [`CommandContext`] built once in `main` from the
//! loaded configuration.

pub mod add;
pub mod info;
pub mod login;
pub mod logout;
pub mod search;

use crate::api::{ApiClient, Snippet};
use crate::auth::TokenStore;
use crate::config::{Config, ConfigManager};
use crate::utils::error::SnippetResult;
use crate::utils::spinner::Spinner;
use colored::*;

/// Configuration and clients shared by the workflows of one invocation
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config_manager: ConfigManager,
    pub client: ApiClient,
    pub verbose: bool,
}

impl CommandContext {
    pub fn new(
        config_manager: ConfigManager,
        config: &Config,
        verbose: bool,
    ) -> SnippetResult<Self> {
        let client = ApiClient::new(config)?;
        Ok(Self {
            config_manager,
            client,
            verbose,
        })
    }

    pub fn token_store(&self) -> TokenStore {
        TokenStore::new(self.config_manager.clone(), self.client.clone())
    }

    /// Load and verify the stored API key behind a spinner.
    pub async fn authenticate(&self, show_progress: bool) -> SnippetResult<String> {
        let spinner = Spinner::start("Checking auth status...", show_progress);
        match self.token_store().get().await {
            Ok(token) => {
                spinner.success("Authenticated successfully");
                Ok(token)
            }
            Err(e) => {
                spinner.fail("Failed to authenticate");
                Err(e)
            }
        }
    }

    /// Fetch one snippet behind a spinner.
    pub async fn fetch(
        &self,
        id: &str,
        token: &str,
        show_progress: bool,
    ) -> SnippetResult<Snippet> {
        let spinner = Spinner::start(format!("Fetching snippet {}...", id), show_progress);
        match self.client.fetch_by_id(id, token).await {
            Ok(snippet) => {
                spinner.success(format!("Snippet {} fetched successfully", id));
                Ok(snippet)
            }
            Err(e) => {
                spinner.fail(format!("Failed to fetch snippet with ID: {}", id));
                Err(e)
            }
        }
    }
}

pub(crate) fn divider() -> ColoredString {
    "─".repeat(40).dimmed()
}

pub(crate) fn title(text: &str) -> ColoredString {
    text.truecolor(234, 88, 12).bold()
}

pub(crate) fn label(text: &str) -> ColoredString {
    text.truecolor(251, 191, 36)
}
