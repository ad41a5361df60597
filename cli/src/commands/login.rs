use crate::commands::CommandContext;
use crate::utils::error::{SnippetError, SnippetResult};
use crate::utils::spinner::Spinner;
use colored::*;
use std::io::ErrorKind;
use tracing::{error, info};

/// Execute the login command
pub async fn execute(ctx: &CommandContext, key: Option<String>) -> SnippetResult<()> {
    let token = match key {
        Some(key) => key,
        None => prompt_token()?,
    };

    let store = ctx.token_store();
    let spinner = Spinner::start("Saving API token...", true);

    if let Err(e) = store.set(&token).await {
        spinner.fail("API token invalid or expired");
        error!("Error saving API token: {}", e);
        return Err(e);
    }

    spinner.success("API token saved successfully!");
    info!("A new API token was saved");

    println!(
        "\n{} {}",
        "API key stored in:".dimmed(),
        store.config_path().display()
    );
    Ok(())
}

/// Masked token entry on the terminal.
fn prompt_token() -> SnippetResult<String> {
    match rpassword::prompt_password("Enter your API token: ") {
        Ok(token) => Ok(token),
        Err(e) if e.kind() == ErrorKind::Interrupted => Err(SnippetError::UserCancelled),
        Err(e) => Err(SnippetError::Io(e)),
    }
}
