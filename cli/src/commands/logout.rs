use crate::commands::CommandContext;
use crate::install::Prompter;
use crate::utils::error::{SnippetError, SnippetResult};
use colored::*;
use tracing::info;

/// Execute the logout command. Declining or cancelling the confirmation
/// leaves the stored key in place and is not an error.
pub async fn execute(
    ctx: &CommandContext,
    prompter: &dyn Prompter,
    yes: bool,
) -> SnippetResult<bool> {
    if !yes {
        match prompter.confirm("Are you sure you want to log out?", false) {
            Ok(true) => {}
            Ok(false) | Err(SnippetError::UserCancelled) => {
                println!("{}", "Logout cancelled.".yellow());
                info!("Logout cancelled");
                return Ok(false);
            }
            Err(e) => return Err(e),
        }
    }

    ctx.token_store().clear().await?;

    println!(
        "{}",
        "Successfully logged out and removed API token".green().bold()
    );
    Ok(true)
}
