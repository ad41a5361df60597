use crate::api::Snippet;
use crate::commands::{divider, label, title, CommandContext};
use crate::install::{prompter_for, FileWriter, InstallResolver, Prompter};
use crate::utils::error::{SnippetError, SnippetResult};
use colored::*;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Arguments of the add command
#[derive(Debug, Clone, Default)]
pub struct AddArgs {
    pub snippet_id: String,
    pub path: Option<String>,
    pub force: bool,
    pub silent: bool,
}

/// What the add command did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Installed(PathBuf),
    /// Target existed and `--force` was not given; nothing was written
    Skipped(PathBuf),
}

/// Execute the add command in the current directory
pub async fn execute(ctx: &CommandContext, args: AddArgs) -> SnippetResult<AddOutcome> {
    let prompter = prompter_for(args.silent);
    let cwd = std::env::current_dir().map_err(|e| {
        SnippetError::FileSystem(format!("Unable to read current directory: {}", e))
    })?;
    run(ctx, &args, prompter.as_ref(), &cwd).await
}

/// Fetch, resolve and write one snippet.
pub async fn run(
    ctx: &CommandContext,
    args: &AddArgs,
    prompter: &dyn Prompter,
    cwd: &Path,
) -> SnippetResult<AddOutcome> {
    let show_progress = !args.silent;

    let token = ctx.authenticate(show_progress).await?;
    let snippet = ctx.fetch(&args.snippet_id, &token, show_progress).await?;

    if !args.silent {
        print_details(&snippet);
    }

    let resolver = InstallResolver::new(prompter, cwd);
    if !args.silent && args.path.is_none() {
        println!(
            "{} {}",
            title("Default install path:"),
            resolver.default_path(&snippet)?.display()
        );
    }
    let target = resolver.resolve(&snippet, args.path.as_deref(), args.force)?;

    match FileWriter::write(&target, &snippet.code) {
        Ok(()) => {
            if !args.silent {
                println!("\n{}", "Snippet installed successfully!".green().bold());
            }
            info!(path = %target.path.display(), "Snippet installed successfully");
            Ok(AddOutcome::Installed(target.path))
        }
        Err(e) if e.is_soft_stop() => {
            let hint = e.hint().unwrap_or_default();
            println!(
                "{}",
                format!("\nSkipping installation. {}. {}", e, hint).yellow()
            );
            warn!(path = %target.path.display(), "{}. {}", e, hint);
            Ok(AddOutcome::Skipped(target.path))
        }
        Err(e) => {
            error!("Error writing snippet: {}", e);
            Err(e)
        }
    }
}

fn print_details(snippet: &Snippet) {
    println!("{}", title("> Snippet Details:"));
    println!("{}", divider());
    println!("{}{}", label("Title: "), snippet.title);
    println!("{}{}", label("Language: "), snippet.language);
    println!("{}{}", label("Tags: "), snippet.tags.join(", "));
}
