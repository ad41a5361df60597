use clap::{Parser, Subcommand};
use colored::*;
use snippetkit_cli::api::SearchQuery;
use snippetkit_cli::commands::{add, info, login, logout, search, CommandContext};
use snippetkit_cli::config::ConfigManager;
use snippetkit_cli::install::TerminalPrompter;
use snippetkit_cli::utils::logging::{self, LogOptions};
use snippetkit_cli::SnippetResult;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(
    name = "snippetkit",
    version = env!("CARGO_PKG_VERSION"),
    about = "SnippetKit - Easily manage reusable code snippets",
    long_about = "SnippetKit CLI allows you to search, preview, and add code snippets to your project."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(
        short,
        long,
        global = true,
        env = "SNIPPETKIT_CONFIG",
        help = "Config file (default is $HOME/.config/snippetkit/config.yaml)"
    )]
    config: Option<PathBuf>,

    #[arg(long, global = true, help = "Enable or disable logging to file")]
    logging: Option<bool>,

    #[arg(long, global = true, help = "Enable verbose output")]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Authenticate and store your API token
    Login {
        #[arg(short, long, help = "API token to authenticate")]
        key: Option<String>,
    },

    /// Log out and remove your API token
    Logout {
        #[arg(short, long, help = "Skip the confirmation prompt")]
        yes: bool,
    },

    /// Search for snippets by name, language, or tags
    Search {
        /// Search query
        query: String,

        #[arg(short, long, help = "Filter snippets by programming language (e.g., typescript)")]
        lang: Option<String>,

        #[arg(short, long, help = "Filter snippets by tag (e.g., ui, shadcnui)")]
        tag: Option<String>,

        #[arg(
            short = 'n',
            long,
            default_value_t = 10,
            value_parser = clap::value_parser!(u32).range(1..),
            help = "Limit the number of search results"
        )]
        limit: u32,
    },

    /// Fetch and add a snippet to your project
    Add {
        /// Snippet ID
        snippet_id: String,

        #[arg(short, long, help = "Install path for the snippet")]
        path: Option<String>,

        #[arg(short, long, help = "Force overwrite if file exists")]
        force: bool,

        #[arg(short, long, help = "Suppress prompts and output")]
        silent: bool,
    },

    /// Preview a snippet before adding it
    Info {
        /// Snippet ID
        snippet_id: String,

        #[arg(short, long, help = "Output snippet info as JSON")]
        json: bool,

        #[arg(short, long, help = "Show full snippet instead of a preview")]
        full: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("{}", e);
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(hint) = e.hint() {
            eprintln!("{}", hint.dimmed());
        }
        process::exit(1);
    }
}

async fn run(cli: Cli) -> SnippetResult<()> {
    let manager = ConfigManager::from_override(cli.config)?;
    let config = manager.load_with_env_overrides()?;

    logging::init(&LogOptions {
        file_enabled: cli.logging.unwrap_or(config.logging_enabled),
        level: config.log_level.clone(),
        dir: manager.log_dir(),
        verbose: cli.verbose,
    });

    let ctx = CommandContext::new(manager, &config, cli.verbose)?;

    match cli.command {
        Commands::Login { key } => login::execute(&ctx, key).await,
        Commands::Logout { yes } => logout::execute(&ctx, &TerminalPrompter, yes)
            .await
            .map(|_| ()),
        Commands::Search {
            query,
            lang,
            tag,
            limit,
        } => {
            let query = SearchQuery::new(query)
                .with_lang(lang)
                .with_tag(tag)
                .with_limit(limit as usize);
            search::execute(&ctx, query).await.map(|_| ())
        }
        Commands::Add {
            snippet_id,
            path,
            force,
            silent,
        } => {
            let args = add::AddArgs {
                snippet_id,
                path,
                force,
                silent,
            };
            add::execute(&ctx, args).await.map(|_| ())
        }
        Commands::Info {
            snippet_id,
            json,
            full,
        } => info::execute(&ctx, &snippet_id, json, full)
            .await
            .map(|_| ()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_search_limit_must_be_positive() {
        assert!(Cli::try_parse_from(["snippetkit", "search", "button", "--limit", "0"]).is_err());
        let cli = Cli::try_parse_from(["snippetkit", "search", "button"]).unwrap();
        match cli.command {
            Commands::Search { limit, .. } => assert_eq!(limit, 10),
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_add_flags() {
        let cli = Cli::try_parse_from([
            "snippetkit", "add", "abc123", "--silent", "--path", "./out.go", "--force",
        ])
        .unwrap();
        match cli.command {
            Commands::Add {
                snippet_id,
                path,
                force,
                silent,
            } => {
                assert_eq!(snippet_id, "abc123");
                assert_eq!(path.as_deref(), Some("./out.go"));
                assert!(force && silent);
            }
            _ => panic!("expected add"),
        }
    }
}
