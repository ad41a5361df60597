use crate::api::{SearchQuery, Snippet};
use crate::commands::{label, title, CommandContext};
use crate::utils::error::SnippetResult;
use crate::utils::spinner::Spinner;
use colored::*;
use tracing::{debug, error};

/// Execute the search command
pub async fn execute(ctx: &CommandContext, query: SearchQuery) -> SnippetResult<Vec<Snippet>> {
    if ctx.verbose {
        debug!(?query, "searching");
    }

    let token = ctx.authenticate(true).await?;

    let spinner = Spinner::start("Searching for snippets...", true);
    let snippets = match ctx.client.search(&query, &token).await {
        Ok(snippets) => {
            spinner.success("Search completed successfully");
            snippets
        }
        Err(e) => {
            spinner.fail("Failed to fetch search results.");
            error!("Error searching snippets: {}", e);
            return Err(e);
        }
    };

    println!("{}", render_results(&query.query, &snippets));
    Ok(snippets)
}

/// Result list, or a "no results" line naming the query.
pub fn render_results(query: &str, snippets: &[Snippet]) -> String {
    if snippets.is_empty() {
        return format!(
            "\n{} {}",
            "No snippets found for query:".dimmed(),
            label(query)
        );
    }

    let mut output = format!("\n{}\n", title("> Search Results:"));
    for snippet in snippets {
        output.push_str(&format!(
            "* {}  {} [{}]\n",
            label(snippet.display_id()),
            snippet.title,
            snippet.language
        ));
    }

    output.push_str(&format!("\n{}\n", "To install a snippet, run:".dimmed()));
    output.push_str(&format!("   {}\n", "snippetkit add <snippet_id>".dimmed()));
    output
}
