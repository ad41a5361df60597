use crate::api::Snippet;
use crate::commands::{divider, label, title, CommandContext};
use crate::utils::error::SnippetResult;
use crate::utils::highlight::{preview, Highlighter};

/// Execute the info command: metadata plus a highlighted code preview
pub async fn execute(
    ctx: &CommandContext,
    snippet_id: &str,
    json: bool,
    full: bool,
) -> SnippetResult<Snippet> {
    let token = ctx.authenticate(true).await?;
    let snippet = ctx.fetch(snippet_id, &token, true).await?;

    if json {
        println!("{}", render_json(&snippet)?);
        return Ok(snippet);
    }

    println!("{}", title("> Snippet Details:"));
    println!("{}", divider());
    println!("{}{}", label("ID: "), snippet.display_id());
    println!("{}{}", label("Title: "), snippet.title);
    if !snippet.description.is_empty() {
        println!("{}{}", label("Description: "), snippet.description);
    }
    println!("{}{}", label("Language: "), snippet.language);
    println!("{}{}", label("Tags: "), snippet.tags.join(", "));
    println!("{}{}", label("Path: "), snippet.path);
    println!("{}", divider());
    println!("{}", title("Code Preview"));
    println!("{}", divider());

    let code = preview(&snippet.code, full);
    if colored::control::SHOULD_COLORIZE.should_colorize() {
        println!("{}", Highlighter::new().highlight(&code, &snippet.language));
    } else {
        println!("{}", code);
    }

    println!("{}", divider());
    Ok(snippet)
}

/// Pretty JSON using the API field names.
pub fn render_json(snippet: &Snippet) -> SnippetResult<String> {
    Ok(serde_json::to_string_pretty(snippet)?)
}
