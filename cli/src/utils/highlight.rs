use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::{as_24_bit_terminal_escaped, LinesWithEndings};
use tracing::warn;

/// Lines shown by a non-full preview
pub const PREVIEW_LINES: usize = 10;

const THEME: &str = "base16-ocean.dark";

/// First [`PREVIEW_LINES`] lines of `code`, marked when cut short.
pub fn preview(code: &str, full: bool) -> String {
    let lines: Vec<&str> = code.split('\n').collect();
    if full || lines.len() <= PREVIEW_LINES {
        return code.to_string();
    }

    format!("{}\n... (preview truncated)", lines[..PREVIEW_LINES].join("\n"))
}

/// Terminal syntax highlighting for snippet previews
pub struct Highlighter {
    syntaxes: SyntaxSet,
    theme: Theme,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    pub fn new() -> Self {
        let syntaxes = SyntaxSet::load_defaults_newlines();
        let mut themes = ThemeSet::load_defaults();
        let theme = themes.themes.remove(THEME).unwrap_or_default();

        Self { syntaxes, theme }
    }

    /// Pick a syntax from the language tag, then the first line, then plain text.
    pub fn syntax_for(&self, code: &str, language: &str) -> &SyntaxReference {
        let language = language.trim();
        let by_language = if language.is_empty() {
            None
        } else {
            self.syntaxes
                .find_syntax_by_token(language)
                .or_else(|| self.syntaxes.find_syntax_by_name(language))
        };

        by_language
            .or_else(|| self.syntaxes.find_syntax_by_first_line(code))
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text())
    }

    /// Highlight `code` with 24-bit terminal escapes. Falls back to the plain
    /// text on highlighter errors.
    pub fn highlight(&self, code: &str, language: &str) -> String {
        let syntax = self.syntax_for(code, language);
        let mut lines = HighlightLines::new(syntax, &self.theme);
        let mut out = String::with_capacity(code.len() * 2);

        for line in LinesWithEndings::from(code) {
            match lines.highlight_line(line, &self.syntaxes) {
                Ok(ranges) => out.push_str(&as_24_bit_terminal_escaped(&ranges[..], false)),
                Err(e) => {
                    warn!("Error highlighting code, falling back to plain text: {}", e);
                    return code.to_string();
                }
            }
        }

        out.push_str("\x1b[0m");
        out
    }
}
