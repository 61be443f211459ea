//! Token dump formatting for the command line and the read loop.
//!
//! - **Text** → one `("text" KIND)` entry per token on a single line
//! - **Json** → `{"tokens": [...], "diagnostics": [...]}`

use crate::lexer::Lexed;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Format the tokens of a scan. Diagnostics are only part of the JSON form;
/// the text form leaves them to the caller.
pub fn format_tokens(lexed: &Lexed, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => lexed.tokens.iter().map(|t| t.to_string()).collect(),
        OutputFormat::Json => {
            let diagnostics: Vec<String> =
                lexed.diagnostics.iter().map(|d| d.to_string()).collect();
            serde_json::json!({
                "tokens": lexed.tokens,
                "diagnostics": diagnostics,
            })
            .to_string()
        }
    }
}

/// One line per diagnostic, prefixed the way shells prefix their errors.
pub fn format_diagnostics(lexed: &Lexed) -> String {
    lexed
        .diagnostics
        .iter()
        .map(|d| format!("psh-lexer: {}\n", d))
        .collect()
}
