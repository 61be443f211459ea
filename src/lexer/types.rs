//! Lexer Diagnostics
//!
//! Every lexical error is recoverable: the lexer reports it to a
//! [`DiagnosticSink`] and keeps scanning. Positions are character offsets
//! into the input.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexerError {
    #[error("failed to handle char '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("failed to handle punctuation '{ch}' at position {pos}")]
    UnhandledPunctuation { ch: char, pos: usize },

    #[error("unhandled char in command substitution: '{ch}' at position {pos}")]
    UnhandledInCommandSubstitution { ch: char, pos: usize },

    #[error("unclosed single-quoted string starting at position {pos}")]
    UnclosedSingleQuote { pos: usize },

    #[error("unclosed double-quoted string starting at position {pos}")]
    UnclosedDoubleQuote { pos: usize },

    #[error("unclosed command substitution starting at position {pos}")]
    UnclosedCommandSubstitution { pos: usize },

    #[error("expansions nested too deeply at position {pos}")]
    ExpansionTooDeep { pos: usize },

    #[error("unclosed parameter expansion starting at position {pos}")]
    UnclosedParameterExpansion { pos: usize },

    #[error("no parameter found in parameter expansion at position {pos}")]
    MissingParameterName { pos: usize },

    #[error("invalid expansion sequence '${ch}' at position {pos}")]
    InvalidExpansion { ch: char, pos: usize },

    #[error("unexpected end of input after '$' at position {pos}")]
    UnexpectedEndOfInput { pos: usize },
}

impl LexerError {
    pub fn position(&self) -> usize {
        match self {
            Self::UnexpectedChar { pos, .. }
            | Self::UnhandledPunctuation { pos, .. }
            | Self::UnhandledInCommandSubstitution { pos, .. }
            | Self::UnclosedSingleQuote { pos }
            | Self::UnclosedDoubleQuote { pos }
            | Self::UnclosedCommandSubstitution { pos }
            | Self::UnclosedParameterExpansion { pos }
            | Self::ExpansionTooDeep { pos }
            | Self::MissingParameterName { pos }
            | Self::InvalidExpansion { pos, .. }
            | Self::UnexpectedEndOfInput { pos } => *pos,
        }
    }
}

/// Receives the recoverable errors found while scanning.
pub trait DiagnosticSink {
    fn report(&mut self, error: LexerError);
}

impl DiagnosticSink for Vec<LexerError> {
    fn report(&mut self, error: LexerError) {
        self.push(error);
    }
}
