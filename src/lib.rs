//! psh-lexer - lexical front end of a small POSIX-like shell
//!
//! This library turns a command line into an ordered stream of typed tokens
//! for a downstream grammar parser. Quote delimiters and expansion syntax are
//! emitted as tokens, so the original text can be rebuilt from the stream.

pub mod lexer;
pub mod format;
pub mod repl;

pub use lexer::{
    tokenize, DiagnosticSink, Lexed, Lexer, LexerError, Token, TokenStream, TokenType,
    MAX_EXPANSION_DEPTH,
};
