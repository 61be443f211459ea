//! Lexer module for shell command lines
//!
//! This module contains the tokenizer and the types it produces.

pub mod text;
pub mod token;
pub mod buffer;
pub mod stream;
pub mod types;
pub mod lexer;
mod quoting;
mod expansion;

// Re-exports
pub use buffer::ScratchBuf;
pub use lexer::{tokenize, Lexed, Lexer, MAX_EXPANSION_DEPTH};
pub use stream::TokenStream;
pub use token::{Token, TokenType};
pub use types::{DiagnosticSink, LexerError};
