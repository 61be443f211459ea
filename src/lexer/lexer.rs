//! Lexer for Shell Command Lines
//!
//! The lexer turns one command line into an ordered stream of tokens without
//! losing any of the source text. It handles:
//! - Whitespace and newlines (kept as tokens)
//! - Words, names and reserved words
//! - Operators, matched longest first
//! - Single- and double-quoted strings (see `quoting`)
//! - `$NAME`, `$(...)` and `${...}` expansions (see `expansion`)
//!
//! Errors never stop a scan. They are reported to a [`DiagnosticSink`] and
//! the lexer moves on, so callers always get a token stream back.

use crate::lexer::buffer::{ScratchBuf, WORD_BUF_CAPACITY};
use crate::lexer::stream::TokenStream;
use crate::lexer::text::{is_digit, is_name_char, is_shell_punctuation, is_whitespace};
use crate::lexer::token::{single_char_op, two_char_op, Token, TokenType};
use crate::lexer::types::{DiagnosticSink, LexerError};

/// Tokens and diagnostics from one scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexed {
    pub tokens: TokenStream,
    pub diagnostics: Vec<LexerError>,
}

impl Lexed {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Strict view of the scan: the tokens if nothing was reported, otherwise
    /// the first diagnostic.
    pub fn into_result(self) -> Result<TokenStream, LexerError> {
        match self.diagnostics.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(self.tokens),
        }
    }
}

/// Tokenize `input`, collecting diagnostics alongside the tokens.
pub fn tokenize(input: &str) -> Lexed {
    Lexer::new(input).tokenize()
}

/// Max nesting of `$` expansions before the lexer stops recursing
pub const MAX_EXPANSION_DEPTH: usize = 200;

/// Lexer over one input. The cursor only moves forward.
pub struct Lexer<S: DiagnosticSink = Vec<LexerError>> {
    pub(super) input: Vec<char>,
    pub(super) pos: usize,
    pub(super) expansion_depth: usize,
    pub(super) tokens: TokenStream,
    pub(super) sink: S,
}

impl Lexer<Vec<LexerError>> {
    pub fn new(input: &str) -> Self {
        Self::with_sink(input, Vec::new())
    }

    /// Tokenize the entire input
    pub fn tokenize(self) -> Lexed {
        let (tokens, diagnostics) = self.run();
        Lexed { tokens, diagnostics }
    }
}

impl<S: DiagnosticSink> Lexer<S> {
    pub fn with_sink(input: &str, sink: S) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
            expansion_depth: 0,
            tokens: TokenStream::new(),
            sink,
        }
    }

    /// Scan to the end of input, handing back the tokens and the sink.
    pub fn run(mut self) -> (TokenStream, S) {
        while let Some(c) = self.current() {
            if is_whitespace(c) {
                self.read_whitespace();
            } else if is_name_char(c) {
                self.read_alpha_numeric();
            } else if c == '\'' {
                self.read_single_quoted_string();
            } else if c == '"' {
                self.read_double_quoted_string();
            } else if is_shell_punctuation(c) {
                self.read_punctuation();
            } else {
                self.report(LexerError::UnexpectedChar { ch: c, pos: self.pos });
                self.advance();
            }
        }

        tracing::debug!(
            input_len = self.input.len(),
            tokens = self.tokens.len(),
            "tokenized input"
        );
        (self.tokens, self.sink)
    }

    pub(super) fn current(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    pub(super) fn advance(&mut self) -> Option<char> {
        let c = self.current();
        if self.pos < self.input.len() {
            self.pos += 1;
        }
        c
    }

    pub(super) fn emit(&mut self, token_type: TokenType, value: impl Into<String>) {
        self.tokens.push(Token::new(token_type, value));
    }

    pub(super) fn report(&mut self, error: LexerError) {
        tracing::warn!(pos = error.position(), "{}", error);
        self.sink.report(error);
    }

    /// One WHITESPACE token per run between newlines, one NEWLINE token per
    /// newline character.
    fn read_whitespace(&mut self) {
        let mut buf = ScratchBuf::with_capacity(WORD_BUF_CAPACITY);
        while let Some(c) = self.current() {
            if !is_whitespace(c) {
                break;
            }
            if c == '\n' {
                if !buf.is_empty() {
                    self.emit(TokenType::Whitespace, buf.take());
                }
                self.emit(TokenType::Newline, "\n");
            } else {
                buf.append_char(c);
            }
            self.advance();
        }
        if !buf.is_empty() {
            self.emit(TokenType::Whitespace, buf.take());
        }
    }

    /// Read a run of letters, digits and underscores. A run that does not
    /// start with a digit is a NAME (or a reserved word), otherwise a WORD.
    /// An empty run emits nothing.
    pub(super) fn read_alpha_numeric(&mut self) {
        let mut buf = ScratchBuf::with_capacity(WORD_BUF_CAPACITY);
        while let Some(c) = self.current() {
            if !is_name_char(c) {
                break;
            }
            buf.append_char(c);
            self.advance();
        }
        if buf.is_empty() {
            return;
        }
        let starts_with_digit = is_digit(char::from(buf.as_bytes()[0]));
        let token = if starts_with_digit {
            Token::new(TokenType::Word, buf.take())
        } else {
            Token::name(buf.take())
        };
        self.tokens.push(token);
    }

    fn read_punctuation(&mut self) {
        let start = self.pos;
        let c = match self.advance() {
            Some(c) => c,
            None => return,
        };

        // Longest match first: one "<<" token instead of two "<" tokens.
        if let Some((op, token_type)) = self.current().and_then(|next| two_char_op(c, next)) {
            self.advance();
            if token_type == TokenType::DLess && self.current() == Some('-') {
                self.advance();
                self.emit(TokenType::DLessDash, "<<-");
            } else {
                self.emit(token_type, op);
            }
            return;
        }

        match single_char_op(c) {
            Some(token_type) => self.emit(token_type, c.to_string()),
            None => self.report(LexerError::UnhandledPunctuation { ch: c, pos: start }),
        }
    }
}
