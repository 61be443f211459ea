//! Ordered, append-only token sequence.

use std::ops::Index;

use serde::Serialize;

use crate::lexer::token::{Token, TokenType};

/// Tokens in the order the lexer recognized them. Entries are never removed
/// or reordered once pushed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn last(&self) -> Option<&Token> {
        self.tokens.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_vec(self) -> Vec<Token> {
        self.tokens
    }

    pub fn types(&self) -> Vec<TokenType> {
        self.tokens.iter().map(|t| t.token_type).collect()
    }

    /// Token values concatenated in order.
    pub fn source_text(&self) -> String {
        self.tokens.iter().map(|t| t.value.as_str()).collect()
    }

    /// Like [`source_text`](Self::source_text), but restores the delimiters of
    /// single-quoted strings.
    ///
    /// Backslash escapes and line continuations inside double quotes are not
    /// restored: `"\$x"` comes back as `"$x"`, which tokenizes differently.
    pub fn reconstruct(&self) -> String {
        self.tokens.iter().map(Token::source_text).collect()
    }
}

impl Index<usize> for TokenStream {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl From<Vec<Token>> for TokenStream {
    fn from(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }
}

impl IntoIterator for TokenStream {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
