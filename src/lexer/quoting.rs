//! Quoted strings.
//!
//! A single-quoted string becomes one SINGLE_QUOTED_STRING token holding the
//! text between the quotes. A double-quoted string is split so expansions
//! inside it are tokenized in place:
//!
//! ```text
//! "var is $(VAR) aaa"
//!   ('"' DQUOTE) ("var is " STR_SEGMENT) ("$" DOLLAR) ("(" LPAREN)
//!   ("VAR" NAME) (")" RPAREN) (" aaa" STR_SEGMENT) ('"' DQUOTE)
//! ```

use crate::lexer::buffer::{ScratchBuf, STRING_BUF_CAPACITY};
use crate::lexer::lexer::Lexer;
use crate::lexer::text::is_one_of;
use crate::lexer::token::TokenType;
use crate::lexer::types::{DiagnosticSink, LexerError};

/// Characters a backslash escapes inside double quotes
const DQUOTE_ESCAPABLE: &str = "$`\"\\";

impl<S: DiagnosticSink> Lexer<S> {
    /// No escapes of any kind inside single quotes. An unclosed string is
    /// reported and its text discarded.
    pub(super) fn read_single_quoted_string(&mut self) {
        let start = self.pos;
        self.advance();
        let mut buf = ScratchBuf::with_capacity(STRING_BUF_CAPACITY);
        loop {
            match self.advance() {
                Some('\'') => {
                    self.emit(TokenType::SingleQuotedString, buf.take());
                    return;
                }
                Some(c) => buf.append_char(c),
                None => {
                    self.report(LexerError::UnclosedSingleQuote { pos: start });
                    return;
                }
            }
        }
    }

    /// The opening DQUOTE is emitted up front. On an unclosed string the
    /// tokens emitted so far stay in the stream and no closing DQUOTE
    /// follows.
    pub(super) fn read_double_quoted_string(&mut self) {
        let start = self.pos;
        self.advance();
        self.emit(TokenType::DQuote, "\"");
        let mut buf = ScratchBuf::with_capacity(STRING_BUF_CAPACITY);

        loop {
            match self.current() {
                None => {
                    self.report(LexerError::UnclosedDoubleQuote { pos: start });
                    return;
                }
                Some('"') => {
                    if !buf.is_empty() {
                        self.emit(TokenType::StrSegment, buf.take());
                    }
                    self.emit(TokenType::DQuote, "\"");
                    self.advance();
                    return;
                }
                Some('\\') => {
                    self.advance();
                    match self.current() {
                        Some(c) if is_one_of(c, DQUOTE_ESCAPABLE) => {
                            buf.append_char(c);
                            self.advance();
                        }
                        // line continuation
                        Some('\n') => {
                            self.advance();
                        }
                        _ => buf.append_char('\\'),
                    }
                }
                Some('$') => {
                    // The segment is flushed even when empty.
                    self.emit(TokenType::StrSegment, buf.take());
                    self.read_dollar_expansion();
                }
                Some(c) => {
                    buf.append_char(c);
                    self.advance();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::lexer::tokenize;
    use crate::lexer::token::Token;
    use crate::lexer::token::TokenType::{self, *};
    use crate::lexer::types::LexerError;

    fn lex(input: &str) -> Vec<Token> {
        tokenize(input).tokens.into_vec()
    }

    fn t(token_type: TokenType, value: &str) -> Token {
        Token::new(token_type, value)
    }

    #[test]
    fn test_single_quoted() {
        assert_eq!(lex("'hello world'"), vec![t(SingleQuotedString, "hello world")]);
    }

    #[test]
    fn test_single_quoted_is_verbatim() {
        assert_eq!(
            lex(r#"'a\'"#),
            vec![t(SingleQuotedString, "a\\")]
        );
        assert_eq!(lex("'$x \"y\"'"), vec![t(SingleQuotedString, "$x \"y\"")]);
    }

    #[test]
    fn test_adjacent_single_quoted() {
        assert_eq!(
            lex("'it''s'"),
            vec![t(SingleQuotedString, "it"), t(SingleQuotedString, "s")]
        );
    }

    #[test]
    fn test_empty_single_quoted() {
        assert_eq!(lex("''"), vec![t(SingleQuotedString, "")]);
    }

    #[test]
    fn test_unclosed_single_quoted() {
        let lexed = tokenize("echo 'abc");
        assert_eq!(lexed.tokens.types(), vec![Name, Whitespace]);
        assert_eq!(lexed.diagnostics, vec![LexerError::UnclosedSingleQuote { pos: 5 }]);
    }

    #[test]
    fn test_double_quoted_plain() {
        assert_eq!(
            lex("\"hello world\""),
            vec![t(DQuote, "\""), t(StrSegment, "hello world"), t(DQuote, "\"")]
        );
    }

    #[test]
    fn test_empty_double_quoted() {
        assert_eq!(lex("\"\""), vec![t(DQuote, "\""), t(DQuote, "\"")]);
    }

    #[test]
    fn test_double_quoted_with_variable() {
        assert_eq!(
            lex("\"a$x b\""),
            vec![
                t(DQuote, "\""),
                t(StrSegment, "a"),
                t(Dollar, "$"),
                t(Name, "x"),
                t(StrSegment, " b"),
                t(DQuote, "\""),
            ]
        );
    }

    #[test]
    fn test_empty_segment_before_expansion() {
        assert_eq!(
            lex("\"$a$b\""),
            vec![
                t(DQuote, "\""),
                t(StrSegment, ""),
                t(Dollar, "$"),
                t(Name, "a"),
                t(StrSegment, ""),
                t(Dollar, "$"),
                t(Name, "b"),
                t(DQuote, "\""),
            ]
        );
    }

    #[test]
    fn test_double_quoted_command_substitution() {
        assert_eq!(
            lex("\"var$(VAR)aaa\""),
            vec![
                t(DQuote, "\""),
                t(StrSegment, "var"),
                t(Dollar, "$"),
                t(LParen, "("),
                t(Name, "VAR"),
                t(RParen, ")"),
                t(StrSegment, "aaa"),
                t(DQuote, "\""),
            ]
        );
    }

    #[test]
    fn test_double_quoted_escapes() {
        assert_eq!(
            lex(r#""\$\`\"\\""#),
            vec![t(DQuote, "\""), t(StrSegment, "$`\"\\"), t(DQuote, "\"")]
        );
    }

    #[test]
    fn test_backslash_before_ordinary_char_is_kept() {
        assert_eq!(
            lex(r#""a\nb""#),
            vec![t(DQuote, "\""), t(StrSegment, "a\\nb"), t(DQuote, "\"")]
        );
    }

    #[test]
    fn test_line_continuation() {
        assert_eq!(
            lex("\"a\\\nb\""),
            vec![t(DQuote, "\""), t(StrSegment, "ab"), t(DQuote, "\"")]
        );
    }

    #[test]
    fn test_unclosed_double_quoted() {
        let lexed = tokenize("\"abc");
        assert_eq!(lexed.tokens.into_vec(), vec![t(DQuote, "\"")]);
        assert_eq!(lexed.diagnostics, vec![LexerError::UnclosedDoubleQuote { pos: 0 }]);
    }

    #[test]
    fn test_unclosed_double_quoted_keeps_interior_tokens() {
        let lexed = tokenize("\"a$x");
        assert_eq!(
            lexed.tokens.into_vec(),
            vec![t(DQuote, "\""), t(StrSegment, "a"), t(Dollar, "$"), t(Name, "x")]
        );
        assert_eq!(lexed.diagnostics.len(), 1);
    }

    #[test]
    fn test_invalid_expansion_inside_double_quotes() {
        let lexed = tokenize("\"cost $5\"");
        assert_eq!(
            lexed.tokens.into_vec(),
            vec![
                t(DQuote, "\""),
                t(StrSegment, "cost "),
                t(Dollar, "$"),
                t(StrSegment, "5"),
                t(DQuote, "\""),
            ]
        );
        assert_eq!(
            lexed.diagnostics,
            vec![LexerError::InvalidExpansion { ch: '5', pos: 6 }]
        );
    }
}
