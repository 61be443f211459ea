//! `$` expansions: `$NAME`, command substitution `$(...)` and parameter
//! expansion `${...}`.
//!
//! These sub-scanners recurse into each other, so nesting depth follows the
//! input up to `MAX_EXPANSION_DEPTH`. Past that, a `$` is emitted on its own
//! and the enclosing command substitution reads the rest iteratively. Every
//! loop iteration consumes at least one character.

use crate::lexer::buffer::{ScratchBuf, WORD_BUF_CAPACITY};
use crate::lexer::lexer::{Lexer, MAX_EXPANSION_DEPTH};
use crate::lexer::text::{is_letter, is_name_char, is_one_of};
use crate::lexer::token::{single_char_op, TokenType};
use crate::lexer::types::{DiagnosticSink, LexerError};

/// Operators that may follow the parameter name, optionally after a `:`
const PARAM_OPERATORS: &str = "+-=?";

impl<S: DiagnosticSink> Lexer<S> {
    pub(super) fn read_dollar_expansion(&mut self) {
        let start = self.pos;
        self.advance();
        self.emit(TokenType::Dollar, "$");

        if self.expansion_depth >= MAX_EXPANSION_DEPTH {
            self.report(LexerError::ExpansionTooDeep { pos: start });
            return;
        }

        self.expansion_depth += 1;
        match self.current() {
            Some('(') => self.read_command_substitution(),
            Some('{') => self.read_parameter_expansion(),
            Some(c) if is_letter(c) || c == '_' => self.read_alpha_numeric(),
            Some(c) => self.report(LexerError::InvalidExpansion { ch: c, pos: start }),
            None => self.report(LexerError::UnexpectedEndOfInput { pos: start }),
        }
        self.expansion_depth -= 1;
    }

    /// Read the parens of `$( ... )`, tracking depth so nested parens and
    /// nested expansions close at the right place.
    fn read_command_substitution(&mut self) {
        let start = self.pos;
        self.advance();
        self.emit(TokenType::LParen, "(");
        let mut depth = 1usize;

        while depth > 0 {
            let c = match self.current() {
                Some(c) => c,
                None => {
                    self.report(LexerError::UnclosedCommandSubstitution { pos: start });
                    return;
                }
            };
            match c {
                '$' => self.read_dollar_expansion(),
                '(' => {
                    self.emit(TokenType::LParen, "(");
                    self.advance();
                    depth += 1;
                }
                ')' => {
                    self.emit(TokenType::RParen, ")");
                    self.advance();
                    depth -= 1;
                }
                c if is_name_char(c) => self.read_alpha_numeric(),
                c => {
                    let pos = self.pos;
                    self.report(LexerError::UnhandledInCommandSubstitution { ch: c, pos });
                    self.advance();
                }
            }
        }
    }

    /// Read the braces of `${ ... }`. Only the first operator in an expansion
    /// splits it; later operator characters are ordinary text.
    fn read_parameter_expansion(&mut self) {
        let start = self.pos;
        self.advance();
        self.emit(TokenType::LBrace, "{");
        let mut buf = ScratchBuf::with_capacity(WORD_BUF_CAPACITY);
        let mut found_split = false;

        loop {
            let c = match self.current() {
                Some(c) => c,
                None => {
                    self.report(LexerError::UnclosedParameterExpansion { pos: start });
                    return;
                }
            };
            match c {
                '}' => {
                    // The final segment is flushed even when empty.
                    self.emit(TokenType::StrSegment, buf.take());
                    self.emit(TokenType::RBrace, "}");
                    self.advance();
                    return;
                }
                '\\' => {
                    self.advance();
                    if self.current() == Some('{') {
                        buf.append_char('{');
                        self.advance();
                    } else {
                        buf.append_char('\\');
                    }
                }
                // ${param:-word} ${param-word} ${param:=word} ${param?word} ...
                ':' | '+' | '-' | '=' | '?' if !found_split => {
                    found_split = true;
                    if buf.is_empty() {
                        self.report(LexerError::MissingParameterName { pos: self.pos });
                    } else {
                        self.emit(TokenType::StrSegment, buf.take());
                    }
                    if c == ':' {
                        self.emit(TokenType::Colon, ":");
                        self.advance();
                    }
                    if let Some(op) = self.current().filter(|op| is_one_of(*op, PARAM_OPERATORS)) {
                        if let Some(token_type) = single_char_op(op) {
                            self.emit(token_type, op.to_string());
                        }
                        self.advance();
                    }
                }
                // ${#param} ${param#word} ${param##word} ${param%word} ${param%%word}
                '#' | '%' if !found_split => {
                    found_split = true;
                    if !buf.is_empty() {
                        self.emit(TokenType::StrSegment, buf.take());
                    }
                    let token_type = if c == '#' {
                        TokenType::Hash
                    } else {
                        TokenType::Percent
                    };
                    self.emit(token_type, c.to_string());
                    self.advance();
                    if self.current() == Some(c) {
                        self.emit(token_type, c.to_string());
                        self.advance();
                    }
                    buf.clear();
                }
                c => {
                    buf.append_char(c);
                    self.advance();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::lexer::{tokenize, MAX_EXPANSION_DEPTH};
    use crate::lexer::token::Token;
    use crate::lexer::token::TokenType::{self, *};
    use crate::lexer::types::LexerError;

    fn lex(input: &str) -> Vec<Token> {
        tokenize(input).tokens.into_vec()
    }

    fn t(token_type: TokenType, value: &str) -> Token {
        Token::new(token_type, value)
    }

    fn in_dquotes(inner: Vec<Token>) -> Vec<Token> {
        let mut tokens = vec![t(DQuote, "\""), t(StrSegment, "")];
        tokens.extend(inner);
        tokens.push(t(DQuote, "\""));
        tokens
    }

    #[test]
    fn test_bare_name() {
        assert_eq!(
            lex("\"$HOME\""),
            in_dquotes(vec![t(Dollar, "$"), t(Name, "HOME")])
        );
    }

    #[test]
    fn test_top_level_dollar_is_punctuation() {
        assert_eq!(lex("$x"), vec![t(Dollar, "$"), t(Name, "x")]);
    }

    #[test]
    fn test_nested_command_substitution() {
        assert_eq!(
            lex("\"$(a$(b)(c))\""),
            in_dquotes(vec![
                t(Dollar, "$"),
                t(LParen, "("),
                t(Name, "a"),
                t(Dollar, "$"),
                t(LParen, "("),
                t(Name, "b"),
                t(RParen, ")"),
                t(LParen, "("),
                t(Name, "c"),
                t(RParen, ")"),
                t(RParen, ")"),
            ])
        );
    }

    #[test]
    fn test_command_substitution_with_parameter_expansion() {
        assert_eq!(
            lex("\"$(${x})\""),
            in_dquotes(vec![
                t(Dollar, "$"),
                t(LParen, "("),
                t(Dollar, "$"),
                t(LBrace, "{"),
                t(StrSegment, "x"),
                t(RBrace, "}"),
                t(RParen, ")"),
            ])
        );
    }

    #[test]
    fn test_command_substitution_skips_unhandled_chars() {
        let lexed = tokenize("\"$(a b)\"");
        assert_eq!(
            lexed.tokens.into_vec(),
            in_dquotes(vec![
                t(Dollar, "$"),
                t(LParen, "("),
                t(Name, "a"),
                t(Name, "b"),
                t(RParen, ")"),
            ])
        );
        assert_eq!(
            lexed.diagnostics,
            vec![LexerError::UnhandledInCommandSubstitution { ch: ' ', pos: 4 }]
        );
    }

    #[test]
    fn test_unclosed_command_substitution() {
        let lexed = tokenize("\"$(a");
        assert_eq!(
            lexed.diagnostics,
            vec![
                LexerError::UnclosedCommandSubstitution { pos: 2 },
                LexerError::UnclosedDoubleQuote { pos: 0 },
            ]
        );
    }

    #[test]
    fn test_simple_parameter_expansion() {
        assert_eq!(
            lex("\"${foo}\""),
            in_dquotes(vec![
                t(Dollar, "$"),
                t(LBrace, "{"),
                t(StrSegment, "foo"),
                t(RBrace, "}"),
            ])
        );
    }

    #[test]
    fn test_empty_parameter_expansion() {
        assert_eq!(
            lex("\"${}\""),
            in_dquotes(vec![
                t(Dollar, "$"),
                t(LBrace, "{"),
                t(StrSegment, ""),
                t(RBrace, "}"),
            ])
        );
    }

    #[test]
    fn test_default_value_forms() {
        assert_eq!(
            lex("\"${a:-b}\""),
            in_dquotes(vec![
                t(Dollar, "$"),
                t(LBrace, "{"),
                t(StrSegment, "a"),
                t(Colon, ":"),
                t(Dash, "-"),
                t(StrSegment, "b"),
                t(RBrace, "}"),
            ])
        );
        assert_eq!(
            lex("\"${a=b}\""),
            in_dquotes(vec![
                t(Dollar, "$"),
                t(LBrace, "{"),
                t(StrSegment, "a"),
                t(Equals, "="),
                t(StrSegment, "b"),
                t(RBrace, "}"),
            ])
        );
    }

    #[test]
    fn test_colon_without_operator() {
        assert_eq!(
            lex("\"${a:2}\""),
            in_dquotes(vec![
                t(Dollar, "$"),
                t(LBrace, "{"),
                t(StrSegment, "a"),
                t(Colon, ":"),
                t(StrSegment, "2"),
                t(RBrace, "}"),
            ])
        );
    }

    #[test]
    fn test_only_first_operator_splits() {
        assert_eq!(
            lex("\"${a:?x-y=z}\""),
            in_dquotes(vec![
                t(Dollar, "$"),
                t(LBrace, "{"),
                t(StrSegment, "a"),
                t(Colon, ":"),
                t(Question, "?"),
                t(StrSegment, "x-y=z"),
                t(RBrace, "}"),
            ])
        );
    }

    #[test]
    fn test_missing_parameter_name() {
        let lexed = tokenize("\"${:-x}\"");
        assert_eq!(
            lexed.tokens.into_vec(),
            in_dquotes(vec![
                t(Dollar, "$"),
                t(LBrace, "{"),
                t(Colon, ":"),
                t(Dash, "-"),
                t(StrSegment, "x"),
                t(RBrace, "}"),
            ])
        );
        assert_eq!(lexed.diagnostics, vec![LexerError::MissingParameterName { pos: 3 }]);
    }

    #[test]
    fn test_length_form() {
        let lexed = tokenize("\"${#x}\"");
        assert!(lexed.is_clean());
        assert_eq!(
            lexed.tokens.into_vec(),
            in_dquotes(vec![
                t(Dollar, "$"),
                t(LBrace, "{"),
                t(Hash, "#"),
                t(StrSegment, "x"),
                t(RBrace, "}"),
            ])
        );
    }

    #[test]
    fn test_prefix_and_suffix_removal() {
        assert_eq!(
            lex("\"${p##*/}\""),
            in_dquotes(vec![
                t(Dollar, "$"),
                t(LBrace, "{"),
                t(StrSegment, "p"),
                t(Hash, "#"),
                t(Hash, "#"),
                t(StrSegment, "*/"),
                t(RBrace, "}"),
            ])
        );
        assert_eq!(
            lex("\"${p%.*}\""),
            in_dquotes(vec![
                t(Dollar, "$"),
                t(LBrace, "{"),
                t(StrSegment, "p"),
                t(Percent, "%"),
                t(StrSegment, ".*"),
                t(RBrace, "}"),
            ])
        );
        assert_eq!(
            lex("\"${p%%x%y}\""),
            in_dquotes(vec![
                t(Dollar, "$"),
                t(LBrace, "{"),
                t(StrSegment, "p"),
                t(Percent, "%"),
                t(Percent, "%"),
                t(StrSegment, "x%y"),
                t(RBrace, "}"),
            ])
        );
    }

    #[test]
    fn test_escaped_brace() {
        assert_eq!(
            lex(r#""${a:-\{\x}""#),
            in_dquotes(vec![
                t(Dollar, "$"),
                t(LBrace, "{"),
                t(StrSegment, "a"),
                t(Colon, ":"),
                t(Dash, "-"),
                t(StrSegment, "{\\x"),
                t(RBrace, "}"),
            ])
        );
    }

    #[test]
    fn test_unclosed_parameter_expansion() {
        let lexed = tokenize("\"${abc");
        assert_eq!(
            lexed.tokens.into_vec(),
            vec![t(DQuote, "\""), t(StrSegment, ""), t(Dollar, "$"), t(LBrace, "{")]
        );
        assert_eq!(
            lexed.diagnostics,
            vec![
                LexerError::UnclosedParameterExpansion { pos: 2 },
                LexerError::UnclosedDoubleQuote { pos: 0 },
            ]
        );
    }

    #[test]
    fn test_dollar_at_end_of_input() {
        let lexed = tokenize("\"$");
        assert_eq!(
            lexed.diagnostics,
            vec![
                LexerError::UnexpectedEndOfInput { pos: 1 },
                LexerError::UnclosedDoubleQuote { pos: 0 },
            ]
        );
    }

    #[test]
    fn test_hash_and_percent_without_name() {
        let lexed = tokenize("\"${##x}\"");
        assert!(lexed.is_clean());
        assert_eq!(
            lexed.tokens.into_vec(),
            in_dquotes(vec![
                t(Dollar, "$"),
                t(LBrace, "{"),
                t(Hash, "#"),
                t(Hash, "#"),
                t(StrSegment, "x"),
                t(RBrace, "}"),
            ])
        );
        assert_eq!(
            lex("\"${%%x}\""),
            in_dquotes(vec![
                t(Dollar, "$"),
                t(LBrace, "{"),
                t(Percent, "%"),
                t(Percent, "%"),
                t(StrSegment, "x"),
                t(RBrace, "}"),
            ])
        );
    }

    #[test]
    fn test_alternate_value_forms() {
        assert_eq!(
            lex("\"${a+b}\""),
            in_dquotes(vec![
                t(Dollar, "$"),
                t(LBrace, "{"),
                t(StrSegment, "a"),
                t(Plus, "+"),
                t(StrSegment, "b"),
                t(RBrace, "}"),
            ])
        );
        assert_eq!(
            lex("\"${a:+b}\""),
            in_dquotes(vec![
                t(Dollar, "$"),
                t(LBrace, "{"),
                t(StrSegment, "a"),
                t(Colon, ":"),
                t(Plus, "+"),
                t(StrSegment, "b"),
                t(RBrace, "}"),
            ])
        );
    }

    #[test]
    fn test_expansion_depth_limit() {
        let input = format!("\"{}", "$(".repeat(MAX_EXPANSION_DEPTH + 10));
        let lexed = tokenize(&input);

        let too_deep: Vec<usize> = lexed
            .diagnostics
            .iter()
            .filter_map(|d| match d {
                LexerError::ExpansionTooDeep { pos } => Some(*pos),
                _ => None,
            })
            .collect();
        assert_eq!(too_deep.len(), 10);
        // the `$` of the first substitution past the limit
        assert_eq!(too_deep[0], 1 + 2 * MAX_EXPANSION_DEPTH);
        assert_eq!(lexed.tokens.source_text(), input);
    }

    #[test]
    fn test_deep_nesting_does_not_overflow() {
        let input = format!("\"{}", "$(".repeat(10_000));
        let lexed = tokenize(&input);
        assert!(!lexed.is_clean());
        assert_eq!(lexed.tokens.source_text(), input);
        assert!(matches!(
            lexed.diagnostics.last(),
            Some(LexerError::UnclosedDoubleQuote { pos: 0 })
        ));
    }
}
