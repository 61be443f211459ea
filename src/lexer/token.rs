//! Token Model
//!
//! The closed catalog of token kinds produced by the lexer and the token
//! record itself. A token always carries the exact source text that produced
//! it, so a token sequence can be concatenated back into its input.

use std::collections::HashMap;
use std::fmt;

use serde::{Serialize, Serializer};

/// Token types for the shell lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    // Words and identifiers
    Word,
    Name, // WORD that does not start with a digit

    // Layout
    Newline,
    Whitespace, // excluding '\n'

    // Quoted text
    SingleQuotedString,
    StrSegment,

    // Single-character punctuation
    Pipe,      // |
    Amp,       // &
    Semi,      // ;
    Less,      // <
    Greater,   // >
    LParen,    // (
    RParen,    // )
    Dollar,    // $
    Backtick,  // `
    Backslash, // \
    Quote,     // '
    DQuote,    // "
    Plus,      // +
    Dash,      // -
    Asterisk,  // *
    Slash,     // /
    Question,  // ?
    LBracket,  // [
    RBracket,  // ]
    Hash,      // #
    Tilde,     // ~
    Equals,    // =
    Percent,   // %
    LBrace,    // {
    RBrace,    // }
    Bang,      // !
    Colon,     // : (parameter expansion only)

    // Multi-character operators
    AndIf,     // &&
    OrIf,      // ||
    DSemi,     // ;;
    DLess,     // <<
    DGreat,    // >>
    LessAnd,   // <&
    GreatAnd,  // >&
    LessGreat, // <>
    DLessDash, // <<-
    Clobber,   // >|
    DLBracket, // [[
    DRBracket, // ]]

    // Reserved words
    If,
    Then,
    Else,
    Elif,
    Fi,
    Do,
    Done,
    Case,
    Esac,
    While,
    Until,
    For,
    In,
    Function,
    Select,
}

impl TokenType {
    /// Canonical upper-case name, as printed by the token dump.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Word => "WORD",
            Self::Name => "NAME",
            Self::Newline => "NEWLINE",
            Self::Whitespace => "WHITESPACE",
            Self::SingleQuotedString => "SINGLE_QUOTED_STRING",
            Self::StrSegment => "STR_SEGMENT",
            Self::Pipe => "PIPE",
            Self::Amp => "AMPERSAND",
            Self::Semi => "SEMI",
            Self::Less => "LESS",
            Self::Greater => "GREATER",
            Self::LParen => "LPAREN",
            Self::RParen => "RPAREN",
            Self::Dollar => "DOLLAR",
            Self::Backtick => "BACKTICK",
            Self::Backslash => "BACKSLASH",
            Self::Quote => "QUOTE",
            Self::DQuote => "DQUOTE",
            Self::Plus => "PLUS",
            Self::Dash => "DASH",
            Self::Asterisk => "ASTERISK",
            Self::Slash => "SLASH",
            Self::Question => "QUESTION",
            Self::LBracket => "LBRACKET",
            Self::RBracket => "RBRACKET",
            Self::Hash => "HASH",
            Self::Tilde => "TILDE",
            Self::Equals => "EQUALS",
            Self::Percent => "PERCENT",
            Self::LBrace => "LBRACE",
            Self::RBrace => "RBRACE",
            Self::Bang => "BANG",
            Self::Colon => "COLON",
            Self::AndIf => "AND_IF",
            Self::OrIf => "OR_IF",
            Self::DSemi => "DSEMI",
            Self::DLess => "DLESS",
            Self::DGreat => "DGREAT",
            Self::LessAnd => "LESSAND",
            Self::GreatAnd => "GREATAND",
            Self::LessGreat => "LESSGREAT",
            Self::DLessDash => "DLESSDASH",
            Self::Clobber => "CLOBBER",
            Self::DLBracket => "DLBRACKET",
            Self::DRBracket => "DRBRACKET",
            Self::If => "IF",
            Self::Then => "THEN",
            Self::Else => "ELSE",
            Self::Elif => "ELIF",
            Self::Fi => "FI",
            Self::Do => "DO",
            Self::Done => "DONE",
            Self::Case => "CASE",
            Self::Esac => "ESAC",
            Self::While => "WHILE",
            Self::Until => "UNTIL",
            Self::For => "FOR",
            Self::In => "IN",
            Self::Function => "FUNCTION",
            Self::Select => "SELECT",
        }
    }

    /// Fixed source text of punctuation and reserved-word kinds. Kinds whose
    /// text varies (words, whitespace, quoted text) return `None`.
    pub fn as_str(&self) -> Option<&'static str> {
        let s = match self {
            Self::Word
            | Self::Name
            | Self::Whitespace
            | Self::SingleQuotedString
            | Self::StrSegment => return None,
            Self::Newline => "\n",
            Self::Pipe => "|",
            Self::Amp => "&",
            Self::Semi => ";",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::Dollar => "$",
            Self::Backtick => "`",
            Self::Backslash => "\\",
            Self::Quote => "'",
            Self::DQuote => "\"",
            Self::Plus => "+",
            Self::Dash => "-",
            Self::Asterisk => "*",
            Self::Slash => "/",
            Self::Question => "?",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::Hash => "#",
            Self::Tilde => "~",
            Self::Equals => "=",
            Self::Percent => "%",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::Bang => "!",
            Self::Colon => ":",
            Self::AndIf => "&&",
            Self::OrIf => "||",
            Self::DSemi => ";;",
            Self::DLess => "<<",
            Self::DGreat => ">>",
            Self::LessAnd => "<&",
            Self::GreatAnd => ">&",
            Self::LessGreat => "<>",
            Self::DLessDash => "<<-",
            Self::Clobber => ">|",
            Self::DLBracket => "[[",
            Self::DRBracket => "]]",
            Self::If => "if",
            Self::Then => "then",
            Self::Else => "else",
            Self::Elif => "elif",
            Self::Fi => "fi",
            Self::Do => "do",
            Self::Done => "done",
            Self::Case => "case",
            Self::Esac => "esac",
            Self::While => "while",
            Self::Until => "until",
            Self::For => "for",
            Self::In => "in",
            Self::Function => "function",
            Self::Select => "select",
        };
        Some(s)
    }

    pub fn is_punctuation(&self) -> bool {
        matches!(
            self,
            Self::Pipe
                | Self::Amp
                | Self::Semi
                | Self::Less
                | Self::Greater
                | Self::LParen
                | Self::RParen
                | Self::Dollar
                | Self::Backtick
                | Self::Backslash
                | Self::Quote
                | Self::DQuote
                | Self::Plus
                | Self::Dash
                | Self::Asterisk
                | Self::Slash
                | Self::Question
                | Self::LBracket
                | Self::RBracket
                | Self::Hash
                | Self::Tilde
                | Self::Equals
                | Self::Percent
                | Self::LBrace
                | Self::RBrace
                | Self::Bang
                | Self::Colon
                | Self::AndIf
                | Self::OrIf
                | Self::DSemi
                | Self::DLess
                | Self::DGreat
                | Self::LessAnd
                | Self::GreatAnd
                | Self::LessGreat
                | Self::DLessDash
                | Self::Clobber
                | Self::DLBracket
                | Self::DRBracket
        )
    }

    pub fn is_reserved_word(&self) -> bool {
        matches!(
            self,
            Self::If
                | Self::Then
                | Self::Else
                | Self::Elif
                | Self::Fi
                | Self::Do
                | Self::Done
                | Self::Case
                | Self::Esac
                | Self::While
                | Self::Until
                | Self::For
                | Self::In
                | Self::Function
                | Self::Select
        )
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for TokenType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

lazy_static::lazy_static! {
    /// Reserved words of the shell grammar
    static ref RESERVED_WORDS: HashMap<&'static str, TokenType> = {
        let mut m = HashMap::new();
        m.insert("if", TokenType::If);
        m.insert("then", TokenType::Then);
        m.insert("else", TokenType::Else);
        m.insert("elif", TokenType::Elif);
        m.insert("fi", TokenType::Fi);
        m.insert("do", TokenType::Do);
        m.insert("done", TokenType::Done);
        m.insert("case", TokenType::Case);
        m.insert("esac", TokenType::Esac);
        m.insert("while", TokenType::While);
        m.insert("until", TokenType::Until);
        m.insert("for", TokenType::For);
        m.insert("in", TokenType::In);
        m.insert("function", TokenType::Function);
        m.insert("select", TokenType::Select);
        m
    };

    /// Single-character operators
    static ref SINGLE_CHAR_OPS: HashMap<char, TokenType> = {
        let mut m = HashMap::new();
        m.insert('|', TokenType::Pipe);
        m.insert('&', TokenType::Amp);
        m.insert(';', TokenType::Semi);
        m.insert('<', TokenType::Less);
        m.insert('>', TokenType::Greater);
        m.insert('(', TokenType::LParen);
        m.insert(')', TokenType::RParen);
        m.insert('$', TokenType::Dollar);
        m.insert('`', TokenType::Backtick);
        m.insert('\\', TokenType::Backslash);
        m.insert('+', TokenType::Plus);
        m.insert('-', TokenType::Dash);
        m.insert('*', TokenType::Asterisk);
        m.insert('/', TokenType::Slash);
        m.insert('?', TokenType::Question);
        m.insert('[', TokenType::LBracket);
        m.insert(']', TokenType::RBracket);
        m.insert('#', TokenType::Hash);
        m.insert('~', TokenType::Tilde);
        m.insert('=', TokenType::Equals);
        m.insert('%', TokenType::Percent);
        m.insert('{', TokenType::LBrace);
        m.insert('}', TokenType::RBrace);
        m.insert('!', TokenType::Bang);
        m
    };
}

/// Two-character operators. `<<` is here too; the lexer extends it to `<<-`
/// when a dash follows.
pub const TWO_CHAR_OPS: &[(&str, TokenType)] = &[
    ("<<", TokenType::DLess),
    ("&&", TokenType::AndIf),
    ("||", TokenType::OrIf),
    (";;", TokenType::DSemi),
    (">>", TokenType::DGreat),
    ("<&", TokenType::LessAnd),
    (">&", TokenType::GreatAnd),
    ("<>", TokenType::LessGreat),
    (">|", TokenType::Clobber),
    ("[[", TokenType::DLBracket),
    ("]]", TokenType::DRBracket),
];

/// Look up the reserved word spelled exactly `s`.
pub fn reserved_word(s: &str) -> Option<TokenType> {
    RESERVED_WORDS.get(s).copied()
}

/// Look up the single-character token kind for `c`.
pub fn single_char_op(c: char) -> Option<TokenType> {
    SINGLE_CHAR_OPS.get(&c).copied()
}

/// Look up the two-character operator formed by `c0` followed by `c1`.
pub fn two_char_op(c0: char, c1: char) -> Option<(&'static str, TokenType)> {
    TWO_CHAR_OPS.iter().copied().find(|(op, _)| {
        let mut chars = op.chars();
        chars.next() == Some(c0) && chars.next() == Some(c1)
    })
}

/// A token produced by the lexer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Token {
    #[serde(rename = "type")]
    pub token_type: TokenType,
    pub value: String,
}

impl Token {
    pub fn new(token_type: TokenType, value: impl Into<String>) -> Self {
        Self {
            token_type,
            value: value.into(),
        }
    }

    /// Build a NAME token, finalizing it as a reserved word when its text is
    /// one. Consumers never observe a reserved word typed as NAME.
    pub fn name(value: impl Into<String>) -> Self {
        let value = value.into();
        let token_type = reserved_word(&value).unwrap_or(TokenType::Name);
        Self { token_type, value }
    }

    /// Source text of this token including any delimiters the lexer strips
    /// from the value (single quotes).
    pub fn source_text(&self) -> String {
        match self.token_type {
            TokenType::SingleQuotedString => format!("'{}'", self.value),
            _ => self.value.clone(),
        }
    }
}

/// Renders as `("text" KIND)` with control characters and quotes escaped.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(\"{}\" {})", self.value.escape_debug(), self.token_type)
    }
}
