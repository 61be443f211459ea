//! Character classes used by the lexer.
//!
//! All predicates are ASCII-only. A character outside every class is
//! "unrecognized" and must be handled by the caller.

/// Punctuation recognized by the shell. Underscore is deliberately absent:
/// it belongs to names.
pub const SHELL_PUNCTUATION: &str = "`~!@#$%^&*()+-={}[]|\\:;\"'<>,.?/";

pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

pub fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
}

pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

pub fn is_shell_punctuation(c: char) -> bool {
    SHELL_PUNCTUATION.contains(c)
}

/// Letters, digits and underscore: the characters of a WORD or NAME.
pub fn is_name_char(c: char) -> bool {
    is_letter(c) || is_digit(c) || c == '_'
}

/// Check if `c` is one of `choices`
pub fn is_one_of(c: char, choices: &str) -> bool {
    choices.contains(c)
}
