//! Lexical rules of the TOML dialect accepted by this crate.
//!
//! ## Document structure
//!
//! A document is a sequence of lines. Each line is blank, a comment, a
//! `key = value` pair, a `[table]` header or an `[[array.table]]` header:
//!
//! ```text
//! # Comment attached to the next pair
//! title = "Example"
//! owner.name = "Tom"          # dotted key, trailing comment is dropped
//!
//! [database]
//! ports = [ 8000, 8001 ]
//! limits = { cpu = 2, mem = "4G" }
//!
//! [[products]]
//! sku = 0xFF_00
//! ```
//!
//! ## Keys
//!
//! Bare keys use `A-Z a-z 0-9 _ -`. Anything else must be quoted with basic
//! (`"..."`, escapes allowed) or literal (`'...'`) single-line strings.
//! Segments are joined with `.`; whitespace may flank the dots but not split
//! a segment.
//!
//! ## Values
//!
//! Raw tokens are tried in this order:
//!
//! | Kind | Example |
//! |------|---------|
//! | boolean | `true`, `false` |
//! | special float | `nan`, `+inf`, `-inf` |
//! | decimal integer | `-1_000` |
//! | based integer | `0xdead_beef`, `0o755`, `0b1010` |
//! | float | `6.626e-34`, `1e10` |
//! | offset date-time | `1979-05-27T07:32:00.999-07:00` |
//! | local date-time | `1979-05-27 07:32:00` |
//! | local date | `1979-05-27` |
//! | local time | `07:32:00.5` |
//!
//! Quoted values are single-line or triple-quoted multiline strings; `[`
//! opens an array (newlines and comments allowed) and `{` an inline table
//! (single line only, no trailing comma).

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// The state of the document parser when an error was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseState {
    /// Between productions: whitespace, comments, keys or headers.
    #[default]
    None,
    /// Reading a `key = value` pair.
    KeyValuePair,
    /// Reading a `[table]` or `[[array.table]]` header.
    Table,
    /// Consuming the remainder of a line after a production.
    SkipToNextLine,
}

impl fmt::Display for ParseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParseState::None => "document",
            ParseState::KeyValuePair => "key-value pair",
            ParseState::Table => "table header",
            ParseState::SkipToNextLine => "end of line",
        };
        f.write_str(name)
    }
}

pub const COMMENT_START: char = '#';
pub const KEY_SEPARATOR: char = '.';
pub const KEY_VALUE_SEPARATOR: char = '=';
pub const VALUE_SEPARATOR: char = ',';
pub const ARRAY_START: char = '[';
pub const ARRAY_END: char = ']';
pub const TABLE_START: char = '[';
pub const TABLE_END: char = ']';
pub const INLINE_TABLE_START: char = '{';
pub const INLINE_TABLE_END: char = '}';
pub const BASIC_QUOTE: char = '"';
pub const LITERAL_QUOTE: char = '\'';
pub const ESCAPE: char = '\\';

pub const TRUE_VALUE: &str = "true";
pub const FALSE_VALUE: &str = "false";
pub const NAN_VALUE: &str = "nan";
pub const POS_NAN_VALUE: &str = "+nan";
pub const NEG_NAN_VALUE: &str = "-nan";
pub const INF_VALUE: &str = "inf";
pub const POS_INF_VALUE: &str = "+inf";
pub const NEG_INF_VALUE: &str = "-inf";

/// Longest fractional-seconds run kept by date and time values.
pub const MAX_SECONDS_PRECISION: u8 = 7;

static INTEGER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(0|[1-9](_?[0-9])*)$").expect("integer pattern is valid")
});

static BASED_INTEGER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^0(x[0-9A-Fa-f](_?[0-9A-Fa-f])*|o[0-7](_?[0-7])*|b[01](_?[01])*)$")
        .expect("based integer pattern is valid")
});

static FLOAT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(0|[1-9](_?[0-9])*)(\.[0-9](_?[0-9])*)?([eE][+-]?[0-9](_?[0-9])*)?$")
        .expect("float pattern is valid")
});

/// Space or tab.
#[inline]
#[must_use]
pub const fn is_whitespace(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// `\n` or `\r`.
#[inline]
#[must_use]
pub const fn is_newline(c: char) -> bool {
    c == '\n' || c == '\r'
}

#[inline]
#[must_use]
pub const fn is_empty_space(c: char) -> bool {
    is_whitespace(c) || is_newline(c)
}

#[inline]
#[must_use]
pub const fn is_bare_key(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

#[inline]
#[must_use]
pub const fn is_quote(c: char) -> bool {
    c == BASIC_QUOTE || c == LITERAL_QUOTE
}

/// Characters that end a raw (unquoted) value.
#[inline]
#[must_use]
pub const fn is_value_end(c: char) -> bool {
    c == COMMENT_START
        || is_newline(c)
        || c == VALUE_SEPARATOR
        || c == ARRAY_END
        || c == INLINE_TABLE_END
}

/// Whether `c` can only appear in a string through an escape sequence.
///
/// Line feed and carriage return are allowed raw in multiline strings only.
#[inline]
#[must_use]
pub const fn must_be_escaped(c: char, allow_newlines: bool) -> bool {
    let code = c as u32;
    code <= 0x08
        || code == 0x0B
        || code == 0x0C
        || (code >= 0x0E && code <= 0x1F)
        || code == 0x7F
        || (!allow_newlines && code >= 0x0A && code <= 0x0D)
}

/// A bare key contains only bare-key characters and is not empty.
#[must_use]
pub fn is_bare_key_text(key: &str) -> bool {
    !key.is_empty() && key.chars().all(is_bare_key)
}

#[must_use]
pub fn is_boolean(value: &str) -> bool {
    value == TRUE_VALUE || value == FALSE_VALUE
}

#[must_use]
pub fn is_nan(value: &str) -> bool {
    value == NAN_VALUE || value == POS_NAN_VALUE || value == NEG_NAN_VALUE
}

#[must_use]
pub fn is_positive_infinity(value: &str) -> bool {
    value == INF_VALUE || value == POS_INF_VALUE
}

#[must_use]
pub fn is_negative_infinity(value: &str) -> bool {
    value == NEG_INF_VALUE
}

#[must_use]
pub fn is_integer(value: &str) -> bool {
    INTEGER_PATTERN.is_match(value)
}

#[must_use]
pub fn is_based_integer(value: &str) -> bool {
    BASED_INTEGER_PATTERN.is_match(value)
}

#[must_use]
pub fn is_float(value: &str) -> bool {
    FLOAT_PATTERN.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_classes() {
        assert!(is_whitespace(' '));
        assert!(is_whitespace('\t'));
        assert!(!is_whitespace('\n'));
        assert!(is_newline('\r'));
        assert!(is_empty_space('\n'));
        assert!(is_bare_key('-'));
        assert!(is_bare_key('Z'));
        assert!(!is_bare_key('.'));
        assert!(!is_bare_key('é'));
        assert!(is_quote('\''));
        assert!(is_value_end('}'));
        assert!(!is_value_end(' '));
    }

    #[test]
    fn test_must_be_escaped() {
        assert!(must_be_escaped('\u{0}', true));
        assert!(must_be_escaped('\u{7f}', true));
        assert!(!must_be_escaped('\t', false));
        assert!(!must_be_escaped('\n', true));
        assert!(must_be_escaped('\n', false));
        assert!(must_be_escaped('\r', false));
        assert!(!must_be_escaped('a', false));
        assert!(!must_be_escaped('ü', false));
    }

    #[test]
    fn test_integer_patterns() {
        assert!(is_integer("0"));
        assert!(is_integer("+99"));
        assert!(is_integer("-17"));
        assert!(is_integer("1_000"));
        assert!(!is_integer("01"));
        assert!(!is_integer("1__0"));
        assert!(!is_integer("_1"));
        assert!(!is_integer("1_"));
        assert!(!is_integer("1.0"));
    }

    #[test]
    fn test_based_integer_patterns() {
        assert!(is_based_integer("0xDEADbeef"));
        assert!(is_based_integer("0xdead_beef"));
        assert!(is_based_integer("0o755"));
        assert!(is_based_integer("0b1101_0101"));
        assert!(!is_based_integer("0x"));
        assert!(!is_based_integer("0o8"));
        assert!(!is_based_integer("0b2"));
        assert!(!is_based_integer("0x_1"));
        assert!(!is_based_integer("+0x1"));
    }

    #[test]
    fn test_float_patterns() {
        assert!(is_float("1.0"));
        assert!(is_float("-0.01"));
        assert!(is_float("5e+22"));
        assert!(is_float("6.626e-34"));
        assert!(is_float("224_617.445_991"));
        assert!(is_float("1E6"));
        assert!(!is_float(".7"));
        assert!(!is_float("7."));
        assert!(!is_float("3.e+20"));
        assert!(!is_float("nan"));
    }

    #[test]
    fn test_special_tokens() {
        assert!(is_nan("-nan"));
        assert!(is_positive_infinity("+inf"));
        assert!(is_negative_infinity("-inf"));
        assert!(!is_negative_infinity("inf"));
        assert!(is_boolean("false"));
        assert!(!is_boolean("False"));
    }

    #[test]
    fn test_bare_key_text() {
        assert!(is_bare_key_text("server-1_a"));
        assert!(!is_bare_key_text(""));
        assert!(!is_bare_key_text("a.b"));
        assert!(!is_bare_key_text("with space"));
    }
}
