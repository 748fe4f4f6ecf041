//! Conversion between raw text and the escaped body of a basic TOML string.
//!
//! [`escape`] produces text that can be placed between `"` quotes, and
//! [`unescape`] reverses it. For every Rust string `s`,
//! `unescape(&escape(s)) == Ok(s)`.
//!
//! ```rust
//! use toml_tree::{escape, unescape};
//!
//! let raw = "tab\there \u{1F600}";
//! let escaped = escape(raw);
//! assert_eq!(escaped, "tab\\there \u{1F600}");
//! assert_eq!(unescape(&escaped).unwrap(), raw);
//! ```

use crate::syntax::must_be_escaped;
use crate::{Error, Result};
use std::fmt::Write;

/// Escapes `text` for a single-line basic string.
#[must_use]
pub fn escape(text: &str) -> String {
    escape_with(text, true, false)
}

/// Escapes `text` for a basic string.
///
/// With `escape_newlines` unset, line feeds are kept raw (multiline
/// strings). Carriage returns are always escaped so a value's line endings
/// survive re-parsing. With `force_ascii` set, every non-ASCII character
/// becomes a `\uXXXX` or `\UXXXXXXXX` escape.
#[must_use]
pub fn escape_with(text: &str, escape_newlines: bool, force_ascii: bool) -> String {
    let mut out = String::with_capacity(text.len() + 2);

    for c in text.chars() {
        match c {
            '\u{8}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' if escape_newlines => out.push_str("\\n"),
            '\u{c}' => out.push_str("\\f"),
            '\r' => out.push_str("\\r"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            c if must_be_escaped(c, !escape_newlines) || (force_ascii && !c.is_ascii()) => {
                push_code_point(&mut out, c);
            }
            c => out.push(c),
        }
    }

    out
}

fn push_code_point(out: &mut String, c: char) {
    let code = c as u32;
    // Writing into a String cannot fail
    let _ = if code > 0xFFFF {
        write!(out, "\\U{code:08X}")
    } else {
        write!(out, "\\u{code:04X}")
    };
}

/// Resolves every escape sequence in the body of a basic string.
///
/// # Errors
///
/// Returns [`Error::Escape`] for an unknown escape character, a truncated
/// `\u`/`\U` sequence, a sequence naming a value that is not a Unicode
/// scalar, or a trailing lone backslash.
pub fn unescape(text: &str) -> Result<String> {
    let Some(first) = text.find('\\') else {
        return Ok(text.to_string());
    };

    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..first]);

    let mut chars = text[first..].char_indices().map(|(i, c)| (i + first, c));
    while let Some((offset, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        let Some((_, kind)) = chars.next() else {
            return Err(Error::escape("\\", offset));
        };

        match kind {
            'b' => out.push('\u{8}'),
            't' => out.push('\t'),
            'n' => out.push('\n'),
            'f' => out.push('\u{c}'),
            'r' => out.push('\r'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            '\\' => out.push('\\'),
            'u' | 'U' => {
                let width = if kind == 'u' { 4 } else { 8 };
                let start = offset + 2;
                let end = start + width;
                let digits = text
                    .get(start..end)
                    .filter(|digits| digits.chars().all(|d| d.is_ascii_hexdigit()))
                    .ok_or_else(|| Error::escape(sequence_at(text, offset, width + 2), offset))?;
                let decoded = u32::from_str_radix(digits, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| Error::escape(&text[offset..end], offset))?;
                out.push(decoded);
                for _ in 0..width {
                    chars.next();
                }
            }
            _ => return Err(Error::escape(sequence_at(text, offset, 2), offset)),
        }
    }

    Ok(out)
}

/// Up to `len` characters of `text` starting at `offset`.
fn sequence_at(text: &str, offset: usize, len: usize) -> &str {
    let tail = &text[offset..];
    let end = tail
        .char_indices()
        .nth(len)
        .map_or(tail.len(), |(index, _)| index);
    &tail[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_escapes() {
        assert_eq!(escape("a\"b\\c"), "a\\\"b\\\\c");
        assert_eq!(escape("\u{8}\t\n\u{c}\r"), "\\b\\t\\n\\f\\r");
    }

    #[test]
    fn test_newlines_kept_for_multiline() {
        assert_eq!(escape_with("one\ntwo\r\n", false, false), "one\ntwo\\r\n");
        assert_eq!(escape_with("tab\t", false, false), "tab\\t");
    }

    #[test]
    fn test_control_characters_use_code_points() {
        assert_eq!(escape("\u{0}"), "\\u0000");
        assert_eq!(escape("\u{1f}"), "\\u001F");
        assert_eq!(escape("\u{7f}"), "\\u007F");
        assert_eq!(escape("\u{b}"), "\\u000B");
    }

    #[test]
    fn test_force_ascii() {
        assert_eq!(escape_with("é", true, true), "\\u00E9");
        assert_eq!(escape_with("\u{1F600}", true, true), "\\U0001F600");
        assert_eq!(escape_with("plain", true, true), "plain");
        assert_eq!(escape("é"), "é");
    }

    #[test]
    fn test_unescape_sequences() {
        assert_eq!(unescape("a\\tb").unwrap(), "a\tb");
        assert_eq!(unescape("\\'\\\"\\\\").unwrap(), "'\"\\");
        assert_eq!(unescape("\\u00e9").unwrap(), "é");
        assert_eq!(unescape("\\U0001F600!").unwrap(), "\u{1F600}!");
        assert_eq!(unescape("no escapes").unwrap(), "no escapes");
    }

    #[test]
    fn test_unescape_rejects_unknown_sequence() {
        let err = unescape("abc\\q").unwrap_err();
        match err {
            Error::Escape { sequence, offset } => {
                assert_eq!(sequence, "\\q");
                assert_eq!(offset, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unescape_rejects_truncated_code_point() {
        assert!(unescape("\\u12").is_err());
        assert!(unescape("\\U0001F6").is_err());
        assert!(unescape("\\uZZZZ").is_err());
        assert!(unescape("trailing\\").is_err());
    }

    #[test]
    fn test_unescape_rejects_surrogates() {
        assert!(unescape("\\uD800").is_err());
        assert!(unescape("\\U00110000").is_err());
    }

    #[test]
    fn test_escape_then_unescape() {
        let samples = ["", "plain", "quote \" and \\", "\u{0}\u{1}\u{7f}", "ü\u{10FFFF}", "\r\n"];
        for sample in samples {
            assert_eq!(unescape(&escape(sample)).unwrap(), sample);
            assert_eq!(unescape(&escape_with(sample, true, true)).unwrap(), sample);
        }
    }
}
