//! Scalar node types: strings, integers, floats and booleans.
//!
//! Each scalar keeps its value next to the formatting hints the parser saw
//! (quote style, integer base, multiline layout), so a document written back
//! out looks like the one that was read. Equality compares values only.

use crate::escape::escape_with;
use crate::options::TomlOptions;
use crate::syntax::must_be_escaped;
use crate::value::NodeMeta;

/// A TOML string with its quoting preferences.
///
/// # Examples
///
/// ```rust
/// use toml_tree::TomlString;
///
/// let path = TomlString::literal("C:\\Users\\tom");
/// assert_eq!(path.to_inline_toml(), "'C:\\Users\\tom'");
///
/// // A literal string cannot hold its own delimiter
/// let quoted = TomlString::literal("it's");
/// assert_eq!(quoted.to_inline_toml(), "\"it's\"");
/// ```
#[derive(Clone, Debug, Default)]
pub struct TomlString {
    pub meta: NodeMeta,
    pub value: String,
    pub multiline: bool,
    pub multiline_trim_first_line: bool,
    pub prefer_literal: bool,
}

impl TomlString {
    /// Creates a single-line basic string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        TomlString {
            value: value.into(),
            ..Default::default()
        }
    }

    /// Creates a single-line string that prefers `'literal'` quoting.
    #[must_use]
    pub fn literal(value: impl Into<String>) -> Self {
        TomlString {
            value: value.into(),
            prefer_literal: true,
            ..Default::default()
        }
    }

    /// Creates a triple-quoted basic string.
    #[must_use]
    pub fn multiline(value: impl Into<String>) -> Self {
        TomlString {
            value: value.into(),
            multiline: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_literal(mut self, prefer_literal: bool) -> Self {
        self.prefer_literal = prefer_literal;
        self
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Whether the value can be written with literal quotes.
    ///
    /// Literal strings have no escapes, so the delimiter itself and any
    /// character that must be escaped force basic quoting.
    #[must_use]
    pub fn uses_literal_quotes(&self, force_ascii: bool) -> bool {
        if !self.prefer_literal || (force_ascii && !self.value.is_ascii()) {
            return false;
        }
        let delimiter = if self.multiline { "'''" } else { "'" };
        !self.value.contains(delimiter)
            && !self.value.contains('\r')
            && !self
                .value
                .chars()
                .any(|c| must_be_escaped(c, self.multiline))
    }

    /// Renders the quoted value with default options.
    #[must_use]
    pub fn to_inline_toml(&self) -> String {
        self.to_inline_toml_with(&TomlOptions::default())
    }

    #[must_use]
    pub fn to_inline_toml_with(&self, options: &TomlOptions) -> String {
        let literal = self.uses_literal_quotes(options.force_ascii);
        let quote = match (literal, self.multiline) {
            (true, true) => "'''",
            (true, false) => "'",
            (false, true) => "\"\"\"",
            (false, false) => "\"",
        };

        let body = if literal {
            self.value.clone()
        } else {
            escape_with(&self.value, !self.multiline, options.force_ascii)
        };

        let mut out = String::with_capacity(body.len() + 8);
        out.push_str(quote);
        // The parser drops one newline right after the opening quotes
        if self.multiline && (self.multiline_trim_first_line || body.starts_with('\n')) {
            out.push_str(options.line_ending.as_str());
        }
        out.push_str(&body);
        out.push_str(quote);
        out
    }
}

impl PartialEq for TomlString {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

/// The radix an integer was written in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum IntegerBase {
    Binary,
    Octal,
    #[default]
    Decimal,
    Hexadecimal,
}

impl IntegerBase {
    #[must_use]
    pub const fn radix(self) -> u32 {
        match self {
            IntegerBase::Binary => 2,
            IntegerBase::Octal => 8,
            IntegerBase::Decimal => 10,
            IntegerBase::Hexadecimal => 16,
        }
    }

    /// Maps the second character of a `0x`/`0o`/`0b` prefix to its base.
    #[must_use]
    pub const fn from_prefix(c: char) -> Option<Self> {
        match c {
            'x' => Some(IntegerBase::Hexadecimal),
            'o' => Some(IntegerBase::Octal),
            'b' => Some(IntegerBase::Binary),
            _ => None,
        }
    }
}

/// A signed 64-bit integer with the base it is written in.
///
/// # Examples
///
/// ```rust
/// use toml_tree::{IntegerBase, TomlInteger};
///
/// let mask = TomlInteger::with_base(255, IntegerBase::Hexadecimal);
/// assert_eq!(mask.to_inline_toml(), "0xff");
/// ```
#[derive(Clone, Debug, Default)]
pub struct TomlInteger {
    pub meta: NodeMeta,
    pub value: i64,
    pub base: IntegerBase,
}

impl TomlInteger {
    #[must_use]
    pub fn new(value: i64) -> Self {
        TomlInteger {
            value,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_base(value: i64, base: IntegerBase) -> Self {
        TomlInteger {
            value,
            base,
            ..Default::default()
        }
    }

    /// Non-decimal bases print the two's complement bits with lowercase digits.
    #[must_use]
    pub fn to_inline_toml(&self) -> String {
        match self.base {
            IntegerBase::Decimal => self.value.to_string(),
            IntegerBase::Hexadecimal => format!("0x{:x}", self.value),
            IntegerBase::Octal => format!("0o{:o}", self.value),
            IntegerBase::Binary => format!("0b{:b}", self.value),
        }
    }
}

impl PartialEq for TomlInteger {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

/// A double-precision float.
#[derive(Clone, Debug, Default)]
pub struct TomlFloat {
    pub meta: NodeMeta,
    pub value: f64,
}

impl TomlFloat {
    #[must_use]
    pub fn new(value: f64) -> Self {
        TomlFloat {
            value,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn to_inline_toml(&self) -> String {
        format_float(self.value)
    }
}

impl PartialEq for TomlFloat {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

/// Formats a float so that parsing the text gives back the same bits.
///
/// Special values use the TOML tokens `nan`, `inf` and `-inf`. Everything
/// else uses the shortest round-trip form, which always has a `.` or an
/// exponent and therefore never reads back as an integer.
#[must_use]
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "inf" } else { "-inf" }.to_string()
    } else {
        format!("{value:?}")
    }
}

#[derive(Clone, Debug, Default)]
pub struct TomlBoolean {
    pub meta: NodeMeta,
    pub value: bool,
}

impl TomlBoolean {
    #[must_use]
    pub fn new(value: bool) -> Self {
        TomlBoolean {
            value,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn to_inline_toml(&self) -> String {
        self.value.to_string()
    }
}

impl PartialEq for TomlBoolean {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::LineEnding;

    #[test]
    fn test_basic_string_escapes() {
        let s = TomlString::new("say \"hi\"\n");
        assert_eq!(s.to_inline_toml(), r#""say \"hi\"\n""#);
    }

    #[test]
    fn test_literal_demoted_for_control_characters() {
        assert_eq!(TomlString::literal("a\nb").to_inline_toml(), "\"a\\nb\"");
        assert_eq!(TomlString::literal("tab\tok").to_inline_toml(), "'tab\tok'");
    }

    #[test]
    fn test_multiline_literal() {
        let mut s = TomlString::multiline("one 'two'\nthree");
        s.prefer_literal = true;
        assert_eq!(s.to_inline_toml(), "'''one 'two'\nthree'''");

        s.value = "has ''' inside".to_string();
        assert_eq!(s.to_inline_toml(), "\"\"\"has ''' inside\"\"\"");
    }

    #[test]
    fn test_multiline_leading_newline_is_restored() {
        let s = TomlString::multiline("\nstarts with newline");
        assert_eq!(s.to_inline_toml(), "\"\"\"\n\nstarts with newline\"\"\"");

        let mut trimmed = TomlString::multiline("body");
        trimmed.multiline_trim_first_line = true;
        assert_eq!(trimmed.to_inline_toml(), "\"\"\"\nbody\"\"\"");
    }

    #[test]
    fn test_multiline_body_keeps_its_line_endings() {
        let mut s = TomlString::multiline("a\r\nb\nc");
        s.multiline_trim_first_line = true;
        let options = TomlOptions::new().with_line_ending(LineEnding::CrLf);
        assert_eq!(
            s.to_inline_toml_with(&options),
            "\"\"\"\r\na\\r\nb\nc\"\"\""
        );
        assert_eq!(s.to_inline_toml(), "\"\"\"\na\\r\nb\nc\"\"\"");
    }

    #[test]
    fn test_carriage_return_forces_basic_quotes() {
        let mut s = TomlString::multiline("a\r\nb");
        s.prefer_literal = true;
        assert_eq!(s.to_inline_toml(), "\"\"\"a\\r\nb\"\"\"");
    }

    #[test]
    fn test_force_ascii_disables_literal() {
        let s = TomlString::literal("naïve");
        let options = TomlOptions::new().with_force_ascii(true);
        assert_eq!(s.to_inline_toml_with(&options), "\"na\\u00EFve\"");
        assert_eq!(s.to_inline_toml(), "'naïve'");
    }

    #[test]
    fn test_integer_bases() {
        assert_eq!(TomlInteger::new(-42).to_inline_toml(), "-42");
        assert_eq!(
            TomlInteger::with_base(0o755, IntegerBase::Octal).to_inline_toml(),
            "0o755"
        );
        assert_eq!(
            TomlInteger::with_base(5, IntegerBase::Binary).to_inline_toml(),
            "0b101"
        );
        assert_eq!(
            TomlInteger::with_base(-1, IntegerBase::Hexadecimal).to_inline_toml(),
            "0xffffffffffffffff"
        );
    }

    #[test]
    fn test_float_formatting() {
        assert_eq!(format_float(1.0), "1.0");
        assert_eq!(format_float(-0.5), "-0.5");
        assert_eq!(format_float(f64::NAN), "nan");
        assert_eq!(format_float(f64::INFINITY), "inf");
        assert_eq!(format_float(f64::NEG_INFINITY), "-inf");
        assert_eq!(format_float(1e300), "1e300");
        assert_eq!(format_float(1.5e-9), "1.5e-9");
    }

    #[test]
    fn test_equality_ignores_formatting() {
        assert_eq!(TomlString::new("x"), TomlString::literal("x"));
        assert_eq!(
            TomlInteger::new(255),
            TomlInteger::with_base(255, IntegerBase::Hexadecimal)
        );
    }
}
