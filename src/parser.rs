//! The document parser.
//!
//! A single pass over the input drives a four-state machine (see
//! [`ParseState`]). Characters are peeked before they are consumed, and the
//! cursor tracks line and column for diagnostics.
//!
//! Problems do not stop the scan: each one is recorded with its position,
//! the rest of the line is skipped and parsing resumes in
//! [`ParseState::None`]. If anything was recorded, the result is an
//! [`Error::Parse`] holding every error plus the tree built so far.
//!
//! ```rust
//! use toml_tree::{parse, Error};
//!
//! let input = "good = 1\nbad = \nalso_good = 2\n[]\n";
//! let Err(Error::Parse { root, errors }) = parse(input) else {
//!     panic!("expected a parse failure");
//! };
//!
//! assert_eq!(errors.len(), 2);
//! assert_eq!((errors[0].line, errors[1].line), (2, 4));
//! assert!(root.contains_key("good") && root.contains_key("also_good"));
//! ```

use crate::array::Array;
use crate::datetime::{TomlDateTimeLocal, TomlDateTimeOffset};
use crate::error::SyntaxError;
use crate::escape::unescape;
use crate::options::TomlOptions;
use crate::scalar::{IntegerBase, TomlBoolean, TomlFloat, TomlInteger, TomlString};
use crate::syntax::{self, ParseState};
use crate::table::Table;
use crate::value::TomlNode;
use crate::{Error, Result};
use tracing::{debug, instrument, trace, warn};

/// Marks a failure that has already been recorded in the error list.
struct Recorded;

type Step<T> = std::result::Result<T, Recorded>;

/// One hop from the root to the table currently receiving key-value pairs.
#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Key(String),
    Index(usize),
}

/// The TOML parser.
///
/// Created via [`Parser::new`] or [`Parser::with_options`] and consumed by
/// [`Parser::parse`].
pub struct Parser<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
    state: ParseState,
    errors: Vec<SyntaxError>,
    options: TomlOptions,
    depth: usize,
}

impl<'a> Parser<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Parser::with_options(input, TomlOptions::default())
    }

    #[must_use]
    pub fn with_options(input: &'a str, options: TomlOptions) -> Self {
        Parser {
            input,
            position: 0,
            line: 1,
            column: 1,
            state: ParseState::None,
            errors: Vec::new(),
            options,
            depth: 0,
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Consumes everything up to and including the next line feed.
    fn skip_line(&mut self) {
        while let Some(ch) = self.next_char() {
            if ch == '\n' {
                break;
            }
        }
    }

    /// Records an error at the cursor and resets to the top-level state.
    fn record(&mut self, message: impl Into<String>) -> Recorded {
        let error = SyntaxError {
            message: message.into(),
            state: self.state,
            line: self.line,
            column: self.column,
        };
        trace!(
            line = error.line,
            column = error.column,
            state = %error.state,
            message = %error.message,
            "recorded syntax error"
        );
        self.errors.push(error);
        self.state = ParseState::None;
        Recorded
    }

    /// Records an error and abandons the rest of the line.
    fn fail(&mut self, message: impl Into<String>) -> Recorded {
        let recorded = self.record(message);
        self.skip_line();
        recorded
    }

    /// Parses the whole input into a root table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] with every recorded syntax error and the
    /// partially-built tree if the document is malformed.
    #[instrument(level = "debug", skip_all, fields(bytes = self.input.len()))]
    pub fn parse(mut self) -> Result<Table> {
        let mut root = Table::new();
        let mut location: Vec<Segment> = Vec::new();
        let mut key_parts: Vec<String> = Vec::new();
        let mut array_table = false;
        let mut comment: Option<String> = None;
        let mut first_comment = true;

        while let Some(c) = self.peek_char() {
            match self.state {
                ParseState::None => {
                    if syntax::is_whitespace(c) {
                        self.next_char();
                    } else if syntax::is_newline(c) {
                        // A comment block followed by a blank line at the top belongs to the document
                        if first_comment {
                            if let Some(text) = comment.take() {
                                root.meta.comment = Some(text);
                                first_comment = false;
                            }
                        }
                        self.next_char();
                    } else if c == syntax::COMMENT_START {
                        let text = self.read_comment();
                        match comment.as_mut() {
                            Some(buffer) => {
                                buffer.push('\n');
                                buffer.push_str(&text);
                            }
                            None => comment = Some(text),
                        }
                    } else {
                        first_comment = false;
                        if c == syntax::TABLE_START {
                            self.next_char();
                            key_parts.clear();
                            array_table = false;
                            self.state = ParseState::Table;
                        } else if syntax::is_bare_key(c) || syntax::is_quote(c) {
                            self.state = ParseState::KeyValuePair;
                        } else {
                            self.fail(format!("Unexpected character {c:?}"));
                            comment = None;
                        }
                    }
                }
                ParseState::KeyValuePair => {
                    key_parts.clear();
                    let Ok(mut node) = self.read_key_value_pair(&mut key_parts) else {
                        comment = None;
                        continue;
                    };
                    node.set_comment(comment.take());

                    let inserted = match table_at(&mut root, &location) {
                        Some(table) => table
                            .insert_path(&key_parts, node)
                            .map_err(|err| err.to_string()),
                        None => Err("The current table is no longer reachable!".to_string()),
                    };
                    match inserted {
                        Ok(()) => self.state = ParseState::SkipToNextLine,
                        Err(message) => {
                            self.fail(message);
                        }
                    }
                }
                ParseState::Table => {
                    if key_parts.is_empty() {
                        if c == syntax::TABLE_START && !array_table {
                            self.next_char();
                            array_table = true;
                        } else if self
                            .read_key_name(&mut key_parts, syntax::TABLE_END)
                            .is_err()
                        {
                            key_parts.clear();
                            array_table = false;
                            comment = None;
                        }
                        continue;
                    }

                    if c != syntax::TABLE_END {
                        self.fail(format!("Unexpected character {c:?} in table name."));
                        key_parts.clear();
                        array_table = false;
                        comment = None;
                        continue;
                    }

                    self.next_char();
                    if array_table {
                        if self.peek_char() != Some(syntax::TABLE_END) {
                            self.fail(format!(
                                "Array table {} has only one closing bracket.",
                                key_parts.join(".")
                            ));
                            key_parts.clear();
                            array_table = false;
                            comment = None;
                            continue;
                        }
                        self.next_char();
                    }

                    match create_table(&mut root, &key_parts, array_table) {
                        Ok(created) => {
                            trace!(path = %key_parts.join("."), array_table, "entered table");
                            location = created;
                            if let Some(table) = table_at(&mut root, &location) {
                                table.meta.comment = comment.take();
                            }
                            self.state = ParseState::SkipToNextLine;
                        }
                        Err(message) => {
                            location.clear();
                            comment = None;
                            self.fail(message);
                        }
                    }
                    key_parts.clear();
                    array_table = false;
                }
                ParseState::SkipToNextLine => {
                    if syntax::is_whitespace(c) || c == '\r' {
                        self.next_char();
                    } else if c == syntax::COMMENT_START {
                        // Trailing comments are not kept
                        self.state = ParseState::None;
                        self.read_comment();
                    } else if c == '\n' {
                        self.state = ParseState::None;
                        self.next_char();
                    } else {
                        self.fail(format!("Unexpected character {c:?} at the end of the line."));
                    }
                }
            }
        }

        if !matches!(self.state, ParseState::None | ParseState::SkipToNextLine) {
            self.record("Unexpected end of file!");
        }
        if first_comment {
            if let Some(text) = comment.take() {
                root.meta.comment = Some(text);
            }
        }

        debug!(
            entries = root.len(),
            errors = self.errors.len(),
            lines = self.line,
            "parsed document"
        );

        if self.errors.is_empty() {
            Ok(root)
        } else {
            Err(Error::parse_failure(root, self.errors))
        }
    }

    /// Reads a `#` comment up to the end of the line and returns its trimmed body.
    fn read_comment(&mut self) -> String {
        self.next_char();
        let start = self.position;
        while let Some(c) = self.peek_char() {
            if c == '\n' {
                break;
            }
            self.next_char();
        }
        let input = self.input;
        let text = input[start..self.position].trim();
        if text.chars().any(|c| c.is_control() && c != '\t') {
            self.record("Comment must not contain control characters other than tab.");
        }
        self.next_char();
        text.to_string()
    }

    /// Reads a dotted key into `parts`, stopping before `terminator`.
    fn read_key_name(&mut self, parts: &mut Vec<String>, terminator: char) -> Step<()> {
        let mut buffer = String::new();
        let mut quoted = false;
        let mut after_space = false;

        while let Some(c) = self.peek_char() {
            if c == terminator {
                break;
            }
            if syntax::is_whitespace(c) {
                after_space = true;
                self.next_char();
                continue;
            }
            if buffer.is_empty() && !quoted {
                after_space = false;
            }

            if c == syntax::KEY_SEPARATOR {
                if buffer.is_empty() && !quoted {
                    return Err(self.fail(format!(
                        "Found an extra subkey separator in {}...",
                        parts.join(".")
                    )));
                }
                parts.push(std::mem::take(&mut buffer));
                quoted = false;
                after_space = false;
                self.next_char();
                continue;
            }

            if after_space {
                return Err(self.fail("Invalid spacing in key name"));
            }

            if syntax::is_quote(c) {
                if quoted {
                    return Err(self.fail("Expected a subkey separator but got extra data instead!"));
                }
                if !buffer.is_empty() {
                    return Err(self.fail("Encountered a quote in the middle of subkey name!"));
                }
                self.next_char();
                buffer = self.read_single_line_body(c)?;
                quoted = true;
                continue;
            }

            if !syntax::is_bare_key(c) {
                break;
            }
            if quoted {
                return Err(self.fail("Expected a subkey separator but got extra data instead!"));
            }
            buffer.push(c);
            self.next_char();
        }

        if buffer.is_empty() && !quoted {
            let message = if parts.is_empty() {
                "Table name is empty.".to_string()
            } else {
                format!("Found an extra subkey separator in {}...", parts.join("."))
            };
            return Err(self.fail(message));
        }
        parts.push(buffer);
        Ok(())
    }

    /// Reads `key = value`, leaving the key segments in `keys`.
    fn read_key_value_pair(&mut self, keys: &mut Vec<String>) -> Step<TomlNode> {
        loop {
            let Some(c) = self.peek_char() else {
                return Err(self.fail("Unexpected end of file!"));
            };

            if syntax::is_quote(c) || syntax::is_bare_key(c) {
                if !keys.is_empty() {
                    return Err(self.fail("Encountered extra characters in key definition!"));
                }
                self.read_key_name(keys, syntax::KEY_VALUE_SEPARATOR)?;
            } else if syntax::is_whitespace(c) {
                self.next_char();
            } else if c == syntax::KEY_VALUE_SEPARATOR {
                self.next_char();
                return self.read_value(false);
            } else {
                return Err(self.fail(format!("Unexpected character {c:?} in key definition.")));
            }
        }
    }

    fn read_value(&mut self, skip_newlines: bool) -> Step<TomlNode> {
        loop {
            let Some(c) = self.peek_char() else {
                return Err(self.fail("Unexpected end of file!"));
            };

            if syntax::is_whitespace(c) {
                self.next_char();
                continue;
            }
            if c == syntax::COMMENT_START {
                return Err(self.fail("No value found!"));
            }
            if syntax::is_newline(c) {
                if !skip_newlines {
                    return Err(self.fail("Encountered a newline when expecting a value!"));
                }
                self.next_char();
                continue;
            }

            return match c {
                c if syntax::is_quote(c) => self.read_string(c),
                syntax::INLINE_TABLE_START => self.nested(Self::read_inline_table),
                syntax::ARRAY_START => self.nested(Self::read_array),
                _ => self.read_scalar(),
            };
        }
    }

    /// Runs a container reader one level deeper, enforcing the depth limit.
    fn nested(&mut self, read: fn(&mut Self) -> Step<TomlNode>) -> Step<TomlNode> {
        if self.depth >= self.options.max_depth {
            warn!(
                max_depth = self.options.max_depth,
                line = self.line,
                "nesting limit reached"
            );
            return Err(self.fail(format!(
                "Maximum nesting depth of {} exceeded!",
                self.options.max_depth
            )));
        }
        self.depth += 1;
        let result = read(self);
        self.depth -= 1;
        result
    }

    fn read_scalar(&mut self) -> Step<TomlNode> {
        let start = self.position;
        while let Some(c) = self.peek_char() {
            if syntax::is_value_end(c) {
                break;
            }
            self.next_char();
        }
        let input = self.input;
        let raw = input[start..self.position].trim();
        parse_scalar(raw).map_err(|message| self.fail(message))
    }

    fn read_string(&mut self, quote: char) -> Step<TomlNode> {
        self.next_char();

        let mut string = if self.peek_char() == Some(quote) {
            self.next_char();
            if self.peek_char() == Some(quote) {
                self.next_char();
                let (value, trimmed) = self.read_multiline_body(quote)?;
                let mut string = TomlString::multiline(value);
                string.multiline_trim_first_line = trimmed;
                string
            } else {
                TomlString::new("")
            }
        } else {
            TomlString::new(self.read_single_line_body(quote)?)
        };

        string.prefer_literal = quote == syntax::LITERAL_QUOTE;
        Ok(string.into())
    }

    /// Reads the rest of a single-line string after its opening quote.
    fn read_single_line_body(&mut self, quote: char) -> Step<String> {
        let basic = quote == syntax::BASIC_QUOTE;
        let mut raw = String::new();
        let mut escaped = false;

        loop {
            let Some(c) = self.peek_char() else {
                return Err(self.fail("Unclosed string."));
            };
            if c == '\n' {
                return Err(self.fail("Encountered newline in single line string!"));
            }
            if syntax::must_be_escaped(c, false) {
                return Err(self.fail(must_escape_message(c)));
            }
            self.next_char();

            if escaped {
                escaped = false;
            } else if c == quote {
                break;
            } else if basic && c == syntax::ESCAPE {
                escaped = true;
            }
            raw.push(c);
        }

        if basic {
            unescape(&raw).map_err(|err| self.fail(err.to_string()))
        } else {
            Ok(raw)
        }
    }

    /// Reads the rest of a triple-quoted string after its opening quotes.
    ///
    /// Returns the value and whether a newline right after the opening
    /// quotes was dropped.
    fn read_multiline_body(&mut self, quote: char) -> Step<(String, bool)> {
        let basic = quote == syntax::BASIC_QUOTE;
        let mut raw = String::new();
        let mut escaped = false;
        let mut trimming = false;
        let mut trim_crossed_line = false;
        let mut at_start = true;
        let mut trimmed_first_line = false;
        let mut quotes = 0;

        loop {
            let Some(c) = self.peek_char() else {
                return Err(self.fail("Unclosed multiline string."));
            };
            if syntax::must_be_escaped(c, true) {
                return Err(self.fail(must_escape_message(c)));
            }
            self.next_char();

            if at_start && syntax::is_newline(c) {
                trimmed_first_line = true;
                at_start = c != '\n';
                continue;
            }
            at_start = false;

            if escaped {
                escaped = false;
                raw.push(c);
                continue;
            }

            if trimming {
                if syntax::is_empty_space(c) {
                    trim_crossed_line |= c == '\n';
                    continue;
                }
                if !trim_crossed_line {
                    return Err(self.fail("Non-whitespace character after trim marker."));
                }
                trimming = false;
                trim_crossed_line = false;
            }

            if basic && c == syntax::ESCAPE {
                match self.peek_char() {
                    Some(next) if syntax::is_empty_space(next) => {
                        trimming = true;
                        quotes = 0;
                        continue;
                    }
                    Some(next) if next == quote || next == syntax::ESCAPE => escaped = true,
                    _ => {}
                }
            }

            quotes = if c == quote { quotes + 1 } else { 0 };
            if quotes == 3 {
                break;
            }
            raw.push(c);
        }

        // Up to two quotes right before the closing delimiter belong to the content
        let mut extra = 0;
        while extra < 2 && self.peek_char() == Some(quote) {
            self.next_char();
            raw.push(quote);
            extra += 1;
        }
        raw.truncate(raw.len().saturating_sub(2));

        let value = if basic {
            unescape(&raw).map_err(|err| self.fail(err.to_string()))?
        } else {
            raw
        };
        Ok((value, trimmed_first_line))
    }

    fn read_array(&mut self) -> Step<TomlNode> {
        self.next_char();
        let mut array = Array::new();
        let mut current: Option<TomlNode> = None;
        let mut spans_lines = false;

        loop {
            let Some(c) = self.peek_char() else {
                return Err(self.fail("Unclosed array."));
            };

            match c {
                syntax::ARRAY_END => {
                    self.next_char();
                    break;
                }
                syntax::COMMENT_START => {
                    self.skip_line();
                    spans_lines = true;
                }
                syntax::VALUE_SEPARATOR => {
                    let Some(node) = current.take() else {
                        return Err(self.fail("Encountered multiple value separators"));
                    };
                    array.push(node);
                    self.next_char();
                }
                c if syntax::is_empty_space(c) => {
                    spans_lines |= c == '\n';
                    self.next_char();
                }
                _ => {
                    if current.is_some() {
                        return Err(self.fail("Missing separator between values"));
                    }
                    current = Some(self.read_value(true)?);
                }
            }
        }

        if let Some(node) = current {
            array.push(node);
        }
        array.set_multiline(spans_lines);
        Ok(array.into())
    }

    fn read_inline_table(&mut self) -> Step<TomlNode> {
        self.next_char();
        let mut table = Table::new_inline();
        let mut keys: Vec<String> = Vec::new();
        let mut current: Option<TomlNode> = None;
        let mut trailing_comma = false;

        loop {
            let Some(c) = self.peek_char() else {
                return Err(self.fail("Unclosed inline table."));
            };

            match c {
                syntax::INLINE_TABLE_END => {
                    self.next_char();
                    break;
                }
                syntax::COMMENT_START => {
                    return Err(self.fail("Incomplete inline table definition!"));
                }
                c if syntax::is_newline(c) => {
                    return Err(self.fail("Inline tables are only allowed to be on single line"));
                }
                c if syntax::is_whitespace(c) => {
                    self.next_char();
                }
                syntax::VALUE_SEPARATOR => {
                    let Some(node) = current.take() else {
                        return Err(
                            self.fail("Encountered multiple value separators in inline table!")
                        );
                    };
                    table
                        .insert_path(&keys, node)
                        .map_err(|err| self.fail(err.to_string()))?;
                    keys.clear();
                    trailing_comma = true;
                    self.next_char();
                }
                _ => {
                    trailing_comma = false;
                    current = Some(self.read_key_value_pair(&mut keys)?);
                }
            }
        }

        if trailing_comma {
            return Err(self.fail("Trailing commas are not allowed in inline tables."));
        }
        if let Some(node) = current {
            table
                .insert_path(&keys, node)
                .map_err(|err| self.fail(err.to_string()))?;
        }
        Ok(table.into())
    }
}

fn must_escape_message(c: char) -> String {
    format!("The character U+{:04X} must be escaped in a string!", u32::from(c))
}

/// Converts an unquoted token into a scalar node.
fn parse_scalar(raw: &str) -> std::result::Result<TomlNode, String> {
    if syntax::is_boolean(raw) {
        return Ok(TomlBoolean::new(raw == syntax::TRUE_VALUE).into());
    }
    if syntax::is_nan(raw) {
        return Ok(TomlFloat::new(f64::NAN).into());
    }
    if syntax::is_positive_infinity(raw) {
        return Ok(TomlFloat::new(f64::INFINITY).into());
    }
    if syntax::is_negative_infinity(raw) {
        return Ok(TomlFloat::new(f64::NEG_INFINITY).into());
    }

    if syntax::is_integer(raw) {
        return raw
            .replace('_', "")
            .parse::<i64>()
            .map(|value| TomlInteger::new(value).into())
            .map_err(|_| format!("Integer value \"{raw}\" is out of range!"));
    }
    if syntax::is_based_integer(raw) {
        let base = raw[1..]
            .chars()
            .next()
            .and_then(IntegerBase::from_prefix)
            .unwrap_or_default();
        let digits = raw[2..].replace('_', "");
        // Wide literals keep their bit pattern
        return u64::from_str_radix(&digits, base.radix())
            .map(|bits| TomlInteger::with_base(bits as i64, base).into())
            .map_err(|_| format!("Integer value \"{raw}\" is out of range!"));
    }
    if syntax::is_float(raw) {
        return raw
            .replace('_', "")
            .parse::<f64>()
            .map(|value| TomlFloat::new(value).into())
            .map_err(|_| format!("Value \"{raw}\" is not a valid TOML value!"));
    }

    if let Some(value) = TomlDateTimeOffset::parse(raw) {
        return Ok(value.into());
    }
    if let Some(value) = TomlDateTimeLocal::parse(raw) {
        return Ok(value.into());
    }

    Err(format!("Value \"{raw}\" is not a valid TOML value!"))
}

/// Walks from the root to the table at `location`.
fn table_at<'t>(root: &'t mut Table, location: &[Segment]) -> Option<&'t mut Table> {
    let mut table = root;
    let mut segments = location.iter();
    while let Some(segment) = segments.next() {
        let Segment::Key(key) = segment else {
            return None;
        };
        table = match table.get_mut(key)? {
            TomlNode::Table(t) => t,
            TomlNode::Array(array) => match segments.next() {
                Some(Segment::Index(index)) => array.get_mut(*index)?.as_table_mut()?,
                _ => return None,
            },
            _ => return None,
        };
    }
    Some(table)
}

/// Resolves a `[header]` or `[[header]]` path, creating tables as needed.
///
/// Returns the location of the table that receives the following pairs.
fn create_table(
    root: &mut Table,
    keys: &[String],
    array_table: bool,
) -> std::result::Result<Vec<Segment>, String> {
    let path = keys.join(".");
    let mut location = Vec::with_capacity(keys.len() + 1);
    let mut table = root;

    for (index, key) in keys.iter().enumerate() {
        let last = index + 1 == keys.len();
        location.push(Segment::Key(key.clone()));

        if !table.contains_key(key) {
            if last && array_table {
                let mut array = Array::new_table_array();
                array.push(Table::new());
                table.insert(key.as_str(), array);
                location.push(Segment::Index(0));
                return Ok(location);
            }
            table.insert(key.as_str(), Table::new_implicit());
        }

        let Some(node) = table.get_mut(key) else {
            return Err(format!("Error creating table {path}!"));
        };

        table = match node {
            TomlNode::Array(array) if array_table || array.is_table_array() => {
                if !array.is_table_array() {
                    return Err(format!("The array {path} cannot be redefined as an array table!"));
                }
                if last && !array_table {
                    return Err(format!("The table array {path} cannot be redefined as a table!"));
                }
                if last {
                    array.push(Table::new());
                }
                location.push(Segment::Index(array.len().saturating_sub(1)));
                match array.last_table_mut() {
                    Some(_) if last => return Ok(location),
                    Some(t) => t,
                    None => {
                        return Err(format!("The table array {path} contains non-table elements!"))
                    }
                }
            }
            TomlNode::Table(t) if t.is_inline() => {
                return Err(format!(
                    "Cannot create table {path} because it will edit an immutable table."
                ));
            }
            TomlNode::Table(t) => {
                if last {
                    if array_table {
                        return Err(format!(
                            "The table {path} cannot be redefined as an array table!"
                        ));
                    }
                    if !t.is_implicit() {
                        return Err(format!("The table {path} is defined multiple times!"));
                    }
                }
                t
            }
            _ => return Err(format!("The key {path} has a value assigned to it!")),
        };
    }

    table.mark_explicit();
    Ok(location)
}
