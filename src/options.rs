//! Configuration for parsing and serialization.
//!
//! - [`TomlOptions`]: main configuration struct
//! - [`LineEnding`]: line terminator written by the serializer
//!
//! ## Examples
//!
//! ```rust
//! use toml_tree::{parse_with_options, to_string_with_options, LineEnding, TomlOptions};
//!
//! // Refuse documents nested deeper than 8 arrays/inline tables
//! let options = TomlOptions::new().with_max_depth(8);
//! let table = parse_with_options("a = [[[1]]]", options).unwrap();
//!
//! // Windows line endings and ASCII-only strings on output
//! let options = TomlOptions::new()
//!     .with_line_ending(LineEnding::CrLf)
//!     .with_force_ascii(true);
//! let text = to_string_with_options(&table, options).unwrap();
//! assert_eq!(text, "a = [ [ [ 1 ] ] ]\r\n");
//! ```

/// Line terminator used when writing documents.
///
/// # Examples
///
/// ```rust
/// use toml_tree::LineEnding;
///
/// assert_eq!(LineEnding::Lf.as_str(), "\n");
/// assert_eq!(LineEnding::CrLf.as_str(), "\r\n");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Options shared by the parser and the serializer.
///
/// # Examples
///
/// ```rust
/// use toml_tree::TomlOptions;
///
/// let options = TomlOptions::new();
/// assert_eq!(options.max_depth, 128);
/// assert_eq!(options.indent, 2);
/// assert!(!options.force_ascii);
/// ```
#[derive(Clone, Debug)]
pub struct TomlOptions {
    /// Deepest nesting of arrays and inline tables the parser accepts.
    pub max_depth: usize,
    /// Escape every non-ASCII character in basic strings.
    pub force_ascii: bool,
    /// Spaces before each element of a multiline array.
    pub indent: usize,
    pub line_ending: LineEnding,
}

impl Default for TomlOptions {
    fn default() -> Self {
        TomlOptions {
            max_depth: 128,
            force_ascii: false,
            indent: 2,
            line_ending: LineEnding::default(),
        }
    }
}

impl TomlOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_force_ascii(mut self, force_ascii: bool) -> Self {
        self.force_ascii = force_ascii;
        self
    }

    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }
}
