//! Error types for TOML parsing, tree manipulation and serialization.
//!
//! Parsing never stops at the first problem. Every malformed line is recorded
//! as a [`SyntaxError`] and the scan resumes on the next line; once the input
//! is exhausted, all recorded problems are surfaced together as a single
//! [`Error::Parse`] that also carries the partially-built root table.
//!
//! ## Error Categories
//!
//! - **Parse failures**: the aggregate of every syntax error in a document
//! - **Tree errors**: duplicate keys, dotted paths through values or inline tables
//! - **Format errors**: trees that cannot be written as TOML (e.g. mixed table arrays)
//! - **I/O errors**: reader or writer failures
//!
//! ## Examples
//!
//! ```rust
//! use toml_tree::{parse, Error};
//!
//! let result = parse("a = 1\na = 2\n");
//!
//! if let Err(Error::Parse { root, errors }) = result {
//!     assert_eq!(errors.len(), 1);
//!     assert_eq!(errors[0].line, 2);
//!     // The first definition survives in the partial tree
//!     assert_eq!(root.get("a").and_then(|node| node.as_integer()), Some(1));
//! }
//! ```

use crate::syntax::ParseState;
use crate::table::Table;
use std::fmt;
use thiserror::Error;

/// A single problem found while scanning a document.
///
/// Line and column are 1-based and point at the character the parser was
/// looking at when it gave up on the line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (line {line}, column {column}, while reading {state})")]
pub struct SyntaxError {
    pub message: String,
    pub state: ParseState,
    pub line: usize,
    pub column: usize,
}

/// Represents all possible errors produced by this crate.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// The document contained one or more syntax errors
    #[error("TOML document contains format errors:{}", list_errors(.errors))]
    Parse {
        root: Box<Table>,
        errors: Vec<SyntaxError>,
    },

    /// A backslash sequence that is not a TOML escape
    #[error("Undefined escape sequence {sequence:?} at offset {offset}")]
    Escape { sequence: String, offset: usize },

    /// The final segment of a key path already holds a value
    #[error("The key {0} is already defined!")]
    DuplicateKey(String),

    /// An intermediate segment of a key path holds a value instead of a table
    #[error("The key {0} already has a value assigned to it!")]
    KeyConflict(String),

    /// A dotted key tried to extend an inline table
    #[error("Cannot assign {0} because it will edit an immutable table.")]
    ImmutableTable(String),

    /// The tree cannot be written as TOML
    #[error("Invalid TOML structure: {0}")]
    Format(String),

    /// A node was read as a type it does not hold
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// A positional write past the end of an array
    #[error("Index {index} is out of bounds for an array of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

fn list_errors(errors: &[SyntaxError]) -> String {
    errors.iter().map(|error| format!("\n  {error}")).collect()
}

impl Error {
    /// Creates the aggregate parse failure.
    pub fn parse_failure(root: Table, errors: Vec<SyntaxError>) -> Self {
        Error::Parse {
            root: Box::new(root),
            errors,
        }
    }

    /// Creates an escape error for the sequence starting at `offset`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::Error;
    ///
    /// let err = Error::escape("\\q", 3);
    /// assert!(err.to_string().contains("offset 3"));
    /// ```
    pub fn escape(sequence: &str, offset: usize) -> Self {
        Error::Escape {
            sequence: sequence.to_string(),
            offset,
        }
    }

    pub fn duplicate_key(path: &str) -> Self {
        Error::DuplicateKey(path.to_string())
    }

    pub fn key_conflict(path: &str) -> Self {
        Error::KeyConflict(path.to_string())
    }

    pub fn immutable_table(path: &str) -> Self {
        Error::ImmutableTable(path.to_string())
    }

    /// Creates a formatting error for trees that have no TOML representation.
    pub fn format<T: fmt::Display>(msg: T) -> Self {
        Error::Format(msg.to_string())
    }

    /// Creates a type mismatch error for native casts.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::Error;
    ///
    /// let err = Error::type_mismatch("integer", "string");
    /// assert!(err.to_string().contains("expected integer"));
    /// ```
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub fn index_out_of_bounds(index: usize, len: usize) -> Self {
        Error::IndexOutOfBounds { index, len }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the recorded syntax errors of a parse failure, or an empty slice.
    #[must_use]
    pub fn syntax_errors(&self) -> &[SyntaxError] {
        match self {
            Error::Parse { errors, .. } => errors,
            _ => &[],
        }
    }

    /// Returns the partially-built root table of a parse failure.
    #[must_use]
    pub fn partial_table(&self) -> Option<&Table> {
        match self {
            Error::Parse { root, .. } => Some(root),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
