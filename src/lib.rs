//! # toml_tree
//!
//! A TOML parser and serializer built around a mutable document tree.
//!
//! Parsing produces a [`Table`] that keeps what a round trip needs: key
//! order, comments attached to keys and headers, integer bases, string
//! quoting styles, date-time precision, and whether keys were written dotted
//! or under `[section]` headers. The tree can be edited in place and written
//! back out with [`to_string`].
//!
//! ## Key Features
//!
//! - **Error collection**: a malformed document reports every problem in one
//!   pass, each with line, column and parser state, plus the partial tree
//! - **Comment preservation**: comments above keys, headers and the document
//!   survive a parse and serialize cycle
//! - **Slot handles**: [`LazyNode`] lets you index into missing keys and
//!   create tables or arrays on first write
//! - **Serde Compatible**: decode trees into your own types with
//!   [`from_str`] and build trees from them with [`to_table`]
//!
//! ## Quick Start
//!
//! ```rust
//! use toml_tree::{parse, to_string, TomlNode};
//!
//! let mut doc = parse("name = \"Tom\"\n\n[server]\nport = 8080\nhosts = [\"a\", \"b\"]\n").unwrap();
//!
//! let hosts = doc.get_path(&["server", "hosts"]).unwrap();
//! assert_eq!(hosts.to_inline_toml().unwrap(), r#"[ "a", "b" ]"#);
//!
//! // Edit and write back
//! doc.entry("server").key("port").unwrap().set(9090);
//! doc.entry("owner").key("active").unwrap().set(true);
//!
//! let text = to_string(&doc).unwrap();
//! assert!(text.contains("port = 9090"));
//! assert!(text.contains("[owner]\nactive = true"));
//! ```
//!
//! ### Handling malformed input
//!
//! ```rust
//! use toml_tree::{parse, Error};
//!
//! let err = parse("a = 1\na = 2\n").unwrap_err();
//! let errors = err.syntax_errors();
//! assert_eq!(errors[0].message, "The key a is already defined!");
//! assert_eq!(errors[0].line, 2);
//!
//! // The first definition is kept
//! assert_eq!(err.partial_table().and_then(|t| t.get("a")).and_then(|n| n.as_integer()), Some(1));
//! ```
//!
//! ### Building values with the toml! macro
//!
//! ```rust
//! use toml_tree::{toml, TomlNode};
//!
//! let node = toml!({ "title" = "demo", "tags" = ["a", "b"] });
//! assert_eq!(node.get("title").and_then(TomlNode::as_str), Some("demo"));
//! ```
//!
//! ## Logging
//!
//! The parser and serializer emit [`tracing`] events (`debug` summaries,
//! `trace` for each recorded syntax error, `warn` when the nesting limit is
//! hit). No subscriber is installed by this crate.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`read_config.rs`** - parse a document and decode it into structs
//! - **`build_document.rs`** - build a tree by hand and write it out
//! - **`report_errors.rs`** - collect every syntax error in a broken file
//!
//! Run any example with: `cargo run --example <name>`

pub mod array;
pub mod datetime;
pub mod de;
pub mod error;
pub mod escape;
pub mod lazy;
pub mod macros;
pub mod options;
pub mod parser;
pub mod scalar;
pub mod ser;
pub mod syntax;
pub mod table;
pub mod value;

pub use array::Array;
pub use datetime::{DateTimeStyle, TomlDateTimeLocal, TomlDateTimeOffset};
pub use de::{from_node, Deserializer};
pub use error::{Error, Result, SyntaxError};
pub use escape::{escape, escape_with, unescape};
pub use lazy::LazyNode;
pub use options::{LineEnding, TomlOptions};
pub use parser::Parser;
pub use scalar::{IntegerBase, TomlBoolean, TomlFloat, TomlInteger, TomlString};
pub use ser::{to_node, to_table, NodeSerializer, Serializer};
pub use syntax::ParseState;
pub use table::Table;
pub use value::{NodeMeta, TomlNode};

use serde::de::DeserializeOwned;
use std::io;

/// Parses a TOML document into its root table.
///
/// # Examples
///
/// ```rust
/// use toml_tree::parse;
///
/// let table = parse("x = 0xFF").unwrap();
/// assert_eq!(table.get("x").and_then(|n| n.as_integer()), Some(255));
/// ```
///
/// # Errors
///
/// Returns [`Error::Parse`] carrying every syntax error and the partial tree.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse(input: &str) -> Result<Table> {
    parse_with_options(input, TomlOptions::default())
}

/// Parses a TOML document with custom options.
///
/// # Errors
///
/// Returns [`Error::Parse`] carrying every syntax error and the partial tree.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_with_options(input: &str, options: TomlOptions) -> Result<Table> {
    Parser::with_options(input, options).parse()
}

/// Parses a TOML document from an I/O stream.
///
/// # Examples
///
/// ```rust
/// use std::io::Cursor;
/// use toml_tree::from_reader;
///
/// let table = from_reader(Cursor::new(b"enabled = true")).unwrap();
/// assert_eq!(table.get("enabled").and_then(|n| n.as_bool()), Some(true));
/// ```
///
/// A leading byte order mark is skipped.
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails (including invalid UTF-8) and
/// [`Error::Parse`] if the text is malformed.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(reader: R) -> Result<Table>
where
    R: io::Read,
{
    from_reader_with_options(reader, TomlOptions::default())
}

/// Parses a TOML document from an I/O stream with custom options.
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails (including invalid UTF-8) and
/// [`Error::Parse`] if the text is malformed.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader_with_options<R>(mut reader: R, options: TomlOptions) -> Result<Table>
where
    R: io::Read,
{
    let mut string = String::new();
    reader.read_to_string(&mut string)?;
    parse_with_options(strip_bom(&string), options)
}

/// Parses a TOML document from UTF-8 bytes. A leading byte order mark is skipped.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8 or the text is malformed.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(v: &[u8]) -> Result<Table> {
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    parse(strip_bom(s))
}

fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

/// Writes a table as a TOML document.
///
/// # Examples
///
/// ```rust
/// use toml_tree::{to_string, Table};
///
/// let mut table = Table::new();
/// table.insert("x", 1);
/// assert_eq!(to_string(&table).unwrap(), "x = 1\n");
/// ```
///
/// # Errors
///
/// Returns [`Error::Format`] if a table array holds non-table elements.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string(table: &Table) -> Result<String> {
    to_string_with_options(table, TomlOptions::default())
}

/// Writes a table as a TOML document with custom options.
///
/// # Errors
///
/// Returns [`Error::Format`] if a table array holds non-table elements.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options(table: &Table, options: TomlOptions) -> Result<String> {
    let mut serializer = Serializer::new(options);
    serializer.serialize_document(table)?;
    Ok(serializer.into_inner())
}

/// Writes a table as a TOML document to a writer.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(writer: W, table: &Table) -> Result<()>
where
    W: io::Write,
{
    to_writer_with_options(writer, table, TomlOptions::default())
}

/// Writes a table as a TOML document to a writer with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W>(mut writer: W, table: &Table, options: TomlOptions) -> Result<()>
where
    W: io::Write,
{
    let text = to_string_with_options(table, options)?;
    writer.write_all(text.as_bytes())?;
    Ok(())
}

/// Parses TOML text and decodes it into a `T`.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use toml_tree::from_str;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x = 1\ny = 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns [`Error::Parse`] for malformed text, or the decoding error if
/// the tree does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_node(TomlNode::Table(parse(s)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Service {
        name: String,
        port: u16,
        enabled: bool,
        hosts: Vec<String>,
    }

    #[test]
    fn test_struct_round_trip() {
        let service = Service {
            name: "gateway".to_string(),
            port: 443,
            enabled: true,
            hosts: vec!["edge-1".to_string(), "edge-2".to_string()],
        };

        let text = to_string(&to_table(&service).unwrap()).unwrap();
        assert_eq!(
            text,
            "name = \"gateway\"\nport = 443\nenabled = true\nhosts = [ \"edge-1\", \"edge-2\" ]\n"
        );
        let decoded: Service = from_str(&text).unwrap();
        assert_eq!(service, decoded);
    }

    #[test]
    fn test_writer_and_reader() {
        let table = parse("a = 'x'\n").unwrap();
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &table).unwrap();
        assert_eq!(buffer, b"a = 'x'\n");
        assert_eq!(from_reader(buffer.as_slice()).unwrap(), table);
    }

    #[test]
    fn test_from_slice_rejects_invalid_utf8() {
        assert!(matches!(
            from_slice(&[0x61, 0x20, 0x3d, 0xff]),
            Err(Error::Custom(_))
        ));
    }

    #[test]
    fn test_reader_error_is_io() {
        struct Broken;
        impl io::Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
            }
        }
        assert!(matches!(from_reader(Broken), Err(Error::Io(_))));
    }

    #[test]
    fn test_leading_bom_is_skipped() {
        let bytes = b"\xEF\xBB\xBFtitle = \"x\"\n";
        let expected = parse("title = \"x\"\n").unwrap();
        assert_eq!(from_slice(bytes).unwrap(), expected);
        assert_eq!(from_reader(&bytes[..]).unwrap(), expected);
    }

    #[test]
    fn test_reader_with_options() {
        let options = TomlOptions::new().with_max_depth(1);
        let err = from_reader_with_options("a = [[1]]\n".as_bytes(), options.clone()).unwrap_err();
        assert_eq!(err.syntax_errors().len(), 1);

        let table = from_reader_with_options("a = [1]\n".as_bytes(), options).unwrap();
        assert_eq!(table.get("a").map(TomlNode::children_count), Some(1));
    }
}
