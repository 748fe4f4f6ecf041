//! TOML serialization.
//!
//! Two directions live here:
//!
//! - [`Serializer`] writes a [`Table`] tree out as document text
//! - [`NodeSerializer`] turns any `Serialize` value into a [`TomlNode`]
//!
//! ## Layout rules
//!
//! Each table is written as its plain key-value pairs first, followed by its
//! sub-tables as `[section]` blocks and its table arrays as repeated
//! `[[section]]` blocks, each block separated by a blank line. A sub-table
//! whose whole subtree was declared with dotted keys (tracked through each
//! node's collapse level) is folded back into `a.b.c = value` lines instead.
//! Inline tables are always written as `{ k = v }`.
//!
//! ```rust
//! use toml_tree::{parse, to_string};
//!
//! let source = "name = \"Tom\"\nsite.url = \"example.org\"\n\n[server]\nport = 8080\n";
//! let table = parse(source).unwrap();
//! assert_eq!(to_string(&table).unwrap(), source);
//! ```
//!
//! ## Building trees from Rust values
//!
//! ```rust
//! use serde::Serialize;
//! use toml_tree::{to_string, to_table};
//!
//! #[derive(Serialize)]
//! struct Server { host: String, port: u16 }
//!
//! #[derive(Serialize)]
//! struct Config { name: String, server: Server }
//!
//! let config = Config {
//!     name: "demo".into(),
//!     server: Server { host: "localhost".into(), port: 80 },
//! };
//! let text = to_string(&to_table(&config).unwrap()).unwrap();
//! assert_eq!(text, "name = \"demo\"\n\n[server]\nhost = \"localhost\"\nport = 80\n");
//! ```

use crate::array::Array;
use crate::escape::escape_with;
use crate::options::TomlOptions;
use crate::syntax;
use crate::table::Table;
use crate::value::TomlNode;
use crate::{Error, Result};
use serde::{ser, Serialize};
use tracing::debug;

/// Writes a [`Table`] tree as TOML text.
///
/// Created via [`Serializer::new`]; call [`Serializer::serialize_document`]
/// and collect the text with [`Serializer::into_inner`].
pub struct Serializer {
    output: String,
    options: TomlOptions,
}

impl Serializer {
    #[must_use]
    pub fn new(options: TomlOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
        }
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.output
    }

    /// Writes `root` and everything below it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] if a table array holds anything other than tables.
    pub fn serialize_document(&mut self, root: &Table) -> Result<()> {
        if let Some(comment) = &root.meta.comment {
            self.write_comment(comment);
            self.newline();
        }
        self.write_table(root, "")?;
        debug!(
            entries = root.len(),
            bytes = self.output.len(),
            "serialized document"
        );
        Ok(())
    }

    fn newline(&mut self) {
        self.output.push_str(self.options.line_ending.as_str());
    }

    /// Puts a blank line before a new block unless one is already there.
    fn separate(&mut self) {
        let newline = self.options.line_ending.as_str();
        let blank = self.output.ends_with(newline)
            && self.output[..self.output.len() - newline.len()].ends_with(newline);
        if !self.output.is_empty() && !blank {
            self.newline();
        }
    }

    fn write_comment(&mut self, comment: &str) {
        for line in comment.lines() {
            self.output.push('#');
            if !line.is_empty() {
                self.output.push(' ');
                self.output.push_str(line);
            }
            self.newline();
        }
    }

    fn write_table(&mut self, table: &Table, name: &str) -> Result<()> {
        let mut items = Items::default();
        items.collect(table, "", 0, false, &self.options);

        let needs_header =
            !items.values.is_empty() || table.meta.comment.is_some() || table.is_empty();
        if !name.is_empty() && needs_header {
            self.separate();
            if let Some(comment) = &table.meta.comment {
                self.write_comment(comment);
            }
            self.output.push('[');
            self.output.push_str(name);
            self.output.push(']');
            self.newline();
        }

        self.write_items(items, name)
    }

    fn write_table_array(&mut self, array: &Array, name: &str) -> Result<()> {
        for element in array {
            let TomlNode::Table(table) = element else {
                return Err(Error::format(format!(
                    "The table array {name} contains non-table nodes"
                )));
            };

            self.separate();
            if let Some(comment) = &table.meta.comment {
                self.write_comment(comment);
            }
            self.output.push_str("[[");
            self.output.push_str(name);
            self.output.push_str("]]");
            self.newline();

            let mut items = Items::default();
            items.collect(table, "", 0, false, &self.options);
            self.write_items(items, name)?;
        }
        Ok(())
    }

    fn write_items(&mut self, items: Items<'_>, name: &str) -> Result<()> {
        for (key, node) in items.values {
            if let Some(comment) = node.comment() {
                self.write_comment(comment);
            }
            self.output.push_str(&key);
            self.output.push_str(" = ");
            write_value(&mut self.output, node, &ValueWriter::strict(&self.options), 0)?;
            self.newline();
        }

        for (key, node) in items.sections {
            let path = if name.is_empty() {
                key
            } else {
                format!("{name}.{key}")
            };
            match node {
                TomlNode::Table(table) => self.write_table(table, &path)?,
                TomlNode::Array(array) => self.write_table_array(array, &path)?,
                _ => {}
            }
        }
        Ok(())
    }
}

/// A table's entries split into `key = value` lines and deferred sections.
///
/// Keys are already formatted and may be dotted paths.
#[derive(Default)]
struct Items<'t> {
    values: Vec<(String, &'t TomlNode)>,
    sections: Vec<(String, &'t TomlNode)>,
}

impl<'t> Items<'t> {
    fn collect(
        &mut self,
        table: &'t Table,
        prefix: &str,
        depth: usize,
        inline: bool,
        options: &TomlOptions,
    ) {
        for (key, node) in table {
            let mut path = String::with_capacity(prefix.len() + key.len() + 1);
            if !prefix.is_empty() {
                path.push_str(prefix);
                path.push('.');
            }
            push_key(&mut path, key, options);

            match node {
                TomlNode::Table(t) if !t.is_inline() && is_dotted(t, depth + 1) => {
                    self.collect(t, &path, depth + 1, inline, options);
                }
                TomlNode::Table(t) if !t.is_inline() && !inline => {
                    self.sections.push((path, node));
                }
                TomlNode::Array(a) if a.is_table_array() && !a.is_empty() && !inline => {
                    self.sections.push((path, node));
                }
                _ => self.values.push((path, node)),
            }
        }
    }
}

/// Whether every leaf under `table` was declared as a dotted key at `depth`.
fn is_dotted(table: &Table, depth: usize) -> bool {
    !table.is_empty()
        && table.values().all(|child| match child {
            TomlNode::Table(t) if !t.is_inline() => is_dotted(t, depth + 1),
            TomlNode::Array(a) if a.is_table_array() => false,
            other => other.collapse_level() == depth,
        })
}

/// Writes `key` bare when possible, quoted otherwise.
fn push_key(out: &mut String, key: &str, options: &TomlOptions) {
    if syntax::is_bare_key_text(key) {
        out.push_str(key);
    } else {
        out.push('"');
        out.push_str(&escape_with(key, true, options.force_ascii));
        out.push('"');
    }
}

/// Renders `node` as a single TOML value.
pub(crate) fn write_inline(
    out: &mut String,
    node: &TomlNode,
    options: &TomlOptions,
) -> Result<()> {
    write_value(out, node, &ValueWriter::strict(options), 0)
}

/// Renders `node` like [`write_inline`] but writes a table array holding
/// non-tables as a plain array.
pub(crate) fn write_plain(out: &mut String, node: &TomlNode, options: &TomlOptions) {
    // A lenient writer never fails
    let _ = write_value(out, node, &ValueWriter { options, strict: false }, 0);
}

/// Options for the value writers.
struct ValueWriter<'o> {
    options: &'o TomlOptions,
    strict: bool,
}

impl<'o> ValueWriter<'o> {
    fn strict(options: &'o TomlOptions) -> Self {
        ValueWriter { options, strict: true }
    }
}

fn write_value(
    out: &mut String,
    node: &TomlNode,
    writer: &ValueWriter<'_>,
    level: usize,
) -> Result<()> {
    let options = writer.options;
    match node {
        TomlNode::Table(table) => return write_inline_table(out, table, writer, level),
        TomlNode::Array(array) => return write_array(out, array, writer, level),
        TomlNode::String(s) => out.push_str(&s.to_inline_toml_with(options)),
        TomlNode::Integer(i) => out.push_str(&i.to_inline_toml()),
        TomlNode::Float(f) => out.push_str(&f.to_inline_toml()),
        TomlNode::Boolean(b) => out.push_str(&b.to_inline_toml()),
        TomlNode::DateTimeLocal(d) => out.push_str(&d.to_inline_toml()),
        TomlNode::DateTimeOffset(d) => out.push_str(&d.to_inline_toml()),
    }
    Ok(())
}

fn write_array(
    out: &mut String,
    array: &Array,
    writer: &ValueWriter<'_>,
    level: usize,
) -> Result<()> {
    let options = writer.options;
    let mixed = array.is_table_array() && array.iter().any(|element| !element.is_table());
    if writer.strict && mixed {
        return Err(Error::format("A table array contains non-table nodes"));
    }
    if array.is_empty() {
        out.push_str("[]");
        return Ok(());
    }

    if !array.is_multiline() {
        out.push_str("[ ");
        for (i, element) in array.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            write_value(out, element, writer, level + 1)?;
        }
        out.push_str(" ]");
        return Ok(());
    }

    let newline = options.line_ending.as_str();
    out.push('[');
    out.push_str(newline);
    for element in array {
        push_indent(out, options.indent * (level + 1));
        write_value(out, element, writer, level + 1)?;
        out.push(',');
        out.push_str(newline);
    }
    push_indent(out, options.indent * level);
    out.push(']');
    Ok(())
}

fn write_inline_table(
    out: &mut String,
    table: &Table,
    writer: &ValueWriter<'_>,
    level: usize,
) -> Result<()> {
    let mut items = Items::default();
    items.collect(table, "", 0, true, writer.options);
    if items.values.is_empty() {
        out.push_str("{}");
        return Ok(());
    }

    out.push_str("{ ");
    for (i, (key, node)) in items.values.into_iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&key);
        out.push_str(" = ");
        write_value(out, node, writer, level)?;
    }
    out.push_str(" }");
    Ok(())
}

#[inline]
fn push_indent(out: &mut String, width: usize) {
    out.extend(std::iter::repeat(' ').take(width));
}

/// Converts a `Serialize` value into a [`TomlNode`].
///
/// `None` and unit values have no TOML form: struct fields and map entries
/// holding them are skipped, while an array element holding one is an
/// error. Sequences made only of tables become table arrays.
pub struct NodeSerializer;

pub struct SerializeArray {
    items: Vec<TomlNode>,
    variant: Option<&'static str>,
}

pub struct SerializeTable {
    table: Table,
    current_key: Option<String>,
    variant: Option<&'static str>,
}

/// Wraps an enum variant's payload as `{ variant = payload }`.
fn tagged(variant: Option<&'static str>, node: TomlNode) -> TomlNode {
    match variant {
        Some(name) => {
            let mut table = Table::with_capacity(1);
            table.insert(name, node);
            table.into()
        }
        None => node,
    }
}

impl ser::Serializer for NodeSerializer {
    type Ok = Option<TomlNode>;
    type Error = Error;

    type SerializeSeq = SerializeArray;
    type SerializeTuple = SerializeArray;
    type SerializeTupleStruct = SerializeArray;
    type SerializeTupleVariant = SerializeArray;
    type SerializeMap = SerializeTable;
    type SerializeStruct = SerializeTable;
    type SerializeStructVariant = SerializeTable;

    fn serialize_bool(self, v: bool) -> Result<Self::Ok> {
        Ok(Some(v.into()))
    }

    fn serialize_i8(self, v: i8) -> Result<Self::Ok> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Self::Ok> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Self::Ok> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Self::Ok> {
        Ok(Some(v.into()))
    }

    fn serialize_u8(self, v: u8) -> Result<Self::Ok> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Self::Ok> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Self::Ok> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Self::Ok> {
        let value = i64::try_from(v)
            .map_err(|_| Error::custom(format!("u64 value {v} does not fit in a TOML integer")))?;
        self.serialize_i64(value)
    }

    fn serialize_f32(self, v: f32) -> Result<Self::Ok> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Self::Ok> {
        Ok(Some(v.into()))
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok> {
        Ok(Some(v.to_string().into()))
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok> {
        Ok(Some(v.into()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Self::Ok> {
        let array: Array = v.iter().map(|&b| i64::from(b)).collect();
        Ok(Some(array.into()))
    }

    fn serialize_none(self) -> Result<Self::Ok> {
        Ok(None)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        Ok(None)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok> {
        Ok(None)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok> {
        Ok(Some(variant.into()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        Ok(value
            .serialize(self)?
            .map(|node| tagged(Some(variant), node)))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeArray> {
        Ok(SerializeArray::new(len.unwrap_or(0), None))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeArray> {
        Ok(SerializeArray::new(len, None))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeArray> {
        Ok(SerializeArray::new(len, None))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeArray> {
        Ok(SerializeArray::new(len, Some(variant)))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeTable> {
        Ok(SerializeTable::new(None))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeTable> {
        Ok(SerializeTable::new(None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeTable> {
        Ok(SerializeTable::new(Some(variant)))
    }
}

impl SerializeArray {
    fn new(capacity: usize, variant: Option<&'static str>) -> Self {
        SerializeArray {
            items: Vec::with_capacity(capacity),
            variant,
        }
    }

    fn push<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match value.serialize(NodeSerializer)? {
            Some(node) => {
                self.items.push(node);
                Ok(())
            }
            None => Err(Error::custom("arrays cannot contain missing values")),
        }
    }

    fn finish(self) -> Result<Option<TomlNode>> {
        let all_tables = !self.items.is_empty()
            && self
                .items
                .iter()
                .all(|node| node.as_table().is_some_and(|t| !t.is_inline()));
        let mut array = Array::from(self.items);
        array.set_table_array(all_tables);
        Ok(Some(tagged(self.variant, array.into())))
    }
}

impl SerializeTable {
    fn new(variant: Option<&'static str>) -> Self {
        SerializeTable {
            table: Table::new(),
            current_key: None,
            variant,
        }
    }

    fn insert<T>(&mut self, key: String, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        if let Some(node) = value.serialize(NodeSerializer)? {
            self.table.insert(key, node);
        }
        Ok(())
    }

    fn finish(self) -> Result<Option<TomlNode>> {
        Ok(Some(tagged(self.variant, self.table.into())))
    }
}

impl ser::SerializeSeq for SerializeArray {
    type Ok = Option<TomlNode>;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl ser::SerializeTuple for SerializeArray {
    type Ok = Option<TomlNode>;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl ser::SerializeTupleStruct for SerializeArray {
    type Ok = Option<TomlNode>;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl ser::SerializeTupleVariant for SerializeArray {
    type Ok = Option<TomlNode>;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl ser::SerializeMap for SerializeTable {
    type Ok = Option<TomlNode>;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = match key.serialize(NodeSerializer)? {
            Some(TomlNode::String(s)) => s.value,
            Some(TomlNode::Integer(i)) => i.value.to_string(),
            Some(TomlNode::Boolean(b)) => b.value.to_string(),
            _ => return Err(Error::custom("table keys must be strings")),
        };
        self.current_key = Some(key);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.insert(key, value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl ser::SerializeStruct for SerializeTable {
    type Ok = Option<TomlNode>;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.insert(key.to_string(), value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl ser::SerializeStructVariant for SerializeTable {
    type Ok = Option<TomlNode>;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.insert(key.to_string(), value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

/// Converts `value` into a node.
///
/// # Errors
///
/// Fails when the value has no TOML form (a bare `None` or unit), when an
/// array contains such a value, or when an unsigned integer exceeds `i64`.
pub fn to_node<T: Serialize + ?Sized>(value: &T) -> Result<TomlNode> {
    value
        .serialize(NodeSerializer)?
        .ok_or_else(|| Error::custom("a missing value cannot be represented in TOML"))
}

/// Converts `value` into a root table.
///
/// # Errors
///
/// Fails like [`to_node`], and with [`Error::TypeMismatch`] when the value
/// is not a struct or map.
pub fn to_table<T: Serialize + ?Sized>(value: &T) -> Result<Table> {
    let node = to_node(value)?;
    match node {
        TomlNode::Table(table) => Ok(table),
        other => Err(Error::type_mismatch("table", other.kind())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::LineEnding;
    use crate::parser::Parser;
    use crate::scalar::TomlString;
    use std::collections::BTreeMap;

    fn write(table: &Table) -> String {
        let mut serializer = Serializer::new(TomlOptions::default());
        serializer.serialize_document(table).unwrap();
        serializer.into_inner()
    }

    fn reformat(input: &str) -> String {
        write(&Parser::new(input).parse().unwrap())
    }

    #[test]
    fn test_values_before_sections() {
        let mut root = Table::new();
        let mut server = Table::new();
        server.insert("port", 8080);
        root.insert("server", server);
        root.insert("name", "Tom");

        assert_eq!(write(&root), "name = \"Tom\"\n\n[server]\nport = 8080\n");
    }

    #[test]
    fn test_dotted_keys_round_trip() {
        let source = "a.b.c = 1\na.b.d = true\n\n[section]\nx.y = \"z\"\n";
        assert_eq!(reformat(source), source);
    }

    #[test]
    fn test_implicit_parent_has_no_header() {
        assert_eq!(reformat("[a.b]\nx = 1\n"), "[a.b]\nx = 1\n");
    }

    #[test]
    fn test_empty_table_keeps_header() {
        assert_eq!(reformat("[empty]\n"), "[empty]\n");
    }

    #[test]
    fn test_table_array_blocks() {
        let source = "[[arr]]\nx = 1\n\n[[arr]]\nx = 2\n\n[arr.sub]\ny = 3\n";
        assert_eq!(reformat(source), source);
    }

    #[test]
    fn test_table_array_with_scalar_fails() {
        let mut array = Array::new_table_array();
        array.push(Table::new());
        array.push(1);
        let mut root = Table::new();
        root.insert("bad", array);

        let mut serializer = Serializer::new(TomlOptions::default());
        let err = serializer.serialize_document(&root).unwrap_err();
        assert!(matches!(err, Error::Format(ref msg) if msg.contains("non-table")));
    }

    #[test]
    fn test_empty_table_array_is_a_value() {
        let mut root = Table::new();
        root.insert("none", Array::new_table_array());
        assert_eq!(write(&root), "none = []\n");
    }

    #[test]
    fn test_comments_are_written() {
        let source = "# top\n\n# first key\na = 1\n\n# section note\n[s]\nb = 2\n";
        assert_eq!(reformat(source), source);
    }

    #[test]
    fn test_quoted_keys() {
        let mut root = Table::new();
        root.insert("needs quotes", 1);
        root.insert("", 2);
        root.insert("bare_key-1", 3);
        assert_eq!(
            write(&root),
            "\"needs quotes\" = 1\n\"\" = 2\nbare_key-1 = 3\n"
        );
    }

    #[test]
    fn test_inline_rendering() {
        let table = Parser::new("t = { a.b = 1, c = [] , d = {} }\n")
            .parse()
            .unwrap();
        assert_eq!(
            table.get("t").unwrap().to_inline_toml().unwrap(),
            "{ a.b = 1, c = [], d = {} }"
        );
    }

    #[test]
    fn test_inline_table_array_with_scalar_is_rejected() {
        let mut bad = Array::new_table_array();
        bad.push(Table::new_inline());
        bad.push(1);
        let mut x = Table::new_inline();
        x.insert("bad", bad.clone());
        let mut root = Table::new();
        root.insert("x", x);

        let mut serializer = Serializer::new(TomlOptions::default());
        let err = serializer.serialize_document(&root).unwrap_err();
        assert!(matches!(err, Error::Format(ref msg) if msg.contains("non-table")));

        let err = TomlNode::from(bad).to_inline_toml().unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }

    #[test]
    fn test_inline_table_array_of_tables_is_written() {
        let mut servers = Array::new_table_array();
        let mut alpha = Table::new_inline();
        alpha.insert("ip", "10.0.0.1");
        servers.push(alpha);
        assert_eq!(
            TomlNode::from(servers).to_inline_toml().unwrap(),
            "[ { ip = \"10.0.0.1\" } ]"
        );
    }

    #[test]
    fn test_multiline_array_layout() {
        let source = "ports = [\n  80,\n  [\n    1,\n    2,\n  ],\n]\n";
        assert_eq!(reformat(source), source);
    }

    #[test]
    fn test_crlf_output() {
        let mut root = Table::new();
        root.insert("text", TomlString::multiline("a\nb"));
        let mut serializer =
            Serializer::new(TomlOptions::new().with_line_ending(LineEnding::CrLf));
        serializer.serialize_document(&root).unwrap();
        assert_eq!(serializer.into_inner(), "text = \"\"\"a\nb\"\"\"\r\n");
    }

    #[test]
    fn test_node_serializer_skips_none() {
        #[derive(Serialize)]
        struct Entry {
            name: &'static str,
            note: Option<String>,
        }

        let table = to_table(&Entry {
            name: "x",
            note: None,
        })
        .unwrap();
        assert_eq!(table.len(), 1);
        assert!(to_node(&vec![Some(1), None]).is_err());
    }

    #[test]
    fn test_node_serializer_table_arrays() {
        #[derive(Serialize)]
        struct Item {
            id: u32,
        }
        #[derive(Serialize)]
        struct Doc {
            items: Vec<Item>,
        }

        let table = to_table(&Doc {
            items: vec![Item { id: 1 }, Item { id: 2 }],
        })
        .unwrap();
        assert_eq!(write(&table), "[[items]]\nid = 1\n\n[[items]]\nid = 2\n");
    }

    #[test]
    fn test_node_serializer_enums_and_maps() {
        #[derive(Serialize)]
        enum Shape {
            Circle(f64),
            Unit,
        }

        let mut map = BTreeMap::new();
        map.insert("first", Shape::Circle(1.5));
        map.insert("second", Shape::Unit);
        let table = to_table(&map).unwrap();
        assert_eq!(
            table
                .get_path(&["first", "Circle"])
                .and_then(TomlNode::as_float),
            Some(1.5)
        );
        assert_eq!(table.get("second").and_then(TomlNode::as_str), Some("Unit"));
        assert!(matches!(
            to_table(&5).unwrap_err(),
            Error::TypeMismatch { .. }
        ));
        assert!(to_node(&u64::MAX).is_err());
    }
}
