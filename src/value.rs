//! The document tree node.
//!
//! [`TomlNode`] is a closed sum over every kind of value a TOML document can
//! hold. Every variant carries a [`NodeMeta`] with the comment written above
//! the node and the collapse level used to decide between dotted keys and
//! section headers when the tree is written back out.
//!
//! ## Creating Nodes
//!
//! ```rust
//! use toml_tree::{Table, TomlNode};
//!
//! let port = TomlNode::from(8080);
//! let host = TomlNode::from("localhost");
//! let enabled = TomlNode::from(true);
//!
//! let mut server = Table::new();
//! server.insert("port", port);
//! server.insert("host", host);
//! server.insert("enabled", enabled);
//! assert_eq!(server.len(), 3);
//! ```
//!
//! ## Type Checking and Extraction
//!
//! Accessors return `None` for other variants instead of failing:
//!
//! ```rust
//! use toml_tree::TomlNode;
//!
//! let value = TomlNode::from(42);
//! assert!(value.is_integer());
//! assert_eq!(value.as_integer(), Some(42));
//! assert_eq!(value.as_str(), None);
//!
//! // Fallible native casts
//! let n: i64 = i64::try_from(value).unwrap();
//! assert_eq!(n, 42);
//! ```

use crate::array::Array;
use crate::datetime::{TomlDateTimeLocal, TomlDateTimeOffset};
use crate::lazy::LazyNode;
use crate::options::TomlOptions;
use crate::scalar::{format_float, TomlBoolean, TomlFloat, TomlInteger, TomlString};
use crate::table::Table;
use crate::{Error, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Serialize, Serializer};
use std::fmt;

/// Data shared by every node: its comment and its collapse level.
///
/// The collapse level is the number of leading key segments a node shares
/// with the dotted key it was declared under, relative to its section
/// header. `a.b.c = 1` gives the integer a collapse level of 2.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeMeta {
    pub comment: Option<String>,
    pub collapse_level: usize,
}

/// Any value in a TOML document.
///
/// Equality compares values and structure only; comments, collapse levels
/// and formatting hints are ignored.
#[derive(Clone, Debug, PartialEq)]
pub enum TomlNode {
    Table(Table),
    Array(Array),
    String(TomlString),
    Integer(TomlInteger),
    Float(TomlFloat),
    Boolean(TomlBoolean),
    DateTimeLocal(TomlDateTimeLocal),
    DateTimeOffset(TomlDateTimeOffset),
}

impl Default for TomlNode {
    fn default() -> Self {
        TomlNode::Table(Table::new())
    }
}

impl TomlNode {
    #[must_use]
    pub fn meta(&self) -> &NodeMeta {
        match self {
            TomlNode::Table(t) => &t.meta,
            TomlNode::Array(a) => &a.meta,
            TomlNode::String(s) => &s.meta,
            TomlNode::Integer(i) => &i.meta,
            TomlNode::Float(f) => &f.meta,
            TomlNode::Boolean(b) => &b.meta,
            TomlNode::DateTimeLocal(d) => &d.meta,
            TomlNode::DateTimeOffset(d) => &d.meta,
        }
    }

    pub fn meta_mut(&mut self) -> &mut NodeMeta {
        match self {
            TomlNode::Table(t) => &mut t.meta,
            TomlNode::Array(a) => &mut a.meta,
            TomlNode::String(s) => &mut s.meta,
            TomlNode::Integer(i) => &mut i.meta,
            TomlNode::Float(f) => &mut f.meta,
            TomlNode::Boolean(b) => &mut b.meta,
            TomlNode::DateTimeLocal(d) => &mut d.meta,
            TomlNode::DateTimeOffset(d) => &mut d.meta,
        }
    }

    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.meta().comment.as_deref()
    }

    pub fn set_comment(&mut self, comment: Option<String>) {
        self.meta_mut().comment = comment;
    }

    /// Attaches a comment and returns the node, for building trees inline.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.set_comment(Some(comment.into()));
        self
    }

    #[must_use]
    pub fn collapse_level(&self) -> usize {
        self.meta().collapse_level
    }

    pub fn set_collapse_level(&mut self, level: usize) {
        self.meta_mut().collapse_level = level;
    }

    /// Name of the variant, for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            TomlNode::Table(_) => "table",
            TomlNode::Array(_) => "array",
            TomlNode::String(_) => "string",
            TomlNode::Integer(_) => "integer",
            TomlNode::Float(_) => "float",
            TomlNode::Boolean(_) => "boolean",
            TomlNode::DateTimeLocal(_) => "local date-time",
            TomlNode::DateTimeOffset(_) => "offset date-time",
        }
    }

    /// Everything except a table is a value that can sit on the right of `=`
    /// without opening a section.
    #[inline]
    #[must_use]
    pub const fn has_value(&self) -> bool {
        !self.is_table()
    }

    #[inline]
    #[must_use]
    pub const fn is_table(&self) -> bool {
        matches!(self, TomlNode::Table(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, TomlNode::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, TomlNode::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, TomlNode::Integer(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, TomlNode::Float(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_boolean(&self) -> bool {
        matches!(self, TomlNode::Boolean(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_datetime_local(&self) -> bool {
        matches!(self, TomlNode::DateTimeLocal(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_datetime_offset(&self) -> bool {
        matches!(self, TomlNode::DateTimeOffset(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_datetime(&self) -> bool {
        self.is_datetime_local() || self.is_datetime_offset()
    }

    #[must_use]
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            TomlNode::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_table_mut(&mut self) -> Option<&mut Table> {
        match self {
            TomlNode::Table(t) => Some(t),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            TomlNode::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            TomlNode::Array(a) => Some(a),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TomlNode::String(s) => Some(&s.value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            TomlNode::Integer(i) => Some(i.value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            TomlNode::Float(f) => Some(f.value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TomlNode::Boolean(b) => Some(b.value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_datetime_local(&self) -> Option<&TomlDateTimeLocal> {
        match self {
            TomlNode::DateTimeLocal(d) => Some(d),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_datetime_offset(&self) -> Option<&TomlDateTimeOffset> {
        match self {
            TomlNode::DateTimeOffset(d) => Some(d),
            _ => None,
        }
    }

    /// Looks up a key when this node is a table.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&TomlNode> {
        self.as_table().and_then(|t| t.get(key))
    }

    /// Looks up a position when this node is an array.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&TomlNode> {
        self.as_array().and_then(|a| a.get(index))
    }

    #[must_use]
    pub fn has_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    #[must_use]
    pub fn has_item_at(&self, index: usize) -> bool {
        self.get_index(index).is_some()
    }

    /// Number of direct children of a table or array; zero for scalars.
    #[must_use]
    pub fn children_count(&self) -> usize {
        match self {
            TomlNode::Table(t) => t.len(),
            TomlNode::Array(a) => a.len(),
            _ => 0,
        }
    }

    /// Returns a slot handle for `key` when this node is a table.
    pub fn entry(&mut self, key: impl Into<String>) -> Option<LazyNode<'_>> {
        self.as_table_mut().map(|t| t.entry(key))
    }

    /// Returns a slot handle for `index` when this node is an array.
    pub fn entry_at(&mut self, index: usize) -> Option<LazyNode<'_>> {
        self.as_array_mut().map(|a| a.entry(index))
    }

    /// Renders the node as a single-line TOML value with default options.
    ///
    /// Fails with [`Error::Format`] when a nested table array holds a non-table.
    pub fn to_inline_toml(&self) -> Result<String> {
        self.to_inline_toml_with(&TomlOptions::default())
    }

    pub fn to_inline_toml_with(&self, options: &TomlOptions) -> Result<String> {
        let mut out = String::new();
        crate::ser::write_inline(&mut out, self, options)?;
        Ok(out)
    }
}

/// Plain rendering: strings print their raw text, containers their inline TOML.
impl fmt::Display for TomlNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TomlNode::String(s) => f.write_str(&s.value),
            TomlNode::Integer(i) => write!(f, "{}", i.value),
            TomlNode::Float(v) => f.write_str(&format_float(v.value)),
            TomlNode::Boolean(b) => write!(f, "{}", b.value),
            other => {
                let mut out = String::new();
                crate::ser::write_plain(&mut out, other, &TomlOptions::default());
                f.write_str(&out)
            }
        }
    }
}

impl Serialize for TomlNode {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            TomlNode::Table(t) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(t.len()))?;
                for (k, v) in t.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            TomlNode::Array(a) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(a.len()))?;
                for element in a.iter() {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            TomlNode::String(s) => serializer.serialize_str(&s.value),
            TomlNode::Integer(i) => serializer.serialize_i64(i.value),
            TomlNode::Float(f) => serializer.serialize_f64(f.value),
            TomlNode::Boolean(b) => serializer.serialize_bool(b.value),
            TomlNode::DateTimeLocal(d) => serializer.serialize_str(&d.to_inline_toml()),
            TomlNode::DateTimeOffset(d) => serializer.serialize_str(&d.to_inline_toml()),
        }
    }
}

impl Serialize for Table {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl TryFrom<TomlNode> for i64 {
    type Error = Error;

    fn try_from(node: TomlNode) -> Result<Self> {
        match node {
            TomlNode::Integer(i) => Ok(i.value),
            other => Err(Error::type_mismatch("integer", other.kind())),
        }
    }
}

/// Integers widen to floats.
impl TryFrom<TomlNode> for f64 {
    type Error = Error;

    fn try_from(node: TomlNode) -> Result<Self> {
        match node {
            TomlNode::Float(f) => Ok(f.value),
            TomlNode::Integer(i) => Ok(i.value as f64),
            other => Err(Error::type_mismatch("float", other.kind())),
        }
    }
}

impl TryFrom<TomlNode> for bool {
    type Error = Error;

    fn try_from(node: TomlNode) -> Result<Self> {
        match node {
            TomlNode::Boolean(b) => Ok(b.value),
            other => Err(Error::type_mismatch("boolean", other.kind())),
        }
    }
}

impl TryFrom<TomlNode> for Table {
    type Error = Error;

    fn try_from(node: TomlNode) -> Result<Self> {
        match node {
            TomlNode::Table(t) => Ok(t),
            other => Err(Error::type_mismatch("table", other.kind())),
        }
    }
}

impl TryFrom<TomlNode> for Array {
    type Error = Error;

    fn try_from(node: TomlNode) -> Result<Self> {
        match node {
            TomlNode::Array(a) => Ok(a),
            other => Err(Error::type_mismatch("array", other.kind())),
        }
    }
}

/// Any node converts to text: strings give their value, everything else its
/// plain rendering.
impl From<TomlNode> for String {
    fn from(node: TomlNode) -> Self {
        match node {
            TomlNode::String(s) => s.value,
            other => other.to_string(),
        }
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for TomlNode {
                fn from(value: $ty) -> Self {
                    TomlNode::Integer(TomlInteger::new(i64::from(value)))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for TomlNode {
    fn from(value: bool) -> Self {
        TomlNode::Boolean(TomlBoolean::new(value))
    }
}

impl From<f32> for TomlNode {
    fn from(value: f32) -> Self {
        TomlNode::Float(TomlFloat::new(f64::from(value)))
    }
}

impl From<f64> for TomlNode {
    fn from(value: f64) -> Self {
        TomlNode::Float(TomlFloat::new(value))
    }
}

impl From<String> for TomlNode {
    fn from(value: String) -> Self {
        TomlNode::String(TomlString::new(value))
    }
}

impl From<&str> for TomlNode {
    fn from(value: &str) -> Self {
        TomlNode::String(TomlString::new(value))
    }
}

impl From<NaiveDateTime> for TomlNode {
    fn from(value: NaiveDateTime) -> Self {
        TomlNode::DateTimeLocal(TomlDateTimeLocal::date_time(value))
    }
}

impl From<NaiveDate> for TomlNode {
    fn from(value: NaiveDate) -> Self {
        TomlNode::DateTimeLocal(TomlDateTimeLocal::date(value))
    }
}

impl From<NaiveTime> for TomlNode {
    fn from(value: NaiveTime) -> Self {
        TomlNode::DateTimeLocal(TomlDateTimeLocal::time(value))
    }
}

impl From<DateTime<FixedOffset>> for TomlNode {
    fn from(value: DateTime<FixedOffset>) -> Self {
        TomlNode::DateTimeOffset(TomlDateTimeOffset::new(value))
    }
}

impl From<Vec<TomlNode>> for TomlNode {
    fn from(value: Vec<TomlNode>) -> Self {
        TomlNode::Array(Array::from(value))
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident($ty:ty)),*) => {
        $(
            impl From<$ty> for TomlNode {
                fn from(value: $ty) -> Self {
                    TomlNode::$variant(value)
                }
            }
        )*
    };
}

impl_from_variant!(
    Table(Table),
    Array(Array),
    String(TomlString),
    Integer(TomlInteger),
    Float(TomlFloat),
    Boolean(TomlBoolean),
    DateTimeLocal(TomlDateTimeLocal),
    DateTimeOffset(TomlDateTimeOffset)
);
