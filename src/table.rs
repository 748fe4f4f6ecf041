//! Ordered key-to-node mapping for TOML tables.
//!
//! [`Table`] wraps an [`IndexMap`] so keys keep the order they were declared
//! in, which keeps serialized output stable and close to the source text.
//!
//! ## Examples
//!
//! ```rust
//! use toml_tree::{Table, TomlNode};
//!
//! let mut table = Table::new();
//! table.insert("name", "Tom");
//! table.insert_path(&["owner", "dob"], TomlNode::from(1979)).unwrap();
//!
//! assert_eq!(table.keys().collect::<Vec<_>>(), vec!["name", "owner"]);
//! assert_eq!(table.get_path(&["owner", "dob"]).and_then(|n| n.as_integer()), Some(1979));
//! ```

use crate::lazy::LazyNode;
use crate::value::{NodeMeta, TomlNode};
use crate::{Error, Result};
use indexmap::IndexMap;

/// A TOML table.
///
/// Besides its entries a table records whether it was written inline
/// (`{ ... }`, immutable once closed) and whether it only exists because a
/// longer header or dotted key passed through it.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub meta: NodeMeta,
    entries: IndexMap<String, TomlNode>,
    inline: bool,
    implicit: bool,
}

impl Table {
    #[must_use]
    pub fn new() -> Self {
        Table::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Table {
            entries: IndexMap::with_capacity(capacity),
            ..Default::default()
        }
    }

    /// Creates an empty table rendered as `{ ... }`.
    #[must_use]
    pub fn new_inline() -> Self {
        Table {
            inline: true,
            ..Default::default()
        }
    }

    pub(crate) fn new_implicit() -> Self {
        Table {
            implicit: true,
            ..Default::default()
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_inline(&self) -> bool {
        self.inline
    }

    pub fn set_inline(&mut self, inline: bool) {
        self.inline = inline;
    }

    /// Whether the table was only created as an intermediate path segment.
    #[inline]
    #[must_use]
    pub const fn is_implicit(&self) -> bool {
        self.implicit
    }

    pub(crate) fn mark_explicit(&mut self) {
        self.implicit = false;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&TomlNode> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut TomlNode> {
        self.entries.get_mut(key)
    }

    /// Resolves a key path through nested tables.
    #[must_use]
    pub fn get_path<S: AsRef<str>>(&self, path: &[S]) -> Option<&TomlNode> {
        let (last, parents) = path.split_last()?;
        let mut table = self;
        for key in parents {
            table = table.get(key.as_ref())?.as_table()?;
        }
        table.get(last.as_ref())
    }

    /// Inserts or replaces the node under `key`, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<TomlNode>) -> Option<TomlNode> {
        self.entries.insert(key.into(), node.into())
    }

    /// Inserts a node under a key that must not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`] if `key` is already present.
    pub fn add(&mut self, key: impl Into<String>, node: impl Into<TomlNode>) -> Result<()> {
        let key = key.into();
        if self.entries.contains_key(&key) {
            return Err(Error::duplicate_key(&key));
        }
        self.entries.insert(key, node.into());
        Ok(())
    }

    /// Inserts `node` at a dotted key path, creating intermediate tables.
    ///
    /// The node's collapse level is set to the number of leading segments,
    /// so `a.b.c = 1` writes back as a dotted key. Intermediate tables
    /// created here record their own depth the same way.
    ///
    /// # Errors
    ///
    /// - [`Error::KeyConflict`] if an intermediate segment holds a value
    /// - [`Error::ImmutableTable`] if an intermediate segment is an inline table
    /// - [`Error::DuplicateKey`] if the final segment already exists
    pub fn insert_path<S: AsRef<str>>(&mut self, path: &[S], mut node: TomlNode) -> Result<()> {
        let Some((last, parents)) = path.split_last() else {
            return Err(Error::custom("cannot insert at an empty key path"));
        };
        let dotted = || {
            path.iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .join(".")
        };

        let mut table = self;
        for (depth, key) in parents.iter().enumerate() {
            let key = key.as_ref();
            if !table.contains_key(key) {
                let mut intermediate = Table::new();
                intermediate.meta.collapse_level = depth;
                table.insert(key, intermediate);
            }
            table = match table.get_mut(key) {
                Some(TomlNode::Table(t)) if t.is_inline() => {
                    return Err(Error::immutable_table(&dotted()))
                }
                Some(TomlNode::Table(t)) => t,
                _ => return Err(Error::key_conflict(&dotted())),
            };
        }

        if table.contains_key(last.as_ref()) {
            return Err(Error::duplicate_key(&dotted()));
        }
        node.set_collapse_level(parents.len());
        table.insert(last.as_ref(), node);
        Ok(())
    }

    /// Removes `key`, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<TomlNode> {
        self.entries.shift_remove(key)
    }

    /// Removes the first entry whose node equals `node`.
    pub fn remove_node(&mut self, node: &TomlNode) -> Option<(String, TomlNode)> {
        let index = self.entries.values().position(|candidate| candidate == node)?;
        self.entries.shift_remove_index(index)
    }

    /// Returns a handle to the slot under `key`, whether or not it exists.
    pub fn entry(&mut self, key: impl Into<String>) -> LazyNode<'_> {
        LazyNode::for_key(self, key.into())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// The child nodes in declaration order.
    pub fn values(&self) -> impl Iterator<Item = &TomlNode> {
        self.entries.values()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut TomlNode> {
        self.entries.values_mut()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, TomlNode> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, String, TomlNode> {
        self.entries.iter_mut()
    }
}

/// Tables compare by entries, regardless of order or formatting flags.
impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Into<String>, V: Into<TomlNode>> FromIterator<(K, V)> for Table {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = Table::new();
        table.extend(iter);
        table
    }
}

impl<K: Into<String>, V: Into<TomlNode>> Extend<(K, V)> for Table {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.entries.insert(key.into(), value.into());
        }
    }
}

impl IntoIterator for Table {
    type Item = (String, TomlNode);
    type IntoIter = indexmap::map::IntoIter<String, TomlNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = (&'a String, &'a TomlNode);
    type IntoIter = indexmap::map::Iter<'a, String, TomlNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
