//! Slot handles for reading and materializing missing children.
//!
//! Indexing a [`Table`] by key or an [`Array`] by position yields a
//! [`LazyNode`]: a borrow of the parent plus the key or index. Nothing is
//! inserted until the handle is used structurally, at which point a real
//! table or array is created in the parent at that slot.
//!
//! ```rust
//! use toml_tree::Table;
//!
//! let mut root = Table::new();
//! let server = root.entry("servers").table().unwrap();
//! server.entry("alpha").set("10.0.0.1");
//!
//! assert_eq!(
//!     root.get_path(&["servers", "alpha"]).and_then(|n| n.as_str()),
//!     Some("10.0.0.1")
//! );
//!
//! // Looking without touching leaves the tree alone
//! assert!(!root.entry("missing").exists());
//! assert!(!root.contains_key("missing"));
//! ```

use crate::array::Array;
use crate::table::Table;
use crate::value::TomlNode;

enum Slot<'a> {
    Key { table: &'a mut Table, key: String },
    Index { array: &'a mut Array, index: usize },
}

/// A handle to a possibly-missing child of a table or array.
///
/// Structural operations return `None` when the slot cannot hold what was
/// asked for: the slot already contains a different kind of node, or the
/// index lies beyond the end of the array.
pub struct LazyNode<'a> {
    slot: Slot<'a>,
}

impl<'a> LazyNode<'a> {
    pub(crate) fn for_key(table: &'a mut Table, key: String) -> Self {
        LazyNode {
            slot: Slot::Key { table, key },
        }
    }

    pub(crate) fn for_index(array: &'a mut Array, index: usize) -> Self {
        LazyNode {
            slot: Slot::Index { array, index },
        }
    }

    /// The node currently in the slot.
    #[must_use]
    pub fn get(&self) -> Option<&TomlNode> {
        match &self.slot {
            Slot::Key { table, key } => table.get(key),
            Slot::Index { array, index } => array.get(*index),
        }
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        self.get().is_some()
    }

    /// Consumes the handle and returns the existing node, if any.
    pub fn into_node(self) -> Option<&'a mut TomlNode> {
        match self.slot {
            Slot::Key { table, key } => table.get_mut(&key),
            Slot::Index { array, index } => array.get_mut(index),
        }
    }

    /// Writes `node` into the slot, replacing whatever was there.
    ///
    /// Array slots accept existing positions and the position one past the end.
    pub fn set(self, node: impl Into<TomlNode>) -> Option<&'a mut TomlNode> {
        match self.slot {
            Slot::Key { table, key } => {
                table.insert(key.clone(), node);
                table.get_mut(&key)
            }
            Slot::Index { array, index } => {
                array.set(index, node).ok()?;
                array.get_mut(index)
            }
        }
    }

    /// Returns the node in the slot, writing `make()` first if it is empty.
    pub fn or_insert_with<F>(self, make: F) -> Option<&'a mut TomlNode>
    where
        F: FnOnce() -> TomlNode,
    {
        if self.exists() {
            self.into_node()
        } else {
            self.set(make())
        }
    }

    /// Materializes a table in the slot, or returns the table already there.
    pub fn table(self) -> Option<&'a mut Table> {
        self.or_insert_with(|| TomlNode::from(Table::new()))
            .and_then(TomlNode::as_table_mut)
    }

    /// Materializes an array in the slot, or returns the array already there.
    pub fn array(self) -> Option<&'a mut Array> {
        self.or_insert_with(|| TomlNode::from(Array::new()))
            .and_then(TomlNode::as_array_mut)
    }

    /// Descends into `key`, materializing this slot as a table.
    pub fn key(self, key: impl Into<String>) -> Option<LazyNode<'a>> {
        self.table().map(|table| table.entry(key))
    }

    /// Descends into `index`, materializing this slot as an array.
    pub fn index(self, index: usize) -> Option<LazyNode<'a>> {
        self.array().map(|array| array.entry(index))
    }
}
