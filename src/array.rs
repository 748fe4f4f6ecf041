//! Ordered sequences of nodes.

use crate::lazy::LazyNode;
use crate::table::Table;
use crate::value::{NodeMeta, TomlNode};
use crate::{Error, Result};

/// A TOML array.
///
/// `multiline` only affects formatting. A table array holds tables only and
/// is written as repeated `[[name]]` sections.
///
/// # Examples
///
/// ```rust
/// use toml_tree::{Array, TomlNode};
///
/// let mut hosts = Array::new();
/// hosts.push("alpha");
/// hosts.push("omega");
/// assert_eq!(TomlNode::from(hosts).to_inline_toml().unwrap(), r#"[ "alpha", "omega" ]"#);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Array {
    pub meta: NodeMeta,
    items: Vec<TomlNode>,
    multiline: bool,
    table_array: bool,
}

impl Array {
    #[must_use]
    pub fn new() -> Self {
        Array::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Array {
            items: Vec::with_capacity(capacity),
            ..Default::default()
        }
    }

    /// Creates an empty array of tables.
    #[must_use]
    pub fn new_table_array() -> Self {
        Array {
            table_array: true,
            ..Default::default()
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_table_array(&self) -> bool {
        self.table_array
    }

    pub fn set_table_array(&mut self, table_array: bool) {
        self.table_array = table_array;
    }

    #[inline]
    #[must_use]
    pub const fn is_multiline(&self) -> bool {
        self.multiline
    }

    pub fn set_multiline(&mut self, multiline: bool) {
        self.multiline = multiline;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn has_item_at(&self, index: usize) -> bool {
        index < self.items.len()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TomlNode> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut TomlNode> {
        self.items.get_mut(index)
    }

    /// The last element as a table, used to continue the latest `[[name]]` block.
    pub(crate) fn last_table_mut(&mut self) -> Option<&mut Table> {
        self.items.last_mut().and_then(TomlNode::as_table_mut)
    }

    pub fn push(&mut self, node: impl Into<TomlNode>) {
        self.items.push(node.into());
    }

    /// Writes `node` at `index`: replaces an existing element or appends
    /// when `index` equals the length.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] when `index` is past the end.
    pub fn set(&mut self, index: usize, node: impl Into<TomlNode>) -> Result<()> {
        let len = self.items.len();
        match index {
            i if i < len => self.items[i] = node.into(),
            i if i == len => self.items.push(node.into()),
            _ => return Err(Error::index_out_of_bounds(index, len)),
        }
        Ok(())
    }

    /// Removes and returns the element at `index`, shifting later elements.
    pub fn remove(&mut self, index: usize) -> Option<TomlNode> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Removes the first element equal to `node`.
    pub fn remove_node(&mut self, node: &TomlNode) -> Option<TomlNode> {
        let index = self.items.iter().position(|candidate| candidate == node)?;
        Some(self.items.remove(index))
    }

    /// Returns a handle to the slot at `index`, whether or not it exists.
    pub fn entry(&mut self, index: usize) -> LazyNode<'_> {
        LazyNode::for_index(self, index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TomlNode> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, TomlNode> {
        self.items.iter_mut()
    }
}

impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl From<Vec<TomlNode>> for Array {
    fn from(items: Vec<TomlNode>) -> Self {
        Array {
            items,
            ..Default::default()
        }
    }
}

impl<V: Into<TomlNode>> FromIterator<V> for Array {
    fn from_iter<T: IntoIterator<Item = V>>(iter: T) -> Self {
        Array::from(iter.into_iter().map(Into::into).collect::<Vec<_>>())
    }
}

impl<V: Into<TomlNode>> Extend<V> for Array {
    fn extend<T: IntoIterator<Item = V>>(&mut self, iter: T) {
        self.items.extend(iter.into_iter().map(Into::into));
    }
}

impl IntoIterator for Array {
    type Item = TomlNode;
    type IntoIter = std::vec::IntoIter<TomlNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a TomlNode;
    type IntoIter = std::slice::Iter<'a, TomlNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_within_and_at_end() {
        let mut array: Array = [1, 2].into_iter().collect();
        array.set(0, 10).unwrap();
        array.set(2, 30).unwrap();
        let values: Vec<_> = array.iter().filter_map(TomlNode::as_integer).collect();
        assert_eq!(values, vec![10, 2, 30]);
    }

    #[test]
    fn test_set_past_end_fails() {
        let mut array = Array::new();
        let err = array.set(1, "gap").unwrap_err();
        assert!(matches!(err, Error::IndexOutOfBounds { index: 1, len: 0 }));
        assert!(array.is_empty());
    }

    #[test]
    fn test_extend_and_remove() {
        let mut array = Array::new();
        array.extend(["a", "b", "c"]);
        assert_eq!(array.len(), 3);
        assert_eq!(array.remove(1).and_then(|n| n.as_str().map(String::from)), Some("b".into()));
        assert!(array.remove(5).is_none());
        assert!(array.remove_node(&TomlNode::from("c")).is_some());
        assert!(array.has_item_at(0));
        assert!(!array.has_item_at(1));
    }

    #[test]
    fn test_equality_ignores_flags() {
        let mut first: Array = [true].into_iter().collect();
        first.set_multiline(true);
        let second: Array = [true].into_iter().collect();
        assert_eq!(first, second);
    }
}
