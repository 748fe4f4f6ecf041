/// Builds a [`TomlNode`](crate::TomlNode) from TOML-like literal syntax.
///
/// Tables use `"key" = value` pairs, arrays use `[ ... ]`, and anything
/// else is converted with `TomlNode::from`. Negative numbers and other
/// multi-token expressions inside a table or array need parentheses.
///
/// ```rust
/// use toml_tree::{toml, TomlNode};
///
/// let node = toml!({
///     "name" = "Tom",
///     "ports" = [8000, 8001, (-1)],
///     "owner" = { "active" = true }
/// });
///
/// assert_eq!(node.get("name").and_then(TomlNode::as_str), Some("Tom"));
/// assert_eq!(node.get("ports").map(TomlNode::children_count), Some(3));
/// ```
#[macro_export]
macro_rules! toml {
    ([]) => {
        $crate::TomlNode::Array($crate::Array::new())
    };

    ([ $($elem:tt),* $(,)? ]) => {{
        let mut array = $crate::Array::new();
        $(
            array.push($crate::toml!($elem));
        )*
        $crate::TomlNode::Array(array)
    }};

    ({}) => {
        $crate::TomlNode::Table($crate::Table::new())
    };

    ({ $($key:literal = $value:tt),* $(,)? }) => {{
        let mut table = $crate::Table::new();
        $(
            table.insert($key, $crate::toml!($value));
        )*
        $crate::TomlNode::Table(table)
    }};

    ($value:expr) => {
        $crate::TomlNode::from($value)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Table, TomlNode};

    #[test]
    fn test_toml_macro_scalars() {
        assert_eq!(toml!(true), TomlNode::from(true));
        assert_eq!(toml!(42).as_integer(), Some(42));
        assert_eq!(toml!(3.5).as_float(), Some(3.5));
        assert_eq!(toml!("hello").as_str(), Some("hello"));
    }

    #[test]
    fn test_toml_macro_containers() {
        assert_eq!(toml!({}), TomlNode::Table(Table::new()));
        assert_eq!(toml!([]).children_count(), 0);

        let node = toml!({ "a" = [1, [2, 3]], "b" = { "c" = "d" } });
        assert_eq!(
            node.get("a").and_then(|a| a.get_index(1)).map(TomlNode::children_count),
            Some(2)
        );
        assert_eq!(
            node.get("b").and_then(|b| b.get("c")).and_then(TomlNode::as_str),
            Some("d")
        );
    }
}
