use proptest::prelude::*;
use toml_tree::{
    escape, escape_with, parse, to_string, unescape, Array, IntegerBase, Table, TomlInteger,
    TomlNode,
};

fn key() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_ .-]{1,8}"
}

fn leaf() -> impl Strategy<Value = TomlNode> {
    prop_oneof![
        any::<i64>().prop_map(TomlNode::from),
        any::<f64>()
            .prop_filter("finite floats only", |f| f.is_finite())
            .prop_map(TomlNode::from),
        any::<bool>().prop_map(TomlNode::from),
        any::<String>().prop_map(TomlNode::from),
    ]
}

fn table_from(entries: Vec<(String, TomlNode)>, inline: bool) -> Table {
    let mut table = if inline {
        Table::new_inline()
    } else {
        Table::new()
    };
    for (key, node) in entries {
        table.insert(key, node);
    }
    table
}

/// Values that can appear on the right of `=`.
fn value() -> impl Strategy<Value = TomlNode> {
    leaf().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(TomlNode::from),
            prop::collection::vec((key(), inner), 0..4)
                .prop_map(|entries| TomlNode::from(table_from(entries, true))),
        ]
    })
}

/// Tables written as sections, with nested sections and table arrays.
fn section() -> impl Strategy<Value = Table> {
    let flat = prop::collection::vec((key(), value()), 0..4)
        .prop_map(|entries| table_from(entries, false));

    flat.prop_recursive(2, 16, 3, |inner| {
        (
            prop::collection::vec((key(), value()), 0..3),
            prop::collection::vec((key(), inner.clone()), 0..3),
            prop::collection::vec((key(), prop::collection::vec(inner, 1..3)), 0..2),
        )
            .prop_map(|(values, tables, arrays)| {
                let mut table = table_from(values, false);
                for (key, sub) in tables {
                    table.insert(key, sub);
                }
                for (key, elements) in arrays {
                    let mut array = Array::new_table_array();
                    for element in elements {
                        array.push(element);
                    }
                    table.insert(key, array);
                }
                table
            })
    })
}

proptest! {
    #[test]
    fn prop_written_tree_parses_back(table in section()) {
        let text = to_string(&table).unwrap();
        let parsed = parse(&text);
        prop_assert!(parsed.is_ok(), "failed to reparse:\n{}\n{:?}", text, parsed.err());
        prop_assert_eq!(parsed.unwrap(), table);
    }

    #[test]
    fn prop_writing_is_stable(table in section()) {
        let once = to_string(&table).unwrap();
        let twice = to_string(&parse(&once).unwrap()).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_escape_then_unescape(text in any::<String>()) {
        prop_assert_eq!(unescape(&escape(&text)).unwrap(), text.clone());
        prop_assert_eq!(unescape(&escape_with(&text, true, true)).unwrap(), text);
    }

    #[test]
    fn prop_force_ascii_output_is_ascii(text in any::<String>()) {
        prop_assert!(escape_with(&text, true, true).is_ascii());
    }

    #[test]
    fn prop_integer_bases_keep_value(value in any::<i64>(), base in 0usize..4) {
        let base = [
            IntegerBase::Binary,
            IntegerBase::Octal,
            IntegerBase::Decimal,
            IntegerBase::Hexadecimal,
        ][base];
        let mut table = Table::new();
        table.insert("n", TomlInteger::with_base(value, base));

        let parsed = parse(&to_string(&table).unwrap()).unwrap();
        prop_assert_eq!(parsed.get("n").and_then(TomlNode::as_integer), Some(value));
    }
}
