//! Deserialization of parsed trees into Rust types.
//!
//! [`Deserializer`] walks an owned [`TomlNode`] and feeds it to serde
//! visitors. Tables become maps and structs, arrays become sequences, and
//! date-times are handed over as their TOML text so they can be read into a
//! `String` or any type that parses one.
//!
//! ```rust
//! use serde::Deserialize;
//! use toml_tree::from_str;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Server { host: String, port: u16, tags: Vec<String> }
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Config { server: Server, debug: Option<bool> }
//!
//! let config: Config = from_str("[server]\nhost = \"a\"\nport = 80\ntags = [\"x\"]\n").unwrap();
//! assert_eq!(config.server.port, 80);
//! assert_eq!(config.debug, None);
//! ```

use crate::array::Array;
use crate::table::Table;
use crate::value::TomlNode;
use crate::{Error, Result};
use serde::de::IntoDeserializer;
use serde::{de, forward_to_deserialize_any};

/// A serde deserializer over one node.
pub struct Deserializer {
    node: TomlNode,
}

impl Deserializer {
    #[must_use]
    pub fn new(node: TomlNode) -> Self {
        Deserializer { node }
    }
}

impl<'de> de::Deserializer<'de> for Deserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.node {
            TomlNode::Table(table) => visitor.visit_map(MapDeserializer::new(table)),
            TomlNode::Array(array) => visitor.visit_seq(SeqDeserializer::new(array)),
            TomlNode::String(s) => visitor.visit_string(s.value),
            TomlNode::Integer(i) => visitor.visit_i64(i.value),
            TomlNode::Float(f) => visitor.visit_f64(f.value),
            TomlNode::Boolean(b) => visitor.visit_bool(b.value),
            TomlNode::DateTimeLocal(d) => visitor.visit_string(d.to_inline_toml()),
            TomlNode::DateTimeOffset(d) => visitor.visit_string(d.to_inline_toml()),
        }
    }

    // A present node always means `Some`; missing keys are handled by serde
    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.node {
            TomlNode::String(s) => visitor.visit_enum(s.value.into_deserializer()),
            TomlNode::Table(table) if table.len() == 1 => {
                let Some((variant, value)) = table.into_iter().next() else {
                    return Err(Error::custom("enum table has no variant"));
                };
                visitor.visit_enum(EnumDeserializer::new(variant, value))
            }
            other => Err(Error::type_mismatch(
                "string or single-key table for enum",
                other.kind(),
            )),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<TomlNode>,
}

impl SeqDeserializer {
    fn new(array: Array) -> Self {
        SeqDeserializer {
            iter: array.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(node) => seed.deserialize(Deserializer::new(node)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, TomlNode>,
    value: Option<TomlNode>,
}

impl MapDeserializer {
    fn new(table: Table) -> Self {
        MapDeserializer {
            iter: table.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, node)) => {
                self.value = Some(node);
                seed.deserialize(key.into_deserializer()).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(node) => seed.deserialize(Deserializer::new(node)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct EnumDeserializer {
    variant: String,
    value: TomlNode,
}

impl EnumDeserializer {
    fn new(variant: String, value: TomlNode) -> Self {
        EnumDeserializer { variant, value }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let key = IntoDeserializer::<Error>::into_deserializer(self.variant);
        let variant = seed.deserialize(key)?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: TomlNode,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            TomlNode::Table(t) if t.is_empty() => Ok(()),
            other => Err(Error::type_mismatch("unit variant", other.kind())),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(Deserializer::new(self.value))
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            TomlNode::Array(array) => visitor.visit_seq(SeqDeserializer::new(array)),
            other => Err(Error::type_mismatch("array for tuple variant", other.kind())),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            TomlNode::Table(table) => visitor.visit_map(MapDeserializer::new(table)),
            other => Err(Error::type_mismatch("table for struct variant", other.kind())),
        }
    }
}

/// Deserializes a `T` out of `node`.
///
/// # Errors
///
/// Returns the error raised by `T`'s `Deserialize` impl when the tree does
/// not have the expected shape.
pub fn from_node<T>(node: TomlNode) -> Result<T>
where
    T: de::DeserializeOwned,
{
    T::deserialize(Deserializer::new(node))
}
