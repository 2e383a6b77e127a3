//! Deserialize impls for the transfer representation.
//!
//! These rebuild a tree from whatever the renderer sends back, so they
//! re-validate the structural invariants: duplicate compound keys and
//! mismatched or End-typed list elements are rejected, exactly as the
//! binary decoder rejects them. No JSON input can produce a tree the rest
//! of the crate would refuse to encode.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, EnumAccess, SeqAccess, VariantAccess, Visitor};

use super::{Compound, List, Value};
use crate::Tag;

const VARIANTS: &[&str] = &[
    "end",
    "byte",
    "short",
    "int",
    "long",
    "float",
    "double",
    "byte_array",
    "string",
    "list",
    "compound",
    "int_array",
];

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ValueVis;

        impl<'de> Visitor<'de> for ValueVis {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a tag kind name mapped to its payload")
            }

            fn visit_enum<A>(self, data: A) -> Result<Self::Value, A::Error>
            where
                A: EnumAccess<'de>,
            {
                let (tag, variant) = data.variant::<Tag>()?;
                Ok(match tag {
                    Tag::End => return Err(de::Error::custom("end carries no value")),
                    Tag::Byte => Value::Byte(variant.newtype_variant()?),
                    Tag::Short => Value::Short(variant.newtype_variant()?),
                    Tag::Int => Value::Int(variant.newtype_variant()?),
                    Tag::Long => Value::Long(variant.newtype_variant()?),
                    Tag::Float => Value::Float(variant.newtype_variant()?),
                    Tag::Double => Value::Double(variant.newtype_variant()?),
                    Tag::ByteArray => Value::ByteArray(variant.newtype_variant()?),
                    Tag::String => Value::String(variant.newtype_variant()?),
                    Tag::List => Value::List(variant.newtype_variant()?),
                    Tag::Compound => Value::Compound(variant.newtype_variant()?),
                    Tag::IntArray => Value::IntArray(variant.newtype_variant()?),
                })
            }
        }

        deserializer.deserialize_enum("Value", VARIANTS, ValueVis)
    }
}

impl<'de> Deserialize<'de> for Compound {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CompoundVis;

        impl<'de> Visitor<'de> for CompoundVis {
            type Value = Compound;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a sequence of [key, value] pairs")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut compound = Compound::new();
                while let Some((key, value)) = seq.next_element::<(String, Value)>()? {
                    compound.insert(key, value).map_err(de::Error::custom)?;
                }
                Ok(compound)
            }
        }

        deserializer.deserialize_seq(CompoundVis)
    }
}

impl<'de> Deserialize<'de> for List {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Raw {
            element_tag: Tag,
            elements: Vec<Value>,
        }

        let raw = Raw::deserialize(deserializer)?;
        if raw.element_tag == Tag::End && !raw.elements.is_empty() {
            return Err(de::Error::custom("a non-empty list cannot hold end tags"));
        }
        for element in &raw.elements {
            if element.tag() != raw.element_tag {
                return Err(de::Error::custom(format!(
                    "list declares {} elements but holds a {}",
                    raw.element_tag,
                    element.tag()
                )));
            }
        }
        Ok(List {
            element_tag: raw.element_tag,
            elements: raw.elements,
        })
    }
}
