//! Serialize impls for the transfer representation.
//!
//! This is how an editor shell ships a tree to its renderer process: the
//! value is externally tagged by kind name, compound entries stay an
//! ordered sequence of `[key, value]` pairs, and a list carries its
//! declared element kind alongside the elements.

use serde::ser::{Serialize, SerializeSeq, SerializeStruct, Serializer};

use super::{Compound, List, Value};

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Byte(v) => serializer.serialize_newtype_variant("Value", 1, "byte", v),
            Value::Short(v) => serializer.serialize_newtype_variant("Value", 2, "short", v),
            Value::Int(v) => serializer.serialize_newtype_variant("Value", 3, "int", v),
            Value::Long(v) => serializer.serialize_newtype_variant("Value", 4, "long", v),
            Value::Float(v) => serializer.serialize_newtype_variant("Value", 5, "float", v),
            Value::Double(v) => serializer.serialize_newtype_variant("Value", 6, "double", v),
            Value::ByteArray(v) => {
                serializer.serialize_newtype_variant("Value", 7, "byte_array", v)
            }
            Value::String(v) => serializer.serialize_newtype_variant("Value", 8, "string", v),
            Value::List(v) => serializer.serialize_newtype_variant("Value", 9, "list", v),
            Value::Compound(v) => {
                serializer.serialize_newtype_variant("Value", 10, "compound", v)
            }
            Value::IntArray(v) => {
                serializer.serialize_newtype_variant("Value", 11, "int_array", v)
            }
        }
    }
}

impl Serialize for Compound {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            seq.serialize_element(&(key, value))?;
        }
        seq.end()
    }
}

impl Serialize for List {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("List", 2)?;
        state.serialize_field("element_tag", &self.element_tag)?;
        state.serialize_field("elements", &self.elements)?;
        state.end()
    }
}
