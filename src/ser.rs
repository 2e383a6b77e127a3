//! Binary encoding: a [`Compound`] tree in, NBT bytes out.
//!
//! The writer mirrors the decode grammar exactly and performs no
//! normalization, so `to_bytes(&from_bytes(data)?)` reproduces
//! well-formed input byte for byte. The root is written as a bare
//! sequence of named tags with no trailing `End` — the top level is an
//! unterminated compound on the wire.

use std::convert::TryInto;
use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

use crate::error::{Error, Result};
use crate::value::MAX_STRING_BYTES;
use crate::{Compound, Tag, Value};

/// Encode a root compound into uncompressed NBT bytes.
pub fn to_bytes(root: &Compound) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    to_writer(&mut out, root)?;
    Ok(out)
}

/// Encode a root compound to a writer.
pub fn to_writer<W: Write>(mut writer: W, root: &Compound) -> Result<()> {
    for (key, value) in root.iter() {
        write_named(&mut writer, key, value)?;
    }
    Ok(())
}

pub(crate) trait WriteNbt: Write {
    fn write_tag(&mut self, tag: Tag) -> Result<()> {
        self.write_u8(tag as u8)?;
        Ok(())
    }

    fn write_size_prefixed_str(&mut self, s: &str) -> Result<()> {
        if s.len() > MAX_STRING_BYTES {
            return Err(Error::StringTooLong(s.len()));
        }
        self.write_u16::<BigEndian>(s.len() as u16)?;
        self.write_all(s.as_bytes())?;
        Ok(())
    }

    fn write_len(&mut self, len: usize) -> Result<()> {
        let len: i32 = len
            .try_into()
            .map_err(|_| Error::Encode(format!("length {} does not fit the i32 prefix", len)))?;
        self.write_i32::<BigEndian>(len)?;
        Ok(())
    }
}

impl<T> WriteNbt for T where T: Write {}

fn write_named<W: Write>(writer: &mut W, name: &str, value: &Value) -> Result<()> {
    writer.write_tag(value.tag())?;
    writer.write_size_prefixed_str(name)?;
    write_payload(writer, value)
}

fn write_payload<W: Write>(writer: &mut W, value: &Value) -> Result<()> {
    match value {
        Value::Byte(v) => writer.write_i8(*v)?,
        Value::Short(v) => writer.write_i16::<BigEndian>(*v)?,
        Value::Int(v) => writer.write_i32::<BigEndian>(*v)?,
        Value::Long(v) => writer.write_i64::<BigEndian>(*v)?,
        Value::Float(v) => writer.write_f32::<BigEndian>(*v)?,
        Value::Double(v) => writer.write_f64::<BigEndian>(*v)?,
        Value::ByteArray(data) => {
            writer.write_len(data.len())?;
            for b in data {
                writer.write_i8(*b)?;
            }
        }
        Value::String(s) => writer.write_size_prefixed_str(s)?,
        Value::List(list) => {
            writer.write_tag(list.element_tag())?;
            writer.write_len(list.len())?;
            for element in list.iter() {
                write_payload(writer, element)?;
            }
        }
        Value::Compound(compound) => {
            for (key, v) in compound.iter() {
                write_named(writer, key, v)?;
            }
            writer.write_tag(Tag::End)?;
        }
        Value::IntArray(data) => {
            writer.write_len(data.len())?;
            for i in data {
                writer.write_i32::<BigEndian>(*i)?;
            }
        }
    }
    Ok(())
}
