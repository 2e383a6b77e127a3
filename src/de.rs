//! Binary decoding: NBT bytes in, a [`Compound`] tree out.
//!
//! The decoder is a single synchronous pass over an in-memory buffer —
//! no streaming, no suspension. Multi-byte scalars are big-endian. A
//! failed decode never yields a partial tree.
//!
//! Compressed files are handled by [`from_bytes_auto`], which mirrors how
//! editors detect compression on this format: there is no magic-byte
//! sniff, just an ordered retry. The plain attempt's error is the one
//! reported when everything fails, wrapped as [`Error::BrokenFile`].

use std::convert::TryFrom;
use std::io::Write;
use std::ops::Range;

use byteorder::{BigEndian, ReadBytesExt};

use crate::error::{Error, Result};
use crate::{Compound, List, Tag, Value};

/// Decode an uncompressed NBT byte stream.
///
/// The top level is a sequence of named tags read until the input runs
/// out; an `End` byte there terminates the sequence. Duplicate keys, at
/// the top level or in any nested compound, are an error rather than a
/// silent overwrite.
pub fn from_bytes(input: &[u8]) -> Result<Compound> {
    let mut input = InputHelper(input);
    let mut root = Compound::new();

    while !input.0.is_empty() {
        let tag = input.consume_tag()?;
        if tag == Tag::End {
            break;
        }
        let name = input.consume_size_prefixed_string()?;
        let value = read_payload(&mut input, tag)?;
        root.insert(name, value)?;
    }

    Ok(root)
}

/// Decode a stream that may be plain, zlib-wrapped or gzip-wrapped.
///
/// Returns the tree and whether decompression was needed, so a caller
/// can write the file back the way it found it. When every attempt
/// fails, the error from the *plain* attempt is surfaced — the
/// compression layer's complaints are not useful to someone whose file
/// is simply broken.
pub fn from_bytes_auto(input: &[u8]) -> Result<(Compound, bool)> {
    let plain_err = match from_bytes(input) {
        Ok(root) => return Ok((root, false)),
        Err(e) => e,
    };

    if let Ok(data) = inflate_zlib(input) {
        if let Ok(root) = from_bytes(&data) {
            return Ok((root, true));
        }
    }

    if let Ok(data) = inflate_gzip(input) {
        if let Ok(root) = from_bytes(&data) {
            return Ok((root, true));
        }
    }

    Err(Error::BrokenFile(Box::new(plain_err)))
}

fn inflate_zlib(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = flate2::write::ZlibDecoder::new(vec![]);
    decoder.write_all(data)?;
    Ok(decoder.finish()?)
}

fn inflate_gzip(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = flate2::write::GzDecoder::new(vec![]);
    decoder.write_all(data)?;
    Ok(decoder.finish()?)
}

/// Cursor over the remaining input. Consuming a range either yields
/// exactly those bytes or fails with [`Error::UnexpectedEof`]; there is
/// no way to read past a declared length.
struct InputHelper<'de>(&'de [u8]);

impl<'de> InputHelper<'de> {
    fn consume(&mut self, r: Range<usize>) -> Result<&'de [u8]> {
        if r.end <= self.0.len() {
            let ret = &self.0[r.start..r.end];
            self.0 = &self.0[r.end..];
            Ok(ret)
        } else {
            Err(Error::UnexpectedEof)
        }
    }

    fn consume_tag(&mut self) -> Result<Tag> {
        let b = self.consume(0..1)?[0];
        Tag::try_from(b).map_err(|_| Error::InvalidTag(b))
    }

    fn consume_i8(&mut self) -> Result<i8> {
        Ok(self.consume(0..1)?[0] as i8)
    }

    fn consume_i16(&mut self) -> Result<i16> {
        Ok(self.consume(0..2)?.read_i16::<BigEndian>()?)
    }

    fn consume_i32(&mut self) -> Result<i32> {
        Ok(self.consume(0..4)?.read_i32::<BigEndian>()?)
    }

    fn consume_i64(&mut self) -> Result<i64> {
        Ok(self.consume(0..8)?.read_i64::<BigEndian>()?)
    }

    fn consume_f32(&mut self) -> Result<f32> {
        Ok(self.consume(0..4)?.read_f32::<BigEndian>()?)
    }

    fn consume_f64(&mut self) -> Result<f64> {
        Ok(self.consume(0..8)?.read_f64::<BigEndian>()?)
    }

    fn consume_size_prefixed_string(&mut self) -> Result<String> {
        let len = self.consume(0..2)?.read_u16::<BigEndian>()? as usize;
        let bytes = self.consume(0..len)?;
        match std::str::from_utf8(bytes) {
            Ok(s) => Ok(s.to_owned()),
            Err(_) => Err(Error::InvalidUtf8),
        }
    }

    /// An i32 element count. Negative counts are malformed input, not a
    /// huge unsigned length.
    fn consume_count(&mut self) -> Result<usize> {
        let n = self.consume_i32()?;
        if n < 0 {
            return Err(Error::InvalidLength(n));
        }
        Ok(n as usize)
    }
}

fn read_payload(input: &mut InputHelper, tag: Tag) -> Result<Value> {
    Ok(match tag {
        // Callers consume End before dispatching a payload read.
        Tag::End => return Err(Error::InvalidTag(Tag::End.into())),
        Tag::Byte => Value::Byte(input.consume_i8()?),
        Tag::Short => Value::Short(input.consume_i16()?),
        Tag::Int => Value::Int(input.consume_i32()?),
        Tag::Long => Value::Long(input.consume_i64()?),
        Tag::Float => Value::Float(input.consume_f32()?),
        Tag::Double => Value::Double(input.consume_f64()?),
        Tag::ByteArray => {
            let n = input.consume_count()?;
            let bytes = input.consume(0..n)?;
            Value::ByteArray(bytes.iter().map(|b| *b as i8).collect())
        }
        Tag::String => Value::String(input.consume_size_prefixed_string()?),
        Tag::List => {
            let element_tag = input.consume_tag()?;
            let n = input.consume_count()?;

            // An empty list may declare End as its element kind; a
            // non-empty one may not, since End has no payload grammar.
            if element_tag == Tag::End && n != 0 {
                return Err(Error::InvalidTag(Tag::End.into()));
            }

            let mut list = List::new(element_tag);
            for _ in 0..n {
                let element = read_payload(input, element_tag)?;
                list.push(element)?;
            }
            Value::List(list)
        }
        Tag::Compound => {
            let mut compound = Compound::new();
            loop {
                let tag = input.consume_tag()?;
                if tag == Tag::End {
                    break;
                }
                let name = input.consume_size_prefixed_string()?;
                let value = read_payload(input, tag)?;
                compound.insert(name, value)?;
            }
            Value::Compound(compound)
        }
        Tag::IntArray => {
            let n = input.consume_count()?;
            let byte_len = n
                .checked_mul(std::mem::size_of::<i32>())
                .ok_or(Error::UnexpectedEof)?;
            let bytes = input.consume(0..byte_len)?;
            Value::IntArray(
                bytes
                    .chunks_exact(4)
                    .map(|c| i32::from_be_bytes([c[0], c[1], c[2], c[3]]))
                    .collect(),
            )
        }
    })
}
