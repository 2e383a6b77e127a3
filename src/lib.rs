//! nbtedit is the reusable core of an NBT editor: a typed tree of NBT
//! values, a byte-exact big-endian binary codec with compression
//! auto-detection, and edit operations that keep a tree valid while a UI
//! mutates it.
//!
//! The crate deliberately contains no user interface. A frontend hands it
//! file bytes and gets back a [`Document`]; it addresses nodes with paths
//! of [`edit::Step`]s and applies edits through the document, which tracks
//! a modification counter for the usual "unsaved changes" prompt.
//!
//! ```toml
//! [dependencies]
//! nbtedit = "0.4"
//! ```
//!
//! # Quick example
//!
//! Decode a buffer holding a compound with a single byte entry, change the
//! value, and encode it again:
//!
//! ```
//! use nbtedit::edit::Step;
//! use nbtedit::{de, ser};
//! # use nbtedit::error::Result;
//! #
//! # fn main() -> Result<()> {
//! let buf = [0x0a, 0x00, 0x00, 0x01, 0x00, 0x01, b'x', 0x7f, 0x00];
//!
//! let mut root = de::from_bytes(&buf)?;
//! let path = [Step::key(""), Step::key("x")];
//! nbtedit::edit::set_scalar(&mut root, &path, "-5")?;
//!
//! let out = ser::to_bytes(&root)?;
//! assert_eq!(out[7], 0xfb);
//! # Ok(())
//! # }
//! ```
//!
//! Frontends that own their file IO can stay on [`de::from_bytes_auto`]
//! and [`ser::to_bytes`]; [`Document`] adds the path, compression flag and
//! modification counter on top.
//!
//! This dialect of NBT has no LongArray: tag ids run 0 to 11 and anything
//! above is rejected at decode time.

use serde::{Deserialize, Serialize};

pub mod de;
pub mod doc;
pub mod edit;
pub mod error;
pub mod ser;

mod value;
pub use value::*;

pub use doc::Document;

#[cfg(test)]
mod test;

use std::convert::TryFrom;
use std::fmt;

/// An NBT tag kind. This carries neither the value nor the name of the
/// data.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Tag {
    /// Terminates a Compound's entries. Never a value of its own.
    End = 0,
    /// Equivalent to i8.
    Byte = 1,
    /// Equivalent to i16.
    Short = 2,
    /// Equivalent to i32.
    Int = 3,
    /// Equivalent to i64.
    Long = 4,
    /// Equivalent to f32.
    Float = 5,
    /// Equivalent to f64.
    Double = 6,
    /// An array of Byte (i8).
    ByteArray = 7,
    /// A length-prefixed UTF-8 string of at most 65 535 bytes.
    String = 8,
    /// An ordered sequence of unnamed values sharing one declared kind.
    List = 9,
    /// An ordered sequence of uniquely named values.
    Compound = 10,
    /// An array of Int (i32).
    IntArray = 11,
}

// Crates exist to generate these conversions, but the set of tags is fixed
// by the wire format, so writing them out keeps the dependency tree and
// compile times down.
impl TryFrom<u8> for Tag {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        use Tag::*;
        Ok(match value {
            0 => End,
            1 => Byte,
            2 => Short,
            3 => Int,
            4 => Long,
            5 => Float,
            6 => Double,
            7 => ByteArray,
            8 => String,
            9 => List,
            10 => Compound,
            11 => IntArray,
            12..=u8::MAX => return Err(()),
        })
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        match tag {
            Tag::End => 0,
            Tag::Byte => 1,
            Tag::Short => 2,
            Tag::Int => 3,
            Tag::Long => 4,
            Tag::Float => 5,
            Tag::Double => 6,
            Tag::ByteArray => 7,
            Tag::String => 8,
            Tag::List => 9,
            Tag::Compound => 10,
            Tag::IntArray => 11,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tag::End => "end",
            Tag::Byte => "byte",
            Tag::Short => "short",
            Tag::Int => "int",
            Tag::Long => "long",
            Tag::Float => "float",
            Tag::Double => "double",
            Tag::ByteArray => "byte_array",
            Tag::String => "string",
            Tag::List => "list",
            Tag::Compound => "compound",
            Tag::IntArray => "int_array",
        })
    }
}
