//! The error and result types shared by the codec, the edit operations
//! and the document session.

use std::fmt;

use crate::Tag;

/// Everything that can go wrong while decoding, encoding or editing an
/// NBT document. Failures are always reported to the caller; nothing in
/// this crate panics on malformed input or a rejected edit.
#[derive(Debug)]
pub enum Error {
    /// A kind byte outside 0..=11 where a tag kind was expected.
    InvalidTag(u8),
    /// The input ended before a declared length was satisfied.
    UnexpectedEof,
    /// A name or string payload was not valid UTF-8.
    InvalidUtf8,
    /// A negative array or list count.
    InvalidLength(i32),
    /// Both the plain and the compressed decode attempts failed. Wraps
    /// the error from the plain attempt, which is the one surfaced to
    /// the user.
    BrokenFile(Box<Error>),

    /// An I/O failure while reading or writing a document file.
    Io(std::io::Error),
    /// The tree could not be serialized, e.g. an array too long for the
    /// wire format's length prefix.
    Encode(String),

    /// The key already exists among its would-be siblings.
    DuplicateKey(String),
    /// No entry with this key in the addressed compound.
    KeyNotFound(String),
    /// No element at this index in the addressed list or array.
    IndexOutOfBounds(usize),
    /// An empty path where a value (not the root) must be addressed.
    EmptyPath,
    /// The addressed node's kind does not take the attempted edit.
    UnsupportedEdit(Tag),
    /// A numeric value outside the inclusive range of the tag kind.
    OutOfRange(Tag),
    /// Text input that does not parse as a number of the tag kind.
    InvalidNumber(String),
    /// A string whose UTF-8 encoding exceeds 65 535 bytes.
    StringTooLong(usize),
    /// Attempt to change the declared element kind of a non-empty list.
    ListNotEmpty,
    /// A value of the wrong kind: a mismatched list element, or a path
    /// step applied to a node that cannot take it.
    TagMismatch { expected: Tag, actual: Tag },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::BrokenFile(inner) => Some(inner),
            Error::Io(inner) => Some(inner),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidTag(b) => write!(f, "invalid nbt tag value: {}", b),
            Error::UnexpectedEof => f.write_str("eof: unexpectedly ran out of input"),
            Error::InvalidUtf8 => f.write_str("string payload is not valid utf-8"),
            Error::InvalidLength(n) => write!(f, "negative length: {}", n),
            Error::BrokenFile(inner) => write!(f, "[broken file] {}", inner),
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Encode(msg) => write!(f, "encode failure: {}", msg),
            Error::DuplicateKey(key) => write!(f, "key {:?} already exists", key),
            Error::KeyNotFound(key) => write!(f, "no entry with key {:?}", key),
            Error::IndexOutOfBounds(i) => write!(f, "no element at index {}", i),
            Error::EmptyPath => f.write_str("the empty path addresses the root, not a value"),
            Error::UnsupportedEdit(tag) => {
                write!(f, "a {} tag does not support this edit", tag)
            }
            Error::OutOfRange(tag) => write!(f, "value out of range for {} tag", tag),
            Error::InvalidNumber(text) => write!(f, "{:?} is not a valid number", text),
            Error::StringTooLong(len) => {
                write!(f, "string is {} bytes, the maximum is 65535", len)
            }
            Error::ListNotEmpty => {
                f.write_str("cannot change the element kind of a non-empty list")
            }
            Error::TagMismatch { expected, actual } => {
                write!(f, "expected a {} tag, found {}", expected, actual)
            }
        }
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        use Error::*;
        match (self, other) {
            (InvalidTag(a), InvalidTag(b)) => a == b,
            (UnexpectedEof, UnexpectedEof) => true,
            (InvalidUtf8, InvalidUtf8) => true,
            (InvalidLength(a), InvalidLength(b)) => a == b,
            (BrokenFile(a), BrokenFile(b)) => a == b,
            // Io errors don't compare; two encode failures match on text.
            (Encode(a), Encode(b)) => a == b,
            (DuplicateKey(a), DuplicateKey(b)) => a == b,
            (KeyNotFound(a), KeyNotFound(b)) => a == b,
            (IndexOutOfBounds(a), IndexOutOfBounds(b)) => a == b,
            (EmptyPath, EmptyPath) => true,
            (UnsupportedEdit(a), UnsupportedEdit(b)) => a == b,
            (OutOfRange(a), OutOfRange(b)) => a == b,
            (InvalidNumber(a), InvalidNumber(b)) => a == b,
            (StringTooLong(a), StringTooLong(b)) => a == b,
            (ListNotEmpty, ListNotEmpty) => true,
            (
                TagMismatch {
                    expected: a,
                    actual: b,
                },
                TagMismatch {
                    expected: c,
                    actual: d,
                },
            ) => a == c && b == d,
            _ => false,
        }
    }
}
