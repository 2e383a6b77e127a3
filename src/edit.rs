//! Path-addressed edit operations.
//!
//! A frontend holds no references into the tree. It addresses nodes with
//! a path of [`Step`]s — compound keys and list indices — resolved
//! against the root on every call, so a path is cheap to rebuild after
//! any structural change and can never dangle. Every operation either
//! fully applies or returns a typed error with the tree untouched.
//!
//! Scalar edits take the UI's raw text. That is deliberate: a Long must
//! be range-checked as written, since the out-of-range values a user can
//! type do not fit any machine integer the check could run on.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::value::MAX_STRING_BYTES;
use crate::{Compound, List, Tag, Value};

/// One step from a node down to one of its children. A path is a slice
/// of these, starting at the root compound.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// A compound entry, by key.
    Key(String),
    /// A list element, by position.
    Index(usize),
}

impl Step {
    pub fn key(key: impl Into<String>) -> Step {
        Step::Key(key.into())
    }

    pub fn index(index: usize) -> Step {
        Step::Index(index)
    }
}

/// Resolve a path to a node for reading.
pub fn node<'a>(root: &'a Compound, path: &[Step]) -> Result<&'a Value> {
    let (first, rest) = path.split_first().ok_or(Error::EmptyPath)?;
    let mut current = enter(root, first)?;
    for step in rest {
        current = descend(current, step)?;
    }
    Ok(current)
}

/// Resolve a path to a node for editing.
pub fn node_mut<'a>(root: &'a mut Compound, path: &[Step]) -> Result<&'a mut Value> {
    let (first, rest) = path.split_first().ok_or(Error::EmptyPath)?;
    let mut current = enter_mut(root, first)?;
    for step in rest {
        current = descend_mut(current, step)?;
    }
    Ok(current)
}

/// Rename an entry of the compound at `parent` (the empty path is the
/// root), keeping its position. Fails with [`Error::DuplicateKey`] when
/// `new` already names a sibling other than the renamed entry itself.
pub fn rename_key(root: &mut Compound, parent: &[Step], old: &str, new: &str) -> Result<()> {
    compound_mut(root, parent)?.rename(old, new)
}

/// Set a numeric scalar from text input, enforcing the kind's inclusive
/// range. Overflow of any integer kind is [`Error::OutOfRange`];
/// unparseable text is [`Error::InvalidNumber`].
pub fn set_scalar(root: &mut Compound, path: &[Step], text: &str) -> Result<()> {
    let value = node_mut(root, path)?;
    let new = match value.tag() {
        Tag::Byte => Value::Byte(parse_int(text, Tag::Byte, i8::MIN as i64, i8::MAX as i64)? as i8),
        Tag::Short => {
            Value::Short(parse_int(text, Tag::Short, i16::MIN as i64, i16::MAX as i64)? as i16)
        }
        Tag::Int => Value::Int(parse_int(text, Tag::Int, i32::MIN as i64, i32::MAX as i64)? as i32),
        Tag::Long => Value::Long(parse_int(text, Tag::Long, i64::MIN, i64::MAX)?),
        Tag::Float => Value::Float(parse_float(text, Tag::Float, f32::MAX as f64)? as f32),
        Tag::Double => Value::Double(parse_float(text, Tag::Double, f64::MAX)?),
        other => return Err(Error::UnsupportedEdit(other)),
    };
    *value = new;
    Ok(())
}

/// Set a string value. The wire format caps strings at 65 535 UTF-8
/// bytes, counted in bytes, not characters.
pub fn set_string(root: &mut Compound, path: &[Step], text: &str) -> Result<()> {
    let value = node_mut(root, path)?;
    match value {
        Value::String(s) => {
            if text.len() > MAX_STRING_BYTES {
                return Err(Error::StringTooLong(text.len()));
            }
            *s = text.to_owned();
            Ok(())
        }
        other => Err(Error::UnsupportedEdit(other.tag())),
    }
}

/// Change the declared element kind of the list at `path`. Only legal
/// while the list is empty.
pub fn set_list_element_tag(root: &mut Compound, path: &[Step], tag: Tag) -> Result<()> {
    match node_mut(root, path)? {
        Value::List(list) => list.set_element_tag(tag),
        other => Err(Error::UnsupportedEdit(other.tag())),
    }
}

/// Replace the whole backing sequence of a byte or int array. Every
/// element is validated first and nothing is applied unless all pass.
pub fn set_array_elements(root: &mut Compound, path: &[Step], values: &[i64]) -> Result<()> {
    match node_mut(root, path)? {
        Value::ByteArray(data) => {
            if values
                .iter()
                .any(|v| *v < i8::MIN as i64 || *v > i8::MAX as i64)
            {
                return Err(Error::OutOfRange(Tag::Byte));
            }
            *data = values.iter().map(|v| *v as i8).collect();
            Ok(())
        }
        Value::IntArray(data) => {
            if values
                .iter()
                .any(|v| *v < i32::MIN as i64 || *v > i32::MAX as i64)
            {
                return Err(Error::OutOfRange(Tag::Int));
            }
            *data = values.iter().map(|v| *v as i32).collect();
            Ok(())
        }
        other => Err(Error::UnsupportedEdit(other.tag())),
    }
}

/// Insert a child under `parent`: by key into a compound (duplicate
/// keys rejected), by index into a list (element kind enforced; an
/// empty list adopts the kind).
pub fn insert_child(root: &mut Compound, parent: &[Step], at: Step, value: Value) -> Result<()> {
    match at {
        Step::Key(key) => compound_mut(root, parent)?.insert(key, value),
        Step::Index(index) => list_mut(root, parent)?.insert(index, value),
    }
}

/// Remove and return the child of `parent` addressed by `at`.
pub fn remove_child(root: &mut Compound, parent: &[Step], at: &Step) -> Result<Value> {
    match at {
        Step::Key(key) => compound_mut(root, parent)?.remove(key),
        Step::Index(index) => list_mut(root, parent)?.remove(*index),
    }
}

/// Reorder a child of `parent` from position `from` to position `to`,
/// for compounds (the empty path addresses the root) and lists alike.
pub fn move_child(root: &mut Compound, parent: &[Step], from: usize, to: usize) -> Result<()> {
    if parent.is_empty() {
        return root.move_entry(from, to);
    }
    match node_mut(root, parent)? {
        Value::Compound(compound) => compound.move_entry(from, to),
        Value::List(list) => list.move_element(from, to),
        other => Err(Error::UnsupportedEdit(other.tag())),
    }
}

fn enter<'a>(root: &'a Compound, step: &Step) -> Result<&'a Value> {
    match step {
        Step::Key(key) => root
            .get(key)
            .ok_or_else(|| Error::KeyNotFound(key.clone())),
        // The root is a compound; it has no indexed elements.
        Step::Index(_) => Err(Error::TagMismatch {
            expected: Tag::List,
            actual: Tag::Compound,
        }),
    }
}

fn enter_mut<'a>(root: &'a mut Compound, step: &Step) -> Result<&'a mut Value> {
    match step {
        Step::Key(key) => root
            .get_mut(key)
            .ok_or_else(|| Error::KeyNotFound(key.clone())),
        Step::Index(_) => Err(Error::TagMismatch {
            expected: Tag::List,
            actual: Tag::Compound,
        }),
    }
}

fn descend<'a>(value: &'a Value, step: &Step) -> Result<&'a Value> {
    match (step, value) {
        (Step::Key(key), Value::Compound(compound)) => compound
            .get(key)
            .ok_or_else(|| Error::KeyNotFound(key.clone())),
        (Step::Index(index), Value::List(list)) => {
            list.get(*index).ok_or(Error::IndexOutOfBounds(*index))
        }
        (Step::Key(_), other) => Err(Error::TagMismatch {
            expected: Tag::Compound,
            actual: other.tag(),
        }),
        (Step::Index(_), other) => Err(Error::TagMismatch {
            expected: Tag::List,
            actual: other.tag(),
        }),
    }
}

fn descend_mut<'a>(value: &'a mut Value, step: &Step) -> Result<&'a mut Value> {
    match (step, value) {
        (Step::Key(key), Value::Compound(compound)) => compound
            .get_mut(key)
            .ok_or_else(|| Error::KeyNotFound(key.clone())),
        (Step::Index(index), Value::List(list)) => {
            list.get_mut(*index).ok_or(Error::IndexOutOfBounds(*index))
        }
        (Step::Key(_), other) => Err(Error::TagMismatch {
            expected: Tag::Compound,
            actual: other.tag(),
        }),
        (Step::Index(_), other) => Err(Error::TagMismatch {
            expected: Tag::List,
            actual: other.tag(),
        }),
    }
}

/// The compound addressed by `path`, where the empty path is the root.
fn compound_mut<'a>(root: &'a mut Compound, path: &[Step]) -> Result<&'a mut Compound> {
    if path.is_empty() {
        return Ok(root);
    }
    match node_mut(root, path)? {
        Value::Compound(compound) => Ok(compound),
        other => Err(Error::TagMismatch {
            expected: Tag::Compound,
            actual: other.tag(),
        }),
    }
}

fn list_mut<'a>(root: &'a mut Compound, path: &[Step]) -> Result<&'a mut List> {
    match node_mut(root, path)? {
        Value::List(list) => Ok(list),
        other => Err(Error::TagMismatch {
            expected: Tag::List,
            actual: other.tag(),
        }),
    }
}

fn parse_int(text: &str, tag: Tag, min: i64, max: i64) -> Result<i64> {
    use std::num::IntErrorKind;

    let n: i64 = match text.parse() {
        Ok(n) => n,
        Err(e) => {
            return Err(match e.kind() {
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => Error::OutOfRange(tag),
                _ => Error::InvalidNumber(text.to_owned()),
            })
        }
    };
    if n < min || n > max {
        return Err(Error::OutOfRange(tag));
    }
    Ok(n)
}

fn parse_float(text: &str, tag: Tag, max_abs: f64) -> Result<f64> {
    let v: f64 = text
        .parse()
        .map_err(|_| Error::InvalidNumber(text.to_owned()))?;
    // NaN passes; an infinite or too-large magnitude does not.
    if v.abs() > max_abs {
        return Err(Error::OutOfRange(tag));
    }
    Ok(v)
}
