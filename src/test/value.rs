use serde_json::json;

use crate::error::Error;
use crate::{Compound, List, Tag, Value};

#[test]
fn compound_rejects_duplicate_keys() {
    let mut compound = Compound::new();
    compound.insert("a".to_owned(), Value::Byte(1)).unwrap();

    let err = compound.insert("a".to_owned(), Value::Byte(2)).unwrap_err();
    assert_eq!(err, Error::DuplicateKey("a".to_owned()));

    // The original entry is untouched.
    assert_eq!(compound.len(), 1);
    assert_eq!(compound.get("a"), Some(&Value::Byte(1)));
}

#[test]
fn rename_keeps_the_entry_position() {
    let mut compound = Compound::new();
    compound.insert("first".to_owned(), Value::Byte(1)).unwrap();
    compound.insert("second".to_owned(), Value::Byte(2)).unwrap();
    compound.insert("third".to_owned(), Value::Byte(3)).unwrap();

    compound.rename("second", "middle").unwrap();

    let keys: Vec<_> = compound.keys().collect();
    assert_eq!(keys, vec!["first", "middle", "third"]);
    assert_eq!(compound.get("middle"), Some(&Value::Byte(2)));
}

#[test]
fn rename_to_a_sibling_key_is_rejected() {
    let mut compound = Compound::new();
    compound.insert("a".to_owned(), Value::Byte(1)).unwrap();
    compound.insert("b".to_owned(), Value::Byte(2)).unwrap();

    assert_eq!(
        compound.rename("a", "b").unwrap_err(),
        Error::DuplicateKey("b".to_owned())
    );
    // Renaming to the current key is a no-op, not a duplicate.
    compound.rename("a", "a").unwrap();
}

#[test]
fn rename_of_a_missing_key() {
    let mut compound = Compound::new();
    assert_eq!(
        compound.rename("ghost", "real").unwrap_err(),
        Error::KeyNotFound("ghost".to_owned())
    );
}

#[test]
fn move_entry_reorders() {
    let mut compound = Compound::new();
    for key in ["a", "b", "c", "d"] {
        compound.insert(key.to_owned(), Value::Byte(0)).unwrap();
    }

    compound.move_entry(3, 0).unwrap();
    let keys: Vec<_> = compound.keys().collect();
    assert_eq!(keys, vec!["d", "a", "b", "c"]);

    assert_eq!(
        compound.move_entry(9, 0).unwrap_err(),
        Error::IndexOutOfBounds(9)
    );
}

#[test]
fn empty_list_adopts_the_first_element_kind() {
    let mut list = List::new(Tag::End);
    list.push(Value::Int(1)).unwrap();
    assert_eq!(list.element_tag(), Tag::Int);

    let err = list.push(Value::Byte(1)).unwrap_err();
    assert_eq!(
        err,
        Error::TagMismatch {
            expected: Tag::Int,
            actual: Tag::Byte,
        }
    );
    assert_eq!(list.len(), 1);
}

#[test]
fn element_kind_is_locked_while_non_empty() {
    let mut list = List::new(Tag::String);
    list.push(Value::String("a".to_owned())).unwrap();

    assert_eq!(
        list.set_element_tag(Tag::Int).unwrap_err(),
        Error::ListNotEmpty
    );

    list.remove(0).unwrap();
    list.set_element_tag(Tag::Int).unwrap();
    assert_eq!(list.element_tag(), Tag::Int);
}

#[test]
fn list_set_checks_the_element_kind() {
    let mut list = List::new(Tag::End);
    list.push(Value::Short(1)).unwrap();

    assert!(list.set(0, Value::Int(2)).is_err());
    let old = list.set(0, Value::Short(2)).unwrap();
    assert_eq!(old, Value::Short(1));
}

#[test]
fn default_values_per_kind() {
    assert_eq!(Value::new(Tag::Byte).unwrap(), Value::Byte(0));
    assert_eq!(Value::new(Tag::String).unwrap(), Value::String(String::new()));
    assert_eq!(
        Value::new(Tag::List).unwrap().as_list().unwrap().element_tag(),
        Tag::End
    );
    assert_eq!(Value::new(Tag::End).unwrap_err(), Error::InvalidTag(0));
}

#[test]
fn tag_names_in_the_transfer_representation() {
    assert_eq!(serde_json::to_string(&Tag::ByteArray).unwrap(), "\"byte_array\"");
    assert_eq!(serde_json::from_str::<Tag>("\"int\"").unwrap(), Tag::Int);
}

#[test]
fn value_transfer_shapes() {
    assert_eq!(serde_json::to_value(Value::Byte(5)).unwrap(), json!({"byte": 5}));
    assert_eq!(
        serde_json::to_value(Value::ByteArray(vec![1, -2])).unwrap(),
        json!({"byte_array": [1, -2]})
    );

    let mut list = List::new(Tag::Int);
    list.push(Value::Int(7)).unwrap();
    assert_eq!(
        serde_json::to_value(Value::List(list)).unwrap(),
        json!({"list": {"element_tag": "int", "elements": [{"int": 7}]}})
    );

    let mut compound = Compound::new();
    compound.insert("k".to_owned(), Value::Long(-1)).unwrap();
    assert_eq!(
        serde_json::to_value(Value::Compound(compound)).unwrap(),
        json!({"compound": [["k", {"long": -1}]]})
    );
}

#[test]
fn transfer_round_trip() {
    let mut inner = Compound::new();
    inner
        .insert("name".to_owned(), Value::String("Steve".to_owned()))
        .unwrap();
    inner.insert("xp".to_owned(), Value::Float(3.5)).unwrap();

    let mut list = List::new(Tag::End);
    list.push(Value::Long(1)).unwrap();
    list.push(Value::Long(2)).unwrap();

    let mut root = Compound::new();
    root.insert("player".to_owned(), Value::Compound(inner)).unwrap();
    root.insert("seeds".to_owned(), Value::List(list)).unwrap();
    root.insert("grid".to_owned(), Value::IntArray(vec![-1, 0, 1]))
        .unwrap();

    let text = serde_json::to_string(&root).unwrap();
    let back: Compound = serde_json::from_str(&text).unwrap();
    assert_eq!(back, root);
}

#[test]
fn transfer_rejects_duplicate_keys() {
    let text = r#"[["a", {"byte": 1}], ["a", {"byte": 2}]]"#;
    assert!(serde_json::from_str::<Compound>(text).is_err());
}

#[test]
fn transfer_rejects_mixed_lists() {
    let text = r#"{"element_tag": "int", "elements": [{"int": 1}, {"byte": 2}]}"#;
    assert!(serde_json::from_str::<List>(text).is_err());

    let empty = r#"{"element_tag": "end", "elements": []}"#;
    assert_eq!(serde_json::from_str::<List>(empty).unwrap(), List::new(Tag::End));
}

#[test]
fn transfer_rejects_non_empty_end_lists() {
    let text = r#"{"element_tag": "end", "elements": [{"byte": 1}]}"#;
    assert!(serde_json::from_str::<List>(text).is_err());
}
