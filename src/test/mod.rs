use std::convert::TryFrom;

use crate::Tag;

pub mod builder;


#[allow(clippy::float_cmp)]
mod value;

macro_rules! check_tags {
    {$($tag:ident = $val:literal),* $(,)?} => {
        $(
            assert_eq!(u8::from(Tag::$tag), $val);
        )*
    };
}

#[test]
fn exhaustive_tag_check() {
    check_tags! {
        End = 0,
        Byte = 1,
        Short = 2,
        Int = 3,
        Long = 4,
        Float = 5,
        Double = 6,
        ByteArray = 7,
        String = 8,
        List = 9,
        Compound = 10,
        IntArray = 11,
    }

    // No LongArray in this dialect: everything from 12 up is invalid.
    for value in 12..=u8::MAX {
        assert!(Tag::try_from(value).is_err())
    }
}
