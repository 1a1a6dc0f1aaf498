use pretty_assertions::assert_eq;

use super::*;
use crate::{compound, Compound, List, Tag, TagType};

const ROOT_NAME: &str = "The root name‽";

fn list(items: Vec<Tag>) -> List {
    List::try_from(items).unwrap()
}

fn example_compound() -> Compound {
    fn inner() -> Compound {
        compound! {
            "int" => i32::MIN,
            "long" => i64::MAX,
            "float" => 1e10_f32,
            "double" => f64::INFINITY,
        }
    }

    compound! {
        "byte" => 123_i8,
        "short" => -300_i16,
        "list_of_int" => list(vec![Tag::Int(3), Tag::Int(-7), Tag::Int(5)]),
        "list_of_string" => list(vec!["foo".into(), "bar".into(), "baz".into()]),
        "string" => "aé日\0🎃",
        "compound" => inner(),
        "list_of_compound" => list(vec![inner().into(), inner().into(), inner().into()]),
        "empty_list" => List::new(),
        "int_array" => vec![5, -9, i32::MIN, 0, i32::MAX],
        "byte_array" => vec![0_i8, 2, 3],
        "long_array" => vec![123_i64, 456, 789],
    }
}

#[test]
fn round_trip() {
    let mut buf = vec![];

    let compound = example_compound();

    to_binary(&compound, &mut buf, ROOT_NAME).unwrap();

    assert_eq!(buf.len(), written_size(ROOT_NAME, &Tag::Compound(compound.clone())));

    let (decoded, root_name) = from_binary(&mut buf.as_slice()).unwrap();

    assert_eq!(root_name, ROOT_NAME);
    assert_eq!(compound, decoded);
}

#[test]
fn round_trip_keeps_list_element_type() {
    let mut typed = List::with_element_type(TagType::Short);
    typed.push(Tag::Short(1)).unwrap();

    let tag = Tag::Compound(compound! {
        "typed" => typed,
        "empty_typed" => List::with_element_type(TagType::Compound),
    });

    let mut buf = vec![];
    encode(&mut buf, "", &tag).unwrap();

    let (_, decoded) = decode(&mut buf.as_slice()).unwrap();
    let c = decoded.as_compound().unwrap();

    assert_eq!(c.get_list("typed").unwrap().element_type(), TagType::Short);
    assert_eq!(
        c.get_list("empty_typed").unwrap().element_type(),
        TagType::Compound
    );
    assert_eq!(decoded, tag);
}

#[test]
fn golden_bytes() {
    let mut buf = vec![];
    encode(&mut buf, "", &Tag::Compound(compound! { "id" => 7_i16 })).unwrap();

    assert_eq!(buf, [0x0a, 0x00, 0x00, 0x02, 0x00, 0x02, b'i', b'd', 0x00, 0x07, 0x00]);
}

#[test]
fn golden_list_bytes() {
    let mut buf = vec![];
    encode(
        &mut buf,
        "l",
        &Tag::List(list(vec![Tag::Byte(1), Tag::Byte(-1)])),
    )
    .unwrap();

    assert_eq!(buf, [0x09, 0x00, 0x01, b'l', 0x01, 0, 0, 0, 2, 0x01, 0xff]);
}

#[test]
fn strings_use_modified_utf8() {
    let mut buf = vec![];
    encode(&mut buf, "", &Tag::String("\0".into())).unwrap();

    assert_eq!(buf, [0x08, 0, 0, 0, 2, 0xc0, 0x80]);

    let (_, decoded) = decode(&mut buf.as_slice()).unwrap();
    assert_eq!(decoded, Tag::String("\0".into()));
}

#[test]
fn end_frame() {
    let mut buf = vec![];
    encode(&mut buf, "ignored", &Tag::End).unwrap();

    assert_eq!(buf, [0x00]);
    assert_eq!(written_size("ignored", &Tag::End), 1);

    // Nothing after the end id is consumed.
    let bytes = [0x00, 0xff, 0xff];
    let mut r = bytes.as_slice();
    let (name, tag) = decode(&mut r).unwrap();

    assert_eq!(name, "");
    assert_eq!(tag, Tag::End);
    assert_eq!(r, [0xff, 0xff]);
}

#[test]
fn check_min_sizes() {
    fn check(min_val: Tag, expected_size: usize) {
        /// TAG_Compound + root name + field tag + field name + TAG_End
        const COMPOUND_OVERHEAD: usize = 1 + 2 + 1 + 2 + 1;

        let dbg = format!("{min_val:?}");
        let mut buf = vec![];

        to_binary(&compound!("" => min_val), &mut buf, "").unwrap();

        assert_eq!(
            expected_size,
            buf.len() - COMPOUND_OVERHEAD,
            "size mismatch for {dbg}"
        );
    }

    check(Tag::Byte(0), 1);
    check(Tag::Short(0), 2);
    check(Tag::Int(0), 4);
    check(Tag::Long(0), 8);
    check(Tag::Float(0.0), 4);
    check(Tag::Double(0.0), 8);
    check(Tag::ByteArray(vec![]), 4);
    check(Tag::String(String::new()), 2);
    check(Tag::List(List::new()), 5);
    check(Tag::Compound(Compound::new()), 1);
    check(Tag::IntArray(vec![]), 4);
    check(Tag::LongArray(vec![]), 4);
}

#[test]
fn truncated_input() {
    let mut buf = vec![];
    encode(&mut buf, "root", &Tag::Compound(example_compound())).unwrap();

    for len in [1, 3, buf.len() / 2, buf.len() - 1] {
        let err = decode(&mut &buf[..len]).unwrap_err();
        assert!(matches!(err, Error::Truncated), "len {len}: {err:?}");
    }
}

#[test]
fn truncated_array_with_huge_length() {
    // Byte array claiming i32::MAX elements with none present.
    let bytes = [0x07, 0, 0, 0x7f, 0xff, 0xff, 0xff];

    assert!(matches!(
        decode(&mut bytes.as_slice()),
        Err(Error::Truncated)
    ));
}

#[test]
fn unknown_tag_type() {
    let bytes = [0x0a, 0, 0, 13, 0, 0];

    assert!(matches!(
        decode(&mut bytes.as_slice()),
        Err(Error::UnknownTagType(13))
    ));
}

#[test]
fn negative_lengths() {
    let array = [0x0b, 0, 0, 0xff, 0xff, 0xff, 0xff];
    assert!(matches!(
        decode(&mut array.as_slice()),
        Err(Error::NegativeLength(TagType::IntArray, -1))
    ));

    let list = [0x09, 0, 0, 0x01, 0xff, 0xff, 0xff, 0xfe];
    assert!(matches!(
        decode(&mut list.as_slice()),
        Err(Error::NegativeLength(TagType::List, -2))
    ));
}

#[test]
fn end_list_must_be_empty() {
    let ok = [0x09, 0, 0, 0x00, 0, 0, 0, 0];
    let (_, tag) = decode(&mut ok.as_slice()).unwrap();
    assert_eq!(tag, Tag::List(List::new()));

    let bad = [0x09, 0, 0, 0x00, 0, 0, 0, 1];
    assert!(matches!(
        decode(&mut bad.as_slice()),
        Err(Error::InvalidListType(1))
    ));
}

#[test]
fn root_must_be_compound() {
    let bytes = [0x01, 0, 0, 5];

    assert!(matches!(
        from_binary(&mut bytes.as_slice()),
        Err(Error::RootNotCompound(TagType::Byte))
    ));
}

#[test]
fn string_too_long() {
    let s = "a".repeat(u16::MAX as usize + 1);

    assert!(matches!(
        encode(&mut vec![], "", &Tag::String(s)),
        Err(Error::TooLong(TagType::String, 65536, 65535))
    ));
}

#[test]
fn nested_compound_at_depth_limit() {
    let mut c = compound!("" => 111_i8);
    for _ in 1..MAX_DEPTH {
        c = compound!("" => c);
    }

    let mut buf = vec![];
    to_binary(&c, &mut buf, "").unwrap();

    let (decoded, _) = from_binary(&mut buf.as_slice()).unwrap();
    assert_eq!(decoded, c);
}

#[test]
fn deeply_nested_compound_encode() {
    let mut c = compound!("" => 111_i8);
    for _ in 0..MAX_DEPTH {
        c = compound!("" => c);
    }

    assert!(matches!(
        to_binary(&c, &mut vec![], ROOT_NAME),
        Err(Error::DepthLimitExceeded)
    ));
}

#[test]
fn deeply_nested_compound_decode() {
    let mut buf = vec![TagType::Compound.id(), 0, 0]; // Root compound
    let n = 10_000;

    for _ in 0..n {
        buf.extend([TagType::Compound.id(), 0, 0]);
    }

    buf.extend((0..n).map(|_| TagType::End.id()));

    buf.push(TagType::End.id()); // End root compound

    // Should not overflow the stack
    assert!(matches!(
        from_binary(&mut buf.as_slice()),
        Err(Error::DepthLimitExceeded)
    ));
}

#[test]
fn deeply_nested_list_encode() {
    let mut l = List::with_element_type(TagType::Byte);
    for _ in 0..MAX_DEPTH {
        l = list(vec![Tag::List(l)]);
    }

    let c = compound!("" => l);

    assert!(matches!(
        to_binary(&c, &mut vec![], ROOT_NAME),
        Err(Error::DepthLimitExceeded)
    ));
}

#[test]
fn deeply_nested_list_decode() {
    // Root compound with one field.
    let mut buf = vec![TagType::Compound.id(), 0, 0, TagType::List.id(), 0, 0];
    let n = 10_000;

    for _ in 0..n - 1 {
        buf.extend([TagType::List.id(), 0, 0, 0, 1]); // List of list
    }

    // Last list is an empty list of bytes.
    buf.extend([TagType::Byte.id(), 0, 0, 0, 0]);

    buf.push(TagType::End.id()); // End root compound

    // Should not overflow the stack
    assert!(matches!(
        from_binary(&mut buf.as_slice()),
        Err(Error::DepthLimitExceeded)
    ));
}

#[test]
fn written_size_matches_encode() {
    let tags = [
        Tag::End,
        Tag::String("ÅÆÇ\0😀".into()),
        Tag::List(list(vec![Tag::LongArray(vec![1, 2]), Tag::LongArray(vec![])])),
        Tag::Compound(example_compound()),
    ];

    for tag in tags {
        let mut buf = vec![];
        encode(&mut buf, "name", &tag).unwrap();

        assert_eq!(buf.len(), written_size("name", &tag), "{tag:?}");
    }
}
