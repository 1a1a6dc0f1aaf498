use std::borrow::Cow;

use crate::{Compound, List, TagType};

/// A node of the value tree.
///
/// Containers own their children outright, so cloning a tag always produces a
/// fully independent deep copy.
#[derive(Clone, PartialEq, Debug, Default)]
pub enum Tag {
    /// The payload-less sentinel. Used as "no value" and as the compound
    /// terminator on the wire.
    #[default]
    End,
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(List),
    Compound(Compound),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl Tag {
    /// Returns the type of this tag.
    pub fn tag_type(&self) -> TagType {
        match self {
            Tag::End => TagType::End,
            Tag::Byte(_) => TagType::Byte,
            Tag::Short(_) => TagType::Short,
            Tag::Int(_) => TagType::Int,
            Tag::Long(_) => TagType::Long,
            Tag::Float(_) => TagType::Float,
            Tag::Double(_) => TagType::Double,
            Tag::ByteArray(_) => TagType::ByteArray,
            Tag::String(_) => TagType::String,
            Tag::List(_) => TagType::List,
            Tag::Compound(_) => TagType::Compound,
            Tag::IntArray(_) => TagType::IntArray,
            Tag::LongArray(_) => TagType::LongArray,
        }
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Tag::End)
    }

    pub fn is_numeric(&self) -> bool {
        self.tag_type().is_numeric()
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Tag::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_byte_array(&self) -> Option<&[i8]> {
        match self {
            Tag::ByteArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_int_array(&self) -> Option<&[i32]> {
        match self {
            Tag::IntArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_long_array(&self) -> Option<&[i64]> {
        match self {
            Tag::LongArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Tag::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut List> {
        match self {
            Tag::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Tag::Compound(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_compound_mut(&mut self) -> Option<&mut Compound> {
        match self {
            Tag::Compound(c) => Some(c),
            _ => None,
        }
    }

    pub fn into_list(self) -> Option<List> {
        match self {
            Tag::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn into_compound(self) -> Option<Compound> {
        match self {
            Tag::Compound(c) => Some(c),
            _ => None,
        }
    }
}

/// Reads the numeric payload of a tag converted to the given primitive with
/// `as` semantics: integers wrap, floats truncate toward zero and saturate.
macro_rules! numeric_as {
    ($($fn_name:ident -> $ty:ty),* $(,)?) => {
        impl Tag {
            $(
                pub fn $fn_name(&self) -> Option<$ty> {
                    match *self {
                        Tag::Byte(v) => Some(v as $ty),
                        Tag::Short(v) => Some(v as $ty),
                        Tag::Int(v) => Some(v as $ty),
                        Tag::Long(v) => Some(v as $ty),
                        Tag::Float(v) => Some(v as $ty),
                        Tag::Double(v) => Some(v as $ty),
                        _ => None,
                    }
                }
            )*
        }
    }
}

numeric_as! {
    as_byte -> i8,
    as_short -> i16,
    as_int -> i32,
    as_long -> i64,
    as_float -> f32,
    as_double -> f64,
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Tag {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    }
}

impl_from! {
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    Vec<i8> => ByteArray,
    String => String,
    List => List,
    Compound => Compound,
    Vec<i32> => IntArray,
    Vec<i64> => LongArray,
}

/// Bools are represented as `0` or `1` bytes.
impl From<bool> for Tag {
    fn from(b: bool) -> Self {
        Tag::Byte(i8::from(b))
    }
}

impl From<&str> for Tag {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<&String> for Tag {
    fn from(v: &String) -> Self {
        Self::String(v.clone())
    }
}

impl<'a> From<Cow<'a, str>> for Tag {
    fn from(v: Cow<'a, str>) -> Self {
        Self::String(v.into_owned())
    }
}

impl From<&[i8]> for Tag {
    fn from(v: &[i8]) -> Self {
        Self::ByteArray(v.to_vec())
    }
}

impl From<&[i32]> for Tag {
    fn from(v: &[i32]) -> Self {
        Self::IntArray(v.to_vec())
    }
}

impl From<&[i64]> for Tag {
    fn from(v: &[i64]) -> Self {
        Self::LongArray(v.to_vec())
    }
}
