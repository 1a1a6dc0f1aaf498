use std::fmt;

use thiserror::Error;

use crate::{Compound, List, Tag};

/// One of the thirteen kinds of [`Tag`].
///
/// The discriminant of each variant is its id on the binary wire.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[repr(u8)]
pub enum TagType {
    // Variant order is significant!
    #[default]
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
    LongArray = 12,
}

/// Returned by [`TagType::zero_value`] for [`TagType::End`], which has no
/// payload to construct.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
#[error("TAG_End has no zero value")]
pub struct ZeroValueError;

impl TagType {
    /// Every tag type, indexed by wire id.
    pub const ALL: [TagType; 13] = [
        TagType::End,
        TagType::Byte,
        TagType::Short,
        TagType::Int,
        TagType::Long,
        TagType::Float,
        TagType::Double,
        TagType::ByteArray,
        TagType::String,
        TagType::List,
        TagType::Compound,
        TagType::IntArray,
        TagType::LongArray,
    ];

    /// Looks up a tag type by its wire id. Returns `None` for ids above 12.
    pub const fn from_id(id: u8) -> Option<Self> {
        if (id as usize) < Self::ALL.len() {
            Some(Self::ALL[id as usize])
        } else {
            None
        }
    }

    /// Returns the tag type whose payload is represented by `T`.
    ///
    /// ```
    /// use tagtree::{Compound, TagType};
    ///
    /// assert_eq!(TagType::of::<i16>(), TagType::Short);
    /// assert_eq!(TagType::of::<Vec<i64>>(), TagType::LongArray);
    /// assert_eq!(TagType::of::<Compound>(), TagType::Compound);
    /// ```
    pub const fn of<T: Payload>() -> Self {
        T::TAG_TYPE
    }

    /// The wire id of this tag type.
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Returns the name of this tag type for error reporting purposes.
    pub const fn name(self) -> &'static str {
        match self {
            TagType::End => "end",
            TagType::Byte => "byte",
            TagType::Short => "short",
            TagType::Int => "int",
            TagType::Long => "long",
            TagType::Float => "float",
            TagType::Double => "double",
            TagType::ByteArray => "byte array",
            TagType::String => "string",
            TagType::List => "list",
            TagType::Compound => "compound",
            TagType::IntArray => "int array",
            TagType::LongArray => "long array",
        }
    }

    /// Whether tags of this type can be coerced to any other numeric type.
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            TagType::Byte
                | TagType::Short
                | TagType::Int
                | TagType::Long
                | TagType::Float
                | TagType::Double
        )
    }

    /// Constructs a fresh tag of this type holding its zero value: `0` for
    /// numbers, an empty string, array, list or compound.
    ///
    /// [`TagType::End`] has no zero value and yields an error.
    pub fn zero_value(self) -> Result<Tag, ZeroValueError> {
        Ok(match self {
            TagType::End => return Err(ZeroValueError),
            TagType::Byte => Tag::Byte(0),
            TagType::Short => Tag::Short(0),
            TagType::Int => Tag::Int(0),
            TagType::Long => Tag::Long(0),
            TagType::Float => Tag::Float(0.0),
            TagType::Double => Tag::Double(0.0),
            TagType::ByteArray => Tag::ByteArray(Vec::new()),
            TagType::String => Tag::String(String::new()),
            TagType::List => Tag::List(List::new()),
            TagType::Compound => Tag::Compound(Compound::new()),
            TagType::IntArray => Tag::IntArray(Vec::new()),
            TagType::LongArray => Tag::LongArray(Vec::new()),
        })
    }
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rust types that are the payload of exactly one [`TagType`].
pub trait Payload {
    const TAG_TYPE: TagType;
}

macro_rules! impl_payload {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Payload for $ty {
                const TAG_TYPE: TagType = TagType::$variant;
            }
        )*
    }
}

impl_payload! {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for (id, ty) in TagType::ALL.iter().enumerate() {
            assert_eq!(ty.id() as usize, id);
            assert_eq!(TagType::from_id(id as u8), Some(*ty));
        }

        assert_eq!(TagType::from_id(13), None);
        assert_eq!(TagType::from_id(u8::MAX), None);
    }

    #[test]
    fn zero_values_match_their_type() {
        for ty in &TagType::ALL[1..] {
            assert_eq!(ty.zero_value().unwrap().tag_type(), *ty);
        }

        assert_eq!(TagType::End.zero_value(), Err(ZeroValueError));
    }

    #[test]
    fn payload_lookup() {
        assert_eq!(TagType::of::<i8>(), TagType::Byte);
        assert_eq!(TagType::of::<f64>(), TagType::Double);
        assert_eq!(TagType::of::<String>(), TagType::String);
        assert_eq!(TagType::of::<List>(), TagType::List);
        assert_eq!(TagType::of::<Vec<i32>>(), TagType::IntArray);
    }
}
