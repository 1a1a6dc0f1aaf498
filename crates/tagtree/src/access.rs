//! Typed accessors for [`Compound`] and [`List`].
//!
//! Numeric getters accept any numeric tag and convert it with `as` semantics,
//! so a stored long can be read with [`Compound::get_int`]. Every other getter
//! requires an exact type match.
//!
//! Each compound getter comes in three flavors:
//!
//! - `get_x(key)` fails with [`AccessError::NotFound`] if the key is missing.
//! - `get_x_opt(key)` returns `Ok(None)` if the key is missing.
//! - `get_x_or_insert(key, default)` inserts `default` if the key is missing
//!   and then reads it back, so the key is present afterwards.
//!
//! Array getters return copies and array setters copy their input.
//!
//! ```
//! use tagtree::{compound, Tag};
//!
//! let mut c = compound! { "level" => 7_i64 };
//!
//! assert_eq!(c.get_int("level"), Ok(7));
//! assert_eq!(c.get_int_opt("missing"), Ok(None));
//!
//! assert_eq!(c.get_int_or_insert("xp", 0), Ok(0));
//! assert_eq!(c.get("xp"), Some(&Tag::Int(0)));
//! ```

use thiserror::Error;

use crate::{Compound, List, Tag, TagType, ZeroValueError};

/// Errors raised by the typed accessors.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum AccessError {
    #[error("no value for key `{0}`")]
    NotFound(String),
    #[error("index {index} is out of bounds for list of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("expected {expected}, found {found}")]
    TypeMismatch { expected: TagType, found: TagType },
    #[error(transparent)]
    ZeroValue(#[from] ZeroValueError),
}

fn mismatch(expected: TagType, found: &Tag) -> AccessError {
    AccessError::TypeMismatch {
        expected,
        found: found.tag_type(),
    }
}

fn numeric<T>(tag: &Tag, expected: TagType, read: fn(&Tag) -> Option<T>) -> Result<T, AccessError> {
    read(tag).ok_or_else(|| mismatch(expected, tag))
}

macro_rules! numeric_accessors {
    ($($variant:ident($ty:ty): $read:ident, $get:ident, $get_opt:ident, $get_or_insert:ident, $set:ident;)*) => {
        impl Compound {
            $(
                #[doc = concat!("Reads the number under `key` as ", stringify!($ty), ".")]
                pub fn $get(&self, key: &str) -> Result<$ty, AccessError> {
                    self.$get_opt(key)?
                        .ok_or_else(|| AccessError::NotFound(key.to_owned()))
                }

                pub fn $get_opt(&self, key: &str) -> Result<Option<$ty>, AccessError> {
                    self.get(key)
                        .map(|tag| numeric(tag, TagType::$variant, Tag::$read))
                        .transpose()
                }

                pub fn $get_or_insert(&mut self, key: &str, default: $ty) -> Result<$ty, AccessError> {
                    let tag = self.entry(key).or_insert(Tag::$variant(default));
                    numeric(tag, TagType::$variant, Tag::$read)
                }

                pub fn $set(&mut self, key: impl Into<String>, value: $ty) -> Option<Tag> {
                    self.insert(key, Tag::$variant(value))
                }
            )*
        }

        impl List {
            $(
                pub fn $get(&self, index: usize) -> Result<$ty, AccessError> {
                    let tag = self.at(index)?;
                    numeric(tag, TagType::$variant, Tag::$read)
                }
            )*
        }
    }
}

numeric_accessors! {
    Byte(i8): as_byte, get_byte, get_byte_opt, get_byte_or_insert, set_byte;
    Short(i16): as_short, get_short, get_short_opt, get_short_or_insert, set_short;
    Int(i32): as_int, get_int, get_int_opt, get_int_or_insert, set_int;
    Long(i64): as_long, get_long, get_long_opt, get_long_or_insert, set_long;
    Float(f32): as_float, get_float, get_float_opt, get_float_or_insert, set_float;
    Double(f64): as_double, get_double, get_double_opt, get_double_or_insert, set_double;
}

macro_rules! array_accessors {
    ($($variant:ident($elem:ty): $get:ident, $get_opt:ident, $get_or_insert:ident, $set:ident;)*) => {
        impl Compound {
            $(
                pub fn $get(&self, key: &str) -> Result<Vec<$elem>, AccessError> {
                    self.$get_opt(key)?
                        .ok_or_else(|| AccessError::NotFound(key.to_owned()))
                }

                pub fn $get_opt(&self, key: &str) -> Result<Option<Vec<$elem>>, AccessError> {
                    match self.get(key) {
                        Some(Tag::$variant(v)) => Ok(Some(v.clone())),
                        Some(other) => Err(mismatch(TagType::$variant, other)),
                        None => Ok(None),
                    }
                }

                pub fn $get_or_insert(
                    &mut self,
                    key: &str,
                    default: &[$elem],
                ) -> Result<Vec<$elem>, AccessError> {
                    match self.entry(key).or_insert_with(|| Tag::$variant(default.to_vec())) {
                        Tag::$variant(v) => Ok(v.clone()),
                        other => Err(mismatch(TagType::$variant, other)),
                    }
                }

                pub fn $set(&mut self, key: impl Into<String>, value: &[$elem]) -> Option<Tag> {
                    self.insert(key, Tag::$variant(value.to_vec()))
                }
            )*
        }

        impl List {
            $(
                pub fn $get(&self, index: usize) -> Result<Vec<$elem>, AccessError> {
                    match self.at(index)? {
                        Tag::$variant(v) => Ok(v.clone()),
                        other => Err(mismatch(TagType::$variant, other)),
                    }
                }
            )*
        }
    }
}

array_accessors! {
    ByteArray(i8): get_byte_array, get_byte_array_opt, get_byte_array_or_insert, set_byte_array;
    IntArray(i32): get_int_array, get_int_array_opt, get_int_array_or_insert, set_int_array;
    LongArray(i64): get_long_array, get_long_array_opt, get_long_array_or_insert, set_long_array;
}

impl Compound {
    fn require(&self, key: &str) -> Result<&Tag, AccessError> {
        self.get(key)
            .ok_or_else(|| AccessError::NotFound(key.to_owned()))
    }

    /// Reads a byte as a bool. Any non-zero value is `true`.
    pub fn get_bool(&self, key: &str) -> Result<bool, AccessError> {
        self.get_byte(key).map(|b| b != 0)
    }

    pub fn get_bool_opt(&self, key: &str) -> Result<Option<bool>, AccessError> {
        Ok(self.get_byte_opt(key)?.map(|b| b != 0))
    }

    pub fn get_bool_or_insert(&mut self, key: &str, default: bool) -> Result<bool, AccessError> {
        self.get_byte_or_insert(key, i8::from(default))
            .map(|b| b != 0)
    }

    /// Stores a bool as a byte of exactly `0` or `1`.
    pub fn set_bool(&mut self, key: impl Into<String>, value: bool) -> Option<Tag> {
        self.insert(key, Tag::from(value))
    }

    pub fn get_string(&self, key: &str) -> Result<&str, AccessError> {
        self.get_string_opt(key)?
            .ok_or_else(|| AccessError::NotFound(key.to_owned()))
    }

    pub fn get_string_opt(&self, key: &str) -> Result<Option<&str>, AccessError> {
        match self.get(key) {
            Some(Tag::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(mismatch(TagType::String, other)),
            None => Ok(None),
        }
    }

    pub fn get_string_or_insert(&mut self, key: &str, default: &str) -> Result<&str, AccessError> {
        match self.entry(key).or_insert_with(|| default) {
            Tag::String(s) => Ok(s.as_str()),
            other => Err(mismatch(TagType::String, other)),
        }
    }

    pub fn set_string(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<Tag> {
        self.insert(key, Tag::String(value.into()))
    }

    pub fn get_list(&self, key: &str) -> Result<&List, AccessError> {
        match self.require(key)? {
            Tag::List(l) => Ok(l),
            other => Err(mismatch(TagType::List, other)),
        }
    }

    pub fn get_list_opt(&self, key: &str) -> Result<Option<&List>, AccessError> {
        match self.get(key) {
            Some(Tag::List(l)) => Ok(Some(l)),
            Some(other) => Err(mismatch(TagType::List, other)),
            None => Ok(None),
        }
    }

    pub fn get_list_mut(&mut self, key: &str) -> Result<&mut List, AccessError> {
        match self.get_mut(key) {
            Some(Tag::List(l)) => Ok(l),
            Some(other) => Err(mismatch(TagType::List, other)),
            None => Err(AccessError::NotFound(key.to_owned())),
        }
    }

    /// Returns the list under `key`, inserting an empty one first if the key
    /// is missing.
    pub fn get_list_or_insert(&mut self, key: &str) -> Result<&mut List, AccessError> {
        match self.entry(key).or_insert_with(List::new) {
            Tag::List(l) => Ok(l),
            other => Err(mismatch(TagType::List, other)),
        }
    }

    pub fn set_list(&mut self, key: impl Into<String>, value: List) -> Option<Tag> {
        self.insert(key, value)
    }

    pub fn get_compound(&self, key: &str) -> Result<&Compound, AccessError> {
        match self.require(key)? {
            Tag::Compound(c) => Ok(c),
            other => Err(mismatch(TagType::Compound, other)),
        }
    }

    pub fn get_compound_opt(&self, key: &str) -> Result<Option<&Compound>, AccessError> {
        match self.get(key) {
            Some(Tag::Compound(c)) => Ok(Some(c)),
            Some(other) => Err(mismatch(TagType::Compound, other)),
            None => Ok(None),
        }
    }

    pub fn get_compound_mut(&mut self, key: &str) -> Result<&mut Compound, AccessError> {
        match self.get_mut(key) {
            Some(Tag::Compound(c)) => Ok(c),
            Some(other) => Err(mismatch(TagType::Compound, other)),
            None => Err(AccessError::NotFound(key.to_owned())),
        }
    }

    /// Returns the compound under `key`, inserting an empty one first if the
    /// key is missing.
    pub fn get_compound_or_insert(&mut self, key: &str) -> Result<&mut Compound, AccessError> {
        match self.entry(key).or_insert_with(Compound::new) {
            Tag::Compound(c) => Ok(c),
            other => Err(mismatch(TagType::Compound, other)),
        }
    }

    pub fn set_compound(&mut self, key: impl Into<String>, value: Compound) -> Option<Tag> {
        self.insert(key, value)
    }

    /// Returns the tag under `key`, inserting the zero value of `ty` first if
    /// the key is missing. An existing tag of another type is an error.
    pub fn get_or_insert_zero(&mut self, key: &str, ty: TagType) -> Result<&mut Tag, AccessError> {
        let tag = match self.entry(key) {
            crate::compound::Entry::Occupied(oe) => oe.into_mut(),
            crate::compound::Entry::Vacant(ve) => ve.insert(ty.zero_value()?),
        };

        if tag.tag_type() == ty {
            Ok(tag)
        } else {
            Err(mismatch(ty, tag))
        }
    }
}

impl List {
    fn at(&self, index: usize) -> Result<&Tag, AccessError> {
        self.get(index).ok_or(AccessError::IndexOutOfBounds {
            index,
            len: self.len(),
        })
    }

    pub fn get_bool(&self, index: usize) -> Result<bool, AccessError> {
        self.get_byte(index).map(|b| b != 0)
    }

    pub fn get_string(&self, index: usize) -> Result<&str, AccessError> {
        match self.at(index)? {
            Tag::String(s) => Ok(s.as_str()),
            other => Err(mismatch(TagType::String, other)),
        }
    }

    pub fn get_list(&self, index: usize) -> Result<&List, AccessError> {
        match self.at(index)? {
            Tag::List(l) => Ok(l),
            other => Err(mismatch(TagType::List, other)),
        }
    }

    pub fn get_compound(&self, index: usize) -> Result<&Compound, AccessError> {
        match self.at(index)? {
            Tag::Compound(c) => Ok(c),
            other => Err(mismatch(TagType::Compound, other)),
        }
    }

    pub fn get_list_mut(&mut self, index: usize) -> Result<&mut List, AccessError> {
        let (len, found) = (self.len(), self.element_type());
        self.get_mut(index)
            .ok_or(AccessError::IndexOutOfBounds { index, len })?
            .into_list_mut()
            .ok_or(AccessError::TypeMismatch {
                expected: TagType::List,
                found,
            })
    }

    pub fn get_compound_mut(&mut self, index: usize) -> Result<&mut Compound, AccessError> {
        let (len, found) = (self.len(), self.element_type());
        self.get_mut(index)
            .ok_or(AccessError::IndexOutOfBounds { index, len })?
            .into_compound_mut()
            .ok_or(AccessError::TypeMismatch {
                expected: TagType::Compound,
                found,
            })
    }
}
