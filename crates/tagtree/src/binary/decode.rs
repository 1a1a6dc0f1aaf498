use std::borrow::Cow;
use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};

use super::{modified_utf8, Error, Result, MAX_DEPTH};
use crate::{Compound, List, Tag, TagType};

/// Upper bound on capacity reserved up front from an untrusted length prefix.
const PREALLOC_LIMIT: usize = 4096;

/// Decodes one framed tag from the reader, returning its name and value.
///
/// If the frame's type id is [`TagType::End`], nothing else is read and
/// `("", Tag::End)` is returned.
///
/// Any error leaves the reader at an unspecified position and no partial tree
/// is returned.
pub fn decode<R: Read + ?Sized>(reader: &mut R) -> Result<(String, Tag)> {
    let mut state = DecodeState { reader, depth: 0 };

    let ty = state.read_tag_type()?;

    if ty == TagType::End {
        return Ok((String::new(), Tag::End));
    }

    let name = state.read_string()?;
    let tag = state.read_payload(ty)?;

    Ok((name, tag))
}

/// Decodes binary data whose root value must be a compound.
///
/// Returns the compound along with the root name.
pub fn from_binary<R: Read + ?Sized>(reader: &mut R) -> Result<(Compound, String)> {
    match decode(reader)? {
        (name, Tag::Compound(c)) => Ok((c, name)),
        (_, other) => Err(Error::RootNotCompound(other.tag_type())),
    }
}

struct DecodeState<'r, R: ?Sized> {
    reader: &'r mut R,
    /// Current recursion depth.
    depth: usize,
}

impl<R: Read + ?Sized> DecodeState<'_, R> {
    fn check_depth<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_DEPTH {
            return Err(Error::DepthLimitExceeded);
        }

        self.depth += 1;
        let res = f(self);
        self.depth -= 1;
        res
    }

    fn read_tag_type(&mut self) -> Result<TagType> {
        let id = self.reader.read_u8()?;
        TagType::from_id(id).ok_or(Error::UnknownTagType(id))
    }

    fn read_payload(&mut self, ty: TagType) -> Result<Tag> {
        Ok(match ty {
            TagType::End => Tag::End,
            TagType::Byte => Tag::Byte(self.reader.read_i8()?),
            TagType::Short => Tag::Short(self.reader.read_i16::<BigEndian>()?),
            TagType::Int => Tag::Int(self.reader.read_i32::<BigEndian>()?),
            TagType::Long => Tag::Long(self.reader.read_i64::<BigEndian>()?),
            TagType::Float => Tag::Float(self.reader.read_f32::<BigEndian>()?),
            TagType::Double => Tag::Double(self.reader.read_f64::<BigEndian>()?),
            TagType::ByteArray => Tag::ByteArray(self.read_byte_array()?),
            TagType::String => Tag::String(self.read_string()?),
            TagType::List => Tag::List(self.check_depth(|st| st.read_list())?),
            TagType::Compound => Tag::Compound(self.check_depth(|st| st.read_compound())?),
            TagType::IntArray => Tag::IntArray(self.read_int_array()?),
            TagType::LongArray => Tag::LongArray(self.read_long_array()?),
        })
    }

    fn read_len(&mut self, ty: TagType) -> Result<usize> {
        let len = self.reader.read_i32::<BigEndian>()?;

        usize::try_from(len).map_err(|_| Error::NegativeLength(ty, len))
    }

    /// Reads exactly `len` bytes without trusting `len` for the allocation.
    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(len.min(PREALLOC_LIMIT));
        Read::take(&mut *self.reader, len as u64).read_to_end(&mut buf)?;

        if buf.len() == len {
            Ok(buf)
        } else {
            Err(Error::Truncated)
        }
    }

    fn read_byte_array(&mut self) -> Result<Vec<i8>> {
        let len = self.read_len(TagType::ByteArray)?;

        Ok(self
            .read_bytes(len)?
            .into_iter()
            .map(|b| b as i8)
            .collect())
    }

    fn read_int_array(&mut self) -> Result<Vec<i32>> {
        let len = self.read_len(TagType::IntArray)?;

        let mut array = Vec::with_capacity(len.min(PREALLOC_LIMIT));
        for _ in 0..len {
            array.push(self.reader.read_i32::<BigEndian>()?);
        }

        Ok(array)
    }

    fn read_long_array(&mut self) -> Result<Vec<i64>> {
        let len = self.read_len(TagType::LongArray)?;

        let mut array = Vec::with_capacity(len.min(PREALLOC_LIMIT));
        for _ in 0..len {
            array.push(self.reader.read_i64::<BigEndian>()?);
        }

        Ok(array)
    }

    fn read_string(&mut self) -> Result<String> {
        let len = self.reader.read_u16::<BigEndian>()?;
        let bytes = self.read_bytes(len.into())?;

        // Most strings are plain UTF-8 and need no conversion.
        match String::from_utf8(bytes) {
            Ok(s) => Ok(s),
            Err(e) => modified_utf8::decode_modified_utf8(e.as_bytes())
                .map(Cow::into_owned)
                .ok_or(Error::InvalidString),
        }
    }

    fn read_list(&mut self) -> Result<List> {
        let element_type = self.read_tag_type()?;
        let len = self.reader.read_i32::<BigEndian>()?;

        if len < 0 {
            return Err(Error::NegativeLength(TagType::List, len));
        }

        if element_type == TagType::End && len != 0 {
            return Err(Error::InvalidListType(len));
        }

        let len = len as usize;
        let mut items = Vec::with_capacity(len.min(PREALLOC_LIMIT));
        for _ in 0..len {
            items.push(self.read_payload(element_type)?);
        }

        Ok(List::from_parts_unchecked(element_type, items))
    }

    fn read_compound(&mut self) -> Result<Compound> {
        let mut compound = Compound::new();

        loop {
            let ty = self.read_tag_type()?;
            if ty == TagType::End {
                return Ok(compound);
            }

            let name = self.read_string()?;
            let value = self.read_payload(ty)?;
            compound.insert(name, value);
        }
    }
}
