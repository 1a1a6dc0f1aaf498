use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

use super::{modified_utf8, Error, Result, MAX_DEPTH};
use crate::{Compound, List, Tag, TagType};

/// Encodes one framed tag to the writer: its type id, then (unless the tag is
/// [`Tag::End`]) the name and the payload.
///
/// On error some bytes may already have been written.
pub fn encode<W: Write + ?Sized>(writer: &mut W, name: &str, tag: &Tag) -> Result<()> {
    let mut state = EncodeState { writer, depth: 0 };

    state.write_tag_type(tag.tag_type())?;

    if tag.is_end() {
        return Ok(());
    }

    state.write_string(name)?;
    state.write_payload(tag)
}

/// Encodes a compound as the root value with the given root name. Typically
/// the empty string `""` is used.
pub fn to_binary<W: Write + ?Sized>(comp: &Compound, writer: &mut W, root_name: &str) -> Result<()> {
    let mut state = EncodeState { writer, depth: 0 };

    state.write_tag_type(TagType::Compound)?;
    state.write_string(root_name)?;
    state.check_depth(|st| st.write_compound(comp))
}

/// Returns the number of bytes that [`encode`] writes for this name and tag.
///
/// If `encode` results in `Ok`, exactly this many bytes will have been
/// written.
pub fn written_size(name: &str, tag: &Tag) -> usize {
    fn payload_size(tag: &Tag) -> usize {
        match tag {
            Tag::End => 0,
            Tag::Byte(_) => 1,
            Tag::Short(_) => 2,
            Tag::Int(_) => 4,
            Tag::Long(_) => 8,
            Tag::Float(_) => 4,
            Tag::Double(_) => 8,
            Tag::ByteArray(v) => 4 + v.len(),
            Tag::String(s) => string_size(s),
            Tag::List(l) => 1 + 4 + l.iter().map(payload_size).sum::<usize>(),
            Tag::Compound(c) => {
                c.iter()
                    .filter(|(_, v)| !v.is_end())
                    .map(|(k, v)| 1 + string_size(k) + payload_size(v))
                    .sum::<usize>()
                    + 1
            }
            Tag::IntArray(v) => 4 + v.len() * 4,
            Tag::LongArray(v) => 4 + v.len() * 8,
        }
    }

    fn string_size(s: &str) -> usize {
        2 + modified_utf8::encoded_len(s)
    }

    if tag.is_end() {
        1
    } else {
        1 + string_size(name) + payload_size(tag)
    }
}

struct EncodeState<'w, W: ?Sized> {
    writer: &'w mut W,
    /// Current recursion depth.
    depth: usize,
}

impl<W: Write + ?Sized> EncodeState<'_, W> {
    fn check_depth<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_DEPTH {
            return Err(Error::DepthLimitExceeded);
        }

        self.depth += 1;
        let res = f(self);
        self.depth -= 1;
        res
    }

    fn write_tag_type(&mut self, ty: TagType) -> Result<()> {
        Ok(self.writer.write_u8(ty.id())?)
    }

    fn write_payload(&mut self, tag: &Tag) -> Result<()> {
        match tag {
            Tag::End => Ok(()),
            Tag::Byte(v) => Ok(self.writer.write_i8(*v)?),
            Tag::Short(v) => Ok(self.writer.write_i16::<BigEndian>(*v)?),
            Tag::Int(v) => Ok(self.writer.write_i32::<BigEndian>(*v)?),
            Tag::Long(v) => Ok(self.writer.write_i64::<BigEndian>(*v)?),
            Tag::Float(v) => Ok(self.writer.write_f32::<BigEndian>(*v)?),
            Tag::Double(v) => Ok(self.writer.write_f64::<BigEndian>(*v)?),
            Tag::ByteArray(v) => self.write_byte_array(v),
            Tag::String(v) => self.write_string(v),
            Tag::List(v) => self.check_depth(|st| st.write_list(v)),
            Tag::Compound(v) => self.check_depth(|st| st.write_compound(v)),
            Tag::IntArray(v) => self.write_int_array(v),
            Tag::LongArray(v) => self.write_long_array(v),
        }
    }

    fn write_len(&mut self, ty: TagType, len: usize) -> Result<()> {
        match i32::try_from(len) {
            Ok(n) => Ok(self.writer.write_i32::<BigEndian>(n)?),
            Err(_) => Err(Error::TooLong(ty, len, i32::MAX as usize)),
        }
    }

    fn write_byte_array(&mut self, bytes: &[i8]) -> Result<()> {
        self.write_len(TagType::ByteArray, bytes.len())?;

        let bytes: Vec<u8> = bytes.iter().map(|&b| b as u8).collect();
        Ok(self.writer.write_all(&bytes)?)
    }

    fn write_string(&mut self, s: &str) -> Result<()> {
        let len = modified_utf8::encoded_len(s);

        match u16::try_from(len) {
            Ok(n) => self.writer.write_u16::<BigEndian>(n)?,
            Err(_) => return Err(Error::TooLong(TagType::String, len, u16::MAX.into())),
        }

        // Conversion to modified UTF-8 never shrinks a string. If the length is
        // unchanged the bytes are identical.
        if s.len() == len {
            self.writer.write_all(s.as_bytes())?;
        } else {
            modified_utf8::write_modified_utf8(self.writer, s)?;
        }

        Ok(())
    }

    fn write_list(&mut self, list: &List) -> Result<()> {
        self.write_tag_type(list.element_type())?;
        self.write_len(TagType::List, list.len())?;

        for elem in list {
            self.write_payload(elem)?;
        }

        Ok(())
    }

    fn write_compound(&mut self, c: &Compound) -> Result<()> {
        for (k, v) in c {
            // An end entry can't be represented inside a compound.
            if v.is_end() {
                continue;
            }

            self.write_tag_type(v.tag_type())?;
            self.write_string(k)?;
            self.write_payload(v)?;
        }

        self.write_tag_type(TagType::End)
    }

    fn write_int_array(&mut self, ia: &[i32]) -> Result<()> {
        self.write_len(TagType::IntArray, ia.len())?;

        for i in ia {
            self.writer.write_i32::<BigEndian>(*i)?;
        }

        Ok(())
    }

    fn write_long_array(&mut self, la: &[i64]) -> Result<()> {
        self.write_len(TagType::LongArray, la.len())?;

        for l in la {
            self.writer.write_i64::<BigEndian>(*l)?;
        }

        Ok(())
    }
}
