//! Support for encoding and decoding tags in Java edition's binary format.
//!
//! Every value on the wire is framed as a one byte [`TagType`] id, a name, and
//! the payload. A frame whose id is [`TagType::End`] has neither a name nor a
//! payload. All numbers are big-endian and strings are length-prefixed
//! modified UTF-8.
//!
//! # Examples
//!
//! ```
//! use tagtree::binary::{decode, encode};
//! use tagtree::{compound, Tag};
//!
//! let tag = Tag::Compound(compound! { "id" => 7_i16 });
//!
//! let mut buf = vec![];
//! encode(&mut buf, "", &tag).unwrap();
//!
//! assert_eq!(buf, [0x0a, 0, 0, 0x02, 0, 2, b'i', b'd', 0, 7, 0x00]);
//!
//! let (name, decoded) = decode(&mut buf.as_slice()).unwrap();
//!
//! assert_eq!(name, "");
//! assert_eq!(decoded, tag);
//! ```
//!
//! Only compounds are usually permitted at the top level of files. The
//! [`from_binary`] and [`to_binary`] functions enforce that.
//!
//! ```
//! use tagtree::{compound, binary::from_binary};
//!
//! let some_bytes = [10, 0, 0, 3, 0, 3, 105, 110, 116, 0, 0, 222, 173, 0];
//!
//! let (nbt, root_name) = from_binary(&mut some_bytes.as_slice()).unwrap();
//!
//! assert_eq!(nbt, compound! { "int" => 0xdead });
//! assert_eq!(root_name, "");
//! ```

use std::io;

use thiserror::Error;

use crate::TagType;

mod decode;
mod encode;
pub mod file;
mod modified_utf8;
#[cfg(test)]
mod tests;

pub use decode::*;
pub use encode::*;

/// Maximum nesting of lists and compounds accepted when encoding or decoding.
/// Deeper trees are rejected instead of overflowing the call stack.
pub const MAX_DEPTH: usize = 512;

/// Errors that can occur while encoding or decoding binary data.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The input ended before a declared length was satisfied.
    #[error("unexpected end of input")]
    Truncated,
    #[error("unknown tag type id {0}")]
    UnknownTagType(u8),
    #[error("{0} with negative length {1}")]
    NegativeLength(TagType, i32),
    #[error("list with element type end must be empty (got length {0})")]
    InvalidListType(i32),
    #[error("string is not valid modified UTF-8")]
    InvalidString,
    #[error("{0} of length {1} exceeds maximum of {2}")]
    TooLong(TagType, usize, usize),
    #[error("nesting depth exceeds {}", MAX_DEPTH)]
    DepthLimitExceeded,
    #[error("root value must be a compound (got {0})")]
    RootNotCompound(TagType),
    #[cfg(feature = "base64")]
    #[error(transparent)]
    Base64(#[from] base64::DecodeError),
    #[error(transparent)]
    Io(io::Error),
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            Error::Truncated
        } else {
            Error::Io(e)
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
