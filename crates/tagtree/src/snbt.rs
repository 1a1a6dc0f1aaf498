//! Parsing and printing the textual SNBT ("Mojangson") format.
//!
//! SNBT is quite similar to JSON, but numbers carry a type suffix, typed
//! arrays are written `[B;…]`, `[I;…]` or `[L;…]`, and keys and strings may be
//! left unquoted when they only contain `[a-zA-Z0-9_+.-]`. See
//! [the wiki](https://minecraft.wiki/w/NBT_format#SNBT_format) for more
//! information.
//!
//! # Examples
//!
//! ```
//! use tagtree::snbt::{parse, to_snbt_string};
//! use tagtree::Tag;
//!
//! assert_eq!(parse("5b").unwrap(), Tag::Byte(5));
//! assert_eq!(parse("5.0f").unwrap(), Tag::Float(5.0));
//! assert_eq!(parse("hello").unwrap(), Tag::String("hello".into()));
//!
//! let tag = parse("{name: 'Steve', pos: [I; 1, 2, 3]}").unwrap();
//!
//! assert_eq!(to_snbt_string(&tag), r#"{"name":"Steve","pos":[I;1,2,3]}"#);
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::Tag;

mod reader;
mod writer;

pub use reader::*;
pub use writer::*;

/// Maximum length in bytes of a single string literal.
pub const STRING_MAX_LEN: usize = 32767;
/// Maximum nesting of lists and compounds, to avoid overflowing the call
/// stack.
pub const MAX_DEPTH: usize = 512;

#[derive(Copy, Clone, PartialEq, Eq, Debug, Error)]
#[non_exhaustive]
pub enum SnbtErrorKind {
    #[error("reach end of stream")]
    ReachEndOfStream,
    #[error("invalid escape sequence")]
    InvalidEscapeSequence,
    #[error("empty key in compound")]
    EmptyKeyInCompound,
    #[error("expect colon")]
    ExpectColon,
    #[error("expect value")]
    ExpectValue,
    #[error("expect comma")]
    ExpectComma,
    #[error("expect compound")]
    ExpectCompound,
    #[error("trailing comma")]
    TrailingComma,
    #[error("invalid array type")]
    InvalidArrayType,
    #[error("wrong type in array")]
    WrongTypeInArray,
    #[error("different types in list")]
    DifferentTypesInList,
    #[error("long string")]
    LongString,
    #[error("extra data after end")]
    TrailingData,
    #[error("depth limit exceeded")]
    DepthLimitExceeded,
}

/// A syntax error along with where in the input it was found.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Error)]
#[error("@ {line},{column}: {kind}")]
pub struct SnbtError {
    pub kind: SnbtErrorKind,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
    /// Byte offset into the input.
    pub offset: usize,
}

impl FromStr for Tag {
    type Err = SnbtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Formats the tag as plain SNBT. The alternate flag (`{:#}`) selects the
/// colored form.
impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str(&to_snbt_colored(self))
        } else {
            f.write_str(&to_snbt_string(self))
        }
    }
}
