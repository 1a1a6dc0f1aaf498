#![doc = include_str!("../README.md")]
// Run locally with `RUSTDOCFLAGS="--cfg docsrs" cargo +nightly doc --all-features --open`
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use access::AccessError;
pub use compound::Compound;
pub use error::{Error, Result};
pub use list::{List, ListError};
pub use tag::Tag;
pub use tag_type::{Payload, TagType, ZeroValueError};

pub mod access;
#[cfg(feature = "binary")]
#[cfg_attr(docsrs, doc(cfg(feature = "binary")))]
pub mod binary;
pub mod compound;
mod error;
pub mod list;
#[cfg(feature = "snbt")]
#[cfg_attr(docsrs, doc(cfg(feature = "snbt")))]
pub mod snbt;
mod tag;
mod tag_type;

/// A convenience macro for constructing [`Compound`]s.
///
/// Key expressions must implement `Into<String>` while value expressions must
/// implement `Into<Tag>`. Entries keep the order in which they are written.
///
/// # Examples
///
/// ```
/// use tagtree::{compound, List, Tag};
///
/// let c = compound! {
///     "byte" => 123_i8,
///     "list_of_int" => List::try_from(vec![Tag::Int(3), Tag::Int(-7)]).unwrap(),
///     "string" => "aé日",
///     "compound" => compound! {
///         "foo" => 1,
///         "bar" => 2,
///     },
///     "int_array" => vec![5, -9, i32::MIN, 0, i32::MAX],
///     "byte_array" => vec![0_i8, 2, 3],
///     "long_array" => vec![123_i64, 456, 789],
/// };
///
/// assert_eq!(c.keys().next().map(String::as_str), Some("byte"));
/// ```
#[macro_export]
macro_rules! compound {
    ($($key:expr => $value:expr),* $(,)?) => {
        <$crate::Compound as ::std::iter::FromIterator<(::std::string::String, $crate::Tag)>>::from_iter([
            $(
                (
                    ::std::convert::Into::<::std::string::String>::into($key),
                    ::std::convert::Into::<$crate::Tag>::into($value)
                ),
            )*
        ])
    };
}
