use thiserror::Error;

use crate::{AccessError, ListError, ZeroValueError};

/// Any error produced by this crate.
///
/// Every module has its own error type. This one exists so that applications
/// touching several of them can use a single type with `?`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[cfg(feature = "binary")]
    #[error(transparent)]
    Binary(#[from] crate::binary::Error),
    #[cfg(feature = "snbt")]
    #[error(transparent)]
    Snbt(#[from] crate::snbt::SnbtError),
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error(transparent)]
    List(#[from] ListError),
    #[error(transparent)]
    ZeroValue(#[from] ZeroValueError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
