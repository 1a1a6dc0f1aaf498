//! Reading and writing framed tags from files, streams and base64 text.
//!
//! ```
//! use tagtree::binary::file::{read_named, write_named, Compression};
//! use tagtree::{compound, Tag};
//!
//! let tag = Tag::Compound(compound! { "hello" => "world" });
//!
//! let mut buf = vec![];
//! write_named(&mut buf, "root", &tag, Compression::Gzip).unwrap();
//!
//! let (name, decoded) = read_named(buf.as_slice(), Compression::Gzip).unwrap();
//!
//! assert_eq!(name, "root");
//! assert_eq!(decoded, tag);
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

#[cfg(feature = "base64")]
use base64::prelude::*;
#[cfg(feature = "gzip")]
use flate2::read::GzDecoder;
#[cfg(feature = "gzip")]
use flate2::write::GzEncoder;
use tracing::debug;

use super::{decode, encode, Result};
use crate::Tag;

/// The compression applied around the binary encoding.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Compression {
    #[default]
    None,
    #[cfg(feature = "gzip")]
    #[cfg_attr(docsrs, doc(cfg(feature = "gzip")))]
    Gzip,
}

/// Reads one framed tag from `reader`, decompressing it first if needed.
pub fn read_named<R: Read>(mut reader: R, compression: Compression) -> Result<(String, Tag)> {
    let res = match compression {
        Compression::None => decode(&mut reader),
        #[cfg(feature = "gzip")]
        Compression::Gzip => decode(&mut GzDecoder::new(reader)),
    };

    if let Err(e) = &res {
        debug!(?compression, error = %e, "failed to decode tag");
    }

    res
}

/// Writes one framed tag to `writer`, compressing it if needed.
pub fn write_named<W: Write>(
    mut writer: W,
    name: &str,
    tag: &Tag,
    compression: Compression,
) -> Result<()> {
    match compression {
        Compression::None => encode(&mut writer, name, tag),
        #[cfg(feature = "gzip")]
        Compression::Gzip => {
            let mut z = GzEncoder::new(writer, flate2::Compression::default());
            encode(&mut z, name, tag)?;
            z.finish()?;
            Ok(())
        }
    }
}

/// Reads one framed tag from the file at `path`.
pub fn read_file(path: impl AsRef<Path>, compression: Compression) -> Result<(String, Tag)> {
    let path = path.as_ref();
    debug!(path = %path.display(), ?compression, "reading tag file");

    let file = File::open(path)?;
    let (name, tag) = read_named(BufReader::new(file), compression)?;

    debug!(path = %path.display(), root_name = %name, "read tag file");

    Ok((name, tag))
}

/// Writes one framed tag to the file at `path`, replacing its contents.
pub fn write_file(
    path: impl AsRef<Path>,
    name: &str,
    tag: &Tag,
    compression: Compression,
) -> Result<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), ?compression, root_name = %name, "writing tag file");

    let mut writer = BufWriter::new(File::create(path)?);
    write_named(&mut writer, name, tag, compression)?;
    writer.flush()?;

    Ok(())
}

/// Encodes one framed tag and returns it as standard base64 text.
#[cfg(feature = "base64")]
#[cfg_attr(docsrs, doc(cfg(feature = "base64")))]
pub fn to_base64(name: &str, tag: &Tag, compression: Compression) -> Result<String> {
    let mut buf = vec![];
    write_named(&mut buf, name, tag, compression)?;

    Ok(BASE64_STANDARD.encode(buf))
}

/// Decodes one framed tag from standard base64 text.
#[cfg(feature = "base64")]
#[cfg_attr(docsrs, doc(cfg(feature = "base64")))]
pub fn from_base64(text: &str, compression: Compression) -> Result<(String, Tag)> {
    let bytes = BASE64_STANDARD.decode(text.trim())?;

    read_named(bytes.as_slice(), compression)
}

#[cfg(all(test, feature = "gzip", feature = "base64"))]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::binary::Error;
    use crate::{compound, List};

    fn sample() -> Tag {
        Tag::Compound(compound! {
            "name" => "Bananrama",
            "pos" => List::try_from(vec![Tag::Double(1.5), Tag::Double(-64.0), Tag::Double(0.0)]).unwrap(),
            "inventory" => compound! { "slots" => vec![1_i8, 2, 3] },
        })
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();

        for compression in [Compression::None, Compression::Gzip] {
            let path = dir.path().join(format!("{compression:?}.dat"));

            write_file(&path, "level", &sample(), compression).unwrap();
            let (name, tag) = read_file(&path, compression).unwrap();

            assert_eq!(name, "level");
            assert_eq!(tag, sample());
        }
    }

    #[test]
    fn gzip_output_has_magic() {
        let mut buf = vec![];
        write_named(&mut buf, "", &sample(), Compression::Gzip).unwrap();

        assert_eq!(&buf[..2], [0x1f, 0x8b]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = read_file(dir.path().join("nope.dat"), Compression::None).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn base64_round_trip() {
        for compression in [Compression::None, Compression::Gzip] {
            let text = to_base64("", &sample(), compression).unwrap();
            let (name, tag) = from_base64(&text, compression).unwrap();

            assert_eq!(name, "");
            assert_eq!(tag, sample());
        }
    }

    #[test]
    fn base64_known_value() {
        let text = to_base64("", &Tag::Compound(compound! { "id" => 7_i16 }), Compression::None)
            .unwrap();

        assert_eq!(text, "CgAAAgACaWQABwA=");
    }

    #[test]
    fn invalid_base64() {
        let err = from_base64("not base64!", Compression::None).unwrap_err();
        assert!(matches!(err, Error::Base64(_)));
    }
}
