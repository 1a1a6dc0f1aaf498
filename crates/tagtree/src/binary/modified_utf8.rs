//! Utilities for working with Java's "Modified UTF-8" character encoding.
//!
//! It differs from UTF-8 in two ways: the NUL character is written as the two
//! byte sequence `C0 80`, and characters outside the basic multilingual plane
//! are written as a UTF-16 surrogate pair with each half encoded on its own
//! in three bytes.
//!
//! For more information, refer to [Wikipedia].
//!
//! [Wikipedia]: https://en.wikipedia.org/wiki/UTF-8#Modified_UTF-8

use std::borrow::Cow;
use std::io;
use std::io::Write;

pub(crate) fn encoded_len(text: &str) -> usize {
    // Fast path for ASCII. Only NUL needs more than its UTF-8 width there.
    if text.bytes().all(|b| (1..=127).contains(&b)) {
        return text.len();
    }

    text.chars()
        .map(|c| match c as u32 {
            0 => 2,
            0x10000.. => 6,
            _ => c.len_utf8(),
        })
        .sum()
}

pub(crate) fn write_modified_utf8<W: Write + ?Sized>(writer: &mut W, text: &str) -> io::Result<()> {
    let mut buf = Vec::with_capacity(encoded_len(text));

    for c in text.chars() {
        match c as u32 {
            0 => buf.extend_from_slice(&[0xc0, 0x80]),
            code @ 0x10000.. => {
                let c = code - 0x10000;

                let s0 = ((c >> 10) as u16) | 0xd800;
                let s1 = ((c & 0x3ff) as u16) | 0xdc00;

                buf.extend_from_slice(&encode_surrogate(s0));
                buf.extend_from_slice(&encode_surrogate(s1));
            }
            _ => buf.extend_from_slice(c.encode_utf8(&mut [0; 4]).as_bytes()),
        }
    }

    writer.write_all(&buf)
}

fn encode_surrogate(surrogate: u16) -> [u8; 3] {
    debug_assert!((0xd800..=0xdfff).contains(&surrogate));

    const TAG_CONT_U8: u8 = 0b1000_0000_u8;
    [
        0b1110_0000 | ((surrogate & 0b1111_0000_0000_0000) >> 12) as u8,
        TAG_CONT_U8 | ((surrogate & 0b0000_1111_1100_0000) >> 6) as u8,
        TAG_CONT_U8 | (surrogate & 0b0000_0000_0011_1111) as u8,
    ]
}

pub(crate) fn decode_modified_utf8(bytes: &[u8]) -> Option<Cow<'_, str>> {
    cesu8::from_java_cesu8(bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(s: &str) {
        let mut ours = vec![];

        let theirs = cesu8::to_java_cesu8(s);
        write_modified_utf8(&mut ours, s).unwrap();

        assert_eq!(theirs, ours);
        assert_eq!(theirs.len(), encoded_len(s));
        assert_eq!(decode_modified_utf8(&ours).as_deref(), Some(s));
    }

    #[test]
    fn equivalence() {
        check("Mary had a little lamb\0");
        check("🤡💩👻💀☠👽👾🤖🎃😺😸😹😻😼😽🙀😿😾");
        check("ÅÆÇÈØõ÷£¥ý");
        check("");
    }

    #[test]
    fn nul_is_two_bytes() {
        let mut buf = vec![];
        write_modified_utf8(&mut buf, "a\0b").unwrap();
        assert_eq!(buf, [b'a', 0xc0, 0x80, b'b']);
    }

    #[test]
    fn supplementary_chars_are_surrogate_pairs() {
        let mut buf = vec![];
        write_modified_utf8(&mut buf, "😀").unwrap();
        assert_eq!(buf, [0xed, 0xa0, 0xbd, 0xed, 0xb8, 0x80]);
    }
}
