use std::sync::OnceLock;

use regex::Regex;
use tracing::trace;

use super::{SnbtError, SnbtErrorKind, MAX_DEPTH, STRING_MAX_LEN};
use crate::{Compound, List, Tag, TagType};

type Result<T> = std::result::Result<T, SnbtError>;

/// Numeric literal forms, in the order they are tried. A token is only a
/// number if it matches one of these in full.
const NUMBER_PATTERN: &str = concat!(
    r"(?i)^(?:",
    r"(?P<float>[-+]?(?:[0-9]+\.?|[0-9]*\.[0-9]+)(?:e[-+]?[0-9]+)?)f",
    r"|(?P<byte>[-+]?(?:0|[1-9][0-9]*))b",
    r"|(?P<short>[-+]?(?:0|[1-9][0-9]*))s",
    r"|(?P<long>[-+]?(?:0|[1-9][0-9]*))l",
    r"|(?P<int>[-+]?(?:0|[1-9][0-9]*))",
    r"|(?P<double>[-+]?(?:[0-9]+\.?|[0-9]*\.[0-9]+)(?:e[-+]?[0-9]+)?)d",
    r"|(?P<double_ns>[-+]?(?:[0-9]+\.|[0-9]*\.[0-9]+)(?:e[-+]?[0-9]+)?)",
    r")$",
);

const NUMBER_GROUPS: [&str; 7] = ["float", "byte", "short", "long", "int", "double", "double_ns"];

fn number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(NUMBER_PATTERN).expect("number pattern is valid"))
}

/// Classifies an unquoted token as a numeric tag.
///
/// Returns `None` if the token doesn't look like a number, or if it does but
/// the value is out of range for its type.
fn classify_number(token: &str) -> Option<Tag> {
    let caps = number_pattern().captures(token)?;

    let (group, digits) = NUMBER_GROUPS
        .into_iter()
        .find_map(|g| caps.name(g).map(|m| (g, m.as_str())))?;

    match group {
        "float" => digits.parse::<f32>().ok().map(Tag::Float),
        "byte" => digits.parse::<i8>().ok().map(Tag::Byte),
        "short" => digits.parse::<i16>().ok().map(Tag::Short),
        "long" => digits.parse::<i64>().ok().map(Tag::Long),
        "int" => digits.parse::<i32>().ok().map(Tag::Int),
        _ => digits.parse::<f64>().ok().map(Tag::Double),
    }
}

/// A recursive descent parser over SNBT text.
pub struct SnbtReader<'a> {
    input: &'a str,
    /// Byte offset of the next unread character.
    index: usize,
    line: usize,
    column: usize,
    depth: usize,
}

impl<'a> SnbtReader<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            index: 0,
            line: 1,
            column: 1,
            depth: 0,
        }
    }

    fn check_depth<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_DEPTH {
            Err(self.make_error(SnbtErrorKind::DepthLimitExceeded))
        } else {
            self.depth += 1;
            let res = f(self);
            self.depth -= 1;
            res
        }
    }

    fn make_error(&self, kind: SnbtErrorKind) -> SnbtError {
        SnbtError {
            kind,
            line: self.line,
            column: self.column,
            offset: self.index,
        }
    }

    /// Returns the character `n` positions ahead of the cursor.
    fn peek_nth(&self, n: usize) -> Option<char> {
        self.input[self.index..].chars().nth(n)
    }

    fn peek(&self) -> Result<char> {
        self.peek_nth(0)
            .ok_or_else(|| self.make_error(SnbtErrorKind::ReachEndOfStream))
    }

    fn next(&mut self) {
        if let Some(c) = self.peek_nth(0) {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            self.index += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_nth(0).is_some_and(char::is_whitespace) {
            self.next();
        }
    }

    /// Consumes the `,` after an element, or stops in front of `close`.
    fn skip_separator(&mut self, close: char) -> Result<()> {
        self.skip_whitespace();

        match self.peek()? {
            ',' => {
                self.next();
                self.skip_whitespace();

                if self.peek()? == close {
                    return Err(self.make_error(SnbtErrorKind::TrailingComma));
                }

                Ok(())
            }
            c if c == close => Ok(()),
            _ => Err(self.make_error(SnbtErrorKind::ExpectComma)),
        }
    }

    fn read_unquoted_string(&mut self) -> String {
        let mut result = String::new();

        while let Some(c @ ('a'..='z' | 'A'..='Z' | '0'..='9' | '_' | '-' | '+' | '.')) =
            self.peek_nth(0)
        {
            result.push(c);
            self.next();
        }

        result
    }

    fn read_quoted_string(&mut self) -> Result<String> {
        let quote = self.peek()?;
        self.next();

        let mut result = String::new();
        loop {
            match self.peek()? {
                c if c == quote => {
                    self.next();
                    break;
                }
                '\\' => {
                    self.next();
                    let escape = self.peek()?;
                    if escape == quote || escape == '\\' {
                        result.push(escape);
                    } else {
                        return Err(self.make_error(SnbtErrorKind::InvalidEscapeSequence));
                    }
                    self.next();
                }
                c => {
                    result.push(c);
                    self.next();
                }
            }
        }

        if result.len() > STRING_MAX_LEN {
            return Err(self.make_error(SnbtErrorKind::LongString));
        }

        Ok(result)
    }

    fn read_key(&mut self) -> Result<String> {
        match self.peek()? {
            // Quoted keys may be empty.
            '"' | '\'' => self.read_quoted_string(),
            _ => {
                let key = self.read_unquoted_string();
                if key.is_empty() {
                    return Err(self.make_error(SnbtErrorKind::EmptyKeyInCompound));
                }
                if key.len() > STRING_MAX_LEN {
                    return Err(self.make_error(SnbtErrorKind::LongString));
                }
                Ok(key)
            }
        }
    }

    fn parse_struct(&mut self) -> Result<Compound> {
        self.next();
        self.skip_whitespace();

        let mut compound = Compound::new();
        while self.peek()? != '}' {
            let key = self.read_key()?;
            self.skip_whitespace();

            if self.peek()? != ':' {
                return Err(self.make_error(SnbtErrorKind::ExpectColon));
            }
            self.next();

            let value = self.parse_element()?;
            compound.insert(key, value);

            self.skip_separator('}')?;
        }
        self.next();

        Ok(compound)
    }

    fn parse_list(&mut self) -> Result<List> {
        self.next();
        self.skip_whitespace();

        let mut list = List::new();
        while self.peek()? != ']' {
            let value = self.parse_element()?;
            if list.push(value).is_err() {
                return Err(self.make_error(SnbtErrorKind::DifferentTypesInList));
            }

            self.skip_separator(']')?;
        }
        self.next();

        Ok(list)
    }

    fn parse_list_like(&mut self) -> Result<Tag> {
        // `[X;` where X isn't a quote opens a typed array.
        let is_array = matches!(
            (self.peek_nth(1), self.peek_nth(2)),
            (Some(c), Some(';')) if c != '"' && c != '\''
        );

        if !is_array {
            return self.check_depth(|st| st.parse_list().map(Tag::List));
        }

        self.check_depth(|st| {
            st.next();
            let type_char = st.peek()?;
            st.next();
            st.next();

            match type_char {
                'B' => st
                    .parse_array(TagType::Byte, Tag::as_byte)
                    .map(Tag::ByteArray),
                'I' => st
                    .parse_array(TagType::Int, Tag::as_int)
                    .map(Tag::IntArray),
                'L' => st
                    .parse_array(TagType::Long, Tag::as_long)
                    .map(Tag::LongArray),
                _ => Err(st.make_error(SnbtErrorKind::InvalidArrayType)),
            }
        })
    }

    /// Parses the elements of a typed array after the `[X;` prefix. Every
    /// element must be exactly of type `ty`.
    fn parse_array<T>(&mut self, ty: TagType, get: fn(&Tag) -> Option<T>) -> Result<Vec<T>> {
        self.skip_whitespace();

        let mut values = vec![];
        while self.peek()? != ']' {
            let value = self.parse_element()?;
            match get(&value) {
                Some(v) if value.tag_type() == ty => values.push(v),
                _ => return Err(self.make_error(SnbtErrorKind::WrongTypeInArray)),
            }

            self.skip_separator(']')?;
        }
        self.next();

        Ok(values)
    }

    fn parse_primitive(&mut self) -> Result<Tag> {
        let token = self.read_unquoted_string();

        if token.is_empty() {
            return Err(self.make_error(SnbtErrorKind::ExpectValue));
        }

        if let Some(tag) = classify_number(&token) {
            return Ok(tag);
        }

        if token.eq_ignore_ascii_case("true") {
            return Ok(Tag::Byte(1));
        }
        if token.eq_ignore_ascii_case("false") {
            return Ok(Tag::Byte(0));
        }

        if token.len() > STRING_MAX_LEN {
            return Err(self.make_error(SnbtErrorKind::LongString));
        }

        Ok(Tag::String(token))
    }

    /// Reads the next element in the SNBT string.
    ///
    /// [`SnbtErrorKind::TrailingData`] cannot be returned because it is not
    /// considered to be an error here.
    pub fn parse_element(&mut self) -> Result<Tag> {
        self.skip_whitespace();

        match self.peek()? {
            '{' => self.check_depth(|st| st.parse_struct().map(Tag::Compound)),
            '[' => self.parse_list_like(),
            '"' | '\'' => self.read_quoted_string().map(Tag::String),
            _ => self.parse_primitive(),
        }
    }

    fn expect_end(&mut self) -> Result<()> {
        self.skip_whitespace();

        if self.peek_nth(0).is_some() {
            return Err(self.make_error(SnbtErrorKind::TrailingData));
        }

        Ok(())
    }

    /// Reads exactly one element. Anything but whitespace after it is an
    /// error.
    pub fn read(&mut self) -> Result<Tag> {
        let value = self.parse_element()?;
        self.expect_end()?;
        Ok(value)
    }

    /// Like [`read`](Self::read), but the element must be a compound.
    pub fn read_compound(&mut self) -> Result<Compound> {
        self.skip_whitespace();

        if self.peek()? != '{' {
            return Err(self.make_error(SnbtErrorKind::ExpectCompound));
        }

        let compound = self.check_depth(|st| st.parse_struct())?;
        self.expect_end()?;
        Ok(compound)
    }

    /// Gets the number of bytes read.
    ///
    /// Useful for reading SNBT from a command argument where more input may
    /// follow the value.
    pub fn bytes_read(&self) -> usize {
        self.index
    }
}

/// Parses any single SNBT value.
pub fn parse(snbt: &str) -> Result<Tag> {
    trace!(len = snbt.len(), "parsing snbt");
    SnbtReader::new(snbt).read()
}

/// Parses SNBT text that must consist of exactly one compound.
///
/// # Examples
///
/// ```
/// use tagtree::snbt::parse_compound;
///
/// let c = parse_compound(r#"{"a":1,"b":[1,2,3],"c":{"x":"y"}}"#).unwrap();
///
/// assert_eq!(c.get_int("a"), Ok(1));
/// assert_eq!(c.get_list("b").unwrap().len(), 3);
///
/// assert!(parse_compound("[1, 2]").is_err());
/// ```
pub fn parse_compound(snbt: &str) -> Result<Compound> {
    trace!(len = snbt.len(), "parsing snbt compound");
    SnbtReader::new(snbt).read_compound()
}
