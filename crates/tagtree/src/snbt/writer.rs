use std::fmt::Display;

use owo_colors::{OwoColorize, Style};

use crate::{Compound, List, Tag};

/// What a piece of colored output represents.
#[derive(Copy, Clone)]
enum Part {
    Key,
    String,
    Number,
    Suffix,
}

impl Part {
    fn style(self) -> Style {
        match self {
            Part::Key => Style::new().cyan(),
            Part::String => Style::new().green(),
            Part::Number => Style::new().yellow(),
            Part::Suffix => Style::new().red(),
        }
    }
}

/// Renders tags as SNBT text.
///
/// The plain form can be parsed back with [`parse`](super::parse). The
/// colored form adds ANSI escapes and spacing for terminals and is not meant
/// to be parsed.
pub struct SnbtWriter<'a> {
    output: &'a mut String,
    colored: bool,
}

impl<'a> SnbtWriter<'a> {
    pub fn new(output: &'a mut String) -> Self {
        Self {
            output,
            colored: false,
        }
    }

    pub fn colored(output: &'a mut String) -> Self {
        Self {
            output,
            colored: true,
        }
    }

    fn push(&mut self, text: &str, part: Part) {
        if self.colored {
            self.output.push_str(&text.style(part.style()).to_string());
        } else {
            self.output.push_str(text);
        }
    }

    fn push_separator(&mut self) {
        self.output.push_str(if self.colored { ", " } else { "," });
    }

    fn write_string(&mut self, s: &str, part: Part) {
        let mut quoted = String::with_capacity(s.len() + 2);

        quoted.push('"');
        for c in s.chars() {
            match c {
                '"' => quoted.push_str("\\\""),
                '\\' => quoted.push_str("\\\\"),
                _ => quoted.push(c),
            }
        }
        quoted.push('"');

        self.push(&quoted, part);
    }

    fn write_number(&mut self, value: impl Display, suffix: &str) {
        self.push(&value.to_string(), Part::Number);

        if !suffix.is_empty() {
            self.push(suffix, Part::Suffix);
        }
    }

    fn write_array<T: Display>(&mut self, prefix: &str, values: &[T], suffix: &str) {
        self.output.push('[');
        self.output.push_str(prefix);
        for (i, v) in values.iter().enumerate() {
            if i > 0 {
                self.push_separator();
            }
            self.write_number(v, suffix);
        }
        self.output.push(']');
    }

    fn write_list(&mut self, list: &List) {
        self.output.push('[');
        for (i, v) in list.iter().enumerate() {
            if i > 0 {
                self.push_separator();
            }
            self.write_element(v);
        }
        self.output.push(']');
    }

    fn write_compound(&mut self, compound: &Compound) {
        self.output.push('{');
        // End entries have no textual form.
        for (i, (k, v)) in compound.iter().filter(|(_, v)| !v.is_end()).enumerate() {
            if i > 0 {
                self.push_separator();
            }
            self.write_string(k, Part::Key);
            self.output.push_str(if self.colored { ": " } else { ":" });
            self.write_element(v);
        }
        self.output.push('}');
    }

    /// Writes a tag to the output. [`Tag::End`] writes nothing.
    pub fn write_element(&mut self, tag: &Tag) {
        match tag {
            Tag::End => {}
            Tag::Byte(v) => self.write_number(v, "b"),
            Tag::Short(v) => self.write_number(v, "s"),
            Tag::Int(v) => self.write_number(v, ""),
            Tag::Long(v) => self.write_number(v, "L"),
            Tag::Float(v) => self.write_number(v, "f"),
            Tag::Double(v) => self.write_number(v, "d"),
            Tag::ByteArray(v) => self.write_array("B;", v, "b"),
            Tag::String(v) => self.write_string(v, Part::String),
            Tag::List(v) => self.write_list(v),
            Tag::Compound(v) => self.write_compound(v),
            Tag::IntArray(v) => self.write_array("I;", v, ""),
            Tag::LongArray(v) => self.write_array("L;", v, "L"),
        }
    }
}

/// Converts a tag to plain SNBT.
pub fn to_snbt_string(tag: &Tag) -> String {
    let mut output = String::new();
    SnbtWriter::new(&mut output).write_element(tag);
    output
}

/// Converts a tag to colored SNBT for display in a terminal.
pub fn to_snbt_colored(tag: &Tag) -> String {
    let mut output = String::new();
    SnbtWriter::colored(&mut output).write_element(tag);
    output
}
