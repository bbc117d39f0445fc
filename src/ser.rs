//! Properties encoding.
//!
//! This module provides the [`Serializer`] that writes key-value records and
//! comment blocks in a form [`Table::load`](crate::Table::load) reads back.
//!
//! ## Overview
//!
//! Keys and values are escaped differently:
//!
//! - **Keys**: whitespace, `=`, `:`, `#` and `!` get a backslash prefix
//! - **Values**: only a leading whitespace or delimiter gets a backslash;
//!   `#` and `!` are escaped anywhere
//! - **Both**: `\n` and `\r` become `\n` and `\r` escapes and a literal
//!   backslash is doubled
//! - **ASCII-safe mode**: every character outside `' '..='~'` becomes a
//!   `\uXXXX` escape (two of them above U+FFFF)
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use proptable::{Serializer, StoreOptions};
//!
//! let mut serializer = Serializer::new(Vec::new(), StoreOptions::ascii());
//! serializer.write_comments("generated").unwrap();
//! serializer.write_entry("greeting", "h\u{e9}llo").unwrap();
//!
//! let text = String::from_utf8(serializer.into_inner()).unwrap();
//! assert_eq!(text, "#generated\ngreeting=h\\u00e9llo\n");
//! ```

use crate::escape::{encode_escape, is_comment_prefix, is_delimiter, is_whitespace};
use crate::{Error, Result, StoreOptions};
use std::io::Write;

#[inline]
fn is_key_special(ch: char) -> bool {
    is_whitespace(ch) || is_delimiter(ch) || is_comment_prefix(ch)
}

/// Appends `ch`, escaped for a key or a value.
///
/// `needs_prefix` picks the characters written with a leading backslash.
#[inline]
fn push_escaped(out: &mut String, ch: char, ascii: bool, needs_prefix: fn(char) -> bool) {
    if ascii && encode_escape(ch, out) {
        return;
    }
    match ch {
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\\' => out.push_str("\\\\"),
        _ => {
            if needs_prefix(ch) {
                out.push('\\');
            }
            out.push(ch);
        }
    }
}

/// Encodes one `key=value` record, without a line terminator.
///
/// # Examples
///
/// ```rust
/// use proptable::ser::encode_pair;
///
/// assert_eq!(encode_pair("second key", "second value", false), "second\\ key=second value");
/// assert_eq!(encode_pair("k", " leading and  inner", false), "k=\\ leading and  inner");
/// assert_eq!(encode_pair("third #key", "third !value", false), "third\\ \\#key=third \\!value");
/// assert_eq!(encode_pair("euro", "\u{20ac}", true), "euro=\\u20ac");
/// ```
pub fn encode_pair(key: &str, value: &str, ascii: bool) -> String {
    let mut out = String::with_capacity(key.len() + value.len() + 8);
    for ch in key.chars() {
        push_escaped(&mut out, ch, ascii, is_key_special);
    }
    out.push('=');

    let mut chars = value.chars();
    if let Some(first) = value.chars().next() {
        if is_whitespace(first) || is_delimiter(first) {
            chars.next();
            // a \uXXXX escape protects the character on its own
            if !(ascii && encode_escape(first, &mut out)) {
                out.push('\\');
                out.push(first);
            }
        }
    }
    for ch in chars {
        push_escaped(&mut out, ch, ascii, is_comment_prefix);
    }
    out
}

/// Encodes a comment block, without a trailing line terminator.
///
/// Every run of end-of-line characters becomes a single `\n`, and each line
/// not already starting with `#` or `!` gets a `#` prefix.
///
/// # Examples
///
/// ```rust
/// use proptable::ser::encode_comment;
///
/// assert_eq!(
///     encode_comment("The first\r\nproperties entry", false),
///     "#The first\n#properties entry"
/// );
/// assert_eq!(encode_comment("!kept\n\n\nsecond", false), "!kept\n#second");
/// ```
pub fn encode_comment(text: &str, ascii: bool) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    let lines = text
        .split(|c| c == '\n' || c == '\r')
        .filter(|line| !line.is_empty());
    for (i, line) in lines.enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if !line.starts_with(is_comment_prefix) {
            out.push('#');
        }
        for ch in line.chars() {
            if !(ascii && encode_escape(ch, &mut out)) {
                out.push(ch);
            }
        }
    }
    out
}

/// Writes properties records to an output stream.
///
/// Each record is followed by exactly one `\n`. A failed write is reported as
/// [`Error::Store`] with the number of records written so far; nothing already
/// written is taken back.
pub struct Serializer<W> {
    writer: W,
    options: StoreOptions,
    written: usize,
}

impl<W: Write> Serializer<W> {
    pub fn new(writer: W, options: StoreOptions) -> Self {
        Serializer {
            writer,
            options,
            written: 0,
        }
    }

    /// Number of records written so far.
    #[must_use]
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        self.writer
            .write_all(line.as_bytes())
            .and_then(|()| self.writer.write_all(b"\n"))
            .map_err(|e| Error::store(self.written, e))
    }

    /// Writes a comment block followed by a line terminator.
    ///
    /// Empty comments write nothing.
    pub fn write_comments(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        let block = encode_comment(text, self.options.ascii);
        self.write_line(&block)
    }

    pub fn write_entry(&mut self, key: &str, value: &str) -> Result<()> {
        let record = encode_pair(key, value, self.options.ascii);
        self.write_line(&record)?;
        self.written += 1;
        log::trace!("stored property {:?}", key);
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| Error::store(self.written, e))
    }
}
