//! Properties decoding.
//!
//! This module turns a byte stream into logical lines and logical lines into
//! key-value pairs.
//!
//! ## Overview
//!
//! - **Natural lines** end with `\n`, `\r`, `\r\n` or the end of the stream
//! - **Logical lines** join natural lines whose end-of-line is escaped by an
//!   odd number of backslashes; the backslash, the end-of-line and the
//!   leading whitespace of the next line are dropped
//! - **Comments** start with `#` or `!` and never continue
//! - **Blank lines** are skipped
//!
//! ## Usage
//!
//! Most users should go through [`Table::load`](crate::Table::load):
//!
//! ```rust
//! use proptable::de::{split_entry, LogicalLine, LogicalLines};
//!
//! let input = "# settings\nlanguages Assembly, \\\n    Lisp\n";
//! let mut lines = LogicalLines::new(input.as_bytes());
//!
//! assert!(matches!(lines.next(), Some(Ok(LogicalLine::Comment(_)))));
//! match lines.next() {
//!     Some(Ok(LogicalLine::Entry(bytes))) => {
//!         let (key, value) = split_entry(&bytes);
//!         assert_eq!(key, "languages");
//!         assert_eq!(value, "Assembly, Lisp");
//!     }
//!     other => panic!("unexpected: {:?}", other),
//! }
//! assert!(lines.next().is_none());
//! ```

use crate::escape::unescape;
use std::io::{self, BufRead};

/// One comment or one key-value record, with continuations joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogicalLine {
    /// A comment, including its `#` or `!` prefix.
    Comment(Vec<u8>),
    /// The raw, still escaped bytes of a key-value record.
    Entry(Vec<u8>),
}

#[inline]
fn is_whitespace_byte(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\x0c')
}

/// Lazy sequence of logical lines read from a buffered byte stream.
///
/// Iteration stops at the end of the stream. When an I/O error interrupts a
/// line, the bytes read so far are yielded first and the error after them.
/// The error is yielded once, after which the iterator is exhausted.
pub struct LogicalLines<R> {
    reader: R,
    pending: Option<io::Error>,
    finished: bool,
}

impl<R: BufRead> LogicalLines<R> {
    pub fn new(reader: R) -> Self {
        LogicalLines {
            reader,
            pending: None,
            finished: false,
        }
    }

    fn peek_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = self.peek_byte()?;
        if byte.is_some() {
            self.reader.consume(1);
        }
        Ok(byte)
    }

    /// Reads the next logical line, or `None` at the end of the stream.
    /// Blank lines come back as empty entries.
    fn read_logical_line(&mut self) -> io::Result<Option<LogicalLine>> {
        let mut buf = Vec::new();
        let mut comment = false;
        let started = match self.read_into(&mut buf, &mut comment) {
            Ok(started) => started,
            Err(e) if buf.is_empty() => return Err(e),
            Err(e) => {
                self.pending = Some(e);
                true
            }
        };
        Ok(started.then(|| {
            if comment {
                LogicalLine::Comment(buf)
            } else {
                LogicalLine::Entry(buf)
            }
        }))
    }

    /// Appends the bytes of one logical line to `buf`. Returns `false` if the
    /// stream ended before any byte was read.
    fn read_into(&mut self, buf: &mut Vec<u8>, comment: &mut bool) -> io::Result<bool> {
        let mut started = false;
        loop {
            let Some(mut byte) = self.next_byte()? else {
                return Ok(started);
            };
            started = true;
            while is_whitespace_byte(byte) {
                match self.next_byte()? {
                    Some(b) => byte = b,
                    None => return Ok(true),
                }
            }

            *comment = buf.is_empty() && matches!(byte, b'#' | b'!');
            // parity of the trailing backslash run on this natural line
            let mut escaped = false;
            while byte != b'\n' && byte != b'\r' {
                escaped = byte == b'\\' && !escaped;
                buf.push(byte);
                match self.next_byte()? {
                    Some(b) => byte = b,
                    None => return Ok(true),
                }
            }
            let continued = escaped && !*comment;
            if continued {
                buf.pop();
            }
            if byte == b'\r' && self.peek_byte()? == Some(b'\n') {
                self.reader.consume(1);
            }
            if !continued {
                return Ok(true);
            }
        }
    }
}

impl<R: BufRead> Iterator for LogicalLines<R> {
    type Item = io::Result<LogicalLine>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            if let Some(e) = self.pending.take() {
                self.finished = true;
                return Some(Err(e));
            }
            match self.read_logical_line() {
                Ok(Some(LogicalLine::Entry(bytes))) if bytes.is_empty() => continue,
                Ok(Some(line)) => return Some(Ok(line)),
                Ok(None) => self.finished = true,
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }
        None
    }
}

/// Splits the bytes of a record into its decoded key and value.
///
/// The key ends at the first unescaped whitespace, `=` or `:`. Whitespace and
/// delimiters right after the key are skipped and the rest is the value.
///
/// # Examples
///
/// ```rust
/// use proptable::de::split_entry;
///
/// assert_eq!(
///     split_entry(br"fourth\ key\ : \ fourth value"),
///     ("fourth key ".to_string(), " fourth value".to_string())
/// );
/// assert_eq!(split_entry(b"empty"), ("empty".to_string(), String::new()));
/// ```
pub fn split_entry(line: &[u8]) -> (String, String) {
    let (key, offset) = unescape(line, true);
    let (value, _) = unescape(&line[offset..], false);
    (key, value)
}
