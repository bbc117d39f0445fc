//! # proptable
//!
//! Reading and writing Java-style `.properties` files, with property tables
//! that fall back to a chain of defaults.
//!
//! ## What is a properties file?
//!
//! A line-oriented key-value format. Each logical line is blank, a comment,
//! or a key followed by its value:
//!
//! ```text
//! # comments start with '#' or '!'
//! Go = The Best Language
//! Go:The Best Language
//! Go                    :The Best Language
//! languages               Assembly, Lisp, Pascal, \
//!                         BASIC, C, Go
//! ```
//!
//! ## Key Features
//!
//! - **Forgiving parser**: there is no syntax error; malformed escapes decode
//!   to a substitute character
//! - **Line continuation**: an odd number of backslashes before the
//!   end-of-line joins the next line
//! - **Unicode escapes**: `\uXXXX` sequences, including surrogate pairs for
//!   characters above U+FFFF
//! - **ASCII-safe output**: optionally escape everything outside printable ASCII
//! - **Defaults**: tables can share a chain of fallback tables
//! - **Serde Compatible**: a [`Table`] serializes as a map of strings
//!
//! ## Quick Start
//!
//! ```rust
//! use proptable::{from_str, to_string, Table};
//!
//! let table: Table = from_str("second\\ key = second value\n").unwrap();
//! assert_eq!(table.get("second key"), "second value");
//!
//! let text = to_string(&table).unwrap();
//! assert_eq!(text, "second\\ key=second value\n");
//! ```
//!
//! ### Defaults
//!
//! ```rust
//! use proptable::{properties, Table};
//!
//! let defaults = properties! { "color" => "blue" }.into_shared();
//! let mut table = Table::with_defaults(defaults);
//! table.set("size", "large");
//!
//! assert_eq!(table.get("color"), "blue");
//! assert_eq!(table.keys(), vec!["size", "color"]);
//! ```
//!
//! ## Format Rules
//!
//! - Whitespace is space, tab and form feed; leading whitespace is ignored
//! - The key ends at the first unescaped whitespace, `=` or `:`; the
//!   whitespace and delimiters that follow are skipped
//! - The value runs to the end of the logical line, trailing whitespace
//!   included
//! - `\t`, `\n`, `\f`, `\r` and `\uXXXX` are escapes; a backslash before any
//!   other character is dropped
//! - Comments never continue on the next line
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - load, edit and store a table
//! - **`defaults.rs`** - tables sharing a defaults chain
//! - **`propcat.rs`** - a small command-line tool built on [`getopt`]
//!
//! Run any example with: `cargo run --example <name>`

pub mod de;
pub mod error;
pub mod escape;
pub mod getopt;
pub mod macros;
pub mod options;
pub mod ser;
pub mod table;

pub use de::{LogicalLine, LogicalLines};
pub use error::{Error, Result};
pub use options::StoreOptions;
pub use ser::Serializer;
pub use table::{SharedTable, Table};

use std::io;

/// Writes the pairs of `table` as UTF-8 properties text.
///
/// # Examples
///
/// ```rust
/// use proptable::{to_string, Table};
///
/// let mut table = Table::new();
/// table.set("key", "value");
/// assert_eq!(to_string(&table).unwrap(), "key=value\n");
/// ```
///
/// # Errors
///
/// Writing into memory does not fail in practice; the `Result` mirrors
/// [`to_writer`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string(table: &Table) -> Result<String> {
    to_string_with_options(table, &StoreOptions::default())
}

/// Writes `table` as properties text with custom options.
///
/// # Examples
///
/// ```rust
/// use proptable::{to_string_with_options, StoreOptions, Table};
///
/// let mut table = Table::new();
/// table.set("smile", "\u{1f600}");
/// let text = to_string_with_options(&table, &StoreOptions::ascii()).unwrap();
/// assert_eq!(text, "smile=\\ud83d\\ude00\n");
/// ```
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options(table: &Table, options: &StoreOptions) -> Result<String> {
    let mut buf = Vec::with_capacity(256);
    table.store_with(&mut buf, options)?;
    String::from_utf8(buf).map_err(Error::custom)
}

/// Writes the pairs of `table` to `writer`.
///
/// # Errors
///
/// Returns [`Error::Store`] if writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(writer: W, table: &Table) -> Result<usize>
where
    W: io::Write,
{
    to_writer_with_options(writer, table, &StoreOptions::default())
}

/// Writes `table` to `writer` with custom options.
///
/// # Errors
///
/// Returns [`Error::Store`] if writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W>(writer: W, table: &Table, options: &StoreOptions) -> Result<usize>
where
    W: io::Write,
{
    table.store_with(writer, options)
}

/// Reads a table from properties text.
///
/// # Examples
///
/// ```rust
/// use proptable::from_str;
///
/// let table = from_str("Go = The Best Language").unwrap();
/// assert_eq!(table.get("Go"), "The Best Language");
/// ```
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(s: &str) -> Result<Table> {
    let mut table = Table::new();
    table.load_str(s)?;
    Ok(table)
}

/// Reads a table from an I/O stream of properties text.
///
/// # Examples
///
/// ```rust
/// use proptable::from_reader;
/// use std::io::Cursor;
///
/// let table = from_reader(Cursor::new(b"x: 1\ny: 2")).unwrap();
/// assert_eq!(table.get("y"), "2");
/// ```
///
/// # Errors
///
/// Returns [`Error::Load`] if reading fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(reader: R) -> Result<Table>
where
    R: io::Read,
{
    let mut table = Table::new();
    table.load(reader)?;
    Ok(table)
}
