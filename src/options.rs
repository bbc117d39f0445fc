//! Configuration options for storing tables.
//!
//! - [`StoreOptions`]: output escaping mode and an optional comment header
//!
//! ## Examples
//!
//! ```rust
//! use proptable::{to_string_with_options, StoreOptions, Table};
//!
//! let mut table = Table::new();
//! table.set("price", "10\u{20ac}");
//!
//! // UTF-8 output, the default
//! assert_eq!(proptable::to_string(&table).unwrap(), "price=10\u{20ac}\n");
//!
//! // ASCII-safe output with a header
//! let options = StoreOptions::ascii().with_comments("prices");
//! let text = to_string_with_options(&table, &options).unwrap();
//! assert_eq!(text, "#prices\nprice=10\\u20ac\n");
//! ```

/// Configuration options for writing a table.
///
/// # Examples
///
/// ```rust
/// use proptable::StoreOptions;
///
/// // UTF-8 output, no header
/// let options = StoreOptions::new();
/// assert!(!options.ascii);
///
/// // Everything outside printable ASCII escaped
/// let options = StoreOptions::ascii();
/// assert!(options.ascii);
///
/// let options = StoreOptions::new()
///     .with_ascii(true)
///     .with_comments("Generated file, do not edit");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StoreOptions {
    /// Escape every character outside `' '..='~'` as `\uXXXX`.
    pub ascii: bool,
    /// Comment block written before the entries.
    pub comments: Option<String>,
}

impl StoreOptions {
    /// Creates default options (UTF-8 output, no comments).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for ASCII-safe output.
    #[must_use]
    pub fn ascii() -> Self {
        StoreOptions {
            ascii: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_ascii(mut self, ascii: bool) -> Self {
        self.ascii = ascii;
        self
    }

    /// Sets the comment block. Each of its lines is written with a `#`
    /// prefix unless it already starts with `#` or `!`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use proptable::StoreOptions;
    ///
    /// let options = StoreOptions::new().with_comments("header");
    /// assert_eq!(options.comments.as_deref(), Some("header"));
    /// ```
    #[must_use]
    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = Some(comments.into());
        self
    }
}
