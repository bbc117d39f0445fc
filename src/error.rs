//! Error types for loading, storing and option parsing.
//!
//! The properties grammar has no syntax errors: malformed escapes, orphan
//! surrogates and truncated `\uXXXX` sequences all decode to a substitute
//! character instead of failing. What can fail is the underlying stream.
//!
//! ## Error Categories
//!
//! - **Load errors**: the reader failed; pairs already decoded stay in the table
//! - **Store errors**: the writer failed; bytes already written stay written
//! - **Option errors**: unknown option or missing option value (see [`crate::getopt`])
//!
//! ## Examples
//!
//! ```rust
//! use proptable::{Error, Table};
//! use std::io;
//!
//! struct Broken;
//!
//! impl io::Read for Broken {
//!     fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
//!         Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
//!     }
//! }
//!
//! let mut table = Table::new();
//! match table.load(Broken) {
//!     Err(Error::Load { loaded, .. }) => assert_eq!(loaded, 0),
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```

use std::fmt;
use std::io;
use thiserror::Error;

/// Represents all possible errors raised by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// The input stream failed while loading.
    #[error("I/O error while loading after {loaded} entries: {source}")]
    Load {
        /// Number of key-value pairs stored before the failure.
        loaded: usize,
        #[source]
        source: io::Error,
    },

    /// The output stream failed while storing.
    #[error("I/O error while storing after {stored} entries: {source}")]
    Store {
        /// Number of records completely written before the failure.
        stored: usize,
        #[source]
        source: io::Error,
    },

    /// An option character that is not in the option string.
    #[error("getopt: option not supported: -{0}")]
    UnknownOption(char),

    /// An option that takes a value was the last argument.
    #[error("getopt: no argument given: -{0}")]
    MissingArgument(char),

    /// Custom error, raised through the serde bridge
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a load error after `loaded` pairs were stored.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use proptable::Error;
    /// use std::io;
    ///
    /// let err = Error::load(3, io::Error::new(io::ErrorKind::Other, "gone"));
    /// assert!(err.to_string().contains("after 3 entries"));
    /// ```
    pub fn load(loaded: usize, source: io::Error) -> Self {
        Error::Load { loaded, source }
    }

    /// Creates a store error after `stored` records were written.
    pub fn store(stored: usize, source: io::Error) -> Self {
        Error::Store { stored, source }
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use proptable::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Returns the underlying I/O error for load and store failures.
    #[must_use]
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Error::Load { source, .. } | Error::Store { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_accessor() {
        let err = Error::store(2, io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        assert_eq!(
            err.io_error().map(io::Error::kind),
            Some(io::ErrorKind::BrokenPipe)
        );
        assert!(Error::UnknownOption('x').io_error().is_none());
    }

    #[test]
    fn test_option_messages() {
        assert_eq!(
            Error::UnknownOption('x').to_string(),
            "getopt: option not supported: -x"
        );
        assert_eq!(
            Error::MissingArgument('b').to_string(),
            "getopt: no argument given: -b"
        );
    }
}
