//! POSIX-style parsing of short command-line options.
//!
//! The option string lists the accepted option characters; a character
//! followed by `:` takes a value. Optional values are not supported.
//!
//! ```rust
//! use proptable::getopt::Parser;
//!
//! let args = ["prog", "-ab", "cdef", "input.properties"];
//! let mut parser = Parser::new(args, "ab:");
//!
//! let mut a_flag = false;
//! let mut b_value = None;
//! while let Some(option) = parser.next() {
//!     match option.unwrap() {
//!         'a' => a_flag = true,
//!         'b' => b_value = parser.opt_arg().map(str::to_owned),
//!         _ => unreachable!(),
//!     }
//! }
//!
//! assert!(a_flag);
//! assert_eq!(b_value.as_deref(), Some("cdef"));
//! assert_eq!(parser.args(), ["input.properties"]);
//! ```

use crate::{Error, Result};

/// Iterator over the options found in a list of arguments.
///
/// Yields each option character in turn, or an error for an unknown option
/// or a missing value; parsing can go on after an error. Iteration ends at
/// the first non-option argument, at `--`, or when the arguments run out.
#[derive(Debug, Clone)]
pub struct Parser {
    args: Vec<String>,
    opts: String,
    // index in `args` of the option being parsed
    index: usize,
    // byte position inside `args[index]`, 0 between arguments
    pos: usize,
    has_arg: bool,
    done: bool,
}

impl Parser {
    /// Creates a parser over `args` using the `opts` option string.
    ///
    /// The first argument is the program name and is skipped, so the
    /// process arguments can be passed as they are:
    ///
    /// ```rust,no_run
    /// let parser = proptable::getopt::Parser::new(std::env::args(), "ao:");
    /// ```
    pub fn new<I, S>(args: I, opts: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Parser {
            args: args.into_iter().map(Into::into).collect(),
            opts: opts.to_string(),
            index: 1,
            pos: 0,
            has_arg: false,
            done: false,
        }
    }

    /// Returns the value of the last option returned, if it takes one.
    ///
    /// The value is either the rest of the option argument (`-ovalue`) or
    /// the next argument (`-o value`).
    #[must_use]
    pub fn opt_arg(&self) -> Option<&str> {
        if !self.has_arg {
            return None;
        }
        self.args.get(self.index).map(|arg| &arg[self.pos..])
    }

    /// Returns the arguments not processed yet.
    #[must_use]
    pub fn args(&self) -> &[String] {
        let start = if self.has_arg { self.index + 1 } else { self.index };
        self.args.get(start..).unwrap_or(&[])
    }

    fn finish(&mut self) -> Option<Result<char>> {
        self.done = true;
        None
    }

    fn is_option_char(&self, b: u8) -> bool {
        b > b' ' && b < 0x7f && b != b':' && b != b'-' && self.opts.as_bytes().contains(&b)
    }

    fn takes_value(&self, b: u8) -> bool {
        let opts = self.opts.as_bytes();
        opts.iter()
            .position(|&o| o == b)
            .map_or(false, |i| opts.get(i + 1) == Some(&b':'))
    }
}

impl Iterator for Parser {
    type Item = Result<char>;

    fn next(&mut self) -> Option<Result<char>> {
        if self.done {
            return None;
        }
        if self.has_arg {
            // skip the value of the previous option
            self.index += 1;
            self.pos = 0;
            self.has_arg = false;
        }
        let Some(arg) = self.args.get(self.index) else {
            return self.finish();
        };
        if self.pos == 0 {
            let bytes = arg.as_bytes();
            if bytes.len() <= 1 || bytes[0] != b'-' {
                return self.finish();
            }
            if bytes == b"--" {
                self.index += 1;
                return self.finish();
            }
            self.pos = 1;
        }

        let b = arg.as_bytes()[self.pos];
        let arg_len = arg.len();
        self.pos += 1;
        if self.pos >= arg_len {
            self.index += 1;
            self.pos = 0;
        }

        let option = char::from(b);
        if !self.is_option_char(b) {
            return Some(Err(Error::UnknownOption(option)));
        }
        if self.takes_value(b) {
            if self.index >= self.args.len() {
                return Some(Err(Error::MissingArgument(option)));
            }
            self.has_arg = true;
        }
        Some(Ok(option))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(parser: &mut Parser) -> Vec<std::result::Result<char, String>> {
        parser
            .by_ref()
            .map(|r| r.map_err(|e| e.to_string()))
            .collect()
    }

    #[test]
    fn test_flags_and_value() {
        let mut parser = Parser::new(["test", "-a", "-b", "value", "rest"], "ab:");
        assert!(matches!(parser.next(), Some(Ok('a'))));
        assert!(matches!(parser.next(), Some(Ok('b'))));
        assert_eq!(parser.opt_arg(), Some("value"));
        assert_eq!(parser.args(), ["rest"]);
        assert!(parser.next().is_none());
        assert_eq!(parser.args(), ["rest"]);
    }

    #[test]
    fn test_attached_value() {
        let mut parser = Parser::new(["test", "-bvalue", "x"], "b:");
        assert!(matches!(parser.next(), Some(Ok('b'))));
        assert_eq!(parser.opt_arg(), Some("value"));
        assert!(parser.next().is_none());
        assert_eq!(parser.args(), ["x"]);
    }

    #[test]
    fn test_opt_arg_empty_for_flags() {
        let mut parser = Parser::new(["test", "-a"], "ab:");
        assert!(matches!(parser.next(), Some(Ok('a'))));
        assert_eq!(parser.opt_arg(), None);
    }

    #[test]
    fn test_double_dash_ends_options() {
        let mut parser = Parser::new(["test", "-a", "--", "-b"], "ab");
        assert_eq!(collect(&mut parser), vec![Ok('a')]);
        assert_eq!(parser.args(), ["-b"]);
    }

    #[test]
    fn test_single_dash_is_an_argument() {
        let mut parser = Parser::new(["test", "-", "-a"], "a");
        assert!(parser.next().is_none());
        assert_eq!(parser.args(), ["-", "-a"]);
    }

    #[test]
    fn test_unknown_option() {
        let mut parser = Parser::new(["test", "-xa"], "a");
        assert!(matches!(parser.next(), Some(Err(Error::UnknownOption('x')))));
        assert!(matches!(parser.next(), Some(Ok('a'))));
        assert!(parser.next().is_none());
    }

    #[test]
    fn test_reserved_option_characters() {
        let mut parser = Parser::new(["test", "-:-a"], "a:-");
        assert!(matches!(parser.next(), Some(Err(Error::UnknownOption(':')))));
        assert!(matches!(parser.next(), Some(Err(Error::UnknownOption('-')))));
        assert!(matches!(parser.next(), Some(Err(Error::MissingArgument('a')))));
    }

    #[test]
    fn test_missing_argument() {
        let mut parser = Parser::new(["test", "-a", "-b"], "ab:");
        assert!(matches!(parser.next(), Some(Ok('a'))));
        assert!(matches!(parser.next(), Some(Err(Error::MissingArgument('b')))));
        assert!(parser.next().is_none());
        assert!(parser.args().is_empty());
    }

    #[test]
    fn test_no_arguments() {
        let mut parser = Parser::new(["test"], "a");
        assert!(parser.next().is_none());
        assert!(parser.next().is_none());
        assert!(parser.args().is_empty());

        let empty: [&str; 0] = [];
        let mut parser = Parser::new(empty, "a");
        assert!(parser.next().is_none());
        assert!(parser.args().is_empty());
    }
}
