//! Backslash escapes used by the properties format.
//!
//! Decoding recognizes `\t`, `\n`, `\f`, `\r` and `\uXXXX`, combines two
//! `\uXXXX` sequences holding a UTF-16 surrogate pair into one character,
//! and turns a backslash followed by anything else into that character.
//! Decoding never fails: malformed sequences become U+FFFD.
//!
//! ```rust
//! use proptable::escape::{decode_escape, unescape, Decoded};
//!
//! assert_eq!(
//!     decode_escape(b"\\u20ac"),
//!     Decoded::Escape { ch: '€', consumed: 6 }
//! );
//! assert_eq!(decode_escape(b"plain"), Decoded::NotEscape);
//!
//! let (key, offset) = unescape(br"first\ key = value", true);
//! assert_eq!(key, "first key");
//! assert_eq!(offset, 13);
//! ```

/// Substitute for every malformed escape sequence.
pub const REPLACEMENT: char = char::REPLACEMENT_CHARACTER;

/// Length in bytes of a `\uXXXX` sequence.
const UNICODE_ESCAPE_LEN: usize = 6;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Outcome of decoding the bytes at the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// An escape sequence of `consumed` bytes decoding to `ch`.
    Escape { ch: char, consumed: usize },
    /// The bytes don't start with a backslash.
    NotEscape,
}

/// Space, tab and form feed.
#[inline]
pub fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\x0c')
}

#[inline]
pub fn is_delimiter(ch: char) -> bool {
    matches!(ch, '=' | ':')
}

#[inline]
pub fn is_comment_prefix(ch: char) -> bool {
    matches!(ch, '#' | '!')
}

#[inline]
fn is_separator(ch: char) -> bool {
    is_whitespace(ch) || is_delimiter(ch)
}

#[inline]
fn is_printable_ascii(ch: char) -> bool {
    (' '..='~').contains(&ch)
}

/// Decodes one raw UTF-8 character; invalid bytes decode to U+FFFD.
#[inline]
fn decode_raw(bytes: &[u8]) -> (char, usize) {
    let (ch, size) = bstr::decode_utf8(bytes);
    (ch.unwrap_or(REPLACEMENT), size)
}

/// Parses exactly four hex digits at the start of `bytes`.
fn parse_hex4(bytes: &[u8]) -> Option<u32> {
    let digits = bytes.get(..4)?;
    digits.iter().try_fold(0u32, |acc, &b| {
        let digit = char::from(b).to_digit(16)?;
        Some(acc << 4 | digit)
    })
}

/// Decodes the escape sequence at the start of `bytes`.
///
/// Returns [`Decoded::NotEscape`] if `bytes` doesn't start with a backslash.
/// Otherwise the result always holds a character: a `\uXXXX` with fewer than
/// four hex digits, or an unpaired surrogate, decodes to [`REPLACEMENT`].
///
/// # Examples
///
/// ```rust
/// use proptable::escape::{decode_escape, Decoded, REPLACEMENT};
///
/// assert_eq!(decode_escape(br"\t"), Decoded::Escape { ch: '\t', consumed: 2 });
/// assert_eq!(decode_escape(br"\="), Decoded::Escape { ch: '=', consumed: 2 });
/// assert_eq!(
///     decode_escape(b"\\ud83d\\ude00"),
///     Decoded::Escape { ch: '😀', consumed: 12 }
/// );
/// assert_eq!(
///     decode_escape(br"\ud83dx"),
///     Decoded::Escape { ch: REPLACEMENT, consumed: 6 }
/// );
/// ```
pub fn decode_escape(bytes: &[u8]) -> Decoded {
    if bytes.first() != Some(&b'\\') {
        return Decoded::NotEscape;
    }
    let ch = match bytes.get(1) {
        Some(b't') => '\t',
        Some(b'n') => '\n',
        Some(b'f') => '\x0c',
        Some(b'r') => '\r',
        Some(b'u') => return decode_unicode(bytes),
        Some(_) => {
            let (ch, size) = decode_raw(&bytes[1..]);
            return Decoded::Escape {
                ch,
                consumed: size + 1,
            };
        }
        // lone backslash at the end of the line
        None => {
            return Decoded::Escape {
                ch: REPLACEMENT,
                consumed: 1,
            }
        }
    };
    Decoded::Escape { ch, consumed: 2 }
}

/// Decodes a `\uXXXX` sequence, pairing surrogates when possible.
fn decode_unicode(bytes: &[u8]) -> Decoded {
    let Some(unit) = parse_hex4(&bytes[2..]) else {
        return Decoded::Escape {
            ch: REPLACEMENT,
            consumed: truncated_len(bytes),
        };
    };
    if let Some(ch) = char::from_u32(unit) {
        return Decoded::Escape {
            ch,
            consumed: UNICODE_ESCAPE_LEN,
        };
    }

    // `unit` is a surrogate half
    if (0xd800..0xdc00).contains(&unit) {
        if let Some(low) = low_surrogate(&bytes[UNICODE_ESCAPE_LEN..]) {
            let scalar = 0x10000 + ((unit - 0xd800) << 10) + (low - 0xdc00);
            if let Some(ch) = char::from_u32(scalar) {
                return Decoded::Escape {
                    ch,
                    consumed: 2 * UNICODE_ESCAPE_LEN,
                };
            }
        }
    }
    Decoded::Escape {
        ch: REPLACEMENT,
        consumed: UNICODE_ESCAPE_LEN,
    }
}

fn low_surrogate(bytes: &[u8]) -> Option<u32> {
    if !bytes.starts_with(br"\u") {
        return None;
    }
    parse_hex4(&bytes[2..]).filter(|unit| (0xdc00..0xe000).contains(unit))
}

/// Length swallowed by a malformed `\u` sequence: six bytes, clamped to the
/// input and never ending inside a multi-byte UTF-8 character.
fn truncated_len(bytes: &[u8]) -> usize {
    let mut len = bytes.len().min(UNICODE_ESCAPE_LEN);
    while len < bytes.len() && (bytes[len] & 0xc0) == 0x80 {
        len += 1;
    }
    len
}

/// Appends the `\uXXXX` form of `ch` to `out`.
///
/// Printable ASCII characters (`' '..='~'`) need no escape: nothing is
/// written and `false` is returned. Characters above U+FFFF are written as
/// two sequences holding the high and low surrogates.
///
/// # Examples
///
/// ```rust
/// use proptable::escape::encode_escape;
///
/// let mut out = String::new();
/// assert!(!encode_escape('a', &mut out));
/// assert!(encode_escape('€', &mut out));
/// assert!(encode_escape('😀', &mut out));
/// assert_eq!(out, "\\u20ac\\ud83d\\ude00");
/// ```
pub fn encode_escape(ch: char, out: &mut String) -> bool {
    if is_printable_ascii(ch) {
        return false;
    }
    let mut units = [0u16; 2];
    for &unit in ch.encode_utf16(&mut units).iter() {
        out.push_str(r"\u");
        for shift in [12, 8, 4, 0] {
            out.push(char::from(HEX_DIGITS[usize::from((unit >> shift) & 0xf)]));
        }
    }
    true
}

/// Replaces the escape sequences in `bytes` with the characters they encode.
///
/// With `split` set, decoding stops at the first unescaped whitespace or
/// delimiter (`=`, `:`). That character and every whitespace or delimiter
/// right after it are skipped, and the returned offset is where the value
/// starts. Without `split`, the whole input is decoded and the offset is its
/// length.
pub fn unescape(bytes: &[u8], split: bool) -> (String, usize) {
    let mut out = String::with_capacity(bytes.len());
    let mut pos = 0;
    while pos < bytes.len() {
        let rest = &bytes[pos..];
        if let Decoded::Escape { ch, consumed } = decode_escape(rest) {
            out.push(ch);
            pos += consumed;
            continue;
        }
        let (ch, size) = decode_raw(rest);
        pos += size;
        if split && is_separator(ch) {
            while pos < bytes.len() {
                let (next, size) = decode_raw(&bytes[pos..]);
                if !is_separator(next) {
                    break;
                }
                pos += size;
            }
            return (out, pos);
        }
        out.push(ch);
    }
    (out, pos)
}
