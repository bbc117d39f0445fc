use proptable::de::split_entry;
use proptable::escape::{decode_escape, encode_escape, Decoded};
use proptable::ser::{encode_comment, encode_pair};
use proptable::{from_str, LogicalLine, LogicalLines};

fn logical_lines(input: &str) -> Vec<LogicalLine> {
    LogicalLines::new(input.as_bytes())
        .collect::<std::io::Result<_>>()
        .unwrap()
}

#[test]
fn test_blank_and_comment_lines_are_ignored() {
    let input = "\n   \n# comment = ignored\n! also: ignored\n\t\x0c\nkey=value\n";
    let table = from_str(input).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.get("key"), "value");
}

#[test]
fn test_comment_lines_are_reported() {
    let lines = logical_lines("  # first\n!second\nkey");
    assert_eq!(
        lines,
        vec![
            LogicalLine::Comment(b"# first".to_vec()),
            LogicalLine::Comment(b"!second".to_vec()),
            LogicalLine::Entry(b"key".to_vec()),
        ]
    );
}

#[test]
fn test_delimiter_forms() {
    for input in [
        "Go = The Best Language",
        "    Go:The Best Language",
        "Go                    :The Best Language",
        "Go\tThe Best Language",
        "Go=  The Best Language",
    ] {
        let table = from_str(input).unwrap();
        assert_eq!(table.get("Go"), "The Best Language", "input {:?}", input);
    }
}

#[test]
fn test_separator_run_swallows_repeated_delimiters() {
    let table = from_str("key = = value").unwrap();
    assert_eq!(table.get("key"), "value");
}

#[test]
fn test_key_without_value() {
    let table = from_str("cheeses\nemptied =\n").unwrap();
    assert_eq!(table.lookup("cheeses").as_deref(), Some(""));
    assert_eq!(table.lookup("emptied").as_deref(), Some(""));
}

#[test]
fn test_trailing_whitespace_kept_in_value() {
    let table = from_str("key = value  \t").unwrap();
    assert_eq!(table.get("key"), "value  \t");
}

#[test]
fn test_escaped_delimiters_in_key() {
    let table = from_str("\\=\\:\\= x").unwrap();
    assert_eq!(table.get("=:="), "x");
}

#[test]
fn test_two_n_backslashes_decode_to_n() {
    let table = from_str("path = C:\\\\Program Files\\\\\nnext = 1").unwrap();
    assert_eq!(table.get("path"), "C:\\Program Files\\");
    assert_eq!(table.get("next"), "1");
}

#[test]
fn test_odd_backslash_run_continues() {
    let table = from_str("path = a\\\\\\\n   b").unwrap();
    assert_eq!(table.get("path"), "a\\b");
}

#[test]
fn test_control_escapes() {
    let table = from_str("k = a\\tb\\nc\\fd\\re").unwrap();
    assert_eq!(table.get("k"), "a\tb\nc\x0cd\re");
}

#[test]
fn test_pre_decode_split_policy() {
    // an escaped space never ends the key, an escape-decoded one neither
    assert_eq!(
        split_entry(b"a\\u0020b c"),
        ("a b".to_string(), "c".to_string())
    );
}

#[test]
fn test_serializer_ignores_decoded_meaning() {
    // a value starting with a backslash is written as a literal backslash
    assert_eq!(encode_pair("k", "\\u0020", false), "k=\\\\u0020");
    assert_eq!(
        split_entry(encode_pair("k", "\\u0020", false).as_bytes()),
        ("k".to_string(), "\\u0020".to_string())
    );
}

#[test]
fn test_encode_decode_escape_agree() {
    for ch in ['\u{0}', '\t', '\u{7f}', '\u{e9}', '\u{ffff}', '\u{10000}', '\u{10ffff}'] {
        let mut out = String::new();
        assert!(encode_escape(ch, &mut out));
        assert_eq!(
            decode_escape(out.as_bytes()),
            Decoded::Escape {
                ch,
                consumed: out.len()
            }
        );
    }
}

#[test]
fn test_comment_block_normalizes_line_endings() {
    assert_eq!(encode_comment("a\r\nb\rc\nd", false), "#a\n#b\n#c\n#d");
    assert_eq!(encode_comment("#a\n!b\nc", false), "#a\n!b\n#c");
}
