//! Property-based tests for the load/store round trip.
//!
//! Keys and values are drawn from ASCII (control characters included) and
//! from arbitrary Unicode, and stored in both output modes.

use proptest::prelude::*;
use proptable::escape::unescape;
use proptable::{from_str, to_string_with_options, StoreOptions, Table};

fn roundtrip(table: &Table, ascii: bool) -> bool {
    let options = StoreOptions::new().with_ascii(ascii);
    match to_string_with_options(table, &options) {
        Ok(text) => match from_str(&text) {
            Ok(back) => back.as_map() == table.as_map(),
            Err(e) => {
                eprintln!("Load failed: {}", e);
                eprintln!("Stored text was: {:?}", text);
                false
            }
        },
        Err(e) => {
            eprintln!("Store failed: {}", e);
            false
        }
    }
}

fn ascii_text() -> impl Strategy<Value = String> {
    prop::collection::vec(0u8..0x80, 0..24)
        .prop_map(|bytes| bytes.into_iter().map(char::from).collect())
}

fn ascii_table() -> impl Strategy<Value = Table> {
    prop::collection::vec((ascii_text(), ascii_text()), 0..12)
        .prop_map(|pairs| pairs.into_iter().collect())
}

fn unicode_table() -> impl Strategy<Value = Table> {
    prop::collection::vec((any::<String>(), any::<String>()), 0..8)
        .prop_map(|pairs| pairs.into_iter().collect())
}

proptest! {
    #[test]
    fn prop_ascii_roundtrip_utf8_output(table in ascii_table()) {
        prop_assert!(roundtrip(&table, false));
    }

    #[test]
    fn prop_ascii_roundtrip_ascii_output(table in ascii_table()) {
        prop_assert!(roundtrip(&table, true));
    }

    #[test]
    fn prop_unicode_roundtrip_utf8_output(table in unicode_table()) {
        prop_assert!(roundtrip(&table, false));
    }

    #[test]
    fn prop_unicode_roundtrip_ascii_output(table in unicode_table()) {
        prop_assert!(roundtrip(&table, true));
    }

    #[test]
    fn prop_ascii_output_is_ascii(table in unicode_table()) {
        let text = to_string_with_options(&table, &StoreOptions::ascii()).unwrap();
        prop_assert!(text.is_ascii());
    }

    #[test]
    fn prop_store_is_idempotent(table in ascii_table()) {
        let options = StoreOptions::new();
        let first = to_string_with_options(&table, &options).unwrap();
        let reloaded = from_str(&first).unwrap();
        let second = to_string_with_options(&reloaded, &options).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_unescape_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let (_, offset) = unescape(&bytes, true);
        prop_assert!(offset <= bytes.len());
        let (_, consumed) = unescape(&bytes[offset..], false);
        prop_assert_eq!(consumed, bytes.len() - offset);
    }

    #[test]
    fn prop_load_never_fails(input in any::<String>()) {
        prop_assert!(from_str(&input).is_ok());
    }
}
