/// Builds a [`Table`](crate::Table) from `key => value` pairs.
///
/// Keys and values may be any expression convertible into `String`.
///
/// ```rust
/// use proptable::properties;
///
/// let table = properties! {
///     "name" => "Alice",
///     "greeting" => format!("hello {}", "world"),
/// };
/// assert_eq!(table.get("greeting"), "hello world");
/// ```
#[macro_export]
macro_rules! properties {
    // Handle empty table
    () => {
        $crate::Table::new()
    };

    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut table = $crate::Table::new();
        $(
            table.set($key, $value);
        )+
        table
    }};
}

#[cfg(test)]
mod tests {
    use crate::Table;

    #[test]
    fn test_properties_macro_empty() {
        let table: Table = properties!();
        assert!(table.is_empty());
    }

    #[test]
    fn test_properties_macro_keeps_order() {
        let table = properties! {
            "b" => "2",
            "a" => "1",
            "b" => "3",
        };
        let pairs: Vec<_> = table.iter().collect();
        assert_eq!(
            pairs,
            vec![(&"b".to_string(), &"3".to_string()), (&"a".to_string(), &"1".to_string())]
        );
    }
}
