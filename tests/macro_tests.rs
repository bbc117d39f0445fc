use proptable::{properties, to_string, Table};

#[test]
fn test_properties_macro_empty() {
    let table: Table = properties!();
    assert!(table.is_empty());
    assert_eq!(to_string(&table).unwrap(), "");
}

#[test]
fn test_properties_macro_single() {
    let table = properties! { "name" => "Alice" };
    assert_eq!(table.get("name"), "Alice");
    assert_eq!(table.len(), 1);
}

#[test]
fn test_properties_macro_expressions() {
    let user = String::from("bob");
    let table = properties! {
        "user" => user.clone(),
        format!("home.{}", user) => format!("/home/{}", user),
    };
    assert_eq!(table.get("user"), "bob");
    assert_eq!(table.get("home.bob"), "/home/bob");
}

#[test]
fn test_properties_macro_trailing_comma_and_order() {
    let table = properties! {
        "z" => "last letter",
        "a" => "first letter",
    };
    assert_eq!(
        to_string(&table).unwrap(),
        "z=last letter\na=first letter\n"
    );
}

#[test]
fn test_properties_macro_as_defaults() {
    let defaults = properties! { "timeout" => "30" }.into_shared();
    let table = Table::with_defaults(defaults);
    assert_eq!(table.get("timeout"), "30");
    assert!(table.is_empty());
}
