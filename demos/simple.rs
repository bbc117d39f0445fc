//! Load, edit and store a properties table.
//!
//! Run with: cargo run --example simple

use proptable::{from_str, StoreOptions, Table};
use std::error::Error;

const CONFIG: &str = "\
# Server settings
server.host = localhost
server.port : 8080
greeting    Welcome to caf\\u00e9 \\
            \"Le Rust\"
";

fn main() -> Result<(), Box<dyn Error>> {
    let mut table: Table = from_str(CONFIG)?;
    println!("host     = {}", table.get("server.host"));
    println!("port     = {}", table.get("server.port"));
    println!("greeting = {}", table.get("greeting"));

    table.set("server.port", "9090");
    table.set("motd", "  indented, with a # inside");

    // Store as UTF-8 text with a header
    println!("\nUTF-8 output:");
    print!("{}", table.save_to_string("Edited server settings", false)?);

    // Store ASCII-safe text
    println!("\nASCII output:");
    let mut stdout = std::io::stdout();
    table.store_with(&mut stdout, &StoreOptions::ascii())?;

    Ok(())
}
