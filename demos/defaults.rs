//! Tables sharing a chain of defaults.
//!
//! Run with: cargo run --example defaults

use proptable::{properties, Table};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let builtin = properties! {
        "log.level" => "info",
        "log.file" => "/var/log/app.log",
        "workers" => "4",
    }
    .into_shared();

    let mut site = Table::with_defaults(builtin.clone());
    site.load_str("workers = 16\n")?;
    let site = site.into_shared();

    let mut user = Table::with_defaults(site.clone());
    user.set("log.level", "debug");

    for key in user.keys() {
        println!("{:<10} = {}", key, user.get(&key));
    }

    // the builtin table is shared, so every table sees the change
    builtin.borrow_mut().set("log.file", "/tmp/app.log");
    println!("\nlog.file via site: {}", site.borrow().get("log.file"));
    println!("log.file via user: {}", user.get("log.file"));

    user.clear_all();
    println!("\nafter clear_all: {} keys left", user.keys().len());

    Ok(())
}
