//! Reads properties from stdin and writes them back normalized.
//!
//! Run with: cargo run --example propcat -- [-a] [-c comment] [-g key] < file.properties
//!
//! - `-a`: ASCII-safe output
//! - `-c comment`: comment block to write first
//! - `-g key`: print only the value of `key`

use proptable::getopt::Parser;
use proptable::{StoreOptions, Table};
use std::error::Error;
use std::io::{self, Write};
use std::process::ExitCode;

fn usage() -> ExitCode {
    eprintln!("usage: propcat [-a] [-c comment] [-g key]");
    ExitCode::from(2)
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    let mut parser = Parser::new(std::env::args(), "ac:g:");
    let mut options = StoreOptions::new();
    let mut wanted = None;

    while let Some(option) = parser.next() {
        match option {
            Ok('a') => options.ascii = true,
            Ok('c') => options = options.with_comments(parser.opt_arg().unwrap_or_default()),
            Ok('g') => wanted = parser.opt_arg().map(str::to_owned),
            Ok(_) => return Ok(usage()),
            Err(e) => {
                eprintln!("propcat: {}", e);
                return Ok(usage());
            }
        }
    }
    if !parser.args().is_empty() {
        return Ok(usage());
    }

    let mut table = Table::new();
    table.load(io::stdin().lock())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match wanted {
        Some(key) => match table.lookup(&key) {
            Some(value) => writeln!(out, "{}", value)?,
            None => return Ok(ExitCode::FAILURE),
        },
        None => {
            table.store_with(&mut out, &options)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
