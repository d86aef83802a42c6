//! # Catalog Export
//!
//! Writes the built-in catalog as a JSON catalog file, ready to edit and
//! load with `CHEAPWARE_CATALOG_PATH`.
//!
//! ## Usage
//! ```bash
//! # Print to stdout
//! cargo run -p cheapware-store --bin seed
//!
//! # Write to a file
//! cargo run -p cheapware-store --bin seed -- --out ./catalog.json
//! ```

use std::env;
use std::process::ExitCode;

use cheapware_core::NewProduct;
use cheapware_store::seed;

const USAGE: &str = "Usage: seed [--out <path>]";

#[derive(Debug, PartialEq)]
enum Command {
    Help,
    Export { out: Option<String> },
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut out = None;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--out" | "-o" => match iter.next() {
                Some(path) if !path.starts_with('-') => out = Some(path.clone()),
                _ => return Err(format!("{arg} needs a file path")),
            },
            "--help" | "-h" => return Ok(Command::Help),
            other => return Err(format!("Unknown argument: {other}")),
        }
    }

    Ok(Command::Export { out })
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();

    let out = match parse_args(&args) {
        Ok(Command::Help) => {
            println!("{USAGE}");
            return Ok(ExitCode::SUCCESS);
        }
        Ok(Command::Export { out }) => out,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("{USAGE}");
            return Ok(ExitCode::from(2));
        }
    };

    let entries: Vec<NewProduct> = seed::default_catalog().iter().map(seed::to_catalog_entry).collect();
    let json = serde_json::to_string_pretty(&entries)?;

    match out {
        Some(path) => {
            tokio::fs::write(&path, json).await?;
            println!("Wrote {} products to {path}", entries.len());
        }
        None => println!("{json}"),
    }

    Ok(ExitCode::SUCCESS)
}
