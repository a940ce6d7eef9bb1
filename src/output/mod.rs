pub mod json_schema;

use anyhow::Result;
use serde::Serialize;
use std::fs;

/// Pretty JSON to `out`, or to stdout when no file is given.
pub fn write_json<T: Serialize>(value: &T, out: Option<&str>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match out {
        Some(path) => {
            fs::write(path, json)?;
            eprintln!("Wrote {}", path);
        }
        None => println!("{}", json),
    }
    Ok(())
}
