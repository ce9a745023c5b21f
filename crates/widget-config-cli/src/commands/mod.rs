//! Command implementations for wcfg
//!
//! Each command module handles the CLI interface and delegates to
//! widget-config for the actual work.

use std::fs;
use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use serde_json::Value;

pub mod get;
pub mod hydrate;
pub mod migrate;

/// Read and parse JSON from a file, or from stdin when `input` is `-`.
pub fn read_json(input: &str) -> Result<Value> {
    let text = if input == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        buf
    } else {
        fs::read_to_string(input).with_context(|| format!("Failed to read {input}"))?
    };
    serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {input}"))
}

/// Write pretty JSON to a file, or to stdout when no file is given.
pub fn write_json(value: &Value, output: Option<&str>) -> Result<()> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    match output {
        Some(path) => fs::write(path, text).with_context(|| format!("Failed to write {path}")),
        None => io::stdout()
            .write_all(text.as_bytes())
            .context("Failed to write stdout"),
    }
}
