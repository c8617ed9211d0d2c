use ecsv::Result;

use std::{env, fs, path::PathBuf};

use anyhow::Context;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputArgsError {
    #[error("Couldn't parse input arguments: {0}")]
    Parse(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Delimiter must be a single byte character: {0:?}")]
    InvalidDelimiter(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputArgs {
    pub path: PathBuf,
    pub has_headers: bool,
    /// Skips detection when set
    pub delimiter: Option<u8>,
    pub verbose: bool,
}

/// Parses `<file> [--no-headers] [--delimiter=<c>] [--verbose]`, requiring the file to exist
pub fn parse_input_args() -> Result<InputArgs> {
    let args = parse_args(env::args().skip(1))?;

    let path = fs::canonicalize(&args.path)
        .with_context(|| InputArgsError::FileNotFound(args.path.display().to_string()))?;

    Ok(InputArgs { path, ..args })
}

fn parse_args<I: Iterator<Item = String>>(args: I) -> Result<InputArgs> {
    let mut path = None;
    let mut has_headers = true;
    let mut delimiter = None;
    let mut verbose = false;

    for arg in args {
        if arg == "--no-headers" {
            has_headers = false;
        } else if arg == "--verbose" {
            verbose = true;
        } else if let Some(value) = arg.strip_prefix("--delimiter=") {
            delimiter = Some(parse_delimiter(value)?);
        } else if arg.starts_with("--") {
            return Err(InputArgsError::Parse(format!("Unknown flag: {arg}")).into());
        } else if path.is_none() {
            path = Some(PathBuf::from(arg));
        } else {
            return Err(InputArgsError::Parse(format!("Unexpected argument: {arg}")).into());
        }
    }

    let path =
        path.ok_or_else(|| InputArgsError::Parse("First argument must be the input file.".to_string()))?;

    Ok(InputArgs {
        path,
        has_headers,
        delimiter,
        verbose,
    })
}

fn parse_delimiter(value: &str) -> Result<u8> {
    let value = match value {
        "\\t" | "tab" => "\t",
        other => other,
    };

    match value.as_bytes() {
        [byte] => Ok(*byte),
        _ => Err(InputArgsError::InvalidDelimiter(value.to_string()).into()),
    }
}
