//! JSON output for the CLI
//!
//! - Success: `{"status":"ok","data":...}` on stdout
//! - Failure: `{"status":"error","code":...,"message":...}` on stdout
//! - One object per line, UTF-8

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use super::errors::CliResult;

/// Write a success response to stdout
pub fn write_response<T: Serialize>(data: &T) -> CliResult<()> {
    let response = success_envelope(data)?;
    write_line(&response)
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    write_line(&error_envelope(code, message))
}

/// Write a pretty-printed success response to a file
pub fn write_response_file<T: Serialize>(path: &Path, data: &T) -> CliResult<()> {
    let response = success_envelope(data)?;
    fs::write(path, serde_json::to_vec_pretty(&response)?)?;
    Ok(())
}

pub fn success_envelope<T: Serialize>(data: &T) -> CliResult<Value> {
    Ok(serde_json::json!({
        "status": "ok",
        "data": serde_json::to_value(data)?,
    }))
}

pub fn error_envelope(code: &str, message: &str) -> Value {
    serde_json::json!({
        "status": "error",
        "code": code,
        "message": message,
    })
}

fn write_line(value: &Value) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}
