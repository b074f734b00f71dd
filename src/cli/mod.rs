//! Command-line interface for hbosearch
//!
//! Commands:
//! - search: Best configuration for one query
//! - sweep: Search every query of a snapshot and report totals
//! - presets: List the named search settings
//! - inspect: Recorded timings and plan of one configuration

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{inspect, presets, run, run_command, search, sweep};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{error_envelope, success_envelope, write_error, write_response, write_response_file};
