//! hbosearch CLI entry point
//!
//! Parses arguments, dispatches to the CLI module, and on failure prints
//! an error envelope and exits non-zero.

use hbosearch::cli;
use hbosearch::observability::Logger;

fn main() {
    if let Err(e) = cli::run() {
        let _ = cli::write_error(e.code_str(), e.message());
        Logger::fatal(
            "COMMAND_FAILED",
            &[("code", e.code_str()), ("reason", e.message())],
        );
        std::process::exit(1);
    }
}
