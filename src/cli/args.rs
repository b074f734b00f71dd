//! CLI argument definitions using clap
//!
//! Commands:
//! - hbosearch search --config <path> --query <name>
//! - hbosearch sweep --config <path> [--output <path>]
//! - hbosearch presets
//! - hbosearch inspect --config <path> --query <name> --hintset <n> --dop <n>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::oracle::{HintsetCode, QueryDop};

/// hbosearch - hint and parallelism search over recorded query timings
#[derive(Parser, Debug)]
#[command(name = "hbosearch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search the best configuration for one query
    Search {
        /// Path to configuration file
        #[arg(long, default_value = "./hbosearch.json")]
        config: PathBuf,

        /// Query name as listed in the snapshot
        #[arg(long)]
        query: String,
    },

    /// Search every query of the snapshot
    Sweep {
        /// Path to configuration file
        #[arg(long, default_value = "./hbosearch.json")]
        config: PathBuf,

        /// Write the report to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// List the available search presets
    Presets,

    /// Show recorded timings and plan of one configuration
    Inspect {
        /// Path to configuration file
        #[arg(long, default_value = "./hbosearch.json")]
        config: PathBuf,

        #[arg(long)]
        query: String,

        #[arg(long, default_value_t = 0)]
        hintset: HintsetCode,

        #[arg(long, default_value_t = 64)]
        dop: QueryDop,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search() {
        let cli = Cli::try_parse_from(["hbosearch", "search", "--query", "q01"]).unwrap();
        match cli.command {
            Command::Search { config, query } => {
                assert_eq!(config, PathBuf::from("./hbosearch.json"));
                assert_eq!(query, "q01");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_inspect_defaults() {
        let cli = Cli::try_parse_from(["hbosearch", "inspect", "--query", "q03"]).unwrap();
        match cli.command {
            Command::Inspect { hintset, dop, .. } => {
                assert_eq!(hintset, 0);
                assert_eq!(dop, 64);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_search_requires_query() {
        assert!(Cli::try_parse_from(["hbosearch", "search"]).is_err());
    }
}
