//! CLI command implementations
//!
//! Every command loads its configuration first, sets the log level, and
//! prints exactly one JSON object on success.

use std::path::Path;

use serde::Serialize;

use crate::observability::{log_event, Event, Logger, ObservationScope, SearchMetrics};
use crate::oracle::{BenchmarkOracle, OracleRequest, TimingOracle};
use crate::search::{
    domain::disabled_hints, preset, QueryExplorer, SearchSettings, SearchingState, PRESET_NAMES,
};
use crate::sweep::run_sweep;

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{write_response, write_response_file};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Search { config, query } => search(&config, &query),
        Command::Sweep { config, output } => sweep(&config, output.as_deref()),
        Command::Presets => presets(),
        Command::Inspect {
            config,
            query,
            hintset,
            dop,
        } => inspect(&config, &query, hintset, dop),
    }
}

/// Run one query search and print its outcome
pub fn search(config_path: &Path, query: &str) -> CliResult<()> {
    let (config, settings) = load_config(config_path)?;
    let oracle = load_oracle(&config)?;

    let mut explorer = QueryExplorer::new(&oracle, query, settings);
    let outcome = explorer.run()?;
    let default_time = explorer.e2e_time(&outcome.default_state)?;
    let best_time = explorer.e2e_time(&outcome.best_state)?;

    #[derive(Serialize)]
    struct SearchResponse<'a> {
        outcome: &'a crate::search::SearchOutcome,
        default_time: f64,
        best_time: f64,
        disabled_hints: Vec<&'static str>,
    }

    write_response(&SearchResponse {
        outcome: &outcome,
        default_time,
        best_time,
        disabled_hints: disabled_hints(outcome.best_state.hintset),
    })
}

/// Run all queries and print or write the report
pub fn sweep(config_path: &Path, output: Option<&Path>) -> CliResult<()> {
    let (config, settings) = load_config(config_path)?;
    let oracle = load_oracle(&config)?;

    let metrics = SearchMetrics::new();
    let report = run_sweep(&oracle, &settings, &metrics);

    match output {
        Some(path) => write_response_file(path, &report),
        None => write_response(&report),
    }
}

/// List preset names and their settings
pub fn presets() -> CliResult<()> {
    #[derive(Serialize)]
    struct PresetEntry {
        name: &'static str,
        settings: SearchSettings,
    }

    let entries = PRESET_NAMES
        .iter()
        .map(|&name| {
            Ok(PresetEntry {
                name,
                settings: preset(name)?,
            })
        })
        .collect::<CliResult<Vec<_>>>()?;

    write_response(&entries)
}

/// Print recorded timings and plan signature of one configuration
pub fn inspect(config_path: &Path, query: &str, hintset: u32, dop: u32) -> CliResult<()> {
    let (config, settings) = load_config(config_path)?;
    let oracle = load_oracle(&config)?;

    let state = SearchingState::new(hintset, dop);
    let explorer = QueryExplorer::new(&oracle, query, settings);
    let request = OracleRequest::new(query, hintset, dop);
    let plan = oracle.explain_plan(&request)?;

    #[derive(Serialize)]
    struct InspectResponse {
        state: SearchingState,
        disabled_hints: Vec<&'static str>,
        planning_time: f64,
        execution_time: f64,
        e2e_time: f64,
        timed_out: bool,
        cost: f64,
        logical_plan: String,
    }

    write_response(&InspectResponse {
        state,
        disabled_hints: disabled_hints(hintset),
        planning_time: explorer.planning_time(&state)?,
        execution_time: explorer.execution_time(&state)?,
        e2e_time: explorer.e2e_time(&state)?,
        timed_out: oracle.explain_analyze_plan(&request)?.is_none(),
        cost: oracle.cost(&request)?,
        logical_plan: plan.logical_tree(true),
    })
}

fn load_config(path: &Path) -> CliResult<(Config, SearchSettings)> {
    let config = Config::load(path)?;
    Logger::set_min_severity(config.severity()?);
    let settings = config.search_settings()?;
    log_event(
        Event::ConfigLoaded,
        &[
            ("data_dir", config.data_dir.as_str()),
            ("preset", config.preset.as_str()),
        ],
    );
    Ok((config, settings))
}

fn load_oracle(config: &Config) -> CliResult<BenchmarkOracle> {
    let scope =
        ObservationScope::with_fields("ORACLE_LOAD", &[("data_dir", config.data_dir.as_str())]);
    match BenchmarkOracle::load(config.data_path()) {
        Ok(oracle) => {
            let queries = oracle.len().to_string();
            scope.complete_with_fields(&[("queries", queries.as_str())]);
            Ok(oracle)
        }
        Err(e) => {
            scope.fail(e.message());
            Err(CliError::from(e))
        }
    }
}
