//! Benchmark Snapshot Loading Tests
//!
//! A snapshot directory holds one `<query>.json` per query, each mapping
//! `"(dop, hintset)"` to the recorded plans. Loading must:
//! - Accept missing analyzed plans as timed-out runs
//! - Ignore files that are not `.json`
//! - Fail on malformed keys, malformed JSON and empty directories

use std::fs;
use std::path::Path;

use hbosearch::oracle::{
    settings_key, BenchmarkOracle, OracleErrorCode, OracleRequest, TimingOracle, TIMEOUT,
};
use hbosearch::search::{preset, QueryExplorer, SearchingState};
use tempfile::TempDir;

// =============================================================================
// Test Utilities
// =============================================================================

fn plans_json(planning_us: f64, execution_us: Option<f64>, cost: f64) -> serde_json::Value {
    let explain_plan = serde_json::json!({
        "Plan": {
            "Node Type": "Hash Join",
            "Plan Rows": 50,
            "Total Cost": cost,
            "Plans": [
                {"Node Type": "Seq Scan", "Relation Name": "orders", "Plan Rows": 10, "Total Cost": 20.0},
                {"Node Type": "Index Scan", "Relation Name": "lineitem", "Index Name": "li_pk",
                 "Plan Rows": 20, "Total Cost": 40.0}
            ]
        },
        "Unique SQL Id": 7,
        "Planner Runtime": planning_us
    });
    let explain_analyze_plan = execution_us.map(|execution_us| {
        serde_json::json!({
            "Plan": {
                "Node Type": "Hash Join",
                "Plan Rows": 50,
                "Actual Rows": 42,
                "Plans": []
            },
            "Unique SQL Id": 7,
            "Planner Runtime": planning_us,
            "Total Runtime": execution_us
        })
    });
    serde_json::json!({
        "explain_plan": explain_plan,
        "explain_analyze_plan": explain_analyze_plan,
    })
}

fn write_query(dir: &Path, name: &str, entries: &[((u32, u32), serde_json::Value)]) {
    let mut map = serde_json::Map::new();
    for ((dop, hintset), plans) in entries {
        map.insert(settings_key(*dop, *hintset), plans.clone());
    }
    fs::write(
        dir.join(format!("{}.json", name)),
        serde_json::to_vec(&serde_json::Value::Object(map)).unwrap(),
    )
    .unwrap();
}

fn snapshot() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write_query(
        dir.path(),
        "q01",
        &[
            ((64, 0), plans_json(1_500.0, Some(98_500.0), 120.5)),
            ((64, 1), plans_json(1_000.0, Some(49_000.0), 80.0)),
            ((16, 0), plans_json(1_200.0, None, 150.0)),
        ],
    );
    write_query(
        dir.path(),
        "q02",
        &[((64, 0), plans_json(500.0, Some(10_000.0), 10.0))],
    );
    fs::write(dir.path().join("README.txt"), "not a query").unwrap();
    dir
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_load_snapshot() {
    let dir = snapshot();
    let oracle = BenchmarkOracle::load(dir.path()).unwrap();

    assert_eq!(oracle.len(), 2);
    assert_eq!(oracle.query_names(), vec!["q01".to_string(), "q02".to_string()]);
    assert_eq!(oracle.configuration_count("q01").unwrap(), 3);

    let request = OracleRequest::new("q01", 0, 64);
    assert_eq!(oracle.planning_time(&request).unwrap(), 1_500.0);
    assert_eq!(oracle.execution_time(&request).unwrap(), 98_500.0);
    assert_eq!(oracle.cost(&request).unwrap(), 120.5);

    let plan = oracle.explain_plan(&request).unwrap();
    assert_eq!(plan.logical_tree(false), "Hash Join [ Seq Scan [ ] Index Scan [ ] ]");
    assert_eq!(plan.cardinalities(), vec![50.0, 10.0, 20.0]);

    let analyzed = oracle.explain_analyze_plan(&request).unwrap().unwrap();
    assert_eq!(analyzed.plan.real_cardinality, 42.0);
}

#[test]
fn test_timed_out_entry() {
    let dir = snapshot();
    let oracle = BenchmarkOracle::load(dir.path()).unwrap();
    let request = OracleRequest::new("q01", 0, 16);

    assert_eq!(oracle.execution_time(&request).unwrap(), TIMEOUT);
    assert!(oracle.explain_analyze_plan(&request).unwrap().is_none());
    // Planning is still recorded
    assert_eq!(oracle.planning_time(&request).unwrap(), 1_200.0);
}

#[test]
fn test_lookup_errors() {
    let dir = snapshot();
    let oracle = BenchmarkOracle::load(dir.path()).unwrap();

    let err = oracle
        .planning_time(&OracleRequest::new("q99", 0, 64))
        .unwrap_err();
    assert_eq!(err.code(), OracleErrorCode::HboOracleUnknownQuery);

    let err = oracle
        .execution_time(&OracleRequest::new("q02", 3, 64))
        .unwrap_err();
    assert_eq!(err.code(), OracleErrorCode::HboOracleMissingEntry);
    assert_eq!(err.query(), Some("q02"));
}

#[test]
fn test_invalid_key_rejected() {
    let dir = snapshot();
    fs::write(
        dir.path().join("q03.json"),
        serde_json::to_vec(&serde_json::json!({
            "64/0": plans_json(1.0, Some(1.0), 1.0)
        }))
        .unwrap(),
    )
    .unwrap();

    let err = BenchmarkOracle::load(dir.path()).unwrap_err();
    assert_eq!(err.code(), OracleErrorCode::HboOracleInvalidKey);
}

#[test]
fn test_malformed_json_rejected() {
    let dir = snapshot();
    fs::write(dir.path().join("q03.json"), "{ not json").unwrap();

    let err = BenchmarkOracle::load(dir.path()).unwrap_err();
    assert_eq!(err.code(), OracleErrorCode::HboOracleLoadFailed);
}

#[test]
fn test_empty_and_missing_directories() {
    let dir = TempDir::new().unwrap();
    let err = BenchmarkOracle::load(dir.path()).unwrap_err();
    assert_eq!(err.code(), OracleErrorCode::HboOracleLoadFailed);

    let err = BenchmarkOracle::load(dir.path().join("nope")).unwrap_err();
    assert_eq!(err.code(), OracleErrorCode::HboOracleLoadFailed);
}

// =============================================================================
// Search over a loaded snapshot
// =============================================================================

#[test]
fn test_search_over_loaded_snapshot() {
    let dir = snapshot();
    let oracle = BenchmarkOracle::load(dir.path()).unwrap();

    // Hardcoded (hintset 0..=1) x (dop 64) without operator rules
    let settings = preset("empty")
        .unwrap()
        .to_builder()
        .hardcoded_hintsets(vec![0, 1])
        .hardcoded_dops(vec![64])
        .build()
        .unwrap();
    let mut explorer = QueryExplorer::new(&oracle, "q01", settings);
    let outcome = explorer.run().unwrap();

    assert_eq!(outcome.best_state, SearchingState::new(1, 64));
    assert_eq!(outcome.record_time, 50.0);
    assert_eq!(outcome.tried_count, 2);
}
