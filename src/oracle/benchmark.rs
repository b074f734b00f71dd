//! Benchmark snapshot oracle
//!
//! A processed snapshot is a directory with one JSON file per query. The file
//! stem is the query name; the content maps `"(dop, hintset)"` keys to the
//! recorded plans of that configuration.
//!
//! The oracle is loaded once and is read-only afterwards, so one instance
//! can back any number of concurrent searches.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use super::errors::{OracleError, OracleResult};
use super::plan::{ExplainAnalyzeNode, ExplainAnalyzePlan, ExplainNode, ExplainPlan, Plans};
use super::types::{
    Cost, HintsetCode, OracleRequest, QueryDop, QueryName, SettingsKeyParser, Time, TIMEOUT,
};

/// Read-only timing and plan lookup keyed by (query, hintset, dop)
pub trait TimingOracle {
    /// Query identifiers in a stable order
    fn query_names(&self) -> Vec<QueryName>;

    /// Planning time in microseconds
    fn planning_time(&self, request: &OracleRequest<'_>) -> OracleResult<Time>;

    /// Execution time in microseconds, or [`TIMEOUT`]
    fn execution_time(&self, request: &OracleRequest<'_>) -> OracleResult<Time>;

    fn explain_plan(&self, request: &OracleRequest<'_>) -> OracleResult<&ExplainPlan>;

    /// Analyzed plan, `None` when the recorded run timed out
    fn explain_analyze_plan(
        &self,
        request: &OracleRequest<'_>,
    ) -> OracleResult<Option<&ExplainAnalyzePlan>>;

    /// Planner-estimated total cost at the plan root
    fn cost(&self, request: &OracleRequest<'_>) -> OracleResult<Cost>;
}

type QueryData = HashMap<(HintsetCode, QueryDop), Plans>;

/// Oracle over a processed benchmark snapshot
#[derive(Debug, Clone, Default)]
pub struct BenchmarkOracle {
    queries: BTreeMap<QueryName, QueryData>,
}

impl BenchmarkOracle {
    /// Loads every `*.json` query file from a snapshot directory.
    ///
    /// Any unreadable file, malformed key or an empty snapshot is fatal.
    pub fn load(dir: impl AsRef<Path>) -> OracleResult<Self> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir).map_err(|e| {
            OracleError::load_failed(format!(
                "Failed to read snapshot directory '{}': {}",
                dir.display(),
                e
            ))
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                OracleError::load_failed(format!("Failed to list '{}': {}", dir.display(), e))
            })?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
                paths.push(path);
            }
        }
        paths.sort();

        let parser = SettingsKeyParser::new();
        let mut queries = BTreeMap::new();

        for path in paths {
            let query_name = match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => stem.to_string(),
                None => continue,
            };

            let content = fs::read_to_string(&path).map_err(|e| {
                OracleError::load_failed(format!("Failed to read '{}': {}", path.display(), e))
            })?;
            let raw: HashMap<String, Plans> = serde_json::from_str(&content).map_err(|e| {
                OracleError::load_failed(format!("Invalid query file '{}': {}", path.display(), e))
            })?;

            let mut data = QueryData::with_capacity(raw.len());
            for (key, plans) in raw {
                let (dop, hintset) = parser
                    .parse(&key)
                    .ok_or_else(|| OracleError::invalid_key(&query_name, &key))?;
                data.insert((hintset, dop), plans);
            }
            queries.insert(query_name, data);
        }

        if queries.is_empty() {
            return Err(OracleError::load_failed(format!(
                "Snapshot directory '{}' contains no query files",
                dir.display()
            )));
        }

        Ok(Self { queries })
    }

    /// Builder for in-memory snapshots
    pub fn builder() -> BenchmarkOracleBuilder {
        BenchmarkOracleBuilder::default()
    }

    /// Number of queries in the snapshot
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    /// Number of recorded configurations for a query
    pub fn configuration_count(&self, query_name: &str) -> OracleResult<usize> {
        self.queries
            .get(query_name)
            .map(HashMap::len)
            .ok_or_else(|| OracleError::unknown_query(query_name))
    }

    fn entry(&self, request: &OracleRequest<'_>) -> OracleResult<&Plans> {
        let data = self
            .queries
            .get(request.query_name)
            .ok_or_else(|| OracleError::unknown_query(request.query_name))?;
        data.get(&(request.hintset, request.dop)).ok_or_else(|| {
            OracleError::missing_entry(request.query_name, request.hintset, request.dop)
        })
    }
}

impl TimingOracle for BenchmarkOracle {
    fn query_names(&self) -> Vec<QueryName> {
        self.queries.keys().cloned().collect()
    }

    fn planning_time(&self, request: &OracleRequest<'_>) -> OracleResult<Time> {
        Ok(self.entry(request)?.explain_plan.planning_time)
    }

    fn execution_time(&self, request: &OracleRequest<'_>) -> OracleResult<Time> {
        Ok(self
            .entry(request)?
            .explain_analyze_plan
            .as_ref()
            .map_or(TIMEOUT, |analyzed| analyzed.execution_time))
    }

    fn explain_plan(&self, request: &OracleRequest<'_>) -> OracleResult<&ExplainPlan> {
        Ok(&self.entry(request)?.explain_plan)
    }

    fn explain_analyze_plan(
        &self,
        request: &OracleRequest<'_>,
    ) -> OracleResult<Option<&ExplainAnalyzePlan>> {
        Ok(self.entry(request)?.explain_analyze_plan.as_ref())
    }

    fn cost(&self, request: &OracleRequest<'_>) -> OracleResult<Cost> {
        Ok(self.entry(request)?.explain_plan.total_cost())
    }
}

/// Builds a [`BenchmarkOracle`] without touching disk
#[derive(Debug, Default)]
pub struct BenchmarkOracleBuilder {
    queries: BTreeMap<QueryName, QueryData>,
}

impl BenchmarkOracleBuilder {
    /// Adds recorded plans for one configuration
    pub fn plans(
        mut self,
        query_name: &str,
        hintset: HintsetCode,
        dop: QueryDop,
        plans: Plans,
    ) -> Self {
        self.queries
            .entry(query_name.to_string())
            .or_default()
            .insert((hintset, dop), plans);
        self
    }

    /// Adds a configuration with a single-node plan and the given timings
    /// in microseconds. `execution_time = None` records a timed-out run.
    pub fn timing(
        self,
        query_name: &str,
        hintset: HintsetCode,
        dop: QueryDop,
        planning_time: Time,
        execution_time: Option<Time>,
    ) -> Self {
        let explain_plan = ExplainPlan {
            plan: ExplainNode {
                node_type: "Result".to_string(),
                plans: Vec::new(),
                estimated_cardinality: 1.0,
                index_name: None,
                relation_name: None,
                cost: planning_time + execution_time.unwrap_or(0.0),
            },
            template_id: 0,
            planning_time,
        };
        let explain_analyze_plan = execution_time.map(|execution_time| ExplainAnalyzePlan {
            plan: ExplainAnalyzeNode {
                node_type: "Result".to_string(),
                plans: Vec::new(),
                estimated_cardinality: 1.0,
                real_cardinality: 1.0,
                index_name: None,
                relation_name: None,
            },
            template_id: 0,
            planning_time,
            execution_time,
        });
        self.plans(
            query_name,
            hintset,
            dop,
            Plans {
                explain_plan,
                explain_analyze_plan,
            },
        )
    }

    pub fn build(self) -> BenchmarkOracle {
        BenchmarkOracle {
            queries: self.queries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::OracleErrorCode;

    fn oracle() -> BenchmarkOracle {
        BenchmarkOracle::builder()
            .timing("q02", 0, 64, 1000.0, Some(9000.0))
            .timing("q01", 0, 64, 500.0, Some(2500.0))
            .timing("q01", 1, 64, 400.0, None)
            .build()
    }

    #[test]
    fn test_query_names_sorted() {
        assert_eq!(oracle().query_names(), vec!["q01", "q02"]);
    }

    #[test]
    fn test_timings_in_microseconds() {
        let oracle = oracle();
        let req = OracleRequest::new("q01", 0, 64);
        assert_eq!(oracle.planning_time(&req).unwrap(), 500.0);
        assert_eq!(oracle.execution_time(&req).unwrap(), 2500.0);
        assert_eq!(oracle.cost(&req).unwrap(), 3000.0);
    }

    #[test]
    fn test_timeout_sentinel() {
        let oracle = oracle();
        let req = OracleRequest::new("q01", 1, 64);
        assert_eq!(oracle.execution_time(&req).unwrap(), TIMEOUT);
        assert!(oracle.explain_analyze_plan(&req).unwrap().is_none());
        assert_eq!(oracle.planning_time(&req).unwrap(), 400.0);
    }

    #[test]
    fn test_missing_entry() {
        let oracle = oracle();
        let err = oracle
            .planning_time(&OracleRequest::new("q01", 5, 64))
            .unwrap_err();
        assert_eq!(err.code(), OracleErrorCode::HboOracleMissingEntry);
    }

    #[test]
    fn test_unknown_query() {
        let err = oracle()
            .execution_time(&OracleRequest::new("q99", 0, 64))
            .unwrap_err();
        assert_eq!(err.code(), OracleErrorCode::HboOracleUnknownQuery);
    }

    #[test]
    fn test_configuration_count() {
        let oracle = oracle();
        assert_eq!(oracle.configuration_count("q01").unwrap(), 2);
        assert!(oracle.configuration_count("nope").is_err());
        assert_eq!(oracle.len(), 2);
    }
}
