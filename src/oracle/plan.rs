//! Plan trees stored in the benchmark snapshot
//!
//! Field names follow the PostgreSQL `EXPLAIN (FORMAT JSON)` output that the
//! snapshot was recorded from. Unknown fields are ignored.

use serde::{Deserialize, Serialize};

use super::types::{Cardinality, Cost, Selectivity, Time};

/// Node of an `EXPLAIN` plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainNode {
    #[serde(rename = "Node Type")]
    pub node_type: String,
    #[serde(rename = "Plans", default)]
    pub plans: Vec<ExplainNode>,
    #[serde(rename = "Plan Rows")]
    pub estimated_cardinality: Cardinality,
    #[serde(rename = "Index Name", default)]
    pub index_name: Option<String>,
    #[serde(rename = "Relation Name", default)]
    pub relation_name: Option<String>,
    #[serde(rename = "Total Cost")]
    pub cost: Cost,
}

/// Node of an `EXPLAIN ANALYZE` plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainAnalyzeNode {
    #[serde(rename = "Node Type")]
    pub node_type: String,
    #[serde(rename = "Plans", default)]
    pub plans: Vec<ExplainAnalyzeNode>,
    #[serde(rename = "Plan Rows")]
    pub estimated_cardinality: Cardinality,
    #[serde(rename = "Actual Rows", default)]
    pub real_cardinality: Cardinality,
    #[serde(rename = "Index Name", default)]
    pub index_name: Option<String>,
    #[serde(rename = "Relation Name", default)]
    pub relation_name: Option<String>,
}

/// Estimated plan for one (query, hintset, dop)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainPlan {
    #[serde(rename = "Plan")]
    pub plan: ExplainNode,
    #[serde(rename = "Unique SQL Id")]
    pub template_id: i64,
    /// Planning time in microseconds
    #[serde(rename = "Planner Runtime")]
    pub planning_time: Time,
}

/// Analyzed plan; absent from the snapshot when the run timed out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainAnalyzePlan {
    #[serde(rename = "Plan")]
    pub plan: ExplainAnalyzeNode,
    #[serde(rename = "Unique SQL Id")]
    pub template_id: i64,
    /// Planning time in microseconds
    #[serde(rename = "Planner Runtime")]
    pub planning_time: Time,
    /// Execution time in microseconds
    #[serde(rename = "Total Runtime")]
    pub execution_time: Time,
}

/// Snapshot entry for one (query, hintset, dop)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plans {
    pub explain_plan: ExplainPlan,
    #[serde(default)]
    pub explain_analyze_plan: Option<ExplainAnalyzePlan>,
}

impl ExplainPlan {
    /// Operator-shape signature of the plan, ignoring cardinalities.
    ///
    /// Two configurations with the same signature produce the same physical
    /// plan and therefore share timings up to noise.
    pub fn logical_tree(&self, with_rels: bool) -> String {
        let mut parts = Vec::new();
        walk_signature(&self.plan, with_rels, false, &mut parts);
        parts.join(" ")
    }

    /// Signature that also includes estimated cardinalities
    pub fn full_plan(&self, with_rels: bool) -> String {
        let mut parts = Vec::new();
        walk_signature(&self.plan, with_rels, true, &mut parts);
        parts.join(" ")
    }

    /// Estimated cardinalities in pre-order
    pub fn cardinalities(&self) -> Vec<Cardinality> {
        let mut out = Vec::new();
        let mut stack = vec![&self.plan];
        while let Some(node) = stack.pop() {
            out.push(node.estimated_cardinality);
            stack.extend(node.plans.iter().rev());
        }
        out
    }

    /// Per-node selectivities in pre-order.
    ///
    /// A node's selectivity is its estimated rows divided by the product of
    /// its children's estimated rows. Leaves divide by 1.
    pub fn selectivities(&self) -> Vec<Selectivity> {
        let mut out = Vec::new();
        let mut stack = vec![&self.plan];
        while let Some(node) = stack.pop() {
            let max_possible: Cardinality = node
                .plans
                .iter()
                .map(|child| child.estimated_cardinality)
                .product();
            out.push(node.estimated_cardinality / max_possible);
            stack.extend(node.plans.iter().rev());
        }
        out
    }

    /// Planner-estimated total cost at the root
    pub fn total_cost(&self) -> Cost {
        self.plan.cost
    }
}

fn walk_signature(node: &ExplainNode, with_rels: bool, with_cards: bool, out: &mut Vec<String>) {
    let rel = node.relation_name.as_deref().unwrap_or("None");
    let index = node.index_name.as_deref().unwrap_or("None");
    let head = match (with_rels, with_cards) {
        (true, false) => format!("{} (Rel={}|Index={})", node.node_type, rel, index),
        (false, false) => node.node_type.clone(),
        (true, true) => format!(
            "{} (Rel={}|Index={}|Cards={})",
            node.node_type, rel, index, node.estimated_cardinality
        ),
        (false, true) => format!("{} (Cards={})", node.node_type, node.estimated_cardinality),
    };
    out.push(head);
    out.push("[".to_string());
    for child in &node.plans {
        walk_signature(child, with_rels, with_cards, out);
    }
    out.push("]".to_string());
}
