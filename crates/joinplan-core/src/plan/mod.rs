//! Plan trees and join results.
//!
//! A [`JoinResult`] is what every costed step of the search produces: a
//! cumulative cost, the estimated output rows, and the operator tree built so
//! far. The tree is rendered to text separately (see [`PlanNotation`]), so
//! leaf row estimates never depend on how filters are displayed.

mod render;

use std::sync::Arc;

use joinplan_common::TableId;

use crate::predicates::JoinPredicate;

pub use render::PlanNotation;

/// Physical join strategy picked by the cost model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinStrategy {
    /// Build a hash table on the left input, probe with the right.
    HashJoin,
    /// Compare every left row with every right row.
    NestedLoop,
}

impl JoinStrategy {
    /// Human-readable name.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            JoinStrategy::HashJoin => "Hash Join",
            JoinStrategy::NestedLoop => "Nested Loop",
        }
    }
}

/// The equi-join condition attached to a join node, in predicate orientation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinCondition {
    /// First endpoint table.
    pub left_table: TableId,
    /// Attribute on `left_table`.
    pub left_attribute: String,
    /// Second endpoint table.
    pub right_table: TableId,
    /// Attribute on `right_table`.
    pub right_attribute: String,
}

impl From<&JoinPredicate> for JoinCondition {
    fn from(predicate: &JoinPredicate) -> Self {
        Self {
            left_table: predicate.left_table,
            left_attribute: predicate.left_attribute.clone(),
            right_table: predicate.right_table,
            right_attribute: predicate.right_attribute.clone(),
        }
    }
}

/// Scan of a single base table.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOp {
    /// The scanned table.
    pub table: TableId,
    /// Attributes of the scan predicates applied to this table.
    pub filters: Vec<String>,
    /// Estimated output rows.
    pub rows: f64,
}

/// Binary join of two subplans.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinOp {
    /// Left input.
    pub left: Arc<PlanNode>,
    /// Right input.
    pub right: Arc<PlanNode>,
    /// Join condition; `None` for a cross join.
    pub condition: Option<JoinCondition>,
    /// Strategy chosen by the cost model; `None` for a cross join.
    pub strategy: Option<JoinStrategy>,
    /// Estimated output rows.
    pub rows: f64,
    /// Cumulative cost up to and including this join.
    pub cost: f64,
}

impl JoinOp {
    /// Returns whether both inputs are base-table scans.
    #[must_use]
    pub fn is_leaf_pair(&self) -> bool {
        matches!(
            (self.left.as_ref(), self.right.as_ref()),
            (PlanNode::Scan(_), PlanNode::Scan(_))
        )
    }
}

/// A node in a join plan.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanNode {
    /// No plan: the result of an infeasible join.
    Empty,
    /// Base-table scan.
    Scan(ScanOp),
    /// Binary join.
    Join(JoinOp),
}

impl PlanNode {
    /// Creates a scan node.
    #[must_use]
    pub fn scan(table: TableId, filters: Vec<String>, rows: f64) -> Self {
        PlanNode::Scan(ScanOp {
            table,
            filters,
            rows,
        })
    }

    /// The scanned table, if this is a scan.
    #[must_use]
    pub fn scan_table(&self) -> Option<TableId> {
        match self {
            PlanNode::Scan(scan) => Some(scan.table),
            _ => None,
        }
    }

    /// Strategy of the top join, if this is a join with a condition.
    #[must_use]
    pub fn strategy(&self) -> Option<JoinStrategy> {
        match self {
            PlanNode::Join(join) => join.strategy,
            _ => None,
        }
    }

    /// Tables covered by this plan, left to right.
    #[must_use]
    pub fn tables(&self) -> Vec<TableId> {
        let mut out = Vec::new();
        self.collect_tables(&mut out);
        out
    }

    fn collect_tables(&self, out: &mut Vec<TableId>) {
        match self {
            PlanNode::Empty => {}
            PlanNode::Scan(scan) => out.push(scan.table),
            PlanNode::Join(join) => {
                join.left.collect_tables(out);
                join.right.collect_tables(out);
            }
        }
    }
}

/// Output of one costed step of the search.
#[derive(Debug, Clone)]
pub struct JoinResult {
    /// Cumulative estimated cost; `+inf` marks an infeasible result.
    pub cost: f64,
    /// The operator tree.
    pub plan: Arc<PlanNode>,
    /// Estimated output rows.
    pub result_rows: f64,
}

impl JoinResult {
    /// A zero-cost leaf scan.
    #[must_use]
    pub fn leaf(table: TableId, filters: Vec<String>, rows: f64) -> Self {
        Self {
            cost: 0.0,
            plan: Arc::new(PlanNode::scan(table, filters, rows)),
            result_rows: rows,
        }
    }

    /// The result of a join that must never be selected.
    #[must_use]
    pub fn infeasible() -> Self {
        Self {
            cost: f64::INFINITY,
            plan: Arc::new(PlanNode::Empty),
            result_rows: 0.0,
        }
    }

    /// Returns whether the cost is finite.
    #[must_use]
    pub fn is_feasible(&self) -> bool {
        self.cost.is_finite()
    }

    /// Renders the plan in the given notation.
    #[must_use]
    pub fn render(&self, notation: PlanNotation) -> String {
        self.plan.render(notation)
    }
}
