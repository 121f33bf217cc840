//! Cost model for a single binary join.
//!
//! Prices an equi-join of two already-costed operands under two physical
//! strategies and keeps the cheaper one:
//!
//! - hash join: `left_cost + rows_l * hash_build + right_cost + rows_r * hash_probe + out * output_row`
//! - nested loop: `rows_l * rows_r + out * output_row`
//!
//! `rows_l` and `rows_r` are the base-table row counts of the predicate's
//! endpoint tables. The nested loop ignores the inputs' prior cost, so it only
//! wins for very small operands.

use std::sync::Arc;

use crate::cardinality::CardinalityEstimator;
use crate::plan::{JoinCondition, JoinOp, JoinResult, JoinStrategy, PlanNode};
use crate::predicates::JoinPredicate;

/// Per-row cost constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostConstants {
    /// Cost to insert one left row into the hash table.
    pub hash_build_cost: f64,
    /// Cost to probe the hash table with one right row.
    pub hash_probe_cost: f64,
    /// Cost to materialize one output row.
    pub output_row_cost: f64,
}

impl Default for CostConstants {
    fn default() -> Self {
        DEFAULT_COST_CONSTANTS
    }
}

/// Default cost constants.
pub const DEFAULT_COST_CONSTANTS: CostConstants = CostConstants {
    hash_build_cost: 3.5,
    hash_probe_cost: 1.5,
    output_row_cost: 0.1,
};

/// Join cost model.
#[derive(Debug, Clone, Default)]
pub struct CostModel {
    constants: CostConstants,
}

impl CostModel {
    /// Creates a cost model with the default constants.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cost model with custom constants.
    #[must_use]
    pub fn with_constants(constants: CostConstants) -> Self {
        Self { constants }
    }

    /// The constants in use.
    #[must_use]
    pub fn constants(&self) -> &CostConstants {
        &self.constants
    }

    /// Hash-join cost, including the cost of producing both inputs.
    #[must_use]
    pub fn hash_join_cost(
        &self,
        left_rows: f64,
        right_rows: f64,
        left_input_cost: f64,
        right_input_cost: f64,
        result_rows: f64,
    ) -> f64 {
        left_input_cost
            + left_rows * self.constants.hash_build_cost
            + right_input_cost
            + right_rows * self.constants.hash_probe_cost
            + result_rows * self.constants.output_row_cost
    }

    /// Nested-loop cost.
    #[must_use]
    pub fn nested_loop_cost(&self, left_rows: f64, right_rows: f64, result_rows: f64) -> f64 {
        left_rows * right_rows + result_rows * self.constants.output_row_cost
    }

    /// Prices the join described by `predicate` on top of two costed operands.
    ///
    /// Returns [`JoinResult::infeasible`] when the join cardinality cannot be
    /// estimated. Otherwise the result's plan is the join of the two endpoint
    /// tables, annotated with the cheaper strategy (hash join on ties).
    #[must_use]
    pub fn cost_binary_join(
        &self,
        estimator: &CardinalityEstimator<'_>,
        predicate: &JoinPredicate,
        left_result: &JoinResult,
        right_result: &JoinResult,
    ) -> JoinResult {
        let Some(cardinality) = estimator.estimate_join_cardinality(
            predicate.left_table,
            predicate.right_table,
            &predicate.left_attribute,
            &predicate.right_attribute,
        ) else {
            return JoinResult::infeasible();
        };

        let left_rows = estimator.table_rows(predicate.left_table);
        let right_rows = estimator.table_rows(predicate.right_table);
        let result_rows = left_rows * right_rows / cardinality;

        let hash = self.hash_join_cost(
            left_rows,
            right_rows,
            left_result.cost,
            right_result.cost,
            result_rows,
        );
        let nested = self.nested_loop_cost(left_rows, right_rows, result_rows);
        let (cost, strategy) = if nested < hash {
            (nested, JoinStrategy::NestedLoop)
        } else {
            (hash, JoinStrategy::HashJoin)
        };

        let plan = PlanNode::Join(JoinOp {
            left: Arc::new(PlanNode::scan(predicate.left_table, Vec::new(), left_rows)),
            right: Arc::new(PlanNode::scan(predicate.right_table, Vec::new(), right_rows)),
            condition: Some(JoinCondition::from(predicate)),
            strategy: Some(strategy),
            rows: result_rows,
            cost,
        });

        JoinResult {
            cost,
            plan: Arc::new(plan),
            result_rows,
        }
    }
}
