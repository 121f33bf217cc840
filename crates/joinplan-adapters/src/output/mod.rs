//! Result rendering.

use joinplan_common::TableId;
use joinplan_core::{JoinResult, PlanNotation};
use serde::Serialize;

/// The single output line: plan text, one space, cost with two decimals.
///
/// Costs are always fixed-point. An infeasible result prints an empty plan
/// and `inf`.
pub fn format_plan_line(result: &JoinResult, notation: PlanNotation) -> String {
    format!("{} {:.2}", result.render(notation), result.cost)
}

/// Machine-readable form of a [`JoinResult`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanOutput {
    /// Rendered plan text.
    pub plan: String,
    /// Total cost, `None` when no feasible plan exists.
    pub cost: Option<f64>,
    /// Estimated result rows.
    pub rows: f64,
    /// Tables in plan order.
    pub tables: Vec<TableId>,
}

impl PlanOutput {
    /// Captures `result` rendered in `notation`.
    pub fn new(result: &JoinResult, notation: PlanNotation) -> Self {
        Self {
            plan: result.render(notation),
            cost: result.is_feasible().then_some(result.cost),
            rows: result.result_rows,
            tables: result.plan.tables(),
        }
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the serializer error, which cannot happen for this type in practice.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
