//! Cardinality estimation for join ordering.
//!
//! Estimates the rows surviving a scan filter and the cardinality of an
//! equi-join between two base tables.

use joinplan_common::TableId;

use crate::predicates::PredicateSet;
use crate::statistics::Statistics;

/// Cardinality estimator over a statistics snapshot.
#[derive(Debug, Clone, Copy)]
pub struct CardinalityEstimator<'a> {
    statistics: &'a Statistics,
}

impl<'a> CardinalityEstimator<'a> {
    /// Creates an estimator reading from `statistics`.
    #[must_use]
    pub fn new(statistics: &'a Statistics) -> Self {
        Self { statistics }
    }

    /// Raw row count of `table`.
    #[must_use]
    pub fn table_rows(&self, table: TableId) -> f64 {
        self.statistics.table(table).rows()
    }

    /// Rows of `table` that survive a filter on `attribute`: `rows / cardinality`.
    ///
    /// A zero cardinality follows IEEE division (`inf`, or `NaN` for zero rows).
    #[must_use]
    pub fn apply_scan_predicate(&self, table: TableId, attribute: &str) -> f64 {
        let stats = self.statistics.table(table);
        stats.rows() / stats.cardinality(attribute)
    }

    /// Estimated row count for a leaf scan of `table`.
    ///
    /// Starts at the raw row count; each applicable scan predicate overwrites
    /// the estimate, so the last one in declaration order decides.
    #[must_use]
    pub fn scan_rows(&self, table: TableId, predicates: &PredicateSet) -> f64 {
        predicates
            .scans_for(table)
            .last()
            .map_or(self.statistics.table(table).rows(), |p| {
                self.apply_scan_predicate(table, &p.attribute)
            })
    }

    /// Join cardinality `(rows_l * rows_r) / max(card_l, card_r)`.
    ///
    /// Returns `None` when both attribute cardinalities are zero (including
    /// attributes with no recorded statistics). Such a join is infeasible and
    /// must never be chosen.
    #[must_use]
    pub fn estimate_join_cardinality(
        &self,
        left: TableId,
        right: TableId,
        left_attribute: &str,
        right_attribute: &str,
    ) -> Option<f64> {
        let left_stats = self.statistics.table(left);
        let right_stats = self.statistics.table(right);

        let max_cardinality = left_stats
            .cardinality(left_attribute)
            .max(right_stats.cardinality(right_attribute));
        if max_cardinality == 0.0 {
            tracing::trace!(
                "join {}.{} = {}.{} has no cardinality on either side",
                left,
                left_attribute,
                right,
                right_attribute
            );
            return None;
        }

        Some(left_stats.rows() * right_stats.rows() / max_cardinality)
    }
}
