//! Recursive contiguous-partition search.
//!
//! `solve([t])` is a scan of `t`. `solve(ts)` tries every split point `i` in
//! `1..ts.len()`, solves `ts[..i]` and `ts[i..]`, and prices:
//!
//! - every join predicate with one endpoint on each side:
//!   `left.cost + right.cost + pairing.cost`
//! - a cross join: `left.cost + right.cost + left.rows * right.rows`
//!
//! The cheapest candidate wins under strict `<`, so ties go to the lowest
//! split and then to the earliest predicate.

use std::sync::Arc;

use joinplan_common::TableId;
use joinplan_core::{JoinCondition, JoinOp, JoinResult, PlanNode};
use rayon::prelude::*;

use super::Optimizer;
use crate::config::CrossJoinPolicy;

impl Optimizer<'_> {
    pub(super) fn solve_sequence(&self, tables: &[TableId]) -> JoinResult {
        match tables {
            [] => JoinResult::infeasible(),
            [table] => self.solve_leaf(*table),
            _ => {
                if let Some(hit) = self.memo.get(tables) {
                    return hit;
                }
                let result = self.solve_splits(tables);
                self.memo.insert(tables, &result);
                result
            }
        }
    }

    fn solve_leaf(&self, table: TableId) -> JoinResult {
        let predicates = self.catalog.predicates();
        let filters = predicates
            .scans_for(table)
            .map(|p| p.attribute.clone())
            .collect();
        let rows = self.catalog.estimator().scan_rows(table, predicates);
        JoinResult::leaf(table, filters, rows)
    }

    fn solve_splits(&self, tables: &[TableId]) -> JoinResult {
        let halves = self.solve_halves(tables);
        let estimator = self.catalog.estimator();
        let mut best: Option<JoinResult> = None;

        for (split, (left, right)) in (1..tables.len()).zip(&halves) {
            let (left_tables, right_tables) = tables.split_at(split);
            let mut found_join = false;

            for predicate in self
                .catalog
                .predicates()
                .joins_between(left_tables, right_tables)
            {
                let pairing = self
                    .cost_model
                    .cost_binary_join(&estimator, predicate, left, right);
                if !pairing.is_feasible() {
                    tracing::trace!(
                        "Split {} of {:?}: join {}.{} = {}.{} is infeasible",
                        split,
                        tables,
                        predicate.left_table,
                        predicate.left_attribute,
                        predicate.right_table,
                        predicate.right_attribute
                    );
                    continue;
                }

                let cost = left.cost + right.cost + pairing.cost;
                tracing::trace!(
                    "Split {} of {:?}: join {}.{} = {}.{} costs {}",
                    split,
                    tables,
                    predicate.left_table,
                    predicate.left_attribute,
                    predicate.right_table,
                    predicate.right_attribute,
                    cost
                );
                if improves(cost, best.as_ref()) {
                    let plan = PlanNode::Join(JoinOp {
                        left: Arc::clone(&left.plan),
                        right: Arc::clone(&right.plan),
                        condition: Some(JoinCondition::from(predicate)),
                        strategy: pairing.plan.strategy(),
                        rows: pairing.result_rows,
                        cost,
                    });
                    best = Some(JoinResult {
                        cost,
                        plan: Arc::new(plan),
                        result_rows: pairing.result_rows,
                    });
                    found_join = true;
                }
            }

            if !found_join || self.config.cross_join == CrossJoinPolicy::Always {
                let rows = left.result_rows * right.result_rows;
                let cost = left.cost + right.cost + rows;
                tracing::trace!(
                    "Split {} of {:?}: cross join costs {}",
                    split,
                    tables,
                    cost
                );
                if improves(cost, best.as_ref()) {
                    let plan = PlanNode::Join(JoinOp {
                        left: Arc::clone(&left.plan),
                        right: Arc::clone(&right.plan),
                        condition: None,
                        strategy: None,
                        rows,
                        cost,
                    });
                    best = Some(JoinResult {
                        cost,
                        plan: Arc::new(plan),
                        result_rows: rows,
                    });
                }
            }
        }

        match best {
            Some(result) => {
                tracing::debug!("Best for {:?} costs {}", tables, result.cost);
                result
            }
            None => {
                tracing::debug!("No feasible candidate for {:?}", tables);
                JoinResult::infeasible()
            }
        }
    }

    /// Solves both halves of every split point, in split order.
    fn solve_halves(&self, tables: &[TableId]) -> Vec<(JoinResult, JoinResult)> {
        let solve_split = |split: usize| {
            let (left, right) = tables.split_at(split);
            (self.solve_sequence(left), self.solve_sequence(right))
        };

        if self.config.parallel && tables.len() >= self.config.parallel_threshold {
            (1..tables.len()).into_par_iter().map(&solve_split).collect()
        } else {
            (1..tables.len()).map(&solve_split).collect()
        }
    }
}

fn improves(cost: f64, best: Option<&JoinResult>) -> bool {
    cost < best.map_or(f64::INFINITY, |b| b.cost)
}

#[cfg(test)]
mod tests {
    use joinplan_common::{Error, TableId};
    use joinplan_core::{
        Catalog, CostConstants, JoinStrategy, PlanNotation, PredicateSet, Statistics, TableStats,
    };

    use crate::config::{Config, CrossJoinPolicy};
    use crate::optimizer::Optimizer;

    fn ids(numbers: &[u32]) -> Vec<TableId> {
        numbers.iter().copied().map(TableId).collect()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    fn literal_catalog(predicates: PredicateSet) -> Catalog {
        let stats = Statistics::new()
            .with_table(TableStats::new(100.0).with_cardinality("a", 10.0))
            .with_table(TableStats::new(50.0).with_cardinality("b", 5.0));
        Catalog::new(stats, predicates).unwrap()
    }

    /// 1 (100 rows, a=10), 2 (50 rows, b=5, c=25), 3 (20 rows, d=20);
    /// predicates 1.a = 2.b and 2.c = 3.d.
    fn chain_catalog() -> Catalog {
        let stats = Statistics::new()
            .with_table(TableStats::new(100.0).with_cardinality("a", 10.0))
            .with_table(
                TableStats::new(50.0)
                    .with_cardinality("b", 5.0)
                    .with_cardinality("c", 25.0),
            )
            .with_table(TableStats::new(20.0).with_cardinality("d", 20.0));
        let preds = PredicateSet::new()
            .with_join(TableId(1), TableId(2), "a", "b")
            .with_join(TableId(2), TableId(3), "c", "d");
        Catalog::new(stats, preds).unwrap()
    }

    #[test]
    fn test_literal_two_table_join() {
        let catalog = literal_catalog(PredicateSet::new().with_join(TableId(1), TableId(2), "a", "b"));
        let result = Optimizer::new(&catalog).optimize().unwrap();

        assert_eq!(result.render(PlanNotation::Compact), "(1 2 {a b})");
        assert_eq!(result.render(PlanNotation::Qualified), "(1 2 {1.a 2.b})");
        assert_close(result.cost, 426.0);
        assert_close(result.result_rows, 10.0);
        assert_eq!(result.plan.strategy(), Some(JoinStrategy::HashJoin));
    }

    #[test]
    fn test_single_table() {
        let stats = Statistics::new().with_table(TableStats::new(77.0));
        let catalog = Catalog::new(stats, PredicateSet::new()).unwrap();
        let result = Optimizer::new(&catalog).optimize().unwrap();

        assert_eq!(result.cost, 0.0);
        assert_eq!(result.result_rows, 77.0);
        assert_eq!(result.render(PlanNotation::Compact), "1");
    }

    #[test]
    fn test_leaf_scan_predicates() {
        let stats = Statistics::new().with_table(
            TableStats::new(100.0)
                .with_cardinality("a", 10.0)
                .with_cardinality("b", 4.0),
        );
        let preds = PredicateSet::new()
            .with_scan(TableId(1), "a")
            .with_scan(TableId(1), "b");
        let catalog = Catalog::new(stats, preds).unwrap();
        let result = Optimizer::new(&catalog).solve(&ids(&[1]));

        assert_eq!(result.render(PlanNotation::Compact), "1ab");
        assert_close(result.result_rows, 25.0);
        assert_eq!(result.cost, 0.0);
    }

    #[test]
    fn test_scan_predicate_does_not_change_join_matching() {
        let catalog = literal_catalog(
            PredicateSet::new()
                .with_scan(TableId(1), "a")
                .with_join(TableId(1), TableId(2), "a", "b"),
        );
        let result = Optimizer::new(&catalog).optimize().unwrap();

        // Pairing prices base-table rows, so the filter leaves the cost alone.
        assert_close(result.cost, 426.0);
        assert_eq!(result.render(PlanNotation::Compact), "(1a 2 {a b})");
        assert_eq!(result.render(PlanNotation::Qualified), "(1a 2 {1.a 2.b})");
    }

    #[test]
    fn test_cross_join_without_predicates() {
        let catalog = literal_catalog(PredicateSet::new());
        let result = Optimizer::new(&catalog).optimize().unwrap();

        assert_eq!(result.render(PlanNotation::Compact), "(1 2)");
        assert_close(result.result_rows, 5000.0);
        assert_close(result.cost, 5000.0);
        assert!(result.plan.strategy().is_none());
    }

    #[test]
    fn test_cross_join_uses_filtered_rows() {
        let catalog = literal_catalog(PredicateSet::new().with_scan(TableId(2), "b"));
        let result = Optimizer::new(&catalog).optimize().unwrap();

        assert_eq!(result.render(PlanNotation::Compact), "(1 2b)");
        assert_close(result.result_rows, 1000.0);
        assert_close(result.cost, 1000.0);
    }

    #[test]
    fn test_infeasible_predicate_falls_back_to_cross_join() {
        let catalog = literal_catalog(PredicateSet::new().with_join(TableId(1), TableId(2), "x", "y"));
        let result = Optimizer::new(&catalog).optimize().unwrap();

        assert!(result.is_feasible());
        assert_eq!(result.render(PlanNotation::Compact), "(1 2)");
        assert_close(result.cost, 5000.0);
    }

    #[test]
    fn test_feasible_predicate_beats_infeasible_one() {
        let catalog = literal_catalog(
            PredicateSet::new()
                .with_join(TableId(1), TableId(2), "x", "y")
                .with_join(TableId(1), TableId(2), "a", "b"),
        );
        let result = Optimizer::new(&catalog).optimize().unwrap();
        assert_close(result.cost, 426.0);
        assert_eq!(result.render(PlanNotation::Compact), "(1 2 {a b})");
    }

    #[test]
    fn test_reversed_predicate_orientation() {
        let catalog = literal_catalog(PredicateSet::new().with_join(TableId(2), TableId(1), "b", "a"));
        let result = Optimizer::new(&catalog).optimize().unwrap();

        // build on table 2: 50*3.5 + 100*1.5 + 10*0.1
        assert_close(result.cost, 326.0);
        assert_eq!(result.render(PlanNotation::Compact), "(1 2 {a b})");
        assert_eq!(result.render(PlanNotation::Qualified), "(1 2 {2.b 1.a})");
    }

    #[test]
    fn test_custom_cost_constants() {
        let catalog = literal_catalog(PredicateSet::new().with_join(TableId(1), TableId(2), "a", "b"));
        let config = Config::default().with_cost_constants(CostConstants {
            hash_build_cost: 1.0,
            output_row_cost: 0.0,
            ..CostConstants::default()
        });
        let result = Optimizer::with_config(&catalog, config).optimize().unwrap();

        // 100*1 + 50*1.5, nested loop stays at 5000
        assert_close(result.cost, 175.0);
        assert_close(result.result_rows, 10.0);
        assert_eq!(result.plan.strategy(), Some(JoinStrategy::HashJoin));
        assert_eq!(result.render(PlanNotation::Compact), "(1 2 {a b})");
    }

    #[test]
    fn test_winning_predicate_suppresses_cheaper_cross_join() {
        let catalog_with = |predicates| {
            let stats = Statistics::new()
                .with_table(TableStats::new(1.0).with_cardinality("a", 1.0))
                .with_table(TableStats::new(1.0).with_cardinality("b", 1.0));
            Catalog::new(stats, predicates).unwrap()
        };
        let bare = catalog_with(PredicateSet::new());
        let joined = catalog_with(PredicateSet::new().with_join(TableId(1), TableId(2), "a", "b"));

        assert_close(Optimizer::new(&bare).optimize().unwrap().cost, 1.0);
        // nested loop 1*1 + 0.1 wins, so the 1.0 cross join is never priced
        assert_close(Optimizer::new(&joined).optimize().unwrap().cost, 1.1);

        let always = Config::default().with_cross_join(CrossJoinPolicy::Always);
        let result = Optimizer::with_config(&joined, always).optimize().unwrap();
        assert_close(result.cost, 1.0);
    }

    #[test]
    fn test_three_table_chain() {
        let catalog = chain_catalog();
        let optimizer = Optimizer::new(&catalog);

        let left = optimizer.solve(&ids(&[1, 2]));
        assert_close(left.cost, 426.0);
        let right = optimizer.solve(&ids(&[2, 3]));
        assert_close(right.cost, 207.5);
        assert_close(right.result_rows, 25.0);

        // split 1 joins 1.a = 2.b for 841; split 2 has no winning predicate
        // candidate (1059.5), so its cross join (426 + 10*20) wins.
        let result = optimizer.optimize().unwrap();
        assert_close(result.cost, 626.0);
        assert_close(result.result_rows, 200.0);
        assert_eq!(result.render(PlanNotation::Compact), "((1 2 {a b}) 3)");
        assert_eq!(result.render(PlanNotation::Qualified), "((1 2 {1.a 2.b}) 3)");
    }

    #[test]
    fn test_composite_plan_text() {
        let stats = Statistics::new()
            .with_table(TableStats::new(10.0).with_cardinality("a", 10.0))
            .with_table(
                TableStats::new(10.0)
                    .with_cardinality("b", 10.0)
                    .with_cardinality("c", 10.0),
            )
            .with_table(TableStats::new(1000.0).with_cardinality("d", 1000.0));
        let preds = PredicateSet::new()
            .with_join(TableId(1), TableId(2), "a", "b")
            .with_join(TableId(2), TableId(3), "c", "d");
        let catalog = Catalog::new(stats, preds).unwrap();
        let result = Optimizer::new(&catalog).optimize().unwrap();

        // split 1: (2 3) costs 1635; joining 1 onto it is a 10x10 nested loop
        // (100 + 1) for 1736. split 2: 51 + 1686 = 1737.
        assert_close(result.cost, 1736.0);
        assert_close(result.result_rows, 10.0);
        assert_eq!(result.plan.strategy(), Some(JoinStrategy::NestedLoop));
        assert_eq!(
            result.render(PlanNotation::Compact),
            "(1 (2 3 {c d}) {1.a 2.b})"
        );
        assert_eq!(
            result.render(PlanNotation::Qualified),
            "(1 (2 3 {2.c 3.d}) {1.a 2.b})"
        );
    }

    #[test]
    fn test_predicate_inside_one_half_does_not_connect() {
        let catalog = chain_catalog();
        let stats = catalog.statistics().clone();
        let preds = PredicateSet::new().with_join(TableId(2), TableId(3), "c", "d");
        let only_23 = Catalog::new(stats, preds).unwrap();
        let result = Optimizer::new(&only_23).optimize().unwrap();

        // split 1 is a cross join of 1 with (2 3): 0 + 207.5 + 100*25
        assert_close(result.cost, 2707.5);
        assert_eq!(result.render(PlanNotation::Compact), "(1 (2 3 {c d}))");
    }

    #[test]
    fn test_tie_goes_to_lowest_split() {
        let stats = Statistics::new()
            .with_table(TableStats::new(1.0))
            .with_table(TableStats::new(1.0))
            .with_table(TableStats::new(1.0));
        let catalog = Catalog::new(stats, PredicateSet::new()).unwrap();
        let result = Optimizer::new(&catalog).optimize().unwrap();

        assert_close(result.cost, 2.0);
        assert_eq!(result.render(PlanNotation::Compact), "(1 (2 3))");
    }

    #[test]
    fn test_tie_goes_to_first_predicate() {
        let stats = Statistics::new()
            .with_table(
                TableStats::new(100.0)
                    .with_cardinality("a", 10.0)
                    .with_cardinality("x", 10.0),
            )
            .with_table(
                TableStats::new(50.0)
                    .with_cardinality("b", 5.0)
                    .with_cardinality("y", 5.0),
            );
        let preds = PredicateSet::new()
            .with_join(TableId(1), TableId(2), "x", "y")
            .with_join(TableId(1), TableId(2), "a", "b");
        let catalog = Catalog::new(stats, preds).unwrap();
        let result = Optimizer::new(&catalog).optimize().unwrap();

        assert_eq!(result.render(PlanNotation::Compact), "(1 2 {x y})");
    }

    #[test]
    fn test_cross_join_policy() {
        let stats = Statistics::new()
            .with_table(TableStats::new(1.0).with_cardinality("a", 1.0))
            .with_table(TableStats::new(1.0).with_cardinality("b", 1.0));
        let preds = PredicateSet::new().with_join(TableId(1), TableId(2), "a", "b");
        let catalog = Catalog::new(stats, preds).unwrap();

        // Nested loop: 1*1 + 1*0.1
        let fallback = Optimizer::new(&catalog).optimize().unwrap();
        assert_close(fallback.cost, 1.1);
        assert_eq!(fallback.plan.strategy(), Some(JoinStrategy::NestedLoop));

        let config = Config::default().with_cross_join(CrossJoinPolicy::Always);
        let always = Optimizer::with_config(&catalog, config).optimize().unwrap();
        assert_close(always.cost, 1.0);
        assert_eq!(always.render(PlanNotation::Compact), "(1 2)");
    }

    #[test]
    fn test_memo_reuses_sub_sequences() {
        let stats = (0..5).fold(Statistics::new(), |s, _| s.with_table(TableStats::new(3.0)));
        let catalog = Catalog::new(stats, PredicateSet::new()).unwrap();

        let memoized = Optimizer::new(&catalog);
        let with_memo = memoized.optimize().unwrap();
        let stats = memoized.memo_stats();
        assert!(stats.hits > 0);
        // Every contiguous run of length >= 2 in five tables: 4 + 3 + 2 + 1
        assert_eq!(stats.entries, 10);

        let plain = Optimizer::with_config(&catalog, Config::default().with_memoization(false));
        let without_memo = plain.optimize().unwrap();
        assert_eq!(plain.memo_stats().entries, 0);

        assert_eq!(with_memo.cost, without_memo.cost);
        assert_eq!(
            with_memo.render(PlanNotation::Qualified),
            without_memo.render(PlanNotation::Qualified)
        );
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut stats = Statistics::new();
        let mut preds = PredicateSet::new();
        for i in 1..=7u32 {
            stats.push_table(
                TableStats::new(f64::from(i * 37 % 101 + 1))
                    .with_cardinality("k", f64::from(i % 4 + 1)),
            );
            if i > 1 && i % 3 != 0 {
                preds = preds.with_join(TableId(i - 1), TableId(i), "k", "k");
            }
        }
        let catalog = Catalog::new(stats, preds).unwrap();

        let sequential = Optimizer::with_config(&catalog, Config::default().with_memoization(false))
            .optimize()
            .unwrap();
        let parallel = Optimizer::with_config(
            &catalog,
            Config::default().with_parallel(true).with_parallel_threshold(2),
        )
        .optimize()
        .unwrap();

        assert_eq!(sequential.cost.to_bits(), parallel.cost.to_bits());
        assert_eq!(
            sequential.render(PlanNotation::Qualified),
            parallel.render(PlanNotation::Qualified)
        );
    }

    #[test]
    fn test_empty_catalog_is_an_error() {
        let catalog = Catalog::new(Statistics::new(), PredicateSet::new()).unwrap();
        assert!(matches!(
            Optimizer::new(&catalog).optimize(),
            Err(Error::EmptySequence)
        ));
        assert!(!Optimizer::new(&catalog).solve(&[]).is_feasible());
    }

    #[test]
    fn test_all_candidates_infinite_yields_infeasible() {
        // A scan predicate on an attribute with no statistics makes the leaf
        // estimate infinite, so the only candidate (a cross join) is too.
        let stats = Statistics::new()
            .with_table(TableStats::new(10.0))
            .with_table(TableStats::new(10.0));
        let preds = PredicateSet::new().with_scan(TableId(1), "z");
        let catalog = Catalog::new(stats, preds).unwrap();
        let result = Optimizer::new(&catalog).optimize().unwrap();

        assert!(!result.is_feasible());
        assert_eq!(result.render(PlanNotation::Compact), "");
        assert_eq!(result.result_rows, 0.0);
    }
}
