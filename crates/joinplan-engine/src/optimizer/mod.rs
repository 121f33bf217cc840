//! Join order optimizer.
//!
//! Searches every way to split an ordered table sequence into a contiguous
//! left prefix and right suffix, recursively, pricing each split's connecting
//! join predicates with the [`CostModel`] and falling back to a cross join.
//! Only contiguous partitions of the given ordering are considered; the
//! ordering itself is never permuted.
//!
//! ## Submodules
//!
//! - `search` - The recursive split search
//! - `memo` - Sub-sequence result cache

mod memo;
mod search;

pub use memo::MemoStats;

use joinplan_common::{Error, Result, TableId};
use joinplan_core::{Catalog, CostModel, JoinResult};

use crate::config::Config;
use memo::Memo;

/// Join order optimizer over a catalog snapshot.
pub struct Optimizer<'a> {
    /// Statistics and predicates.
    catalog: &'a Catalog,
    /// Search configuration.
    config: Config,
    /// Cost model for single joins.
    cost_model: CostModel,
    /// Sub-sequence cache.
    memo: Memo,
}

impl<'a> Optimizer<'a> {
    /// Creates an optimizer with the default configuration.
    #[must_use]
    pub fn new(catalog: &'a Catalog) -> Self {
        Self::with_config(catalog, Config::default())
    }

    /// Creates an optimizer with the given configuration.
    #[must_use]
    pub fn with_config(catalog: &'a Catalog, config: Config) -> Self {
        Self {
            catalog,
            cost_model: CostModel::with_constants(config.cost),
            memo: Memo::new(config.memoize),
            config,
        }
    }

    /// Returns the catalog being searched.
    pub fn catalog(&self) -> &Catalog {
        self.catalog
    }

    /// Memo counters accumulated so far.
    pub fn memo_stats(&self) -> MemoStats {
        self.memo.stats()
    }

    /// Finds the cheapest plan for all tables in ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySequence`] if the catalog has no tables.
    pub fn optimize(&self) -> Result<JoinResult> {
        let tables = self.catalog.table_ids();
        if tables.is_empty() {
            return Err(Error::EmptySequence);
        }

        tracing::info!(
            "Optimizing join order for {} tables with {} join predicates",
            tables.len(),
            self.catalog.predicates().joins().len()
        );

        let result = self.solve(&tables);

        if result.is_feasible() {
            tracing::info!(
                "Best plan costs {:.2} and yields {:.2} rows",
                result.cost,
                result.result_rows
            );
        } else {
            tracing::warn!("No feasible join plan for {} tables", tables.len());
        }
        if self.config.memoize {
            let stats = self.memo.stats();
            tracing::debug!(
                "Memo: {} hits, {} misses, {} entries",
                stats.hits,
                stats.misses,
                stats.entries
            );
        }

        Ok(result)
    }

    /// Finds the cheapest plan for `tables`, in the given order.
    ///
    /// Every id must belong to the catalog. An empty slice yields the
    /// infeasible result.
    pub(crate) fn solve(&self, tables: &[TableId]) -> JoinResult {
        self.solve_sequence(tables)
    }
}
