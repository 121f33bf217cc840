//! The immutable statistics and predicate snapshot the optimizer runs against.

use joinplan_common::{Error, Result, TableId};

use crate::cardinality::CardinalityEstimator;
use crate::predicates::PredicateSet;
use crate::statistics::{Statistics, TableStats};

/// Validated statistics plus predicates.
///
/// Construction checks that every predicate references an existing table, so
/// downstream lookups by [`TableId`] never miss. There is no mutable access
/// once built.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    statistics: Statistics,
    predicates: PredicateSet,
}

impl Catalog {
    /// Builds a catalog, rejecting predicates on unknown tables and invalid statistics.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TableOutOfRange`] for a predicate on a table outside
    /// `1..=table_count`, and [`Error::InvalidStatistic`] for a negative or NaN
    /// row count or cardinality.
    pub fn new(statistics: Statistics, predicates: PredicateSet) -> Result<Self> {
        let count = statistics.table_count();
        for table in predicates.referenced_tables() {
            if !statistics.contains(table) {
                return Err(Error::TableOutOfRange {
                    index: i64::from(table.number()),
                    count,
                });
            }
        }
        for (id, table) in statistics.iter() {
            validate_table(id, table)?;
        }
        Ok(Self {
            statistics,
            predicates,
        })
    }

    /// Number of tables.
    #[must_use]
    pub fn table_count(&self) -> usize {
        self.statistics.table_count()
    }

    /// Statistics for a table in this catalog.
    #[must_use]
    pub fn table(&self, id: TableId) -> &TableStats {
        self.statistics.table(id)
    }

    /// The statistics store.
    #[must_use]
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// The predicate store.
    #[must_use]
    pub fn predicates(&self) -> &PredicateSet {
        &self.predicates
    }

    /// A cardinality estimator over this catalog's statistics.
    #[must_use]
    pub fn estimator(&self) -> CardinalityEstimator<'_> {
        CardinalityEstimator::new(&self.statistics)
    }

    /// All table ids in ascending order.
    #[must_use]
    pub fn table_ids(&self) -> Vec<TableId> {
        TableId::range(self.table_count()).collect()
    }
}

fn validate_table(id: TableId, table: &TableStats) -> Result<()> {
    if !is_valid_statistic(table.rows()) {
        return Err(Error::InvalidStatistic(format!(
            "table {id} has row count {}",
            table.rows()
        )));
    }
    for (attribute, cardinality) in table.cardinalities() {
        if !is_valid_statistic(cardinality) {
            return Err(Error::InvalidStatistic(format!(
                "table {id} attribute {attribute} has cardinality {cardinality}"
            )));
        }
    }
    Ok(())
}

fn is_valid_statistic(value: f64) -> bool {
    value >= 0.0
}
