//! Statistics for cost-based join ordering.
//!
//! Each table carries a row count and a map from attribute name to the
//! number of distinct values of that attribute. The same map holds the
//! filtered cardinality used by scan predicates, so an attribute that is both
//! scanned and joined on shares one value.

use hashbrown::HashMap;
use joinplan_common::TableId;

/// Statistics for a single table.
#[derive(Debug, Clone, Default)]
pub struct TableStats {
    rows: f64,
    cardinalities: HashMap<String, f64>,
}

impl TableStats {
    /// Creates statistics for a table with the given row count.
    #[must_use]
    pub fn new(rows: f64) -> Self {
        Self {
            rows,
            cardinalities: HashMap::new(),
        }
    }

    /// Adds an attribute cardinality.
    #[must_use]
    pub fn with_cardinality(mut self, attribute: &str, cardinality: f64) -> Self {
        self.set_cardinality(attribute, cardinality);
        self
    }

    /// Records an attribute cardinality, replacing any earlier value.
    pub fn set_cardinality(&mut self, attribute: &str, cardinality: f64) {
        self.cardinalities.insert(attribute.to_string(), cardinality);
    }

    /// Returns the table's row count.
    #[must_use]
    pub fn rows(&self) -> f64 {
        self.rows
    }

    /// Returns the cardinality of `attribute`, or `0.0` when it was never recorded.
    #[must_use]
    pub fn cardinality(&self, attribute: &str) -> f64 {
        self.cardinalities.get(attribute).copied().unwrap_or(0.0)
    }

    /// Iterates over the recorded attribute cardinalities.
    pub fn cardinalities(&self) -> impl Iterator<Item = (&str, f64)> {
        self.cardinalities.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Statistics for every table, indexed by [`TableId`].
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    tables: Vec<TableStats>,
}

impl Statistics {
    /// Creates an empty statistics store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a table; its id is one past the previous table's.
    #[must_use]
    pub fn with_table(mut self, stats: TableStats) -> Self {
        self.push_table(stats);
        self
    }

    /// Appends a table and returns the id it was assigned.
    pub fn push_table(&mut self, stats: TableStats) -> TableId {
        self.tables.push(stats);
        TableId(self.tables.len() as u32)
    }

    /// Number of tables.
    #[must_use]
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Returns whether `id` names a table in this store.
    #[must_use]
    pub fn contains(&self, id: TableId) -> bool {
        id.number() >= 1 && id.index() < self.tables.len()
    }

    /// Returns the statistics for `id`, if it exists.
    #[must_use]
    pub fn get(&self, id: TableId) -> Option<&TableStats> {
        if id.number() == 0 {
            return None;
        }
        self.tables.get(id.index())
    }

    /// Returns the statistics for a table known to exist.
    ///
    /// # Panics
    ///
    /// Panics if `id` is outside `1..=table_count()`. Ids coming from a
    /// validated [`Catalog`](crate::Catalog) are always in range.
    #[must_use]
    pub fn table(&self, id: TableId) -> &TableStats {
        &self.tables[id.index()]
    }

    /// Mutable access for loaders that fill in cardinalities after the row counts.
    pub fn get_mut(&mut self, id: TableId) -> Option<&mut TableStats> {
        if id.number() == 0 {
            return None;
        }
        self.tables.get_mut(id.index())
    }

    /// Iterates over `(id, stats)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (TableId, &TableStats)> {
        TableId::range(self.tables.len()).zip(self.tables.iter())
    }
}
