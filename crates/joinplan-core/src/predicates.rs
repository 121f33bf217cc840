//! Scan and join predicates.
//!
//! Both collections keep declaration order: the last applicable scan predicate
//! decides a leaf's row estimate, and the first matching join predicate wins
//! cost ties.

use joinplan_common::TableId;

/// A selectivity filter on one attribute of one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanPredicate {
    /// The filtered table.
    pub table: TableId,
    /// The filtered attribute.
    pub attribute: String,
}

impl ScanPredicate {
    /// Creates a scan predicate.
    pub fn new(table: TableId, attribute: impl Into<String>) -> Self {
        Self {
            table,
            attribute: attribute.into(),
        }
    }
}

/// An equi-join condition between two tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinPredicate {
    /// First endpoint table.
    pub left_table: TableId,
    /// Second endpoint table.
    pub right_table: TableId,
    /// Join attribute on `left_table`.
    pub left_attribute: String,
    /// Join attribute on `right_table`.
    pub right_attribute: String,
}

impl JoinPredicate {
    /// Creates a join predicate.
    pub fn new(
        left_table: TableId,
        right_table: TableId,
        left_attribute: impl Into<String>,
        right_attribute: impl Into<String>,
    ) -> Self {
        Self {
            left_table,
            right_table,
            left_attribute: left_attribute.into(),
            right_attribute: right_attribute.into(),
        }
    }

    /// Returns whether the two endpoints land one on each side, in either orientation.
    #[must_use]
    pub fn connects(&self, left: &[TableId], right: &[TableId]) -> bool {
        (left.contains(&self.left_table) && right.contains(&self.right_table))
            || (left.contains(&self.right_table) && right.contains(&self.left_table))
    }
}

/// All predicates of a query, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct PredicateSet {
    scans: Vec<ScanPredicate>,
    joins: Vec<JoinPredicate>,
}

impl PredicateSet {
    /// Creates an empty predicate set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a scan predicate.
    #[must_use]
    pub fn with_scan(mut self, table: TableId, attribute: &str) -> Self {
        self.push_scan(ScanPredicate::new(table, attribute));
        self
    }

    /// Adds a join predicate.
    #[must_use]
    pub fn with_join(
        mut self,
        left_table: TableId,
        right_table: TableId,
        left_attribute: &str,
        right_attribute: &str,
    ) -> Self {
        self.push_join(JoinPredicate::new(
            left_table,
            right_table,
            left_attribute,
            right_attribute,
        ));
        self
    }

    /// Appends a scan predicate.
    pub fn push_scan(&mut self, predicate: ScanPredicate) {
        self.scans.push(predicate);
    }

    /// Appends a join predicate.
    pub fn push_join(&mut self, predicate: JoinPredicate) {
        self.joins.push(predicate);
    }

    /// All scan predicates.
    #[must_use]
    pub fn scans(&self) -> &[ScanPredicate] {
        &self.scans
    }

    /// All join predicates.
    #[must_use]
    pub fn joins(&self) -> &[JoinPredicate] {
        &self.joins
    }

    /// Scan predicates on `table`, in declaration order.
    pub fn scans_for(&self, table: TableId) -> impl Iterator<Item = &ScanPredicate> {
        self.scans.iter().filter(move |p| p.table == table)
    }

    /// Join predicates with one endpoint in `left` and the other in `right`.
    pub fn joins_between<'a>(
        &'a self,
        left: &'a [TableId],
        right: &'a [TableId],
    ) -> impl Iterator<Item = &'a JoinPredicate> {
        self.joins.iter().filter(move |p| p.connects(left, right))
    }

    /// Every table id referenced by any predicate.
    pub fn referenced_tables(&self) -> impl Iterator<Item = TableId> + '_ {
        self.scans
            .iter()
            .map(|p| p.table)
            .chain(self.joins.iter().flat_map(|p| [p.left_table, p.right_table]))
    }
}
