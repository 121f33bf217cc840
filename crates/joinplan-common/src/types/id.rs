//! Identifier types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 1-based index of a table in the statistics snapshot.
///
/// Table numbering follows the input order: the first table read is `TableId(1)`.
/// The `Display` form is the bare number, which is also how tables appear in
/// rendered plans.
///
/// # Examples
///
/// ```
/// use joinplan_common::TableId;
///
/// let t = TableId::new(3);
/// assert_eq!(t.to_string(), "3");
/// assert_eq!(t.index(), 2);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableId(pub u32);

impl TableId {
    /// Creates a table id from its 1-based number.
    #[must_use]
    pub const fn new(number: u32) -> Self {
        Self(number)
    }

    /// Returns the 1-based table number.
    #[must_use]
    pub const fn number(self) -> u32 {
        self.0
    }

    /// Returns the 0-based position in the statistics vector.
    ///
    /// Only meaningful for validated ids (`number() >= 1`).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }

    /// Returns the ascending sequence `1..=count`.
    pub fn range(count: usize) -> impl Iterator<Item = TableId> {
        (1..=count as u32).map(TableId)
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for TableId {
    fn from(number: u32) -> Self {
        Self(number)
    }
}
