//! Whitespace token input.
//!
//! The input is one stream of whitespace-separated tokens, in this order:
//!
//! 1. table count
//! 2. one row count per table, in table order
//! 3. attribute statistics count, then `table attribute cardinality` triples
//! 4. scan predicate count, then `table attribute` pairs
//! 5. join predicate count, then `left right left_attr right_attr` quadruples
//!
//! Table indices are 1-based. Tokens after the last join predicate are
//! ignored.

mod tokens;

pub use tokens::TokenStream;

use std::fs;
use std::io::Read;
use std::path::Path;

use joinplan_common::Result;
use joinplan_core::{Catalog, JoinPredicate, PredicateSet, ScanPredicate, Statistics, TableStats};

/// Parses a catalog from token text.
///
/// # Errors
///
/// Returns a parse error for missing or malformed tokens, `TableOutOfRange`
/// for table indices outside `1..=table_count`, and `InvalidStatistic` for
/// negative or NaN rows and cardinalities.
pub fn parse_catalog(source: &str) -> Result<Catalog> {
    let mut tokens = TokenStream::new(source);

    let table_count = tokens.next_count("table count")?;
    let mut statistics = Statistics::new();
    for _ in 0..table_count {
        statistics.push_table(TableStats::new(tokens.next_f64("row count")?));
    }

    let filter_count = tokens.next_count("attribute statistics count")?;
    for _ in 0..filter_count {
        let table = tokens.next_table("statistics table", table_count)?;
        let attribute = tokens.next_word("statistics attribute")?;
        let cardinality = tokens.next_f64("cardinality")?;
        if let Some(stats) = statistics.get_mut(table) {
            stats.set_cardinality(attribute, cardinality);
        }
    }

    let mut predicates = PredicateSet::new();
    let scan_count = tokens.next_count("scan predicate count")?;
    for _ in 0..scan_count {
        let table = tokens.next_table("scan table", table_count)?;
        let attribute = tokens.next_word("scan attribute")?;
        predicates.push_scan(ScanPredicate::new(table, attribute));
    }

    let join_count = tokens.next_count("join predicate count")?;
    for _ in 0..join_count {
        let left = tokens.next_table("join left table", table_count)?;
        let right = tokens.next_table("join right table", table_count)?;
        let left_attribute = tokens.next_word("join left attribute")?;
        let right_attribute = tokens.next_word("join right attribute")?;
        predicates.push_join(JoinPredicate::new(left, right, left_attribute, right_attribute));
    }

    if tokens.remaining() > 0 {
        tracing::warn!(
            "Ignoring {} trailing tokens after position {}",
            tokens.remaining(),
            tokens.position()
        );
    }

    tracing::debug!(
        "Read {} tables, {} attribute statistics, {} scan and {} join predicates",
        table_count,
        filter_count,
        scan_count,
        join_count
    );

    Catalog::new(statistics, predicates)
}

/// Reads all of `reader` and parses it as a catalog.
///
/// # Errors
///
/// Returns an I/O error if reading fails, otherwise as [`parse_catalog`].
pub fn read_catalog<R: Read>(mut reader: R) -> Result<Catalog> {
    let mut source = String::new();
    reader.read_to_string(&mut source)?;
    parse_catalog(&source)
}

/// Reads and parses the file at `path`.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read, otherwise as
/// [`parse_catalog`].
pub fn read_catalog_from_path(path: impl AsRef<Path>) -> Result<Catalog> {
    let path = path.as_ref();
    tracing::debug!("Reading input from {}", path.display());
    parse_catalog(&fs::read_to_string(path)?)
}
