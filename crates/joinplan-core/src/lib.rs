//! # joinplan-core
//!
//! The estimation layer of joinplan: everything the plan search reads or
//! calls bottom-up.
//!
//! ## Modules
//!
//! - [`statistics`] - Per-table row counts and attribute cardinalities
//! - [`predicates`] - Scan and join predicates in declaration order
//! - [`catalog`] - The validated, immutable snapshot of both
//! - [`cardinality`] - Scan and join cardinality estimation
//! - [`cost`] - Hash-join vs nested-loop pricing of a single join
//! - [`plan`] - Plan trees, join results and their text rendering

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cardinality;
pub mod catalog;
pub mod cost;
pub mod plan;
pub mod predicates;
pub mod statistics;

pub use cardinality::CardinalityEstimator;
pub use catalog::Catalog;
pub use cost::{CostConstants, CostModel, DEFAULT_COST_CONSTANTS};
pub use plan::{
    JoinCondition, JoinOp, JoinResult, JoinStrategy, PlanNode, PlanNotation, ScanOp,
};
pub use predicates::{JoinPredicate, PredicateSet, ScanPredicate};
pub use statistics::{Statistics, TableStats};
