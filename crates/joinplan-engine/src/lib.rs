//! # joinplan-engine
//!
//! Join tree search over a [`Catalog`](joinplan_core::Catalog) snapshot.
//!
//! ## Modules
//!
//! - [`config`] - Optimizer configuration
//! - [`optimizer`] - The recursive plan search
//!
//! ## Example
//!
//! ```
//! use joinplan_common::TableId;
//! use joinplan_core::{Catalog, PlanNotation, PredicateSet, Statistics, TableStats};
//! use joinplan_engine::Optimizer;
//!
//! let stats = Statistics::new()
//!     .with_table(TableStats::new(100.0).with_cardinality("a", 10.0))
//!     .with_table(TableStats::new(50.0).with_cardinality("b", 5.0));
//! let preds = PredicateSet::new().with_join(TableId(1), TableId(2), "a", "b");
//! let catalog = Catalog::new(stats, preds)?;
//!
//! let best = Optimizer::new(&catalog).optimize()?;
//! assert_eq!(best.render(PlanNotation::Compact), "(1 2 {a b})");
//! assert!((best.cost - 426.0).abs() < 1e-9);
//! # Ok::<(), joinplan_common::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod optimizer;

pub use config::{Config, CrossJoinPolicy};
pub use optimizer::{MemoStats, Optimizer};
