//! # joinplan-adapters
//!
//! The I/O boundary of joinplan: everything between raw text and a validated
//! [`Catalog`](joinplan_core::Catalog), and between a
//! [`JoinResult`](joinplan_core::JoinResult) and what gets printed.
//!
//! ## Modules
//!
//! - [`input`] - Whitespace token input
//! - [`output`] - Result line and JSON rendering

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod input;
pub mod output;

pub use input::{parse_catalog, read_catalog, read_catalog_from_path};
pub use output::{PlanOutput, format_plan_line};
