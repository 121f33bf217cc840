//! # joinplan-common
//!
//! Foundation layer for joinplan: identifiers and the shared error type.
//!
//! This crate has no internal dependencies and should be kept minimal.
//!
//! ## Modules
//!
//! - [`types`] - Core type definitions ([`TableId`])
//! - [`utils`] - Utilities (errors)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod types;
pub mod utils;

pub use types::TableId;
pub use utils::error::{Error, Result};
