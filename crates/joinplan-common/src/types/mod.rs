//! Core type definitions for joinplan.
//!
//! - Identifier types ([`TableId`])

mod id;

pub use id::TableId;
