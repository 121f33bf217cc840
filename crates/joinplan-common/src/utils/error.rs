//! Error types shared across joinplan crates.
//!
//! Infeasible joins are not errors; they surface as an infinite cost on the
//! optimizer result. Errors here cover input that the optimizer core must
//! never see: unreadable tokens, out-of-range table references and invalid
//! statistics.

use thiserror::Error;

/// Result alias that carries a joinplan [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for joinplan operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A token was missing or could not be read as the expected kind.
    #[error("parse error at token {position}: {message}")]
    Parse {
        /// 0-based index of the offending token in the input stream.
        position: usize,
        /// What was expected.
        message: String,
    },

    /// A table reference outside `1..=count`.
    #[error("table index {index} out of range 1..={count}")]
    TableOutOfRange {
        /// The offending index as written.
        index: i64,
        /// Number of tables in the snapshot.
        count: usize,
    },

    /// A row count or cardinality that is negative or not a number.
    #[error("invalid statistic: {0}")]
    InvalidStatistic(String),

    /// The optimizer was asked to plan zero tables.
    #[error("cannot plan an empty table sequence")]
    EmptySequence,

    /// I/O failure while reading input.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates a parse error at the given token position.
    pub fn parse(position: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            position,
            message: message.into(),
        }
    }
}
