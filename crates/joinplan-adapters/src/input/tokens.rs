//! Whitespace token cursor.

use joinplan_common::{Error, Result, TableId};

/// Cursor over whitespace-separated tokens. Line layout is irrelevant.
pub struct TokenStream<'a> {
    tokens: Vec<&'a str>,
    position: usize,
}

impl<'a> TokenStream<'a> {
    /// Splits `source` on any whitespace.
    pub fn new(source: &'a str) -> Self {
        Self {
            tokens: source.split_whitespace().collect(),
            position: 0,
        }
    }

    /// Index of the next token.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of unread tokens.
    pub fn remaining(&self) -> usize {
        self.tokens.len() - self.position
    }

    /// Reads the next token verbatim.
    pub fn next_word(&mut self, what: &str) -> Result<&'a str> {
        let token = self
            .tokens
            .get(self.position)
            .copied()
            .ok_or_else(|| self.error(&format!("expected {what}, found end of input")))?;
        self.position += 1;
        Ok(token)
    }

    /// Reads a non-negative integer count.
    pub fn next_count(&mut self, what: &str) -> Result<usize> {
        let token = self.next_word(what)?;
        token
            .parse()
            .map_err(|_| {
                self.error_at_last(&format!(
                    "expected {what} as a non-negative integer, found {token:?}"
                ))
            })
    }

    /// Reads a floating point number.
    pub fn next_f64(&mut self, what: &str) -> Result<f64> {
        let token = self.next_word(what)?;
        token
            .parse()
            .map_err(|_| self.error_at_last(&format!("expected {what} as a number, found {token:?}")))
    }

    /// Reads a 1-based table index and checks it against `count`.
    pub fn next_table(&mut self, what: &str, count: usize) -> Result<TableId> {
        let token = self.next_word(what)?;
        let index: i64 = token
            .parse()
            .map_err(|_| {
                self.error_at_last(&format!("expected {what} as an integer, found {token:?}"))
            })?;
        match u32::try_from(index) {
            Ok(number) if number >= 1 && (number as usize) <= count => Ok(TableId(number)),
            _ => Err(Error::TableOutOfRange { index, count }),
        }
    }

    fn error(&self, message: &str) -> Error {
        Error::parse(self.position, message)
    }

    fn error_at_last(&self, message: &str) -> Error {
        Error::parse(self.position.saturating_sub(1), message)
    }
}
