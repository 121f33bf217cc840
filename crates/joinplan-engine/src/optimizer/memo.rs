//! Memo table for sub-sequence results.
//!
//! A sub-sequence's best plan depends only on the sequence itself, so caching
//! it never changes which candidate wins a tie.

use std::sync::atomic::{AtomicUsize, Ordering};

use hashbrown::HashMap;
use joinplan_common::TableId;
use joinplan_core::JoinResult;
use parking_lot::RwLock;
use smallvec::SmallVec;

type MemoKey = SmallVec<[TableId; 8]>;

/// Memo hit and size counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoStats {
    /// Lookups answered from the memo.
    pub hits: usize,
    /// Lookups that had to be solved.
    pub misses: usize,
    /// Cached sub-sequences.
    pub entries: usize,
}

pub(crate) struct Memo {
    enabled: bool,
    entries: RwLock<HashMap<MemoKey, JoinResult>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl Memo {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            enabled,
            entries: RwLock::new(HashMap::new()),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    pub(crate) fn get(&self, tables: &[TableId]) -> Option<JoinResult> {
        if !self.enabled {
            return None;
        }
        let hit = self.entries.read().get(tables).cloned();
        if hit.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        hit
    }

    pub(crate) fn insert(&self, tables: &[TableId], result: &JoinResult) {
        if self.enabled {
            self.entries
                .write()
                .insert(SmallVec::from_slice(tables), result.clone());
        }
    }

    pub(crate) fn stats(&self) -> MemoStats {
        MemoStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.read().len(),
        }
    }
}
