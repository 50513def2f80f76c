//! Todo-to-tag association reconciliation.

use std::collections::BTreeSet;

use crate::types::DbId;

/// Rows to insert and delete to turn one association set into another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagDelta {
    pub added: Vec<DbId>,
    pub removed: Vec<DbId>,
}

impl TagDelta {
    /// Compute the delta from `current` to `desired`. Both sides are treated
    /// as sets; the output is sorted.
    pub fn between(current: &[DbId], desired: &[DbId]) -> Self {
        let current: BTreeSet<DbId> = current.iter().copied().collect();
        let desired: BTreeSet<DbId> = desired.iter().copied().collect();

        Self {
            added: desired.difference(&current).copied().collect(),
            removed: current.difference(&desired).copied().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Number of association rows this delta writes.
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len()
    }
}
