use parking_lot::RwLock;

use crate::common::{now_micros, Result, StoreError, Timestamp};
use crate::tuple::Value;

/// A point-in-time copy of a row's values and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSnapshot {
    pub values: Vec<Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug)]
struct RowState {
    values: Vec<Value>,
    updated_at: Timestamp,
}

/// A single versioned record.
///
/// Values and `updated_at` sit behind one lock, so a reader sees either the
/// state before an update or the state after it, never a mix.
#[derive(Debug)]
pub struct Row {
    /// Insertion sequence number within the owning table
    seq: u64,
    created_at: Timestamp,
    state: RwLock<RowState>,
}

impl Row {
    pub(crate) fn new(seq: u64, values: Vec<Value>) -> Self {
        let created_at = now_micros();
        Self {
            seq,
            created_at,
            state: RwLock::new(RowState {
                values,
                updated_at: created_at,
            }),
        }
    }

    pub(crate) fn seq(&self) -> u64 {
        self.seq
    }

    /// Replaces the values and advances `updated_at`.
    ///
    /// Returns the new `updated_at`. Fails with `SchemaMismatch` if the arity
    /// differs from the current values.
    pub fn update(&self, new_values: Vec<Value>) -> Result<Timestamp> {
        let mut state = self.state.write();

        if new_values.len() != state.values.len() {
            return Err(StoreError::SchemaMismatch(format!(
                "expected {} values, got {}",
                state.values.len(),
                new_values.len()
            )));
        }

        // Strictly increasing even if the clock has not moved
        let updated_at = now_micros().max(state.updated_at + 1);
        state.values = new_values;
        state.updated_at = updated_at;
        Ok(updated_at)
    }

    /// Returns a copy of the current values.
    pub fn get_values(&self) -> Vec<Value> {
        self.state.read().values.clone()
    }

    pub fn snapshot(&self) -> RowSnapshot {
        let state = self.state.read();
        RowSnapshot {
            values: state.values.clone(),
            created_at: self.created_at,
            updated_at: state.updated_at,
        }
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.state.read().updated_at
    }

    /// Runs `f` while holding this row's write lock.
    #[cfg(test)]
    pub(crate) fn with_write_locked<R>(&self, f: impl FnOnce() -> R) -> R {
        let _state = self.state.write();
        f()
    }
}
