use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use log::{debug, trace, warn};
use parking_lot::RwLock;

use crate::common::{Result, SlotId, StoreError, Timestamp};
use crate::tuple::{Schema, Value};

use super::{Row, RowSnapshot, SlotMap};

/// Structural state guarded by the table lock
struct TableInner {
    /// Row arena; deleting a row never moves another
    rows: SlotMap<Row>,
    /// Key column value -> row slot
    index: HashMap<Value, SlotId>,
    /// Insertion sequence -> row slot, for ordered scans
    order: BTreeMap<u64, SlotId>,
    /// Sequence number for the next inserted row
    next_seq: u64,
}

/// A named, schema-typed collection of rows with a unique-key index on
/// column 0.
///
/// Lookups and row updates hold the table lock shared, so updates to
/// different rows run in parallel and only serialize on the row's own lock.
/// Inserts and deletes hold it exclusively.
pub struct Table {
    name: String,
    schema: Arc<Schema>,
    inner: RwLock<TableInner>,
}

impl Table {
    /// Creates an empty table with room for `capacity` rows.
    pub fn new(name: impl Into<String>, schema: Arc<Schema>, capacity: usize) -> Self {
        Self {
            name: name.into(),
            schema,
            inner: RwLock::new(TableInner {
                rows: SlotMap::with_capacity(capacity),
                index: HashMap::with_capacity(capacity),
                order: BTreeMap::new(),
                next_seq: 0,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Returns the number of live rows.
    pub fn len(&self) -> usize {
        self.inner.read().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.inner.read().index.contains_key(key)
    }

    /// Inserts a row and returns its key.
    ///
    /// Fails with `SchemaMismatch` if the values do not fit the schema,
    /// `DuplicateKey` if a row with the same key exists, or `TableFull` if no
    /// row slot is left. A failed insert leaves the table untouched.
    pub fn insert_row(&self, values: Vec<Value>) -> Result<Value> {
        self.schema.validate_row(&values)?;
        let key = values[0].clone();

        let mut inner = self.inner.write();
        if inner.index.contains_key(&key) {
            warn!("table {}: rejected duplicate key {}", self.name, key);
            return Err(StoreError::DuplicateKey(key));
        }

        let seq = inner.next_seq;

        let Some(slot) = inner.rows.insert(Row::new(seq, values)) else {
            warn!("table {}: no free row slots", self.name);
            return Err(StoreError::TableFull(self.name.clone()));
        };
        inner.next_seq += 1;
        inner.index.insert(key.clone(), slot);
        inner.order.insert(seq, slot);

        debug!("table {}: inserted key {} at {}", self.name, key, slot);
        Ok(key)
    }

    /// Replaces the values of the row with the given key and returns the new
    /// `updated_at`.
    ///
    /// The key column cannot change: `new_values[0]` must equal `key`,
    /// otherwise the update fails with `ImmutableKey`.
    pub fn update_row(&self, key: &Value, new_values: Vec<Value>) -> Result<Timestamp> {
        let inner = self.inner.read();
        let row = Self::lookup(&inner, key)?;

        self.schema.validate_row(&new_values)?;
        if new_values[0] != *key {
            return Err(StoreError::ImmutableKey {
                old: key.clone(),
                new: new_values[0].clone(),
            });
        }

        let updated_at = row.update(new_values)?;
        trace!("table {}: updated key {}", self.name, key);
        Ok(updated_at)
    }

    /// Returns a copy of the values of the row with the given key.
    pub fn get_row(&self, key: &Value) -> Result<Vec<Value>> {
        let inner = self.inner.read();
        Self::lookup(&inner, key).map(Row::get_values)
    }

    /// Returns the values and timestamps of the row with the given key.
    pub fn get_row_snapshot(&self, key: &Value) -> Result<RowSnapshot> {
        let inner = self.inner.read();
        Self::lookup(&inner, key).map(Row::snapshot)
    }

    /// Removes the row with the given key and returns its last values.
    pub fn delete_row(&self, key: &Value) -> Result<Vec<Value>> {
        let mut inner = self.inner.write();

        let slot = inner
            .index
            .remove(key)
            .ok_or_else(|| StoreError::KeyNotFound(key.clone()))?;

        // The index only ever points at live slots
        let row = inner.rows.remove(slot);
        debug_assert!(row.is_some(), "index entry for {} points at vacant {}", key, slot);
        let row = row.ok_or_else(|| StoreError::KeyNotFound(key.clone()))?;
        inner.order.remove(&row.seq());

        debug!("table {}: deleted key {} from {}", self.name, key, slot);
        Ok(row.get_values())
    }

    /// Returns the values of every live row in insertion order.
    pub fn get_all_rows(&self) -> Vec<Vec<Value>> {
        let inner = self.inner.read();
        inner
            .order
            .values()
            .filter_map(|&slot| inner.rows.get(slot))
            .map(Row::get_values)
            .collect()
    }

    fn lookup<'a>(inner: &'a TableInner, key: &Value) -> Result<&'a Row> {
        inner
            .index
            .get(key)
            .and_then(|&slot| inner.rows.get(slot))
            .ok_or_else(|| StoreError::KeyNotFound(key.clone()))
    }
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("name", &self.name)
            .field("columns", &self.schema.column_count())
            .field("rows", &self.len())
            .finish()
    }
}
