use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, warn};
use parking_lot::RwLock;

use crate::common::{Result, StoreConfig, StoreError};
use crate::table::Table;
use crate::tuple::Schema;

/// A named collection of tables.
pub struct Database {
    name: String,
    config: Arc<StoreConfig>,
    /// Table name -> table
    tables: RwLock<HashMap<String, Arc<Table>>>,
}

impl Database {
    pub fn new(name: impl Into<String>, config: Arc<StoreConfig>) -> Self {
        Self {
            name: name.into(),
            config,
            tables: RwLock::new(HashMap::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Creates a table and returns a handle to it.
    ///
    /// Fails with `InvalidName` for an unusable name and `TableExists` if the
    /// name is taken.
    pub fn create_table(&self, name: &str, schema: Schema) -> Result<Arc<Table>> {
        self.config.validate_name(name)?;

        let mut tables = self.tables.write();
        if tables.contains_key(name) {
            warn!("database {}: table {} already exists", self.name, name);
            return Err(StoreError::TableExists(name.to_string()));
        }

        let table = Arc::new(Table::new(
            name,
            Arc::new(schema),
            self.config.initial_table_capacity,
        ));
        tables.insert(name.to_string(), Arc::clone(&table));

        debug!("database {}: created table {}", self.name, name);
        Ok(table)
    }

    /// Creates a table from `(column_name, type_name)` declarations.
    ///
    /// Fails with `InvalidSchema` if a type name is not `integer` or `string`.
    pub fn create_table_from_declarations(
        &self,
        name: &str,
        declarations: &[(&str, &str)],
    ) -> Result<Arc<Table>> {
        let schema = Schema::parse(declarations)?;
        self.create_table(name, schema)
    }

    /// Removes a table together with all of its rows.
    pub fn delete_table(&self, name: &str) -> Result<()> {
        match self.tables.write().remove(name) {
            Some(_) => {
                debug!("database {}: deleted table {}", self.name, name);
                Ok(())
            }
            None => {
                warn!("database {}: cannot delete missing table {}", self.name, name);
                Err(StoreError::TableNotFound(name.to_string()))
            }
        }
    }

    pub fn get_table(&self, name: &str) -> Result<Arc<Table>> {
        self.tables
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::TableNotFound(name.to_string()))
    }

    /// Returns the table names in sorted order.
    pub fn table_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn table_count(&self) -> usize {
        self.tables.read().len()
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("name", &self.name)
            .field("tables", &self.table_names())
            .finish()
    }
}
