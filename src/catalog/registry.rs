use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, info, warn};
use parking_lot::RwLock;

use crate::common::{Result, StoreConfig, StoreError};

use super::Database;

/// Registry of databases by name, and the entry point to the store.
///
/// A catalog is an ordinary value: construct one at startup and share it
/// (typically as `Arc<Catalog>`) with everything that needs the store. Tests
/// can create as many isolated catalogs as they like.
///
/// The name map sits behind a single lock. A concurrent `get_db` sees a
/// database either fully registered or fully removed.
pub struct Catalog {
    config: Arc<StoreConfig>,
    /// Database name -> database
    databases: RwLock<HashMap<String, Arc<Database>>>,
}

impl Catalog {
    /// Creates an empty catalog with the default configuration.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    pub fn with_config(config: StoreConfig) -> Self {
        info!("catalog created with {:?}", config);
        Self {
            config: Arc::new(config),
            databases: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Registers a new, empty database and returns a handle to it.
    pub fn create_db(&self, name: &str) -> Result<Arc<Database>> {
        self.config.validate_name(name)?;

        let mut databases = self.databases.write();
        if databases.contains_key(name) {
            warn!("database {} already exists", name);
            return Err(StoreError::DatabaseExists(name.to_string()));
        }

        let db = Arc::new(Database::new(name, Arc::clone(&self.config)));
        databases.insert(name.to_string(), Arc::clone(&db));

        debug!("created database {}", name);
        Ok(db)
    }

    /// Removes a database and every table in it.
    ///
    /// Handles obtained earlier stay usable but are detached from the catalog.
    pub fn delete_db(&self, name: &str) -> Result<()> {
        match self.databases.write().remove(name) {
            Some(_) => {
                debug!("deleted database {}", name);
                Ok(())
            }
            None => {
                warn!("cannot delete missing database {}", name);
                Err(StoreError::DatabaseNotFound(name.to_string()))
            }
        }
    }

    pub fn get_db(&self, name: &str) -> Result<Arc<Database>> {
        self.databases
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::DatabaseNotFound(name.to_string()))
    }

    /// Returns the database names in sorted order.
    pub fn database_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.databases.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.databases.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
