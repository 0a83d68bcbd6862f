use super::{Result, StoreError};

/// Default maximum length of a database or table name, in bytes
pub const DEFAULT_MAX_NAME_LEN: usize = 64;

/// Default number of row slots reserved when a table is created
pub const DEFAULT_TABLE_CAPACITY: usize = 16;

/// Tunables shared by a catalog and everything it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Longest accepted database or table name
    pub max_name_len: usize,
    /// Row slots reserved up front for each new table
    pub initial_table_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_name_len: DEFAULT_MAX_NAME_LEN,
            initial_table_capacity: DEFAULT_TABLE_CAPACITY,
        }
    }
}

impl StoreConfig {
    pub fn with_max_name_len(mut self, max_name_len: usize) -> Self {
        self.max_name_len = max_name_len;
        self
    }

    pub fn with_initial_table_capacity(mut self, capacity: usize) -> Self {
        self.initial_table_capacity = capacity;
        self
    }

    /// Checks a database or table name against the configured limits.
    pub fn validate_name(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(StoreError::InvalidName("name must not be empty".to_string()));
        }
        if name.len() > self.max_name_len {
            return Err(StoreError::InvalidName(format!(
                "{} exceeds {} bytes",
                name, self.max_name_len
            )));
        }
        Ok(())
    }
}
