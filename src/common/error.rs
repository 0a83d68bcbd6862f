use thiserror::Error;

use crate::tuple::Value;

/// Store error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Duplicate key: {0}")]
    DuplicateKey(Value),

    #[error("Key {0} not found")]
    KeyNotFound(Value),

    #[error("Table {0} not found")]
    TableNotFound(String),

    #[error("Database {0} not found")]
    DatabaseNotFound(String),

    #[error("Table {0} already exists")]
    TableExists(String),

    #[error("Database {0} already exists")]
    DatabaseExists(String),

    #[error("Key column is immutable: cannot change {old} to {new}")]
    ImmutableKey { old: Value, new: Value },

    #[error("Table {0} has no free row slots")]
    TableFull(String),

    #[error("Invalid name: {0}")]
    InvalidName(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
