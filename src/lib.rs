//! Memstore - A concurrent, indexed in-memory table store in Rust
//!
//! This crate keeps named databases, each holding named tables of typed rows.
//! Every row is identified by the value in its first column, and each table
//! indexes that key for direct lookup, update and delete.
//!
//! # Architecture
//!
//! Ownership runs strictly top-down, and so do lock acquisitions:
//!
//! - **Catalog** (`catalog`): The database registry and entry point
//!   - `Catalog`: Creates, deletes and looks up databases by name
//!   - `Database`: Creates, deletes and looks up tables by name
//!
//! - **Tables** (`table`): Row storage and indexing
//!   - `Table`: Schema-checked rows with a unique-key index
//!   - `Row`: A versioned record with its own lock
//!   - `SlotMap`: Generational arena giving rows stable identifiers
//!
//! - **Tuples** (`tuple`): Typed values and schemas
//!   - `DataType`, `Value`: The supported column types and their values
//!   - `Schema`, `Column`: Table layouts, with column 0 as the key
//!   - `RowBuilder`: Assembles and validates row values
//!
//! Every fallible operation returns [`Result`] with a [`StoreError`].
//!
//! # Example
//!
//! ```rust
//! use memstore::catalog::Catalog;
//! use memstore::tuple::Value;
//!
//! let catalog = Catalog::new();
//! let db = catalog.create_db("d1").unwrap();
//! let table = db
//!     .create_table_from_declarations("t1", &[("id", "integer"), ("name", "string")])
//!     .unwrap();
//!
//! table.insert_row(vec![1.into(), "a".into()]).unwrap();
//! table.update_row(&1.into(), vec![1.into(), "c".into()]).unwrap();
//!
//! assert_eq!(table.get_row(&1.into()).unwrap(), vec![Value::Integer(1), Value::from("c")]);
//! ```

pub mod catalog;
pub mod common;
pub mod table;
pub mod tuple;

// Re-export commonly used types at the crate root
pub use catalog::{Catalog, Database};
pub use common::{Result, StoreConfig, StoreError};
pub use table::Table;
pub use tuple::Value;
