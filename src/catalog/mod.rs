mod database;
mod registry;

pub use database::Database;
pub use registry::Catalog;
