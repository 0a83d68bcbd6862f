mod data_type;
mod row_builder;
mod schema;
mod value;

pub use data_type::DataType;
pub use row_builder::RowBuilder;
pub use schema::{Column, Schema, SchemaBuilder};
pub use value::Value;
