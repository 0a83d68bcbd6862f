use std::sync::Arc;

use crate::common::Result;

use super::{Schema, Value};

/// Builder for assembling a row's values in schema order.
///
/// The values are checked against the schema on [`RowBuilder::build`], so a
/// built row is always accepted by a table with the same schema.
pub struct RowBuilder {
    schema: Arc<Schema>,
    values: Vec<Value>,
}

impl RowBuilder {
    /// Creates a new row builder for the given schema.
    pub fn new(schema: Arc<Schema>) -> Self {
        let capacity = schema.column_count();
        Self {
            schema,
            values: Vec::with_capacity(capacity),
        }
    }

    /// Adds the next value.
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.values.push(value.into());
        self
    }

    /// Validates and returns the values.
    pub fn build(self) -> Result<Vec<Value>> {
        self.schema.validate_row(&self.values)?;
        Ok(self.values)
    }
}
