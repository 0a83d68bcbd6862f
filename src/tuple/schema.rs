use std::collections::HashMap;
use std::sync::Arc;

use crate::common::{Result, StoreError};

use super::{DataType, Value};

/// Represents a single column in a table schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name
    name: String,

    /// Column data type
    data_type: DataType,

    /// Column position in the schema (0-indexed)
    ordinal: usize,
}

impl Column {
    /// Creates a new column definition.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            ordinal: 0, // Will be set by Schema
        }
    }

    /// Returns the column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the column data type.
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Returns the column's ordinal position in the schema.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Returns true if this is the key column.
    pub fn is_key(&self) -> bool {
        self.ordinal == 0
    }
}

/// The ordered column layout of a table. Column 0 holds the row key.
#[derive(Debug, Clone)]
pub struct Schema {
    /// Ordered list of columns
    columns: Vec<Column>,

    /// Map from column name to column index for fast lookup
    name_to_index: HashMap<String, usize>,
}

impl Schema {
    /// Creates a new schema from a list of columns.
    ///
    /// Fails with `InvalidSchema` if there are no columns, a name is empty, or
    /// two columns share a name.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if columns.is_empty() {
            return Err(StoreError::InvalidSchema(
                "a schema needs at least one column to hold the key".to_string(),
            ));
        }

        let mut columns = columns;
        let mut name_to_index = HashMap::with_capacity(columns.len());

        for (i, col) in columns.iter_mut().enumerate() {
            if col.name.is_empty() {
                return Err(StoreError::InvalidSchema(format!(
                    "column {} has an empty name",
                    i
                )));
            }
            if name_to_index.insert(col.name.clone(), i).is_some() {
                return Err(StoreError::InvalidSchema(format!(
                    "duplicate column name '{}'",
                    col.name
                )));
            }
            col.ordinal = i;
        }

        Ok(Self {
            columns,
            name_to_index,
        })
    }

    /// Builds a schema from `(column_name, type_name)` declarations, such as
    /// `[("id", "integer"), ("name", "string")]`.
    pub fn parse(declarations: &[(&str, &str)]) -> Result<Self> {
        let columns = declarations
            .iter()
            .map(|&(name, type_name)| -> Result<Column> {
                Ok(Column::new(name, type_name.parse()?))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(columns)
    }

    /// Creates a schema builder for fluent construction.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Returns the number of columns in the schema.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns the column at the given index.
    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Returns the column with the given name.
    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.name_to_index
            .get(name)
            .and_then(|&i| self.columns.get(i))
    }

    /// Returns the index of the column with the given name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }

    /// Returns the key column.
    pub fn key_column(&self) -> &Column {
        // Schema::new rejects empty column lists
        &self.columns[0]
    }

    /// Returns an iterator over all columns.
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    /// Checks arity and per-column types of a row against this schema.
    pub fn validate_row(&self, values: &[Value]) -> Result<()> {
        if values.len() != self.columns.len() {
            return Err(StoreError::SchemaMismatch(format!(
                "expected {} values, got {}",
                self.columns.len(),
                values.len()
            )));
        }

        for (col, value) in self.columns.iter().zip(values) {
            if !value.is_compatible(col.data_type) {
                return Err(StoreError::SchemaMismatch(format!(
                    "column '{}' expects {}, got {}",
                    col.name,
                    col.data_type,
                    value.data_type()
                )));
            }
        }

        Ok(())
    }
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.columns == other.columns
    }
}

impl Eq for Schema {}

/// Builder for constructing schemas fluently.
pub struct SchemaBuilder {
    columns: Vec<Column>,
}

impl SchemaBuilder {
    /// Creates a new schema builder.
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// Adds a column.
    pub fn column(mut self, name: impl Into<String>, data_type: DataType) -> Self {
        self.columns.push(Column::new(name, data_type));
        self
    }

    /// Builds the schema.
    pub fn build(self) -> Result<Schema> {
        Schema::new(self.columns)
    }

    /// Builds the schema wrapped in an Arc for shared ownership.
    pub fn build_arc(self) -> Result<Arc<Schema>> {
        self.build().map(Arc::new)
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}
