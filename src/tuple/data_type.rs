use std::fmt;
use std::str::FromStr;

use crate::common::StoreError;

/// Represents the column types a table can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// 64-bit signed integer
    Integer,

    /// UTF-8 string of any length
    String,
}

impl DataType {
    /// Returns the canonical lowercase name used in textual declarations.
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Integer => "integer",
            DataType::String => "string",
        }
    }
}

impl FromStr for DataType {
    type Err = StoreError;

    /// Parses a declared column type. Anything outside the supported set is an
    /// `InvalidSchema` error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "integer" | "int" => Ok(DataType::Integer),
            "string" | "str" | "text" => Ok(DataType::String),
            other => Err(StoreError::InvalidSchema(format!(
                "unsupported column type '{}', expected integer or string",
                other
            ))),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Integer => write!(f, "INTEGER"),
            DataType::String => write!(f, "STRING"),
        }
    }
}
