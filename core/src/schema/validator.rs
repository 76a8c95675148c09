//! Schema validation
//!
//! Validates table names and raw table definitions.

use std::collections::HashSet;

use serde_json::Value;
use thiserror::Error;

/// Column types accepted in a table definition
pub const SUPPORTED_COLUMN_TYPES: &[&str] = &[
    "int", "float", "double", "decimal", "varchar", "char", "text", "longtext", "blob", "datetime",
    "date",
];

/// Column flags that must be 0/1 or booleans
const FLAG_KEYS: &[&str] = &["PK", "NN", "UQ", "AI", "index"];

/// Schema validation error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Table name is empty
    #[error("Table name can not be empty")]
    EmptyTableName,

    /// Raw definition is not an array
    #[error("Table definition must be a JSON array of columns")]
    NotAnArray,

    /// Raw definition has no columns
    #[error("Table definition has no columns")]
    NoColumns,

    /// A column descriptor is not an object
    #[error("Column {0} must be a JSON object")]
    ColumnNotObject(usize),

    /// A column has no usable `field` name
    #[error("Column {0} is missing a field name")]
    MissingFieldName(usize),

    /// A column type is missing or unsupported
    #[error("Invalid column type for column {0}: {1}")]
    InvalidColumnType(String, String),

    /// Duplicate column name
    #[error("Column {0} is defined more than once")]
    DuplicateColumn(String),

    /// A flag has a value other than 0/1/true/false
    #[error("Flag {1} of column {0} must be 0, 1 or a boolean")]
    InvalidFlag(String, String),

    /// Length is not a positive integer
    #[error("Length of column {0} must be a positive integer")]
    InvalidLength(String),
}

/// Schema validation result
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Schema validator
#[derive(Debug, Clone)]
pub struct SchemaValidator;

impl SchemaValidator {
    /// Validate a table name
    pub fn validate_table_name(name: &str) -> SchemaResult<()> {
        if name.trim().is_empty() {
            return Err(SchemaError::EmptyTableName);
        }
        Ok(())
    }

    /// Validate a raw table definition
    pub fn validate_raw(raw: &Value) -> SchemaResult<()> {
        let columns = raw.as_array().ok_or(SchemaError::NotAnArray)?;
        if columns.is_empty() {
            return Err(SchemaError::NoColumns);
        }

        let mut seen = HashSet::new();
        for (index, column) in columns.iter().enumerate() {
            let column = column.as_object().ok_or(SchemaError::ColumnNotObject(index))?;

            let field = column
                .get("field")
                .and_then(Value::as_str)
                .filter(|f| !f.trim().is_empty())
                .ok_or(SchemaError::MissingFieldName(index))?;

            let column_type = column.get("type").and_then(Value::as_str).unwrap_or_default();
            if !SUPPORTED_COLUMN_TYPES.contains(&column_type.to_ascii_lowercase().as_str()) {
                return Err(SchemaError::InvalidColumnType(
                    field.to_string(),
                    column_type.to_string(),
                ));
            }

            for flag in FLAG_KEYS {
                if let Some(value) = column.get(*flag) {
                    let valid = match value {
                        Value::Bool(_) => true,
                        Value::Number(n) => matches!(n.as_u64(), Some(0) | Some(1)),
                        _ => false,
                    };
                    if !valid {
                        return Err(SchemaError::InvalidFlag(field.to_string(), flag.to_string()));
                    }
                }
            }

            if let Some(length) = column.get("length") {
                if !matches!(length.as_u64(), Some(n) if n > 0) {
                    return Err(SchemaError::InvalidLength(field.to_string()));
                }
            }

            if !seen.insert(field) {
                return Err(SchemaError::DuplicateColumn(field.to_string()));
            }
        }

        Ok(())
    }
}
