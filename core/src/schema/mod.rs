//! Table definition validation
//!
//! A table's raw definition is a JSON array of column descriptors. This module
//! checks that shape before an operation is staged, so malformed input never
//! reaches encryption or the network.

mod validator;

pub use validator::{SchemaError, SchemaResult, SchemaValidator, SUPPORTED_COLUMN_TYPES};

use crate::error::CoreError;

impl From<SchemaError> for CoreError {
    fn from(err: SchemaError) -> Self {
        CoreError::Validation(err.to_string())
    }
}
