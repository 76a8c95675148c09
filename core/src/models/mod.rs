//! Data models for Ledger Tables
//!
//! This module provides the table operation model, the per-commit secret
//! map, the wire payloads submitted to the ledger, and the encoder that turns
//! one into the other.

mod encoding;
mod op;
mod operation;
mod payload;
mod secret;

pub use encoding::StatementEncoder;
pub use op::OpType;
pub use operation::{CreateOptions, Permissions, TableOperation};
pub use payload::{
    SqlTransaction, Statement, TableEntry, TableListSet, TableRef, SQL_TRANSACTION, TABLE_LIST_SET,
};
pub use secret::{ResolvedSecret, SecretMap, TableKey};
