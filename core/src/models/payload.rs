//! Wire payloads
//!
//! Field names follow the ledger's PascalCase JSON. Table names and raw
//! payloads are always hex by the time they reach these types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::op::OpType;
use crate::error::Result;
use crate::utils::string_to_hex;

/// Transaction type of a single table operation
pub const TABLE_LIST_SET: &str = "TableListSet";

/// Transaction type of a multi-statement transaction
pub const SQL_TRANSACTION: &str = "SQLTransaction";

/// Table reference inside a table entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRef {
    /// Hex table name
    #[serde(rename = "TableName")]
    pub table_name: String,

    /// Hex new table name (rename only)
    #[serde(rename = "TableNewName", default, skip_serializing_if = "Option::is_none")]
    pub table_new_name: Option<String>,
}

/// `{"Table": {"TableName": ...}}` entry of a `Tables` array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableEntry {
    /// Referenced table
    #[serde(rename = "Table")]
    pub table: TableRef,
}

impl TableEntry {
    /// Build an entry from plain names, hex-encoding them
    pub fn encoded(table_name: &str, table_new_name: Option<&str>) -> Self {
        Self {
            table: TableRef {
                table_name: string_to_hex(table_name),
                table_new_name: table_new_name.map(string_to_hex),
            },
        }
    }
}

/// One encoded table operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Statement {
    /// Operation code
    pub op_type: OpType,

    /// Referenced tables
    pub tables: Vec<TableEntry>,

    /// Hex payload: ciphertext, or plaintext JSON when unencrypted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,

    /// Hex operation rule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_rule: Option<String>,

    /// Wrapped table key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Grantee address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// Single table operation transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TableListSet {
    /// Always [`TABLE_LIST_SET`]
    pub transaction_type: String,

    /// Acting account
    pub account: String,

    /// Whether the created table is encrypted (create only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidential: Option<bool>,

    /// The encoded operation
    #[serde(flatten)]
    pub statement: Statement,
}

impl TableListSet {
    /// Wrap an encoded statement
    pub fn new(account: &str, statement: Statement) -> Self {
        Self {
            transaction_type: TABLE_LIST_SET.to_string(),
            account: account.to_string(),
            confidential: None,
            statement,
        }
    }

    /// Record whether a created table is encrypted
    pub fn with_confidential(mut self, confidential: bool) -> Self {
        self.confidential = Some(confidential);
        self
    }

    /// JSON form sent to the ledger
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Multi-statement transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SqlTransaction {
    /// Always [`SQL_TRANSACTION`]
    pub transaction_type: String,

    /// Acting account
    pub account: String,

    /// Statements in batch order
    pub statements: Vec<Statement>,

    /// Strict mode flag
    pub strict_mode: bool,

    /// 1 when the ledger should verify the statements, 0 otherwise
    pub need_verify: u8,
}

impl SqlTransaction {
    /// Create a transaction around encoded statements
    pub fn new(account: &str, statements: Vec<Statement>, strict_mode: bool, need_verify: bool) -> Self {
        Self {
            transaction_type: SQL_TRANSACTION.to_string(),
            account: account.to_string(),
            statements,
            strict_mode,
            need_verify: u8::from(need_verify),
        }
    }

    /// JSON form sent to the ledger
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}
