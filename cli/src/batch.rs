//! Batch files for `ledger-tables apply`
//!
//! A batch file is a JSON array of operations, committed in file order:
//!
//! ```json
//! [
//!   {"op": "create", "table": "orders", "raw": [{"field": "id", "type": "int", "PK": 1}], "confidential": true},
//!   {"op": "grant", "table": "orders", "user": "z...", "public_key": "...", "permissions": {"select": true}},
//!   {"op": "rename", "table": "old", "new_name": "new"},
//!   {"op": "drop", "table": "shared", "owner": "z..."}
//! ]
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use ledger_tables_client::{Session, Staged};
use ledger_tables_core::{CreateOptions, Permissions};

/// One operation of a batch file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum BatchEntry {
    /// Create a table
    Create {
        table: String,
        raw: Value,
        #[serde(default)]
        confidential: bool,
        #[serde(default)]
        operation_rule: Option<Value>,
    },

    /// Recreate a table
    Recreate {
        table: String,
        #[serde(default)]
        owner: Option<String>,
    },

    /// Drop a table
    Drop {
        table: String,
        #[serde(default)]
        owner: Option<String>,
    },

    /// Rename a table
    Rename {
        table: String,
        new_name: String,
        #[serde(default)]
        owner: Option<String>,
    },

    /// Grant permissions on a table
    Grant {
        table: String,
        user: String,
        public_key: String,
        permissions: Permissions,
        #[serde(default)]
        owner: Option<String>,
    },
}

impl BatchEntry {
    /// Owner of the referenced table, if not the acting account
    pub fn owner(&self) -> Option<&str> {
        match self {
            BatchEntry::Create { .. } => None,
            BatchEntry::Recreate { owner, .. }
            | BatchEntry::Drop { owner, .. }
            | BatchEntry::Rename { owner, .. }
            | BatchEntry::Grant { owner, .. } => owner.as_deref(),
        }
    }

    /// Stage this entry on a session
    pub async fn stage(self, session: &Session) -> ledger_tables_client::Result<Staged> {
        session.use_owner(self.owner().map(str::to_string)).await;

        match self {
            BatchEntry::Create { table, raw, confidential, operation_rule } => {
                session
                    .create_table(&table, raw, CreateOptions { confidential, operation_rule })
                    .await
            }
            BatchEntry::Recreate { table, .. } => session.recreate_table(&table).await,
            BatchEntry::Drop { table, .. } => session.drop_table(&table).await,
            BatchEntry::Rename { table, new_name, .. } => session.rename_table(&table, &new_name).await,
            BatchEntry::Grant { table, user, public_key, permissions, .. } => {
                session.grant(&table, &user, &permissions, &public_key).await
            }
        }
    }
}

/// Parse a batch file's contents
pub fn parse(contents: &str) -> Result<Vec<BatchEntry>> {
    serde_json::from_str(contents).context("batch file is not a JSON array of operations")
}

/// Read and parse a batch file
pub fn read(path: &Path) -> Result<Vec<BatchEntry>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read batch file {}", path.display()))?;
    parse(&contents)
}
