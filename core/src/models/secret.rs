//! Per-commit secret resolution results

use std::collections::HashMap;
use std::fmt;

use crate::crypto::Token;

/// Identity of a table: owner address plus plain table name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableKey {
    /// Owner address
    pub owner: String,

    /// Plain table name
    pub table_name: String,
}

impl TableKey {
    /// Create a table key
    pub fn new(owner: &str, table_name: &str) -> Self {
        Self {
            owner: owner.to_string(),
            table_name: table_name.to_string(),
        }
    }
}

impl fmt::Display for TableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.table_name)
    }
}

/// How a table's payloads are protected in this commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedSecret {
    /// No encryption in effect
    Plain,

    /// Payloads are encrypted under the key wrapped in this token
    Token(Token),
}

impl ResolvedSecret {
    /// Interpret a token fetched from the ledger; empty means unencrypted
    pub fn from_fetched(token: Token) -> Self {
        if token.is_empty() {
            ResolvedSecret::Plain
        } else {
            ResolvedSecret::Token(token)
        }
    }
}

static PLAIN: ResolvedSecret = ResolvedSecret::Plain;

/// Resolved secrets for one commit.
///
/// Built once by the resolver and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct SecretMap {
    entries: HashMap<TableKey, ResolvedSecret>,
}

impl SecretMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the secret for a table, replacing any earlier entry
    pub fn insert(&mut self, key: TableKey, secret: ResolvedSecret) {
        self.entries.insert(key, secret);
    }

    /// Whether a table has been resolved
    pub fn contains(&self, key: &TableKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Secret for a table, if resolved
    pub fn get(&self, key: &TableKey) -> Option<&ResolvedSecret> {
        self.entries.get(key)
    }

    /// Secret for a table; unresolved tables are unencrypted
    pub fn resolve(&self, key: &TableKey) -> &ResolvedSecret {
        self.entries.get(key).unwrap_or(&PLAIN)
    }

    /// Number of resolved tables
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been resolved
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
