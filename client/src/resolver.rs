//! Secret resolution for a batch
//!
//! Decides, for every table a batch touches, which key protects it. Tables
//! created inside the batch get their key locally. Every other table whose
//! operation needs a key is looked up on the ledger, once per table, with
//! all lookups in flight at the same time.

use std::collections::HashSet;

use futures::future::try_join_all;
use log::debug;

use ledger_tables_core::{generate_token, Account, OpType, ResolvedSecret, SecretMap, TableKey, TableOperation};

use crate::error::{ClientError, Result};
use crate::rpc::{fetch_user_token, RpcAccessor};

/// Resolves the secrets of one batch
pub struct SecretResolver<'a> {
    account: &'a Account,
    rpc: &'a dyn RpcAccessor,
}

impl<'a> SecretResolver<'a> {
    /// Create a resolver acting as `account`
    pub fn new(account: &'a Account, rpc: &'a dyn RpcAccessor) -> Self {
        Self { account, rpc }
    }

    /// Keys that must be fetched from the ledger, in first-appearance order
    pub fn pending_lookups(&self, operations: &[TableOperation], resolved: &SecretMap) -> Vec<TableKey> {
        let mut seen = HashSet::new();

        operations
            .iter()
            .filter(|op| op.op_type() != OpType::Create && op.op_type().requires_secret_resolution())
            .map(|op| op.table_key(&self.account.address))
            .filter(|key| !resolved.contains(key))
            .filter(|key| seen.insert(key.clone()))
            .collect()
    }

    /// Build the secret map for `operations`
    pub async fn resolve(&self, operations: &[TableOperation]) -> Result<SecretMap> {
        let mut secrets = SecretMap::new();

        for op in operations.iter().filter(|op| op.op_type() == OpType::Create) {
            let secret = if op.confidential() {
                ResolvedSecret::Token(generate_token(self.account.secret())?)
            } else {
                ResolvedSecret::Plain
            };
            secrets.insert(op.table_key(&self.account.address), secret);
        }

        let lookups = self.pending_lookups(operations, &secrets);
        if lookups.is_empty() {
            return Ok(secrets);
        }

        debug!("Fetching {} table token(s) concurrently", lookups.len());

        let tokens = try_join_all(lookups.iter().map(|key| async move {
            fetch_user_token(self.rpc, &key.owner, &self.account.address, &key.table_name)
                .await
                .map_err(|e| ClientError::TokenFetch(format!("{}: {}", key, e)))
        }))
        .await?;

        for (key, token) in lookups.into_iter().zip(tokens) {
            secrets.insert(key, ResolvedSecret::from_fetched(token));
        }

        Ok(secrets)
    }
}
