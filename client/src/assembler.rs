//! Transaction assembler
//!
//! Runs one commit from buffered operations to a submitted transaction:
//!
//! ```text
//! Idle -> ResolvingSecrets -> Encoding -> RequestingSkeleton -> Signing -> Submitting -> Done
//!                                                                                     \-> Failed
//! ```
//!
//! No stage is retried. The immediate path of the session enters the same
//! pipeline at `RequestingSkeleton`.

use std::fmt;

use log::{debug, info, warn};
use serde_json::Value;
use uuid::Uuid;

use ledger_tables_core::utils::{compute_fee, hex_byte_len, string_to_hex};
use ledger_tables_core::{Account, FeeConfig, SecretMap, SqlTransaction, Statement, StatementEncoder, TableOperation};

use crate::error::{ClientError, Result};
use crate::resolver::SecretResolver;
use crate::rpc::{request_skeleton, RpcAccessor, Signer, SubmitResult, Submitter};

/// Stage of a commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitStage {
    /// Nothing started yet
    Idle,
    /// Looking up table keys
    ResolvingSecrets,
    /// Encrypting and hex-encoding statements
    Encoding,
    /// Waiting for the ledger skeleton
    RequestingSkeleton,
    /// Computing the fee and signing
    Signing,
    /// Handing the blob to the ledger
    Submitting,
    /// Accepted
    Done,
    /// Aborted
    Failed,
}

impl fmt::Display for CommitStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommitStage::Idle => "idle",
            CommitStage::ResolvingSecrets => "resolving-secrets",
            CommitStage::Encoding => "encoding",
            CommitStage::RequestingSkeleton => "requesting-skeleton",
            CommitStage::Signing => "signing",
            CommitStage::Submitting => "submitting",
            CommitStage::Done => "done",
            CommitStage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Flags of a multi-statement transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitOptions {
    /// Strict mode flag
    pub strict_mode: bool,

    /// Ledger-side verification flag
    pub need_verify: bool,
}

/// Encode every operation in order, using the resolved secrets
pub fn encode_statements(
    account: &Account,
    operations: &[TableOperation],
    secrets: &SecretMap,
) -> Result<Vec<Statement>> {
    let encoder = StatementEncoder::new(account);

    operations
        .iter()
        .map(|op| {
            let secret = secrets.resolve(&op.table_key(&account.address));
            encoder.encode(op, secret).map_err(ClientError::from)
        })
        .collect()
}

/// Turn a skeleton into the form that gets signed.
///
/// The statement list becomes one hex blob and the fee is recomputed from
/// the skeleton's baseline and the size of the hex payloads.
pub fn prepare_for_signing(tx_json: &mut Value, fee: &FeeConfig) -> Result<u64> {
    let object = tx_json
        .as_object_mut()
        .ok_or_else(|| ClientError::SkeletonRequest("skeleton is not an object".to_string()))?;

    let encoded = match object.get("Statements") {
        Some(statements) if !statements.is_string() => Some(string_to_hex(&serde_json::to_string(statements)?)),
        _ => None,
    };
    if let Some(encoded) = encoded {
        object.insert("Statements".to_string(), Value::String(encoded));
    }

    let base = match object.get("Fee") {
        None | Some(Value::Null) => fee.default_fee_drops,
        Some(drops) => match drops {
            Value::String(s) => s.trim().parse::<u64>().ok(),
            Value::Number(n) => n.as_u64(),
            _ => None,
        }
        .ok_or_else(|| ClientError::SkeletonRequest(format!("skeleton fee is malformed: {}", drops)))?,
    };

    let payload_bytes: u64 = ["Raw", "Statements"]
        .iter()
        .filter_map(|field| object.get(*field).and_then(Value::as_str))
        .map(hex_byte_len)
        .sum();

    let total = compute_fee(base, payload_bytes, fee.drops_per_kilobyte);
    object.insert("Fee".to_string(), Value::String(total.to_string()));
    Ok(total)
}

/// Runs the commit pipeline for one account
pub struct Assembler<'a> {
    account: &'a Account,
    rpc: &'a dyn RpcAccessor,
    signer: &'a dyn Signer,
    submitter: &'a dyn Submitter,
    fee: &'a FeeConfig,
    commit_id: Uuid,
}

impl<'a> Assembler<'a> {
    /// Create an assembler; every instance gets its own commit id
    pub fn new(
        account: &'a Account,
        rpc: &'a dyn RpcAccessor,
        signer: &'a dyn Signer,
        submitter: &'a dyn Submitter,
        fee: &'a FeeConfig,
    ) -> Self {
        Self {
            account,
            rpc,
            signer,
            submitter,
            fee,
            commit_id: Uuid::new_v4(),
        }
    }

    /// Id that tags every log record of this commit
    pub fn commit_id(&self) -> Uuid {
        self.commit_id
    }

    fn enter(&self, stage: CommitStage) {
        debug!("[commit {}] {}", self.commit_id, stage);
    }

    /// Commit buffered operations as one multi-statement transaction
    pub async fn commit(&self, operations: Vec<TableOperation>, options: CommitOptions) -> Result<SubmitResult> {
        info!(
            "[commit {}] committing {} statement(s) for {}",
            self.commit_id,
            operations.len(),
            self.account.address
        );

        let result = self.run(operations, options).await;
        self.finish(&result);
        result
    }

    /// Sign and submit an already encoded transaction
    pub async fn submit(&self, tx_json: Value) -> Result<SubmitResult> {
        let result = self.sign_and_submit(tx_json).await;
        self.finish(&result);
        result
    }

    async fn run(&self, operations: Vec<TableOperation>, options: CommitOptions) -> Result<SubmitResult> {
        self.enter(CommitStage::ResolvingSecrets);
        let secrets = SecretResolver::new(self.account, self.rpc)
            .resolve(&operations)
            .await?;

        self.enter(CommitStage::Encoding);
        let statements = encode_statements(self.account, &operations, &secrets)?;
        drop(secrets);

        let tx = SqlTransaction::new(
            &self.account.address,
            statements,
            options.strict_mode,
            options.need_verify,
        );

        self.sign_and_submit(tx.to_value()?).await
    }

    async fn sign_and_submit(&self, tx_json: Value) -> Result<SubmitResult> {
        self.enter(CommitStage::RequestingSkeleton);
        let mut skeleton = request_skeleton(self.rpc, tx_json).await?;

        self.enter(CommitStage::Signing);
        let fee = prepare_for_signing(&mut skeleton, self.fee)?;
        debug!("[commit {}] fee {} drops", self.commit_id, fee);

        let signed = self
            .signer
            .sign(&skeleton, self.account.secret())
            .map_err(|e| match e {
                ClientError::Signing(_) => e,
                other => ClientError::Signing(other.to_string()),
            })?;

        self.enter(CommitStage::Submitting);
        let result = self
            .submitter
            .submit(&signed.signed_transaction)
            .await
            .map_err(|e| ClientError::Submit(e.to_string()))?;

        if !result.is_success() {
            return Err(ClientError::Submit(format!(
                "{}: {}",
                result.result_code, result.result_message
            )));
        }

        Ok(SubmitResult {
            tx_hash: result.tx_hash.clone().or(Some(signed.hash)),
            ..result
        })
    }

    fn finish(&self, result: &Result<SubmitResult>) {
        match result {
            Ok(submitted) => {
                self.enter(CommitStage::Done);
                info!(
                    "[commit {}] accepted, hash {}",
                    self.commit_id,
                    submitted.tx_hash.as_deref().unwrap_or("-")
                );
            }
            Err(e) => {
                self.enter(CommitStage::Failed);
                warn!("[commit {}] failed: {}", self.commit_id, e);
            }
        }
    }
}
