//! Ledger collaborators
//!
//! The session never talks to the network or a signing backend directly.
//! It goes through the three traits below, so tests can swap in spies and
//! deployments can swap in their own transport or key storage.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use ledger_tables_core::{AccountSecret, Token};

use crate::error::{ClientError, Result};

/// Command used to look up a user's token for a table
pub const USER_TOKEN_COMMAND: &str = "g_userToken";

/// Command used to expand a payload into a ledger transaction skeleton
pub const PREPARE_COMMAND: &str = "t_prepare";

/// Command used to submit a signed blob
pub const SUBMIT_COMMAND: &str = "submit";

/// Command listing the tables of an account
pub const ACCOUNT_TABLES_COMMAND: &str = "g_accountTables";

/// Command listing the grants on a table
pub const TABLE_AUTH_COMMAND: &str = "table_auth";

/// Result code of an accepted transaction
pub const SUCCESS_CODE: &str = "tesSUCCESS";

/// Request/response access to the ledger
#[async_trait]
pub trait RpcAccessor: Send + Sync {
    /// Send `command` with `params` and return the response body
    async fn request(&self, command: &str, params: Value) -> Result<Value>;
}

#[async_trait]
impl<T: RpcAccessor + ?Sized> RpcAccessor for Arc<T> {
    async fn request(&self, command: &str, params: Value) -> Result<Value> {
        (**self).request(command, params).await
    }
}

/// A signed transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedTransaction {
    /// Blob handed to the submit pathway
    pub signed_transaction: String,

    /// Transaction JSON as signed
    pub tx_json: Value,

    /// Transaction hash
    pub hash: String,
}

/// Transaction signing backend
pub trait Signer: Send + Sync {
    /// Sign `tx_json` with the account secret
    fn sign(&self, tx_json: &Value, secret: &AccountSecret) -> Result<SignedTransaction>;
}

impl<T: Signer + ?Sized> Signer for Arc<T> {
    fn sign(&self, tx_json: &Value, secret: &AccountSecret) -> Result<SignedTransaction> {
        (**self).sign(tx_json, secret)
    }
}

/// Outcome of a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResult {
    /// Engine result code, `tesSUCCESS` on success
    pub result_code: String,

    /// Human-readable result message
    pub result_message: String,

    /// Hash of the submitted transaction
    pub tx_hash: Option<String>,
}

impl SubmitResult {
    /// Whether the ledger accepted the transaction
    pub fn is_success(&self) -> bool {
        self.result_code == SUCCESS_CODE
    }
}

/// Submit pathway for signed blobs
#[async_trait]
pub trait Submitter: Send + Sync {
    /// Submit a signed blob
    async fn submit(&self, signed_blob: &str) -> Result<SubmitResult>;
}

#[async_trait]
impl<T: Submitter + ?Sized> Submitter for Arc<T> {
    async fn submit(&self, signed_blob: &str) -> Result<SubmitResult> {
        (**self).submit(signed_blob).await
    }
}

/// Fetch `user`'s token for `owner`'s table.
///
/// A missing or empty token means the table is not confidential.
pub async fn fetch_user_token(
    rpc: &dyn RpcAccessor,
    owner: &str,
    user: &str,
    table_name: &str,
) -> Result<Token> {
    let response = rpc
        .request(
            USER_TOKEN_COMMAND,
            json!({
                "owner": owner,
                "user": user,
                "tablename": table_name,
            }),
        )
        .await?;

    let token = response.get("token").and_then(Value::as_str).unwrap_or_default();
    Ok(Token::from_hex(token))
}

/// Ask the ledger to expand a payload into a signable transaction
pub async fn request_skeleton(rpc: &dyn RpcAccessor, tx_json: Value) -> Result<Value> {
    let response = rpc
        .request(PREPARE_COMMAND, json!({ "tx_json": tx_json }))
        .await
        .map_err(|e| ClientError::SkeletonRequest(e.to_string()))?;

    match response.get("tx_json") {
        Some(skeleton) if skeleton.is_object() => Ok(skeleton.clone()),
        _ => Err(ClientError::SkeletonRequest(
            "response has no tx_json object".to_string(),
        )),
    }
}

/// List the tables of an account
pub async fn account_tables(rpc: &dyn RpcAccessor, address: &str, detail: bool) -> Result<Value> {
    rpc.request(ACCOUNT_TABLES_COMMAND, json!({ "account": address, "detail": detail }))
        .await
}

/// List the grants on a table, optionally restricted to `accounts`
pub async fn table_auth(
    rpc: &dyn RpcAccessor,
    owner: &str,
    table_name: &str,
    accounts: &[String],
) -> Result<Value> {
    let mut params = json!({ "owner": owner, "tablename": table_name });
    if !accounts.is_empty() {
        params["accounts"] = json!(accounts);
    }
    rpc.request(TABLE_AUTH_COMMAND, params).await
}

/// [`Submitter`] that submits through the ledger's `submit` command
pub struct RpcSubmitter<R> {
    rpc: R,
}

impl<R: RpcAccessor> RpcSubmitter<R> {
    /// Create a submitter on top of an RPC accessor
    pub fn new(rpc: R) -> Self {
        Self { rpc }
    }
}

#[async_trait]
impl<R: RpcAccessor> Submitter for RpcSubmitter<R> {
    async fn submit(&self, signed_blob: &str) -> Result<SubmitResult> {
        let response = self
            .rpc
            .request(SUBMIT_COMMAND, json!({ "tx_blob": signed_blob }))
            .await?;

        let field = |name: &str| response.get(name).and_then(Value::as_str).map(str::to_string);

        let result_code = field("engine_result")
            .ok_or_else(|| ClientError::Rpc("submit response has no engine_result".to_string()))?;

        Ok(SubmitResult {
            result_code,
            result_message: field("engine_result_message").unwrap_or_default(),
            tx_hash: response
                .pointer("/tx_json/hash")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }
}
