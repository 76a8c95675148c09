//! Spy collaborators shared by the unit tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Notify;

use ledger_tables_core::utils::hex_to_string;
use ledger_tables_core::{AccountSecret, Statement};

use crate::error::{ClientError, Result};
use crate::rpc::{
    RpcAccessor, SignedTransaction, Signer, SubmitResult, Submitter, PREPARE_COMMAND,
    SUCCESS_CODE, USER_TOKEN_COMMAND,
};
use crate::signer::LocalSigner;

/// Fee the spy ledger puts into every skeleton
pub const SKELETON_FEE: u64 = 10;

/// Ledger spy: answers token lookups from a table and echoes skeletons
#[derive(Default)]
pub struct SpyLedger {
    tokens: Mutex<HashMap<(String, String), String>>,
    fail_tokens: bool,
    fail_prepare: bool,
    calls: Mutex<Vec<(String, Value)>>,
}

impl SpyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(self, owner: &str, table: &str, token: &str) -> Self {
        self.tokens
            .lock()
            .unwrap()
            .insert((owner.to_string(), table.to_string()), token.to_string());
        self
    }

    pub fn failing_tokens(mut self) -> Self {
        self.fail_tokens = true;
        self
    }

    pub fn failing_prepare(mut self) -> Self {
        self.fail_prepare = true;
        self
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, command: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|(c, _)| c == command).count()
    }

    /// The last payload handed to `t_prepare`
    pub fn last_prepared(&self) -> Option<Value> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(c, _)| c == PREPARE_COMMAND)
            .map(|(_, params)| params["tx_json"].clone())
    }
}

#[async_trait]
impl RpcAccessor for SpyLedger {
    async fn request(&self, command: &str, params: Value) -> Result<Value> {
        self.calls.lock().unwrap().push((command.to_string(), params.clone()));

        match command {
            USER_TOKEN_COMMAND => {
                if self.fail_tokens {
                    return Err(ClientError::Rpc("connection reset".to_string()));
                }
                let key = (
                    params["owner"].as_str().unwrap_or_default().to_string(),
                    params["tablename"].as_str().unwrap_or_default().to_string(),
                );
                let token = self.tokens.lock().unwrap().get(&key).cloned().unwrap_or_default();
                Ok(json!({ "token": token }))
            }
            PREPARE_COMMAND => {
                if self.fail_prepare {
                    return Err(ClientError::Rpc("tefPAST_SEQ".to_string()));
                }
                let mut tx = params["tx_json"].clone();
                tx["Sequence"] = json!(7);
                tx["Fee"] = json!(SKELETON_FEE.to_string());
                Ok(json!({ "tx_json": tx }))
            }
            _ => Ok(json!({ "status": "success" })),
        }
    }
}

/// Ledger spy whose `t_prepare` blocks until released
#[derive(Default)]
pub struct GatedLedger {
    inner: SpyLedger,
    entered: Notify,
    gate: Notify,
}

impl GatedLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inner(&self) -> &SpyLedger {
        &self.inner
    }

    /// Wait until a commit is parked inside `t_prepare`
    pub async fn wait_for_prepare(&self) {
        self.entered.notified().await;
    }

    /// Let the parked `t_prepare` finish
    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl RpcAccessor for GatedLedger {
    async fn request(&self, command: &str, params: Value) -> Result<Value> {
        if command == PREPARE_COMMAND {
            self.entered.notify_one();
            self.gate.notified().await;
        }
        self.inner.request(command, params).await
    }
}

/// Signer spy: signs with [`LocalSigner`] and records what it signed
#[derive(Default)]
pub struct SpySigner {
    signed: Mutex<Vec<Value>>,
}

impl SpySigner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed(&self) -> Vec<Value> {
        self.signed.lock().unwrap().clone()
    }
}

impl Signer for SpySigner {
    fn sign(&self, tx_json: &Value, secret: &AccountSecret) -> Result<SignedTransaction> {
        let signed = LocalSigner::new().sign(tx_json, secret)?;
        self.signed.lock().unwrap().push(signed.tx_json.clone());
        Ok(signed)
    }
}

/// Submitter spy returning a fixed result code
pub struct SpySubmitter {
    code: String,
    blobs: Mutex<Vec<String>>,
}

impl SpySubmitter {
    pub fn accepting() -> Self {
        Self::with_code(SUCCESS_CODE)
    }

    pub fn with_code(code: &str) -> Self {
        Self {
            code: code.to_string(),
            blobs: Mutex::new(Vec::new()),
        }
    }

    pub fn blobs(&self) -> Vec<String> {
        self.blobs.lock().unwrap().clone()
    }
}

#[async_trait]
impl Submitter for SpySubmitter {
    async fn submit(&self, signed_blob: &str) -> Result<SubmitResult> {
        self.blobs.lock().unwrap().push(signed_blob.to_string());
        Ok(SubmitResult {
            result_code: self.code.clone(),
            result_message: format!("spy {}", self.code),
            tx_hash: Some("SPYHASH".to_string()),
        })
    }
}

/// Decode the hex `Statements` field of a signed transaction
pub fn decode_statements(tx_json: &Value) -> Vec<Statement> {
    let hex = tx_json["Statements"].as_str().unwrap();
    serde_json::from_str(&hex_to_string(hex).unwrap()).unwrap()
}
