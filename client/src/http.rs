//! JSON-RPC over HTTP
//!
//! This module provides an [`RpcAccessor`] that talks to a ledger node's
//! JSON-RPC endpoint.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};

use ledger_tables_core::LedgerConfig;

use crate::error::{to_rpc_error, ClientError, Result};
use crate::rpc::RpcAccessor;

/// HTTP JSON-RPC client for a ledger node
pub struct HttpRpcClient {
    /// Base URL for the RPC endpoint
    base_url: String,

    /// HTTP client
    client: Client,

    /// Timeout for requests
    timeout: Duration,
}

impl HttpRpcClient {
    /// Create a new RPC client
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            client: Client::new(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Create a client from configuration
    pub fn from_config(config: &LedgerConfig) -> Self {
        let mut client = Self::new(&config.rpc_url);
        client.set_timeout(config.request_timeout);
        client
    }

    /// Set the timeout for requests
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// The endpoint this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl RpcAccessor for HttpRpcClient {
    async fn request(&self, command: &str, params: Value) -> Result<Value> {
        debug!("RPC request {} to {}", command, self.base_url);

        let response = self
            .client
            .post(&self.base_url)
            .timeout(self.timeout)
            .json(&json!({
                "method": command,
                "params": [params],
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(match response.text().await {
                Ok(text) if !text.is_empty() => ClientError::Rpc(format!("{}: {}", status, text)),
                _ => to_rpc_error(status),
            });
        }

        let body: Value = response.json().await?;
        let result = body
            .get("result")
            .cloned()
            .ok_or_else(|| ClientError::Rpc(format!("{} response has no result", command)))?;

        if result.get("status").and_then(Value::as_str) == Some("error") {
            let message = result
                .get("error_message")
                .or_else(|| result.get("error"))
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            return Err(ClientError::Rpc(format!("{} failed: {}", command, message)));
        }

        Ok(result)
    }
}
