//! Configuration for Ledger Tables
//!
//! This module provides the settings shared by the client library and the
//! command-line front end: where the ledger is, how fees are computed, and
//! the defaults applied to new sessions.

use std::time::Duration;
use serde::{Serialize, Deserialize};

use crate::crypto::CipherSuite;
use crate::error::{to_config_error, CoreError, Result};

/// Fee configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeConfig {
    /// Baseline fee used when the ledger's skeleton carries none
    pub default_fee_drops: u64,

    /// Additional drops charged per kilobyte of hex payload
    pub drops_per_kilobyte: u64,
}

impl Default for FeeConfig {
    fn default() -> Self {
        FeeConfig {
            default_fee_drops: 50,
            drops_per_kilobyte: 1000,
        }
    }
}

/// Ledger Tables configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// JSON-RPC endpoint of the ledger node
    pub rpc_url: String,

    /// Timeout for a single RPC request
    #[serde(with = "duration_secs")]
    pub request_timeout: Duration,

    /// Fee configuration
    pub fee: FeeConfig,

    /// Strict mode flag for multi-statement transactions
    pub strict_mode: bool,

    /// Whether the ledger should verify multi-statement transactions
    pub need_verify: bool,

    /// Cipher suite for table payloads
    pub cipher_suite: CipherSuite,

    /// Log level
    pub log_level: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        LedgerConfig {
            rpc_url: "http://127.0.0.1:5005".to_string(),
            request_timeout: Duration::from_secs(30),
            fee: FeeConfig::default(),
            strict_mode: false,
            need_verify: true,
            cipher_suite: CipherSuite::default(),
            log_level: "info".to_string(),
        }
    }
}

impl LedgerConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: &str) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let config: LedgerConfig = serde_json::from_reader(file).map_err(to_config_error)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn to_file(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.rpc_url.trim().is_empty() {
            return Err(CoreError::Config("rpc_url must not be empty".to_string()));
        }
        if self.request_timeout.is_zero() {
            return Err(CoreError::Config("request_timeout must be positive".to_string()));
        }
        Ok(())
    }

    /// Create a development configuration
    pub fn development() -> Self {
        let mut config = Self::default();
        config.log_level = "debug".to_string();
        config
    }

    /// Create a production configuration
    pub fn production() -> Self {
        let mut config = Self::default();
        config.log_level = "info".to_string();
        config.strict_mode = true;
        config.need_verify = true;
        config
    }

    /// Create a testing configuration
    pub fn testing() -> Self {
        let mut config = Self::default();
        config.log_level = "debug".to_string();
        config.request_timeout = Duration::from_secs(5);
        config.fee.default_fee_drops = 10;
        config
    }
}

mod duration_secs {
    use std::time::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(deserializer)?))
    }
}
