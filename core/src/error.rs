//! Error types for the core crate
//!
//! This module provides a consolidated error type for the core crate,
//! covering input validation, key handling and the symmetric/asymmetric
//! cryptography used to protect table definitions.

use thiserror::Error;
use std::io;

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// Malformed caller input, detected before any I/O
    #[error("Validation error: {0}")]
    Validation(String),

    /// A public key does not belong to the account it was presented for
    #[error("Key mismatch: {0}")]
    KeyMismatch(String),

    /// A public key is malformed or unusable for key agreement
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    /// A token could not be unwrapped with the account's key material
    #[error("Token decode error: {0}")]
    TokenDecode(String),

    /// Symmetric decryption failed
    #[error("Decrypt error: {0}")]
    Decrypt(String),

    /// Symmetric encryption or key wrapping failed
    #[error("Encrypt error: {0}")]
    Encrypt(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Hex decoding error
    #[error("Hex decoding error: {0}")]
    Hex(#[from] hex::FromHexError),
}

/// Result type for the core crate
pub type Result<T> = std::result::Result<T, CoreError>;

/// Convert a displayable error to a Validation error
pub fn to_validation_error<E: std::fmt::Display>(err: E) -> CoreError {
    CoreError::Validation(err.to_string())
}

/// Convert a displayable error to a TokenDecode error
pub fn to_token_decode_error<E: std::fmt::Display>(err: E) -> CoreError {
    CoreError::TokenDecode(err.to_string())
}

/// Convert a displayable error to a Decrypt error
pub fn to_decrypt_error<E: std::fmt::Display>(err: E) -> CoreError {
    CoreError::Decrypt(err.to_string())
}

/// Convert a displayable error to a Config error
pub fn to_config_error<E: std::fmt::Display>(err: E) -> CoreError {
    CoreError::Config(err.to_string())
}
