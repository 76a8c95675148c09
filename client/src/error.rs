//! Error types for the client crate

use thiserror::Error;
use ledger_tables_core::CoreError;

/// Client error type
#[derive(Error, Debug)]
pub enum ClientError {
    /// Validation, key or cryptographic failure from the core crate
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A remote token lookup failed
    #[error("Token fetch error: {0}")]
    TokenFetch(String),

    /// The ledger could not expand the transaction skeleton
    #[error("Skeleton request error: {0}")]
    SkeletonRequest(String),

    /// The signer rejected the transaction
    #[error("Signing error: {0}")]
    Signing(String),

    /// The ledger did not accept the signed transaction
    #[error("Submit error: {0}")]
    Submit(String),

    /// Transport or protocol failure talking to the ledger
    #[error("RPC error: {0}")]
    Rpc(String),

    /// `commit` was called without `begin_tran`
    #[error("No active batch: call begin_tran first")]
    NoActiveBatch,

    /// Another commit is running on this session
    #[error("A commit is already in progress on this session")]
    CommitInProgress,

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Stable classification of a [`ClientError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed caller input
    ValidationError,
    /// Public key does not belong to the user
    KeyMismatchError,
    /// Malformed or unusable public key
    InvalidPublicKey,
    /// Token not issued for this account
    TokenDecodeError,
    /// Symmetric decryption failed
    DecryptError,
    /// Encryption or key wrapping failed while encoding
    EncodeError,
    /// Remote token lookup failed
    TokenFetchError,
    /// Skeleton expansion failed
    SkeletonRequestError,
    /// Signing failed
    SigningError,
    /// Submission rejected
    SubmitError,
    /// Transport or protocol failure
    Transport,
    /// Session state does not allow the call
    State,
}

impl ClientError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Core(err) => match err {
                CoreError::Validation(_) | CoreError::Config(_) => ErrorKind::ValidationError,
                CoreError::KeyMismatch(_) => ErrorKind::KeyMismatchError,
                CoreError::InvalidPublicKey(_) => ErrorKind::InvalidPublicKey,
                CoreError::TokenDecode(_) => ErrorKind::TokenDecodeError,
                CoreError::Decrypt(_) => ErrorKind::DecryptError,
                CoreError::Encrypt(_) => ErrorKind::EncodeError,
                CoreError::Io(_) => ErrorKind::Transport,
                CoreError::Json(_) | CoreError::Hex(_) => ErrorKind::ValidationError,
            },
            ClientError::TokenFetch(_) => ErrorKind::TokenFetchError,
            ClientError::SkeletonRequest(_) => ErrorKind::SkeletonRequestError,
            ClientError::Signing(_) => ErrorKind::SigningError,
            ClientError::Submit(_) => ErrorKind::SubmitError,
            ClientError::Rpc(_) | ClientError::Http(_) | ClientError::Json(_) => ErrorKind::Transport,
            ClientError::NoActiveBatch | ClientError::CommitInProgress => ErrorKind::State,
        }
    }
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Convert a displayable error to an Rpc error
pub fn to_rpc_error<E: std::fmt::Display>(err: E) -> ClientError {
    ClientError::Rpc(err.to_string())
}

/// Convert a displayable error to a Signing error
pub fn to_signing_error<E: std::fmt::Display>(err: E) -> ClientError {
    ClientError::Signing(err.to_string())
}
