//! Client library for confidential ledger tables
//!
//! This library stages table operations for an account, resolves the table
//! keys they need, and commits them to the ledger as signed transactions.
//! Transport, signing and submission are collaborators behind the traits in
//! [`rpc`].

pub mod assembler;
pub mod error;
pub mod http;
pub mod resolver;
pub mod rpc;
pub mod session;
pub mod signer;

#[cfg(test)]
mod testing;

pub use assembler::{Assembler, CommitOptions, CommitStage};
pub use error::{ClientError, ErrorKind, Result};
pub use http::HttpRpcClient;
pub use resolver::SecretResolver;
pub use rpc::{RpcAccessor, RpcSubmitter, SignedTransaction, Signer, SubmitResult, Submitter};
pub use session::{Batch, PendingOperation, Session, Staged, SubmissionMode};
pub use signer::LocalSigner;
