//! # Ledger Tables Core
//!
//! Core data structures and utilities for confidential ledger tables.
//! This crate provides the account key material, the token codec that wraps
//! per-table keys, the payload cipher, and the table operation models that
//! the client assembles into ledger transactions. Nothing in here performs
//! network I/O.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod crypto;
pub mod error;
pub mod models;
pub mod schema;
pub mod utils;

/// Re-export common types for ease of use
pub use config::{FeeConfig, LedgerConfig};
pub use crypto::{
    decode_token, generate_grant_token, generate_token, sym_decrypt, sym_encrypt, Account,
    AccountSecret, CipherSuite, GeneratedAccount, SymmetricKey, Token,
};
pub use error::{CoreError, Result};
pub use models::{
    CreateOptions, OpType, Permissions, ResolvedSecret, SecretMap, SqlTransaction, Statement,
    StatementEncoder, TableKey, TableListSet, TableOperation,
};

/// Version of the core crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Create a domain-separated secure hash
///
/// # Arguments
///
/// * `domain` - Domain prefix (e.g., "LEDGER_TABLES_ADDRESS")
/// * `data` - Data to hash
///
/// # Returns
///
/// A 32-byte secure hash with domain separation
pub fn secure_hash(domain: &str, data: &[u8]) -> [u8; 32] {
    crypto::secure_hash(domain, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_hash_domain_separation() {
        let data = b"test data";

        // Different domains should produce different hashes
        let hash1 = secure_hash("DOMAIN1", data);
        let hash2 = secure_hash("DOMAIN2", data);

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_generated_account_roundtrip() {
        let generated = GeneratedAccount::generate().unwrap();
        let account = Account::new(
            generated.address.clone(),
            generated.secret.clone(),
            CipherSuite::default(),
        )
        .unwrap();

        let token = generate_token(account.secret()).unwrap();
        let key = decode_token(&account, &token).unwrap();
        let ciphertext = sym_encrypt(&key, b"{}", account.cipher_suite).unwrap();
        assert_eq!(sym_decrypt(&key, &ciphertext, account.cipher_suite).unwrap(), b"{}".to_vec());
    }
}
