//! Cryptographic primitives for Ledger Tables
//!
//! This module groups the account key material, the token codec that wraps
//! per-table symmetric keys, and the symmetric cipher that protects table
//! definitions.

pub mod cipher;
pub mod keys;
pub mod token;

pub use cipher::{sym_decrypt, sym_encrypt, CipherSuite, SymmetricKey};
pub use keys::{address_matches_public_key, Account, AccountKeys, AccountSecret, GeneratedAccount};
pub use token::{decode_token, generate_grant_token, generate_token, Token};

use sha2::{Sha256, Digest};

/// Domain constants for hashing and key derivation
pub mod domains {
    /// Domain for account address derivation
    pub const ADDRESS: &str = "LEDGER_TABLES_ADDRESS";

    /// HKDF salt for account key derivation
    pub const ACCOUNT_SALT: &str = "LEDGER_TABLES_ACCOUNT";

    /// HKDF info for the key-agreement secret
    pub const AGREEMENT_INFO: &str = "ledger-tables x25519";

    /// HKDF info for the signing key
    pub const SIGNING_INFO: &str = "ledger-tables ed25519";

    /// HKDF info for token wrap keys
    pub const TOKEN_WRAP_INFO: &str = "ledger-tables token wrap";
}

/// Create a domain-separated secure hash using SHA-256
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
    let mut hasher = Sha256::new();
    
    // Add domain prefix for domain separation
    hasher.update(domain.as_bytes());
    
    // Domain length byte keeps variable-length domains unambiguous
    hasher.update(&[domain.len() as u8]);
    
    hasher.update(data);
    
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_secure_hash() {
        let data = b"test data";
        let hash = secure_hash("TEST", data);
        
        // Same inputs should produce the same hash
        let hash2 = secure_hash("TEST", data);
        assert_eq!(hash, hash2);
        
        // Different domain should produce different hash
        let hash3 = secure_hash(domains::ADDRESS, data);
        assert_ne!(hash, hash3);
        
        // Different data should produce different hash
        let hash4 = secure_hash("TEST", b"different data");
        assert_ne!(hash, hash4);
    }
}
