//! Secret/token codec
//!
//! A token wraps a table's symmetric key for exactly one recipient public key,
//! ECIES-style:
//!
//! ```text
//! version (1) || ephemeral_pub (32) || nonce (12) || AES-256-GCM(wrap_key, table_key) (48)
//! ```
//!
//! where `wrap_key = HKDF-SHA256(ikm = X25519(ephemeral, recipient),
//! salt = ephemeral_pub || recipient_pub)`. A self-form token is wrapped for
//! the issuing account's own public key; a grant-form token is wrapped for a
//! grantee. Both are upper-case hex on the wire.

use std::fmt;

use hkdf::Hkdf;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::Zeroizing;

use super::cipher::{self, CipherSuite, SymmetricKey, KEY_SIZE, NONCE_SIZE, TAG_SIZE};
use super::domains;
use super::keys::{parse_public_key, Account, AccountKeys, AccountSecret, PUBLIC_KEY_SIZE};
use crate::error::{to_token_decode_error, CoreError, Result};

/// Current token format version
pub const TOKEN_VERSION: u8 = 1;

/// Size of a decoded token in bytes
pub const TOKEN_SIZE: usize = 1 + PUBLIC_KEY_SIZE + NONCE_SIZE + KEY_SIZE + TAG_SIZE;

/// A wrapped symmetric key, upper-case hex encoded
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Wrap a hex token received from the ledger
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into().trim().to_uppercase())
    }

    /// The token's wire form
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the token is empty (the ledger's marker for an unencrypted table)
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Tokens are safe to show, but long; the prefix is enough to correlate
        let prefix: String = self.0.chars().take(16).collect();
        write!(f, "Token({}..)", prefix)
    }
}

fn derive_wrap_key(
    shared: &[u8; 32],
    ephemeral: &PublicKey,
    recipient: &PublicKey,
) -> Result<SymmetricKey> {
    let mut salt = [0u8; PUBLIC_KEY_SIZE * 2];
    salt[..PUBLIC_KEY_SIZE].copy_from_slice(ephemeral.as_bytes());
    salt[PUBLIC_KEY_SIZE..].copy_from_slice(recipient.as_bytes());

    let hk = Hkdf::<Sha256>::new(Some(&salt), shared);
    let mut okm = Zeroizing::new([0u8; KEY_SIZE]);
    hk.expand(domains::TOKEN_WRAP_INFO.as_bytes(), &mut okm[..])
        .map_err(|e| CoreError::Encrypt(format!("wrap key derivation failed: {}", e)))?;

    Ok(SymmetricKey::from_bytes(*okm))
}

fn wrap_for(recipient: &PublicKey, key: &SymmetricKey) -> Result<Token> {
    let mut ephemeral_bytes = Zeroizing::new([0u8; 32]);
    OsRng.fill_bytes(&mut ephemeral_bytes[..]);
    let ephemeral = StaticSecret::from(*ephemeral_bytes);
    let ephemeral_public = PublicKey::from(&ephemeral);

    let shared = ephemeral.diffie_hellman(recipient);
    if !shared.was_contributory() {
        return Err(CoreError::InvalidPublicKey(
            "public key is not usable for key agreement".to_string(),
        ));
    }

    let wrap_key = derive_wrap_key(shared.as_bytes(), &ephemeral_public, recipient)?;

    let mut nonce = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce);
    let wrapped = cipher::seal(&wrap_key, &nonce, key.as_bytes(), CipherSuite::Aes256Gcm)?;

    let mut token = Vec::with_capacity(TOKEN_SIZE);
    token.push(TOKEN_VERSION);
    token.extend_from_slice(ephemeral_public.as_bytes());
    token.extend_from_slice(&nonce);
    token.extend_from_slice(&wrapped);

    Ok(Token(hex::encode_upper(token)))
}

/// Generate a fresh table key wrapped for the holder of `secret`
pub fn generate_token(secret: &AccountSecret) -> Result<Token> {
    let keys = AccountKeys::derive(secret)?;
    let key = SymmetricKey::generate();
    wrap_for(keys.public_key(), &key)
}

/// Re-wrap an already known table key for a grantee's public key
pub fn generate_grant_token(recipient_public_key: &str, key: &SymmetricKey) -> Result<Token> {
    let recipient = parse_public_key(recipient_public_key)?;
    wrap_for(&recipient, key)
}

/// Recover the table key from a token issued for `account`
pub fn decode_token(account: &Account, token: &Token) -> Result<SymmetricKey> {
    let keys = account.keys()?;
    decode_with_keys(&keys, token)
}

/// Recover the table key from a token using already derived key material
pub fn decode_with_keys(keys: &AccountKeys, token: &Token) -> Result<SymmetricKey> {
    let bytes = hex::decode(token.as_str()).map_err(to_token_decode_error)?;

    if bytes.len() != TOKEN_SIZE {
        return Err(CoreError::TokenDecode(format!(
            "expected {} token bytes, got {}",
            TOKEN_SIZE,
            bytes.len()
        )));
    }
    if bytes[0] != TOKEN_VERSION {
        return Err(CoreError::TokenDecode(format!(
            "unsupported token version {}",
            bytes[0]
        )));
    }

    let (ephemeral, rest) = bytes[1..].split_at(PUBLIC_KEY_SIZE);
    let (nonce, wrapped) = rest.split_at(NONCE_SIZE);

    let mut ephemeral_bytes = [0u8; PUBLIC_KEY_SIZE];
    ephemeral_bytes.copy_from_slice(ephemeral);
    let ephemeral = PublicKey::from(ephemeral_bytes);

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    nonce_bytes.copy_from_slice(nonce);

    let shared = keys.agreement_secret().diffie_hellman(&ephemeral);
    let wrap_key = derive_wrap_key(shared.as_bytes(), &ephemeral, keys.public_key())?;

    let plain = Zeroizing::new(
        cipher::open(&wrap_key, &nonce_bytes, wrapped, CipherSuite::Aes256Gcm)
            .map_err(|_| CoreError::TokenDecode("token was not issued for this account".to_string()))?,
    );

    let key: [u8; KEY_SIZE] = plain
        .as_slice()
        .try_into()
        .map_err(|_| CoreError::TokenDecode("wrapped key has the wrong length".to_string()))?;

    Ok(SymmetricKey::from_bytes(key))
}
