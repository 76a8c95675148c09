//! Symmetric payload cipher
//!
//! Table definitions are encrypted under a per-table symmetric key. Two AEAD
//! suites are available and the account chooses one explicitly:
//!
//! * `Aes256Gcm` - the default suite;
//! * `ChaCha20Poly1305` - the alternate suite for deployments that cannot
//!   use AES.
//!
//! Ciphertext is always emitted as upper-case hex of
//! `nonce (12 bytes) || ciphertext || tag (16 bytes)`.

use std::fmt;

use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::Aes256Gcm;
use chacha20poly1305::ChaCha20Poly1305;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{CoreError, Result};

/// Size of a symmetric key in bytes (256 bits)
pub const KEY_SIZE: usize = 32;

/// Size of an AEAD nonce in bytes (96 bits)
pub const NONCE_SIZE: usize = 12;

/// Size of an AEAD authentication tag in bytes (128 bits)
pub const TAG_SIZE: usize = 16;

/// Symmetric cipher suite for table payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CipherSuite {
    /// AES-256-GCM
    Aes256Gcm,

    /// ChaCha20-Poly1305
    ChaCha20Poly1305,
}

impl Default for CipherSuite {
    fn default() -> Self {
        CipherSuite::Aes256Gcm
    }
}

impl fmt::Display for CipherSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CipherSuite::Aes256Gcm => f.write_str("aes256gcm"),
            CipherSuite::ChaCha20Poly1305 => f.write_str("chacha20poly1305"),
        }
    }
}

impl std::str::FromStr for CipherSuite {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "aes256gcm" | "aes" => Ok(CipherSuite::Aes256Gcm),
            "chacha20poly1305" | "chacha" => Ok(CipherSuite::ChaCha20Poly1305),
            other => Err(CoreError::Config(format!("unknown cipher suite: {}", other))),
        }
    }
}

/// A per-table symmetric key.
///
/// Wiped from memory on drop and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey([u8; KEY_SIZE]);

impl SymmetricKey {
    /// Generate a fresh random key
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_SIZE];
        OsRng.fill_bytes(&mut bytes);
        let key = Self(bytes);
        bytes.zeroize();
        key
    }

    /// Wrap raw key bytes
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Borrow the raw key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SymmetricKey(**redacted**)")
    }
}

pub(crate) fn seal(key: &SymmetricKey, nonce: &[u8; NONCE_SIZE], plaintext: &[u8], suite: CipherSuite) -> Result<Vec<u8>> {
    let sealed = match suite {
        CipherSuite::Aes256Gcm => Aes256Gcm::new_from_slice(key.as_bytes())
            .map_err(|e| CoreError::Encrypt(e.to_string()))?
            .encrypt(GenericArray::from_slice(nonce), plaintext),
        CipherSuite::ChaCha20Poly1305 => ChaCha20Poly1305::new_from_slice(key.as_bytes())
            .map_err(|e| CoreError::Encrypt(e.to_string()))?
            .encrypt(GenericArray::from_slice(nonce), plaintext),
    };

    sealed.map_err(|_| CoreError::Encrypt(format!("{} encryption failed", suite)))
}

pub(crate) fn open(key: &SymmetricKey, nonce: &[u8; NONCE_SIZE], ciphertext: &[u8], suite: CipherSuite) -> Result<Vec<u8>> {
    let opened = match suite {
        CipherSuite::Aes256Gcm => Aes256Gcm::new_from_slice(key.as_bytes())
            .map_err(|e| CoreError::Decrypt(e.to_string()))?
            .decrypt(GenericArray::from_slice(nonce), ciphertext),
        CipherSuite::ChaCha20Poly1305 => ChaCha20Poly1305::new_from_slice(key.as_bytes())
            .map_err(|e| CoreError::Decrypt(e.to_string()))?
            .decrypt(GenericArray::from_slice(nonce), ciphertext),
    };

    // Generic message: no detail about why authentication failed
    opened.map_err(|_| CoreError::Decrypt("authentication failed".to_string()))
}

/// Encrypt `plaintext` under `key`, returning upper-case hex
pub fn sym_encrypt(key: &SymmetricKey, plaintext: &[u8], suite: CipherSuite) -> Result<String> {
    let mut nonce = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce);

    let ciphertext = seal(key, &nonce, plaintext, suite)?;

    let mut output = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    output.extend_from_slice(&nonce);
    output.extend_from_slice(&ciphertext);

    Ok(hex::encode_upper(output))
}

/// Decrypt hex produced by [`sym_encrypt`]
pub fn sym_decrypt(key: &SymmetricKey, ciphertext_hex: &str, suite: CipherSuite) -> Result<Vec<u8>> {
    let data = hex::decode(ciphertext_hex.trim())
        .map_err(|e| CoreError::Decrypt(format!("ciphertext is not hex: {}", e)))?;

    if data.len() < NONCE_SIZE + TAG_SIZE {
        return Err(CoreError::Decrypt(format!(
            "ciphertext too short: {} bytes",
            data.len()
        )));
    }

    let (nonce, ciphertext) = data.split_at(NONCE_SIZE);
    let mut nonce_bytes = [0u8; NONCE_SIZE];
    nonce_bytes.copy_from_slice(nonce);

    open(key, &nonce_bytes, ciphertext, suite)
}
