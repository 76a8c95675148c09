//! Account key material
//!
//! Every account is identified by a secret string. From that secret we derive,
//! with HKDF-SHA256 and distinct info labels:
//!
//! * an X25519 static secret, whose public half is the account's public key
//!   and is what tokens are wrapped for;
//! * an Ed25519 seed used by the reference transaction signer.
//!
//! The account address is a domain-separated hash of the X25519 public key,
//! which is what lets a grant check that a public key really belongs to the
//! user it names.

use std::fmt;

use constant_time_eq::constant_time_eq;
use ed25519_dalek::SigningKey;
use hkdf::Hkdf;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::cipher::CipherSuite;
use super::{domains, secure_hash};
use crate::error::{CoreError, Result};

/// Size of an X25519 public key in bytes
pub const PUBLIC_KEY_SIZE: usize = 32;

/// Number of hash bytes that make up an address
const ADDRESS_HASH_BYTES: usize = 20;

/// Prefix of every account address
const ADDRESS_PREFIX: &str = "z";

/// Number of random bytes in a generated secret
const GENERATED_SECRET_BYTES: usize = 16;

/// An account secret.
///
/// Wiped from memory on drop and never printed by `Debug`.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct AccountSecret(String);

impl AccountSecret {
    /// Wrap a secret string
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Create a fresh random secret
    pub fn generate() -> Self {
        let mut bytes = Zeroizing::new([0u8; GENERATED_SECRET_BYTES]);
        OsRng.fill_bytes(&mut bytes[..]);
        Self(hex::encode(&bytes[..]))
    }

    /// Borrow the secret string
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether the secret is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for AccountSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccountSecret(**redacted**)")
    }
}

/// Key material derived from an account secret.
///
/// Derive it when needed and drop it as soon as the operation completes.
pub struct AccountKeys {
    agreement: StaticSecret,
    public: PublicKey,
    signing_seed: Zeroizing<[u8; 32]>,
}

impl AccountKeys {
    /// Derive the key material for a secret
    pub fn derive(secret: &AccountSecret) -> Result<Self> {
        if secret.is_empty() {
            return Err(CoreError::Validation("account secret is empty".to_string()));
        }

        let hk = Hkdf::<Sha256>::new(
            Some(domains::ACCOUNT_SALT.as_bytes()),
            secret.expose().as_bytes(),
        );

        let mut agreement = Zeroizing::new([0u8; 32]);
        hk.expand(domains::AGREEMENT_INFO.as_bytes(), &mut agreement[..])
            .map_err(|e| CoreError::Encrypt(format!("key derivation failed: {}", e)))?;

        let mut signing_seed = Zeroizing::new([0u8; 32]);
        hk.expand(domains::SIGNING_INFO.as_bytes(), &mut signing_seed[..])
            .map_err(|e| CoreError::Encrypt(format!("key derivation failed: {}", e)))?;

        let agreement = StaticSecret::from(*agreement);
        let public = PublicKey::from(&agreement);

        Ok(Self {
            agreement,
            public,
            signing_seed,
        })
    }

    /// The account's public key
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// The account's public key in wire form
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public.as_bytes())
    }

    /// The account's address
    pub fn address(&self) -> String {
        derive_address(&self.public)
    }

    /// Ed25519 signing key for transaction signatures
    pub fn signing_key(&self) -> SigningKey {
        SigningKey::from_bytes(&self.signing_seed)
    }

    pub(crate) fn agreement_secret(&self) -> &StaticSecret {
        &self.agreement
    }
}

impl fmt::Debug for AccountKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountKeys")
            .field("public", &self.public_key_hex())
            .finish_non_exhaustive()
    }
}

/// Derive the address that belongs to a public key
pub fn derive_address(public: &PublicKey) -> String {
    let hash = secure_hash(domains::ADDRESS, public.as_bytes());
    format!("{}{}", ADDRESS_PREFIX, hex::encode(&hash[..ADDRESS_HASH_BYTES]))
}

/// Parse a public key from its hex wire form
pub fn parse_public_key(public_key: &str) -> Result<PublicKey> {
    let bytes = hex::decode(public_key.trim())
        .map_err(|e| CoreError::InvalidPublicKey(format!("not hex: {}", e)))?;

    let bytes: [u8; PUBLIC_KEY_SIZE] = bytes.try_into().map_err(|b: Vec<u8>| {
        CoreError::InvalidPublicKey(format!(
            "expected {} bytes, got {}",
            PUBLIC_KEY_SIZE,
            b.len()
        ))
    })?;

    if bytes.iter().all(|b| *b == 0) {
        return Err(CoreError::InvalidPublicKey("all-zero key".to_string()));
    }

    Ok(PublicKey::from(bytes))
}

/// Check that `public_key` is the key behind `address`.
///
/// Malformed keys are an error rather than a mismatch.
pub fn address_matches_public_key(address: &str, public_key: &str) -> Result<bool> {
    let public = parse_public_key(public_key)?;
    let derived = derive_address(&public);
    Ok(constant_time_eq(derived.as_bytes(), address.as_bytes()))
}

/// An account acting on the ledger
#[derive(Clone)]
pub struct Account {
    /// Account address
    pub address: String,

    /// Cipher suite used for this account's table payloads
    pub cipher_suite: CipherSuite,

    secret: AccountSecret,
}

impl Account {
    /// Build an account from its secret, deriving the address
    pub fn from_secret(secret: impl Into<String>, cipher_suite: CipherSuite) -> Result<Self> {
        let secret = AccountSecret::new(secret);
        let address = AccountKeys::derive(&secret)?.address();

        Ok(Self {
            address,
            cipher_suite,
            secret,
        })
    }

    /// Build an account from an address and secret, checking that they belong together
    pub fn new(
        address: impl Into<String>,
        secret: impl Into<String>,
        cipher_suite: CipherSuite,
    ) -> Result<Self> {
        let address = address.into();
        if address.is_empty() {
            return Err(CoreError::Validation("account address is empty".to_string()));
        }

        let account = Self::from_secret(secret, cipher_suite)?;
        if account.address != address {
            return Err(CoreError::Validation(format!(
                "secret does not belong to address {}",
                address
            )));
        }

        Ok(account)
    }

    /// The account secret
    pub fn secret(&self) -> &AccountSecret {
        &self.secret
    }

    /// Derive this account's key material
    pub fn keys(&self) -> Result<AccountKeys> {
        AccountKeys::derive(&self.secret)
    }

    /// This account's public key in wire form
    pub fn public_key_hex(&self) -> Result<String> {
        Ok(self.keys()?.public_key_hex())
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address)
            .field("cipher_suite", &self.cipher_suite)
            .field("secret", &self.secret)
            .finish()
    }
}

/// A freshly generated account, in printable form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedAccount {
    /// Account address
    pub address: String,

    /// Account secret
    pub secret: String,

    /// Public key in wire form
    pub public_key: String,
}

impl GeneratedAccount {
    /// Generate a new random account
    pub fn generate() -> Result<Self> {
        Self::from_secret(&AccountSecret::generate())
    }

    /// Describe the account behind an existing secret
    pub fn from_secret(secret: &AccountSecret) -> Result<Self> {
        let keys = AccountKeys::derive(secret)?;

        Ok(Self {
            address: keys.address(),
            secret: secret.expose().to_string(),
            public_key: keys.public_key_hex(),
        })
    }
}
