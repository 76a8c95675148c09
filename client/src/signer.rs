//! Reference transaction signer
//!
//! Signs with the Ed25519 key derived from the account secret. The message
//! is the SHA-256 digest of the transaction JSON with `SigningPubKey` filled
//! in and no `TxnSignature`.

use ed25519_dalek::{Signature, Signer as _, Verifier as _, VerifyingKey};
use serde_json::Value;
use sha2::{Digest, Sha256};

use ledger_tables_core::crypto::AccountKeys;
use ledger_tables_core::AccountSecret;

use crate::error::{to_signing_error, ClientError, Result};
use crate::rpc::{SignedTransaction, Signer};

const SIGNING_PUB_KEY: &str = "SigningPubKey";
const TXN_SIGNATURE: &str = "TxnSignature";

/// Signs transactions locally with a key derived from the account secret
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalSigner;

impl LocalSigner {
    /// Create a local signer
    pub fn new() -> Self {
        Self
    }

    /// Check the signature of a transaction produced by [`LocalSigner::sign`]
    pub fn verify(tx_json: &Value) -> Result<bool> {
        let mut unsigned = tx_json.clone();
        let object = unsigned
            .as_object_mut()
            .ok_or_else(|| ClientError::Signing("transaction is not an object".to_string()))?;

        let signature = object
            .remove(TXN_SIGNATURE)
            .and_then(|v| v.as_str().map(str::to_string))
            .ok_or_else(|| ClientError::Signing("transaction is not signed".to_string()))?;
        let public_key = object
            .get(SIGNING_PUB_KEY)
            .and_then(Value::as_str)
            .ok_or_else(|| ClientError::Signing("transaction has no signing key".to_string()))?;

        let public_key: [u8; 32] = hex::decode(public_key)
            .map_err(to_signing_error)?
            .try_into()
            .map_err(|_| ClientError::Signing("signing key has the wrong length".to_string()))?;
        let verifying_key = VerifyingKey::from_bytes(&public_key).map_err(to_signing_error)?;

        let signature = Signature::from_slice(&hex::decode(signature).map_err(to_signing_error)?)
            .map_err(to_signing_error)?;

        let digest = Sha256::digest(serde_json::to_vec(&unsigned)?);
        Ok(verifying_key.verify(&digest, &signature).is_ok())
    }
}

impl Signer for LocalSigner {
    fn sign(&self, tx_json: &Value, secret: &AccountSecret) -> Result<SignedTransaction> {
        let mut tx = tx_json.clone();
        let object = tx
            .as_object_mut()
            .ok_or_else(|| ClientError::Signing("transaction is not an object".to_string()))?;

        let signing_key = AccountKeys::derive(secret)?.signing_key();

        object.remove(TXN_SIGNATURE);
        object.insert(
            SIGNING_PUB_KEY.to_string(),
            Value::String(hex::encode_upper(signing_key.verifying_key().as_bytes())),
        );

        let digest = Sha256::digest(serde_json::to_vec(&tx)?);
        let signature = signing_key.sign(&digest);

        if let Some(object) = tx.as_object_mut() {
            object.insert(
                TXN_SIGNATURE.to_string(),
                Value::String(hex::encode_upper(signature.to_bytes())),
            );
        }

        let blob = serde_json::to_vec(&tx)?;
        let hash = hex::encode_upper(Sha256::digest(&blob));

        Ok(SignedTransaction {
            signed_transaction: hex::encode_upper(&blob),
            tx_json: tx,
            hash,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sign_and_verify() {
        let secret = AccountSecret::new("alice-secret");
        let tx = json!({"TransactionType": "SQLTransaction", "Account": "zalice", "Fee": "50"});

        let signed = LocalSigner::new().sign(&tx, &secret).unwrap();
        assert!(signed.tx_json.get(SIGNING_PUB_KEY).is_some());
        assert!(LocalSigner::verify(&signed.tx_json).unwrap());

        let blob = hex::decode(&signed.signed_transaction).unwrap();
        assert_eq!(serde_json::from_slice::<Value>(&blob).unwrap(), signed.tx_json);
        assert_eq!(signed.hash.len(), 64);
    }

    #[test]
    fn test_tampered_transaction_fails_verification() {
        let secret = AccountSecret::new("alice-secret");
        let tx = json!({"Account": "zalice", "Fee": "50"});

        let mut signed = LocalSigner::new().sign(&tx, &secret).unwrap().tx_json;
        signed["Fee"] = json!("1");
        assert!(!LocalSigner::verify(&signed).unwrap());
    }

    #[test]
    fn test_sign_rejects_non_object() {
        let secret = AccountSecret::new("alice-secret");
        let err = LocalSigner::new().sign(&json!([1, 2]), &secret).unwrap_err();
        assert!(matches!(err, ClientError::Signing(_)));

        let err = LocalSigner::new().sign(&json!({}), &AccountSecret::new("")).unwrap_err();
        assert!(matches!(err, ClientError::Core(_)));
    }
}
