//! Statement encoding
//!
//! Turns a validated [`TableOperation`] plus its resolved secret into the
//! wire [`Statement`]. The same rules apply to a single immediate operation
//! and to every statement of a batch:
//!
//! * with a table key, raw payloads are encrypted under it, except grant
//!   flags which are hex-encoded as plaintext JSON;
//! * creates carry the creator's token, grants carry the key re-wrapped for
//!   the grantee;
//! * without a table key, raw payloads are hex-encoded as plaintext JSON;
//! * table names are always replaced by hex table entries and the grantee
//!   public key never reaches the wire.

use log::debug;

use super::op::OpType;
use super::operation::TableOperation;
use super::payload::{Statement, TableEntry};
use super::secret::ResolvedSecret;
use crate::crypto::{decode_token, generate_grant_token, sym_encrypt, Account};
use crate::error::{CoreError, Result};
use crate::utils::string_to_hex;

/// Encodes table operations for one acting account
#[derive(Debug)]
pub struct StatementEncoder<'a> {
    account: &'a Account,
}

impl<'a> StatementEncoder<'a> {
    /// Create an encoder for `account`
    pub fn new(account: &'a Account) -> Self {
        Self { account }
    }

    /// Encode one operation
    pub fn encode(&self, op: &TableOperation, secret: &ResolvedSecret) -> Result<Statement> {
        let mut statement = Statement {
            op_type: op.op_type(),
            tables: vec![TableEntry::encoded(op.table_name(), op.new_table_name())],
            raw: None,
            operation_rule: op
                .operation_rule()
                .map(|rule| string_to_hex(&rule.to_string())),
            token: None,
            user: op.user().map(str::to_string),
        };

        let raw_json = op.raw().map(serde_json::to_string).transpose()?;

        match secret {
            ResolvedSecret::Token(token) => {
                let key = decode_token(self.account, token)?;

                statement.raw = match raw_json {
                    Some(json) if op.op_type().requires_structural_raw_field() => {
                        Some(string_to_hex(&json))
                    }
                    Some(json) => Some(sym_encrypt(&key, json.as_bytes(), self.account.cipher_suite)?),
                    None => None,
                };

                statement.token = match op.op_type() {
                    OpType::Create => Some(token.to_string()),
                    OpType::Grant => {
                        let public_key = op.grantee_public_key().ok_or_else(|| {
                            CoreError::Validation("grant is missing the grantee public key".to_string())
                        })?;
                        Some(generate_grant_token(public_key, &key)?.to_string())
                    }
                    _ => None,
                };

                debug!(
                    "Encoded {} on {} with table key ({} suite)",
                    op.op_type(),
                    op.table_name(),
                    self.account.cipher_suite
                );
            }
            ResolvedSecret::Plain => {
                statement.raw = raw_json.map(|json| string_to_hex(&json));
            }
        }

        Ok(statement)
    }
}
