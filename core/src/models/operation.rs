//! Table operations
//!
//! A [`TableOperation`] is one validated intent. All input checks live in
//! the constructors so that the immediate and batched submission paths can
//! never disagree about what is acceptable.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::op::OpType;
use super::secret::TableKey;
use crate::crypto::address_matches_public_key;
use crate::error::{CoreError, Result};
use crate::schema::SchemaValidator;

/// Options for creating a table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateOptions {
    /// Whether the table definition is encrypted
    #[serde(default)]
    pub confidential: bool,

    /// Optional operation rule, sent hex-encoded alongside the definition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_rule: Option<Value>,
}

impl CreateOptions {
    /// Options for a confidential table
    pub fn confidential() -> Self {
        Self {
            confidential: true,
            operation_rule: None,
        }
    }
}

/// Permission flags carried by a grant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    /// Select rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select: Option<bool>,

    /// Insert rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insert: Option<bool>,

    /// Update rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update: Option<bool>,

    /// Delete rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<bool>,

    /// Execute on the table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execute: Option<bool>,
}

impl Permissions {
    /// Every right granted
    pub fn all() -> Self {
        Self {
            select: Some(true),
            insert: Some(true),
            update: Some(true),
            delete: Some(true),
            execute: Some(true),
        }
    }

    /// Select only
    pub fn read_only() -> Self {
        Self {
            select: Some(true),
            ..Default::default()
        }
    }

    /// Whether no flag is set at all
    pub fn is_empty(&self) -> bool {
        self.select.is_none()
            && self.insert.is_none()
            && self.update.is_none()
            && self.delete.is_none()
            && self.execute.is_none()
    }
}

/// One pending table operation
#[derive(Debug, Clone, PartialEq)]
pub struct TableOperation {
    op_type: OpType,
    table_name: String,
    new_table_name: Option<String>,
    raw: Option<Value>,
    operation_rule: Option<Value>,
    owner: Option<String>,
    confidential: bool,
    user: Option<String>,
    grantee_public_key: Option<String>,
}

impl TableOperation {
    fn bare(op_type: OpType, table_name: &str) -> Result<Self> {
        SchemaValidator::validate_table_name(table_name)?;

        Ok(Self {
            op_type,
            table_name: table_name.to_string(),
            new_table_name: None,
            raw: None,
            operation_rule: None,
            owner: None,
            confidential: false,
            user: None,
            grantee_public_key: None,
        })
    }

    /// Create a table from a raw definition
    pub fn create(table_name: &str, raw: Value, options: CreateOptions) -> Result<Self> {
        let mut op = Self::bare(OpType::Create, table_name)?;
        SchemaValidator::validate_raw(&raw)?;

        op.raw = Some(raw);
        op.confidential = options.confidential;
        op.operation_rule = options.operation_rule;
        Ok(op)
    }

    /// Recreate a table
    pub fn recreate(table_name: &str) -> Result<Self> {
        Self::bare(OpType::Recreate, table_name)
    }

    /// Drop a table
    pub fn drop(table_name: &str) -> Result<Self> {
        Self::bare(OpType::Drop, table_name)
    }

    /// Rename a table
    pub fn rename(table_name: &str, new_table_name: &str) -> Result<Self> {
        if new_table_name.trim().is_empty() {
            return Err(CoreError::Validation(
                "Table new name can not be empty".to_string(),
            ));
        }

        let mut op = Self::bare(OpType::Rename, table_name)?;
        op.new_table_name = Some(new_table_name.to_string());
        Ok(op)
    }

    /// Grant `user` the given permissions on a table.
    ///
    /// `grantee_public_key` must be the key behind `user`; this is checked
    /// here, before any key material is touched.
    pub fn grant(
        table_name: &str,
        user: &str,
        permissions: &Permissions,
        grantee_public_key: &str,
    ) -> Result<Self> {
        if table_name.trim().is_empty() || user.trim().is_empty() || permissions.is_empty() {
            return Err(CoreError::Validation(
                "grant needs a table name, a user and at least one permission flag".to_string(),
            ));
        }

        if !address_matches_public_key(user, grantee_public_key)? {
            return Err(CoreError::KeyMismatch(format!(
                "public key does not match user {}",
                user
            )));
        }

        let mut op = Self::bare(OpType::Grant, table_name)?;
        op.raw = Some(json!([permissions]));
        op.user = Some(user.to_string());
        op.grantee_public_key = Some(grantee_public_key.to_string());
        Ok(op)
    }

    /// Set the owner of the referenced table.
    ///
    /// Ignored for creates: a table is always created by the acting account.
    pub fn with_owner(mut self, owner: Option<String>) -> Self {
        if self.op_type != OpType::Create {
            self.owner = owner.filter(|o| !o.is_empty());
        }
        self
    }

    /// Operation kind
    pub fn op_type(&self) -> OpType {
        self.op_type
    }

    /// Plain table name
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// New name (rename only)
    pub fn new_table_name(&self) -> Option<&str> {
        self.new_table_name.as_deref()
    }

    /// Structured payload (create: definition, grant: permission flags)
    pub fn raw(&self) -> Option<&Value> {
        self.raw.as_ref()
    }

    /// Operation rule (create only)
    pub fn operation_rule(&self) -> Option<&Value> {
        self.operation_rule.as_ref()
    }

    /// Explicit owner of the referenced table
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// Whether the definition is encrypted (create only)
    pub fn confidential(&self) -> bool {
        self.confidential
    }

    /// Grantee address (grant only)
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Grantee public key (grant only)
    pub fn grantee_public_key(&self) -> Option<&str> {
        self.grantee_public_key.as_deref()
    }

    /// Identity of the table whose key secures this operation
    pub fn table_key(&self, acting_address: &str) -> TableKey {
        let owner = match self.op_type {
            OpType::Create => acting_address,
            _ => self.owner.as_deref().unwrap_or(acting_address),
        };
        TableKey::new(owner, &self.table_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::GeneratedAccount;

    fn schema() -> Value {
        json!([{"field": "id", "type": "int", "PK": 1}])
    }

    #[test]
    fn test_create_validates_input() {
        let op = TableOperation::create("t1", schema(), CreateOptions::confidential()).unwrap();
        assert_eq!(op.op_type(), OpType::Create);
        assert!(op.confidential());
        assert_eq!(op.raw(), Some(&schema()));

        let err = TableOperation::create("", schema(), CreateOptions::default()).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        let err = TableOperation::create("t1", json!("id int"), CreateOptions::default()).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_rename_requires_new_name() {
        let op = TableOperation::rename("t1", "t2").unwrap();
        assert_eq!(op.new_table_name(), Some("t2"));

        let err = TableOperation::rename("t1", "").unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_grant_checks_key_binding() {
        let bob = GeneratedAccount::generate().unwrap();
        let carol = GeneratedAccount::generate().unwrap();

        let op = TableOperation::grant("t1", &bob.address, &Permissions::read_only(), &bob.public_key).unwrap();
        assert_eq!(op.user(), Some(bob.address.as_str()));
        assert_eq!(op.raw(), Some(&json!([{"select": true}])));

        let err = TableOperation::grant("t1", &bob.address, &Permissions::read_only(), &carol.public_key)
            .unwrap_err();
        assert!(matches!(err, CoreError::KeyMismatch(_)));
    }

    #[test]
    fn test_grant_requires_arguments() {
        let bob = GeneratedAccount::generate().unwrap();

        for (name, user, perms) in [
            ("", bob.address.as_str(), Permissions::all()),
            ("t1", "", Permissions::all()),
            ("t1", bob.address.as_str(), Permissions::default()),
        ] {
            let err = TableOperation::grant(name, user, &perms, &bob.public_key).unwrap_err();
            assert!(matches!(err, CoreError::Validation(_)));
        }
    }

    #[test]
    fn test_table_key_owner_resolution() {
        let create = TableOperation::create("t1", schema(), CreateOptions::default())
            .unwrap()
            .with_owner(Some("zother".to_string()));
        assert_eq!(create.owner(), None);
        assert_eq!(create.table_key("zme"), TableKey::new("zme", "t1"));

        let drop = TableOperation::drop("t1").unwrap().with_owner(Some("zother".to_string()));
        assert_eq!(drop.table_key("zme"), TableKey::new("zother", "t1"));

        let drop = TableOperation::drop("t1").unwrap();
        assert_eq!(drop.table_key("zme"), TableKey::new("zme", "t1"));
    }
}
