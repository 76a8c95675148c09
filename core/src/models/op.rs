//! Table operation types

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Kind of table operation.
///
/// Serialized as the ledger's numeric operation code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpType {
    /// Create a table
    Create,

    /// Drop a table
    Drop,

    /// Rename a table
    Rename,

    /// Grant another account rights on a table
    Grant,

    /// Recreate a table
    Recreate,
}

impl OpType {
    /// Numeric operation code on the wire
    pub const fn code(self) -> u8 {
        match self {
            OpType::Create => 1,
            OpType::Drop => 2,
            OpType::Rename => 3,
            OpType::Grant => 11,
            OpType::Recreate => 12,
        }
    }

    /// Look up an operation by its wire code
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(OpType::Create),
            2 => Some(OpType::Drop),
            3 => Some(OpType::Rename),
            11 => Some(OpType::Grant),
            12 => Some(OpType::Recreate),
            _ => None,
        }
    }

    /// Whether the table key must be known to encode this operation
    pub fn requires_secret_resolution(self) -> bool {
        matches!(self, OpType::Create | OpType::Grant)
    }

    /// Whether the raw field is structural and hex-encoded instead of encrypted
    pub fn requires_structural_raw_field(self) -> bool {
        matches!(self, OpType::Grant)
    }

    /// Whether the encoded statement carries a token
    pub fn carries_token(self) -> bool {
        matches!(self, OpType::Create | OpType::Grant)
    }
}

impl fmt::Display for OpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OpType::Create => "create",
            OpType::Drop => "drop",
            OpType::Rename => "rename",
            OpType::Grant => "grant",
            OpType::Recreate => "recreate",
        };
        f.write_str(name)
    }
}

impl Serialize for OpType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for OpType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        OpType::from_code(code)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown operation code {}", code)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [OpType; 5] = [
        OpType::Create,
        OpType::Drop,
        OpType::Rename,
        OpType::Grant,
        OpType::Recreate,
    ];

    #[test]
    fn test_codes_are_unique_and_reversible() {
        for op in ALL {
            assert_eq!(OpType::from_code(op.code()), Some(op));
        }
        assert_eq!(OpType::from_code(0), None);
        assert_eq!(OpType::from_code(7), None);
    }

    #[test]
    fn test_capabilities() {
        assert!(OpType::Create.requires_secret_resolution());
        assert!(OpType::Grant.requires_secret_resolution());
        assert!(!OpType::Drop.requires_secret_resolution());
        assert!(!OpType::Rename.requires_secret_resolution());
        assert!(!OpType::Recreate.requires_secret_resolution());

        assert!(OpType::Grant.requires_structural_raw_field());
        assert!(!OpType::Create.requires_structural_raw_field());

        assert!(OpType::Create.carries_token());
        assert!(OpType::Grant.carries_token());
        assert!(!OpType::Drop.carries_token());
    }

    #[test]
    fn test_serializes_as_code() {
        assert_eq!(serde_json::to_string(&OpType::Grant).unwrap(), "11");
        assert_eq!(serde_json::from_str::<OpType>("1").unwrap(), OpType::Create);
        assert!(serde_json::from_str::<OpType>("99").is_err());
    }
}
