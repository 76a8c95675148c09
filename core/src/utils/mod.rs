//! Utility functions and helpers
//!
//! Wire encoding helpers and the size-based fee rule shared by the single
//! transaction and batched transaction paths.

use crate::error::{to_validation_error, Result};

/// Encode a string as upper-case hex of its UTF-8 bytes
pub fn string_to_hex(s: &str) -> String {
    hex::encode_upper(s.as_bytes())
}

/// Decode hex produced by [`string_to_hex`] back into a string
pub fn hex_to_string(hex_str: &str) -> Result<String> {
    let bytes = hex::decode(hex_str.trim())?;
    String::from_utf8(bytes).map_err(to_validation_error)
}

/// Number of bytes a hex field occupies once decoded
pub fn hex_byte_len(hex_str: &str) -> u64 {
    (hex_str.len() / 2) as u64
}

/// Compute a transaction fee from a baseline and the payload size.
///
/// `fee = base + ceil(payload_bytes * drops_per_kilobyte / 1024)`
pub fn compute_fee(base_fee_drops: u64, payload_bytes: u64, drops_per_kilobyte: u64) -> u64 {
    let extra = payload_bytes
        .saturating_mul(drops_per_kilobyte)
        .saturating_add(1023)
        / 1024;
    base_fee_drops.saturating_add(extra)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn test_string_to_hex() {
        assert_eq!(string_to_hex("t1"), "7431");
        assert_eq!(string_to_hex(""), "");
        assert_eq!(string_to_hex("é"), "C3A9");
        assert_eq!(hex_to_string("7431").unwrap(), "t1");
        assert_eq!(hex_to_string("c3a9").unwrap(), "é");
    }

    #[test]
    fn test_hex_to_string_rejects_garbage() {
        assert!(matches!(hex_to_string("zz").unwrap_err(), CoreError::Hex(_)));
        assert!(matches!(hex_to_string("FF").unwrap_err(), CoreError::Validation(_)));
    }

    #[test]
    fn test_compute_fee() {
        // No payload, baseline only
        assert_eq!(compute_fee(50, 0, 1000), 50);

        // One byte still costs at least one drop
        assert_eq!(compute_fee(50, 1, 1000), 51);

        // A full kilobyte costs exactly drops_per_kilobyte
        assert_eq!(compute_fee(10, 1024, 1000), 1010);

        // Larger payloads cost more
        assert!(compute_fee(10, 4096, 1000) > compute_fee(10, 2048, 1000));

        assert_eq!(compute_fee(u64::MAX, 10, 1000), u64::MAX);
    }

    #[test]
    fn test_hex_byte_len() {
        assert_eq!(hex_byte_len("ABCD"), 2);
        assert_eq!(hex_byte_len(""), 0);
    }
}
