/// Ledger Tables - confidential table management on a shared ledger
///
/// This is the root crate that provides workspace-level documentation.
/// Actual implementation is in the subcrates:
/// - `ledger-tables-core`: token codec, payload cipher, operation models and wire payloads
/// - `ledger-tables-client`: session, secret resolution and batched transaction commit
/// - `ledger-tables-cli`: command-line front end

/// Returns the version of the package.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
