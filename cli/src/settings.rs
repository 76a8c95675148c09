//! Layered configuration for the command-line front end
//!
//! Defaults, then an optional config file in any format the `config` crate
//! understands, then `LEDGER_TABLES_*` environment variables. Nested keys use
//! a double underscore, e.g. `LEDGER_TABLES_FEE__DROPS_PER_KILOBYTE`.

use config::{Config, ConfigError, Environment, File};

use ledger_tables_core::LedgerConfig;

/// Prefix of the environment variables that override configuration
pub const ENV_PREFIX: &str = "LEDGER_TABLES";

/// Load the configuration
pub fn load(path: Option<&str>) -> Result<LedgerConfig, ConfigError> {
    load_with_prefix(path, ENV_PREFIX)
}

fn load_with_prefix(path: Option<&str>, prefix: &str) -> Result<LedgerConfig, ConfigError> {
    let mut builder = Config::builder().add_source(Config::try_from(&LedgerConfig::default())?);

    if let Some(path) = path {
        builder = builder.add_source(File::with_name(path));
    }

    let config: LedgerConfig = builder
        .add_source(
            Environment::with_prefix(prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    config
        .validate()
        .map_err(|e| ConfigError::Message(e.to_string()))?;
    Ok(config)
}
