use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use ledger_tables_client::rpc::account_tables;
use ledger_tables_client::{HttpRpcClient, LocalSigner, RpcSubmitter, Session};
use ledger_tables_core::{Account, CipherSuite, GeneratedAccount, LedgerConfig};

mod batch;
mod settings;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Confidential table operations on the ledger")]
struct Args {
    /// Config file path
    #[clap(short, long, env = "LEDGER_TABLES_CONFIG")]
    config: Option<String>,

    /// Ledger JSON-RPC endpoint
    #[clap(long, env = "LEDGER_TABLES_RPC_URL")]
    rpc_url: Option<String>,

    /// Account secret
    #[clap(long, env = "LEDGER_TABLES_SECRET", hide_env_values = true)]
    secret: Option<String>,

    /// Cipher suite for table payloads (aes256gcm or chacha20poly1305)
    #[clap(long)]
    suite: Option<CipherSuite>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a new account
    Keygen,

    /// Show the address and public key of the account secret
    Address,

    /// Commit a batch file as one transaction
    Apply {
        /// Batch file (JSON array of operations)
        #[clap(short, long)]
        file: PathBuf,
    },

    /// List the tables of an account
    Tables {
        /// Account address (defaults to the account of the secret)
        #[clap(long)]
        address: Option<String>,

        /// Include table details
        #[clap(long)]
        detail: bool,
    },

    /// Decode the raw definition of a table
    Read {
        /// Table owner
        #[clap(long)]
        owner: String,

        /// Table name
        #[clap(long)]
        table: String,

        /// Raw definition as stored on the ledger (hex)
        #[clap(long)]
        raw: String,
    },
}

fn account(args: &Args, config: &LedgerConfig) -> Result<Account> {
    let secret = match &args.secret {
        Some(secret) if !secret.is_empty() => secret.clone(),
        _ => bail!("an account secret is required (--secret or LEDGER_TABLES_SECRET)"),
    };
    Ok(Account::from_secret(secret, config.cipher_suite)?)
}

fn session(account: Account, config: &LedgerConfig) -> Arc<Session> {
    let rpc = Arc::new(HttpRpcClient::from_config(config));
    let submitter = Arc::new(RpcSubmitter::new(rpc.clone()));

    Arc::new(Session::new(account, rpc, Arc::new(LocalSigner::new()), submitter, config))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up a local .env before anything reads the environment
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let args = Args::parse();

    // Load configuration
    let mut config = settings::load(args.config.as_deref()).context("invalid configuration")?;

    // Override config with command-line arguments
    if let Some(rpc_url) = &args.rpc_url {
        config.rpc_url = rpc_url.clone();
    }
    if let Some(suite) = args.suite {
        config.cipher_suite = suite;
    }

    // Initialize logging
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, &config.log_level),
    );

    match &args.command {
        Command::Keygen => print_json(&GeneratedAccount::generate()?)?,

        Command::Address => {
            let account = account(&args, &config)?;
            print_json(&serde_json::json!({
                "address": account.address,
                "public_key": account.public_key_hex()?,
            }))?;
        }

        Command::Apply { file } => {
            let entries = batch::read(file)?;
            let session = session(account(&args, &config)?, &config);

            info!("Applying {} operation(s) from {}", entries.len(), file.display());

            session.begin_tran().await?;
            for (index, entry) in entries.into_iter().enumerate() {
                entry
                    .stage(&session)
                    .await
                    .with_context(|| format!("operation #{} rejected", index))?;
            }

            let result = session.commit().await?;
            print_json(&result)?;
        }

        Command::Tables { address, detail } => {
            let address = match address {
                Some(address) => address.clone(),
                None => account(&args, &config)?.address,
            };

            let rpc = HttpRpcClient::from_config(&config);
            print_json(&account_tables(&rpc, &address, *detail).await?)?;
        }

        Command::Read { owner, table, raw } => {
            let session = session(account(&args, &config)?, &config);
            let definition = session.read_table_raw(owner, table, raw).await?;
            print_json(&definition)?;
        }
    }

    Ok(())
}
