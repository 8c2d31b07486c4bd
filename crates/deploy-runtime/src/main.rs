//! # md-deploy
//!
//! Deploys the MECA contract set and registers network participants.
//!
//! ```text
//! md-deploy deploy
//! md-deploy register-tower --size-limit 1024 --public-connection tower:7777 --fee 10 --fee-type 0
//! md-deploy register-host --public-key 0x04... --public-key-type 1 --block-timeout-limit 30
//! md-deploy add-task --cid Qm... --fee 5 --computing-type 0 --size 2048
//! md-deploy accounts generate --balance 1000
//! ```
//!
//! Logging is controlled by `MD_LOG` (falling back to `RUST_LOG`, then `info`).

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use deploy_runtime::{AccountStore, DeployConfig, DeployRuntime};
use md_04_transaction_pipeline::JsonRpcLedger;
use md_05_deployment::{
    ComputingType, FeeType, HostRegistration, PublicKeyType, SolcCompiler, TaskRegistration,
    TowerRegistration,
};
use shared_types::{decode_hex, format_address, format_hash, Role, U256};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// MECA contract deployment and participant registration
#[derive(Parser, Debug)]
#[command(name = "md-deploy")]
#[command(about = "Deploy the MECA contracts and register participants")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

/// Flags override the environment, which overrides the defaults.
#[derive(Args, Debug)]
struct GlobalArgs {
    /// Ledger JSON-RPC endpoint
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Accounts JSON file
    #[arg(long, global = true)]
    accounts: Option<PathBuf>,

    /// Directory with the contract sources
    #[arg(long, global = true)]
    contracts_dir: Option<PathBuf>,

    /// Where deployed addresses are written and read
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// solc executable
    #[arg(long, global = true)]
    solc: Option<PathBuf>,

    /// Chain id; queried from the ledger when omitted
    #[arg(long, global = true)]
    chain_id: Option<u64>,

    /// Gas added to every estimate
    #[arg(long, global = true)]
    gas_margin: Option<u64>,

    /// Seconds to wait for each receipt
    #[arg(long, global = true)]
    receipt_timeout: Option<u64>,

    /// Role that deploys the Scheduler and the Host/Tower/Task contracts
    #[arg(long, global = true)]
    scheduler_signer: Option<Role>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Deploy and wire the DAO, Scheduler, Host, Tower and Task contracts
    Deploy,

    /// Register the tower operator on the Tower contract
    RegisterTower {
        #[arg(long)]
        size_limit: u64,
        #[arg(long)]
        public_connection: String,
        #[arg(long, value_parser = parse_u256)]
        fee: U256,
        /// 0 = constant, 1 = linear
        #[arg(long, default_value_t = 0)]
        fee_type: u8,
    },

    /// Register the host operator on the Host contract
    RegisterHost {
        /// Hex-encoded public key
        #[arg(long)]
        public_key: String,
        /// 0 = RSA, 1 = ECDSA
        #[arg(long, default_value_t = 1)]
        public_key_type: u8,
        #[arg(long)]
        block_timeout_limit: u64,
    },

    /// Add a task, identified by its content identifier, to the Task contract
    AddTask {
        #[arg(long)]
        cid: String,
        #[arg(long, value_parser = parse_u256)]
        fee: U256,
        /// 0 = CPU, 1 = GPU, 2 = SGX
        #[arg(long, default_value_t = 0)]
        computing_type: u8,
        #[arg(long)]
        size: u64,
    },

    /// Manage the accounts file
    Accounts {
        #[command(subcommand)]
        command: AccountsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum AccountsCommand {
    /// Write a fresh key for every role
    Generate {
        /// Balance recorded for each account
        #[arg(long, value_parser = parse_u256, default_value = "1000")]
        balance: U256,
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

fn parse_u256(value: &str) -> Result<U256, String> {
    match value.strip_prefix("0x") {
        Some(hex) => U256::from_str_radix(hex, 16).map_err(|e| e.to_string()),
        None => U256::from_dec_str(value).map_err(|e| e.to_string()),
    }
}

/// Load configuration from defaults, environment, then flags.
fn load_config(args: &GlobalArgs) -> Result<DeployConfig> {
    let mut config = DeployConfig::from_env().context("invalid MD_* environment")?;

    if let Some(url) = &args.rpc_url {
        config.rpc_url = url.clone();
    }
    if let Some(path) = &args.accounts {
        config.accounts_file = path.clone();
    }
    if let Some(path) = &args.contracts_dir {
        config.contracts_dir = path.clone();
    }
    if let Some(path) = &args.output {
        config.output_file = path.clone();
    }
    if let Some(path) = &args.solc {
        config.solc_path = path.clone();
    }
    if let Some(chain_id) = args.chain_id {
        config.chain_id = Some(chain_id);
    }
    if let Some(margin) = args.gas_margin {
        config.gas_margin = margin;
    }
    if let Some(secs) = args.receipt_timeout {
        config.receipt_timeout = Duration::from_secs(secs);
    }
    if let Some(role) = args.scheduler_signer {
        config.scheduler_signer = role;
    }

    config.validate()?;
    Ok(config)
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("MD_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = load_config(&cli.global)?;

    match cli.command {
        Command::Accounts {
            command: AccountsCommand::Generate { balance, force },
        } => generate_accounts(&config, balance, force)?,
        Command::Deploy => {
            let contracts = connect(config)?.deploy().await?;
            for (name, address) in contracts.addresses() {
                println!("{name:<10} {}", format_address(&address));
            }
        }
        Command::RegisterTower {
            size_limit,
            public_connection,
            fee,
            fee_type,
        } => {
            let registration = TowerRegistration {
                size_limit,
                public_connection,
                fee,
                fee_type: FeeType::try_from(fee_type)?,
            };
            let receipt = connect(config)?.register_tower(&registration).await?;
            info!(tx_hash = %format_hash(&receipt.transaction_hash), "Tower registered");
        }
        Command::RegisterHost {
            public_key,
            public_key_type,
            block_timeout_limit,
        } => {
            let registration = HostRegistration {
                public_key: decode_hex(&public_key).context("--public-key")?,
                public_key_type: PublicKeyType::try_from(public_key_type)?,
                block_timeout_limit,
            };
            let receipt = connect(config)?.register_host(&registration).await?;
            info!(tx_hash = %format_hash(&receipt.transaction_hash), "Host registered");
        }
        Command::AddTask {
            cid,
            fee,
            computing_type,
            size,
        } => {
            // Parsed before any account or ledger access
            let registration = TaskRegistration {
                identifier: md_01_content_identifier::parse(&cid)
                    .with_context(|| format!("--cid {cid}"))?,
                fee,
                computing_type: ComputingType::try_from(computing_type)?,
                size,
            };
            let receipt = connect(config)?.add_task(&registration).await?;
            info!(tx_hash = %format_hash(&receipt.transaction_hash), "Task added");
        }
    }

    Ok(())
}

fn connect(config: DeployConfig) -> Result<DeployRuntime<JsonRpcLedger, SolcCompiler>> {
    let accounts = AccountStore::load(&config.accounts_file)
        .with_context(|| format!("loading {}", config.accounts_file.display()))?;
    info!(rpc_url = %config.rpc_url, "Connecting to ledger");
    Ok(DeployRuntime::connect(config, accounts)?)
}

fn generate_accounts(config: &DeployConfig, balance: U256, force: bool) -> Result<()> {
    let path = &config.accounts_file;
    if path.exists() && !force {
        bail!("{} exists; pass --force to replace it", path.display());
    }

    let store = AccountStore::generate(balance);
    store.save(path)?;
    for role in store.roles() {
        let account = store.get(role)?;
        println!("{:<16} {}", role.as_str(), format_address(&account.address()));
    }
    info!(path = %path.display(), "Accounts written");
    Ok(())
}
