//! tokenpad CLI — deploys the demo components and submits calls against
//! them, persisting the platform state between invocations.

mod config;
mod platform;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;

use config::PlatformConfig;
use platform::Platform;
use tokenpad_types::{Address, Amount};

#[derive(Parser)]
#[command(name = "tokenpad", about = "tokenpad demo token platform")]
struct Cli {
    /// Directory holding the persisted platform state.
    #[arg(long, env = "TOKENPAD_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Path to a TOML configuration file. File settings are the base;
    /// CLI flags and env vars override them.
    #[arg(long, env = "TOKENPAD_CONFIG")]
    config: Option<PathBuf>,

    /// Acting account for mutating commands. Falls back to the config
    /// file's `default_caller`.
    #[arg(long, env = "TOKENPAD_CALLER")]
    caller: Option<Address>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Deploy a platform component.
    Deploy {
        #[command(subcommand)]
        component: DeployCommand,
    },
    /// Move tokens from the caller to another account.
    Transfer { to: Address, amount: u128 },
    /// Grant a spender a limit over the caller's balance.
    Approve { spender: Address, amount: u128 },
    /// Spend a granted allowance: move tokens out of another account.
    TransferFrom {
        from: Address,
        to: Address,
        amount: u128,
    },
    /// Create new tokens (owner only).
    Mint { to: Address, amount: u128 },
    /// Destroy tokens from the caller's own balance.
    Burn { amount: u128 },
    /// Hand ledger ownership to another account (owner only).
    TransferOwnership { new_owner: Address },
    /// Read an account balance.
    Balance { address: Address },
    /// Read a spending limit.
    Allowance { owner: Address, spender: Address },
    /// Show token metadata, supply, and owner.
    Info,
    /// Show the notifications emitted so far.
    Events {
        /// Only show notifications from this index on.
        #[arg(long, default_value_t = 0)]
        since: usize,
    },
    /// Inspect the deployment registry.
    Registry {
        #[command(subcommand)]
        action: RegistryCommand,
    },
    /// Drive the single-value store.
    Storage {
        #[command(subcommand)]
        action: StorageCommand,
    },
}

#[derive(clap::Subcommand)]
enum DeployCommand {
    /// Deploy the token ledger with an initial supply.
    Token {
        #[arg(long, default_value = "Demo Token")]
        name: String,
        #[arg(long, default_value = "DEMO")]
        symbol: String,
        /// Initial supply, credited to the caller.
        #[arg(long)]
        supply: u128,
    },
    /// Deploy the single-value store.
    Storage,
}

#[derive(clap::Subcommand)]
enum RegistryCommand {
    /// List every registered deployment.
    List,
    /// Fetch one deployment record by index.
    Get { index: u64 },
    /// Count the registered deployments.
    Total,
}

#[derive(clap::Subcommand)]
enum StorageCommand {
    /// Read the stored value.
    Get,
    /// Replace the stored value.
    Set { value: u64 },
}

/// Initialize the tracing subscriber; respects `RUST_LOG`.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let file_config = match &cli.config {
        Some(path) => match PlatformConfig::from_toml_file(path) {
            Ok(cfg) => {
                tracing::info!("loaded config from {}", path.display());
                cfg
            }
            Err(e) => {
                tracing::warn!(
                    "failed to load config {}: {e}, using defaults",
                    path.display()
                );
                PlatformConfig::default()
            }
        },
        None => PlatformConfig::default(),
    };

    let data_dir = cli
        .data_dir
        .or(file_config.data_dir)
        .unwrap_or_else(|| PathBuf::from("./tokenpad_data"));
    let caller = cli.caller.or(file_config.default_caller);

    let mut platform = Platform::load(&data_dir)?;
    run(&mut platform, caller, cli.command, &data_dir)
}

fn run(
    platform: &mut Platform,
    caller: Option<Address>,
    command: Command,
    data_dir: &Path,
) -> anyhow::Result<()> {
    match command {
        Command::Deploy { component } => {
            let deployer = acting(caller)?;
            let record = match component {
                DeployCommand::Token {
                    name,
                    symbol,
                    supply,
                } => platform.deploy_token(name, symbol, Amount::new(supply), deployer)?,
                DeployCommand::Storage => platform.deploy_store(deployer)?,
            };
            platform.save(data_dir)?;
            println!(
                "deployed {} at {} (height {})",
                record.kind.as_str(),
                record.address,
                record.height
            );
        }
        Command::Transfer { to, amount } => {
            let from = acting(caller)?;
            platform.advance();
            platform
                .token_mut()?
                .transfer(&from, &to, Amount::new(amount))?;
            platform.save(data_dir)?;
            println!("transferred {amount} from {from} to {to}");
        }
        Command::Approve { spender, amount } => {
            let owner = acting(caller)?;
            platform.advance();
            platform
                .token_mut()?
                .approve(&owner, &spender, Amount::new(amount))?;
            platform.save(data_dir)?;
            println!("approved {spender} for {amount} of {owner}");
        }
        Command::TransferFrom { from, to, amount } => {
            let spender = acting(caller)?;
            platform.advance();
            platform
                .token_mut()?
                .transfer_from(&spender, &from, &to, Amount::new(amount))?;
            platform.save(data_dir)?;
            println!("transferred {amount} from {from} to {to} (spender {spender})");
        }
        Command::Mint { to, amount } => {
            let owner = acting(caller)?;
            platform.advance();
            platform.token_mut()?.mint(&owner, &to, Amount::new(amount))?;
            platform.save(data_dir)?;
            println!("minted {amount} to {to}");
        }
        Command::Burn { amount } => {
            let from = acting(caller)?;
            platform.advance();
            platform.token_mut()?.burn(&from, Amount::new(amount))?;
            platform.save(data_dir)?;
            println!("burned {amount} from {from}");
        }
        Command::TransferOwnership { new_owner } => {
            let owner = acting(caller)?;
            platform.advance();
            platform.token_mut()?.transfer_ownership(&owner, new_owner)?;
            platform.save(data_dir)?;
            println!("ownership transferred from {owner} to {new_owner}");
        }
        Command::Balance { address } => {
            println!("{}", platform.token()?.balance_of(&address));
        }
        Command::Allowance { owner, spender } => {
            println!("{}", platform.token()?.allowance(&owner, &spender));
        }
        Command::Info => {
            let token = platform.token()?;
            println!("name:         {}", token.name());
            println!("symbol:       {}", token.symbol());
            println!("decimals:     {}", token.decimals());
            println!("total supply: {}", token.total_supply());
            println!("owner:        {}", token.owner());
        }
        Command::Events { since } => {
            let entries = platform.token()?.notifications().since(since);
            println!("{}", serde_json::to_string_pretty(entries)?);
        }
        Command::Registry { action } => match action {
            RegistryCommand::List => {
                let records: Vec<_> = platform.registry().iter().collect();
                println!("{}", serde_json::to_string_pretty(&records)?);
            }
            RegistryCommand::Get { index } => {
                let record = platform.registry().get(index)?;
                println!("{}", serde_json::to_string_pretty(record)?);
            }
            RegistryCommand::Total => {
                println!("{}", platform.registry().total());
            }
        },
        Command::Storage { action } => match action {
            StorageCommand::Get => {
                println!("{}", platform.store()?.get());
            }
            StorageCommand::Set { value } => {
                platform.advance();
                let previous = platform.store_mut()?.set(value);
                platform.save(data_dir)?;
                println!("value changed: {previous} -> {value}");
            }
        },
    }
    Ok(())
}

fn acting(caller: Option<Address>) -> anyhow::Result<Address> {
    caller.context("no caller given: pass --caller or set default_caller in the config file")
}
