use clap::{Parser, Subcommand};
use serde::Deserialize;

pub const DEFAULT_RPC_URL: &str = "https://rpc.testnet.near.org";
pub const DEFAULT_CONTRACT: &str = "nearswap.testnet";

/// Command line arguments
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional path to a configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// NEAR JSON-RPC endpoint
    #[arg(long)]
    pub rpc_url: Option<String>,

    /// AMM contract account
    #[arg(long)]
    pub contract: Option<String>,

    /// Signed-in account used for balances and transactions
    #[arg(long)]
    pub account: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Convert a decimal amount to yocto units
    ToYocto { amount: String },
    /// Convert yocto units to a decimal amount
    ToHuman {
        yocto: String,
        /// Keep only this many fractional digits
        #[arg(long)]
        digits: Option<u8>,
    },
    /// List pools of the AMM contract
    Pools,
    /// Show reserves of the pool for a token
    PoolInfo { token: String },
    /// Quote the output of selling an amount
    QuoteIn {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        amount: String,
    },
    /// Quote the input needed to buy an amount
    QuoteOut {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        amount: String,
    },
    /// Show the AMM's allowance on a NEP-21 token
    Allowance { token: String },
    /// Show the account balance of a token (`near` for NEAR)
    Balance { token: String },
    /// Check the account keeps enough NEAR for fees
    GasCheck,
    /// Sell an exact amount
    SwapIn {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        amount: String,
        /// Minimum accepted output, must be above zero
        #[arg(long)]
        min_out: String,
    },
    /// Buy an exact amount
    SwapOut {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        amount: String,
        /// Maximum input in yocto units; quoted from the contract if omitted
        #[arg(long)]
        max_in: Option<String>,
    },
    /// Increase the AMM's allowance on a NEP-21 token
    Approve { token: String, amount: String },
}

/// Application configuration loaded from file and environment
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub network: String,
    pub rpc_url: String,
    pub contract_name: String,
    #[serde(default)]
    pub account_id: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            network: "testnet".into(),
            rpc_url: DEFAULT_RPC_URL.into(),
            contract_name: DEFAULT_CONTRACT.into(),
            account_id: None,
        }
    }
}

impl Settings {
    /// Defaults, then the optional file, then `SWAPCTL_*` environment
    /// variables, then command line flags.
    pub fn load(cli: &Cli) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("network", "testnet")?
            .set_default("rpc_url", DEFAULT_RPC_URL)?
            .set_default("contract_name", DEFAULT_CONTRACT)?;
        if let Some(path) = &cli.config {
            builder = builder.add_source(config::File::with_name(path));
        }
        builder = builder.add_source(config::Environment::with_prefix("SWAPCTL"));
        let cfg = builder.build()?;
        let mut settings: Settings = cfg.try_deserialize()?;
        if let Some(url) = &cli.rpc_url {
            settings.rpc_url = url.clone();
        }
        if let Some(contract) = &cli.contract {
            settings.contract_name = contract.clone();
        }
        if let Some(account) = &cli.account {
            settings.account_id = Some(account.clone());
        }
        Ok(settings)
    }
}
