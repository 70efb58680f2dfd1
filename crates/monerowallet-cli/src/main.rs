use clap::{Parser, Subcommand};
use monerowallet::{KeyType, RpcConfig, TransferType};
use std::time::Duration;

mod commands;

/// Monero wallet RPC command-line interface.
#[derive(Parser)]
#[command(name = "monerowallet-cli")]
#[command(about = "Talk to a running monero-wallet-rpc server")]
#[command(version)]
struct Cli {
    /// URL scheme (http or https).
    #[arg(long, env = "MONEROWALLET_SCHEME", default_value = "http")]
    scheme: String,

    /// Wallet RPC host.
    #[arg(long, env = "MONEROWALLET_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Wallet RPC port.
    #[arg(long, env = "MONEROWALLET_PORT", default_value = "18082")]
    port: u16,

    /// JSON-RPC path.
    #[arg(long, env = "MONEROWALLET_PATH", default_value = "/json_rpc")]
    path: String,

    /// Request timeout in seconds (HTTP client default when unset).
    #[arg(long, env = "MONEROWALLET_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show wallet balance.
    Balance {
        /// Account index (server default when omitted).
        #[arg(long)]
        account: Option<u32>,
    },

    /// Show wallet address(es).
    Address {
        #[arg(long)]
        account: Option<u32>,
    },

    /// Show the wallet's block height.
    Height,

    /// Transfer funds to an address.
    Transfer {
        /// Destination address.
        #[arg(long)]
        address: String,

        /// Amount in atomic units.
        #[arg(long)]
        amount: u64,

        /// Source account.
        #[arg(long)]
        account: Option<u32>,

        /// Fee priority (0-3).
        #[arg(long)]
        priority: Option<u32>,

        /// Build the transaction without broadcasting it.
        #[arg(long)]
        do_not_relay: bool,
    },

    /// Sweep unmixable dust outputs.
    SweepDust {
        #[arg(long)]
        account: Option<u32>,
    },

    /// Send the whole unlocked balance to an address.
    SweepAll {
        #[arg(long)]
        address: String,

        #[arg(long)]
        account: Option<u32>,

        /// Only sweep outputs below this amount (0 = all).
        #[arg(long, default_value = "0")]
        below_amount: u64,

        #[arg(long)]
        do_not_relay: bool,
    },

    /// Save the wallet file.
    Store,

    /// Show payments for one or more payment ids.
    Payments {
        /// Payment ids.
        #[arg(required = true)]
        payment_ids: Vec<String>,

        /// Lowest block height to search (bulk lookup only).
        #[arg(long, default_value = "0")]
        min_block_height: u64,
    },

    /// Show one transfer by transaction id.
    Tx {
        txid: String,

        #[arg(long)]
        account: Option<u32>,
    },

    /// Show transfer history (all categories).
    History {
        #[arg(long)]
        account: Option<u32>,
    },

    /// List incoming outputs.
    Incoming {
        /// all, available or unavailable.
        #[arg(long, default_value = "all")]
        transfer_type: TransferType,

        #[arg(long)]
        account: Option<u32>,
    },

    /// Export the mnemonic seed or a private key.
    QueryKey {
        /// mnemonic, view_key or spend_key.
        #[arg(long, default_value = "mnemonic")]
        key_type: KeyType,
    },

    /// Build an integrated address (random payment id when omitted).
    MakeIntegrated {
        #[arg(long, default_value = "")]
        payment_id: String,
    },

    /// Split an integrated address into address and payment id.
    SplitIntegrated { integrated_address: String },

    /// Create a new wallet file on the server.
    CreateWallet {
        filename: String,

        #[arg(long, default_value = "English")]
        language: String,
    },

    /// Open a wallet file on the server.
    OpenWallet { filename: String },

    /// List accounts.
    Accounts,

    /// Create an account.
    CreateAccount {
        #[arg(long)]
        label: Option<String>,
    },

    /// Create a subaddress.
    CreateAddress {
        #[arg(long)]
        account: Option<u32>,

        #[arg(long)]
        label: Option<String>,
    },

    /// Store the wallet and stop the server.
    Stop,

    /// Call any method with JSON params.
    Call {
        method: String,

        /// Params object as JSON.
        #[arg(default_value = "{}")]
        params: String,
    },
}

/// Application context shared across commands.
pub struct AppContext {
    config: RpcConfig,
}

impl AppContext {
    fn from_cli(cli: &Cli) -> Self {
        let mut config = RpcConfig::default()
            .with_scheme(&cli.scheme)
            .with_host(&cli.host)
            .with_port(cli.port)
            .with_path(&cli.path);
        if let Some(secs) = cli.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Self { config }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let ctx = AppContext::from_cli(&cli);
    log::debug!("wallet endpoint {}", ctx.config.url());

    let result = match cli.command {
        Commands::Balance { account } => commands::show_balance(&ctx, account),
        Commands::Address { account } => commands::show_address(&ctx, account),
        Commands::Height => commands::show_height(&ctx),
        Commands::Transfer {
            address,
            amount,
            account,
            priority,
            do_not_relay,
        } => commands::transfer(&ctx, &address, amount, account, priority, do_not_relay),
        Commands::SweepDust { account } => commands::sweep_dust(&ctx, account),
        Commands::SweepAll {
            address,
            account,
            below_amount,
            do_not_relay,
        } => commands::sweep_all(&ctx, &address, account, below_amount, do_not_relay),
        Commands::Store => commands::store(&ctx),
        Commands::Payments {
            payment_ids,
            min_block_height,
        } => commands::show_payments(&ctx, &payment_ids, min_block_height),
        Commands::Tx { txid, account } => commands::show_transfer(&ctx, &txid, account),
        Commands::History { account } => commands::show_history(&ctx, account),
        Commands::Incoming {
            transfer_type,
            account,
        } => commands::show_incoming(&ctx, transfer_type, account),
        Commands::QueryKey { key_type } => commands::query_key(&ctx, key_type),
        Commands::MakeIntegrated { payment_id } => {
            commands::make_integrated_address(&ctx, &payment_id)
        }
        Commands::SplitIntegrated { integrated_address } => {
            commands::split_integrated_address(&ctx, &integrated_address)
        }
        Commands::CreateWallet { filename, language } => {
            commands::create_wallet(&ctx, &filename, &language)
        }
        Commands::OpenWallet { filename } => commands::open_wallet(&ctx, &filename),
        Commands::Accounts => commands::show_accounts(&ctx),
        Commands::CreateAccount { label } => commands::create_account(&ctx, label.as_deref()),
        Commands::CreateAddress { account, label } => {
            commands::create_address(&ctx, account, label.as_deref())
        }
        Commands::Stop => commands::stop_wallet(&ctx),
        Commands::Call { method, params } => commands::raw_call(&ctx, &method, &params),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
