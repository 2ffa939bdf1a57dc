//! solana-demo command line.
//!
//! ```text
//! solana-demo [--config PATH] balance <ADDRESS>
//! solana-demo [--config PATH] assets <ADDRESS>
//! solana-demo [--config PATH] prices [IDS]
//! solana-demo [--config PATH] transfer [--from ADDR] --to ADDR --amount SOL [--send]
//! ```
//!
//! Each command runs one operation; a failure is reported under that
//! operation's name and does not affect other invocations.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use solana_demo::config::{load_or_default, SolanaDemoConfig};
use solana_demo::observability::logging;
use solana_demo::solana::types::WRAPPED_SOL_MINT;
use solana_demo::{
    AssetLister, BalanceReader, KeypairSession, PriceFetcher, RpcConnection, TransferBuilder, WalletSession,
};

#[derive(Parser)]
#[command(name = "solana-demo")]
#[command(about = "Query balances, assets and prices, and build SOL transfers", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the SOL balance of an account
    Balance { address: String },
    /// List the first page of assets owned by an account
    Assets { address: String },
    /// Look up market data for comma-separated token mints
    Prices {
        #[arg(default_value = WRAPPED_SOL_MINT)]
        ids: String,
    },
    /// Build an unsigned SOL transfer, optionally signing and sending it
    Transfer {
        /// Sender; defaults to the keypair file at the path in SOLANA_DEMO_KEYPAIR
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: String,
        /// Amount in SOL
        #[arg(long)]
        amount: f64,
        /// Sign with the keypair file at the path in SOLANA_DEMO_KEYPAIR and broadcast
        #[arg(long)]
        send: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_or_default(cli.config.as_deref())?;
    logging::init(&config.observability)?;

    tracing::debug!(
        rpc_url = %config.rpc.url,
        indexer_url = %config.indexer_url(),
        "Configuration loaded"
    );

    let (section, result) = match cli.command {
        Commands::Balance { address } => ("balance", balance(&config, &address).await),
        Commands::Assets { address } => ("assets", assets(&config, &address).await),
        Commands::Prices { ids } => ("prices", prices(&config, &ids).await),
        Commands::Transfer { from, to, amount, send } => {
            ("transfer", transfer(&config, from, &to, amount, send).await)
        }
    };

    if let Err(e) = result {
        eprintln!("Error ({}): {}", section, e);
        std::process::exit(1);
    }

    Ok(())
}

async fn balance(config: &SolanaDemoConfig, address: &str) -> Result<(), Box<dyn std::error::Error>> {
    let reader = BalanceReader::from_config(config.rpc.clone())?;
    let balance = reader.get_balance(address).await?;
    println!("Balance: {:.4} SOL", balance.sol());
    Ok(())
}

async fn assets(config: &SolanaDemoConfig, address: &str) -> Result<(), Box<dyn std::error::Error>> {
    let lister = AssetLister::new(config.resolved_indexer())?;
    let page = lister.list_assets(address).await?;

    println!("Found {} asset(s)", page.total);
    if let Some(native) = &page.native_balance {
        println!("Native balance: {} lamports", native.lamports);
    }
    for asset in &page.items {
        println!(
            "{}  {:<16} {}",
            asset.id,
            asset.interface,
            asset.name().unwrap_or("Unnamed")
        );
    }
    if page.is_truncated() {
        println!("(showing page {} of a larger set)", page.page);
    }
    Ok(())
}

async fn prices(config: &SolanaDemoConfig, ids: &str) -> Result<(), Box<dyn std::error::Error>> {
    let fetcher = PriceFetcher::new(config.prices.clone())?;
    let quotes = fetcher.fetch_prices(ids.split(',')).await;

    println!("Found {} price(s)", quotes.len());
    println!("{}", serde_json::to_string_pretty(&quotes)?);
    Ok(())
}

async fn transfer(
    config: &SolanaDemoConfig,
    from: Option<String>,
    to: &str,
    amount: f64,
    send: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let connection = RpcConnection::new(config.rpc.clone())?;

    let session = if send || from.is_none() {
        Some(KeypairSession::from_env(connection.clone())?)
    } else {
        None
    };
    let from = match (from, &session) {
        (Some(from), _) => from,
        (None, Some(session)) => session.address().to_string(),
        (None, None) => return Err("--from is required without a keypair".into()),
    };

    let unsigned = TransferBuilder::new(&connection).build(&from, to, amount).await?;
    println!("Fee payer: {}", unsigned.fee_payer());
    println!("Lamports: {}", unsigned.directive().lamports);
    println!("Blockhash: {}", unsigned.recent_blockhash());
    println!("Transaction (base64): {}", unsigned.to_base64()?);

    if let (true, Some(session)) = (send, &session) {
        let signed = session.sign(unsigned)?;
        let signature = session.broadcast(&signed).await?;
        println!("Signature: {}", signature);
    }
    Ok(())
}
