//! Solana demo core: balances, asset listing, token prices and unsigned
//! transfer construction.

pub mod assets;
pub mod config;
pub mod observability;
pub mod prices;
pub mod resilience;
pub mod solana;

pub use assets::{AssetLister, AssetPage, AssetRecord};
pub use config::SolanaDemoConfig;
pub use prices::{PriceFetcher, PriceQuote};
pub use solana::{
    build_transfer, Address, Balance, BalanceReader, KeypairSession, NetworkConnection, RpcConnection,
    SolanaError, SolanaResult, TransferBuilder, UnsignedTransaction, WalletSession,
};
