//! Solana integration subsystem.
//!
//! # Data Flow
//! ```text
//! Config (RPC URL, commitment, timeout)
//!     → client.rs (RPC connection with deadlines)
//!     → balance.rs (lamports → SOL)
//!     → transfer.rs (validate → build → attach blockhash)
//!     → session.rs (caller side: sign, broadcast)
//! ```
//!
//! # Security Constraints
//! - The core never holds keys; only the wallet session signs
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod balance;
pub mod client;
pub mod session;
pub mod transfer;
pub mod types;

pub use balance::BalanceReader;
pub use client::{NetworkConnection, RpcConnection};
pub use session::{KeypairSession, WalletSession};
pub use transfer::{build_transfer, sol_to_lamports, TransferBuilder, TransferDirective, UnsignedTransaction};
pub use types::{Address, Balance, SolanaError, SolanaResult, LAMPORTS_PER_SOL, WRAPPED_SOL_MINT};
