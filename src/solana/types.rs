//! Chain-specific types and error definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

// Re-export RpcConfig from config module to avoid duplication
pub use crate::config::schema::{Commitment, RpcConfig};

/// Lamports in one SOL.
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Number of decimal places representable in lamports.
pub const SOL_DECIMALS: usize = 9;

/// Wrapped SOL mint, used as the default price lookup.
pub const WRAPPED_SOL_MINT: &str = "So11111111111111111111111111111111111111112";

/// An on-chain account identifier.
///
/// Only constructible from a well-formed base58 public key, so holding an
/// `Address` means the input already passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(Pubkey);

impl Address {
    /// Parse an address, failing with [`SolanaError::MalformedAddress`].
    pub fn parse(raw: &str) -> SolanaResult<Self> {
        raw.parse()
    }

    /// The underlying public key.
    pub fn as_pubkey(&self) -> &Pubkey {
        &self.0
    }
}

impl FromStr for Address {
    type Err = SolanaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pubkey::from_str(s)
            .map(Self)
            .map_err(|e| SolanaError::MalformedAddress(format!("'{}': {}", s, e)))
    }
}

impl From<Pubkey> for Address {
    fn from(pubkey: Pubkey) -> Self {
        Self(pubkey)
    }
}

impl From<Address> for Pubkey {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl TryFrom<String> for Address {
    type Error = SolanaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0.to_string()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Native balance of an account.
///
/// Stored in lamports so the value can never be negative; the SOL figure is
/// derived on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Balance {
    lamports: u64,
}

impl Balance {
    pub fn from_lamports(lamports: u64) -> Self {
        Self { lamports }
    }

    /// Balance in lamports.
    pub fn lamports(&self) -> u64 {
        self.lamports
    }

    /// Balance in SOL.
    pub fn sol(&self) -> f64 {
        self.lamports as f64 / LAMPORTS_PER_SOL as f64
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} SOL", self.sol())
    }
}

/// Errors that can occur during Solana and data-service operations.
#[derive(Debug, Error)]
pub enum SolanaError {
    /// Input did not decode to a valid public key. Raised before any network call.
    #[error("Malformed address: {0}")]
    MalformedAddress(String),

    /// Transfer amount was not a positive, representable quantity.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Transport failure, timeout, or non-success status.
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Upstream answered with a payload of the wrong shape.
    #[error("Upstream protocol error: {0}")]
    UpstreamProtocolError(String),

    /// The wallet session could not sign.
    #[error("Signing error: {0}")]
    Signing(String),

    /// A transaction could not be serialized to its wire format.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// A component was constructed from unusable settings. No request was made.
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

/// Result type for Solana operations.
pub type SolanaResult<T> = Result<T, SolanaError>;
