//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the demo
//! client. All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use solana_sdk::commitment_config::CommitmentConfig;

/// Root configuration shared by every operation.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SolanaDemoConfig {
    /// Solana JSON-RPC endpoint used for balances and blockhashes.
    pub rpc: RpcConfig,

    /// DAS indexing service used for asset listing.
    pub indexer: IndexerConfig,

    /// Price aggregator settings.
    pub prices: PriceConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl SolanaDemoConfig {
    /// Indexer endpoint, falling back to the RPC endpoint when unset.
    pub fn indexer_url(&self) -> &str {
        self.indexer.url.as_deref().unwrap_or(&self.rpc.url)
    }

    /// Indexer section with the endpoint fallback applied.
    pub fn resolved_indexer(&self) -> IndexerConfig {
        IndexerConfig {
            url: Some(self.indexer_url().to_string()),
            ..self.indexer.clone()
        }
    }
}

/// Commitment level for RPC reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

impl From<Commitment> for CommitmentConfig {
    fn from(commitment: Commitment) -> Self {
        match commitment {
            Commitment::Processed => CommitmentConfig::processed(),
            Commitment::Confirmed => CommitmentConfig::confirmed(),
            Commitment::Finalized => CommitmentConfig::finalized(),
        }
    }
}

/// Solana RPC configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RpcConfig {
    /// JSON-RPC endpoint URL.
    pub url: String,

    /// Commitment level for reads.
    pub commitment: Commitment,

    /// RPC request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: "https://api.mainnet-beta.solana.com".to_string(),
            commitment: Commitment::Confirmed,
            timeout_secs: 10,
        }
    }
}

/// DAS indexer configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IndexerConfig {
    /// Indexer endpoint. Defaults to the RPC endpoint (Helius serves both).
    pub url: Option<String>,

    /// Page size for `getAssetsByOwner`. Only the first page is fetched.
    pub page_size: u32,

    /// JSON-RPC request id.
    pub request_id: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            url: None,
            page_size: 1000,
            request_id: "solana-demo".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Price aggregator configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PriceConfig {
    /// Base URL of the multi-token endpoint.
    pub base_url: String,

    /// Chain identifier inserted into the request path.
    pub chain_id: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.dexscreener.com/tokens/v1".to_string(),
            chain_id: "solana".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}
