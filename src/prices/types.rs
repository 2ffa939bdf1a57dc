//! DexScreener `tokens/v1` pair types.
//!
//! Upstream omits fields freely (new pairs have no liquidity figure, many
//! tokens have no `info` block), so everything past the pair identity is
//! optional.

use serde::{Deserialize, Serialize};

/// Market data for one trading pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub chain_id: String,
    pub dex_id: String,
    pub url: String,
    pub pair_address: String,
    #[serde(default)]
    pub labels: Vec<String>,
    pub base_token: PairToken,
    pub quote_token: PairToken,
    /// Price in units of the quote token, as the decimal string upstream sends.
    #[serde(default)]
    pub price_native: Option<String>,
    /// Price in USD, as the decimal string upstream sends.
    #[serde(default)]
    pub price_usd: Option<String>,
    #[serde(default)]
    pub txns: TxnWindows,
    #[serde(default)]
    pub volume: Windows,
    #[serde(default)]
    pub price_change: Windows,
    #[serde(default)]
    pub liquidity: Option<Liquidity>,
    #[serde(default)]
    pub fdv: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    /// Pair creation time, unix milliseconds.
    #[serde(default)]
    pub pair_created_at: Option<u64>,
    #[serde(default)]
    pub info: Option<PairInfo>,
}

impl PriceQuote {
    /// USD price parsed from its decimal string.
    pub fn price_usd_f64(&self) -> Option<f64> {
        self.price_usd.as_deref().and_then(|p| p.parse().ok())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairToken {
    pub address: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TxnCounts {
    pub buys: u64,
    pub sells: u64,
}

/// Transaction counts per time window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TxnWindows {
    pub m5: Option<TxnCounts>,
    pub h1: Option<TxnCounts>,
    pub h6: Option<TxnCounts>,
    pub h24: Option<TxnCounts>,
}

/// A figure per time window; used for volume and price change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Windows {
    pub m5: Option<f64>,
    pub h1: Option<f64>,
    pub h6: Option<f64>,
    pub h24: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Liquidity {
    pub usd: Option<f64>,
    pub base: Option<f64>,
    pub quote: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PairInfo {
    pub image_url: Option<String>,
    pub header: Option<String>,
    pub open_graph: Option<String>,
    pub websites: Vec<Website>,
    pub socials: Vec<Social>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Website {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Social {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}
