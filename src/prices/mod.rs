//! Token prices from a third-party market data aggregator.

pub mod fetcher;
pub mod types;

pub use fetcher::{normalize_identifiers, PriceFetcher};
pub use types::{Liquidity, PairInfo, PairToken, PriceQuote, TxnCounts, TxnWindows, Windows};
