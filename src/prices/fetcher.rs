//! Token price lookup against the DexScreener multi-token endpoint.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use url::Url;

use crate::config::PriceConfig;
use crate::observability::metrics;
use crate::prices::types::PriceQuote;
use crate::resilience::with_deadline;
use crate::solana::types::{SolanaError, SolanaResult};

/// Fetches market data for a set of token identifiers.
///
/// Every failure collapses to an empty list after a `warn` log; callers
/// cannot tell "no pairs" from "aggregator down".
#[derive(Debug, Clone)]
pub struct PriceFetcher {
    http: reqwest::Client,
    base_url: Url,
    chain_id: String,
    timeout_duration: Duration,
}

impl PriceFetcher {
    pub fn new(config: PriceConfig) -> SolanaResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| SolanaError::Configuration(format!("prices.base_url '{}': {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(SolanaError::Configuration(format!(
                "prices.base_url '{}' cannot carry a path",
                config.base_url
            )));
        }

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| SolanaError::Configuration(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            chain_id: config.chain_id,
            timeout_duration: Duration::from_secs(config.timeout_secs.max(1)),
        })
    }

    /// Market data for every matched pair of `identifiers`.
    ///
    /// Blank and duplicate identifiers are dropped. An empty set returns
    /// without a request; otherwise exactly one request is made.
    pub async fn fetch_prices<I, S>(&self, identifiers: I) -> Vec<PriceQuote>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids = normalize_identifiers(identifiers);
        if ids.is_empty() {
            return Vec::new();
        }

        let start = Instant::now();
        let result = self.request(&ids).await;
        match metrics::observe("prices", start, result) {
            Ok(quotes) => {
                tracing::debug!(requested = ids.len(), pairs = quotes.len(), "Prices fetched");
                quotes
            }
            Err(e) => {
                tracing::warn!(requested = ids.len(), error = %e, "Price lookup failed, returning no quotes");
                Vec::new()
            }
        }
    }

    async fn request(&self, ids: &[String]) -> SolanaResult<Vec<PriceQuote>> {
        let url = self.lookup_url(ids);

        let body = with_deadline("prices", self.timeout_duration, async {
            let response = self
                .http
                .get(url)
                .send()
                .await
                .map_err(|e| SolanaError::UpstreamUnavailable(format!("price request failed: {}", e)))?;

            let status = response.status();
            if !status.is_success() {
                return Err(SolanaError::UpstreamUnavailable(format!(
                    "price aggregator returned HTTP {}",
                    status
                )));
            }

            response
                .bytes()
                .await
                .map_err(|e| SolanaError::UpstreamUnavailable(format!("price body read failed: {}", e)))
        })
        .await?;

        serde_json::from_slice(&body)
            .map_err(|e| SolanaError::UpstreamProtocolError(format!("price response: {}", e)))
    }

    /// `{base}/{chain}/{id1,id2,...}`
    fn lookup_url(&self, ids: &[String]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&self.chain_id).push(&ids.join(","));
        }
        url
    }
}

/// Trim, drop blanks, and dedupe keeping first occurrence order.
pub fn normalize_identifiers<I, S>(identifiers: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    identifiers
        .into_iter()
        .map(|id| id.as_ref().trim().to_string())
        .filter(|id| !id.is_empty())
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solana::types::WRAPPED_SOL_MINT;

    const USDC_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

    #[test]
    fn test_normalize_identifiers() {
        let ids = normalize_identifiers([" id1 ", "", "id2", "id1", "   ", "id3"]);
        assert_eq!(ids, vec!["id1", "id2", "id3"]);

        let empty: Vec<String> = normalize_identifiers(Vec::<String>::new());
        assert!(empty.is_empty());
    }

    #[test]
    fn test_lookup_url() {
        let fetcher = PriceFetcher::new(PriceConfig::default()).unwrap();
        let url = fetcher.lookup_url(&[WRAPPED_SOL_MINT.to_string(), USDC_MINT.to_string()]);
        assert_eq!(
            url.as_str(),
            format!(
                "https://api.dexscreener.com/tokens/v1/solana/{},{}",
                WRAPPED_SOL_MINT, USDC_MINT
            )
        );
    }

    #[test]
    fn test_lookup_url_trailing_slash() {
        let fetcher = PriceFetcher::new(PriceConfig {
            base_url: "http://127.0.0.1:9000/tokens/v1/".to_string(),
            ..PriceConfig::default()
        })
        .unwrap();
        let url = fetcher.lookup_url(&["a".to_string()]);
        assert_eq!(url.path(), "/tokens/v1/solana/a");
    }

    #[test]
    fn test_rejects_unusable_base_url() {
        for base_url in ["not a url", "mailto:prices@example.com"] {
            let config = PriceConfig {
                base_url: base_url.to_string(),
                ..PriceConfig::default()
            };
            let err = PriceFetcher::new(config).unwrap_err();
            assert!(matches!(err, SolanaError::Configuration(_)), "{base_url} should be rejected");
        }
    }

    #[tokio::test]
    async fn test_empty_set_returns_empty() {
        let fetcher = PriceFetcher::new(PriceConfig {
            base_url: "http://127.0.0.1:9/tokens/v1".to_string(),
            ..PriceConfig::default()
        })
        .unwrap();
        assert!(fetcher.fetch_prices(["", "  "]).await.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_aggregator_returns_empty() {
        let fetcher = PriceFetcher::new(PriceConfig {
            base_url: "http://127.0.0.1:9/tokens/v1".to_string(),
            timeout_secs: 2,
            ..PriceConfig::default()
        })
        .unwrap();
        assert!(fetcher.fetch_prices([WRAPPED_SOL_MINT]).await.is_empty());
    }
}
