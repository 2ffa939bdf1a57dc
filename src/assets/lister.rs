//! Asset listing over the DAS `getAssetsByOwner` JSON-RPC method.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::assets::types::{AssetPage, DisplayOptions, GetAssetsByOwnerParams};
use crate::config::IndexerConfig;
use crate::observability::metrics;
use crate::resilience::with_deadline;
use crate::solana::types::{Address, SolanaError, SolanaResult};

const METHOD: &str = "getAssetsByOwner";

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a, P> {
    jsonrpc: &'static str,
    id: &'a str,
    method: &'static str,
    params: P,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// Lists the assets held by an account, one page only.
#[derive(Debug, Clone)]
pub struct AssetLister {
    http: reqwest::Client,
    url: String,
    page_size: u32,
    request_id: String,
    timeout_duration: Duration,
}

impl AssetLister {
    /// Create a lister against the configured indexer endpoint.
    ///
    /// `config.url` must be set; use
    /// [`SolanaDemoConfig::resolved_indexer`](crate::config::SolanaDemoConfig::resolved_indexer)
    /// to fall back to the RPC endpoint.
    pub fn new(config: IndexerConfig) -> SolanaResult<Self> {
        let url = config
            .url
            .ok_or_else(|| SolanaError::Configuration("indexer.url is not set".to_string()))?;
        url::Url::parse(&url)
            .map_err(|e| SolanaError::Configuration(format!("indexer.url '{}': {}", url, e)))?;

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| SolanaError::Configuration(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            http,
            url,
            page_size: config.page_size,
            request_id: config.request_id,
            timeout_duration: Duration::from_secs(config.timeout_secs.max(1)),
        })
    }

    /// First page of assets owned by `address`.
    ///
    /// An owner with no assets yields an empty page. Upstream failures are
    /// always errors, never an empty page.
    pub async fn list_assets(&self, address: &str) -> SolanaResult<AssetPage> {
        let start = Instant::now();
        let result = self.fetch(address).await;
        metrics::observe("assets", start, result)
    }

    async fn fetch(&self, address: &str) -> SolanaResult<AssetPage> {
        let owner = Address::parse(address)?;
        let owner_str = owner.to_string();

        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: &self.request_id,
            method: METHOD,
            params: GetAssetsByOwnerParams {
                owner_address: &owner_str,
                page: 1,
                limit: self.page_size,
                display_options: DisplayOptions::ENRICHED,
            },
        };

        let body = with_deadline(METHOD, self.timeout_duration, async {
            let response = self
                .http
                .post(&self.url)
                .json(&request)
                .send()
                .await
                .map_err(|e| SolanaError::UpstreamUnavailable(format!("{} request failed: {}", METHOD, e)))?;

            let status = response.status();
            if !status.is_success() {
                return Err(SolanaError::UpstreamUnavailable(format!(
                    "{} returned HTTP {}",
                    METHOD, status
                )));
            }

            response
                .bytes()
                .await
                .map_err(|e| SolanaError::UpstreamUnavailable(format!("{} body read failed: {}", METHOD, e)))
        })
        .await
        .inspect_err(|e| tracing::warn!(owner = %owner, error = %e, "Asset listing failed"))?;

        let page = decode_page(&body).inspect_err(|e| {
            tracing::warn!(owner = %owner, error = %e, "Asset listing returned bad payload");
        })?;

        tracing::debug!(
            owner = %owner,
            total = page.total,
            items = page.items.len(),
            "Assets listed"
        );
        Ok(page)
    }
}

/// Decode a JSON-RPC envelope carrying an [`AssetPage`].
fn decode_page(body: &[u8]) -> SolanaResult<AssetPage> {
    let envelope: JsonRpcResponse<AssetPage> = serde_json::from_slice(body)
        .map_err(|e| SolanaError::UpstreamProtocolError(format!("{} response: {}", METHOD, e)))?;

    if let Some(err) = envelope.error {
        return Err(SolanaError::UpstreamProtocolError(format!(
            "{} error {}: {}",
            METHOD, err.code, err.message
        )));
    }

    envelope
        .result
        .ok_or_else(|| SolanaError::UpstreamProtocolError(format!("{} response has no result", METHOD)))
}
