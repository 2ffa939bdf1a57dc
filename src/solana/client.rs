//! Solana RPC connection with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to the configured JSON-RPC endpoint
//! - Query chain state (balances, latest blockhash)
//! - Broadcast signed transactions for the wallet session
//! - Classify transport and protocol failures

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use solana_client::client_error::{ClientError, ClientErrorKind};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_request::RpcError;
use solana_sdk::hash::Hash;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;

use crate::resilience::with_deadline;
use crate::solana::types::{Address, RpcConfig, SolanaError, SolanaResult};

/// Network connection handle injected into the balance reader and transfer builder.
///
/// Implementations must be safe for concurrent independent use; every call is
/// a stateless request.
pub trait NetworkConnection: Send + Sync {
    /// Balance of `address` in lamports.
    fn get_balance(&self, address: &Address) -> impl Future<Output = SolanaResult<u64>> + Send;

    /// Most recent blockhash, used as the transaction freshness token.
    fn get_latest_blockhash(&self) -> impl Future<Output = SolanaResult<Hash>> + Send;
}

impl<T: NetworkConnection> NetworkConnection for &T {
    fn get_balance(&self, address: &Address) -> impl Future<Output = SolanaResult<u64>> + Send {
        (**self).get_balance(address)
    }

    fn get_latest_blockhash(&self) -> impl Future<Output = SolanaResult<Hash>> + Send {
        (**self).get_latest_blockhash()
    }
}

/// RPC-backed connection to a Solana cluster.
#[derive(Clone)]
pub struct RpcConnection {
    client: Arc<RpcClient>,
    config: RpcConfig,
    timeout_duration: Duration,
}

impl RpcConnection {
    /// Create a connection for the configured endpoint.
    ///
    /// No request is made until the first call.
    pub fn new(config: RpcConfig) -> SolanaResult<Self> {
        url::Url::parse(&config.url).map_err(|e| {
            SolanaError::Configuration(format!("rpc.url '{}': {}", config.url, e))
        })?;
        let timeout_duration = Duration::from_secs(config.timeout_secs.max(1));

        let client = RpcClient::new_with_timeout_and_commitment(
            config.url.clone(),
            timeout_duration,
            config.commitment.into(),
        );

        tracing::debug!(
            rpc_url = %config.url,
            commitment = ?config.commitment,
            "RPC connection created"
        );

        Ok(Self {
            client: Arc::new(client),
            config,
            timeout_duration,
        })
    }

    /// Broadcast a signed transaction.
    pub async fn send_transaction(&self, transaction: &Transaction) -> SolanaResult<Signature> {
        with_deadline("sendTransaction", self.timeout_duration, async {
            self.client
                .send_transaction(transaction)
                .await
                .map_err(classify_client_error)
        })
        .await
    }

    /// Get the configuration.
    pub fn config(&self) -> &RpcConfig {
        &self.config
    }
}

impl NetworkConnection for RpcConnection {
    async fn get_balance(&self, address: &Address) -> SolanaResult<u64> {
        with_deadline("getBalance", self.timeout_duration, async {
            self.client
                .get_balance(address.as_pubkey())
                .await
                .map_err(classify_client_error)
        })
        .await
    }

    async fn get_latest_blockhash(&self) -> SolanaResult<Hash> {
        with_deadline("getLatestBlockhash", self.timeout_duration, async {
            self.client
                .get_latest_blockhash()
                .await
                .map_err(classify_client_error)
        })
        .await
    }
}

impl std::fmt::Debug for RpcConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcConnection")
            .field("rpc_url", &self.config.url)
            .field("commitment", &self.config.commitment)
            .field("timeout_secs", &self.config.timeout_secs)
            .finish()
    }
}

/// Map a client error onto the error taxonomy.
///
/// Malformed or error JSON-RPC replies mean the node answered; everything
/// else is treated as the call not completing. A body reqwest could not
/// decode as JSON also counts as an answer.
fn classify_client_error(error: ClientError) -> SolanaError {
    match error.kind() {
        ClientErrorKind::Reqwest(e) if e.is_decode() => SolanaError::UpstreamProtocolError(error.to_string()),
        ClientErrorKind::SerdeJson(_)
        | ClientErrorKind::RpcError(RpcError::RpcResponseError { .. })
        | ClientErrorKind::RpcError(RpcError::ParseError(_)) => {
            SolanaError::UpstreamProtocolError(error.to_string())
        }
        _ => SolanaError::UpstreamUnavailable(error.to_string()),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Commitment;

    fn test_config() -> RpcConfig {
        RpcConfig {
            url: "http://127.0.0.1:8899".to_string(),
            commitment: Commitment::Confirmed,
            timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn test_connection_creation() {
        let connection = RpcConnection::new(test_config()).unwrap();
        assert_eq!(connection.config().url, "http://127.0.0.1:8899");
        assert!(format!("{:?}", connection).contains("127.0.0.1:8899"));
    }

    #[test]
    fn test_invalid_url() {
        let mut config = test_config();
        config.url = "not a url".to_string();
        let err = RpcConnection::new(config).unwrap_err();
        assert!(matches!(err, SolanaError::Configuration(_)));
        assert!(err.to_string().contains("rpc.url"));
    }

    #[test]
    fn test_error_classification() {
        let err = classify_client_error(ClientErrorKind::Custom("connection reset".into()).into());
        assert!(matches!(err, SolanaError::UpstreamUnavailable(_)));

        let serde_err = serde_json::from_str::<u64>("nope").unwrap_err();
        let err = classify_client_error(ClientErrorKind::SerdeJson(serde_err).into());
        assert!(matches!(err, SolanaError::UpstreamProtocolError(_)));

        let err = classify_client_error(
            ClientErrorKind::RpcError(RpcError::ParseError("bad balance".into())).into(),
        );
        assert!(matches!(err, SolanaError::UpstreamProtocolError(_)));

        // Wrapped request failures (e.g. the cluster version query) did not complete
        let err = classify_client_error(
            ClientErrorKind::RpcError(RpcError::RpcRequestError("cluster version query failed".into())).into(),
        );
        assert!(matches!(err, SolanaError::UpstreamUnavailable(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        let mut config = test_config();
        // Port 9 (discard) is closed on test machines
        config.url = "http://127.0.0.1:9".to_string();
        config.timeout_secs = 2;
        let connection = RpcConnection::new(config).unwrap();

        let err = connection.get_latest_blockhash().await.unwrap_err();
        assert!(matches!(err, SolanaError::UpstreamUnavailable(_)));
    }
}
