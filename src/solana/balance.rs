//! Native balance queries.

use std::time::Instant;

use crate::observability::metrics;
use crate::solana::client::{NetworkConnection, RpcConnection};
use crate::solana::types::{Address, Balance, RpcConfig, SolanaResult};

/// Reads the SOL balance of an account.
#[derive(Debug, Clone)]
pub struct BalanceReader<C> {
    connection: C,
}

impl BalanceReader<RpcConnection> {
    /// Open a reader against the configured RPC endpoint.
    pub fn from_config(config: RpcConfig) -> SolanaResult<Self> {
        Ok(Self::new(RpcConnection::new(config)?))
    }
}

impl<C: NetworkConnection> BalanceReader<C> {
    pub fn new(connection: C) -> Self {
        Self { connection }
    }

    /// Get the balance of `address`.
    ///
    /// The address is validated before any request is made. Upstream failures
    /// are returned as errors, never as a zero balance.
    pub async fn get_balance(&self, address: &str) -> SolanaResult<Balance> {
        let start = Instant::now();
        let result = self.fetch(address).await;
        metrics::observe("balance", start, result)
    }

    async fn fetch(&self, address: &str) -> SolanaResult<Balance> {
        let address = Address::parse(address)?;
        let lamports = self.connection.get_balance(&address).await.inspect_err(|e| {
            tracing::warn!(address = %address, error = %e, "Balance query failed");
        })?;

        let balance = Balance::from_lamports(lamports);
        tracing::debug!(address = %address, lamports, "Balance fetched");
        Ok(balance)
    }
}
