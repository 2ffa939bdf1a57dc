//! Wallet session: the caller-side signer and broadcaster.
//!
//! The core only produces [`UnsignedTransaction`] values. Signing and
//! broadcast are an explicit two-step protocol driven by the caller through
//! [`WalletSession`].
//!
//! # Security
//! - Keypairs are loaded from a keypair file named by an environment variable
//! - Keys are never logged or serialized

use std::future::Future;
use std::path::Path;

use solana_sdk::signature::Signature;
use solana_sdk::signer::keypair::{read_keypair_file, Keypair};
use solana_sdk::signer::Signer;
use solana_sdk::transaction::Transaction;

use crate::solana::client::RpcConnection;
use crate::solana::transfer::UnsignedTransaction;
use crate::solana::types::{Address, SolanaError, SolanaResult};

/// Environment variable holding the path of a Solana CLI keypair file
/// (JSON array of 64 bytes) for [`KeypairSession::from_env`].
pub const KEYPAIR_ENV_VAR: &str = "SOLANA_DEMO_KEYPAIR";

/// A connected wallet able to sign and broadcast.
pub trait WalletSession {
    /// Currently connected sender address.
    fn address(&self) -> Address;

    /// Sign a transaction built for this session's address.
    fn sign(&self, unsigned: UnsignedTransaction) -> SolanaResult<Transaction>;

    /// Submit a signed transaction. Not idempotent.
    fn broadcast(&self, transaction: &Transaction) -> impl Future<Output = SolanaResult<Signature>> + Send;
}

/// Session backed by a local Ed25519 keypair.
pub struct KeypairSession {
    keypair: Keypair,
    connection: RpcConnection,
}

impl KeypairSession {
    pub fn new(keypair: Keypair, connection: RpcConnection) -> Self {
        tracing::info!(address = %keypair.pubkey(), "Wallet session connected");
        Self { keypair, connection }
    }

    /// Load the keypair from a Solana CLI keypair file.
    pub fn from_file(path: &Path, connection: RpcConnection) -> SolanaResult<Self> {
        let keypair = read_keypair_file(path).map_err(|e| {
            SolanaError::Signing(format!("Failed to read keypair {}: {}", path.display(), e))
        })?;
        Ok(Self::new(keypair, connection))
    }

    /// Load the keypair file whose path is in `SOLANA_DEMO_KEYPAIR`.
    pub fn from_env(connection: RpcConnection) -> SolanaResult<Self> {
        let path = std::env::var(KEYPAIR_ENV_VAR).map_err(|_| {
            SolanaError::Signing(format!("Environment variable {} not set", KEYPAIR_ENV_VAR))
        })?;
        Self::from_file(Path::new(&path), connection)
    }
}

impl WalletSession for KeypairSession {
    fn address(&self) -> Address {
        self.keypair.pubkey().into()
    }

    fn sign(&self, unsigned: UnsignedTransaction) -> SolanaResult<Transaction> {
        let session_key = self.keypair.pubkey();
        if *unsigned.fee_payer().as_pubkey() != session_key {
            return Err(SolanaError::Signing(format!(
                "fee payer {} does not match session address {}",
                unsigned.fee_payer(),
                session_key
            )));
        }

        let blockhash = *unsigned.recent_blockhash();
        let mut transaction = unsigned.into_transaction();
        transaction
            .try_sign(&[&self.keypair], blockhash)
            .map_err(|e| SolanaError::Signing(e.to_string()))?;

        Ok(transaction)
    }

    async fn broadcast(&self, transaction: &Transaction) -> SolanaResult<Signature> {
        let signature = self.connection.send_transaction(transaction).await?;
        tracing::info!(signature = %signature, "Transaction broadcast");
        Ok(signature)
    }
}

impl std::fmt::Debug for KeypairSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeypairSession")
            .field("address", &self.keypair.pubkey())
            .field("connection", &self.connection)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RpcConfig;
    use crate::solana::client::testing::MockConnection;
    use crate::solana::transfer::build_transfer;
    use solana_sdk::hash::Hash;
    use solana_sdk::pubkey::Pubkey;
    use solana_sdk::signer::keypair::write_keypair_file;

    fn test_connection() -> RpcConnection {
        RpcConnection::new(RpcConfig {
            url: "http://127.0.0.1:8899".to_string(),
            ..RpcConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_sign_transfer() {
        let session = KeypairSession::new(Keypair::new(), test_connection());
        let from = session.address().to_string();
        let to = Pubkey::new_unique().to_string();
        let blockhash = Hash::new_unique();

        let unsigned = build_transfer(&MockConnection::new(0, blockhash), &from, &to, 0.01)
            .await
            .unwrap();
        let signed = session.sign(unsigned).unwrap();

        assert!(signed.is_signed());
        assert!(signed.verify().is_ok());
        assert_eq!(signed.message.recent_blockhash, blockhash);
    }

    #[tokio::test]
    async fn test_sign_rejects_foreign_fee_payer() {
        let session = KeypairSession::new(Keypair::new(), test_connection());
        let other = Pubkey::new_unique().to_string();
        let to = Pubkey::new_unique().to_string();

        let unsigned = build_transfer(&MockConnection::new(0, Hash::new_unique()), &other, &to, 0.01)
            .await
            .unwrap();
        let err = session.sign(unsigned).unwrap_err();
        assert!(matches!(err, SolanaError::Signing(_)));
    }

    #[tokio::test]
    async fn test_from_file() {
        let keypair = Keypair::new();
        let path = std::env::temp_dir().join(format!("solana-demo-keypair-{}.json", std::process::id()));
        write_keypair_file(&keypair, &path).unwrap();

        let session = KeypairSession::from_file(&path, test_connection()).unwrap();
        assert_eq!(*session.address().as_pubkey(), keypair.pubkey());
        // Debug output never contains the secret
        assert!(!format!("{:?}", session).contains(&keypair.to_base58_string()));

        std::fs::remove_file(&path).unwrap_or_default();
    }

    #[tokio::test]
    async fn test_from_env_reads_keypair_path() {
        let keypair = Keypair::new();
        let path = std::env::temp_dir().join(format!("solana-demo-env-keypair-{}.json", std::process::id()));
        write_keypair_file(&keypair, &path).unwrap();

        std::env::set_var(KEYPAIR_ENV_VAR, &path);
        let session = KeypairSession::from_env(test_connection()).unwrap();
        assert_eq!(*session.address().as_pubkey(), keypair.pubkey());

        // A base58 secret is not a path
        std::env::set_var(KEYPAIR_ENV_VAR, keypair.to_base58_string());
        let err = KeypairSession::from_env(test_connection()).unwrap_err();
        assert!(err.to_string().contains("Failed to read keypair"));

        std::env::remove_var(KEYPAIR_ENV_VAR);
        let err = KeypairSession::from_env(test_connection()).unwrap_err();
        assert!(err.to_string().contains(KEYPAIR_ENV_VAR));

        std::fs::remove_file(&path).unwrap_or_default();
    }

    #[tokio::test]
    async fn test_missing_keypair_file() {
        let err = KeypairSession::from_file(Path::new("/nonexistent/id.json"), test_connection()).unwrap_err();
        assert!(err.to_string().contains("Failed to read keypair"));
    }
}
