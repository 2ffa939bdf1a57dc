//! Transfer transaction construction.
//!
//! # Responsibilities
//! - Validate sender, recipient and amount before touching the network
//! - Convert SOL to lamports without floating-point drift
//! - Build a single System Program transfer with the sender as fee payer
//! - Attach a freshly fetched blockhash
//!
//! Signing and broadcast belong to the wallet session; nothing here holds keys.

use std::time::Instant;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use solana_sdk::hash::Hash;
use solana_sdk::message::Message;
use solana_sdk::system_instruction;
use solana_sdk::transaction::Transaction;

use crate::observability::metrics;
use crate::solana::client::NetworkConnection;
use crate::solana::types::{Address, SolanaError, SolanaResult, LAMPORTS_PER_SOL, SOL_DECIMALS};

/// The single transfer instruction carried by an [`UnsignedTransaction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferDirective {
    pub from: Address,
    pub to: Address,
    pub lamports: u64,
}

/// A fully built transfer awaiting a signature.
///
/// Inert: it holds no keys and performs no I/O. Hand it to a
/// [`WalletSession`](crate::solana::session::WalletSession) to sign and broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedTransaction {
    fee_payer: Address,
    directive: TransferDirective,
    recent_blockhash: Hash,
    transaction: Transaction,
}

impl UnsignedTransaction {
    /// Account paying the network fee.
    pub fn fee_payer(&self) -> &Address {
        &self.fee_payer
    }

    /// The transfer this transaction performs.
    pub fn directive(&self) -> &TransferDirective {
        &self.directive
    }

    /// Freshness token fetched at construction time.
    pub fn recent_blockhash(&self) -> &Hash {
        &self.recent_blockhash
    }

    /// Wire-ready transaction with empty signatures.
    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn into_transaction(self) -> Transaction {
        self.transaction
    }

    /// Base64 of the bincode wire format.
    pub fn to_base64(&self) -> SolanaResult<String> {
        let bytes = bincode::serialize(&self.transaction)
            .map_err(|e| SolanaError::Encoding(e.to_string()))?;
        Ok(STANDARD.encode(bytes))
    }
}

/// Convert a SOL amount to lamports, truncating toward zero.
///
/// Works on the shortest decimal form of `amount`, so inputs like `0.29`
/// convert to exactly `290_000_000` instead of the binary approximation.
pub fn sol_to_lamports(amount: f64) -> SolanaResult<u64> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(SolanaError::InvalidAmount(format!(
            "{} is not a positive finite quantity",
            amount
        )));
    }

    // f64 Display never uses exponent notation
    let repr = amount.to_string();
    let (whole, fraction) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let mut fraction: String = fraction.chars().take(SOL_DECIMALS).collect();
    while fraction.len() < SOL_DECIMALS {
        fraction.push('0');
    }

    let overflow = || SolanaError::InvalidAmount(format!("{} SOL exceeds the lamport range", amount));
    let whole: u64 = whole.parse().map_err(|_| overflow())?;
    let fraction: u64 = fraction.parse().map_err(|_| overflow())?;
    let lamports = whole
        .checked_mul(LAMPORTS_PER_SOL)
        .and_then(|w| w.checked_add(fraction))
        .ok_or_else(overflow)?;

    if lamports == 0 {
        return Err(SolanaError::InvalidAmount(format!(
            "{} SOL is below one lamport",
            amount
        )));
    }

    Ok(lamports)
}

/// Transaction builder for single-recipient SOL transfers.
pub struct TransferBuilder<C> {
    connection: C,
}

impl<C: NetworkConnection> TransferBuilder<C> {
    pub fn new(connection: C) -> Self {
        Self { connection }
    }

    /// Build an unsigned transfer of `amount` SOL from `from` to `to`.
    ///
    /// Addresses and amount are validated first; the blockhash is fetched
    /// last so it is as fresh as possible. Either a complete transaction is
    /// returned or an error, never a partial one.
    pub async fn build(&self, from: &str, to: &str, amount: f64) -> SolanaResult<UnsignedTransaction> {
        let start = Instant::now();
        let result = self.build_inner(from, to, amount).await;
        metrics::observe("transfer", start, result)
    }

    async fn build_inner(&self, from: &str, to: &str, amount: f64) -> SolanaResult<UnsignedTransaction> {
        let from = Address::parse(from)?;
        let to = Address::parse(to)?;
        let lamports = sol_to_lamports(amount)?;

        let directive = TransferDirective { from, to, lamports };
        let instruction = system_instruction::transfer(from.as_pubkey(), to.as_pubkey(), lamports);
        let mut message = Message::new(&[instruction], Some(from.as_pubkey()));

        let recent_blockhash = self.connection.get_latest_blockhash().await.inspect_err(|e| {
            tracing::warn!(from = %from, to = %to, error = %e, "Failed to fetch blockhash");
        })?;
        message.recent_blockhash = recent_blockhash;

        tracing::info!(
            from = %from,
            to = %to,
            lamports,
            blockhash = %recent_blockhash,
            "Transfer built"
        );

        Ok(UnsignedTransaction {
            fee_payer: from,
            directive,
            recent_blockhash,
            transaction: Transaction::new_unsigned(message),
        })
    }
}

/// Build a transfer over a borrowed connection.
pub async fn build_transfer<C: NetworkConnection>(
    connection: &C,
    from: &str,
    to: &str,
    amount: f64,
) -> SolanaResult<UnsignedTransaction> {
    TransferBuilder::new(connection).build(from, to, amount).await
}
