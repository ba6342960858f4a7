//! Collaborator seams — external providers implement these.
//!
//! This is the contract between the portfolio core and the outside
//! world (chain RPC subscriptions, price oracle, wallet extension,
//! extrinsic signer). The core never talks to a network itself; it
//! consumes snapshots pushed through these traits.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::{mpsc, watch};

use crate::error::LanternResult;
use crate::types::{Account, ChainId, PriceQuote, RawBalance, TxStatus};

/// Balance subscription feed — one subscription per (addresses, chains)
/// tuple. Emissions may be partial and incremental; each emission is a
/// full replacement snapshot of what the feed knows so far.
#[async_trait]
pub trait BalanceFeed: Send + Sync {
    async fn subscribe(
        &self,
        addresses: &[String],
        chain_ids: &[ChainId],
    ) -> LanternResult<watch::Receiver<Vec<RawBalance>>>;
}

/// Price oracle feed, keyed by token symbol.
#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// Latest quote for one token. `loading` while the oracle warms up.
    async fn unit_price(&self, token: &str) -> LanternResult<PriceQuote>;

    /// Subscribe to the full quote table.
    async fn subscribe(&self) -> LanternResult<watch::Receiver<HashMap<String, PriceQuote>>>;
}

/// Wallet extension / account provider.
#[async_trait]
pub trait AccountProvider: Send + Sync {
    async fn accounts(&self) -> LanternResult<Vec<Account>>;
}

/// Extrinsic signing pipeline. Construction, signing and submission are
/// owned by the chain-client library behind this trait; the core only
/// watches the status stream.
#[async_trait]
pub trait ExtrinsicSigner: Send + Sync {
    /// Sign `call` with `address` and submit it. The returned channel
    /// yields status transitions until the stream closes.
    async fn sign_and_send(
        &self,
        call: &str,
        address: &str,
    ) -> LanternResult<mpsc::Receiver<TxStatus>>;
}
