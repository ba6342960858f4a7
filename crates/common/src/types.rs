//! Universal types shared across the portfolio engine.
//!
//! The balance feed reports raw chain data in these types; everything
//! downstream (index, aggregator, CLI, any future frontend) consumes
//! only these — never feed-specific structs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Chain identifier — the relay/parachain id as a string (`"0"` is the
/// Polkadot relay, `"2"` Kusama, `"2007"` Shiden, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(pub String);

impl ChainId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ChainId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Static chain metadata. Immutable once the registry is loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chain {
    pub id: ChainId,
    pub name: String,
    pub long_name: Option<String>,
    /// Native token symbol. Absent for chains that have not published one.
    pub native_token: Option<String>,
    /// Decimals of the native token. Normalization is withheld until known.
    pub token_decimals: Option<u32>,
    /// RPC endpoints, passed through unmodified to the balance feed.
    #[serde(default)]
    pub rpcs: Vec<String>,
}

/// Account key flavour, as reported by the extension/account provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Sr25519,
    Ethereum,
}

/// A wallet account from the account provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub address: String,
    pub kind: AccountKind,
}

/// A raw on-chain balance in the smallest unit ("planck"-style integer).
///
/// Owned by the subscription feed. Partial sets are normal — chains and
/// addresses the feed has not reported yet are simply missing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawBalance {
    pub chain_id: ChainId,
    pub address: String,
    /// Free balance in the smallest unit.
    pub free: u128,
}

/// A balance normalized to whole tokens (`free / 10^decimals`).
///
/// Only constructed once the chain's decimals are known; a missing
/// `TokenBalance` means "not yet known", never zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBalance {
    pub chain_id: ChainId,
    pub address: String,
    pub free: u128,
    pub tokens: Decimal,
}

/// A token balance with its fiat value attached (`tokens × unit price`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedBalance {
    pub chain_id: ChainId,
    pub address: String,
    pub free: u128,
    pub tokens: Decimal,
    pub fiat: Decimal,
}

/// A unit-price quote from the price feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceQuote {
    pub price: Option<Decimal>,
    pub loading: bool,
}

impl PriceQuote {
    /// A quote that is still loading — attaches to nothing.
    pub fn loading() -> Self {
        Self { price: None, loading: true }
    }

    /// A settled quote.
    pub fn ready(price: Decimal) -> Self {
        Self { price: Some(price), loading: false }
    }
}

/// Token and fiat totals. `None` means "nothing to report yet" —
/// semantically distinct from `Some(0)`, a confirmed zero balance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioTotal {
    pub tokens: Option<Decimal>,
    pub fiat: Option<Decimal>,
}

/// One per-chain row of the portfolio view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainTotal {
    pub chain_id: ChainId,
    /// Native token symbol, if the registry knows it.
    pub symbol: Option<String>,
    pub total: PortfolioTotal,
}

/// A full portfolio computation: per-chain rows in the caller's chain
/// order, overall totals, and the chains whose rows failed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    pub chains: Vec<ChainTotal>,
    pub total: PortfolioTotal,
    /// Chains excluded from this snapshot, with the failure message.
    /// A failed chain never aborts the others.
    pub failed: Vec<(ChainId, String)>,
}

/// A stakeable destination associated with a stake position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeTarget {
    /// Contract/dapp identifier on chain.
    pub id: String,
    pub name: Option<String>,
}

/// Transaction status reported by the external signer's status stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "status", content = "detail")]
pub enum TxStatus {
    Broadcast,
    InBlock,
    Finalized,
    Failed(String),
}
