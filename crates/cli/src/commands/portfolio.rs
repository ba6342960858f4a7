use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use lantern_common::types::{PortfolioSnapshot, PriceQuote, RawBalance};
use lantern_core::aggregate::{self, AddressSet};

use crate::output::{render, OutputFormat};

/// On-disk feed snapshot: what the balance and price feeds last
/// reported, plus the wallet's tracked addresses.
#[derive(Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    balances: Vec<RawBalance>,
    /// Unit prices keyed by token symbol.
    #[serde(default)]
    prices: HashMap<String, PriceQuote>,
    /// Tracked addresses; `--address` flags override these.
    #[serde(default)]
    addresses: Vec<String>,
}

#[derive(Serialize)]
pub struct PortfolioOutput {
    pub chains: Vec<PortfolioRow>,
    pub total_tokens: Option<String>,
    pub total_fiat: Option<String>,
    pub failed: Vec<(String, String)>,
}

#[derive(Serialize)]
pub struct PortfolioRow {
    pub chain_id: String,
    pub symbol: Option<String>,
    pub tokens: Option<String>,
    pub fiat: Option<String>,
}

impl From<PortfolioSnapshot> for PortfolioOutput {
    fn from(snapshot: PortfolioSnapshot) -> Self {
        Self {
            chains: snapshot
                .chains
                .into_iter()
                .map(|row| PortfolioRow {
                    chain_id: row.chain_id.to_string(),
                    symbol: row.symbol,
                    tokens: row.total.tokens.map(|t| t.to_string()),
                    fiat: row.total.fiat.map(|f| f.to_string()),
                })
                .collect(),
            total_tokens: snapshot.total.tokens.map(|t| t.to_string()),
            total_fiat: snapshot.total.fiat.map(|f| f.to_string()),
            failed: snapshot
                .failed
                .into_iter()
                .map(|(id, reason)| (id.to_string(), reason))
                .collect(),
        }
    }
}

pub fn run(
    snapshot: &Path,
    addresses: &[String],
    registry: Option<&Path>,
    fmt: OutputFormat,
) -> Result<()> {
    let registry = super::load_registry(registry)?;

    let json = std::fs::read_to_string(snapshot)
        .with_context(|| format!("reading snapshot {}", snapshot.display()))?;
    let file: SnapshotFile =
        serde_json::from_str(&json).context("invalid snapshot JSON")?;

    let tracked: AddressSet = if addresses.is_empty() {
        file.addresses.iter().cloned().collect()
    } else {
        addresses.iter().cloned().collect()
    };
    if tracked.is_empty() {
        bail!("No tracked addresses. Pass --address or add an `addresses` array to the snapshot.");
    }

    let result = aggregate::portfolio_totals(
        &registry,
        registry.chain_ids(),
        &file.balances,
        &file.prices,
        &tracked,
    );
    render(fmt, &PortfolioOutput::from(result))
}
