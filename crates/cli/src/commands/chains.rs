use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::output::{render, OutputFormat};

#[derive(Serialize)]
pub struct ChainsOutput {
    pub chains: Vec<ChainRow>,
}

#[derive(Serialize)]
pub struct ChainRow {
    pub id: String,
    pub name: String,
    pub token: Option<String>,
    pub decimals: Option<u32>,
    /// Number of pinned RPC endpoints.
    pub rpcs: usize,
}

pub fn run(registry: Option<&Path>, fmt: OutputFormat) -> Result<()> {
    let registry = super::load_registry(registry)?;
    let chains = registry
        .chains()
        .map(|c| ChainRow {
            id: c.id.to_string(),
            name: c.name.clone(),
            token: c.native_token.clone(),
            decimals: c.token_decimals,
            rpcs: c.rpcs.len(),
        })
        .collect();
    render(fmt, &ChainsOutput { chains })
}
