//! Chain registry — static chain metadata, keyed by chain id.
//!
//! Read-only after construction; there is no mutation API. Lookups for
//! ids the registry does not know fail with `UnknownChain`, which is
//! fatal for that chain's portfolio row and nothing else.

use std::collections::HashMap;

use lantern_common::constants::BUILTIN_CHAINS;
use lantern_common::error::{LanternError, LanternResult};
use lantern_common::types::{Chain, ChainId};

pub struct ChainRegistry {
    chains: HashMap<ChainId, Chain>,
    /// Registration order, for stable iteration.
    order: Vec<ChainId>,
}

impl ChainRegistry {
    /// Registry over the built-in chain table.
    pub fn builtin() -> Self {
        let chains = BUILTIN_CHAINS.iter().map(|(id, name, long, token, decimals, rpcs)| Chain {
            id: ChainId::from(*id),
            name: (*name).to_string(),
            long_name: long.map(str::to_string),
            native_token: token.map(str::to_string),
            token_decimals: *decimals,
            rpcs: rpcs.iter().map(|r| (*r).to_string()).collect(),
        });
        Self::from_chains(chains.collect())
    }

    /// Registry over a caller-supplied chain set. Later duplicates of
    /// the same id replace earlier ones without disturbing the order.
    pub fn from_chains(chains: Vec<Chain>) -> Self {
        let mut map = HashMap::with_capacity(chains.len());
        let mut order = Vec::with_capacity(chains.len());
        for chain in chains {
            if map.insert(chain.id.clone(), chain.clone()).is_none() {
                order.push(chain.id);
            }
        }
        Self { chains: map, order }
    }

    /// Load a registry from a JSON array of chains.
    pub fn from_json(json: &str) -> LanternResult<Self> {
        let chains: Vec<Chain> = serde_json::from_str(json)
            .map_err(|e| LanternError::Config(format!("invalid chain registry: {e}")))?;
        Ok(Self::from_chains(chains))
    }

    /// Look up a chain by id.
    pub fn lookup(&self, id: &ChainId) -> LanternResult<&Chain> {
        self.chains
            .get(id)
            .ok_or_else(|| LanternError::UnknownChain(id.clone()))
    }

    /// Chain ids in registration order.
    pub fn chain_ids(&self) -> &[ChainId] {
        &self.order
    }

    /// All chains in registration order.
    pub fn chains(&self) -> impl Iterator<Item = &Chain> {
        self.order.iter().filter_map(|id| self.chains.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let registry = ChainRegistry::builtin();
        let polkadot = registry.lookup(&ChainId::from("0")).unwrap();
        assert_eq!(polkadot.name, "Polkadot");
        assert_eq!(polkadot.native_token.as_deref(), Some("DOT"));
        assert_eq!(polkadot.token_decimals, Some(10));
    }

    #[test]
    fn test_unknown_chain_is_an_error() {
        let registry = ChainRegistry::builtin();
        let err = registry.lookup(&ChainId::from("9999")).unwrap_err();
        assert!(matches!(
            err,
            LanternError::UnknownChain(id) if id.as_str() == "9999"
        ));
    }

    #[test]
    fn test_iteration_order_is_registration_order() {
        let registry = ChainRegistry::builtin();
        let ids: Vec<&str> = registry.chain_ids().iter().map(ChainId::as_str).collect();
        assert_eq!(&ids[..3], &["0", "2", "1000"]);
    }

    #[test]
    fn test_from_json_roundtrip() {
        let json = r#"[
            {"id": "0", "name": "Polkadot", "long_name": null,
             "native_token": "DOT", "token_decimals": 10}
        ]"#;
        let registry = ChainRegistry::from_json(json).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.lookup(&ChainId::from("0")).is_ok());
        // rpcs defaults to empty
        assert!(registry.lookup(&ChainId::from("0")).unwrap().rpcs.is_empty());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            ChainRegistry::from_json("not json"),
            Err(LanternError::Config(_))
        ));
    }

    #[test]
    fn test_duplicate_id_replaces_without_reordering() {
        let mk = |id: &str, name: &str| Chain {
            id: ChainId::from(id),
            name: name.to_string(),
            long_name: None,
            native_token: None,
            token_decimals: None,
            rpcs: vec![],
        };
        let registry =
            ChainRegistry::from_chains(vec![mk("0", "first"), mk("2", "other"), mk("0", "second")]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.lookup(&ChainId::from("0")).unwrap().name, "second");
        assert_eq!(registry.chain_ids()[0].as_str(), "0");
    }
}
