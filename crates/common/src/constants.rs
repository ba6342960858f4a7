//! Built-in chain table and default RPC endpoints.
//!
//! Covers the relay chains and parachains the wallet tracks out of the
//! box. Endpoint lists may be empty — the feed falls back to its own
//! defaults for those chains.

/// One row of the built-in chain table:
/// (id, name, long name, native token, decimals, default RPCs).
pub type ChainRow = (
    &'static str,
    &'static str,
    Option<&'static str>,
    Option<&'static str>,
    Option<u32>,
    &'static [&'static str],
);

/// Basilisk is the only chain we pin endpoints for by default.
pub const BASILISK_RPCS: &[&str] = &[
    "wss://basilisk.api.onfinality.io/public-ws",
    "wss://rpc-01.basilisk.hydradx.io",
];

/// The built-in chain set, in display order.
pub const BUILTIN_CHAINS: &[ChainRow] = &[
    ("0", "Polkadot", Some("Polkadot Relay Chain"), Some("DOT"), Some(10), &[]),
    ("2", "Kusama", Some("Kusama Relay Chain"), Some("KSM"), Some(12), &[]),
    ("1000", "Statemine", None, Some("KSM"), Some(12), &[]),
    ("2000", "Karura", None, Some("KAR"), Some(12), &[]),
    ("2001", "Bifrost", None, Some("BNC"), Some(12), &[]),
    ("2004", "Khala", None, Some("PHA"), Some(12), &[]),
    ("2007", "Shiden", None, Some("SDN"), Some(18), &[]),
    ("2023", "Moonriver", None, Some("MOVR"), Some(18), &[]),
    ("2084", "Calamari", None, Some("KMA"), Some(12), &[]),
    ("2086", "KILT Spiritnet", None, Some("KILT"), Some(15), &[]),
    ("2090", "Basilisk", None, Some("BSX"), Some(12), BASILISK_RPCS),
];
