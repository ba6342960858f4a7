//! Reactive portfolio engine — recomputes totals whenever a feed
//! pushes a new snapshot.
//!
//! The engine owns read-only snapshots of the registry, the requested
//! chain set, and the tracked addresses; feeds push through
//! `tokio::sync::watch`, which is inherently last-write-wins — a
//! recompute always starts from the latest emission and stale
//! intermediate emissions are never queued. Dropping every snapshot
//! subscriber ends the loop; derivations are pure, so there is nothing
//! to clean up.

use std::collections::HashMap;

use tokio::sync::watch;
use tracing::{debug, info};

use lantern_common::error::LanternResult;
use lantern_common::traits::{AccountProvider, BalanceFeed, PriceFeed};
use lantern_common::types::{ChainId, PortfolioSnapshot, PriceQuote, RawBalance};

use crate::aggregate::{self, AddressSet};
use crate::memo::MemoCell;
use crate::registry::ChainRegistry;

pub struct PortfolioEngine {
    registry: ChainRegistry,
    chain_ids: Vec<ChainId>,
    tracked: AddressSet,
    tx: watch::Sender<PortfolioSnapshot>,
    rx: watch::Receiver<PortfolioSnapshot>,
}

impl PortfolioEngine {
    /// Build an engine over every chain the registry knows.
    pub fn new(registry: ChainRegistry, tracked: AddressSet) -> Self {
        let chain_ids = registry.chain_ids().to_vec();
        Self::with_chains(registry, chain_ids, tracked)
    }

    /// Build an engine tracking every address the wallet reports.
    pub async fn from_provider(
        registry: ChainRegistry,
        provider: &dyn AccountProvider,
    ) -> LanternResult<Self> {
        let accounts = provider.accounts().await?;
        let tracked = accounts.into_iter().map(|a| a.address).collect();
        Ok(Self::new(registry, tracked))
    }

    /// Build an engine over an explicit chain subset.
    pub fn with_chains(
        registry: ChainRegistry,
        chain_ids: Vec<ChainId>,
        tracked: AddressSet,
    ) -> Self {
        let (tx, rx) = watch::channel(PortfolioSnapshot::default());
        info!(
            chains = chain_ids.len(),
            tracked = tracked.len(),
            "portfolio engine ready"
        );
        Self { registry, chain_ids, tracked, tx, rx }
    }

    /// Subscribe to recomputed snapshots. May be called any number of
    /// times before `run`.
    pub fn subscribe(&self) -> watch::Receiver<PortfolioSnapshot> {
        self.rx.clone()
    }

    /// One pure recomputation from feed snapshots. Exposed for callers
    /// that hold their own data (the CLI's offline snapshot path).
    pub fn compute(
        &self,
        balances: &[RawBalance],
        prices: &HashMap<String, PriceQuote>,
    ) -> PortfolioSnapshot {
        aggregate::portfolio_totals(&self.registry, &self.chain_ids, balances, prices, &self.tracked)
    }

    /// Subscribe to both feeds for the tracked addresses and drive the
    /// engine until either feed closes or every subscriber is dropped.
    pub async fn run_with_feeds(
        self,
        balance_feed: &dyn BalanceFeed,
        price_feed: &dyn PriceFeed,
    ) -> LanternResult<()> {
        let mut addresses: Vec<String> = self.tracked.iter().cloned().collect();
        addresses.sort();
        let balances = balance_feed.subscribe(&addresses, &self.chain_ids).await?;
        let prices = price_feed.subscribe().await?;
        self.run(balances, prices).await;
        Ok(())
    }

    /// Drive the engine until either feed closes or every subscriber
    /// is dropped; a closed feed means its provider is gone and the
    /// snapshot could only go stale. Each pass recomputes from the
    /// latest feed snapshots; the memo cell skips the recompute when
    /// neither input changed.
    pub async fn run(
        self,
        mut balances: watch::Receiver<Vec<RawBalance>>,
        mut prices: watch::Receiver<HashMap<String, PriceQuote>>,
    ) {
        let Self { registry, chain_ids, tracked, tx, rx } = self;
        // The engine's own handle must not keep the loop alive.
        drop(rx);

        let mut memo: MemoCell<PortfolioSnapshot> = MemoCell::new();
        loop {
            let balance_snapshot = balances.borrow_and_update().clone();
            let price_snapshot = prices.borrow_and_update().clone();

            // HashMap iteration order is unstable; key on sorted pairs.
            let mut price_key: Vec<(String, PriceQuote)> =
                price_snapshot.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
            price_key.sort_by(|a, b| a.0.cmp(&b.0));

            let snapshot = memo.get_or_compute(&(&balance_snapshot, &price_key), |_| {
                aggregate::portfolio_totals(
                    &registry,
                    &chain_ids,
                    &balance_snapshot,
                    &price_snapshot,
                    &tracked,
                )
            });
            debug!(
                chains = snapshot.chains.len(),
                failed = snapshot.failed.len(),
                "portfolio snapshot recomputed"
            );
            if tx.send(snapshot).is_err() {
                // Every subscriber is gone — the view closed.
                break;
            }

            tokio::select! {
                changed = balances.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                changed = prices.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn raw(chain: &str, address: &str, free: u128) -> RawBalance {
        RawBalance {
            chain_id: ChainId::from(chain),
            address: address.to_string(),
            free,
        }
    }

    fn engine() -> PortfolioEngine {
        PortfolioEngine::with_chains(
            ChainRegistry::builtin(),
            vec![ChainId::from("0")],
            ["X".to_string()].into_iter().collect(),
        )
    }

    #[tokio::test]
    async fn test_engine_recomputes_on_balance_update() {
        let engine = engine();
        let mut snapshots = engine.subscribe();

        let (balance_tx, balance_rx) = watch::channel(Vec::new());
        let (price_tx, price_rx) = watch::channel(HashMap::new());

        let handle = tokio::spawn(engine.run(balance_rx, price_rx));

        // Initial pass: nothing reported yet.
        snapshots.changed().await.unwrap();
        assert_eq!(snapshots.borrow().total.tokens, None);

        balance_tx.send(vec![raw("0", "X", 5_000_000_000)]).unwrap();
        snapshots.changed().await.unwrap();
        assert_eq!(
            snapshots.borrow().total.tokens,
            Some(Decimal::from_str("0.5").unwrap())
        );
        // Price still loading — fiat stays absent.
        assert_eq!(snapshots.borrow().total.fiat, None);

        price_tx
            .send(HashMap::from([(
                "DOT".to_string(),
                PriceQuote::ready(Decimal::from(30)),
            )]))
            .unwrap();
        snapshots.changed().await.unwrap();
        assert_eq!(snapshots.borrow().total.fiat, Some(Decimal::from(15)));

        drop(balance_tx);
        drop(price_tx);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_engine_stops_when_subscribers_drop() {
        let engine = engine();
        let snapshots = engine.subscribe();

        let (_balance_tx, balance_rx) = watch::channel(vec![raw("0", "X", 1)]);
        let (_price_tx, price_rx) = watch::channel(HashMap::new());

        let handle = tokio::spawn(engine.run(balance_rx, price_rx));
        drop(snapshots);

        // The engine notices the closed snapshot channel on its next
        // pass and exits. send_replace: the engine may already be gone.
        _balance_tx.send_replace(vec![raw("0", "X", 2)]);
        handle.await.unwrap();
    }

    /// Feed pair backed by watch channels, as a real provider would be.
    struct StaticFeeds {
        balances: watch::Receiver<Vec<RawBalance>>,
        prices: watch::Receiver<HashMap<String, PriceQuote>>,
    }

    #[async_trait::async_trait]
    impl lantern_common::traits::BalanceFeed for StaticFeeds {
        async fn subscribe(
            &self,
            _addresses: &[String],
            _chain_ids: &[ChainId],
        ) -> lantern_common::error::LanternResult<watch::Receiver<Vec<RawBalance>>> {
            Ok(self.balances.clone())
        }
    }

    #[async_trait::async_trait]
    impl lantern_common::traits::PriceFeed for StaticFeeds {
        async fn unit_price(
            &self,
            token: &str,
        ) -> lantern_common::error::LanternResult<PriceQuote> {
            Ok(self
                .prices
                .borrow()
                .get(token)
                .cloned()
                .unwrap_or_else(PriceQuote::loading))
        }

        async fn subscribe(
            &self,
        ) -> lantern_common::error::LanternResult<watch::Receiver<HashMap<String, PriceQuote>>>
        {
            Ok(self.prices.clone())
        }
    }

    #[tokio::test]
    async fn test_engine_runs_from_feed_traits() {
        let engine = engine();
        let mut snapshots = engine.subscribe();

        let (balance_tx, balance_rx) = watch::channel(vec![raw("0", "X", 5_000_000_000)]);
        let (price_tx, price_rx) = watch::channel(HashMap::new());
        let feeds = StaticFeeds { balances: balance_rx, prices: price_rx };

        let handle = tokio::spawn(async move {
            engine.run_with_feeds(&feeds, &feeds).await
        });

        snapshots.changed().await.unwrap();
        assert_eq!(
            snapshots.borrow().total.tokens,
            Some(Decimal::from_str("0.5").unwrap())
        );

        drop(balance_tx);
        drop(price_tx);
        handle.await.unwrap().unwrap();
    }

    struct TwoAccounts;

    #[async_trait::async_trait]
    impl AccountProvider for TwoAccounts {
        async fn accounts(&self) -> LanternResult<Vec<lantern_common::types::Account>> {
            use lantern_common::types::{Account, AccountKind};
            Ok(vec![
                Account { address: "X".to_string(), kind: AccountKind::Sr25519 },
                Account { address: "M".to_string(), kind: AccountKind::Ethereum },
            ])
        }
    }

    #[tokio::test]
    async fn test_engine_tracks_provider_accounts() {
        let engine = PortfolioEngine::from_provider(ChainRegistry::builtin(), &TwoAccounts)
            .await
            .unwrap();
        // Both provider addresses count toward totals.
        let snapshot = engine.compute(
            &[raw("0", "X", 5_000_000_000), raw("0", "M", 5_000_000_000)],
            &HashMap::new(),
        );
        assert_eq!(snapshot.total.tokens, Some(Decimal::ONE));
    }

    #[tokio::test]
    async fn test_engine_offline_compute() {
        let engine = engine();
        let snapshot = engine.compute(
            &[raw("0", "X", 5_000_000_000), raw("0", "Y", 3_000_000_000)],
            &HashMap::new(),
        );
        assert_eq!(
            snapshot.chains[0].total.tokens,
            Some(Decimal::from_str("0.5").unwrap())
        );
    }
}
