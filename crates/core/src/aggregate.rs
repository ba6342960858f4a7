//! Portfolio aggregation — absent-preserving sums over enriched
//! balances, filtered to the wallet owner's tracked addresses.
//!
//! Totals are `Option<Decimal>`: `None` means the filtered set was
//! empty ("nothing to report yet"), `Some(0)` a confirmed zero. All
//! functions here are pure — same inputs, same outputs — so results
//! can be memoized on input identity.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use tracing::warn;

use lantern_common::types::{
    Chain, ChainId, ChainTotal, PortfolioSnapshot, PortfolioTotal, PriceQuote, PricedBalance,
    RawBalance, TokenBalance,
};

use crate::index;
use crate::registry::ChainRegistry;

/// The wallet owner's addresses. Balances outside this set never count
/// toward totals.
pub type AddressSet = HashSet<String>;

/// Fold one amount into an optional accumulator. `None + x = Some(x)`,
/// so a sum only becomes present once something real contributes.
/// Saturates at the `Decimal` range bound instead of panicking — a
/// low-decimals chain can carry balances whose sum exceeds the
/// 96-bit mantissa even though each addend normalizes fine.
fn fold(acc: Option<Decimal>, value: Decimal) -> Option<Decimal> {
    Some(acc.unwrap_or(Decimal::ZERO).saturating_add(value))
}

/// Sum token amounts over tracked, non-withheld balances.
///
/// Addition over `Decimal` is associative and commutative, so the
/// result is invariant under permutation of `balances`.
pub fn sum_tokens(balances: &[Option<TokenBalance>], tracked: &AddressSet) -> Option<Decimal> {
    balances
        .iter()
        .flatten()
        .filter(|b| tracked.contains(&b.address))
        .fold(None, |acc, b| fold(acc, b.tokens))
}

/// Sum fiat values over tracked, non-withheld balances. Same absent
/// semantics as [`sum_tokens`].
pub fn sum_fiat(balances: &[Option<PricedBalance>], tracked: &AddressSet) -> Option<Decimal> {
    balances
        .iter()
        .flatten()
        .filter(|b| tracked.contains(&b.address))
        .fold(None, |acc, b| fold(acc, b.fiat))
}

/// Compute one chain's totals from its raw balances.
///
/// Decimals are only trusted once the chain's native token is known,
/// matching the withholding rule for normalization.
pub fn chain_total(
    chain: &Chain,
    balances: &[RawBalance],
    quote: &PriceQuote,
    tracked: &AddressSet,
) -> ChainTotal {
    let decimals = if chain.native_token.is_some() {
        chain.token_decimals
    } else {
        None
    };

    let token_balances: Vec<Option<TokenBalance>> = balances
        .iter()
        .map(|b| index::normalize(b, decimals))
        .collect();
    let priced: Vec<Option<PricedBalance>> = token_balances
        .iter()
        .map(|tb| tb.as_ref().and_then(|tb| index::attach_price(tb, quote)))
        .collect();

    ChainTotal {
        chain_id: chain.id.clone(),
        symbol: chain.native_token.clone(),
        total: PortfolioTotal {
            tokens: sum_tokens(&token_balances, tracked),
            fiat: sum_fiat(&priced, tracked),
        },
    }
}

/// Compute a full portfolio snapshot: one row per requested chain plus
/// overall totals.
///
/// Failures are isolated per chain — a chain id the registry does not
/// know lands in `failed` and the remaining chains still aggregate.
pub fn portfolio_totals(
    registry: &ChainRegistry,
    chain_ids: &[ChainId],
    balances: &[RawBalance],
    prices: &HashMap<String, PriceQuote>,
    tracked: &AddressSet,
) -> PortfolioSnapshot {
    let grouped = index::group_by_chain(chain_ids, balances);

    let mut snapshot = PortfolioSnapshot::default();
    for (chain_id, bucket) in grouped {
        let chain = match registry.lookup(&chain_id) {
            Ok(chain) => chain,
            Err(e) => {
                warn!(chain = %chain_id, error = %e, "skipping chain row");
                snapshot.failed.push((chain_id, e.to_string()));
                continue;
            }
        };

        let quote = chain
            .native_token
            .as_ref()
            .and_then(|token| prices.get(token).cloned())
            .unwrap_or_else(PriceQuote::loading);

        let row = chain_total(chain, &bucket, &quote, tracked);
        if let Some(tokens) = row.total.tokens {
            snapshot.total.tokens = fold(snapshot.total.tokens, tokens);
        }
        if let Some(fiat) = row.total.fiat {
            snapshot.total.fiat = fold(snapshot.total.fiat, fiat);
        }
        snapshot.chains.push(row);
    }
    snapshot
}
