//! Balance index — groups raw feed output by chain and enriches it
//! with token normalization and fiat prices.
//!
//! Enrichment is withholding, not defaulting: a balance whose decimals
//! or price are not yet known produces `None`, so downstream sums can
//! tell "no balance" apart from "balance not yet known". A fabricated
//! zero here would silently undercount the portfolio.

use rust_decimal::Decimal;

use lantern_common::types::{ChainId, PriceQuote, PricedBalance, RawBalance, TokenBalance};

/// Group raw balances into one bucket per requested chain id, in the
/// caller's chain order. Relative order of same-chain balances is
/// preserved. Balances for chains outside `chain_ids` are dropped.
pub fn group_by_chain(
    chain_ids: &[ChainId],
    balances: &[RawBalance],
) -> Vec<(ChainId, Vec<RawBalance>)> {
    chain_ids
        .iter()
        .map(|id| {
            let bucket = balances
                .iter()
                .filter(|b| &b.chain_id == id)
                .cloned()
                .collect();
            (id.clone(), bucket)
        })
        .collect()
}

/// Normalize a raw balance to whole tokens: `free / 10^decimals`.
///
/// Withheld (`None`) while decimals are unknown, when the scale exceeds
/// what `Decimal` can carry, or when the raw amount overflows the
/// 96-bit mantissa. Exact decimal math throughout — never floats.
pub fn normalize(balance: &RawBalance, decimals: Option<u32>) -> Option<TokenBalance> {
    let decimals = decimals?;
    let free = i128::try_from(balance.free).ok()?;
    let tokens = Decimal::try_from_i128_with_scale(free, decimals).ok()?;
    Some(TokenBalance {
        chain_id: balance.chain_id.clone(),
        address: balance.address.clone(),
        free: balance.free,
        tokens: tokens.normalize(),
    })
}

/// Attach a fiat value: `tokens × unit price`.
///
/// Withheld while the quote is loading or carries no price. A `None`
/// here must not be read as "worth nothing".
pub fn attach_price(balance: &TokenBalance, quote: &PriceQuote) -> Option<PricedBalance> {
    if quote.loading {
        return None;
    }
    let price = quote.price?;
    let fiat = balance.tokens.checked_mul(price)?;
    Some(PricedBalance {
        chain_id: balance.chain_id.clone(),
        address: balance.address.clone(),
        free: balance.free,
        tokens: balance.tokens,
        fiat: fiat.normalize(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn raw(chain: &str, address: &str, free: u128) -> RawBalance {
        RawBalance {
            chain_id: ChainId::from(chain),
            address: address.to_string(),
            free,
        }
    }

    #[test]
    fn test_group_preserves_same_chain_order() {
        let balances = vec![
            raw("0", "X", 1),
            raw("2", "X", 2),
            raw("0", "Y", 3),
            raw("0", "Z", 4),
        ];
        let chain_ids = [ChainId::from("0"), ChainId::from("2")];
        let grouped = group_by_chain(&chain_ids, &balances);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].0.as_str(), "0");
        let frees: Vec<u128> = grouped[0].1.iter().map(|b| b.free).collect();
        assert_eq!(frees, vec![1, 3, 4]);
        assert_eq!(grouped[1].1.len(), 1);
    }

    #[test]
    fn test_group_keeps_empty_buckets_and_drops_unrequested() {
        let balances = vec![raw("2090", "X", 7)];
        let chain_ids = [ChainId::from("0"), ChainId::from("2")];
        let grouped = group_by_chain(&chain_ids, &balances);

        // One bucket per requested chain, both empty; the Basilisk
        // balance was not requested and is gone.
        assert_eq!(grouped.len(), 2);
        assert!(grouped.iter().all(|(_, b)| b.is_empty()));
    }

    #[test]
    fn test_normalize_known_decimals() {
        let tb = normalize(&raw("0", "X", 5_000_000_000), Some(10)).unwrap();
        assert_eq!(tb.tokens, Decimal::from_str("0.5").unwrap());
        assert_eq!(tb.free, 5_000_000_000);
    }

    #[test]
    fn test_normalize_withheld_without_decimals() {
        assert!(normalize(&raw("0", "X", 5_000_000_000), None).is_none());
    }

    #[test]
    fn test_normalize_zero_is_zero_not_withheld() {
        let tb = normalize(&raw("0", "X", 0), Some(10)).unwrap();
        assert_eq!(tb.tokens, Decimal::ZERO);
    }

    #[test]
    fn test_normalize_withheld_on_unrepresentable_scale() {
        // 29 fractional digits exceeds Decimal's scale.
        assert!(normalize(&raw("0", "X", 1), Some(29)).is_none());
    }

    #[test]
    fn test_attach_price_ready() {
        let tb = normalize(&raw("0", "X", 5_000_000_000), Some(10)).unwrap();
        let quote = PriceQuote::ready(Decimal::from(30));
        let priced = attach_price(&tb, &quote).unwrap();
        assert_eq!(priced.fiat, Decimal::from(15));
    }

    #[test]
    fn test_attach_price_withheld_while_loading() {
        let tb = normalize(&raw("0", "X", 5_000_000_000), Some(10)).unwrap();
        assert!(attach_price(&tb, &PriceQuote::loading()).is_none());
        // Not loading but also no price yet — still withheld.
        let empty = PriceQuote { price: None, loading: false };
        assert!(attach_price(&tb, &empty).is_none());
    }
}
