//
// Copyright (c) Cryptic Dot
//
// Licensed under FusionAMM SDK Source-Available License v1.0
// See the LICENSE file in the project root for license information.
//

use crate::{
    apply_price_impact, estimate_price_impact, get_min_amount_with_slippage_tolerance, Balances, MarketSnapshot, QuoteConfig, QuoteInput, QuoteResult,
    QuoteStatus, BPS_DENOMINATOR,
};
use rust_decimal::Decimal;

/// Computes the destination amount for a swap of `input.source_amount` source tokens.
///
/// # Arguments
/// - `input`: The requested swap.
/// - `market`: The latest price and pool snapshot.
/// - `balances`: Holdings of the connected account.
/// - `config`: Quote thresholds and the fallback price for tokens missing from `market`.
///
/// # Returns
/// The quote. Problems are reported through `QuoteResult::status`, checked in this order:
/// insufficient balance, insufficient liquidity, price impact too high. An empty or zero amount
/// yields an idle quote with all amounts zero.
pub fn compute_quote(input: &QuoteInput, market: &MarketSnapshot, balances: &Balances, config: &QuoteConfig) -> QuoteResult {
    let source_amount = match input.source_amount {
        Some(amount) if amount > Decimal::ZERO => amount,
        _ => return QuoteResult::idle(),
    };

    let source_price = market.price_usd(input.source_token, config.fallback_price_usd);
    let dest_price = market.price_usd(input.dest_token, config.fallback_price_usd);
    let reserve_usd = market.reserve_usd(input.source_token, input.dest_token);

    let usd_value = source_amount.saturating_mul(source_price);
    let raw_dest_amount = usd_value.checked_div(dest_price).unwrap_or(Decimal::ZERO);

    let price_impact_pct = estimate_price_impact(source_amount, source_price, dest_price, reserve_usd, config.price_impact_clamp_pct);
    let dest_amount = apply_price_impact(raw_dest_amount, price_impact_pct);
    let minimum_dest_amount = get_min_amount_with_slippage_tolerance(dest_amount, input.slippage_tolerance_bps);
    let exchange_rate = dest_amount.checked_div(source_amount).unwrap_or(Decimal::ZERO);

    let status = if source_amount > balances.get(input.source_token) {
        QuoteStatus::InsufficientBalance
    } else if usd_value > liquidity_limit_usd(reserve_usd, config.liquidity_fraction_bps) {
        QuoteStatus::InsufficientLiquidity
    } else if price_impact_pct > config.max_price_impact_pct {
        QuoteStatus::ImpactTooHigh
    } else {
        QuoteStatus::Ok
    };

    QuoteResult {
        dest_amount,
        price_impact_pct,
        minimum_dest_amount,
        exchange_rate,
        status,
    }
}

/// Re-quotes a swap after the user flips its direction.
///
/// The previous destination amount becomes the new source amount; the slippage tolerance is kept.
/// Quoting back and forth does not reproduce the original amount once price impact is involved.
///
/// # Returns
/// The flipped input together with its quote.
pub fn reverse_quote(
    input: &QuoteInput,
    previous: &QuoteResult,
    market: &MarketSnapshot,
    balances: &Balances,
    config: &QuoteConfig,
) -> (QuoteInput, QuoteResult) {
    let source_amount = (!previous.dest_amount.is_zero()).then_some(previous.dest_amount);
    let reversed = input.flipped(source_amount);
    let quote = compute_quote(&reversed, market, balances, config);
    (reversed, quote)
}

/// Whether `market` is too old to quote against at `now` (unix seconds).
pub fn is_snapshot_stale(market: &MarketSnapshot, now: u64, config: &QuoteConfig) -> bool {
    config.max_snapshot_age_secs.is_some_and(|max_age| market.age_secs(now) > max_age)
}

fn liquidity_limit_usd(reserve_usd: Decimal, liquidity_fraction_bps: u16) -> Decimal {
    reserve_usd.saturating_mul(Decimal::from(liquidity_fraction_bps)) / Decimal::from(BPS_DENOMINATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PriceEntry, Token};
    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use rust_decimal::prelude::ToPrimitive;
    use std::str::FromStr;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn test_market() -> MarketSnapshot {
        MarketSnapshot::new(1_700_000_000)
            .with_price(Token::Eth, PriceEntry::new(Decimal::from(2000)))
            .with_price(Token::Usdc, PriceEntry::new(Decimal::ONE))
            .with_price(Token::Bloom, PriceEntry::new(dec("0.001")))
            .with_pool(Token::Eth, Token::Usdc, Decimal::from(1_000_000_000_000u64))
            .with_pool(Token::Usdc, Token::Bloom, Decimal::from(100_000))
    }

    fn rich_balances() -> Balances {
        Balances::new()
            .with(Token::Eth, Decimal::from(1_000))
            .with(Token::Usdc, Decimal::from(1_000_000))
            .with(Token::Bloom, Decimal::from(1_000_000_000))
    }

    fn no_impact_config() -> QuoteConfig {
        QuoteConfig {
            price_impact_clamp_pct: Decimal::ZERO,
            ..QuoteConfig::default()
        }
    }

    fn test_input(source: Token, dest: Token, amount: &str, slippage_bps: u16) -> QuoteInput {
        QuoteInput::new(source, dest, Some(dec(amount)), slippage_bps).unwrap()
    }

    #[test]
    fn test_unset_amount_is_idle() {
        let input = QuoteInput::new(Token::Eth, Token::Usdc, None, 50).unwrap();
        let result = compute_quote(&input, &test_market(), &rich_balances(), &QuoteConfig::default());
        assert_eq!(result, QuoteResult::idle());
        assert_eq!(result.status, QuoteStatus::Idle);
        assert_eq!(result.dest_amount, Decimal::ZERO);
        assert_eq!(result.minimum_dest_amount, Decimal::ZERO);
        assert_eq!(result.exchange_rate, Decimal::ZERO);
    }

    #[test]
    fn test_zero_amount_is_idle() {
        let input = test_input(Token::Eth, Token::Usdc, "0", 50);
        let result = compute_quote(&input, &test_market(), &Balances::new(), &QuoteConfig::default());
        assert_eq!(result, QuoteResult::idle());
    }

    #[test]
    fn test_eth_to_usdc_without_impact() {
        let input = test_input(Token::Eth, Token::Usdc, "10", 0);
        let result = compute_quote(&input, &test_market(), &rich_balances(), &no_impact_config());
        assert_eq!(result.status, QuoteStatus::Ok);
        assert_eq!(result.price_impact_pct, Decimal::ZERO);
        assert_eq!(result.dest_amount, Decimal::from(20_000));
        assert_eq!(result.minimum_dest_amount, Decimal::from(20_000));
        assert_eq!(result.exchange_rate, Decimal::from(2_000));
    }

    #[test]
    fn test_eth_to_usdc_deep_pool() {
        let input = test_input(Token::Eth, Token::Usdc, "10", 50);
        let result = compute_quote(&input, &test_market(), &rich_balances(), &QuoteConfig::default());
        assert_eq!(result.status, QuoteStatus::Ok);
        assert_relative_eq!(result.dest_amount.to_f64().unwrap(), 20_000.0, max_relative = 1e-6);
        assert_relative_eq!(result.exchange_rate.to_f64().unwrap(), 2_000.0, max_relative = 1e-6);
        assert_relative_eq!(result.minimum_dest_amount.to_f64().unwrap(), 19_900.0, max_relative = 1e-6);
        assert!(result.price_impact_pct > Decimal::ZERO);
    }

    #[test]
    fn test_minimum_follows_slippage() {
        let input = test_input(Token::Eth, Token::Usdc, "1.5", 75);
        let result = compute_quote(&input, &test_market(), &rich_balances(), &QuoteConfig::default());
        let expected = result.dest_amount * (Decimal::ONE - Decimal::from(75) / Decimal::from(10_000));
        assert_eq!(result.minimum_dest_amount, expected);
        assert!(result.minimum_dest_amount <= result.dest_amount);
    }

    #[test]
    fn test_insufficient_liquidity() {
        // $200 against a $1,000 reserve, 10% of which may be consumed.
        let market = MarketSnapshot::new(0)
            .with_price(Token::Usdc, PriceEntry::new(Decimal::ONE))
            .with_price(Token::Usdt, PriceEntry::new(Decimal::ONE))
            .with_pool(Token::Usdc, Token::Usdt, Decimal::from(1_000));
        let input = test_input(Token::Usdc, Token::Usdt, "200", 50);
        let result = compute_quote(&input, &market, &rich_balances(), &QuoteConfig::default());
        assert_eq!(result.status, QuoteStatus::InsufficientLiquidity);
    }

    #[test]
    fn test_liquidity_limit_is_inclusive() {
        let market = MarketSnapshot::new(0)
            .with_price(Token::Usdc, PriceEntry::new(Decimal::ONE))
            .with_price(Token::Usdt, PriceEntry::new(Decimal::ONE))
            .with_pool(Token::Usdc, Token::Usdt, Decimal::from(100_000));
        let input = test_input(Token::Usdc, Token::Usdt, "10000", 50);
        let config = QuoteConfig {
            max_price_impact_pct: Decimal::from(50),
            ..QuoteConfig::default()
        };
        let result = compute_quote(&input, &market, &rich_balances(), &config);
        assert_eq!(result.status, QuoteStatus::Ok);
        assert_eq!(result.price_impact_pct, Decimal::TEN);
        assert_eq!(result.dest_amount, Decimal::from(9_000));
    }

    #[test]
    fn test_insufficient_balance_takes_precedence() {
        let balances = Balances::new().with(Token::Eth, Decimal::from(5));
        let input = test_input(Token::Eth, Token::Bloom, "10", 50);
        // No ETH/BLOOM pool: liquidity and impact checks would fail too.
        let result = compute_quote(&input, &test_market(), &balances, &QuoteConfig::default());
        assert_eq!(result.status, QuoteStatus::InsufficientBalance);
        assert_eq!(result.price_impact_pct, Decimal::from(50));
    }

    #[test]
    fn test_disconnected_account_has_no_balance() {
        let input = test_input(Token::Eth, Token::Usdc, "0.1", 50);
        let result = compute_quote(&input, &test_market(), &Balances::new(), &QuoteConfig::default());
        assert_eq!(result.status, QuoteStatus::InsufficientBalance);
        assert!(result.dest_amount > Decimal::ZERO);
    }

    #[test]
    fn test_spending_whole_balance_is_allowed() {
        let balances = Balances::new().with(Token::Eth, Decimal::from(10));
        let input = test_input(Token::Eth, Token::Usdc, "10", 50);
        let result = compute_quote(&input, &test_market(), &balances, &QuoteConfig::default());
        assert_eq!(result.status, QuoteStatus::Ok);
    }

    #[test]
    fn test_impact_too_high() {
        // 25 / (100_000 * 0.001) * 100 = 25%
        let input = test_input(Token::Usdc, Token::Bloom, "25", 50);
        let result = compute_quote(&input, &test_market(), &rich_balances(), &QuoteConfig::default());
        assert_eq!(result.status, QuoteStatus::ImpactTooHigh);
        assert_eq!(result.price_impact_pct, Decimal::from(25));
        assert_eq!(result.dest_amount, Decimal::from(18_750));
    }

    #[test]
    fn test_thresholds_are_configurable() {
        let input = test_input(Token::Usdc, Token::Bloom, "25", 50);
        let config = QuoteConfig {
            max_price_impact_pct: Decimal::from(30),
            ..QuoteConfig::default()
        };
        let result = compute_quote(&input, &test_market(), &rich_balances(), &config);
        assert_eq!(result.status, QuoteStatus::Ok);

        let strict = QuoteConfig {
            liquidity_fraction_bps: 1,
            ..config
        };
        let result = compute_quote(&input, &test_market(), &rich_balances(), &strict);
        assert_eq!(result.status, QuoteStatus::InsufficientLiquidity);
    }

    #[test]
    fn test_missing_pool_is_rejected() {
        let input = test_input(Token::Eth, Token::Bloom, "1", 50);
        let result = compute_quote(&input, &test_market(), &rich_balances(), &QuoteConfig::default());
        assert_eq!(result.status, QuoteStatus::InsufficientLiquidity);
        assert_eq!(result.price_impact_pct, Decimal::from(50));
    }

    #[test]
    fn test_zero_dest_price_is_degenerate() {
        let market = test_market().with_price(Token::Usdc, PriceEntry::new(Decimal::ZERO));
        let input = test_input(Token::Eth, Token::Usdc, "1", 50);
        let result = compute_quote(&input, &market, &rich_balances(), &QuoteConfig::default());
        assert_eq!(result.dest_amount, Decimal::ZERO);
        assert_eq!(result.minimum_dest_amount, Decimal::ZERO);
        assert_eq!(result.exchange_rate, Decimal::ZERO);
        assert_eq!(result.price_impact_pct, Decimal::from(50));
    }

    #[test]
    fn test_missing_price_uses_fallback() {
        let market = MarketSnapshot::new(0)
            .with_price(Token::Usdc, PriceEntry::new(Decimal::ONE))
            .with_pool(Token::Btc, Token::Usdc, Decimal::from(1_000_000_000_000u64));
        let input = test_input(Token::Btc, Token::Usdc, "1", 0);

        let result = compute_quote(&input, &market, &Balances::new().with(Token::Btc, Decimal::ONE), &QuoteConfig::default());
        assert_eq!(result.dest_amount, Decimal::ZERO);
        assert_eq!(result.exchange_rate, Decimal::ZERO);

        let config = QuoteConfig {
            fallback_price_usd: Decimal::from(50_000),
            ..no_impact_config()
        };
        let result = compute_quote(&input, &market, &Balances::new().with(Token::Btc, Decimal::ONE), &config);
        assert_eq!(result.dest_amount, Decimal::from(50_000));
        assert_eq!(result.status, QuoteStatus::Ok);
    }

    #[test]
    fn test_quote_is_idempotent() {
        let input = test_input(Token::Bloom, Token::Usdc, "123456.789", 50);
        let market = test_market();
        let balances = rich_balances();
        let config = QuoteConfig::default();
        let first = compute_quote(&input, &market, &balances, &config);
        let second = compute_quote(&input, &market, &balances, &config);
        assert_eq!(first, second);
        assert_eq!(first.dest_amount.serialize(), second.dest_amount.serialize());
    }

    #[test]
    fn test_reverse_quote() {
        let input = test_input(Token::Eth, Token::Usdc, "10", 50);
        let config = no_impact_config();
        let forward = compute_quote(&input, &test_market(), &rich_balances(), &config);

        let (reversed, backward) = reverse_quote(&input, &forward, &test_market(), &rich_balances(), &config);
        assert_eq!(reversed.source_token, Token::Usdc);
        assert_eq!(reversed.dest_token, Token::Eth);
        assert_eq!(reversed.source_amount, Some(Decimal::from(20_000)));
        assert_eq!(reversed.slippage_tolerance_bps, 50);
        assert_relative_eq!(backward.dest_amount.to_f64().unwrap(), 10.0, max_relative = 1e-9);
    }

    #[test]
    fn test_reverse_quote_with_impact_is_lossy() {
        let input = test_input(Token::Usdc, Token::Bloom, "10", 50);
        let config = QuoteConfig::default();
        let forward = compute_quote(&input, &test_market(), &rich_balances(), &config);
        let (_, backward) = reverse_quote(&input, &forward, &test_market(), &rich_balances(), &config);
        assert!(backward.dest_amount < Decimal::TEN);
    }

    #[test]
    fn test_reverse_of_idle_quote_is_idle() {
        let input = QuoteInput::new(Token::Eth, Token::Usdc, None, 50).unwrap();
        let (reversed, quote) = reverse_quote(&input, &QuoteResult::idle(), &test_market(), &rich_balances(), &QuoteConfig::default());
        assert_eq!(reversed.source_amount, None);
        assert_eq!(quote.status, QuoteStatus::Idle);
    }

    #[test]
    fn test_snapshot_staleness() {
        let market = test_market();
        let config = QuoteConfig::default();
        assert!(!is_snapshot_stale(&market, market.observed_at + 90, &config));
        assert!(is_snapshot_stale(&market, market.observed_at + 91, &config));

        let lenient = QuoteConfig {
            max_snapshot_age_secs: None,
            ..config
        };
        assert!(!is_snapshot_stale(&market, market.observed_at + 86_400, &lenient));
    }

    proptest! {
        #[test]
        fn prop_minimum_never_exceeds_estimate(units in 1u64..1_000_000_000_000, scale in 0u32..12, slippage_bps in 0u16..=10_000) {
            let input = QuoteInput::new(Token::Bloom, Token::Usdc, Some(Decimal::new(units as i64, scale)), slippage_bps).unwrap();
            let result = compute_quote(&input, &test_market(), &rich_balances(), &QuoteConfig::default());
            prop_assert!(result.minimum_dest_amount <= result.dest_amount);
            prop_assert!(result.price_impact_pct >= Decimal::ZERO);
        }

        #[test]
        fn prop_impact_is_monotonic(smaller in 1u64..1_000_000_000, extra in 0u64..1_000_000_000, scale in 0u32..8) {
            let market = test_market();
            let config = QuoteConfig::default();
            let quote = |units: u64| {
                let input = QuoteInput::new(Token::Usdc, Token::Bloom, Some(Decimal::new(units as i64, scale)), 50).unwrap();
                compute_quote(&input, &market, &rich_balances(), &config)
            };
            prop_assert!(quote(smaller).price_impact_pct <= quote(smaller + extra).price_impact_pct);
        }
    }
}
