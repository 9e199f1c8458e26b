//
// Copyright (c) Cryptic Dot
//
// Licensed under FusionAMM SDK Source-Available License v1.0
// See the LICENSE file in the project root for license information.
//

use crate::{
    CoreError, Token, BPS_DENOMINATOR, DEFAULT_LIQUIDITY_FRACTION_BPS, DEFAULT_MAX_PRICE_IMPACT_PCT, DEFAULT_MAX_SNAPSHOT_AGE_SECS,
    DEFAULT_PRICE_IMPACT_CLAMP_PCT, INVALID_AMOUNT, INVALID_SLIPPAGE_TOLERANCE, SAME_TOKEN_PAIR,
};
use rust_decimal::{prelude::ToPrimitive, Decimal};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What the user asked to swap. Rebuilt on every keystroke or selection change.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QuoteInput {
    pub source_token: Token,
    pub dest_token: Token,
    /// `None` while the amount field is empty.
    pub source_amount: Option<Decimal>,
    pub slippage_tolerance_bps: u16,
}

impl QuoteInput {
    pub fn new(source_token: Token, dest_token: Token, source_amount: Option<Decimal>, slippage_tolerance_bps: u16) -> Result<Self, CoreError> {
        if source_token == dest_token {
            return Err(SAME_TOKEN_PAIR);
        }
        if slippage_tolerance_bps > BPS_DENOMINATOR {
            return Err(INVALID_SLIPPAGE_TOLERANCE);
        }
        if source_amount.is_some_and(|amount| amount.is_sign_negative() && !amount.is_zero()) {
            return Err(INVALID_AMOUNT);
        }
        Ok(Self {
            source_token,
            dest_token,
            source_amount,
            slippage_tolerance_bps,
        })
    }

    /// The same request with source and destination exchanged.
    pub fn flipped(&self, source_amount: Option<Decimal>) -> Self {
        Self {
            source_token: self.dest_token,
            dest_token: self.source_token,
            source_amount,
            slippage_tolerance_bps: self.slippage_tolerance_bps,
        }
    }
}

/// Verdict attached to every quote. Only `Ok` allows the swap to be submitted.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum QuoteStatus {
    #[default]
    Idle,
    Ok,
    InsufficientBalance,
    InsufficientLiquidity,
    ImpactTooHigh,
}

impl QuoteStatus {
    pub fn is_submittable(&self) -> bool {
        matches!(self, QuoteStatus::Ok)
    }

    /// Label for the submit button.
    pub fn message(&self) -> &'static str {
        match self {
            QuoteStatus::Idle => "Enter amount",
            QuoteStatus::Ok => "Swap tokens",
            QuoteStatus::InsufficientBalance => "Insufficient balance",
            QuoteStatus::InsufficientLiquidity => "Insufficient liquidity",
            QuoteStatus::ImpactTooHigh => "Price impact too high",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QuoteResult {
    pub dest_amount: Decimal,
    pub price_impact_pct: Decimal,
    pub minimum_dest_amount: Decimal,
    /// Destination tokens received per source token.
    pub exchange_rate: Decimal,
    pub status: QuoteStatus,
}

impl QuoteResult {
    pub fn idle() -> Self {
        Self::default()
    }
}

/// Policy knobs of the quote engine. The thresholds are heuristics rather than a pool model and
/// are expected to be tuned per deployment.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct QuoteConfig {
    /// Share of the pool reserve one swap may consume, in basis points.
    pub liquidity_fraction_bps: u16,
    /// Quotes with a higher estimated price impact, in percent, are rejected.
    pub max_price_impact_pct: Decimal,
    /// Estimated price impact never exceeds this percentage.
    pub price_impact_clamp_pct: Decimal,
    /// Price used for tokens the snapshot has no entry for.
    pub fallback_price_usd: Decimal,
    /// `None` disables the staleness check.
    pub max_snapshot_age_secs: Option<u64>,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            liquidity_fraction_bps: DEFAULT_LIQUIDITY_FRACTION_BPS,
            max_price_impact_pct: Decimal::from(DEFAULT_MAX_PRICE_IMPACT_PCT),
            price_impact_clamp_pct: Decimal::from(DEFAULT_PRICE_IMPACT_CLAMP_PCT),
            fallback_price_usd: Decimal::ZERO,
            max_snapshot_age_secs: Some(DEFAULT_MAX_SNAPSHOT_AGE_SECS),
        }
    }
}

/// Parses the amount typed into a swap or stake field.
///
/// # Returns
/// - `Ok(None)` for an empty field
/// - `Ok(Some(amount))` for a non-negative decimal
/// - `Err(INVALID_AMOUNT)` for anything else
pub fn parse_amount(value: &str) -> Result<Option<Decimal>, CoreError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    let amount = Decimal::from_str(value).map_err(|_| INVALID_AMOUNT)?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(INVALID_AMOUNT);
    }
    Ok(Some(amount))
}

/// Converts a slippage percentage as typed by the user ("0.5") to basis points (50).
pub fn slippage_pct_to_bps(value: &str) -> Result<u16, CoreError> {
    let pct = Decimal::from_str(value.trim()).map_err(|_| INVALID_SLIPPAGE_TOLERANCE)?;
    if pct < Decimal::ZERO || pct > Decimal::ONE_HUNDRED {
        return Err(INVALID_SLIPPAGE_TOLERANCE);
    }
    (pct * Decimal::ONE_HUNDRED).round().to_u16().ok_or(INVALID_SLIPPAGE_TOLERANCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_input_rejects_same_token() {
        let result = QuoteInput::new(Token::Eth, Token::Eth, None, 50);
        assert_eq!(result, Err(SAME_TOKEN_PAIR));
    }

    #[test]
    fn test_input_rejects_slippage_above_100_pct() {
        assert_eq!(QuoteInput::new(Token::Eth, Token::Usdc, None, 10_001), Err(INVALID_SLIPPAGE_TOLERANCE));
        assert!(QuoteInput::new(Token::Eth, Token::Usdc, None, 10_000).is_ok());
    }

    #[test]
    fn test_input_rejects_negative_amount() {
        let result = QuoteInput::new(Token::Eth, Token::Usdc, Some(Decimal::NEGATIVE_ONE), 50);
        assert_eq!(result, Err(INVALID_AMOUNT));
    }

    #[test]
    fn test_flipped() {
        let input = QuoteInput::new(Token::Bloom, Token::Eth, Some(Decimal::TEN), 100).unwrap();
        let flipped = input.flipped(Some(Decimal::ONE));
        assert_eq!(flipped.source_token, Token::Eth);
        assert_eq!(flipped.dest_token, Token::Bloom);
        assert_eq!(flipped.source_amount, Some(Decimal::ONE));
        assert_eq!(flipped.slippage_tolerance_bps, 100);
    }

    #[rstest]
    #[case("", None)]
    #[case("   ", None)]
    #[case("0", Some(Decimal::ZERO))]
    #[case("12.5847", Some(Decimal::new(125847, 4)))]
    #[case(" 1000 ", Some(Decimal::from(1000)))]
    fn test_parse_amount(#[case] value: &str, #[case] expected: Option<Decimal>) {
        assert_eq!(parse_amount(value), Ok(expected));
    }

    #[rstest]
    #[case("-1")]
    #[case("abc")]
    #[case("1.2.3")]
    fn test_parse_amount_rejects(#[case] value: &str) {
        assert_eq!(parse_amount(value), Err(INVALID_AMOUNT));
    }

    #[rstest]
    #[case("0.1", 10)]
    #[case("0.5", 50)]
    #[case("1.0", 100)]
    #[case("0", 0)]
    #[case("100", 10_000)]
    fn test_slippage_pct_to_bps(#[case] value: &str, #[case] expected: u16) {
        assert_eq!(slippage_pct_to_bps(value), Ok(expected));
    }

    #[rstest]
    #[case("-0.1")]
    #[case("100.5")]
    #[case("half")]
    fn test_slippage_pct_to_bps_rejects(#[case] value: &str) {
        assert_eq!(slippage_pct_to_bps(value), Err(INVALID_SLIPPAGE_TOLERANCE));
    }

    #[test]
    fn test_default_config() {
        let config = QuoteConfig::default();
        assert_eq!(config.liquidity_fraction_bps, 1_000);
        assert_eq!(config.max_price_impact_pct, Decimal::from(20));
        assert_eq!(config.price_impact_clamp_pct, Decimal::from(50));
        assert_eq!(config.fallback_price_usd, Decimal::ZERO);
    }

    #[test]
    fn test_status() {
        assert!(QuoteStatus::Ok.is_submittable());
        assert!(!QuoteStatus::Idle.is_submittable());
        assert!(!QuoteStatus::ImpactTooHigh.is_submittable());
        assert_eq!(QuoteStatus::default(), QuoteStatus::Idle);
        assert_eq!(QuoteResult::idle().status, QuoteStatus::Idle);
    }
}
