//
// Copyright (c) Cryptic Dot
//
// Licensed under FusionAMM SDK Source-Available License v1.0
// See the LICENSE file in the project root for license information.
//

use crate::BPS_DENOMINATOR;
use rust_decimal::Decimal;

/// Estimate the price impact of a trade, in percent.
///
/// The estimate is `source_amount * source_price / (reserve_usd * dest_price) * 100`, bounded to
/// `[0, clamp_pct]`. A missing reserve or destination price puts any non-zero trade at the bound.
///
/// # Parameters
/// - `source_amount` - Amount of the source token
/// - `source_price` - USD price of the source token
/// - `dest_price` - USD price of the destination token
/// - `reserve_usd` - USD reserve of the pool trading the pair
/// - `clamp_pct` - Upper bound of the estimate
///
/// # Returns
/// - The estimated price impact in percent
pub fn estimate_price_impact(source_amount: Decimal, source_price: Decimal, dest_price: Decimal, reserve_usd: Decimal, clamp_pct: Decimal) -> Decimal {
    let clamp_pct = clamp_pct.max(Decimal::ZERO);
    let trade_size = source_amount.max(Decimal::ZERO).saturating_mul(source_price.max(Decimal::ZERO));
    if trade_size.is_zero() {
        return Decimal::ZERO;
    }

    let depth = reserve_usd.max(Decimal::ZERO).saturating_mul(dest_price.max(Decimal::ZERO));
    let impact = trade_size
        .checked_div(depth)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(clamp_pct);

    impact.clamp(Decimal::ZERO, clamp_pct)
}

/// Reduce an amount by a price impact given in percent.
pub fn apply_price_impact(amount: Decimal, price_impact_pct: Decimal) -> Decimal {
    let retained_pct = (Decimal::ONE_HUNDRED - price_impact_pct.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)) / Decimal::ONE_HUNDRED;
    amount * retained_pct
}

/// Get the minimum amount accepted after slippage.
///
/// # Parameters
/// - `amount` - The estimated amount
/// - `slippage_tolerance_bps` - Slippage tolerance in basis points, capped at 100%
///
/// # Returns
/// - `amount * (1 - slippage_tolerance_bps / 10000)`, never more than `amount`
pub fn get_min_amount_with_slippage_tolerance(amount: Decimal, slippage_tolerance_bps: u16) -> Decimal {
    let retained_bps = BPS_DENOMINATOR - slippage_tolerance_bps.min(BPS_DENOMINATOR);
    let retained = Decimal::from(retained_bps) / Decimal::from(BPS_DENOMINATOR);
    (amount * retained).min(amount)
}
