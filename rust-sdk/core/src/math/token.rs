//
// Copyright (c) Cryptic Dot
//
// Licensed under FusionAMM SDK Source-Available License v1.0
// See the LICENSE file in the project root for license information.
//

use crate::{CoreError, AMOUNT_EXCEEDS_DECIMAL_RANGE, ARITHMETIC_OVERFLOW, BPS_DENOMINATOR, INVALID_AMOUNT, INVALID_DECIMALS, INVALID_SLIPPAGE_TOLERANCE, MAX_TOKEN_DECIMALS};
use ethnum::U256;
use rust_decimal::{Decimal, RoundingStrategy};

/// Convert a human readable token amount to on-chain base units.
/// Digits beyond `decimals` are truncated.
///
/// # Parameters
/// - `amount` - A non-negative token amount
/// - `decimals` - Decimals of the token
///
/// # Returns
/// - The amount in base units
pub fn to_base_units(amount: Decimal, decimals: u8) -> Result<U256, CoreError> {
    if decimals > MAX_TOKEN_DECIMALS {
        return Err(INVALID_DECIMALS);
    }
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(INVALID_AMOUNT);
    }

    let truncated = amount.round_dp_with_strategy(decimals.into(), RoundingStrategy::ToZero);
    let mantissa = u128::try_from(truncated.mantissa()).map_err(|_| INVALID_AMOUNT)?;
    let scale_up = u32::from(decimals) - truncated.scale();

    Ok(U256::from(mantissa) * U256::from(10u128.pow(scale_up)))
}

/// Convert on-chain base units to a human readable token amount.
///
/// # Parameters
/// - `amount` - The amount in base units
/// - `decimals` - Decimals of the token
///
/// # Returns
/// - The token amount, or `AMOUNT_EXCEEDS_DECIMAL_RANGE` if it does not fit a 96-bit mantissa
pub fn from_base_units(amount: U256, decimals: u8) -> Result<Decimal, CoreError> {
    if decimals > MAX_TOKEN_DECIMALS {
        return Err(INVALID_DECIMALS);
    }
    if amount > U256::from(i128::MAX as u128) {
        return Err(AMOUNT_EXCEEDS_DECIMAL_RANGE);
    }

    Decimal::try_from_i128_with_scale(amount.as_i128(), decimals.into())
        .map(|value| value.normalize())
        .map_err(|_| AMOUNT_EXCEEDS_DECIMAL_RANGE)
}

/// Get the minimum amount in base units after applying a slippage tolerance, rounding down.
///
/// # Parameters
/// - `amount` - The estimated amount in base units
/// - `slippage_tolerance_bps` - Slippage tolerance in basis points
///
/// # Returns
/// - The minimum amount
pub fn try_get_min_amount_with_slippage_tolerance(amount: U256, slippage_tolerance_bps: u16) -> Result<U256, CoreError> {
    if slippage_tolerance_bps > BPS_DENOMINATOR {
        return Err(INVALID_SLIPPAGE_TOLERANCE);
    }
    let retained_bps = U256::from(BPS_DENOMINATOR - slippage_tolerance_bps);
    let product = amount.checked_mul(retained_bps).ok_or(ARITHMETIC_OVERFLOW)?;
    Ok(product / U256::from(BPS_DENOMINATOR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    #[test]
    fn test_to_base_units() {
        assert_eq!(to_base_units(dec("1"), 18), Ok(U256::from(1_000_000_000_000_000_000u128)));
        assert_eq!(to_base_units(dec("12.5847"), 6), Ok(U256::from(12_584_700u128)));
        assert_eq!(to_base_units(dec("0"), 18), Ok(U256::ZERO));
        assert_eq!(to_base_units(dec("250"), 0), Ok(U256::from(250u128)));
    }

    #[test]
    fn test_to_base_units_truncates() {
        assert_eq!(to_base_units(dec("1.23456789"), 6), Ok(U256::from(1_234_567u128)));
        assert_eq!(to_base_units(dec("0.0000009"), 6), Ok(U256::ZERO));
    }

    #[test]
    fn test_to_base_units_large_amount() {
        let amount = dec("79228162514.264337593543950335");
        let expected = U256::from(79_228_162_514_264_337_593_543_950_335u128) * U256::from(10u128.pow(10));
        assert_eq!(to_base_units(amount, 28), Ok(expected));
    }

    #[test]
    fn test_to_base_units_rejects() {
        assert_eq!(to_base_units(dec("-1"), 18), Err(INVALID_AMOUNT));
        assert_eq!(to_base_units(dec("1"), 29), Err(INVALID_DECIMALS));
    }

    #[test]
    fn test_from_base_units() {
        assert_eq!(from_base_units(U256::from(1_500_000_000_000_000_000u128), 18), Ok(dec("1.5")));
        assert_eq!(from_base_units(U256::from(5_000_000_000u128), 6), Ok(dec("5000")));
        assert_eq!(from_base_units(U256::ZERO, 6), Ok(Decimal::ZERO));
    }

    #[test]
    fn test_from_base_units_out_of_range() {
        assert_eq!(from_base_units(U256::MAX, 18), Err(AMOUNT_EXCEEDS_DECIMAL_RANGE));
        assert_eq!(from_base_units(U256::from(u128::MAX), 18), Err(AMOUNT_EXCEEDS_DECIMAL_RANGE));
        assert_eq!(from_base_units(U256::ONE, 30), Err(INVALID_DECIMALS));
    }

    #[test]
    fn test_min_amount_with_slippage_tolerance() {
        assert_eq!(try_get_min_amount_with_slippage_tolerance(U256::from(1000u128), 1000), Ok(U256::from(900u128)));
        assert_eq!(try_get_min_amount_with_slippage_tolerance(U256::from(999u128), 50), Ok(U256::from(994u128)));
        assert_eq!(try_get_min_amount_with_slippage_tolerance(U256::from(1000u128), 0), Ok(U256::from(1000u128)));
        assert_eq!(try_get_min_amount_with_slippage_tolerance(U256::from(1000u128), 10_000), Ok(U256::ZERO));
    }

    #[test]
    fn test_min_amount_with_slippage_tolerance_rejects() {
        assert_eq!(try_get_min_amount_with_slippage_tolerance(U256::from(1000u128), 10_001), Err(INVALID_SLIPPAGE_TOLERANCE));
        assert_eq!(try_get_min_amount_with_slippage_tolerance(U256::MAX, 1), Err(ARITHMETIC_OVERFLOW));
    }
}
