//
// Copyright (c) Cryptic Dot
//
// Licensed under FusionAMM SDK Source-Available License v1.0
// See the LICENSE file in the project root for license information.
//

use crate::{Balances, StakeQuote, StakeStatus, StakingPool};
use rust_decimal::Decimal;

const DAYS_PER_YEAR: u16 = 365;

/// Estimates the yearly reward for staking `amount` into `pool` and checks the stake can be made.
///
/// # Arguments
/// - `amount`: The amount to stake, `None` while the field is empty.
/// - `pool`: The staking pool.
/// - `balances`: Holdings of the connected account.
///
/// # Returns
/// The reward estimate (`amount * apy / 100`) and a status. A balance shortfall is reported before
/// an amount below the pool minimum.
pub fn stake_quote(amount: Option<Decimal>, pool: &StakingPool, balances: &Balances) -> StakeQuote {
    let amount = match amount {
        Some(amount) if amount > Decimal::ZERO => amount,
        _ => return StakeQuote::default(),
    };

    let estimated_annual_reward = amount.saturating_mul(pool.apy_pct.max(Decimal::ZERO)) / Decimal::ONE_HUNDRED;
    let estimated_lock_reward = pool
        .lock_period_days
        .map(|days| estimated_annual_reward.saturating_mul(Decimal::from(days)) / Decimal::from(DAYS_PER_YEAR));

    let status = if amount > balances.get(pool.token) {
        StakeStatus::InsufficientBalance
    } else if amount < pool.min_stake {
        StakeStatus::BelowMinimum
    } else {
        StakeStatus::Ok
    };

    StakeQuote {
        estimated_annual_reward,
        estimated_lock_reward,
        status,
    }
}
