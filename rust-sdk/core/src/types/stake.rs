//
// Copyright (c) Cryptic Dot
//
// Licensed under FusionAMM SDK Source-Available License v1.0
// See the LICENSE file in the project root for license information.
//

use crate::Token;
use rust_decimal::Decimal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StakingPool {
    pub token: Token,
    pub apy_pct: Decimal,
    pub min_stake: Decimal,
    /// `None` for flexible pools.
    pub lock_period_days: Option<u16>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StakeStatus {
    #[default]
    Idle,
    Ok,
    InsufficientBalance,
    BelowMinimum,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StakeQuote {
    pub estimated_annual_reward: Decimal,
    /// Reward accrued over the lock period. `None` for flexible pools.
    pub estimated_lock_reward: Option<Decimal>,
    pub status: StakeStatus,
}
