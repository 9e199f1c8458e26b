//
// Copyright (c) Cryptic Dot
//
// Licensed under FusionAMM SDK Source-Available License v1.0
// See the LICENSE file in the project root for license information.
//

use rust_decimal::Decimal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// USD-denominated reserve of a trading pool, used as a proxy for how far a trade moves the price.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PoolLiquidity {
    pub reserve_usd: Decimal,
}

impl PoolLiquidity {
    pub fn new(reserve_usd: Decimal) -> Self {
        Self {
            reserve_usd: reserve_usd.max(Decimal::ZERO),
        }
    }
}
