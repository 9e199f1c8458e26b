//
// Copyright (c) Cryptic Dot
//
// Licensed under FusionAMM SDK Source-Available License v1.0
// See the LICENSE file in the project root for license information.
//

use crate::{PoolLiquidity, Token, TokenPair};
use rust_decimal::Decimal;
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Latest spot data for a single token.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PriceEntry {
    pub usd_price: Decimal,
    pub change_24h_pct: Decimal,
    pub volume_24h_usd: Decimal,
}

impl PriceEntry {
    pub fn new(usd_price: Decimal) -> Self {
        Self {
            usd_price,
            ..Self::default()
        }
    }

    pub fn with_change(usd_price: Decimal, change_24h_pct: Decimal) -> Self {
        Self {
            usd_price,
            change_24h_pct,
            ..Self::default()
        }
    }
}

/// Prices and pool reserves as last reported by the feeds. A snapshot is never mutated while a
/// quote is computed against it; feeds replace it wholesale.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct MarketSnapshot {
    pub prices: HashMap<Token, PriceEntry>,
    pub pool_liquidity: HashMap<TokenPair, PoolLiquidity>,
    /// Unix timestamp, in seconds, at which the feeds produced this snapshot.
    pub observed_at: u64,
}

impl MarketSnapshot {
    pub fn new(observed_at: u64) -> Self {
        Self {
            observed_at,
            ..Self::default()
        }
    }

    pub fn with_price(mut self, token: Token, entry: PriceEntry) -> Self {
        self.prices.insert(token, entry);
        self
    }

    pub fn with_pool(mut self, token_1: Token, token_2: Token, reserve_usd: Decimal) -> Self {
        self.pool_liquidity.insert(TokenPair::new(token_1, token_2), PoolLiquidity::new(reserve_usd));
        self
    }

    /// USD price of `token`, or `fallback` when the feed has no entry for it.
    /// Negative prices are treated as zero.
    pub fn price_usd(&self, token: Token, fallback: Decimal) -> Decimal {
        self.prices
            .get(&token)
            .map(|entry| entry.usd_price)
            .unwrap_or(fallback)
            .max(Decimal::ZERO)
    }

    /// USD reserve of the pool trading `token_1` against `token_2`. Unknown pools have no reserve.
    pub fn reserve_usd(&self, token_1: Token, token_2: Token) -> Decimal {
        self.pool_liquidity
            .get(&TokenPair::new(token_1, token_2))
            .map(|pool| pool.reserve_usd)
            .unwrap_or(Decimal::ZERO)
            .max(Decimal::ZERO)
    }

    /// Seconds elapsed between `observed_at` and `now`. A snapshot from the future has age zero.
    pub fn age_secs(&self, now: u64) -> u64 {
        now.saturating_sub(self.observed_at)
    }
}

/// Holdings of the connected account. An account that is not connected holds nothing.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Balances {
    amounts: HashMap<Token, Decimal>,
}

impl Balances {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, token: Token, amount: Decimal) -> Self {
        self.set(token, amount);
        self
    }

    pub fn set(&mut self, token: Token, amount: Decimal) {
        self.amounts.insert(token, amount.max(Decimal::ZERO));
    }

    pub fn get(&self, token: Token) -> Decimal {
        self.amounts.get(&token).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.values().all(|amount| amount.is_zero())
    }
}
