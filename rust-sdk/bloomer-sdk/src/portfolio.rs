//
// Copyright (c) Cryptic Dot
//
// Licensed under FusionAMM SDK Source-Available License v1.0
// See the LICENSE file in the project root for license information.
//

use bloomer_core::{Balances, MarketSnapshot, Token};
use rust_decimal::Decimal;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PortfolioEntry {
    pub token: Token,
    pub balance: Decimal,
    pub usd_value: Decimal,
    pub change_24h_pct: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct PortfolioSummary {
    pub entries: Vec<PortfolioEntry>,
    pub total_usd: Decimal,
    /// 24h change of the whole portfolio, weighted by the USD value of each holding.
    pub change_24h_pct: Decimal,
}

/// Values the non-zero holdings of an account at the snapshot prices.
///
/// # Arguments
/// * `balances` - Holdings of the account.
/// * `market` - The price snapshot.
/// * `fallback_price_usd` - Price for tokens the snapshot has no entry for.
///
/// # Returns
/// One entry per held token, in catalogue order, and the totals.
pub fn value_portfolio(balances: &Balances, market: &MarketSnapshot, fallback_price_usd: Decimal) -> PortfolioSummary {
    let entries: Vec<PortfolioEntry> = Token::ALL
        .iter()
        .filter_map(|&token| {
            let balance = balances.get(token);
            if balance <= Decimal::ZERO {
                return None;
            }
            let change_24h_pct = market.prices.get(&token).map(|entry| entry.change_24h_pct).unwrap_or_default();
            Some(PortfolioEntry {
                token,
                balance,
                usd_value: balance.saturating_mul(market.price_usd(token, fallback_price_usd)),
                change_24h_pct,
            })
        })
        .collect();

    let total_usd = entries.iter().fold(Decimal::ZERO, |total, entry| total.saturating_add(entry.usd_value));
    let weighted_change = entries
        .iter()
        .fold(Decimal::ZERO, |total, entry| total.saturating_add(entry.usd_value.saturating_mul(entry.change_24h_pct)));
    let change_24h_pct = weighted_change.checked_div(total_usd).unwrap_or(Decimal::ZERO);

    PortfolioSummary {
        entries,
        total_usd,
        change_24h_pct,
    }
}
