//
// Copyright (c) Cryptic Dot
//
// Licensed under FusionAMM SDK Source-Available License v1.0
// See the LICENSE file in the project root for license information.
//

use bloomer_core::{
    compute_quote, is_snapshot_stale, parse_amount, reverse_quote, Balances, CoreError, MarketSnapshot, QuoteConfig, QuoteInput, QuoteResult, Token,
    INVALID_SLIPPAGE_TOLERANCE, BPS_DENOMINATOR,
};
use log::debug;
use rust_decimal::Decimal;

/// The state behind a swap form. Every setter recomputes the quote against the latest market
/// snapshot and balances, so `result()` is always current.
#[derive(Clone, Debug)]
pub struct QuoteSession {
    config: QuoteConfig,
    input: QuoteInput,
    market: MarketSnapshot,
    balances: Balances,
    result: QuoteResult,
}

impl QuoteSession {
    /// Starts an empty session with no market data and a disconnected account.
    pub fn new(config: QuoteConfig, source_token: Token, dest_token: Token, slippage_tolerance_bps: u16) -> Result<Self, CoreError> {
        let input = QuoteInput::new(source_token, dest_token, None, slippage_tolerance_bps)?;
        Ok(Self {
            config,
            input,
            market: MarketSnapshot::default(),
            balances: Balances::new(),
            result: QuoteResult::idle(),
        })
    }

    pub fn input(&self) -> &QuoteInput {
        &self.input
    }

    pub fn result(&self) -> &QuoteResult {
        &self.result
    }

    pub fn market(&self) -> &MarketSnapshot {
        &self.market
    }

    pub fn balances(&self) -> &Balances {
        &self.balances
    }

    pub fn set_amount(&mut self, amount: Option<Decimal>) -> Result<(), CoreError> {
        self.input = QuoteInput::new(self.input.source_token, self.input.dest_token, amount, self.input.slippage_tolerance_bps)?;
        self.recompute();
        Ok(())
    }

    /// Sets the amount from the text of the amount field. An empty field clears it.
    pub fn set_amount_str(&mut self, value: &str) -> Result<(), CoreError> {
        self.set_amount(parse_amount(value)?)
    }

    /// Selecting the current destination token swaps the two sides.
    pub fn set_source_token(&mut self, token: Token) {
        if token == self.input.source_token {
            return;
        }
        if token == self.input.dest_token {
            self.input.dest_token = self.input.source_token;
        }
        self.input.source_token = token;
        self.recompute();
    }

    /// Selecting the current source token swaps the two sides.
    pub fn set_dest_token(&mut self, token: Token) {
        if token == self.input.dest_token {
            return;
        }
        if token == self.input.source_token {
            self.input.source_token = self.input.dest_token;
        }
        self.input.dest_token = token;
        self.recompute();
    }

    pub fn set_slippage_bps(&mut self, slippage_tolerance_bps: u16) -> Result<(), CoreError> {
        if slippage_tolerance_bps > BPS_DENOMINATOR {
            return Err(INVALID_SLIPPAGE_TOLERANCE);
        }
        self.input.slippage_tolerance_bps = slippage_tolerance_bps;
        self.recompute();
        Ok(())
    }

    /// Replaces the market snapshot.
    pub fn update_market(&mut self, market: MarketSnapshot) {
        debug!("Market snapshot replaced (observed at {})", market.observed_at);
        self.market = market;
        self.recompute();
    }

    /// Replaces the balances, e.g. after a wallet connects, disconnects or a swap settles.
    pub fn update_balances(&mut self, balances: Balances) {
        self.balances = balances;
        self.recompute();
    }

    /// Flips the swap direction. The quoted destination amount becomes the new source amount.
    pub fn toggle_direction(&mut self) {
        let (input, result) = reverse_quote(&self.input, &self.result, &self.market, &self.balances, &self.config);
        self.input = input;
        self.result = result;
        debug!("Swap direction flipped to {} -> {}: {:?}", self.input.source_token, self.input.dest_token, self.result.status);
    }

    pub fn is_stale(&self, now: u64) -> bool {
        is_snapshot_stale(&self.market, now, &self.config)
    }

    /// Whether the current quote may be turned into a swap at `now`.
    pub fn can_submit(&self, now: u64) -> bool {
        self.result.status.is_submittable() && !self.is_stale(now)
    }

    fn recompute(&mut self) {
        self.result = compute_quote(&self.input, &self.market, &self.balances, &self.config);
        debug!(
            "Quote {} -> {} recomputed: dest_amount={} impact={}% status={:?}",
            self.input.source_token, self.input.dest_token, self.result.dest_amount, self.result.price_impact_pct, self.result.status
        );
    }
}
