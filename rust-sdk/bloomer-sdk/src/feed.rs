//
// Copyright (c) Cryptic Dot
//
// Licensed under FusionAMM SDK Source-Available License v1.0
// See the LICENSE file in the project root for license information.
//

use crate::{SdkConfig, SdkError};
use bloomer_core::{MarketSnapshot, PoolLiquidity, PriceEntry, Token, TokenPair};
use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{de::IgnoredAny, Deserialize};
use std::collections::HashMap;

/// Tokens priced by the CoinGecko simple price endpoint, keyed by CoinGecko id.
const COINGECKO_IDS: [(Token, &str); 4] = [(Token::Eth, "ethereum"), (Token::Btc, "bitcoin"), (Token::Usdc, "usd-coin"), (Token::Usdt, "tether")];

const SECONDS_PER_DAY: u64 = 86_400;

/// Shape of the price history shown while the OHLCV feed is unavailable, as multiples of the
/// fallback price, oldest day first.
const FALLBACK_HISTORY_SHAPE: [(i64, u32); 7] = [(95, 2), (98, 2), (92, 2), (105, 2), (108, 2), (112, 2), (1, 0)];

/// Counter tokens of BLOOM pools, in the order pool names are matched against them.
const POOL_COUNTER_TOKENS: [Token; 4] = [Token::Eth, Token::Usdc, Token::Usdt, Token::Btc];

#[derive(Deserialize)]
struct GeckoTerminalResponse<T> {
    data: Option<T>,
}

#[derive(Deserialize)]
struct GeckoTerminalResource<T> {
    attributes: Option<T>,
}

#[derive(Deserialize)]
struct Timeframes {
    h24: Option<Decimal>,
}

#[derive(Deserialize)]
struct TokenAttributes {
    price_usd: Option<Decimal>,
    price_change_percentage: Option<Timeframes>,
    volume_usd: Option<Timeframes>,
}

#[derive(Deserialize)]
struct PoolAttributes {
    name: Option<String>,
    reserve_in_usd: Option<Decimal>,
}

/// Rows are `[timestamp, open, high, low, close, volume]`.
#[derive(Deserialize)]
struct OhlcvAttributes {
    ohlcv_list: Option<Vec<(u64, IgnoredAny, IgnoredAny, IgnoredAny, Decimal, IgnoredAny)>>,
}

#[derive(Deserialize)]
struct CoinGeckoQuote {
    usd: Option<Decimal>,
    usd_24h_change: Option<Decimal>,
    usd_24h_vol: Option<Decimal>,
}

/// Decodes a GeckoTerminal token payload (`/networks/{network}/tokens/{address}`).
///
/// # Returns
/// The token's price entry, or `None` when the payload carries no price.
pub fn parse_gecko_terminal_token(payload: &str) -> Result<Option<PriceEntry>, SdkError> {
    let response: GeckoTerminalResponse<GeckoTerminalResource<TokenAttributes>> = serde_json::from_str(payload)?;
    let attributes = match response.data.and_then(|data| data.attributes) {
        Some(attributes) => attributes,
        None => return Ok(None),
    };
    Ok(attributes.price_usd.map(|usd_price| PriceEntry {
        usd_price,
        change_24h_pct: attributes.price_change_percentage.and_then(|change| change.h24).unwrap_or_default(),
        volume_24h_usd: attributes.volume_usd.and_then(|volume| volume.h24).unwrap_or_default(),
    }))
}

/// Decodes a CoinGecko simple price payload requested with `vs_currencies=usd`,
/// `include_24hr_change=true` and `include_24hr_vol=true`.
///
/// # Returns
/// Price entries of the tokens present in the payload.
pub fn parse_coingecko_simple_price(payload: &str) -> Result<HashMap<Token, PriceEntry>, SdkError> {
    let mut quotes: HashMap<String, CoinGeckoQuote> = serde_json::from_str(payload)?;
    let mut prices = HashMap::new();
    for (token, id) in COINGECKO_IDS {
        let Some(quote) = quotes.remove(id) else {
            continue;
        };
        if let Some(usd_price) = quote.usd {
            prices.insert(
                token,
                PriceEntry {
                    usd_price,
                    change_24h_pct: quote.usd_24h_change.unwrap_or_default(),
                    volume_24h_usd: quote.usd_24h_vol.unwrap_or_default(),
                },
            );
        }
    }
    Ok(prices)
}

/// Decodes a GeckoTerminal pool list of BLOOM (`/networks/{network}/tokens/{address}/pools`).
///
/// Each pool is attributed to the first counter token whose symbol appears in the pool name, so a
/// `BLOOM / WETH` pool counts as BLOOM/ETH. The deepest pool of each pair wins. Pairs absent from
/// the payload get a zero reserve.
pub fn parse_gecko_terminal_pools(payload: &str) -> Result<HashMap<TokenPair, PoolLiquidity>, SdkError> {
    let response: GeckoTerminalResponse<Vec<GeckoTerminalResource<PoolAttributes>>> = serde_json::from_str(payload)?;

    let mut reserves: HashMap<TokenPair, PoolLiquidity> = POOL_COUNTER_TOKENS
        .iter()
        .map(|token| (TokenPair::new(Token::Bloom, *token), PoolLiquidity::default()))
        .collect();

    for attributes in response.data.unwrap_or_default().into_iter().filter_map(|pool| pool.attributes) {
        let name = attributes.name.unwrap_or_default().to_lowercase();
        let reserve_usd = attributes.reserve_in_usd.unwrap_or_default();
        let Some(counter) = POOL_COUNTER_TOKENS.iter().find(|token| name.contains(&token.symbol().to_lowercase())) else {
            debug!("Skipping pool {name:?}: no supported counter token");
            continue;
        };
        let pool = reserves.entry(TokenPair::new(Token::Bloom, *counter)).or_default();
        if reserve_usd > pool.reserve_usd {
            *pool = PoolLiquidity::new(reserve_usd);
        }
    }

    Ok(reserves)
}

/// Daily closing price of a token.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PricePoint {
    /// Start of the day, unix seconds.
    pub timestamp: u64,
    pub price_usd: Decimal,
}

/// Decodes a GeckoTerminal OHLCV payload (`/networks/{network}/tokens/{address}/ohlcv/day`).
///
/// # Returns
/// The closing price of each candle, oldest first.
pub fn parse_gecko_terminal_ohlcv(payload: &str) -> Result<Vec<PricePoint>, SdkError> {
    let response: GeckoTerminalResponse<GeckoTerminalResource<OhlcvAttributes>> = serde_json::from_str(payload)?;
    let mut points: Vec<PricePoint> = response
        .data
        .and_then(|data| data.attributes)
        .and_then(|attributes| attributes.ohlcv_list)
        .unwrap_or_default()
        .into_iter()
        .map(|(timestamp, _, _, _, close, _)| PricePoint {
            timestamp,
            price_usd: close.max(Decimal::ZERO),
        })
        .collect();
    points.sort_by_key(|point| point.timestamp);
    Ok(points)
}

/// A week of synthetic daily prices around `base_price_usd`, ending at `now`.
pub fn fallback_price_history(base_price_usd: Decimal, now: u64) -> Vec<PricePoint> {
    let days = FALLBACK_HISTORY_SHAPE.len() as u64;
    FALLBACK_HISTORY_SHAPE
        .iter()
        .zip(1..=days)
        .map(|(&(num, scale), day)| PricePoint {
            timestamp: now.saturating_sub((days - day) * SECONDS_PER_DAY),
            price_usd: base_price_usd.saturating_mul(Decimal::new(num, scale)),
        })
        .collect()
}

/// Price history of `token` from an OHLCV payload. An empty or undecodable payload yields the
/// fallback history around the token's fallback price.
pub fn price_history(config: &SdkConfig, token: Token, payload: &str, now: u64) -> Vec<PricePoint> {
    match parse_gecko_terminal_ohlcv(payload) {
        Ok(points) if !points.is_empty() => points,
        Ok(_) => {
            warn!("OHLCV payload for {token} has no candles, using fallback history");
            fallback_price_history(config.token(token).fallback_price_usd, now)
        }
        Err(err) => {
            warn!("Failed to decode OHLCV payload for {token}, using fallback history: {err}");
            fallback_price_history(config.token(token).fallback_price_usd, now)
        }
    }
}

/// Assembles a [`MarketSnapshot`] from raw feed payloads.
///
/// Feeds that fail to decode are replaced by the fallback prices and reserves of the
/// [`SdkConfig`], so a snapshot is always produced.
pub struct MarketSnapshotBuilder<'a> {
    config: &'a SdkConfig,
    snapshot: MarketSnapshot,
}

impl<'a> MarketSnapshotBuilder<'a> {
    pub fn new(config: &'a SdkConfig, observed_at: u64) -> Self {
        Self {
            config,
            snapshot: MarketSnapshot::new(observed_at),
        }
    }

    /// Applies a GeckoTerminal token payload describing `token`.
    pub fn with_gecko_terminal_token(mut self, token: Token, payload: &str) -> Self {
        let entry = match parse_gecko_terminal_token(payload) {
            Ok(Some(entry)) => entry,
            Ok(None) => {
                warn!("GeckoTerminal payload has no price for {token}, using fallback");
                self.fallback_price(token)
            }
            Err(err) => {
                warn!("Failed to decode GeckoTerminal payload for {token}, using fallback: {err}");
                self.fallback_price(token)
            }
        };
        self.snapshot.prices.insert(token, entry);
        self
    }

    /// Applies a CoinGecko simple price payload.
    pub fn with_coingecko_prices(mut self, payload: &str) -> Self {
        let mut prices = match parse_coingecko_simple_price(payload) {
            Ok(prices) => prices,
            Err(err) => {
                warn!("Failed to decode CoinGecko payload, using fallback prices: {err}");
                HashMap::new()
            }
        };
        for (token, _) in COINGECKO_IDS {
            let entry = match prices.remove(&token) {
                Some(entry) => entry,
                None => {
                    warn!("CoinGecko payload has no price for {token}, using fallback");
                    self.fallback_price(token)
                }
            };
            self.snapshot.prices.insert(token, entry);
        }
        self
    }

    /// Applies a GeckoTerminal pool list payload.
    pub fn with_gecko_terminal_pools(mut self, payload: &str) -> Self {
        match parse_gecko_terminal_pools(payload) {
            Ok(pools) => self.snapshot.pool_liquidity.extend(pools),
            Err(err) => {
                warn!("Failed to decode GeckoTerminal pools payload, using fallback reserves: {err}");
                self = self.with_fallback_pools();
            }
        }
        self
    }

    /// Fills every token without a price with its fallback price.
    pub fn with_fallback_prices(mut self) -> Self {
        for token in Token::ALL {
            if !self.snapshot.prices.contains_key(&token) {
                let entry = self.fallback_price(token);
                self.snapshot.prices.insert(token, entry);
            }
        }
        self
    }

    pub fn with_fallback_pools(mut self) -> Self {
        for pool in &self.config.fallback_pools {
            self.snapshot.pool_liquidity.insert(pool.pair(), PoolLiquidity::new(pool.reserve_usd));
        }
        self
    }

    pub fn build(self) -> MarketSnapshot {
        debug!(
            "Built market snapshot at {} with {} prices and {} pools",
            self.snapshot.observed_at,
            self.snapshot.prices.len(),
            self.snapshot.pool_liquidity.len()
        );
        self.snapshot
    }

    fn fallback_price(&self, token: Token) -> PriceEntry {
        PriceEntry::new(self.config.token(token).fallback_price_usd)
    }
}
