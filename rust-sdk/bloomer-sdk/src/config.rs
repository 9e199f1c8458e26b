//
// Copyright (c) Cryptic Dot
//
// Licensed under FusionAMM SDK Source-Available License v1.0
// See the LICENSE file in the project root for license information.
//

use crate::SdkError;
use alloy_primitives::{address, Address};
use bloomer_core::{QuoteConfig, Token, TokenPair, BPS_DENOMINATOR, DEFAULT_SLIPPAGE_TOLERANCE_BPS, MAX_TOKEN_DECIMALS};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Base mainnet.
pub const DEFAULT_CHAIN_ID: u64 = 8453;

/// Uniswap V3 SwapRouter on Base.
pub const DEFAULT_SWAP_ROUTER: Address = address!("0x2626664c2603336e57b271c5c0b26f421741e481");

pub const BLOOM_ADDRESS: Address = address!("0x14d1461e2a88929d9ac36c152bd54f58cb8095fe");

/// Wrapped ether; ETH legs of a swap are routed through it.
pub const WETH_ADDRESS: Address = address!("0x4200000000000000000000000000000000000006");

pub const USDC_ADDRESS: Address = address!("0x833589fcd6edb6e08f4c7c32d4f71b54bda02913");

pub const USDT_ADDRESS: Address = address!("0xfde4c96c8593536e31f229ea8f37b2ada2699bb2");

/// Pool fee tier, in hundredths of a basis point. 3000 is 0.3%.
pub const DEFAULT_FEE_TIER: u32 = 3000;

/// Swaps expire this many seconds after they are prepared.
pub const DEFAULT_SWAP_DEADLINE_SECS: u64 = 1200;

pub const DEFAULT_PRICE_REFRESH_SECS: u64 = 30;

pub const DEFAULT_LIQUIDITY_REFRESH_SECS: u64 = 60;

pub const DEFAULT_HISTORY_REFRESH_SECS: u64 = 300;

/// Parses a `0x`-prefixed hex address. Checksums are not enforced.
pub fn parse_address(value: &str) -> Result<Address, SdkError> {
    let value = value.trim();
    if !value.starts_with("0x") && !value.starts_with("0X") {
        return Err(SdkError::InvalidAddress(value.to_string()));
    }
    value.parse::<Address>().map_err(|_| SdkError::InvalidAddress(value.to_string()))
}

/// Market data feeds, each polled on its own interval.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FeedKind {
    Prices,
    Liquidity,
    History,
}

/// Per-token settings.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSettings {
    /// ERC20 contract. `None` for tokens that cannot be swapped on this chain.
    #[serde(default)]
    pub address: Option<Address>,
    pub decimals: u8,
    /// Price reported when the price feed is unavailable.
    pub fallback_price_usd: Decimal,
}

impl TokenSettings {
    pub fn default_for(token: Token) -> Self {
        let (address, fallback_price_usd) = match token {
            Token::Bloom => (Some(BLOOM_ADDRESS), Decimal::new(3538, 8)),
            Token::Eth => (Some(WETH_ADDRESS), Decimal::from(3500)),
            Token::Btc => (None, Decimal::from(50_000)),
            Token::Usdc => (Some(USDC_ADDRESS), Decimal::ONE),
            Token::Usdt => (Some(USDT_ADDRESS), Decimal::ONE),
        };
        Self {
            address,
            decimals: token.default_decimals(),
            fallback_price_usd,
        }
    }
}

/// Pool reserve reported when the liquidity feed is unavailable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackPool {
    pub token_a: Token,
    pub token_b: Token,
    pub reserve_usd: Decimal,
}

impl FallbackPool {
    pub fn pair(&self) -> TokenPair {
        TokenPair::new(self.token_a, self.token_b)
    }
}

fn default_fallback_pools() -> Vec<FallbackPool> {
    vec![
        FallbackPool {
            token_a: Token::Bloom,
            token_b: Token::Eth,
            reserve_usd: Decimal::from(50_000),
        },
        FallbackPool {
            token_a: Token::Bloom,
            token_b: Token::Usdc,
            reserve_usd: Decimal::from(30_000),
        },
        FallbackPool {
            token_a: Token::Bloom,
            token_b: Token::Usdt,
            reserve_usd: Decimal::from(25_000),
        },
    ]
}

/// Everything the SDK needs to know about the deployment. Built once and passed by reference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SdkConfig {
    pub chain_id: u64,
    pub swap_router: Address,
    pub fee_tier: u32,
    pub deadline_secs: u64,
    pub default_slippage_bps: u16,
    pub price_refresh_secs: u64,
    pub liquidity_refresh_secs: u64,
    pub history_refresh_secs: u64,
    /// Overrides of the built-in token settings.
    pub tokens: HashMap<Token, TokenSettings>,
    pub fallback_pools: Vec<FallbackPool>,
    pub quote: QuoteConfig,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            chain_id: DEFAULT_CHAIN_ID,
            swap_router: DEFAULT_SWAP_ROUTER,
            fee_tier: DEFAULT_FEE_TIER,
            deadline_secs: DEFAULT_SWAP_DEADLINE_SECS,
            default_slippage_bps: DEFAULT_SLIPPAGE_TOLERANCE_BPS,
            price_refresh_secs: DEFAULT_PRICE_REFRESH_SECS,
            liquidity_refresh_secs: DEFAULT_LIQUIDITY_REFRESH_SECS,
            history_refresh_secs: DEFAULT_HISTORY_REFRESH_SECS,
            tokens: HashMap::new(),
            fallback_pools: default_fallback_pools(),
            quote: QuoteConfig::default(),
        }
    }
}

impl SdkConfig {
    /// Parses and validates a TOML document. Missing keys take their default values.
    pub fn from_toml_str(source: &str) -> Result<Self, SdkError> {
        let config: SdkConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SdkError> {
        if self.default_slippage_bps > BPS_DENOMINATOR {
            return Err(SdkError::InvalidConfig(format!("default_slippage_bps {} exceeds {}", self.default_slippage_bps, BPS_DENOMINATOR)));
        }
        if self.quote.liquidity_fraction_bps > BPS_DENOMINATOR {
            return Err(SdkError::InvalidConfig(format!(
                "quote.liquidity_fraction_bps {} exceeds {}",
                self.quote.liquidity_fraction_bps, BPS_DENOMINATOR
            )));
        }
        if self.quote.price_impact_clamp_pct.is_sign_negative() || self.quote.max_price_impact_pct.is_sign_negative() {
            return Err(SdkError::InvalidConfig("price impact thresholds must not be negative".to_string()));
        }
        if self.deadline_secs == 0 {
            return Err(SdkError::InvalidConfig("deadline_secs must be positive".to_string()));
        }
        if self.price_refresh_secs == 0 || self.liquidity_refresh_secs == 0 || self.history_refresh_secs == 0 {
            return Err(SdkError::InvalidConfig("refresh intervals must be positive".to_string()));
        }
        for (token, settings) in &self.tokens {
            if settings.decimals > MAX_TOKEN_DECIMALS {
                return Err(SdkError::InvalidConfig(format!("{} decimals {} exceed {}", token, settings.decimals, MAX_TOKEN_DECIMALS)));
            }
            if settings.fallback_price_usd.is_sign_negative() {
                return Err(SdkError::InvalidConfig(format!("{} fallback price must not be negative", token)));
            }
        }
        Ok(())
    }

    /// Settings of `token`: the configured override or the built-in default.
    pub fn token(&self, token: Token) -> TokenSettings {
        self.tokens.get(&token).copied().unwrap_or_else(|| TokenSettings::default_for(token))
    }

    pub fn decimals(&self, token: Token) -> u8 {
        self.token(token).decimals
    }

    pub fn token_address(&self, token: Token) -> Result<Address, SdkError> {
        self.token(token).address.ok_or(SdkError::MissingTokenAddress(token))
    }

    pub fn refresh_interval_secs(&self, feed: FeedKind) -> u64 {
        match feed {
            FeedKind::Prices => self.price_refresh_secs,
            FeedKind::Liquidity => self.liquidity_refresh_secs,
            FeedKind::History => self.history_refresh_secs,
        }
    }

    /// Whether `feed`, last fetched at `last_fetched_at`, should be fetched again at `now`.
    /// A feed that was never fetched is always due.
    pub fn is_refresh_due(&self, feed: FeedKind, last_fetched_at: Option<u64>, now: u64) -> bool {
        match last_fetched_at {
            Some(fetched_at) => now.saturating_sub(fetched_at) >= self.refresh_interval_secs(feed),
            None => true,
        }
    }
}
