//
// Copyright (c) Cryptic Dot
//
// Licensed under FusionAMM SDK Source-Available License v1.0
// See the LICENSE file in the project root for license information.
//

use crate::{CoreError, BLOOM_DECIMALS, BTC_DECIMALS, ETH_DECIMALS, UNKNOWN_TOKEN, USD_STABLE_DECIMALS};
use std::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tokens supported by the swap and staking screens.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "UPPERCASE"))]
pub enum Token {
    Bloom,
    Eth,
    Btc,
    Usdc,
    Usdt,
}

impl Token {
    pub const ALL: [Token; 5] = [Token::Bloom, Token::Eth, Token::Btc, Token::Usdc, Token::Usdt];

    pub fn symbol(&self) -> &'static str {
        match self {
            Token::Bloom => "BLOOM",
            Token::Eth => "ETH",
            Token::Btc => "BTC",
            Token::Usdc => "USDC",
            Token::Usdt => "USDT",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Token::Bloom => "Base Bloomer",
            Token::Eth => "Ethereum",
            Token::Btc => "Bitcoin",
            Token::Usdc => "USD Coin",
            Token::Usdt => "Tether",
        }
    }

    /// Decimals of the token's on-chain representation.
    pub fn default_decimals(&self) -> u8 {
        match self {
            Token::Bloom => BLOOM_DECIMALS,
            Token::Eth => ETH_DECIMALS,
            Token::Btc => BTC_DECIMALS,
            Token::Usdc | Token::Usdt => USD_STABLE_DECIMALS,
        }
    }

    /// Native gas token, spent without an ERC20 approval.
    pub fn is_native(&self) -> bool {
        matches!(self, Token::Eth)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Token {
    type Err = CoreError;

    /// Parses a ticker symbol. Matching is case insensitive and `WETH` resolves to `ETH`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BLOOM" => Ok(Token::Bloom),
            "ETH" | "WETH" => Ok(Token::Eth),
            "BTC" | "WBTC" | "CBBTC" => Ok(Token::Btc),
            "USDC" => Ok(Token::Usdc),
            "USDT" => Ok(Token::Usdt),
            _ => Err(UNKNOWN_TOKEN),
        }
    }
}

/// An unordered token pair, stored in canonical order so that both directions of a swap
/// resolve to the same pool.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TokenPair {
    pub token_a: Token,
    pub token_b: Token,
}

impl TokenPair {
    pub fn new(token_1: Token, token_2: Token) -> Self {
        if token_1 <= token_2 {
            Self {
                token_a: token_1,
                token_b: token_2,
            }
        } else {
            Self {
                token_a: token_2,
                token_b: token_1,
            }
        }
    }

    pub fn contains(&self, token: Token) -> bool {
        self.token_a == token || self.token_b == token
    }
}

impl fmt::Display for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.token_a, self.token_b)
    }
}
