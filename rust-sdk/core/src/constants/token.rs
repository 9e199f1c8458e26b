//
// Copyright (c) Cryptic Dot
//
// Licensed under FusionAMM SDK Source-Available License v1.0
// See the LICENSE file in the project root for license information.
//

/// Largest number of token decimals a `Decimal` amount can represent.
pub const MAX_TOKEN_DECIMALS: u8 = 28;

pub const ETH_DECIMALS: u8 = 18;

pub const BLOOM_DECIMALS: u8 = 18;

pub const BTC_DECIMALS: u8 = 8;

pub const USD_STABLE_DECIMALS: u8 = 6;
