//
// Copyright (c) Cryptic Dot
//
// Licensed under FusionAMM SDK Source-Available License v1.0
// See the LICENSE file in the project root for license information.
//

/// Basis points in one whole (100%).
pub const BPS_DENOMINATOR: u16 = 10_000;

/// The default slippage tolerance, expressed in basis points. Value of 50 is equivalent to 0.5%.
pub const DEFAULT_SLIPPAGE_TOLERANCE_BPS: u16 = 50;

/// Share of a pool's USD reserve a single swap may consume before it is rejected, in basis points.
pub const DEFAULT_LIQUIDITY_FRACTION_BPS: u16 = 1_000;

/// Price impact, in percent, above which a quote is rejected.
pub const DEFAULT_MAX_PRICE_IMPACT_PCT: u16 = 20;

/// Upper bound, in percent, of the estimated price impact.
pub const DEFAULT_PRICE_IMPACT_CLAMP_PCT: u16 = 50;

/// Market snapshots older than this are considered stale.
pub const DEFAULT_MAX_SNAPSHOT_AGE_SECS: u64 = 90;
