//
// Copyright (c) Cryptic Dot
//
// Licensed under FusionAMM SDK Source-Available License v1.0
// See the LICENSE file in the project root for license information.
//

pub type CoreError = &'static str;

pub const ARITHMETIC_OVERFLOW: CoreError = "Arithmetic over- or underflow";

pub const INVALID_SLIPPAGE_TOLERANCE: CoreError = "Invalid slippage tolerance";

pub const INVALID_AMOUNT: CoreError = "Invalid amount";

pub const UNKNOWN_TOKEN: CoreError = "Unknown token";

pub const SAME_TOKEN_PAIR: CoreError = "Source and destination token are the same";

pub const INVALID_DECIMALS: CoreError = "Invalid token decimals";

pub const AMOUNT_EXCEEDS_DECIMAL_RANGE: CoreError = "Amount exceeds decimal range";
