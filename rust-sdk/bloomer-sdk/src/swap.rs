//
// Copyright (c) Cryptic Dot
//
// Licensed under FusionAMM SDK Source-Available License v1.0
// See the LICENSE file in the project root for license information.
//

use crate::{Address, SdkConfig, SdkError};
use bloomer_core::{to_base_units, try_get_min_amount_with_slippage_tolerance, QuoteInput, QuoteResult, QuoteStatus, Token, ARITHMETIC_OVERFLOW, INVALID_AMOUNT};
use ethnum::U256;
use log::debug;

/// Parameters of an exact-input single-pool swap through the configured router.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SwapRequest {
    pub router: Address,
    pub token_in: Address,
    pub token_out: Address,
    /// Pool fee tier, in hundredths of a basis point.
    pub fee: u32,
    pub recipient: Address,
    /// Unix timestamp after which the router rejects the swap.
    pub deadline: u64,
    pub amount_in: U256,
    pub amount_out_minimum: U256,
    /// Zero disables the price limit.
    pub sqrt_price_limit_x96: U256,
    /// Native value attached to the call; non-zero only when paying with ETH.
    pub value: U256,
}

/// Builds the router call for a quoted swap. Signing and submitting it is up to the wallet.
///
/// # Arguments
/// * `input` - The quoted input.
/// * `quote` - The quote computed for `input`. Only `Ok` quotes are accepted.
/// * `recipient` - The account receiving the output tokens.
/// * `now` - The current unix timestamp, in seconds.
/// * `config` - Deployment settings (router, fee tier, token addresses and decimals).
///
/// # Returns
/// The swap request. Its minimum output applies the input's slippage tolerance to the quoted
/// amount, in the output token's base units.
pub fn prepare_swap(input: &QuoteInput, quote: &QuoteResult, recipient: Address, now: u64, config: &SdkConfig) -> Result<SwapRequest, SdkError> {
    if quote.status != QuoteStatus::Ok {
        return Err(SdkError::QuoteNotExecutable(quote.status));
    }
    let source_amount = input.source_amount.ok_or(SdkError::Core(INVALID_AMOUNT))?;

    let token_in = config.token_address(input.source_token)?;
    let token_out = config.token_address(input.dest_token)?;

    let amount_in = to_base_units(source_amount, config.decimals(input.source_token))?;
    let estimated_out = to_base_units(quote.dest_amount, config.decimals(input.dest_token))?;
    let amount_out_minimum = try_get_min_amount_with_slippage_tolerance(estimated_out, input.slippage_tolerance_bps)?;
    let deadline = now.checked_add(config.deadline_secs).ok_or(SdkError::Core(ARITHMETIC_OVERFLOW))?;
    let value = if input.source_token.is_native() { amount_in } else { U256::ZERO };

    debug!(
        "Prepared {} -> {} swap: amount_in={} amount_out_minimum={} deadline={}",
        input.source_token, input.dest_token, amount_in, amount_out_minimum, deadline
    );

    Ok(SwapRequest {
        router: config.swap_router,
        token_in,
        token_out,
        fee: config.fee_tier,
        recipient,
        deadline,
        amount_in,
        amount_out_minimum,
        sqrt_price_limit_x96: U256::ZERO,
        value,
    })
}

/// Whether the router must be approved to spend `amount_in` of `token` before swapping.
/// Native ETH is sent as call value and never needs an approval.
pub fn approval_required(token: Token, allowance: U256, amount_in: U256) -> bool {
    !token.is_native() && allowance < amount_in
}

/// ERC20 `approve(spender, amount)` call letting the router pull the swap input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ApproveRequest {
    /// The token contract the call is sent to.
    pub token: Address,
    pub spender: Address,
    pub amount: U256,
}

/// Builds the approval that must precede a swap of `amount_in` of `token`.
///
/// # Returns
/// `None` when the current `allowance` already covers the swap or the token is native ETH.
pub fn prepare_approval(token: Token, allowance: U256, amount_in: U256, config: &SdkConfig) -> Result<Option<ApproveRequest>, SdkError> {
    if !approval_required(token, allowance, amount_in) {
        return Ok(None);
    }
    let request = ApproveRequest {
        token: config.token_address(token)?,
        spender: config.swap_router,
        amount: amount_in,
    };
    debug!("Prepared approval of {} {} for {}", amount_in, token, request.spender);
    Ok(Some(request))
}
