//! Constant-product pricing.
//!
//! ```text
//! adjusted_in = floor(amount_in * (10000 - fee_bps) / 10000)
//! amount_out  = floor(reserve_out * adjusted_in / (reserve_in + adjusted_in))
//! ```
//!
//! The whole `amount_in` joins `reserve_in`, so the fee stays in the pool as
//! extra depth. Both floors round against the trader.

use crate::{constants::BPS_DENOMINATOR, error::PaperhandError, math::mul_div_floor};

/// Outcome of a single curve step, including the reserves it leaves behind
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapResult {
    pub amount_in: u64,
    pub amount_out: u64,
    pub new_reserve_in: u64,
    pub new_reserve_out: u64,
}

/// Input remaining after the fee is taken
pub fn fee_adjusted(amount_in: u64, fee_bps: u16) -> Result<u64, PaperhandError> {
    let keep_bps = BPS_DENOMINATOR
        .checked_sub(u64::from(fee_bps))
        .ok_or(PaperhandError::InvalidFee)?;
    mul_div_floor(amount_in, keep_bps, BPS_DENOMINATOR)
}

/// Output amount for `amount_in` against the given reserves
pub fn swap_output(
    amount_in: u64,
    reserve_in: u64,
    reserve_out: u64,
    fee_bps: u16,
) -> Result<u64, PaperhandError> {
    if amount_in == 0 {
        return Err(PaperhandError::InvalidAmount);
    }
    if reserve_in == 0 || reserve_out == 0 {
        return Err(PaperhandError::InsufficientLiquidity);
    }

    let adjusted_in = fee_adjusted(amount_in, fee_bps)?;

    let denominator = reserve_in
        .checked_add(adjusted_in)
        .ok_or(PaperhandError::ArithmeticOverflow)?;

    let amount_out = mul_div_floor(reserve_out, adjusted_in, denominator)?;

    if amount_out == 0 {
        return Err(PaperhandError::InsufficientOutput);
    }
    // the output reserve must never be emptied
    if amount_out >= reserve_out {
        return Err(PaperhandError::InsufficientLiquidity);
    }

    Ok(amount_out)
}

/// Price a swap and compute the reserves it produces
pub fn swap(
    amount_in: u64,
    reserve_in: u64,
    reserve_out: u64,
    fee_bps: u16,
) -> Result<SwapResult, PaperhandError> {
    let amount_out = swap_output(amount_in, reserve_in, reserve_out, fee_bps)?;

    let new_reserve_in = reserve_in
        .checked_add(amount_in)
        .ok_or(PaperhandError::ArithmeticOverflow)?;
    let new_reserve_out = reserve_out
        .checked_sub(amount_out)
        .ok_or(PaperhandError::InsufficientLiquidity)?;

    Ok(SwapResult {
        amount_in,
        amount_out,
        new_reserve_in,
        new_reserve_out,
    })
}
