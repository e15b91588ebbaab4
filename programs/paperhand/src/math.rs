//! Widened integer helpers shared by the curve and the cost-basis ledger.
//!
//! Every `a * b / c` in the program goes through [`mul_div_floor`] so the
//! product is formed in 256 bits and overflow is reported before the result
//! is narrowed back to `u64`.

use uint::construct_uint;

use crate::error::PaperhandError;

construct_uint! {
    /// 256-bit integer for intermediate products.
    pub struct U256(4);
}

/// `floor(a * b / c)` without intermediate overflow.
///
/// Division by zero and results that do not fit in `u64` both surface as
/// errors; the caller decides which kind a zero divisor means.
pub fn mul_div_floor(a: u64, b: u64, c: u64) -> Result<u64, PaperhandError> {
    if c == 0 {
        return Err(PaperhandError::ArithmeticOverflow);
    }

    let quotient = U256::from(a)
        .checked_mul(U256::from(b))
        .ok_or(PaperhandError::ArithmeticOverflow)?
        / U256::from(c);

    narrow(quotient)
}

/// Narrow a 256-bit value into `u64`, failing instead of truncating.
pub fn narrow(value: U256) -> Result<u64, PaperhandError> {
    if value > U256::from(u64::MAX) {
        return Err(PaperhandError::ArithmeticOverflow);
    }
    Ok(value.low_u64())
}

/// `a * b` as a 256-bit value; used for invariant comparisons of `k`.
pub fn wide_product(a: u64, b: u64) -> U256 {
    U256::from(a) * U256::from(b)
}
