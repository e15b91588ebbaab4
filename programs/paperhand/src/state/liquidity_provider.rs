use anchor_lang::prelude::*;

use crate::error::PaperhandError;

/// Contributions of one provider to one pool. Swaps never read it.
///
/// Seeds: ["LiqudityProvider", pool, provider]
#[account]
#[derive(InitSpace, Default, Debug)]
pub struct LiquidityProvider {
    pub pool: Pubkey,
    pub provider: Pubkey,
    pub token_contributed: u64,
    pub base_contributed: u64,
    pub bump: u8,
}

impl LiquidityProvider {
    pub fn record_contribution(
        &mut self,
        token_amount: u64,
        base_amount: u64,
    ) -> core::result::Result<(), PaperhandError> {
        self.token_contributed = self
            .token_contributed
            .checked_add(token_amount)
            .ok_or(PaperhandError::ArithmeticOverflow)?;
        self.base_contributed = self
            .base_contributed
            .checked_add(base_amount)
            .ok_or(PaperhandError::ArithmeticOverflow)?;
        Ok(())
    }
}
