use anchor_lang::prelude::*;

use crate::{
    constants::{ACCOUNT_VERSION, PRICE_SCALE},
    error::PaperhandError,
    math::mul_div_floor,
};

/// Constant-product pool for a single token against the base currency
///
/// Seeds: ["liquidity_pool", token_mint]
#[account]
#[derive(InitSpace, Default, Debug, PartialEq, Eq)]
pub struct LiquidityPool {
    /// Layout version of this record
    pub version: u8,

    /// Mint of the traded token
    pub token_mint: Pubkey,

    /// Original seeder, the only identity allowed to add liquidity
    pub creator: Pubkey,

    /// Tokens routed into the pool through liquidity seeding
    pub total_issued: u64,

    /// Token side of the curve
    pub reserve_token: u64,

    /// Base-currency side of the curve (lamports)
    pub reserve_base: u64,

    /// PDA bump for pool account
    pub bump: u8,
}

impl LiquidityPool {
    pub fn new(token_mint: Pubkey, creator: Pubkey, bump: u8) -> Self {
        Self {
            version: ACCOUNT_VERSION,
            token_mint,
            creator,
            total_issued: 0,
            reserve_token: 0,
            reserve_base: 0,
            bump,
        }
    }

    /// Current `(reserve_token, reserve_base)`
    pub fn reserves(&self) -> (u64, u64) {
        (self.reserve_token, self.reserve_base)
    }

    /// A pool with either reserve at zero refuses every swap
    pub fn is_tradable(&self) -> bool {
        self.reserve_token > 0 && self.reserve_base > 0
    }

    /// Marginal price in base units per token, scaled by `PRICE_SCALE`
    pub fn spot_price_scaled(&self) -> core::result::Result<u64, PaperhandError> {
        if !self.is_tradable() {
            return Err(PaperhandError::InsufficientLiquidity);
        }
        mul_div_floor(self.reserve_base, PRICE_SCALE, self.reserve_token)
    }

    /// Only the mint authority may register a pool for its mint. A mint with
    /// a revoked authority cannot be registered.
    pub fn can_register(
        mint_authority: Option<Pubkey>,
        caller: &Pubkey,
    ) -> core::result::Result<(), PaperhandError> {
        match mint_authority {
            Some(authority) if authority == *caller => Ok(()),
            _ => Err(PaperhandError::Unauthorized),
        }
    }

    /// Check if given identity seeded this pool
    pub fn can_seed(&self, caller: &Pubkey) -> core::result::Result<(), PaperhandError> {
        if self.creator != *caller {
            return Err(PaperhandError::Unauthorized);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_pool_is_not_tradable() {
        let pool = LiquidityPool::new(Pubkey::new_unique(), Pubkey::new_unique(), 254);
        assert_eq!(pool.version, ACCOUNT_VERSION);
        assert_eq!(pool.reserves(), (0, 0));
        assert!(!pool.is_tradable());
        assert_eq!(
            pool.spot_price_scaled(),
            Err(PaperhandError::InsufficientLiquidity)
        );
    }

    #[test]
    fn only_mint_authority_registers() {
        let launcher = Pubkey::new_unique();
        let outsider = Pubkey::new_unique();

        assert!(LiquidityPool::can_register(Some(launcher), &launcher).is_ok());
        assert_eq!(
            LiquidityPool::can_register(Some(launcher), &outsider),
            Err(PaperhandError::Unauthorized)
        );
        assert_eq!(
            LiquidityPool::can_register(None, &launcher),
            Err(PaperhandError::Unauthorized)
        );
    }

    #[test]
    fn spot_price_is_base_per_token() {
        let mut pool = LiquidityPool::new(Pubkey::new_unique(), Pubkey::new_unique(), 254);
        pool.reserve_token = 1_000_000_000_000;
        pool.reserve_base = 30_000_000_000;
        // 0.03 base units per token
        assert_eq!(pool.spot_price_scaled().unwrap(), 30_000_000);
    }
}
