use anchor_lang::prelude::*;

use crate::{
    constants::{ACCOUNT_VERSION, PRICE_SCALE},
    error::PaperhandError,
    math::mul_div_floor,
};

/// Weighted-average cost basis of one wallet in one pool
///
/// Seeds: ["position", pool, owner]
///
/// Only tokens bought through the pool are tracked. Tokens that reach the
/// wallet any other way carry no cost basis and cannot be sold through
/// `sell`, which is limited to `total_tokens`.
#[account]
#[derive(InitSpace, Default, Debug, PartialEq, Eq)]
pub struct UserPosition {
    /// Layout version of this record
    pub version: u8,

    /// Pool this position belongs to
    pub pool: Pubkey,

    /// Wallet owning the position
    pub owner: Pubkey,

    /// Tokens currently attributed to the wallet
    pub total_tokens: u64,

    /// Cumulative lamports paid for `total_tokens`, fees included
    pub total_sol: u64,

    /// PDA bump for position account
    pub bump: u8,
}

impl UserPosition {
    pub fn new(pool: Pubkey, owner: Pubkey, bump: u8) -> Self {
        Self {
            version: ACCOUNT_VERSION,
            pool,
            owner,
            total_tokens: 0,
            total_sol: 0,
            bump,
        }
    }

    pub fn has_position(&self) -> bool {
        self.total_tokens > 0
    }

    /// Average lamports per token scaled by `PRICE_SCALE`; `None` without a position
    pub fn average_cost_scaled(&self) -> Option<u64> {
        if !self.has_position() {
            return None;
        }
        mul_div_floor(self.total_sol, PRICE_SCALE, self.total_tokens).ok()
    }

    /// Add a purchase at its gross (pre-fee) cost
    pub fn record_buy(
        &mut self,
        tokens: u64,
        sol_spent: u64,
    ) -> core::result::Result<(), PaperhandError> {
        if tokens == 0 || sol_spent == 0 {
            return Err(PaperhandError::InvalidAmount);
        }

        let total_tokens = self
            .total_tokens
            .checked_add(tokens)
            .ok_or(PaperhandError::ArithmeticOverflow)?;
        let total_sol = self
            .total_sol
            .checked_add(sol_spent)
            .ok_or(PaperhandError::ArithmeticOverflow)?;

        self.total_tokens = total_tokens;
        self.total_sol = total_sol;
        Ok(())
    }

    /// Pro-rata share of the blended cost for `tokens_to_sell`:
    /// `floor(total_sol * tokens_to_sell / total_tokens)`
    pub fn cost_basis_for_sale(
        &self,
        tokens_to_sell: u64,
    ) -> core::result::Result<u64, PaperhandError> {
        if tokens_to_sell == 0 {
            return Err(PaperhandError::InvalidAmount);
        }
        if !self.has_position() || tokens_to_sell > self.total_tokens {
            return Err(PaperhandError::InsufficientPosition);
        }

        mul_div_floor(self.total_sol, tokens_to_sell, self.total_tokens)
    }

    /// Remove sold tokens and their cost basis. A full exit clears any
    /// truncation remainder so no cost survives without tokens.
    pub fn record_sell(
        &mut self,
        tokens_sold: u64,
        cost_basis: u64,
    ) -> core::result::Result<(), PaperhandError> {
        let total_tokens = self
            .total_tokens
            .checked_sub(tokens_sold)
            .ok_or(PaperhandError::InsufficientPosition)?;

        let total_sol = if total_tokens == 0 {
            0
        } else {
            self.total_sol
                .checked_sub(cost_basis)
                .ok_or(PaperhandError::ArithmeticOverflow)?
        };

        self.total_tokens = total_tokens;
        self.total_sol = total_sol;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(tokens: u64, sol: u64) -> UserPosition {
        let mut p = UserPosition::new(Pubkey::new_unique(), Pubkey::new_unique(), 253);
        p.record_buy(tokens, sol).unwrap();
        p
    }

    #[test]
    fn buys_accumulate_gross_cost() {
        let mut p = position(100, 1_000);
        p.record_buy(50, 700).unwrap();
        assert_eq!((p.total_tokens, p.total_sol), (150, 1_700));
        // 11.333.. lamports per token
        assert_eq!(p.average_cost_scaled(), Some(11_333_333_333));
    }

    #[test]
    fn empty_position_has_no_average() {
        let p = UserPosition::new(Pubkey::new_unique(), Pubkey::new_unique(), 0);
        assert!(!p.has_position());
        assert_eq!(p.average_cost_scaled(), None);
        assert_eq!(p.cost_basis_for_sale(1), Err(PaperhandError::InsufficientPosition));
    }

    #[test]
    fn cost_basis_is_pro_rata_and_floored() {
        let p = position(3, 100);
        assert_eq!(p.cost_basis_for_sale(1).unwrap(), 33);
        assert_eq!(p.cost_basis_for_sale(2).unwrap(), 66);
        assert_eq!(p.cost_basis_for_sale(3).unwrap(), 100);
    }

    #[test]
    fn overselling_is_rejected() {
        let p = position(10, 100);
        assert_eq!(p.cost_basis_for_sale(11), Err(PaperhandError::InsufficientPosition));
        assert_eq!(p.cost_basis_for_sale(0), Err(PaperhandError::InvalidAmount));
    }

    #[test]
    fn full_exit_clears_truncation_dust() {
        let mut p = position(3, 100);

        let first = p.cost_basis_for_sale(1).unwrap();
        p.record_sell(1, first).unwrap();
        assert_eq!((p.total_tokens, p.total_sol), (2, 67));

        let second = p.cost_basis_for_sale(1).unwrap();
        p.record_sell(1, second).unwrap();
        assert_eq!((p.total_tokens, p.total_sol), (1, 34));

        let last = p.cost_basis_for_sale(1).unwrap();
        p.record_sell(1, last).unwrap();
        assert_eq!((p.total_tokens, p.total_sol), (0, 0));
    }

    #[test]
    fn zero_buys_are_rejected() {
        let mut p = UserPosition::new(Pubkey::new_unique(), Pubkey::new_unique(), 0);
        assert_eq!(p.record_buy(0, 10), Err(PaperhandError::InvalidAmount));
        assert_eq!(p.record_buy(10, 0), Err(PaperhandError::InvalidAmount));
        assert_eq!((p.total_tokens, p.total_sol), (0, 0));
    }
}
