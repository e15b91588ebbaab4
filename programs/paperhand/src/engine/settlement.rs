//! Settlement transitions.
//!
//! Each operation reads the records it needs and returns a complete set of
//! replacement records, or an error with the inputs untouched. Committing
//! the returned records together is the caller's job.

use anchor_lang::prelude::Pubkey;

use super::curve::{self, SwapResult};
use crate::{
    error::PaperhandError,
    state::{ConfigUpdate, CurveConfiguration, LiquidityPool, Treasury, UserPosition},
};

/// Records produced by a buy
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuyOutcome {
    pub pool: LiquidityPool,
    pub position: UserPosition,
    pub tokens_out: u64,
}

/// Pricing and tax decision for a sell, computed without touching state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SellQuote {
    pub swap: SwapResult,
    /// Pro-rata cost of the tokens being sold
    pub cost_basis: u64,
    /// Curve output before tax
    pub sol_out: u64,
    pub tax: u64,
    /// What the seller receives
    pub net_out: u64,
    pub was_loss: bool,
}

/// Records produced by a sell
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SellOutcome {
    pub pool: LiquidityPool,
    pub position: UserPosition,
    pub treasury: Treasury,
    pub quote: SellQuote,
}

/// Base currency in, tokens out
pub fn quote_buy(
    config: &CurveConfiguration,
    pool: &LiquidityPool,
    amount_in: u64,
) -> Result<SwapResult, PaperhandError> {
    curve::swap(amount_in, pool.reserve_base, pool.reserve_token, config.fee_bps)
}

/// Tokens in, base currency out, with the paperhand tax decision applied
pub fn quote_sell(
    config: &CurveConfiguration,
    pool: &LiquidityPool,
    position: &UserPosition,
    tokens_in: u64,
) -> Result<SellQuote, PaperhandError> {
    // position checks come first so an empty wallet never reaches the curve
    let cost_basis = position.cost_basis_for_sale(tokens_in)?;

    let swap = curve::swap(tokens_in, pool.reserve_token, pool.reserve_base, config.fee_bps)?;
    let sol_out = swap.amount_out;

    // break-even is not a loss
    let was_loss = sol_out < cost_basis;
    let tax = if was_loss {
        config.paperhand_tax(sol_out)?
    } else {
        0
    };
    let net_out = sol_out
        .checked_sub(tax)
        .ok_or(PaperhandError::ArithmeticOverflow)?;

    Ok(SellQuote {
        swap,
        cost_basis,
        sol_out,
        tax,
        net_out,
        was_loss,
    })
}

pub fn buy(
    config: &CurveConfiguration,
    pool: &LiquidityPool,
    position: &UserPosition,
    amount_in: u64,
) -> Result<BuyOutcome, PaperhandError> {
    let swap = quote_buy(config, pool, amount_in)?;

    let mut next_pool = pool.clone();
    next_pool.reserve_base = swap.new_reserve_in;
    next_pool.reserve_token = swap.new_reserve_out;

    // cost basis carries the gross amount, fee included
    let mut next_position = position.clone();
    next_position.record_buy(swap.amount_out, amount_in)?;

    Ok(BuyOutcome {
        pool: next_pool,
        position: next_position,
        tokens_out: swap.amount_out,
    })
}

pub fn sell(
    config: &CurveConfiguration,
    pool: &LiquidityPool,
    position: &UserPosition,
    treasury: &Treasury,
    tokens_in: u64,
) -> Result<SellOutcome, PaperhandError> {
    let quote = quote_sell(config, pool, position, tokens_in)?;

    let mut next_pool = pool.clone();
    next_pool.reserve_token = quote.swap.new_reserve_in;
    next_pool.reserve_base = quote.swap.new_reserve_out;

    let mut next_position = position.clone();
    next_position.record_sell(tokens_in, quote.cost_basis)?;

    let mut next_treasury = treasury.clone();
    next_treasury.credit(quote.tax)?;

    Ok(SellOutcome {
        pool: next_pool,
        position: next_position,
        treasury: next_treasury,
        quote,
    })
}

/// Deepen both reserves without pricing; `total_issued` follows the token side
pub fn add_liquidity(
    pool: &LiquidityPool,
    token_amount: u64,
    base_amount: u64,
) -> Result<LiquidityPool, PaperhandError> {
    if token_amount == 0 || base_amount == 0 {
        return Err(PaperhandError::InvalidAmount);
    }

    let mut next = pool.clone();
    next.reserve_token = pool
        .reserve_token
        .checked_add(token_amount)
        .ok_or(PaperhandError::ArithmeticOverflow)?;
    next.reserve_base = pool
        .reserve_base
        .checked_add(base_amount)
        .ok_or(PaperhandError::ArithmeticOverflow)?;
    next.total_issued = pool
        .total_issued
        .checked_add(token_amount)
        .ok_or(PaperhandError::ArithmeticOverflow)?;

    Ok(next)
}

pub fn update_config(
    config: &CurveConfiguration,
    caller: &Pubkey,
    update: ConfigUpdate,
) -> Result<CurveConfiguration, PaperhandError> {
    config.can_modify(caller)?;

    let mut next = config.clone();
    if let Some(fee_bps) = update.fee_bps {
        CurveConfiguration::validate_fee(fee_bps)?;
        next.fee_bps = fee_bps;
    }
    if let Some(tax_bps) = update.paperhand_tax_bps {
        CurveConfiguration::validate_tax(tax_bps)?;
        next.paperhand_tax_bps = tax_bps;
    }
    if let Some(treasury) = update.treasury {
        if treasury == Pubkey::default() {
            return Err(PaperhandError::InvalidTreasury);
        }
        next.treasury = treasury;
    }

    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    const AMOUNT_IN: u64 = 500_000_000;
    const TOKENS_OUT: u64 = 16_232_169_208;

    struct Market {
        config: CurveConfiguration,
        pool: LiquidityPool,
        treasury: Treasury,
    }

    impl Market {
        fn new() -> Self {
            let admin = Pubkey::new_unique();
            let config =
                CurveConfiguration::new(admin, Pubkey::new_unique(), 100, 5_000, 255).unwrap();
            let pool = add_liquidity(
                &LiquidityPool::new(Pubkey::new_unique(), admin, 254),
                1_000_000_000_000,
                30_000_000_000,
            )
            .unwrap();

            Self {
                config,
                pool,
                treasury: Treasury::new(253),
            }
        }

        fn wallet(&self) -> UserPosition {
            UserPosition::new(Pubkey::new_unique(), Pubkey::new_unique(), 252)
        }

        fn buy(&mut self, position: &mut UserPosition, amount_in: u64) -> u64 {
            let out = buy(&self.config, &self.pool, position, amount_in).unwrap();
            self.pool = out.pool;
            *position = out.position;
            out.tokens_out
        }

        fn sell(&mut self, position: &mut UserPosition, tokens_in: u64) -> SellQuote {
            let out = sell(&self.config, &self.pool, position, &self.treasury, tokens_in).unwrap();
            self.pool = out.pool;
            self.treasury = out.treasury;
            *position = out.position;
            out.quote
        }
    }

    #[test]
    fn buy_records_gross_cost() {
        let mut market = Market::new();
        let mut wallet = market.wallet();

        let tokens = market.buy(&mut wallet, AMOUNT_IN);

        assert_eq!(tokens, TOKENS_OUT);
        assert_eq!((wallet.total_tokens, wallet.total_sol), (TOKENS_OUT, AMOUNT_IN));
        assert_eq!(market.pool.reserves(), (983_767_830_792, 30_500_000_000));
    }

    #[test]
    fn loss_sale_pays_half_to_treasury() {
        let mut market = Market::new();
        let mut wallet = market.wallet();
        market.buy(&mut wallet, AMOUNT_IN);

        // other sellers have pushed the price down
        market.pool.reserve_token = 1_183_767_830_792;
        market.pool.reserve_base = 25_389_859_207;

        let quote = market.sell(&mut wallet, TOKENS_OUT);

        assert!(quote.was_loss);
        assert_eq!(quote.cost_basis, AMOUNT_IN);
        assert_eq!(quote.sol_out, 340_055_303);
        assert_eq!(quote.tax, 170_027_651);
        assert_eq!(quote.net_out, 170_027_652);
        assert_eq!(market.treasury.balance, 170_027_651);
        assert_eq!(market.treasury.tax_events, 1);
        assert_eq!((wallet.total_tokens, wallet.total_sol), (0, 0));
        assert_eq!(market.pool.reserves(), (1_200_000_000_000, 25_049_803_904));
    }

    #[test]
    fn selling_without_position_changes_nothing() {
        let market = Market::new();
        let stranger = market.wallet();

        let result = sell(&market.config, &market.pool, &stranger, &market.treasury, 1_000);

        assert_eq!(result, Err(PaperhandError::InsufficientPosition));
    }

    #[test]
    fn overselling_is_rejected() {
        let mut market = Market::new();
        let mut wallet = market.wallet();
        market.buy(&mut wallet, AMOUNT_IN);

        let result = sell(
            &market.config,
            &market.pool,
            &wallet,
            &market.treasury,
            TOKENS_OUT + 1,
        );
        assert_eq!(result, Err(PaperhandError::InsufficientPosition));

        let zero = sell(&market.config, &market.pool, &wallet, &market.treasury, 0);
        assert_eq!(zero, Err(PaperhandError::InvalidAmount));
    }

    #[test]
    fn two_half_sells_close_the_position() {
        let mut market = Market::new();
        let mut wallet = market.wallet();
        market.buy(&mut wallet, AMOUNT_IN);

        let half = TOKENS_OUT / 2;
        let first = market.sell(&mut wallet, half);
        assert!(first.was_loss);
        assert_eq!(first.cost_basis, 250_000_000);
        assert_eq!(first.sol_out, 247_090_637);
        assert_eq!(first.tax, 123_545_318);
        assert_eq!((wallet.total_tokens, wallet.total_sol), (half, 250_000_000));

        // a large buyer lifts the price
        let mut whale = market.wallet();
        market.buy(&mut whale, 10_000_000_000);

        let second = market.sell(&mut wallet, TOKENS_OUT - half);
        assert!(!second.was_loss);
        assert_eq!(second.sol_out, 428_177_307);
        assert_eq!(second.tax, 0);
        assert_eq!(second.net_out, second.sol_out);

        assert_eq!((wallet.total_tokens, wallet.total_sol), (0, 0));
        assert_eq!(market.treasury.balance, 123_545_318);
    }

    #[test]
    fn break_even_is_not_taxed() {
        let market = Market::new();
        let mut wallet = market.wallet();

        // cost basis set to exactly what the curve pays for 1_000_000_000 tokens
        let sol_out = curve::swap_output(
            1_000_000_000,
            market.pool.reserve_token,
            market.pool.reserve_base,
            market.config.fee_bps,
        )
        .unwrap();
        wallet.record_buy(1_000_000_000, sol_out).unwrap();

        let quote = quote_sell(&market.config, &market.pool, &wallet, 1_000_000_000).unwrap();
        assert!(!quote.was_loss);
        assert_eq!(quote.tax, 0);

        wallet.total_sol += 1;
        let quote = quote_sell(&market.config, &market.pool, &wallet, 1_000_000_000).unwrap();
        assert!(quote.was_loss);
        assert!(quote.tax > 0);
    }

    #[test]
    fn quote_matches_execution() {
        let mut market = Market::new();
        let mut wallet = market.wallet();
        market.buy(&mut wallet, AMOUNT_IN);

        let quote = quote_sell(&market.config, &market.pool, &wallet, 1_000_000).unwrap();
        let executed = market.sell(&mut wallet, 1_000_000);
        assert_eq!(quote, executed);
    }

    #[test]
    fn empty_pool_refuses_trades() {
        let market = Market::new();
        let empty = LiquidityPool::new(Pubkey::new_unique(), Pubkey::new_unique(), 1);

        assert_eq!(
            buy(&market.config, &empty, &market.wallet(), AMOUNT_IN),
            Err(PaperhandError::InsufficientLiquidity)
        );
    }

    #[test]
    fn add_liquidity_rejects_zero_sides() {
        let market = Market::new();
        assert_eq!(
            add_liquidity(&market.pool, 0, 1),
            Err(PaperhandError::InvalidAmount)
        );
        assert_eq!(
            add_liquidity(&market.pool, 1, 0),
            Err(PaperhandError::InvalidAmount)
        );

        let deeper = add_liquidity(&market.pool, 10, 20).unwrap();
        assert_eq!(deeper.reserves(), (1_000_000_000_010, 30_000_000_020));
        assert_eq!(deeper.total_issued, 1_000_000_000_010);
    }

    #[test]
    fn overflow_leaves_records_unchanged() {
        let mut market = Market::new();
        let mut wallet = market.wallet();
        market.buy(&mut wallet, AMOUNT_IN);

        // a cost basis at the top of the range cannot absorb another buy
        wallet.total_sol = u64::MAX - 1;
        let pool_before = market.pool.clone();
        let wallet_before = wallet.clone();

        assert_eq!(
            buy(&market.config, &market.pool, &wallet, AMOUNT_IN),
            Err(PaperhandError::ArithmeticOverflow)
        );
        assert_eq!(market.pool, pool_before);
        assert_eq!(wallet, wallet_before);

        market.pool.reserve_base = u64::MAX - 10;
        let pool_before = market.pool.clone();
        assert_eq!(
            add_liquidity(&market.pool, 1, 11),
            Err(PaperhandError::ArithmeticOverflow)
        );
        assert_eq!(market.pool, pool_before);
    }

    #[test]
    fn config_updates_are_admin_only() {
        let market = Market::new();
        let admin = market.config.admin;
        let update = ConfigUpdate {
            fee_bps: Some(250),
            paperhand_tax_bps: Some(2_500),
            treasury: None,
        };

        assert_eq!(
            update_config(&market.config, &Pubkey::new_unique(), update),
            Err(PaperhandError::Unauthorized)
        );

        let next = update_config(&market.config, &admin, update).unwrap();
        assert_eq!((next.fee_bps, next.paperhand_tax_bps), (250, 2_500));
        assert_eq!(next.treasury, market.config.treasury);
    }

    #[test]
    fn config_updates_are_validated() {
        let market = Market::new();
        let admin = market.config.admin;

        let bad_tax = ConfigUpdate {
            paperhand_tax_bps: Some(10_001),
            ..ConfigUpdate::default()
        };
        assert_eq!(
            update_config(&market.config, &admin, bad_tax),
            Err(PaperhandError::InvalidTaxBps)
        );

        let bad_treasury = ConfigUpdate {
            treasury: Some(Pubkey::default()),
            ..ConfigUpdate::default()
        };
        assert_eq!(
            update_config(&market.config, &admin, bad_treasury),
            Err(PaperhandError::InvalidTreasury)
        );
    }
}
