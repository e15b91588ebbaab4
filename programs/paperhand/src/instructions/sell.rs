use crate::{
    constants::*,
    engine::{self, SellQuote},
    error::PaperhandError,
    events::{PaperhandTaxApplied, PositionUpdated, TradeExecuted, TradeSide},
    state::{CurveConfiguration, LiquidityPool, Treasury, UserPosition},
};
use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

#[derive(Accounts)]
pub struct Sell<'info> {
    /// User selling tokens for lamports
    #[account(mut)]
    pub user: Signer<'info>,

    /// Curve configuration
    #[account(
        seeds = [CURVE_CONFIG_SEED.as_bytes()],
        bump = dex_configuration_account.bump,
    )]
    pub dex_configuration_account: Account<'info, CurveConfiguration>,

    /// Pool for the traded token
    #[account(
        mut,
        seeds = [POOL_SEED_PREFIX.as_bytes(), token_mint.key().as_ref()],
        bump = pool.bump,
        has_one = token_mint @ PaperhandError::InvalidMint,
    )]
    pub pool: Account<'info, LiquidityPool>,

    /// Token traded by the pool
    pub token_mint: Account<'info, Mint>,

    /// CHECK: system-owned PDA holding pool lamports
    #[account(
        mut,
        seeds = [GLOBAL_SEED.as_bytes()],
        bump
    )]
    pub global_account: UncheckedAccount<'info>,

    /// Running tax total
    #[account(
        mut,
        seeds = [TREASURY_SEED.as_bytes()],
        bump = treasury.bump,
    )]
    pub treasury: Account<'info, Treasury>,

    /// CHECK: receives tax lamports, must match the configured treasury
    #[account(
        mut,
        address = dex_configuration_account.treasury @ PaperhandError::InvalidTreasury,
    )]
    pub treasury_vault: UncheckedAccount<'info>,

    /// Cost basis ledger. Created if missing so a wallet without history
    /// fails with InsufficientPosition rather than a missing account.
    #[account(
        init_if_needed,
        payer = user,
        space = 8 + UserPosition::INIT_SPACE,
        seeds = [POSITION_SEED.as_bytes(), pool.key().as_ref(), user.key().as_ref()],
        bump
    )]
    pub user_position: Account<'info, UserPosition>,

    /// Pool token custody
    #[account(
        mut,
        associated_token::mint = token_mint,
        associated_token::authority = global_account,
    )]
    pub pool_token_account: Account<'info, TokenAccount>,

    /// User's token account
    #[account(
        mut,
        associated_token::mint = token_mint,
        associated_token::authority = user,
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    /// SPL token program
    pub token_program: Program<'info, Token>,

    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> Sell<'info> {
    /// Validate sell parameters
    pub fn validate(&self, tokens_in: u64) -> Result<()> {
        require!(tokens_in > 0, PaperhandError::InvalidAmount);
        require!(
            self.user_position.total_tokens > 0,
            PaperhandError::InsufficientPosition
        );
        Ok(())
    }

    /// Transfer tokens from user to pool custody
    pub fn transfer_in(&self, tokens_in: u64) -> Result<()> {
        let cpi_ctx = CpiContext::new(
            self.token_program.to_account_info(),
            Transfer {
                from: self.user_token_account.to_account_info(),
                to: self.pool_token_account.to_account_info(),
                authority: self.user.to_account_info(),
            },
        );
        token::transfer(cpi_ctx, tokens_in)
    }

    /// Pay the seller and, on a loss, the treasury out of the global vault
    pub fn transfer_out(&self, quote: &SellQuote, global_bump: u8) -> Result<()> {
        let seeds = &[GLOBAL_SEED.as_bytes(), &[global_bump]];
        let signer_seeds = &[&seeds[..]];

        let to_user = CpiContext::new_with_signer(
            self.system_program.to_account_info(),
            system_program::Transfer {
                from: self.global_account.to_account_info(),
                to: self.user.to_account_info(),
            },
            signer_seeds,
        );
        system_program::transfer(to_user, quote.net_out)?;

        if quote.tax > 0 {
            let to_treasury = CpiContext::new_with_signer(
                self.system_program.to_account_info(),
                system_program::Transfer {
                    from: self.global_account.to_account_info(),
                    to: self.treasury_vault.to_account_info(),
                },
                signer_seeds,
            );
            system_program::transfer(to_treasury, quote.tax)?;
        }

        Ok(())
    }
}

pub fn sell_handler(ctx: Context<Sell>, tokens_in: u64, min_sol_out: u64) -> Result<()> {
    // validate inputs
    ctx.accounts.validate(tokens_in)?;

    let outcome = engine::sell(
        &ctx.accounts.dex_configuration_account,
        &ctx.accounts.pool,
        &ctx.accounts.user_position,
        &ctx.accounts.treasury,
        tokens_in,
    )?;
    let quote = outcome.quote;

    // slippage protection applies to what the seller actually receives
    require!(
        quote.net_out >= min_sol_out,
        PaperhandError::SlippageExceeded
    );

    // execute transfer
    // 1. user -> vault (tokens in)
    ctx.accounts.transfer_in(tokens_in)?;

    // 2. vault -> user, vault -> treasury
    ctx.accounts
        .transfer_out(&quote, ctx.bumps.global_account)?;

    ctx.accounts.pool.set_inner(outcome.pool);
    ctx.accounts.user_position.set_inner(outcome.position);
    ctx.accounts.treasury.set_inner(outcome.treasury);

    let user = ctx.accounts.user.key();
    let pool = ctx.accounts.pool.key();

    if quote.was_loss {
        msg!(
            "PaperHandBitchTax applied! Cost basis: {}, SOL out: {}, Tax: {}",
            quote.cost_basis,
            quote.sol_out,
            quote.tax
        );
        emit!(PaperhandTaxApplied {
            user,
            pool,
            sol_out_before_tax: quote.sol_out,
            cost_basis_for_sale: quote.cost_basis,
            tax: quote.tax,
            sol_to_user: quote.net_out,
        });
    }

    let (reserve_token, reserve_base) = ctx.accounts.pool.reserves();
    msg!(
        "Sell: {} tokens -> {} lamports, reserves {} {}",
        tokens_in,
        quote.net_out,
        reserve_token,
        reserve_base
    );

    emit!(TradeExecuted {
        user,
        pool,
        side: TradeSide::Sell,
        token_amount: tokens_in,
        sol_amount: quote.net_out,
        timestamp: Clock::get()?.unix_timestamp,
    });
    emit!(PositionUpdated {
        user,
        pool,
        total_tokens: ctx.accounts.user_position.total_tokens,
        total_sol: ctx.accounts.user_position.total_sol,
    });

    Ok(())
}
