use crate::{
    constants::*,
    engine,
    error::PaperhandError,
    events::{PositionUpdated, TradeExecuted, TradeSide},
    state::{CurveConfiguration, LiquidityPool, UserPosition},
};
use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{self, Mint, Token, TokenAccount, Transfer},
};

#[derive(Accounts)]
pub struct Buy<'info> {
    /// User buying tokens with lamports
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

    /// Cost basis ledger, created on the first buy
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
        init_if_needed,
        payer = user,
        associated_token::mint = token_mint,
        associated_token::authority = user,
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    /// SPL token program
    pub token_program: Program<'info, Token>,

    /// Associated token program
    pub associated_token_program: Program<'info, AssociatedToken>,

    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> Buy<'info> {
    /// Validate buy parameters
    pub fn validate(&self, amount_in: u64) -> Result<()> {
        require!(amount_in > 0, PaperhandError::InvalidAmount);
        Ok(())
    }

    /// Bind a freshly created position to its pool and owner
    pub fn open_position(&mut self, bump: u8) {
        if self.user_position.version == 0 {
            let position = UserPosition::new(self.pool.key(), self.user.key(), bump);
            self.user_position.set_inner(position);
        }
    }

    /// Transfer lamports from user to the global vault
    pub fn transfer_in(&self, amount_in: u64) -> Result<()> {
        let cpi_ctx = CpiContext::new(
            self.system_program.to_account_info(),
            system_program::Transfer {
                from: self.user.to_account_info(),
                to: self.global_account.to_account_info(),
            },
        );
        system_program::transfer(cpi_ctx, amount_in)
    }

    /// Transfer tokens from pool custody to user using the global PDA signer
    pub fn transfer_out(&self, tokens_out: u64, global_bump: u8) -> Result<()> {
        let seeds = &[GLOBAL_SEED.as_bytes(), &[global_bump]];
        let signer_seeds = &[&seeds[..]];

        let cpi_ctx = CpiContext::new_with_signer(
            self.token_program.to_account_info(),
            Transfer {
                from: self.pool_token_account.to_account_info(),
                to: self.user_token_account.to_account_info(),
                authority: self.global_account.to_account_info(),
            },
            signer_seeds,
        );
        token::transfer(cpi_ctx, tokens_out)
    }
}

pub fn buy_handler(ctx: Context<Buy>, amount_in: u64, min_tokens_out: u64) -> Result<()> {
    // validate inputs
    ctx.accounts.validate(amount_in)?;
    ctx.accounts.open_position(ctx.bumps.user_position);

    let outcome = engine::buy(
        &ctx.accounts.dex_configuration_account,
        &ctx.accounts.pool,
        &ctx.accounts.user_position,
        amount_in,
    )?;

    // slippage protection, zero disables it
    require!(
        outcome.tokens_out >= min_tokens_out,
        PaperhandError::SlippageExceeded
    );

    // execute transfer
    // 1. user -> vault (lamports in)
    ctx.accounts.transfer_in(amount_in)?;

    // 2. vault -> user (tokens out)
    ctx.accounts
        .transfer_out(outcome.tokens_out, ctx.bumps.global_account)?;

    ctx.accounts.pool.set_inner(outcome.pool);
    ctx.accounts.user_position.set_inner(outcome.position);

    let (reserve_token, reserve_base) = ctx.accounts.pool.reserves();
    msg!(
        "Buy: {} lamports -> {} tokens, reserves {} {}",
        amount_in,
        outcome.tokens_out,
        reserve_token,
        reserve_base
    );

    let user = ctx.accounts.user.key();
    let pool = ctx.accounts.pool.key();
    emit!(TradeExecuted {
        user,
        pool,
        side: TradeSide::Buy,
        token_amount: outcome.tokens_out,
        sol_amount: amount_in,
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
