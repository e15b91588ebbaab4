use crate::{
    constants::*,
    engine,
    error::PaperhandError,
    events::LiquidityAdded,
    state::{LiquidityPool, LiquidityProvider},
};
use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{self, Mint, Token, TokenAccount, Transfer},
};

#[derive(Accounts)]
pub struct AddLiquidity<'info> {
    /// Pool seeder depositing both sides
    #[account(mut)]
    pub provider: Signer<'info>,

    /// Pool being seeded
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

    /// Pool token custody, owned by the global PDA
    #[account(
        init_if_needed,
        payer = provider,
        associated_token::mint = token_mint,
        associated_token::authority = global_account,
    )]
    pub pool_token_account: Account<'info, TokenAccount>,

    /// Provider's token account
    #[account(
        mut,
        associated_token::mint = token_mint,
        associated_token::authority = provider,
    )]
    pub provider_token_account: Account<'info, TokenAccount>,

    /// Contribution record of this provider
    #[account(
        init_if_needed,
        payer = provider,
        space = 8 + LiquidityProvider::INIT_SPACE,
        seeds = [
            LIQUIDITY_PROVIDER_SEED.as_bytes(),
            pool.key().as_ref(),
            provider.key().as_ref()
        ],
        bump
    )]
    pub liquidity_provider: Account<'info, LiquidityProvider>,

    /// SPL token program
    pub token_program: Program<'info, Token>,

    /// Associated token program
    pub associated_token_program: Program<'info, AssociatedToken>,

    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> AddLiquidity<'info> {
    /// Validate add liquidity parameters
    pub fn validate(&self, token_amount: u64, base_amount: u64) -> Result<()> {
        // check amounts are positive
        require!(
            token_amount > 0 && base_amount > 0,
            PaperhandError::InvalidAmount
        );

        // only the original seeder may deepen the pool
        self.pool.can_seed(&self.provider.key())?;

        Ok(())
    }

    /// Transfer tokens and lamports from the provider into pool custody
    pub fn transfer_to_pool(&self, token_amount: u64, base_amount: u64) -> Result<()> {
        let transfer_tokens_ctx = CpiContext::new(
            self.token_program.to_account_info(),
            Transfer {
                from: self.provider_token_account.to_account_info(),
                to: self.pool_token_account.to_account_info(),
                authority: self.provider.to_account_info(),
            },
        );
        token::transfer(transfer_tokens_ctx, token_amount)?;

        let transfer_sol_ctx = CpiContext::new(
            self.system_program.to_account_info(),
            system_program::Transfer {
                from: self.provider.to_account_info(),
                to: self.global_account.to_account_info(),
            },
        );
        system_program::transfer(transfer_sol_ctx, base_amount)?;

        Ok(())
    }

    /// Fill in a freshly created provider record and add the contribution
    pub fn record_contribution(
        &mut self,
        token_amount: u64,
        base_amount: u64,
        bump: u8,
    ) -> Result<()> {
        let pool_key = self.pool.key();
        let provider_key = self.provider.key();
        let record = &mut self.liquidity_provider;

        if record.provider == Pubkey::default() {
            record.pool = pool_key;
            record.provider = provider_key;
            record.bump = bump;
        }
        record.record_contribution(token_amount, base_amount)?;

        Ok(())
    }
}

/// Handler function for seeding or deepening a pool
pub fn add_liquidity_handler(
    ctx: Context<AddLiquidity>,
    token_amount: u64,
    base_amount: u64,
) -> Result<()> {
    // validate inputs
    ctx.accounts.validate(token_amount, base_amount)?;

    // compute new reserves before moving any funds
    let next_pool = engine::add_liquidity(&ctx.accounts.pool, token_amount, base_amount)?;

    ctx.accounts.transfer_to_pool(token_amount, base_amount)?;

    ctx.accounts.pool.set_inner(next_pool);
    ctx.accounts
        .record_contribution(token_amount, base_amount, ctx.bumps.liquidity_provider)?;

    let (reserve_token, reserve_base) = ctx.accounts.pool.reserves();
    msg!("Reserves: {:?} {:?}", reserve_token, reserve_base);

    emit!(LiquidityAdded {
        provider: ctx.accounts.provider.key(),
        pool: ctx.accounts.pool.key(),
        token_amount,
        base_amount,
    });

    Ok(())
}
