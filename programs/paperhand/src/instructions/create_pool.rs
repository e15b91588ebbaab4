use crate::{
    constants::*,
    state::{CurveConfiguration, LiquidityPool},
};
use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_option::COption;
use anchor_spl::token::Mint;

#[derive(Accounts)]
pub struct CreatePool<'info> {
    /// Seeder of the pool
    #[account(mut)]
    pub creator: Signer<'info>,

    /// The configuration must already exist
    #[account(
        seeds = [CURVE_CONFIG_SEED.as_bytes()],
        bump = dex_configuration_account.bump,
    )]
    pub dex_configuration_account: Account<'info, CurveConfiguration>,

    /// Token traded by the pool; its mint authority must sign
    pub token_mint: Account<'info, Mint>,

    /// Pool to be created, one per mint
    #[account(
        init,
        payer = creator,
        space = 8 + LiquidityPool::INIT_SPACE,
        seeds = [POOL_SEED_PREFIX.as_bytes(), token_mint.key().as_ref()],
        bump
    )]
    pub pool: Account<'info, LiquidityPool>,

    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> CreatePool<'info> {
    /// Validate that the caller controls the mint
    pub fn validate(&self) -> Result<()> {
        let mint_authority = match self.token_mint.mint_authority {
            COption::Some(authority) => Some(authority),
            COption::None => None,
        };
        LiquidityPool::can_register(mint_authority, &self.creator.key())?;

        Ok(())
    }
}

/// Handler function for registering a pool. Reserves start empty and the
/// pool refuses swaps until the creator seeds it.
pub fn create_pool_handler(ctx: Context<CreatePool>) -> Result<()> {
    ctx.accounts.validate()?;

    let pool = LiquidityPool::new(
        ctx.accounts.token_mint.key(),
        ctx.accounts.creator.key(),
        ctx.bumps.pool,
    );
    ctx.accounts.pool.set_inner(pool);

    msg!("Pool created for mint {}", ctx.accounts.token_mint.key());
    Ok(())
}
