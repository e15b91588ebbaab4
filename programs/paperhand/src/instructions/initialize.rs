use crate::{
    constants::*,
    state::{CurveConfiguration, Treasury},
};
use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};

#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Admin of the new configuration
    #[account(mut)]
    pub admin: Signer<'info>,

    /// The curve configuration to be created
    #[account(
        init,
        payer = admin,
        space = 8 + CurveConfiguration::INIT_SPACE,
        seeds = [CURVE_CONFIG_SEED.as_bytes()],
        bump
    )]
    pub dex_configuration_account: Account<'info, CurveConfiguration>,

    /// Running total of tax collected
    #[account(
        init,
        payer = admin,
        space = 8 + Treasury::INIT_SPACE,
        seeds = [TREASURY_SEED.as_bytes()],
        bump
    )]
    pub treasury: Account<'info, Treasury>,

    /// CHECK: system-owned PDA holding pool lamports
    #[account(
        mut,
        seeds = [GLOBAL_SEED.as_bytes()],
        bump
    )]
    pub global_account: UncheckedAccount<'info>,

    /// CHECK: system-owned PDA, default destination of paperhand tax
    #[account(
        mut,
        seeds = [TREASURY_VAULT_SEED.as_bytes()],
        bump
    )]
    pub treasury_vault: UncheckedAccount<'info>,

    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> Initialize<'info> {
    /// Top up a vault PDA to rent exemption so later transfers out of it succeed
    pub fn fund_vault(&self, vault: &AccountInfo<'info>) -> Result<()> {
        let minimum = Rent::get()?.minimum_balance(0);
        let shortfall = minimum.saturating_sub(vault.lamports());
        if shortfall == 0 {
            return Ok(());
        }

        let cpi_ctx = CpiContext::new(
            self.system_program.to_account_info(),
            Transfer {
                from: self.admin.to_account_info(),
                to: vault.clone(),
            },
        );
        system_program::transfer(cpi_ctx, shortfall)
    }
}

/// Handler function for initializing the curve configuration
pub fn initialize_handler(
    ctx: Context<Initialize>,
    fee_bps: u16,
    paperhand_tax_bps: Option<u16>,
) -> Result<()> {
    let paperhand_tax_bps = CurveConfiguration::tax_bps_or_default(paperhand_tax_bps);

    // validates fee and tax ranges
    let config = CurveConfiguration::new(
        ctx.accounts.admin.key(),
        ctx.accounts.treasury_vault.key(),
        fee_bps,
        paperhand_tax_bps,
        ctx.bumps.dex_configuration_account,
    )?;

    let global = ctx.accounts.global_account.to_account_info();
    ctx.accounts.fund_vault(&global)?;
    let treasury_vault = ctx.accounts.treasury_vault.to_account_info();
    ctx.accounts.fund_vault(&treasury_vault)?;

    ctx.accounts.dex_configuration_account.set_inner(config);
    ctx.accounts
        .treasury
        .set_inner(Treasury::new(ctx.bumps.treasury));

    msg!(
        "Initialized: fee {} bps, paperhand tax {} bps",
        fee_bps,
        paperhand_tax_bps
    );

    Ok(())
}
