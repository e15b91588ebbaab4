use crate::{
    constants::*,
    engine,
    error::PaperhandError,
    events::ConfigurationUpdated,
    state::{ConfigUpdate, CurveConfiguration},
};
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct UpdateConfiguration<'info> {
    /// Caller claiming to be the admin; checked against the record
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [CURVE_CONFIG_SEED.as_bytes()],
        bump = dex_configuration_account.bump,
    )]
    pub dex_configuration_account: Account<'info, CurveConfiguration>,

    /// CHECK: new tax destination, required when the treasury changes
    pub new_treasury: Option<UncheckedAccount<'info>>,
}

impl<'info> UpdateConfiguration<'info> {
    /// Validate a treasury change against the account passed in
    pub fn validate(&self, update: &ConfigUpdate) -> Result<()> {
        self.dex_configuration_account.can_modify(&self.admin.key())?;

        let Some(treasury) = update.treasury else {
            return Ok(());
        };

        let account = self
            .new_treasury
            .as_ref()
            .ok_or(PaperhandError::InvalidTreasury)?;
        require_keys_eq!(account.key(), treasury, PaperhandError::InvalidTreasury);

        let rent_minimum = Rent::get()?.minimum_balance(0);
        CurveConfiguration::validate_treasury(&treasury, account.lamports(), rent_minimum)?;

        Ok(())
    }
}

pub fn update_configuration_handler(
    ctx: Context<UpdateConfiguration>,
    update: ConfigUpdate,
) -> Result<()> {
    ctx.accounts.validate(&update)?;

    let next = engine::update_config(
        &ctx.accounts.dex_configuration_account,
        &ctx.accounts.admin.key(),
        update,
    )?;
    ctx.accounts.dex_configuration_account.set_inner(next);

    let config = &ctx.accounts.dex_configuration_account;
    msg!(
        "Configuration updated: fee {} bps, paperhand tax {} bps",
        config.fee_bps,
        config.paperhand_tax_bps
    );
    emit!(ConfigurationUpdated {
        admin: config.admin,
        treasury: config.treasury,
        fee_bps: config.fee_bps,
        paperhand_tax_bps: config.paperhand_tax_bps,
    });

    Ok(())
}
