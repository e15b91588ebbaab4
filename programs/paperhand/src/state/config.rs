use anchor_lang::prelude::*;

use crate::{
    constants::{
        ACCOUNT_VERSION, BPS_DENOMINATOR, DEFAULT_PAPERHAND_TAX_BPS, MAX_PAPERHAND_TAX_BPS,
    },
    error::PaperhandError,
    math::mul_div_floor,
};

/// Global curve configuration (singleton PDA)
///
/// Seeds: ["CurveConfiguration"]
#[account]
#[derive(InitSpace, Default, Debug, PartialEq, Eq)]
pub struct CurveConfiguration {
    /// Layout version of this record
    pub version: u8,

    /// Identity allowed to change this record
    pub admin: Pubkey,

    /// Destination of paperhand tax proceeds
    pub treasury: Pubkey,

    /// Trading fee in basis points (100 = 1%), taken from every swap input
    pub fee_bps: u16,

    /// Tax on the proceeds of a loss-making sell (5000 = 50%)
    pub paperhand_tax_bps: u16,

    /// PDA bump for the configuration account
    pub bump: u8,
}

/// Partial update applied by the admin. `None` leaves a field untouched.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConfigUpdate {
    pub fee_bps: Option<u16>,
    pub paperhand_tax_bps: Option<u16>,
    pub treasury: Option<Pubkey>,
}

impl CurveConfiguration {
    /// Build a validated configuration record
    pub fn new(
        admin: Pubkey,
        treasury: Pubkey,
        fee_bps: u16,
        paperhand_tax_bps: u16,
        bump: u8,
    ) -> core::result::Result<Self, PaperhandError> {
        Self::validate_fee(fee_bps)?;
        Self::validate_tax(paperhand_tax_bps)?;

        Ok(Self {
            version: ACCOUNT_VERSION,
            admin,
            treasury,
            fee_bps,
            paperhand_tax_bps,
            bump,
        })
    }

    /// Requested tax rate, or the default when none is given
    pub fn tax_bps_or_default(paperhand_tax_bps: Option<u16>) -> u16 {
        paperhand_tax_bps.unwrap_or(DEFAULT_PAPERHAND_TAX_BPS)
    }

    /// A fee of 100% would leave nothing to swap
    pub fn validate_fee(fee_bps: u16) -> core::result::Result<(), PaperhandError> {
        if u64::from(fee_bps) >= BPS_DENOMINATOR {
            return Err(PaperhandError::InvalidFee);
        }
        Ok(())
    }

    pub fn validate_tax(paperhand_tax_bps: u16) -> core::result::Result<(), PaperhandError> {
        if paperhand_tax_bps > MAX_PAPERHAND_TAX_BPS {
            return Err(PaperhandError::InvalidTaxBps);
        }
        Ok(())
    }

    /// A new tax destination must already hold the rent-exempt minimum,
    /// otherwise tax transfers below that minimum would fail the whole sell
    pub fn validate_treasury(
        treasury: &Pubkey,
        lamports: u64,
        rent_minimum: u64,
    ) -> core::result::Result<(), PaperhandError> {
        if *treasury == Pubkey::default() || lamports < rent_minimum {
            return Err(PaperhandError::InvalidTreasury);
        }
        Ok(())
    }

    /// Check if given identity can modify the configuration
    pub fn can_modify(&self, caller: &Pubkey) -> core::result::Result<(), PaperhandError> {
        if self.admin != *caller {
            return Err(PaperhandError::Unauthorized);
        }
        Ok(())
    }

    /// Tax owed on loss-making proceeds: `floor(sol_out * tax_bps / 10000)`
    pub fn paperhand_tax(&self, sol_out: u64) -> core::result::Result<u64, PaperhandError> {
        mul_div_floor(sol_out, u64::from(self.paperhand_tax_bps), BPS_DENOMINATOR)
    }
}
