use anchor_lang::prelude::*;

use crate::{constants::ACCOUNT_VERSION, error::PaperhandError};

/// Running total of paperhand tax collected
///
/// Seeds: ["treasury"]
///
/// The lamports themselves are sent to `CurveConfiguration::treasury`; this
/// record only counts them. Withdrawals are handled outside the program.
#[account]
#[derive(InitSpace, Default, Debug, PartialEq, Eq)]
pub struct Treasury {
    /// Layout version of this record
    pub version: u8,

    /// Lamports credited by loss-making sells
    pub balance: u64,

    /// Number of sells that paid tax
    pub tax_events: u64,

    pub bump: u8,
}

impl Treasury {
    pub fn new(bump: u8) -> Self {
        Self {
            version: ACCOUNT_VERSION,
            balance: 0,
            tax_events: 0,
            bump,
        }
    }

    pub fn credit(&mut self, tax: u64) -> core::result::Result<(), PaperhandError> {
        if tax == 0 {
            return Ok(());
        }

        let balance = self
            .balance
            .checked_add(tax)
            .ok_or(PaperhandError::ArithmeticOverflow)?;
        let tax_events = self
            .tax_events
            .checked_add(1)
            .ok_or(PaperhandError::ArithmeticOverflow)?;

        self.balance = balance;
        self.tax_events = tax_events;
        Ok(())
    }
}
