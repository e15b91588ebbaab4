#![allow(unexpected_cfgs)]
#![allow(deprecated)]

pub mod constants;
pub mod engine;
pub mod error;
pub mod events;
pub mod instructions;
pub mod math;
pub mod state;

use anchor_lang::prelude::*;

pub use constants::*;
pub use instructions::*;
pub use state::*;

declare_id!("8XQAVjtT1QSYgVp8WzhVdwuSvGfDX9UifZupiLvBe2Lh");

#[program]
pub mod paperhand {
    use super::*;

    /// Create the curve configuration and treasury ledger
    ///
    /// * `fee_bps` - trading fee in basis points (100 = 1%)
    /// * `paperhand_tax_bps` - tax on loss-making sells (5000 = 50%), defaults
    ///   to `DEFAULT_PAPERHAND_TAX_BPS`
    pub fn initialize(
        ctx: Context<Initialize>,
        fee_bps: u16,
        paperhand_tax_bps: Option<u16>,
    ) -> Result<()> {
        instructions::initialize::initialize_handler(ctx, fee_bps, paperhand_tax_bps)
    }

    /// Register an empty pool for an existing mint (mint authority only)
    pub fn create_pool(ctx: Context<CreatePool>) -> Result<()> {
        instructions::create_pool::create_pool_handler(ctx)
    }

    /// Seed or deepen pool reserves (pool creator only)
    pub fn add_liquidity(
        ctx: Context<AddLiquidity>,
        token_amount: u64,
        base_amount: u64,
    ) -> Result<()> {
        instructions::add_liquidity::add_liquidity_handler(ctx, token_amount, base_amount)
    }

    /// Buy tokens with lamports; the gross amount becomes cost basis
    pub fn buy(ctx: Context<Buy>, amount_in: u64, min_tokens_out: u64) -> Result<()> {
        instructions::buy::buy_handler(ctx, amount_in, min_tokens_out)
    }

    /// Sell tokens for lamports
    ///
    /// When the proceeds are below the pro-rata cost basis of the tokens
    /// sold, `paperhand_tax_bps` of the proceeds go to the treasury.
    pub fn sell(ctx: Context<Sell>, tokens_in: u64, min_sol_out: u64) -> Result<()> {
        instructions::sell::sell_handler(ctx, tokens_in, min_sol_out)
    }

    /// Change fee, tax rate or treasury destination (admin only)
    pub fn update_configuration(
        ctx: Context<UpdateConfiguration>,
        new_fee_bps: Option<u16>,
        new_paperhand_tax_bps: Option<u16>,
        new_treasury: Option<Pubkey>,
    ) -> Result<()> {
        let update = ConfigUpdate {
            fee_bps: new_fee_bps,
            paperhand_tax_bps: new_paperhand_tax_bps,
            treasury: new_treasury,
        };
        instructions::update_config::update_configuration_handler(ctx, update)
    }
}
