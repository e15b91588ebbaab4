use anchor_lang::prelude::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TradeSide {
    Buy,
    Sell,
}

#[event]
pub struct TradeExecuted {
    pub user: Pubkey,
    pub pool: Pubkey,
    pub side: TradeSide,
    pub token_amount: u64,
    /// Lamports paid on a buy, lamports received after tax on a sell
    pub sol_amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct PaperhandTaxApplied {
    pub user: Pubkey,
    pub pool: Pubkey,
    pub sol_out_before_tax: u64,
    pub cost_basis_for_sale: u64,
    pub tax: u64,
    pub sol_to_user: u64,
}

#[event]
pub struct PositionUpdated {
    pub user: Pubkey,
    pub pool: Pubkey,
    pub total_tokens: u64,
    pub total_sol: u64,
}

#[event]
pub struct LiquidityAdded {
    pub provider: Pubkey,
    pub pool: Pubkey,
    pub token_amount: u64,
    pub base_amount: u64,
}

#[event]
pub struct ConfigurationUpdated {
    pub admin: Pubkey,
    pub treasury: Pubkey,
    pub fee_bps: u16,
    pub paperhand_tax_bps: u16,
}
