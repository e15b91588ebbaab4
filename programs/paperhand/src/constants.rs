use anchor_lang::prelude::*;

// PDA Seeds - for deterministic address generation
#[constant]
pub const CURVE_CONFIG_SEED: &str = "CurveConfiguration";

#[constant]
pub const POOL_SEED_PREFIX: &str = "liquidity_pool";

#[constant]
pub const POSITION_SEED: &str = "position";

#[constant]
pub const LIQUIDITY_PROVIDER_SEED: &str = "LiqudityProvider"; // spelling matches deployed clients

#[constant]
pub const TREASURY_SEED: &str = "treasury";

#[constant]
pub const TREASURY_VAULT_SEED: &str = "treasury_vault";

#[constant]
pub const GLOBAL_SEED: &str = "global";

// Math Constants - for calculations and validations
#[constant]
pub const BPS_DENOMINATOR: u64 = 10_000; // 100%

#[constant]
pub const MAX_PAPERHAND_TAX_BPS: u16 = 10_000; // 100%

#[constant]
pub const DEFAULT_PAPERHAND_TAX_BPS: u16 = 5_000; // 50%

/// Fixed-point scale for spot prices and average costs (base units per token)
#[constant]
pub const PRICE_SCALE: u64 = 1_000_000_000;

// Layout version written as the first field of every record
#[constant]
pub const ACCOUNT_VERSION: u8 = 1;
