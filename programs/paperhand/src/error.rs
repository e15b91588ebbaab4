use anchor_lang::prelude::*;

#[error_code]
#[derive(PartialEq, Eq)]
pub enum PaperhandError {
    // Trading Errors
    #[msg("Invalid amount provided.")]
    InvalidAmount,
    #[msg("Pool reserves are empty or too shallow for this trade.")]
    InsufficientLiquidity,
    #[msg("Swap output rounds to zero.")]
    InsufficientOutput,
    #[msg("Insufficient position: trying to sell more than tracked position")]
    InsufficientPosition,
    #[msg("Slippage tolerance exceeded.")]
    SlippageExceeded,
    #[msg("Mint does not belong to this pool.")]
    InvalidMint,

    // Math Errors
    #[msg("Arithmetic overflow detected.")]
    ArithmeticOverflow,

    // Configuration Errors
    #[msg("Fee must be below 10000 basis points.")]
    InvalidFee,
    #[msg("Invalid paperhand tax basis points (must be <= 10000)")]
    InvalidTaxBps,
    #[msg("Invalid treasury account")]
    InvalidTreasury,

    // Authorization Errors
    #[msg("Unauthorized access attempt")]
    Unauthorized,
}
