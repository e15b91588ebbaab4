pub mod add_liquidity;
pub mod buy;
pub mod create_pool;
pub mod initialize;
pub mod sell;
pub mod update_config;

pub use add_liquidity::*;
pub use buy::*;
pub use create_pool::*;
pub use initialize::*;
pub use sell::*;
pub use update_config::*;
