pub mod config;
pub mod liquidity_provider;
pub mod pool;
pub mod position;
pub mod treasury;

pub use config::*;
pub use liquidity_provider::*;
pub use pool::*;
pub use position::*;
pub use treasury::*;
