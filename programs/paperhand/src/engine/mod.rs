//! Pure settlement core: pricing, cost-basis ledger updates and the
//! paperhand tax decision. Nothing here reads or writes accounts.

pub mod curve;
pub mod settlement;

pub use curve::{swap, swap_output, SwapResult};
pub use settlement::*;
