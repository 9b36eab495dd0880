//! Tulip Market Engine
//!
//! Auction bookkeeping and pricing for a single-item Dutch-auction NFT
//! marketplace: a per-token append-only auction history with linear price
//! decay, settled atomically against an external asset ledger.
//!
//! The engine never reads a clock. Every query and mutation takes the
//! current time as an explicit parameter, supplied by the caller from
//! whatever time source its deployment trusts.

pub mod auction;
pub mod error;
pub mod events;
pub mod ledger;
pub mod market;
pub mod oracle;
pub mod pricing;

// Re-export main types
pub use auction::{Address, Amount, Auction, AuctionId, Timestamp, TokenId};
pub use error::{MarketError, Result};
pub use events::MarketEvent;
pub use ledger::AuctionLedger;
pub use market::Market;
pub use oracle::{AssetOracle, MemoryOracle, OracleError};
pub use pricing::current_price;
