//! Engine error types

use thiserror::Error;

use crate::auction::{Amount, AuctionId, TokenId};
use crate::oracle::OracleError;

/// Rejection reasons for market operations.
///
/// Every rejection is detected synchronously, before any state change: a
/// failed call leaves the auction ledger and the asset oracle exactly as
/// they were.
#[derive(Error, Debug)]
pub enum MarketError {
    #[error("only the token owner can list token {0}")]
    NotTokenOwner(TokenId),

    #[error("token {0} is already in an active auction")]
    AlreadyListed(TokenId),

    #[error("no active auction for token {0}")]
    NoActiveAuction(TokenId),

    #[error("listing price not met: current price {price}, tendered {tendered}")]
    PriceNotMet { price: Amount, tendered: Amount },

    #[error("no auction {auction_id} for token {token_id}")]
    AuctionNotFound {
        token_id: TokenId,
        auction_id: AuctionId,
    },

    #[error("market is not approved to transfer token {0}")]
    NotApproved(TokenId),

    #[error("asset ledger rejected the operation: {0}")]
    Oracle(#[from] OracleError),
}

pub type Result<T> = std::result::Result<T, MarketError>;
