//! Auction records and identifier types

use serde::{Deserialize, Serialize};

/// Identifier of a non-fungible token on the asset ledger.
pub type TokenId = u64;

/// Zero-based sequence number of an auction within one token's history.
pub type AuctionId = u64;

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// Value in the smallest currency unit.
pub type Amount = u64;

/// Account address on the asset ledger.
pub type Address = String;

/// One listing attempt for a token.
///
/// Created by `list` and mutated exactly once, by a successful `buy`.
/// Records are never deleted or reordered; the per-token sequence of
/// them is the token's full price-discovery trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Auction {
    pub token_id: TokenId,
    pub auction_id: AuctionId,
    /// Price at `start_date`, in the smallest currency unit.
    pub start_price: Amount,
    /// Currency units deducted from the price per elapsed second.
    pub price_reduction_rate: Amount,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub sold: bool,
    /// Settlement time; 0 until sold.
    pub sold_date: Timestamp,
    /// Amount actually tendered at settlement; 0 until sold.
    pub sold_price: Amount,
}

impl Auction {
    /// Whether this record is an open listing at `now`: not yet sold and
    /// within its `[start_date, end_date)` window.
    pub fn is_open(&self, now: Timestamp) -> bool {
        !self.sold && now >= self.start_date && now < self.end_date
    }
}
