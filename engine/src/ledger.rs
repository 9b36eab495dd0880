//! Per-token auction history
//!
//! Append-only storage and sequencing. Records are never removed or
//! reordered, so "most recent" is always the highest sequence number and
//! the only record that can ever be an open listing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::auction::{Amount, Auction, AuctionId, Timestamp, TokenId};
use crate::error::{MarketError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuctionLedger {
    auctions: HashMap<TokenId, Vec<Auction>>,
}

impl AuctionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count of auctions ever created for a token, sold and expired ones
    /// included. The next auction for the token gets this as its id.
    pub fn num_auctions_for_token(&self, token_id: TokenId) -> u64 {
        self.auctions
            .get(&token_id)
            .map(|history| history.len() as u64)
            .unwrap_or(0)
    }

    /// Look up one auction record by its per-token sequence number.
    pub fn get_auction(&self, token_id: TokenId, auction_id: AuctionId) -> Result<&Auction> {
        self.auctions
            .get(&token_id)
            .and_then(|history| history.get(auction_id as usize))
            .ok_or(MarketError::AuctionNotFound {
                token_id,
                auction_id,
            })
    }

    /// Full listing history for a token, in creation order.
    pub fn auctions_for_token(&self, token_id: TokenId) -> &[Auction] {
        self.auctions
            .get(&token_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Most recent record for a token, the only one that can be open.
    pub fn latest(&self, token_id: TokenId) -> Option<&Auction> {
        self.auctions.get(&token_id).and_then(|history| history.last())
    }

    pub(crate) fn latest_mut(&mut self, token_id: TokenId) -> Option<&mut Auction> {
        self.auctions
            .get_mut(&token_id)
            .and_then(|history| history.last_mut())
    }

    /// Append a new unsold record, assigning the next sequence number for
    /// the token.
    pub(crate) fn append(
        &mut self,
        token_id: TokenId,
        start_price: Amount,
        price_reduction_rate: Amount,
        start_date: Timestamp,
        end_date: Timestamp,
    ) -> AuctionId {
        let history = self.auctions.entry(token_id).or_default();
        let auction_id = history.len() as AuctionId;
        history.push(Auction {
            token_id,
            auction_id,
            start_price,
            price_reduction_rate,
            start_date,
            end_date,
            sold: false,
            sold_date: 0,
            sold_price: 0,
        });
        auction_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_assigns_sequence_numbers() {
        let mut ledger = AuctionLedger::new();
        assert_eq!(ledger.num_auctions_for_token(7), 0);

        assert_eq!(ledger.append(7, 10, 1, 100, 160), 0);
        assert_eq!(ledger.append(7, 20, 2, 200, 260), 1);
        assert_eq!(ledger.num_auctions_for_token(7), 2);

        // Other tokens have their own sequence
        assert_eq!(ledger.append(8, 5, 1, 100, 160), 0);
    }

    #[test]
    fn test_get_auction_in_creation_order() {
        let mut ledger = AuctionLedger::new();
        ledger.append(3, 10, 1, 100, 160);
        ledger.append(3, 20, 1, 200, 260);

        for id in 0..ledger.num_auctions_for_token(3) {
            let auction = ledger.get_auction(3, id).unwrap();
            assert_eq!(auction.auction_id, id);
            assert_eq!(auction.token_id, 3);
        }
        assert_eq!(ledger.get_auction(3, 0).unwrap().start_price, 10);
        assert_eq!(ledger.get_auction(3, 1).unwrap().start_price, 20);
    }

    #[test]
    fn test_get_auction_out_of_range() {
        let mut ledger = AuctionLedger::new();
        ledger.append(3, 10, 1, 100, 160);

        assert!(matches!(
            ledger.get_auction(3, 1),
            Err(MarketError::AuctionNotFound {
                token_id: 3,
                auction_id: 1
            })
        ));
        assert!(matches!(
            ledger.get_auction(99, 0),
            Err(MarketError::AuctionNotFound { .. })
        ));
    }

    #[test]
    fn test_latest_is_last_appended() {
        let mut ledger = AuctionLedger::new();
        assert!(ledger.latest(3).is_none());

        ledger.append(3, 10, 1, 100, 160);
        ledger.append(3, 20, 1, 200, 260);
        assert_eq!(ledger.latest(3).unwrap().auction_id, 1);
    }
}
