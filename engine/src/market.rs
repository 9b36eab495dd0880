//! Listing lifecycle
//!
//! Gatekeeping for the two state-changing operations (`list`, `buy`) and
//! the read-only queries the frontend polls. The market owns the auction
//! ledger and the event log; asset custody stays with the oracle.

use log::info;
use serde::{Deserialize, Serialize};

use crate::auction::{Amount, Auction, AuctionId, Timestamp, TokenId};
use crate::error::{MarketError, Result};
use crate::events::MarketEvent;
use crate::ledger::AuctionLedger;
use crate::oracle::AssetOracle;
use crate::pricing;

/// Dutch-auction market for one NFT collection.
///
/// Mutating operations borrow the market exclusively, so one borrow is the
/// mutual-exclusion domain for the whole check-then-mutate sequence: of
/// two racing buys, whichever commits first flips the record to sold and
/// the other fails its activity check. There is no internal locking and
/// no retry policy; every call is a single all-or-nothing attempt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Market {
    ledger: AuctionLedger,
    events: Vec<MarketEvent>,
}

impl Market {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ledger(&self) -> &AuctionLedger {
        &self.ledger
    }

    /// True iff the most recent auction for the token is unsold and `now`
    /// falls within its window.
    ///
    /// Recomputed from `now` on every call: time is the only input that
    /// changes the answer without an explicit transaction, so the result
    /// must never be cached.
    pub fn is_listing_active(&self, token_id: TokenId, now: Timestamp) -> bool {
        self.ledger
            .latest(token_id)
            .map(|auction| auction.is_open(now))
            .unwrap_or(false)
    }

    /// Current price of the active listing for a token.
    pub fn current_price(&self, token_id: TokenId, now: Timestamp) -> Result<Amount> {
        let auction = self.active_auction(token_id, now)?;
        Ok(pricing::current_price(auction, now))
    }

    pub fn num_auctions_for_token(&self, token_id: TokenId) -> u64 {
        self.ledger.num_auctions_for_token(token_id)
    }

    pub fn get_auction(&self, token_id: TokenId, auction_id: AuctionId) -> Result<&Auction> {
        self.ledger.get_auction(token_id, auction_id)
    }

    /// Full listing history for a token, oldest first.
    pub fn auctions_for_token(&self, token_id: TokenId) -> &[Auction] {
        self.ledger.auctions_for_token(token_id)
    }

    /// Events emitted so far, in emission order.
    pub fn events(&self) -> &[MarketEvent] {
        &self.events
    }

    /// Drain the event log, leaving it empty.
    pub fn take_events(&mut self) -> Vec<MarketEvent> {
        std::mem::take(&mut self.events)
    }

    /// Create a new auction for a token.
    ///
    /// `seller` must be the token's current owner on the asset ledger, and
    /// the token must not already be in an active auction. The new record
    /// runs from `now` to `now + duration` (seconds). Transfer approval is
    /// not required yet; it is checked when a sale is attempted.
    pub fn list(
        &mut self,
        oracle: &impl AssetOracle,
        token_id: TokenId,
        start_price: Amount,
        price_reduction_rate: Amount,
        duration: u64,
        seller: &str,
        now: Timestamp,
    ) -> Result<MarketEvent> {
        let owner = oracle.owner_of(token_id)?;
        if owner != seller {
            return Err(MarketError::NotTokenOwner(token_id));
        }
        if self.is_listing_active(token_id, now) {
            return Err(MarketError::AlreadyListed(token_id));
        }

        let end_date = now.saturating_add(duration);
        let auction_id = self
            .ledger
            .append(token_id, start_price, price_reduction_rate, now, end_date);

        info!(
            "listed token {} as auction {} at {} (window {}..{})",
            token_id, auction_id, start_price, now, end_date
        );

        let event = MarketEvent::Listed {
            token_id,
            auction_id,
            start_price,
        };
        self.events.push(event.clone());
        Ok(event)
    }

    /// Settle the active auction for a token.
    ///
    /// Requires an active listing and `tendered >= current_price`. The
    /// seller is credited the tendered amount verbatim; any excess over
    /// the computed price is not refunded, and the tendered amount is what
    /// the record stores as `sold_price`.
    pub fn buy(
        &mut self,
        oracle: &mut impl AssetOracle,
        token_id: TokenId,
        buyer: &str,
        tendered: Amount,
        now: Timestamp,
    ) -> Result<MarketEvent> {
        let record = self
            .ledger
            .latest_mut(token_id)
            .filter(|auction| auction.is_open(now))
            .ok_or(MarketError::NoActiveAuction(token_id))?;

        let price = pricing::current_price(record, now);
        if tendered < price {
            return Err(MarketError::PriceNotMet { price, tendered });
        }

        let seller = oracle.owner_of(token_id)?;
        if !oracle.is_approved_for_transfer(token_id)? {
            return Err(MarketError::NotApproved(token_id));
        }

        // Custody moves before the record does: if the asset ledger
        // rejects the transfer, the listing stays unsold and active.
        oracle.transfer(token_id, &seller, buyer)?;
        oracle.credit_seller(&seller, tendered)?;

        record.sold = true;
        record.sold_date = now;
        record.sold_price = tendered;
        let auction_id = record.auction_id;

        info!(
            "sold token {} (auction {}) to {} for {}",
            token_id, auction_id, buyer, tendered
        );

        let event = MarketEvent::Sold {
            token_id,
            auction_id,
            buyer: buyer.to_string(),
            sold_price: tendered,
        };
        self.events.push(event.clone());
        Ok(event)
    }

    fn active_auction(&self, token_id: TokenId, now: Timestamp) -> Result<&Auction> {
        self.ledger
            .latest(token_id)
            .filter(|auction| auction.is_open(now))
            .ok_or(MarketError::NoActiveAuction(token_id))
    }
}
