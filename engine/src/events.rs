//! Market lifecycle events
//!
//! Each successful mutation emits exactly one event. Mutating calls return
//! their event and append it to the market's ordered event log, so
//! listeners (UI polling, audit trails) can react without rescanning the
//! ledger.

use serde::{Deserialize, Serialize};

use crate::auction::{Address, Amount, AuctionId, TokenId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketEvent {
    /// A new auction was created for a token.
    Listed {
        token_id: TokenId,
        auction_id: AuctionId,
        start_price: Amount,
    },
    /// An auction settled: the token changed hands.
    Sold {
        token_id: TokenId,
        auction_id: AuctionId,
        buyer: Address,
        sold_price: Amount,
    },
}
