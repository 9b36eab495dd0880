//! Linear price decay
//!
//! Pure computation over an auction record and an explicit timestamp.
//! There is no clock read and no floating point anywhere in here.

use crate::auction::{Amount, Auction, Timestamp};

/// Current price of an auction at `now`.
///
/// `start_price - price_reduction_rate * elapsed`, floored at zero. The
/// rate is in currency units per second, `elapsed` in seconds. All
/// arithmetic is saturating integer math, so repeated queries with the
/// same inputs always agree. Callers must not query before `start_date`.
pub fn current_price(auction: &Auction, now: Timestamp) -> Amount {
    let elapsed = now.saturating_sub(auction.start_date);
    let deduction = auction.price_reduction_rate.saturating_mul(elapsed);
    auction.start_price.saturating_sub(deduction)
}
