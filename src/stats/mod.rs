// ============================================================================
// Statistics Module
// Top-N truncation and weighted averages over book sides and the trade tape
// ============================================================================
//
// All functions here are pure: they read an immutable snapshot and return
// `Ok(None)` for "no data" (empty window, zero total weight) instead of
// dividing by zero.

pub mod depth;
pub mod tape;

pub use depth::{total_remain, total_value, weighted_average_price, DepthStats};
pub use tape::{trades_weighted_average_price, TapeStats};

use crate::numeric::{Decimal, DecimalContext, NumericResult};

/// The first `min(entries.len(), n)` entries, in feed order.
///
/// The feed is already sorted by matching priority, so nothing is re-sorted
/// or filtered.
#[inline]
pub fn top_n<T>(entries: &[T], n: usize) -> &[T] {
    &entries[..entries.len().min(n)]
}

/// `Σ notional / Σ weight` over `(weight, notional)` pairs.
///
/// `None` when there are no pairs or the weights sum to zero.
pub(crate) fn weighted_average<I>(
    ctx: &DecimalContext,
    pairs: I,
) -> NumericResult<Option<Decimal>>
where
    I: IntoIterator<Item = (Decimal, Decimal)>,
{
    let mut total_weight = Decimal::ZERO;
    let mut weighted_sum = Decimal::ZERO;
    let mut seen = 0usize;

    for (weight, notional) in pairs {
        total_weight = ctx.add(total_weight, weight)?;
        weighted_sum = ctx.add(weighted_sum, notional)?;
        seen += 1;
    }

    if seen == 0 || total_weight.is_zero() {
        return Ok(None);
    }

    ctx.div(weighted_sum, total_weight).map(Some)
}
