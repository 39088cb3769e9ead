// ============================================================================
// Depth Aggregator
// Total remain, total value and VWAP over the top N levels of one book side
// ============================================================================

use super::{top_n, weighted_average};
use crate::domain::Order;
use crate::numeric::{Decimal, DecimalContext, NumericResult};

/// Exact sum of `remain` over `top`; `None` when `top` is empty.
pub fn total_remain(ctx: &DecimalContext, top: &[Order]) -> NumericResult<Option<Decimal>> {
    if top.is_empty() {
        return Ok(None);
    }
    ctx.sum(top.iter().map(|order| order.remain)).map(Some)
}

/// Exact sum of the feed-supplied `value` over `top`; `None` when empty.
pub fn total_value(ctx: &DecimalContext, top: &[Order]) -> NumericResult<Option<Decimal>> {
    if top.is_empty() {
        return Ok(None);
    }
    ctx.sum(top.iter().map(|order| order.value)).map(Some)
}

/// `Σ(remain × price) / Σ remain` over `top`.
///
/// `None` when `top` is empty or its total remain is zero.
pub fn weighted_average_price(
    ctx: &DecimalContext,
    top: &[Order],
) -> NumericResult<Option<Decimal>> {
    let pairs = top
        .iter()
        .map(|order| order.remain_notional(ctx).map(|notional| (order.remain, notional)))
        .collect::<NumericResult<Vec<_>>>()?;

    weighted_average(ctx, pairs)
}

/// Aggregates for the visible (top N) window of one book side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DepthStats {
    pub total_remain: Option<Decimal>,
    pub total_value: Option<Decimal>,
    pub weighted_average_price: Option<Decimal>,
}

impl DepthStats {
    /// Truncate `orders` to `depth` entries and aggregate the window.
    ///
    /// Levels beyond `depth` never influence the result.
    pub fn compute(ctx: &DecimalContext, orders: &[Order], depth: usize) -> NumericResult<Self> {
        let top = top_n(orders, depth);

        tracing::debug!(
            levels = orders.len(),
            window = top.len(),
            "aggregating book side"
        );

        Ok(Self {
            total_remain: total_remain(ctx, top)?,
            total_value: total_value(ctx, top)?,
            weighted_average_price: weighted_average_price(ctx, top)?,
        })
    }

    /// No levels in the window
    pub fn is_empty(&self) -> bool {
        self.total_remain.is_none()
    }
}
