// ============================================================================
// Trade Tape Aggregator
// VWAP over the most recent N trades
// ============================================================================

use super::{top_n, weighted_average};
use crate::domain::Trade;
use crate::numeric::{Decimal, DecimalContext, NumericResult};

/// `Σ(match_amount × price) / Σ match_amount` over `top`.
///
/// `None` when `top` is empty or the matched amounts sum to zero.
pub fn trades_weighted_average_price(
    ctx: &DecimalContext,
    top: &[Trade],
) -> NumericResult<Option<Decimal>> {
    let pairs = top
        .iter()
        .map(|trade| {
            trade
                .matched_notional(ctx)
                .map(|notional| (trade.match_amount, notional))
        })
        .collect::<NumericResult<Vec<_>>>()?;

    weighted_average(ctx, pairs)
}

/// Aggregates for the most recent N trades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TapeStats {
    /// Σ match_amount over the window, `None` when empty
    pub total_amount: Option<Decimal>,
    pub weighted_average_price: Option<Decimal>,
    /// Price of the most recent trade
    pub last_price: Option<Decimal>,
}

impl TapeStats {
    /// Truncate `trades` (most recent first) to `depth` and aggregate.
    pub fn compute(ctx: &DecimalContext, trades: &[Trade], depth: usize) -> NumericResult<Self> {
        let top = top_n(trades, depth);

        tracing::debug!(
            trades = trades.len(),
            window = top.len(),
            "aggregating trade tape"
        );

        let total_amount = if top.is_empty() {
            None
        } else {
            Some(ctx.sum(top.iter().map(|trade| trade.match_amount))?)
        };

        Ok(Self {
            total_amount,
            weighted_average_price: trades_weighted_average_price(ctx, top)?,
            last_price: top.first().map(|trade| trade.price),
        })
    }
}
