// ============================================================================
// Fill Estimates
// ============================================================================

use crate::domain::MarketTab;
use crate::numeric::{Decimal, DecimalContext, NumericResult};
use crate::stats::DepthStats;

/// Parse the user's percentage input.
///
/// Empty or whitespace-only input means "nothing entered" and yields `None`.
/// Values are not clamped to `[0, 100]`.
///
/// # Errors
/// Returns `InvalidDecimal` for non-empty input that is not a number.
pub fn parse_percentage(ctx: &DecimalContext, raw: &str) -> NumericResult<Option<Decimal>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    ctx.parse(raw).map(Some)
}

/// `(P / 100) × total_remain`
///
/// `None` when nothing is entered or the book side is empty.
pub fn estimated_remain(
    ctx: &DecimalContext,
    percentage: &str,
    total_remain: Option<Decimal>,
) -> NumericResult<Option<Decimal>> {
    let Some(percentage) = parse_percentage(ctx, percentage)? else {
        return Ok(None);
    };
    let Some(total_remain) = total_remain else {
        return Ok(None);
    };
    ctx.percent_of(percentage, total_remain).map(Some)
}

/// `(P / 100) × weighted_average_price`
///
/// Derived from the percentage and the VWAP alone, not from
/// `estimated_remain × weighted_average_price`; the two only agree when the
/// total remain is exactly 100.
pub fn estimated_payable(
    ctx: &DecimalContext,
    percentage: &str,
    weighted_average_price: Option<Decimal>,
) -> NumericResult<Option<Decimal>> {
    let Some(percentage) = parse_percentage(ctx, percentage)? else {
        return Ok(None);
    };
    let Some(weighted_average_price) = weighted_average_price else {
        return Ok(None);
    };
    ctx.percent_of(percentage, weighted_average_price).map(Some)
}

/// Estimated fill for the active book side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FillEstimate {
    pub remain: Option<Decimal>,
    pub payable: Option<Decimal>,
}

impl FillEstimate {
    pub fn compute(
        ctx: &DecimalContext,
        percentage: &str,
        depth: &DepthStats,
    ) -> NumericResult<Self> {
        Ok(Self {
            remain: estimated_remain(ctx, percentage, depth.total_remain)?,
            payable: estimated_payable(ctx, percentage, depth.weighted_average_price)?,
        })
    }

    pub fn is_undefined(&self) -> bool {
        self.remain.is_none() && self.payable.is_none()
    }
}

/// The estimator's input state: which tab is active and the (already
/// debounced) percentage entered for it.
///
/// Changing tabs clears the percentage, so estimates stay undefined until
/// the user enters a new value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PercentageInput {
    tab: MarketTab,
    percentage: String,
}

impl PercentageInput {
    pub fn new(tab: MarketTab) -> Self {
        Self {
            tab,
            percentage: String::new(),
        }
    }

    pub fn tab(&self) -> MarketTab {
        self.tab
    }

    pub fn percentage(&self) -> &str {
        &self.percentage
    }

    pub fn set_percentage(&mut self, percentage: impl Into<String>) {
        self.percentage = percentage.into();
    }

    pub fn clear(&mut self) {
        self.percentage.clear();
    }

    /// Activate `tab`. Returns `true` (and clears the percentage) when the
    /// tab actually changed.
    pub fn switch_tab(&mut self, tab: MarketTab) -> bool {
        if self.tab == tab {
            return false;
        }

        tracing::debug!(from = %self.tab, to = %tab, "tab switched, clearing percentage");
        self.tab = tab;
        self.clear();
        true
    }

    /// Estimate against `depth`, the stats of the active book side.
    ///
    /// The trades tab has no book side, so its estimate is undefined.
    pub fn estimate(
        &self,
        ctx: &DecimalContext,
        depth: &DepthStats,
    ) -> NumericResult<FillEstimate> {
        if self.tab.book_side().is_none() {
            return Ok(FillEstimate::default());
        }
        FillEstimate::compute(ctx, &self.percentage, depth)
    }
}
