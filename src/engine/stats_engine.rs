// ============================================================================
// Market Statistics Engine
// Configured entry point for every aggregate shown on a market page
// ============================================================================

use crate::display::{self, MarketPage, MarketQuote};
use crate::domain::{Market, MarketTab, Order, StatsConfig, Trade};
use crate::estimator::{FillEstimate, PercentageInput};
use crate::numeric::{DecimalContext, NumericResult};
use crate::stats::{self, DepthStats, TapeStats};

#[cfg(feature = "async")]
use crate::estimator::LiveEstimator;

/// Everything derived for one market page from one feed snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketView {
    pub tab: MarketTab,
    /// Stats of the active book side; empty on the trades tab
    pub depth: DepthStats,
    pub tape: TapeStats,
    pub estimate: FillEstimate,
}

/// Statistics engine bound to one [`StatsConfig`].
///
/// The decimal context, truncation depth and rounding table are fixed at
/// construction, so two engines with different configurations never
/// interfere. All methods are pure functions of their arguments.
#[derive(Debug, Clone)]
pub struct MarketStatsEngine {
    config: StatsConfig,
}

impl MarketStatsEngine {
    /// Create an engine without validating `config`.
    ///
    /// Prefer [`create_from_config`](super::create_from_config), which
    /// validates first.
    pub fn new(config: StatsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StatsConfig {
        &self.config
    }

    pub fn context(&self) -> &DecimalContext {
        &self.config.decimal
    }

    pub fn depth(&self) -> usize {
        self.config.depth
    }

    // ========================================================================
    // Aggregation
    // ========================================================================

    /// The levels that count towards depth statistics
    pub fn top_orders<'a>(&self, orders: &'a [Order]) -> &'a [Order] {
        stats::top_n(orders, self.config.depth)
    }

    /// The trades that count towards tape statistics
    pub fn top_trades<'a>(&self, trades: &'a [Trade]) -> &'a [Trade] {
        stats::top_n(trades, self.config.depth)
    }

    pub fn depth_stats(&self, orders: &[Order]) -> NumericResult<DepthStats> {
        DepthStats::compute(&self.config.decimal, orders, self.config.depth)
    }

    pub fn tape_stats(&self, trades: &[Trade]) -> NumericResult<TapeStats> {
        TapeStats::compute(&self.config.decimal, trades, self.config.depth)
    }

    // ========================================================================
    // Estimation
    // ========================================================================

    /// Estimate a partial fill of `percentage` against `depth`.
    pub fn estimate(&self, percentage: &str, depth: &DepthStats) -> NumericResult<FillEstimate> {
        FillEstimate::compute(&self.config.decimal, percentage, depth)
    }

    /// Estimate from the committed input, respecting its active tab.
    pub fn estimate_input(
        &self,
        input: &PercentageInput,
        depth: &DepthStats,
    ) -> NumericResult<FillEstimate> {
        input.estimate(&self.config.decimal, depth)
    }

    /// A debounced estimator using the configured quiet period.
    #[cfg(feature = "async")]
    pub fn live_estimator(&self, tab: MarketTab) -> LiveEstimator {
        LiveEstimator::new(tab, self.config.quiet_period)
    }

    /// Derive the full market page.
    ///
    /// `orders` is the active side's book as fetched for `input.tab()`; it is
    /// ignored on the trades tab.
    pub fn view(
        &self,
        input: &PercentageInput,
        orders: &[Order],
        trades: &[Trade],
    ) -> NumericResult<MarketView> {
        let depth = match input.tab().book_side() {
            Some(_) => self.depth_stats(orders)?,
            None => DepthStats::default(),
        };

        Ok(MarketView {
            tab: input.tab(),
            depth,
            tape: self.tape_stats(trades)?,
            estimate: self.estimate_input(input, &depth)?,
        })
    }

    /// Derive the market page from raw query values.
    ///
    /// Unknown `tab` names open the buy tab; `percentage` is the committed
    /// input.
    pub fn view_for_query(
        &self,
        tab: &str,
        percentage: &str,
        orders: &[Order],
        trades: &[Trade],
    ) -> NumericResult<MarketView> {
        let mut input = PercentageInput::new(MarketTab::from_query(tab));
        input.set_percentage(percentage);
        self.view(&input, orders, trades)
    }

    // ========================================================================
    // Display
    // ========================================================================

    pub fn format_price(&self, market: &Market) -> String {
        display::format_price(
            &self.config.decimal,
            &self.config.rounding,
            market.price,
            market.quote_code(),
        )
    }

    pub fn format_price_change(&self, market: &Market) -> String {
        display::format_price_change(&self.config.decimal, market.price_change)
    }

    pub fn format_market(&self, market: &Market) -> MarketQuote {
        display::format_market(&self.config.decimal, &self.config.rounding, market)
    }

    /// Display rows for every market quoted in `quote_code`, in feed order
    pub fn market_list(&self, markets: &[Market], quote_code: &str) -> Vec<MarketQuote> {
        display::markets_for_quote(markets, quote_code)
            .into_iter()
            .map(|market| self.format_market(market))
            .collect()
    }

    /// One 1-based page of [`market_list`](Self::market_list)
    pub fn market_page(
        &self,
        markets: &[Market],
        quote_code: &str,
        page: usize,
        page_size: usize,
    ) -> MarketPage {
        let listed = display::markets_for_quote(markets, quote_code);
        let rows = display::page(&listed, page, page_size)
            .iter()
            .map(|market| self.format_market(market))
            .collect();

        MarketPage {
            rows,
            page: page.max(1),
            total_pages: display::total_pages(listed.len(), page_size),
        }
    }
}

impl Default for MarketStatsEngine {
    fn default() -> Self {
        Self::new(StatsConfig::default())
    }
}
