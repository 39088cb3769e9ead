// ============================================================================
// Market Statistics Library
// Precision-safe aggregates for live order books and trade tapes
// ============================================================================

//! # Market Stats
//!
//! Deterministic decimal statistics for a market page: order book depth,
//! volume-weighted average prices, partial-fill estimates and display
//! rounding.
//!
//! ## Features
//!
//! - **No binary floats**: every price and quantity is a [`rust_decimal::Decimal`]
//! - **Explicit rounding context**: truncation toward zero by default, bound
//!   into the engine at construction instead of global state
//! - **Top-N windows**: statistics only see the first N levels / trades
//! - **Undefined, not zero**: empty books and empty input yield `None`
//! - **Debounced input** (feature `async`): last-write-wins percentage entry
//!
//! ## Example
//!
//! ```rust
//! use market_stats::prelude::*;
//!
//! let engine = MarketStatsEngine::default();
//!
//! let asks = vec![
//!     Order::parse("2", "2", "10", "20")?,
//!     Order::parse("3", "3", "20", "60")?,
//! ];
//!
//! let depth = engine.depth_stats(&asks)?;
//! println!("Total remain: {:?}", depth.total_remain);
//! println!("Weighted avg: {:?}", depth.weighted_average_price);
//!
//! let estimate = engine.estimate("50", &depth)?;
//! assert_eq!(estimate.payable.unwrap().to_string(), "8");
//! # Ok::<(), market_stats::StatsError>(())
//! ```

#[cfg(feature = "async")]
pub mod debounce;
pub mod display;
pub mod domain;
pub mod engine;
pub mod error;
pub mod estimator;
pub mod numeric;
pub mod stats;

pub use error::{Result, StatsError};

// Re-exports for convenience
pub mod prelude {
    #[cfg(feature = "async")]
    pub use crate::debounce::Debouncer;
    pub use crate::display::{MarketQuote, PriceDirection};
    pub use crate::domain::{
        BookSide, ConfigError, Currency, Market, MarketTab, Order, RoundingTable, StatsConfig,
        Trade,
    };
    pub use crate::engine::{
        create_from_config, MarketStatsEngine, MarketStatsEngineBuilder, MarketView,
    };
    #[cfg(feature = "async")]
    pub use crate::estimator::LiveEstimator;
    pub use crate::estimator::{FillEstimate, PercentageInput};
    pub use crate::numeric::{Decimal, DecimalContext, NumericError, RoundingMode};
    pub use crate::stats::{DepthStats, TapeStats};
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_end_to_end_market_page() {
        let engine = create_from_config(StatsConfig::bitpin_style()).unwrap();

        // Twelve ask levels; only the first ten count
        let mut asks: Vec<Order> = (0..10)
            .map(|i| {
                let price = Decimal::from(100 + i);
                Order::new(Decimal::from(2), Decimal::ONE, price, price)
            })
            .collect();
        asks.push(Order::parse("50", "50", "1", "50").unwrap());
        asks.push(Order::parse("50", "50", "1", "50").unwrap());

        let mut input = PercentageInput::new(MarketTab::Sell);
        input.set_percentage("10");

        let view = engine.view(&input, &asks, &[]).unwrap();
        assert_eq!(view.depth.total_remain, Some(dec("10")));
        assert_eq!(view.depth.total_value, Some(dec("1045")));
        assert_eq!(view.depth.weighted_average_price, Some(dec("104.5")));
        assert_eq!(view.estimate.remain, Some(dec("1")));
        assert_eq!(view.estimate.payable, Some(dec("10.45")));

        // Switching tabs clears the input
        input.switch_tab(MarketTab::Buy);
        let view = engine.view(&input, &asks, &[]).unwrap();
        assert!(view.estimate.is_undefined());
        assert_eq!(view.depth.total_remain, Some(dec("10")));
    }

    #[test]
    fn test_empty_book_is_undefined_not_zero() {
        let engine = MarketStatsEngine::default();
        let depth = engine.depth_stats(&[]).unwrap();

        assert_eq!(depth.total_remain, None);
        assert_eq!(depth.total_value, None);
        assert_eq!(depth.weighted_average_price, None);
        assert!(engine.estimate("50", &depth).unwrap().is_undefined());
    }

    #[test]
    fn test_display_rounding_never_rounds_up() {
        let engine = MarketStatsEngine::default();
        let irt = Market::new(
            1,
            Currency::new("BTC"),
            Currency::new("IRT"),
            "BTC_IRT",
            dec("1234.567"),
            None,
        );
        let usdt = Market {
            currency2: Currency::new("USDT"),
            ..irt.clone()
        };

        assert_eq!(engine.format_price(&irt), "1234");
        assert_eq!(engine.format_price(&usdt), "1234.56");
    }

    #[test]
    fn test_engines_do_not_share_rounding() {
        let truncating = MarketStatsEngine::default();
        let half_up = MarketStatsEngineBuilder::new()
            .with_decimal_context(DecimalContext::new(RoundingMode::HalfUp, 20).unwrap())
            .build()
            .unwrap();

        let market = Market::new(
            1,
            Currency::new("BTC"),
            Currency::new("USDT"),
            "BTC_USDT",
            dec("1234.567"),
            Some(dec("0.999")),
        );

        assert_eq!(truncating.format_price(&market), "1234.56");
        assert_eq!(half_up.format_price(&market), "1234.57");
        assert_eq!(truncating.format_price_change(&market), "+0.99%");
        assert_eq!(half_up.format_price_change(&market), "+1%");
    }

    #[test]
    fn test_malformed_input_fails_loudly() {
        let engine = MarketStatsEngine::default();
        let depth = engine.depth_stats(&[Order::parse("1", "1", "1", "1").unwrap()]).unwrap();

        let err = engine.estimate("1,5", &depth).unwrap_err();
        assert_eq!(err, NumericError::InvalidDecimal("1,5".to_string()));
        assert!(Order::parse("1", "1", "ten", "1").is_err());
    }
}
