// ============================================================================
// Stats Engine Factory
// Creates statistics engines with validated configuration
// ============================================================================

use crate::domain::config::{ConfigError, StatsConfig};
use crate::engine::MarketStatsEngine;
use crate::numeric::DecimalContext;
use std::time::Duration;

// ============================================================================
// Factory Functions
// ============================================================================

/// Creates a statistics engine from configuration
///
/// # Example
/// ```
/// use market_stats::prelude::*;
///
/// let engine = create_from_config(StatsConfig::bitpin_style()).unwrap();
/// assert_eq!(engine.depth(), 10);
/// ```
pub fn create_from_config(config: StatsConfig) -> Result<MarketStatsEngine, ConfigError> {
    config.validate()?;

    tracing::debug!(
        depth = config.depth,
        division_scale = config.decimal.division_scale(),
        "created market stats engine"
    );

    Ok(MarketStatsEngine::new(config))
}

// ============================================================================
// Builder Pattern
// ============================================================================

/// Builder for creating statistics engines with a fluent API
///
/// # Example
/// ```
/// use market_stats::prelude::*;
/// use market_stats::engine::factory::MarketStatsEngineBuilder;
///
/// let engine = MarketStatsEngineBuilder::new()
///     .with_depth(20)
///     .with_rounding_places("BTC", 8)
///     .build()
///     .unwrap();
/// assert_eq!(engine.config().rounding.places_for("BTC"), 8);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MarketStatsEngineBuilder {
    config: StatsConfig,
}

impl MarketStatsEngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    pub fn from_config(config: StatsConfig) -> Self {
        Self { config }
    }

    /// Set the top-N truncation size
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.config.depth = depth;
        self
    }

    /// Set the display places for one quote currency
    pub fn with_rounding_places(mut self, code: impl Into<String>, places: u32) -> Self {
        self.config = self.config.with_rounding_places(code, places);
        self
    }

    /// Set the display places for unknown quote currencies
    pub fn with_default_places(mut self, places: u32) -> Self {
        self.config = self.config.with_default_places(places);
        self
    }

    /// Set the decimal context
    pub fn with_decimal_context(mut self, decimal: DecimalContext) -> Self {
        self.config.decimal = decimal;
        self
    }

    /// Set the debounce quiet period
    pub fn with_quiet_period(mut self, quiet_period: Duration) -> Self {
        self.config.quiet_period = quiet_period;
        self
    }

    /// Build the engine
    pub fn build(self) -> Result<MarketStatsEngine, ConfigError> {
        create_from_config(self.config)
    }

    /// Get the configuration without building (for inspection)
    pub fn get_config(&self) -> &StatsConfig {
        &self.config
    }
}
