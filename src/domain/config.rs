// ============================================================================
// Statistics Configuration
// Truncation depth, display rounding table, decimal context, debounce period
// ============================================================================

use crate::numeric::{DecimalContext, MAX_SCALE};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of book levels / tape entries aggregated by default
pub const DEFAULT_DEPTH: usize = 10;

/// Fractional digits for prices quoted in Iranian toman
pub const IRT_DP_PLACES: u32 = 0;

/// Fractional digits for prices quoted in tether
pub const USDT_DP_PLACES: u32 = 2;

/// Quiet period before a percentage input reaches the estimator
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

// ============================================================================
// Errors
// ============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("depth must be at least 1")]
    ZeroDepth,

    #[error("quote currency code cannot be empty")]
    EmptyQuoteCode,

    #[error("rounding places for {code} must be at most 28, got {places}")]
    PlacesOutOfRange { code: String, places: u32 },

    #[error("division scale must be at most 28, got {0}")]
    DivisionScaleOutOfRange(u32),

    #[error("invalid configuration document: {0}")]
    Parse(String),
}

// ============================================================================
// Rounding Table
// ============================================================================

/// Display precision per quote currency.
///
/// Unknown quote currencies fall back to `default_places`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoundingTable {
    places: HashMap<String, u32>,
    default_places: u32,
}

impl Default for RoundingTable {
    fn default() -> Self {
        Self::empty(USDT_DP_PLACES)
            .with_places("IRT", IRT_DP_PLACES)
            .with_places("USDT", USDT_DP_PLACES)
    }
}

impl RoundingTable {
    /// A table with no per-currency entries
    pub fn empty(default_places: u32) -> Self {
        Self {
            places: HashMap::new(),
            default_places,
        }
    }

    /// Builder method: set the places for one quote currency
    pub fn with_places(mut self, code: impl Into<String>, places: u32) -> Self {
        self.places.insert(code.into(), places);
        self
    }

    /// Builder method: set the fallback for unknown quote currencies
    pub fn with_default_places(mut self, places: u32) -> Self {
        self.default_places = places;
        self
    }

    pub fn places_for(&self, quote_code: &str) -> u32 {
        self.places
            .get(quote_code)
            .copied()
            .unwrap_or(self.default_places)
    }

    pub fn default_places(&self) -> u32 {
        self.default_places
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (code, places) in &self.places {
            if code.is_empty() {
                return Err(ConfigError::EmptyQuoteCode);
            }
            if *places > MAX_SCALE {
                return Err(ConfigError::PlacesOutOfRange {
                    code: code.clone(),
                    places: *places,
                });
            }
        }
        if self.default_places > MAX_SCALE {
            return Err(ConfigError::PlacesOutOfRange {
                code: "<default>".to_string(),
                places: self.default_places,
            });
        }
        Ok(())
    }
}

// ============================================================================
// Complete Statistics Configuration
// ============================================================================

/// Everything the statistics engine is configured with
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatsConfig {
    /// Top-N truncation applied to book sides and the trade tape
    pub depth: usize,

    /// Display precision per quote currency
    pub rounding: RoundingTable,

    /// Rounding mode and division scale for all arithmetic
    pub decimal: DecimalContext,

    /// Debounce quiet period for the percentage input
    pub quiet_period: Duration,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            rounding: RoundingTable::default(),
            decimal: DecimalContext::default(),
            quiet_period: DEFAULT_QUIET_PERIOD,
        }
    }
}

impl StatsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the top-N truncation size
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Builder method: set the display places for one quote currency
    pub fn with_rounding_places(mut self, code: impl Into<String>, places: u32) -> Self {
        self.rounding = self.rounding.with_places(code, places);
        self
    }

    /// Builder method: set the display places for unknown quote currencies
    pub fn with_default_places(mut self, places: u32) -> Self {
        self.rounding = self.rounding.with_default_places(places);
        self
    }

    /// Builder method: replace the decimal context
    pub fn with_decimal_context(mut self, decimal: DecimalContext) -> Self {
        self.decimal = decimal;
        self
    }

    /// Builder method: set the debounce quiet period
    pub fn with_quiet_period(mut self, quiet_period: Duration) -> Self {
        self.quiet_period = quiet_period;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }

        // Deserialized contexts bypass DecimalContext::new
        let scale = self.decimal.division_scale();
        if scale > MAX_SCALE {
            return Err(ConfigError::DivisionScaleOutOfRange(scale));
        }

        self.rounding.validate()
    }

    /// Load and validate a configuration from JSON.
    ///
    /// Missing fields take their default values.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

// ============================================================================
// Preset Configurations
// ============================================================================

impl StatsConfig {
    /// Toman/tether exchange: IRT prices whole, USDT prices to the cent,
    /// top 10 levels, 500 ms debounce
    pub fn bitpin_style() -> Self {
        Self::default()
    }
}
