// ============================================================================
// Engine Module
// Configured statistics engine and its factory
// ============================================================================

mod stats_engine;

pub mod factory;

pub use factory::{create_from_config, MarketStatsEngineBuilder};
pub use stats_engine::{MarketStatsEngine, MarketView};
