// ============================================================================
// Domain Models Module
// Feed entities and engine configuration
// ============================================================================

pub mod config;
pub mod currency;
#[cfg(feature = "serde")]
pub mod feed;
pub mod market;
pub mod order;
pub mod trade;

pub use config::{ConfigError, RoundingTable, StatsConfig};
pub use currency::Currency;
#[cfg(feature = "serde")]
pub use feed::{parse_markets, parse_orders, parse_trades, FeedError};
pub use market::Market;
pub use order::{BookSide, MarketTab, Order};
pub use trade::Trade;
