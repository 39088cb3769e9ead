// ============================================================================
// Crate Errors
// Single error type for callers that mix numeric, config and feed failures
// ============================================================================

use crate::domain::ConfigError;
use crate::numeric::NumericError;
use thiserror::Error;

#[cfg(feature = "serde")]
use crate::domain::FeedError;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error(transparent)]
    Numeric(#[from] NumericError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[cfg(feature = "serde")]
    #[error(transparent)]
    Feed(#[from] FeedError),
}

pub type Result<T> = std::result::Result<T, StatsError>;
