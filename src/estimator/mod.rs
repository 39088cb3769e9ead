// ============================================================================
// Partial-Fill Estimator Module
// Percentage of visible depth -> estimated fill size and cost
// ============================================================================

mod fill;
#[cfg(feature = "async")]
mod live;

pub use fill::{
    estimated_payable, estimated_remain, parse_percentage, FillEstimate, PercentageInput,
};
#[cfg(feature = "async")]
pub use live::LiveEstimator;
