// ============================================================================
// Numeric Module
// Arbitrary-precision decimal arithmetic with an explicit rounding context
// ============================================================================
//
// This module provides:
// - DecimalContext: parsing and arithmetic bound to one rounding configuration
// - RoundingMode: the rounding rule applied by division and rounding
// - NumericError: Error types for parsing and arithmetic
//
// Design principles:
// - No floating-point operations
// - All arithmetic returns Result (no panics)
// - Rounding configuration is a value, never process-wide state

mod context;
mod errors;
mod exact;

pub use context::{DecimalContext, RoundingMode, DEFAULT_DIVISION_SCALE, MAX_SCALE};
pub(crate) use context::parse_decimal;
pub use errors::{NumericError, NumericResult};
pub use rust_decimal::Decimal;
