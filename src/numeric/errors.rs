// ============================================================================
// Numeric Errors
// Error types for decimal parsing and arithmetic
// ============================================================================

use thiserror::Error;

/// Errors that can occur while parsing or computing decimal values.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Input string is not a decimal number
    #[error("invalid decimal: {0:?}")]
    InvalidDecimal(String),

    /// Attempted division by exactly zero
    #[error("division by zero")]
    DivisionByZero,

    /// Result does not fit in 96 bits of mantissa
    #[error("arithmetic overflow: result exceeded maximum value")]
    Overflow,

    /// Requested fractional scale is larger than the engine supports
    #[error("invalid scale {0}: at most 28 fractional digits are supported")]
    InvalidScale(u32),
}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;
