// ============================================================================
// Trade Domain Model
// ============================================================================

use crate::numeric::parse_decimal;
use crate::numeric::{Decimal, DecimalContext, NumericResult};
use chrono::{DateTime, Utc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A match printed on the market's trade tape
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Trade {
    /// Execution time, unix seconds
    pub time: i64,

    /// Execution price
    pub price: Decimal,

    /// Feed-supplied notional
    pub value: Decimal,

    /// Executed quantity
    pub match_amount: Decimal,

    /// Aggressor side as reported by the feed ("buy"/"sell")
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub trade_type: String,

    /// Unique match identifier
    pub match_id: String,
}

impl Trade {
    pub fn new(
        time: i64,
        price: Decimal,
        value: Decimal,
        match_amount: Decimal,
        trade_type: impl Into<String>,
        match_id: impl Into<String>,
    ) -> Self {
        Self {
            time,
            price,
            value,
            match_amount,
            trade_type: trade_type.into(),
            match_id: match_id.into(),
        }
    }

    /// Build a trade from the feed's decimal strings.
    pub fn parse(
        time: i64,
        price: &str,
        value: &str,
        match_amount: &str,
        trade_type: impl Into<String>,
        match_id: impl Into<String>,
    ) -> NumericResult<Self> {
        Ok(Self::new(
            time,
            parse_decimal(price)?,
            parse_decimal(value)?,
            parse_decimal(match_amount)?,
            trade_type,
            match_id,
        ))
    }

    /// Execution time as a UTC timestamp, `None` if `time` is out of range
    pub fn executed_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.time, 0)
    }

    /// `match_amount × price`, this trade's term in the tape VWAP
    pub fn matched_notional(&self, ctx: &DecimalContext) -> NumericResult<Decimal> {
        ctx.mul(self.match_amount, self.price)
    }
}
