// ============================================================================
// Market Domain Model
// ============================================================================

use super::Currency;
use crate::numeric::parse_decimal;
use crate::numeric::{Decimal, NumericResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A listed market (currency pair) as of one feed snapshot.
///
/// Markets are replaced wholesale on each refresh and only read by the
/// engine. `currency2` is the quote currency and selects the display
/// precision.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Market {
    pub id: u64,

    /// Base currency
    pub currency1: Currency,

    /// Quote currency
    pub currency2: Currency,

    /// Exchange market code, e.g. "BTC_USDT"
    pub code: String,

    /// Last price in the quote currency
    pub price: Decimal,

    /// 24h price change in percent, `None` when the feed has no figure
    pub price_change: Option<Decimal>,
}

impl Market {
    pub fn new(
        id: u64,
        currency1: Currency,
        currency2: Currency,
        code: impl Into<String>,
        price: Decimal,
        price_change: Option<Decimal>,
    ) -> Self {
        Self {
            id,
            currency1,
            currency2,
            code: code.into(),
            price,
            price_change,
        }
    }

    /// Parse a feed price string for use with [`Market::new`].
    pub fn parse_price(price: &str) -> NumericResult<Decimal> {
        parse_decimal(price)
    }

    pub fn quote_code(&self) -> &str {
        self.currency2.as_str()
    }

    /// Market code for display: `BTC_USDT` becomes `BTC/USDT`
    pub fn display_code(&self) -> String {
        self.code.replacen('_', "/", 1)
    }
}
