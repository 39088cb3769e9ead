// ============================================================================
// Order Domain Model
// One price level of an order book side, as supplied by the feed
// ============================================================================

use crate::numeric::parse_decimal;
use crate::numeric::{Decimal, DecimalContext, NumericResult};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Value Objects
// ============================================================================

/// Side of the order book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BookSide {
    Buy,
    Sell,
}

/// The view a user is looking at for one market.
///
/// `Trades` shows the tape, so it has no book side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MarketTab {
    #[default]
    Buy,
    Sell,
    Trades,
}

impl MarketTab {
    pub fn book_side(&self) -> Option<BookSide> {
        match self {
            MarketTab::Buy => Some(BookSide::Buy),
            MarketTab::Sell => Some(BookSide::Sell),
            MarketTab::Trades => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MarketTab::Buy => "buy",
            MarketTab::Sell => "sell",
            MarketTab::Trades => "trades",
        }
    }

    /// Parse a tab from a query value, falling back to `Buy` when unknown.
    pub fn from_query(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl FromStr for MarketTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buy" => Ok(MarketTab::Buy),
            "sell" => Ok(MarketTab::Sell),
            "trades" => Ok(MarketTab::Trades),
            other => Err(format!("unknown market tab: {other}")),
        }
    }
}

impl fmt::Display for MarketTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<BookSide> for MarketTab {
    fn from(side: BookSide) -> Self {
        match side {
            BookSide::Buy => MarketTab::Buy,
            BookSide::Sell => MarketTab::Sell,
        }
    }
}

// ============================================================================
// Order Entity
// ============================================================================

/// A resting order level from the feed.
///
/// `remain <= amount` is expected from the feed but not checked. `value` is
/// the feed's own notional for the level and is never recomputed from
/// `remain × price`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Order {
    /// Original order size
    pub amount: Decimal,

    /// Size still open at this level
    pub remain: Decimal,

    /// Limit price
    pub price: Decimal,

    /// Feed-supplied notional
    pub value: Decimal,
}

impl Order {
    pub fn new(amount: Decimal, remain: Decimal, price: Decimal, value: Decimal) -> Self {
        Self {
            amount,
            remain,
            price,
            value,
        }
    }

    /// Build an order from the feed's decimal strings.
    ///
    /// # Errors
    /// Returns `InvalidDecimal` for the first field that does not parse.
    pub fn parse(amount: &str, remain: &str, price: &str, value: &str) -> NumericResult<Self> {
        Ok(Self {
            amount: parse_decimal(amount)?,
            remain: parse_decimal(remain)?,
            price: parse_decimal(price)?,
            value: parse_decimal(value)?,
        })
    }

    /// `remain × price`, this level's term in the depth VWAP
    pub fn remain_notional(&self, ctx: &DecimalContext) -> NumericResult<Decimal> {
        ctx.mul(self.remain, self.price)
    }
}
