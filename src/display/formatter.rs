// ============================================================================
// Display Formatter
// ============================================================================

use crate::domain::{Market, RoundingTable};
use crate::numeric::{Decimal, DecimalContext};

/// Fractional digits shown for a percentage change, whatever the quote
pub const CHANGE_PLACES: u32 = 2;

/// Prefix for a change that is exactly zero
pub const ZERO_CHANGE_GLYPH: &str = "±";

/// Market list rows per page when no page size is given
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Direction of a price change after rounding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceDirection {
    Up,
    Flat,
    Down,
}

/// Round `price` to the places configured for `quote_code`.
pub fn round_price(
    ctx: &DecimalContext,
    table: &RoundingTable,
    price: Decimal,
    quote_code: &str,
) -> Decimal {
    ctx.round_dp(price, table.places_for(quote_code))
}

/// `1234.567` renders as `"1234.56"` in USDT and `"1234"` in IRT.
///
/// No trailing zeros are added: `1234.5` in USDT stays `"1234.5"`.
pub fn format_price(
    ctx: &DecimalContext,
    table: &RoundingTable,
    price: Decimal,
    quote_code: &str,
) -> String {
    round_price(ctx, table, price, quote_code).to_string()
}

/// Round a change to [`CHANGE_PLACES`]; a missing change is zero.
pub fn round_price_change(ctx: &DecimalContext, change: Option<Decimal>) -> Decimal {
    let rounded = ctx.round_dp(change.unwrap_or(Decimal::ZERO), CHANGE_PLACES);
    // -0.001 truncates to a signed zero
    if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    }
}

pub fn price_direction(ctx: &DecimalContext, change: Option<Decimal>) -> PriceDirection {
    let rounded = round_price_change(ctx, change);
    if rounded.is_zero() {
        PriceDirection::Flat
    } else if rounded.is_sign_positive() {
        PriceDirection::Up
    } else {
        PriceDirection::Down
    }
}

/// `+1.23%`, `±0%` or `-0.5%`.
pub fn format_price_change(ctx: &DecimalContext, change: Option<Decimal>) -> String {
    let rounded = round_price_change(ctx, change);
    let sign = match price_direction(ctx, change) {
        PriceDirection::Up => "+",
        PriceDirection::Flat => ZERO_CHANGE_GLYPH,
        PriceDirection::Down => "-",
    };
    format!("{sign}{}%", rounded.abs())
}

/// A market row ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketQuote {
    pub market_id: u64,
    /// `BTC/USDT`
    pub display_code: String,
    pub base_code: String,
    pub quote_code: String,
    pub price: String,
    pub change: String,
    pub direction: PriceDirection,
}

pub fn format_market(ctx: &DecimalContext, table: &RoundingTable, market: &Market) -> MarketQuote {
    MarketQuote {
        market_id: market.id,
        display_code: market.display_code(),
        base_code: market.currency1.code.clone(),
        quote_code: market.quote_code().to_string(),
        price: format_price(ctx, table, market.price, market.quote_code()),
        change: format_price_change(ctx, market.price_change),
        direction: price_direction(ctx, market.price_change),
    }
}

/// Markets quoted in `quote_code`, in feed order
pub fn markets_for_quote<'a>(markets: &'a [Market], quote_code: &str) -> Vec<&'a Market> {
    markets
        .iter()
        .filter(|market| market.quote_code() == quote_code)
        .collect()
}

// ============================================================================
// Paging
// ============================================================================

/// One page of the market list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketPage {
    pub rows: Vec<MarketQuote>,
    /// 1-based page number
    pub page: usize,
    /// Zero when no market matches
    pub total_pages: usize,
}

fn page_size_or_default(page_size: usize) -> usize {
    if page_size == 0 {
        DEFAULT_PAGE_SIZE
    } else {
        page_size
    }
}

/// Number of pages needed for `rows` entries.
///
/// A `page_size` of zero means [`DEFAULT_PAGE_SIZE`].
pub fn total_pages(rows: usize, page_size: usize) -> usize {
    rows.div_ceil(page_size_or_default(page_size))
}

/// The entries on 1-based `page`.
///
/// Page 0 is read as page 1; pages past the end are empty.
pub fn page<T>(rows: &[T], page: usize, page_size: usize) -> &[T] {
    let size = page_size_or_default(page_size);
    let start = (page.max(1) - 1).saturating_mul(size);
    if start >= rows.len() {
        return &[];
    }
    &rows[start..rows.len().min(start.saturating_add(size))]
}
