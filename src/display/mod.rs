// ============================================================================
// Display Module
// Quote-currency price rounding, signed percentage change, market list paging
// ============================================================================

mod formatter;

pub use formatter::{
    format_market, format_price, format_price_change, markets_for_quote, page, price_direction,
    round_price, round_price_change, total_pages, MarketPage, MarketQuote, PriceDirection,
    CHANGE_PLACES, DEFAULT_PAGE_SIZE, ZERO_CHANGE_GLYPH,
};
